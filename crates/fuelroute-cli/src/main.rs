use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use fuelroute_cli::commands::inspect::handle_inspect;
use fuelroute_cli::commands::route::{handle_route, RouteArgs};
use fuelroute_cli::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Fuel-aware route planning over weighted graphs")]
struct Cli {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Disable ANSI colors in text output.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan a route between two nodes, refuelling when one tank is not enough.
    Route {
        /// JSON adjacency map (`{"A": {"B": 4}}`).
        #[arg(long)]
        graph: PathBuf,
        /// Starting node name.
        #[arg(long = "from")]
        from: String,
        /// Destination node name.
        #[arg(long = "to")]
        to: String,
        /// Tank capacity. Without it the plain shortest path is returned.
        #[arg(long)]
        capacity: Option<f64>,
        /// Fuel consumed per unit of distance (default: 0.5).
        #[arg(long, requires = "capacity")]
        efficiency: Option<f64>,
        /// JSON object mapping node names to available fuel.
        #[arg(long)]
        stock: Option<PathBuf>,
    },
    /// Summarise the nodes and edges of a graph file.
    Inspect {
        #[arg(long)]
        graph: PathBuf,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Route {
            graph,
            from,
            to,
            capacity,
            efficiency,
            stock,
        } => handle_route(&RouteArgs {
            graph,
            from,
            to,
            capacity,
            efficiency,
            stock,
            format: cli.format,
            no_color: cli.no_color,
        }),
        Command::Inspect { graph } => handle_inspect(&graph, cli.format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
