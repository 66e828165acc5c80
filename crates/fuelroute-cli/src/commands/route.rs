use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};

use fuelroute_lib::{
    load_fuel_stock, load_graph, plan_route, FuelParameters, FuelStock, RouteRequest,
    DEFAULT_FUEL_EFFICIENCY,
};

use crate::output::{render_route, OutputFormat};
use crate::terminal::Palette;

/// Arguments of the `route` subcommand after parsing.
#[derive(Debug, Clone)]
pub struct RouteArgs {
    pub graph: PathBuf,
    pub from: String,
    pub to: String,
    /// Tank capacity; without it the plain shortest path is returned.
    pub capacity: Option<f64>,
    pub efficiency: Option<f64>,
    pub stock: Option<PathBuf>,
    pub format: OutputFormat,
    pub no_color: bool,
}

impl RouteArgs {
    /// Build the library request; efficiency only matters with a capacity.
    pub fn to_request(&self, stock: FuelStock) -> RouteRequest {
        let request = RouteRequest::new(&self.from, &self.to).with_stock(stock);
        match self.capacity {
            Some(capacity) => request.with_fuel(FuelParameters::new(
                capacity,
                self.efficiency.unwrap_or(DEFAULT_FUEL_EFFICIENCY),
            )),
            None => request,
        }
    }
}

/// Handle the `route` subcommand.
pub fn handle_route(args: &RouteArgs) -> Result<()> {
    let graph = load_graph(&args.graph)
        .with_context(|| format!("failed to load graph from {}", args.graph.display()))?;
    let stock = match &args.stock {
        Some(path) => load_fuel_stock(path)
            .with_context(|| format!("failed to load fuel stock from {}", path.display()))?,
        None => FuelStock::new(),
    };

    let request = args.to_request(stock);
    let outcome = plan_route(&graph, &request).context("invalid route request")?;
    tracing::debug!(outcome = outcome.label(), stops = outcome.stop_count(), "route planned");

    let plan = outcome
        .into_result()
        .with_context(|| format!("failed to plan a route from {} to {}", args.from, args.to))?;

    let palette = if args.no_color {
        Palette::plain()
    } else {
        Palette::from_env()
    };
    let mut stdout = io::stdout().lock();
    render_route(&mut stdout, &plan, args.format, &palette).context("failed to write route")?;
    Ok(())
}
