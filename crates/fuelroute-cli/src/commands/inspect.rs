use std::io;
use std::path::Path;

use anyhow::{Context, Result};

use fuelroute_lib::load_graph;

use crate::output::{render_graph, GraphSummary, OutputFormat};

/// Handle the `inspect` subcommand: summarise nodes and outgoing edges.
pub fn handle_inspect(graph_path: &Path, format: OutputFormat) -> Result<()> {
    let graph = load_graph(graph_path)
        .with_context(|| format!("failed to load graph from {}", graph_path.display()))?;
    let summary = GraphSummary::from_graph(&graph);

    let mut stdout = io::stdout().lock();
    render_graph(&mut stdout, &summary, format).context("failed to write graph summary")?;
    Ok(())
}
