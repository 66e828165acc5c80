//! Output formatting for route plans and graph summaries.
//!
//! Renderers write to any [`Write`] so commands print to stdout while tests
//! capture into a buffer.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use fuelroute_lib::{Graph, HopProjection, RoutePlan};

use crate::terminal::{Palette, Tone};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Per-node summary used by `inspect`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeSummary {
    pub name: String,
    pub outgoing: usize,
}

/// Graph summary used by `inspect`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphSummary {
    pub node_count: usize,
    pub edge_count: usize,
    pub nodes: Vec<NodeSummary>,
}

impl GraphSummary {
    pub fn from_graph(graph: &Graph) -> Self {
        let nodes = graph
            .nodes()
            .enumerate()
            .map(|(index, name)| NodeSummary {
                name: name.to_string(),
                outgoing: graph.edges(index).len(),
            })
            .collect();
        Self {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            nodes,
        }
    }
}

pub fn render_route(
    out: &mut impl Write,
    plan: &RoutePlan,
    format: OutputFormat,
    palette: &Palette,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => render_route_text(out, plan, palette),
        OutputFormat::Json => render_json(out, plan),
    }
}

pub fn render_graph(
    out: &mut impl Write,
    summary: &GraphSummary,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(
                out,
                "Graph with {} nodes and {} edges:",
                summary.node_count, summary.edge_count
            )?;
            for node in &summary.nodes {
                writeln!(out, " - {} ({} outgoing)", node.name, node.outgoing)?;
            }
            Ok(())
        }
        OutputFormat::Json => render_json(out, summary),
    }
}

fn render_json(out: &mut impl Write, value: &impl Serialize) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

/// Render a route plan as tagged steps followed by totals.
///
/// Distances and fuel are shown per step only when the plan carries hop
/// projections, i.e. when a tank capacity was given.
pub fn render_route_text(
    out: &mut impl Write,
    plan: &RoutePlan,
    palette: &Palette,
) -> io::Result<()> {
    writeln!(
        out,
        "Route from {} to {} ({} hops; strategy: {}):",
        plan.start,
        plan.goal,
        plan.hop_count(),
        plan.strategy
    )?;

    let last = plan.steps.len().saturating_sub(1);
    for (index, name) in plan.steps.iter().enumerate() {
        // Hop `index` departs from this step; hop `index - 1` arrives here.
        let departing = plan.hops.get(index);
        let arriving = index.checked_sub(1).and_then(|i| plan.hops.get(i));
        let (tag, tone) = step_tag(index, last, departing);

        write!(
            out,
            " {} {}",
            palette.paint(tone, tag),
            palette.paint(Tone::Node, name)
        )?;
        if let Some(hop) = arriving {
            write!(
                out,
                " {}{}{}",
                palette.paint(Tone::Muted, "("),
                palette.paint(Tone::Distance, format!("{:.2}", hop.distance)),
                palette.paint(Tone::Muted, format!(" from {})", hop.from))
            )?;
        }
        if let Some(hop) = departing.filter(|hop| hop.is_refuel_stop()) {
            write!(
                out,
                " {}",
                palette.paint(Tone::FuelAmount, format!("[+{:.2} fuel]", hop.refuelled))
            )?;
        }
        writeln!(out)?;
    }

    writeln!(out, "\nTotal distance: {:.2}", plan.distance)?;
    if plan.detour() > 0.0 {
        writeln!(
            out,
            "Shortest distance ignoring fuel: {:.2} (detour {:.2})",
            plan.plain_distance,
            plan.detour()
        )?;
    }
    writeln!(out, "Refuelling stops: {}", plan.stops)?;
    if let Some(hop) = plan.hops.last() {
        writeln!(out, "Fuel remaining: {:.2}", hop.fuel_after)?;
    }
    Ok(())
}

fn step_tag(index: usize, last: usize, departing: Option<&HopProjection>) -> (&'static str, Tone) {
    if index == 0 {
        ("STRT", Tone::Start)
    } else if index == last {
        ("GOAL", Tone::Goal)
    } else if departing.is_some_and(HopProjection::is_refuel_stop) {
        ("FUEL", Tone::Refuel)
    } else {
        ("PASS", Tone::Pass)
    }
}
