//! CLI definition and top-level run

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crate::gml;
use crate::ingest::workbook;
use crate::models::Severity;
use crate::pipeline::{self, PipelineOptions};

/// Hazgraph - graph-powered HAZOP analysis
#[derive(Parser, Debug)]
#[command(name = "hazgraph")]
#[command(
    version,
    about = "Turn a HAZOP hazard worksheet into a risk-propagated GML graph",
    long_about = "Hazgraph reads cause/event/consequence triples out of a HAZOP worksheet, \
builds a directed graph grouped by component, back-dates each consequence's severity to \
every causal ancestor, and writes the result as GML for a graph viewer.",
    after_help = "\
Examples:
  hazgraph plant.xlsm -t 'mHAZOP - Module'          Full graph, every severity
  hazgraph plant.xlsm -t HAZOP -r C                 Keep only severity C and worse
  hazgraph plant.xlsm -t HAZOP -s no_flow Pump      One event and its causal neighbourhood
  hazgraph plant.xlsm -t HAZOP --no-edge-colour     Leave edges unstyled"
)]
pub struct Cli {
    /// Path to the hazard workbook (.xlsx / .xlsm)
    pub file: PathBuf,

    /// Name of the worksheet holding the hazard table
    #[arg(short = 't', long)]
    pub sheet: String,

    /// Path of the GML file to write
    #[arg(short = 'o', long, default_value = "hazard-graph.gml")]
    pub output: PathBuf,

    /// Minimum severity to keep, from F (keep everything) to A (worst only)
    #[arg(short = 'r', long, default_value = "F")]
    pub min_severity: Severity,

    /// Focus on one event and its causal neighbourhood; underscores stand
    /// for spaces in both values
    #[arg(short = 's', long, num_args = 2, value_names = ["EVENT", "GROUP"])]
    pub focus: Option<Vec<String>>,

    /// Leave event nodes unfilled
    #[arg(long)]
    pub no_node_colour: bool,

    /// Leave edges unstyled
    #[arg(long)]
    pub no_edge_colour: bool,
}

/// Run the tool end to end: workbook in, GML artifact out.
pub fn run(cli: Cli) -> Result<()> {
    let rows = workbook::read_rows(&cli.file, &cli.sheet)?;

    let focus = cli.focus.as_ref().map(|pair| {
        // Labels were case-folded at ingestion; group names were not.
        let label = pair[0].replace('_', " ").to_lowercase();
        let group = pair[1].replace('_', " ");
        (label, group)
    });
    let options = PipelineOptions {
        min_severity: cli.min_severity,
        focus,
        colour_nodes: !cli.no_node_colour,
        colour_edges: !cli.no_edge_colour,
    };

    let (graph, stats) = pipeline::run(&rows, &options)?;

    gml::write_gml(&graph.to_gml(), &cli.output)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    info!(
        output = %cli.output.display(),
        "wrote GML graph ({})",
        stats.summary()
    );
    Ok(())
}
