//! Hazgraph - graph-powered HAZOP analysis CLI
//!
//! Reads cause/event/consequence triples out of a hazard worksheet, builds
//! a severity-propagated directed graph, and writes it as GML.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hazgraph::cli;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    // Parse CLI args and run
    let cli = cli::Cli::parse();
    cli::run(cli)
}
