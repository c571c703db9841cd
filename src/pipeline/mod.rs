//! Hazard analysis pipeline
//!
//! Orchestrates the full run:
//! 1. Normalize worksheet rows into records
//! 2. Build the deduplicated graph
//! 3. Back-date severity to causal ancestors
//! 4. Prune (focus event, severity floor) and sweep dangling edges
//! 5. Attach presentation colours
//!
//! Strictly synchronous; the graph is owned by the single run and handed
//! back for encoding.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::graph::HazardGraph;
use crate::ingest::{self, Cell};
use crate::models::Severity;

/// Options for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Minimum severity to keep. `F` keeps everything.
    pub min_severity: Severity,
    /// Focus event as a (label, group name) pair.
    pub focus: Option<(String, String)>,
    pub colour_nodes: bool,
    pub colour_edges: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            min_severity: Severity::F,
            focus: None,
            colour_nodes: true,
            colour_edges: true,
        }
    }
}

/// Counters from one pipeline run.
#[derive(Debug, Default)]
pub struct PipelineStats {
    /// Raw rows seen.
    pub rows: usize,
    /// Rows that produced a record.
    pub records: usize,
    /// Incomplete or not-relevant rows.
    pub skipped: usize,
    /// Nodes surviving pruning (groups included).
    pub nodes: usize,
    pub edges: usize,
}

impl PipelineStats {
    pub fn summary(&self) -> String {
        format!(
            "{} rows ({} skipped), {} records, {} nodes, {} edges",
            self.rows, self.skipped, self.records, self.nodes, self.edges
        )
    }
}

/// Run the pipeline over raw rows and return the finished graph.
pub fn run(rows: &[Vec<Cell>], options: &PipelineOptions) -> Result<(HazardGraph, PipelineStats)> {
    let mut stats = PipelineStats {
        rows: rows.len(),
        ..PipelineStats::default()
    };

    let mut graph = HazardGraph::new();
    for (index, row) in rows.iter().enumerate() {
        let record = ingest::normalize_row(row)
            .with_context(|| format!("failed to ingest row {}", index + 1))?;
        let Some(record) = record else {
            stats.skipped += 1;
            debug!(row = index + 1, "skipped incomplete or not-relevant row");
            continue;
        };
        graph
            .ingest_record(&record)
            .with_context(|| format!("failed to ingest row {}", index + 1))?;
        stats.records += 1;
    }
    info!(
        records = stats.records,
        skipped = stats.skipped,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built hazard graph"
    );

    graph
        .propagate_severity()
        .context("severity propagation failed")?;

    if let Some((label, group)) = &options.focus {
        graph
            .isolate(label, group)
            .with_context(|| format!("cannot focus on {label:?} in group {group:?}"))?;
    }
    graph.limit_severity(options.min_severity);

    if options.colour_nodes {
        graph.colour_nodes();
    }
    if options.colour_edges {
        graph.colour_edges();
    }
    graph.drop_dangling_edges();

    stats.nodes = graph.node_count();
    stats.edges = graph.edge_count();
    info!("{}", stats.summary());
    Ok((graph, stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_empty_graph() {
        let (graph, stats) = run(&[], &PipelineOptions::default()).unwrap();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(stats.rows, 0);
        assert_eq!(stats.summary(), "0 rows (0 skipped), 0 records, 0 nodes, 0 edges");
    }

    #[test]
    fn test_malformed_rows_are_counted_not_fatal() {
        let rows = vec![vec![Cell::Empty; 19], Vec::new()];
        let (graph, stats) = run(&rows, &PipelineOptions::default()).unwrap();
        assert_eq!(stats.skipped, 2);
        assert_eq!(stats.records, 0);
        assert_eq!(graph.node_count(), 0);
    }
}
