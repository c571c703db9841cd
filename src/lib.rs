//! Hazgraph - graph-powered HAZOP analysis
//!
//! Turns tabular hazard-analysis worksheets into directed cause/consequence
//! graphs: events are deduplicated per component group, worst-case severity
//! is propagated backward along causal edges, and the result is written as
//! GML for an external graph viewer.

pub mod cli;
pub mod gml;
pub mod graph;
pub mod ingest;
pub mod models;
pub mod pipeline;
