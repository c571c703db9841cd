//! GML ("graph markup") serialization
//!
//! A self-contained encoder for the nested key-value text format consumed
//! by graph viewers. Only the attribute model lives here; mapping domain
//! graphs onto [`GmlGraph`] is the caller's job.

pub mod encode;
pub mod value;

pub use encode::{escape, generate, GmlEdge, GmlError, GmlGraph, GmlNode};
pub use value::{AttrMap, Value};

use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a graph to `path`, one line per token, trailing newline included.
///
/// Lines are fully generated before the file is opened, so encoding errors
/// never leave an artifact behind; an I/O failure mid-write can.
pub fn write_gml(graph: &GmlGraph, path: &Path) -> Result<(), GmlError> {
    let lines = generate(graph)?;
    let file = std::fs::File::create(path)?;
    let mut out = BufWriter::new(file);
    for line in &lines {
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_gml_roundtrips_lines() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.gml");
        let graph = GmlGraph {
            directed: true,
            ..GmlGraph::default()
        };
        write_gml(&graph, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "graph [\n  directed 1\n]\n");
    }
}
