//! GML text encoder
//!
//! Serializes a graph's attribute model to the line-oriented GML dialect:
//! one `<indent><key> <value>` token per line, two-space indentation,
//! bracketed nested blocks, numeric character references for anything
//! outside printable ASCII. Output is deterministic: nodes in id-assignment
//! order, attributes in insertion order.

use thiserror::Error;

use super::value::{AttrMap, Value};

/// The synthetic node key whose value is always emitted as a quoted string,
/// whatever the underlying type.
const LABEL_KEY: &str = "label";

/// Graph-level keys owned by the encoder itself.
const GRAPH_RESERVED: [&str; 4] = ["directed", "multigraph", "node", "edge"];

/// Fatal encoding failures. The encoder never emits partial blocks: an
/// error surfaces before any line of the offending attribute is produced.
#[derive(Debug, Error)]
pub enum GmlError {
    #[error("{key:?} is not a valid GML key")]
    InvalidKey { key: String },

    #[error("value under {key:?} cannot be encoded: {reason}")]
    Unencodable { key: String, reason: &'static str },

    #[error("failed to write GML output")]
    Io(#[from] std::io::Error),
}

/// A graph ready for serialization. Pure attribute model: the encoder knows
/// nothing about what the nodes mean.
#[derive(Debug, Default)]
pub struct GmlGraph {
    pub directed: bool,
    pub multigraph: bool,
    pub attrs: AttrMap,
    pub nodes: Vec<GmlNode>,
    pub edges: Vec<GmlEdge>,
}

#[derive(Debug)]
pub struct GmlNode {
    pub id: i64,
    pub label: String,
    pub attrs: AttrMap,
}

#[derive(Debug)]
pub struct GmlEdge {
    pub source: i64,
    pub target: i64,
    /// Distinguishing key, emitted only for multigraphs.
    pub key: Option<i64>,
    pub attrs: AttrMap,
}

/// Encode a full graph to GML lines.
pub fn generate(graph: &GmlGraph) -> Result<Vec<String>, GmlError> {
    let mut lines = Vec::new();
    lines.push("graph [".to_string());

    // Directed/multigraph markers appear only when set.
    if graph.directed {
        lines.push("  directed 1".to_string());
    }
    if graph.multigraph {
        lines.push("  multigraph 1".to_string());
    }
    for (key, value) in &graph.attrs {
        if GRAPH_RESERVED.contains(&key.as_str()) {
            continue;
        }
        encode_attr(&mut lines, key, value, 1, false)?;
    }

    for node in &graph.nodes {
        lines.push("  node [".to_string());
        lines.push(format!("    id {}", node.id));
        lines.push(format!("    label \"{}\"", escape(&node.label)));
        for (key, value) in &node.attrs {
            if key == "id" || key == LABEL_KEY {
                continue;
            }
            encode_attr(&mut lines, key, value, 2, false)?;
        }
        lines.push("  ]".to_string());
    }

    for edge in &graph.edges {
        lines.push("  edge [".to_string());
        lines.push(format!("    source {}", edge.source));
        lines.push(format!("    target {}", edge.target));
        if graph.multigraph {
            if let Some(key) = edge.key {
                lines.push(format!("    key {key}"));
            }
        }
        for (key, value) in &edge.attrs {
            if key == "source" || key == "target" {
                continue;
            }
            if graph.multigraph && key == "key" {
                continue;
            }
            encode_attr(&mut lines, key, value, 2, false)?;
        }
        lines.push("  ]".to_string());
    }

    lines.push("]".to_string());
    Ok(lines)
}

/// Encode one (key, value) attribute at the given nesting depth.
fn encode_attr(
    lines: &mut Vec<String>,
    key: &str,
    value: &Value,
    depth: usize,
    in_list: bool,
) -> Result<(), GmlError> {
    if !valid_key(key) {
        return Err(GmlError::InvalidKey {
            key: key.to_string(),
        });
    }
    let indent = "  ".repeat(depth);
    match value {
        Value::Bool(b) => {
            let literal = if *b { "1" } else { "0" };
            if key == LABEL_KEY {
                lines.push(format!("{indent}{key} \"{literal}\""));
            } else {
                lines.push(format!("{indent}{key} {literal}"));
            }
        }
        Value::Int(i) => {
            if key == LABEL_KEY {
                lines.push(format!("{indent}{key} \"{i}\""));
            } else {
                lines.push(format!("{indent}{key} {i}"));
            }
        }
        Value::Float(x) => {
            let text = format_float(*x);
            if key == LABEL_KEY {
                lines.push(format!("{indent}{key} \"{text}\""));
            } else {
                lines.push(format!("{indent}{key} {text}"));
            }
        }
        Value::Str(s) => {
            lines.push(format!("{indent}{key} \"{}\"", escape(s)));
        }
        Value::Map(map) => {
            lines.push(format!("{indent}{key} ["));
            for (k, v) in map {
                encode_attr(lines, k, v, depth + 1, false)?;
            }
            lines.push(format!("{indent}]"));
        }
        Value::List(items) => {
            let reason = if in_list {
                Some("list nested inside a list")
            } else if key == LABEL_KEY {
                Some("list under the label key")
            } else if items.is_empty() {
                Some("empty list")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(GmlError::Unencodable {
                    key: key.to_string(),
                    reason,
                });
            }
            // Repeated blocks under the same key, no outer list marker.
            for item in items {
                encode_attr(lines, key, item, depth + 1, true)?;
            }
        }
    }
    Ok(())
}

fn valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric())
}

/// Canonical GML real literal: shortest round-trip text, uppercase exponent
/// marker, and always a decimal point in the mantissa.
fn format_float(value: f64) -> String {
    if !value.is_finite() {
        return format!("{value:?}").to_ascii_uppercase();
    }
    let decimal = format!("{value:?}");
    let scientific = format!("{value:e}");
    let shorter = if scientific.len() < decimal.len() {
        scientific
    } else {
        decimal
    };
    let mut text = shorter.to_ascii_uppercase();
    match text.find('E') {
        Some(epos) if !text[..epos].contains('.') => text.insert_str(epos, ".0"),
        None if !text.contains('.') => text.push_str(".0"),
        _ => {}
    }
    text
}

/// Replace every character outside printable ASCII, plus `&` and `"`, with
/// its numeric character reference.
pub fn escape(text: &str) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch == '&' || ch == '"' || !(' '..='~').contains(&ch) {
            let _ = write!(out, "&#{};", ch as u32);
        } else {
            out.push(ch);
        }
    }
    out
}
