//! Snapshot of the pipeline graph for display and tooling.
//!
//! The DOT rendering is output only; nothing parses it back.

use crate::pipeline::id::NodeId;
use crate::pipeline::poll::PollSignal;
use serde::Serialize;
use std::fmt;

/// Snapshot of a single live node.
#[derive(Debug, Clone, Serialize)]
pub struct NodeSnapshot {
    pub id: NodeId,
    pub name: String,
    pub arity: usize,
    /// Output type name, `None` for sinks.
    pub output: Option<String>,
    /// Last signal, `None` before the first poll.
    pub signal: Option<PollSignal>,
}

/// Snapshot of a single recorded connection.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionSnapshot {
    pub src: NodeId,
    pub src_name: String,
    pub dst: NodeId,
    pub dst_name: String,
    pub slot: usize,
}

/// Complete topology snapshot of the pipeline graph.
#[derive(Debug, Clone, Serialize)]
pub struct TopologySnapshot {
    pub graph_name: String,
    pub nodes: Vec<NodeSnapshot>,
    pub connections: Vec<ConnectionSnapshot>,
}

impl TopologySnapshot {
    pub fn to_dot(&self) -> String {
        self.to_string()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

const DOT_KEYWORDS: [&str; 6] = ["node", "edge", "graph", "digraph", "subgraph", "strict"];

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Quote a `"<id> <name>"` label for DOT.
fn label(id: NodeId, name: &str) -> String {
    format!("\"{} {}\"", id, escape(name))
}

/// Graph name as a DOT id: bare if it is a plain identifier, quoted otherwise.
fn graph_id(name: &str) -> String {
    let plain = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !DOT_KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(name));
    if plain {
        name.to_string()
    } else {
        format!("\"{}\"", escape(name))
    }
}

impl fmt::Display for TopologySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph {} {{", graph_id(&self.graph_name))?;
        for node in &self.nodes {
            writeln!(f, "  {}", label(node.id, &node.name))?;
        }
        writeln!(f)?;
        for c in &self.connections {
            writeln!(
                f,
                "  {} -> {}",
                label(c.src, &c.src_name),
                label(c.dst, &c.dst_name)
            )?;
        }
        writeln!(f, "}}")
    }
}
