//! Structural checks over the live part of the graph.
//!
//! A graph is runnable to completion when every input slot has a producer,
//! every producer has somebody consuming it, and there are no cycles.

use crate::pipeline::executor::{Connection, NodeSlot};
use crate::pipeline::id::NodeId;
use serde::Serialize;
use std::fmt;

/// One structural problem found by [`Pipeline::validate`](crate::pipeline::Pipeline::validate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum GraphIssue {
    /// An input slot has no live producer.
    UnfilledSlot { node: NodeId, slot: usize },
    /// A node with an output feeds nothing.
    NoDependents { node: NodeId },
    /// Some nodes sit on a cycle; only `scheduled` of `total` could be ordered.
    Cycle { scheduled: usize, total: usize },
}

impl fmt::Display for GraphIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphIssue::UnfilledSlot { node, slot } => {
                write!(f, "node {} has no producer in slot {}", node, slot)
            }
            GraphIssue::NoDependents { node } => {
                write!(f, "node {} produces output nobody consumes", node)
            }
            GraphIssue::Cycle { scheduled, total } => write!(
                f,
                "graph has a cycle ({} of {} nodes can be ordered)",
                scheduled, total
            ),
        }
    }
}

pub(crate) fn validate(nodes: &[NodeSlot], connections: &[Connection]) -> Vec<GraphIssue> {
    let n = nodes.len();
    let mut issues = Vec::new();

    let mut filled: Vec<Vec<bool>> = nodes
        .iter()
        .map(|slot| vec![false; slot.shape.arity])
        .collect();
    let mut has_dependents = vec![false; n];
    let mut in_degree = vec![0u32; n];
    let mut adj: Vec<Vec<usize>> = vec![Vec::new(); n];

    for c in connections {
        let from = c.src.index();
        let to = c.dst.index();
        if from >= n || to >= n || !nodes[from].alive || !nodes[to].alive {
            continue;
        }
        if let Some(used) = filled[to].get_mut(c.slot) {
            *used = true;
        }
        has_dependents[from] = true;
        adj[from].push(to);
        in_degree[to] += 1;
    }

    for (i, slot) in nodes.iter().enumerate() {
        if !slot.alive {
            continue;
        }
        let node = NodeId::from_index(i);
        for (index, used) in filled[i].iter().enumerate() {
            if !used {
                issues.push(GraphIssue::UnfilledSlot { node, slot: index });
            }
        }
        if slot.shape.output.is_some() && !has_dependents[i] {
            issues.push(GraphIssue::NoDependents { node });
        }
    }

    // Kahn's algorithm over live nodes
    let total = nodes.iter().filter(|slot| slot.alive).count();
    let mut queue: Vec<usize> = (0..n)
        .filter(|&i| nodes[i].alive && in_degree[i] == 0)
        .collect();
    let mut scheduled = 0;

    while let Some(node) = queue.pop() {
        scheduled += 1;
        for &next in &adj[node] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                queue.push(next);
            }
        }
    }

    if scheduled != total {
        tracing::warn!(
            "Pipeline graph has a cycle! Only {} of {} nodes can be ordered.",
            scheduled,
            total
        );
        issues.push(GraphIssue::Cycle { scheduled, total });
    }

    issues
}
