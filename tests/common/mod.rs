//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;
pub mod mock_helpers;

use tickgraph::pipeline::{NodeId, Pipeline};

/// Step until quiescent, panicking if it takes more than `max_ticks`.
pub fn run_within(pipeline: &mut Pipeline, max_ticks: u64) {
    assert!(
        pipeline.run_bounded(max_ticks),
        "Pipeline did not become quiescent within {} ticks",
        max_ticks
    );
}

/// Render the pipeline and return the node lines only.
pub fn dot_node_lines(pipeline: &Pipeline) -> Vec<String> {
    pipeline
        .to_string()
        .lines()
        .skip(1)
        .take_while(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Assert that `id` is not reachable through the registry.
pub fn assert_gone(pipeline: &Pipeline, id: NodeId) {
    assert!(pipeline.get_node(id).is_none(), "{:?} should be gone", id);
    assert!(!pipeline.is_live(id));
}
