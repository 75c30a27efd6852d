//! # tickgraph: typed dataflow graphs on a polling scheduler
//!
//! A [`Pipeline`] owns a set of nodes wired output-to-slot. Calling
//! [`Pipeline::step`] polls every live node once; each node reports whether it
//! produced something, has nothing yet, or is finished for good. The pipeline
//! is done once every node has finished.
//!
//! ## Architecture
//!
//! - **Pipeline**: node registry, connection table and tick loop
//! - **Nodes**: user types implementing [`Node`] and [`Component`], plus a few
//!   stock ones in [`pipeline::nodes`]
//! - **Config**: TOML settings for naming, tick limits and logging
//!
//! ## Example
//!
//! ```
//! use tickgraph::pipeline::nodes::{Collect, IterSource, Map};
//! use tickgraph::Pipeline;
//!
//! let mut pipeline = Pipeline::new();
//! let numbers = pipeline.create_node(IterSource::new(1..=3));
//! let squares = pipeline.create_node(Map::new(|x: &i32| x * x));
//! let out = pipeline.create_node(Collect::<i32>::new());
//!
//! pipeline.connect(numbers, squares, 0)?;
//! pipeline.connect(squares, out, 0)?;
//! pipeline.run();
//!
//! let collected = pipeline.get_node_as::<Collect<i32>>(out).unwrap();
//! assert_eq!(collected.items(), &[1, 4, 9]);
//! # Ok::<(), tickgraph::PipelineError>(())
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;

// Re-export commonly used types
pub use config::PipelineConfig;
pub use error::{Result, TickGraphError};
pub use pipeline::{
    Component, Node, NodeId, Pipeline, PipelineError, PipelineErrorKind, PollSignal, Producer,
};
