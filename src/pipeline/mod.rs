//! Typed dataflow graph and its polling scheduler.
//!
//! Nodes are wired output-to-slot and advanced one tick at a time by a single
//! thread. Each consumer pulls from its producers while it is being polled.
//!
//! # Architecture
//!
//! ```text
//! [IterSource] ──► [Map] ──► [Collect]
//!                      └──► [ChannelSink]
//! ```
//!
//! # Design
//!
//! - **Arena of boxed nodes**: `NodeId` is a dense index; erased slots stay
//!   behind as tombstones so ids are never reused.
//! - **Typed slots**: `Component::Input` is a tuple; `connect` compares the
//!   producer's output type against the slot type.
//! - **Pull on poll**: no topological sort; nodes run in creation order and
//!   read whatever their producers currently expose.
//! - **Monotonic close**: a node that reports `Closed` is never polled again.

pub mod error;
pub mod executor;
pub mod id;
pub mod node;
pub mod nodes;
pub mod poll;
pub mod slot;
pub mod topology;
pub mod validation;

pub use error::{PipelineError, PipelineErrorKind, PipelineResult};
pub use executor::{Connection, Pipeline};
pub use id::NodeId;
pub use node::{AsProducer, AsSink, Component, Node, Producer, Register, Sink, Source, Upstream};
pub use poll::PollSignal;
pub use slot::{InputTuple, Inputs, ValueType, Wire};
pub use topology::{ConnectionSnapshot, NodeSnapshot, TopologySnapshot};
pub use validation::GraphIssue;
