//! Pipeline-specific error types.
//!
//! Only wiring can fail. Everything else in the engine reports problems
//! through `Option` results or the poll signal.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// What went wrong while installing a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineErrorKind {
    /// Source or destination id does not name a live node.
    InvalidNodeId,
    /// The slot index is outside the destination's input tuple.
    NoSuchSlot,
    /// The slot already received its one connection.
    SlotAlreadyUsed,
    /// The source's output type is not the slot's element type.
    ConnectionTypeMismatch,
}

impl PipelineErrorKind {
    pub fn message(self) -> &'static str {
        match self {
            PipelineErrorKind::InvalidNodeId => "invalid node ID",
            PipelineErrorKind::NoSuchSlot => "no such slot",
            PipelineErrorKind::SlotAlreadyUsed => "slot already used",
            PipelineErrorKind::ConnectionTypeMismatch => "connection type mismatch",
        }
    }
}

impl fmt::Display for PipelineErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Error returned by [`Pipeline::connect`](crate::pipeline::Pipeline::connect)
/// and by a node's own wiring hook.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[error("{kind}")]
pub struct PipelineError {
    kind: PipelineErrorKind,
}

impl PipelineError {
    pub fn new(kind: PipelineErrorKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> PipelineErrorKind {
        self.kind
    }
}

impl From<PipelineErrorKind> for PipelineError {
    fn from(kind: PipelineErrorKind) -> Self {
        Self::new(kind)
    }
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
