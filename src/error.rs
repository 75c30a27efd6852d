//! Error handling for tickgraph
//!
//! Wiring failures have their own type in [`crate::pipeline::error`]. This
//! module wraps them together with configuration and I/O failures for callers
//! that deal with more than the graph itself.

use crate::pipeline::PipelineError;
use thiserror::Error;

/// Main error type for tickgraph operations
#[derive(Error, Debug)]
pub enum TickGraphError {
    /// A connection was rejected
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<TickGraphError>,
    },
}

impl TickGraphError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        TickGraphError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<serde_json::Error> for TickGraphError {
    fn from(err: serde_json::Error) -> Self {
        TickGraphError::Serialization(err.to_string())
    }
}

/// Result type alias for tickgraph operations
pub type Result<T> = std::result::Result<T, TickGraphError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, PipelineError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| TickGraphError::from(e).with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| TickGraphError::from(e).with_context(f()))
    }
}
