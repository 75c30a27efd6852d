//! The per-tick status a node reports when polled.

use serde::{Deserialize, Serialize};

/// Result of one `poll_next` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollSignal {
    /// A value was produced (or consumed) this tick.
    Ready,
    /// Nothing this tick, but there may be something later.
    Empty,
    /// Nothing now and nothing ever again. Terminal.
    Closed,
}

impl PollSignal {
    #[inline]
    pub fn is_ready(self) -> bool {
        self == PollSignal::Ready
    }

    #[inline]
    pub fn is_closed(self) -> bool {
        self == PollSignal::Closed
    }

    /// Combine the signals of two inputs: closed wins over empty, empty over ready.
    pub fn and(self, other: PollSignal) -> PollSignal {
        match (self, other) {
            (PollSignal::Closed, _) | (_, PollSignal::Closed) => PollSignal::Closed,
            (PollSignal::Empty, _) | (_, PollSignal::Empty) => PollSignal::Empty,
            _ => PollSignal::Ready,
        }
    }
}
