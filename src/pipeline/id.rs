//! Identity types for the pipeline system.
//!
//! A `NodeId` is a newtype over `u32` that serves as a direct index into the
//! pipeline's node arena. Ids are handed out densely and never reused, so an
//! id that outlives its node simply resolves to nothing.

use serde::Serialize;
use std::fmt;

/// Opaque handle to a node owned by a [`Pipeline`](crate::pipeline::Pipeline).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Sentinel that never refers to a node.
    pub const INVALID: NodeId = NodeId(u32::MAX);

    /// `false` only for [`NodeId::INVALID`]. Says nothing about liveness.
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Id for the arena slot at `index`. The sentinel is never produced.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not fit below the sentinel.
    pub(crate) fn from_index(index: usize) -> Self {
        match u32::try_from(index) {
            Ok(raw) if raw != u32::MAX => Self(raw),
            _ => panic!("node arena exhausted: index {} has no NodeId", index),
        }
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::INVALID {
            write!(f, "NodeId(INVALID)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::INVALID {
            write!(f, "invalid")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
