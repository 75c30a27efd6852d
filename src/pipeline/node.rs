//! Node abstraction for the pipeline.
//!
//! Three layers:
//! - **`Node`**: the object-safe contract the scheduler drives (a name, a
//!   one-tick `poll_next`, and a wiring hook).
//! - **`Component`**: a node with a static `(Input, Output)` pairing. The
//!   pipeline only accepts components, which is what makes connections typed.
//! - **`Producer`**: a component that exposes its last computed value. Sinks
//!   (output `()`) do not implement it, so reading a sink's value does not
//!   compile.
//!
//! `Source` and `Sink` are the two degenerate shapes and are implemented
//! automatically for matching components.
//!
//! A component is accepted by [`Pipeline::create_node`] only through
//! [`Register`]: either it is a `Producer`, or its output is `()`. A node that
//! declares an output but cannot expose it is rejected at compile time.
//!
//! ```
//! use tickgraph::pipeline::{Component, Node, PollSignal, Producer, Upstream};
//! use tickgraph::Pipeline;
//!
//! struct Answer(i32);
//!
//! impl Node for Answer {
//!     fn name(&self) -> String {
//!         "answer".to_string()
//!     }
//!
//!     fn poll_next(&mut self, _upstream: &Upstream<'_>) -> PollSignal {
//!         PollSignal::Closed
//!     }
//! }
//!
//! impl Component for Answer {
//!     type Input = ();
//!     type Output = i32;
//! }
//!
//! impl Producer for Answer {
//!     fn value(&self) -> &i32 {
//!         &self.0
//!     }
//! }
//!
//! Pipeline::new().create_node(Answer(42));
//! ```
//!
//! Without the `Producer` impl the same node does not register:
//!
//! ```compile_fail
//! use tickgraph::pipeline::{Component, Node, PollSignal, Upstream};
//! use tickgraph::Pipeline;
//!
//! struct Answer(i32);
//!
//! impl Node for Answer {
//!     fn name(&self) -> String {
//!         "answer".to_string()
//!     }
//!
//!     fn poll_next(&mut self, _upstream: &Upstream<'_>) -> PollSignal {
//!         PollSignal::Closed
//!     }
//! }
//!
//! impl Component for Answer {
//!     type Input = ();
//!     type Output = i32;
//! }
//!
//! Pipeline::new().create_node(Answer(42));
//! ```
//!
//! [`Pipeline::create_node`]: crate::pipeline::Pipeline::create_node

use crate::pipeline::error::{PipelineErrorKind, PipelineResult};
use crate::pipeline::executor::NodeSlot;
use crate::pipeline::id::NodeId;
use crate::pipeline::poll::PollSignal;
use crate::pipeline::slot::{InputTuple, Wire};
use std::any::Any;

/// A unit of computation advanced one tick at a time.
pub trait Node: 'static {
    /// Human-readable name, used in logs and graph renderings.
    fn name(&self) -> String;

    /// Process a single tick.
    ///
    /// Consumers read their inputs from `upstream` here; the engine does not
    /// push values into nodes.
    fn poll_next(&mut self, upstream: &Upstream<'_>) -> PollSignal;

    /// Accept `source` as the feed for input `slot`.
    ///
    /// The default rejects every slot, which is exactly what a node without
    /// inputs needs.
    fn connect(&mut self, source: &Wire, slot: usize) -> PipelineResult<()> {
        let _ = (source, slot);
        Err(PipelineErrorKind::NoSuchSlot.into())
    }
}

/// A node with a static input tuple and output type.
///
/// `Output = ()` means the node produces nothing.
pub trait Component: Node {
    type Input: InputTuple;
    type Output: 'static;
}

/// A component that exposes the value it most recently produced.
pub trait Producer: Component {
    fn value(&self) -> &Self::Output;
}

/// A component with no inputs.
pub trait Source: Component<Input = ()> {}

impl<T: Component<Input = ()>> Source for T {}

/// A component with exactly one input and no output.
pub trait Sink: Component<Output = ()> {
    type Item: 'static;
}

impl<T, I: 'static> Sink for T
where
    T: Component<Input = (I,), Output = ()>,
{
    type Item = I;
}

/// How a component is registered: as a [`Producer`] or as a node without
/// output. Implemented automatically; cannot be implemented by hand.
///
/// `Marker` is [`AsProducer`] or [`AsSink`] and is inferred at the call site.
pub trait Register<Marker>: Component + sealed::Sealed<Marker> {
    /// Value currently exposed by `node`, `None` if it exposes nothing.
    fn expose(node: &dyn Any) -> Option<&dyn Any>;
}

/// Registration marker for components implementing [`Producer`].
pub enum AsProducer {}

/// Registration marker for components with `Output = ()`.
pub enum AsSink {}

mod sealed {
    pub trait Sealed<Marker> {}
}

impl<P: Producer> sealed::Sealed<AsProducer> for P {}

impl<P: Producer> Register<AsProducer> for P {
    fn expose(node: &dyn Any) -> Option<&dyn Any> {
        node.downcast_ref::<P>().map(|p| p.value() as &dyn Any)
    }
}

impl<S: Component<Output = ()>> sealed::Sealed<AsSink> for S {}

impl<S: Component<Output = ()>> Register<AsSink> for S {
    fn expose(_node: &dyn Any) -> Option<&dyn Any> {
        None
    }
}

/// Storage form of a node: the contract plus downcasting.
pub(crate) trait ErasedNode: Node {
    fn as_node(&self) -> &dyn Node;
    fn as_any(&self) -> &dyn Any;
}

impl<N: Node> ErasedNode for N {
    fn as_node(&self) -> &dyn Node {
        self
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Read-only view of the other nodes, handed to a node while it is polled.
pub struct Upstream<'a> {
    slots: &'a [NodeSlot],
}

impl<'a> Upstream<'a> {
    pub(crate) fn new(slots: &'a [NodeSlot]) -> Self {
        Self { slots }
    }

    /// Last signal reported by `id`.
    ///
    /// A node not yet polled reads as `Empty`; an erased or unknown node
    /// reads as `Closed` forever.
    pub fn signal(&self, id: NodeId) -> PollSignal {
        match self.slots.get(id.index()) {
            Some(slot) if slot.alive => slot.last.unwrap_or(PollSignal::Empty),
            _ => PollSignal::Closed,
        }
    }

    /// Value currently exposed by producer `id`, if it is live and of type `T`.
    pub fn value<T: 'static>(&self, id: NodeId) -> Option<&'a T> {
        let slot = self.slots.get(id.index())?;
        if !slot.alive {
            return None;
        }
        let node = slot.node.as_deref()?;
        (slot.expose)(node.as_any())?.downcast_ref::<T>()
    }
}
