//! Typed input slots.
//!
//! Every component declares its inputs as a tuple type. Slot `i` accepts a
//! connection only from a producer whose output type is the tuple's `i`-th
//! element. Types are compared through [`ValueType`] tags when a connection is
//! requested, and the tuple shape gives typed access to upstream values when
//! the node is polled.

use crate::pipeline::error::{PipelineErrorKind, PipelineResult};
use crate::pipeline::id::NodeId;
use crate::pipeline::node::Upstream;
use crate::pipeline::poll::PollSignal;
use std::any::TypeId;
use std::fmt;
use std::marker::PhantomData;

/// Runtime tag for a value type flowing along an edge.
#[derive(Clone, Copy)]
pub struct ValueType {
    id: TypeId,
    name: &'static str,
}

impl ValueType {
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// `None` for the unit type, which components use to say "no output".
    pub fn output_of<T: 'static>() -> Option<Self> {
        if TypeId::of::<T>() == TypeId::of::<()>() {
            None
        } else {
            Some(Self::of::<T>())
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ValueType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ValueType {}

impl fmt::Debug for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValueType({})", self.name)
    }
}

/// The upstream end of a connection request, as seen by the destination node.
#[derive(Debug, Clone, Copy)]
pub struct Wire {
    /// Node that will feed the slot.
    pub id: NodeId,
    /// Its declared output type, `None` for sinks.
    pub output: Option<ValueType>,
}

/// Tuple of input types a component consumes.
pub trait InputTuple: 'static {
    /// Number of slots.
    const ARITY: usize;

    /// Borrowed view of one value per slot.
    type Refs<'a>;

    /// Element type of `slot`, or `None` if the slot does not exist.
    fn slot_type(slot: usize) -> Option<ValueType>;

    /// Fetch the value currently exposed by each wired producer.
    fn pull<'a>(sources: &[Option<NodeId>], upstream: &Upstream<'a>) -> Option<Self::Refs<'a>>;
}

impl InputTuple for () {
    const ARITY: usize = 0;
    type Refs<'a> = ();

    fn slot_type(_slot: usize) -> Option<ValueType> {
        None
    }

    fn pull<'a>(_sources: &[Option<NodeId>], _upstream: &Upstream<'a>) -> Option<Self::Refs<'a>> {
        Some(())
    }
}

macro_rules! impl_input_tuple {
    ($arity:expr; $($idx:tt => $ty:ident),+) => {
        impl<$($ty: 'static),+> InputTuple for ($($ty,)+) {
            const ARITY: usize = $arity;
            type Refs<'a> = ($(&'a $ty,)+);

            fn slot_type(slot: usize) -> Option<ValueType> {
                match slot {
                    $($idx => Some(ValueType::of::<$ty>()),)+
                    _ => None,
                }
            }

            fn pull<'a>(
                sources: &[Option<NodeId>],
                upstream: &Upstream<'a>,
            ) -> Option<Self::Refs<'a>> {
                Some(($(upstream.value::<$ty>(sources.get($idx).copied().flatten()?)?,)+))
            }
        }
    };
}

impl_input_tuple!(1; 0 => A);
impl_input_tuple!(2; 0 => A, 1 => B);
impl_input_tuple!(3; 0 => A, 1 => B, 2 => C);
impl_input_tuple!(4; 0 => A, 1 => B, 2 => C, 3 => D);

/// Slot bookkeeping for a node with input tuple `I`.
///
/// Nodes keep one of these and forward their `connect` hook to it.
pub struct Inputs<I: InputTuple> {
    sources: Vec<Option<NodeId>>,
    _marker: PhantomData<fn() -> I>,
}

impl<I: InputTuple> Inputs<I> {
    pub fn new() -> Self {
        Self {
            sources: vec![None; I::ARITY],
            _marker: PhantomData,
        }
    }

    /// Record `source` as the feed for `slot`.
    ///
    /// Checks run in order: slot range, type, then prior use.
    pub fn connect(&mut self, source: &Wire, slot: usize) -> PipelineResult<()> {
        let expected = I::slot_type(slot).ok_or(PipelineErrorKind::NoSuchSlot)?;
        if source.output != Some(expected) {
            return Err(PipelineErrorKind::ConnectionTypeMismatch.into());
        }
        let entry = self
            .sources
            .get_mut(slot)
            .ok_or(PipelineErrorKind::NoSuchSlot)?;
        if entry.is_some() {
            return Err(PipelineErrorKind::SlotAlreadyUsed.into());
        }
        *entry = Some(source.id);
        Ok(())
    }

    pub fn arity(&self) -> usize {
        I::ARITY
    }

    /// Producer wired into `slot`, if any.
    pub fn source(&self, slot: usize) -> Option<NodeId> {
        self.sources.get(slot).copied().flatten()
    }

    pub fn is_fully_wired(&self) -> bool {
        self.sources.iter().all(Option::is_some)
    }

    /// Combined signal of all upstream producers. An unwired slot counts as empty.
    pub fn signal(&self, upstream: &Upstream<'_>) -> PollSignal {
        self.sources
            .iter()
            .map(|source| match source {
                Some(id) => upstream.signal(*id),
                None => PollSignal::Empty,
            })
            .fold(PollSignal::Ready, PollSignal::and)
    }

    /// Borrow the current value of every input, or `None` if any is unavailable.
    pub fn pull<'a>(&self, upstream: &Upstream<'a>) -> Option<I::Refs<'a>> {
        I::pull(&self.sources, upstream)
    }
}

impl<I: InputTuple> Default for Inputs<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: InputTuple> fmt::Debug for Inputs<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inputs")
            .field("sources", &self.sources)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::error::PipelineError;

    fn wire<T: 'static>(index: usize) -> Wire {
        Wire {
            id: NodeId::from_index(index),
            output: ValueType::output_of::<T>(),
        }
    }

    #[test]
    fn test_unit_is_no_output() {
        assert!(ValueType::output_of::<()>().is_none());
        assert_eq!(ValueType::output_of::<i32>(), Some(ValueType::of::<i32>()));
    }

    #[test]
    fn test_slot_types() {
        assert_eq!(<(i32, String)>::slot_type(0), Some(ValueType::of::<i32>()));
        assert_eq!(<(i32, String)>::slot_type(1), Some(ValueType::of::<String>()));
        assert_eq!(<(i32, String)>::slot_type(2), None);
        assert_eq!(<()>::slot_type(0), None);
    }

    #[test]
    fn test_empty_tuple_rejects_every_slot() {
        let mut inputs = Inputs::<()>::new();
        for slot in 0..3 {
            let err = inputs.connect(&wire::<i32>(0), slot).unwrap_err();
            assert_eq!(err.kind(), PipelineErrorKind::NoSuchSlot);
        }
    }

    #[test]
    fn test_connect_checks() {
        let mut inputs = Inputs::<(i32,)>::new();
        assert!(!inputs.is_fully_wired());

        let err: PipelineError = inputs.connect(&wire::<f64>(0), 0).unwrap_err();
        assert_eq!(err.kind(), PipelineErrorKind::ConnectionTypeMismatch);

        inputs.connect(&wire::<i32>(0), 0).unwrap();
        assert_eq!(inputs.source(0), Some(NodeId::from_index(0)));
        assert!(inputs.is_fully_wired());

        let err = inputs.connect(&wire::<i32>(1), 0).unwrap_err();
        assert_eq!(err.kind(), PipelineErrorKind::SlotAlreadyUsed);

        // Type mismatch is reported even on an occupied slot
        let err = inputs.connect(&wire::<u8>(1), 0).unwrap_err();
        assert_eq!(err.kind(), PipelineErrorKind::ConnectionTypeMismatch);

        // A sink has no output and matches nothing
        let err = Inputs::<(i32,)>::new()
            .connect(&wire::<()>(2), 0)
            .unwrap_err();
        assert_eq!(err.kind(), PipelineErrorKind::ConnectionTypeMismatch);
    }
}
