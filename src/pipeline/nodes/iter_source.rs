//! IterSource: emits the items of an iterator, one per tick.

use crate::pipeline::node::{Component, Node, Producer, Upstream};
use crate::pipeline::poll::PollSignal;
use std::iter::Fuse;

/// Source that yields one item per tick and closes when the iterator runs dry.
///
/// Before the first item the exposed value is `Default::default()`.
pub struct IterSource<I: Iterator> {
    name: String,
    iter: Fuse<I>,
    current: I::Item,
    emitted: u64,
}

impl<I> IterSource<I>
where
    I: Iterator,
    I::Item: Default,
{
    pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            name: "iter_source".to_string(),
            iter: iter.into_iter().fuse(),
            current: I::Item::default(),
            emitted: 0,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Number of items emitted so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}

impl<I> Node for IterSource<I>
where
    I: Iterator + 'static,
    I::Item: Default + 'static,
{
    fn name(&self) -> String {
        self.name.clone()
    }

    fn poll_next(&mut self, _upstream: &Upstream<'_>) -> PollSignal {
        match self.iter.next() {
            Some(item) => {
                self.current = item;
                self.emitted += 1;
                PollSignal::Ready
            }
            None => PollSignal::Closed,
        }
    }
}

impl<I> Component for IterSource<I>
where
    I: Iterator + 'static,
    I::Item: Default + 'static,
{
    type Input = ();
    type Output = I::Item;
}

impl<I> Producer for IterSource<I>
where
    I: Iterator + 'static,
    I::Item: Default + 'static,
{
    fn value(&self) -> &I::Item {
        &self.current
    }
}
