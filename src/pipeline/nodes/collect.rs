//! Collect: sink that records every value it consumes.

use crate::pipeline::error::PipelineResult;
use crate::pipeline::node::{Component, Node, Upstream};
use crate::pipeline::poll::PollSignal;
use crate::pipeline::slot::{Inputs, Wire};

pub struct Collect<T: 'static> {
    name: String,
    inputs: Inputs<(T,)>,
    items: Vec<T>,
}

impl<T: Clone + 'static> Collect<T> {
    pub fn new() -> Self {
        Self {
            name: "collect".to_string(),
            inputs: Inputs::new(),
            items: Vec::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Values consumed so far, oldest first.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }
}

impl<T: Clone + 'static> Default for Collect<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> Node for Collect<T> {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn poll_next(&mut self, upstream: &Upstream<'_>) -> PollSignal {
        let signal = self.inputs.signal(upstream);
        if !signal.is_ready() {
            return signal;
        }
        match self.inputs.pull(upstream) {
            Some((value,)) => {
                self.items.push(value.clone());
                PollSignal::Ready
            }
            None => PollSignal::Empty,
        }
    }

    fn connect(&mut self, source: &Wire, slot: usize) -> PipelineResult<()> {
        self.inputs.connect(source, slot)
    }
}

impl<T: Clone + 'static> Component for Collect<T> {
    type Input = (T,);
    type Output = ();
}
