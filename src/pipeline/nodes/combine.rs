//! Combine: two-input transform.
//!
//! Fires only on ticks where both inputs are ready, and closes as soon as
//! either input closes.

use crate::pipeline::error::PipelineResult;
use crate::pipeline::node::{Component, Node, Producer, Upstream};
use crate::pipeline::poll::PollSignal;
use crate::pipeline::slot::{Inputs, Wire};

pub struct Combine<A: 'static, B: 'static, O, F> {
    name: String,
    inputs: Inputs<(A, B)>,
    f: F,
    current: O,
}

impl<A, B, O, F> Combine<A, B, O, F>
where
    A: 'static,
    B: 'static,
    O: Default,
    F: FnMut(&A, &B) -> O,
{
    pub fn new(f: F) -> Self {
        Self {
            name: "combine".to_string(),
            inputs: Inputs::new(),
            f,
            current: O::default(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl<A, B, O, F> Node for Combine<A, B, O, F>
where
    A: 'static,
    B: 'static,
    O: Default + 'static,
    F: FnMut(&A, &B) -> O + 'static,
{
    fn name(&self) -> String {
        self.name.clone()
    }

    fn poll_next(&mut self, upstream: &Upstream<'_>) -> PollSignal {
        let signal = self.inputs.signal(upstream);
        if !signal.is_ready() {
            return signal;
        }
        match self.inputs.pull(upstream) {
            Some((a, b)) => {
                self.current = (self.f)(a, b);
                PollSignal::Ready
            }
            None => PollSignal::Empty,
        }
    }

    fn connect(&mut self, source: &Wire, slot: usize) -> PipelineResult<()> {
        self.inputs.connect(source, slot)
    }
}

impl<A, B, O, F> Component for Combine<A, B, O, F>
where
    A: 'static,
    B: 'static,
    O: Default + 'static,
    F: FnMut(&A, &B) -> O + 'static,
{
    type Input = (A, B);
    type Output = O;
}

impl<A, B, O, F> Producer for Combine<A, B, O, F>
where
    A: 'static,
    B: 'static,
    O: Default + 'static,
    F: FnMut(&A, &B) -> O + 'static,
{
    fn value(&self) -> &O {
        &self.current
    }
}
