//! Map: one-input transform.

use crate::pipeline::error::PipelineResult;
use crate::pipeline::node::{Component, Node, Producer, Upstream};
use crate::pipeline::poll::PollSignal;
use crate::pipeline::slot::{Inputs, Wire};

/// Applies `f` to each value its upstream produces.
pub struct Map<I: 'static, O, F> {
    name: String,
    inputs: Inputs<(I,)>,
    f: F,
    current: O,
}

impl<I, O, F> Map<I, O, F>
where
    I: 'static,
    O: Default,
    F: FnMut(&I) -> O,
{
    pub fn new(f: F) -> Self {
        Self {
            name: "map".to_string(),
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

impl<I, O, F> Node for Map<I, O, F>
where
    I: 'static,
    O: Default + 'static,
    F: FnMut(&I) -> O + 'static,
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
            Some((value,)) => {
                self.current = (self.f)(value);
                PollSignal::Ready
            }
            None => PollSignal::Empty,
        }
    }

    fn connect(&mut self, source: &Wire, slot: usize) -> PipelineResult<()> {
        self.inputs.connect(source, slot)
    }
}

impl<I, O, F> Component for Map<I, O, F>
where
    I: 'static,
    O: Default + 'static,
    F: FnMut(&I) -> O + 'static,
{
    type Input = (I,);
    type Output = O;
}

impl<I, O, F> Producer for Map<I, O, F>
where
    I: 'static,
    O: Default + 'static,
    F: FnMut(&I) -> O + 'static,
{
    fn value(&self) -> &O {
        &self.current
    }
}
