//! Test nodes with predictable behaviour

use tickgraph::pipeline::{
    Component, Inputs, Node, PipelineResult, PollSignal, Producer, Upstream, Wire,
};

/// Source that emits `value` a fixed number of times, then closes.
pub struct Repeat {
    value: i32,
    remaining: usize,
}

impl Repeat {
    pub fn new(value: i32, times: usize) -> Self {
        Self {
            value,
            remaining: times,
        }
    }
}

impl Node for Repeat {
    fn name(&self) -> String {
        format!("repeat {}", self.value)
    }

    fn poll_next(&mut self, _upstream: &Upstream<'_>) -> PollSignal {
        if self.remaining == 0 {
            return PollSignal::Closed;
        }
        self.remaining -= 1;
        PollSignal::Ready
    }
}

impl Component for Repeat {
    type Input = ();
    type Output = i32;
}

impl Producer for Repeat {
    fn value(&self) -> &i32 {
        &self.value
    }
}

/// Source of text, used to provoke type mismatches.
pub struct Text(pub String);

impl Node for Text {
    fn name(&self) -> String {
        "text".to_string()
    }

    fn poll_next(&mut self, _upstream: &Upstream<'_>) -> PollSignal {
        PollSignal::Closed
    }
}

impl Component for Text {
    type Input = ();
    type Output = String;
}

impl Producer for Text {
    fn value(&self) -> &String {
        &self.0
    }
}

/// Node that closes on its first poll but would report ready afterwards.
///
/// Counts how often it is polled so tests can check the engine stops.
#[derive(Default)]
pub struct ClosesOnce {
    pub polls: usize,
}

impl Node for ClosesOnce {
    fn name(&self) -> String {
        "closes once".to_string()
    }

    fn poll_next(&mut self, _upstream: &Upstream<'_>) -> PollSignal {
        self.polls += 1;
        if self.polls == 1 {
            PollSignal::Closed
        } else {
            PollSignal::Ready
        }
    }
}

impl Component for ClosesOnce {
    type Input = ();
    type Output = ();
}

/// Node that never has anything and never finishes.
pub struct Idle;

impl Node for Idle {
    fn name(&self) -> String {
        "idle".to_string()
    }

    fn poll_next(&mut self, _upstream: &Upstream<'_>) -> PollSignal {
        PollSignal::Empty
    }
}

impl Component for Idle {
    type Input = ();
    type Output = ();
}

/// Sink that records consumed values and every signal it reported.
#[derive(Default)]
pub struct Recorder {
    inputs: Inputs<(i32,)>,
    pub values: Vec<i32>,
    pub signals: Vec<PollSignal>,
}

impl Node for Recorder {
    fn name(&self) -> String {
        "recorder".to_string()
    }

    fn poll_next(&mut self, upstream: &Upstream<'_>) -> PollSignal {
        let mut signal = self.inputs.signal(upstream);
        if signal.is_ready() {
            match self.inputs.pull(upstream) {
                Some((value,)) => self.values.push(*value),
                None => signal = PollSignal::Empty,
            }
        }
        self.signals.push(signal);
        signal
    }

    fn connect(&mut self, source: &Wire, slot: usize) -> PipelineResult<()> {
        self.inputs.connect(source, slot)
    }
}

impl Component for Recorder {
    type Input = (i32,);
    type Output = ();
}

/// Sink expecting text; wiring an integer producer into it must fail.
#[derive(Default)]
pub struct TextSink {
    inputs: Inputs<(String,)>,
}

impl Node for TextSink {
    fn name(&self) -> String {
        "text sink".to_string()
    }

    fn poll_next(&mut self, upstream: &Upstream<'_>) -> PollSignal {
        self.inputs.signal(upstream)
    }

    fn connect(&mut self, source: &Wire, slot: usize) -> PipelineResult<()> {
        self.inputs.connect(source, slot)
    }
}

impl Component for TextSink {
    type Input = (String,);
    type Output = ();
}
