//! Channel bridges: move values between a pipeline and other threads.
//!
//! Both nodes only use non-blocking channel operations, so they never stall
//! the thread driving the pipeline.

use crate::pipeline::error::PipelineResult;
use crate::pipeline::node::{Component, Node, Producer, Upstream};
use crate::pipeline::poll::PollSignal;
use crate::pipeline::slot::{Inputs, Wire};
use crossbeam_channel::{Receiver, Sender, TryRecvError, TrySendError};

/// Source fed by a crossbeam channel.
///
/// `Empty` while the channel has nothing queued, `Closed` once it is empty
/// and every sender is gone.
pub struct ChannelSource<T> {
    rx: Receiver<T>,
    current: T,
}

impl<T: Default + 'static> ChannelSource<T> {
    pub fn new(rx: Receiver<T>) -> Self {
        Self {
            rx,
            current: T::default(),
        }
    }
}

impl<T: Default + 'static> Node for ChannelSource<T> {
    fn name(&self) -> String {
        "channel_source".to_string()
    }

    fn poll_next(&mut self, _upstream: &Upstream<'_>) -> PollSignal {
        match self.rx.try_recv() {
            Ok(value) => {
                self.current = value;
                PollSignal::Ready
            }
            Err(TryRecvError::Empty) => PollSignal::Empty,
            Err(TryRecvError::Disconnected) => PollSignal::Closed,
        }
    }
}

impl<T: Default + 'static> Component for ChannelSource<T> {
    type Input = ();
    type Output = T;
}

impl<T: Default + 'static> Producer for ChannelSource<T> {
    fn value(&self) -> &T {
        &self.current
    }
}

/// Sink that forwards every consumed value into a crossbeam channel.
///
/// Values that do not fit a bounded channel are dropped and counted. The
/// node closes when its upstream closes or the receiver goes away.
pub struct ChannelSink<T: 'static> {
    inputs: Inputs<(T,)>,
    tx: Sender<T>,
    dropped: u64,
}

impl<T: Clone + 'static> ChannelSink<T> {
    pub fn new(tx: Sender<T>) -> Self {
        Self {
            inputs: Inputs::new(),
            tx,
            dropped: 0,
        }
    }

    /// Values lost because the channel was full.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    fn close(&self) -> PollSignal {
        if self.dropped > 0 {
            tracing::warn!("ChannelSink dropped {} values due to backpressure", self.dropped);
        }
        PollSignal::Closed
    }
}

impl<T: Clone + 'static> Node for ChannelSink<T> {
    fn name(&self) -> String {
        "channel_sink".to_string()
    }

    fn poll_next(&mut self, upstream: &Upstream<'_>) -> PollSignal {
        let signal = self.inputs.signal(upstream);
        if signal.is_closed() {
            return self.close();
        }
        if !signal.is_ready() {
            return signal;
        }
        let Some((value,)) = self.inputs.pull(upstream) else {
            return PollSignal::Empty;
        };
        match self.tx.try_send(value.clone()) {
            Ok(()) => PollSignal::Ready,
            Err(TrySendError::Full(_)) => {
                self.dropped += 1;
                PollSignal::Ready
            }
            Err(TrySendError::Disconnected(_)) => self.close(),
        }
    }

    fn connect(&mut self, source: &Wire, slot: usize) -> PipelineResult<()> {
        self.inputs.connect(source, slot)
    }
}

impl<T: Clone + 'static> Component for ChannelSink<T> {
    type Input = (T,);
    type Output = ();
}
