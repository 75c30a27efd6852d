//! Pipeline executor: node registry, wiring, and the tick loop.
//!
//! Each tick polls every live node once, in creation order. Consumers pull
//! their inputs from the producers wired into their slots while they are
//! being polled, so no topological order is computed here.

use crate::config::PipelineConfig;
use crate::pipeline::error::{PipelineErrorKind, PipelineResult};
use crate::pipeline::id::NodeId;
use crate::pipeline::node::{Component, ErasedNode, Node, Register, Upstream};
use crate::pipeline::poll::PollSignal;
use crate::pipeline::slot::{InputTuple, ValueType, Wire};
use crate::pipeline::topology::{ConnectionSnapshot, NodeSnapshot, TopologySnapshot};
use crate::pipeline::validation::{self, GraphIssue};
use serde::Serialize;
use std::any::Any;
use std::fmt;

/// A recorded edge: the output of `src` feeds input `slot` of `dst`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Connection {
    pub src: NodeId,
    pub dst: NodeId,
    pub slot: usize,
}

/// Static shape of a node, captured from its `Component` impl at creation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NodeShape {
    pub arity: usize,
    pub output: Option<ValueType>,
}

impl NodeShape {
    fn of<N: Component>() -> Self {
        Self {
            arity: N::Input::ARITY,
            output: ValueType::output_of::<N::Output>(),
        }
    }
}

/// Arena slot holding a node and its scheduling state.
pub(crate) struct NodeSlot {
    /// `None` once erased, and briefly while the node is being polled.
    pub node: Option<Box<dyn ErasedNode>>,
    /// Cleared by `erase_node`. Erased slots are never reused.
    pub alive: bool,
    pub shape: NodeShape,
    /// Reads the exposed value out of `node`; always `None` for sinks.
    pub expose: fn(&dyn Any) -> Option<&dyn Any>,
    /// Last signal reported; `None` until the first poll.
    pub last: Option<PollSignal>,
}

impl NodeSlot {
    fn new<N: Register<M>, M>(node: N) -> Self {
        Self {
            node: Some(Box::new(node)),
            alive: true,
            shape: NodeShape::of::<N>(),
            expose: N::expose,
            last: None,
        }
    }

    fn name(&self) -> Option<String> {
        self.node.as_deref().map(|n| n.name())
    }
}

/// The dataflow graph and its scheduler.
///
/// Owns every node it creates. Can be moved but not cloned.
pub struct Pipeline {
    nodes: Vec<NodeSlot>,
    connections: Vec<Connection>,
    tick: u64,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::with_config(PipelineConfig::default())
    }

    pub fn with_config(config: PipelineConfig) -> Self {
        Self {
            nodes: Vec::new(),
            connections: Vec::new(),
            tick: 0,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    // ── Node registry ──

    /// Take ownership of `node` and return its id.
    ///
    /// `N` must be a [`Producer`](crate::pipeline::Producer) or have
    /// `Output = ()`; see [`Register`].
    ///
    /// # Panics
    ///
    /// Panics once `u32::MAX - 1` nodes have been created.
    pub fn create_node<N: Register<M>, M>(&mut self, node: N) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        tracing::debug!("Created node {} '{}'", id, node.name());
        self.nodes.push(NodeSlot::new(node));
        id
    }

    /// Destroy the node behind `id`. Unknown or already erased ids are ignored.
    ///
    /// Connections touching the node are dropped from the connection table.
    /// Consumers still wired to it see that input as closed from now on.
    pub fn erase_node(&mut self, id: NodeId) {
        let Some(slot) = self.live_slot_mut(id) else {
            return;
        };
        slot.alive = false;
        let node = slot.node.take();

        let before = self.connections.len();
        self.connections.retain(|c| c.src != id && c.dst != id);

        tracing::debug!(
            "Erased node {} '{}' ({} connections dropped)",
            id,
            node.map(|n| n.name()).unwrap_or_default(),
            before - self.connections.len()
        );
    }

    /// The node behind `id`, or `None` if it is invalid or erased.
    pub fn get_node(&self, id: NodeId) -> Option<&dyn Node> {
        self.live_slot(id)?.node.as_deref().map(|n| n.as_node())
    }

    /// Like [`get_node`](Self::get_node), downcast to the concrete node type.
    pub fn get_node_as<N: Node>(&self, id: NodeId) -> Option<&N> {
        self.live_slot(id)?.node.as_deref()?.as_any().downcast_ref::<N>()
    }

    pub fn is_live(&self, id: NodeId) -> bool {
        self.live_slot(id).is_some()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.alive).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids of live nodes, in creation order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.alive)
            .map(|(i, _)| NodeId::from_index(i))
    }

    fn live_slot(&self, id: NodeId) -> Option<&NodeSlot> {
        if !id.is_valid() {
            return None;
        }
        self.nodes.get(id.index()).filter(|slot| slot.alive)
    }

    fn live_slot_mut(&mut self, id: NodeId) -> Option<&mut NodeSlot> {
        if !id.is_valid() {
            return None;
        }
        self.nodes.get_mut(id.index()).filter(|slot| slot.alive)
    }

    // ── Wiring ──

    /// Feed the output of `src` into input `slot` of `dst`.
    ///
    /// On error nothing is recorded.
    pub fn connect(&mut self, src: NodeId, dst: NodeId, slot: usize) -> PipelineResult<()> {
        let Some(output) = self.live_slot(src).map(|s| s.shape.output) else {
            tracing::warn!("Rejected connection {} -> {}[{}]: unknown source", src, dst, slot);
            return Err(PipelineErrorKind::InvalidNodeId.into());
        };
        let Some(node) = self.live_slot_mut(dst).and_then(|s| s.node.as_deref_mut()) else {
            tracing::warn!(
                "Rejected connection {} -> {}[{}]: unknown destination",
                src,
                dst,
                slot
            );
            return Err(PipelineErrorKind::InvalidNodeId.into());
        };

        let wire = Wire { id: src, output };
        if let Err(e) = node.connect(&wire, slot) {
            tracing::warn!("Rejected connection {} -> {}[{}]: {}", src, dst, slot, e);
            return Err(e);
        }

        self.connections.push(Connection { src, dst, slot });
        tracing::debug!("Connected {} -> {}[{}]", src, dst, slot);
        Ok(())
    }

    /// Recorded connections, in installation order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    // ── Scheduling ──

    /// Last signal reported by `id`. `None` if it was never polled or is not live.
    pub fn signal(&self, id: NodeId) -> Option<PollSignal> {
        self.live_slot(id)?.last
    }

    /// Number of completed ticks.
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// True once every live node has reported `Closed`.
    pub fn is_quiescent(&self) -> bool {
        self.nodes
            .iter()
            .filter(|slot| slot.alive)
            .all(|slot| slot.last == Some(PollSignal::Closed))
    }

    /// Run one tick: poll each live node once, in creation order.
    ///
    /// Closed nodes are not polled again. Returns whether the pipeline is
    /// quiescent afterwards.
    pub fn step(&mut self) -> bool {
        for idx in 0..self.nodes.len() {
            let slot = &mut self.nodes[idx];
            if !slot.alive || slot.last == Some(PollSignal::Closed) {
                continue;
            }
            let Some(mut node) = slot.node.take() else {
                continue;
            };

            let signal = node.poll_next(&Upstream::new(&self.nodes));

            tracing::trace!(
                "Tick {}: node {} '{}' -> {:?}",
                self.tick,
                idx,
                node.name(),
                signal
            );
            if signal.is_closed() {
                tracing::debug!("Node {} '{}' closed at tick {}", idx, node.name(), self.tick);
            }

            let slot = &mut self.nodes[idx];
            slot.node = Some(node);
            slot.last = Some(signal);
        }
        self.tick += 1;
        self.is_quiescent()
    }

    /// Step until quiescent. Loops forever if some node never closes.
    pub fn run(&mut self) {
        let start = self.tick;
        while !self.step() {}
        tracing::info!("Pipeline quiescent after {} ticks", self.tick - start);
    }

    /// Step at most `max_ticks` times. Returns whether the pipeline became quiescent.
    pub fn run_bounded(&mut self, max_ticks: u64) -> bool {
        let start = self.tick;
        for _ in 0..max_ticks {
            if self.step() {
                tracing::info!("Pipeline quiescent after {} ticks", self.tick - start);
                return true;
            }
        }
        let quiescent = self.is_quiescent();
        if !quiescent {
            tracing::info!("Pipeline still running after {} ticks", max_ticks);
        }
        quiescent
    }

    /// Run under the configured tick limit, or unbounded if none is set.
    pub fn drive(&mut self) -> bool {
        match self.config.tick_limit {
            Some(limit) => self.run_bounded(limit),
            None => {
                self.run();
                true
            }
        }
    }

    // ── Introspection ──

    /// Structural problems that would keep the graph from running to completion.
    pub fn validate(&self) -> Vec<GraphIssue> {
        validation::validate(&self.nodes, &self.connections)
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Serializable description of live nodes and recorded connections.
    pub fn topology(&self) -> TopologySnapshot {
        let nodes = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.alive)
            .map(|(i, slot)| NodeSnapshot {
                id: NodeId::from_index(i),
                name: slot.name().unwrap_or_default(),
                arity: slot.shape.arity,
                output: slot.shape.output.map(|t| t.name().to_string()),
                signal: slot.last,
            })
            .collect();

        let name_of = |id: NodeId| {
            self.live_slot(id)
                .and_then(NodeSlot::name)
                .unwrap_or_default()
        };
        let connections = self
            .connections
            .iter()
            .map(|c| ConnectionSnapshot {
                src: c.src,
                src_name: name_of(c.src),
                dst: c.dst,
                dst_name: name_of(c.dst),
                slot: c.slot,
            })
            .collect();

        TopologySnapshot {
            graph_name: self.config.graph_name.clone(),
            nodes,
            connections,
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.topology(), f)
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("nodes", &self.len())
            .field("connections", &self.connections)
            .field("tick", &self.tick)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::node::Producer;
    use crate::pipeline::slot::Inputs;

    /// Emits `value` `times` times, then closes.
    struct Repeat {
        value: i32,
        times: usize,
    }

    impl Node for Repeat {
        fn name(&self) -> String {
            "repeat".to_string()
        }

        fn poll_next(&mut self, _upstream: &Upstream<'_>) -> PollSignal {
            if self.times == 0 {
                return PollSignal::Closed;
            }
            self.times -= 1;
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

    #[derive(Default)]
    struct Record {
        inputs: Inputs<(i32,)>,
        seen: Vec<i32>,
    }

    impl Node for Record {
        fn name(&self) -> String {
            "record".to_string()
        }

        fn poll_next(&mut self, upstream: &Upstream<'_>) -> PollSignal {
            let signal = self.inputs.signal(upstream);
            if signal.is_ready() {
                if let Some((v,)) = self.inputs.pull(upstream) {
                    self.seen.push(*v);
                }
            }
            signal
        }

        fn connect(&mut self, source: &Wire, slot: usize) -> PipelineResult<()> {
            self.inputs.connect(source, slot)
        }
    }

    impl Component for Record {
        type Input = (i32,);
        type Output = ();
    }

    #[test]
    fn test_ids_are_dense() {
        let mut pipeline = Pipeline::new();
        let a = pipeline.create_node(Repeat { value: 1, times: 1 });
        let b = pipeline.create_node(Record::default());
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(pipeline.len(), 2);
    }

    #[test]
    fn test_erased_ids_are_not_reused() {
        let mut pipeline = Pipeline::new();
        let a = pipeline.create_node(Repeat { value: 1, times: 1 });
        pipeline.erase_node(a);
        let b = pipeline.create_node(Repeat { value: 1, times: 1 });
        assert_ne!(a, b);
        assert!(!pipeline.is_live(a));
        assert!(pipeline.is_live(b));
        assert_eq!(pipeline.node_ids().collect::<Vec<_>>(), vec![b]);
    }

    #[test]
    fn test_erase_drops_connections() {
        let mut pipeline = Pipeline::new();
        let src = pipeline.create_node(Repeat { value: 1, times: 1 });
        let dst = pipeline.create_node(Record::default());
        pipeline.connect(src, dst, 0).unwrap();
        assert_eq!(pipeline.connections().len(), 1);

        pipeline.erase_node(src);
        assert!(pipeline.connections().is_empty());
        // Erasing twice is harmless
        pipeline.erase_node(src);
        pipeline.erase_node(NodeId::INVALID);
    }

    #[test]
    fn test_consumer_created_first_sees_previous_tick() {
        let mut pipeline = Pipeline::new();
        let dst = pipeline.create_node(Record::default());
        let src = pipeline.create_node(Repeat { value: 4, times: 2 });
        pipeline.connect(src, dst, 0).unwrap();

        // Tick 0: the record node runs before its producer has been polled.
        assert!(!pipeline.step());
        assert_eq!(pipeline.signal(dst), Some(PollSignal::Empty));
        assert!(pipeline.get_node_as::<Record>(dst).unwrap().seen.is_empty());

        pipeline.run();
        assert_eq!(pipeline.get_node_as::<Record>(dst).unwrap().seen, vec![4, 4]);
    }

    #[test]
    fn test_erased_upstream_closes_consumer() {
        let mut pipeline = Pipeline::new();
        let src = pipeline.create_node(Repeat { value: 1, times: 100 });
        let dst = pipeline.create_node(Record::default());
        pipeline.connect(src, dst, 0).unwrap();
        assert!(!pipeline.step());

        pipeline.erase_node(src);
        assert!(pipeline.step());
        assert_eq!(pipeline.signal(dst), Some(PollSignal::Closed));
    }

    #[test]
    fn test_empty_pipeline_is_quiescent() {
        let mut pipeline = Pipeline::new();
        assert!(pipeline.is_empty());
        assert!(pipeline.step());
        assert_eq!(pipeline.ticks(), 1);
    }

    #[test]
    fn test_run_bounded_gives_up() {
        let mut pipeline = Pipeline::new();
        pipeline.create_node(Repeat { value: 1, times: 10 });
        assert!(!pipeline.run_bounded(3));
        assert_eq!(pipeline.ticks(), 3);
        assert!(pipeline.run_bounded(100));
    }

    #[test]
    fn test_drive_honours_tick_limit() {
        let config = PipelineConfig {
            tick_limit: Some(2),
            ..PipelineConfig::default()
        };
        let mut pipeline = Pipeline::with_config(config);
        pipeline.create_node(Repeat { value: 1, times: 10 });
        assert!(!pipeline.drive());
        assert_eq!(pipeline.ticks(), 2);
    }
}
