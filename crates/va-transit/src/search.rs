//! Multi-source / multi-sink least-cost path search.
//!
//! # Pluggability
//!
//! The router calls the search through the [`PathSearch`] trait, so
//! applications can swap in another engine.  The default
//! [`LeastCostPathTree`] is a time-dependent Dijkstra over the CSR graph.
//!
//! # Sources and sinks
//!
//! Both ends are [`CandidateSet`]s of [`InitialNode`]s.  Sources seed the
//! queue with their initial cost and arrival time; a sink's initial cost is
//! added when the search reaches it.  The search stops once the cheapest
//! queued cost can no longer beat the best sink total (sink costs are
//! non-negative), and returns the path to that best sink.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;

use va_core::{EdgeId, NodeId, Person};

use crate::{TransitCostModel, TransitRouterNetwork};

// ── InitialNode / CandidateSet ────────────────────────────────────────────────

/// Entry or exit point of a search, with the cost and time of reaching it
/// from the request's origin (or of leaving it to the destination).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InitialNode {
    pub node: NodeId,
    pub cost: f64,
    /// Seconds since midnight at which the node is reached.
    pub time: f64,
}

/// Insertion-ordered set of [`InitialNode`]s with O(1) lookup by node.
#[derive(Clone, Debug, Default)]
pub struct CandidateSet {
    entries: Vec<InitialNode>,
    index:   FxHashMap<NodeId, usize>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            entries: Vec::with_capacity(n),
            index:   FxHashMap::with_capacity_and_hasher(n, Default::default()),
        }
    }

    /// Insert or replace.  A replaced entry keeps its original position.
    pub fn insert(&mut self, initial: InitialNode) {
        match self.index.get(&initial.node) {
            Some(&i) => self.entries[i] = initial,
            None => {
                self.index.insert(initial.node, self.entries.len());
                self.entries.push(initial);
            }
        }
    }

    #[inline]
    pub fn get(&self, node: NodeId) -> Option<&InitialNode> {
        self.index.get(&node).map(|&i| &self.entries[i])
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &InitialNode> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<InitialNode> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = InitialNode>>(iter: I) -> Self {
        let mut set = CandidateSet::new();
        for n in iter {
            set.insert(n);
        }
        set
    }
}

// ── Path ──────────────────────────────────────────────────────────────────────

/// Result of a search: the edges from a source to a sink.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    /// Nodes visited, `edges.len() + 1` long.
    pub nodes:       Vec<NodeId>,
    pub edges:       Vec<EdgeId>,
    /// Disutility of the edges only, excluding both initial costs.
    pub travel_cost: f64,
    /// Seconds from reaching the source node to reaching the sink node.
    pub travel_time: f64,
}

impl Path {
    #[inline]
    pub fn first_node(&self) -> NodeId {
        self.nodes[0]
    }

    #[inline]
    pub fn last_node(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }
}

// ── PathSearch trait ──────────────────────────────────────────────────────────

/// Pluggable least-cost path engine.
///
/// Takes `&mut self`: engines may keep per-call scratch state, which is why
/// each router instance owns its own engine and serves one request at a time.
pub trait PathSearch {
    /// Least-cost path from any of `sources` to any of `sinks`, or `None`
    /// if no sink is reachable.
    fn search<C: TransitCostModel>(
        &mut self,
        network: &TransitRouterNetwork,
        costs:   &C,
        sources: &CandidateSet,
        sinks:   &CandidateSet,
        person:  &Person,
    ) -> Option<Path>;
}

// ── LeastCostPathTree ─────────────────────────────────────────────────────────

/// Time-dependent multi-source Dijkstra with reusable scratch buffers.
#[derive(Default)]
pub struct LeastCostPathTree {
    cost:      Vec<f64>,
    time:      Vec<f64>,
    prev_edge: Vec<EdgeId>,
    /// Nodes written during the last search; reset lazily on the next one.
    touched:   Vec<NodeId>,
}

/// Min-heap entry; `BinaryHeap` is a max-heap so the ordering is reversed.
/// Ties break on `NodeId` for deterministic results.
struct QueueEntry {
    cost: f64,
    node: NodeId,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.total_cmp(&self.cost).then_with(|| other.node.cmp(&self.node))
    }
}

impl LeastCostPathTree {
    pub fn new() -> Self {
        Self::default()
    }

    fn reset(&mut self, node_count: usize) {
        if self.cost.len() != node_count {
            self.cost = vec![f64::INFINITY; node_count];
            self.time = vec![f64::INFINITY; node_count];
            self.prev_edge = vec![EdgeId::INVALID; node_count];
            self.touched.clear();
            return;
        }
        for n in self.touched.drain(..) {
            self.cost[n.index()] = f64::INFINITY;
            self.time[n.index()] = f64::INFINITY;
            self.prev_edge[n.index()] = EdgeId::INVALID;
        }
    }

    fn relax(&mut self, node: NodeId, cost: f64, time: f64, via: EdgeId) -> bool {
        let i = node.index();
        if cost < self.cost[i] {
            if self.cost[i].is_infinite() {
                self.touched.push(node);
            }
            self.cost[i] = cost;
            self.time[i] = time;
            self.prev_edge[i] = via;
            true
        } else {
            false
        }
    }

    fn reconstruct(
        &self,
        network: &TransitRouterNetwork,
        sink:    NodeId,
        sources: &CandidateSet,
    ) -> Option<Path> {
        let mut edges = Vec::new();
        let mut nodes = vec![sink];
        let mut cur = sink;
        loop {
            let e = self.prev_edge[cur.index()];
            if e == EdgeId::INVALID {
                break;
            }
            edges.push(e);
            cur = network.edge_from[e.index()];
            nodes.push(cur);
        }
        edges.reverse();
        nodes.reverse();

        let source = sources.get(cur)?;
        Some(Path {
            nodes,
            edges,
            travel_cost: self.cost[sink.index()] - source.cost,
            travel_time: self.time[sink.index()] - source.time,
        })
    }
}

impl PathSearch for LeastCostPathTree {
    fn search<C: TransitCostModel>(
        &mut self,
        network: &TransitRouterNetwork,
        costs:   &C,
        sources: &CandidateSet,
        sinks:   &CandidateSet,
        person:  &Person,
    ) -> Option<Path> {
        self.reset(network.node_count());

        let mut heap: BinaryHeap<QueueEntry> = BinaryHeap::new();
        for s in sources.iter() {
            if self.relax(s.node, s.cost, s.time, EdgeId::INVALID) {
                heap.push(QueueEntry { cost: s.cost, node: s.node });
            }
        }

        // (total cost including the sink's initial cost, sink node)
        let mut best: Option<(f64, NodeId)> = None;

        while let Some(QueueEntry { cost, node }) = heap.pop() {
            if cost > self.cost[node.index()] {
                continue; // stale
            }
            if let Some((best_total, _)) = best {
                if cost >= best_total {
                    break;
                }
            }
            if let Some(sink) = sinks.get(node) {
                let total = cost + sink.cost;
                if best.is_none_or(|(b, _)| total < b) {
                    best = Some((total, node));
                }
            }

            let now = self.time[node.index()];
            for edge in network.out_edges(node) {
                let edge_cost = costs.link_travel_disutility(network, edge, now, person);
                if !edge_cost.is_finite() {
                    continue;
                }
                let to = network.edge_to[edge.index()];
                let new_cost = cost + edge_cost;
                let new_time = now + costs.link_travel_time(network, edge, now, person);
                if self.relax(to, new_cost, new_time, edge) {
                    heap.push(QueueEntry { cost: new_cost, node: to });
                }
            }
        }

        let (_, sink) = best?;
        self.reconstruct(network, sink, sources)
    }
}
