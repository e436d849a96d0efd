//! Transit-router graph.
//!
//! # Structure
//!
//! Every stop of every route becomes one [`RouterNode`], so a stop served by
//! three routes yields three nodes.  Edges are of two kinds:
//!
//! - **transit** edges join consecutive nodes of the same route;
//! - **transfer** edges join nodes of different routes whose stops are within
//!   `max_beeline_walk_connection_distance` of each other.  A transfer edge
//!   only leaves a node that can be arrived at (not a route's first stop)
//!   and only enters a node that can be departed from (not a route's last
//!   stop).
//!
//! # Data layout
//!
//! Outgoing edges use **Compressed Sparse Row (CSR)** format: the outgoing
//! edges of node `n` are the `EdgeId`s `out_offsets[n] .. out_offsets[n+1]`.
//! All edge arrays are sorted by source node and indexed by `EdgeId`.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over node coordinates answers the radius and
//! nearest-node queries used for candidate-stop discovery and for finding
//! transfer partners at build time.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use va_core::{EdgeId, LineId, NodeId, Point, RouteId, StopId};

use crate::{TransitRouteStop, TransitSchedule};

// ── R-tree node entry ─────────────────────────────────────────────────────────

#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2],
    id:    NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── Nodes and edges ───────────────────────────────────────────────────────────

/// One stop of one route.
#[derive(Clone, Debug, PartialEq)]
pub struct RouterNode {
    pub stop:       StopId,
    pub line:       LineId,
    pub route:      RouteId,
    /// Position of this stop within the route's stop sequence.
    pub stop_index: usize,
    /// Schedule offsets of the stop on this route.
    pub route_stop: TransitRouteStop,
    pub coord:      Point,
}

/// What an edge represents.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EdgeKind {
    /// Riding `route` of `line` to the next stop.
    Transit { line: LineId, route: RouteId },
    /// Walking between routes.
    Transfer,
}

// ── TransitRouterNetwork ──────────────────────────────────────────────────────

/// Directed transit-router graph in CSR format plus a spatial index.
///
/// Built once with [`TransitRouterNetwork::from_schedule`] and read-only
/// afterwards.
pub struct TransitRouterNetwork {
    pub nodes: Vec<RouterNode>,

    /// CSR row pointer.  Length = `node_count + 1`.
    pub out_offsets: Vec<u32>,

    pub edge_from:     Vec<NodeId>,
    pub edge_to:       Vec<NodeId>,
    /// Metres: stop-to-stop straight-line distance.
    pub edge_length_m: Vec<f64>,
    pub edge_kind:     Vec<EdgeKind>,

    spatial_idx: RTree<NodeEntry>,
}

struct RawEdge {
    from:     NodeId,
    to:       NodeId,
    length_m: f64,
    kind:     EdgeKind,
}

impl TransitRouterNetwork {
    /// Derive the router graph from `schedule`.
    ///
    /// Time complexity: O(N log N) for the R-tree bulk load plus one radius
    /// query per arrival-capable node for transfer edges.
    pub fn from_schedule(schedule: &TransitSchedule, max_transfer_distance: f64) -> Self {
        let mut nodes: Vec<RouterNode> = Vec::new();
        let mut raw: Vec<RawEdge> = Vec::new();

        // ── Nodes and transit edges, route by route ───────────────────────
        for route in schedule.routes() {
            let first = nodes.len();
            for (i, rs) in route.stops.iter().enumerate() {
                nodes.push(RouterNode {
                    stop:       rs.stop,
                    line:       route.line,
                    route:      route.id,
                    stop_index: i,
                    route_stop: *rs,
                    coord:      schedule.stop(rs.stop).coord,
                });
            }
            for i in first + 1..nodes.len() {
                raw.push(RawEdge {
                    from:     NodeId::from_index(i - 1),
                    to:       NodeId::from_index(i),
                    length_m: nodes[i - 1].coord.distance(nodes[i].coord),
                    kind:     EdgeKind::Transit { line: route.line, route: route.id },
                });
            }
        }

        let entries: Vec<NodeEntry> = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| NodeEntry { point: n.coord.to_array(), id: NodeId::from_index(i) })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        // ── Transfer edges ────────────────────────────────────────────────
        let transit_edge_count = raw.len();
        let route_len = |n: &RouterNode| schedule.route(n.route).stops.len();
        for (i, from) in nodes.iter().enumerate() {
            if from.stop_index == 0 {
                continue; // cannot arrive here
            }
            let max_d2 = max_transfer_distance * max_transfer_distance;
            for entry in spatial_idx.locate_within_distance(from.coord.to_array(), max_d2) {
                let j = entry.id.index();
                let to = &nodes[j];
                if i == j || to.stop_index + 1 >= route_len(to) {
                    continue; // self, or cannot depart from there
                }
                if from.line == to.line && from.stop == to.stop {
                    continue;
                }
                raw.push(RawEdge {
                    from:     NodeId::from_index(i),
                    to:       entry.id,
                    length_m: from.coord.distance(to.coord),
                    kind:     EdgeKind::Transfer,
                });
            }
        }
        log::info!(
            "transit router network: {} nodes, {} transit edges, {} transfer edges",
            nodes.len(),
            transit_edge_count,
            raw.len() - transit_edge_count,
        );

        // ── CSR ───────────────────────────────────────────────────────────
        // Stable sort keeps transfer partners in R-tree order after the
        // transit edge of the same source node.
        raw.sort_by_key(|e| e.from.0);
        let node_count = nodes.len();
        let mut out_offsets = vec![0u32; node_count + 1];
        for e in &raw {
            out_offsets[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            out_offsets[i] += out_offsets[i - 1];
        }
        debug_assert_eq!(out_offsets[node_count] as usize, raw.len());

        TransitRouterNetwork {
            nodes,
            out_offsets,
            edge_from:     raw.iter().map(|e| e.from).collect(),
            edge_to:       raw.iter().map(|e| e.to).collect(),
            edge_length_m: raw.iter().map(|e| e.length_m).collect(),
            edge_kind:     raw.iter().map(|e| e.kind).collect(),
            spatial_idx,
        }
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &RouterNode {
        &self.nodes[id.index()]
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.out_offsets[node.index()] as usize;
        let end   = self.out_offsets[node.index() + 1] as usize;
        (start..end).map(EdgeId::from_index)
    }

    #[inline]
    pub fn from_node(&self, edge: EdgeId) -> &RouterNode {
        self.node(self.edge_from[edge.index()])
    }

    #[inline]
    pub fn to_node(&self, edge: EdgeId) -> &RouterNode {
        self.node(self.edge_to[edge.index()])
    }

    #[inline]
    pub fn kind(&self, edge: EdgeId) -> EdgeKind {
        self.edge_kind[edge.index()]
    }

    #[inline]
    pub fn length(&self, edge: EdgeId) -> f64 {
        self.edge_length_m[edge.index()]
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// All nodes within `radius` metres of `pos`, ordered by ascending
    /// distance, ties broken by `NodeId`.
    pub fn nearest_nodes(&self, pos: Point, radius: f64) -> Vec<NodeId> {
        let mut hits: Vec<(f64, NodeId)> = self
            .spatial_idx
            .locate_within_distance(pos.to_array(), radius * radius)
            .map(|e| (e.distance_2(&pos.to_array()), e.id))
            .collect();
        hits.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        hits.into_iter().map(|(_, id)| id).collect()
    }

    /// The node nearest to `pos`.  `None` only if the graph has no nodes.
    pub fn nearest_node(&self, pos: Point) -> Option<NodeId> {
        self.spatial_idx.nearest_neighbor(&pos.to_array()).map(|e| e.id)
    }
}
