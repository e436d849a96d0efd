//! Candidate-stop lookup with an adaptive radius.

use va_core::{NodeId, Point, RouterConfig};
use va_transit::TransitRouterNetwork;

use crate::{RouterError, RouterResult};

/// Finds the router nodes around a point.
///
/// Queries `search_radius` first.  With fewer than two hits it re-queries
/// out to the nearest node's distance plus `extension_radius`, which always
/// yields the nearest node and may pick up a second one just outside the
/// first circle.
pub struct StopLocator<'a> {
    network:          &'a TransitRouterNetwork,
    search_radius:    f64,
    extension_radius: f64,
}

impl<'a> StopLocator<'a> {
    pub fn new(network: &'a TransitRouterNetwork, config: &RouterConfig) -> Self {
        Self {
            network,
            search_radius:    config.search_radius,
            extension_radius: config.extension_radius,
        }
    }

    /// Nodes around `point` ordered by (distance, node id).  Never empty on a
    /// non-empty graph.
    pub fn nearest_nodes(&self, point: Point) -> RouterResult<Vec<NodeId>> {
        let nodes = self.network.nearest_nodes(point, self.search_radius);
        if nodes.len() >= 2 {
            return Ok(nodes);
        }
        let nearest = self.nearest_node(point)?;
        let d = self.network.node(nearest).coord.distance(point);
        let extended = self.network.nearest_nodes(point, d + self.extension_radius);
        log::trace!(
            "{} node(s) within {} m of {point}; extended to {:.1} m, found {}",
            nodes.len(),
            self.search_radius,
            d + self.extension_radius,
            extended.len(),
        );
        Ok(extended)
    }

    pub fn nearest_node(&self, point: Point) -> RouterResult<NodeId> {
        self.network.nearest_node(point).ok_or(RouterError::EmptyGraph)
    }
}
