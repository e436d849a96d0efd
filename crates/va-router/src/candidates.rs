//! Weighted entry/exit points for the path search.

use va_core::{Person, Point};
use va_transit::{CandidateSet, InitialNode, TransitRouterNetwork};

use crate::{AccessEgressModel, AccessEgressPricer, RouterResult, StopLocator};

/// Price every node the locator finds around `point`.
///
/// Each [`InitialNode`] carries the access/egress cost between `point` and
/// the node's stop and the time the stop is reached.  Candidates keep the
/// locator's (distance, node id) order.
pub fn build_candidates<A: AccessEgressModel>(
    network:        &TransitRouterNetwork,
    locator:        &StopLocator<'_>,
    pricer:         &AccessEgressPricer<'_, A>,
    person:         &Person,
    point:          Point,
    departure_time: f64,
    surcharge_on:   bool,
) -> RouterResult<CandidateSet> {
    let nodes = locator.nearest_nodes(point)?;
    let mut set = CandidateSet::with_capacity(nodes.len());
    for node in nodes {
        let stop = network.node(node).coord;
        let (leg, cost) = pricer.price(person, point, stop, departure_time, surcharge_on)?;
        set.insert(InitialNode { node, cost, time: departure_time + leg.travel_time });
    }
    Ok(set)
}
