//! Time-dependent travel time and disutility of router-graph edges.
//!
//! # Cost units
//!
//! Times are seconds, disutilities are positive utils obtained by negating
//! the configured (negative) marginal utilities.
//!
//! | Edge     | Travel time                                        | Disutility                                          |
//! |----------|----------------------------------------------------|-----------------------------------------------------|
//! | transit  | wait for next departure + in-vehicle offset delta  | −wait·mu_wait − in_vehicle·mu_pt − length·mu_dist    |
//! | transfer | length / beeline walk speed + additional transfer  | −time·mu_walk − length·mu_dist − line-switch utility |

use va_core::time::MIDNIGHT;
use va_core::{EdgeId, Person, Point, RouterConfig};

use crate::{EdgeKind, ScheduleLookup, TransitRouterNetwork};

/// Travel time and disutility model consumed by the path search and by the
/// itinerary builder's transfer-walk timing.
pub trait TransitCostModel {
    /// Seconds needed to traverse `edge` when entering it at `time`.
    fn link_travel_time(
        &self,
        network: &TransitRouterNetwork,
        edge:    EdgeId,
        time:    f64,
        person:  &Person,
    ) -> f64;

    /// Disutility of traversing `edge` when entering it at `time`.
    fn link_travel_disutility(
        &self,
        network: &TransitRouterNetwork,
        edge:    EdgeId,
        time:    f64,
        person:  &Person,
    ) -> f64;

    /// Seconds to walk the beeline between two coordinates.
    fn walk_travel_time(&self, person: &Person, from: Point, to: Point) -> f64;
}

/// Default schedule-based cost model.
pub struct TransitTravelDisutility<'a, S: ScheduleLookup> {
    schedule: &'a S,
    config:   &'a RouterConfig,
}

impl<'a, S: ScheduleLookup> TransitTravelDisutility<'a, S> {
    pub fn new(schedule: &'a S, config: &'a RouterConfig) -> Self {
        Self { schedule, config }
    }

    pub fn schedule(&self) -> &'a S {
        self.schedule
    }

    /// `(wait, in_vehicle)` seconds for a transit edge entered at `time`.
    fn transit_times(&self, network: &TransitRouterNetwork, edge: EdgeId, time: f64) -> (f64, f64) {
        let from = network.from_node(edge);
        let to = network.to_node(edge);
        let departure = self.schedule.next_departure_time(from.route, &from.route_stop, time);
        let mut in_vehicle = to.route_stop.arrival_or_departure() - from.route_stop.departure_or_arrival();
        if in_vehicle < 0.0 {
            in_vehicle += MIDNIGHT;
        }
        (departure - time, in_vehicle)
    }

    fn transfer_time(&self, network: &TransitRouterNetwork, edge: EdgeId) -> f64 {
        network.length(edge) / self.config.beeline_walk_speed + self.config.additional_transfer_time
    }
}

impl<S: ScheduleLookup> TransitCostModel for TransitTravelDisutility<'_, S> {
    fn link_travel_time(
        &self,
        network: &TransitRouterNetwork,
        edge:    EdgeId,
        time:    f64,
        _person: &Person,
    ) -> f64 {
        match network.kind(edge) {
            EdgeKind::Transit { .. } => {
                let (wait, in_vehicle) = self.transit_times(network, edge, time);
                wait + in_vehicle
            }
            EdgeKind::Transfer => self.transfer_time(network, edge),
        }
    }

    fn link_travel_disutility(
        &self,
        network: &TransitRouterNetwork,
        edge:    EdgeId,
        time:    f64,
        _person: &Person,
    ) -> f64 {
        let cfg = self.config;
        let distance_cost = -network.length(edge) * cfg.marginal_utility_of_travel_distance_pt_utl_m;
        match network.kind(edge) {
            EdgeKind::Transit { .. } => {
                let (wait, in_vehicle) = self.transit_times(network, edge, time);
                -wait * cfg.marginal_utility_of_waiting_pt_utl_s
                    - in_vehicle * cfg.marginal_utility_of_travel_time_pt_utl_s
                    + distance_cost
            }
            EdgeKind::Transfer => {
                -self.transfer_time(network, edge) * cfg.marginal_utility_of_travel_time_walk_utl_s
                    + distance_cost
                    - cfg.utility_of_line_switch_utl
            }
        }
    }

    fn walk_travel_time(&self, _person: &Person, from: Point, to: Point) -> f64 {
        from.distance(to) / self.config.beeline_walk_speed
    }
}
