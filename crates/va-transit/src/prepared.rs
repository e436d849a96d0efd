//! Departure-time lookup.
//!
//! [`PreparedSchedule`] keeps, per route, the sorted departure times from the
//! first stop.  The next departure at any stop of the route is found by
//! shifting the query time back by the stop's departure offset and binary
//! searching the cache.  Queries after the day's last departure wrap to the
//! first departure of the next day.

use va_core::time::MIDNIGHT;
use va_core::RouteId;

use crate::{TransitRouteStop, TransitSchedule};

/// Next-departure lookup over a transit schedule.
///
/// Implementations must be `Sync`: one lookup is shared by all router
/// instances across worker threads.
pub trait ScheduleLookup: Sync {
    /// Earliest time `>= time` at which a vehicle of `route` departs from
    /// `stop`.  Returns `f64::INFINITY` if the route has no departures.
    fn next_departure_time(&self, route: RouteId, stop: &TransitRouteStop, time: f64) -> f64;
}

/// Sorted per-route departure cache.
pub struct PreparedSchedule {
    /// Indexed by `RouteId`; each inner `Vec` is sorted ascending and reduced
    /// modulo `MIDNIGHT`.
    departures: Vec<Vec<f64>>,
}

impl PreparedSchedule {
    pub fn new(schedule: &TransitSchedule) -> Self {
        let departures = schedule
            .routes()
            .iter()
            .map(|r| {
                let mut deps: Vec<f64> = r.departures.iter().map(|d| d.rem_euclid(MIDNIGHT)).collect();
                deps.sort_by(f64::total_cmp);
                deps
            })
            .collect();
        Self { departures }
    }

    /// Sorted departures of `route` from its first stop.
    pub fn departures(&self, route: RouteId) -> &[f64] {
        &self.departures[route.index()]
    }
}

impl ScheduleLookup for PreparedSchedule {
    fn next_departure_time(&self, route: RouteId, stop: &TransitRouteStop, time: f64) -> f64 {
        let cache = &self.departures[route.index()];
        if cache.is_empty() {
            return f64::INFINITY;
        }
        let offset = stop.departure_or_arrival();

        let earliest_at_terminus = (time - offset).rem_euclid(MIDNIGHT);
        let pos = cache.partition_point(|&d| d < earliest_at_terminus);
        // Past the last departure of the day: take the first one, next day.
        let pos = if pos >= cache.len() { 0 } else { pos };

        let mut best = cache[pos] + offset;
        while best < time {
            best += MIDNIGHT;
        }
        best
    }
}
