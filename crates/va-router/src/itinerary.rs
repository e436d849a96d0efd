//! Path → leg reconstruction.
//!
//! # State machine
//!
//! The builder walks the path's edges once, holding a clock and a
//! [`LineState`]:
//!
//! ```text
//!                      transit edge (board)
//!   NoLine { last } ───────────────────────────▶ OnLine { route, boarding, .. }
//!        ▲                                            │  transit edge, same route:
//!        │  transfer edge (emit pt leg)               │  keep riding
//!        └────────────────────────────────────────────┘
//! ```
//!
//! A transit edge of another route while `OnLine` closes the ride where the
//! previous edge arrived and boards the new route, as if a zero-length
//! transfer edge sat between them.
//!
//! Boarding from `NoLine` emits, before the ride starts:
//!
//! | `last_stop`               | Emitted                                            |
//! |---------------------------|----------------------------------------------------|
//! | `None` (first boarding)   | access leg, plus a transit walk unless teleported  |
//! | a different stop          | transit walk between the two stops                 |
//! | the boarding stop         | nothing                                            |
//!
//! After the scan an open ride is closed at the path's last node and the
//! egress leg is appended.  A path that never boards yields the single
//! direct leg instead.
//!
//! Every emitted leg departs at the clock value when it is emitted, and the
//! clock advances by the leg's travel time, so the legs are contiguous.
//!
//! # Distances
//!
//! A ride closed by a transfer edge reports that edge's length; any other
//! ride reports the beeline distance between its stops.  Transit walks use
//! the beeline distance.

use va_core::{
    EdgeId, Leg, LineId, LinkId, NodeId, Person, Point, RouteId, RouterConfig, StopId, TransportMode,
};
use va_transit::{
    EdgeKind, Path, ScheduleLookup, TransitCostModel, TransitRouterNetwork, TransitSchedule,
};

use crate::{AccessEgressModel, RouterError, RouterResult};

// ── LineState ─────────────────────────────────────────────────────────────────

/// Whether the traveller is currently riding a route.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LineState {
    /// Walking or not yet started.  `last_stop` is the most recent alighting
    /// stop; `None` before the first boarding.
    NoLine { last_stop: Option<StopId> },
    /// Riding `route` since `boarding`.
    OnLine {
        line:        LineId,
        route:       RouteId,
        boarding:    NodeId,
        access_stop: StopId,
        /// Network distance ridden so far (m).
        ridden_m:    f64,
    },
}

// ── Per-call bookkeeping ──────────────────────────────────────────────────────

struct Trip<'p> {
    person:         &'p Person,
    from:           Point,
    to:             Point,
    departure_time: f64,
    time:           f64,
    legs:           Vec<Leg>,
    pt_legs:        usize,
}

impl Trip<'_> {
    /// Stamp `leg` with the clock, append it, advance the clock.
    fn push(&mut self, leg: Leg) {
        let leg = leg.departing_at(self.time);
        self.time = leg.arrival_time();
        self.legs.push(leg);
    }

    fn inconsistency(&self, detail: impl Into<String>) -> RouterError {
        RouterError::InternalInconsistency {
            person: self.person.id,
            from:   self.from,
            to:     self.to,
            time:   self.departure_time,
            detail: detail.into(),
        }
    }
}

// ── ItineraryBuilder ──────────────────────────────────────────────────────────

/// Converts a least-cost [`Path`] into an ordered leg list.
pub struct ItineraryBuilder<'a, A, C, S>
where
    A: AccessEgressModel,
    C: TransitCostModel,
    S: ScheduleLookup,
{
    network:  &'a TransitRouterNetwork,
    schedule: &'a TransitSchedule,
    lookup:   &'a S,
    costs:    &'a C,
    access:   &'a A,
    config:   &'a RouterConfig,
}

impl<'a, A, C, S> ItineraryBuilder<'a, A, C, S>
where
    A: AccessEgressModel,
    C: TransitCostModel,
    S: ScheduleLookup,
{
    pub fn new(
        network:  &'a TransitRouterNetwork,
        schedule: &'a TransitSchedule,
        lookup:   &'a S,
        costs:    &'a C,
        access:   &'a A,
        config:   &'a RouterConfig,
    ) -> Self {
        Self { network, schedule, lookup, costs, access, config }
    }

    /// Legs for travelling along `path` from `from` to `to`, departing at
    /// `departure_time`.
    pub fn build(
        &self,
        departure_time: f64,
        path:           &Path,
        from:           Point,
        to:             Point,
        person:         &Person,
    ) -> RouterResult<Vec<Leg>> {
        let mut trip = Trip {
            person,
            from,
            to,
            departure_time,
            time: departure_time,
            legs: Vec::new(),
            pt_legs: 0,
        };
        let mut state = LineState::NoLine { last_stop: None };

        for (i, &edge) in path.edges.iter().enumerate() {
            state = match (self.network.kind(edge), state) {
                (
                    EdgeKind::Transfer,
                    LineState::OnLine { line, route, boarding, access_stop, ridden_m },
                ) => {
                    let alight = self.network.edge_from[edge.index()];
                    let distance = self.network.length(edge);
                    self.close_ride(&mut trip, line, route, boarding, access_stop, alight, distance, ridden_m)?;
                    LineState::NoLine { last_stop: Some(self.network.node(alight).stop) }
                }
                (EdgeKind::Transfer, walking) => walking,

                (
                    EdgeKind::Transit { route, .. },
                    LineState::OnLine { line, route: open, boarding, access_stop, ridden_m },
                ) if route == open => LineState::OnLine {
                    line,
                    route,
                    boarding,
                    access_stop,
                    ridden_m: ridden_m + self.network.length(edge),
                },
                (EdgeKind::Transit { line, route }, LineState::NoLine { last_stop }) => {
                    self.board(&mut trip, last_stop, edge, line, route)
                }
                (
                    EdgeKind::Transit { line, route },
                    LineState::OnLine { line: open_line, route: open, boarding, access_stop, ridden_m },
                ) => {
                    // Route change without a transfer edge: the ride ends where
                    // the previous edge arrived.
                    let alight = i
                        .checked_sub(1)
                        .map(|j| self.network.edge_to[path.edges[j].index()])
                        .ok_or_else(|| trip.inconsistency(format!("riding {open} before the first edge")))?;
                    let distance = self.ride_beeline(access_stop, alight);
                    self.close_ride(&mut trip, open_line, open, boarding, access_stop, alight, distance, ridden_m)?;
                    let last_stop = Some(self.network.node(alight).stop);
                    self.board(&mut trip, last_stop, edge, line, route)
                }
            };
        }

        if let LineState::OnLine { line, route, boarding, access_stop, ridden_m } = state {
            let alight = path.last_node();
            let distance = self.ride_beeline(access_stop, alight);
            self.close_ride(&mut trip, line, route, boarding, access_stop, alight, distance, ridden_m)?;
            state = LineState::NoLine { last_stop: Some(self.network.node(alight).stop) };
        }

        if trip.pt_legs == 0 {
            log::debug!(
                "{person}: path of {} edge(s) boards no vehicle, using the direct leg",
                path.edges.len()
            );
            return Ok(vec![self.direct_leg(person, from, to, departure_time)]);
        }

        let LineState::NoLine { last_stop: Some(last_stop) } = state else {
            return Err(trip.inconsistency("no alighting stop after the last pt leg"));
        };
        self.push_egress(&mut trip, last_stop);
        Ok(trip.legs)
    }

    /// The single leg used when transit is not worthwhile.
    pub fn direct_leg(&self, person: &Person, from: Point, to: Point, departure_time: f64) -> Leg {
        self.access.price_leg(person, from, to, departure_time, false)
    }

    // ── Leg emitters ──────────────────────────────────────────────────────

    /// Walk to the boarding stop of `edge` if needed, then ride its route.
    fn board(
        &self,
        trip:      &mut Trip<'_>,
        last_stop: Option<StopId>,
        edge:      EdgeId,
        line:      LineId,
        route:     RouteId,
    ) -> LineState {
        let boarding = self.network.edge_from[edge.index()];
        let board_stop = self.network.node(boarding).stop;
        match last_stop {
            Some(prev) if prev != board_stop => self.push_transfer_walk(trip, prev, board_stop),
            Some(_) => {}
            None => self.push_access(trip, board_stop),
        }
        LineState::OnLine {
            line,
            route,
            boarding,
            access_stop: board_stop,
            ridden_m: self.network.length(edge),
        }
    }

    /// Beeline distance of a ride from `access_stop` to node `alight`.
    fn ride_beeline(&self, access_stop: StopId, alight: NodeId) -> f64 {
        let straight = self.schedule.stop(access_stop).coord.distance(self.network.node(alight).coord);
        self.config.beeline_distance(straight)
    }

    #[allow(clippy::too_many_arguments)]
    fn close_ride(
        &self,
        trip:        &mut Trip<'_>,
        line:        LineId,
        route:       RouteId,
        boarding:    NodeId,
        access_stop: StopId,
        alight:      NodeId,
        distance:    f64,
        ridden_m:    f64,
    ) -> RouterResult<()> {
        let board = self.network.node(boarding);
        let exit = self.network.node(alight);
        if exit.route != route {
            return Err(trip.inconsistency(format!(
                "ride on {route} ends at a node of {}",
                exit.route
            )));
        }
        let departure = self.lookup.next_departure_time(route, &board.route_stop, trip.time);
        let arrival = departure
            + (exit.route_stop.arrival_or_departure() - board.route_stop.departure_or_arrival());
        log::trace!(
            "{}: ride {route} {access_stop} -> {} departing {departure:.0}, {ridden_m:.0} m on the network",
            trip.person,
            exit.stop,
        );
        trip.push(Leg::transit(
            access_stop,
            line,
            route,
            exit.stop,
            trip.time,
            arrival - trip.time,
            distance,
        ));
        trip.pt_legs += 1;
        Ok(())
    }

    /// Walk between the previous alighting stop and the next boarding stop.
    fn push_transfer_walk(&self, trip: &mut Trip<'_>, alighted: StopId, boarding: StopId) {
        let a = self.schedule.stop(alighted);
        let b = self.schedule.stop(boarding);
        let walk = self.transit_walk(trip.person, a.coord, Some(a.link), b.coord, Some(b.link));
        trip.push(walk);
    }

    fn push_access(&self, trip: &mut Trip<'_>, boarding: StopId) {
        let stop = self.schedule.stop(boarding);
        let mut leg = self.access.price_leg(trip.person, trip.from, stop.coord, trip.time, false);
        if self.access.is_teleported_mode(leg.mode) {
            leg.set_end_link(stop.link);
            trip.push(leg);
            return;
        }
        let walk_from = leg.end_point().unwrap_or(stop.coord);
        let walk_from_link = leg.end_link();
        trip.push(leg);
        let walk = self.transit_walk(trip.person, walk_from, walk_from_link, stop.coord, Some(stop.link));
        trip.push(walk);
    }

    fn push_egress(&self, trip: &mut Trip<'_>, alighted: StopId) {
        let stop = self.schedule.stop(alighted);
        let mut leg = self.access.price_leg(trip.person, stop.coord, trip.to, trip.time, false);
        if self.access.is_teleported_mode(leg.mode) {
            leg.set_start_link(stop.link);
            trip.push(leg);
            return;
        }
        let walk_to = leg.start_point().unwrap_or(stop.coord);
        let walk = self.transit_walk(trip.person, stop.coord, Some(stop.link), walk_to, leg.start_link());
        trip.push(walk);
        trip.push(leg);
    }

    /// A `transit_walk` leg; departure time is stamped by `Trip::push`.
    fn transit_walk(
        &self,
        person:    &Person,
        from:      Point,
        from_link: Option<LinkId>,
        to:        Point,
        to_link:   Option<LinkId>,
    ) -> Leg {
        let time = self.costs.walk_travel_time(person, from, to) + self.config.additional_transfer_time;
        let distance = self.config.beeline_distance(from.distance(to));
        Leg::generic(TransportMode::TransitWalk, from, to, 0.0, time, distance)
            .with_links(from_link, to_link)
    }
}
