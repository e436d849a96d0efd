//! Itinerary legs.
//!
//! A `Leg` is one contiguous piece of a door-to-door trip.  The router emits
//! an ordered `Vec<Leg>` in which each leg departs exactly when the previous
//! one arrives.
//!
//! # Invariants
//!
//! - `arrival_time() == departure_time + travel_time`
//! - `travel_time >= 0`
//! - pt legs carry [`LegRoute::Transit`]; every other mode carries
//!   [`LegRoute::Generic`]

use crate::{LineId, LinkId, Point, RouteId, StopId, TransportMode};

/// Route descriptor attached to a leg.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LegRoute {
    /// Walk or teleported leg between two coordinates.  The physical-network
    /// links are filled in when known (stop facilities carry one).
    Generic {
        start:      Point,
        end:        Point,
        start_link: Option<LinkId>,
        end_link:   Option<LinkId>,
    },
    /// A ride on one transit route from boarding to alighting stop.
    Transit {
        access_stop: StopId,
        line:        LineId,
        route:       RouteId,
        egress_stop: StopId,
    },
}

/// One leg of an itinerary.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leg {
    pub mode:           TransportMode,
    /// Seconds since midnight.
    pub departure_time: f64,
    /// Seconds; includes waiting for pt legs.
    pub travel_time:    f64,
    /// Metres.
    pub distance:       f64,
    pub route:          LegRoute,
}

impl Leg {
    /// A walk or teleported leg between two coordinates.
    pub fn generic(
        mode:           TransportMode,
        start:          Point,
        end:            Point,
        departure_time: f64,
        travel_time:    f64,
        distance:       f64,
    ) -> Self {
        Self {
            mode,
            departure_time,
            travel_time,
            distance,
            route: LegRoute::Generic { start, end, start_link: None, end_link: None },
        }
    }

    /// A pt leg riding `route` of `line` from `access_stop` to `egress_stop`.
    pub fn transit(
        access_stop:    StopId,
        line:           LineId,
        route:          RouteId,
        egress_stop:    StopId,
        departure_time: f64,
        travel_time:    f64,
        distance:       f64,
    ) -> Self {
        Self {
            mode: TransportMode::Pt,
            departure_time,
            travel_time,
            distance,
            route: LegRoute::Transit { access_stop, line, route, egress_stop },
        }
    }

    #[inline]
    pub fn arrival_time(&self) -> f64 {
        self.departure_time + self.travel_time
    }

    #[inline]
    pub fn is_pt(&self) -> bool {
        matches!(self.route, LegRoute::Transit { .. })
    }

    /// Start coordinate of a generic leg; `None` for pt legs.
    pub fn start_point(&self) -> Option<Point> {
        match self.route {
            LegRoute::Generic { start, .. } => Some(start),
            LegRoute::Transit { .. } => None,
        }
    }

    /// End coordinate of a generic leg; `None` for pt legs.
    pub fn end_point(&self) -> Option<Point> {
        match self.route {
            LegRoute::Generic { end, .. } => Some(end),
            LegRoute::Transit { .. } => None,
        }
    }

    pub fn start_link(&self) -> Option<LinkId> {
        match self.route {
            LegRoute::Generic { start_link, .. } => start_link,
            LegRoute::Transit { .. } => None,
        }
    }

    pub fn end_link(&self) -> Option<LinkId> {
        match self.route {
            LegRoute::Generic { end_link, .. } => end_link,
            LegRoute::Transit { .. } => None,
        }
    }

    /// Set the physical start link of a generic leg.  No-op on pt legs.
    pub fn set_start_link(&mut self, link: LinkId) {
        if let LegRoute::Generic { start_link, .. } = &mut self.route {
            *start_link = Some(link);
        }
    }

    /// Set the physical end link of a generic leg.  No-op on pt legs.
    pub fn set_end_link(&mut self, link: LinkId) {
        if let LegRoute::Generic { end_link, .. } = &mut self.route {
            *end_link = Some(link);
        }
    }

    /// Builder-style link assignment for generic legs.
    pub fn with_links(mut self, start: Option<LinkId>, end: Option<LinkId>) -> Self {
        if let LegRoute::Generic { start_link, end_link, .. } = &mut self.route {
            *start_link = start;
            *end_link = end;
        }
        self
    }

    /// Re-stamp the departure time, keeping the travel time.
    pub fn departing_at(mut self, time: f64) -> Self {
        self.departure_time = time;
        self
    }
}
