//! Transit schedule: stop facilities, lines, and routes.
//!
//! The schedule is built once, then shared read-only by the router graph,
//! the departure cache, and every router instance.  All entities live in
//! dense `Vec`s indexed by their typed IDs.
//!
//! # Offsets
//!
//! Each route stop carries arrival/departure offsets in seconds relative to
//! the route's departure from its first stop.  Either may be undefined: the
//! first stop typically has no arrival, the last no departure.  Consumers
//! use [`TransitRouteStop::arrival_or_departure`] and
//! [`TransitRouteStop::departure_or_arrival`] to fall back to the other.

use va_core::{LineId, LinkId, Point, RouteId, StopId};

use crate::{TransitError, TransitResult};

/// A boarding/alighting location.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitStopFacility {
    pub id:    StopId,
    pub coord: Point,
    /// Link of the physical network the stop sits on.
    pub link:  LinkId,
    pub name:  String,
}

/// A stop as visited by one route, with schedule offsets.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitRouteStop {
    pub stop:             StopId,
    pub arrival_offset:   Option<f64>,
    pub departure_offset: Option<f64>,
}

impl TransitRouteStop {
    pub fn new(stop: StopId, arrival_offset: Option<f64>, departure_offset: Option<f64>) -> Self {
        Self { stop, arrival_offset, departure_offset }
    }

    /// Arrival offset, or the departure offset when arrival is undefined.
    #[inline]
    pub fn arrival_or_departure(&self) -> f64 {
        self.arrival_offset.or(self.departure_offset).unwrap_or(0.0)
    }

    /// Departure offset, or the arrival offset when departure is undefined.
    #[inline]
    pub fn departure_or_arrival(&self) -> f64 {
        self.departure_offset.or(self.arrival_offset).unwrap_or(0.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitLine {
    pub id:     LineId,
    pub name:   String,
    pub routes: Vec<RouteId>,
}

/// One stop pattern of a line, with the departure times of its vehicles
/// from the first stop.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitRoute {
    pub id:         RouteId,
    pub line:       LineId,
    pub name:       String,
    pub stops:      Vec<TransitRouteStop>,
    /// Seconds since midnight at the first stop, unsorted as given.
    pub departures: Vec<f64>,
}

/// Immutable schedule.  Construct with [`TransitScheduleBuilder`].
///
/// With the `serde` feature a built schedule can be stored and read back;
/// deserialisation does not re-run the builder's checks, so only feed it
/// what was serialised from a built schedule.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitSchedule {
    stops:  Vec<TransitStopFacility>,
    lines:  Vec<TransitLine>,
    routes: Vec<TransitRoute>,
}

impl TransitSchedule {
    #[inline]
    pub fn stop(&self, id: StopId) -> &TransitStopFacility {
        &self.stops[id.index()]
    }

    #[inline]
    pub fn line(&self, id: LineId) -> &TransitLine {
        &self.lines[id.index()]
    }

    #[inline]
    pub fn route(&self, id: RouteId) -> &TransitRoute {
        &self.routes[id.index()]
    }

    pub fn stops(&self) -> &[TransitStopFacility] {
        &self.stops
    }

    pub fn lines(&self) -> &[TransitLine] {
        &self.lines
    }

    pub fn routes(&self) -> &[TransitRoute] {
        &self.routes
    }

    pub fn stop_by_name(&self, name: &str) -> Option<&TransitStopFacility> {
        self.stops.iter().find(|s| s.name == name)
    }
}

// ── TransitScheduleBuilder ────────────────────────────────────────────────────

/// Incrementally assemble a [`TransitSchedule`].
///
/// # Example
///
/// ```
/// use va_core::{LinkId, Point};
/// use va_transit::{TransitRouteStop, TransitScheduleBuilder};
///
/// let mut b = TransitScheduleBuilder::new();
/// let a = b.add_stop(Point::new(0.0, 0.0), LinkId(0), "A");
/// let c = b.add_stop(Point::new(1_000.0, 0.0), LinkId(1), "C");
/// let line = b.add_line("bus 1");
/// b.add_route(
///     line,
///     "outbound",
///     vec![
///         TransitRouteStop::new(a, None, Some(0.0)),
///         TransitRouteStop::new(c, Some(120.0), None),
///     ],
///     vec![8.0 * 3_600.0],
/// )
/// .unwrap();
/// let schedule = b.build();
/// assert_eq!(schedule.routes().len(), 1);
/// ```
#[derive(Default)]
pub struct TransitScheduleBuilder {
    inner: TransitSchedule,
}

impl TransitScheduleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stop facility and return its `StopId` (sequential from 0).
    pub fn add_stop(&mut self, coord: Point, link: LinkId, name: impl Into<String>) -> StopId {
        let id = StopId::from_index(self.inner.stops.len());
        self.inner.stops.push(TransitStopFacility { id, coord, link, name: name.into() });
        id
    }

    pub fn add_line(&mut self, name: impl Into<String>) -> LineId {
        let id = LineId::from_index(self.inner.lines.len());
        self.inner.lines.push(TransitLine { id, name: name.into(), routes: Vec::new() });
        id
    }

    /// Add a route to `line`.
    ///
    /// # Errors
    ///
    /// - the line or any stop is unknown
    /// - fewer than two stops
    /// - no departures
    pub fn add_route(
        &mut self,
        line:       LineId,
        name:       impl Into<String>,
        stops:      Vec<TransitRouteStop>,
        departures: Vec<f64>,
    ) -> TransitResult<RouteId> {
        let name = name.into();
        if line.index() >= self.inner.lines.len() {
            return Err(TransitError::UnknownLine(line.to_string()));
        }
        if let Some(bad) = stops.iter().find(|rs| rs.stop.index() >= self.inner.stops.len()) {
            return Err(TransitError::UnknownStop(bad.stop.to_string()));
        }
        if stops.len() < 2 {
            return Err(TransitError::InvalidRoute { route: name, reason: "fewer than two stops".into() });
        }
        if departures.is_empty() {
            return Err(TransitError::InvalidRoute { route: name, reason: "no departures".into() });
        }

        let id = RouteId::from_index(self.inner.routes.len());
        self.inner.routes.push(TransitRoute { id, line, name, stops, departures });
        self.inner.lines[line.index()].routes.push(id);
        Ok(id)
    }

    pub fn build(self) -> TransitSchedule {
        self.inner
    }
}
