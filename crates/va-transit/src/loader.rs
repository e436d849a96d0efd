//! CSV schedule loader.
//!
//! # CSV format
//!
//! Three files (or readers).  External IDs are arbitrary strings; they are
//! mapped to dense typed IDs in order of first appearance.
//!
//! `stops.csv`
//! ```csv
//! stop_id,x,y,link_id,name
//! central,0.0,0.0,17,Central Station
//! ```
//!
//! `route_stops.csv`: one row per stop of a route; `arrival`/`departure`
//! are `HH:MM:SS` offsets from the route's first departure, either may be
//! empty.
//! ```csv
//! line_id,route_id,seq,stop_id,arrival,departure
//! 1,1-out,0,central,,00:00:00
//! 1,1-out,1,harbour,00:04:00,00:04:30
//! ```
//!
//! `departures.csv`: absolute departure times from the first stop.
//! ```csv
//! line_id,route_id,departure
//! 1,1-out,07:55:00
//! ```

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use va_core::time::parse_hms;
use va_core::{LineId, LinkId, Point, StopId};

use crate::{TransitError, TransitResult, TransitRouteStop, TransitSchedule, TransitScheduleBuilder};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct StopRecord {
    stop_id: String,
    x:       f64,
    y:       f64,
    link_id: u32,
    name:    String,
}

#[derive(Deserialize)]
struct RouteStopRecord {
    line_id:   String,
    route_id:  String,
    seq:       u32,
    stop_id:   String,
    arrival:   Option<String>,
    departure: Option<String>,
}

#[derive(Deserialize)]
struct DepartureRecord {
    line_id:   String,
    route_id:  String,
    departure: String,
}

#[derive(Default)]
struct PendingRoute {
    line:       String,
    name:       String,
    stops:      Vec<(u32, TransitRouteStop)>,
    departures: Vec<f64>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a schedule from `stops.csv`, `route_stops.csv` and `departures.csv`
/// in `dir`.
pub fn load_schedule_csv(dir: &Path) -> TransitResult<TransitSchedule> {
    let open = |name: &str| std::fs::File::open(dir.join(name)).map_err(TransitError::Io);
    load_schedule_readers(open("stops.csv")?, open("route_stops.csv")?, open("departures.csv")?)
}

/// Like [`load_schedule_csv`] but accepts any `Read` sources.
pub fn load_schedule_readers<A: Read, B: Read, C: Read>(
    stops:       A,
    route_stops: B,
    departures:  C,
) -> TransitResult<TransitSchedule> {
    let mut builder = TransitScheduleBuilder::new();

    // ── Stops ─────────────────────────────────────────────────────────────
    let mut stop_ids: HashMap<String, StopId> = HashMap::new();
    for row in csv::Reader::from_reader(stops).deserialize::<StopRecord>() {
        let row = row.map_err(|e| TransitError::Parse(e.to_string()))?;
        let id = builder.add_stop(Point::new(row.x, row.y), LinkId(row.link_id), row.name);
        if stop_ids.insert(row.stop_id.clone(), id).is_some() {
            return Err(TransitError::Parse(format!("duplicate stop_id {:?}", row.stop_id)));
        }
    }

    // ── Route stops, grouped by (line, route) in first-seen order ─────────
    let mut order: Vec<(String, String)> = Vec::new();
    let mut pending: HashMap<(String, String), PendingRoute> = HashMap::new();
    for row in csv::Reader::from_reader(route_stops).deserialize::<RouteStopRecord>() {
        let row = row.map_err(|e| TransitError::Parse(e.to_string()))?;
        let stop = *stop_ids
            .get(&row.stop_id)
            .ok_or_else(|| TransitError::UnknownStop(row.stop_id.clone()))?;
        let route_stop = TransitRouteStop::new(
            stop,
            parse_offset(row.arrival.as_deref())?,
            parse_offset(row.departure.as_deref())?,
        );
        let key = (row.line_id, row.route_id);
        let entry = pending.entry(key.clone()).or_insert_with(|| {
            order.push(key.clone());
            PendingRoute { line: key.0.clone(), name: key.1.clone(), ..Default::default() }
        });
        entry.stops.push((row.seq, route_stop));
    }

    // ── Departures ────────────────────────────────────────────────────────
    for row in csv::Reader::from_reader(departures).deserialize::<DepartureRecord>() {
        let row = row.map_err(|e| TransitError::Parse(e.to_string()))?;
        let route = pending
            .get_mut(&(row.line_id.clone(), row.route_id.clone()))
            .ok_or_else(|| TransitError::InvalidRoute {
                route:  format!("{}/{}", row.line_id, row.route_id),
                reason: "departure for a route without stops".into(),
            })?;
        route.departures.push(parse_hms(&row.departure)?);
    }

    // ── Lines and routes ──────────────────────────────────────────────────
    let mut line_ids: HashMap<String, LineId> = HashMap::new();
    for key in order {
        let Some(mut route) = pending.remove(&key) else { continue };
        route.stops.sort_by_key(|(seq, _)| *seq);
        let line = *line_ids
            .entry(route.line.clone())
            .or_insert_with(|| builder.add_line(route.line.clone()));
        builder.add_route(
            line,
            route.name,
            route.stops.into_iter().map(|(_, rs)| rs).collect(),
            route.departures,
        )?;
    }

    let schedule = builder.build();
    log::info!(
        "loaded transit schedule: {} stops, {} lines, {} routes",
        schedule.stops().len(),
        schedule.lines().len(),
        schedule.routes().len(),
    );
    Ok(schedule)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_offset(field: Option<&str>) -> TransitResult<Option<f64>> {
    match field.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => Ok(Some(parse_hms(text)?)),
    }
}
