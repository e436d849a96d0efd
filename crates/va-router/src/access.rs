//! Access/egress models: how a traveller gets between an arbitrary point and
//! a stop.
//!
//! The router asks the model for a [`Leg`] and prices it itself (see
//! [`AccessEgressPricer`][crate::AccessEgressPricer]); the model decides the
//! mode and the travel time.
//!
//! # Distance-based default
//!
//! [`DistanceBasedAccessModel`] holds an ordered list of [`AccessModeSpec`]s
//! and picks the first mode whose `max_distance` covers the straight-line
//! distance, falling back to the last mode when none does:
//!
//! ```text
//!   0 m ───── walk ───── 1 000 m ───── drt ───── ∞
//! ```
//!
//! Stops can be marked as discouraged.  A leg that ends at a discouraged
//! stop carries that stop's time surcharge when the caller switches the
//! surcharge on.

use serde::{Deserialize, Serialize};

use va_core::{Leg, Person, Point, RouterConfig, TransportMode};

/// Pluggable first/last-mile model.
///
/// Implementations must be `Send + Sync`: a batch of requests shares one
/// model across worker threads.
pub trait AccessEgressModel: Send + Sync {
    /// Leg from `from` to `to` departing at `time`.  `surcharge_on` applies
    /// the discouraged-stop surcharge, if the model has one.
    fn price_leg(
        &self,
        person:       &Person,
        from:         Point,
        to:           Point,
        time:         f64,
        surcharge_on: bool,
    ) -> Leg;

    /// `true` for modes consumed as a single leg straight to or from the
    /// stop, without a connecting transit walk.
    fn is_teleported_mode(&self, mode: TransportMode) -> bool;

    /// Disutility of travelling from `from` to `to` without transit.
    fn direct_disutility(&self, person: &Person, from: Point, to: Point) -> f64;
}

// ── AccessModeSpec ────────────────────────────────────────────────────────────

/// One access mode of a [`DistanceBasedAccessModel`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccessModeSpec {
    pub mode:         TransportMode,
    /// Largest straight-line distance (m) served by this mode.
    pub max_distance: f64,
    /// Speed along the beeline-scaled distance (m/s).  Ignored for walk-family
    /// modes, which use the router's beeline walk speed.
    #[serde(default)]
    pub speed:        f64,
    #[serde(default)]
    pub teleported:   bool,
}

impl AccessModeSpec {
    /// Walk up to `max_distance`.
    pub fn walk(max_distance: f64) -> Self {
        Self { mode: TransportMode::Walk, max_distance, speed: 0.0, teleported: false }
    }

    /// A teleported mode at `speed` m/s up to `max_distance`.
    pub fn teleported(mode: TransportMode, max_distance: f64, speed: f64) -> Self {
        Self { mode, max_distance, speed, teleported: true }
    }
}

/// A stop location that receives a time surcharge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiscouragedStop {
    pub coord:       Point,
    /// Seconds added to legs ending here.
    pub surcharge_s: f64,
}

// ── DistanceBasedAccessModel ──────────────────────────────────────────────────

/// Coordinates closer than this (m) are the same stop.
const SAME_STOP_TOLERANCE: f64 = 1e-6;

/// Picks the access mode by straight-line distance.
#[derive(Clone, Debug)]
pub struct DistanceBasedAccessModel {
    modes:                   Vec<AccessModeSpec>,
    discouraged:             Vec<DiscouragedStop>,
    beeline_distance_factor: f64,
    beeline_walk_speed:      f64,
    mu_walk_time:            f64,
    mu_distance:             f64,
}

impl DistanceBasedAccessModel {
    /// Walk-only model using `config`'s beeline parameters.
    pub fn new(config: &RouterConfig) -> Self {
        Self {
            modes:                   vec![AccessModeSpec::walk(f64::INFINITY)],
            discouraged:             Vec::new(),
            beeline_distance_factor: config.beeline_distance_factor,
            beeline_walk_speed:      config.beeline_walk_speed,
            mu_walk_time:            config.marginal_utility_of_travel_time_walk_utl_s,
            mu_distance:             config.marginal_utility_of_travel_distance_pt_utl_m,
        }
    }

    /// Replace the mode list.  Modes are kept sorted by `max_distance`.
    /// An empty list leaves the current modes in place.
    pub fn with_modes(mut self, mut modes: Vec<AccessModeSpec>) -> Self {
        if !modes.is_empty() {
            modes.sort_by(|a, b| a.max_distance.total_cmp(&b.max_distance));
            self.modes = modes;
        }
        self
    }

    pub fn discourage_stop(mut self, coord: Point, surcharge_s: f64) -> Self {
        self.discouraged.push(DiscouragedStop { coord, surcharge_s });
        self
    }

    pub fn with_discouraged_stops(mut self, stops: Vec<DiscouragedStop>) -> Self {
        self.discouraged.extend(stops);
        self
    }

    pub fn modes(&self) -> &[AccessModeSpec] {
        &self.modes
    }

    fn select(&self, straight_line_m: f64) -> &AccessModeSpec {
        self.modes
            .iter()
            .find(|m| straight_line_m <= m.max_distance)
            .unwrap_or_else(|| &self.modes[self.modes.len() - 1])
    }

    fn surcharge_at(&self, to: Point) -> f64 {
        self.discouraged
            .iter()
            .filter(|d| d.coord.distance(to) <= SAME_STOP_TOLERANCE)
            .map(|d| d.surcharge_s)
            .sum()
    }
}

impl AccessEgressModel for DistanceBasedAccessModel {
    fn price_leg(
        &self,
        _person:      &Person,
        from:         Point,
        to:           Point,
        time:         f64,
        surcharge_on: bool,
    ) -> Leg {
        let straight = from.distance(to);
        let spec = self.select(straight);
        let distance = straight * self.beeline_distance_factor;
        let mut travel_time = if spec.mode.is_walk_family() || spec.speed <= 0.0 {
            straight / self.beeline_walk_speed
        } else {
            distance / spec.speed
        };
        if surcharge_on {
            travel_time += self.surcharge_at(to);
        }
        Leg::generic(spec.mode, from, to, time, travel_time, distance)
    }

    fn is_teleported_mode(&self, mode: TransportMode) -> bool {
        self.modes.iter().any(|m| m.mode == mode && m.teleported)
    }

    fn direct_disutility(&self, _person: &Person, from: Point, to: Point) -> f64 {
        let straight = from.distance(to);
        let time = straight / self.beeline_walk_speed;
        -time * self.mu_walk_time - straight * self.beeline_distance_factor * self.mu_distance
    }
}
