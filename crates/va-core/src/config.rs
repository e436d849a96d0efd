//! Router configuration.
//!
//! All marginal utilities follow the scoring convention: they are *negative*
//! utilities per unit (utl/s, utl/m), so a cost is obtained by negating
//! `time * mu_time + distance * mu_distance`.
//!
//! Typically loaded from a TOML file by `va-router::config` and then shared
//! read-only by every router instance.

use crate::TransportMode;

/// Marginal utilities for one teleported access/egress mode.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeleportedModeParams {
    pub mode: TransportMode,
    /// utl/s, negative.
    pub marginal_utility_of_travel_time_utl_s: f64,
    /// utl/m, zero or negative.
    pub marginal_utility_of_travel_distance_utl_m: f64,
}

/// Immutable parameters of the variable-access transit router.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RouterConfig {
    /// Radius (m) of the initial candidate-stop query around origin and destination.
    pub search_radius: f64,

    /// Added to the nearest stop's distance when the initial query finds
    /// fewer than two nodes.
    pub extension_radius: f64,

    /// Walking legs and transfers: utl/s (includes the opportunity cost of time).
    pub marginal_utility_of_travel_time_walk_utl_s: f64,

    /// In-vehicle time on pt: utl/s.
    pub marginal_utility_of_travel_time_pt_utl_s: f64,

    /// Waiting at a stop: utl/s.
    pub marginal_utility_of_waiting_pt_utl_s: f64,

    /// Distance travelled on pt and on walk legs: utl/m.
    pub marginal_utility_of_travel_distance_pt_utl_m: f64,

    /// Utility of each change between lines (negative).
    pub utility_of_line_switch_utl: f64,

    /// Seconds added to every transfer walk.
    pub additional_transfer_time: f64,

    /// Multiplier turning straight-line distance into walk distance.
    pub beeline_distance_factor: f64,

    /// Walking speed along the beeline (m/s), i.e. already divided by
    /// `beeline_distance_factor`.
    pub beeline_walk_speed: f64,

    /// The transit path is dropped in favour of the direct leg when
    /// `direct_cost * direct_walk_factor < path_cost`.
    pub direct_walk_factor: f64,

    /// Transfer edges connect router nodes at most this far apart (m).
    pub max_beeline_walk_connection_distance: f64,

    /// Priced teleported access/egress modes.  Modes absent here (and not in
    /// the walk family) are rejected by the pricer.
    pub teleported_modes: Vec<TeleportedModeParams>,
}

impl RouterConfig {
    /// Parameters for a teleported mode, if configured.
    pub fn teleported_mode(&self, mode: TransportMode) -> Option<&TeleportedModeParams> {
        self.teleported_modes.iter().find(|p| p.mode == mode)
    }

    /// Straight-line distance scaled to an approximate walk distance.
    #[inline]
    pub fn beeline_distance(&self, straight_line_m: f64) -> f64 {
        straight_line_m * self.beeline_distance_factor
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        // Performing earns 6 utl/h; travelling loses the mode's own rate on top.
        const PERFORMING_UTL_S: f64 = 6.0 / 3_600.0;
        Self {
            search_radius:                                1_000.0,
            extension_radius:                             200.0,
            marginal_utility_of_travel_time_walk_utl_s:   -12.0 / 3_600.0 - PERFORMING_UTL_S,
            marginal_utility_of_travel_time_pt_utl_s:     -6.0 / 3_600.0 - PERFORMING_UTL_S,
            marginal_utility_of_waiting_pt_utl_s:         -6.0 / 3_600.0 - PERFORMING_UTL_S,
            marginal_utility_of_travel_distance_pt_utl_m: 0.0,
            utility_of_line_switch_utl:                   -1.0,
            additional_transfer_time:                     0.0,
            beeline_distance_factor:                      1.3,
            beeline_walk_speed:                           3.0 / 3.6 / 1.3,
            direct_walk_factor:                           1.0,
            max_beeline_walk_connection_distance:         100.0,
            teleported_modes: vec![TeleportedModeParams {
                mode: TransportMode::Drt,
                marginal_utility_of_travel_time_utl_s:     -4.0 / 3_600.0 - PERFORMING_UTL_S,
                marginal_utility_of_travel_distance_utl_m: 0.0,
            }],
        }
    }
}
