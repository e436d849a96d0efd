//! TOML settings.
//!
//! ```toml
//! [router]
//! search_radius    = 800.0
//! extension_radius = 250.0
//!
//! [[router.teleported_modes]]
//! mode = "drt"
//! marginal_utility_of_travel_time_utl_s     = -0.0027777
//! marginal_utility_of_travel_distance_utl_m = 0.0
//!
//! [[access_modes]]
//! mode         = "walk"
//! max_distance = 1000.0
//!
//! [[access_modes]]
//! mode         = "drt"
//! max_distance = 1.0e9
//! speed        = 8.0
//! teleported   = true
//!
//! [[discouraged_stops]]
//! coord       = { x = 1200.0, y = 0.0 }
//! surcharge_s = 600.0
//! ```
//!
//! Every section and key is optional; missing values take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use va_core::RouterConfig;

use crate::{AccessModeSpec, DiscouragedStop, DistanceBasedAccessModel, RouterError, RouterResult};

/// Router parameters plus the default access model's setup.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterSettings {
    pub router:            RouterConfig,
    /// Empty: walk at any distance.
    pub access_modes:      Vec<AccessModeSpec>,
    pub discouraged_stops: Vec<DiscouragedStop>,
}

impl RouterSettings {
    /// The distance-based access model these settings describe.
    pub fn access_model(&self) -> DistanceBasedAccessModel {
        DistanceBasedAccessModel::new(&self.router)
            .with_modes(self.access_modes.clone())
            .with_discouraged_stops(self.discouraged_stops.clone())
    }
}

/// Parse and validate settings from TOML text.
pub fn settings_from_toml_str(text: &str) -> RouterResult<RouterSettings> {
    let settings: RouterSettings =
        toml::from_str(text).map_err(|e| RouterError::Config(e.to_string()))?;
    validate(&settings)?;
    Ok(settings)
}

/// Read, parse and validate a TOML settings file.
pub fn load_settings(path: &Path) -> RouterResult<RouterSettings> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| RouterError::Config(format!("{}: {e}", path.display())))?;
    let settings = settings_from_toml_str(&text)?;
    log::info!("loaded router settings from {}", path.display());
    Ok(settings)
}

/// Reject settings the router cannot work with.
pub fn validate(settings: &RouterSettings) -> RouterResult<()> {
    let c = &settings.router;
    let positive = [
        ("search_radius", c.search_radius),
        ("extension_radius", c.extension_radius),
        ("beeline_distance_factor", c.beeline_distance_factor),
        ("beeline_walk_speed", c.beeline_walk_speed),
    ];
    for (name, value) in positive {
        if !(value > 0.0 && value.is_finite()) {
            return Err(RouterError::Config(format!("{name} must be positive, got {value}")));
        }
    }
    let non_negative = [
        ("additional_transfer_time", c.additional_transfer_time),
        ("direct_walk_factor", c.direct_walk_factor),
        ("max_beeline_walk_connection_distance", c.max_beeline_walk_connection_distance),
    ];
    for (name, value) in non_negative {
        if !(value >= 0.0) {
            return Err(RouterError::Config(format!("{name} must not be negative, got {value}")));
        }
    }
    // Costs are negated utilities; a positive utility would give negative
    // edge and candidate costs.
    let utilities = [
        ("marginal_utility_of_travel_time_walk_utl_s", c.marginal_utility_of_travel_time_walk_utl_s),
        ("marginal_utility_of_travel_time_pt_utl_s", c.marginal_utility_of_travel_time_pt_utl_s),
        ("marginal_utility_of_waiting_pt_utl_s", c.marginal_utility_of_waiting_pt_utl_s),
        ("marginal_utility_of_travel_distance_pt_utl_m", c.marginal_utility_of_travel_distance_pt_utl_m),
        ("utility_of_line_switch_utl", c.utility_of_line_switch_utl),
    ];
    for (name, value) in utilities {
        if !(value <= 0.0) {
            return Err(RouterError::Config(format!("{name} must not be positive, got {value}")));
        }
    }
    for p in &c.teleported_modes {
        let time = p.marginal_utility_of_travel_time_utl_s;
        let distance = p.marginal_utility_of_travel_distance_utl_m;
        if !(time <= 0.0 && distance <= 0.0) {
            return Err(RouterError::Config(format!(
                "teleported mode {} has a positive marginal utility ({time} utl/s, {distance} utl/m)",
                p.mode
            )));
        }
    }
    for spec in &settings.access_modes {
        let priced = spec.mode.is_walk_family() || c.teleported_mode(spec.mode).is_some();
        if !priced {
            return Err(RouterError::UnsupportedMode(spec.mode));
        }
        if spec.teleported && !(spec.speed > 0.0) {
            return Err(RouterError::Config(format!(
                "teleported access mode {} needs a positive speed",
                spec.mode
            )));
        }
    }
    Ok(())
}
