//! `va-core` — shared vocabulary of the variable-access router workspace.
//!
//! IDs, planar geometry, clock helpers, modes, legs and the router's tunable
//! parameters.  `va-transit` and `va-router` both build on these types; this
//! crate depends on neither.  External crates: `rand`, `thiserror`, and
//! `serde` behind a feature.
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | dense `u32` IDs for persons, stops, lines, routes, nodes, edges, links |
//! | [`geo`]         | `Point` in a projected metric CRS                     |
//! | [`time`]        | seconds-since-midnight helpers, `MIDNIGHT`            |
//! | [`transport`]   | `TransportMode` and the walk family                   |
//! | [`leg`]         | `Leg`, `LegRoute`                                     |
//! | [`person`]      | `Person`                                              |
//! | [`config`]      | `RouterConfig`, `TeleportedModeParams`                |
//! | [`rng`]         | `SimRng`                                              |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! The `serde` feature derives `Serialize`/`Deserialize` on the public data
//! types; `va-router` turns it on for its TOML settings.

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod leg;
pub mod person;
pub mod rng;
pub mod time;
pub mod transport;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{RouterConfig, TeleportedModeParams};
pub use error::{CoreError, CoreResult};
pub use geo::Point;
pub use ids::{EdgeId, LineId, LinkId, NodeId, PersonId, RouteId, StopId};
pub use leg::{Leg, LegRoute};
pub use person::Person;
pub use rng::SimRng;
pub use transport::TransportMode;
