//! `va-router` — door-to-door routing with variable access and egress.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                        |
//! |----------------|-----------------------------------------------------------------|
//! | [`locator`]    | `StopLocator`: radius query with adaptive extension             |
//! | [`access`]     | `AccessEgressModel` trait, `DistanceBasedAccessModel`           |
//! | [`pricer`]     | `AccessEgressPricer`: access/egress leg → search cost           |
//! | [`candidates`] | `build_candidates`: weighted entry/exit nodes                   |
//! | [`itinerary`]  | `ItineraryBuilder`: path → legs state machine                   |
//! | [`router`]     | `VariableAccessTransitRouter`, `Facility`                       |
//! | [`batch`]      | `RouteRequest`, sequential and parallel batch routing           |
//! | [`config`]     | `RouterSettings` TOML loading and validation                    |
//! | [`error`]      | `RouterError`, `RouterResult<T>`                                |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | Enables `route_batch_parallel` on Rayon's thread pool.   |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let settings = va_router::load_settings(Path::new("router.toml"))?;
//! let schedule = va_transit::load_schedule_csv(Path::new("schedule/"))?;
//! let network = TransitRouterNetwork::from_schedule(
//!     &schedule,
//!     settings.router.max_beeline_walk_connection_distance,
//! );
//! let prepared = PreparedSchedule::new(&schedule);
//! let access = settings.access_model();
//! let mut router = VariableAccessTransitRouter::with_random_surcharge(
//!     &network, &schedule, &prepared, &access, &settings.router, &mut SimRng::new(42),
//! );
//! let legs = router.calc_route(&origin, &destination, hms(8, 0, 0), &person)?;
//! ```

pub mod access;
pub mod batch;
pub mod candidates;
pub mod config;
pub mod error;
pub mod itinerary;
pub mod locator;
pub mod pricer;
pub mod router;

#[cfg(test)]
mod tests;

pub use access::{AccessEgressModel, AccessModeSpec, DiscouragedStop, DistanceBasedAccessModel};
pub use batch::{route_batch, RouteRequest};
#[cfg(feature = "parallel")]
pub use batch::route_batch_parallel;
pub use candidates::build_candidates;
pub use config::{load_settings, settings_from_toml_str, validate, RouterSettings};
pub use error::{RouterError, RouterResult};
pub use itinerary::{ItineraryBuilder, LineState};
pub use locator::StopLocator;
pub use pricer::AccessEgressPricer;
pub use router::{Facility, VariableAccessTransitRouter};
