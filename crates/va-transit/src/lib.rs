//! `va-transit` — transit schedule, router graph, costs, and path search.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`schedule`] | `TransitSchedule` (stops, lines, routes), `TransitScheduleBuilder` |
//! | [`prepared`] | `ScheduleLookup` trait, `PreparedSchedule` departure cache     |
//! | [`network`]  | `TransitRouterNetwork` (CSR + R-tree) built from a schedule    |
//! | [`travel`]   | `TransitCostModel` trait, `TransitTravelDisutility`           |
//! | [`search`]   | `PathSearch` trait, `LeastCostPathTree`, `CandidateSet`, `Path` |
//! | [`loader`]   | CSV schedule loader                                           |
//! | [`error`]    | `TransitError`, `TransitResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                         |
//! |---------|----------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on the schedule and `va-core` types. |

pub mod error;
pub mod loader;
pub mod network;
pub mod prepared;
pub mod schedule;
pub mod search;
pub mod travel;


pub use error::{TransitError, TransitResult};
pub use loader::{load_schedule_csv, load_schedule_readers};
pub use network::{EdgeKind, RouterNode, TransitRouterNetwork};
pub use prepared::{PreparedSchedule, ScheduleLookup};
pub use schedule::{
    TransitLine, TransitRoute, TransitRouteStop, TransitSchedule, TransitScheduleBuilder,
    TransitStopFacility,
};
pub use search::{CandidateSet, InitialNode, LeastCostPathTree, Path, PathSearch};
pub use travel::{TransitCostModel, TransitTravelDisutility};
