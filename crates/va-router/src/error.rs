//! Router error type.

use thiserror::Error;

use va_core::{PersonId, Point, TransportMode};
use va_transit::TransitError;

/// Errors produced by `va-router`.
///
/// An unreachable destination is not an error: `calc_route` returns
/// `Ok(None)` for it.
#[derive(Debug, Error)]
pub enum RouterError {
    /// The access/egress model produced a mode with no priced parameters.
    #[error("no marginal utility parameters configured for access/egress mode {0}")]
    UnsupportedMode(TransportMode),

    /// Stop lookup on a router graph without nodes.
    #[error("transit router network has no nodes")]
    EmptyGraph,

    /// Path and candidate sets disagree, or the path does not fit the
    /// reconstruction rules.
    #[error("inconsistent route for {person} from {from} to {to} at t={time}s: {detail}")]
    InternalInconsistency {
        person: PersonId,
        from:   Point,
        to:     Point,
        time:   f64,
        detail: String,
    },

    #[error("router configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Transit(#[from] TransitError),
}

pub type RouterResult<T> = Result<T, RouterError>;
