//! Routing many requests at once.
//!
//! A router serves one request at a time, so a batch is routed either
//! sequentially on one router or, with the `parallel` feature, on Rayon's
//! pool with one router per worker built by a caller-supplied factory.

use va_core::{Leg, Person, Point};
use va_transit::{PathSearch, ScheduleLookup};

use crate::{AccessEgressModel, RouterResult, VariableAccessTransitRouter};

/// One door-to-door request.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RouteRequest {
    pub person:         Person,
    pub from:           Point,
    pub to:             Point,
    pub departure_time: f64,
}

/// Route `requests` in order on `router`.
pub fn route_batch<A, S, P>(
    router:   &mut VariableAccessTransitRouter<'_, A, S, P>,
    requests: &[RouteRequest],
) -> Vec<RouterResult<Option<Vec<Leg>>>>
where
    A: AccessEgressModel,
    S: ScheduleLookup,
    P: PathSearch,
{
    requests
        .iter()
        .map(|r| router.calc_route(&r.from, &r.to, r.departure_time, &r.person))
        .collect()
}

/// Route `requests` on Rayon's pool.  `make_router` runs once per worker
/// split; results come back in request order.
#[cfg(feature = "parallel")]
pub fn route_batch_parallel<'a, A, S, P, F>(
    requests:    &[RouteRequest],
    make_router: F,
) -> Vec<RouterResult<Option<Vec<Leg>>>>
where
    A: AccessEgressModel,
    S: ScheduleLookup,
    P: PathSearch,
    F: Fn() -> VariableAccessTransitRouter<'a, A, S, P> + Sync + Send,
{
    use rayon::prelude::*;

    log::debug!("routing {} requests on {} threads", requests.len(), rayon::current_num_threads());
    requests
        .par_iter()
        .map_init(make_router, |router, r| {
            router.calc_route(&r.from, &r.to, r.departure_time, &r.person)
        })
        .collect()
}
