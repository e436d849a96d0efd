//! The variable-access transit router.

use va_core::{Leg, Person, Point, RouterConfig, SimRng};
use va_transit::{
    LeastCostPathTree, PathSearch, ScheduleLookup, TransitRouterNetwork, TransitSchedule,
    TransitStopFacility, TransitTravelDisutility,
};

use crate::{
    build_candidates, AccessEgressModel, AccessEgressPricer, ItineraryBuilder, RouterError,
    RouterResult, StopLocator,
};

// ── Facility ──────────────────────────────────────────────────────────────────

/// Anything a trip can start or end at.
pub trait Facility {
    fn coord(&self) -> Point;
}

impl Facility for Point {
    fn coord(&self) -> Point {
        *self
    }
}

impl Facility for TransitStopFacility {
    fn coord(&self) -> Point {
        self.coord
    }
}

// ── VariableAccessTransitRouter ───────────────────────────────────────────────

/// Door-to-door router combining a variable access/egress model with a
/// fixed transit schedule.
///
/// # Request flow
///
/// ```text
///   origin ──▶ StopLocator ──▶ pricer ──▶ CandidateSet ─┐
///                                                       ├─▶ PathSearch ──▶ direct? ──▶ ItineraryBuilder
///   destination ──▶ StopLocator ──▶ pricer ──▶ CandidateSet ─┘
/// ```
///
/// # Surcharge toggle
///
/// `surcharge_on` is fixed at construction.  While on, candidate legs ending
/// at discouraged stops carry the access model's surcharge; all discouraged
/// stops are treated alike within one instance.  Building routers with
/// alternating flags spreads the surcharge over repeated requests.
///
/// # Concurrency
///
/// `calc_route` takes `&mut self` because the path search reuses scratch
/// buffers.  Use one router per thread; every other input is borrowed
/// immutably and may be shared.
pub struct VariableAccessTransitRouter<'a, A, S, P = LeastCostPathTree>
where
    A: AccessEgressModel,
    S: ScheduleLookup,
    P: PathSearch,
{
    network:      &'a TransitRouterNetwork,
    schedule:     &'a TransitSchedule,
    costs:        TransitTravelDisutility<'a, S>,
    access:       &'a A,
    config:       &'a RouterConfig,
    search:       P,
    surcharge_on: bool,
}

impl<'a, A, S> VariableAccessTransitRouter<'a, A, S, LeastCostPathTree>
where
    A: AccessEgressModel,
    S: ScheduleLookup,
{
    pub fn new(
        network:      &'a TransitRouterNetwork,
        schedule:     &'a TransitSchedule,
        lookup:       &'a S,
        access:       &'a A,
        config:       &'a RouterConfig,
        surcharge_on: bool,
    ) -> Self {
        Self {
            network,
            schedule,
            costs: TransitTravelDisutility::new(lookup, config),
            access,
            config,
            search: LeastCostPathTree::new(),
            surcharge_on,
        }
    }

    /// Like [`new`][Self::new] with the surcharge flag drawn from `rng`.
    pub fn with_random_surcharge(
        network:  &'a TransitRouterNetwork,
        schedule: &'a TransitSchedule,
        lookup:   &'a S,
        access:   &'a A,
        config:   &'a RouterConfig,
        rng:      &mut SimRng,
    ) -> Self {
        Self::new(network, schedule, lookup, access, config, rng.coin_flip())
    }
}

impl<'a, A, S, P> VariableAccessTransitRouter<'a, A, S, P>
where
    A: AccessEgressModel,
    S: ScheduleLookup,
    P: PathSearch,
{
    /// Swap the path-search engine.
    pub fn with_search<Q: PathSearch>(self, search: Q) -> VariableAccessTransitRouter<'a, A, S, Q> {
        VariableAccessTransitRouter {
            network:      self.network,
            schedule:     self.schedule,
            costs:        self.costs,
            access:       self.access,
            config:       self.config,
            search,
            surcharge_on: self.surcharge_on,
        }
    }

    pub fn surcharge_on(&self) -> bool {
        self.surcharge_on
    }

    pub fn network(&self) -> &'a TransitRouterNetwork {
        self.network
    }

    /// Least-disutility legs from `from` to `to` departing at
    /// `departure_time`.
    ///
    /// Returns `Ok(None)` when no destination candidate is reachable from
    /// any origin candidate.
    pub fn calc_route<F: Facility + ?Sized, T: Facility + ?Sized>(
        &mut self,
        from:           &F,
        to:             &T,
        departure_time: f64,
        person:         &Person,
    ) -> RouterResult<Option<Vec<Leg>>> {
        let (from, to) = (from.coord(), to.coord());
        let locator = StopLocator::new(self.network, self.config);
        let pricer = AccessEgressPricer::new(self.access, self.config);

        let origins = build_candidates(
            self.network, &locator, &pricer, person, from, departure_time, self.surcharge_on,
        )?;
        let destinations = build_candidates(
            self.network, &locator, &pricer, person, to, departure_time, self.surcharge_on,
        )?;
        log::debug!(
            "{person}: {from} -> {to} at {departure_time:.0}: {} origin / {} destination candidates",
            origins.len(),
            destinations.len(),
        );

        let Some(path) = self.search.search(self.network, &self.costs, &origins, &destinations, person) else {
            log::warn!("{person}: no transit path from {from} to {to}");
            return Ok(None);
        };

        let inconsistent = |detail: &str| RouterError::InternalInconsistency {
            person: person.id,
            from,
            to,
            time: departure_time,
            detail: detail.to_string(),
        };
        let origin_cost = origins
            .get(path.first_node())
            .ok_or_else(|| inconsistent("path starts outside the origin candidates"))?
            .cost;
        let destination_cost = destinations
            .get(path.last_node())
            .ok_or_else(|| inconsistent("path ends outside the destination candidates"))?
            .cost;

        let builder = ItineraryBuilder::new(
            self.network,
            self.schedule,
            self.costs.schedule(),
            &self.costs,
            self.access,
            self.config,
        );

        let direct_cost = self.access.direct_disutility(person, from, to);
        let path_cost = path.travel_cost + origin_cost + destination_cost;
        if direct_cost * self.config.direct_walk_factor < path_cost {
            log::debug!("{person}: direct trip ({direct_cost:.3}) beats transit ({path_cost:.3})");
            return Ok(Some(vec![builder.direct_leg(person, from, to, departure_time)]));
        }

        builder.build(departure_time, &path, from, to, person).map(Some)
    }
}
