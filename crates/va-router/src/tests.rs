//! Unit tests for va-router.
//!
//! Fixtures are small hand-built schedules; expected times follow from the
//! default beeline walk speed (3 km/h over a 1.3 beeline factor), so 100 m
//! of straight-line walking takes 156 s.

#[cfg(test)]
mod helpers {
    use va_core::time::hms;
    use va_core::{LinkId, Person, PersonId, Point, RouterConfig};
    use va_transit::{
        PreparedSchedule, TransitRouteStop, TransitRouterNetwork, TransitSchedule,
        TransitScheduleBuilder,
    };

    use crate::{DistanceBasedAccessModel, VariableAccessTransitRouter};

    pub const WALK_100M: f64 = 156.0;

    pub fn person() -> Person {
        Person::new(PersonId(7))
    }

    /// Everything a router borrows.
    pub struct World {
        pub schedule: TransitSchedule,
        pub network:  TransitRouterNetwork,
        pub prepared: PreparedSchedule,
        pub config:   RouterConfig,
        pub access:   DistanceBasedAccessModel,
    }

    impl World {
        pub fn new(schedule: TransitSchedule, config: RouterConfig) -> Self {
            let network =
                TransitRouterNetwork::from_schedule(&schedule, config.max_beeline_walk_connection_distance);
            let prepared = PreparedSchedule::new(&schedule);
            let access = DistanceBasedAccessModel::new(&config);
            Self { schedule, network, prepared, config, access }
        }

        pub fn with_access(mut self, access: DistanceBasedAccessModel) -> Self {
            self.access = access;
            self
        }

        pub fn router(&self, surcharge_on: bool) -> VariableAccessTransitRouter<'_, DistanceBasedAccessModel, PreparedSchedule> {
            VariableAccessTransitRouter::new(
                &self.network,
                &self.schedule,
                &self.prepared,
                &self.access,
                &self.config,
                surcharge_on,
            )
        }
    }

    /// One line from A0 (100,0) to A1 (5000,4900), 600 s ride, departing
    /// 08:05 and 08:35.
    pub fn single_line() -> TransitSchedule {
        let mut b = TransitScheduleBuilder::new();
        let a0 = b.add_stop(Point::new(100.0, 0.0), LinkId(1), "A0");
        let a1 = b.add_stop(Point::new(5_000.0, 4_900.0), LinkId(2), "A1");
        let l = b.add_line("L");
        b.add_route(
            l,
            "L-out",
            vec![TransitRouteStop::new(a0, None, Some(0.0)), TransitRouteStop::new(a1, Some(600.0), None)],
            vec![hms(8, 5, 0), hms(8, 35, 0)],
        )
        .unwrap();
        b.build()
    }

    /// Two lines meeting at a 50 m interchange.
    ///
    /// ```text
    ///   line A:  S0 (0,0) ── S1 (1000,0) ── S2 (2000,0)
    ///                                          ┆
    ///   line B:                              S3 (2050,0) ── S4 (2050,1000)
    /// ```
    ///
    /// A: S0 +0, S1 +120/+150, S2 +300; departs 08:00, 08:10.
    /// B: S3 +0, S4 +180; departs 08:00, 08:15, 08:30.
    /// Nodes: n0..n2 on A, n3..n4 on B.
    pub fn corridor() -> TransitSchedule {
        let mut b = TransitScheduleBuilder::new();
        let s0 = b.add_stop(Point::new(0.0, 0.0), LinkId(10), "S0");
        let s1 = b.add_stop(Point::new(1_000.0, 0.0), LinkId(11), "S1");
        let s2 = b.add_stop(Point::new(2_000.0, 0.0), LinkId(12), "S2");
        let s3 = b.add_stop(Point::new(2_050.0, 0.0), LinkId(13), "S3");
        let s4 = b.add_stop(Point::new(2_050.0, 1_000.0), LinkId(14), "S4");
        let a = b.add_line("A");
        b.add_route(
            a,
            "A-east",
            vec![
                TransitRouteStop::new(s0, None, Some(0.0)),
                TransitRouteStop::new(s1, Some(120.0), Some(150.0)),
                TransitRouteStop::new(s2, Some(300.0), None),
            ],
            vec![hms(8, 0, 0), hms(8, 10, 0)],
        )
        .unwrap();
        let l_b = b.add_line("B");
        b.add_route(
            l_b,
            "B-north",
            vec![TransitRouteStop::new(s3, None, Some(0.0)), TransitRouteStop::new(s4, Some(180.0), None)],
            vec![hms(8, 0, 0), hms(8, 15, 0), hms(8, 30, 0)],
        )
        .unwrap();
        b.build()
    }

    pub fn corridor_world() -> World {
        World::new(corridor(), RouterConfig::default())
    }

    pub fn assert_contiguous(legs: &[va_core::Leg]) {
        for pair in legs.windows(2) {
            assert!(
                (pair[0].arrival_time() - pair[1].departure_time).abs() < 1e-6,
                "gap between {:?} and {:?}",
                pair[0],
                pair[1]
            );
        }
    }
}

// ── StopLocator ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod locator {
    use va_core::{NodeId, Point, RouterConfig};
    use va_transit::{TransitRouterNetwork, TransitSchedule};

    use super::helpers::corridor_world;
    use crate::{RouterError, StopLocator};

    #[test]
    fn enough_hits_within_radius() {
        let world = corridor_world();
        let locator = StopLocator::new(&world.network, &world.config);
        // n1 and n2 both 500 m away (tie broken by id), n3 at 550 m.
        let nodes = locator.nearest_nodes(Point::new(1_500.0, 0.0)).unwrap();
        assert_eq!(nodes, vec![NodeId(1), NodeId(2), NodeId(3)]);
    }

    #[test]
    fn single_hit_is_extended() {
        let world = corridor_world();
        let cfg = RouterConfig { search_radius: 100.0, ..RouterConfig::default() };
        let locator = StopLocator::new(&world.network, &cfg);
        // Only n2 (90 m) inside 100 m; n3 (140 m) within 90 + 200.
        let nodes = locator.nearest_nodes(Point::new(1_910.0, 0.0)).unwrap();
        assert_eq!(nodes, vec![NodeId(2), NodeId(3)]);
    }

    #[test]
    fn nothing_in_radius_still_finds_nearest() {
        let world = corridor_world();
        let locator = StopLocator::new(&world.network, &world.config);
        let nodes = locator.nearest_nodes(Point::new(-5_000.0, 0.0)).unwrap();
        assert_eq!(nodes, vec![NodeId(0)]);
        assert_eq!(locator.nearest_node(Point::new(2_040.0, 990.0)).unwrap(), NodeId(4));
    }

    #[test]
    fn empty_graph_is_an_error() {
        let network = TransitRouterNetwork::from_schedule(&TransitSchedule::default(), 100.0);
        let cfg = RouterConfig::default();
        let locator = StopLocator::new(&network, &cfg);
        assert!(matches!(locator.nearest_nodes(Point::default()), Err(RouterError::EmptyGraph)));
        assert!(matches!(locator.nearest_node(Point::default()), Err(RouterError::EmptyGraph)));
    }
}

// ── Access models and pricing ─────────────────────────────────────────────────

#[cfg(test)]
mod access {
    use va_core::{Leg, Point, RouterConfig, TransportMode};

    use super::helpers::{person, WALK_100M};
    use crate::{AccessEgressModel, AccessEgressPricer, AccessModeSpec, DistanceBasedAccessModel, RouterError};

    fn walk_then_drt(cfg: &RouterConfig) -> DistanceBasedAccessModel {
        DistanceBasedAccessModel::new(cfg).with_modes(vec![
            AccessModeSpec::teleported(TransportMode::Drt, f64::INFINITY, 10.0),
            AccessModeSpec::walk(500.0),
        ])
    }

    #[test]
    fn mode_follows_distance() {
        let cfg = RouterConfig::default();
        let model = walk_then_drt(&cfg);
        assert_eq!(model.modes()[0].mode, TransportMode::Walk);

        let near = model.price_leg(&person(), Point::new(0.0, 0.0), Point::new(100.0, 0.0), 10.0, false);
        assert_eq!(near.mode, TransportMode::Walk);
        assert!((near.travel_time - WALK_100M).abs() < 1e-9);
        assert!((near.distance - 130.0).abs() < 1e-9);
        assert_eq!(near.departure_time, 10.0);

        let far = model.price_leg(&person(), Point::new(0.0, 0.0), Point::new(1_000.0, 0.0), 0.0, false);
        assert_eq!(far.mode, TransportMode::Drt);
        assert!((far.travel_time - 130.0).abs() < 1e-9); // 1300 m at 10 m/s
        assert!(model.is_teleported_mode(TransportMode::Drt));
        assert!(!model.is_teleported_mode(TransportMode::Walk));
    }

    #[test]
    fn surcharge_only_when_switched_on() {
        let cfg = RouterConfig::default();
        let stop = Point::new(100.0, 0.0);
        let model = DistanceBasedAccessModel::new(&cfg).discourage_stop(stop, 600.0);
        let off = model.price_leg(&person(), Point::default(), stop, 0.0, false);
        let on = model.price_leg(&person(), Point::default(), stop, 0.0, true);
        assert!((on.travel_time - off.travel_time - 600.0).abs() < 1e-9);
        // Other stops are unaffected.
        let other = model.price_leg(&person(), Point::default(), Point::new(0.0, 100.0), 0.0, true);
        assert!((other.travel_time - off.travel_time).abs() < 1e-9);
    }

    #[test]
    fn direct_disutility_is_walk_cost() {
        let cfg = RouterConfig::default();
        let model = DistanceBasedAccessModel::new(&cfg);
        let d = model.direct_disutility(&person(), Point::default(), Point::new(100.0, 0.0));
        assert!((d - WALK_100M * 18.0 / 3_600.0).abs() < 1e-9);
    }

    #[test]
    fn walk_family_cost() {
        let cfg = RouterConfig { marginal_utility_of_travel_distance_pt_utl_m: -0.001, ..RouterConfig::default() };
        let model = DistanceBasedAccessModel::new(&cfg);
        let pricer = AccessEgressPricer::new(&model, &cfg);
        for mode in [TransportMode::Walk, TransportMode::TransitWalk, TransportMode::AccessWalk, TransportMode::EgressWalk] {
            let leg = Leg::generic(mode, Point::default(), Point::default(), 0.0, 360.0, 100.0);
            let cost = pricer.leg_cost(&leg).unwrap();
            assert!((cost - (360.0 * 18.0 / 3_600.0 + 0.1)).abs() < 1e-9);
        }
    }

    #[test]
    fn drt_cost_uses_configured_constants() {
        let cfg = RouterConfig::default();
        let model = DistanceBasedAccessModel::new(&cfg);
        let pricer = AccessEgressPricer::new(&model, &cfg);
        let leg = Leg::generic(TransportMode::Drt, Point::default(), Point::default(), 0.0, 360.0, 5_000.0);
        let cost = pricer.leg_cost(&leg).unwrap();
        assert!((cost - 360.0 * (4.0 / 3_600.0 + 6.0 / 3_600.0)).abs() < 1e-12);
    }

    #[test]
    fn unpriced_mode_is_rejected() {
        let cfg = RouterConfig::default();
        let model = DistanceBasedAccessModel::new(&cfg)
            .with_modes(vec![AccessModeSpec::teleported(TransportMode::Taxi, f64::INFINITY, 12.0)]);
        let pricer = AccessEgressPricer::new(&model, &cfg);
        let err = pricer.price(&person(), Point::default(), Point::new(10.0, 0.0), 0.0, false).unwrap_err();
        assert!(matches!(err, RouterError::UnsupportedMode(TransportMode::Taxi)));
    }
}

// ── Candidate sets ────────────────────────────────────────────────────────────

#[cfg(test)]
mod candidates {
    use va_core::time::hms;
    use va_core::{NodeId, Point};

    use super::helpers::{corridor_world, person, WALK_100M};
    use crate::{build_candidates, AccessEgressPricer, DistanceBasedAccessModel, StopLocator};

    #[test]
    fn times_and_costs_per_node() {
        let world = corridor_world();
        let locator = StopLocator::new(&world.network, &world.config);
        let pricer = AccessEgressPricer::new(&world.access, &world.config);
        let dep = hms(8, 0, 0);
        let set = build_candidates(&world.network, &locator, &pricer, &person(), Point::new(1_900.0, 0.0), dep, false)
            .unwrap();
        // n2 (100 m), n3 (150 m), n1 (900 m) in locator order.
        let nodes: Vec<_> = set.iter().map(|n| n.node).collect();
        assert_eq!(nodes, vec![NodeId(2), NodeId(3), NodeId(1)]);
        let n2 = set.get(NodeId(2)).unwrap();
        assert!((n2.time - (dep + WALK_100M)).abs() < 1e-9);
        assert!((n2.cost - WALK_100M * 18.0 / 3_600.0).abs() < 1e-9);
        assert!(set.get(NodeId(3)).unwrap().cost > n2.cost);
    }

    #[test]
    fn surcharge_raises_discouraged_candidates() {
        let world = corridor_world();
        let access = DistanceBasedAccessModel::new(&world.config).discourage_stop(Point::new(0.0, 0.0), 600.0);
        let locator = StopLocator::new(&world.network, &world.config);
        let pricer = AccessEgressPricer::new(&access, &world.config);
        let origin = Point::new(-100.0, 0.0);

        let off = build_candidates(&world.network, &locator, &pricer, &person(), origin, 0.0, false).unwrap();
        let on = build_candidates(&world.network, &locator, &pricer, &person(), origin, 0.0, true).unwrap();
        let (off, on) = (off.get(NodeId(0)).unwrap(), on.get(NodeId(0)).unwrap());
        assert!((on.time - off.time - 600.0).abs() < 1e-9);
        assert!((on.cost - off.cost - 600.0 * 18.0 / 3_600.0).abs() < 1e-9);
    }
}

// ── Itinerary reconstruction ──────────────────────────────────────────────────

#[cfg(test)]
mod itinerary {
    use va_core::time::hms;
    use va_core::{EdgeId, LegRoute, LinkId, NodeId, Point, StopId, TransportMode};
    use va_transit::{EdgeKind, Path, TransitTravelDisutility};

    use super::helpers::{assert_contiguous, corridor_world, person, WALK_100M};
    use crate::{ItineraryBuilder, RouterError};

    fn edge(world: &super::helpers::World, from: u32, to: u32) -> EdgeId {
        (0..world.network.edge_count())
            .map(EdgeId::from_index)
            .find(|e| world.network.edge_from[e.index()].0 == from && world.network.edge_to[e.index()].0 == to)
            .unwrap()
    }

    #[test]
    fn all_transfer_path_becomes_direct_leg() {
        let world = corridor_world();
        let costs = TransitTravelDisutility::new(&world.prepared, &world.config);
        let builder = ItineraryBuilder::new(
            &world.network, &world.schedule, &world.prepared, &costs, &world.access, &world.config,
        );
        let transfer = edge(&world, 2, 3);
        assert_eq!(world.network.kind(transfer), EdgeKind::Transfer);
        let path = Path {
            nodes:       vec![NodeId(2), NodeId(3)],
            edges:       vec![transfer],
            travel_cost: 1.4,
            travel_time: 78.0,
        };
        let (from, to) = (Point::new(2_000.0, -10.0), Point::new(2_050.0, 10.0));
        let legs = builder.build(hms(9, 0, 0), &path, from, to, &person()).unwrap();
        assert_eq!(legs.len(), 1);
        assert_eq!(legs[0].mode, TransportMode::Walk);
        assert_eq!(legs[0].departure_time, hms(9, 0, 0));
        assert_eq!(legs[0].start_point(), Some(from));
        assert_eq!(legs[0].end_point(), Some(to));
    }

    #[test]
    fn empty_path_becomes_direct_leg() {
        let world = corridor_world();
        let costs = TransitTravelDisutility::new(&world.prepared, &world.config);
        let builder = ItineraryBuilder::new(
            &world.network, &world.schedule, &world.prepared, &costs, &world.access, &world.config,
        );
        let path = Path { nodes: vec![NodeId(1)], edges: vec![], travel_cost: 0.0, travel_time: 0.0 };
        let legs = builder
            .build(hms(9, 0, 0), &path, Point::new(900.0, 0.0), Point::new(1_100.0, 0.0), &person())
            .unwrap();
        assert_eq!(legs.len(), 1);
        assert!(!legs[0].is_pt());
    }

    #[test]
    fn route_change_without_transfer_closes_the_ride() {
        let world = corridor_world();
        let costs = TransitTravelDisutility::new(&world.prepared, &world.config);
        let builder = ItineraryBuilder::new(
            &world.network, &world.schedule, &world.prepared, &costs, &world.access, &world.config,
        );
        // A from S0 to S1, then straight onto B at S3.
        let path = Path {
            nodes:       vec![NodeId(0), NodeId(1), NodeId(3), NodeId(4)],
            edges:       vec![edge(&world, 0, 1), edge(&world, 3, 4)],
            travel_cost: 0.0,
            travel_time: 0.0,
        };
        let legs = builder
            .build(hms(7, 50, 0), &path, Point::new(-100.0, 0.0), Point::new(2_050.0, 1_100.0), &person())
            .unwrap();

        use TransportMode::{Pt, TransitWalk, Walk};
        let modes: Vec<_> = legs.iter().map(|l| l.mode).collect();
        assert_eq!(modes, vec![Walk, TransitWalk, Pt, TransitWalk, Pt, TransitWalk, Walk]);
        assert_contiguous(&legs);

        // A: 08:00 from S0, alights at S1 (arrival offset 120).
        let a = &legs[2];
        assert!(matches!(a.route, LegRoute::Transit { access_stop: StopId(0), egress_stop: StopId(1), .. }));
        assert!((a.arrival_time() - hms(8, 2, 0)).abs() < 1e-6);
        assert!((a.distance - 1_300.0).abs() < 1e-9);

        // 1050 m from S1 to S3, then B's 08:30.
        let walk = &legs[3];
        assert!((walk.travel_time - 10.5 * WALK_100M).abs() < 1e-6);
        assert_eq!(walk.start_link(), Some(LinkId(11)));
        assert_eq!(walk.end_link(), Some(LinkId(13)));
        let b = &legs[4];
        assert!(matches!(b.route, LegRoute::Transit { access_stop: StopId(3), egress_stop: StopId(4), .. }));
        assert!((b.arrival_time() - hms(8, 33, 0)).abs() < 1e-6);
    }

    #[test]
    fn ride_closed_on_another_route_is_inconsistent() {
        let world = corridor_world();
        let costs = TransitTravelDisutility::new(&world.prepared, &world.config);
        let builder = ItineraryBuilder::new(
            &world.network, &world.schedule, &world.prepared, &costs, &world.access, &world.config,
        );
        // Riding B, then a transfer edge leaving a node of A.
        let path = Path {
            nodes:       vec![NodeId(3), NodeId(4), NodeId(3)],
            edges:       vec![edge(&world, 3, 4), edge(&world, 2, 3)],
            travel_cost: 0.0,
            travel_time: 0.0,
        };
        let err = builder
            .build(hms(8, 0, 0), &path, Point::new(2_050.0, -100.0), Point::new(2_050.0, 100.0), &person())
            .unwrap_err();
        match err {
            RouterError::InternalInconsistency { person: p, time, .. } => {
                assert_eq!(p, person().id);
                assert_eq!(time, hms(8, 0, 0));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}

// ── End-to-end routing ────────────────────────────────────────────────────────

#[cfg(test)]
mod router {
    use va_core::time::hms;
    use va_core::{LegRoute, LinkId, Point, RouterConfig, SimRng, StopId, TransportMode};
    use va_transit::TransitSchedule;

    use super::helpers::{assert_contiguous, corridor, corridor_world, person, single_line, World, WALK_100M};
    use crate::{
        route_batch, AccessEgressModel, AccessModeSpec, DistanceBasedAccessModel, RouteRequest,
        RouterError, VariableAccessTransitRouter,
    };

    fn modes(legs: &[va_core::Leg]) -> Vec<TransportMode> {
        legs.iter().map(|l| l.mode).collect()
    }

    #[test]
    fn walk_ride_walk() {
        let world = World::new(single_line(), RouterConfig::default());
        let mut router = world.router(false);
        let dep = hms(8, 0, 0);
        let legs = router
            .calc_route(&Point::new(0.0, 0.0), &Point::new(5_000.0, 5_000.0), dep, &person())
            .unwrap()
            .unwrap();

        use TransportMode::{Pt, TransitWalk, Walk};
        assert_eq!(modes(&legs), vec![Walk, TransitWalk, Pt, TransitWalk, Walk]);
        assert_contiguous(&legs);
        assert_eq!(legs[0].departure_time, dep);
        assert!((legs[0].travel_time - WALK_100M).abs() < 1e-9);
        // Connectors at the stops have zero length.
        assert_eq!(legs[1].distance, 0.0);
        assert_eq!(legs[1].travel_time, 0.0);

        let pt = &legs[2];
        let boarded = pt.departure_time;
        assert!((pt.travel_time - ((hms(8, 5, 0) - boarded) + 600.0)).abs() < 1e-9);
        assert!((pt.arrival_time() - hms(8, 15, 0)).abs() < 1e-9);
        assert_eq!(
            pt.route,
            LegRoute::Transit {
                access_stop: StopId(0),
                line:        va_core::LineId(0),
                route:       va_core::RouteId(0),
                egress_stop: StopId(1),
            }
        );
        let beeline = Point::new(100.0, 0.0).distance(Point::new(5_000.0, 4_900.0)) * 1.3;
        assert!((pt.distance - beeline).abs() < 1e-9);
        assert_eq!(legs[4].end_point(), Some(Point::new(5_000.0, 5_000.0)));
    }

    #[test]
    fn short_trip_without_transit_is_direct() {
        let world = World::new(single_line(), RouterConfig::default());
        let mut router = world.router(false);
        let (from, to) = (Point::new(20_000.0, 20_000.0), Point::new(20_200.0, 20_000.0));
        let legs = router.calc_route(&from, &to, hms(12, 0, 0), &person()).unwrap().unwrap();
        assert_eq!(legs.len(), 1);
        assert_eq!(legs[0].mode, TransportMode::Walk);
        assert!(legs[0].travel_time > 0.0);
        assert_eq!(legs[0].departure_time, hms(12, 0, 0));
    }

    #[test]
    fn low_direct_walk_factor_favours_direct() {
        let cfg = RouterConfig { direct_walk_factor: 0.001, ..RouterConfig::default() };
        let world = World::new(single_line(), cfg);
        let mut router = world.router(false);
        let legs = router
            .calc_route(&Point::new(0.0, 0.0), &Point::new(5_000.0, 5_000.0), hms(8, 0, 0), &person())
            .unwrap()
            .unwrap();
        assert_eq!(legs.len(), 1);
        assert!(!legs[0].is_pt());
        let (from, to) = (Point::new(0.0, 0.0), Point::new(5_000.0, 5_000.0));
        assert_eq!(legs[0], world.access.price_leg(&person(), from, to, hms(8, 0, 0), false));
    }

    #[test]
    fn transfer_between_lines() {
        let world = corridor_world();
        let mut router = world.router(false);
        let legs = router
            .calc_route(&Point::new(-100.0, 0.0), &Point::new(2_050.0, 1_100.0), hms(8, 0, 0), &person())
            .unwrap()
            .unwrap();

        use TransportMode::{Pt, TransitWalk, Walk};
        assert_eq!(modes(&legs), vec![Walk, TransitWalk, Pt, TransitWalk, Pt, TransitWalk, Walk]);
        assert_contiguous(&legs);

        // Line A: missed 08:00, rides the 08:10 to S2.
        let a = &legs[2];
        assert!(matches!(a.route, LegRoute::Transit { access_stop: StopId(0), egress_stop: StopId(2), .. }));
        assert!((a.arrival_time() - hms(8, 15, 0)).abs() < 1e-6);
        assert_eq!(a.distance, 50.0); // closing transfer edge

        let walk = &legs[3];
        assert!((walk.distance - 65.0).abs() < 1e-9);
        assert_eq!(walk.start_link(), Some(LinkId(12)));
        assert_eq!(walk.end_link(), Some(LinkId(13)));

        // Line B: 08:15 already gone, takes the 08:30.
        let b = &legs[4];
        assert!(matches!(b.route, LegRoute::Transit { access_stop: StopId(3), egress_stop: StopId(4), .. }));
        assert!((b.arrival_time() - hms(8, 33, 0)).abs() < 1e-6);
        assert!((b.distance - 1_300.0).abs() < 1e-9);
    }

    #[test]
    fn teleported_access_has_no_connector() {
        let world = corridor_world();
        let access = DistanceBasedAccessModel::new(&world.config).with_modes(vec![
            AccessModeSpec::walk(500.0),
            AccessModeSpec::teleported(TransportMode::Drt, f64::INFINITY, 8.0),
        ]);
        let world = world.with_access(access);
        let mut router = world.router(false);
        let legs = router
            .calc_route(&Point::new(-800.0, 0.0), &Point::new(2_050.0, 1_100.0), hms(8, 0, 0), &person())
            .unwrap()
            .unwrap();

        use TransportMode::{Drt, Pt, TransitWalk, Walk};
        assert_eq!(modes(&legs), vec![Drt, Pt, TransitWalk, Pt, TransitWalk, Walk]);
        assert_eq!(legs[0].end_link(), Some(LinkId(10)));
        assert!((legs[0].travel_time - 130.0).abs() < 1e-9); // 1040 m at 8 m/s
        assert_contiguous(&legs);
    }

    #[test]
    fn teleported_egress_starts_at_stop_link() {
        let world = corridor_world();
        let access = DistanceBasedAccessModel::new(&world.config).with_modes(vec![
            AccessModeSpec::walk(500.0),
            AccessModeSpec::teleported(TransportMode::Drt, f64::INFINITY, 8.0),
        ]);
        let world = world.with_access(access);
        let mut router = world.router(false);
        let legs = router
            .calc_route(&Point::new(-100.0, 0.0), &Point::new(2_050.0, 1_800.0), hms(8, 0, 0), &person())
            .unwrap()
            .unwrap();
        let last = legs.last().unwrap();
        assert_eq!(last.mode, TransportMode::Drt);
        assert_eq!(last.start_link(), Some(LinkId(14)));
        assert!(legs[legs.len() - 2].is_pt());
    }

    #[test]
    fn unreachable_destination_is_none() {
        let world = corridor_world();
        let mut router = world.router(false);
        // Nothing departs from S4 and nothing arrives at S0.
        let res = router
            .calc_route(&Point::new(2_050.0, 1_100.0), &Point::new(-100.0, 0.0), hms(8, 0, 0), &person())
            .unwrap();
        assert!(res.is_none());
    }

    #[test]
    fn unsupported_access_mode_surfaces() {
        let world = corridor_world();
        let access = DistanceBasedAccessModel::new(&world.config)
            .with_modes(vec![AccessModeSpec::teleported(TransportMode::Taxi, f64::INFINITY, 12.0)]);
        let world = world.with_access(access);
        let mut router = world.router(false);
        let err = router
            .calc_route(&Point::new(-100.0, 0.0), &Point::new(2_050.0, 1_100.0), hms(8, 0, 0), &person())
            .unwrap_err();
        assert!(matches!(err, RouterError::UnsupportedMode(TransportMode::Taxi)));
    }

    #[test]
    fn empty_graph_is_fatal() {
        let world = World::new(TransitSchedule::default(), RouterConfig::default());
        let mut router = world.router(false);
        let err = router
            .calc_route(&Point::default(), &Point::new(10.0, 0.0), 0.0, &person())
            .unwrap_err();
        assert!(matches!(err, RouterError::EmptyGraph));
    }

    #[test]
    fn repeated_requests_are_identical() {
        let world = corridor_world();
        let mut router = world.router(true);
        let (from, to) = (Point::new(-100.0, 0.0), Point::new(2_050.0, 1_100.0));
        let first = router.calc_route(&from, &to, hms(8, 0, 0), &person()).unwrap();
        let second = router.calc_route(&from, &to, hms(8, 0, 0), &person()).unwrap();
        assert_eq!(first, second);
        assert!(router.surcharge_on());
    }

    #[test]
    fn stop_facilities_are_facilities() {
        let schedule = corridor();
        let world = World::new(schedule.clone(), RouterConfig::default());
        let mut router = world.router(false);
        let from = schedule.stop_by_name("S0").unwrap();
        let to = schedule.stop_by_name("S4").unwrap();
        let legs = router.calc_route(from, to, hms(8, 0, 0), &person()).unwrap().unwrap();
        assert!(legs.iter().any(|l| l.is_pt()));
        assert_contiguous(&legs);
    }

    #[test]
    fn random_surcharge_is_seeded() {
        let world = corridor_world();
        let flag = |seed: u64| {
            VariableAccessTransitRouter::with_random_surcharge(
                &world.network,
                &world.schedule,
                &world.prepared,
                &world.access,
                &world.config,
                &mut SimRng::new(seed),
            )
            .surcharge_on()
        };
        assert_eq!(flag(3), flag(3));
        let flags: Vec<bool> = (0..64).map(flag).collect();
        assert!(flags.contains(&true));
        assert!(flags.contains(&false));
    }

    #[test]
    fn batch_matches_single_requests() {
        let world = corridor_world();
        let requests = vec![
            RouteRequest {
                person:         person(),
                from:           Point::new(-100.0, 0.0),
                to:             Point::new(2_050.0, 1_100.0),
                departure_time: hms(8, 0, 0),
            },
            RouteRequest {
                person:         person(),
                from:           Point::new(2_050.0, 1_100.0),
                to:             Point::new(-100.0, 0.0),
                departure_time: hms(8, 0, 0),
            },
        ];
        let mut router = world.router(false);
        let results = route_batch(&mut router, &requests);
        assert_eq!(results.len(), 2);
        let single = router
            .calc_route(&requests[0].from, &requests[0].to, requests[0].departure_time, &requests[0].person)
            .unwrap();
        assert_eq!(results[0].as_ref().unwrap(), &single);
        assert!(results[1].as_ref().unwrap().is_none());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_batch_preserves_order() {
        let world = corridor_world();
        let requests: Vec<RouteRequest> = (0..32)
            .map(|i| RouteRequest {
                person:         person(),
                from:           Point::new(-100.0 + i as f64, 0.0),
                to:             Point::new(2_050.0, 1_100.0),
                departure_time: hms(7, 30, 0) + 60.0 * i as f64,
            })
            .collect();
        let parallel = crate::route_batch_parallel(&requests, || world.router(false));
        let mut router = world.router(false);
        let sequential = route_batch(&mut router, &requests);
        for (p, s) in parallel.iter().zip(&sequential) {
            assert_eq!(p.as_ref().unwrap(), s.as_ref().unwrap());
        }
    }
}

// ── TOML settings ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use va_core::{Point, RouterConfig, TransportMode};

    use crate::{load_settings, settings_from_toml_str, RouterError};

    #[test]
    fn empty_text_gives_defaults() {
        let settings = settings_from_toml_str("").unwrap();
        assert_eq!(settings.router, RouterConfig::default());
        assert!(settings.access_modes.is_empty());
        assert_eq!(settings.access_model().modes().len(), 1);
    }

    #[test]
    fn overrides_are_applied() {
        let text = r#"
            [router]
            search_radius = 800.0
            direct_walk_factor = 1.5

            [[access_modes]]
            mode = "walk"
            max_distance = 1000.0

            [[access_modes]]
            mode = "drt"
            max_distance = 1.0e9
            speed = 8.0
            teleported = true

            [[discouraged_stops]]
            coord = { x = 1200.0, y = 0.0 }
            surcharge_s = 600.0
        "#;
        let settings = settings_from_toml_str(text).unwrap();
        assert_eq!(settings.router.search_radius, 800.0);
        assert_eq!(settings.router.direct_walk_factor, 1.5);
        assert_eq!(settings.router.extension_radius, RouterConfig::default().extension_radius);
        assert_eq!(settings.access_modes.len(), 2);
        assert_eq!(settings.access_modes[1].mode, TransportMode::Drt);
        assert_eq!(settings.discouraged_stops[0].coord, Point::new(1_200.0, 0.0));
        assert!(settings.access_model().modes()[1].teleported);
    }

    #[test]
    fn custom_teleported_mode() {
        let text = r#"
            [[router.teleported_modes]]
            mode = "taxi"
            marginal_utility_of_travel_time_utl_s = -0.005
            marginal_utility_of_travel_distance_utl_m = -0.0002

            [[access_modes]]
            mode = "taxi"
            max_distance = 1.0e9
            speed = 10.0
            teleported = true
        "#;
        let settings = settings_from_toml_str(text).unwrap();
        assert!(settings.router.teleported_mode(TransportMode::Taxi).is_some());
        assert!(settings.router.teleported_mode(TransportMode::Drt).is_none());
    }

    #[test]
    fn unpriced_access_mode_is_rejected() {
        let text = "[[access_modes]]\nmode = \"car\"\nmax_distance = 1.0\n";
        assert!(matches!(settings_from_toml_str(text), Err(RouterError::UnsupportedMode(TransportMode::Car))));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            settings_from_toml_str("[router]\nsearch_radius = -1.0\n"),
            Err(RouterError::Config(_))
        ));
        assert!(matches!(
            settings_from_toml_str("[router]\nsearch_radius = \"far\"\n"),
            Err(RouterError::Config(_))
        ));
        let teleported_without_speed = "[[access_modes]]\nmode = \"drt\"\nmax_distance = 1.0\nteleported = true\n";
        assert!(matches!(settings_from_toml_str(teleported_without_speed), Err(RouterError::Config(_))));
    }

    #[test]
    fn positive_utilities_are_rejected() {
        for text in [
            "[router]\nmarginal_utility_of_travel_time_walk_utl_s = 0.01\n",
            "[router]\nmarginal_utility_of_waiting_pt_utl_s = 0.002\n",
            "[router]\nutility_of_line_switch_utl = 5.0\n",
            "[[router.teleported_modes]]\nmode = \"drt\"\n\
             marginal_utility_of_travel_time_utl_s = 0.003\n\
             marginal_utility_of_travel_distance_utl_m = 0.0\n",
            "[[router.teleported_modes]]\nmode = \"taxi\"\n\
             marginal_utility_of_travel_time_utl_s = -0.003\n\
             marginal_utility_of_travel_distance_utl_m = 0.001\n",
        ] {
            assert!(matches!(settings_from_toml_str(text), Err(RouterError::Config(_))), "{text}");
        }
        // Zero means "ignore this term" and is accepted.
        let zero = "[router]\nutility_of_line_switch_utl = 0.0\n";
        assert_eq!(settings_from_toml_str(zero).unwrap().router.utility_of_line_switch_utl, 0.0);
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("router.toml");
        std::fs::write(&path, "[router]\nextension_radius = 350.0\n").unwrap();
        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.router.extension_radius, 350.0);
        assert!(matches!(load_settings(&dir.path().join("missing.toml")), Err(RouterError::Config(_))));
    }
}

// ── Property tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use va_core::Point;
    use va_transit::{LeastCostPathTree, PathSearch, TransitTravelDisutility};

    use super::helpers::{corridor_world, person, World};
    use crate::{build_candidates, AccessEgressModel, AccessEgressPricer, ItineraryBuilder, StopLocator};

    /// Origin cost + path cost + destination cost of the least-cost path, as
    /// the router sees it.
    fn transit_cost(world: &World, from: Point, to: Point, dep: f64) -> Option<f64> {
        let locator = StopLocator::new(&world.network, &world.config);
        let pricer = AccessEgressPricer::new(&world.access, &world.config);
        let origins =
            build_candidates(&world.network, &locator, &pricer, &person(), from, dep, false).unwrap();
        let destinations =
            build_candidates(&world.network, &locator, &pricer, &person(), to, dep, false).unwrap();
        let costs = TransitTravelDisutility::new(&world.prepared, &world.config);
        let path = LeastCostPathTree::new().search(&world.network, &costs, &origins, &destinations, &person())?;
        Some(path.travel_cost + origins.get(path.first_node())?.cost + destinations.get(path.last_node())?.cost)
    }

    proptest! {
        #[test]
        fn itineraries_are_time_contiguous(
            ox in -500.0f64..2_600.0,
            oy in -500.0f64..1_600.0,
            dx in -500.0f64..2_600.0,
            dy in -500.0f64..1_600.0,
            dep in 21_600.0f64..36_000.0,
        ) {
            let world = corridor_world();
            let mut router = world.router(false);
            let result = router
                .calc_route(&Point::new(ox, oy), &Point::new(dx, dy), dep, &person())
                .unwrap();
            if let Some(legs) = result {
                prop_assert!(!legs.is_empty());
                prop_assert!((legs[0].departure_time - dep).abs() < 1e-9);
                for pair in legs.windows(2) {
                    prop_assert!((pair[0].arrival_time() - pair[1].departure_time).abs() < 1e-6);
                }
                for leg in &legs {
                    prop_assert!(leg.travel_time >= 0.0);
                }
                if !legs.iter().any(|l| l.is_pt()) {
                    prop_assert_eq!(legs.len(), 1);
                }
            }
        }

        #[test]
        fn transit_only_when_not_dearer_than_direct(
            ox in -500.0f64..2_600.0,
            oy in -500.0f64..1_600.0,
            dx in -500.0f64..2_600.0,
            dy in -500.0f64..1_600.0,
            dep in 21_600.0f64..36_000.0,
            factor in 0.5f64..3.0,
        ) {
            let mut world = corridor_world();
            world.config.direct_walk_factor = factor;
            let (from, to) = (Point::new(ox, oy), Point::new(dx, dy));
            let result = world.router(false).calc_route(&from, &to, dep, &person()).unwrap();
            let Some(legs) = result else {
                prop_assert!(transit_cost(&world, from, to, dep).is_none());
                return Ok(());
            };

            if legs.iter().any(|l| l.is_pt()) {
                let path_cost = transit_cost(&world, from, to, dep);
                prop_assert!(path_cost.is_some());
                let direct = world.access.direct_disutility(&person(), from, to);
                prop_assert!(path_cost.unwrap_or(f64::INFINITY) <= direct * factor + 1e-9);
            } else {
                let costs = TransitTravelDisutility::new(&world.prepared, &world.config);
                let builder = ItineraryBuilder::new(
                    &world.network, &world.schedule, &world.prepared, &costs, &world.access, &world.config,
                );
                prop_assert_eq!(legs, vec![builder.direct_leg(&person(), from, to, dep)]);
            }
        }
    }
}
