//! Unit tests for va-core primitives.

#[cfg(test)]
mod ids {
    use crate::{NodeId, StopId};

    #[test]
    fn index_roundtrip() {
        let id = StopId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(StopId::from_index(42), id);
    }

    #[test]
    fn invalid_sentinel() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(NodeId::default(), NodeId::INVALID);
        assert!(!NodeId::INVALID.is_valid());
        assert!(NodeId(0).is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(StopId(7).to_string(), "stop 7");
        assert_eq!(NodeId::INVALID.to_string(), "node <invalid>");
    }
}

#[cfg(test)]
mod geo {
    use crate::Point;

    #[test]
    fn pythagoras() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3_000.0, 4_000.0);
        assert_eq!(a.distance(b), 5_000.0);
        assert_eq!(a.distance_2(b), 25_000_000.0);
    }

    #[test]
    fn zero_distance() {
        let p = Point::new(681_000.5, 4_620_100.25);
        assert_eq!(p.distance(p), 0.0);
    }

    #[test]
    fn array_form() {
        assert_eq!(Point::new(1.0, 2.0).to_array(), [1.0, 2.0]);
    }
}

#[cfg(test)]
mod time {
    use crate::time::{format_hms, hms, parse_hms, MIDNIGHT};

    #[test]
    fn hms_components() {
        assert_eq!(hms(8, 0, 0), 28_800.0);
        assert_eq!(hms(24, 0, 0), MIDNIGHT);
    }

    #[test]
    fn format_past_midnight() {
        assert_eq!(format_hms(hms(8, 5, 9)), "08:05:09");
        assert_eq!(format_hms(hms(25, 10, 0)), "25:10:00");
        assert_eq!(format_hms(-5.0), "00:00:00");
    }

    #[test]
    fn parse_variants() {
        assert_eq!(parse_hms("08:00:00").unwrap(), 28_800.0);
        assert_eq!(parse_hms(" 07:30 ").unwrap(), 27_000.0);
        assert_eq!(parse_hms("26:00:00").unwrap(), 93_600.0);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_hms("8h").is_err());
        assert!(parse_hms("08:75:00").is_err());
        assert!(parse_hms("").is_err());
    }

    #[test]
    fn huge_hours_do_not_overflow() {
        assert_eq!(parse_hms("2000000:00:00").unwrap(), 7_200_000_000.0);
        assert_eq!(hms(u32::MAX, 59, 59), u32::MAX as f64 * 3_600.0 + 3_599.0);
        // Beyond u32 the hour field is a parse error, not a panic.
        assert!(parse_hms("99999999999:00:00").is_err());
    }
}

#[cfg(test)]
mod transport {
    use crate::TransportMode;

    #[test]
    fn walk_family() {
        assert!(TransportMode::Walk.is_walk_family());
        assert!(TransportMode::TransitWalk.is_walk_family());
        assert!(TransportMode::AccessWalk.is_walk_family());
        assert!(TransportMode::EgressWalk.is_walk_family());
        assert!(!TransportMode::Drt.is_walk_family());
        assert!(!TransportMode::Pt.is_walk_family());
    }

    #[test]
    fn string_roundtrip() {
        for mode in [
            TransportMode::Walk,
            TransportMode::TransitWalk,
            TransportMode::Drt,
            TransportMode::Taxi,
            TransportMode::Pt,
        ] {
            assert_eq!(mode.as_str().parse::<TransportMode>().unwrap(), mode);
        }
        assert!("hovercraft".parse::<TransportMode>().is_err());
    }
}

#[cfg(test)]
mod leg {
    use crate::{Leg, LinkId, LineId, Point, RouteId, StopId, TransportMode};

    #[test]
    fn arrival_is_departure_plus_travel() {
        let leg = Leg::generic(
            TransportMode::Walk,
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            100.0,
            60.0,
            130.0,
        );
        assert_eq!(leg.arrival_time(), 160.0);
        assert!(!leg.is_pt());
        assert_eq!(leg.end_point(), Some(Point::new(100.0, 0.0)));
    }

    #[test]
    fn links_only_touch_generic_routes() {
        let mut walk = Leg::generic(TransportMode::Walk, Point::default(), Point::default(), 0.0, 0.0, 0.0);
        walk.set_end_link(LinkId(3));
        walk.set_start_link(LinkId(1));
        assert_eq!(
            walk.route,
            crate::LegRoute::Generic {
                start:      Point::default(),
                end:        Point::default(),
                start_link: Some(LinkId(1)),
                end_link:   Some(LinkId(3)),
            }
        );

        let mut pt = Leg::transit(StopId(0), LineId(0), RouteId(0), StopId(1), 0.0, 10.0, 10.0);
        let before = pt.clone();
        pt.set_end_link(LinkId(9));
        assert_eq!(pt, before);
        assert_eq!(pt.end_link(), None);
        assert_eq!(walk.start_link(), Some(LinkId(1)));
        assert!(pt.is_pt());
        assert_eq!(pt.start_point(), None);
    }

    #[test]
    fn departing_at_keeps_travel_time() {
        let leg = Leg::generic(TransportMode::Drt, Point::default(), Point::default(), 0.0, 300.0, 1.0)
            .departing_at(50.0);
        assert_eq!(leg.departure_time, 50.0);
        assert_eq!(leg.arrival_time(), 350.0);
    }
}

#[cfg(test)]
mod config {
    use crate::{RouterConfig, TransportMode};

    #[test]
    fn defaults_price_drt() {
        let cfg = RouterConfig::default();
        let drt = cfg.teleported_mode(TransportMode::Drt).unwrap();
        assert!((drt.marginal_utility_of_travel_time_utl_s - (-10.0 / 3_600.0)).abs() < 1e-12);
        assert_eq!(drt.marginal_utility_of_travel_distance_utl_m, 0.0);
        assert!(cfg.teleported_mode(TransportMode::Taxi).is_none());
    }

    #[test]
    fn walk_utilities_are_negative() {
        let cfg = RouterConfig::default();
        assert!(cfg.marginal_utility_of_travel_time_walk_utl_s < 0.0);
        assert!(cfg.marginal_utility_of_travel_time_pt_utl_s < 0.0);
        assert_eq!(cfg.beeline_distance(100.0), 130.0);
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SimRng::new(42);
        let mut b = SimRng::new(42);
        let xs: Vec<bool> = (0..32).map(|_| a.coin_flip()).collect();
        let ys: Vec<bool> = (0..32).map(|_| b.coin_flip()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn coin_flips_are_mixed() {
        let mut r = SimRng::new(7);
        let flips: Vec<bool> = (0..64).map(|_| r.coin_flip()).collect();
        assert!(flips.contains(&true));
        assert!(flips.contains(&false));
    }
}
