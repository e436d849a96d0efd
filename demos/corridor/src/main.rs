//! corridor — smallest end-to-end run of the variable-access transit router.
//!
//! A synthetic east–west rail line and a north–south feeder bus meet at a
//! short interchange walk.  A handful of travellers are routed at morning
//! departure times and their itineraries printed.
//!
//! Usage: `corridor [settings.toml]`.  Without an argument the embedded
//! settings below are used.  Set `RUST_LOG=debug` to see routing decisions.

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use va_core::time::{format_hms, hms};
use va_core::{Leg, LegRoute, Person, PersonId, Point, SimRng};
use va_router::{
    load_settings, route_batch, settings_from_toml_str, RouteRequest, RouterSettings,
    VariableAccessTransitRouter,
};
use va_transit::{load_schedule_readers, PreparedSchedule, TransitRouterNetwork, TransitSchedule};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:            u64 = 42;
const TRAVELLER_COUNT: u32 = 6;

// ── Embedded inputs ───────────────────────────────────────────────────────────

const STOPS_CSV: &str = "\
stop_id,x,y,link_id,name\n\
w,0.0,0.0,100,West Terminal\n\
c,2500.0,0.0,101,Central\n\
x,5000.0,0.0,102,Exchange\n\
e,8000.0,0.0,103,East Terminal\n\
bx,5060.0,20.0,200,Exchange Bus Bay\n\
n1,5060.0,2000.0,201,North Mill\n\
n2,5060.0,4500.0,202,North Campus\n";

const ROUTE_STOPS_CSV: &str = "\
line_id,route_id,seq,stop_id,arrival,departure\n\
rail,rail-east,0,w,,00:00:00\n\
rail,rail-east,1,c,00:03:00,00:03:30\n\
rail,rail-east,2,x,00:07:00,00:07:30\n\
rail,rail-east,3,e,00:12:00,\n\
bus,bus-north,0,bx,,00:00:00\n\
bus,bus-north,1,n1,00:05:00,00:05:20\n\
bus,bus-north,2,n2,00:11:00,\n";

const DEPARTURES_CSV: &str = "\
line_id,route_id,departure\n\
rail,rail-east,07:00:00\n\
rail,rail-east,07:15:00\n\
rail,rail-east,07:30:00\n\
rail,rail-east,07:45:00\n\
rail,rail-east,08:00:00\n\
bus,bus-north,07:10:00\n\
bus,bus-north,07:30:00\n\
bus,bus-north,07:50:00\n\
bus,bus-north,08:10:00\n";

const SETTINGS_TOML: &str = r#"
[router]
search_radius    = 800.0
extension_radius = 300.0

[[access_modes]]
mode         = "walk"
max_distance = 1200.0

[[access_modes]]
mode         = "drt"
max_distance = 1.0e9
speed        = 7.0
teleported   = true

[[discouraged_stops]]
coord       = { x = 2500.0, y = 0.0 }
surcharge_s = 300.0
"#;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn requests() -> Vec<RouteRequest> {
    let od = [
        (Point::new(-300.0, 150.0), Point::new(8_100.0, -200.0)),
        (Point::new(400.0, -500.0), Point::new(5_000.0, 4_600.0)),
        (Point::new(2_400.0, 900.0), Point::new(4_900.0, 2_100.0)),
        (Point::new(7_600.0, 300.0), Point::new(7_900.0, 500.0)),
        (Point::new(-2_500.0, 0.0), Point::new(5_100.0, 1_900.0)),
        (Point::new(5_200.0, 4_400.0), Point::new(0.0, 100.0)),
    ];
    (0..TRAVELLER_COUNT)
        .zip(od)
        .map(|(i, (from, to))| RouteRequest {
            person:         Person::new(PersonId(i)),
            from,
            to,
            departure_time: hms(7, 5, 0) + 600.0 * f64::from(i),
        })
        .collect()
}

fn describe(leg: &Leg, schedule: &TransitSchedule) -> String {
    match &leg.route {
        LegRoute::Transit { access_stop, line, egress_stop, .. } => format!(
            "{} {} → {}",
            schedule.line(*line).name,
            schedule.stop(*access_stop).name,
            schedule.stop(*egress_stop).name,
        ),
        LegRoute::Generic { start, end, .. } => format!("{start} → {end}"),
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    println!("=== corridor: variable-access transit router ===");

    // 1. Settings.
    let settings: RouterSettings = match std::env::args().nth(1) {
        Some(path) => load_settings(Path::new(&path)).with_context(|| format!("loading {path}"))?,
        None => settings_from_toml_str(SETTINGS_TOML)?,
    };
    let access = settings.access_model();

    // 2. Schedule and router graph.
    let schedule = load_schedule_readers(
        Cursor::new(STOPS_CSV),
        Cursor::new(ROUTE_STOPS_CSV),
        Cursor::new(DEPARTURES_CSV),
    )?;
    let network = TransitRouterNetwork::from_schedule(
        &schedule,
        settings.router.max_beeline_walk_connection_distance,
    );
    let prepared = PreparedSchedule::new(&schedule);
    println!(
        "Schedule: {} stops, {} lines  |  router graph: {} nodes, {} edges",
        schedule.stops().len(),
        schedule.lines().len(),
        network.node_count(),
        network.edge_count(),
    );

    // 3. Router.
    let mut rng = SimRng::new(SEED);
    let mut router = VariableAccessTransitRouter::with_random_surcharge(
        &network,
        &schedule,
        &prepared,
        &access,
        &settings.router,
        &mut rng,
    );
    println!("Stop surcharge: {}", if router.surcharge_on() { "on" } else { "off" });
    println!();

    // 4. Route.
    let requests = requests();
    log::info!("routing {} requests", requests.len());
    let t0 = Instant::now();
    let results = route_batch(&mut router, &requests);
    let elapsed = t0.elapsed();

    // 5. Print itineraries.
    for (req, result) in requests.iter().zip(results) {
        println!(
            "{} {} → {} departing {}",
            req.person,
            req.from,
            req.to,
            format_hms(req.departure_time)
        );
        match result? {
            None => println!("  no route"),
            Some(legs) => {
                for leg in &legs {
                    println!(
                        "  {:<8} {} – {}  {:>7.0} m  {}",
                        leg.mode.as_str(),
                        format_hms(leg.departure_time),
                        format_hms(leg.arrival_time()),
                        leg.distance,
                        describe(leg, &schedule),
                    );
                }
            }
        }
        println!();
    }

    println!("Routed {} requests in {:.3} ms", requests.len(), elapsed.as_secs_f64() * 1e3);
    Ok(())
}
