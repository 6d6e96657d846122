//! Plan energy-bounded inspection trips over a field of targets.

use clap::Parser;
use h2scout_cli::io;
use h2scout_core::{
    Drone, MultiStartRouter, Payload, Point, RouteCostConfig, RoutePlanner, RouterConfig,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

/// Partition inspection targets into energy-bounded round trips
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Mission config JSON (defaults to the built-in reference mission)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Target coordinates JSON, meters relative to the depot
    #[arg(long)]
    targets: Option<PathBuf>,

    /// Generate this many random targets instead of reading a file
    #[arg(long, default_value_t = 0)]
    random: usize,

    /// Half-width of the random target field, m
    #[arg(long, default_value_t = 20_000.0)]
    spread: f64,

    /// Randomized restarts of the constructor
    #[arg(long, default_value_t = 200)]
    iterations: usize,

    /// Candidate pool size for the randomized stop selection
    #[arg(long, default_value_t = 3)]
    pool: usize,

    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Hard per-trip distance cap, m (0 disables it)
    #[arg(long, default_value_t = 0.0)]
    max_trip_distance: f64,

    /// Cruise pitch angle, degrees
    #[arg(long, default_value_t = 40.0)]
    pitch: f64,

    /// Time on station per target, minutes
    #[arg(long, default_value_t = 30.0)]
    inspection: f64,

    /// Usable fraction of the stored energy
    #[arg(long, default_value_t = 0.9)]
    margin: f64,

    /// Write the resulting plan to this JSON file
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    h2scout_cli::init_tracing();
    let args = Args::parse();

    let targets = match (&args.targets, args.random) {
        (Some(path), _) => io::load_targets(path)?,
        (None, count) if count > 0 => random_field(count, args.spread, args.seed),
        _ => anyhow::bail!("provide --targets FILE or --random N"),
    };

    let config = io::load_mission_config(args.config.as_deref())?;
    let drone = match Drone::from_config(&config, Payload::default()) {
        Ok(drone) => drone,
        Err(reason) => anyhow::bail!("configuration is infeasible: {reason}"),
    };

    let cost_config = RouteCostConfig {
        cruise_pitch_deg: args.pitch,
        inspection_minutes: args.inspection,
        safety_margin: args.margin,
    };
    let costs = drone.route_costs(&cost_config);
    let router = MultiStartRouter::new(
        costs,
        RouterConfig {
            max_trip_distance_m: args.max_trip_distance,
            candidate_pool: args.pool,
            iterations: args.iterations,
            seed: args.seed,
        },
    );

    let plan = router.plan(&targets);

    println!(
        "{} targets, {} unreachable, {} trips",
        targets.len(),
        plan.unreachable,
        plan.trips.len()
    );
    for (idx, trip) in plan.trips.iter().enumerate() {
        println!(
            "trip {idx:3}: {:3} stops | {:7.2} km | {:6.1} g H2 | {:5.2} h",
            trip.stops,
            trip.distance_m / 1000.0,
            trip.hydrogen_kg * 1000.0,
            trip.duration_hr,
        );
    }
    println!(
        "total: {:.3} kg H2, {:.1} flight hours, stops per trip {:?}",
        plan.total_hydrogen_kg,
        plan.total_hours,
        plan.stop_histogram(),
    );
    if plan.overruns > 0 {
        println!("warning: {} trips exceeded the energy budget", plan.overruns);
    }

    if let Some(path) = &args.output {
        io::save_plan(path, costs, &plan)?;
        println!("plan written to {}", path.display());
    }

    Ok(())
}

fn random_field(count: usize, spread: f64, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| Point::new(rng.random_range(-spread..spread), rng.random_range(-spread..spread)))
        .collect()
}
