//! End-to-end sizing and routing over a synthetic wind farm.

use h2scout_core::{
    Drone, GreedyRouter, MissionConfig, MultiStartRouter, Payload, Point, RouteCostConfig,
    RoutePlanner, RouterConfig,
};

/// A rectangular turbine grid, meters from the depot.
fn turbine_grid(rows: usize, cols: usize, spacing_m: f64) -> Vec<Point> {
    let mut targets = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            targets.push(Point::new(
                500.0 + col as f64 * spacing_m,
                row as f64 * spacing_m - 900.0,
            ));
        }
    }
    targets
}

fn reference_drone() -> Drone {
    Drone::from_config(&MissionConfig::default(), Payload::default())
        .expect("reference configuration must size")
}

#[test]
fn sized_drone_plans_full_farm_coverage() {
    let drone = reference_drone();
    let costs = drone.route_costs(&RouteCostConfig::default());
    let targets = turbine_grid(4, 5, 600.0);

    let plan = MultiStartRouter::new(costs, RouterConfig::default()).plan(&targets);

    assert_eq!(plan.unreachable, 0);
    assert_eq!(plan.overruns, 0);

    let visited: usize = plan.trips.iter().map(|trip| trip.stops).sum();
    assert_eq!(visited, targets.len());
    for target in &targets {
        let appearances = plan
            .trips
            .iter()
            .flat_map(|trip| trip.points.iter())
            .filter(|point| *point == target)
            .count();
        assert_eq!(appearances, 1, "target {target:?} must be visited exactly once");
    }

    for trip in &plan.trips {
        assert!(trip.energy_wh <= costs.usable_energy_wh);
        assert_eq!(trip.points.first(), Some(&Point::DEPOT));
        assert_eq!(trip.points.last(), Some(&Point::DEPOT));
    }

    let summed: f64 = plan.trips.iter().map(|trip| trip.energy_wh).sum();
    assert!((summed - plan.total_energy_wh).abs() < 1e-9);
    assert!((plan.total_hydrogen_kg - plan.total_energy_wh / 34_000.0).abs() < 1e-9);
}

#[test]
fn multi_start_never_loses_to_greedy() {
    let drone = reference_drone();
    let costs = drone.route_costs(&RouteCostConfig::default());
    let targets = turbine_grid(3, 6, 700.0);

    let greedy = GreedyRouter::new(costs, RouterConfig::default()).plan(&targets);
    let multi = MultiStartRouter::new(costs, RouterConfig::default()).plan(&targets);

    assert!(multi.trips.len() <= greedy.trips.len());
    if multi.trips.len() == greedy.trips.len() {
        assert!(multi.total_energy_wh <= greedy.total_energy_wh);
    }
}

#[test]
fn route_plan_round_trips_through_json() {
    let drone = reference_drone();
    let costs = drone.route_costs(&RouteCostConfig::default());
    let plan = GreedyRouter::new(costs, RouterConfig::default()).plan(&turbine_grid(2, 3, 600.0));

    let json = serde_json::to_string(&plan).unwrap();
    let back: h2scout_core::RoutePlan = serde_json::from_str(&json).unwrap();

    assert_eq!(back.trips.len(), plan.trips.len());
    assert_eq!(back.unreachable, plan.unreachable);
    assert!((back.total_energy_wh - plan.total_energy_wh).abs() < 1e-12);
}
