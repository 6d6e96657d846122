//! Energy-constrained multi-trip route planning.
//!
//! Partitions a field of inspection targets into depot round trips, each
//! bounded by the aircraft's usable onboard energy. Construction is greedy
//! nearest-neighbor; a randomized multi-start variant perturbs the stop
//! selection and keeps the best plan found. Closed trips are never
//! re-ordered internally (no 2-opt pass): plans stay comparable against
//! the external reference solver.

use crate::power::HYDROGEN_SPECIFIC_ENERGY;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A target position in meters, relative to the depot at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const DEPOT: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn depot_distance(&self) -> f64 {
        self.distance(&Point::DEPOT)
    }
}

/// Scalar cost figures derived from a sized aircraft.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RouteCosts {
    /// Cruise energy per meter of travel, Wh/m
    pub energy_per_m_wh: f64,
    /// Fixed energy charged per inspection stop, Wh
    pub stop_energy_wh: f64,
    /// Stored energy times the safety margin, Wh
    pub usable_energy_wh: f64,
    pub cruise_speed_mps: f64,
    /// Time spent at each inspection stop, hours
    pub inspection_hr: f64,
}

/// Search parameters for the routing engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Hard cap on any single trip's flown distance, m. Zero disables it.
    pub max_trip_distance_m: f64,
    /// Randomized construction picks uniformly among this many nearest
    /// remaining targets.
    pub candidate_pool: usize,
    /// Number of independent randomized restarts.
    pub iterations: usize,
    pub seed: u64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            max_trip_distance_m: 0.0,
            candidate_pool: 3,
            iterations: 200,
            seed: 1,
        }
    }
}

/// One depot round trip: the visit sequence and its accumulated cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    /// Ordered positions including the leading and trailing depot
    pub points: Vec<Point>,
    pub distance_m: f64,
    pub energy_wh: f64,
    pub hydrogen_kg: f64,
    pub duration_hr: f64,
    pub stops: usize,
}

/// A complete partition of the reachable targets into trips.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutePlan {
    pub trips: Vec<Trip>,
    /// Targets excluded up front because a lone round trip cannot fit the
    /// energy budget (or the distance cutoff)
    pub unreachable: usize,
    /// Committed trips that nonetheless exceeded the budget. Must stay
    /// zero; logged when it does not.
    pub overruns: usize,
    pub total_energy_wh: f64,
    pub total_hydrogen_kg: f64,
    pub total_hours: f64,
}

impl RoutePlan {
    /// Stops-per-trip histogram: stop count -> number of trips.
    pub fn stop_histogram(&self) -> BTreeMap<usize, usize> {
        let mut histogram = BTreeMap::new();
        for trip in &self.trips {
            *histogram.entry(trip.stops).or_insert(0) += 1;
        }
        histogram
    }

    pub fn trip_durations(&self) -> Vec<f64> {
        self.trips.iter().map(|trip| trip.duration_hr).collect()
    }

    /// Strict improvement ordering: fewer trips wins, equal trip counts
    /// are broken by lower total energy.
    pub fn better_than(&self, other: &RoutePlan) -> bool {
        if self.trips.len() != other.trips.len() {
            return self.trips.len() < other.trips.len();
        }
        self.total_energy_wh < other.total_energy_wh
    }
}

/// The contract an alternative (e.g. constraint-solver) router must honor:
/// identical per-distance/per-stop energy accounting, identical caps.
pub trait RoutePlanner {
    fn plan(&self, targets: &[Point]) -> RoutePlan;
}

/// Deterministic nearest-neighbor construction.
#[derive(Debug, Clone)]
pub struct GreedyRouter {
    pub costs: RouteCosts,
    pub config: RouterConfig,
}

impl GreedyRouter {
    pub fn new(costs: RouteCosts, config: RouterConfig) -> Self {
        Self { costs, config }
    }
}

impl RoutePlanner for GreedyRouter {
    fn plan(&self, targets: &[Point]) -> RoutePlan {
        construct(&self.costs, &self.config, targets, None)
    }
}

/// Randomized multi-start search around the greedy constructor.
#[derive(Debug, Clone)]
pub struct MultiStartRouter {
    pub costs: RouteCosts,
    pub config: RouterConfig,
}

impl MultiStartRouter {
    pub fn new(costs: RouteCosts, config: RouterConfig) -> Self {
        Self { costs, config }
    }
}

impl RoutePlanner for MultiStartRouter {
    fn plan(&self, targets: &[Point]) -> RoutePlan {
        let baseline = construct(&self.costs, &self.config, targets, None);

        // Trials are shared-nothing; the reduction is the single point
        // where candidate plans meet.
        let best = (0..self.config.iterations as u64)
            .into_par_iter()
            .map(|trial| {
                let seed = self.config.seed.wrapping_add(trial);
                construct(&self.costs, &self.config, targets, Some(seed))
            })
            .reduce_with(|kept, candidate| {
                if candidate.better_than(&kept) {
                    candidate
                } else {
                    kept
                }
            });

        let plan = match best {
            Some(found) if found.better_than(&baseline) => found,
            _ => baseline,
        };
        tracing::info!(
            trips = plan.trips.len(),
            hydrogen_kg = plan.total_hydrogen_kg,
            unreachable = plan.unreachable,
            "multi-start routing finished"
        );
        plan
    }
}

/// Build one complete plan. `seed` switches the stop selection from the
/// strict nearest neighbor to a uniform pick among the candidate pool.
fn construct(
    costs: &RouteCosts,
    config: &RouterConfig,
    targets: &[Point],
    seed: Option<u64>,
) -> RoutePlan {
    let mut rng = seed.map(StdRng::seed_from_u64);
    let cutoff = config.max_trip_distance_m;

    // Reachability pre-pass: a target whose lone round trip cannot fit
    // the budget would wedge the constructor, so it is excluded and
    // counted rather than silently dropped.
    let mut reachable = Vec::with_capacity(targets.len());
    let mut unreachable = 0usize;
    for target in targets {
        let round_trip = 2.0 * target.depot_distance();
        let lone_energy = round_trip * costs.energy_per_m_wh + costs.stop_energy_wh;
        if lone_energy > costs.usable_energy_wh || (cutoff > 0.0 && round_trip > cutoff) {
            unreachable += 1;
        } else {
            reachable.push(*target);
        }
    }
    if unreachable > 0 {
        tracing::debug!(count = unreachable, "targets beyond maximum range excluded");
    }

    let mut visited = vec![false; reachable.len()];
    let mut remaining = reachable.len();
    let mut trips = Vec::new();
    let mut overruns = 0usize;

    while remaining > 0 {
        let mut position = Point::DEPOT;
        let mut points = vec![Point::DEPOT];
        let mut distance_m = 0.0;
        let mut energy_wh = 0.0;
        let mut stops = 0usize;

        // The pre-pass guarantees the first stop of every trip fits, so
        // each pass through the outer loop commits at least one target.
        while remaining > 0 {
            let next = select_next(&reachable, &visited, &position, config, rng.as_mut());
            let candidate = reachable[next];
            let leg_m = position.distance(&candidate);
            let home_m = candidate.depot_distance();

            let projected_energy = energy_wh
                + (leg_m + home_m) * costs.energy_per_m_wh
                + costs.stop_energy_wh;
            let projected_distance = distance_m + leg_m + home_m;
            if projected_energy > costs.usable_energy_wh
                || (cutoff > 0.0 && projected_distance > cutoff)
            {
                break;
            }

            visited[next] = true;
            remaining -= 1;
            distance_m += leg_m;
            energy_wh += leg_m * costs.energy_per_m_wh + costs.stop_energy_wh;
            stops += 1;
            position = candidate;
            points.push(candidate);
        }

        let home_m = position.depot_distance();
        distance_m += home_m;
        energy_wh += home_m * costs.energy_per_m_wh;
        points.push(Point::DEPOT);

        if energy_wh > costs.usable_energy_wh {
            tracing::warn!(
                energy_wh,
                budget_wh = costs.usable_energy_wh,
                "committed trip exceeds the energy budget"
            );
            overruns += 1;
        }

        trips.push(Trip {
            points,
            distance_m,
            energy_wh,
            hydrogen_kg: energy_wh / HYDROGEN_SPECIFIC_ENERGY,
            duration_hr: distance_m / costs.cruise_speed_mps / 3600.0
                + stops as f64 * costs.inspection_hr,
            stops,
        });
    }

    let total_energy_wh: f64 = trips.iter().map(|trip| trip.energy_wh).sum();
    let total_hours: f64 = trips.iter().map(|trip| trip.duration_hr).sum();
    RoutePlan {
        total_energy_wh,
        total_hydrogen_kg: total_energy_wh / HYDROGEN_SPECIFIC_ENERGY,
        total_hours,
        trips,
        unreachable,
        overruns,
    }
}

/// Pick the next stop among the unvisited targets: the strict nearest for
/// the deterministic constructor, or uniformly among the `candidate_pool`
/// nearest when an RNG is supplied.
fn select_next(
    targets: &[Point],
    visited: &[bool],
    position: &Point,
    config: &RouterConfig,
    rng: Option<&mut StdRng>,
) -> usize {
    match rng {
        None => {
            let mut best = usize::MAX;
            let mut best_dist = f64::INFINITY;
            for (idx, target) in targets.iter().enumerate() {
                if visited[idx] {
                    continue;
                }
                let dist = position.distance(target);
                if dist < best_dist {
                    best_dist = dist;
                    best = idx;
                }
            }
            best
        }
        Some(rng) => {
            let mut candidates: Vec<(usize, f64)> = targets
                .iter()
                .enumerate()
                .filter(|(idx, _)| !visited[*idx])
                .map(|(idx, target)| (idx, position.distance(target)))
                .collect();
            candidates.sort_unstable_by(|a, b| a.1.total_cmp(&b.1));
            let pool = config.candidate_pool.max(1).min(candidates.len());
            candidates[rng.random_range(0..pool)].0
        }
    }
}
