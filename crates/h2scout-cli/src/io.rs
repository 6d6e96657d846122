//! File loading and persistence for the CLI binaries.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use h2scout_core::{Catalog, MissionConfig, Point, RouteCosts, RoutePlan};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A persisted routing result: the trip list plus the cost scalars it was
/// planned under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanFile {
    pub generated_at: DateTime<Utc>,
    pub costs: RouteCosts,
    pub plan: RoutePlan,
}

/// Load a mission configuration, falling back to the built-in default
/// when no path is given.
pub fn load_mission_config(path: Option<&Path>) -> Result<MissionConfig> {
    match path {
        None => Ok(MissionConfig::default()),
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading mission config {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing mission config {}", path.display()))
        }
    }
}

/// Load a hardware catalog, falling back to the built-in one.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        None => Ok(Catalog::builtin()),
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading catalog {}", path.display()))?;
            Catalog::from_json_str(&raw)
                .with_context(|| format!("parsing catalog {}", path.display()))
        }
    }
}

/// Load target coordinates (meters relative to the depot) from JSON.
pub fn load_targets(path: &Path) -> Result<Vec<Point>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading targets {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing targets {}", path.display()))
}

/// Persist a finished plan next to its cost scalars.
pub fn save_plan(path: &Path, costs: RouteCosts, plan: &RoutePlan) -> Result<()> {
    let file = PlanFile {
        generated_at: Utc::now(),
        costs,
        plan: plan.clone(),
    };
    let json = serde_json::to_string_pretty(&file)?;
    std::fs::write(path, json).with_context(|| format!("writing plan {}", path.display()))
}

pub fn load_plan(path: &Path) -> Result<PlanFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading plan {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing plan {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use h2scout_core::{GreedyRouter, RoutePlanner, RouterConfig};

    fn sample_costs() -> RouteCosts {
        RouteCosts {
            energy_per_m_wh: 0.05,
            stop_energy_wh: 100.0,
            usable_energy_wh: 2000.0,
            cruise_speed_mps: 20.0,
            inspection_hr: 0.5,
        }
    }

    #[test]
    fn plan_file_round_trips_on_disk() {
        let targets = vec![Point::new(500.0, 0.0), Point::new(0.0, 800.0)];
        let costs = sample_costs();
        let plan = GreedyRouter::new(costs, RouterConfig::default()).plan(&targets);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        save_plan(&path, costs, &plan).unwrap();

        let loaded = load_plan(&path).unwrap();
        assert_eq!(loaded.plan.trips.len(), plan.trips.len());
        assert!((loaded.costs.usable_energy_wh - costs.usable_energy_wh).abs() < 1e-12);
    }

    #[test]
    fn missing_config_path_falls_back_to_default() {
        let config = load_mission_config(None).unwrap();
        assert_eq!(config.mission.motor_count, 8);
    }

    #[test]
    fn targets_parse_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("targets.json");
        std::fs::write(&path, r#"[{"x": 100.0, "y": -50.0}, {"x": 0.0, "y": 900.0}]"#).unwrap();

        let targets = load_targets(&path).unwrap();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[1].y, 900.0);
    }
}
