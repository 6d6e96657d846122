//! Hardware-combination sweeps and parameter sensitivity analysis.
//!
//! Both are thin drivers around the sizing solver. Configurations that
//! fail to converge or overdraw their motor are skipped silently.

use crate::catalog::{Catalog, Payload};
use crate::config::{MissionConfig, SizingConfig};
use crate::drone::Drone;
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};

/// One sized catalog combination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DroneCandidate {
    pub propeller_name: String,
    pub motor_name: String,
    pub drone: Drone,
}

/// Cross-product sweep of every catalog propeller against every catalog
/// motor, sharing one ESC, sorted by converged takeoff mass.
#[derive(Debug, Clone)]
pub struct DroneCombinator {
    candidates: Vec<DroneCandidate>,
}

impl DroneCombinator {
    pub fn sweep(
        catalog: &Catalog,
        mission: SizingConfig,
        esc_name: &str,
        payload: &Payload,
    ) -> Result<Self, CatalogError> {
        let esc = catalog.esc(esc_name)?;
        let mut candidates = Vec::new();

        for (prop_name, prop_config) in &catalog.propellers {
            for (motor_name, motor_config) in &catalog.motors {
                let result = Drone::size(
                    mission,
                    prop_config.build(),
                    motor_config.build(),
                    esc.clone(),
                    payload.clone(),
                );
                match result {
                    Ok(drone) => candidates.push(DroneCandidate {
                        propeller_name: prop_name.clone(),
                        motor_name: motor_name.clone(),
                        drone,
                    }),
                    Err(reason) => {
                        tracing::debug!(%prop_name, %motor_name, %reason, "combination rejected");
                    }
                }
            }
        }

        candidates.sort_by(|a, b| a.drone.mass_kg.total_cmp(&b.drone.mass_kg));
        Ok(Self { candidates })
    }

    pub fn candidates(&self) -> &[DroneCandidate] {
        &self.candidates
    }

    /// Lightest `count` candidates under a takeoff-mass cap.
    pub fn top(&self, count: usize, mass_cap_kg: f64) -> Vec<&DroneCandidate> {
        self.candidates
            .iter()
            .filter(|candidate| candidate.drone.mass_kg <= mass_cap_kg)
            .take(count)
            .collect()
    }
}

/// Relative mass response to one perturbed parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityPoint {
    pub parameter: String,
    /// Applied parameter offset, percent
    pub offset_pct: f64,
    /// Resulting takeoff-mass change, percent
    pub mass_delta_pct: f64,
}

const OFFSETS_PCT: [f64; 10] = [-25.0, -20.0, -15.0, -10.0, -5.0, 5.0, 10.0, 15.0, 20.0, 25.0];

/// The continuously variable sizing parameters. Blade and motor counts
/// are integers and stay out of the sweep.
const PARAMETERS: [(&str, fn(&mut MissionConfig, f64)); 11] = [
    ("flight_hours", |c, k| c.mission.flight_hours *= k),
    ("tw_ratio", |c, k| c.mission.tw_ratio *= k),
    ("prop_diameter", |c, k| c.propeller.diameter_m *= k),
    ("prop_pitch", |c, k| c.propeller.pitch_m *= k),
    ("prop_mass", |c, k| c.propeller.mass_kg *= k),
    ("motor_kv", |c, k| c.motor.kv *= k),
    ("motor_no_load_voltage", |c, k| c.motor.no_load_voltage *= k),
    ("motor_no_load_current", |c, k| c.motor.no_load_current *= k),
    ("motor_resistance", |c, k| c.motor.resistance *= k),
    ("motor_mass", |c, k| c.motor.mass_kg *= k),
    ("esc_mass", |c, k| c.esc.mass_kg *= k),
];

/// Re-size the aircraft with each parameter perturbed around a baseline.
/// Offsets that fail to size are skipped; every trial works on its own
/// copy of the configuration.
pub fn sensitivity_sweep(baseline: &Drone, config: &MissionConfig) -> Vec<SensitivityPoint> {
    let mut points = Vec::new();

    for (parameter, apply) in PARAMETERS {
        for offset_pct in OFFSETS_PCT {
            let mut perturbed = config.clone();
            apply(&mut perturbed, 1.0 + offset_pct / 100.0);

            if let Ok(drone) = Drone::from_config(&perturbed, baseline.payload.clone()) {
                points.push(SensitivityPoint {
                    parameter: parameter.to_string(),
                    offset_pct,
                    mass_delta_pct: (drone.mass_kg - baseline.mass_kg) / baseline.mass_kg * 100.0,
                });
            }
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn light_mission() -> SizingConfig {
        SizingConfig {
            flight_hours: 1.0,
            motor_count: 4,
            tw_ratio: 2.0,
        }
    }

    #[test]
    fn sweep_sizes_and_sorts_the_catalog() {
        let catalog = Catalog::builtin();
        let combinator = DroneCombinator::sweep(
            &catalog,
            light_mission(),
            "T-Motor FLAME 60A",
            &Payload::default(),
        )
        .unwrap();

        let candidates = combinator.candidates();
        assert!(!candidates.is_empty());
        assert!(candidates.len() <= catalog.propellers.len() * catalog.motors.len());
        assert!(candidates
            .windows(2)
            .all(|pair| pair[0].drone.mass_kg <= pair[1].drone.mass_kg));
        for candidate in candidates {
            assert!(candidate.drone.mass_kg > 0.0);
        }
    }

    #[test]
    fn overcurrent_combinations_are_filtered_out() {
        let catalog = Catalog::builtin();
        let combinator = DroneCombinator::sweep(
            &catalog,
            light_mission(),
            "T-Motor FLAME 60A",
            &Payload::default(),
        )
        .unwrap();

        // The MN5008 cannot hold hover on any of these props at this
        // takeoff mass; it must not survive the sweep.
        assert!(combinator
            .candidates()
            .iter()
            .all(|candidate| candidate.motor_name != "T-Motor Antigravity MN5008 KV340"));
    }

    #[test]
    fn top_applies_count_and_mass_cap() {
        let catalog = Catalog::builtin();
        let combinator = DroneCombinator::sweep(
            &catalog,
            light_mission(),
            "T-Motor FLAME 60A",
            &Payload::default(),
        )
        .unwrap();

        let all = combinator.candidates().len();
        assert!(combinator.top(2, f64::INFINITY).len() <= 2);
        assert_eq!(combinator.top(all + 1, f64::INFINITY).len(), all);
        assert!(combinator.top(all, 0.5).is_empty());
    }

    #[test]
    fn unknown_esc_fails_the_sweep() {
        let catalog = Catalog::builtin();
        let result =
            DroneCombinator::sweep(&catalog, light_mission(), "FLAME 600A", &Payload::default());
        assert!(matches!(result, Err(CatalogError::UnknownComponent { .. })));
    }

    #[test]
    fn sensitivity_sweep_tracks_mass_response() {
        let mut config = MissionConfig::default();
        config.mission = light_mission();
        let baseline = Drone::from_config(&config, Payload::default()).unwrap();

        let points = sensitivity_sweep(&baseline, &config);
        assert!(!points.is_empty());
        assert!(points.iter().all(|p| p.parameter != "blades"));

        // Longer endurance always costs mass.
        let endurance_up = points
            .iter()
            .find(|p| p.parameter == "flight_hours" && p.offset_pct == 5.0)
            .unwrap();
        assert!(endurance_up.mass_delta_pct > 0.0);
        let endurance_down = points
            .iter()
            .find(|p| p.parameter == "flight_hours" && p.offset_pct == -5.0)
            .unwrap();
        assert!(endurance_down.mass_delta_pct < 0.0);
    }
}
