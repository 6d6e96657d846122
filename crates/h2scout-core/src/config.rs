//! Mission and hardware configuration snapshots.
//!
//! These are immutable inputs to the sizing solver: sweeps and trials
//! always clone a config before perturbing it, never mutate the caller's
//! copy in place.

use crate::{Esc, Motor, Propeller};
use serde::{Deserialize, Serialize};

/// Top-level sizing input: mission parameters plus nested hardware.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionConfig {
    pub mission: SizingConfig,
    pub propeller: PropellerConfig,
    pub motor: MotorConfig,
    pub esc: EscConfig,
}

/// Mission-level sizing parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SizingConfig {
    /// Required endurance, hours
    pub flight_hours: f64,
    /// Number of motors
    pub motor_count: u32,
    /// Target thrust-to-weight ratio
    pub tw_ratio: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PropellerConfig {
    pub diameter_m: f64,
    pub pitch_m: f64,
    pub blades: u32,
    pub mass_kg: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MotorConfig {
    pub kv: f64,
    pub no_load_voltage: f64,
    pub no_load_current: f64,
    pub resistance: f64,
    pub max_current: f64,
    pub mass_kg: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EscConfig {
    pub max_current: f64,
    pub cont_current: f64,
    pub mass_kg: f64,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            mission: SizingConfig {
                flight_hours: 3.0,
                motor_count: 8,
                tw_ratio: 2.0,
            },
            propeller: PropellerConfig {
                diameter_m: 0.6604,
                pitch_m: 0.2159,
                blades: 2,
                mass_kg: 0.048,
            },
            motor: MotorConfig {
                kv: 160.0,
                no_load_voltage: 18.0,
                no_load_current: 0.5,
                resistance: 0.178,
                max_current: 23.7,
                mass_kg: 0.18,
            },
            esc: EscConfig {
                max_current: 80.0,
                cont_current: 60.0,
                mass_kg: 0.0735,
            },
        }
    }
}

impl PropellerConfig {
    pub fn build(&self) -> Propeller {
        Propeller::new(self.diameter_m, self.pitch_m, self.blades, self.mass_kg)
    }
}

impl MotorConfig {
    pub fn build(&self) -> Motor {
        Motor::new(
            self.kv,
            self.no_load_voltage,
            self.no_load_current,
            self.resistance,
            self.max_current,
            self.mass_kg,
        )
    }
}

impl EscConfig {
    pub fn build(&self) -> Esc {
        Esc::new(self.max_current, self.cont_current, self.mass_kg)
    }
}
