//! Linear DC-motor electrical model.

use serde::{Deserialize, Serialize};

/// A brushless motor characterized by its no-load point and resistance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Motor {
    /// Velocity constant, rpm/V
    pub kv: f64,
    /// No-load voltage, V
    pub no_load_voltage: f64,
    /// No-load current, A
    pub no_load_current: f64,
    /// Winding resistance, ohm
    pub resistance: f64,
    /// Rated maximum current, A
    pub max_current: f64,
    pub mass_kg: f64,
}

impl Motor {
    pub fn new(
        kv: f64,
        no_load_voltage: f64,
        no_load_current: f64,
        resistance: f64,
        max_current: f64,
        mass_kg: f64,
    ) -> Self {
        Self {
            kv,
            no_load_voltage,
            no_load_current,
            resistance,
            max_current,
            mass_kg,
        }
    }

    /// Current (A) and voltage (V) required to hold `torque_nm` at `rpm`.
    ///
    /// Exceeding `max_current` is not an error at this level; the sizing
    /// layer checks the rating and rejects the configuration.
    pub fn current_voltage(&self, torque_nm: f64, rpm: f64) -> (f64, f64) {
        let back_emf = self.no_load_voltage - self.no_load_current * self.resistance;
        let current =
            torque_nm * self.kv * self.no_load_voltage / 9.55 / back_emf + self.no_load_current;
        let voltage = current * self.resistance + back_emf / (self.kv * self.no_load_voltage) * rpm;
        (current, voltage)
    }

    /// Fraction of the rated maximum drawn at an operating point.
    pub fn current_ratio(&self, torque_nm: f64, rpm: f64) -> f64 {
        self.current_voltage(torque_nm, rpm).0 / self.max_current
    }
}
