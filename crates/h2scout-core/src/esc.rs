//! Electronic speed controller loss and throttle model.

use crate::error::EscError;
use serde::{Deserialize, Serialize};

/// An ESC with an internal resistance derived from an empirical
/// current-rating regression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Esc {
    /// Burst current rating, A
    pub max_current: f64,
    /// Continuous current rating, A
    pub cont_current: f64,
    pub mass_kg: f64,
    /// Derived internal resistance, ohm
    pub resistance: f64,
}

impl Esc {
    pub fn new(max_current: f64, cont_current: f64, mass_kg: f64) -> Self {
        Self {
            max_current,
            cont_current,
            mass_kg,
            resistance: resistance_from_rating(max_current),
        }
    }

    /// Throttle fraction commanded for a motor operating point on a given
    /// bus voltage.
    pub fn throttle(&self, motor_voltage: f64, motor_current: f64, bus_voltage: f64) -> f64 {
        (motor_voltage + motor_current * self.resistance) / bus_voltage
    }

    /// Bus-side input current for a motor operating point.
    pub fn input_current(
        &self,
        motor_voltage: f64,
        motor_current: f64,
        bus_voltage: f64,
    ) -> Result<f64, EscError> {
        let current = self.throttle(motor_voltage, motor_current, bus_voltage) * motor_current;
        if current > self.max_current {
            return Err(EscError::OverCurrent {
                current_a: current,
                limit_a: self.max_current,
            });
        }
        Ok(current)
    }

    /// Bus-side input voltage after the drop over the supply resistance.
    pub fn input_voltage(&self, bus_voltage: f64, bus_current: f64, bus_resistance: f64) -> f64 {
        bus_voltage - bus_current * bus_resistance
    }
}

fn resistance_from_rating(max_current: f64) -> f64 {
    (32.6754 * max_current.powf(-0.7669) + 0.5269) / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn resistance_regression_at_120a() {
        let esc = Esc::new(120.0, 100.0, 0.05);
        assert_relative_eq!(esc.resistance, 0.0013581, max_relative = 1e-3);
    }

    #[test]
    fn resistance_depends_only_on_max_rating() {
        let a = Esc::new(120.0, 100.0, 0.05);
        let b = Esc::new(120.0, 40.0, 10.0);
        let c = Esc::new(150.0, 100.0, 0.05);
        assert_eq!(a.resistance, b.resistance);
        assert!(a.resistance != c.resistance);
    }

    #[test]
    fn throttle_reference_points() {
        let esc = Esc::new(120.0, 100.0, 0.05);
        assert_relative_eq!(esc.throttle(50.0, 12.0, 70.0), 0.7145, max_relative = 1e-3);
        assert_relative_eq!(esc.throttle(20.0, 4.0, 70.0), 0.2858, max_relative = 1e-3);
    }

    #[test]
    fn input_current_rejects_rating_breach() {
        let esc = Esc::new(20.0, 15.0, 0.03);
        // Near-full throttle at high motor current lands above the rating.
        let err = esc.input_current(48.0, 25.0, 50.0).unwrap_err();
        assert!(matches!(err, EscError::OverCurrent { .. }));

        let ok = esc.input_current(20.0, 10.0, 50.0).unwrap();
        assert!(ok < esc.max_current);
    }

    #[test]
    fn input_voltage_drops_over_bus_resistance() {
        let esc = Esc::new(120.0, 100.0, 0.05);
        assert_relative_eq!(esc.input_voltage(50.0, 10.0, 0.1), 49.0);
    }
}
