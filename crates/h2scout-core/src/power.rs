//! Hydrogen power train: fuel-cell polarization curve and tank mass model.

use crate::error::PowerError;
use serde::{Deserialize, Serialize};

/// Specific energy content of hydrogen, Wh/kg.
pub const HYDROGEN_SPECIFIC_ENERGY: f64 = 34_000.0;

/// Knee between the two linear segments of the polarization curve, A.
const CURVE_KNEE_A: f64 = 5.3;
/// Power tolerance for the inverse solve, W.
const INVERSE_TOLERANCE_W: f64 = 0.1;

/// Fuel cell with a two-segment piecewise-linear voltage-vs-current curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuelCell {
    /// Maximum stack current, A
    pub max_current: f64,
}

impl Default for FuelCell {
    fn default() -> Self {
        Self { max_current: 75.0 }
    }
}

impl FuelCell {
    /// Stack voltage at a given current draw.
    ///
    /// Negative or above-maximum currents are caller bugs, not expected
    /// physical limits, and fail loudly.
    pub fn voltage(&self, current_a: f64) -> Result<f64, PowerError> {
        if current_a > self.max_current {
            return Err(PowerError::AboveMaxCurrent {
                current_a,
                max_a: self.max_current,
            });
        }
        if current_a < 0.0 {
            return Err(PowerError::NegativeCurrent { current_a });
        }
        if current_a <= CURVE_KNEE_A {
            Ok(53.0 - 1.4151 * current_a)
        } else {
            Ok(46.4505 - 0.17934 * current_a)
        }
    }

    /// Operating point (current, voltage) delivering a power demand.
    ///
    /// The curve is not algebraically invertible, so this bisects current
    /// over `[0, max_current]` until `|I*V - P|` is within tolerance. A
    /// demand beyond the curve clamps to the max-current point.
    pub fn current_voltage(&self, power_w: f64) -> Result<(f64, f64), PowerError> {
        let mut lo = 0.0;
        let mut hi = self.max_current;

        let mut current = (lo + hi) / 2.0;
        let mut voltage = self.voltage(current)?;

        while current < self.max_current && (current * voltage - power_w).abs() > INVERSE_TOLERANCE_W
        {
            if current * voltage > power_w {
                hi = current;
            } else {
                lo = current;
            }
            current = (lo + hi) / 2.0;
            voltage = self.voltage(current)?;
            if hi - lo < f64::EPSILON {
                break;
            }
        }
        Ok((current, voltage))
    }
}

/// Pressurized hydrogen storage: fuel mass plus a structural mass derived
/// from an empirical quadratic, unless an explicit override is supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HydrogenTank {
    /// Stored hydrogen, kg
    pub h2_kg: f64,
    /// Fixed structural mass, kg (set when resizing is disabled)
    pub tank_mass_override: Option<f64>,
}

impl HydrogenTank {
    /// Tank sized to carry a required energy budget.
    pub fn from_energy(energy_wh: f64) -> Self {
        Self {
            h2_kg: energy_wh / HYDROGEN_SPECIFIC_ENERGY,
            tank_mass_override: None,
        }
    }

    /// Tank holding a fixed fuel load, for sweeps and route simulation
    /// where the fuel mass is a free variable rather than a solved one.
    pub fn from_hydrogen_mass(h2_kg: f64) -> Self {
        Self {
            h2_kg,
            tank_mass_override: None,
        }
    }

    /// Tank sized for an energy budget but with a known structural mass.
    pub fn with_tank_mass(energy_wh: f64, tank_mass_kg: f64) -> Self {
        Self {
            h2_kg: energy_wh / HYDROGEN_SPECIFIC_ENERGY,
            tank_mass_override: Some(tank_mass_kg),
        }
    }

    /// Structural mass from the empirical mass-vs-hydrogen-mass quadratic.
    pub fn tank_mass(&self) -> f64 {
        match self.tank_mass_override {
            Some(mass) => mass,
            None => 41.187 * self.h2_kg.powi(2) + 8.38 * self.h2_kg + 1.0587,
        }
    }

    /// Fuel plus structure, kg.
    pub fn total_mass(&self) -> f64 {
        self.h2_kg + self.tank_mass()
    }

    /// Energy content of the stored hydrogen, Wh.
    pub fn stored_energy_wh(&self) -> f64 {
        self.h2_kg * HYDROGEN_SPECIFIC_ENERGY
    }
}
