//! Propeller aerodynamics from blade-element closed forms.
//!
//! The three aerodynamic coefficients are fixed at construction time; the
//! only mutation allowed afterwards is an explicit experimental-correction
//! override for bench-measured props.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Sea-level air density, kg/m^3.
pub const AIR_DENSITY: f64 = 1.225;

// Blade-element constants shared by every propeller in the model.
const ASPECT_RATIO: f64 = 5.0;
const OSWALD_FACTOR: f64 = 0.85;
const LAMBDA: f64 = 0.75;
const ZETA: f64 = 0.5;
const E_CORRECTION: f64 = 0.83;
const ZERO_LIFT_DRAG: f64 = 0.015;
const ALPHA_ZERO: f64 = 0.0;
const K0: f64 = 6.11;

/// A fixed-pitch propeller and its derived aerodynamic coefficients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Propeller {
    /// Diameter, m
    pub diameter_m: f64,
    /// Pitch, m
    pub pitch_m: f64,
    /// Blade count
    pub blades: u32,
    pub mass_kg: f64,
    /// Thrust coefficient
    pub ct: f64,
    /// Drag coefficient
    pub cd: f64,
    /// Torque coefficient
    pub cm: f64,
}

impl Propeller {
    pub fn new(diameter_m: f64, pitch_m: f64, blades: u32, mass_kg: f64) -> Self {
        let (ct, cd, cm) = coefficients(diameter_m, pitch_m, blades);
        Self {
            diameter_m,
            pitch_m,
            blades,
            mass_kg,
            ct,
            cd,
            cm,
        }
    }

    /// Replace the derived thrust/torque coefficients with bench-measured
    /// values. Consumes and returns the propeller so corrected props are
    /// still immutable in use.
    pub fn with_coefficients(mut self, ct: f64, cm: f64) -> Self {
        self.ct = ct;
        self.cm = cm;
        self
    }

    /// Thrust (N) and torque (N*m) at a rotational speed in rpm.
    pub fn forces(&self, rpm: f64) -> (f64, f64) {
        let rps = rpm / 60.0;
        let thrust = self.ct * AIR_DENSITY * rps.powi(2) * self.diameter_m.powi(4);
        let torque = self.cm * AIR_DENSITY * rps.powi(2) * self.diameter_m.powi(5);
        (thrust, torque)
    }

    /// Rotational speed (rpm) needed to produce a target thrust (N).
    pub fn required_rpm(&self, thrust_n: f64) -> f64 {
        60.0 * (thrust_n / self.ct / AIR_DENSITY / self.diameter_m.powi(4)).sqrt()
    }
}

fn coefficients(diameter_m: f64, pitch_m: f64, blades: u32) -> (f64, f64, f64) {
    let bp = blades as f64;
    // Effective blade angle term from the pitch/diameter geometry.
    let angle = OSWALD_FACTOR * pitch_m.atan2(PI * diameter_m) - ALPHA_ZERO;

    let ct = 0.25 * PI.powi(3) * LAMBDA * ZETA.powi(2) * bp * K0 * angle
        / (PI * ASPECT_RATIO + K0);
    let cd = ZERO_LIFT_DRAG
        + PI * ASPECT_RATIO * K0.powi(2) / E_CORRECTION * angle.powi(2)
            / (PI * ASPECT_RATIO + K0).powi(2);
    let cm = 1.0 / 8.0 / ASPECT_RATIO * PI.powi(2) * cd * ZETA.powi(2) * LAMBDA * bp.powi(2);

    (ct, cd, cm)
}
