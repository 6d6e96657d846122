//! Read-only hardware catalog and the fixed payload manifest.
//!
//! The catalog is a plain mapping from component name to its parameter
//! record, built once and passed explicitly to whatever needs a lookup.
//! Factory methods return ordinary immutable components; off-the-shelf
//! and custom hardware behave identically, only the parameters differ.

use crate::config::{EscConfig, MotorConfig, PropellerConfig};
use crate::error::CatalogError;
use crate::{Esc, Motor, Propeller};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub propellers: BTreeMap<String, PropellerConfig>,
    pub motors: BTreeMap<String, MotorConfig>,
    pub escs: BTreeMap<String, EscConfig>,
}

impl Catalog {
    /// Parse a catalog from its JSON representation.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// A small built-in catalog of bench-characterized components.
    pub fn builtin() -> Self {
        let mut catalog = Self::default();

        for (name, diameter_m, pitch_m, blades, mass_kg) in [
            ("T-Motor P18x61", 0.4572, 0.1549, 2, 0.073),
            ("T-Motor NS 24x72", 0.6096, 0.1829, 2, 0.039),
            ("T-Motor NS 26x85", 0.6604, 0.2159, 2, 0.048),
            ("T-Motor NS 28x92", 0.7112, 0.2337, 2, 0.058),
        ] {
            catalog.propellers.insert(
                name.to_string(),
                PropellerConfig {
                    diameter_m,
                    pitch_m,
                    blades,
                    mass_kg,
                },
            );
        }

        for (name, kv, no_load_voltage, no_load_current, resistance, max_current, mass_kg) in [
            ("T-Motor Antigravity MN5008 KV340", 340.0, 24.0, 0.9, 0.106, 28.0, 0.128),
            ("T-Motor Antigravity MN6007II KV160", 160.0, 18.0, 0.5, 0.178, 23.7, 0.18),
            ("T-Motor Antigravity MN6007II KV320", 320.0, 18.0, 0.9, 0.045, 45.0, 0.18),
        ] {
            catalog.motors.insert(
                name.to_string(),
                MotorConfig {
                    kv,
                    no_load_voltage,
                    no_load_current,
                    resistance,
                    max_current,
                    mass_kg,
                },
            );
        }

        for (name, max_current, cont_current, mass_kg) in [
            ("T-Motor FLAME 60A", 80.0, 60.0, 0.0735),
            ("T-Motor FLAME 80A", 100.0, 80.0, 0.0995),
        ] {
            catalog.escs.insert(
                name.to_string(),
                EscConfig {
                    max_current,
                    cont_current,
                    mass_kg,
                },
            );
        }

        catalog
    }

    pub fn propeller(&self, name: &str) -> Result<Propeller, CatalogError> {
        self.propellers
            .get(name)
            .map(PropellerConfig::build)
            .ok_or_else(|| CatalogError::UnknownComponent {
                kind: "propeller",
                name: name.to_string(),
            })
    }

    pub fn motor(&self, name: &str) -> Result<Motor, CatalogError> {
        self.motors
            .get(name)
            .map(MotorConfig::build)
            .ok_or_else(|| CatalogError::UnknownComponent {
                kind: "motor",
                name: name.to_string(),
            })
    }

    pub fn esc(&self, name: &str) -> Result<Esc, CatalogError> {
        self.escs
            .get(name)
            .map(EscConfig::build)
            .ok_or_else(|| CatalogError::UnknownComponent {
                kind: "esc",
                name: name.to_string(),
            })
    }
}

/// One fixed airframe item: avionics, payload or structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadItem {
    pub name: String,
    pub mass_kg: f64,
    pub power_w: f64,
}

/// The fixed (non-propulsion, non-fuel) part of the airframe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payload {
    pub items: Vec<PayloadItem>,
}

impl Payload {
    pub fn new(items: Vec<PayloadItem>) -> Self {
        Self { items }
    }

    /// Summed fixed mass, kg.
    pub fn mass_kg(&self) -> f64 {
        self.items.iter().map(|item| item.mass_kg).sum()
    }

    /// Summed continuous power draw, W.
    pub fn power_w(&self) -> f64 {
        self.items.iter().map(|item| item.power_w).sum()
    }
}

impl Default for Payload {
    /// Inspection payload manifest of the reference airframe.
    fn default() -> Self {
        let items = [
            ("A-2000 fuel cell", 3.0, 0.0),
            ("Fuel cell brackets", 0.080, 0.0),
            ("H2 pressure regulator", 0.200, 0.0),
            ("XLSemi XL4015 DC converter", 0.020, 0.0),
            ("Voltaplex LiPo backup battery", 0.470, 0.0),
            ("Battery enclosing", 0.100, 0.0),
            ("Livox Mid-360 LIDAR", 0.265, 6.5),
            ("BMP390 barometer", 0.0, 11.52e-6),
            ("MicroStrain 3DM-CV7 IMU", 0.0083, 0.28),
            ("NUCLEO-H7A3ZI-Q flight computer", 0.117, 2.232),
            ("HGLRC M100 MINI GPS (x2)", 0.0054, 0.4),
            ("SIYI FM30 transmitter", 0.036, 0.7),
            ("SIYI FR Mini receiver", 0.015, 0.7),
            ("MotionCam-3D 3D scanner", 1.150, 60.0),
            ("DJI Zenmuse H20T camera", 0.828, 27.0),
            ("Cabling", 0.0493, 0.0),
            ("Chassis", 1.5, 10.0),
        ];
        Self {
            items: items
                .into_iter()
                .map(|(name, mass_kg, power_w)| PayloadItem {
                    name: name.to_string(),
                    mass_kg,
                    power_w,
                })
                .collect(),
        }
    }
}
