//! Error types shared across the core.
//!
//! Sizing failures are recoverable: callers sweeping hardware combinations
//! drop the offending configuration and continue. Out-of-range physical
//! queries are hard contract violations and fail loudly.

use thiserror::Error;

/// Failure of the takeoff-mass fixed-point iteration.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SizingError {
    /// The mass iteration hit its cap without settling.
    #[error("mass iteration did not converge within {iterations} iterations")]
    NonConvergence { iterations: usize },
    /// Hover current demand exceeds the motor rating.
    #[error("hover current {current_a:.1} A exceeds motor limit {limit_a:.1} A")]
    OverCurrent { current_a: f64, limit_a: f64 },
}

/// Contract violations on the fuel-cell polarization curve.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PowerError {
    #[error("current larger than maximum: {current_a} A (max {max_a} A)")]
    AboveMaxCurrent { current_a: f64, max_a: f64 },
    #[error("cannot get voltage from current: {current_a} A")]
    NegativeCurrent { current_a: f64 },
}

/// ESC rating breach.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum EscError {
    #[error("ESC input current {current_a:.1} A exceeds rated maximum {limit_a:.1} A")]
    OverCurrent { current_a: f64, limit_a: f64 },
}

/// Catalog lookup failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("{kind} '{name}' does not exist in the catalog")]
    UnknownComponent { kind: &'static str, name: String },
}
