//! h2scout CLI - command line tools for the sizing and routing study.
//!
//! This crate provides the study binaries:
//! - size_drone: size one configuration and print its performance report
//! - sweep_catalog: enumerate catalog hardware combinations
//! - plan_routes: plan energy-bounded inspection trips over a target file

pub mod io;

/// Initialize tracing for a binary. `RUST_LOG` overrides the default
/// info-level filter.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();
}
