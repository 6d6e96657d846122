//! Enumerate catalog propeller/motor combinations for a mission profile.

use clap::Parser;
use h2scout_cli::io;
use h2scout_core::{DroneCombinator, Payload};
use std::path::PathBuf;

/// Sweep catalog hardware combinations and rank them by takeoff mass
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Mission config JSON (defaults to the built-in reference mission)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Hardware catalog JSON (defaults to the built-in catalog)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// ESC shared by every combination
    #[arg(long, default_value = "T-Motor FLAME 60A")]
    esc: String,

    /// Show at most this many candidates
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// Drop candidates heavier than this, kg
    #[arg(long, default_value_t = 25.0)]
    max_mass: f64,
}

fn main() -> anyhow::Result<()> {
    h2scout_cli::init_tracing();
    let args = Args::parse();

    let config = io::load_mission_config(args.config.as_deref())?;
    let catalog = io::load_catalog(args.catalog.as_deref())?;

    let combinator =
        DroneCombinator::sweep(&catalog, config.mission, &args.esc, &Payload::default())?;

    let selected = combinator.top(args.top, args.max_mass);
    if selected.is_empty() {
        println!(
            "no feasible combination under {:.1} kg ({} sized candidates total)",
            args.max_mass,
            combinator.candidates().len()
        );
        return Ok(());
    }

    println!("  # | {:20} | {:34} | mass [kg] |    rpm | I ratio", "propeller", "motor");
    for (idx, candidate) in selected.iter().enumerate() {
        println!(
            "{idx:3} | {:20} | {:34} | {:9.2} | {:6.0} | {:7.2}",
            candidate.propeller_name,
            candidate.motor_name,
            candidate.drone.mass_kg,
            candidate.drone.hover_rpm,
            candidate.drone.current_ratio,
        );
    }

    Ok(())
}
