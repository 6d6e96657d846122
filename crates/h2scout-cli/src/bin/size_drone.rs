//! Size one hardware configuration and print its performance report.

use clap::Parser;
use h2scout_cli::io;
use h2scout_core::{sensitivity_sweep, Drone, Payload, RouteCostConfig};
use std::path::PathBuf;

/// Size a hydrogen multirotor for a mission profile
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Mission config JSON (defaults to the built-in reference mission)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the rpm performance sweep
    #[arg(long, default_value_t = false)]
    table: bool,

    /// Print the endurance curve over thrust-to-weight multipliers
    #[arg(long, default_value_t = false)]
    endurance: bool,

    /// Print the takeoff-mass sensitivity to each sizing parameter
    #[arg(long, default_value_t = false)]
    sensitivity: bool,
}

fn main() -> anyhow::Result<()> {
    h2scout_cli::init_tracing();
    let args = Args::parse();

    let config = io::load_mission_config(args.config.as_deref())?;
    let drone = match Drone::from_config(&config, Payload::default()) {
        Ok(drone) => drone,
        Err(reason) => anyhow::bail!("configuration is infeasible: {reason}"),
    };

    println!("Takeoff mass    {:8.2} kg", drone.mass_kg);
    println!("Hover rpm       {:8.0}", drone.hover_rpm);
    println!("Hover power     {:8.0} W", drone.hover_power_w);
    println!(
        "Stored energy   {:8.0} Wh ({:.3} kg H2 + {:.3} kg tank)",
        drone.stored_energy_wh(),
        drone.tank.h2_kg,
        drone.tank.tank_mass()
    );
    println!("Current margin  {:8.2}", drone.current_ratio);
    if !drone.electrically_feasible() {
        println!("warning: motor exceeds its rating at the max-thrust point");
    }

    if args.endurance {
        let costs = drone.route_costs(&RouteCostConfig::default());
        println!("\nCruise speed {:.1} m/s, {:.4} Wh/m", costs.cruise_speed_mps, costs.energy_per_m_wh);
        println!("TW multiplier | endurance [h]");
        let mut multiplier = 1.1;
        while multiplier <= drone.mission.tw_ratio + 1e-9 {
            println!("{multiplier:13.1} | {:.2}", drone.endurance_hours(multiplier));
            multiplier += 0.1;
        }
    }

    if args.sensitivity {
        println!("\nparameter             | offset [%] | mass delta [%]");
        for point in sensitivity_sweep(&drone, &config) {
            println!(
                "{:21} | {:10.0} | {:+.2}",
                point.parameter, point.offset_pct, point.mass_delta_pct
            );
        }
    }

    if args.table {
        let step = (drone.hover_rpm / 10.0).round();
        let rows = drone.performance_table(step * 5.0, step * 15.0, step)?;
        println!("\n   rpm | thrust [N] | torque [Nm] |  I [A] |  U [V] |  P [W] | throttle | g/W");
        for row in rows {
            println!(
                "{:6.0} | {:10.2} | {:11.3} | {:6.2} | {:6.2} | {:6.0} | {:8.2} | {:.2}",
                row.rpm,
                row.thrust_n,
                row.torque_nm,
                row.current_a,
                row.voltage_v,
                row.power_w,
                row.throttle,
                row.efficiency_g_per_w,
            );
        }
    }

    Ok(())
}
