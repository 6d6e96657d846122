//! Aircraft performance solver.
//!
//! Couples the propeller, motor, ESC and hydrogen-storage models into a
//! damped fixed-point iteration on takeoff mass, then answers pure queries
//! (endurance, rpm-swept performance, cruise speed, route cost scalars)
//! about the converged state.

use crate::catalog::Payload;
use crate::config::{MissionConfig, SizingConfig};
use crate::error::{PowerError, SizingError};
use crate::power::{FuelCell, HydrogenTank};
use crate::propeller::AIR_DENSITY;
use crate::routing::RouteCosts;
use crate::{Esc, Motor, Propeller};
use serde::{Deserialize, Serialize};

pub const GRAVITY: f64 = 9.80665;

/// Momentum/induced-flow efficiency of the rotor disk arrangement.
const FLOW_EFFICIENCY: f64 = 1.8;
/// Wiring, conversion and control losses on top of the motor draw.
const SYSTEM_LOSS_FACTOR: f64 = 1.2;
/// Convergence tolerance on the mass iteration, kg.
const MASS_TOLERANCE_KG: f64 = 0.001;
const MAX_ITERATIONS: usize = 1000;

/// Frontal area used by the cruise drag model, m^2.
const FRONTAL_AREA_M2: f64 = 209_500e-6;
const CD_PITCH: f64 = 1.0;
const CD_FLAT: f64 = 1.0;

/// A sized aircraft. Only the solver constructs these; a configuration
/// that fails to converge or overdraws its motor never becomes a `Drone`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drone {
    pub mission: SizingConfig,
    pub propeller: Propeller,
    pub motor: Motor,
    pub esc: Esc,
    pub payload: Payload,
    /// Converged takeoff mass, kg
    pub mass_kg: f64,
    /// Rotor speed at the hover operating point, rpm
    pub hover_rpm: f64,
    /// Total electrical power at the hover operating point, W
    pub hover_power_w: f64,
    /// Hydrogen subsystem sized for the mission energy
    pub tank: HydrogenTank,
    /// Motor current at the thrust-to-weight point over its rating;
    /// > 1 marks the configuration electrically infeasible.
    pub current_ratio: f64,
}

/// One steady operating point of the full power train.
#[derive(Debug, Clone, Copy)]
struct OperatingPoint {
    rpm: f64,
    current_a: f64,
    /// Motors plus losses plus payload draw, W
    total_power_w: f64,
}

/// One row of the diagnostic rpm sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceRow {
    pub rpm: f64,
    pub thrust_n: f64,
    pub torque_nm: f64,
    pub current_a: f64,
    pub voltage_v: f64,
    pub power_w: f64,
    pub throttle: f64,
    /// ESC bus-side current; None when the point exceeds the ESC rating.
    pub esc_current_a: Option<f64>,
    /// Hover figure of merit, grams of thrust per electrical watt
    pub efficiency_g_per_w: f64,
}

/// Parameters for deriving the routing cost scalars from a sized drone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RouteCostConfig {
    /// Cruise pitch angle, degrees
    pub cruise_pitch_deg: f64,
    /// Time spent at each inspection stop, minutes
    pub inspection_minutes: f64,
    /// Fraction of stored energy available for route planning
    pub safety_margin: f64,
}

impl Default for RouteCostConfig {
    fn default() -> Self {
        Self {
            cruise_pitch_deg: 40.0,
            inspection_minutes: 30.0,
            safety_margin: 0.9,
        }
    }
}

impl Drone {
    /// Size an aircraft from explicit components and a mission config.
    pub fn size(
        mission: SizingConfig,
        propeller: Propeller,
        motor: Motor,
        esc: Esc,
        payload: Payload,
    ) -> Result<Self, SizingError> {
        let motor_count = mission.motor_count as f64;
        let fixed_mass = payload.mass_kg();
        let propulsion_mass = motor_count * (propeller.mass_kg + motor.mass_kg + esc.mass_kg);

        let mut mass = fixed_mass + propulsion_mass;
        let mut converged = None;

        for _ in 0..MAX_ITERATIONS {
            // One visible mass_i -> mass_{i+1} transition: every intermediate
            // quantity is local to the step.
            let point = operating_point(&mission, &propeller, &motor, &payload, mass, mission.tw_ratio);
            let energy_wh = point.total_power_w * mission.flight_hours;
            let tank = HydrogenTank::from_energy(energy_wh);
            let next_mass = fixed_mass + propulsion_mass + tank.total_mass();

            let settled = (next_mass - mass).abs() < MASS_TOLERANCE_KG;
            mass = next_mass;
            if settled {
                converged = Some((point, tank));
                break;
            }
        }

        let Some((hover, tank)) = converged else {
            return Err(SizingError::NonConvergence {
                iterations: MAX_ITERATIONS,
            });
        };

        if hover.current_a > motor.max_current {
            return Err(SizingError::OverCurrent {
                current_a: hover.current_a,
                limit_a: motor.max_current,
            });
        }

        // Current margin at the max-thrust condition, with no induced-flow
        // credit. A ratio above one is a flag, not an error: sweeps filter.
        let tw_thrust = mass * GRAVITY * mission.tw_ratio / motor_count;
        let tw_rpm = propeller.required_rpm(tw_thrust);
        let (_, tw_torque) = propeller.forces(tw_rpm);
        let (tw_current, _) = motor.current_voltage(tw_torque, tw_rpm);

        Ok(Self {
            mission,
            current_ratio: tw_current / motor.max_current,
            mass_kg: mass,
            hover_rpm: hover.rpm,
            hover_power_w: hover.total_power_w,
            tank,
            propeller,
            motor,
            esc,
            payload,
        })
    }

    /// Size an aircraft from a configuration snapshot.
    pub fn from_config(config: &MissionConfig, payload: Payload) -> Result<Self, SizingError> {
        Self::size(
            config.mission,
            config.propeller.build(),
            config.motor.build(),
            config.esc.build(),
            payload,
        )
    }

    /// Whether the motor stays inside its rating at the max-thrust point.
    pub fn electrically_feasible(&self) -> bool {
        self.current_ratio <= 1.0
    }

    /// Energy on board, Wh.
    pub fn stored_energy_wh(&self) -> f64 {
        self.tank.stored_energy_wh()
    }

    /// Endurance (hours) at an average thrust-to-weight multiplier.
    ///
    /// At the mission thrust-to-weight ratio this recovers the mission
    /// flight time; lower multipliers trace the cruise/loiter curve.
    pub fn endurance_hours(&self, tw_multiplier: f64) -> f64 {
        let point = operating_point(
            &self.mission,
            &self.propeller,
            &self.motor,
            &self.payload,
            self.mass_kg,
            tw_multiplier,
        );
        self.stored_energy_wh() / point.total_power_w
    }

    /// Diagnostic sweep of the power train over a rotor-speed range.
    pub fn performance_table(
        &self,
        rpm_start: f64,
        rpm_end: f64,
        rpm_step: f64,
    ) -> Result<Vec<PerformanceRow>, PowerError> {
        let fuel_cell = FuelCell::default();
        let motor_count = self.mission.motor_count as f64;
        let mut rows = Vec::new();

        let mut rpm = rpm_start;
        while rpm <= rpm_end + 1e-9 {
            let (thrust, torque) = self.propeller.forces(rpm);
            let (current, voltage) = self.motor.current_voltage(torque, rpm);
            let power = current * voltage;
            let total_power = power * motor_count * SYSTEM_LOSS_FACTOR + self.payload.power_w();

            let (_, bus_voltage) = fuel_cell.current_voltage(total_power)?;
            let throttle = self.esc.throttle(voltage, current, bus_voltage);
            let esc_current = self.esc.input_current(voltage, current, bus_voltage).ok();

            rows.push(PerformanceRow {
                rpm,
                thrust_n: thrust,
                torque_nm: torque,
                current_a: current,
                voltage_v: voltage,
                power_w: power,
                throttle,
                esc_current_a: esc_current,
                efficiency_g_per_w: thrust / GRAVITY * 1000.0 / power,
            });
            rpm += rpm_step;
        }
        Ok(rows)
    }

    /// Steepest pitch the thrust margin supports, degrees.
    pub fn max_pitch_deg(&self) -> f64 {
        (1.0 / self.mission.tw_ratio).acos().to_degrees()
    }

    /// Body drag coefficient as a function of pitch angle.
    pub fn drag_coefficient(&self, pitch_deg: f64) -> f64 {
        let pitch = pitch_deg.to_radians();
        CD_PITCH * (1.0 - pitch.sin().powi(3)) + CD_FLAT * (1.0 - pitch.cos().powi(3))
    }

    /// Steady horizontal speed at a pitch angle, m/s.
    pub fn cruise_speed(&self, pitch_deg: f64) -> f64 {
        let pitch = pitch_deg.to_radians();
        let drag = self.drag_coefficient(pitch_deg);
        (2.0 * self.mass_kg * GRAVITY * pitch.tan() / (AIR_DENSITY * FRONTAL_AREA_M2 * drag))
            .sqrt()
    }

    /// Total electrical power in tilted cruise at a pitch angle, W.
    pub fn cruise_power_w(&self, pitch_deg: f64) -> f64 {
        // Thrust must carry the weight at 1/cos(pitch) load factor.
        let load_factor = 1.0 / pitch_deg.to_radians().cos();
        operating_point(
            &self.mission,
            &self.propeller,
            &self.motor,
            &self.payload,
            self.mass_kg,
            load_factor,
        )
        .total_power_w
    }

    /// The scalar cost figures the routing engine consumes.
    pub fn route_costs(&self, config: &RouteCostConfig) -> RouteCosts {
        let speed = self.cruise_speed(config.cruise_pitch_deg);
        let cruise_power = self.cruise_power_w(config.cruise_pitch_deg);
        let inspection_hr = config.inspection_minutes / 60.0;

        RouteCosts {
            energy_per_m_wh: cruise_power / speed / 3600.0,
            stop_energy_wh: self.hover_power_w * inspection_hr,
            usable_energy_wh: self.stored_energy_wh() * config.safety_margin,
            cruise_speed_mps: speed,
            inspection_hr,
        }
    }
}

/// Evaluate the power train at a thrust-to-weight multiplier for a trial
/// mass. Pure: the solver loop and all post-convergence queries share it.
fn operating_point(
    mission: &SizingConfig,
    propeller: &Propeller,
    motor: &Motor,
    payload: &Payload,
    mass_kg: f64,
    tw_multiplier: f64,
) -> OperatingPoint {
    let motor_count = mission.motor_count as f64;
    let thrust_per_motor = mass_kg * GRAVITY * tw_multiplier / (motor_count * FLOW_EFFICIENCY);

    let rpm = propeller.required_rpm(thrust_per_motor);
    let (_, torque_nm) = propeller.forces(rpm);
    let (current_a, voltage_v) = motor.current_voltage(torque_nm, rpm);
    let total_power_w =
        current_a * voltage_v * motor_count * SYSTEM_LOSS_FACTOR + payload.power_w();

    OperatingPoint {
        rpm,
        current_a,
        total_power_w,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PayloadItem;
    use approx::assert_relative_eq;

    /// Mass budget of the reference study airframe, zero continuous draw.
    pub(crate) fn fixture_payload() -> Payload {
        let items = [
            ("Payload", 0.64),
            ("3D modelling system", 1.2),
            ("Positioning system", 0.4),
            ("Data handling", 0.02),
            ("Radio system", 0.05),
            ("Electrical", 0.1),
            ("Fuel cell", 3.0),
            ("Pressure regulator", 0.305),
            ("Chassis", 0.5),
        ];
        Payload::new(
            items
                .into_iter()
                .map(|(name, mass_kg)| PayloadItem {
                    name: name.to_string(),
                    mass_kg,
                    power_w: 0.0,
                })
                .collect(),
        )
    }

    pub(crate) fn fixture_config() -> MissionConfig {
        let mut config = MissionConfig::default();
        config.mission = SizingConfig {
            flight_hours: 1.0,
            motor_count: 4,
            tw_ratio: 2.0,
        };
        config.propeller = crate::config::PropellerConfig {
            diameter_m: 0.5,
            pitch_m: 0.1,
            blades: 2,
            mass_kg: 0.1,
        };
        config.motor = crate::config::MotorConfig {
            kv: 100.0,
            no_load_voltage: 20.0,
            no_load_current: 0.7,
            resistance: 0.2,
            max_current: 24.0,
            mass_kg: 0.175,
        };
        config
    }

    fn fixture_drone() -> Drone {
        Drone::from_config(&fixture_config(), fixture_payload()).unwrap()
    }

    #[test]
    fn reference_airframe_converges_near_expected_mass() {
        let drone = fixture_drone();
        assert_relative_eq!(drone.mass_kg, 9.6, max_relative = 0.10);
        assert!(drone.electrically_feasible(), "ratio {}", drone.current_ratio);
    }

    #[test]
    fn sizing_is_idempotent_at_the_fixed_point() {
        let drone = fixture_drone();

        // One more solver step seeded at the converged mass stays put.
        let point = operating_point(
            &drone.mission,
            &drone.propeller,
            &drone.motor,
            &drone.payload,
            drone.mass_kg,
            drone.mission.tw_ratio,
        );
        let tank =
            HydrogenTank::from_energy(point.total_power_w * drone.mission.flight_hours);
        let motor_count = drone.mission.motor_count as f64;
        let next_mass = drone.payload.mass_kg()
            + motor_count
                * (drone.propeller.mass_kg + drone.motor.mass_kg + drone.esc.mass_kg)
            + tank.total_mass();
        assert_relative_eq!(next_mass, drone.mass_kg, epsilon = MASS_TOLERANCE_KG);

        // And a full re-run lands on the same mass.
        let second = Drone::from_config(&fixture_config(), fixture_payload()).unwrap();
        assert_relative_eq!(drone.mass_kg, second.mass_kg, epsilon = MASS_TOLERANCE_KG);
    }

    #[test]
    fn hover_rpm_monotonic_in_motor_count_and_tw_ratio() {
        let base = fixture_drone();

        let mut more_motors = fixture_config();
        more_motors.mission.motor_count = 6;
        let six = Drone::from_config(&more_motors, fixture_payload()).unwrap();
        assert!(six.hover_rpm <= base.hover_rpm);

        let mut relaxed = fixture_config();
        relaxed.mission.tw_ratio = 1.5;
        let low_tw = Drone::from_config(&relaxed, fixture_payload()).unwrap();
        assert!(low_tw.hover_rpm <= base.hover_rpm);
    }

    #[test]
    fn endurance_at_mission_point_recovers_flight_time() {
        let drone = fixture_drone();
        assert_relative_eq!(
            drone.endurance_hours(drone.mission.tw_ratio),
            drone.mission.flight_hours,
            max_relative = 0.01
        );
        // Lighter loading extends endurance.
        assert!(drone.endurance_hours(1.2) > drone.mission.flight_hours);
    }

    #[test]
    fn undersized_motor_is_rejected_not_crashed() {
        let mut config = fixture_config();
        config.motor.max_current = 5.0;
        let result = Drone::from_config(&config, fixture_payload());
        assert!(matches!(result, Err(SizingError::OverCurrent { .. })));
    }

    #[test]
    fn performance_table_covers_sweep_and_stays_finite() {
        let drone = fixture_drone();
        let rows = drone.performance_table(1000.0, 6000.0, 500.0).unwrap();
        assert_eq!(rows.len(), 11);
        for row in &rows {
            assert!(row.thrust_n >= 0.0);
            assert!(row.power_w > 0.0);
            assert!(row.throttle.is_finite());
        }
        // Thrust grows monotonically with rpm.
        assert!(rows.windows(2).all(|w| w[1].thrust_n > w[0].thrust_n));
    }

    #[test]
    fn cruise_speed_grows_with_pitch() {
        let drone = fixture_drone();
        assert!(drone.cruise_speed(30.0) > drone.cruise_speed(15.0));
        assert_relative_eq!(drone.max_pitch_deg(), 60.0, max_relative = 1e-9);
    }

    #[test]
    fn route_costs_are_positive_and_bounded_by_storage() {
        let drone = fixture_drone();
        let costs = drone.route_costs(&RouteCostConfig::default());
        assert!(costs.energy_per_m_wh > 0.0);
        assert!(costs.stop_energy_wh > 0.0);
        assert!(costs.cruise_speed_mps > 0.0);
        assert!(costs.usable_energy_wh < drone.stored_energy_wh());
    }
}
