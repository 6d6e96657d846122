pub mod catalog;
pub mod combinator;
pub mod config;
pub mod drone;
pub mod error;
pub mod esc;
pub mod motor;
pub mod power;
pub mod propeller;
pub mod routing;

pub use catalog::{Catalog, Payload, PayloadItem};
pub use combinator::{sensitivity_sweep, DroneCandidate, DroneCombinator, SensitivityPoint};
pub use config::{EscConfig, MissionConfig, MotorConfig, PropellerConfig, SizingConfig};
pub use drone::{Drone, PerformanceRow, RouteCostConfig, GRAVITY};
pub use error::{CatalogError, EscError, PowerError, SizingError};
pub use esc::Esc;
pub use motor::Motor;
pub use power::{FuelCell, HydrogenTank, HYDROGEN_SPECIFIC_ENERGY};
pub use propeller::Propeller;
pub use routing::{
    GreedyRouter, MultiStartRouter, Point, RouteCosts, RoutePlan, RoutePlanner, RouterConfig, Trip,
};
