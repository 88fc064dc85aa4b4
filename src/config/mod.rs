pub mod damper;
pub mod simulation;

pub use damper::{DamperConfig, PidGains};
pub use simulation::SimulationConfig;
