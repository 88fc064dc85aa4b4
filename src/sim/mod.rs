pub mod disturbances;
pub mod pilot;
pub mod simulator;

pub use disturbances::DisturbanceModel;
pub use pilot::{PilotAction, PilotScript, PilotSegment};
pub use simulator::{RunSummary, Simulator, TickTelemetry};
