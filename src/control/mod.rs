pub mod autopilot;
pub mod axis;
pub mod damper;
pub mod flight_ctrl;
pub mod pid;

pub use autopilot::{AutoPilot, TickReport};
pub use axis::{Axis, AxisBinding};
pub use damper::{AngularRateDamper, Arbitration, COMMAND_LIMIT};
pub use flight_ctrl::{ControlCommand, PilotInput, VehicleStatus};
pub use pid::PidController;
