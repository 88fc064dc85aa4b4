use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Pilot stick state for one tick. Axis values and trims are in `[-1, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PilotInput {
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
    pub yaw_trim: f64,
    pub pitch_trim: f64,
    pub roll_trim: f64,
    /// Stability assist is holding rotation this tick.
    pub kill_rot: bool,
}

impl PilotInput {
    pub fn neutral() -> Self {
        Self::default()
    }

    pub fn trimmed(yaw_trim: f64, pitch_trim: f64, roll_trim: f64) -> Self {
        Self {
            yaw: yaw_trim,
            pitch: pitch_trim,
            roll: roll_trim,
            yaw_trim,
            pitch_trim,
            roll_trim,
            kill_rot: false,
        }
    }
}

/// Vehicle state the host hands to the autopilot each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleStatus {
    pub landed: bool,
    /// Body-frame angular velocity, rad/s.
    pub angular_velocity: Vector3<f64>,
}

impl VehicleStatus {
    pub fn new(angular_velocity: Vector3<f64>, landed: bool) -> Self {
        Self {
            landed,
            angular_velocity,
        }
    }

    pub fn airborne(angular_velocity: Vector3<f64>) -> Self {
        Self::new(angular_velocity, false)
    }
}

impl Default for VehicleStatus {
    fn default() -> Self {
        Self::airborne(Vector3::zeros())
    }
}

/// Outgoing attitude command, one value per axis in `[-1, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlCommand {
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
}

impl ControlCommand {
    /// Command that passes the pilot's stick straight through.
    pub fn from_input(input: &PilotInput) -> Self {
        Self {
            yaw: input.yaw,
            pitch: input.pitch,
            roll: input.roll,
        }
    }
}
