use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::control::{ControlCommand, PilotInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Yaw,
    Pitch,
    Roll,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::Yaw, Axis::Pitch, Axis::Roll];

    pub fn binding(self) -> AxisBinding {
        match self {
            Axis::Yaw => AxisBinding {
                axis: Axis::Yaw,
                project: |w| -w.z,
                input: |i| (i.yaw, i.yaw_trim),
                command: |c| &mut c.yaw,
            },
            Axis::Pitch => AxisBinding {
                axis: Axis::Pitch,
                project: |w| -w.x,
                input: |i| (i.pitch, i.pitch_trim),
                command: |c| &mut c.pitch,
            },
            Axis::Roll => AxisBinding {
                axis: Axis::Roll,
                project: |w| -w.y,
                input: |i| (i.roll, i.roll_trim),
                command: |c| &mut c.roll,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Axis::Yaw => "yaw",
            Axis::Pitch => "pitch",
            Axis::Roll => "roll",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything that differs between the yaw, pitch and roll dampers.
///
/// `project` maps body angular velocity to the damped rate, sign convention included.
/// `input` yields `(stick, trim)` for the axis and `command` selects the output slot.
#[derive(Clone, Copy)]
pub struct AxisBinding {
    pub axis: Axis,
    pub project: fn(&Vector3<f64>) -> f64,
    pub input: fn(&PilotInput) -> (f64, f64),
    pub command: fn(&mut ControlCommand) -> &mut f64,
}

impl AxisBinding {
    pub fn measure(&self, angular_velocity: &Vector3<f64>) -> f64 {
        (self.project)(angular_velocity)
    }

    /// Stick resting exactly on trim means the pilot isn't steering this axis.
    pub fn pilot_at_trim(&self, input: &PilotInput) -> bool {
        let (stick, trim) = (self.input)(input);
        stick == trim
    }

    pub fn write(&self, command: &mut ControlCommand, value: f64) {
        *(self.command)(command) = value;
    }
}

impl fmt::Debug for AxisBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxisBinding").field("axis", &self.axis).finish()
    }
}
