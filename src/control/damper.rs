use serde::{Deserialize, Serialize};

use crate::config::{DamperConfig, PidGains};
use crate::control::pid::clamp_symmetric;
use crate::control::{AxisBinding, ControlCommand, PidController, PilotInput, VehicleStatus};
use crate::error::DamperError;
use crate::inspector::{expect_scalar, FieldId, FieldInfo, Format, Inspectable, ObjectId, Value};

/// Symmetric authority limit of the command written to the vehicle.
pub const COMMAND_LIMIT: f64 = 1.0;

/// Who owned the axis on the last tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arbitration {
    /// Stability assist held rotation; the damper's output was discarded.
    Suppressed,
    /// Pilot at trim; the clamped output was written.
    Applied,
    /// Pilot steering; the controller was reset and nothing written.
    PilotOverride,
}

/// Angular-rate damper for a single axis.
///
/// Drives the axis rate toward zero while the pilot leaves the stick on trim, backs off
/// when stability assist is active, and starts over whenever the pilot takes the axis or
/// the vehicle sits on the ground.
#[derive(Debug, Clone)]
pub struct AngularRateDamper {
    name: String,
    id: ObjectId,
    binding: AxisBinding,
    pid: PidController,
    time: f64,
    angular_velocity: f64,
    output: f64,
    last_decision: Option<Arbitration>,
    landed_reset: bool,
}

impl AngularRateDamper {
    pub fn new(config: &DamperConfig, id: ObjectId) -> Self {
        Self::with_binding(config.name.clone(), config.axis.binding(), &config.gains, id)
    }

    pub fn with_binding(
        name: impl Into<String>,
        binding: AxisBinding,
        gains: &PidGains,
        id: ObjectId,
    ) -> Self {
        Self {
            name: name.into(),
            id,
            binding,
            pid: PidController::from_gains(gains),
            time: 0.0,
            angular_velocity: 0.0,
            output: 0.0,
            last_decision: None,
            landed_reset: false,
        }
    }

    /// Runs one simulation tick and returns which authority owned the axis.
    ///
    /// The controller always advances; `command` is only touched when the decision is
    /// [`Arbitration::Applied`].
    pub fn tick(
        &mut self,
        status: &VehicleStatus,
        input: &PilotInput,
        command: &mut ControlCommand,
        dt: f64,
    ) -> Arbitration {
        self.angular_velocity = self.binding.measure(&status.angular_velocity);
        self.time += dt;
        self.output = self.pid.control(self.angular_velocity, 0.0, self.time);

        let decision = if input.kill_rot {
            Arbitration::Suppressed
        } else if self.binding.pilot_at_trim(input) {
            self.binding.write(command, clamp_symmetric(self.output, COMMAND_LIMIT));
            Arbitration::Applied
        } else {
            self.pid.reset();
            Arbitration::PilotOverride
        };

        if self.last_decision != Some(decision) {
            log::debug!("{}: {:?} -> {:?}", self.name, self.last_decision, decision);
        }
        self.last_decision = Some(decision);

        self.landed_reset = status.landed;
        if status.landed {
            log::trace!("{}: landed, resetting controller", self.name);
            self.pid.reset();
        }

        decision
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn binding(&self) -> &AxisBinding {
        &self.binding
    }

    pub fn pid(&self) -> &PidController {
        &self.pid
    }

    pub fn pid_mut(&mut self) -> &mut PidController {
        &mut self.pid
    }

    /// Autopilot-local clock, advanced by `dt` every tick.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    /// Raw controller output of the last tick, before the authority clamp.
    pub fn output(&self) -> f64 {
        self.output
    }

    pub fn last_decision(&self) -> Option<Arbitration> {
        self.last_decision
    }

    pub fn landed_reset(&self) -> bool {
        self.landed_reset
    }
}

impl Inspectable for AngularRateDamper {
    fn object_id(&self) -> ObjectId {
        self.id
    }

    fn fields(&self) -> Vec<FieldInfo> {
        vec![
            FieldInfo::editable("kp", "Kp"),
            FieldInfo::editable("ki", "Ki"),
            FieldInfo::editable("kd", "Kd"),
            FieldInfo::editable("integral_clamp", "Integral clamp"),
            FieldInfo::read_only("angular_velocity", "Angular velocity")
                .with_format(Format::Fixed(4)),
            FieldInfo::read_only("output", "Output").with_format(Format::Fixed(4)),
            FieldInfo::read_only("integral", "Integral").with_format(Format::Scientific(3)),
        ]
    }

    fn get(&self, field: FieldId) -> Option<Value> {
        let value = match field {
            "kp" => self.pid.kp,
            "ki" => self.pid.ki,
            "kd" => self.pid.kd,
            "integral_clamp" => self.pid.integral_clamp,
            "angular_velocity" => self.angular_velocity,
            "output" => self.output,
            "integral" => self.pid.integral(),
            _ => return None,
        };
        Some(Value::Scalar(value))
    }

    fn set(&mut self, field: FieldId, value: Value) -> Result<(), DamperError> {
        let slot = match field {
            "kp" => &mut self.pid.kp,
            "ki" => &mut self.pid.ki,
            "kd" => &mut self.pid.kd,
            "integral_clamp" => &mut self.pid.integral_clamp,
            "angular_velocity" | "output" | "integral" => {
                return Err(DamperError::ReadOnly(field.to_string()))
            }
            _ => return Err(DamperError::UnknownField(field.to_string())),
        };
        *slot = expect_scalar(field, &value)?;
        Ok(())
    }
}
