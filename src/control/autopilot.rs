use serde::Serialize;

use crate::config::DamperConfig;
use crate::control::{
    AngularRateDamper, Arbitration, Axis, ControlCommand, PilotInput, VehicleStatus,
};
use crate::error::DamperError;
use crate::inspector::{expect_toggle, FieldId, FieldInfo, Format, Inspectable, ObjectId, Value};

/// Per-axis outcome of one autopilot tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TickReport {
    pub yaw: Option<Arbitration>,
    pub pitch: Option<Arbitration>,
    pub roll: Option<Arbitration>,
}

impl TickReport {
    pub fn get(&self, axis: Axis) -> Option<Arbitration> {
        match axis {
            Axis::Yaw => self.yaw,
            Axis::Pitch => self.pitch,
            Axis::Roll => self.roll,
        }
    }

    fn set(&mut self, axis: Axis, decision: Arbitration) {
        match axis {
            Axis::Yaw => self.yaw = Some(decision),
            Axis::Pitch => self.pitch = Some(decision),
            Axis::Roll => self.roll = Some(decision),
        }
    }
}

/// Set of rate dampers attached to one vehicle.
///
/// Each axis holds at most one damper. Attaching creates it with fresh controller
/// state and detaching drops it, so nothing carries over between sessions.
#[derive(Debug, Default)]
pub struct AutoPilot {
    dampers: [Option<AngularRateDamper>; 3],
    attachments: u64,
    last_report: TickReport,
}

fn slot(axis: Axis) -> usize {
    match axis {
        Axis::Yaw => 0,
        Axis::Pitch => 1,
        Axis::Roll => 2,
    }
}

impl AutoPilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Autopilot with the default damper on every axis.
    pub fn all_axes() -> Self {
        let mut autopilot = Self::new();
        for axis in Axis::ALL {
            autopilot.attach(DamperConfig::for_axis(axis));
        }
        autopilot
    }

    pub fn attach(&mut self, config: DamperConfig) -> ObjectId {
        self.attachments += 1;
        let id = ObjectId::new(config.window_id, self.attachments);
        log::info!("{} attached ({:?} axis, {})", config.name, config.axis, id);
        self.dampers[slot(config.axis)] = Some(AngularRateDamper::new(&config, id));
        id
    }

    pub fn detach(&mut self, axis: Axis) -> Option<AngularRateDamper> {
        let damper = self.dampers[slot(axis)].take();
        if let Some(damper) = &damper {
            log::info!("{} detached", damper.name());
        }
        damper
    }

    /// Attaches the default damper if the axis is free, otherwise detaches it.
    /// Returns whether the axis is damped afterwards.
    pub fn toggle(&mut self, axis: Axis) -> bool {
        if self.is_active(axis) {
            self.detach(axis);
            false
        } else {
            self.attach(DamperConfig::for_axis(axis));
            true
        }
    }

    pub fn is_active(&self, axis: Axis) -> bool {
        self.dampers[slot(axis)].is_some()
    }

    pub fn damper(&self, axis: Axis) -> Option<&AngularRateDamper> {
        self.dampers[slot(axis)].as_ref()
    }

    pub fn damper_mut(&mut self, axis: Axis) -> Option<&mut AngularRateDamper> {
        self.dampers[slot(axis)].as_mut()
    }

    pub fn dampers(&self) -> impl Iterator<Item = &AngularRateDamper> {
        self.dampers.iter().flatten()
    }

    /// Runs every attached damper once, yaw then pitch then roll.
    ///
    /// The command starts as the pilot's stick, so free axes pass it through.
    pub fn tick(&mut self, status: &VehicleStatus, input: &PilotInput, dt: f64) -> ControlCommand {
        let mut command = ControlCommand::from_input(input);
        let mut report = TickReport::default();
        for damper in self.dampers.iter_mut().flatten() {
            let decision = damper.tick(status, input, &mut command, dt);
            report.set(damper.binding().axis, decision);
        }
        self.last_report = report;
        command
    }

    pub fn last_report(&self) -> &TickReport {
        &self.last_report
    }
}

fn toggle_field(axis: Axis) -> FieldId {
    match axis {
        Axis::Yaw => "yaw_damper",
        Axis::Pitch => "pitch_damper",
        Axis::Roll => "roll_damper",
    }
}

fn toggle_axis(field: &str) -> Option<Axis> {
    Axis::ALL.into_iter().find(|axis| toggle_field(*axis) == field)
}

impl Inspectable for AutoPilot {
    fn object_id(&self) -> ObjectId {
        ObjectId::new(0, 0)
    }

    fn fields(&self) -> Vec<FieldInfo> {
        vec![
            FieldInfo::editable(toggle_field(Axis::Yaw), "Yaw dampener"),
            FieldInfo::editable(toggle_field(Axis::Pitch), "Pitch dampener"),
            FieldInfo::editable(toggle_field(Axis::Roll), "Roll dampener"),
            FieldInfo::read_only("outputs", "Outputs").with_format(Format::Fixed(3)),
        ]
    }

    fn get(&self, field: FieldId) -> Option<Value> {
        if field == "outputs" {
            let outputs = self.dampers().map(|d| Value::Scalar(d.output())).collect();
            return Some(Value::Collection(outputs));
        }
        toggle_axis(field).map(|axis| Value::Toggle(self.is_active(axis)))
    }

    fn set(&mut self, field: FieldId, value: Value) -> Result<(), DamperError> {
        if field == "outputs" {
            return Err(DamperError::ReadOnly(field.to_string()));
        }
        let axis = toggle_axis(field).ok_or_else(|| DamperError::UnknownField(field.to_string()))?;
        let on = expect_toggle(field, &value)?;
        if on != self.is_active(axis) {
            self.toggle(axis);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn free_axes_pass_pilot_through() {
        let mut autopilot = AutoPilot::new();
        autopilot.attach(DamperConfig::yaw());
        let mut input = PilotInput::neutral();
        input.pitch = 0.6;
        let status = VehicleStatus::airborne(Vector3::new(1.0, 1.0, 1.0));
        let cmd = autopilot.tick(&status, &input, 0.02);
        assert_eq!(cmd.pitch, 0.6);
        assert_eq!(cmd.roll, 0.0);
        assert!(cmd.yaw > 0.0);
        assert_eq!(autopilot.last_report().get(Axis::Yaw), Some(Arbitration::Applied));
        assert_eq!(autopilot.last_report().get(Axis::Pitch), None);
    }

    #[test]
    fn reattach_starts_clean() {
        let mut autopilot = AutoPilot::all_axes();
        let status = VehicleStatus::airborne(Vector3::new(0.0, 0.0, 0.3));
        let input = PilotInput::neutral();
        for _ in 0..10 {
            autopilot.tick(&status, &input, 0.02);
        }
        let first_id = autopilot.damper(Axis::Yaw).map(|d| d.id());
        assert!(!autopilot.toggle(Axis::Yaw));
        assert!(autopilot.damper(Axis::Yaw).is_none());
        assert!(autopilot.toggle(Axis::Yaw));

        let damper = autopilot.damper(Axis::Yaw).unwrap();
        assert_eq!(damper.time(), 0.0);
        assert_eq!(damper.pid().last_time(), None);
        assert_ne!(Some(damper.id()), first_id);
    }

    #[test]
    fn toggles_attach_through_inspector() {
        let mut autopilot = AutoPilot::new();
        autopilot.set("roll_damper", Value::Toggle(true)).unwrap();
        assert!(autopilot.is_active(Axis::Roll));
        assert_eq!(autopilot.get("roll_damper"), Some(Value::Toggle(true)));
        autopilot.set("roll_damper", Value::Toggle(true)).unwrap();
        assert_eq!(autopilot.dampers().count(), 1);
        assert!(autopilot.set("outputs", Value::Collection(vec![])).is_err());
        assert!(autopilot.set("warp_drive", Value::Toggle(true)).is_err());
        assert_eq!(
            autopilot.get("outputs"),
            Some(Value::Collection(vec![Value::Scalar(0.0)]))
        );
    }
}
