use crate::control::{Axis, PilotInput};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PilotAction {
    /// Move the stick on `axis` off trim by the given deflection.
    Deflect(Axis, f64),
    KillRot,
    Landed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PilotSegment {
    pub start: f64,
    pub end: f64,
    pub action: PilotAction,
}

impl PilotSegment {
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time < self.end
    }
}

/// Timed pilot and ground-contact events replayed against the autopilot.
#[derive(Debug, Clone, Default)]
pub struct PilotScript {
    pub trim: PilotInput,
    pub segments: Vec<PilotSegment>,
}

impl PilotScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trim(mut self, yaw: f64, pitch: f64, roll: f64) -> Self {
        self.trim = PilotInput::trimmed(yaw, pitch, roll);
        self
    }

    pub fn then(mut self, start: f64, end: f64, action: PilotAction) -> Self {
        self.segments.push(PilotSegment { start, end, action });
        self
    }

    /// Pilot input at `time`, plus whether the vehicle is on the ground.
    pub fn sample(&self, time: f64) -> (PilotInput, bool) {
        let mut input = self.trim;
        let mut landed = false;
        for segment in self.segments.iter().filter(|s| s.contains(time)) {
            match segment.action {
                PilotAction::Deflect(axis, amount) => {
                    let binding = axis.binding();
                    let (_, trim) = (binding.input)(&input);
                    let stick = (trim + amount).clamp(-1.0, 1.0);
                    match axis {
                        Axis::Yaw => input.yaw = stick,
                        Axis::Pitch => input.pitch = stick,
                        Axis::Roll => input.roll = stick,
                    }
                }
                PilotAction::KillRot => input.kill_rot = true,
                PilotAction::Landed => landed = true,
            }
        }
        (input, landed)
    }

    pub fn gust() -> Self {
        Self::new().with_trim(0.0, 0.05, 0.0).then(8.0, 11.0, PilotAction::KillRot)
    }

    pub fn landing() -> Self {
        Self::new().then(0.0, 3.0, PilotAction::Landed).then(10.0, 15.0, PilotAction::Landed)
    }

    pub fn handoff() -> Self {
        Self::new()
            .then(3.0, 5.0, PilotAction::Deflect(Axis::Yaw, 0.4))
            .then(6.0, 7.5, PilotAction::Deflect(Axis::Pitch, -0.3))
            .then(8.0, 9.0, PilotAction::Deflect(Axis::Roll, 0.6))
    }
}
