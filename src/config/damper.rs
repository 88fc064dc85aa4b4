use crate::control::Axis;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PidGains {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    pub integral_clamp: f64,
}

impl PidGains {
    pub fn new(kp: f64, ki: f64, kd: f64, integral_clamp: f64) -> Self {
        Self {
            kp,
            ki,
            kd,
            integral_clamp,
        }
    }

    /// Proportional-only gains, useful when checking the arbitration path in isolation.
    pub fn proportional(kp: f64) -> Self {
        Self::new(kp, 0.0, 0.0, 1.0)
    }
}

impl Default for PidGains {
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.01, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamperConfig {
    pub name: String,
    pub window_id: u32,
    pub axis: Axis,
    pub gains: PidGains,
}

impl DamperConfig {
    pub fn yaw() -> Self {
        Self {
            name: "Yaw dampener".to_string(),
            window_id: 752348,
            axis: Axis::Yaw,
            gains: PidGains::default(),
        }
    }

    pub fn pitch() -> Self {
        Self {
            name: "Pitch dampener".to_string(),
            window_id: 752349,
            axis: Axis::Pitch,
            gains: PidGains::default(),
        }
    }

    pub fn roll() -> Self {
        Self {
            name: "Roll dampener".to_string(),
            window_id: 752350,
            axis: Axis::Roll,
            gains: PidGains::default(),
        }
    }

    pub fn for_axis(axis: Axis) -> Self {
        match axis {
            Axis::Yaw => Self::yaw(),
            Axis::Pitch => Self::pitch(),
            Axis::Roll => Self::roll(),
        }
    }

    pub fn with_gains(mut self, gains: PidGains) -> Self {
        self.gains = gains;
        self
    }
}
