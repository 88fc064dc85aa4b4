use serde::{Deserialize, Serialize};

use crate::config::PidGains;

/// Discrete-time PID with an anti-windup bound on the integral.
///
/// Time is supplied by the caller on every call, so the controller never reads a clock.
/// The first call after construction or [`PidController::reset`] has no valid `dt`: it
/// contributes neither integral nor derivative.
///
/// Inputs are not validated. A NaN error reaches the output and, once `dt` is valid,
/// the integral, where it stays until the next reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PidController {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    pub integral_clamp: f64,
    integral: f64,
    last_error: f64,
    last_time: Option<f64>,
}

impl PidController {
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self {
            kp,
            ki,
            kd,
            integral_clamp: 1.0,
            integral: 0.0,
            last_error: 0.0,
            last_time: None,
        }
    }

    pub fn with_integral_clamp(mut self, integral_clamp: f64) -> Self {
        self.integral_clamp = integral_clamp;
        self
    }

    pub fn from_gains(gains: &PidGains) -> Self {
        Self::new(gains.kp, gains.ki, gains.kd).with_integral_clamp(gains.integral_clamp)
    }

    pub fn control(&mut self, measured: f64, setpoint: f64, time: f64) -> f64 {
        let error = setpoint - measured;

        let dt = self.last_time.map(|last| time - last).filter(|dt| *dt > 0.0);

        let derivative = match dt {
            Some(dt) => {
                self.integral += error * dt;
                (error - self.last_error) / dt
            }
            None => 0.0,
        };
        self.integral = clamp_symmetric(self.integral, self.integral_clamp);

        self.last_error = error;
        self.last_time = Some(time);

        self.kp * error + self.ki * self.integral + self.kd * derivative
    }

    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.last_error = 0.0;
        self.last_time = None;
    }

    pub fn integral(&self) -> f64 {
        self.integral
    }

    pub fn last_error(&self) -> f64 {
        self.last_error
    }

    pub fn last_time(&self) -> Option<f64> {
        self.last_time
    }
}

/// Clamp into `[-bound, bound]` without panicking on a negative or NaN bound.
///
/// A NaN value passes through unchanged.
pub fn clamp_symmetric(value: f64, bound: f64) -> f64 {
    let bound = bound.abs();
    if value > bound {
        bound
    } else if value < -bound {
        -bound
    } else {
        value
    }
}
