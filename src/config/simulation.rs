use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub dt: f64,
    pub max_time: f64,
    pub seed: u64,
    /// Peak gust rate per axis, rad/s.
    pub gust_intensity: f64,
    pub gust_frequency: f64,
    pub noise_std: f64,
    /// Constant rate bias added on every axis, rad/s.
    pub base_rate: [f64; 3],
    /// Seconds between status lines; zero disables them.
    pub print_interval: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            dt: 0.02,
            max_time: 30.0,
            seed: 42,
            gust_intensity: 0.2,
            gust_frequency: 0.5,
            noise_std: 0.01,
            base_rate: [0.0, 0.0, 0.0],
            print_interval: 1.0,
        }
    }
}

impl SimulationConfig {
    pub fn gust_test() -> Self {
        Self {
            dt: 0.02,
            max_time: 20.0,
            seed: 7,
            gust_intensity: 0.6,
            gust_frequency: 0.8,
            noise_std: 0.02,
            base_rate: [0.0, 0.0, 0.05],
            print_interval: 1.0,
        }
    }

    pub fn landing_test() -> Self {
        Self {
            dt: 0.02,
            max_time: 15.0,
            seed: 11,
            gust_intensity: 0.1,
            gust_frequency: 0.3,
            noise_std: 0.005,
            base_rate: [0.0, 0.0, 0.02],
            print_interval: 1.0,
        }
    }

    pub fn pilot_handoff_test() -> Self {
        Self {
            dt: 0.02,
            max_time: 12.0,
            seed: 3,
            gust_intensity: 0.3,
            gust_frequency: 0.5,
            noise_std: 0.01,
            base_rate: [0.02, 0.0, 0.0],
            print_interval: 0.5,
        }
    }

    pub fn steps(&self) -> usize {
        if self.dt > 0.0 {
            (self.max_time / self.dt).round() as usize
        } else {
            0
        }
    }
}
