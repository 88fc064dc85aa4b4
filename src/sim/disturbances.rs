use nalgebra::Vector3;
use rand::prelude::*;

use crate::config::SimulationConfig;

/// Synthetic body-rate signal: a constant bias, a few incommensurate sinusoids per axis
/// and Gaussian noise. Seeded, so two models with the same config produce the same
/// sequence.
pub struct DisturbanceModel {
    rng: StdRng,
    pub base_rate: Vector3<f64>,
    pub gust_intensity: f64,
    pub gust_frequency: f64,
    pub noise_std: f64,
    time: f64,
}

impl DisturbanceModel {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            base_rate: Vector3::zeros(),
            gust_intensity: 0.2,
            gust_frequency: 0.5,
            noise_std: 0.01,
            time: 0.0,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.seed)
            .with_gusts(config.gust_intensity, config.gust_frequency)
            .with_bias(Vector3::from(config.base_rate))
            .with_noise(config.noise_std)
    }

    pub fn with_gusts(mut self, intensity: f64, frequency: f64) -> Self {
        self.gust_intensity = intensity;
        self.gust_frequency = frequency;
        self
    }

    pub fn with_bias(mut self, base_rate: Vector3<f64>) -> Self {
        self.base_rate = base_rate;
        self
    }

    pub fn with_noise(mut self, noise_std: f64) -> Self {
        self.noise_std = noise_std;
        self
    }

    pub fn update(&mut self, dt: f64) {
        self.time += dt;
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn angular_velocity(&mut self) -> Vector3<f64> {
        let tau = 2.0 * std::f64::consts::PI;
        let t = self.time * self.gust_frequency;
        let gust = Vector3::new(
            (t * tau).sin() + (t * 3.7).sin() * 0.5,
            (t * 1.8 * tau).sin() + (t * 4.2).sin() * 0.3,
            (t * 2.5 * tau).sin() * 0.6 + (t * 1.3).cos() * 0.4,
        );
        let noise = Vector3::new(
            self.gaussian_noise(),
            self.gaussian_noise(),
            self.gaussian_noise(),
        );

        self.base_rate + gust * self.gust_intensity + noise * self.noise_std
    }

    fn gaussian_noise(&mut self) -> f64 {
        // gen::<f64>() is in [0, 1); keep u1 away from zero for the log.
        let u1: f64 = 1.0 - self.rng.gen::<f64>();
        let u2: f64 = self.rng.gen();
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }
}

impl Default for DisturbanceModel {
    fn default() -> Self {
        Self::new(42)
    }
}
