//! Per-axis angular-rate damping autopilot.
//!
//! Each tick an [`control::AngularRateDamper`] measures the body rate on its axis, runs
//! a PID toward zero rate, and decides whether the result goes to the vehicle, is
//! discarded in favour of stability assist, or is thrown away with a controller reset
//! because the pilot is steering.

pub mod config;
pub mod control;
pub mod error;
pub mod inspector;
pub mod sim;

pub use error::DamperError;
