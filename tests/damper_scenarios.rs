//! Arbitration scenarios and controller properties, driven through the public API.

use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rate_damper::config::{DamperConfig, PidGains};
use rate_damper::control::{
    AngularRateDamper, Arbitration, Axis, ControlCommand, PidController, PilotInput, VehicleStatus,
};
use rate_damper::inspector::ObjectId;

const DT: f64 = 0.02;

fn damper(axis: Axis, gains: PidGains) -> AngularRateDamper {
    let config = DamperConfig::for_axis(axis).with_gains(gains);
    AngularRateDamper::new(&config, ObjectId::new(config.window_id, 1))
}

/// Body rate whose yaw projection equals `rate`.
fn yaw_rate(rate: f64, landed: bool) -> VehicleStatus {
    VehicleStatus::new(Vector3::new(0.0, 0.0, -rate), landed)
}

// ============================================================================
// PID PROPERTIES
// ============================================================================

#[test]
fn derivative_matches_finite_difference_for_positive_dt() {
    let mut rng = StdRng::seed_from_u64(17);
    let mut pid = PidController::new(0.0, 0.0, 1.0).with_integral_clamp(1.0);
    let mut t = 0.0;
    let mut last_error: Option<f64> = None;

    for _ in 0..200 {
        let dt: f64 = rng.gen_range(0.001..0.1);
        let measured: f64 = rng.gen_range(-5.0..5.0);
        t += dt;
        let out = pid.control(measured, 0.0, t);
        let error = -measured;
        let expected = match last_error {
            Some(prev) => (error - prev) / dt,
            None => 0.0,
        };
        assert!((out - expected).abs() < 1e-6 * expected.abs().max(1.0));
        last_error = Some(error);
    }
}

#[test]
fn integral_stays_inside_clamp_for_random_sequences() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..20 {
        let clamp: f64 = rng.gen_range(0.0..3.0);
        let mut pid =
            PidController::new(1.0, rng.gen_range(0.0..5.0), 0.1).with_integral_clamp(clamp);
        let mut t = 0.0;
        for _ in 0..300 {
            // Includes repeated and backwards timestamps.
            t += rng.gen_range(-0.05..0.2);
            pid.control(rng.gen_range(-100.0..100.0), rng.gen_range(-1.0..1.0), t);
            assert!(pid.integral().abs() <= clamp);
        }
    }
}

#[test]
fn reset_then_control_matches_fresh_controller_at_any_time() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..50 {
        let gains = PidGains::new(
            rng.gen_range(0.0..2.0),
            rng.gen_range(0.0..2.0),
            rng.gen_range(0.0..2.0),
            0.5,
        );
        let mut used = PidController::from_gains(&gains);
        for i in 0..20 {
            used.control(rng.gen_range(-1.0..1.0), 0.0, i as f64 * 0.05);
        }
        used.reset();

        let mut fresh = PidController::from_gains(&gains);
        let measured = rng.gen_range(-3.0..3.0);
        let setpoint = rng.gen_range(-1.0..1.0);
        let t = rng.gen_range(-10.0..10.0);
        assert_eq!(used.control(measured, setpoint, t), fresh.control(measured, setpoint, t));
        assert_eq!(used, fresh);
    }
}

// ============================================================================
// ARBITRATION SCENARIOS
// ============================================================================

#[test]
fn saturated_output_is_clamped_and_written() {
    let mut yaw = damper(Axis::Yaw, PidGains::new(1.0, 0.0, 0.0, 1.0));
    let input = PilotInput::neutral();
    let mut cmd = ControlCommand::from_input(&input);

    let decision = yaw.tick(&yaw_rate(2.0, false), &input, &mut cmd, DT);

    assert_eq!(decision, Arbitration::Applied);
    assert_eq!(yaw.output(), -2.0);
    assert_eq!(cmd.yaw, -1.0);
}

#[test]
fn kill_rot_leaves_command_untouched() {
    let mut yaw = damper(Axis::Yaw, PidGains::new(1.0, 1.0, 0.5, 5.0));
    let mut input = PilotInput::neutral();
    input.kill_rot = true;

    for rate in [0.0, 0.5, 3.0, -7.0, 100.0] {
        let before = yaw.pid().clone();
        let mut cmd = ControlCommand { yaw: 0.123, pitch: 0.0, roll: 0.0 };
        let decision = yaw.tick(&yaw_rate(rate, false), &input, &mut cmd, DT);
        assert_eq!(decision, Arbitration::Suppressed);
        assert_eq!(cmd.yaw, 0.123);
        assert_ne!(yaw.pid().last_time(), before.last_time());
    }
    assert!(yaw.pid().integral() != 0.0);
}

#[test]
fn landed_tick_applies_then_resets() {
    let mut yaw = damper(Axis::Yaw, PidGains::new(1.0, 2.0, 0.5, 5.0));
    let input = PilotInput::neutral();
    let mut cmd = ControlCommand::from_input(&input);
    for _ in 0..5 {
        yaw.tick(&yaw_rate(0.4, false), &input, &mut cmd, DT);
    }

    let mut cmd = ControlCommand::from_input(&input);
    let decision = yaw.tick(&yaw_rate(0.4, true), &input, &mut cmd, DT);
    assert_eq!(decision, Arbitration::Applied);
    assert!(cmd.yaw < 0.0);
    assert!(yaw.landed_reset());
    assert_eq!(yaw.pid().integral(), 0.0);

    // Next tick: proportional term only.
    let mut cmd = ControlCommand::from_input(&input);
    yaw.tick(&yaw_rate(0.2, false), &input, &mut cmd, DT);
    assert_eq!(yaw.pid().integral(), 0.0);
    assert!((yaw.output() + 0.2).abs() < 1e-12);
    assert!(!yaw.landed_reset());
}

#[test]
fn pilot_override_then_clean_resume() {
    let mut roll = damper(Axis::Roll, PidGains::new(1.0, 1.0, 0.0, 5.0));
    let trimmed = PilotInput::trimmed(0.0, 0.0, 0.2);
    let status = VehicleStatus::airborne(Vector3::new(0.0, -0.5, 0.0));

    for _ in 0..10 {
        let mut cmd = ControlCommand::from_input(&trimmed);
        roll.tick(&status, &trimmed, &mut cmd, DT);
    }
    assert!(roll.pid().integral() != 0.0);

    let mut steering = trimmed;
    steering.roll = 0.9;
    let mut cmd = ControlCommand::from_input(&steering);
    assert_eq!(roll.tick(&status, &steering, &mut cmd, DT), Arbitration::PilotOverride);
    assert_eq!(cmd.roll, 0.9);
    assert_eq!(roll.pid().integral(), 0.0);

    let mut cmd = ControlCommand::from_input(&trimmed);
    assert_eq!(roll.tick(&status, &trimmed, &mut cmd, DT), Arbitration::Applied);
    assert_eq!(roll.pid().integral(), 0.0);
    assert!((cmd.roll + 0.5).abs() < 1e-12);
}

#[test]
fn identical_dampers_stay_identical() {
    let gains = PidGains::new(0.8, 0.3, 0.05, 0.7);
    let mut a = damper(Axis::Pitch, gains);
    let mut b = damper(Axis::Pitch, gains);
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..500 {
        let status = VehicleStatus::new(
            Vector3::new(
                rng.gen_range(-2.0..2.0),
                rng.gen_range(-2.0..2.0),
                rng.gen_range(-2.0..2.0),
            ),
            rng.gen_bool(0.05),
        );
        let mut input = PilotInput::neutral();
        input.kill_rot = rng.gen_bool(0.1);
        if rng.gen_bool(0.1) {
            input.pitch = rng.gen_range(-1.0..1.0);
        }

        let mut cmd_a = ControlCommand::from_input(&input);
        let mut cmd_b = cmd_a;
        let da = a.tick(&status, &input, &mut cmd_a, DT);
        let db = b.tick(&status, &input, &mut cmd_b, DT);

        assert_eq!(da, db);
        assert_eq!(cmd_a, cmd_b);
        assert_eq!(a.output(), b.output());
        assert_eq!(a.pid(), b.pid());
        assert_eq!(a.time(), b.time());
    }
}

#[test]
fn written_commands_never_leave_authority_range() {
    let mut yaw = damper(Axis::Yaw, PidGains::new(50.0, 10.0, 5.0, 10.0));
    let input = PilotInput::neutral();
    let mut rng = StdRng::seed_from_u64(8);
    for _ in 0..300 {
        let mut cmd = ControlCommand::from_input(&input);
        yaw.tick(&yaw_rate(rng.gen_range(-20.0..20.0), false), &input, &mut cmd, DT);
        assert!(cmd.yaw.abs() <= 1.0);
    }
}
