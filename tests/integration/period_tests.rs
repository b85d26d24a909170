//! End-to-end period tests: scheduler → hardware adapter → service.
//!
//! These count relay-closed counter steps to check when a computed duty
//! actually reaches the relay.

use crate::mock_hw::Rig;

use incubator::app::events::AppEvent;
use incubator::config::{ControllerConfig, SensorTimeoutPolicy};
use incubator::control::duty::Duty;
use incubator::control::pid::{PidController, PidState};
use incubator::fsm::ControlMode;
use incubator::sensors::SensorCode;
use incubator::sensors::calibration::CalibrationTable;

/// Duty the controller should produce for `code` from a fresh PID state.
fn fresh_duty(config: &ControllerConfig, code: u8) -> (Duty, PidState) {
    let pid = PidController::from_config(config);
    let temp = CalibrationTable::default().translate(SensorCode(code));
    let mut state = PidState::ZERO;
    let duty = pid.step(pid.error_for(temp), config.period_secs, &mut state);
    (duty, state)
}

#[test]
fn computed_duty_reaches_relay_one_period_later() {
    let config = ControllerConfig::default();
    let (expected, _) = fresh_duty(&config, 110);
    assert!(!expected.is_off());

    let mut rig = Rig::new(config);
    rig.bench.set_knob(1);
    rig.bench.set_code(110);

    // Boundary 1: generator reloads the boot duty (0), then the control
    // tick enters Running and latches `expected`.
    let first = rig.run_period();
    assert_eq!(rig.app.mode(), ControlMode::Running);
    assert_eq!(rig.app.duty(), expected);
    assert_eq!(first, 0, "new duty must not apply mid-period");

    // Boundary 2: `expected` becomes active for the whole period.
    let second = rig.run_period();
    assert_eq!(second, u32::from(expected.value()));
    assert_eq!(rig.periods(), 2);
}

#[test]
fn relay_closed_at_start_of_period() {
    let mut rig = Rig::new(ControllerConfig::default());
    rig.bench.set_knob(2);
    rig.bench.set_code(110);
    rig.run_period();
    let duty = rig.app.duty().value();

    // First step of the next period crosses the boundary.
    assert!(rig.step(), "relay closes at phase 0");
    // Run until the active duty expires.
    for _ in 1..duty {
        assert!(rig.step());
    }
    assert!(!rig.step(), "relay opens once the counter reaches the duty");
}

#[test]
fn knob_to_zero_opens_relay_at_next_boundary() {
    let mut rig = Rig::new(ControllerConfig::default());
    rig.bench.set_knob(1);
    rig.bench.set_code(110);
    rig.run_period();
    assert!(rig.run_period() > 0);

    rig.bench.set_knob(0);
    let closed = rig.run_period();

    assert_eq!(closed, 0, "disable overrides the duty reloaded at the same boundary");
    assert_eq!(rig.app.mode(), ControlMode::Idle);
    assert_eq!(rig.app.duty(), Duty::OFF);
    assert!(rig.app.pid_state().is_reset());
    assert!(!rig.bench.hw.heater().is_enabled());
    assert!(!rig.bench.running_level.get());
    assert!(!rig.bench.setpoint_level.get());
    assert!(rig.sink.events.iter().any(|e| matches!(
        e,
        AppEvent::ModeChanged {
            from: ControlMode::Running,
            to: ControlMode::Idle
        }
    )));
}

#[test]
fn restart_after_idle_starts_from_clean_pid_state() {
    let config = ControllerConfig::default();
    let (expected_duty, expected_state) = fresh_duty(&config, 108);

    let mut rig = Rig::new(config);
    rig.bench.set_knob(1);
    rig.bench.set_code(110);
    rig.run_period();
    rig.run_period();

    rig.bench.set_knob(0);
    rig.run_period();
    assert!(rig.app.pid_state().is_reset());

    rig.bench.set_knob(3);
    rig.bench.set_code(108);
    rig.run_period();
    assert_eq!(rig.app.mode(), ControlMode::Running);
    assert_eq!(rig.app.pid_state(), expected_state);
    assert_eq!(rig.app.duty(), expected_duty);
}

#[test]
fn setpoint_led_tracks_threshold() {
    let mut rig = Rig::new(ControllerConfig::default());
    rig.bench.set_knob(1);

    rig.bench.set_code(128); // 37.24 °C, error 0.26
    rig.run_period();
    assert!(rig.bench.setpoint_level.get());
    assert!(rig.bench.running_level.get());

    rig.bench.set_code(125); // 36.06 °C, error 1.44
    rig.run_period();
    assert!(!rig.bench.setpoint_level.get());
}

#[test]
fn stalled_thermistor_forces_idle_and_keeps_relay_open() {
    let mut rig = Rig::new(ControllerConfig::default());
    rig.bench.set_knob(1);
    rig.bench.stall_thermistor();

    for _ in 0..3 {
        assert_eq!(rig.run_period(), 0);
        assert_eq!(rig.app.mode(), ControlMode::Idle);
    }
    assert_eq!(rig.sink.sensor_failures(), 3);
    assert!(!rig.bench.hw.heater().is_enabled());
}

#[test]
fn stalled_thermistor_with_hold_policy_keeps_last_duty() {
    let config = ControllerConfig {
        sensor_timeout_policy: SensorTimeoutPolicy::HoldDuty,
        ..ControllerConfig::default()
    };
    let mut rig = Rig::new(config);
    rig.bench.set_knob(1);
    rig.bench.set_code(110);
    rig.run_period();
    let held = rig.app.duty();

    rig.bench.stall_thermistor();
    let closed = rig.run_period();
    assert_eq!(closed, u32::from(held.value()));
    assert_eq!(rig.app.mode(), ControlMode::Running);
    assert_eq!(rig.app.duty(), held);
    assert_eq!(rig.run_period(), u32::from(held.value()));
    assert_eq!(rig.sink.sensor_failures(), 2);
}
