//! Integration tests for the ControllerService → FSM → actuator pipeline,
//! asserting on the exact sequence of port calls.

use crate::mock_hw::{ActuatorCall, MockHardware, RecordingSink};

use incubator::app::events::AppEvent;
use incubator::app::service::ControllerService;
use incubator::config::{ControllerConfig, SensorTimeoutPolicy};
use incubator::error::SensorError;
use incubator::fsm::ControlMode;

fn make_app(config: ControllerConfig) -> (ControllerService, MockHardware, RecordingSink) {
    let mut app = ControllerService::new(config).expect("valid config");
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    app.start(&mut hw, &mut sink);
    (app, hw, sink)
}

#[test]
fn boot_drives_every_output_off() {
    let (app, mut hw, sink) = make_app(ControllerConfig::default());
    assert_eq!(app.mode(), ControlMode::Idle);
    assert_eq!(
        hw.take_calls(),
        vec![
            ActuatorCall::DisableHeater,
            ActuatorCall::SetDuty(0),
            ActuatorCall::RunningLed(false),
            ActuatorCall::SetpointLed(false),
        ]
    );
    assert!(matches!(sink.events[..], [AppEvent::Started(ControlMode::Idle)]));
}

#[test]
fn idle_with_knob_off_stays_quiet() {
    let (mut app, mut hw, mut sink) = make_app(ControllerConfig::default());
    hw.take_calls();

    for _ in 0..5 {
        app.tick(&mut hw, &mut sink);
    }
    assert_eq!(app.mode(), ControlMode::Idle);
    assert_eq!(hw.thermistor_reads, 0);
    assert!(!hw.calls.contains(&ActuatorCall::EnableHeater));
    assert!(!hw.calls.contains(&ActuatorCall::DisableHeater));
    assert_eq!(hw.last_duty(), Some(0));
    assert_eq!(sink.mode_changes(), 0);
}

#[test]
fn knob_on_enables_heater_once() {
    let (mut app, mut hw, mut sink) = make_app(ControllerConfig::default());
    hw.take_calls();
    hw.knob = 2;
    hw.code = Some(110);

    app.tick(&mut hw, &mut sink);
    let duty = app.duty().value();
    assert_eq!(
        hw.take_calls(),
        vec![
            ActuatorCall::EnableHeater,
            ActuatorCall::SetDuty(duty),
            ActuatorCall::RunningLed(true),
            ActuatorCall::SetpointLed(false),
        ]
    );

    app.tick(&mut hw, &mut sink);
    assert!(!hw.calls.contains(&ActuatorCall::EnableHeater));
    assert_eq!(hw.thermistor_reads, 2);
    assert_eq!(sink.mode_changes(), 1);
}

#[test]
fn knob_off_disables_heater_and_zeroes_duty() {
    let (mut app, mut hw, mut sink) = make_app(ControllerConfig::default());
    hw.knob = 1;
    hw.code = Some(110);
    app.tick(&mut hw, &mut sink);
    app.tick(&mut hw, &mut sink);
    hw.take_calls();
    let reads = hw.thermistor_reads;

    hw.knob = 0;
    app.tick(&mut hw, &mut sink);

    assert_eq!(app.mode(), ControlMode::Idle);
    assert_eq!(hw.thermistor_reads, reads, "no sample on the Idle period");
    assert_eq!(
        hw.take_calls(),
        vec![
            ActuatorCall::DisableHeater,
            ActuatorCall::SetDuty(0),
            ActuatorCall::RunningLed(false),
            ActuatorCall::SetpointLed(false),
        ]
    );
    assert!(app.pid_state().is_reset());
    assert!(app.last_sample().is_none());
}

#[test]
fn sensor_timeout_is_reported_with_policy() {
    let (mut app, mut hw, mut sink) = make_app(ControllerConfig::default());
    hw.knob = 1;
    hw.code = None;
    app.tick(&mut hw, &mut sink);

    assert_eq!(app.mode(), ControlMode::Idle);
    assert!(sink.events.iter().any(|e| matches!(
        e,
        AppEvent::SensorFailed {
            error: SensorError::Timeout,
            policy: SensorTimeoutPolicy::ForceIdle,
        }
    )));
    assert!(!hw.calls.contains(&ActuatorCall::EnableHeater));
}

#[test]
fn telemetry_emitted_every_interval() {
    let config = ControllerConfig {
        telemetry_interval_periods: 4,
        ..ControllerConfig::default()
    };
    let (mut app, mut hw, mut sink) = make_app(config);
    hw.knob = 1;
    hw.code = Some(128);

    for _ in 0..10 {
        app.tick(&mut hw, &mut sink);
    }
    assert_eq!(sink.telemetry_count(), 2);
    assert_eq!(app.tick_count(), 10);

    let last = sink
        .events
        .iter()
        .rev()
        .find_map(|e| match e {
            AppEvent::Telemetry(t) => Some(t.clone()),
            _ => None,
        })
        .expect("telemetry emitted");
    assert_eq!(last.mode, ControlMode::Running);
    assert_eq!(last.temperature_c, Some(37.24));
    assert!(last.at_setpoint);
}

#[test]
fn alternate_set_point_changes_error() {
    let config = ControllerConfig {
        active_set_point: 3, // 45 °C
        ..ControllerConfig::default()
    };
    let (mut app, mut hw, mut sink) = make_app(config);
    hw.knob = 1;
    hw.code = Some(128);
    app.tick(&mut hw, &mut sink);

    let sample = app.last_sample().expect("sampled while running");
    assert!((sample.error - (45.0 - 37.24)).abs() < 1e-4);
    assert_eq!(app.telemetry().set_point_c, 45.0);
    assert!(!app.telemetry().at_setpoint);
}
