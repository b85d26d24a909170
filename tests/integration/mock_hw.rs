//! Mock hardware for integration tests.
//!
//! Two flavours:
//! - [`MockHardware`] implements the ports directly and records every
//!   actuator call, for asserting on command history.
//! - [`Bench`] wires the real [`HardwareAdapter`] (generator, indicators,
//!   bounded ADC sampling) to scripted channels and probe pins, and
//!   [`Rig`] drives it from the real [`Scheduler`].

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, OutputPin};

use incubator::adapters::hardware::HardwareAdapter;
use incubator::app::events::AppEvent;
use incubator::app::ports::{
    ActuatorPort, EventSink, ScheduleFiredKind, SchedulerDelegate, SensorPort,
};
use incubator::app::service::ControllerService;
use incubator::config::ControllerConfig;
use incubator::control::duty::Duty;
use incubator::drivers::adc::AdcChannel;
use incubator::drivers::indicator::Indicator;
use incubator::drivers::slow_pwm::{RelayPolarity, SlowPwm};
use incubator::error::SensorError;
use incubator::scheduler::{STEPS_PER_PERIOD, Scheduler};
use incubator::sensors::control_knob::ControlKnob;
use incubator::sensors::temperature::TemperatureSensor;
use incubator::sensors::{ControlInput, SensorCode};

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCall {
    EnableHeater,
    DisableHeater,
    SetDuty(u8),
    RunningLed(bool),
    SetpointLed(bool),
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub knob: u8,
    /// `None` makes the thermistor time out.
    pub code: Option<u8>,
    pub thermistor_reads: u32,
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            knob: 0,
            code: Some(128),
            thermistor_reads: 0,
            calls: Vec::new(),
        }
    }

    pub fn take_calls(&mut self) -> Vec<ActuatorCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn last_duty(&self) -> Option<u8> {
        self.calls.iter().rev().find_map(|c| match c {
            ActuatorCall::SetDuty(d) => Some(*d),
            _ => None,
        })
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn read_temperature_code(&mut self) -> Result<SensorCode, SensorError> {
        self.thermistor_reads += 1;
        self.code.map(SensorCode).ok_or(SensorError::Timeout)
    }

    fn read_control_input(&mut self) -> ControlInput {
        ControlInput::new(self.knob)
    }
}

impl ActuatorPort for MockHardware {
    fn enable_heater(&mut self) {
        self.calls.push(ActuatorCall::EnableHeater);
    }

    fn disable_heater(&mut self) {
        self.calls.push(ActuatorCall::DisableHeater);
    }

    fn set_duty(&mut self, duty: Duty) {
        self.calls.push(ActuatorCall::SetDuty(duty.value()));
    }

    fn set_running_indicator(&mut self, on: bool) {
        self.calls.push(ActuatorCall::RunningLed(on));
    }

    fn set_at_setpoint_indicator(&mut self, on: bool) {
        self.calls.push(ActuatorCall::SetpointLed(on));
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode_changes(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::ModeChanged { .. }))
            .count()
    }

    pub fn sensor_failures(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::SensorFailed { .. }))
            .count()
    }

    pub fn telemetry_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::Telemetry(_)))
            .count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Scripted peripherals ──────────────────────────────────────

/// ADC channel whose conversion result is set by the test.  `None` never
/// completes, so the bounded sampler times out.
pub struct ScriptedAdc(Rc<Cell<Option<u8>>>);

impl AdcChannel for ScriptedAdc {
    fn start(&mut self) -> Result<(), SensorError> {
        Ok(())
    }

    fn poll(&mut self) -> Result<Option<u8>, SensorError> {
        Ok(self.0.get())
    }
}

/// Output pin whose level the test can observe.
pub struct ProbePin(Rc<Cell<bool>>);

impl ErrorType for ProbePin {
    type Error = Infallible;
}

impl OutputPin for ProbePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set(true);
        Ok(())
    }
}

pub type TestBoard = HardwareAdapter<ScriptedAdc, ScriptedAdc, ProbePin, ProbePin>;

// ── Bench ─────────────────────────────────────────────────────

pub struct Bench {
    pub hw: TestBoard,
    thermistor: Rc<Cell<Option<u8>>>,
    knob: Rc<Cell<Option<u8>>>,
    pub relay_level: Rc<Cell<bool>>,
    pub running_level: Rc<Cell<bool>>,
    pub setpoint_level: Rc<Cell<bool>>,
}

#[allow(dead_code)]
impl Bench {
    /// Active-low relay, as on the reference board.
    pub fn new(poll_limit: u32) -> Self {
        let thermistor = Rc::new(Cell::new(Some(128)));
        let knob = Rc::new(Cell::new(Some(0)));
        let relay_level = Rc::new(Cell::new(false));
        let running_level = Rc::new(Cell::new(false));
        let setpoint_level = Rc::new(Cell::new(false));

        let hw = HardwareAdapter::new(
            TemperatureSensor::new(ScriptedAdc(thermistor.clone()), poll_limit),
            ControlKnob::new(ScriptedAdc(knob.clone()), poll_limit),
            SlowPwm::new(ProbePin(relay_level.clone()), RelayPolarity::ActiveLow),
            Indicator::new(ProbePin(running_level.clone())),
            Indicator::new(ProbePin(setpoint_level.clone())),
        );

        Self {
            hw,
            thermistor,
            knob,
            relay_level,
            running_level,
            setpoint_level,
        }
    }

    /// Put the knob at `level` (0–3).
    pub fn set_knob(&self, level: u8) {
        self.knob.set(Some(level << 6));
    }

    pub fn set_code(&self, code: u8) {
        self.thermistor.set(Some(code));
    }

    pub fn stall_thermistor(&self) {
        self.thermistor.set(None);
    }

    pub fn relay_closed(&self) -> bool {
        // Active low.
        !self.relay_level.get()
    }
}

// ── Rig: scheduler + service + bench ─────────────────────────

struct PeriodDelegate<'a> {
    app: &'a mut ControllerService,
    hw: &'a mut TestBoard,
    sink: &'a mut RecordingSink,
}

impl SchedulerDelegate for PeriodDelegate<'_> {
    fn on_schedule_fired(&mut self, kind: ScheduleFiredKind) {
        match kind {
            ScheduleFiredKind::DutyReload => self.hw.reload_duty(),
            ScheduleFiredKind::ControlTick => self.app.tick(&mut *self.hw, &mut *self.sink),
        }
    }
}

pub struct Rig {
    pub app: ControllerService,
    pub bench: Bench,
    pub sink: RecordingSink,
    sched: Scheduler,
}

#[allow(dead_code)]
impl Rig {
    /// Started service, with the counter parked one step before the
    /// first period boundary.
    pub fn new(config: ControllerConfig) -> Self {
        let mut bench = Bench::new(config.sensor_poll_limit);
        let mut app = ControllerService::new(config).expect("valid config");
        let mut sink = RecordingSink::new();
        app.start(&mut bench.hw, &mut sink);

        let mut rig = Self {
            app,
            bench,
            sink,
            sched: Scheduler::new(),
        };
        for _ in 0..STEPS_PER_PERIOD - 1 {
            rig.step();
        }
        rig
    }

    /// One counter step; returns whether the relay is closed afterwards.
    pub fn step(&mut self) -> bool {
        let mut delegate = PeriodDelegate {
            app: &mut self.app,
            hw: &mut self.bench.hw,
            sink: &mut self.sink,
        };
        self.sched.step(&mut delegate);
        self.bench.hw.update_relay(self.sched.phase());
        self.bench.relay_closed()
    }

    /// Cross one boundary and run the whole period that follows.
    /// Returns the number of steps the relay was closed.
    pub fn run_period(&mut self) -> u32 {
        let mut closed = 0;
        for _ in 0..STEPS_PER_PERIOD {
            if self.step() {
                closed += 1;
            }
        }
        closed
    }

    pub fn periods(&self) -> u64 {
        self.sched.periods()
    }
}
