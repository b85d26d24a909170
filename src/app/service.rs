//! Controller service — the hexagonal core.
//!
//! [`ControllerService`] owns the power state machine, the controller
//! context and the PID law.  One call to [`ControllerService::tick`] is one
//! control period:
//!
//! ```text
//!  knob ──▶ FSM ──▶ (Running?) thermistor ──▶ table ──▶ PID ──▶ duty latch
//!                        │
//!                        └─(Idle) duty = 0, PID reset, generator gated off
//! ```
//!
//! The duty produced here is handed to the generator with
//! [`ActuatorPort::set_duty`]; the generator only picks it up at the next
//! period boundary.

use log::{debug, info, warn};

use crate::config::{ControllerConfig, SensorTimeoutPolicy};
use crate::control::duty::Duty;
use crate::control::pid::{PidController, PidState};
use crate::error::{Result, SensorError};
use crate::fsm::context::{ControlSample, ControllerContext};
use crate::fsm::states::build_state_table;
use crate::fsm::{ControlMode, Fsm};
use crate::sensors::SensorCode;
use crate::sensors::calibration::CalibrationTable;

use super::events::{AppEvent, TelemetryData};
use super::ports::{ActuatorPort, EventSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// ControllerService
// ───────────────────────────────────────────────────────────────

pub struct ControllerService {
    fsm: Fsm,
    ctx: ControllerContext,
    pid: PidController,
    table: CalibrationTable,
    /// Last enable/disable actually issued to the generator.
    heater_applied: Option<bool>,
    tick_count: u64,
}

impl ControllerService {
    /// Construct the service with the built-in thermistor table.
    ///
    /// Does **not** start the FSM — call [`start`](Self::start) next.
    pub fn new(config: ControllerConfig) -> Result<Self> {
        Self::with_table(config, CalibrationTable::default())
    }

    pub fn with_table(config: ControllerConfig, table: CalibrationTable) -> Result<Self> {
        config.validate()?;
        let pid = PidController::from_config(&config);
        let ctx = ControllerContext::new(config);
        let fsm = Fsm::new(build_state_table(), ControlMode::Idle);

        Ok(Self {
            fsm,
            ctx,
            pid,
            table,
            heater_applied: None,
            tick_count: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Enter Idle and drive every output to its off state.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        self.apply_outputs(hw);
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!(
            "ControllerService started in {:?} (set point {:.1}\u{00b0}C, period {:.3}s)",
            self.fsm.current_state(),
            self.ctx.config.set_point(),
            self.ctx.period_secs
        );
    }

    // ── Per-period orchestration ──────────────────────────────

    /// Run one control period: knob → FSM → (thermistor → PID) → outputs.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`] so a single adapter can own the shared ADC and the
    /// outputs without a double mutable borrow.
    pub fn tick(&mut self, hw: &mut (impl SensorPort + ActuatorPort), sink: &mut impl EventSink) {
        self.tick_count += 1;
        let prev_mode = self.fsm.current_state();

        // 1. Knob
        self.ctx.control_input = hw.read_control_input();

        // 2. Power state machine
        self.fsm.tick(&mut self.ctx);

        // 3. Regulation
        if self.fsm.current_state() == ControlMode::Running {
            match hw.read_temperature_code() {
                Ok(code) => self.regulate(code),
                Err(e) => self.on_sensor_failure(e, sink),
            }
        }

        // 4. Outputs (duty takes effect at the next boundary)
        self.apply_outputs(hw);

        // 5. Events
        let new_mode = self.fsm.current_state();
        if new_mode != prev_mode {
            sink.emit(&AppEvent::ModeChanged {
                from: prev_mode,
                to: new_mode,
            });
        }

        let every = u64::from(self.ctx.config.telemetry_interval_periods);
        if every > 0 && self.tick_count % every == 0 {
            sink.emit(&AppEvent::Telemetry(self.telemetry()));
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn telemetry(&self) -> TelemetryData {
        let sample = self.ctx.last_sample;
        TelemetryData {
            mode: self.fsm.current_state(),
            knob_level: self.ctx.control_input.level(),
            temperature_c: sample.map(|s| s.temperature_c),
            error: sample.map(|s| s.error),
            set_point_c: self.ctx.config.set_point(),
            duty: self.ctx.duty.value(),
            integral: self.ctx.pid.integral,
            at_setpoint: self.ctx.commands.at_setpoint_indicator,
        }
    }

    pub fn mode(&self) -> ControlMode {
        self.fsm.current_state()
    }

    /// Duty latched for the next period.
    pub fn duty(&self) -> Duty {
        self.ctx.duty
    }

    pub fn pid_state(&self) -> PidState {
        self.ctx.pid
    }

    pub fn last_sample(&self) -> Option<ControlSample> {
        self.ctx.last_sample
    }

    pub fn context(&self) -> &ControllerContext {
        &self.ctx
    }

    /// Control periods executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.ctx.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn regulate(&mut self, code: SensorCode) {
        let temperature_c = self.table.translate(code);
        let error = self.pid.error_for(temperature_c);

        self.ctx.commands.at_setpoint_indicator = self.pid.at_setpoint(error);
        self.ctx.duty = self.pid.step(error, self.ctx.period_secs, &mut self.ctx.pid);
        self.ctx.last_sample = Some(ControlSample {
            code,
            temperature_c,
            error,
        });

        debug!(
            "PID | code={} T={:.2} err={:.2} I={:.2} duty={}",
            code.value(),
            temperature_c,
            error,
            self.ctx.pid.integral,
            self.ctx.duty.value()
        );
    }

    fn on_sensor_failure(&mut self, error: SensorError, sink: &mut impl EventSink) {
        let policy = self.ctx.config.sensor_timeout_policy;
        warn!("Thermistor read failed ({error}), policy {policy:?}");
        match policy {
            SensorTimeoutPolicy::HoldDuty => {}
            SensorTimeoutPolicy::ForceIdle => {
                self.fsm.force_transition(ControlMode::Idle, &mut self.ctx);
            }
        }
        sink.emit(&AppEvent::SensorFailed { error, policy });
    }

    /// Translate context commands into port calls.
    fn apply_outputs(&mut self, hw: &mut impl ActuatorPort) {
        let cmds = self.ctx.commands;

        // Generator gate: only on change, so enable/disable mark transitions.
        if self.heater_applied != Some(cmds.heater_enabled) {
            if cmds.heater_enabled {
                hw.enable_heater();
            } else {
                hw.disable_heater();
            }
            self.heater_applied = Some(cmds.heater_enabled);
        }

        hw.set_duty(self.ctx.duty);
        hw.set_running_indicator(cmds.running_indicator);
        hw.set_at_setpoint_indicator(cmds.at_setpoint_indicator);
    }
}
