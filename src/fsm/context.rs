//! Shared mutable context threaded through every FSM handler.
//!
//! `ControllerContext` is the one place the controller's mutable state
//! lives: the current mode, PID history and the duty latched for the next
//! period, plus the latest inputs and the output commands derived from
//! them.  It has a single writer, the control tick.

use crate::config::ControllerConfig;
use crate::control::duty::Duty;
use crate::control::pid::PidState;
use crate::sensors::{ControlInput, SensorCode};

use super::ControlMode;

// ---------------------------------------------------------------------------
// Per-period sample (written by the service while Running)
// ---------------------------------------------------------------------------

/// The thermistor reading taken during the last Running period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSample {
    pub code: SensorCode,
    pub temperature_c: f32,
    /// `set_point - temperature_c`.
    pub error: f32,
}

// ---------------------------------------------------------------------------
// Output commands (written by state handlers; consumed by the service)
// ---------------------------------------------------------------------------

/// Desired state of every output.  The service applies these through the
/// actuator port after each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputCommands {
    /// Whether the duty-cycle generator may close the relay at all.
    pub heater_enabled: bool,
    pub running_indicator: bool,
    pub at_setpoint_indicator: bool,
}

impl OutputCommands {
    /// Heater gated off, indicators dark.
    pub fn all_off() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// ControllerContext
// ---------------------------------------------------------------------------

pub struct ControllerContext {
    // -- Controller state --
    /// Mirrors the FSM's current state; updated by the `on_enter` handlers.
    pub mode: ControlMode,
    pub pid: PidState,
    /// Duty computed this period, applied by the generator next period.
    pub duty: Duty,

    // -- Inputs --
    /// Knob reading for the current period.
    pub control_input: ControlInput,
    /// Last thermistor sample, if one was taken while Running.
    pub last_sample: Option<ControlSample>,

    // -- Outputs --
    pub commands: OutputCommands,

    // -- Timing --
    /// Periods elapsed since the current mode was entered.
    pub ticks_in_state: u64,
    /// Monotonic period count.
    pub total_ticks: u64,
    /// Length of one period in seconds (the PID `dt`).
    pub period_secs: f32,

    // -- Configuration --
    pub config: ControllerConfig,
}

impl ControllerContext {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            mode: ControlMode::Idle,
            pid: PidState::ZERO,
            duty: Duty::OFF,
            control_input: ControlInput::OFF,
            last_sample: None,
            commands: OutputCommands::all_off(),
            ticks_in_state: 0,
            total_ticks: 0,
            period_secs: config.period_secs,
            config,
        }
    }

    /// Seconds elapsed since the current mode was entered.
    pub fn secs_in_state(&self) -> f32 {
        self.ticks_in_state as f32 * self.period_secs
    }
}
