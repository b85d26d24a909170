//! Outbound application events.
//!
//! The [`ControllerService`](super::service::ControllerService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.

use crate::config::SensorTimeoutPolicy;
use crate::error::SensorError;
use crate::fsm::ControlMode;

/// Structured events emitted by the control core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),

    /// The power state machine changed mode.
    ModeChanged { from: ControlMode, to: ControlMode },

    /// The thermistor could not be read this period; `policy` says what
    /// the loop did about it.
    SensorFailed {
        error: SensorError,
        policy: SensorTimeoutPolicy,
    },

    /// The service has started (carries the initial mode).
    Started(ControlMode),
}

/// A point-in-time telemetry snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryData {
    pub mode: ControlMode,
    pub knob_level: u8,
    /// `None` until a reading has been taken while Running.
    pub temperature_c: Option<f32>,
    pub error: Option<f32>,
    pub set_point_c: f32,
    pub duty: u8,
    pub integral: f32,
    pub at_setpoint: bool,
}
