//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC on target, stderr under test harnesses).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink {
    emitted: u32,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events written since boot.
    pub fn emitted(&self) -> u32 {
        self.emitted
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        self.emitted = self.emitted.wrapping_add(1);
        match event {
            AppEvent::Telemetry(t) => {
                let temp = t.temperature_c.unwrap_or(f32::NAN);
                let err = t.error.unwrap_or(f32::NAN);
                info!(
                    "TELEM | mode={:?} knob={} | T={:.2}\u{00b0}C set={:.1}\u{00b0}C \
                     err={:+.2} | duty={} ({:.0}%) | I={:.2} | at_set={}",
                    t.mode,
                    t.knob_level,
                    temp,
                    t.set_point_c,
                    err,
                    t.duty,
                    f32::from(t.duty) * 100.0 / 256.0,
                    t.integral,
                    t.at_setpoint,
                );
            }
            AppEvent::ModeChanged { from, to } => {
                info!("MODE | {:?} -> {:?}", from, to);
            }
            AppEvent::SensorFailed { error, policy } => {
                warn!("SENSOR | thermistor: {} (policy {:?})", error, policy);
            }
            AppEvent::Started(mode) => {
                info!("START | initial_mode={:?}", mode);
            }
        }
    }
}
