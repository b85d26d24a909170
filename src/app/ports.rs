//! Port traits — the hexagonal boundary between the control core and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControllerService (domain)
//! ```
//!
//! Driven adapters (ADC, relay generator, LEDs, log output) implement
//! these traits.  The [`ControllerService`](super::service::ControllerService)
//! consumes them via generics, so the core never touches hardware.

use crate::control::duty::Duty;
use crate::error::SensorError;
use crate::sensors::{ControlInput, SensorCode};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port, sampled once per period.
pub trait SensorPort {
    /// Sample the thermistor.  Fails only if the conversion does not
    /// complete within its bounded wait.
    fn read_temperature_code(&mut self) -> Result<SensorCode, SensorError>;

    /// Sample the operator knob.
    fn read_control_input(&mut self) -> ControlInput;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: duty-cycle generator and indicator LEDs.
pub trait ActuatorPort {
    /// Let the generator drive the relay.
    fn enable_heater(&mut self);

    /// Gate the generator off and open the relay immediately, whatever
    /// duty is latched.
    fn disable_heater(&mut self);

    /// Latch the duty for the next period.  Takes effect at the next
    /// period boundary, never mid-period.
    fn set_duty(&mut self, duty: Duty);

    fn set_running_indicator(&mut self, on: bool);

    fn set_at_setpoint_indicator(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The core emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Scheduler delegate (decouples scheduler from the control core)
// ───────────────────────────────────────────────────────────────

/// Callback trait the [`Scheduler`](crate::scheduler::Scheduler) invokes
/// at every period boundary.
pub trait SchedulerDelegate {
    fn on_schedule_fired(&mut self, kind: ScheduleFiredKind);
}

/// Discriminant passed to [`SchedulerDelegate::on_schedule_fired`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleFiredKind {
    /// Load the latched duty into the generator for the period starting now.
    DutyReload,
    /// Run the control cycle; its duty applies from the next boundary.
    ControlTick,
}
