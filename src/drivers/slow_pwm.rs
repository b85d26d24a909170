//! Slow-PWM duty-cycle generator for the heater relay.
//!
//! Within each period the relay is closed while the period counter is
//! below the active duty and open for the remainder, giving a fraction-on
//! of `duty / 256`.  The period is seconds long, so the relay switches at
//! most twice per period.
//!
//! ## Duty latency
//!
//! [`set_duty`](SlowPwm::set_duty) only writes the pending slot.  The
//! active duty changes in [`reload`](SlowPwm::reload), which runs at the
//! period boundary, so a period that has started always finishes with the
//! duty it began with.
//!
//! ## Safety contract
//!
//! [`disable`](SlowPwm::disable) opens the relay immediately, whatever
//! duty is active or pending.

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::control::duty::{Duty, DutyRegister};
use crate::error::ActuatorError;

/// Electrical sense of the relay driver input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayPolarity {
    /// Pin high closes the relay.
    ActiveHigh,
    /// Pin low closes the relay.
    ActiveLow,
}

pub struct SlowPwm<P> {
    relay: P,
    polarity: RelayPolarity,
    enabled: bool,
    pending: DutyRegister,
    active: Duty,
    relay_closed: bool,
}

impl<P: OutputPin> SlowPwm<P> {
    /// Take ownership of the relay pin and open the relay.
    pub fn new(relay: P, polarity: RelayPolarity) -> Self {
        let mut pwm = Self {
            relay,
            polarity,
            enabled: false,
            pending: DutyRegister::new(),
            active: Duty::OFF,
            relay_closed: true,
        };
        let _ = pwm.drive(false);
        pwm
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Stop switching and open the relay now.
    pub fn disable(&mut self) {
        self.enabled = false;
        let _ = self.drive(false);
    }

    /// Latch the duty for the next period.
    pub fn set_duty(&mut self, duty: Duty) {
        self.pending.store(duty);
    }

    /// Period boundary: the latched duty becomes active.
    pub fn reload(&mut self) {
        self.active = self.pending.load();
    }

    /// Drive the relay for the given position within the period.
    pub fn update(&mut self, phase: u8) {
        let close = self.enabled && phase < self.active.value();
        if close != self.relay_closed {
            let _ = self.drive(close);
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn active_duty(&self) -> Duty {
        self.active
    }

    pub fn pending_duty(&self) -> Duty {
        self.pending.load()
    }

    pub fn is_relay_closed(&self) -> bool {
        self.relay_closed
    }

    fn drive(&mut self, closed: bool) -> Result<(), ActuatorError> {
        let high = match self.polarity {
            RelayPolarity::ActiveHigh => closed,
            RelayPolarity::ActiveLow => !closed,
        };
        let res = if high {
            self.relay.set_high()
        } else {
            self.relay.set_low()
        };
        match res {
            Ok(()) => {
                self.relay_closed = closed;
                Ok(())
            }
            Err(e) => {
                warn!("relay: pin write failed: {e:?}");
                Err(ActuatorError::PinWriteFailed)
            }
        }
    }
}
