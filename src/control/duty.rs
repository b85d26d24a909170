//! Heater duty value and the single-slot register that carries it from
//! the control tick to the duty-cycle generator.

use core::sync::atomic::{AtomicU8, Ordering};

/// Fraction-on of the heater for one period, in 1/256ths.
///
/// The PID controller only ever produces `0` or a value inside the
/// configured `[duty_min, duty_max]` band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duty(u8);

impl Duty {
    /// Heater fully off.
    pub const OFF: Self = Self(0);

    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    pub const fn is_off(self) -> bool {
        self.0 == 0
    }

    /// Portion of the period the relay is closed.
    pub fn fraction_on(self) -> f32 {
        f32::from(self.0) / 256.0
    }
}

/// Single-slot handoff between the control tick (writer) and the
/// generator's period reload (reader).
///
/// The two sides may run from independent interrupt sources, so the slot
/// is one atomic byte: a reader always sees either the old or the new
/// duty, never a torn value.
#[derive(Debug, Default)]
pub struct DutyRegister(AtomicU8);

impl DutyRegister {
    pub const fn new() -> Self {
        Self(AtomicU8::new(0))
    }

    pub fn store(&self, duty: Duty) {
        self.0.store(duty.value(), Ordering::Release);
    }

    pub fn load(&self) -> Duty {
        Duty(self.0.load(Ordering::Acquire))
    }
}
