//! Single indicator LED (active high).

use embedded_hal::digital::OutputPin;
use log::warn;

pub struct Indicator<P> {
    pin: P,
    on: bool,
}

impl<P: OutputPin> Indicator<P> {
    /// Take the pin and switch the LED off.
    pub fn new(pin: P) -> Self {
        let mut led = Self { pin, on: true };
        led.set(false);
        led
    }

    pub fn set(&mut self, on: bool) {
        if on == self.on {
            return;
        }
        let res = if on { self.pin.set_high() } else { self.pin.set_low() };
        match res {
            Ok(()) => self.on = on,
            Err(e) => warn!("indicator: pin write failed: {e:?}"),
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}
