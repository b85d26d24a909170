//! Operator control knob (trimpot on the shared ADC).

use log::warn;

use super::ControlInput;
use crate::drivers::adc::{AdcChannel, sample_bounded};

pub struct ControlKnob<A> {
    adc: A,
    poll_limit: u32,
}

impl<A: AdcChannel> ControlKnob<A> {
    pub fn new(adc: A, poll_limit: u32) -> Self {
        Self { adc, poll_limit }
    }

    /// Sample the knob once.
    ///
    /// A failed conversion reads as [`ControlInput::OFF`]: without a
    /// trustworthy knob position the heater must not be enabled.
    pub fn read(&mut self) -> ControlInput {
        match sample_bounded(&mut self.adc, self.poll_limit) {
            Ok(high) => ControlInput::from_conversion(high),
            Err(e) => {
                warn!("control knob: {e}, treating as off");
                ControlInput::OFF
            }
        }
    }
}
