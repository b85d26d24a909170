//! Thermistor sensor.
//!
//! Samples the thermistor divider through a bounded-wait conversion and
//! hands back the raw [`SensorCode`].  Translation to °C is left to the
//! [`CalibrationTable`](super::calibration::CalibrationTable) so the
//! control loop decides when (and whether) a reading is used.

use log::warn;

use super::SensorCode;
use crate::drivers::adc::{AdcChannel, sample_bounded};
use crate::error::SensorError;

pub struct TemperatureSensor<A> {
    adc: A,
    poll_limit: u32,
}

impl<A: AdcChannel> TemperatureSensor<A> {
    pub fn new(adc: A, poll_limit: u32) -> Self {
        Self { adc, poll_limit }
    }

    /// Sample the thermistor once.
    pub fn read_code(&mut self) -> Result<SensorCode, SensorError> {
        sample_bounded(&mut self.adc, self.poll_limit)
            .map(SensorCode)
            .inspect_err(|e| warn!("thermistor: {e}"))
    }
}
