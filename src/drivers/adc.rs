//! Bounded-wait ADC sampling.
//!
//! A conversion is started and then polled until it completes or the
//! poll budget runs out.  The budget replaces an open-ended busy-wait so
//! a wedged converter surfaces as [`SensorError::Timeout`] instead of
//! hanging the control loop.

use crate::error::SensorError;

/// One ADC input, already configured for 8-bit left-adjusted results.
pub trait AdcChannel {
    /// Kick off a conversion on this channel.
    fn start(&mut self) -> Result<(), SensorError>;

    /// Check for completion.  `Some(high_byte)` once the result is ready.
    fn poll(&mut self) -> Result<Option<u8>, SensorError>;
}

impl<T: AdcChannel + ?Sized> AdcChannel for &mut T {
    fn start(&mut self) -> Result<(), SensorError> {
        (**self).start()
    }

    fn poll(&mut self) -> Result<Option<u8>, SensorError> {
        (**self).poll()
    }
}

/// Start a conversion and wait at most `poll_limit` polls for the result.
pub fn sample_bounded<A: AdcChannel>(adc: &mut A, poll_limit: u32) -> Result<u8, SensorError> {
    adc.start()?;
    for _ in 0..poll_limit {
        if let Some(high) = adc.poll()? {
            return Ok(high);
        }
        core::hint::spin_loop();
    }
    Err(SensorError::Timeout)
}
