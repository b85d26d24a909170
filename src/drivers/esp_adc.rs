//! ESP-IDF one-shot ADC channels.
//!
//! Both the thermistor and the knob live on ADC1.  The one-shot driver
//! returns 12-bit results; the top 8 bits are what the rest of the
//! firmware works with.

use esp_idf_svc::sys::*;
use log::info;

use super::adc::AdcChannel;
use crate::error::{Error, SensorError};

/// Handle to ADC unit 1.
pub struct OneshotAdc {
    handle: adc_oneshot_unit_handle_t,
}

impl OneshotAdc {
    pub fn new_unit1() -> Result<Self, Error> {
        let mut handle: adc_oneshot_unit_handle_t = core::ptr::null_mut();
        let init_cfg = adc_oneshot_unit_init_cfg_t {
            unit_id: adc_unit_t_ADC_UNIT_1,
            ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
            ..Default::default()
        };
        // SAFETY: called once at boot from the main task.
        let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &mut handle) };
        if ret != ESP_OK as i32 {
            return Err(Error::Init("ADC1 unit init failed"));
        }
        Ok(Self { handle })
    }

    /// Configure `channel` and hand out a sampler for it.
    pub fn channel(&self, channel: adc_channel_t) -> Result<EspAdcChannel, Error> {
        let chan_cfg = adc_oneshot_chan_cfg_t {
            atten: adc_atten_t_ADC_ATTEN_DB_12,
            bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
        };
        // SAFETY: handle is valid for the lifetime of the firmware.
        let ret = unsafe { adc_oneshot_config_channel(self.handle, channel, &chan_cfg) };
        if ret != ESP_OK as i32 {
            return Err(Error::Init("ADC1 channel config failed"));
        }
        info!("esp_adc: ADC1 channel {} configured", channel);
        Ok(EspAdcChannel {
            handle: self.handle,
            channel,
            result: None,
        })
    }
}

pub struct EspAdcChannel {
    handle: adc_oneshot_unit_handle_t,
    channel: adc_channel_t,
    result: Option<u8>,
}

impl AdcChannel for EspAdcChannel {
    fn start(&mut self) -> Result<(), SensorError> {
        let mut raw: i32 = 0;
        // SAFETY: single main-task access; the one-shot read completes or
        // fails with the driver's own timeout.
        let ret = unsafe { adc_oneshot_read(self.handle, self.channel, &mut raw) };
        if ret != ESP_OK as i32 {
            self.result = None;
            return Err(SensorError::AdcReadFailed);
        }
        self.result = Some((raw.clamp(0, 4095) >> 4) as u8);
        Ok(())
    }

    fn poll(&mut self) -> Result<Option<u8>, SensorError> {
        Ok(self.result.take())
    }
}
