//! GPIO / peripheral pin assignments for the incubator controller board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.

use crate::drivers::slow_pwm::RelayPolarity;

// ---------------------------------------------------------------------------
// Heater relay
// ---------------------------------------------------------------------------

/// Relay driver input for the heating element.
pub const HEATER_RELAY_GPIO: i32 = 4;
/// The relay driver closes the contact when its input is pulled low.
pub const HEATER_RELAY_POLARITY: RelayPolarity = RelayPolarity::ActiveLow;

// ---------------------------------------------------------------------------
// Indicator LEDs (active high)
// ---------------------------------------------------------------------------

/// Lit while the controller is Running.
pub const LED_RUNNING_GPIO: i32 = 5;
/// Lit while the measured temperature is within the set-error threshold.
pub const LED_AT_SETPOINT_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Analog inputs (ADC1)
// ---------------------------------------------------------------------------

/// Thermistor voltage divider.  ADC1 channel 0 (GPIO 1 on ESP32-S3).
pub const THERMISTOR_ADC_CHANNEL: u32 = 0;
/// Operator control knob (trimpot).  ADC1 channel 1 (GPIO 2 on ESP32-S3).
pub const KNOB_ADC_CHANNEL: u32 = 1;
