//! Peripheral drivers: bounded-wait ADC, slow-PWM relay generator,
//! indicator LEDs and the counter-step timer.

pub mod adc;
#[cfg(target_os = "espidf")]
pub mod esp_adc;
pub mod hw_timer;
pub mod indicator;
pub mod slow_pwm;
