//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the thermistor and knob samplers, the relay generator and both
//! indicator LEDs, exposing them through [`SensorPort`] and
//! [`ActuatorPort`].  The scheduler side reaches the generator through
//! [`reload_duty`](HardwareAdapter::reload_duty) and
//! [`update_relay`](HardwareAdapter::update_relay).
//!
//! Generic over the ADC channel and pin types so host tests can drive it
//! with scripted channels and probe pins.

use embedded_hal::digital::OutputPin;

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::control::duty::Duty;
use crate::drivers::adc::AdcChannel;
use crate::drivers::indicator::Indicator;
use crate::drivers::slow_pwm::SlowPwm;
use crate::error::SensorError;
use crate::sensors::control_knob::ControlKnob;
use crate::sensors::temperature::TemperatureSensor;
use crate::sensors::{ControlInput, SensorCode};

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<T, K, R, L> {
    thermistor: TemperatureSensor<T>,
    knob: ControlKnob<K>,
    heater: SlowPwm<R>,
    running_led: Indicator<L>,
    setpoint_led: Indicator<L>,
}

impl<T, K, R, L> HardwareAdapter<T, K, R, L>
where
    T: AdcChannel,
    K: AdcChannel,
    R: OutputPin,
    L: OutputPin,
{
    pub fn new(
        thermistor: TemperatureSensor<T>,
        knob: ControlKnob<K>,
        heater: SlowPwm<R>,
        running_led: Indicator<L>,
        setpoint_led: Indicator<L>,
    ) -> Self {
        Self {
            thermistor,
            knob,
            heater,
            running_led,
            setpoint_led,
        }
    }

    /// Period boundary: the generator picks up the latched duty.
    pub fn reload_duty(&mut self) {
        self.heater.reload();
    }

    /// Drive the relay for the current counter phase.
    pub fn update_relay(&mut self, phase: u8) {
        self.heater.update(phase);
    }

    pub fn heater(&self) -> &SlowPwm<R> {
        &self.heater
    }

    pub fn running_led(&self) -> &Indicator<L> {
        &self.running_led
    }

    pub fn setpoint_led(&self) -> &Indicator<L> {
        &self.setpoint_led
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<T, K, R, L> SensorPort for HardwareAdapter<T, K, R, L>
where
    T: AdcChannel,
    K: AdcChannel,
    R: OutputPin,
    L: OutputPin,
{
    fn read_temperature_code(&mut self) -> Result<SensorCode, SensorError> {
        self.thermistor.read_code()
    }

    fn read_control_input(&mut self) -> ControlInput {
        self.knob.read()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<T, K, R, L> ActuatorPort for HardwareAdapter<T, K, R, L>
where
    T: AdcChannel,
    K: AdcChannel,
    R: OutputPin,
    L: OutputPin,
{
    fn enable_heater(&mut self) {
        self.heater.enable();
    }

    fn disable_heater(&mut self) {
        self.heater.disable();
    }

    fn set_duty(&mut self, duty: Duty) {
        self.heater.set_duty(duty);
    }

    fn set_running_indicator(&mut self, on: bool) {
        self.running_led.set(on);
    }

    fn set_at_setpoint_indicator(&mut self, on: bool) {
        self.setpoint_led.set(on);
    }
}
