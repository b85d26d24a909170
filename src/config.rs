//! Controller configuration parameters.
//!
//! Everything here is fixed at build time on the device; the struct exists
//! so that tests and alternative boards can construct their own values and
//! so that the whole set can be validated in one place.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of candidate set points carried in the configuration.
pub const SET_POINT_COUNT: usize = 4;

/// What the control loop does when a temperature conversion times out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorTimeoutPolicy {
    /// Keep the previously latched duty and leave PID history untouched.
    HoldDuty,
    /// Drop to Idle: heater disabled, duty zeroed, PID history cleared.
    ForceIdle,
}

/// Core controller configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    // --- Timing ---
    /// Control period `P` in seconds (one full sweep of the 8-bit counter).
    pub period_secs: f32,

    // --- PID gains ---
    pub kp: f32,
    pub ki: f32,
    pub kd: f32,

    // --- Set points ---
    /// Candidate set points (°C).  Only `active_set_point` drives the loop.
    pub set_points: [f32; SET_POINT_COUNT],
    /// Index into `set_points` of the target temperature.
    pub active_set_point: usize,
    /// Error magnitude (°C) below which the at-setpoint indicator lights.
    pub set_error_threshold_c: f32,

    // --- Duty limits ---
    /// Smallest nonzero duty ever sent to the relay.
    pub duty_min: u8,
    /// Largest duty ever sent to the relay.
    pub duty_max: u8,

    // --- Sensor handling ---
    /// Poll budget for one ADC conversion before it counts as timed out.
    pub sensor_poll_limit: u32,
    /// Reaction to a timed-out temperature conversion.
    pub sensor_timeout_policy: SensorTimeoutPolicy,

    // --- Telemetry ---
    /// Emit a telemetry event every N periods (0 disables).
    pub telemetry_interval_periods: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            // 1 MHz system clock / 16384 prescaler / 256 counts.
            period_secs: 4.194_304,

            kp: 10.0,
            ki: 0.5,
            kd: 0.0,

            set_points: [0.0, 37.5, 40.0, 45.0],
            active_set_point: 1,
            set_error_threshold_c: 1.0,

            // Floor spares the relay; ceiling keeps the enclosure from overheating.
            duty_min: 6,
            duty_max: 200,

            sensor_poll_limit: 1000,
            sensor_timeout_policy: SensorTimeoutPolicy::ForceIdle,

            telemetry_interval_periods: 15, // ~1 min
        }
    }
}

impl ControllerConfig {
    /// The target temperature the PID loop regulates towards.
    pub fn set_point(&self) -> f32 {
        self.set_points[self.active_set_point]
    }

    /// Reject configurations the control law cannot run with.
    ///
    /// Values are never clamped here: a bad build-time constant should
    /// fail loudly at boot rather than silently change behaviour.
    pub fn validate(&self) -> Result<()> {
        if !self.period_secs.is_finite() || self.period_secs <= 0.0 {
            return Err(Error::Config("period_secs must be positive"));
        }
        if !(self.kp.is_finite() && self.ki.is_finite() && self.kd.is_finite()) {
            return Err(Error::Config("PID gains must be finite"));
        }
        if self.active_set_point >= SET_POINT_COUNT {
            return Err(Error::Config("active_set_point out of range"));
        }
        if !self.set_points.iter().all(|sp| sp.is_finite()) {
            return Err(Error::Config("set points must be finite"));
        }
        if self.duty_min == 0 {
            return Err(Error::Config("duty_min must be nonzero"));
        }
        if self.duty_min > self.duty_max {
            return Err(Error::Config("duty_min exceeds duty_max"));
        }
        if !self.set_error_threshold_c.is_finite() || self.set_error_threshold_c <= 0.0 {
            return Err(Error::Config("set_error_threshold_c must be positive"));
        }
        if self.sensor_poll_limit == 0 {
            return Err(Error::Config("sensor_poll_limit must be nonzero"));
        }
        Ok(())
    }
}
