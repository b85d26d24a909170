//! PID controller for heater duty.
//!
//! Trapezoidal integral, anti-windup clamp on the integral term, and an
//! asymmetric output deadband: anything below the duty floor switches the
//! heater fully off instead of letting the relay chatter at tiny duties.
//!
//! The controller itself is immutable configuration; its history lives in
//! [`PidState`], which the caller owns so the power state machine can wipe
//! it on Idle entry.

use crate::config::ControllerConfig;

use super::duty::Duty;

/// Carried PID history.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PidState {
    pub integral: f32,
    pub previous_error: f32,
}

impl PidState {
    pub const ZERO: Self = Self {
        integral: 0.0,
        previous_error: 0.0,
    };

    pub fn reset(&mut self) {
        *self = Self::ZERO;
    }

    pub fn is_reset(&self) -> bool {
        *self == Self::ZERO
    }
}

/// Fixed gains and the active target temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PidParameters {
    pub kp: f32,
    pub ki: f32,
    pub kd: f32,
    pub set_point: f32,
}

/// Duty band shared by the integral clamp and the output shaping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DutyLimits {
    pub min: u8,
    pub max: u8,
}

/// One PID evaluation.
///
/// Mutates `state` in place and returns either [`Duty::OFF`] or a duty
/// inside `[limits.min, limits.max]`.  `dt` must be positive.
pub fn step(
    error: f32,
    dt: f32,
    state: &mut PidState,
    params: &PidParameters,
    limits: DutyLimits,
) -> Duty {
    let min = f32::from(limits.min);
    let max = f32::from(limits.max);

    // Integral (trapezoidal), clamped to the output band.
    state.integral += params.ki * dt * (error + state.previous_error) * 0.5;
    state.integral = state.integral.clamp(min, max);

    // Derivative
    let d_input = (error - state.previous_error) / dt;

    let output = params.kp * error + state.integral + params.kd * d_input;

    state.previous_error = error;

    if output > max {
        Duty::new(limits.max)
    } else if output < min {
        Duty::OFF
    } else {
        // In-band and positive, so truncation is floor.
        Duty::new(output as u8)
    }
}

/// PID controller configured for one incubator.
#[derive(Debug, Clone, Copy)]
pub struct PidController {
    params: PidParameters,
    limits: DutyLimits,
    set_error_threshold: f32,
}

impl PidController {
    pub fn new(params: PidParameters, limits: DutyLimits, set_error_threshold: f32) -> Self {
        Self {
            params,
            limits,
            set_error_threshold,
        }
    }

    pub fn from_config(config: &ControllerConfig) -> Self {
        Self::new(
            PidParameters {
                kp: config.kp,
                ki: config.ki,
                kd: config.kd,
                set_point: config.set_point(),
            },
            DutyLimits {
                min: config.duty_min,
                max: config.duty_max,
            },
            config.set_error_threshold_c,
        )
    }

    /// Control error for a measured temperature (positive = too cold).
    pub fn error_for(&self, temperature_c: f32) -> f32 {
        self.params.set_point - temperature_c
    }

    /// Compute the duty for the next period.
    pub fn step(&self, error: f32, dt: f32, state: &mut PidState) -> Duty {
        step(error, dt, state, &self.params, self.limits)
    }

    /// Whether the enclosure is close enough to the target to signal it.
    pub fn at_setpoint(&self, error: f32) -> bool {
        error.abs() < self.set_error_threshold
    }

    pub fn params(&self) -> &PidParameters {
        &self.params
    }

    pub fn limits(&self) -> DutyLimits {
        self.limits
    }
}
