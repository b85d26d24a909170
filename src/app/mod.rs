//! Application core — pure control logic, zero I/O.
//!
//! The period cycle (knob → power state machine → thermistor → PID →
//! duty latch) lives in [`service`].  All interaction with hardware goes
//! through the **port traits** in [`ports`], so the whole loop runs on the
//! host against mock adapters.

pub mod events;
pub mod ports;
pub mod service;
