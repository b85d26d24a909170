//! Period scheduler.
//!
//! Models the free-running 8-bit counter that paces the whole firmware.
//! One counter step is `P / 256`; a full sweep is one control period.  The
//! scheduler notifies a [`SchedulerDelegate`] at every wrap, and exposes
//! the counter as a phase so the duty-cycle generator can decide when to
//! open the relay inside the period.
//!
//! ```text
//!  counter: 0 ──────────────── duty ─────────────────────── 255 │ 0 ...
//!           │ relay closed     │ relay open                     │
//!           ▲                                                   ▲
//!   boundary: DutyReload, then ControlTick             next boundary
//! ```
//!
//! At each boundary the generator first loads the duty latched during the
//! previous period, then the control tick computes the duty for the next
//! one.  A computed duty is therefore always applied exactly one period
//! later, and never mid-period.

use crate::app::ports::{ScheduleFiredKind, SchedulerDelegate};
use log::info;

/// Counter steps per control period.
pub const STEPS_PER_PERIOD: u32 = 256;

pub struct Scheduler {
    /// Current counter value (phase within the period).
    counter: u8,
    /// Completed periods.
    periods: u64,
    enabled: bool,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            counter: 0,
            periods: 0,
            enabled: true,
        }
    }

    /// Length of one counter step for a control period of `period_secs`.
    pub fn step_micros(period_secs: f32) -> u64 {
        (f64::from(period_secs) * 1_000_000.0 / f64::from(STEPS_PER_PERIOD)).round() as u64
    }

    /// Enable or disable boundary notifications.  The counter keeps running.
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled != self.enabled {
            info!("Scheduler: {}", if enabled { "enabled" } else { "disabled" });
        }
        self.enabled = enabled;
    }

    /// Advance the counter by one step.
    ///
    /// On wrap-around the delegate receives `DutyReload` and then
    /// `ControlTick`, in that order, before this call returns.
    pub fn step(&mut self, delegate: &mut impl SchedulerDelegate) {
        let (next, wrapped) = self.counter.overflowing_add(1);
        self.counter = next;
        if !wrapped {
            return;
        }

        self.periods += 1;
        if self.enabled {
            delegate.on_schedule_fired(ScheduleFiredKind::DutyReload);
            delegate.on_schedule_fired(ScheduleFiredKind::ControlTick);
        }
    }

    /// Process a batch of pending steps (e.g. drained from the timer).
    pub fn advance(&mut self, steps: u32, delegate: &mut impl SchedulerDelegate) {
        for _ in 0..steps {
            self.step(delegate);
        }
    }

    /// Position within the current period, 0–255.
    pub fn phase(&self) -> u8 {
        self.counter
    }

    /// Completed periods since construction.
    pub fn periods(&self) -> u64 {
        self.periods
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
