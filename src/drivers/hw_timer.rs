//! Counter-step timer.
//!
//! A periodic timer fires once per counter step (`P / 256`).  Its callback
//! only bumps an atomic pending-step count; the main loop drains that count
//! and feeds it to the [`Scheduler`](crate::scheduler::Scheduler), so all
//! control work runs to completion in one task and never preempts itself.

use core::sync::atomic::{AtomicU32, Ordering};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

static PENDING_STEPS: AtomicU32 = AtomicU32::new(0);

/// Record one elapsed counter step.  Lock-free; safe from timer context.
pub fn record_step() {
    PENDING_STEPS.fetch_add(1, Ordering::AcqRel);
}

/// Take every step recorded since the previous call.
pub fn take_pending_steps() -> u32 {
    PENDING_STEPS.swap(0, Ordering::AcqRel)
}

#[cfg(target_os = "espidf")]
static mut STEP_TIMER: esp_timer_handle_t = core::ptr::null_mut();

#[cfg(target_os = "espidf")]
unsafe extern "C" fn step_cb(_arg: *mut core::ffi::c_void) {
    record_step();
}

/// Start the periodic step timer.
#[cfg(target_os = "espidf")]
pub fn start_step_timer(step_us: u64) -> Result<(), crate::error::Error> {
    use crate::error::Error;

    // SAFETY: STEP_TIMER is written once here from the main task before the
    // callback can fire; the callback only touches the atomic counter.
    unsafe {
        let args = esp_timer_create_args_t {
            callback: Some(step_cb),
            arg: core::ptr::null_mut(),
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: c"period_step".as_ptr(),
            skip_unhandled_events: false,
        };
        if esp_timer_create(&args, &raw mut STEP_TIMER) != ESP_OK as i32 {
            return Err(Error::Init("step timer create failed"));
        }
        if esp_timer_start_periodic(STEP_TIMER, step_us) != ESP_OK as i32 {
            return Err(Error::Init("step timer start failed"));
        }
    }
    log::info!("hw_timer: step timer started ({} us/step)", step_us);
    Ok(())
}

/// Inject elapsed steps (host simulation and tests).
#[cfg(not(target_os = "espidf"))]
pub fn sim_record_steps(steps: u32) {
    PENDING_STEPS.fetch_add(steps, Ordering::AcqRel);
}
