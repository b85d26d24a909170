//! Fuzz target: `control::pid::step`
//!
//! Feeds arbitrary error sequences, gains and duty bands through the PID
//! law.
//!
//! Invariants checked:
//! - No panics for any finite input
//! - The returned duty is either 0 or inside `[min, max]`
//! - The integral stays inside `[min, max]` whenever it is finite
//!
//! cargo fuzz run fuzz_pid_step

#![no_main]

use incubator::control::pid::{DutyLimits, PidParameters, PidState, step};
use libfuzzer_sys::fuzz_target;

fn f32_at(data: &[u8], i: usize) -> f32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&data[i * 4..i * 4 + 4]);
    f32::from_le_bytes(raw)
}

fuzz_target!(|data: &[u8]| {
    // 2 bytes of band, 4 floats of gains/dt, then errors.
    if data.len() < 2 + 16 {
        return;
    }
    let (band, rest) = data.split_at(2);
    let lo = band[0].min(band[1]).max(1);
    let hi = band[0].max(band[1]).max(lo);
    let limits = DutyLimits { min: lo, max: hi };

    let params = PidParameters {
        kp: f32_at(rest, 0),
        ki: f32_at(rest, 1),
        kd: f32_at(rest, 2),
        set_point: 37.5,
    };
    let dt = f32_at(rest, 3);
    if ![params.kp, params.ki, params.kd, dt].iter().all(|v| v.is_finite()) || dt <= 0.0 {
        return;
    }

    let mut state = PidState::ZERO;
    for chunk in rest[16..].chunks_exact(4) {
        let error = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        if !error.is_finite() {
            continue;
        }
        let duty = step(error, dt, &mut state, &params, limits);
        assert!(duty.is_off() || (limits.min..=limits.max).contains(&duty.value()));
        if state.integral.is_finite() {
            assert!(state.integral >= f32::from(limits.min));
            assert!(state.integral <= f32::from(limits.max));
        }
    }
});
