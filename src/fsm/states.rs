//! Concrete state handler functions and table builder.
//!
//! ```text
//!  IDLE ──[knob > 0]──▶ RUNNING
//!    ▲                     │
//!    └─────[knob == 0]─────┘
//! ```
//!
//! Idle owns the reset semantics: entering it gates the generator off,
//! zeroes the latched duty and wipes PID history.  Running only enables
//! the output path; the per-period PID evaluation is driven by the
//! service after the FSM has settled on a mode.

use super::context::{ControllerContext, OutputCommands};
use super::{ControlMode, StateDescriptor};
use crate::control::duty::Duty;
use log::{debug, info};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; ControlMode::COUNT] {
    [
        // Index 0 — Idle
        StateDescriptor {
            id: ControlMode::Idle,
            name: "Idle",
            on_enter: Some(idle_enter),
            on_exit: None,
            on_update: idle_update,
        },
        // Index 1 — Running
        StateDescriptor {
            id: ControlMode::Running,
            name: "Running",
            on_enter: Some(running_enter),
            on_exit: Some(running_exit),
            on_update: running_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE state
// ═══════════════════════════════════════════════════════════════════════════

fn idle_enter(ctx: &mut ControllerContext) {
    ctx.mode = ControlMode::Idle;
    ctx.commands = OutputCommands::all_off();
    ctx.duty = Duty::OFF;
    ctx.pid.reset();
    ctx.last_sample = None;
    info!("IDLE: heater gated off, PID history cleared");
}

fn idle_update(ctx: &mut ControllerContext) -> Option<ControlMode> {
    if ctx.control_input.is_enabled() {
        return Some(ControlMode::Running);
    }

    // Nothing may accumulate while idle.
    ctx.duty = Duty::OFF;
    ctx.pid.reset();
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  RUNNING state — generator enabled, PID evaluated every period
// ═══════════════════════════════════════════════════════════════════════════

fn running_enter(ctx: &mut ControllerContext) {
    ctx.mode = ControlMode::Running;
    ctx.commands.heater_enabled = true;
    ctx.commands.running_indicator = true;
    info!(
        "RUNNING: knob at level {}, regulating to {:.1}\u{00b0}C",
        ctx.control_input.level(),
        ctx.config.set_point()
    );
}

fn running_exit(ctx: &mut ControllerContext) {
    debug!(
        "RUNNING: leaving after {} periods ({:.0}s)",
        ctx.ticks_in_state,
        ctx.secs_in_state()
    );
}

fn running_update(ctx: &mut ControllerContext) -> Option<ControlMode> {
    if !ctx.control_input.is_enabled() {
        info!("RUNNING: knob returned to zero");
        return Some(ControlMode::Idle);
    }
    None
}
