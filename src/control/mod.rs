//! Control law and duty handoff.

pub mod duty;
pub mod pid;
