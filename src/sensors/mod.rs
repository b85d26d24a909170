//! Sensor subsystem — thermistor and control knob.
//!
//! Both sensors share one ADC and are sampled once per control period.
//! Nothing here keeps history between periods.

pub mod calibration;
pub mod control_knob;
pub mod temperature;

/// Raw 8-bit thermistor code (upper byte of a left-adjusted conversion).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SensorCode(pub u8);

impl SensorCode {
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl From<u8> for SensorCode {
    fn from(raw: u8) -> Self {
        Self(raw)
    }
}

/// Quantized operator knob position, 0–3.
///
/// Zero means "heater off".  Any nonzero level enables regulation; the
/// individual levels carry no further meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ControlInput(u8);

impl ControlInput {
    pub const OFF: Self = Self(0);
    /// Highest level the knob can report.
    pub const MAX_LEVEL: u8 = 3;

    /// Build from a level, saturating at [`Self::MAX_LEVEL`].
    pub const fn new(level: u8) -> Self {
        if level > Self::MAX_LEVEL {
            Self(Self::MAX_LEVEL)
        } else {
            Self(level)
        }
    }

    /// Quantize an 8-bit conversion to its two most significant bits.
    pub const fn from_conversion(high: u8) -> Self {
        Self(high >> 6)
    }

    pub const fn level(self) -> u8 {
        self.0
    }

    /// Whether the operator has asked for the heater to run.
    pub const fn is_enabled(self) -> bool {
        self.0 != 0
    }
}
