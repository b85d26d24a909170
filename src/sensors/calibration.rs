//! Thermistor calibration table.
//!
//! The thermistor sits in a divider read by the ADC; the upper 8 bits of
//! the conversion index a table of temperatures measured against a
//! thermocouple.  The table covers every code, so translation never fails
//! and needs no interpolation.

use super::SensorCode;

/// Number of entries: one per 8-bit code.
pub const TABLE_LEN: usize = 256;

/// Temperature (°C) for each sensor code, monotonically non-decreasing.
#[rustfmt::skip]
pub const THERMISTOR_TABLE: [f32; TABLE_LEN] = [
    -66.89, -53.98, -47.36, -42.76, -39.19, -36.24, -33.71, -31.49,
    -29.51, -27.72, -26.07, -24.55, -23.14, -21.81, -20.56, -19.37,
    -18.25, -17.17, -16.15, -15.17, -14.22, -13.31, -12.43, -11.58,
    -10.76, -9.96, -9.18, -8.43, -7.69, -6.97, -6.27, -5.59,
    -4.92, -4.26, -3.62, -2.99, -2.37, -1.77, -1.17, -0.59,
    -0.01, 0.56, 1.12, 1.67, 2.21, 2.75, 3.27, 3.80,
    4.31, 4.82, 5.32, 5.82, 6.31, 6.80, 7.28, 7.76,
    8.23, 8.70, 9.16, 9.62, 10.08, 10.53, 10.98, 11.42,
    11.86, 12.30, 12.74, 13.17, 13.60, 14.03, 14.45, 14.88,
    15.30, 15.71, 16.13, 16.54, 16.95, 17.36, 17.77, 18.18,
    18.58, 18.98, 19.38, 19.78, 20.18, 20.58, 20.98, 21.37,
    21.76, 22.16, 22.55, 22.94, 23.33, 23.72, 24.11, 24.49,
    24.88, 25.27, 25.65, 26.04, 26.42, 26.81, 27.19, 27.58,
    27.96, 28.35, 28.73, 29.11, 29.50, 29.88, 30.26, 30.65,
    31.03, 31.42, 31.80, 32.19, 32.57, 32.96, 33.34, 33.73,
    34.12, 34.51, 34.89, 35.28, 35.67, 36.06, 36.46, 36.85,
    37.24, 37.64, 38.03, 38.43, 38.83, 39.23, 39.63, 40.03,
    40.44, 40.84, 41.25, 41.66, 42.07, 42.48, 42.89, 43.31,
    43.72, 44.14, 44.56, 44.99, 45.41, 45.84, 46.27, 46.70,
    47.14, 47.57, 48.01, 48.46, 48.90, 49.35, 49.80, 50.26,
    50.71, 51.17, 51.64, 52.11, 52.58, 53.05, 53.53, 54.01,
    54.50, 54.99, 55.49, 55.99, 56.49, 57.00, 57.51, 58.03,
    58.55, 59.08, 59.62, 60.16, 60.70, 61.26, 61.82, 62.38,
    62.95, 63.53, 64.12, 64.71, 65.31, 65.92, 66.54, 67.16,
    67.79, 68.44, 69.09, 69.75, 70.43, 71.11, 71.80, 72.51,
    73.23, 73.96, 74.70, 75.46, 76.23, 77.02, 77.82, 78.64,
    79.47, 80.32, 81.20, 82.09, 83.00, 83.93, 84.89, 85.87,
    86.87, 87.90, 88.96, 90.06, 91.18, 92.34, 93.53, 94.76,
    96.04, 97.35, 98.72, 100.14, 101.61, 103.14, 104.74, 106.41,
    108.16, 110.00, 111.92, 113.95, 116.10, 118.38, 120.80, 123.39,
    126.16, 129.15, 132.39, 135.93, 139.81, 144.12, 148.94, 154.41,
    160.71, 168.12, 177.05, 188.24, 202.99, 224.20, 260.13, 630.92,
];

/// Read-only lookup from sensor code to temperature.
#[derive(Debug, Clone, Copy)]
pub struct CalibrationTable {
    entries: &'static [f32; TABLE_LEN],
}

impl Default for CalibrationTable {
    fn default() -> Self {
        Self::new(&THERMISTOR_TABLE)
    }
}

impl CalibrationTable {
    pub const fn new(entries: &'static [f32; TABLE_LEN]) -> Self {
        Self { entries }
    }

    /// Temperature (°C) for `code`.  Total over the whole code range.
    pub fn translate(&self, code: SensorCode) -> f32 {
        self.entries[code.value() as usize]
    }

    /// True if no entry is smaller than its predecessor.
    pub fn is_monotonic(&self) -> bool {
        self.entries.windows(2).all(|w| w[0] <= w[1])
    }
}
