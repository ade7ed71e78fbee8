//! Raw transport readings to physical units.
//!
//! The sensor reports acceleration in milli-g and angular velocity in
//! centi-degrees per second. Conversion is a pure, total function: every
//! `i16` input maps to a finite output.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::{ImuSample, RawSample, Vector3};

/// Standard gravity in m/s².
pub const STANDARD_GRAVITY: f32 = 9.81;

/// Scale factors applied to raw sensor counts.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConversionConfig {
    /// Gravity used to turn g into m/s².
    pub gravity: f32,

    /// Raw accelerometer counts per g (milli-g).
    pub accel_counts_per_g: f32,

    /// Raw gyroscope counts per deg/s (centi-deg/s).
    pub gyro_counts_per_dps: f32,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            gravity: STANDARD_GRAVITY,
            accel_counts_per_g: 1000.0,
            gyro_counts_per_dps: 100.0,
        }
    }
}

/// Convert a raw sample with the default scale factors.
///
/// `acc = counts / 1000 * 9.81`, `gyro = counts / 100`, `time = ms / 1000`.
pub fn convert(raw: &RawSample) -> ImuSample {
    convert_with(raw, &ConversionConfig::default())
}

/// Convert a raw sample with explicit scale factors.
pub fn convert_with(raw: &RawSample, config: &ConversionConfig) -> ImuSample {
    let acc = |counts: i16| counts as f32 / config.accel_counts_per_g * config.gravity;
    let gyro = |counts: i16| counts as f32 / config.gyro_counts_per_dps;

    ImuSample {
        time_sec: raw.timestamp_ms as f64 / 1000.0,
        acc: Vector3::new(acc(raw.ax), acc(raw.ay), acc(raw.az)),
        gyro: Vector3::new(gyro(raw.gx), gyro(raw.gy), gyro(raw.gz)),
    }
}

impl From<&RawSample> for ImuSample {
    fn from(raw: &RawSample) -> Self {
        convert(raw)
    }
}
