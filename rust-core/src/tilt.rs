//! Accelerometer tilt with a complementary gyro blend.
//!
//! Works on raw counts: acceleration in g, the y-axis gyro in deg/s. The
//! accelerometer angle is `90° − atan2(ay, sqrt(ax² + az²))`. Two smoothed
//! views are kept:
//! - an EWMA of the accelerometer angle
//! - a complementary filter that integrates the y gyro and leans on the
//!   accelerometer angle to cancel drift
//!
//! The `atan2` denominator vanishes when gravity lies along the y axis. Below
//! `epsilon` the sample is skipped and the previous outputs are held, so a
//! degenerate tick never writes NaN or Inf into the filter memory.

use log::warn;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::RawSample;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TiltConfig {
    /// EWMA coefficient for the accelerometer angle.
    pub ewma_alpha: f32,

    /// Weight of the gyro-propagated angle in the complementary filter.
    pub fusion_alpha: f32,

    /// Gyro integration step in seconds.
    pub gyro_dt: f32,

    /// Smallest usable `sqrt(ax² + az²)` in g.
    pub epsilon: f32,

    /// Raw accelerometer counts per g.
    pub accel_counts_per_g: f32,

    /// Raw gyroscope counts per deg/s.
    pub gyro_counts_per_dps: f32,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            ewma_alpha: 0.2,
            fusion_alpha: 0.98,
            gyro_dt: 0.04,
            epsilon: 0.001,
            accel_counts_per_g: 1000.0,
            gyro_counts_per_dps: 100.0,
        }
    }
}

/// Output of one tilt step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TiltReading {
    /// EWMA-smoothed accelerometer angle (degrees).
    pub ewma_deg: f32,

    /// Complementary-filtered angle (degrees).
    pub fused_deg: f32,

    /// True when the sample was skipped and the values are held.
    pub degenerate: bool,
}

#[derive(Debug, Clone)]
pub struct TiltEstimator {
    config: TiltConfig,
    ewma: f32,
    fused: f32,
    degenerate_count: u64,
}

impl TiltEstimator {
    pub fn new(config: TiltConfig) -> Self {
        Self {
            config,
            ewma: 0.0,
            fused: 0.0,
            degenerate_count: 0,
        }
    }

    pub fn update(&mut self, raw: &RawSample) -> TiltReading {
        let ax = raw.ax as f32 / self.config.accel_counts_per_g;
        let ay = raw.ay as f32 / self.config.accel_counts_per_g;
        let az = raw.az as f32 / self.config.accel_counts_per_g;
        let gy_dps = raw.gy as f32 / self.config.gyro_counts_per_dps;

        let denominator = (ax * ax + az * az).sqrt();
        if denominator < self.config.epsilon {
            self.degenerate_count += 1;
            warn!(
                "tilt denominator {:.6} below {}, holding previous angle",
                denominator, self.config.epsilon
            );
            return TiltReading {
                ewma_deg: self.ewma,
                fused_deg: self.fused,
                degenerate: true,
            };
        }

        let angle = 90.0 - ay.atan2(denominator).to_degrees();

        let alpha = self.config.ewma_alpha;
        self.ewma = alpha * angle + (1.0 - alpha) * self.ewma;

        let gyro_angle = self.fused + gy_dps * self.config.gyro_dt;
        let beta = self.config.fusion_alpha;
        self.fused = beta * gyro_angle + (1.0 - beta) * angle;

        TiltReading {
            ewma_deg: self.ewma,
            fused_deg: self.fused,
            degenerate: false,
        }
    }

    /// Last emitted values, without stepping.
    pub fn reading(&self) -> TiltReading {
        TiltReading {
            ewma_deg: self.ewma,
            fused_deg: self.fused,
            degenerate: false,
        }
    }

    /// Number of samples skipped by the degeneracy guard.
    pub fn degenerate_count(&self) -> u64 {
        self.degenerate_count
    }

    pub fn reset(&mut self) {
        self.ewma = 0.0;
        self.fused = 0.0;
        self.degenerate_count = 0;
    }
}

impl Default for TiltEstimator {
    fn default() -> Self {
        Self::new(TiltConfig::default())
    }
}
