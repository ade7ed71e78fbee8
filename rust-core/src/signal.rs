//! Signal filtering and vertical-velocity integration.
//!
//! This module turns each physically scaled sample into a [`MotionState`]:
//! - Gravity-compensated acceleration magnitude, low-pass filtered
//! - Vertical velocity from a leaky integrator over the filtered signal
//! - Gyro magnitude, low-pass filtered and expressed as a spin rate
//!
//! All filters are single-pole and incremental (O(1) per sample, one scalar
//! of memory each). The integrator step is the fixed nominal sample period,
//! never the delta between sample timestamps.
//!
//! Stage order matters: magnitude before gravity compensation, low-pass
//! before integration. Reordering changes the frequency response.

use core::f32::consts::TAU;

use log::warn;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::conversion::STANDARD_GRAVITY;
use crate::types::{AngularState, ImuSample, LinearState, MotionState, Vector3};

/// Parameters for the filter chain.
///
/// Defaults are tuned for the 52 Hz wearable sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FilterConfig {
    /// Low-pass coefficient for the gravity-compensated acceleration magnitude.
    /// Range: (0.0, 1.0]. Higher = faster, noisier.
    pub accel_alpha: f32,

    /// Decay applied to the velocity integrator every step. Range: (0.0, 1.0].
    /// Values below 1 bound integration drift.
    pub velocity_decay: f32,

    /// Low-pass coefficient for the gyro magnitude. Range: (0.0, 1.0].
    pub gyro_alpha: f32,

    /// Nominal sensor rate in Hz. The integrator uses `1 / sample_rate_hz`.
    pub sample_rate_hz: f32,

    /// Gravity subtracted from the acceleration magnitude (m/s²).
    pub gravity: f32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            accel_alpha: 0.2,
            velocity_decay: 0.98,
            gyro_alpha: 0.3,
            sample_rate_hz: 52.0,
            gravity: STANDARD_GRAVITY,
        }
    }
}

impl FilterConfig {
    /// Fixed integration step in seconds.
    pub fn dt(&self) -> f32 {
        1.0 / self.sample_rate_hz
    }
}

/// Single-pole low-pass filter: `y = α·x + (1−α)·y_prev`.
#[derive(Debug, Clone)]
pub struct LowPassFilter {
    alpha: f32,
    value: f32,
}

impl LowPassFilter {
    /// Creates a filter with its memory at zero.
    pub fn new(alpha: f32) -> Self {
        Self { alpha, value: 0.0 }
    }

    pub fn update(&mut self, x: f32) -> f32 {
        self.value = self.alpha * x + (1.0 - self.alpha) * self.value;
        self.value
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}

/// Leaky integrator: `v = β·(v_prev + x·dt)`.
///
/// The decay acts as a high-pass on the integrated signal, so a constant
/// input settles at `β·x·dt / (1−β)` instead of growing without bound.
#[derive(Debug, Clone)]
pub struct LeakyIntegrator {
    decay: f32,
    value: f32,
}

impl LeakyIntegrator {
    pub fn new(decay: f32) -> Self {
        Self { decay, value: 0.0 }
    }

    pub fn update(&mut self, x: f32, dt: f32) -> f32 {
        self.value = self.decay * (self.value + x * dt);
        self.value
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}

/// The per-sample filter chain.
///
/// This is the hot-path component. Must be O(1) per sample with no allocation.
#[derive(Debug, Clone)]
pub struct SignalProcessor {
    config: FilterConfig,
    accel_filter: LowPassFilter,
    velocity: LeakyIntegrator,
    gyro_filter: LowPassFilter,
    dt: f32,
    last_speed: f32,
    sample_count: u64,
    held_count: u64,
}

impl SignalProcessor {
    /// Create a signal processor with default configuration.
    pub fn new() -> Self {
        Self::with_config(FilterConfig::default())
    }

    /// A non-positive or non-finite sample rate falls back to the default
    /// integration step.
    pub fn with_config(config: FilterConfig) -> Self {
        let mut dt = config.dt();
        if !(dt.is_finite() && dt > 0.0) {
            warn!(
                "unusable sample rate {} Hz, integrating at the default step",
                config.sample_rate_hz
            );
            dt = FilterConfig::default().dt();
        }

        Self {
            accel_filter: LowPassFilter::new(config.accel_alpha),
            velocity: LeakyIntegrator::new(config.velocity_decay),
            gyro_filter: LowPassFilter::new(config.gyro_alpha),
            dt,
            config,
            last_speed: 0.0,
            sample_count: 0,
            held_count: 0,
        }
    }

    /// Run one sample through the chain.
    ///
    /// A sample with a non-finite component does not step any filter. The
    /// held velocity, spin rate and last finite speed are reported with
    /// zeroed raw vectors.
    pub fn update(&mut self, sample: &ImuSample) -> MotionState {
        self.sample_count += 1;

        if !sample.acc.is_finite() || !sample.gyro.is_finite() {
            self.held_count += 1;
            warn!(
                "non-finite IMU sample at t={:.3}s, holding filter state",
                sample.time_sec
            );
            return MotionState {
                time: sample.time_sec,
                linear: LinearState {
                    acc: Vector3::ZERO,
                    speed: self.last_speed,
                    vertical_velocity: self.velocity.value(),
                },
                angular: AngularState {
                    gyro: Vector3::ZERO,
                    spin_rate: self.gyro_filter.value() / TAU,
                },
            };
        }

        let acc_magnitude = sample.acc.magnitude();
        self.last_speed = acc_magnitude;
        let acc_filtered = self.accel_filter.update(acc_magnitude - self.config.gravity);
        let vertical_velocity = self.velocity.update(acc_filtered, self.dt);

        let gyro_filtered = self.gyro_filter.update(sample.gyro.magnitude());
        let spin_rate = gyro_filtered / TAU;

        MotionState {
            time: sample.time_sec,
            linear: LinearState {
                acc: sample.acc,
                speed: acc_magnitude,
                vertical_velocity,
            },
            angular: AngularState {
                gyro: sample.gyro,
                spin_rate,
            },
        }
    }

    /// Current gravity-compensated, low-passed acceleration magnitude.
    pub fn filtered_accel(&self) -> f32 {
        self.accel_filter.value()
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.velocity.value()
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Number of samples seen, including held ones.
    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    /// Number of samples that were rejected as non-finite.
    pub fn held_count(&self) -> u64 {
        self.held_count
    }

    /// Clear all filter memory.
    pub fn reset(&mut self) {
        self.accel_filter.reset();
        self.velocity.reset();
        self.gyro_filter.reset();
        self.last_speed = 0.0;
        self.sample_count = 0;
        self.held_count = 0;
    }
}

impl Default for SignalProcessor {
    fn default() -> Self {
        Self::new()
    }
}
