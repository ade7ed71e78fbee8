//! Core data types for the swing sensing engine.
//!
//! This module defines the values that flow through the per-sample pipeline:
//! raw transport readings, physically scaled samples, the motion state
//! snapshots produced by the signal processor, discrete motion events and the
//! public KPI snapshot.
//!
//! Design principle: every concept gets a type. Raw tuples never cross module
//! boundaries, and every type here is an immutable value that is cheap to copy.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A three-component vector in sensor body axes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    /// The zero vector.
    pub const ZERO: Vector3 = Vector3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean magnitude `sqrt(x² + y² + z²)`.
    ///
    /// Zero for the zero vector; never NaN for finite components.
    pub fn magnitude(&self) -> f32 {
        let x2 = self.x * self.x;
        let y2 = self.y * self.y;
        let z2 = self.z * self.z;
        (x2 + y2 + z2).sqrt()
    }

    /// True when every component is finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

/// One reading exactly as the transport delivers it.
///
/// Accelerometer axes are in milli-g, gyroscope axes in centi-degrees per
/// second. The timestamp is the receive time in epoch milliseconds and is
/// expected to be monotonic-ish, but is never interpreted as a sample period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawSample {
    pub ax: i16,
    pub ay: i16,
    pub az: i16,
    pub gx: i16,
    pub gy: i16,
    pub gz: i16,
    pub timestamp_ms: u64,
}

impl RawSample {
    /// Creates a raw sample from accelerometer (milli-g) and gyroscope
    /// (centi-deg/s) triples.
    pub fn new(timestamp_ms: u64, accel_mg: [i16; 3], gyro_cdps: [i16; 3]) -> Self {
        Self {
            ax: accel_mg[0],
            ay: accel_mg[1],
            az: accel_mg[2],
            gx: gyro_cdps[0],
            gy: gyro_cdps[1],
            gz: gyro_cdps[2],
            timestamp_ms,
        }
    }
}

/// A physically scaled IMU sample.
///
/// Produced from a [`RawSample`] by [`crate::conversion::convert`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImuSample {
    /// Timestamp in seconds. Kept in f64 so epoch-scale values keep
    /// millisecond resolution.
    pub time_sec: f64,

    /// Acceleration in m/s².
    pub acc: Vector3,

    /// Angular velocity in deg/s.
    pub gyro: Vector3,
}

impl ImuSample {
    pub fn new(time_sec: f64, acc: Vector3, gyro: Vector3) -> Self {
        Self {
            time_sec,
            acc,
            gyro,
        }
    }
}

/// Instantaneous linear-motion estimate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinearState {
    /// Unfiltered acceleration vector (m/s²).
    pub acc: Vector3,

    /// Raw acceleration magnitude. Used as the speed proxy by the power KPI.
    pub speed: f32,

    /// Output of the leaky vertical-velocity integrator.
    pub vertical_velocity: f32,
}

/// Instantaneous angular-motion estimate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AngularState {
    /// Unfiltered gyroscope vector (deg/s).
    pub gyro: Vector3,

    /// Low-passed gyro magnitude divided by 2π, in revolutions per second.
    pub spin_rate: f32,
}

/// Full motion snapshot at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotionState {
    /// Seconds, carried over from [`ImuSample::time_sec`].
    pub time: f64,
    pub linear: LinearState,
    pub angular: AngularState,
}

/// Kind of a discrete motion event, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EventKind {
    Release,
    Apex,
    Impact,
}

/// A discrete occurrence detected between two consecutive motion states.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MotionEvent {
    /// The object left the hand (free fall started).
    Release { time: f64 },

    /// Vertical velocity crossed from positive to non-positive while in flight.
    Apex { time: f64 },

    /// A large acceleration spike ended the flight.
    Impact { time: f64 },
}

impl MotionEvent {
    /// Time of the state that produced this event, in seconds.
    pub fn time(&self) -> f64 {
        match self {
            MotionEvent::Release { time }
            | MotionEvent::Apex { time }
            | MotionEvent::Impact { time } => *time,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            MotionEvent::Release { .. } => EventKind::Release,
            MotionEvent::Apex { .. } => EventKind::Apex,
            MotionEvent::Impact { .. } => EventKind::Impact,
        }
    }

    pub fn is_impact(&self) -> bool {
        matches!(self, MotionEvent::Impact { .. })
    }

    pub fn is_apex(&self) -> bool {
        matches!(self, MotionEvent::Apex { .. })
    }
}

/// Public per-sample output of the pipeline.
///
/// Built fresh on every call. Event flags are edge-triggered: they are true
/// only on the call where the event fired, never latched.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KpiState {
    /// Timestamp of the raw sample (epoch ms).
    pub timestamp: u64,

    /// Magnitude of the raw, unfiltered acceleration vector (m/s²).
    pub accel_magnitude: f32,

    pub impact_detected: bool,
    pub apex_detected: bool,

    /// Magnitude of the raw gyroscope vector (deg/s).
    pub angular_speed: f32,

    /// Smoothed spin rate as reported by the spin tracker.
    pub spin_rpm: f32,

    /// Smoothed speed × spin proxy. Not a physical power unit.
    pub estimated_power: f32,

    /// Reserved. Always 0.
    pub time_since_impact_ms: u64,

    /// Accelerometer tilt, EWMA-smoothed (degrees).
    pub tilt_deg: f32,

    /// Complementary-filtered tilt (degrees).
    pub fused_tilt_deg: f32,
}
