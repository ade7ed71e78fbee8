//! Release / apex / impact detection.
//!
//! A small threshold state machine over consecutive motion states. The
//! detector carries two pieces of memory between calls: whether the object
//! is currently in flight, and the vertical velocity seen on the previous call.
//!
//! The three checks run sequentially within one call and are not exclusive.
//! Each check sees `in_flight` as left by the check before it, so a single
//! call can emit Release, Apex and Impact together when the thresholds line up.

use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::{MotionEvent, MotionState};

/// Thresholds for event detection.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EventConfig {
    /// Release fires when the z-axis acceleration drops strictly below this (m/s²).
    pub release_accel_z: f32,

    /// Impact fires when the raw acceleration magnitude is strictly above this (m/s²).
    pub impact_accel_magnitude: f32,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            release_accel_z: -7.0,
            impact_accel_magnitude: 20.0,
        }
    }
}

/// Threshold state machine producing [`MotionEvent`]s.
#[derive(Debug, Clone)]
pub struct EventDetector {
    config: EventConfig,
    in_flight: bool,
    last_vertical_velocity: f32,
}

impl EventDetector {
    pub fn new(config: EventConfig) -> Self {
        Self {
            config,
            in_flight: false,
            last_vertical_velocity: 0.0,
        }
    }

    /// Evaluate the current state and return the events it triggers.
    ///
    /// `previous` is the state handed to the prior call. The apex check uses
    /// the detector's own velocity memory rather than `previous`, so the two
    /// agree only while every call is routed through this detector.
    pub fn update(&mut self, current: &MotionState, _previous: &MotionState) -> Vec<MotionEvent> {
        let mut events = Vec::new();

        if !self.in_flight && current.linear.acc.z < self.config.release_accel_z {
            self.in_flight = true;
            debug!("release at t={:.3}s (acc.z={:.2})", current.time, current.linear.acc.z);
            events.push(MotionEvent::Release { time: current.time });
        }

        if self.in_flight
            && self.last_vertical_velocity > 0.0
            && current.linear.vertical_velocity <= 0.0
        {
            debug!("apex at t={:.3}s", current.time);
            events.push(MotionEvent::Apex { time: current.time });
        }

        if self.in_flight && current.linear.acc.magnitude() > self.config.impact_accel_magnitude {
            self.in_flight = false;
            debug!(
                "impact at t={:.3}s (|acc|={:.2})",
                current.time,
                current.linear.acc.magnitude()
            );
            events.push(MotionEvent::Impact { time: current.time });
        }

        self.last_vertical_velocity = current.linear.vertical_velocity;
        events
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn last_vertical_velocity(&self) -> f32 {
        self.last_vertical_velocity
    }

    pub fn reset(&mut self) {
        self.in_flight = false;
        self.last_vertical_velocity = 0.0;
    }
}

impl Default for EventDetector {
    fn default() -> Self {
        Self::new(EventConfig::default())
    }
}
