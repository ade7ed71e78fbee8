//! Incremental performance indicators.
//!
//! Each tracker consumes the `(state, events)` pair of every pipeline call and
//! keeps its own accumulator. There is no shared base state: trackers are
//! independent structs behind the small [`Kpi`] capability trait.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::{MotionEvent, MotionState};

/// Common interface of all KPI trackers.
pub trait Kpi {
    /// Fold one pipeline step into the tracker.
    fn update(&mut self, state: &MotionState, events: &[MotionEvent]);

    /// Current value, or `None` while the tracker has nothing to report.
    fn value(&self) -> Option<f32>;

    /// Return to the freshly constructed state (session boundary).
    fn reset(&mut self);
}

/// Smoothing factors for the EWMA trackers.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KpiConfig {
    pub spin_alpha: f32,
    pub power_alpha: f32,
}

impl Default for KpiConfig {
    fn default() -> Self {
        Self {
            spin_alpha: 0.18,
            power_alpha: 0.16,
        }
    }
}

/// Time between the most recent Release and the most recent Impact.
///
/// Both ends are overwritten independently whenever their event recurs, so
/// the value may pair a Release and an Impact from different flights.
#[derive(Debug, Clone, Default)]
pub struct FlightTimeKpi {
    release_time: Option<f64>,
    impact_time: Option<f64>,
}

impl FlightTimeKpi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn release_time(&self) -> Option<f64> {
        self.release_time
    }

    pub fn impact_time(&self) -> Option<f64> {
        self.impact_time
    }
}

impl Kpi for FlightTimeKpi {
    fn update(&mut self, _state: &MotionState, events: &[MotionEvent]) {
        for event in events {
            match *event {
                MotionEvent::Release { time } => self.release_time = Some(time),
                MotionEvent::Impact { time } => self.impact_time = Some(time),
                MotionEvent::Apex { .. } => {}
            }
        }
    }

    fn value(&self) -> Option<f32> {
        match (self.release_time, self.impact_time) {
            (Some(t0), Some(t1)) => Some((t1 - t0) as f32),
            _ => None,
        }
    }

    fn reset(&mut self) {
        self.release_time = None;
        self.impact_time = None;
    }
}

/// EWMA of the processor's spin rate: `s += α·(spin − s)`.
#[derive(Debug, Clone)]
pub struct SpinRateKpi {
    alpha: f32,
    smoothed: f32,
}

impl SpinRateKpi {
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha,
            smoothed: 0.0,
        }
    }

    /// The smoothed value. Always defined, starts at 0.
    pub fn current(&self) -> f32 {
        self.smoothed
    }
}

impl Default for SpinRateKpi {
    fn default() -> Self {
        Self::new(KpiConfig::default().spin_alpha)
    }
}

impl Kpi for SpinRateKpi {
    fn update(&mut self, state: &MotionState, _events: &[MotionEvent]) {
        self.smoothed += self.alpha * (state.angular.spin_rate - self.smoothed);
    }

    fn value(&self) -> Option<f32> {
        Some(self.smoothed)
    }

    fn reset(&mut self) {
        self.smoothed = 0.0;
    }
}

/// EWMA of the `speed × spin_rate` heuristic.
///
/// A relative effort indicator only; it carries no physical power unit.
#[derive(Debug, Clone)]
pub struct PowerKpi {
    alpha: f32,
    smoothed: f32,
}

impl PowerKpi {
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha,
            smoothed: 0.0,
        }
    }

    pub fn current(&self) -> f32 {
        self.smoothed
    }
}

impl Default for PowerKpi {
    fn default() -> Self {
        Self::new(KpiConfig::default().power_alpha)
    }
}

impl Kpi for PowerKpi {
    fn update(&mut self, state: &MotionState, _events: &[MotionEvent]) {
        let proxy = state.linear.speed * state.angular.spin_rate;
        self.smoothed += self.alpha * (proxy - self.smoothed);
    }

    fn value(&self) -> Option<f32> {
        Some(self.smoothed)
    }

    fn reset(&mut self) {
        self.smoothed = 0.0;
    }
}
