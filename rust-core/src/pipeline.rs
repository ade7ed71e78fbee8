/// Complete per-sample motion pipeline.
///
/// This module composes conversion, filtering, event detection and the KPI
/// trackers into a single `RawSample -> KpiState` step.
///
/// # Architecture
///
/// 1. **Conversion**: raw counts to m/s², deg/s and seconds
/// 2. **Signal Processing**: filtered vertical velocity and spin rate
/// 3. **Event Detection**: release / apex / impact against the previous state
/// 4. **KPI Update**: flight time, spin and power trackers, in that order
/// 5. **Snapshot**: a fresh `KpiState` for downstream consumers
///
/// The pipeline is single-owner and strictly sequential. It has two lifecycle
/// states: Uninitialized (no previous state, the detector is skipped) and
/// Running. Each call is O(1), never blocks and never allocates beyond the
/// small event list.

use log::{debug, warn};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::conversion::{convert_with, ConversionConfig};
use crate::error::ConfigError;
use crate::events::{EventConfig, EventDetector};
use crate::kpi::{FlightTimeKpi, Kpi, KpiConfig, PowerKpi, SpinRateKpi};
use crate::signal::{FilterConfig, SignalProcessor};
use crate::tilt::{TiltConfig, TiltEstimator};
use crate::types::*;

/// Configuration for the complete pipeline.
///
/// Bundles every sub-component configuration into a single package.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PipelineConfig {
    /// Raw count scaling.
    pub conversion: ConversionConfig,

    /// Filter chain coefficients and nominal sample rate.
    pub filter: FilterConfig,

    /// Release and impact thresholds.
    pub events: EventConfig,

    /// EWMA smoothing for spin and power.
    pub kpi: KpiConfig,

    /// Tilt estimator coefficients.
    pub tilt: TiltConfig,
}

impl PipelineConfig {
    /// Parse a JSON document. Missing fields fall back to defaults.
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: PipelineConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every coefficient is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let unit = [
            ("filter.accel_alpha", self.filter.accel_alpha),
            ("filter.velocity_decay", self.filter.velocity_decay),
            ("filter.gyro_alpha", self.filter.gyro_alpha),
            ("kpi.spin_alpha", self.kpi.spin_alpha),
            ("kpi.power_alpha", self.kpi.power_alpha),
            ("tilt.ewma_alpha", self.tilt.ewma_alpha),
            ("tilt.fusion_alpha", self.tilt.fusion_alpha),
        ];
        for (field, value) in unit {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }

        let positive = [
            ("filter.sample_rate_hz", self.filter.sample_rate_hz),
            ("filter.gravity", self.filter.gravity),
            ("conversion.gravity", self.conversion.gravity),
            ("conversion.accel_counts_per_g", self.conversion.accel_counts_per_g),
            ("conversion.gyro_counts_per_dps", self.conversion.gyro_counts_per_dps),
            ("tilt.gyro_dt", self.tilt.gyro_dt),
            ("tilt.epsilon", self.tilt.epsilon),
            ("tilt.accel_counts_per_g", self.tilt.accel_counts_per_g),
            ("tilt.gyro_counts_per_dps", self.tilt.gyro_counts_per_dps),
        ];
        for (field, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }

        if !self.events.release_accel_z.is_finite() {
            return Err(ConfigError::OutOfRange {
                field: "events.release_accel_z",
                value: self.events.release_accel_z,
            });
        }
        if !self.events.impact_accel_magnitude.is_finite() {
            return Err(ConfigError::OutOfRange {
                field: "events.impact_accel_magnitude",
                value: self.events.impact_accel_magnitude,
            });
        }

        // Stages that carry their own copy must agree with the conversion stage
        let shared = [
            ("filter.gravity", self.filter.gravity, "conversion.gravity", self.conversion.gravity),
            (
                "tilt.accel_counts_per_g",
                self.tilt.accel_counts_per_g,
                "conversion.accel_counts_per_g",
                self.conversion.accel_counts_per_g,
            ),
            (
                "tilt.gyro_counts_per_dps",
                self.tilt.gyro_counts_per_dps,
                "conversion.gyro_counts_per_dps",
                self.conversion.gyro_counts_per_dps,
            ),
        ];
        for (field, value, reference, expected) in shared {
            if value != expected {
                return Err(ConfigError::Mismatch {
                    field,
                    value,
                    reference,
                    expected,
                });
            }
        }

        Ok(())
    }
}

/// Snapshot plus the events that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub kpi: KpiState,
    pub events: Vec<MotionEvent>,
}

/// The per-sample orchestrator. Owns all state that persists between calls.
pub struct MotionPipeline {
    config: PipelineConfig,

    // Processing stages
    signal_processor: SignalProcessor,
    event_detector: EventDetector,
    tilt_estimator: TiltEstimator,

    // KPI trackers
    flight_time: FlightTimeKpi,
    spin_rate: SpinRateKpi,
    power: PowerKpi,

    // None while Uninitialized
    previous_state: Option<MotionState>,
    samples_processed: u64,
}

impl MotionPipeline {
    /// Creates a new pipeline with given configuration.
    ///
    /// A configuration that fails [`PipelineConfig::validate`] is replaced by
    /// the defaults. Use [`MotionPipeline::try_new`] to surface the error.
    pub fn new(config: PipelineConfig) -> Self {
        match Self::try_new(config) {
            Ok(pipeline) => pipeline,
            Err(e) => {
                warn!("rejected pipeline config ({}), using defaults", e);
                Self::build(PipelineConfig::default())
            }
        }
    }

    /// Creates a new pipeline, rejecting an invalid configuration.
    pub fn try_new(config: PipelineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: PipelineConfig) -> Self {
        Self {
            signal_processor: SignalProcessor::with_config(config.filter),
            event_detector: EventDetector::new(config.events),
            tilt_estimator: TiltEstimator::new(config.tilt),
            flight_time: FlightTimeKpi::new(),
            spin_rate: SpinRateKpi::new(config.kpi.spin_alpha),
            power: PowerKpi::new(config.kpi.power_alpha),
            config,
            previous_state: None,
            samples_processed: 0,
        }
    }

    /// Process one sample and return the KPI snapshot.
    pub fn update(&mut self, raw: &RawSample) -> KpiState {
        self.process(raw).kpi
    }

    /// Process one sample and return the snapshot with the events of this call.
    pub fn process(&mut self, raw: &RawSample) -> PipelineOutput {
        // Stage 1: Conversion
        let sample = convert_with(raw, &self.config.conversion);

        // Stage 2: Signal Processing
        let state = self.signal_processor.update(&sample);

        // Stage 3: Event Detection (skipped until a previous state exists)
        let events = match self.previous_state {
            Some(ref previous) => self.event_detector.update(&state, previous),
            None => {
                debug!("pipeline running from t={:.3}s", state.time);
                Vec::new()
            }
        };

        // Stage 4: KPI Update
        self.flight_time.update(&state, &events);
        self.spin_rate.update(&state, &events);
        self.power.update(&state, &events);

        let tilt = self.tilt_estimator.update(raw);

        self.previous_state = Some(state);
        self.samples_processed += 1;

        let kpi = KpiState {
            timestamp: raw.timestamp_ms,
            accel_magnitude: state.linear.acc.magnitude(),
            impact_detected: events.iter().any(MotionEvent::is_impact),
            apex_detected: events.iter().any(MotionEvent::is_apex),
            angular_speed: state.angular.gyro.magnitude(),
            spin_rpm: self.spin_rate.current(),
            estimated_power: self.power.current(),
            time_since_impact_ms: 0,
            tilt_deg: tilt.ewma_deg,
            fused_tilt_deg: tilt.fused_deg,
        };

        PipelineOutput { kpi, events }
    }

    /// Latest Release-to-Impact duration in seconds, if both have been seen.
    pub fn flight_time(&self) -> Option<f32> {
        self.flight_time.value()
    }

    /// The state retained from the most recent call.
    pub fn previous_state(&self) -> Option<&MotionState> {
        self.previous_state.as_ref()
    }

    /// True once the first sample has been processed.
    pub fn is_running(&self) -> bool {
        self.previous_state.is_some()
    }

    /// Returns whether the event detector currently considers the object airborne.
    pub fn in_flight(&self) -> bool {
        self.event_detector.in_flight()
    }

    pub fn samples_processed(&self) -> u64 {
        self.samples_processed
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Start a fresh session: clears KPI trackers and tilt smoothing.
    ///
    /// Filter memory, detector memory and the previous state are kept, so
    /// the stream continues without a transient.
    pub fn reset_kpis(&mut self) {
        self.flight_time.reset();
        self.spin_rate.reset();
        self.power.reset();
        self.tilt_estimator.reset();
    }

    /// Return the whole pipeline to the Uninitialized state.
    pub fn reset(&mut self) {
        self.reset_kpis();
        self.signal_processor.reset();
        self.event_detector.reset();
        self.previous_state = None;
        self.samples_processed = 0;
    }
}

impl Default for MotionPipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}
