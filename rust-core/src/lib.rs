//! Swing Sensing Engine Library
//!
//! A real-time kinematics core for a wearable or in-ball 6-axis IMU. Each
//! transport sample goes in, a self-contained KPI snapshot comes out.
//!
//! # Design Philosophy
//!
//! - **Sequential by construction**: one owner, one call per sample, state
//!   carried strictly in call order.
//! - **Never halt the stream**: degenerate samples degrade to "no update this
//!   tick"; nothing on the per-sample path returns an error or panics.
//! - **O(1) per sample**: single-pole filters, no history buffers.
//!
//! # Example
//!
//! ```
//! use swing_sensing::{MotionPipeline, RawSample};
//!
//! let mut pipeline = MotionPipeline::default();
//!
//! // At rest, then a toss (free fall on z), then a catch
//! let kpi = pipeline.update(&RawSample::new(1000, [0, 0, 1000], [0, 0, 0]));
//! assert!(!kpi.impact_detected);
//! pipeline.update(&RawSample::new(1019, [0, 0, -900], [0, 0, 0]));
//! let kpi = pipeline.update(&RawSample::new(1038, [2000, 0, 1500], [0, 0, 0]));
//! assert!(kpi.impact_detected);
//! assert!(pipeline.flight_time().is_some());
//! ```

pub mod conversion;
pub mod error;
pub mod events;
pub mod kpi;
pub mod pipeline;
pub mod signal;
pub mod stream;
pub mod tilt;
pub mod types;
pub mod wire;

#[cfg(test)]
mod stress_tests;

// Re-export commonly used types
pub use conversion::{convert, ConversionConfig};
pub use error::{ConfigError, WireError};
pub use events::{EventConfig, EventDetector};
pub use kpi::{FlightTimeKpi, Kpi, KpiConfig, PowerKpi, SpinRateKpi};
pub use pipeline::{MotionPipeline, PipelineConfig, PipelineOutput};
pub use signal::{FilterConfig, SignalProcessor};
pub use stream::{spawn_stream, SampleStream, StreamStats};
pub use tilt::{TiltConfig, TiltEstimator, TiltReading};
pub use types::{
    AngularState, EventKind, ImuSample, KpiState, LinearState, MotionEvent, MotionState,
    RawSample, Vector3,
};
pub use wire::decode_sample;
