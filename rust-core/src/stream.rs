//! Single-consumer stream driver.
//!
//! The transport delivers samples asynchronously, but the pipeline must see
//! them one at a time and in order. `SampleStream` is that serialization
//! point: it drains one ordered channel into one pipeline, handing every
//! snapshot to a sink. It never buffers, reorders or drops samples; any
//! backpressure policy belongs to the producer side of the channel.

use std::sync::mpsc::Receiver;
use std::thread::{self, JoinHandle};

use log::info;

use crate::pipeline::MotionPipeline;
use crate::types::{KpiState, RawSample};

/// Counters accumulated while draining a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamStats {
    pub samples: u64,
    pub impacts: u64,
    pub apexes: u64,
}

/// Owns a pipeline and feeds it from a channel.
pub struct SampleStream {
    pipeline: MotionPipeline,
    stats: StreamStats,
}

impl SampleStream {
    pub fn new(pipeline: MotionPipeline) -> Self {
        Self {
            pipeline,
            stats: StreamStats::default(),
        }
    }

    /// Process every sample until all senders are dropped.
    ///
    /// Returns the counters for this run.
    pub fn run<F>(&mut self, rx: &Receiver<RawSample>, mut sink: F) -> StreamStats
    where
        F: FnMut(&KpiState),
    {
        info!("sample stream started");
        let mut run = StreamStats::default();

        while let Ok(sample) = rx.recv() {
            let kpi = self.pipeline.update(&sample);
            run.samples += 1;
            run.impacts += kpi.impact_detected as u64;
            run.apexes += kpi.apex_detected as u64;
            sink(&kpi);
        }

        self.stats.samples += run.samples;
        self.stats.impacts += run.impacts;
        self.stats.apexes += run.apexes;
        info!(
            "sample stream closed after {} samples ({} impacts)",
            run.samples, run.impacts
        );
        run
    }

    /// Lifetime counters across all runs.
    pub fn stats(&self) -> StreamStats {
        self.stats
    }

    pub fn pipeline(&self) -> &MotionPipeline {
        &self.pipeline
    }

    pub fn pipeline_mut(&mut self) -> &mut MotionPipeline {
        &mut self.pipeline
    }

    pub fn into_pipeline(self) -> MotionPipeline {
        self.pipeline
    }
}

/// Run a [`SampleStream`] on a dedicated thread.
///
/// The thread exits when every sender of `rx` is dropped and hands the
/// stream back through the join handle.
pub fn spawn_stream<F>(
    pipeline: MotionPipeline,
    rx: Receiver<RawSample>,
    sink: F,
) -> JoinHandle<SampleStream>
where
    F: FnMut(&KpiState) + Send + 'static,
{
    thread::spawn(move || {
        let mut stream = SampleStream::new(pipeline);
        stream.run(&rx, sink);
        stream
    })
}
