//! Swing Sensing Engine
//!
//! Replays a synthetic toss-and-catch through the pipeline and prints one
//! line per sample. An optional argument names a JSON pipeline config.
//!
//! This is the entry point for standalone binaries. For library use, see lib.rs.

use std::process;

use swing_sensing::{MotionPipeline, PipelineConfig, RawSample};

fn load_config() -> PipelineConfig {
    let Some(path) = std::env::args().nth(1) else {
        return PipelineConfig::default();
    };
    let text = std::fs::read_to_string(&path).unwrap_or_else(|e| {
        eprintln!("swing-sensing: cannot read {path}: {e}");
        process::exit(1);
    });
    PipelineConfig::from_json_str(&text).unwrap_or_else(|e| {
        eprintln!("swing-sensing: {path}: {e}");
        process::exit(1);
    })
}

/// At rest, wind-up with spin, free fall, impact, settle.
fn synthetic_toss(start_ms: u64) -> Vec<RawSample> {
    let mut samples = Vec::new();
    let mut t = start_ms;
    let mut push = |accel: [i16; 3], gyro: [i16; 3]| {
        samples.push(RawSample::new(t, accel, gyro));
        t += 19;
    };

    for _ in 0..10 {
        push([0, 0, 1000], [0, 0, 0]);
    }
    for i in 0..8 {
        push([0, 0, 1400 + i * 50], [0, 1200, 22500]);
    }
    for _ in 0..20 {
        push([0, 0, -950], [0, 900, 20000]);
    }
    push([1800, 300, 1700], [0, 0, 3000]);
    for _ in 0..10 {
        push([0, 0, 1000], [0, 0, 0]);
    }
    samples
}

fn main() {
    println!("Swing Sensing Engine v{}", env!("CARGO_PKG_VERSION"));

    let mut pipeline = MotionPipeline::try_new(load_config()).unwrap_or_else(|e| {
        eprintln!("swing-sensing: {e}");
        process::exit(1);
    });

    for raw in synthetic_toss(1_700_000_000_000) {
        let out = pipeline.process(&raw);
        let k = out.kpi;
        let events: Vec<String> = out.events.iter().map(|e| format!("{:?}", e.kind())).collect();
        println!(
            "t={} |a|={:6.2} |w|={:7.2} spin={:6.2} power={:7.2} tilt={:6.2} {}",
            k.timestamp,
            k.accel_magnitude,
            k.angular_speed,
            k.spin_rpm,
            k.estimated_power,
            k.tilt_deg,
            events.join(",")
        );
    }

    match pipeline.flight_time() {
        Some(secs) => println!("Flight time: {:.3}s", secs),
        None => println!("Flight time: n/a"),
    }
}
