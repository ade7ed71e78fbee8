/// Basic usage example: feed raw IMU counts, read KPI snapshots
use swing_sensing::{EventKind, MotionPipeline, PipelineConfig, RawSample};

fn main() {
    println!("=== Swing Sensing Engine: Basic Example ===\n");

    // Default config: 52Hz nominal rate, 1000 counts/g, 100 counts/(deg/s)
    let config = PipelineConfig::default();
    let mut pipeline = MotionPipeline::new(config);

    // Simulated ball toss, 19ms apart
    let mut samples = Vec::new();
    let mut t = 1000;
    // Resting in the hand
    for _ in 0..5 {
        samples.push(RawSample::new(t, [0, 0, 1000], [0, 0, 0]));
        t += 19;
    }
    // Throw: upward push with spin
    for _ in 0..4 {
        samples.push(RawSample::new(t, [0, 0, 1800], [0, 800, 25000]));
        t += 19;
    }
    // Free fall
    for _ in 0..15 {
        samples.push(RawSample::new(t, [0, 0, -900], [0, 600, 24000]));
        t += 19;
    }
    // Catch
    samples.push(RawSample::new(t, [1800, 0, 1900], [0, 0, 1000]));
    t += 19;
    samples.push(RawSample::new(t, [0, 0, 1000], [0, 0, 0]));

    println!("Processing {} samples...\n", samples.len());

    for raw in &samples {
        let out = pipeline.process(raw);
        for event in &out.events {
            match event.kind() {
                EventKind::Release => println!("  RELEASE at {:.3}s", event.time()),
                EventKind::Apex => println!("  APEX    at {:.3}s", event.time()),
                EventKind::Impact => println!("  IMPACT  at {:.3}s", event.time()),
            }
        }
        if out.kpi.impact_detected {
            print_snapshot(&out.kpi);
        }
    }

    match pipeline.flight_time() {
        Some(secs) => println!("\nFlight time: {:.0}ms", secs * 1000.0),
        None => println!("\nNo complete flight observed"),
    }
}

fn print_snapshot(kpi: &swing_sensing::KpiState) {
    println!("\n--- Snapshot @ {}ms ---", kpi.timestamp);
    println!("  |accel|:    {:.2} m/s²", kpi.accel_magnitude);
    println!("  |gyro|:     {:.1} deg/s", kpi.angular_speed);
    println!("  Spin:       {:.2}", kpi.spin_rpm);
    println!("  Power:      {:.1}", kpi.estimated_power);
    println!("  Tilt:       {:.1}° (fused {:.1}°)", kpi.tilt_deg, kpi.fused_tilt_deg);
}
