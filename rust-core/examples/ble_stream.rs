/// Streaming example: decode 12-byte BLE notifications on a producer thread
/// and drain them through a single pipeline consumer.
use std::sync::mpsc;
use std::thread;

use swing_sensing::{decode_sample, spawn_stream, MotionPipeline, RawSample};

fn main() {
    println!("=== Swing Sensing Engine: BLE Stream Example ===\n");

    let (tx, rx) = mpsc::channel::<RawSample>();

    let consumer = spawn_stream(MotionPipeline::default(), rx, |kpi| {
        if kpi.impact_detected {
            println!("  impact @ {}ms  spin={:.2} power={:.1}", kpi.timestamp, kpi.spin_rpm, kpi.estimated_power);
        }
    });

    // Stand-in for the notification callback
    let producer = thread::spawn(move || {
        let mut t: u64 = 1_700_000_000_000;
        let mut rejected = 0;
        for round in 0..5 {
            for payload in toss_payloads(round) {
                match decode_sample(&payload, t) {
                    Ok(sample) => {
                        if tx.send(sample).is_err() {
                            return rejected;
                        }
                    }
                    Err(e) => {
                        eprintln!("  dropped notification: {}", e);
                        rejected += 1;
                    }
                }
                t += 19;
            }
        }
        rejected
    });

    let rejected = producer.join().unwrap_or(0);
    let stream = match consumer.join() {
        Ok(stream) => stream,
        Err(_) => {
            eprintln!("stream thread panicked");
            return;
        }
    };

    let stats = stream.stats();
    println!("\nSamples:  {}", stats.samples);
    println!("Impacts:  {}", stats.impacts);
    println!("Apexes:   {}", stats.apexes);
    println!("Rejected: {}", rejected);
    if let Some(secs) = stream.pipeline().flight_time() {
        println!("Last flight: {:.0}ms", secs * 1000.0);
    }
}

/// One toss worth of encoded notifications, plus one truncated packet.
fn toss_payloads(round: u64) -> Vec<Vec<u8>> {
    let spin = 15000 + round as i16 * 2000;
    let mut payloads = Vec::new();
    for _ in 0..10 {
        payloads.push(RawSample::new(0, [0, 0, 1000], [0, 0, 0]).to_payload().to_vec());
    }
    for _ in 0..12 {
        payloads.push(RawSample::new(0, [0, 0, -900], [0, 500, spin]).to_payload().to_vec());
    }
    payloads.push(RawSample::new(0, [2000, 0, 1500], [0, 0, 0]).to_payload().to_vec());
    payloads.push(vec![0x01, 0x02, 0x03]);
    payloads
}
