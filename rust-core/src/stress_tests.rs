/// Production-level stress testing for the swing pipeline.
///
/// These tests are designed to expose real-world failure modes that would only
/// appear under extreme, sustained, or pathological conditions.

#[cfg(test)]
mod stress_tests {
    use std::sync::mpsc;

    use crate::pipeline::*;
    use crate::stream::spawn_stream;
    use crate::types::*;

    const PERIOD_MS: u64 = 19;
    const CYCLE_LEN: usize = 104;

    /// One 2-second toss cycle: rest, push, free fall, catch, settle.
    fn toss_cycle_sample(index_in_cycle: usize, timestamp_ms: u64) -> RawSample {
        match index_in_cycle {
            0..=29 => RawSample::new(timestamp_ms, [0, 0, 1000], [0, 0, 0]),
            30..=39 => RawSample::new(timestamp_ms, [0, 0, 1500], [0, 1500, 20000]),
            40..=59 => RawSample::new(timestamp_ms, [0, 0, -815], [0, 900, 18000]),
            60 => RawSample::new(timestamp_ms, [1529, 0, 2039], [0, 0, 2000]),
            _ => RawSample::new(timestamp_ms, [0, 0, 1000], [0, 0, 0]),
        }
    }

    fn assert_finite(kpi: &KpiState) {
        assert!(kpi.accel_magnitude.is_finite(), "accel {:?}", kpi);
        assert!(kpi.angular_speed.is_finite(), "gyro {:?}", kpi);
        assert!(kpi.spin_rpm.is_finite(), "spin {:?}", kpi);
        assert!(kpi.estimated_power.is_finite(), "power {:?}", kpi);
        assert!(kpi.tilt_deg.is_finite(), "tilt {:?}", kpi);
        assert!(kpi.fused_tilt_deg.is_finite(), "fused tilt {:?}", kpi);
        assert!(kpi.spin_rpm >= 0.0);
        assert!(kpi.estimated_power >= 0.0);
    }

    /// Deterministic pseudo-random counts
    struct Lcg(u64);

    impl Lcg {
        fn next_i16(&mut self) -> i16 {
            self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (self.0 >> 48) as u16 as i16
        }
    }

    // ============================================================================
    // CATEGORY 1: EXTREME DURATION & THROUGHPUT
    // ============================================================================

    /// 10 minute session at 52Hz: 300 tosses, one impact each
    #[test]
    fn stress_ten_minute_session_52hz() {
        let mut pipeline = MotionPipeline::default();
        let mut impacts = 0;
        let mut releases = 0;
        let total = 300 * CYCLE_LEN;

        for i in 0..total {
            let raw = toss_cycle_sample(i % CYCLE_LEN, i as u64 * PERIOD_MS);
            let out = pipeline.process(&raw);
            assert_finite(&out.kpi);
            impacts += out.kpi.impact_detected as usize;
            releases += out
                .events
                .iter()
                .filter(|e| e.kind() == EventKind::Release)
                .count();

            if i % CYCLE_LEN == 60 {
                let flight = pipeline.flight_time().expect("toss completed");
                assert!(
                    (flight - 0.38).abs() < 1e-3,
                    "cycle {}: flight time {}",
                    i / CYCLE_LEN,
                    flight
                );
            }
        }

        assert_eq!(impacts, 300);
        assert_eq!(releases, 300);
        assert_eq!(pipeline.samples_processed(), total as u64);
        assert!(!pipeline.in_flight());
    }

    /// Integrator stays bounded through a long free fall
    #[test]
    fn stress_endless_free_fall() {
        let mut pipeline = MotionPipeline::default();
        pipeline.update(&RawSample::new(0, [0, 0, 1000], [0, 0, 0]));

        let mut apexes = 0;
        let mut last_v = 0.0_f32;
        for i in 1..20_000u64 {
            let out = pipeline.process(&RawSample::new(i * PERIOD_MS, [0, 0, -815], [0, 0, 0]));
            assert!(!out.kpi.impact_detected);
            apexes += out.kpi.apex_detected as usize;
            last_v = pipeline
                .previous_state()
                .map(|s| s.linear.vertical_velocity)
                .unwrap_or_default();
        }

        assert!(pipeline.in_flight());
        assert!(apexes <= 1);
        // Settles at β·x·dt / (1−β), x being the converged |a| − g
        let x = 8.0 - 9.81;
        let settle = 0.98 * x * (1.0 / 52.0) / 0.02;
        assert!((last_v - settle).abs() < 0.05, "v = {}, expected ~{}", last_v, settle);
    }

    /// Channel-driven stream keeps up with a full session
    #[test]
    fn stress_stream_thread_full_session() {
        let (tx, rx) = mpsc::channel();
        let handle = spawn_stream(MotionPipeline::default(), rx, |kpi| assert_finite(kpi));

        let total = 100 * CYCLE_LEN;
        for i in 0..total {
            tx.send(toss_cycle_sample(i % CYCLE_LEN, i as u64 * PERIOD_MS))
                .expect("stream thread alive");
        }
        drop(tx);

        let stream = handle.join().expect("stream thread panicked");
        assert_eq!(stream.stats().samples, total as u64);
        assert_eq!(stream.stats().impacts, 100);
    }

    // ============================================================================
    // CATEGORY 2: PATHOLOGICAL INPUT
    // ============================================================================

    /// Full-scale counts on every axis, alternating sign
    #[test]
    fn stress_saturated_counts() {
        let mut pipeline = MotionPipeline::default();
        for i in 0..5_000u64 {
            let (a, g) = if i % 2 == 0 {
                (i16::MAX, i16::MIN)
            } else {
                (i16::MIN, i16::MAX)
            };
            let kpi = pipeline.update(&RawSample::new(i * PERIOD_MS, [a, a, a], [g, g, g]));
            assert_finite(&kpi);
        }
    }

    /// Random noise across the whole i16 range
    #[test]
    fn stress_random_counts() {
        let mut rng = Lcg(0x5eed);
        let mut pipeline = MotionPipeline::default();
        for i in 0..20_000u64 {
            let accel = [rng.next_i16(), rng.next_i16(), rng.next_i16()];
            let gyro = [rng.next_i16(), rng.next_i16(), rng.next_i16()];
            let kpi = pipeline.update(&RawSample::new(i * PERIOD_MS, accel, gyro));
            assert_finite(&kpi);
        }
        let v = pipeline.previous_state().map(|s| s.linear.vertical_velocity);
        assert!(v.map_or(false, f32::is_finite));
    }

    /// Disconnected sensor reporting all zeros
    #[test]
    fn stress_all_zero_samples() {
        let mut pipeline = MotionPipeline::default();
        let mut kpi = KpiState::default();
        for i in 0..2_000u64 {
            kpi = pipeline.update(&RawSample::new(i * PERIOD_MS, [0; 3], [0; 3]));
            assert_finite(&kpi);
        }
        // Every sample is degenerate for tilt
        assert_eq!(kpi.tilt_deg, 0.0);
        assert_eq!(kpi.fused_tilt_deg, 0.0);
        assert_eq!(kpi.spin_rpm, 0.0);
        assert!(!pipeline.in_flight());
    }

    /// Tilt degeneracy interleaved with normal samples
    #[test]
    fn stress_alternating_degenerate_tilt() {
        let mut pipeline = MotionPipeline::default();
        let mut previous = KpiState::default();
        for i in 0..3_000u64 {
            let raw = if i % 3 == 0 {
                RawSample::new(i * PERIOD_MS, [0, -1000, 0], [0, 5000, 0])
            } else {
                RawSample::new(i * PERIOD_MS, [100, 200, 970], [0, 50, 0])
            };
            let kpi = pipeline.update(&raw);
            assert_finite(&kpi);
            if i % 3 == 0 && i > 0 {
                assert_eq!(kpi.tilt_deg, previous.tilt_deg);
                assert_eq!(kpi.fused_tilt_deg, previous.fused_tilt_deg);
            }
            previous = kpi;
        }
    }

    // ============================================================================
    // CATEGORY 3: TIMESTAMP ANOMALIES
    // ============================================================================

    /// Backwards, duplicate and huge timestamps pass through untouched
    #[test]
    fn stress_timestamp_anomalies() {
        let mut pipeline = MotionPipeline::default();
        let timestamps = [5_000, 5_000, 4_000, 0, u64::MAX, 1, 1_700_000_000_000, 3];

        for (i, &ts) in timestamps.iter().enumerate() {
            let accel = if i % 2 == 0 { [0, 0, 1000] } else { [200, 0, 1100] };
            let kpi = pipeline.update(&RawSample::new(ts, accel, [0, 0, 100]));
            assert_eq!(kpi.timestamp, ts);
            assert_finite(&kpi);
        }
    }

    /// Flight time is the raw difference, even when the clock runs backwards
    #[test]
    fn stress_backwards_flight_time() {
        let mut pipeline = MotionPipeline::default();
        pipeline.update(&RawSample::new(10_000, [0, 0, 1000], [0, 0, 0]));
        pipeline.update(&RawSample::new(10_019, [0, 0, -900], [0, 0, 0]));
        let kpi = pipeline.update(&RawSample::new(9_019, [2000, 0, 1500], [0, 0, 0]));

        assert!(kpi.impact_detected);
        let flight = pipeline.flight_time().expect("release and impact observed");
        assert!((flight + 1.0).abs() < 1e-6);
    }

    /// Jittered timestamps do not change the filtered output
    #[test]
    fn stress_jitter_has_no_effect_on_kinematics() {
        let mut rng = Lcg(42);
        let mut steady = MotionPipeline::default();
        let mut jittered = MotionPipeline::default();
        let mut t = 0u64;

        for i in 0..10_000u64 {
            let idx = (i as usize) % CYCLE_LEN;
            let jitter = (rng.next_i16() as i64).unsigned_abs() % 40;
            t += 1 + jitter;
            let a = steady.process(&toss_cycle_sample(idx, i * PERIOD_MS));
            let b = jittered.process(&toss_cycle_sample(idx, t));

            assert_eq!(a.kpi.spin_rpm, b.kpi.spin_rpm);
            assert_eq!(a.kpi.estimated_power, b.kpi.estimated_power);
            assert_eq!(a.kpi.tilt_deg, b.kpi.tilt_deg);
            assert_eq!(
                a.events.iter().map(|e| e.kind()).collect::<Vec<_>>(),
                b.events.iter().map(|e| e.kind()).collect::<Vec<_>>()
            );
        }
    }

    // ============================================================================
    // CATEGORY 4: LIFECYCLE CHURN
    // ============================================================================

    /// Frequent resets mid-toss never leave the pipeline inconsistent
    #[test]
    fn stress_reset_churn() {
        let mut pipeline = MotionPipeline::default();
        for i in 0..10 * CYCLE_LEN {
            if i % 37 == 0 {
                pipeline.reset();
                assert!(!pipeline.is_running());
                assert_eq!(pipeline.flight_time(), None);
            } else if i % 23 == 0 {
                pipeline.reset_kpis();
                assert_eq!(pipeline.flight_time(), None);
            }
            let out = pipeline.process(&toss_cycle_sample(i % CYCLE_LEN, i as u64 * PERIOD_MS));
            assert_finite(&out.kpi);
            if i % 37 == 0 {
                assert!(out.events.is_empty(), "detector skipped after reset");
            }
        }
    }
}
