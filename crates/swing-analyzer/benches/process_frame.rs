//! Frame Processing Benchmarks
//!
//! Measures per-frame cost of the detector; it sits on the frame-delivery
//! path and must stay far below one frame interval (~33ms).
//!
//! # Running Benchmarks
//! ```bash
//! cargo bench --package swing-analyzer --bench process_frame
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::time::Duration;

use swing_analyzer::{estimate_speed, DetectorConfig, SwingDetector};
use swing_models::MotionSample;

/// Deterministic intensity stream with periodic swings.
fn synthetic_stream(frames: usize) -> Vec<MotionSample> {
    (0..frames)
        .map(|i| {
            let phase = (i % 90) as f64 / 90.0;
            let intensity = if phase < 0.3 {
                0.05
            } else if phase < 0.5 {
                0.2
            } else if phase < 0.52 {
                0.35
            } else {
                0.02
            };
            MotionSample::new(i as i64 * 33, intensity)
        })
        .collect()
}

fn bench_process_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("process_frame");
    group.warm_up_time(Duration::from_secs(2));
    group.measurement_time(Duration::from_secs(5));

    for capacity in [30usize, 60, 240] {
        let samples = synthetic_stream(3_000);
        let config = DetectorConfig::default().with_window_capacity(capacity);

        group.throughput(Throughput::Elements(samples.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("window", capacity),
            &samples,
            |b, samples| {
                b.iter(|| {
                    let mut detector = SwingDetector::with_config(config.clone())
                        .expect("valid benchmark config");
                    for (i, sample) in samples.iter().enumerate() {
                        if i % 90 == 0 {
                            detector.reset();
                        }
                        black_box(detector.process_frame(*sample));
                    }
                })
            },
        );
    }

    group.finish();
}

fn bench_estimate_speed(c: &mut Criterion) {
    c.bench_function("estimate_speed", |b| {
        b.iter(|| estimate_speed(black_box(0.31), black_box(412)))
    });
}

criterion_group!(benches, bench_process_frame, bench_estimate_speed);
criterion_main!(benches);
