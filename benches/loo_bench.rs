use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use twittp::distance::{
    DistanceMetric, DynamicTimeWarping, MetricKind, SlidingWindow, TrendDistance,
};
use twittp::evaluation::LeaveOneOut;
use twittp::models::{FeatureWeights, TrendLine, TrendModel};

fn synthetic_line(seed: usize, len: usize, trending: bool) -> TrendLine {
    let mut line = TrendLine::blank(format!("t{seed}"), 0, 120, len, trending);
    for (i, cell) in line.data.iter_mut().enumerate() {
        let phase = (i + seed) as f64 * 0.15;
        let base = if trending { 20.0 } else { 5.0 };
        cell.count = (base * (1.0 + phase.sin())) as u64;
    }
    line.compute_deltas();
    line
}

fn synthetic_model(lines: usize) -> TrendModel {
    TrendModel::from_trends(
        (0..lines)
            .map(|i| synthetic_line(i, 30 + (i * 7) % 90, i % 2 == 0))
            .collect(),
    )
}

fn bench_pair_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("pair_distance");
    let weights = FeatureWeights::default();
    for n in [30, 120, 480] {
        let a = synthetic_line(1, n / 2, true);
        let b = synthetic_line(2, n, false);
        group.bench_with_input(BenchmarkId::new("sliding-window", n), &n, |bench, _| {
            let metric = SlidingWindow::new(weights);
            bench.iter(|| metric.distance(black_box(&a), black_box(&b)))
        });
        group.bench_with_input(BenchmarkId::new("dtw", n), &n, |bench, _| {
            let metric = DynamicTimeWarping::new(weights);
            bench.iter(|| metric.distance(black_box(&a), black_box(&b)))
        });
    }
    group.finish();
}

fn bench_leave_one_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("leave_one_out");
    group.sample_size(10);
    for lines in [20, 60, 120] {
        let model = synthetic_model(lines);
        for kind in [MetricKind::SlidingWindow, MetricKind::Dtw] {
            let evaluator = LeaveOneOut::new(DistanceMetric::new(kind, FeatureWeights::default()));
            group.bench_with_input(BenchmarkId::new(kind.as_str(), lines), &lines, |bench, _| {
                bench.iter(|| evaluator.evaluate(black_box(&model)))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_pair_distance, bench_leave_one_out);
criterion_main!(benches);
