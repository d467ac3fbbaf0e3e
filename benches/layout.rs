use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use pie_label_layout::config::Config;
use pie_label_layout::ir::Dataset;
use pie_label_layout::layout::measure::DeterministicTextMeasurer;
use pie_label_layout::layout::{
    FixedMeasurer, LabelSize, LayoutOptions, PieGeometry, Point, Segment, compute_chart_layout,
    compute_outer_layout,
};
use std::hint::black_box;

fn skewed_dataset(slices: usize) -> Dataset {
    let mut dataset = Dataset::new();
    for i in 0..slices {
        // One dominant slice followed by a long tail crowds the labels together.
        let value = if i == 0 { slices as f64 * 4.0 } else { 1.0 + (i % 3) as f64 };
        dataset.push(format!("Slice {i}"), value);
    }
    dataset
}

fn bench_outer_layout(c: &mut Criterion) {
    let geometry = PieGeometry::new(Point::new(250.0, 250.0), 0.0, 150.0, 16.0).unwrap();
    let mut group = c.benchmark_group("outer_layout");
    for count in [8usize, 64, 512] {
        let segments: Vec<Segment> = (0..count)
            .map(|i| Segment::new(i, i as f64 * 360.0 / count as f64))
            .collect();
        let measurer = FixedMeasurer::uniform(count, LabelSize::new(60.0, 12.0));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                compute_outer_layout(
                    black_box(&segments),
                    &geometry,
                    &measurer,
                    &LayoutOptions::default(),
                )
            })
        });
    }
    group.finish();
}

fn bench_chart_layout(c: &mut Criterion) {
    let config = Config::default();
    let measurer = DeterministicTextMeasurer::default();
    let mut group = c.benchmark_group("chart_layout");
    for count in [10usize, 100] {
        let dataset = skewed_dataset(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &dataset, |b, dataset| {
            b.iter(|| compute_chart_layout(black_box(dataset), &config, &measurer, true))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_outer_layout, bench_chart_layout);
criterion_main!(benches);
