use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, black_box};
use stock_core::{Axis, PlotGeometry, PointInput, Series, SeriesKind};

fn gen_ohlc(n: usize) -> Vec<PointInput> {
    let mut v = Vec::with_capacity(n);
    let mut price = 100.0f64;
    for i in 0..n {
        let o = price;
        let c = o + (i as f64 * 0.01).sin();
        price = c;
        v.push(PointInput::ohlc(o, o.max(c) + 1.0, o.min(c) - 1.0, c));
    }
    v
}

fn bench_redraw(c: &mut Criterion) {
    let mut group = c.benchmark_group("series_redraw");
    for &n in &[10_000usize, 100_000usize] {
        let data = gen_ohlc(n);
        let mut x = Axis::new("X", 0.0, (n - 1) as f64);
        x.len = 1600.0;
        let mut y = Axis::new("Y", 0.0, 300.0);
        y.len = 900.0;
        let geom = PlotGeometry::new(1600.0, 900.0, false);
        for kind in [SeriesKind::Ohlc, SeriesKind::Candlestick, SeriesKind::Line] {
            let mut series = Series::new("bench", kind).with_data(data.clone());
            group.bench_with_input(BenchmarkId::new(kind.name(), n), &n, |b, _| {
                b.iter(|| {
                    series.redraw(&x, &y, &geom);
                    black_box(series.points.len());
                });
            });
        }
    }
    group.finish();
}

fn bench_ingest(c: &mut Criterion) {
    let data = gen_ohlc(100_000);
    c.bench_function("ingest_100k", |b| {
        b.iter(|| black_box(Series::new("bench", SeriesKind::Ohlc).with_data(data.clone())));
    });
}

criterion_group!(benches, bench_redraw, bench_ingest);
criterion_main!(benches);
