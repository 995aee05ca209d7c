use criterion::{black_box, criterion_group, criterion_main, Criterion};

use projkit::{EpsgCode, Lp, Operation, Projector};

fn lonlat_grid(n: usize) -> Vec<Lp> {
    (0..n)
        .map(|i| {
            let t = i as f64 / n as f64;
            Lp::from_degrees(6.0 + t * 6.0, 40.0 + t * 20.0)
        })
        .collect()
}

fn interleaved_degrees(n: usize) -> Vec<f64> {
    (0..n)
        .flat_map(|i| {
            let t = i as f64 / n as f64;
            [-170.0 + t * 340.0, -80.0 + t * 160.0]
        })
        .collect()
}

fn bench_forward(c: &mut Criterion) {
    let points = lonlat_grid(100_000);

    for (name, definition) in [
        ("merc", "+proj=merc +ellps=WGS84"),
        ("utm32", "+proj=utm +zone=32 +ellps=GRS80"),
        ("etmerc", "+proj=etmerc +ellps=GRS80 +lon_0=9"),
        ("aea", "+proj=aea +ellps=GRS80 +lat_1=43 +lat_2=62 +lon_0=10"),
        ("lcc", "+proj=lcc +ellps=GRS80 +lat_1=44 +lat_2=49 +lat_0=46.5 +lon_0=3"),
    ] {
        let op = Operation::new(definition).unwrap();
        c.bench_function(&format!("forward_{name}_100k"), |b| {
            b.iter(|| black_box(op.forward_batch(&points).unwrap()));
        });
    }
}

fn bench_inverse(c: &mut Criterion) {
    let op = Operation::new("+proj=utm +zone=32 +ellps=GRS80").unwrap();
    let projected = op.forward_batch(&lonlat_grid(100_000)).unwrap();

    c.bench_function("inverse_utm32_100k", |b| {
        b.iter(|| black_box(op.inverse_batch(&projected).unwrap()));
    });
}

fn bench_context_setup(c: &mut Criterion) {
    c.bench_function("operation_new_utm", |b| {
        b.iter(|| black_box(Operation::new("+proj=utm +zone=32 +datum=WGS84").unwrap()));
    });
}

fn bench_projector_sequential_vs_parallel(c: &mut Criterion) {
    let input = interleaved_degrees(1_000_000);
    let projector = Projector::new(EpsgCode::Wgs84, EpsgCode::WorldMercator).unwrap();

    c.bench_function("projector_3395_sequential_1M", |b| {
        b.iter(|| black_box(projector.forward(&input).unwrap()));
    });
    c.bench_function("projector_3395_parallel_1M", |b| {
        b.iter(|| black_box(projector.forward_par(&input).unwrap()));
    });
}

fn bench_projector_thread_scaling(c: &mut Criterion) {
    let input = interleaved_degrees(1_000_000);
    let projector = Projector::new(EpsgCode::Wgs84, EpsgCode::WebMercator).unwrap();

    for &threads in &[1, 2, 4, 8] {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap();

        c.bench_function(&format!("projector_threads_{threads}_3857_1M"), |b| {
            b.iter(|| black_box(pool.install(|| projector.forward_par(&input).unwrap())));
        });
    }
}

criterion_group!(
    benches,
    bench_forward,
    bench_inverse,
    bench_context_setup,
    bench_projector_sequential_vs_parallel,
    bench_projector_thread_scaling
);
criterion_main!(benches);
