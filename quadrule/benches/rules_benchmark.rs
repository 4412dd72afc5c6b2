use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quadrule::{gauss_legendre, simpson, Equidistributed, EquidistributedKind};

fn tensor_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Tensor product rules");

    group.bench_function("Gauss-Legendre 1D n=200", |b| {
        b.iter(|| gauss_legendre(black_box(200), 0.0, 1.0))
    });

    group.bench_function("Gauss-Legendre 4D n=12", |b| {
        b.iter(|| gauss_legendre(black_box([12, 12, 12, 12]), -1.0, 1.0))
    });

    group.bench_function("Simpson 3D n=41", |b| {
        b.iter(|| simpson(black_box([41, 41, 41]), 0.0, [1.0, 2.0, 3.0]))
    });
    group.finish();
}

fn equidistributed_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Equidistributed 5D n=100000");
    let lower = [0.0; 5];
    let upper = [1.0; 5];

    for kind in [
        EquidistributedKind::Weyl,
        EquidistributedKind::Haber,
        EquidistributedKind::Random,
    ] {
        group.bench_function(kind.to_string(), |b| {
            b.iter(|| {
                let mut gen = Equidistributed::new(100_000, kind);
                gen.set_seed(1234);
                gen.rule(black_box(lower), upper)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, tensor_benchmark, equidistributed_benchmark);
criterion_main!(benches);
