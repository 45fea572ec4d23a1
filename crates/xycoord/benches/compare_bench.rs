//! Criterion benchmarks for point comparison and y-solving.
//! Focus sizes: n in {8, 32, 64} points per sort.
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use num_rational::BigRational;
use rand::{rngs::StdRng, Rng, SeedableRng};
use xycoord::prelude::*;

const CURVES: [&str; 4] = ["y - x", "y^2 - x", "x^2 + y^2 - 9", "y^3 - x*y - 1"];

fn random_points(s: &Session<ExactKernel>, n: usize, seed: u64) -> Vec<Point<ExactCurve>> {
    let curves: Vec<ExactCurve> = CURVES
        .iter()
        .map(|c| s.kernel().curve(&c.parse().unwrap()).unwrap())
        .collect();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(n);
    while out.len() < n {
        let c = &curves[rng.gen_range(0..curves.len())];
        // few distinct x so that many pairs are covertical
        let x = Algebraic::from_rational(BigRational::new(rng.gen_range(-2i64..3).into(), 2.into()));
        let events = c.fiber_at(&x).event_count();
        if events > 0 {
            out.push(s.point(x, c.clone(), rng.gen_range(0..events)));
        }
    }
    out
}

fn bench_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("points");
    for &n in &[8usize, 32, 64] {
        group.bench_with_input(BenchmarkId::new("sort", n), &n, |b, &n| {
            b.iter_batched(
                || {
                    let s = xycoord::exact_session();
                    let pts = random_points(&s, n, 43);
                    (s, pts)
                },
                |(s, mut pts)| s.sort_points(&mut pts),
                BatchSize::SmallInput,
            )
        });
    }
    group.bench_function("y_irrational_x", |b| {
        b.iter_batched(
            || {
                let s = xycoord::exact_session();
                let f = s.kernel().curve(&"y^2 - x".parse().unwrap()).unwrap();
                let x = Algebraic::real_roots(&UPoly::from_i64s(&[-3, 0, 1]))
                    .pop()
                    .unwrap();
                let p = s.point(x, f, 1);
                (s, p)
            },
            |(s, p)| s.y(&p),
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_compare);
criterion_main!(benches);
