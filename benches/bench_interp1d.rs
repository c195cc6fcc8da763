use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray::{
    parallel::prelude::{IntoParallelRefIterator, ParallelIterator},
    Array,
};
use ndarray_linterp::{interp1d::Interp1D, IndexMode};

use rand_extensions::RandArray;

mod rand_extensions;

fn bench_interp1d_scalar(c: &mut Criterion) {
    let data = Array::from_rand(100, (0.0, 1.0), 42);
    let interp = Interp1D::builder(data.view()).build().unwrap();
    let uniform = Interp1D::builder(data)
        .index_mode(IndexMode::Uniform)
        .build()
        .unwrap();
    let query = Array::from_rand(10_000, (0.0, 99.0), 123);

    c.bench_function("1D `eval`", |b| {
        b.iter(|| {
            for &x in &query {
                black_box(interp.eval(x));
            }
        })
    });

    c.bench_function("1D `eval` uniform", |b| {
        b.iter(|| {
            for &x in &query {
                black_box(uniform.eval(x));
            }
        })
    });

    c.bench_function("1D `evaln` 1D-long", |b| {
        b.iter(|| black_box(interp.evaln(&query)))
    });

    let query = query.into_shape_with_order((100, 100)).unwrap();
    c.bench_function("1D `evaln` 2D", |b| {
        b.iter(|| black_box(interp.evaln(&query)))
    });
}

fn bench_interp1d_multithread(c: &mut Criterion) {
    let data = Array::from_rand(100, (0.0, 1.0), 42);
    let interp = Interp1D::builder(data).build().unwrap();
    let query = Array::from_rand(10_000, (0.0, 99.0), 123);

    c.bench_function("1D MT `eval`", |b| {
        b.iter(|| {
            query.par_iter().for_each(|&x| {
                black_box(interp.eval(x));
            });
        })
    });
}

criterion_group!(
    benches,
    bench_interp1d_scalar,
    bench_interp1d_multithread
);
criterion_main!(benches);
