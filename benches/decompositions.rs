use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use matdecomp::linalg::{
    bidiagonalization, eigen, lu_decomposition, qr, svd, EigenMethod, EigenSettings,
};
use matdecomp::Matrix;

const SIZES: [usize; 3] = [4, 8, 16];

// ---------------------------------------------------------------------------
// Helpers: deterministic test matrices, same entries for both libraries
// ---------------------------------------------------------------------------

fn entry(i: usize, j: usize) -> f64 {
    ((i * 7 + j * 3) % 11) as f64 - 5.0 + if i == j { 12.0 } else { 0.0 }
}

fn ours(n: usize) -> Matrix<f64> {
    Matrix::from_fn(n, n, entry)
}

fn theirs(n: usize) -> nalgebra::DMatrix<f64> {
    nalgebra::DMatrix::from_fn(n, n, entry)
}

fn ours_spd(n: usize) -> Matrix<f64> {
    let a = ours(n);
    &a * &a.transpose()
}

fn theirs_spd(n: usize) -> nalgebra::DMatrix<f64> {
    let a = theirs(n);
    &a * a.transpose()
}

// ---------------------------------------------------------------------------
// Decompositions
// ---------------------------------------------------------------------------

fn lu(c: &mut Criterion) {
    let mut g = c.benchmark_group("lu");
    for n in SIZES {
        let a = ours(n);
        g.bench_with_input(BenchmarkId::new("matdecomp", n), &a, |b, a| {
            b.iter(|| lu_decomposition(black_box(a), true))
        });
        let m = theirs(n);
        g.bench_with_input(BenchmarkId::new("nalgebra", n), &m, |b, m| {
            b.iter(|| black_box(m).clone().lu())
        });
    }
    g.finish();
}

fn qr_bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("qr");
    for n in SIZES {
        let a = ours(n);
        g.bench_with_input(BenchmarkId::new("matdecomp", n), &a, |b, a| {
            b.iter(|| qr(black_box(a)))
        });
        let m = theirs(n);
        g.bench_with_input(BenchmarkId::new("nalgebra", n), &m, |b, m| {
            b.iter(|| {
                let f = black_box(m).clone().qr();
                (f.q(), f.r())
            })
        });
    }
    g.finish();
}

fn bidiag(c: &mut Criterion) {
    let mut g = c.benchmark_group("bidiagonalization");
    for n in SIZES {
        let a = ours(n);
        g.bench_with_input(BenchmarkId::new("matdecomp", n), &a, |b, a| {
            b.iter(|| bidiagonalization(black_box(a)))
        });
        let m = theirs(n);
        g.bench_with_input(BenchmarkId::new("nalgebra", n), &m, |b, m| {
            b.iter(|| black_box(m).clone().bidiagonalize().unpack())
        });
    }
    g.finish();
}

fn svd_bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("svd");
    for n in SIZES {
        let a = ours(n);
        g.bench_with_input(BenchmarkId::new("matdecomp", n), &a, |b, a| {
            b.iter(|| svd(black_box(a)))
        });
        let m = theirs(n);
        g.bench_with_input(BenchmarkId::new("nalgebra", n), &m, |b, m| {
            b.iter(|| black_box(m).clone().svd(true, true))
        });
    }
    g.finish();
}

fn symmetric_eigen(c: &mut Criterion) {
    let mut g = c.benchmark_group("symmetric_eigen");
    let settings = EigenSettings::default();
    for n in SIZES {
        let a = ours_spd(n);
        g.bench_with_input(BenchmarkId::new("matdecomp", n), &a, |b, a| {
            b.iter(|| eigen(black_box(a), EigenMethod::QrAlgorithm, &settings))
        });
        let m = theirs_spd(n);
        g.bench_with_input(BenchmarkId::new("nalgebra", n), &m, |b, m| {
            b.iter(|| black_box(m).clone().symmetric_eigen())
        });
    }
    g.finish();
}

criterion_group!(benches, lu, qr_bench, bidiag, svd_bench, symmetric_eigen);
criterion_main!(benches);
