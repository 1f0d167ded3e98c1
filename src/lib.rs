//! # matdecomp
//!
//! Dense matrix decompositions in pure Rust, no-std compatible (with
//! `alloc`). Every routine takes a `&Matrix<T>` and returns freshly allocated
//! factors, generic over `f32` / `f64`.
//!
//! ## Quick start
//!
//! ```
//! use matdecomp::Matrix;
//! use matdecomp::linalg::{eigen, lu_decomposition, qr, svd, EigenMethod, EigenSettings};
//!
//! let a = Matrix::from_rows(3, 3, &[
//!     4.0_f64, 1.0, 2.0,
//!     1.0, 3.0, 0.0,
//!     2.0, 0.0, 5.0,
//! ]);
//!
//! let lu = lu_decomposition(&a, true).unwrap();
//! assert!((&lu.p * &a).approx_eq(&(&lu.l * &lu.u), 1e-12));
//!
//! let f = qr(&a).unwrap();
//! assert!(f.q.is_orthogonal(1e-12));
//!
//! let s = svd(&a).unwrap();
//! assert!(s.converged);
//! assert!(s.residual(&a) < 1e-10);
//!
//! let pairs = eigen(&a, EigenMethod::Auto, &EigenSettings::default()).unwrap();
//! assert!(pairs.iter().all(|p| p.valid));
//! ```
//!
//! ## Modules
//!
//! - [`matrix`] — Heap-allocated `Matrix<T>` with runtime dimensions and
//!   row-major `Vec<T>` storage. Arithmetic, transpose, norms, structure
//!   predicates (`is_orthogonal`, `is_upper_bidiagonal`, ...), tolerance
//!   comparison and random construction.
//!
//! - [`linalg`] — Householder reflectors, LU with partial pivoting, QR / thin
//!   QR / RQ, Golub-Kahan bidiagonalization, SVD, and eigensolvers (QR
//!   algorithm, power iteration with deflation). Elementary row-operation
//!   matrices. The reflector and rotation kernels operate on
//!   `&mut impl MatrixMut<T>`.
//!
//! - [`traits`] — Element trait hierarchy:
//!   - [`Scalar`] — all matrix elements (`Copy + PartialEq + Debug + Zero + One + Num`)
//!   - [`FloatScalar`] — real floats (`Scalar + Float`), used by the decompositions
//!   - [`MatrixRef`] / [`MatrixMut`] — generic read/write access for algorithms
//!
//! ## Iterative solvers
//!
//! The SVD and eigensolvers never fail on non-convergence. They return the
//! best result reached and flag it (`SvdResult::converged`,
//! `EigenPair::valid`), logging through the [`log`] facade: `debug` on
//! convergence, `warn` when an iteration cap is hit. Caps and tolerances live
//! in [`linalg::SvdSettings`] and [`linalg::EigenSettings`].
//!
//! ## Cargo features
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std`   | yes     | `std::error::Error` for `LinalgError`; hardware FPU via system libm |
//! | `rand`  | yes     | `Matrix::random` / `Matrix::random_with` (implies `std`) |
//!
//! Without `std` the crate is `no_std` and needs only `alloc`.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod linalg;
pub mod matrix;
pub mod traits;

pub use linalg::LinalgError;
pub use matrix::Matrix;
pub use traits::{FloatScalar, MatrixMut, MatrixRef, Scalar};
