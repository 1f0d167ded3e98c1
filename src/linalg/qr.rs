use alloc::vec::Vec;

use crate::linalg::householder::{apply_left, apply_right, reflector};
use crate::linalg::LinalgError;
use crate::traits::FloatScalar;
use crate::Matrix;

/// Orthogonal-triangular factor pair.
///
/// From [`qr`]: `A = Q·R`, `Q` orthogonal `m × m`, `R` upper-triangular
/// `m × n`. From [`thin_qr`]: `Q` is `m × n` with orthonormal columns and `R`
/// is `n × n`. From [`rq`]: `A = R·Q` for square `A`.
#[derive(Debug, Clone, PartialEq)]
pub struct QrResult<T> {
    pub q: Matrix<T>,
    pub r: Matrix<T>,
}

/// Householder QR decomposition of an `m × n` matrix with `m ≥ n`.
///
/// Column `k` gets a reflector built from `R[k.., k]`; it is applied
/// implicitly to the trailing block of `R` and accumulated into
/// `Q = H₀·H₁·…`. Entries below the diagonal of `R` are exact zeros.
///
/// Returns [`LinalgError::InvalidDimension`] if `m < n`.
///
/// # Example
///
/// ```
/// use matdecomp::Matrix;
/// use matdecomp::linalg::qr;
///
/// let a = Matrix::from_rows(3, 3, &[
///     12.0_f64, -51.0, 4.0,
///     6.0, 167.0, -68.0,
///     -4.0, 24.0, -41.0,
/// ]);
/// let f = qr(&a).unwrap();
/// assert!(f.q.is_orthogonal(1e-12));
/// assert!(f.r.is_upper_triangular(0.0));
/// assert!((&f.q * &f.r).approx_eq(&a, 1e-10));
/// assert!((f.r[(0, 0)].abs() - 14.0).abs() < 1e-10);
/// ```
pub fn qr<T: FloatScalar>(a: &Matrix<T>) -> Result<QrResult<T>, LinalgError> {
    let (m, n) = a.shape();
    if m < n {
        return Err(LinalgError::InvalidDimension {
            op: "qr",
            rows: m,
            cols: n,
        });
    }

    let mut r = a.clone();
    let mut q = Matrix::<T>::eye(m);

    for k in 0..n.min(m.saturating_sub(1)) {
        let x: Vec<T> = (k..m).map(|i| r[(i, k)]).collect();
        let h = reflector(&x);
        if h.b == T::zero() {
            continue;
        }

        apply_left(&mut r, &h.v, h.b, k, k);
        r[(k, k)] = h.alpha;
        for i in (k + 1)..m {
            r[(i, k)] = T::zero();
        }

        apply_right(&mut q, &h.v, h.b, 0, k);
    }

    Ok(QrResult { q, r })
}

/// Economy QR: `Q` is `m × n` with orthonormal columns, `R` is `n × n`.
///
/// Same preconditions as [`qr`].
pub fn thin_qr<T: FloatScalar>(a: &Matrix<T>) -> Result<QrResult<T>, LinalgError> {
    let (m, n) = a.shape();
    let full = qr(a)?;
    Ok(QrResult {
        q: full.q.block(0, 0, m, n),
        r: full.r.block(0, 0, n, n),
    })
}

/// Flip the sign of column `k` of `Q` and row `k` of `R`.
///
/// The product `Q·R` is unchanged, so this selects between the equally valid
/// factorizations (e.g. to force a nonnegative diagonal on `R`).
///
/// Returns [`LinalgError::InvalidDimension`] if `q.ncols() != r.nrows()` and
/// [`LinalgError::IndexOutOfRange`] if `k ≥ r.nrows()`.
///
/// ```
/// use matdecomp::Matrix;
/// use matdecomp::linalg::{qr, qr_sign_modifier};
///
/// let a = Matrix::from_rows(2, 2, &[3.0_f64, 1.0, 4.0, 2.0]);
/// let f = qr(&a).unwrap();
/// let g = qr_sign_modifier(&f.q, &f.r, 0).unwrap();
/// assert_eq!(g.r[(0, 0)], -f.r[(0, 0)]);
/// assert!((&g.q * &g.r).approx_eq(&a, 1e-12));
/// ```
pub fn qr_sign_modifier<T: FloatScalar>(
    q: &Matrix<T>,
    r: &Matrix<T>,
    k: usize,
) -> Result<QrResult<T>, LinalgError> {
    if q.ncols() != r.nrows() {
        return Err(LinalgError::InvalidDimension {
            op: "qr_sign_modifier",
            rows: q.nrows(),
            cols: q.ncols(),
        });
    }
    if k >= r.nrows() {
        return Err(LinalgError::IndexOutOfRange {
            index: k,
            bound: r.nrows(),
        });
    }

    let mut q = q.clone();
    let mut r = r.clone();
    for i in 0..q.nrows() {
        q[(i, k)] = -q[(i, k)];
    }
    for j in 0..r.ncols() {
        r[(k, j)] = -r[(k, j)];
    }
    Ok(QrResult { q, r })
}

/// RQ decomposition `A = R·Q` of a square matrix.
///
/// With `J` the row-reversal permutation, take `(J·A)ᵗ = Q₀·R₀`; then
/// `R = J·R₀ᵗ·J` is upper-triangular and `Q = J·Q₀ᵗ` is orthogonal.
///
/// Returns [`LinalgError::InvalidDimension`] for non-square input.
pub fn rq<T: FloatScalar>(a: &Matrix<T>) -> Result<QrResult<T>, LinalgError> {
    if !a.is_square() {
        return Err(LinalgError::InvalidDimension {
            op: "rq",
            rows: a.nrows(),
            cols: a.ncols(),
        });
    }

    let mut flipped = a.clone();
    flipped.reverse_rows();
    let QrResult { q: q0, r: r0 } = qr(&flipped.transpose())?;

    let mut r = r0.transpose();
    r.reverse_rows();
    r.reverse_cols();

    let mut q = q0.transpose();
    q.reverse_rows();

    Ok(QrResult { q, r })
}
