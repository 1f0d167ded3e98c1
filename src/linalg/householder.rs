use alloc::vec;
use alloc::vec::Vec;

use crate::linalg::LinalgError;
use crate::traits::{FloatScalar, MatrixMut};
use crate::Matrix;

/// Elementary reflector `H = I − b·v·vᵗ`.
///
/// `v` is a unit column vector and `b = 2 / (vᵗv)`, so `H` is orthogonal
/// and symmetric. In the degenerate case (`x` of length ≤ 1, or already a
/// multiple of `e₁`) `v` is zero and `b = 0`, i.e. `H = I`.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseholderResult<T> {
    /// Reflector direction, `n × 1`.
    pub v: Matrix<T>,
    /// Scalar coefficient.
    pub b: T,
}

/// Reflector in slice form, as used on the decomposition hot paths.
///
/// `alpha` is the value `H·x` leaves in the first position.
pub(crate) struct Reflector<T> {
    pub v: Vec<T>,
    pub b: T,
    pub alpha: T,
}

/// Build the reflector that maps `x` onto `alpha·e₁`.
///
/// `alpha = −sign(x₀)·‖x‖` (with `sign(0) = 1`), so `v₀ = x₀ − alpha` is
/// formed without cancellation. Norms are taken after scaling by `max|xᵢ|`,
/// so entries near the under- or overflow thresholds stay representable.
pub(crate) fn reflector<T: FloatScalar>(x: &[T]) -> Reflector<T> {
    let n = x.len();
    let identity = |alpha: T| Reflector {
        v: vec![T::zero(); n],
        b: T::zero(),
        alpha,
    };
    if n == 0 {
        return identity(T::zero());
    }

    let x0 = x[0];
    let tail_max = x[1..].iter().fold(T::zero(), |m, &xi| m.max(xi.abs()));
    if tail_max == T::zero() {
        return identity(x0);
    }

    let scale = tail_max.max(x0.abs());
    let mut v: Vec<T> = x.iter().map(|&xi| xi / scale).collect();
    let mut tail_sq = T::zero();
    for &vi in &v[1..] {
        tail_sq = tail_sq + vi * vi;
    }

    let norm = (v[0] * v[0] + tail_sq).sqrt();
    let alpha = if x0 >= T::zero() { -norm } else { norm };

    v[0] = v[0] - alpha;
    let v_norm = (v[0] * v[0] + tail_sq).sqrt();
    let mut vtv = T::zero();
    for vi in v.iter_mut() {
        *vi = *vi / v_norm;
        vtv = vtv + *vi * *vi;
    }

    let two = T::one() + T::one();
    Reflector {
        v,
        b: two / vtv,
        alpha: alpha * scale,
    }
}

/// Apply `H` from the left to the block `m[row0.., col0..]`:
/// each column `c` of the block becomes `c − b·v·(vᵗc)`.
pub(crate) fn apply_left<T: FloatScalar>(
    m: &mut impl MatrixMut<T>,
    v: &[T],
    b: T,
    row0: usize,
    col0: usize,
) {
    if b == T::zero() {
        return;
    }
    debug_assert_eq!(row0 + v.len(), m.nrows());
    for j in col0..m.ncols() {
        let mut dot = T::zero();
        for (i, &vi) in v.iter().enumerate() {
            dot = dot + vi * *m.get(row0 + i, j);
        }
        let f = b * dot;
        for (i, &vi) in v.iter().enumerate() {
            let old = *m.get(row0 + i, j);
            *m.get_mut(row0 + i, j) = old - f * vi;
        }
    }
}

/// Apply `H` from the right to the block `m[row0.., col0..]`:
/// each row `r` of the block becomes `r − b·(r·v)·vᵗ`.
pub(crate) fn apply_right<T: FloatScalar>(
    m: &mut impl MatrixMut<T>,
    v: &[T],
    b: T,
    row0: usize,
    col0: usize,
) {
    if b == T::zero() {
        return;
    }
    debug_assert_eq!(col0 + v.len(), m.ncols());
    for r in row0..m.nrows() {
        let mut dot = T::zero();
        for (j, &vj) in v.iter().enumerate() {
            dot = dot + *m.get(r, col0 + j) * vj;
        }
        let f = b * dot;
        for (j, &vj) in v.iter().enumerate() {
            let old = *m.get(r, col0 + j);
            *m.get_mut(r, col0 + j) = old - f * vj;
        }
    }
}

/// Householder reflector that zeroes every entry of the column vector `x`
/// except the first.
///
/// Returns [`LinalgError::InvalidDimension`] if `x` is not `n × 1`.
///
/// ```
/// use matdecomp::Matrix;
/// use matdecomp::linalg::{householder, householder_matrix};
///
/// let x = Matrix::column(&[3.0_f64, 4.0, 0.0]);
/// let h = householder(&x).unwrap();
/// let p = householder_matrix(&h.v, h.b).unwrap();
/// let px = &p * &x;
/// assert!((px[(0, 0)].abs() - 5.0).abs() < 1e-12);
/// assert!(px[(1, 0)].abs() < 1e-12);
/// assert!(px[(2, 0)].abs() < 1e-12);
/// ```
pub fn householder<T: FloatScalar>(x: &Matrix<T>) -> Result<HouseholderResult<T>, LinalgError> {
    if x.ncols() != 1 {
        return Err(LinalgError::InvalidDimension {
            op: "householder",
            rows: x.nrows(),
            cols: x.ncols(),
        });
    }
    let h = reflector(x.as_slice());
    Ok(HouseholderResult {
        v: Matrix::column(&h.v),
        b: h.b,
    })
}

/// Materialize `H = I − b·v·vᵗ`.
///
/// Only needed for testing and explicit composition; the decompositions apply
/// reflectors implicitly as rank-1 updates.
pub fn householder_matrix<T: FloatScalar>(v: &Matrix<T>, b: T) -> Result<Matrix<T>, LinalgError> {
    if v.ncols() != 1 {
        return Err(LinalgError::InvalidDimension {
            op: "householder_matrix",
            rows: v.nrows(),
            cols: v.ncols(),
        });
    }
    let n = v.nrows();
    Ok(Matrix::from_fn(n, n, |i, j| {
        let id = if i == j { T::one() } else { T::zero() };
        id - b * v[(i, 0)] * v[(j, 0)]
    }))
}
