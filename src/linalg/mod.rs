pub(crate) mod bidiagonal;
pub(crate) mod eigen;
pub(crate) mod elementary;
pub(crate) mod householder;
pub(crate) mod lu;
pub(crate) mod qr;
pub(crate) mod svd;

pub use bidiagonal::{bidiagonalization, DiagonalizationResult};
pub use eigen::{
    eigen, power_iteration, power_iteration_deflation, qr_algorithm, EigenMethod, EigenPair,
    EigenSettings,
};
pub use elementary::{row_add_multiple, row_scale, row_swap};
pub use householder::{householder, householder_matrix, HouseholderResult};
pub use lu::{lu_decomposition, LuResult};
pub use qr::{qr, qr_sign_modifier, rq, thin_qr, QrResult};
pub use svd::{svd, svd_with, SvdResult, SvdSettings};

use num_traits::Float;

use crate::traits::MatrixMut;

/// Compute a Givens rotation `(c, s)` such that
/// `[c s; -s c]ᵀ · [a; b] = [r; 0]`.
pub(crate) fn givens<R: Float>(a: R, b: R) -> (R, R) {
    if b == R::zero() {
        (R::one(), R::zero())
    } else if b.abs() > a.abs() {
        let t = a / b;
        let s = R::one() / (R::one() + t * t).sqrt();
        (s * t, s)
    } else {
        let t = b / a;
        let c = R::one() / (R::one() + t * t).sqrt();
        (c, c * t)
    }
}

/// Rotate columns `j` and `k` of `m`:
/// `m[:, j] ← c·m[:, j] + s·m[:, k]`, `m[:, k] ← c·m[:, k] − s·m[:, j]`.
pub(crate) fn rotate_cols<T: Float>(m: &mut impl MatrixMut<T>, j: usize, k: usize, c: T, s: T) {
    for row in 0..m.nrows() {
        let mj = *m.get(row, j);
        let mk = *m.get(row, k);
        *m.get_mut(row, j) = c * mj + s * mk;
        *m.get_mut(row, k) = c * mk - s * mj;
    }
}

/// Errors from linear algebra operations.
///
/// Shape and index errors are contract violations and are reported
/// immediately. Failure to converge is not reported here by the iterative
/// solvers; they return degraded results with flags instead (see
/// [`SvdResult::converged`] and [`EigenPair::valid`]).
///
/// ```
/// use matdecomp::Matrix;
/// use matdecomp::linalg::{lu_decomposition, LinalgError};
///
/// let singular = Matrix::from_rows(2, 2, &[0.0_f64, 1.0, 1.0, 1.0]);
/// assert_eq!(lu_decomposition(&singular, false).unwrap_err(), LinalgError::Singular);
///
/// let wide = Matrix::<f64>::zeros(2, 3);
/// assert!(matches!(
///     lu_decomposition(&wide, true),
///     Err(LinalgError::InvalidDimension { rows: 2, cols: 3, .. })
/// ));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinalgError {
    /// Input shape violates the operation's precondition.
    InvalidDimension {
        /// Operation that rejected the input.
        op: &'static str,
        /// Rows of the offending operand.
        rows: usize,
        /// Columns of the offending operand.
        cols: usize,
    },
    /// Zero or near-zero pivot in LU without pivoting.
    Singular,
    /// Iterative algorithm did not converge within the iteration budget.
    ConvergenceFailure,
    /// Row or column index outside the matrix.
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The exclusive upper bound it had to respect.
        bound: usize,
    },
}

impl core::fmt::Display for LinalgError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinalgError::InvalidDimension { op, rows, cols } => {
                write!(f, "invalid dimension for {}: {}x{}", op, rows, cols)
            }
            LinalgError::Singular => write!(f, "matrix is singular"),
            LinalgError::ConvergenceFailure => write!(f, "iterative algorithm did not converge"),
            LinalgError::IndexOutOfRange { index, bound } => {
                write!(f, "index {} out of range (bound {})", index, bound)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LinalgError {}
