use alloc::vec::Vec;

use crate::linalg::bidiagonal::{bidiagonalization, DiagonalizationResult};
use crate::linalg::{givens, rotate_cols, LinalgError};
use crate::traits::{FloatScalar, MatrixMut};
use crate::Matrix;

/// Settings for [`svd_with`].
#[derive(Debug, Clone, Copy)]
pub struct SvdSettings<T> {
    /// Cap on Golub-Kahan sweeps over the bidiagonal.
    pub max_iterations: usize,
    /// Relative threshold below which a superdiagonal entry counts as zero.
    pub tolerance: T,
}

impl<T: FloatScalar> Default for SvdSettings<T> {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            tolerance: T::epsilon(),
        }
    }
}

/// Singular value decomposition `A = U·S·Vᵗ`.
///
/// `u` is `m × m`, `v` is `n × n`, both orthogonal. `s` is `m × n` with the
/// singular values on its diagonal, nonnegative and sorted descending.
///
/// If the iteration cap was hit, `converged` is `false` and the factors are
/// the best approximation reached; [`SvdResult::residual`] tells how good it
/// is, and [`SvdResult::into_converged`] turns it into an error.
#[derive(Debug, Clone, PartialEq)]
pub struct SvdResult<T> {
    pub u: Matrix<T>,
    pub s: Matrix<T>,
    pub v: Matrix<T>,
    /// Sweeps performed by the diagonalization phase.
    pub iterations: usize,
    pub converged: bool,
}

impl<T: FloatScalar> SvdResult<T> {
    /// Diagonal of `s`, descending.
    pub fn singular_values(&self) -> Vec<T> {
        self.s.diagonal()
    }

    /// Numerical rank: number of singular values above `tol`.
    pub fn rank(&self, tol: T) -> usize {
        self.singular_values().iter().filter(|&&s| s > tol).count()
    }

    /// Condition number `σ_max / σ_min`.
    ///
    /// Returns infinity if the smallest singular value is zero.
    pub fn condition_number(&self) -> T {
        let sv = self.singular_values();
        match (sv.first(), sv.last()) {
            (Some(&s_max), Some(&s_min)) => {
                if s_min == T::zero() {
                    T::infinity()
                } else {
                    s_max / s_min
                }
            }
            _ => T::one(),
        }
    }

    /// `U·S·Vᵗ`.
    pub fn reconstruct(&self) -> Matrix<T> {
        &(&self.u * &self.s) * &self.v.transpose()
    }

    /// Frobenius norm of `A − U·S·Vᵗ`.
    pub fn residual(&self, a: &Matrix<T>) -> T {
        (a - &self.reconstruct()).norm()
    }

    /// `Ok(self)` if the iteration converged, otherwise
    /// [`LinalgError::ConvergenceFailure`].
    pub fn into_converged(self) -> Result<Self, LinalgError> {
        if self.converged {
            Ok(self)
        } else {
            Err(LinalgError::ConvergenceFailure)
        }
    }
}

/// Golub-Kahan implicit-shift QR iteration on a bidiagonal matrix.
///
/// On entry `diag[0..n]` and `off_diag[0..n-1]` hold the bidiagonal `B`, and
/// `u`, `v` the transforms with `A = U·B·Vᵗ`. Rotations are accumulated into
/// `u` (left) and `v` (right).
///
/// On return `diag` is nonnegative and sorted descending, with the columns of
/// `u` and `v` permuted to match. Returns `(sweeps, converged)`.
pub(crate) fn bidiagonal_qr<T: FloatScalar>(
    diag: &mut [T],
    off_diag: &mut [T],
    u: &mut impl MatrixMut<T>,
    v: &mut impl MatrixMut<T>,
    max_iter: usize,
    tol: T,
) -> (usize, bool) {
    let n = diag.len();
    let zero = T::zero();

    let b_norm = diag.iter().chain(off_diag.iter()).fold(zero, |acc, &x| acc.hypot(x));
    let b_thresh = tol * b_norm;
    let negligible = |e: T, d0: T, d1: T| e.abs() <= tol * (d0.abs() + d1.abs()) || e.abs() <= b_thresh;

    let mut iter = 0usize;
    let mut converged = true;
    let mut hi = n.saturating_sub(1);

    while hi > 0 {
        if negligible(off_diag[hi - 1], diag[hi - 1], diag[hi]) {
            off_diag[hi - 1] = zero;
            hi -= 1;
            continue;
        }

        // Start of the unreduced block ending at `hi`
        let mut lo = hi - 1;
        while lo > 0 {
            if negligible(off_diag[lo - 1], diag[lo - 1], diag[lo]) {
                off_diag[lo - 1] = zero;
                break;
            }
            lo -= 1;
        }

        if iter >= max_iter {
            converged = false;
            break;
        }
        iter += 1;

        // Zero at the bottom of the block: chase off_diag[hi-1] upward with
        // right rotations on columns (j, hi).
        if diag[hi].abs() <= b_thresh {
            diag[hi] = zero;
            let mut z = off_diag[hi - 1];
            off_diag[hi - 1] = zero;
            for j in (lo..hi).rev() {
                let (c, s) = givens(diag[j], z);
                diag[j] = c * diag[j] + s * z;
                if j > lo {
                    z = zero - s * off_diag[j - 1];
                    off_diag[j - 1] = c * off_diag[j - 1];
                }
                rotate_cols(v, j, hi, c, s);
            }
            continue;
        }

        // Zero inside the block: chase off_diag[idx] to the right with left
        // rotations on rows (j, idx), which splits the block.
        let mut found_zero = false;
        for idx in lo..hi {
            if diag[idx].abs() <= b_thresh {
                diag[idx] = zero;
                let mut z = off_diag[idx];
                off_diag[idx] = zero;
                for j in (idx + 1)..=hi {
                    let (c, s) = givens(diag[j], z);
                    diag[j] = c * diag[j] + s * z;
                    if j < hi {
                        z = zero - s * off_diag[j];
                        off_diag[j] = c * off_diag[j];
                    }
                    rotate_cols(u, j, idx, c, s);
                }
                found_zero = true;
                break;
            }
        }
        if found_zero {
            continue;
        }

        // Wilkinson shift from the trailing 2×2 of BᵗB
        let d_hi = diag[hi];
        let d_hi1 = diag[hi - 1];
        let e_hi1 = off_diag[hi - 1];
        let e_hi2 = if hi >= 2 && hi - 2 >= lo {
            off_diag[hi - 2]
        } else {
            zero
        };

        let t11 = d_hi1 * d_hi1 + e_hi2 * e_hi2;
        let t12 = d_hi1 * e_hi1;
        let t22 = d_hi * d_hi + e_hi1 * e_hi1;

        let two = T::one() + T::one();
        let d = (t11 - t22) / two;
        let sign_d = if d >= zero { T::one() } else { -T::one() };
        let denom = d + sign_d * (d * d + t12 * t12).sqrt();
        let mu = if denom == zero {
            t22
        } else {
            t22 - t12 * t12 / denom
        };

        // Implicit QR chase
        let mut x = diag[lo] * diag[lo] - mu;
        let mut z = diag[lo] * off_diag[lo];

        for k in lo..hi {
            // Right rotation on columns k, k+1 zeroes z
            let (c, s) = givens(x, z);
            if k > lo {
                off_diag[k - 1] = c * x + s * z;
            }

            let dk = diag[k];
            let ek = off_diag[k];
            let dk1 = diag[k + 1];

            diag[k] = c * dk + s * ek;
            off_diag[k] = c * ek - s * dk;
            let bulge = s * dk1;
            diag[k + 1] = c * dk1;

            rotate_cols(v, k, k + 1, c, s);

            // Left rotation on rows k, k+1 zeroes the bulge at B[k+1, k]
            let (c2, s2) = givens(diag[k], bulge);

            diag[k] = c2 * diag[k] + s2 * bulge;
            let old_ek = off_diag[k];
            let old_dk1 = diag[k + 1];
            off_diag[k] = c2 * old_ek + s2 * old_dk1;
            diag[k + 1] = c2 * old_dk1 - s2 * old_ek;

            if k + 1 < hi {
                // Fill-in at B[k, k+2] drives the next right rotation
                let old_ek1 = off_diag[k + 1];
                x = off_diag[k];
                z = s2 * old_ek1;
                off_diag[k + 1] = c2 * old_ek1;
            }

            rotate_cols(u, k, k + 1, c2, s2);
        }
    }

    // Nonnegative values; the sign goes into U
    for i in 0..n {
        if diag[i] < zero {
            diag[i] = -diag[i];
            for row in 0..u.nrows() {
                let val = *u.get(row, i);
                *u.get_mut(row, i) = -val;
            }
        }
    }

    // Selection sort descending, permuting U and V columns alike
    for i in 0..n {
        let mut max_idx = i;
        for j in (i + 1)..n {
            if diag[j] > diag[max_idx] {
                max_idx = j;
            }
        }
        if max_idx != i {
            diag.swap(i, max_idx);
            for row in 0..u.nrows() {
                let tmp = *u.get(row, i);
                *u.get_mut(row, i) = *u.get(row, max_idx);
                *u.get_mut(row, max_idx) = tmp;
            }
            for row in 0..v.nrows() {
                let tmp = *v.get(row, i);
                *v.get_mut(row, i) = *v.get(row, max_idx);
                *v.get_mut(row, max_idx) = tmp;
            }
        }
    }

    (iter, converged)
}

/// Singular value decomposition with default [`SvdSettings`].
///
/// ```
/// use matdecomp::Matrix;
/// use matdecomp::linalg::svd;
///
/// let a = Matrix::from_rows(3, 2, &[1.0_f64, 0.0, 0.0, 2.0, 0.0, 0.0]);
/// let f = svd(&a).unwrap();
/// assert!(f.converged);
/// let sv = f.singular_values();
/// assert!((sv[0] - 2.0).abs() < 1e-12);
/// assert!((sv[1] - 1.0).abs() < 1e-12);
/// assert!(f.residual(&a) < 1e-12);
/// ```
pub fn svd<T: FloatScalar>(a: &Matrix<T>) -> Result<SvdResult<T>, LinalgError> {
    svd_with(a, &SvdSettings::default())
}

/// Singular value decomposition of any `m × n` matrix.
///
/// Bidiagonalizes `A`, then runs implicit-shift sweeps until every
/// superdiagonal entry is negligible or `settings.max_iterations` is reached.
/// Wide matrices are decomposed through `Aᵗ = V·Sᵗ·Uᵗ`.
///
/// Hitting the iteration cap is not an error: the result carries
/// `converged = false` and a warning is logged.
pub fn svd_with<T: FloatScalar>(
    a: &Matrix<T>,
    settings: &SvdSettings<T>,
) -> Result<SvdResult<T>, LinalgError> {
    let (m, n) = a.shape();
    if m < n {
        let t = svd_with(&a.transpose(), settings)?;
        return Ok(SvdResult {
            u: t.v,
            s: t.s.transpose(),
            v: t.u,
            iterations: t.iterations,
            converged: t.converged,
        });
    }

    let DiagonalizationResult { mut u, d, mut v } = bidiagonalization(a)?;
    let mut diag: Vec<T> = (0..n).map(|i| d[(i, i)]).collect();
    let mut off_diag: Vec<T> = (0..n.saturating_sub(1)).map(|i| d[(i, i + 1)]).collect();

    // The shift squares entries of B; sweep on B / max|B| and scale back.
    let scale = diag
        .iter()
        .chain(off_diag.iter())
        .fold(T::zero(), |m, &x| m.max(x.abs()));
    if scale > T::zero() {
        for x in diag.iter_mut().chain(off_diag.iter_mut()) {
            *x = *x / scale;
        }
    }

    let (iterations, converged) = bidiagonal_qr(
        &mut diag,
        &mut off_diag,
        &mut u,
        &mut v,
        settings.max_iterations,
        settings.tolerance,
    );
    if scale > T::zero() {
        for x in diag.iter_mut() {
            *x = *x * scale;
        }
    }

    if converged {
        log::debug!("svd {}x{}: converged after {} sweeps", m, n, iterations);
    } else {
        log::warn!(
            "svd {}x{}: no convergence after {} sweeps, returning best approximation",
            m,
            n,
            iterations
        );
    }

    Ok(SvdResult {
        u,
        s: Matrix::from_diag(m, n, &diag),
        v,
        iterations,
        converged,
    })
}
