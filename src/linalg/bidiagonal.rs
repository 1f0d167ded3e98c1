use alloc::vec::Vec;

use crate::linalg::householder::{apply_left, apply_right, reflector};
use crate::linalg::LinalgError;
use crate::traits::FloatScalar;
use crate::Matrix;

/// Factorization `A = U·D·Vᵗ` with orthogonal `U` (`m × m`), `V` (`n × n`)
/// and structured `D` (`m × n`).
///
/// [`bidiagonalization`] produces an upper-bidiagonal `D`.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagonalizationResult<T> {
    pub u: Matrix<T>,
    pub d: Matrix<T>,
    pub v: Matrix<T>,
}

impl<T: FloatScalar> DiagonalizationResult<T> {
    /// `U·D·Vᵗ`.
    pub fn reconstruct(&self) -> Matrix<T> {
        &(&self.u * &self.d) * &self.v.transpose()
    }

    /// Frobenius norm of `A − U·D·Vᵗ`.
    pub fn residual(&self, a: &Matrix<T>) -> T {
        (a - &self.reconstruct()).norm()
    }
}

/// Golub-Kahan bidiagonalization by alternating Householder reflections.
///
/// For every column `k` a left reflector zeroes `D[k+1.., k]` and, while
/// `k + 2 ≤ n`, a right reflector zeroes `D[k, k+2..]`. Eliminated entries are
/// stored as exact zeros. Requires `m ≥ n`, otherwise
/// [`LinalgError::InvalidDimension`].
///
/// ```
/// use matdecomp::Matrix;
/// use matdecomp::linalg::bidiagonalization;
///
/// let a = Matrix::from_rows(3, 3, &[1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 10.0]);
/// let f = bidiagonalization(&a).unwrap();
/// assert!(f.d.is_upper_bidiagonal(0.0));
/// assert!(f.residual(&a) < 1e-12);
/// ```
pub fn bidiagonalization<T: FloatScalar>(
    a: &Matrix<T>,
) -> Result<DiagonalizationResult<T>, LinalgError> {
    let (m, n) = a.shape();
    if m < n {
        return Err(LinalgError::InvalidDimension {
            op: "bidiagonalization",
            rows: m,
            cols: n,
        });
    }

    let mut d = a.clone();
    let mut u = Matrix::<T>::eye(m);
    let mut v = Matrix::<T>::eye(n);

    for k in 0..n {
        let col: Vec<T> = (k..m).map(|i| d[(i, k)]).collect();
        let h = reflector(&col);
        if h.b != T::zero() {
            apply_left(&mut d, &h.v, h.b, k, k);
            d[(k, k)] = h.alpha;
            for i in (k + 1)..m {
                d[(i, k)] = T::zero();
            }
            apply_right(&mut u, &h.v, h.b, 0, k);
        }

        if k + 2 <= n {
            let row: Vec<T> = ((k + 1)..n).map(|j| d[(k, j)]).collect();
            let g = reflector(&row);
            if g.b != T::zero() {
                apply_right(&mut d, &g.v, g.b, k, k + 1);
                d[(k, k + 1)] = g.alpha;
                for j in (k + 2)..n {
                    d[(k, j)] = T::zero();
                }
                apply_right(&mut v, &g.v, g.b, 0, k + 1);
            }
        }
    }

    Ok(DiagonalizationResult { u, d, v })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn check(a: &Matrix<f64>) {
        let f = bidiagonalization(a).unwrap();
        let (m, n) = a.shape();
        assert_eq!(f.u.shape(), (m, m));
        assert_eq!(f.d.shape(), (m, n));
        assert_eq!(f.v.shape(), (n, n));
        assert!(f.u.is_orthogonal(TOL));
        assert!(f.v.is_orthogonal(TOL));
        assert!(f.d.is_upper_bidiagonal(0.0));
        assert!(f.reconstruct().approx_eq(a, TOL));
        let projected = &(&f.u.transpose() * a) * &f.v;
        assert!(projected.approx_eq(&f.d, TOL));
    }

    #[test]
    fn square_4x4() {
        check(&Matrix::from_rows(
            4,
            4,
            &[6.0, 8.0, 8.0, 7.0, 7.0, 8.0, 6.0, 5.0, 4.0, 2.0, 3.0, 7.0, 9.0, 1.0, 4.0, 8.0],
        ));
        check(&Matrix::from_rows(
            4,
            4,
            &[1.0, 4.0, 1.0, 6.0, 10.0, 0.0, 6.0, 4.0, 7.0, 10.0, 2.0, 7.0, 8.0, 4.0, 5.0, 3.0],
        ));
    }

    #[test]
    fn tall() {
        check(&Matrix::from_fn(5, 3, |i, j| ((i + 1) * (j + 2)) as f64 + (i * j) as f64 * 0.5 - 1.0));
    }

    #[test]
    fn already_bidiagonal() {
        let a = Matrix::from_rows(3, 3, &[2.0_f64, 1.0, 0.0, 0.0, 3.0, -1.0, 0.0, 0.0, 4.0]);
        let f = bidiagonalization(&a).unwrap();
        assert_eq!(f.d, a);
        assert_eq!(f.u, Matrix::eye(3));
        assert_eq!(f.v, Matrix::eye(3));
    }

    #[test]
    fn tiny_and_huge_scales() {
        let a = Matrix::from_rows(3, 3, &[4.0_f64, 1.0, -1.0, 1.0, 3.0, 2.0, -1.0, 2.0, 5.0]);
        let reference = bidiagonalization(&a).unwrap().d;
        for scale in [1e-170_f64, 1e155] {
            let scaled = &a * scale;
            let f = bidiagonalization(&scaled).unwrap();
            assert!(f.u.is_orthogonal(TOL), "scale {}", scale);
            assert!(f.v.is_orthogonal(TOL), "scale {}", scale);
            assert!(f.d.is_upper_bidiagonal(0.0), "scale {}", scale);
            assert!(f.reconstruct().approx_eq(&scaled, TOL * scale));
            assert!((&f.d * (1.0 / scale)).approx_eq(&reference, TOL), "scale {}", scale);
        }
    }

    #[test]
    fn rejects_wide() {
        assert!(matches!(
            bidiagonalization(&Matrix::<f64>::zeros(2, 4)),
            Err(LinalgError::InvalidDimension { rows: 2, cols: 4, .. })
        ));
    }
}
