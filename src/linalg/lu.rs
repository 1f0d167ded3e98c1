use crate::linalg::LinalgError;
use crate::traits::FloatScalar;
use crate::Matrix;

/// LU factorization `P·A = L·U` of a square matrix.
///
/// `l` is unit lower-triangular, `u` upper-triangular and `p` the row
/// permutation accumulated during pivoting (the identity when pivoting is
/// disabled). `row_swaps` counts the interchanges actually performed.
///
/// # Example
///
/// ```
/// use matdecomp::Matrix;
/// use matdecomp::linalg::lu_decomposition;
///
/// let a = Matrix::from_rows(2, 2, &[0.0_f64, -2.0, 1.0, 1.0]);
/// let lu = lu_decomposition(&a, true).unwrap();
/// assert_eq!(lu.u, Matrix::from_rows(2, 2, &[1.0, 1.0, 0.0, -2.0]));
/// assert_eq!(lu.row_swaps, 1);
/// assert!((&lu.p * &a).approx_eq(&(&lu.l * &lu.u), 1e-12));
/// assert!((lu.determinant() - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LuResult<T> {
    pub l: Matrix<T>,
    pub u: Matrix<T>,
    pub p: Matrix<T>,
    pub row_swaps: usize,
}

impl<T: FloatScalar> LuResult<T> {
    /// `det(A)`, with the sign taken from the parity of `row_swaps`.
    pub fn determinant(&self) -> T {
        let mut d = if self.row_swaps % 2 == 0 {
            T::one()
        } else {
            -T::one()
        };
        for i in 0..self.u.nrows() {
            d = d * self.u[(i, i)];
        }
        d
    }

    /// Whether any pivot of `U` is within `tol` of zero.
    pub fn is_singular(&self, tol: T) -> bool {
        (0..self.u.nrows()).any(|i| self.u[(i, i)].abs() <= tol)
    }
}

/// Gaussian elimination with optional partial pivoting.
///
/// With `pivoting`, column `k` pivots on the first row `r ≥ k` holding the
/// largest `|a[r][k]|`; a column that is already zero below the diagonal is
/// skipped, leaving a zero pivot on `U` (see [`LuResult::is_singular`]).
/// Without pivoting, a pivot with `|pivot| ≤ ε·max|A|` fails with
/// [`LinalgError::Singular`].
///
/// Returns [`LinalgError::InvalidDimension`] for non-square input.
pub fn lu_decomposition<T: FloatScalar>(
    a: &Matrix<T>,
    pivoting: bool,
) -> Result<LuResult<T>, LinalgError> {
    if !a.is_square() {
        return Err(LinalgError::InvalidDimension {
            op: "lu_decomposition",
            rows: a.nrows(),
            cols: a.ncols(),
        });
    }

    let n = a.nrows();
    let mut u = a.clone();
    let mut l = Matrix::<T>::eye(n);
    let mut p = Matrix::<T>::eye(n);
    let mut row_swaps = 0;
    let singular_tol = T::epsilon() * a.max_abs();

    for k in 0..n {
        if pivoting {
            let mut max_row = k;
            let mut max_val = u[(k, k)].abs();
            for r in (k + 1)..n {
                let val = u[(r, k)].abs();
                if val > max_val {
                    max_val = val;
                    max_row = r;
                }
            }

            if max_row != k {
                u.swap_rows(k, max_row);
                p.swap_rows(k, max_row);
                // Only the multipliers already computed travel with the row.
                for j in 0..k {
                    let tmp = l[(k, j)];
                    l[(k, j)] = l[(max_row, j)];
                    l[(max_row, j)] = tmp;
                }
                row_swaps += 1;
            }
        }

        let pivot = u[(k, k)];
        if !pivoting && pivot.abs() <= singular_tol {
            return Err(LinalgError::Singular);
        }
        if pivot == T::zero() {
            continue;
        }

        for i in (k + 1)..n {
            let factor = u[(i, k)] / pivot;
            l[(i, k)] = factor;
            u[(i, k)] = T::zero();
            for j in (k + 1)..n {
                u[(i, j)] = u[(i, j)] - factor * u[(k, j)];
            }
        }
    }

    Ok(LuResult { l, u, p, row_swaps })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
        assert!((a - b).abs() < tol, "{}: {} vs {} (diff {})", msg, a, b, (a - b).abs());
    }

    fn assert_mat_near(a: &Matrix<f64>, b: &Matrix<f64>, tol: f64) {
        assert_eq!(a.shape(), b.shape());
        for i in 0..a.nrows() {
            for j in 0..a.ncols() {
                assert_near(a[(i, j)], b[(i, j)], tol, &alloc::format!("({},{})", i, j));
            }
        }
    }

    #[test]
    fn unpivoted_2x2() {
        let a = Matrix::from_rows(2, 2, &[4.0_f64, 3.0, 6.0, 3.0]);
        let lu = lu_decomposition(&a, false).unwrap();
        assert_mat_near(&lu.l, &Matrix::from_rows(2, 2, &[1.0, 0.0, 1.5, 1.0]), TOL);
        assert_mat_near(&lu.u, &Matrix::from_rows(2, 2, &[4.0, 3.0, 0.0, -1.5]), TOL);
        assert_eq!(lu.p, Matrix::eye(2));
        assert_eq!(lu.row_swaps, 0);
    }

    #[test]
    fn unpivoted_3x3_reconstructs() {
        let a = Matrix::from_rows(3, 3, &[4.0_f64, 1.0, 7.0, 3.0, 5.0, 10.0, 1.0, -4.0, 2.0]);
        let lu = lu_decomposition(&a, false).unwrap();
        assert!(lu.l.is_lower_triangular(0.0));
        assert!(lu.u.is_upper_triangular(0.0));
        for i in 0..3 {
            assert_eq!(lu.l[(i, i)], 1.0);
        }
        assert_mat_near(&(&lu.l * &lu.u), &a, 1e-12);
    }

    #[test]
    fn identity_is_fixed_point() {
        let id = Matrix::<f64>::eye(4);
        for pivoting in [false, true] {
            let lu = lu_decomposition(&id, pivoting).unwrap();
            assert_eq!(lu.l, id);
            assert_eq!(lu.u, id);
            assert_eq!(lu.p, id);
            assert_eq!(lu.row_swaps, 0);
        }
    }

    #[test]
    fn partial_pivoting_4x4() {
        let a = Matrix::from_rows(
            4,
            4,
            &[
                2.0_f64, 1.0, 1.0, 0.0, //
                4.0, 3.0, 3.0, 1.0, //
                8.0, 7.0, 9.0, 5.0, //
                6.0, 7.0, 9.0, 8.0,
            ],
        );
        let lu = lu_decomposition(&a, true).unwrap();

        let l = Matrix::from_rows(
            4,
            4,
            &[
                1.0, 0.0, 0.0, 0.0, //
                0.75, 1.0, 0.0, 0.0, //
                0.5, -2.0 / 7.0, 1.0, 0.0, //
                0.25, -3.0 / 7.0, 1.0 / 3.0, 1.0,
            ],
        );
        let u = Matrix::from_rows(
            4,
            4,
            &[
                8.0, 7.0, 9.0, 5.0, //
                0.0, 1.75, 2.25, 4.25, //
                0.0, 0.0, -6.0 / 7.0, -2.0 / 7.0, //
                0.0, 0.0, 0.0, 2.0 / 3.0,
            ],
        );
        let p = Matrix::from_rows(
            4,
            4,
            &[
                0.0, 0.0, 1.0, 0.0, //
                0.0, 0.0, 0.0, 1.0, //
                0.0, 1.0, 0.0, 0.0, //
                1.0, 0.0, 0.0, 0.0,
            ],
        );

        assert_mat_near(&lu.l, &l, TOL);
        assert_mat_near(&lu.u, &u, TOL);
        assert_eq!(lu.p, p);
        assert_eq!(lu.row_swaps, 3);
        assert_mat_near(&(&lu.p * &a), &(&lu.l * &lu.u), TOL);
    }

    #[test]
    fn pivoting_moves_zero_pivot() {
        let a = Matrix::from_rows(2, 2, &[0.0_f64, -2.0, 1.0, 1.0]);
        let lu = lu_decomposition(&a, true).unwrap();
        assert_eq!(lu.u, Matrix::from_rows(2, 2, &[1.0, 1.0, 0.0, -2.0]));
        assert_eq!(lu.l, Matrix::eye(2));
        assert_eq!(lu.p, Matrix::from_rows(2, 2, &[0.0, 1.0, 1.0, 0.0]));
    }

    #[test]
    fn unpivoted_zero_pivot_is_singular() {
        let a = Matrix::from_rows(2, 2, &[0.0_f64, -2.0, 1.0, 1.0]);
        assert_eq!(lu_decomposition(&a, false), Err(LinalgError::Singular));
    }

    #[test]
    fn pivoted_singular_completes() {
        let a = Matrix::from_rows(3, 3, &[1.0_f64, 2.0, 3.0, 2.0, 4.0, 6.0, 1.0, 0.0, 1.0]);
        let lu = lu_decomposition(&a, true).unwrap();
        assert!(lu.is_singular(1e-12));
        assert_near(lu.determinant(), 0.0, 1e-12, "det");
        assert_mat_near(&(&lu.p * &a), &(&lu.l * &lu.u), 1e-12);
    }

    #[test]
    fn determinant_3x3() {
        let a = Matrix::from_rows(3, 3, &[6.0_f64, 1.0, 1.0, 4.0, -2.0, 5.0, 2.0, 8.0, 7.0]);
        let lu = lu_decomposition(&a, true).unwrap();
        assert_near(lu.determinant(), -306.0, 1e-10, "det");
        assert!(!lu.is_singular(1e-12));
    }

    #[test]
    fn rejects_non_square() {
        let a = Matrix::<f64>::zeros(3, 2);
        assert_eq!(
            lu_decomposition(&a, true),
            Err(LinalgError::InvalidDimension {
                op: "lu_decomposition",
                rows: 3,
                cols: 2
            })
        );
    }

    #[test]
    fn f32_pivoted() {
        let a = Matrix::from_rows(2, 2, &[1.0_f32, 2.0, 3.0, 4.0]);
        let lu = lu_decomposition(&a, true).unwrap();
        assert!((&lu.p * &a).approx_eq(&(&lu.l * &lu.u), 1e-5));
        assert!((lu.determinant() + 2.0).abs() < 1e-5);
    }
}
