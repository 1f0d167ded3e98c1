//! Elementary row-operation matrices.
//!
//! Each generator returns the `n × n` matrix `E` (with `n = a.nrows()`) such
//! that `E·a` performs the row operation on `a`. Only the shape of `a` is
//! used.

use crate::linalg::LinalgError;
use crate::traits::Scalar;
use crate::Matrix;

fn check_row<T>(a: &Matrix<T>, row: usize) -> Result<(), LinalgError> {
    if row < a.nrows() {
        Ok(())
    } else {
        Err(LinalgError::IndexOutOfRange {
            index: row,
            bound: a.nrows(),
        })
    }
}

/// Permutation that exchanges rows `r0` and `r1`.
///
/// ```
/// use matdecomp::Matrix;
/// use matdecomp::linalg::row_swap;
///
/// let a = Matrix::from_rows(2, 2, &[1, 2, 3, 4]);
/// let e = row_swap(&a, 0, 1).unwrap();
/// assert_eq!(&e * &a, Matrix::from_rows(2, 2, &[3, 4, 1, 2]));
/// ```
pub fn row_swap<T: Scalar>(a: &Matrix<T>, r0: usize, r1: usize) -> Result<Matrix<T>, LinalgError> {
    check_row(a, r0)?;
    check_row(a, r1)?;
    let mut e = Matrix::eye(a.nrows());
    e.swap_rows(r0, r1);
    Ok(e)
}

/// Matrix that adds `factor · row r0` to row `r1`.
pub fn row_add_multiple<T: Scalar>(
    a: &Matrix<T>,
    factor: T,
    r0: usize,
    r1: usize,
) -> Result<Matrix<T>, LinalgError> {
    check_row(a, r0)?;
    check_row(a, r1)?;
    let mut e = Matrix::eye(a.nrows());
    e[(r1, r0)] = e[(r1, r0)] + factor;
    Ok(e)
}

/// Matrix that multiplies row `r` by `factor`.
pub fn row_scale<T: Scalar>(a: &Matrix<T>, factor: T, r: usize) -> Result<Matrix<T>, LinalgError> {
    check_row(a, r)?;
    let mut e = Matrix::eye(a.nrows());
    e[(r, r)] = factor;
    Ok(e)
}
