use alloc::vec::Vec;

use crate::traits::{FloatScalar, Scalar};

use super::Matrix;

impl<T: Scalar> Matrix<T> {
    /// Sum of diagonal elements.
    ///
    /// ```
    /// use matdecomp::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(m.trace(), 5.0);
    /// ```
    pub fn trace(&self) -> T {
        let n = self.nrows.min(self.ncols);
        let mut sum = T::zero();
        for i in 0..n {
            sum = sum + self[(i, i)];
        }
        sum
    }

    /// Main diagonal as a `Vec`.
    pub fn diagonal(&self) -> Vec<T> {
        let n = self.nrows.min(self.ncols);
        (0..n).map(|i| self[(i, i)]).collect()
    }

    /// Create an `nrows x ncols` matrix with `values` on its main diagonal.
    ///
    /// Panics if `values` is longer than `min(nrows, ncols)`.
    ///
    /// ```
    /// use matdecomp::Matrix;
    /// let m = Matrix::from_diag(2, 3, &[2.0, 3.0]);
    /// assert_eq!(m[(1, 1)], 3.0);
    /// assert_eq!(m[(0, 2)], 0.0);
    /// ```
    pub fn from_diag(nrows: usize, ncols: usize, values: &[T]) -> Self {
        assert!(
            values.len() <= nrows.min(ncols),
            "{} diagonal values do not fit a {}x{} matrix",
            values.len(),
            nrows,
            ncols,
        );
        let mut m = Self::zeros(nrows, ncols);
        for (i, &v) in values.iter().enumerate() {
            m[(i, i)] = v;
        }
        m
    }

    /// Check if the matrix is exactly symmetric (`A == A^T`).
    ///
    /// ```
    /// use matdecomp::Matrix;
    /// let sym = Matrix::from_rows(2, 2, &[1.0, 2.0, 2.0, 3.0]);
    /// assert!(sym.is_symmetric());
    /// ```
    pub fn is_symmetric(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        let n = self.nrows;
        for i in 0..n {
            for j in (i + 1)..n {
                if self[(i, j)] != self[(j, i)] {
                    return false;
                }
            }
        }
        true
    }
}

impl<T: FloatScalar> Matrix<T> {
    /// Elementwise comparison, `|a - b| <= tol` for every entry.
    ///
    /// Matrices of different shapes never compare equal. Use `==` for exact
    /// comparison.
    ///
    /// ```
    /// use matdecomp::Matrix;
    /// let a = Matrix::from_rows(1, 2, &[1.0_f64, 2.0]);
    /// let b = Matrix::from_rows(1, 2, &[1.0_f64, 2.0 + 1e-9]);
    /// assert!(a.approx_eq(&b, 1e-6));
    /// assert!(!a.approx_eq(&b, 1e-12));
    /// ```
    pub fn approx_eq(&self, other: &Matrix<T>, tol: T) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(&a, &b)| (a - b).abs() <= tol)
    }

    /// Symmetry up to an absolute tolerance, `|a_ij - a_ji| <= tol`.
    pub fn is_symmetric_tol(&self, tol: T) -> bool {
        if !self.is_square() {
            return false;
        }
        let n = self.nrows;
        for i in 0..n {
            for j in (i + 1)..n {
                if (self[(i, j)] - self[(j, i)]).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Whether `AᵗA ≈ I` and `AAᵗ ≈ I` within `tol` (square matrices only).
    ///
    /// ```
    /// use matdecomp::Matrix;
    /// let (s, c) = 0.3_f64.sin_cos();
    /// let r = Matrix::from_rows(2, 2, &[c, -s, s, c]);
    /// assert!(r.is_orthogonal(1e-12));
    /// assert!(!Matrix::fill(2, 2, 1.0_f64).is_orthogonal(1e-3));
    /// ```
    pub fn is_orthogonal(&self, tol: T) -> bool {
        if !self.is_square() {
            return false;
        }
        let id = Matrix::eye(self.nrows);
        let t = self.transpose();
        (&t * self).approx_eq(&id, tol) && (self * &t).approx_eq(&id, tol)
    }

    /// Whether the columns are orthonormal, `AᵗA ≈ I` (any `m ≥ n` shape).
    pub fn has_orthonormal_columns(&self, tol: T) -> bool {
        (&self.transpose() * self).approx_eq(&Matrix::eye(self.ncols), tol)
    }

    /// All entries strictly below the main diagonal are within `tol` of zero.
    pub fn is_upper_triangular(&self, tol: T) -> bool {
        self.all_outside_band(tol, |i, j| j >= i)
    }

    /// All entries strictly above the main diagonal are within `tol` of zero.
    pub fn is_lower_triangular(&self, tol: T) -> bool {
        self.all_outside_band(tol, |i, j| j <= i)
    }

    /// Nonzero (beyond `tol`) only on the main diagonal and first superdiagonal.
    pub fn is_upper_bidiagonal(&self, tol: T) -> bool {
        self.all_outside_band(tol, |i, j| j == i || j == i + 1)
    }

    /// Nonzero (beyond `tol`) only on the main diagonal.
    pub fn is_diagonal(&self, tol: T) -> bool {
        self.all_outside_band(tol, |i, j| i == j)
    }

    fn all_outside_band(&self, tol: T, in_band: impl Fn(usize, usize) -> bool) -> bool {
        for i in 0..self.nrows {
            for j in 0..self.ncols {
                if !in_band(i, j) && self[(i, j)].abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}
