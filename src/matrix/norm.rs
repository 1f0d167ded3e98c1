use crate::traits::{FloatScalar, Scalar};

use super::Matrix;

impl<T: Scalar> Matrix<T> {
    /// Squared Frobenius norm (sum of all elements squared).
    ///
    /// ```
    /// use matdecomp::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[1, 2, 3, 4]);
    /// assert_eq!(m.norm_squared(), 30);
    /// ```
    pub fn norm_squared(&self) -> T {
        let mut sum = T::zero();
        for &x in &self.data {
            sum = sum + x * x;
        }
        sum
    }

    /// Inner product of two same-shaped matrices (vectors), `Σ aᵢⱼ bᵢⱼ`.
    pub fn dot(&self, rhs: &Matrix<T>) -> T {
        assert_eq!(self.shape(), rhs.shape(), "dimension mismatch in dot");
        let mut sum = T::zero();
        for (&a, &b) in self.data.iter().zip(rhs.data.iter()) {
            sum = sum + a * b;
        }
        sum
    }
}

/// Euclidean length of `xs`, scaled by the largest magnitude first so the
/// squares neither overflow nor underflow.
fn scaled_norm<T: FloatScalar>(xs: impl Iterator<Item = T> + Clone) -> T {
    let scale = xs.clone().fold(T::zero(), |m, x| m.max(x.abs()));
    if scale == T::zero() || !scale.is_finite() {
        return scale;
    }
    let sum = xs.fold(T::zero(), |acc, x| {
        let y = x / scale;
        acc + y * y
    });
    scale * sum.sqrt()
}

impl<T: FloatScalar> Matrix<T> {
    /// Frobenius norm. For a row or column vector this is the Euclidean norm.
    ///
    /// ```
    /// use matdecomp::Matrix;
    /// let v = Matrix::column(&[3.0_f64, 4.0]);
    /// assert!((v.norm() - 5.0).abs() < 1e-12);
    /// ```
    pub fn norm(&self) -> T {
        scaled_norm(self.data.iter().copied())
    }

    /// Euclidean norm of column `j`.
    pub fn column_norm(&self, j: usize) -> T {
        scaled_norm((0..self.nrows).map(|i| self[(i, j)]))
    }

    /// Euclidean norm of row `i`.
    pub fn row_norm(&self, i: usize) -> T {
        scaled_norm((0..self.ncols).map(|j| self[(i, j)]))
    }

    /// Largest absolute entry (the max norm).
    pub fn max_abs(&self) -> T {
        self.data
            .iter()
            .fold(T::zero(), |acc, &x| if x.abs() > acc { x.abs() } else { acc })
    }

    /// Scale every column to unit Euclidean norm. Zero columns are left as is.
    ///
    /// ```
    /// use matdecomp::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[3.0_f64, 0.0, 4.0, 2.0]).normalize_columns();
    /// assert!((m[(0, 0)] - 0.6).abs() < 1e-12);
    /// assert!((m[(1, 1)] - 1.0).abs() < 1e-12);
    /// ```
    pub fn normalize_columns(&self) -> Self {
        let mut out = self.clone();
        for j in 0..self.ncols {
            let n = self.column_norm(j);
            if n > T::zero() {
                for i in 0..self.nrows {
                    out[(i, j)] = out[(i, j)] / n;
                }
            }
        }
        out
    }
}
