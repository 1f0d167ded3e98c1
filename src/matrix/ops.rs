use alloc::vec;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::linalg::LinalgError;
use crate::traits::Scalar;

use super::Matrix;

fn assert_same_shape<T>(lhs: &Matrix<T>, rhs: &Matrix<T>, op: &str) {
    assert_eq!(
        (lhs.nrows, lhs.ncols),
        (rhs.nrows, rhs.ncols),
        "dimension mismatch: {}x{} {} {}x{}",
        lhs.nrows,
        lhs.ncols,
        op,
        rhs.nrows,
        rhs.ncols,
    );
}

fn zip_with<T: Scalar>(lhs: &Matrix<T>, rhs: &Matrix<T>, f: impl Fn(T, T) -> T) -> Matrix<T> {
    let data = lhs
        .data
        .iter()
        .zip(rhs.data.iter())
        .map(|(&a, &b)| f(a, b))
        .collect();
    Matrix {
        data,
        nrows: lhs.nrows,
        ncols: lhs.ncols,
    }
}

// ── Element-wise addition ───────────────────────────────────────────

impl<T: Scalar> Add<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;

    fn add(self, rhs: &Matrix<T>) -> Matrix<T> {
        assert_same_shape(self, rhs, "+");
        zip_with(self, rhs, |a, b| a + b)
    }
}

impl<T: Scalar> Add for Matrix<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        &self + &rhs
    }
}

impl<T: Scalar> Add<&Matrix<T>> for Matrix<T> {
    type Output = Matrix<T>;
    fn add(self, rhs: &Matrix<T>) -> Matrix<T> {
        &self + rhs
    }
}

impl<T: Scalar> AddAssign<&Matrix<T>> for Matrix<T> {
    fn add_assign(&mut self, rhs: &Matrix<T>) {
        assert_same_shape(self, rhs, "+=");
        for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
            *a = *a + b;
        }
    }
}

// ── Element-wise subtraction ────────────────────────────────────────

impl<T: Scalar> Sub<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;

    fn sub(self, rhs: &Matrix<T>) -> Matrix<T> {
        assert_same_shape(self, rhs, "-");
        zip_with(self, rhs, |a, b| a - b)
    }
}

impl<T: Scalar> Sub for Matrix<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        &self - &rhs
    }
}

impl<T: Scalar> Sub<&Matrix<T>> for Matrix<T> {
    type Output = Matrix<T>;
    fn sub(self, rhs: &Matrix<T>) -> Matrix<T> {
        &self - rhs
    }
}

impl<T: Scalar> SubAssign<&Matrix<T>> for Matrix<T> {
    fn sub_assign(&mut self, rhs: &Matrix<T>) {
        assert_same_shape(self, rhs, "-=");
        for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
            *a = *a - b;
        }
    }
}

// ── Negation ────────────────────────────────────────────────────────

impl<T: Scalar + Neg<Output = T>> Neg for Matrix<T> {
    type Output = Self;

    fn neg(mut self) -> Self {
        for x in self.data.iter_mut() {
            *x = -*x;
        }
        self
    }
}

impl<T: Scalar + Neg<Output = T>> Neg for &Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        -self.clone()
    }
}

// ── Matrix multiplication: (M×N) * (N×P) → (M×P) ──────────────────

impl<T: Scalar> Mul<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;

    /// Panics on mismatched inner dimensions; see [`Matrix::try_mul`].
    fn mul(self, rhs: &Matrix<T>) -> Matrix<T> {
        assert_eq!(
            self.ncols, rhs.nrows,
            "dimension mismatch: {}x{} * {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols,
        );
        let m = self.nrows;
        let n = self.ncols;
        let p = rhs.ncols;
        let mut data = vec![T::zero(); m * p];
        for i in 0..m {
            for k in 0..n {
                let a_ik = self.data[i * n + k];
                for j in 0..p {
                    data[i * p + j] = data[i * p + j] + a_ik * rhs.data[k * p + j];
                }
            }
        }
        Matrix {
            data,
            nrows: m,
            ncols: p,
        }
    }
}

impl<T: Scalar> Mul for Matrix<T> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        &self * &rhs
    }
}

impl<T: Scalar> Mul<&Matrix<T>> for Matrix<T> {
    type Output = Matrix<T>;
    fn mul(self, rhs: &Matrix<T>) -> Matrix<T> {
        &self * rhs
    }
}

impl<T: Scalar> Mul<Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;
    fn mul(self, rhs: Matrix<T>) -> Matrix<T> {
        self * &rhs
    }
}

// ── Scalar multiplication: matrix * scalar ──────────────────────────

impl<T: Scalar> Mul<T> for Matrix<T> {
    type Output = Self;

    fn mul(mut self, rhs: T) -> Self {
        self *= rhs;
        self
    }
}

impl<T: Scalar> Mul<T> for &Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: T) -> Matrix<T> {
        self.clone() * rhs
    }
}

impl<T: Scalar> MulAssign<T> for Matrix<T> {
    fn mul_assign(&mut self, rhs: T) {
        for x in self.data.iter_mut() {
            *x = *x * rhs;
        }
    }
}

// ── scalar * matrix (concrete impls) ────────────────────────────────

macro_rules! impl_scalar_mul {
    ($($t:ty),*) => {
        $(
            impl Mul<Matrix<$t>> for $t {
                type Output = Matrix<$t>;
                fn mul(self, rhs: Matrix<$t>) -> Matrix<$t> {
                    rhs * self
                }
            }

            impl Mul<&Matrix<$t>> for $t {
                type Output = Matrix<$t>;
                fn mul(self, rhs: &Matrix<$t>) -> Matrix<$t> {
                    rhs * self
                }
            }
        )*
    };
}

impl_scalar_mul!(f32, f64, i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

impl<T: Scalar> Matrix<T> {
    /// Matrix product that reports mismatched inner dimensions instead of
    /// panicking.
    ///
    /// ```
    /// use matdecomp::Matrix;
    /// use matdecomp::linalg::LinalgError;
    ///
    /// let a = Matrix::fill(2, 3, 1.0_f64);
    /// let b = Matrix::fill(2, 2, 1.0_f64);
    /// assert!(matches!(a.try_mul(&b), Err(LinalgError::InvalidDimension { .. })));
    /// assert_eq!(a.transpose().try_mul(&b).unwrap().shape(), (3, 2));
    /// ```
    pub fn try_mul(&self, rhs: &Matrix<T>) -> Result<Matrix<T>, LinalgError> {
        if self.ncols != rhs.nrows {
            return Err(LinalgError::InvalidDimension {
                op: "multiply",
                rows: rhs.nrows,
                cols: rhs.ncols,
            });
        }
        Ok(self * rhs)
    }

    /// Transpose: (M×N) → (N×M).
    ///
    /// ```
    /// use matdecomp::Matrix;
    /// let a = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// let t = a.transpose();
    /// assert_eq!(t.nrows(), 3);
    /// assert_eq!(t.ncols(), 2);
    /// assert_eq!(t[(1, 0)], 2.0);
    /// ```
    pub fn transpose(&self) -> Self {
        let n = self.ncols;
        Matrix::from_fn(self.ncols, self.nrows, |i, j| self.data[j * n + i])
    }
}
