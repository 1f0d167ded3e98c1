use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::traits::Scalar;

use super::Matrix;

// ── Row / column exchange ───────────────────────────────────────────

impl<T> Matrix<T> {
    /// Swap two rows in place.
    ///
    /// ```
    /// use matdecomp::Matrix;
    /// let mut m = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// m.swap_rows(0, 1);
    /// assert_eq!(m[(0, 0)], 3.0);
    /// assert_eq!(m[(1, 0)], 1.0);
    /// ```
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a != b {
            let n = self.ncols;
            for j in 0..n {
                self.data.swap(a * n + j, b * n + j);
            }
        }
    }

    /// Swap two columns in place.
    pub fn swap_cols(&mut self, a: usize, b: usize) {
        if a != b {
            for i in 0..self.nrows {
                let ia = i * self.ncols + a;
                let ib = i * self.ncols + b;
                self.data.swap(ia, ib);
            }
        }
    }

    /// Reverse the order of the rows (left-multiply by the exchange matrix).
    pub fn reverse_rows(&mut self) {
        let m = self.nrows;
        for i in 0..m / 2 {
            self.swap_rows(i, m - 1 - i);
        }
    }

    /// Reverse the order of the columns (right-multiply by the exchange matrix).
    pub fn reverse_cols(&mut self) {
        let n = self.ncols;
        for j in 0..n / 2 {
            self.swap_cols(j, n - 1 - j);
        }
    }
}

// ── Row / column access ─────────────────────────────────────────────

impl<T: Scalar> Matrix<T> {
    /// Extract row `i` as a `1 x ncols` matrix.
    ///
    /// ```
    /// use matdecomp::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// let r = m.row(1);
    /// assert_eq!(r.shape(), (1, 2));
    /// assert_eq!(r[(0, 0)], 3.0);
    /// ```
    pub fn row(&self, i: usize) -> Matrix<T> {
        let start = i * self.ncols;
        Matrix::from_rows(1, self.ncols, &self.data[start..start + self.ncols])
    }

    /// Extract column `j` as an `nrows x 1` matrix.
    ///
    /// ```
    /// use matdecomp::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// let c = m.col(1);
    /// assert_eq!(c.shape(), (2, 1));
    /// assert_eq!(c[(1, 0)], 4.0);
    /// ```
    pub fn col(&self, j: usize) -> Matrix<T> {
        Matrix::from_fn(self.nrows, 1, |i, _| self[(i, j)])
    }

    /// Set row `i` from a slice of length `ncols`.
    pub fn set_row(&mut self, i: usize, values: &[T]) {
        assert_eq!(values.len(), self.ncols, "row length mismatch");
        let start = i * self.ncols;
        self.data[start..start + self.ncols].copy_from_slice(values);
    }

    /// Set column `j` from a slice of length `nrows`.
    pub fn set_col(&mut self, j: usize, values: &[T]) {
        assert_eq!(values.len(), self.nrows, "column length mismatch");
        for (i, &v) in values.iter().enumerate() {
            self[(i, j)] = v;
        }
    }

    /// Copy of the `rows x cols` block whose top-left corner is `(i, j)`.
    pub fn block(&self, i: usize, j: usize, rows: usize, cols: usize) -> Matrix<T> {
        assert!(
            i + rows <= self.nrows && j + cols <= self.ncols,
            "block ({}, {}) {}x{} exceeds {}x{} matrix",
            i,
            j,
            rows,
            cols,
            self.nrows,
            self.ncols,
        );
        Matrix::from_fn(rows, cols, |r, c| self[(i + r, j + c)])
    }

    /// Apply `f` to every element.
    pub fn map<U>(&self, f: impl Fn(T) -> U) -> Matrix<U> {
        Matrix {
            data: self.data.iter().map(|&x| f(x)).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }
}

// ── Random construction ─────────────────────────────────────────────

#[cfg(feature = "rand")]
impl<T> Matrix<T>
where
    T: Scalar + PartialOrd + rand::distributions::uniform::SampleUniform,
{
    /// Matrix with entries drawn uniformly from `[min, max]` using the
    /// thread-local RNG.
    ///
    /// ```
    /// use matdecomp::Matrix;
    /// let m = Matrix::random(3, 2, -1.0_f64, 1.0);
    /// assert_eq!(m.shape(), (3, 2));
    /// assert!(m.as_slice().iter().all(|x| (-1.0..=1.0).contains(x)));
    /// ```
    pub fn random(nrows: usize, ncols: usize, min: T, max: T) -> Self {
        Self::random_with(&mut rand::thread_rng(), nrows, ncols, min, max)
    }

    /// Like [`Matrix::random`], drawing from a caller-supplied RNG so
    /// results can be reproduced with a seeded generator.
    pub fn random_with<R: rand::Rng + ?Sized>(
        rng: &mut R,
        nrows: usize,
        ncols: usize,
        min: T,
        max: T,
    ) -> Self {
        use rand::distributions::{Distribution, Uniform};

        let dist = Uniform::new_inclusive(min, max);
        let data: Vec<T> = (0..nrows * ncols).map(|_| dist.sample(rng)).collect();
        Self { data, nrows, ncols }
    }
}

// ── Display ─────────────────────────────────────────────────────────

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.nrows;
        let n = self.ncols;

        let cells: Vec<String> = self
            .data
            .iter()
            .map(|x| match f.precision() {
                Some(p) => alloc::format!("{:.*}", p, x),
                None => alloc::format!("{}", x),
            })
            .collect();

        // Measure column widths
        let mut widths: Vec<usize> = alloc::vec![0; n];
        for i in 0..m {
            for j in 0..n {
                widths[j] = widths[j].max(cells[i * n + j].len());
            }
        }

        for i in 0..m {
            write!(f, "│")?;
            for j in 0..n {
                if j > 0 {
                    write!(f, "  ")?;
                }
                write!(f, "{:>w$}", cells[i * n + j], w = widths[j])?;
            }
            writeln!(f, "│")?;
        }
        Ok(())
    }
}
