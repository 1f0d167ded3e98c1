use alloc::vec::Vec;

use crate::linalg::qr::{qr, QrResult};
use crate::linalg::LinalgError;
use crate::traits::FloatScalar;
use crate::Matrix;

/// An eigenvalue with its unit eigenvector.
///
/// `valid` is `false` when the iteration that produced the pair did not
/// converge, or when `residual = ‖A·v − λ·v‖` (measured against the matrix
/// the caller passed in) exceeds the residual tolerance.
#[derive(Debug, Clone, PartialEq)]
pub struct EigenPair<T> {
    pub value: T,
    /// `n × 1`, unit norm, largest-magnitude component positive.
    pub vector: Matrix<T>,
    pub valid: bool,
    pub residual: T,
}

/// Strategy for [`eigen`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EigenMethod {
    /// QR algorithm for symmetric input, power iteration otherwise. See
    /// [`eigen`] for the symmetric fallback.
    #[default]
    Auto,
    QrAlgorithm,
    PowerIteration,
}

/// Settings for the eigensolvers.
#[derive(Debug, Clone, Copy)]
pub struct EigenSettings<T> {
    /// Iteration cap for the QR algorithm, and per pair for power iteration.
    pub max_iterations: usize,
    /// Convergence threshold (relative to `‖A‖_F` for the QR algorithm and
    /// to `max(1, |λ|)` for power iteration).
    pub tolerance: T,
    /// A pair is valid when `‖A·v − λ·v‖ ≤ residual_tolerance·max(1, ‖A‖_F)`.
    pub residual_tolerance: T,
    /// [`EigenMethod::Auto`] treats `A` as symmetric when
    /// `|a_ij − a_ji| ≤ symmetry_tolerance·max(1, max|a|)`.
    pub symmetry_tolerance: T,
}

impl<T: FloatScalar> Default for EigenSettings<T> {
    fn default() -> Self {
        let eps = T::epsilon();
        Self {
            max_iterations: 10_000,
            tolerance: eps.sqrt() * eps.sqrt().sqrt(),
            residual_tolerance: eps.cbrt(),
            symmetry_tolerance: eps.sqrt(),
        }
    }
}

fn require_square<T>(a: &Matrix<T>, op: &'static str) -> Result<(), LinalgError> {
    if a.is_square() {
        Ok(())
    } else {
        Err(LinalgError::InvalidDimension {
            op,
            rows: a.nrows(),
            cols: a.ncols(),
        })
    }
}

/// Flip `v` so its largest-magnitude component (the first, on ties) is
/// positive.
fn normalize_sign<T: FloatScalar>(v: &mut Matrix<T>) {
    let mut idx = 0;
    let mut best = T::zero();
    for (i, &x) in v.as_slice().iter().enumerate() {
        if x.abs() > best {
            best = x.abs();
            idx = i;
        }
    }
    if best > T::zero() && v[(idx, 0)] < T::zero() {
        *v *= -T::one();
    }
}

fn residual<T: FloatScalar>(a: &Matrix<T>, value: T, vector: &Matrix<T>) -> T {
    (&(a * vector) - &(vector * value)).norm()
}

/// Re-validate a pair against the caller's matrix.
fn checked_pair<T: FloatScalar>(
    a: &Matrix<T>,
    value: T,
    mut vector: Matrix<T>,
    converged: bool,
    settings: &EigenSettings<T>,
) -> EigenPair<T> {
    normalize_sign(&mut vector);
    let res = residual(a, value, &vector);
    let bound = settings.residual_tolerance * a.norm().max(T::one());
    EigenPair {
        value,
        vector,
        valid: converged && res <= bound,
        residual: res,
    }
}

fn max_strictly_lower<T: FloatScalar>(a: &Matrix<T>) -> T {
    let mut max = T::zero();
    for i in 1..a.nrows() {
        for j in 0..i.min(a.ncols()) {
            max = max.max(a[(i, j)].abs());
        }
    }
    max
}

/// Eigenpairs by unshifted QR iteration, `A ← R·Q` with `Q·R = A`.
///
/// Stops once every strictly-lower entry is `≤ tolerance·‖A_k‖_F`. The
/// eigenvalues are the diagonal of the final iterate and the eigenvectors
/// the columns of the accumulated `Q₀·Q₁·…`, returned in diagonal order.
///
/// Intended for symmetric input. For non-symmetric input the columns are
/// Schur vectors rather than eigenvectors, which the residual check reports
/// as invalid pairs; pairs of eigenvalues with equal magnitude and opposite
/// sign stall the iteration and come back invalid as well.
///
/// ```
/// use matdecomp::Matrix;
/// use matdecomp::linalg::{qr_algorithm, EigenSettings};
///
/// let a = Matrix::from_rows(2, 2, &[2.0_f64, 1.0, 1.0, 2.0]);
/// let pairs = qr_algorithm(&a, &EigenSettings::default()).unwrap();
/// assert!(pairs.iter().all(|p| p.valid));
/// assert!((pairs[0].value - 3.0).abs() < 1e-10);
/// assert!((pairs[1].value - 1.0).abs() < 1e-10);
/// ```
pub fn qr_algorithm<T: FloatScalar>(
    a: &Matrix<T>,
    settings: &EigenSettings<T>,
) -> Result<Vec<EigenPair<T>>, LinalgError> {
    require_square(a, "qr_algorithm")?;
    let n = a.nrows();

    let mut ak = a.clone();
    let mut q_acc = Matrix::<T>::eye(n);
    let mut iterations = 0;
    let mut converged = false;

    loop {
        if max_strictly_lower(&ak) <= settings.tolerance * ak.norm() {
            converged = true;
            break;
        }
        if iterations >= settings.max_iterations {
            break;
        }
        let QrResult { q, r } = qr(&ak)?;
        ak = &r * &q;
        q_acc = &q_acc * &q;
        iterations += 1;
    }

    if converged {
        log::debug!("qr_algorithm {}x{}: converged after {} iterations", n, n, iterations);
    } else {
        log::warn!(
            "qr_algorithm {}x{}: no convergence after {} iterations",
            n,
            n,
            iterations
        );
    }

    Ok((0..n)
        .map(|i| checked_pair(a, ak[(i, i)], q_acc.col(i), converged, settings))
        .collect())
}

/// Normalized all-ones vector with a golden-ratio perturbation per
/// component, so it is not itself an eigenvector of matrices with constant
/// row sums.
fn start_vector<T: FloatScalar>(n: usize) -> Matrix<T> {
    const GOLDEN: f64 = 0.618_033_988_749_894_9;
    let x = Matrix::from_fn(n, 1, |i, _| {
        let f = ((i + 1) as f64 * GOLDEN).fract();
        T::from(1.0 + 0.5 * (f - 0.5)).unwrap_or_else(T::one)
    });
    let x_norm = x.norm();
    x * (T::one() / x_norm)
}

/// Remove the components of `x` along the orthonormal `basis` (two passes).
fn project_out<T: FloatScalar>(x: &mut Matrix<T>, basis: &[Matrix<T>]) {
    for _ in 0..2 {
        for b in basis {
            let d = b.dot(x);
            *x -= &(b * d);
        }
    }
}

/// Next unit vector `e_k` with a usable component outside `basis`.
fn next_restart<T: FloatScalar>(
    n: usize,
    basis: &[Matrix<T>],
    restart: &mut usize,
) -> Option<Matrix<T>> {
    while *restart < n {
        let mut e = Matrix::zeros(n, 1);
        e[(*restart, 0)] = T::one();
        *restart += 1;
        project_out(&mut e, basis);
        let e_norm = e.norm();
        if e_norm > T::epsilon().sqrt() {
            return Some(e * (T::one() / e_norm));
        }
    }
    None
}

struct Iterate<T> {
    value: T,
    vector: Matrix<T>,
    converged: bool,
    iterations: usize,
}

/// Power iteration on `(W + shift·I)` restricted to the complement of
/// `basis`. The returned value is the Rayleigh quotient of `W` itself.
///
/// Converged once `|Δλ| ≤ tolerance·max(1, |λ|)` and the iterate's residual
/// is `≤ √tolerance·max(1, |λ|)`. If an iterate is mapped to zero the
/// iteration restarts from the next unit vector, and only once those are
/// used up is `(λ, x)` with `W·x = −shift·x` accepted.
fn dominant<T: FloatScalar>(
    w: &Matrix<T>,
    basis: &[Matrix<T>],
    shift: T,
    max_iterations: usize,
    tolerance: T,
) -> Iterate<T> {
    let n = w.nrows();
    let mut x = start_vector(n);
    project_out(&mut x, basis);
    let x_norm = x.norm();
    if x_norm > T::zero() {
        x = x * (T::one() / x_norm);
    }

    let residual_tol = tolerance.sqrt();
    let mut restart = 0;
    let mut previous = None;
    let mut value = T::zero();
    let mut converged = false;
    let mut iterations = 0;

    while iterations < max_iterations {
        iterations += 1;
        let wx = w * &x;
        let mut y = &wx + &(&x * shift);
        project_out(&mut y, basis);
        let y_norm = y.norm();
        if y_norm == T::zero() {
            if let Some(e) = next_restart(n, basis, &mut restart) {
                x = e;
                previous = None;
                continue;
            }
            value = x.dot(&wx);
            converged = true;
            break;
        }

        value = x.dot(&wx);
        let mut r = &wx - &(&x * value);
        project_out(&mut r, basis);
        let scale = value.abs().max(T::one());
        if let Some(prev) = previous {
            let delta: T = value - prev;
            if delta.abs() <= tolerance * scale && r.norm() <= residual_tol * scale {
                converged = true;
                break;
            }
        }
        previous = Some(value);
        x = y * (T::one() / y_norm);
    }

    Iterate {
        value,
        vector: x,
        converged,
        iterations,
    }
}

fn log_outcome<T>(op: &str, n: usize, it: &Iterate<T>) {
    if it.converged {
        log::debug!("{} {}x{}: converged after {} iterations", op, n, n, it.iterations);
    } else {
        log::warn!("{} {}x{}: no convergence after {} iterations", op, n, n, it.iterations);
    }
}

/// Dominant eigenpair by power iteration.
///
/// Iterates `x ← A·x/‖A·x‖` with Rayleigh quotient `λ = xᵗ·A·x`, starting
/// from a fixed perturbation of the normalized all-ones vector. Converged
/// when `|Δλ| ≤ tolerance·max(1, |λ|)` and `‖A·x − λ·x‖ ≤
/// √tolerance·max(1, |λ|)`, so a stalled iterate is never reported as
/// converged. If `A·x` vanishes the iteration restarts from `e₀, e₁, …`;
/// when every restart is also annihilated, `(0, x)` is an exact pair and is
/// returned as such. Running out of iterations yields the last iterate with
/// `valid = false`.
///
/// `residual` is measured against `a`; `valid` only reflects convergence.
///
/// ```
/// use matdecomp::Matrix;
/// use matdecomp::linalg::power_iteration;
///
/// let a = Matrix::from_rows(2, 2, &[2.0_f64, 0.0, 0.0, 5.0]);
/// let p = power_iteration(&a, 500, 1e-14).unwrap();
/// assert!(p.valid);
/// assert!((p.value - 5.0).abs() < 1e-10);
/// assert!((p.vector[(1, 0)] - 1.0).abs() < 1e-6);
/// ```
pub fn power_iteration<T: FloatScalar>(
    a: &Matrix<T>,
    max_iterations: usize,
    tolerance: T,
) -> Result<EigenPair<T>, LinalgError> {
    require_square(a, "power_iteration")?;
    let n = a.nrows();
    if n == 0 {
        return Err(LinalgError::InvalidDimension {
            op: "power_iteration",
            rows: 0,
            cols: 0,
        });
    }

    let it = dominant(a, &[], T::zero(), max_iterations, tolerance);
    log_outcome("power_iteration", n, &it);

    let mut x = it.vector;
    normalize_sign(&mut x);
    let res = residual(a, it.value, &x);
    Ok(EigenPair {
        value: it.value,
        vector: x,
        valid: it.converged,
        residual: res,
    })
}

/// Map an eigenvector of a deflated matrix back through the earlier
/// deflation steps. For `W = W' − λⱼ·vⱼ·vⱼᵗ` with `W'·vⱼ = λⱼ·vⱼ`, an
/// eigenvector `W·u = μ·u` gives `W'·x = μ·x` for
/// `x = u + λⱼ·(vⱼᵗu)/(μ − λⱼ)·vⱼ`.
fn lift<T: FloatScalar>(mut x: Matrix<T>, mu: T, values: &[T], vectors: &[Matrix<T>]) -> Matrix<T> {
    for (&lambda, v) in values.iter().zip(vectors).rev() {
        let gap = mu - lambda;
        if gap.abs() > T::epsilon() * lambda.abs().max(T::one()) {
            let c = lambda * v.dot(&x) / gap;
            x += &(v * c);
        }
    }
    let x_norm = x.norm();
    if x_norm > T::zero() {
        x * (T::one() / x_norm)
    } else {
        x
    }
}

fn deflate<T: FloatScalar>(
    a: &Matrix<T>,
    settings: &EigenSettings<T>,
    symmetric: bool,
    shift: T,
) -> Vec<EigenPair<T>> {
    let n = a.nrows();
    let mut work = a.clone();
    let mut values: Vec<T> = Vec::with_capacity(n);
    let mut vectors: Vec<Matrix<T>> = Vec::with_capacity(n);
    let mut pairs = Vec::with_capacity(n);

    for _ in 0..n {
        let it = {
            // Eigenvectors of a symmetric matrix are orthogonal, so the
            // search is confined to the complement of the pairs found so far.
            let basis: &[Matrix<T>] = if symmetric { &vectors } else { &[] };
            dominant(&work, basis, shift, settings.max_iterations, settings.tolerance)
        };
        log_outcome("power_iteration_deflation", n, &it);

        let vector = if symmetric {
            it.vector.clone()
        } else {
            lift(it.vector.clone(), it.value, &values, &vectors)
        };
        let outer = &it.vector * &it.vector.transpose();
        work -= &(&outer * it.value);
        pairs.push(checked_pair(a, it.value, vector, it.converged, settings));

        values.push(it.value);
        vectors.push(it.vector);
    }
    pairs
}

fn is_symmetric_within<T: FloatScalar>(a: &Matrix<T>, settings: &EigenSettings<T>) -> bool {
    a.is_symmetric_tol(settings.symmetry_tolerance * a.max_abs().max(T::one()))
}

/// All eigenpairs by power iteration with Hotelling deflation.
///
/// After each dominant pair `(λ, v)` is found, `A ← A − λ·v·vᵗ` and the
/// search repeats, `n` times in total. For symmetric input each search is
/// also kept orthogonal to the vectors already found, which makes it exact
/// even when `λ = 0`. For non-symmetric input the deflated matrix keeps the
/// remaining eigenvalues but not their eigenvectors; each vector is mapped
/// back through the deflation steps, which recovers real, distinct
/// eigenvalues but remains a heuristic in general. Every pair is re-checked
/// against `a` itself, so a pair the deflation got wrong comes back with
/// `valid = false`.
///
/// Two eigenvalues of equal magnitude and opposite sign stall the iteration;
/// [`eigen`] with [`EigenMethod::Auto`] handles that case for symmetric input.
pub fn power_iteration_deflation<T: FloatScalar>(
    a: &Matrix<T>,
    settings: &EigenSettings<T>,
) -> Result<Vec<EigenPair<T>>, LinalgError> {
    require_square(a, "power_iteration_deflation")?;
    Ok(deflate(a, settings, is_symmetric_within(a, settings), T::zero()))
}

/// Eigen decomposition with strategy selection.
///
/// [`EigenMethod::Auto`] picks [`qr_algorithm`] when `a` is symmetric within
/// `settings.symmetry_tolerance` (relative to `max(1, max|a|)`) and
/// [`power_iteration_deflation`] otherwise. If the QR algorithm leaves
/// invalid pairs on symmetric input (eigenvalues `±λ` stall it), the pairs
/// are recomputed by deflated power iteration on `A + ‖A‖_F·I`, whose
/// spectrum is nonnegative, and whichever run has more valid pairs is
/// returned. That run lists eigenvalues in descending order.
///
/// Returns [`LinalgError::InvalidDimension`] for non-square input.
/// Non-convergence is reported per pair via [`EigenPair::valid`].
///
/// ```
/// use matdecomp::Matrix;
/// use matdecomp::linalg::{eigen, EigenMethod, EigenSettings};
///
/// let a = Matrix::from_diag(3, 3, &[1.0_f64, 2.0, 3.0]);
/// let pairs = eigen(&a, EigenMethod::Auto, &EigenSettings::default()).unwrap();
/// assert_eq!(pairs.len(), 3);
/// for p in &pairs {
///     assert!(p.valid);
///     assert!(p.residual < 1e-10);
/// }
/// ```
pub fn eigen<T: FloatScalar>(
    a: &Matrix<T>,
    method: EigenMethod,
    settings: &EigenSettings<T>,
) -> Result<Vec<EigenPair<T>>, LinalgError> {
    require_square(a, "eigen")?;
    match method {
        EigenMethod::QrAlgorithm => qr_algorithm(a, settings),
        EigenMethod::PowerIteration => power_iteration_deflation(a, settings),
        EigenMethod::Auto if !is_symmetric_within(a, settings) => {
            power_iteration_deflation(a, settings)
        }
        EigenMethod::Auto => {
            let pairs = qr_algorithm(a, settings)?;
            if pairs.iter().all(|p| p.valid) {
                return Ok(pairs);
            }
            log::debug!(
                "eigen {}x{}: qr_algorithm left invalid pairs, retrying with shifted power iteration",
                a.nrows(),
                a.ncols()
            );
            let retry = deflate(a, settings, true, a.norm());
            let valid = |ps: &[EigenPair<T>]| ps.iter().filter(|p| p.valid).count();
            Ok(if valid(&retry) > valid(&pairs) { retry } else { pairs })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
        assert!((a - b).abs() < tol, "{}: {} vs {} (diff {})", msg, a, b, (a - b).abs());
    }

    fn assert_pairs_satisfy(a: &Matrix<f64>, pairs: &[EigenPair<f64>], tol: f64) {
        for p in pairs.iter().filter(|p| p.valid) {
            let av = a * &p.vector;
            let lv = &p.vector * p.value;
            assert!(av.approx_eq(&lv, tol), "λ = {}: residual {}", p.value, p.residual);
            assert_near(p.vector.norm(), 1.0, 1e-10, "unit vector");
        }
    }

    /// Pair whose value is closest to `target`.
    fn find(pairs: &[EigenPair<f64>], target: f64) -> &EigenPair<f64> {
        pairs
            .iter()
            .min_by(|x, y| {
                (x.value - target)
                    .abs()
                    .partial_cmp(&(y.value - target).abs())
                    .unwrap_or(core::cmp::Ordering::Equal)
            })
            .unwrap()
    }

    #[test]
    fn diagonal_both_strategies() {
        let a = Matrix::from_diag(3, 3, &[1.0_f64, 2.0, 3.0]);
        let settings = EigenSettings::default();
        for (method, vec_tol) in [(EigenMethod::QrAlgorithm, 1e-12), (EigenMethod::PowerIteration, 1e-4)] {
            let pairs = eigen(&a, method, &settings).unwrap();
            assert_eq!(pairs.len(), 3);
            for k in 0..3 {
                let expected = (k + 1) as f64;
                let p = find(&pairs, expected);
                assert!(p.valid, "{:?}: λ = {} invalid", method, expected);
                assert_near(p.value, expected, 1e-8, "eigenvalue");
                let mut e = Matrix::<f64>::zeros(3, 1);
                e[(k, 0)] = 1.0;
                assert!(p.vector.approx_eq(&e, vec_tol), "{:?}: vector {:?}", method, p.vector);
            }
            assert_pairs_satisfy(&a, &pairs, 1e-4);
        }
    }

    #[test]
    fn symmetric_3x3_all_valid() {
        let a = Matrix::from_rows(3, 3, &[6.0_f64, 10.0, 11.0, 10.0, 17.0, 21.0, 11.0, 21.0, 42.0]);
        let pairs = eigen(&a, EigenMethod::Auto, &EigenSettings::default()).unwrap();
        assert!(pairs.iter().all(|p| p.valid));
        assert_pairs_satisfy(&a, &pairs, 1e-8);

        let sum: f64 = pairs.iter().map(|p| p.value).sum();
        assert_near(sum, a.trace(), 1e-8, "trace");
        let prod: f64 = pairs.iter().map(|p| p.value).product();
        assert_near(prod, 1.0, 1e-6, "determinant");
    }

    #[test]
    fn dominant_pair_non_symmetric() {
        let a = Matrix::from_rows(3, 3, &[1.0_f64, 2.0, 3.0, 1.0, 2.0, 1.0, 3.0, 2.0, 1.0]);
        let p = power_iteration(&a, 200, 1e-12).unwrap();
        assert!(p.valid);

        let s5 = 5.0_f64.sqrt();
        assert_near(p.value, 3.0 + s5, 1e-9, "λ");
        // |Δλ| ≤ 1e-12 pins the vector down to about √1e-12
        let expected = Matrix::column(&[1.0, (1.0 + s5) / 2.0 - 1.0, 1.0]).normalize_columns();
        assert!(p.vector.approx_eq(&expected, 1e-5), "{:?}", p.vector);
        assert!(p.residual < 1e-5);
    }

    #[test]
    fn auto_picks_power_iteration_for_non_symmetric() {
        let a = Matrix::from_rows(3, 3, &[1.0_f64, 2.0, 3.0, 1.0, 2.0, 1.0, 3.0, 2.0, 1.0]);
        let settings = EigenSettings::default();
        let auto = eigen(&a, EigenMethod::Auto, &settings).unwrap();
        let power = power_iteration_deflation(&a, &settings).unwrap();
        assert_eq!(auto, power);
        assert!(auto[0].valid);
        assert_near(auto[0].value, 3.0 + 5.0_f64.sqrt(), 1e-9, "λ");
        assert_pairs_satisfy(&a, &auto, 1e-4);
    }

    #[test]
    fn zero_matrix_gives_exact_zero_pair() {
        let a = Matrix::<f64>::zeros(2, 2);
        let p = power_iteration(&a, 10, 1e-12).unwrap();
        assert!(p.valid);
        assert_eq!(p.value, 0.0);
        assert_eq!(p.residual, 0.0);
    }

    #[test]
    fn exhausted_power_iteration_is_invalid() {
        let a = Matrix::from_rows(2, 2, &[1.0_f64, 0.0, 0.0, 0.999]);
        let p = power_iteration(&a, 2, 1e-15).unwrap();
        assert!(!p.valid);
    }

    #[test]
    fn sign_normalization() {
        let mut v = Matrix::column(&[0.3_f64, -0.9, 0.2]);
        normalize_sign(&mut v);
        assert_eq!(v, Matrix::column(&[-0.3, 0.9, -0.2]));

        let mut tie = Matrix::column(&[-0.5_f64, 0.5]);
        normalize_sign(&mut tie);
        assert_eq!(tie, Matrix::column(&[0.5, -0.5]));
    }

    #[test]
    fn rotation_stalls_qr_algorithm() {
        // Eigenvalues ±i: no real pairs exist, so nothing may be reported valid.
        let a = Matrix::from_rows(2, 2, &[0.0_f64, -1.0, 1.0, 0.0]);
        let settings = EigenSettings {
            max_iterations: 50,
            ..EigenSettings::default()
        };
        let pairs = qr_algorithm(&a, &settings).unwrap();
        assert!(pairs.iter().all(|p| !p.valid));
    }

    #[test]
    fn laplacian_deflation_full_spectrum() {
        // Constant row sums: the all-ones vector is the null vector.
        let a = Matrix::from_rows(3, 3, &[1.0_f64, -1.0, 0.0, -1.0, 2.0, -1.0, 0.0, -1.0, 1.0]);
        let pairs = power_iteration_deflation(&a, &EigenSettings::default()).unwrap();
        assert!(pairs.iter().all(|p| p.valid), "{:?}", pairs);
        for (p, expected) in pairs.iter().zip([3.0, 1.0, 0.0]) {
            assert_near(p.value, expected, 1e-9, "λ");
        }
        let v0 = Matrix::column(&[-1.0, 2.0, -1.0]).normalize_columns();
        assert!(pairs[0].vector.approx_eq(&v0, 1e-5), "{:?}", pairs[0].vector);
        for i in 0..3 {
            for j in (i + 1)..3 {
                assert!(pairs[i].vector.dot(&pairs[j].vector).abs() < 1e-6);
            }
        }
        assert_pairs_satisfy(&a, &pairs, 1e-4);
    }

    #[test]
    fn symmetric_tridiagonal_by_power_iteration() {
        let a = Matrix::from_rows(
            4,
            4,
            &[2.0_f64, -1.0, 0.0, 0.0, -1.0, 2.0, -1.0, 0.0, 0.0, -1.0, 2.0, -1.0, 0.0, 0.0, -1.0, 2.0],
        );
        let pairs = eigen(&a, EigenMethod::PowerIteration, &EigenSettings::default()).unwrap();
        assert!(pairs.iter().all(|p| p.valid), "{:?}", pairs);
        for (k, p) in pairs.iter().enumerate() {
            let expected = 2.0 - 2.0 * ((4 - k) as f64 * core::f64::consts::PI / 5.0).cos();
            assert_near(p.value, expected, 1e-9, "λ");
        }
        assert_pairs_satisfy(&a, &pairs, 1e-4);
    }

    #[test]
    fn dominant_pair_when_ones_is_an_eigenvector() {
        // Eigenvalues 1 (vector ones) and -3
        let a = Matrix::from_rows(2, 2, &[0.0_f64, 1.0, 3.0, -2.0]);
        let p = power_iteration(&a, 1000, 1e-12).unwrap();
        assert!(p.valid);
        assert_near(p.value, -3.0, 1e-9, "λ");
        let expected = Matrix::column(&[-1.0, 3.0]).normalize_columns();
        assert!(p.vector.approx_eq(&expected, 1e-8), "{:?}", p.vector);
        assert!(p.residual < 1e-8);

        let pairs = eigen(&a, EigenMethod::Auto, &EigenSettings::default()).unwrap();
        assert!(pairs.iter().all(|p| p.valid), "{:?}", pairs);
        assert_near(pairs[0].value, -3.0, 1e-9, "λ₀");
        assert_near(pairs[1].value, 1.0, 1e-9, "λ₁");
        let ones = Matrix::column(&[1.0, 1.0]).normalize_columns();
        assert!(pairs[1].vector.approx_eq(&ones, 1e-6), "{:?}", pairs[1].vector);
    }

    #[test]
    fn non_symmetric_deflation_recovers_eigenvectors() {
        let a = Matrix::from_rows(3, 3, &[1.0_f64, 2.0, 3.0, 1.0, 2.0, 1.0, 3.0, 2.0, 1.0]);
        let pairs = power_iteration_deflation(&a, &EigenSettings::default()).unwrap();
        assert!(pairs.iter().all(|p| p.valid), "{:?}", pairs);
        let s5 = 5.0_f64.sqrt();
        for (p, expected) in pairs.iter().zip([3.0 + s5, -2.0, 3.0 - s5]) {
            assert_near(p.value, expected, 1e-8, "λ");
        }
        assert_pairs_satisfy(&a, &pairs, 1e-4);
    }

    #[test]
    fn annihilated_iterate_restarts() {
        // A·x = 0 after one step from any start; the only eigenvector is e₀.
        let a = Matrix::from_rows(2, 2, &[0.0_f64, 1.0, 0.0, 0.0]);
        let p = power_iteration(&a, 100, 1e-12).unwrap();
        assert!(p.valid);
        assert_eq!(p.value, 0.0);
        assert_eq!(p.residual, 0.0);
        assert_eq!(p.vector, Matrix::column(&[1.0, 0.0]));
    }

    #[test]
    fn opposite_sign_pair_is_not_converged() {
        // Eigenvalues ±1: the Rayleigh quotient is constant while x oscillates.
        let a = Matrix::from_rows(2, 2, &[0.0_f64, 1.0, 1.0, 0.0]);
        let p = power_iteration(&a, 100, 1e-12).unwrap();
        assert!(!p.valid);
        assert!(p.residual > 1e-3);
    }

    #[test]
    fn auto_falls_back_when_qr_algorithm_stalls() {
        let a = Matrix::from_rows(2, 2, &[0.0_f64, 1.0, 1.0, 0.0]);
        let stalled = qr_algorithm(&a, &EigenSettings::default()).unwrap();
        assert!(stalled.iter().all(|p| !p.valid));

        let pairs = eigen(&a, EigenMethod::Auto, &EigenSettings::default()).unwrap();
        assert!(pairs.iter().all(|p| p.valid), "{:?}", pairs);
        assert_near(pairs[0].value, 1.0, 1e-9, "λ₀");
        assert_near(pairs[1].value, -1.0, 1e-9, "λ₁");
        assert_pairs_satisfy(&a, &pairs, 1e-4);
    }

    #[test]
    fn rejects_non_square() {
        let a = Matrix::<f64>::zeros(2, 3);
        let s = EigenSettings::default();
        for method in [EigenMethod::Auto, EigenMethod::QrAlgorithm, EigenMethod::PowerIteration] {
            assert!(matches!(
                eigen(&a, method, &s),
                Err(LinalgError::InvalidDimension { rows: 2, cols: 3, .. })
            ));
        }
    }

    #[test]
    fn default_settings() {
        let s = EigenSettings::<f64>::default();
        assert_eq!(s.max_iterations, 10_000);
        assert_near(s.tolerance, f64::EPSILON.powf(0.75), 1e-20, "tolerance");
        assert_near(s.residual_tolerance, f64::EPSILON.cbrt(), 1e-15, "residual");
        assert_eq!(EigenMethod::default(), EigenMethod::Auto);
    }

    #[test]
    fn f32_symmetric() {
        let a = Matrix::from_rows(2, 2, &[2.0_f32, 1.0, 1.0, 2.0]);
        let pairs = eigen(&a, EigenMethod::Auto, &EigenSettings::default()).unwrap();
        assert!(pairs.iter().all(|p| p.valid));
        assert!((pairs[0].value - 3.0).abs() < 1e-4);
    }
}
