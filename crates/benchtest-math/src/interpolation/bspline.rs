//! Interpolating B-splines of degree 1 to 5.

use nalgebra::{DMatrix, DVector};

use crate::error::{MathError, MathResult};
use crate::interpolation::Interpolator;

/// Lowest supported spline degree.
pub const MIN_DEGREE: usize = 1;

/// Highest supported spline degree.
pub const MAX_DEGREE: usize = 5;

/// Interpolating B-spline through a set of samples.
///
/// Knots follow the FITPACK placement for a zero smoothing factor: the end
/// knots are repeated `k + 1` times at the first and last sample, and the
/// `m - k - 1` interior knots sit on the data sites (odd `k`) or halfway
/// between them (even `k`). With odd `k` this is the "not-a-knot" spline.
///
/// Outside the sampled range the boundary polynomial pieces are continued,
/// so evaluation never fails for finite `x`.
///
/// # Example
///
/// ```rust
/// use benchtest_math::interpolation::{BSpline, Interpolator};
///
/// let xs = vec![0.0, 1.0, 2.0, 3.0];
/// let ys = vec![0.0, 1.0, 4.0, 9.0];
///
/// let spline = BSpline::interpolating(&xs, &ys, 3).unwrap();
/// let y = spline.interpolate(1.5).unwrap();
/// assert!((y - 2.25).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct BSpline {
    degree: usize,
    knots: Vec<f64>,
    coeffs: Vec<f64>,
    /// Coefficients of the derivative spline, defined on `knots[1..n-1]`.
    deriv_coeffs: Vec<f64>,
}

impl BSpline {
    /// Fits the interpolating spline of degree `k` through `(xs, ys)`.
    ///
    /// # Errors
    ///
    /// - [`MathError::InvalidDegree`] if `k` is outside `[1, 5]` or
    ///   `k > xs.len() - 1`.
    /// - [`MathError::InconsistentCurve`] if the lengths differ, a value is
    ///   not finite, or `xs` is not strictly increasing.
    pub fn interpolating(xs: &[f64], ys: &[f64], k: usize) -> MathResult<Self> {
        check_degree(k)?;
        check_samples(xs, ys)?;
        if xs.len() < k + 1 {
            return Err(MathError::invalid_degree(
                k,
                format!("needs at least {} points, got {}", k + 1, xs.len()),
            ));
        }

        let knots = interpolation_knots(xs, k);
        let coeffs = solve_coefficients(&knots, xs, ys, k)?;
        let deriv_coeffs = derivative_coefficients(&knots, &coeffs, k);

        tracing::trace!(degree = k, points = xs.len(), "Fitted interpolating B-spline");

        Ok(Self {
            degree: k,
            knots,
            coeffs,
            deriv_coeffs,
        })
    }

    /// Returns the spline degree.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Returns the full knot vector, end knots included.
    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    /// Returns the B-spline coefficients.
    pub fn coefficients(&self) -> &[f64] {
        &self.coeffs
    }

    /// Evaluates the spline at `x` without the finiteness check.
    pub(crate) fn eval(&self, x: f64) -> f64 {
        de_boor(&self.knots, &self.coeffs, self.degree, x)
    }

    fn eval_derivative(&self, x: f64) -> f64 {
        let n = self.knots.len();
        de_boor(&self.knots[1..n - 1], &self.deriv_coeffs, self.degree - 1, x)
    }
}

impl Interpolator for BSpline {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        if !x.is_finite() {
            return Err(MathError::invalid_input(format!(
                "cannot evaluate spline at {x}"
            )));
        }
        Ok(self.eval(x))
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        if !x.is_finite() {
            return Err(MathError::invalid_input(format!(
                "cannot differentiate spline at {x}"
            )));
        }
        Ok(self.eval_derivative(x))
    }

    fn allows_extrapolation(&self) -> bool {
        true
    }

    fn min_x(&self) -> f64 {
        self.knots[0]
    }

    fn max_x(&self) -> f64 {
        self.knots[self.knots.len() - 1]
    }
}

/// Checks that `k` is a supported spline degree.
pub(crate) fn check_degree(k: usize) -> MathResult<()> {
    if (MIN_DEGREE..=MAX_DEGREE).contains(&k) {
        Ok(())
    } else {
        Err(MathError::invalid_degree(
            k,
            format!("must be between {MIN_DEGREE} and {MAX_DEGREE}"),
        ))
    }
}

/// Checks sample lengths, finiteness and strict monotonicity of `xs`.
///
/// Errors carry curve index 0; callers re-label them.
pub(crate) fn check_samples(xs: &[f64], ys: &[f64]) -> MathResult<()> {
    if xs.len() != ys.len() {
        return Err(MathError::inconsistent_curve(
            0,
            format!(
                "x and y must have same length: {} vs {}",
                xs.len(),
                ys.len()
            ),
        ));
    }
    if let Some(i) = xs.iter().chain(ys).position(|v| !v.is_finite()) {
        let (axis, pos) = if i < xs.len() {
            ("x", i)
        } else {
            ("y", i - xs.len())
        };
        return Err(MathError::inconsistent_curve(
            0,
            format!("{axis}[{pos}] is not finite"),
        ));
    }
    if let Some(i) = xs.windows(2).position(|w| w[1] <= w[0]) {
        return Err(MathError::inconsistent_curve(
            0,
            format!(
                "x values must be strictly increasing (x[{}] = {} >= x[{}] = {})",
                i,
                xs[i],
                i + 1,
                xs[i + 1]
            ),
        ));
    }
    Ok(())
}

/// Builds the knot vector for an interpolating spline of degree `k`.
fn interpolation_knots(xs: &[f64], k: usize) -> Vec<f64> {
    let m = xs.len();
    let mut knots = Vec::with_capacity(m + k + 1);

    knots.extend(std::iter::repeat(xs[0]).take(k + 1));

    let half = k / 2;
    for l in 0..m - k - 1 {
        let j = half + 1 + l;
        if k % 2 == 1 {
            knots.push(xs[j]);
        } else {
            knots.push(0.5 * (xs[j] + xs[j - 1]));
        }
    }

    knots.extend(std::iter::repeat(xs[m - 1]).take(k + 1));
    knots
}

/// Solves the square collocation system `B c = y`.
fn solve_coefficients(knots: &[f64], xs: &[f64], ys: &[f64], k: usize) -> MathResult<Vec<f64>> {
    let m = xs.len();
    let mut matrix = DMatrix::<f64>::zeros(m, m);

    for (row, &x) in xs.iter().enumerate() {
        let span = find_span(knots, k, m, x);
        let basis = basis_functions(knots, span, k, x);
        for (i, &b) in basis.iter().take(k + 1).enumerate() {
            matrix[(row, span - k + i)] = b;
        }
    }

    let rhs = DVector::from_column_slice(ys);
    let solution = matrix.lu().solve(&rhs).ok_or(MathError::SingularMatrix)?;

    if solution.iter().any(|c| !c.is_finite()) {
        return Err(MathError::SingularMatrix);
    }

    Ok(solution.iter().copied().collect())
}

/// Coefficients of the derivative, a degree `k - 1` spline on `knots[1..n-1]`.
fn derivative_coefficients(knots: &[f64], coeffs: &[f64], k: usize) -> Vec<f64> {
    (1..coeffs.len())
        .map(|j| {
            let span = knots[j + k] - knots[j];
            if span > 0.0 {
                k as f64 * (coeffs[j] - coeffs[j - 1]) / span
            } else {
                0.0
            }
        })
        .collect()
}

/// Finds the knot span `i` in `[k, n_coeffs - 1]` with `t[i] <= x < t[i + 1]`.
///
/// Points outside the knot range map to the first or last span.
fn find_span(knots: &[f64], k: usize, n_coeffs: usize, x: f64) -> usize {
    let low = k;
    let high = n_coeffs;

    if x >= knots[high] {
        return high - 1;
    }
    if x <= knots[low] {
        return low;
    }

    let idx = knots[low..high].partition_point(|&t| t <= x);
    (low + idx).saturating_sub(1).clamp(low, high - 1)
}

/// Non-zero basis functions `N[span-k..=span]` at `x` (Cox-de Boor).
fn basis_functions(knots: &[f64], span: usize, k: usize, x: f64) -> [f64; MAX_DEGREE + 1] {
    let mut n = [0.0; MAX_DEGREE + 1];
    let mut left = [0.0; MAX_DEGREE + 1];
    let mut right = [0.0; MAX_DEGREE + 1];

    n[0] = 1.0;
    for j in 1..=k {
        left[j] = x - knots[span + 1 - j];
        right[j] = knots[span + j] - x;
        let mut saved = 0.0;
        for r in 0..j {
            let temp = n[r] / (right[r + 1] + left[j - r]);
            n[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        n[j] = saved;
    }

    n
}

/// Evaluates a spline of degree `k` given its knots and coefficients.
fn de_boor(knots: &[f64], coeffs: &[f64], k: usize, x: f64) -> f64 {
    let span = find_span(knots, k, coeffs.len(), x);
    let basis = basis_functions(knots, span, k, x);

    basis
        .iter()
        .take(k + 1)
        .enumerate()
        .map(|(i, b)| b * coeffs[span - k + i])
        .sum()
}
