//! Interpolation methods for bench characterisation data.
//!
//! # Available Methods
//!
//! - [`BSpline`]: Interpolating B-spline of degree 1 to 5 through a single
//!   curve's samples
//! - [`MultiCurveInterpolator`]: Two-stage interpolation over a family of
//!   curves tagged with a parameter value, giving `y = f(x, v)`
//!
//! # Extrapolation
//!
//! Both methods extrapolate silently by continuing the boundary polynomial
//! pieces. Results outside the sampled `x` range of a curve, or outside the
//! sampled parameter range, are numerically defined but carry no accuracy
//! guarantee.

mod bspline;
mod multi_curve;

pub use bspline::{BSpline, MAX_DEGREE, MIN_DEGREE};
pub use multi_curve::{MultiCurveInterpolator, CROSS_FIT_DEGREE, DEFAULT_DEGREE};

pub(crate) use bspline::{check_degree, check_samples};

use crate::error::MathResult;

/// Trait for one-dimensional interpolation methods.
pub trait Interpolator: Send + Sync {
    /// Returns the interpolated value at x.
    fn interpolate(&self, x: f64) -> MathResult<f64>;

    /// Returns the first derivative at x.
    fn derivative(&self, x: f64) -> MathResult<f64>;

    /// Returns true if extrapolation is allowed.
    fn allows_extrapolation(&self) -> bool {
        false
    }

    /// Returns the minimum x value in the data.
    fn min_x(&self) -> f64;

    /// Returns the maximum x value in the data.
    fn max_x(&self) -> f64;

    /// Checks if x is within the interpolation range.
    fn in_range(&self, x: f64) -> bool {
        x >= self.min_x() && x <= self.max_x()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_interpolators_as_trait_objects() {
        let xs = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = vec![1.0, 3.0, 2.0, 5.0, 4.0];

        let splines: Vec<Box<dyn Interpolator>> = (MIN_DEGREE..=4)
            .map(|k| Box::new(BSpline::interpolating(&xs, &ys, k).unwrap()) as Box<dyn Interpolator>)
            .collect();

        for spline in &splines {
            assert_relative_eq!(spline.min_x(), 0.0);
            assert_relative_eq!(spline.max_x(), 4.0);
            assert!(spline.in_range(2.5));
            for (x, y) in xs.iter().zip(ys.iter()) {
                assert_relative_eq!(spline.interpolate(*x).unwrap(), *y, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_higher_degree_is_smoother() {
        // Sample a smooth function; a cubic should track it better than a
        // piecewise-linear fit between the samples.
        let xs: Vec<f64> = (0..9).map(|i| i as f64 * 0.5).collect();
        let ys: Vec<f64> = xs.iter().map(|x: &f64| (0.7 * x).exp()).collect();

        let linear = BSpline::interpolating(&xs, &ys, 1).unwrap();
        let cubic = BSpline::interpolating(&xs, &ys, 3).unwrap();

        let x = 2.25;
        let exact = (0.7_f64 * x).exp();
        let err_linear = (linear.interpolate(x).unwrap() - exact).abs();
        let err_cubic = (cubic.interpolate(x).unwrap() - exact).abs();

        assert!(err_cubic < err_linear);
    }
}
