//! Two-stage interpolation across a family of parameterised curves.

use crate::curve::Curve;
use crate::error::{MathError, MathResult};
use crate::interpolation::{check_degree, BSpline, Interpolator};

/// Degree of the spline fitted across parameter values.
///
/// Fixed independently of the per-curve degree.
pub const CROSS_FIT_DEGREE: usize = 2;

/// Default per-curve spline degree (cubic).
pub const DEFAULT_DEGREE: usize = 3;

/// Interpolates `y = f(x, v)` from curves sampled at discrete values of `v`.
///
/// Construction fits one [`BSpline`] per curve. A query evaluates every
/// per-curve spline at `x`, fits a quadratic spline through the resulting
/// `(v_i, y_i)` pairs and evaluates it at `v`.
///
/// The interpolator is immutable once built and can be shared between
/// threads; each query builds its own cross-fit spline.
///
/// # Example
///
/// ```rust
/// use benchtest_math::curve::Curve;
/// use benchtest_math::interpolation::MultiCurveInterpolator;
///
/// let xs = vec![0.0, 1.0, 2.0, 3.0];
/// let curves = vec![
///     Curve::new(xs.clone(), vec![0.0, 1.0, 4.0, 9.0], 1.0),
///     Curve::new(xs.clone(), vec![0.0, 2.0, 8.0, 18.0], 2.0),
///     Curve::new(xs, vec![0.0, 3.0, 12.0, 27.0], 3.0),
/// ];
///
/// let interp = MultiCurveInterpolator::new(&curves, 3).unwrap();
/// let y = interp.get_point(2.0, 2.5).unwrap();
/// assert!((y - 10.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct MultiCurveInterpolator {
    models: Vec<BSpline>,
    parameters: Vec<f64>,
    degree: usize,
}

impl MultiCurveInterpolator {
    /// Fits a spline of degree `k` to each curve.
    ///
    /// Curves must be ordered by strictly increasing parameter value.
    ///
    /// # Errors
    ///
    /// - [`MathError::InsufficientCurves`] if `curves` is empty.
    /// - [`MathError::InvalidDegree`] if `k` is outside `[1, 5]` or a curve
    ///   has `k` or fewer samples.
    /// - [`MathError::InconsistentCurve`] if a curve's samples are unusable
    ///   or parameter values are not strictly increasing.
    pub fn new(curves: &[Curve], k: usize) -> MathResult<Self> {
        if curves.is_empty() {
            return Err(MathError::insufficient_curves(1, 0));
        }
        check_degree(k)?;

        let models = curves
            .iter()
            .enumerate()
            .map(|(i, curve)| curve.fit(k).map_err(|e| e.at_curve(i)))
            .collect::<MathResult<Vec<_>>>()?;

        let parameters: Vec<f64> = curves.iter().map(|c| c.v).collect();
        if let Some(i) = parameters.windows(2).position(|w| w[1] <= w[0]) {
            return Err(MathError::inconsistent_curve(
                i + 1,
                format!(
                    "parameter values must be strictly increasing ({} follows {})",
                    parameters[i + 1],
                    parameters[i]
                ),
            ));
        }

        tracing::debug!(
            curves = models.len(),
            degree = k,
            v_min = parameters[0],
            v_max = parameters[parameters.len() - 1],
            "Multi-curve interpolator fitted"
        );

        Ok(Self {
            models,
            parameters,
            degree: k,
        })
    }

    /// Fits cubic splines to each curve.
    pub fn with_default_degree(curves: &[Curve]) -> MathResult<Self> {
        Self::new(curves, DEFAULT_DEGREE)
    }

    /// Returns the interpolated `y` at `x` for parameter value `v`.
    ///
    /// `x` outside a curve's samples and `v` outside the sampled parameter
    /// range are extrapolated without error.
    ///
    /// # Errors
    ///
    /// - [`MathError::InsufficientCurves`] with fewer than 3 curves.
    /// - [`MathError::InvalidInput`] if `x` or `v` is not finite.
    pub fn get_point(&self, x: f64, v: f64) -> MathResult<f64> {
        if !v.is_finite() {
            return Err(MathError::invalid_input(format!(
                "parameter value {v} is not finite"
            )));
        }
        self.cross_section(x)?.interpolate(v)
    }

    /// Builds the cross-fit spline `v -> y` at a fixed `x`.
    ///
    /// Useful when evaluating many parameter values at the same `x`.
    pub fn cross_section(&self, x: f64) -> MathResult<BSpline> {
        if self.parameters.len() < CROSS_FIT_DEGREE + 1 {
            return Err(MathError::insufficient_curves(
                CROSS_FIT_DEGREE + 1,
                self.parameters.len(),
            ));
        }
        if !x.is_finite() {
            return Err(MathError::invalid_input(format!("x value {x} is not finite")));
        }

        let ys: Vec<f64> = self.models.iter().map(|m| m.eval(x)).collect();

        BSpline::interpolating(&self.parameters, &ys, CROSS_FIT_DEGREE).map_err(|e| match e {
            MathError::InconsistentCurve { reason, .. } => {
                MathError::invalid_input(format!("cross fit at x = {x} failed: {reason}"))
            }
            other => other,
        })
    }

    /// Per-curve spline degree.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Parameter values in curve order.
    pub fn parameter_values(&self) -> &[f64] {
        &self.parameters
    }

    /// Fitted per-curve splines, in curve order.
    pub fn curve_models(&self) -> &[BSpline] {
        &self.models
    }

    /// Number of curves.
    pub fn curve_count(&self) -> usize {
        self.models.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scaled_parabolas() -> Vec<Curve> {
        let xs = vec![0.0, 1.0, 2.0, 3.0];
        vec![
            Curve::new(xs.clone(), vec![0.0, 1.0, 4.0, 9.0], 1.0),
            Curve::new(xs.clone(), vec![0.0, 2.0, 8.0, 18.0], 2.0),
            Curve::new(xs, vec![0.0, 3.0, 12.0, 27.0], 3.0),
        ]
    }

    #[test]
    fn test_scaled_parabolas() {
        let interp = MultiCurveInterpolator::new(&scaled_parabolas(), 3).unwrap();

        assert_relative_eq!(interp.get_point(2.0, 1.0).unwrap(), 4.0, epsilon = 1e-9);
        assert_relative_eq!(interp.get_point(2.0, 2.0).unwrap(), 8.0, epsilon = 1e-9);
        assert_relative_eq!(interp.get_point(2.0, 3.0).unwrap(), 12.0, epsilon = 1e-9);

        // Between curves and between samples: y = v * x^2
        assert_relative_eq!(interp.get_point(1.5, 2.5).unwrap(), 5.625, epsilon = 1e-9);
    }

    #[test]
    fn test_default_degree() {
        let interp = MultiCurveInterpolator::with_default_degree(&scaled_parabolas()).unwrap();
        assert_eq!(interp.degree(), DEFAULT_DEGREE);
        assert_eq!(interp.curve_count(), 3);
        assert_eq!(interp.parameter_values(), &[1.0, 2.0, 3.0]);
        assert!(interp
            .curve_models()
            .iter()
            .all(|m| m.degree() == DEFAULT_DEGREE));
    }

    #[test]
    fn test_degree_out_of_range() {
        let result = MultiCurveInterpolator::new(&scaled_parabolas(), 6);
        assert!(matches!(result, Err(MathError::InvalidDegree { degree: 6, .. })));

        let result = MultiCurveInterpolator::new(&scaled_parabolas(), 0);
        assert!(matches!(result, Err(MathError::InvalidDegree { degree: 0, .. })));
    }

    #[test]
    fn test_degree_too_high_for_curve() {
        let mut curves = scaled_parabolas();
        curves[1] = Curve::new(vec![0.0, 1.0], vec![0.0, 2.0], 2.0);

        let result = MultiCurveInterpolator::new(&curves, 3);
        assert!(matches!(result, Err(MathError::InvalidDegree { degree: 3, .. })));
    }

    #[test]
    fn test_inconsistent_curve_reports_index() {
        let mut curves = scaled_parabolas();
        curves[2] = Curve::new(vec![0.0, 1.0, 2.0, 3.0], vec![0.0, 3.0, 12.0], 3.0);

        let result = MultiCurveInterpolator::new(&curves, 2);
        assert!(matches!(result, Err(MathError::InconsistentCurve { index: 2, .. })));

        let mut curves = scaled_parabolas();
        curves[1] = Curve::new(vec![0.0, 2.0, 1.0, 3.0], vec![0.0, 2.0, 8.0, 18.0], 2.0);

        let result = MultiCurveInterpolator::new(&curves, 2);
        assert!(matches!(result, Err(MathError::InconsistentCurve { index: 1, .. })));
    }

    #[test]
    fn test_parameter_values_must_increase() {
        let mut curves = scaled_parabolas();
        curves.swap(1, 2);

        let result = MultiCurveInterpolator::new(&curves, 3);
        assert!(matches!(result, Err(MathError::InconsistentCurve { index: 2, .. })));

        let mut curves = scaled_parabolas();
        curves[1].v = 1.0;
        let result = MultiCurveInterpolator::new(&curves, 3);
        assert!(matches!(result, Err(MathError::InconsistentCurve { index: 1, .. })));
    }

    #[test]
    fn test_no_curves() {
        let result = MultiCurveInterpolator::new(&[], 3);
        assert!(matches!(
            result,
            Err(MathError::InsufficientCurves {
                required: 1,
                actual: 0
            })
        ));
    }

    #[test]
    fn test_two_curves_fail_on_query() {
        let curves = &scaled_parabolas()[..2];
        let interp = MultiCurveInterpolator::new(curves, 3).unwrap();

        let result = interp.get_point(1.0, 1.5);
        assert_eq!(result, Err(MathError::insufficient_curves(3, 2)));
    }

    #[test]
    fn test_silent_extrapolation() {
        let interp = MultiCurveInterpolator::new(&scaled_parabolas(), 3).unwrap();

        // Exact model is y = v * x^2, which both stages reproduce
        assert_relative_eq!(interp.get_point(4.0, 2.0).unwrap(), 32.0, epsilon = 1e-8);
        assert_relative_eq!(interp.get_point(2.0, 4.0).unwrap(), 16.0, epsilon = 1e-8);
    }

    #[test]
    fn test_non_finite_query() {
        let interp = MultiCurveInterpolator::new(&scaled_parabolas(), 3).unwrap();
        assert!(matches!(
            interp.get_point(f64::NAN, 2.0),
            Err(MathError::InvalidInput { .. })
        ));
        assert!(matches!(
            interp.get_point(1.0, f64::INFINITY),
            Err(MathError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_cross_section_matches_get_point() {
        let interp = MultiCurveInterpolator::new(&scaled_parabolas(), 3).unwrap();
        let section = interp.cross_section(1.25).unwrap();

        assert_eq!(section.degree(), CROSS_FIT_DEGREE);
        for v in [1.0, 1.7, 2.2, 3.0] {
            assert_eq!(
                section.interpolate(v).unwrap(),
                interp.get_point(1.25, v).unwrap()
            );
        }
    }

    #[test]
    fn test_repeated_queries_are_bit_identical() {
        let interp = MultiCurveInterpolator::new(&scaled_parabolas(), 3).unwrap();
        let first = interp.get_point(1.37, 2.61).unwrap();
        for _ in 0..10 {
            assert_eq!(interp.get_point(1.37, 2.61).unwrap().to_bits(), first.to_bits());
        }
    }

    #[test]
    fn test_shared_between_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MultiCurveInterpolator>();

        let interp = MultiCurveInterpolator::new(&scaled_parabolas(), 3).unwrap();
        let expected = interp.get_point(0.5, 1.5).unwrap();

        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| interp.get_point(0.5, 1.5).unwrap()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}
