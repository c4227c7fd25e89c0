//! Curve samples tagged with a parameter value.
//!
//! A bench characterisation typically sweeps one quantity (e.g. output power)
//! for several settings of another (e.g. input voltage). Each sweep is a
//! [`Curve`]; the setting it was taken at is the curve's parameter `v`.

use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};
use crate::interpolation::{check_degree, check_samples, BSpline};

/// One sampled curve: strictly increasing `x`, matching `y`, and the
/// parameter value `v` it was recorded at.
///
/// When deserialised, `v` may be a number or a non-empty array; for an array
/// the first element is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCurve")]
pub struct Curve {
    /// Sample abscissae, strictly increasing.
    pub x: Vec<f64>,
    /// Sample ordinates.
    pub y: Vec<f64>,
    /// Parameter value the curve was recorded at.
    pub v: f64,
}

impl Curve {
    /// Creates a curve. Samples are checked when the curve is fitted.
    pub fn new(x: Vec<f64>, y: Vec<f64>, v: f64) -> Self {
        Self { x, y, v }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Returns true if the curve has no samples.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Checks that the curve can be fitted with a spline of degree `k`.
    pub fn validate(&self, k: usize) -> MathResult<()> {
        check_degree(k)?;
        check_samples(&self.x, &self.y)?;
        if !self.v.is_finite() {
            return Err(MathError::inconsistent_curve(
                0,
                format!("parameter value {} is not finite", self.v),
            ));
        }
        if self.x.len() < k + 1 {
            return Err(MathError::invalid_degree(
                k,
                format!("needs at least {} points, got {}", k + 1, self.x.len()),
            ));
        }
        Ok(())
    }

    /// Fits the interpolating spline of degree `k` through the samples.
    pub fn fit(&self, k: usize) -> MathResult<BSpline> {
        self.validate(k)?;
        BSpline::interpolating(&self.x, &self.y, k)
    }
}

/// Parameter value as it appears in curve records.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ParameterRepr {
    Scalar(f64),
    Sequence(Vec<f64>),
}

#[derive(Debug, Clone, Deserialize)]
struct RawCurve {
    x: Vec<f64>,
    y: Vec<f64>,
    v: ParameterRepr,
}

impl TryFrom<RawCurve> for Curve {
    type Error = MathError;

    fn try_from(raw: RawCurve) -> Result<Self, Self::Error> {
        let v = match raw.v {
            ParameterRepr::Scalar(v) => v,
            ParameterRepr::Sequence(values) => values.first().copied().ok_or_else(|| {
                MathError::inconsistent_curve(0, "parameter value array is empty")
            })?,
        };
        Ok(Self::new(raw.x, raw.y, v))
    }
}

/// Ordered family of curves, expected in ascending parameter order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CurveSet {
    curves: Vec<Curve>,
}

impl CurveSet {
    /// Creates a curve set in the given order.
    pub fn new(curves: Vec<Curve>) -> Self {
        Self { curves }
    }

    /// Parses a JSON array of `{"x": [...], "y": [...], "v": ...}` records.
    ///
    /// # Errors
    ///
    /// [`MathError::InvalidInput`] for malformed JSON,
    /// [`MathError::InconsistentCurve`] for a record with an empty `v` array.
    pub fn from_json_str(json: &str) -> MathResult<Self> {
        let raw: Vec<RawCurve> = serde_json::from_str(json)
            .map_err(|e| MathError::invalid_input(format!("malformed curve records: {e}")))?;

        let curves = raw
            .into_iter()
            .enumerate()
            .map(|(i, r)| Curve::try_from(r).map_err(|e| e.at_curve(i)))
            .collect::<MathResult<Vec<_>>>()?;

        Ok(Self::new(curves))
    }

    /// Parameter values in curve order.
    pub fn parameter_values(&self) -> Vec<f64> {
        self.curves.iter().map(|c| c.v).collect()
    }

    /// Number of curves.
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Returns true if the set holds no curves.
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Iterates over the curves in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Curve> {
        self.curves.iter()
    }

    /// Returns the curves as a slice.
    pub fn as_slice(&self) -> &[Curve] {
        &self.curves
    }
}

impl From<Vec<Curve>> for CurveSet {
    fn from(curves: Vec<Curve>) -> Self {
        Self::new(curves)
    }
}

impl<'de> Deserialize<'de> for CurveSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Vec::<Curve>::deserialize(deserializer).map(Self::new)
    }
}

impl<'a> IntoIterator for &'a CurveSet {
    type Item = &'a Curve;
    type IntoIter = std::slice::Iter<'a, Curve>;

    fn into_iter(self) -> Self::IntoIter {
        self.curves.iter()
    }
}

impl IntoIterator for CurveSet {
    type Item = Curve;
    type IntoIter = std::vec::IntoIter<Curve>;

    fn into_iter(self) -> Self::IntoIter {
        self.curves.into_iter()
    }
}
