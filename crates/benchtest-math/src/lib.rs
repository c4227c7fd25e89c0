//! # Benchtest Math
//!
//! Numerical helpers for bench characterisation data.
//!
//! This crate provides:
//!
//! - **Curves**: Sampled `(x, y)` curves tagged with a parameter value, and
//!   JSON loading of curve families
//! - **Interpolation**: Interpolating B-splines and the two-stage
//!   multi-curve interpolator `y = f(x, v)`
//!
//! ## Example
//!
//! ```rust
//! use benchtest_math::prelude::*;
//!
//! let json = r#"[
//!     {"x": [0, 1, 2, 3], "y": [0, 1, 4, 9],   "v": [1.0]},
//!     {"x": [0, 1, 2, 3], "y": [0, 2, 8, 18],  "v": [2.0]},
//!     {"x": [0, 1, 2, 3], "y": [0, 3, 12, 27], "v": [3.0]}
//! ]"#;
//!
//! let curves = CurveSet::from_json_str(json).unwrap();
//! let interp = MultiCurveInterpolator::with_default_degree(curves.as_slice()).unwrap();
//! assert!((interp.get_point(2.0, 2.0).unwrap() - 8.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::needless_range_loop)]

pub mod curve;
pub mod error;
pub mod interpolation;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::curve::{Curve, CurveSet};
    pub use crate::error::{MathError, MathResult};
    pub use crate::interpolation::{
        BSpline, Interpolator, MultiCurveInterpolator, CROSS_FIT_DEGREE, DEFAULT_DEGREE,
    };
}

pub use error::{MathError, MathResult};
