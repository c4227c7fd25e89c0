//! # Benchtest
//!
//! Helpers for automating power-conversion bench tests.
//!
//! This crate re-exports:
//!
//! - [`math`]: Multi-curve interpolation of characterisation data
//! - [`instruments`]: PCU register and oscilloscope SCPI adapters
//! - [`util`]: Terminal escape sequences, JSON deep-merge, file naming
//!
//! and adds [`config::BenchConfig`] (TOML) and [`logging::init_tracing`].
//!
//! ## Example
//!
//! ```rust
//! use benchtest::prelude::*;
//!
//! let config = BenchConfig::default();
//! let xs = vec![0.0, 1.0, 2.0, 3.0];
//! let curves = vec![
//!     Curve::new(xs.clone(), vec![0.0, 1.0, 4.0, 9.0], 1.0),
//!     Curve::new(xs.clone(), vec![0.0, 2.0, 8.0, 18.0], 2.0),
//!     Curve::new(xs, vec![0.0, 3.0, 12.0, 27.0], 3.0),
//! ];
//!
//! let interp = config.build_interpolator(&curves).unwrap();
//! assert!((interp.get_point(2.0, 3.0).unwrap() - 12.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod logging;

pub use benchtest_instruments as instruments;
pub use benchtest_math as math;
pub use benchtest_util as util;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{BenchConfig, ConfigError};
    pub use crate::logging::init_tracing;
    pub use benchtest_instruments::prelude::*;
    pub use benchtest_math::prelude::*;
}
