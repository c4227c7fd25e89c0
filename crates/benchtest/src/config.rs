//! Bench configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use benchtest_instruments::pcu::{DmirRegion, Pcu, PcuDriver};
use benchtest_instruments::scope::{Scope, ScpiTransport};
use benchtest_math::curve::Curve;
use benchtest_math::interpolation::{MultiCurveInterpolator, DEFAULT_DEGREE, MAX_DEGREE, MIN_DEGREE};
use benchtest_math::MathResult;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for [`BenchConfig`].
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Bench configuration, usually loaded from a TOML file.
///
/// ```toml
/// log_filter = "info,benchtest=debug"
///
/// [interpolation]
/// degree = 3
///
/// [pcu]
/// dmir_area = 0
/// dmir_bank = 20
///
/// [scope]
/// marker_unit = "s"
/// ```
///
/// Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BenchConfig {
    /// Default `tracing` filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Curve interpolation settings.
    #[serde(default)]
    pub interpolation: InterpolationConfig,

    /// PCU settings.
    #[serde(default)]
    pub pcu: PcuConfig,

    /// Oscilloscope settings.
    #[serde(default)]
    pub scope: ScopeConfig,
}

/// Curve interpolation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterpolationConfig {
    /// Per-curve spline degree.
    #[serde(default = "default_degree")]
    pub degree: usize,
}

/// PCU settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PcuConfig {
    /// Memory area of the default data-model image region.
    #[serde(default = "default_dmir_area")]
    pub dmir_area: u32,

    /// Bank of the default data-model image region.
    #[serde(default = "default_dmir_bank")]
    pub dmir_bank: u32,
}

impl PcuConfig {
    /// Default data-model image region.
    pub fn dmir_region(&self) -> DmirRegion {
        DmirRegion {
            area: self.dmir_area,
            bank: self.dmir_bank,
        }
    }
}

/// Oscilloscope settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScopeConfig {
    /// Unit appended to marker positions.
    #[serde(default = "default_marker_unit")]
    pub marker_unit: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_degree() -> usize {
    DEFAULT_DEGREE
}

fn default_dmir_area() -> u32 {
    DmirRegion::default().area
}

fn default_dmir_bank() -> u32 {
    DmirRegion::default().bank
}

fn default_marker_unit() -> String {
    "s".to_string()
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            interpolation: InterpolationConfig::default(),
            pcu: PcuConfig::default(),
            scope: ScopeConfig::default(),
        }
    }
}

impl Default for InterpolationConfig {
    fn default() -> Self {
        Self {
            degree: default_degree(),
        }
    }
}

impl Default for PcuConfig {
    fn default() -> Self {
        Self {
            dmir_area: default_dmir_area(),
            dmir_bank: default_dmir_bank(),
        }
    }
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            marker_unit: default_marker_unit(),
        }
    }
}

impl BenchConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let degree = self.interpolation.degree;
        if !(MIN_DEGREE..=MAX_DEGREE).contains(&degree) {
            return Err(ConfigError::Invalid(format!(
                "interpolation.degree must be between {MIN_DEGREE} and {MAX_DEGREE}, got {degree}"
            )));
        }
        if self.scope.marker_unit.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "scope.marker_unit must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Fits a multi-curve interpolator with the configured degree.
    pub fn build_interpolator(&self, curves: &[Curve]) -> MathResult<MultiCurveInterpolator> {
        MultiCurveInterpolator::new(curves, self.interpolation.degree)
    }

    /// Wraps a PCU driver using the configured DMIR region.
    pub fn pcu<D: PcuDriver>(&self, driver: D) -> Pcu<D> {
        Pcu::new(driver).with_region(self.pcu.dmir_region())
    }

    /// Wraps a SCPI transport using the configured marker unit.
    pub fn scope<T: ScpiTransport>(&self, transport: T) -> Scope<T> {
        Scope::new(transport).with_marker_unit(self.scope.marker_unit.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = BenchConfig::from_toml_str("").unwrap();
        assert_eq!(config, BenchConfig::default());
        assert_eq!(config.interpolation.degree, 3);
        assert_eq!(config.pcu.dmir_region(), DmirRegion { area: 0, bank: 20 });
        assert_eq!(config.scope.marker_unit, "s");
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_partial_sections() {
        let config = BenchConfig::from_toml_str(
            r#"
            [interpolation]
            degree = 2

            [pcu]
            dmir_area = 1
            "#,
        )
        .unwrap();

        assert_eq!(config.interpolation.degree, 2);
        assert_eq!(config.pcu.dmir_region(), DmirRegion { area: 1, bank: 20 });
    }

    #[test]
    fn test_pcu_region_keys() {
        let config = BenchConfig::from_toml_str("[pcu]\ndmir_area = 2\ndmir_bank = 5\n").unwrap();
        assert_eq!(config.pcu.dmir_region(), DmirRegion { area: 2, bank: 5 });

        let config = BenchConfig::from_toml_str("[pcu]\ndmir_bank = 5\n").unwrap();
        assert_eq!(config.pcu.dmir_region(), DmirRegion { area: 0, bank: 5 });
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = BenchConfig::from_toml_str("[dmir]\narea = 2\nbank = 5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let err = BenchConfig::from_toml_str("[pcu]\nbank = 5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_out_of_range_degree() {
        let err = BenchConfig::from_toml_str("[interpolation]\ndegree = 7\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let err = BenchConfig::from_toml_str("[interpolation\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
