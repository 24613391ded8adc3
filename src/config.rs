//! Configuration types for area partitioning.
//!
//! All types are serde-serializable so a configuration can be stored next to
//! the images it was tuned for and loaded back as JSON.

use crate::error::{PartitionError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of clusters the areas are split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionMode {
    /// Noise and signal.
    Binary,
    /// Noise, small objects and big objects.
    Ternary,
}

/// Pooled objective minimized by the iteration loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    /// Sum over clusters of `variance * count` (within-cluster sum of squares).
    WithinVariance,
    /// Sum over clusters of the standard error of the mean.
    StandardError,
}

/// Spread measure used to place the cutoff below the anchor cluster mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dispersion {
    /// Standard deviation of the anchor cluster.
    ClusterStdDev,
    /// Standard error of the mean over all measurements.
    GlobalStandardError,
}

macro_rules! impl_from_str {
    ($ty:ty, $name:literal, { $($text:literal => $variant:expr),+ $(,)? }) => {
        impl FromStr for $ty {
            type Err = PartitionError;

            fn from_str(s: &str) -> Result<Self> {
                match s.to_ascii_lowercase().replace('-', "_").as_str() {
                    $($text => Ok($variant),)+
                    other => Err(PartitionError::invalid_argument(format!(
                        "unsupported {}: {}",
                        $name, other
                    ))),
                }
            }
        }
    };
}

impl_from_str!(PartitionMode, "partition mode", {
    "binary" => PartitionMode::Binary,
    "ternary" => PartitionMode::Ternary,
});

impl_from_str!(Objective, "objective", {
    "within_variance" => Objective::WithinVariance,
    "variance" => Objective::WithinVariance,
    "standard_error" => Objective::StandardError,
    "sem" => Objective::StandardError,
});

impl_from_str!(Dispersion, "dispersion", {
    "cluster_std_dev" => Dispersion::ClusterStdDev,
    "std_dev" => Dispersion::ClusterStdDev,
    "global_standard_error" => Dispersion::GlobalStandardError,
    "sem" => Dispersion::GlobalStandardError,
});

impl fmt::Display for PartitionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartitionMode::Binary => write!(f, "binary"),
            PartitionMode::Ternary => write!(f, "ternary"),
        }
    }
}

/// Second, tighter cutoff computed over the first-pass survivors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RefinementConfig {
    /// Multiplier applied to the recomputed dispersion.
    pub multiplier: f64,

    /// Spread measure recomputed over the survivors.
    pub dispersion: Dispersion,
}

impl RefinementConfig {
    /// Create a refinement pass with the given multiplier.
    pub fn new(multiplier: f64) -> Self {
        Self {
            multiplier,
            dispersion: Dispersion::ClusterStdDev,
        }
    }

    /// Set the dispersion source.
    pub fn with_dispersion(mut self, dispersion: Dispersion) -> Self {
        self.dispersion = dispersion;
        self
    }
}

/// Configuration for [`AreaPartitioner`](crate::AreaPartitioner).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionConfig {
    /// Binary or ternary split.
    pub mode: PartitionMode,

    /// Objective used for the convergence check.
    pub objective: Objective,

    /// Dispersion source for the cutoff.
    pub dispersion: Dispersion,

    /// Cutoff multiplier `k` in `anchor_mean - k * dispersion`.
    pub multiplier: f64,

    /// Maximum number of iterations before giving up on convergence.
    pub max_iterations: usize,

    /// Required gap between the noise and anchor means, in units of the sum
    /// of their standard deviations. Zero accepts every split.
    pub min_separation: f64,

    /// Optional refinement pass.
    pub refinement: Option<RefinementConfig>,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            mode: PartitionMode::Binary,
            objective: Objective::WithinVariance,
            dispersion: Dispersion::ClusterStdDev,
            multiplier: 2.0,
            max_iterations: 100,
            min_separation: 2.5,
            refinement: None,
        }
    }
}

impl PartitionConfig {
    /// Create a configuration for the given mode with default values.
    pub fn new(mode: PartitionMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Binary split with defaults.
    pub fn binary() -> Self {
        Self::new(PartitionMode::Binary)
    }

    /// Ternary split with defaults.
    pub fn ternary() -> Self {
        Self::new(PartitionMode::Ternary)
    }

    /// Set the objective.
    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    /// Set the dispersion source.
    pub fn with_dispersion(mut self, dispersion: Dispersion) -> Self {
        self.dispersion = dispersion;
        self
    }

    /// Set the cutoff multiplier.
    pub fn with_multiplier(mut self, k: f64) -> Self {
        self.multiplier = k;
        self
    }

    /// Set the iteration cap.
    pub fn with_max_iterations(mut self, max_iter: usize) -> Self {
        self.max_iterations = max_iter;
        self
    }

    /// Set the required noise separation.
    pub fn with_min_separation(mut self, separation: f64) -> Self {
        self.min_separation = separation;
        self
    }

    /// Enable the refinement pass.
    pub fn with_refinement(mut self, refinement: RefinementConfig) -> Self {
        self.refinement = Some(refinement);
        self
    }

    /// Check that all parameters are usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(PartitionError::invalid_argument(
                "max_iterations must be > 0",
            ));
        }
        check_non_negative("multiplier", self.multiplier)?;
        check_non_negative("min_separation", self.min_separation)?;
        if let Some(refinement) = &self.refinement {
            check_non_negative("refinement multiplier", refinement.multiplier)?;
        }
        Ok(())
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn check_non_negative(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(PartitionError::invalid_argument(format!(
            "{} must be finite and >= 0, got {}",
            name, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PartitionConfig::default();
        assert_eq!(config.mode, PartitionMode::Binary);
        assert_eq!(config.max_iterations, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(PartitionConfig::binary().with_max_iterations(0).validate().is_err());
        assert!(PartitionConfig::binary().with_multiplier(-1.0).validate().is_err());
        assert!(PartitionConfig::binary().with_multiplier(f64::NAN).validate().is_err());
        assert!(PartitionConfig::binary()
            .with_refinement(RefinementConfig::new(f64::INFINITY))
            .validate()
            .is_err());
    }

    #[test]
    fn test_json_with_missing_fields_uses_defaults() {
        let config = PartitionConfig::from_json(r#"{"mode": "ternary", "multiplier": 2.35}"#).unwrap();
        assert_eq!(config.mode, PartitionMode::Ternary);
        assert_eq!(config.multiplier, 2.35);
        assert_eq!(config.dispersion, Dispersion::ClusterStdDev);
        assert!(config.refinement.is_none());
    }

    #[test]
    fn test_json_rejects_invalid_config() {
        let err = PartitionConfig::from_json(r#"{"max_iterations": 0}"#).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_json_roundtrip_keeps_refinement() {
        let config = PartitionConfig::ternary()
            .with_refinement(RefinementConfig::new(1.0).with_dispersion(Dispersion::GlobalStandardError));
        let json = config.to_json().unwrap();
        assert_eq!(PartitionConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_from_str_variants() {
        assert_eq!("Ternary".parse::<PartitionMode>().unwrap(), PartitionMode::Ternary);
        assert_eq!("standard-error".parse::<Objective>().unwrap(), Objective::StandardError);
        assert_eq!("sem".parse::<Dispersion>().unwrap(), Dispersion::GlobalStandardError);
        assert!("quaternary".parse::<PartitionMode>().is_err());
    }
}
