//! Running statistics over scalar areas.

use crate::error::{PartitionError, Result};
use serde::{Deserialize, Serialize};

/// Count, extremes, mean and squared deviations of one group of values.
///
/// Mean and M2 are accumulated with Welford's update, so a group of
/// identical values has exactly that value as its mean and zero variance.
/// Cheap to build and copy; the partitioner creates a fresh set every
/// iteration. Variance is the population variance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterStats {
    count: usize,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl Default for ClusterStats {
    fn default() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl ClusterStats {
    /// Empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate every value of an iterator.
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let mut stats = Self::new();
        for v in values {
            stats.push(v);
        }
        stats
    }

    /// Add one value.
    #[inline]
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Number of values.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// True when no value has been added.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Mean, or `None` for an empty group.
    #[inline]
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    /// Smallest value, or `None` for an empty group.
    pub fn min(&self) -> Option<f64> {
        (self.count > 0).then_some(self.min)
    }

    /// Largest value, or `None` for an empty group.
    pub fn max(&self) -> Option<f64> {
        (self.count > 0).then_some(self.max)
    }

    /// True when the group holds at least two distinct values.
    pub fn has_spread(&self) -> bool {
        self.count > 1 && self.min < self.max
    }

    /// Population variance; zero for an empty group.
    pub fn variance(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.weighted_variance() / self.count as f64
        }
    }

    /// Population standard deviation; zero for an empty group.
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Standard error of the mean; zero for an empty group.
    pub fn standard_error(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.std_dev() / (self.count as f64).sqrt()
        }
    }

    /// `variance * count`, i.e. the within-group sum of squares.
    pub fn weighted_variance(&self) -> f64 {
        self.m2.max(0.0)
    }
}

/// Min / max / mean report over a set of areas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaSummary {
    /// Number of areas.
    pub count: usize,
    /// Smallest area.
    pub min: f64,
    /// Largest area.
    pub max: f64,
    /// Mean area.
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Standard error of the mean.
    pub standard_error: f64,
}

impl AreaSummary {
    /// Summarize a non-empty slice of values.
    pub fn from_values(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(PartitionError::invalid_argument(
                "Cannot summarize an empty set of areas",
            ));
        }

        let stats = ClusterStats::from_values(values.iter().copied());
        Ok(Self {
            count: stats.count(),
            min: stats.min,
            max: stats.max,
            mean: stats.mean().unwrap_or(stats.min),
            std_dev: stats.std_dev(),
            standard_error: stats.standard_error(),
        })
    }

    /// True when every value is identical.
    pub fn is_constant(&self) -> bool {
        self.min == self.max
    }
}
