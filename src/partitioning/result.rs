//! Partitioning results.

use crate::stats::{AreaSummary, ClusterStats};
use crate::types::Measurement;
use serde::{Deserialize, Serialize};

/// Statistics of one converged cluster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterSummary {
    /// Number of measurements in the cluster.
    pub count: usize,

    /// Cluster mean, `None` if the cluster ended up empty.
    pub mean: Option<f64>,

    /// Population standard deviation.
    pub std_dev: f64,

    /// Standard error of the mean.
    pub standard_error: f64,
}

impl From<&ClusterStats> for ClusterSummary {
    fn from(stats: &ClusterStats) -> Self {
        Self {
            count: stats.count(),
            mean: stats.mean(),
            std_dev: stats.std_dev(),
            standard_error: stats.standard_error(),
        }
    }
}

/// Result of partitioning a measurement set.
#[derive(Debug, Clone)]
pub struct PartitionResult<S> {
    /// Measurements with `area >= cutoff`, in input order.
    pub survivors: Vec<Measurement<S>>,

    /// Effective cutoff (the larger of the first-pass and refinement cutoffs).
    pub cutoff: f64,

    /// Converged cluster means in ascending order.
    pub cluster_means: Vec<f64>,

    /// Per-cluster statistics, parallel to `cluster_means`.
    pub clusters: Vec<ClusterSummary>,

    /// Index of the cluster the cutoff was anchored on.
    pub anchor_cluster: usize,

    /// Whether a separate noise cluster was found. When false nothing is
    /// rejected.
    pub noise_separated: bool,

    /// Cutoff of the refinement pass, if one ran.
    pub refinement_cutoff: Option<f64>,

    /// Number of iterations performed.
    pub num_iterations: usize,

    /// False when the iteration cap was reached first.
    pub converged: bool,

    /// Summary of the input areas.
    pub input_summary: AreaSummary,
}

impl<S> PartitionResult<S> {
    /// Number of surviving measurements.
    pub fn num_survivors(&self) -> usize {
        self.survivors.len()
    }

    /// Number of measurements classified as noise.
    pub fn num_rejected(&self) -> usize {
        self.input_summary.count - self.survivors.len()
    }

    /// Surviving areas in input order.
    pub fn survivor_areas(&self) -> Vec<f64> {
        self.survivors.iter().map(|m| m.area).collect()
    }

    /// Source-free report, suitable for serialization.
    pub fn report(&self) -> PartitionReport {
        let survivor_summary = AreaSummary::from_values(&self.survivor_areas()).ok();
        PartitionReport {
            cutoff: self.cutoff,
            refinement_cutoff: self.refinement_cutoff,
            cluster_means: self.cluster_means.clone(),
            clusters: self.clusters.clone(),
            anchor_cluster: self.anchor_cluster,
            noise_separated: self.noise_separated,
            num_survivors: self.num_survivors(),
            num_rejected: self.num_rejected(),
            num_iterations: self.num_iterations,
            converged: self.converged,
            input_summary: self.input_summary,
            survivor_summary,
        }
    }
}

/// Serializable view of a [`PartitionResult`] without the measurement sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionReport {
    /// Area threshold; measurements at or above it survive.
    pub cutoff: f64,
    /// Threshold from the refinement pass, when one ran.
    pub refinement_cutoff: Option<f64>,
    /// Final cluster means in ascending order.
    pub cluster_means: Vec<f64>,
    /// Per-cluster statistics, aligned with `cluster_means`.
    pub clusters: Vec<ClusterSummary>,
    /// Index of the cluster the cutoff is derived from.
    pub anchor_cluster: usize,
    /// Whether a noise cluster was found at all.
    pub noise_separated: bool,
    pub num_survivors: usize,
    pub num_rejected: usize,
    pub num_iterations: usize,
    /// False when the iteration cap was reached.
    pub converged: bool,
    /// Statistics over every input area.
    pub input_summary: AreaSummary,
    /// Statistics over the survivors; `None` when nothing survived.
    pub survivor_summary: Option<AreaSummary>,
}
