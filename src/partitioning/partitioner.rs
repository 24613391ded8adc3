//! Iterative mean-splitting of areas into noise and signal clusters.

use super::boundaries::{assign, midpoints, next_means, pooled_objective};
use super::cutoff::{anchor_index, is_separated, primary_cutoff, refinement_cutoff};
use super::result::{ClusterSummary, PartitionResult};
use crate::config::{PartitionConfig, PartitionMode};
use crate::error::{PartitionError, Result};
use crate::stats::{AreaSummary, ClusterStats};
use crate::types::Measurement;
use crate::utils::parallel::maybe_parallel_map_threshold;
use tracing::{debug, warn};

/// Batches with at least this many sets are partitioned on the rayon pool.
const BATCH_PARALLEL_THRESHOLD: usize = 4;

/// Converged state of the iteration loop.
#[derive(Debug, Clone)]
struct ClusterFit {
    means: Vec<f64>,
    clusters: Vec<ClusterStats>,
    num_iterations: usize,
    converged: bool,
}

/// Splits contour areas into noise and valid objects without a preset
/// threshold.
///
/// Areas are clustered into two (binary) or three (ternary) groups by
/// iterating mid-point boundaries between cluster means until the pooled
/// objective stops improving. The lowest cluster is noise; the cutoff is
/// placed `k` dispersions below the next cluster up.
///
/// ```rust
/// use area_partition::{AreaPartitioner, PartitionConfig};
///
/// let areas = [1.0, 1.0, 1.0, 1.0, 1.0, 50.0, 52.0, 48.0, 51.0, 49.0];
/// let partitioner = AreaPartitioner::new(PartitionConfig::binary().with_multiplier(2.0));
/// let result = partitioner.partition_areas(&areas).unwrap();
///
/// assert_eq!(result.num_survivors(), 5);
/// assert!(result.cutoff > 1.0 && result.cutoff < 48.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AreaPartitioner {
    config: PartitionConfig,
}

impl AreaPartitioner {
    /// Create a partitioner with the given configuration.
    pub fn new(config: PartitionConfig) -> Self {
        Self { config }
    }

    /// Create a partitioner for the given mode with default settings.
    pub fn with_mode(mode: PartitionMode) -> Self {
        Self::new(PartitionConfig::new(mode))
    }

    /// The active configuration.
    pub fn config(&self) -> &PartitionConfig {
        &self.config
    }

    /// Partition measurements and keep the ones at or above the cutoff.
    pub fn partition<S: Clone>(&self, measurements: &[Measurement<S>]) -> Result<PartitionResult<S>> {
        self.config.validate()?;

        if measurements.is_empty() {
            return Err(PartitionError::invalid_argument(
                "Cannot partition an empty measurement set",
            ));
        }

        if let Some((i, m)) = measurements
            .iter()
            .enumerate()
            .find(|(_, m)| !m.area.is_finite() || m.area < 0.0)
        {
            return Err(PartitionError::invalid_argument(format!(
                "Area at position {} must be finite and >= 0, got {}",
                i, m.area
            )));
        }

        let areas: Vec<f64> = measurements.iter().map(|m| m.area).collect();
        let input_summary = AreaSummary::from_values(&areas)?;

        if input_summary.is_constant() {
            debug!(value = input_summary.min, "all areas identical, single cluster");
            let only = ClusterStats::from_values(areas.iter().copied());
            return Ok(PartitionResult {
                survivors: measurements.to_vec(),
                cutoff: input_summary.min,
                cluster_means: vec![input_summary.min],
                clusters: vec![ClusterSummary::from(&only)],
                anchor_cluster: 0,
                noise_separated: false,
                refinement_cutoff: None,
                num_iterations: 0,
                converged: true,
                input_summary,
            });
        }

        let fit = self.fit_clusters(&areas, &input_summary);
        let anchor = anchor_index(&fit.clusters);
        let anchor_mean = fit.means[anchor];
        let noise_separated = is_separated(
            &fit.clusters[0],
            &fit.clusters[anchor],
            self.config.min_separation,
        );

        let (cutoff, refinement) = if noise_separated {
            let population = ClusterStats::from_values(areas.iter().copied());
            let first = primary_cutoff(&self.config, anchor_mean, &fit.clusters[anchor], &population);
            let first_survivors =
                ClusterStats::from_values(areas.iter().copied().filter(|&a| a >= first));
            let second = refinement_cutoff(
                &self.config,
                anchor_mean,
                &fit.clusters[anchor],
                &first_survivors,
            );
            (second.map_or(first, |c| c.max(first)), second)
        } else {
            debug!("no separated noise cluster, keeping every measurement");
            (input_summary.min, None)
        };

        let survivors: Vec<Measurement<S>> = measurements
            .iter()
            .filter(|m| m.area >= cutoff)
            .cloned()
            .collect();

        debug!(
            cutoff,
            survivors = survivors.len(),
            rejected = measurements.len() - survivors.len(),
            "partition complete"
        );

        Ok(PartitionResult {
            survivors,
            cutoff,
            cluster_means: fit.means,
            clusters: fit.clusters.iter().map(ClusterSummary::from).collect(),
            anchor_cluster: anchor,
            noise_separated,
            refinement_cutoff: refinement,
            num_iterations: fit.num_iterations,
            converged: fit.converged,
            input_summary,
        })
    }

    /// Partition raw areas; each survivor's source is its input position.
    pub fn partition_areas(&self, areas: &[f64]) -> Result<PartitionResult<usize>> {
        self.partition(&Measurement::from_areas(areas))
    }

    /// Partition independent area sets, in parallel for larger batches.
    pub fn partition_batch(&self, sets: &[Vec<f64>]) -> Vec<Result<PartitionResult<usize>>> {
        maybe_parallel_map_threshold(sets, BATCH_PARALLEL_THRESHOLD, |areas| {
            self.partition_areas(areas)
        })
    }

    /// Seed means from the global extremes (and mean, for ternary) and
    /// iterate until the objective stops strictly decreasing.
    fn fit_clusters(&self, areas: &[f64], summary: &AreaSummary) -> ClusterFit {
        let mut means = match self.config.mode {
            PartitionMode::Binary => vec![summary.min, summary.max],
            PartitionMode::Ternary => vec![summary.min, summary.mean, summary.max],
        };
        let mut clusters = Vec::new();
        let mut prev_objective = f64::INFINITY;
        let mut num_iterations = 0;
        let mut converged = false;

        for iter in 0..self.config.max_iterations {
            num_iterations = iter + 1;

            let boundaries = midpoints(&means);
            let candidate = assign(areas, &boundaries);
            let objective = pooled_objective(&candidate, self.config.objective);
            debug!(iteration = num_iterations, ?boundaries, objective, "partition pass");

            // Keep the previous means unless this pass strictly improved.
            if objective >= prev_objective {
                converged = true;
                break;
            }

            prev_objective = objective;
            means = next_means(&means, &candidate);
            clusters = candidate;
        }

        if converged {
            debug!(iterations = num_iterations, ?means, "partition converged");
        } else {
            warn!(
                max_iterations = self.config.max_iterations,
                "partition did not converge within the iteration cap"
            );
        }

        ClusterFit {
            means,
            clusters,
            num_iterations,
            converged,
        }
    }
}

/// Partition raw areas with the default configuration for `mode`.
pub fn partition(areas: &[f64], mode: PartitionMode) -> Result<PartitionResult<usize>> {
    AreaPartitioner::with_mode(mode).partition_areas(areas)
}
