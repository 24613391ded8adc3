//! Cutoff derivation from converged clusters.

use crate::config::{Dispersion, PartitionConfig};
use crate::stats::ClusterStats;
use tracing::trace;

/// Cluster the cutoff is placed below: the first non-empty cluster above the
/// noise cluster (index 0).
pub(crate) fn anchor_index(clusters: &[ClusterStats]) -> usize {
    (1..clusters.len())
        .find(|&i| !clusters[i].is_empty())
        .unwrap_or(clusters.len().saturating_sub(1))
}

/// Whether the noise cluster is far enough below the anchor to be real noise
/// rather than the lower half of a single mode.
pub(crate) fn is_separated(noise: &ClusterStats, anchor: &ClusterStats, min_separation: f64) -> bool {
    match (noise.mean(), anchor.mean()) {
        (Some(lo), Some(hi)) => {
            let gap = hi - lo;
            let spread = noise.std_dev() + anchor.std_dev();
            trace!(gap, spread, min_separation, "noise separation check");
            gap > 0.0 && gap > min_separation * spread
        }
        _ => false,
    }
}

/// Spread for the given source. `population` is the set the global standard
/// error is computed over.
pub(crate) fn dispersion(source: Dispersion, anchor: &ClusterStats, population: &ClusterStats) -> f64 {
    match source {
        Dispersion::ClusterStdDev => anchor.std_dev(),
        Dispersion::GlobalStandardError => population.standard_error(),
    }
}

/// Caps a cutoff at the largest anchor value, so the anchor cluster always
/// keeps at least its top measurement.
fn clamp_to_anchor(cutoff: f64, anchor: &ClusterStats) -> f64 {
    anchor.max().map_or(cutoff, |max| cutoff.min(max))
}

/// First-pass cutoff `anchor_mean - k * dispersion`.
pub(crate) fn primary_cutoff(
    config: &PartitionConfig,
    anchor_mean: f64,
    anchor: &ClusterStats,
    population: &ClusterStats,
) -> f64 {
    let spread = dispersion(config.dispersion, anchor, population);
    let cutoff = clamp_to_anchor(anchor_mean - config.multiplier * spread, anchor);
    trace!(anchor_mean, spread, k = config.multiplier, cutoff, "primary cutoff");
    cutoff
}

/// Refinement cutoff, with dispersion recomputed over the first-pass survivors.
pub(crate) fn refinement_cutoff(
    config: &PartitionConfig,
    anchor_mean: f64,
    anchor: &ClusterStats,
    survivors: &ClusterStats,
) -> Option<f64> {
    let refinement = config.refinement.as_ref()?;
    let spread = dispersion(refinement.dispersion, survivors, survivors);
    let cutoff = clamp_to_anchor(anchor_mean - refinement.multiplier * spread, anchor);
    trace!(anchor_mean, spread, k = refinement.multiplier, cutoff, "refinement cutoff");
    Some(cutoff)
}
