//! Mid-point boundaries and per-pass cluster assignment.

use crate::config::Objective;
use crate::stats::ClusterStats;

/// Mid-points between adjacent cluster means.
///
/// `means` must be strictly ascending, which keeps the boundaries strictly
/// ascending too.
pub(crate) fn midpoints(means: &[f64]) -> Vec<f64> {
    means.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect()
}

/// Index of the cluster a value falls into: the first boundary it is below,
/// or the top cluster.
#[inline]
pub(crate) fn cluster_of(value: f64, boundaries: &[f64]) -> usize {
    boundaries
        .iter()
        .position(|&b| value < b)
        .unwrap_or(boundaries.len())
}

/// Assign every value to exactly one cluster and accumulate fresh statistics.
pub(crate) fn assign(values: &[f64], boundaries: &[f64]) -> Vec<ClusterStats> {
    let mut clusters = vec![ClusterStats::new(); boundaries.len() + 1];
    for &v in values {
        clusters[cluster_of(v, boundaries)].push(v);
    }
    clusters
}

/// Pooled objective over all clusters. Empty clusters contribute zero.
pub(crate) fn pooled_objective(clusters: &[ClusterStats], objective: Objective) -> f64 {
    clusters
        .iter()
        .filter(|c| !c.is_empty())
        .map(|c| match objective {
            Objective::WithinVariance => c.weighted_variance(),
            Objective::StandardError => c.standard_error(),
        })
        .sum()
}

/// Means for the next pass.
///
/// Non-empty clusters take their new mean. An empty cluster is re-seeded at
/// the nearest edge of whichever neighbour has the larger within-variance and
/// still has spread, so the neighbour gets split on the next pass. If neither
/// neighbour can be split the previous mean is kept.
pub(crate) fn next_means(previous: &[f64], clusters: &[ClusterStats]) -> Vec<f64> {
    let mut means: Vec<f64> = previous
        .iter()
        .zip(clusters)
        .map(|(&prev, c)| c.mean().unwrap_or(prev))
        .collect();

    for i in 0..clusters.len() {
        if !clusters[i].is_empty() {
            continue;
        }

        let lower = i
            .checked_sub(1)
            .map(|j| &clusters[j])
            .filter(|c| c.has_spread());
        let upper = clusters.get(i + 1).filter(|c| c.has_spread());

        let reseed = match (lower, upper) {
            (Some(lo), Some(hi)) if hi.weighted_variance() > lo.weighted_variance() => hi.min(),
            (Some(lo), _) => lo.max(),
            (None, Some(hi)) => hi.min(),
            (None, None) => None,
        };

        if let Some(value) = reseed {
            means[i] = value;
        }
    }

    means
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoints() {
        assert_eq!(midpoints(&[0.0, 10.0]), vec![5.0]);
        assert_eq!(midpoints(&[0.0, 10.0, 30.0]), vec![5.0, 20.0]);
    }

    #[test]
    fn test_cluster_of_is_strict_below_boundary() {
        let b = [5.0, 20.0];
        assert_eq!(cluster_of(4.9, &b), 0);
        assert_eq!(cluster_of(5.0, &b), 1);
        assert_eq!(cluster_of(19.0, &b), 1);
        assert_eq!(cluster_of(20.0, &b), 2);
        assert_eq!(cluster_of(1e9, &b), 2);
    }

    #[test]
    fn test_assign_covers_every_value_once() {
        let values = [1.0, 2.0, 6.0, 7.0, 25.0];
        let clusters = assign(&values, &[5.0, 20.0]);
        assert_eq!(clusters.len(), 3);
        let total: usize = clusters.iter().map(|c| c.count()).sum();
        assert_eq!(total, values.len());
        assert_eq!(clusters[0].count(), 2);
        assert_eq!(clusters[2].count(), 1);
    }

    #[test]
    fn test_empty_cluster_contributes_nothing() {
        let clusters = assign(&[1.0, 3.0, 100.0], &[50.0, 60.0]);
        assert!(clusters[1].is_empty());
        let objective = pooled_objective(&clusters, Objective::WithinVariance);
        assert!(objective.is_finite());
        assert_eq!(objective, 2.0);
        assert!(pooled_objective(&clusters, Objective::StandardError).is_finite());
    }

    #[test]
    fn test_next_means_reseeds_empty_cluster_from_wider_neighbour() {
        let values = [1.0, 1.0, 10.0, 10.0, 10.0, 100.0, 100.0];
        let clusters = assign(&values, &[17.0, 66.0]);
        assert!(clusters[1].is_empty());

        let means = next_means(&[1.0, 33.0, 100.0], &clusters);
        assert_eq!(means[1], 10.0);
        assert!(means[0] < means[1] && means[1] < means[2]);
    }

    #[test]
    fn test_next_means_keeps_previous_when_nothing_to_split() {
        let clusters = assign(&[1.0, 1.0, 100.0], &[40.0, 70.0]);
        let means = next_means(&[1.0, 50.0, 100.0], &clusters);
        assert_eq!(means, vec![1.0, 50.0, 100.0]);
    }
}
