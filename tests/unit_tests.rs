//! Integration tests for the area-partition library.

use approx::assert_relative_eq;
use area_partition::prelude::*;
use area_partition::ErrorCode;

const CELLS: [f64; 10] = [1.0, 1.0, 1.0, 1.0, 1.0, 50.0, 52.0, 48.0, 51.0, 49.0];

fn sorted(mut v: Vec<f64>) -> Vec<f64> {
    v.sort_by(|a, b| a.partial_cmp(b).unwrap());
    v
}

mod example_tests {
    use super::*;

    #[test]
    fn test_binary_cells_and_noise() {
        let config = PartitionConfig::binary().with_multiplier(2.0);
        let result = AreaPartitioner::new(config).partition_areas(&CELLS).unwrap();

        assert_eq!(result.cluster_means.len(), 2);
        assert_relative_eq!(result.cluster_means[0], 1.0, epsilon = 1e-9);
        assert_relative_eq!(result.cluster_means[1], 50.0, epsilon = 1e-9);
        assert!(result.cutoff > 1.0 && result.cutoff < 48.0);
        assert_eq!(sorted(result.survivor_areas()), vec![48.0, 49.0, 50.0, 51.0, 52.0]);
    }

    #[test]
    fn test_single_element() {
        let result = partition(&[10.0], PartitionMode::Binary).unwrap();
        assert_eq!(result.cutoff, 10.0);
        assert_eq!(result.survivor_areas(), vec![10.0]);
        assert_eq!(result.num_rejected(), 0);
    }

    #[test]
    fn test_empty_input() {
        for mode in [PartitionMode::Binary, PartitionMode::Ternary] {
            let err = partition(&[], mode).unwrap_err();
            assert_eq!(err.code(), ErrorCode::InvalidArgument);
        }
    }

    #[test]
    fn test_ternary_three_groups() {
        let areas = [1.0, 1.0, 10.0, 10.0, 10.0, 100.0, 100.0];
        let config = PartitionConfig::ternary().with_multiplier(1.0);
        let result = AreaPartitioner::new(config).partition_areas(&areas).unwrap();

        assert_relative_eq!(result.cluster_means[0], 1.0);
        assert_relative_eq!(result.cluster_means[1], 10.0);
        assert_relative_eq!(result.cluster_means[2], 100.0);
        assert_eq!(sorted(result.survivor_areas()), vec![10.0, 10.0, 10.0, 100.0, 100.0]);
    }
}

mod property_tests {
    use super::*;

    #[test]
    fn test_survivors_are_subset_of_input() {
        let areas = [3.0, 120.0, 2.5, 118.0, 4.0, 125.0, 0.0, 130.0, 90.0];
        for mode in [PartitionMode::Binary, PartitionMode::Ternary] {
            let result = partition(&areas, mode).unwrap();
            assert!(result.num_iterations <= 100);
            for m in &result.survivors {
                assert_eq!(areas[m.source], m.area);
                assert!(m.area >= result.cutoff);
            }
        }
    }

    #[test]
    fn test_second_pass_on_survivors_is_noop() {
        let config = PartitionConfig::binary().with_multiplier(2.0);
        let partitioner = AreaPartitioner::new(config);

        let first = partitioner.partition_areas(&CELLS).unwrap();
        let second = partitioner.partition_areas(&first.survivor_areas()).unwrap();

        assert!(!second.noise_separated);
        assert_eq!(second.survivor_areas(), first.survivor_areas());
    }

    #[test]
    fn test_larger_multiplier_lowers_cutoff() {
        let areas = [2.0, 3.0, 2.0, 40.0, 44.0, 47.0, 50.0, 52.0, 55.0, 61.0];
        let mut prev_cutoff = f64::INFINITY;
        let mut prev_count = 0;

        for k in [0.0, 0.5, 1.0, 2.0, 2.35, 3.0] {
            let config = PartitionConfig::binary().with_multiplier(k);
            let result = AreaPartitioner::new(config).partition_areas(&areas).unwrap();
            assert!(result.cutoff <= prev_cutoff);
            assert!(result.num_survivors() >= prev_count);
            prev_cutoff = result.cutoff;
            prev_count = result.num_survivors();
        }
    }

    #[test]
    fn test_boundaries_separate_clusters() {
        let areas = [1.0, 2.0, 3.0, 20.0, 21.0, 22.0, 300.0, 310.0];
        let result = partition(&areas, PartitionMode::Ternary).unwrap();

        let total: usize = result.clusters.iter().map(|c| c.count).sum();
        assert_eq!(total, areas.len());
        for w in result.cluster_means.windows(2) {
            assert!(w[0] < w[1]);
        }
    }
}

mod config_tests {
    use super::*;

    #[test]
    fn test_global_standard_error_dispersion() {
        let config = PartitionConfig::binary()
            .with_dispersion(Dispersion::GlobalStandardError)
            .with_multiplier(3.0);
        let result = AreaPartitioner::new(config).partition_areas(&CELLS).unwrap();

        let global = AreaSummary::from_values(&CELLS).unwrap();
        assert_relative_eq!(result.cutoff, 50.0 - 3.0 * global.standard_error, epsilon = 1e-9);
    }

    #[test]
    fn test_refinement_reported() {
        let config = PartitionConfig::binary()
            .with_refinement(RefinementConfig::new(1.0).with_dispersion(Dispersion::ClusterStdDev));
        let result = AreaPartitioner::new(config).partition_areas(&CELLS).unwrap();

        let refined = result.refinement_cutoff.unwrap();
        assert!(result.cutoff >= refined);
        assert!(result.survivors.iter().all(|m| m.area >= refined));
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "mode": "ternary",
            "objective": "standard_error",
            "dispersion": "global_standard_error",
            "multiplier": 2.35,
            "refinement": { "multiplier": 1.0, "dispersion": "cluster_std_dev" }
        }"#;
        let config = PartitionConfig::from_json(json).unwrap();
        assert_eq!(config.mode, PartitionMode::Ternary);
        assert_eq!(config.objective, Objective::StandardError);
        assert_eq!(config.max_iterations, 100);
        assert!(AreaPartitioner::new(config).partition_areas(&CELLS).is_ok());
    }

    #[test]
    fn test_report_serializes() {
        let result = partition(&CELLS, PartitionMode::Binary).unwrap();
        let report = result.report();
        assert_eq!(report.num_survivors, 5);
        assert_eq!(report.num_rejected, 5);

        let json = serde_json::to_string(&report).unwrap();
        let back: PartitionReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.cluster_means, report.cluster_means);
        assert_eq!(back.survivor_summary.unwrap().min, 48.0);
    }
}

mod contour_tests {
    use super::*;

    fn disc(radius: f64) -> Contour {
        Contour::new(
            (0..24)
                .map(|i| {
                    let t = i as f64 / 24.0 * std::f64::consts::TAU;
                    (radius * t.cos(), radius * t.sin())
                })
                .collect(),
        )
    }

    #[test]
    fn test_partition_contours_keeps_sources() {
        let mut contours: Vec<Contour> = [1.0, 0.8, 1.1, 0.9].iter().map(|&r| disc(r)).collect();
        contours.extend([9.0, 9.5, 10.0, 10.5, 11.0].iter().map(|&r| disc(r)));
        contours.push(Contour::new(vec![(0.0, 0.0), (100.0, 0.0), (100.0, 100.0)]));

        let kept = ContourFilter::default().apply(&contours);
        assert_eq!(kept.len(), 9);

        let measurements = measure(&kept);
        let result = AreaPartitioner::default().partition(&measurements).unwrap();
        assert_eq!(result.num_survivors(), 5);
        for m in &result.survivors {
            assert_relative_eq!(m.source.area(), m.area);
            assert!(m.source.perimeter() > 50.0);
        }
    }
}
