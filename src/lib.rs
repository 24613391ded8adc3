//! # area-partition
//!
//! Threshold-free separation of object contours from noise by area.
//!
//! Contour areas found in a segmented image (cells under a microscope,
//! particles, blobs) are split into two or three clusters by iteratively
//! moving mid-point boundaries between cluster means. The lowest cluster is
//! treated as noise, and a cutoff is placed a configurable number of
//! dispersions below the next cluster up.
//!
//! ## Quick Start
//!
//! ```rust
//! use area_partition::prelude::*;
//!
//! let areas = vec![1.0, 1.0, 10.0, 10.0, 10.0, 100.0, 100.0];
//! let config = PartitionConfig::ternary().with_multiplier(1.0);
//! let result = AreaPartitioner::new(config).partition_areas(&areas).unwrap();
//!
//! assert_eq!(result.survivor_areas(), vec![10.0, 10.0, 10.0, 100.0, 100.0]);
//! ```
//!
//! ## Measuring Contours
//!
//! ```rust
//! use area_partition::prelude::*;
//!
//! let contours: Vec<Contour> = (1..=12)
//!     .map(|r| {
//!         let r = if r <= 4 { 1.0 } else { 10.0 + r as f64 * 0.1 };
//!         Contour::new((0..16).map(|i| {
//!             let t = i as f64 / 16.0 * std::f64::consts::TAU;
//!             (r * t.cos(), r * t.sin())
//!         }).collect())
//!     })
//!     .collect();
//!
//! let kept = ContourFilter::default().apply(&contours);
//! let result = AreaPartitioner::default().partition(&measure(&kept)).unwrap();
//! assert_eq!(result.num_survivors(), 8);
//! ```
//!
//! ## Module Overview
//!
//! - [`partitioning`]: the partitioner and its results
//! - [`contour`]: closed contours and the vertex-count prefilter
//! - [`stats`]: cluster statistics and area summaries
//! - [`input`]: reading area lists from text files

pub mod contour;
pub mod input;
pub mod partitioning;
pub mod stats;
pub mod utils;

mod config;
mod error;
mod types;

pub use config::{Dispersion, Objective, PartitionConfig, PartitionMode, RefinementConfig};
pub use error::{ErrorCode, PartitionError, Result};
pub use partitioning::{partition, AreaPartitioner, ClusterSummary, PartitionReport, PartitionResult};
pub use types::{measure, Measurement, Shape};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{Dispersion, Objective, PartitionConfig, PartitionMode, RefinementConfig};
    pub use crate::contour::{Contour, ContourFilter};
    pub use crate::error::{PartitionError, Result};
    pub use crate::input::{parse_areas, read_areas};
    pub use crate::partitioning::{partition, AreaPartitioner, PartitionReport, PartitionResult};
    pub use crate::stats::{AreaSummary, ClusterStats};
    pub use crate::types::{measure, Measurement, Shape};
}
