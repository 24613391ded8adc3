//! Area partitioning into noise and signal clusters.
//!
//! This module provides the iterative mean-splitting partitioner and the
//! cutoff derived from its converged clusters.

mod boundaries;
mod cutoff;
mod partitioner;
mod result;

pub use partitioner::{partition, AreaPartitioner};
pub use result::{ClusterSummary, PartitionReport, PartitionResult};
