//! Utility functions.

pub(crate) mod parallel;

pub use parallel::{maybe_parallel_map_threshold, parallel_map};
