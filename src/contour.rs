//! Closed contours as produced by an upstream contour extractor.
//!
//! Only the measurements the partitioner needs are computed here; contour
//! extraction itself happens elsewhere.

use crate::types::Shape;
use serde::{Deserialize, Serialize};

/// A closed polyline; the last point connects back to the first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contour {
    points: Vec<(f64, f64)>,
}

impl Contour {
    /// Create a contour from its vertices.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Vertices in traversal order.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True for a contour without points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Enclosed area (shoelace formula), independent of orientation.
    pub fn area(&self) -> f64 {
        if self.points.len() < 3 {
            return 0.0;
        }
        let twice: f64 = self
            .edges()
            .map(|((x0, y0), (x1, y1))| x0 * y1 - x1 * y0)
            .sum();
        twice.abs() / 2.0
    }

    /// Length of the closed boundary.
    pub fn perimeter(&self) -> f64 {
        if self.points.len() < 2 {
            return 0.0;
        }
        self.edges()
            .map(|((x0, y0), (x1, y1))| (x1 - x0).hypot(y1 - y0))
            .sum()
    }

    fn edges(&self) -> impl Iterator<Item = ((f64, f64), (f64, f64))> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }
}

impl Shape for Contour {
    fn area(&self) -> f64 {
        Contour::area(self)
    }
}

/// Vertex-count prefilter applied before measuring.
///
/// Contours with fewer than `min_points` vertices cannot carry a fitted
/// ellipse; contours longer than `max_points` are background structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContourFilter {
    pub min_points: usize,
    pub max_points: usize,
}

impl Default for ContourFilter {
    fn default() -> Self {
        Self {
            min_points: 5,
            max_points: usize::MAX,
        }
    }
}

impl ContourFilter {
    /// Filter sized for an image: at most `min(width, height) / 8` vertices.
    pub fn for_image(width: usize, height: usize) -> Self {
        Self {
            max_points: width.min(height) / 8,
            ..Default::default()
        }
    }

    /// Whether the contour is kept.
    pub fn accepts(&self, contour: &Contour) -> bool {
        (self.min_points..=self.max_points).contains(&contour.len())
    }

    /// Contours that pass the filter, borrowed.
    pub fn apply<'a>(&self, contours: &'a [Contour]) -> Vec<&'a Contour> {
        contours.iter().filter(|c| self.accepts(c)).collect()
    }
}
