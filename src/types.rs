//! Core measurement types.

use serde::{Deserialize, Serialize};

/// Anything that has a scalar area, typically a closed contour.
pub trait Shape {
    /// Area enclosed by the shape.
    fn area(&self) -> f64;
}

impl Shape for f64 {
    #[inline]
    fn area(&self) -> f64 {
        *self
    }
}

impl<S: Shape + ?Sized> Shape for &S {
    #[inline]
    fn area(&self) -> f64 {
        (**self).area()
    }
}

/// A scalar area paired with an opaque handle to where it came from.
///
/// The partitioner reads `area` only; `source` is carried through untouched
/// so survivors can be mapped back to their contours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement<S> {
    /// Area of the source shape.
    pub area: f64,

    /// Handle to the source shape (an index or a borrowed contour).
    pub source: S,
}

impl<S> Measurement<S> {
    /// Create a new measurement.
    pub fn new(area: f64, source: S) -> Self {
        Self { area, source }
    }
}

impl Measurement<usize> {
    /// Wrap raw areas, using each value's position as its source.
    pub fn from_areas(areas: &[f64]) -> Vec<Self> {
        areas
            .iter()
            .enumerate()
            .map(|(i, &area)| Self::new(area, i))
            .collect()
    }
}

/// Measure every shape, borrowing it as the measurement source.
pub fn measure<S: Shape>(shapes: &[S]) -> Vec<Measurement<&S>> {
    shapes.iter().map(|s| Measurement::new(s.area(), s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_areas_uses_positions() {
        let m = Measurement::from_areas(&[3.0, 1.5]);
        assert_eq!(m.len(), 2);
        assert_eq!(m[0], Measurement::new(3.0, 0));
        assert_eq!(m[1].source, 1);
    }

    #[test]
    fn test_measure_borrows_sources() {
        let areas = [4.0f64, 9.0];
        let m = measure(&areas);
        assert_eq!(m[1].area, 9.0);
        assert!(std::ptr::eq(m[1].source, &areas[1]));
    }
}
