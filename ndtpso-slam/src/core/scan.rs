//! Decoded range scans.

use serde::{Deserialize, Serialize};

use super::point::Point2D;

/// A planar range scan as delivered by the sensor driver.
///
/// Sample `i` was measured at bearing `angle_min + i * angle_increment`,
/// counter-clockwise from the sensor's +X axis.
///
/// # Angular Convention
///
/// ```text
///          0 (+X, Forward)
///           ↑
///           │
///  π/2 (+Y) ├───────→ -π/2 (-Y)
///   Left    │          Right
///           ↓
///         ±π (-X, Back)
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LaserScan {
    /// Range samples in meters.
    pub ranges: Vec<f32>,
    /// Bearing of the first sample (radians).
    pub angle_min: f32,
    /// Bearing step between samples (radians).
    pub angle_increment: f32,
    /// Ranges at or beyond this value are "no return".
    pub range_max: f32,
    /// Acquisition time in seconds.
    pub timestamp: f64,
}

impl LaserScan {
    /// Create a new scan.
    pub fn new(
        ranges: Vec<f32>,
        angle_min: f32,
        angle_increment: f32,
        range_max: f32,
        timestamp: f64,
    ) -> Self {
        Self {
            ranges,
            angle_min,
            angle_increment,
            range_max,
            timestamp,
        }
    }

    /// Number of samples, valid or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Is the scan empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Bearing of sample `index`.
    #[inline]
    pub fn angle_at(&self, index: usize) -> f64 {
        self.angle_min as f64 + index as f64 * self.angle_increment as f64
    }

    /// A sample is usable when finite, positive and below `range_max`.
    #[inline]
    pub fn is_valid_range(&self, range: f32) -> bool {
        range.is_finite() && range > 0.0 && range < self.range_max
    }

    /// Usable samples converted to Cartesian points in the sensor frame.
    pub fn points(&self) -> impl Iterator<Item = Point2D> + '_ {
        self.ranges
            .iter()
            .enumerate()
            .filter(|&(_, &range)| self.is_valid_range(range))
            .map(|(i, &range)| Point2D::from_polar(range as f64, self.angle_at(i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_invalid_samples_are_dropped() {
        let scan = LaserScan::new(
            vec![1.0, f32::NAN, 0.0, -1.0, 8.0, 9.0, f32::INFINITY, 2.0],
            0.0,
            0.1,
            8.0,
            0.0,
        );
        assert_eq!(scan.len(), 8);
        assert_eq!(scan.points().count(), 2);
    }

    #[test]
    fn test_polar_to_cartesian() {
        let scan = LaserScan::new(vec![1.0, 2.0], 0.0, FRAC_PI_2, 10.0, 0.0);
        let points: Vec<_> = scan.points().collect();
        assert_relative_eq!(points[0].x, 1.0, epsilon = 1e-7);
        assert_relative_eq!(points[0].y, 0.0, epsilon = 1e-7);
        assert_relative_eq!(points[1].x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(points[1].y, 2.0, epsilon = 1e-6);
    }
}
