//! Point and grid coordinate types.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Integer cell indices inside an NDT frame.
///
/// `x` is the column, `y` the row. Indices are relative to the frame's
/// lower-left corner, so valid values are `0..cells_per_side`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCoord {
    /// Column index
    pub x: i32,
    /// Row index
    pub y: i32,
}

impl GridCoord {
    /// Create a new grid coordinate
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for GridCoord {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        GridCoord::new(self.x + other.x, self.y + other.y)
    }
}

/// Cartesian point in meters.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate in meters (forward)
    pub x: f64,
    /// Y coordinate in meters (left)
    pub y: f64,
}

impl Point2D {
    /// Create a new point
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Create a point from polar coordinates (range, bearing).
    #[inline]
    pub fn from_polar(range: f64, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(range * cos, range * sin)
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &Point2D) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance (avoids sqrt)
    #[inline]
    pub fn distance_squared(&self, other: &Point2D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Length of this point as a vector from origin
    #[inline]
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl Add for Point2D {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Point2D::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point2D {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Point2D::new(self.x - other.x, self.y - other.y)
    }
}
