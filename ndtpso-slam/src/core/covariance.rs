//! Symmetric 2x2 matrices for point distributions.
//!
//! Represents
//! ```text
//! | xx  xy |
//! | xy  yy |
//! ```
//! Used both for covariances and for their inverses (information matrices).

use serde::{Deserialize, Serialize};

use super::point::Point2D;

/// Symmetric 2x2 matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Covariance2D {
    /// Variance along X
    pub xx: f64,
    /// Covariance between X and Y
    pub xy: f64,
    /// Variance along Y
    pub yy: f64,
}

impl Covariance2D {
    /// Create a matrix from its three distinct elements.
    #[inline]
    pub fn new(xx: f64, xy: f64, yy: f64) -> Self {
        Self { xx, xy, yy }
    }

    /// Determinant.
    #[inline]
    pub fn determinant(&self) -> f64 {
        self.xx * self.yy - self.xy * self.xy
    }

    /// Trace.
    #[inline]
    pub fn trace(&self) -> f64 {
        self.xx + self.yy
    }

    /// Eigenvalues as `(smallest, largest)`.
    ///
    /// Closed form for symmetric 2x2 matrices; always real.
    #[inline]
    pub fn eigenvalues(&self) -> (f64, f64) {
        let half_trace = 0.5 * self.trace();
        let half_diff = 0.5 * (self.xx - self.yy);
        let radius = (half_diff * half_diff + self.xy * self.xy).sqrt();
        (half_trace - radius, half_trace + radius)
    }

    /// Add `value` to both diagonal elements.
    #[inline]
    pub fn add_diagonal(&self, value: f64) -> Self {
        Self::new(self.xx + value, self.xy, self.yy + value)
    }

    /// Add `epsilon * I` if the smallest eigenvalue is below `epsilon`.
    ///
    /// Colinear points give a zero eigenvalue; the inflated matrix stays
    /// invertible while keeping the principal axes.
    #[inline]
    pub fn regularized(&self, epsilon: f64) -> Self {
        let (min_eigenvalue, _) = self.eigenvalues();
        if min_eigenvalue < epsilon {
            self.add_diagonal(epsilon)
        } else {
            *self
        }
    }

    /// Inverse, if the matrix is positive definite.
    ///
    /// Returns `None` for singular, indefinite or non-finite matrices.
    #[inline]
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if !det.is_finite() || det <= f64::MIN_POSITIVE || self.xx <= 0.0 {
            return None;
        }
        let inv_det = 1.0 / det;
        Some(Self::new(
            self.yy * inv_det,
            -self.xy * inv_det,
            self.xx * inv_det,
        ))
    }

    /// Quadratic form `dᵗ M d`.
    #[inline]
    pub fn quadratic_form(&self, d: Point2D) -> f64 {
        self.xx * d.x * d.x + 2.0 * self.xy * d.x * d.y + self.yy * d.y * d.y
    }
}
