//! Gaussian cell statistics.

use crate::core::{Covariance2D, Point2D};

/// Cells with fewer points have no mean or covariance and score 0.
pub const MIN_POINTS_PER_CELL: u32 = 3;

/// Mean and inverse covariance of a scored cell.
///
/// Evaluation only needs these two; they are computed once per mutation
/// instead of once per scored point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellGaussian {
    /// Cell mean (world frame).
    pub mean: Point2D,
    /// Inverse of the regularized covariance.
    pub information: Covariance2D,
}

impl CellGaussian {
    /// Unnormalized density `exp(-½ dᵗ Σ⁻¹ d)` with `d = point - mean`.
    #[inline]
    pub fn score(&self, point: Point2D) -> f64 {
        let q = self.information.quadratic_form(point - self.mean);
        // Guards against NaN from a degenerate information matrix.
        if q.is_finite() { (-0.5 * q).exp() } else { 0.0 }
    }
}

#[derive(Clone, Copy, Debug, Default)]
enum GaussianCache {
    Stale,
    #[default]
    Unscored,
    Ready(CellGaussian),
}

/// Running sufficient statistics of the points that fell into one cell.
///
/// The sums are never shrunk: cells only grow until the owning frame is
/// dropped.
#[derive(Clone, Debug, Default)]
pub struct NdtCell {
    count: u32,
    sum_x: f64,
    sum_y: f64,
    sum_xx: f64,
    sum_xy: f64,
    sum_yy: f64,
    /// Floor for the smallest covariance eigenvalue.
    epsilon: f64,
    cache: GaussianCache,
}

impl NdtCell {
    /// Empty cell whose covariance is regularized with `epsilon`.
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            ..Default::default()
        }
    }

    /// Accumulate one point.
    #[inline]
    pub fn insert(&mut self, point: Point2D) {
        self.count += 1;
        self.sum_x += point.x;
        self.sum_y += point.y;
        self.sum_xx += point.x * point.x;
        self.sum_xy += point.x * point.y;
        self.sum_yy += point.y * point.y;
        self.cache = GaussianCache::Stale;
    }

    /// Number of points accumulated.
    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Whether no point has been inserted yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Whether the cell has enough points to be scored.
    #[inline]
    pub fn is_scored(&self) -> bool {
        self.count >= MIN_POINTS_PER_CELL
    }

    /// Mean of the accumulated points.
    pub fn mean(&self) -> Option<Point2D> {
        if !self.is_scored() {
            return None;
        }
        let n = self.count as f64;
        Some(Point2D::new(self.sum_x / n, self.sum_y / n))
    }

    /// Population covariance, before regularization.
    pub fn raw_covariance(&self) -> Option<Covariance2D> {
        let mean = self.mean()?;
        let n = self.count as f64;
        Some(Covariance2D::new(
            self.sum_xx / n - mean.x * mean.x,
            self.sum_xy / n - mean.x * mean.y,
            self.sum_yy / n - mean.y * mean.y,
        ))
    }

    /// Regularized covariance.
    ///
    /// `epsilon * I` is added whenever the smallest eigenvalue falls below
    /// `epsilon`, so colinear points still give an invertible matrix.
    pub fn covariance(&self) -> Option<Covariance2D> {
        self.raw_covariance().map(|c| c.regularized(self.epsilon))
    }

    /// Mean and inverse covariance, or `None` if unscored or singular.
    pub fn gaussian(&self) -> Option<CellGaussian> {
        let mean = self.mean()?;
        let information = self.covariance()?.inverse()?;
        Some(CellGaussian { mean, information })
    }

    /// Score of a world point against this cell, in `[0, 1]`.
    ///
    /// 0 when the cell has fewer than [`MIN_POINTS_PER_CELL`] points or its
    /// covariance cannot be inverted.
    #[inline]
    pub fn score(&self, point: Point2D) -> f64 {
        match self.cache {
            GaussianCache::Ready(gaussian) => gaussian.score(point),
            GaussianCache::Unscored => 0.0,
            GaussianCache::Stale => self.gaussian().map_or(0.0, |g| g.score(point)),
        }
    }

    /// Recompute the cached Gaussian if an insert invalidated it.
    pub(crate) fn refresh(&mut self) {
        if matches!(self.cache, GaussianCache::Stale) {
            self.cache = match self.gaussian() {
                Some(g) => GaussianCache::Ready(g),
                None => GaussianCache::Unscored,
            };
        }
    }

    /// Whether the cached Gaussian needs recomputing.
    #[inline]
    pub(crate) fn is_stale(&self) -> bool {
        matches!(self.cache, GaussianCache::Stale)
    }
}
