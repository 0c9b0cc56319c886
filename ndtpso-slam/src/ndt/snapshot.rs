//! Read-only copies of frame statistics for export.

use serde::{Deserialize, Serialize};

use crate::core::{Covariance2D, GridCoord, Point2D};

use super::TrajectoryRecord;

/// Statistics of one non-empty cell.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellSnapshot {
    /// Grid index inside the frame.
    pub coord: GridCoord,
    /// World position of the cell center.
    pub center: Point2D,
    /// Points accumulated.
    pub count: u32,
    /// Mean, for scored cells.
    pub mean: Option<Point2D>,
    /// Regularized covariance, for scored cells.
    pub covariance: Option<Covariance2D>,
}

/// A consistent copy of a frame's cells and trajectory.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MapSnapshot {
    /// Side length of the square extent (meters).
    pub size: f64,
    /// Side length of one cell (meters).
    pub cell_side: f64,
    /// Cells per axis.
    pub cells_per_side: usize,
    /// Non-empty cells in row-major order.
    pub cells: Vec<CellSnapshot>,
    /// Trajectory records in arrival order.
    pub trajectory: Vec<TrajectoryRecord>,
}

impl MapSnapshot {
    /// Total points accumulated over all cells.
    pub fn total_points(&self) -> u64 {
        self.cells.iter().map(|c| c.count as u64).sum()
    }

    /// Cells with a mean and covariance.
    pub fn scored_cells(&self) -> impl Iterator<Item = &CellSnapshot> {
        self.cells.iter().filter(|c| c.mean.is_some())
    }
}
