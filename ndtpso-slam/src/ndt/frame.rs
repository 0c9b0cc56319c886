//! Fixed-size NDT grid.

use std::borrow::Cow;

use log::trace;

use crate::core::{GridCoord, LaserScan, Point2D, Pose2D};

use super::cell::NdtCell;
use super::snapshot::{CellSnapshot, MapSnapshot};
use super::trajectory::TrajectoryRecord;

/// How a frame treats the points it receives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameKind {
    /// Long-lived map: only cell statistics persist.
    Reference,
    /// Per-scan frame: raw points are kept for evaluation and fusion.
    Local,
}

/// Square grid of [`NdtCell`]s centered on the world origin.
///
/// The extent is `[-size/2, size/2]` on both axes. A point exactly on any
/// edge is outside; points outside are dropped without error.
///
/// Cells live in one flat row-major vector:
/// ```text
/// index = y * cells_per_side + x
/// cell (x, y) covers [-size/2 + x*cell_side, -size/2 + (x+1)*cell_side)
/// ```
#[derive(Clone, Debug)]
pub struct NdtFrame {
    kind: FrameKind,
    size: f64,
    cell_side: f64,
    /// Pre-computed 1.0 / cell_side.
    inv_cell_side: f64,
    half_size: f64,
    cells_per_side: usize,
    window_radius: i32,
    origin: Pose2D,
    cells: Vec<NdtCell>,
    /// Raw points, only for [`FrameKind::Local`].
    points: Vec<Point2D>,
    /// Cells touched since the last cache refresh.
    stale: Vec<usize>,
    point_count: usize,
    trajectory: Vec<TrajectoryRecord>,
}

impl NdtFrame {
    /// Create an empty frame.
    ///
    /// `regularization` scales the covariance eigenvalue floor:
    /// `epsilon = regularization * cell_side²`.
    pub fn new(kind: FrameKind, size: f64, cell_side: f64, regularization: f64) -> Self {
        let cells_per_side = (size / cell_side).ceil().max(1.0) as usize;
        let epsilon = regularization * cell_side * cell_side;
        Self {
            kind,
            size,
            cell_side,
            inv_cell_side: 1.0 / cell_side,
            half_size: size / 2.0,
            cells_per_side,
            window_radius: 1,
            origin: Pose2D::identity(),
            cells: vec![NdtCell::new(epsilon); cells_per_side * cells_per_side],
            points: Vec::new(),
            stale: Vec::new(),
            point_count: 0,
            trajectory: Vec::new(),
        }
    }

    /// Empty reference frame.
    pub fn reference(size: f64, cell_side: f64, regularization: f64) -> Self {
        Self::new(FrameKind::Reference, size, cell_side, regularization)
    }

    /// Empty local frame.
    pub fn local(size: f64, cell_side: f64, regularization: f64) -> Self {
        Self::new(FrameKind::Local, size, cell_side, regularization)
    }

    /// Set how many neighbor rings are scored around a point's cell.
    ///
    /// 0 scores the containing cell only, 1 a 3x3 neighborhood.
    pub fn with_window_radius(mut self, radius: u32) -> Self {
        self.window_radius = radius as i32;
        self
    }

    // === Accessors ===

    /// Frame kind.
    #[inline]
    pub fn kind(&self) -> FrameKind {
        self.kind
    }

    /// Side length of the extent (meters).
    #[inline]
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Side length of one cell (meters).
    #[inline]
    pub fn cell_side(&self) -> f64 {
        self.cell_side
    }

    /// Cells per axis.
    #[inline]
    pub fn cells_per_side(&self) -> usize {
        self.cells_per_side
    }

    /// Neighbor rings scored by [`evaluate`](Self::evaluate).
    #[inline]
    pub fn window_radius(&self) -> u32 {
        self.window_radius as u32
    }

    /// Transform applied to every scan loaded into this frame.
    #[inline]
    pub fn origin(&self) -> Pose2D {
        self.origin
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[NdtCell] {
        &self.cells
    }

    /// Points inserted so far (in-bounds only).
    #[inline]
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    /// Whether no point has been inserted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.point_count == 0
    }

    /// Number of cells with a mean and covariance.
    pub fn scored_cell_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_scored()).count()
    }

    /// Trajectory records in arrival order.
    #[inline]
    pub fn trajectory(&self) -> &[TrajectoryRecord] {
        &self.trajectory
    }

    // === Coordinates ===

    /// Strictly inside the extent.
    #[inline]
    pub fn contains(&self, point: Point2D) -> bool {
        point.x > -self.half_size
            && point.x < self.half_size
            && point.y > -self.half_size
            && point.y < self.half_size
    }

    /// Cell containing `point`, or `None` outside the extent.
    #[inline]
    pub fn world_to_grid(&self, point: Point2D) -> Option<GridCoord> {
        if !self.contains(point) {
            return None;
        }
        // Rounding can land a point just inside the upper edge on the
        // next index.
        let last = self.cells_per_side as i32 - 1;
        let x = (((point.x + self.half_size) * self.inv_cell_side).floor() as i32).min(last);
        let y = (((point.y + self.half_size) * self.inv_cell_side).floor() as i32).min(last);
        Some(GridCoord::new(x, y))
    }

    /// World position of a cell's center.
    #[inline]
    pub fn grid_to_world(&self, coord: GridCoord) -> Point2D {
        Point2D::new(
            -self.half_size + (coord.x as f64 + 0.5) * self.cell_side,
            -self.half_size + (coord.y as f64 + 0.5) * self.cell_side,
        )
    }

    #[inline]
    fn coord_to_index(&self, coord: GridCoord) -> Option<usize> {
        let n = self.cells_per_side as i32;
        if coord.x >= 0 && coord.x < n && coord.y >= 0 && coord.y < n {
            Some(coord.y as usize * self.cells_per_side + coord.x as usize)
        } else {
            None
        }
    }

    #[inline]
    fn index_to_coord(&self, index: usize) -> GridCoord {
        GridCoord::new(
            (index % self.cells_per_side) as i32,
            (index / self.cells_per_side) as i32,
        )
    }

    /// Cell at `coord`, or `None` outside the grid.
    #[inline]
    pub fn cell_at(&self, coord: GridCoord) -> Option<&NdtCell> {
        self.coord_to_index(coord).map(|i| &self.cells[i])
    }

    // === Mutation ===

    /// Set the transform applied to subsequently loaded scans.
    ///
    /// Used for the sensor mounting offset.
    pub fn set_origin(&mut self, origin: Pose2D) {
        self.origin = origin;
    }

    /// Insert a world point. Returns false if it lies outside the extent.
    pub fn insert(&mut self, point: Point2D) -> bool {
        let Some(index) = self
            .world_to_grid(point)
            .and_then(|coord| self.coord_to_index(coord))
        else {
            return false;
        };

        let cell = &mut self.cells[index];
        if !cell.is_stale() {
            self.stale.push(index);
        }
        cell.insert(point);
        if self.kind == FrameKind::Local {
            self.points.push(point);
        }
        self.point_count += 1;
        true
    }

    /// Load a decoded scan through the frame's origin transform.
    ///
    /// Samples that are non-finite, non-positive or at/beyond `range_max`
    /// are skipped. Returns the number of points inserted.
    pub fn load_scan(&mut self, scan: &LaserScan) -> usize {
        let origin = self.origin;
        let mut inserted = 0;
        let mut outside = 0;
        for point in scan.points() {
            if self.insert(origin.transform_point(point)) {
                inserted += 1;
            } else {
                outside += 1;
            }
        }
        self.refresh();

        let invalid = scan.len() - inserted - outside;
        if invalid > 0 || outside > 0 {
            trace!(
                "[NdtFrame] load_scan: {} inserted, {} invalid, {} outside extent",
                inserted, invalid, outside
            );
        }
        inserted
    }

    /// Insert every point of `other`, transformed by `pose`, into this frame.
    ///
    /// Statistics only grow; nothing is removed or decayed.
    pub fn fuse(&mut self, pose: Pose2D, other: &NdtFrame) {
        let points = other.points();
        for &point in points.iter() {
            self.insert(pose.transform_point(point));
        }
        self.refresh();
    }

    /// Append a trajectory record.
    pub fn append_trajectory(&mut self, timestamp: f64, pose: Pose2D, auxiliary: Option<Pose2D>) {
        self.trajectory
            .push(TrajectoryRecord::new(timestamp, pose, auxiliary));
    }

    /// Recompute the cached Gaussians of cells touched since the last refresh.
    fn refresh(&mut self) {
        for index in self.stale.drain(..) {
            self.cells[index].refresh();
        }
    }

    // === Evaluation ===

    /// Points this frame contributes to evaluation and fusion.
    ///
    /// Local frames hand out their raw points; reference frames the means
    /// of their scored cells.
    pub fn points(&self) -> Cow<'_, [Point2D]> {
        match self.kind {
            FrameKind::Local => Cow::Borrowed(&self.points),
            FrameKind::Reference => {
                Cow::Owned(self.cells.iter().filter_map(NdtCell::mean).collect())
            }
        }
    }

    /// Score of one world point: the sum of the scores of the cells in the
    /// window around its containing cell.
    #[inline]
    pub fn score_point(&self, point: Point2D) -> f64 {
        let Some(center) = self.world_to_grid(point) else {
            return 0.0;
        };
        let w = self.window_radius;
        let mut score = 0.0;
        for dy in -w..=w {
            for dx in -w..=w {
                if let Some(index) = self.coord_to_index(center + GridCoord::new(dx, dy)) {
                    score += self.cells[index].score(point);
                }
            }
        }
        score
    }

    /// Sum of this frame's scores of `points` transformed by `pose`.
    ///
    /// Does not allocate.
    #[inline]
    pub fn evaluate_points(&self, pose: Pose2D, points: &[Point2D]) -> f64 {
        let (sin, cos) = pose.theta.sin_cos();
        points
            .iter()
            .map(|p| {
                self.score_point(Point2D::new(
                    pose.x + p.x * cos - p.y * sin,
                    pose.y + p.x * sin + p.y * cos,
                ))
            })
            .sum()
    }

    /// How well `other` matches this frame when placed at `pose`.
    ///
    /// Points that land outside the extent or in unscored cells add 0.
    pub fn evaluate(&self, pose: Pose2D, other: &NdtFrame) -> f64 {
        self.evaluate_points(pose, &other.points())
    }

    // === Export ===

    /// Copy of all non-empty cells and the trajectory.
    pub fn snapshot(&self) -> MapSnapshot {
        let cells = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(index, cell)| {
                let coord = self.index_to_coord(index);
                CellSnapshot {
                    coord,
                    center: self.grid_to_world(coord),
                    count: cell.count(),
                    mean: cell.mean(),
                    covariance: cell.covariance(),
                }
            })
            .collect();

        MapSnapshot {
            size: self.size,
            cell_side: self.cell_side,
            cells_per_side: self.cells_per_side,
            cells,
            trajectory: self.trajectory.clone(),
        }
    }
}
