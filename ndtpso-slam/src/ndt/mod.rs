//! Normal-Distributions-Transform grids.
//!
//! A frame partitions a square extent into cells. Each cell summarizes the
//! points that fell into it as a 2-D Gaussian (mean + covariance), which
//! gives a smooth, differentiable-looking score surface for alignment:
//!
//! ```text
//! score(p) = Σ_cells exp(-½ (p - μ)ᵗ Σ⁻¹ (p - μ))
//! ```
//!
//! - [`NdtCell`]: running sums, mean/covariance once 3 points arrived
//! - [`NdtFrame`]: flat cell arena with load, evaluate and fuse
//! - [`TrajectoryRecord`]: pose history kept by the map accumulator
//! - [`MapSnapshot`]: read-only copy for export

mod cell;
mod frame;
mod snapshot;
mod trajectory;

pub use cell::{CellGaussian, MIN_POINTS_PER_CELL, NdtCell};
pub use frame::{FrameKind, NdtFrame};
pub use snapshot::{CellSnapshot, MapSnapshot};
pub use trajectory::TrajectoryRecord;
