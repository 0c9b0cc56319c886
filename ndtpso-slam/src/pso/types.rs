//! Alignment result types.

use crate::core::Pose2D;

/// Result of one swarm alignment.
#[derive(Clone, Debug, PartialEq)]
pub struct AlignmentResult {
    /// Accepted pose. Equals the previous pose unless `improved`.
    pub pose: Pose2D,
    /// Offset applied to the previous pose (identity unless `improved`).
    pub offset: Pose2D,
    /// Score of `pose`.
    pub score: f64,
    /// Score of the previous pose (zero offset).
    pub baseline_score: f64,
    /// Whether the swarm found a strictly better pose.
    pub improved: bool,
    /// Number of candidate poses scored.
    pub evaluations: usize,
    /// The local frame had no points.
    pub degenerate: bool,
}

impl AlignmentResult {
    /// Result for an input that could not be aligned.
    pub fn degenerate(previous: Pose2D) -> Self {
        Self {
            pose: previous,
            offset: Pose2D::identity(),
            score: 0.0,
            baseline_score: 0.0,
            improved: false,
            evaluations: 0,
            degenerate: true,
        }
    }
}
