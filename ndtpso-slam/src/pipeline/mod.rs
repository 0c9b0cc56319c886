//! Pipeline coordination: one scan in, one pose out.
//!
//! - [`NdtPsoSlam`]: serializes cycles over the reference frame and map
//!   accumulator
//! - [`PosePublisher`]: fixed-rate thread sending the latest pose on a
//!   channel
//! - [`CycleStats`]: cycle and matching rates

mod publisher;
mod slam;
mod stats;

pub use publisher::PosePublisher;
pub use slam::{CycleResult, NdtPsoSlam, PublishedPose};
pub use stats::CycleStats;
