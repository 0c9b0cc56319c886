//! Scan-to-map pipeline coordinator.

use std::time::Instant;

use log::{debug, info, warn};
use parking_lot::{Mutex, RwLock};

use crate::config::NdtPsoConfig;
use crate::core::{LaserScan, Pose2D};
use crate::error::Result;
use crate::ndt::{MapSnapshot, NdtFrame};
use crate::pso::{AlignmentResult, SwarmAligner};

use super::stats::CycleStats;

/// Log the rate summary every this many cycles.
const STATS_LOG_INTERVAL: u64 = 100;

/// Latest pose estimate, readable while a cycle is in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PublishedPose {
    /// Estimated base pose.
    pub pose: Pose2D,
    /// Match score of `pose` (0 before the first alignment).
    pub score: f64,
    /// Timestamp of the scan that produced `pose`.
    pub timestamp: f64,
    /// Cycles completed when this pose was published.
    pub cycle: u64,
}

/// Outcome of one [`NdtPsoSlam::submit_scan`] call.
#[derive(Clone, Debug)]
pub struct CycleResult {
    /// Accepted pose.
    pub pose: Pose2D,
    /// Match score of `pose` against the reference frame.
    pub score: f64,
    /// Zero-based index of this cycle.
    pub cycle: u64,
    /// Scan points inserted into the local frame.
    pub points: usize,
    /// Whether the map accumulator was updated this cycle.
    pub map_updated: bool,
    /// Alignment details. `None` on the first cycle.
    pub alignment: Option<AlignmentResult>,
}

/// Pose chain of the cycle in progress. Held for a whole cycle, so
/// cycles run one at a time.
struct SlamState {
    previous: Pose2D,
    previous_auxiliary: Option<Pose2D>,
    cycle: u64,
}

/// Incremental NDT mapping with particle swarm alignment.
///
/// Each submitted scan becomes a fresh local frame, is aligned against the
/// reference frame starting from the previous pose, and is then fused into
/// the reference frame at the accepted pose.
///
/// ```text
/// scan ──► local frame ──► SwarmAligner ──► pose ──┬──► reference.fuse
///                               ▲                  ├──► map.fuse (every N)
///                         reference frame          ├──► trajectory
///                                                  └──► published pose
/// ```
///
/// `submit_scan` may be called from several threads; cycles run one at a
/// time in lock acquisition order. The frames have their own locks, taken
/// only while fusing, so [`current_pose`](Self::current_pose), the
/// snapshots and [`stats`](Self::stats) never wait for an alignment.
pub struct NdtPsoSlam {
    config: NdtPsoConfig,
    aligner: SwarmAligner,
    state: Mutex<SlamState>,
    /// Written only by the fuse step; the swarm reads it concurrently with
    /// exporters.
    reference: RwLock<NdtFrame>,
    /// Exported map, updated every `map.update_interval` cycles.
    map: Mutex<NdtFrame>,
    stats: Mutex<CycleStats>,
    published: RwLock<PublishedPose>,
}

impl NdtPsoSlam {
    /// Create a pipeline starting at the origin.
    pub fn new(config: NdtPsoConfig) -> Result<Self> {
        Self::with_initial_pose(config, Pose2D::identity())
    }

    /// Create a pipeline starting at `initial_pose`.
    pub fn with_initial_pose(config: NdtPsoConfig, initial_pose: Pose2D) -> Result<Self> {
        config.validate()?;
        let aligner = SwarmAligner::new(config.pso.clone())?;

        info!(
            "[NdtPsoSlam] Frame {:.1}m / {:.2}m cells, map {:.1}m / {:.2}m cells, {} particles x {} iterations on {} threads",
            config.ndt.frame_size,
            config.ndt.cell_side,
            config.map.size,
            config.map.cell_side,
            config.pso.population_size,
            config.pso.iterations,
            aligner.threads()
        );

        let reference = NdtFrame::reference(
            config.ndt.frame_size,
            config.ndt.cell_side,
            config.ndt.regularization,
        )
        .with_window_radius(config.ndt.window_radius);
        let map = NdtFrame::reference(
            config.map.size,
            config.map.cell_side,
            config.ndt.regularization,
        )
        .with_window_radius(config.ndt.window_radius);

        Ok(Self {
            state: Mutex::new(SlamState {
                previous: initial_pose,
                previous_auxiliary: None,
                cycle: 0,
            }),
            reference: RwLock::new(reference),
            map: Mutex::new(map),
            stats: Mutex::new(CycleStats::new()),
            published: RwLock::new(PublishedPose {
                pose: initial_pose,
                ..Default::default()
            }),
            aligner,
            config,
        })
    }

    /// Configuration in use.
    pub fn config(&self) -> &NdtPsoConfig {
        &self.config
    }

    /// Process one scan.
    ///
    /// `auxiliary` is an optional absolute pose from another source (wheel
    /// odometry). Its motion since the previous scan seeds the swarm, and
    /// it is stored in the trajectory record.
    pub fn submit_scan(&self, scan: &LaserScan, auxiliary: Option<Pose2D>) -> CycleResult {
        let mut state = self.state.lock();
        let started = Instant::now();
        let cycle = state.cycle;

        let mut local = NdtFrame::local(
            self.config.ndt.frame_size,
            self.config.ndt.cell_side,
            self.config.ndt.regularization,
        );
        local.set_origin(self.config.sensor.mount_pose());
        let points = local.load_scan(scan);

        let (pose, score, alignment) = if cycle == 0 {
            (state.previous, 0.0, None)
        } else {
            let prediction = match (state.previous_auxiliary, auxiliary) {
                (Some(before), Some(now)) => Some(before.relative_to(now)),
                _ => None,
            };
            let matching_started = Instant::now();
            let result = self.aligner.align(
                &self.reference.read(),
                &local,
                state.previous,
                prediction,
            );
            let matching = matching_started.elapsed();

            if result.degenerate {
                warn!(
                    "[NdtPsoSlam] Cycle {}: no usable points in scan, keeping {}",
                    cycle, result.pose
                );
            }
            self.stats.lock().record_alignment(
                started.elapsed(),
                matching,
                result.improved,
                result.degenerate,
            );
            (result.pose, result.score, Some(result))
        };
        if alignment.is_none() {
            self.stats.lock().record_cycle(started.elapsed());
        }

        let reference_cells = {
            let mut reference = self.reference.write();
            reference.fuse(pose, &local);
            reference.scored_cell_count()
        };
        let map_updated = cycle % self.config.map.update_interval == 0;
        {
            let mut map = self.map.lock();
            if map_updated {
                map.fuse(pose, &local);
            }
            map.append_trajectory(scan.timestamp, pose, auxiliary);
        }

        state.previous = pose;
        if auxiliary.is_some() {
            state.previous_auxiliary = auxiliary;
        }
        state.cycle += 1;

        *self.published.write() = PublishedPose {
            pose,
            score,
            timestamp: scan.timestamp,
            cycle: state.cycle,
        };

        debug!(
            "[NdtPsoSlam] Cycle {}: {} points, pose {}, score {:.3}, {} reference cells{}",
            cycle,
            points,
            pose,
            score,
            reference_cells,
            if map_updated { ", map updated" } else { "" }
        );
        if state.cycle % STATS_LOG_INTERVAL == 0 {
            info!("[NdtPsoSlam] {}", self.stats.lock().summary());
        }

        CycleResult {
            pose,
            score,
            cycle,
            points,
            map_updated,
            alignment,
        }
    }

    /// Latest published pose. Does not wait for a running cycle.
    pub fn current_pose(&self) -> PublishedPose {
        *self.published.read()
    }

    /// Cycles completed. Does not wait for a running cycle.
    pub fn cycle_count(&self) -> u64 {
        self.published.read().cycle
    }

    /// Copy of the cycle statistics.
    pub fn stats(&self) -> CycleStats {
        self.stats.lock().clone()
    }

    /// Map accumulator cells and the full trajectory.
    ///
    /// Waits only for an in-progress map update, never for an alignment.
    /// A cycle still aligning is not included yet.
    pub fn export_snapshot(&self) -> MapSnapshot {
        self.map.lock().snapshot()
    }

    /// Reference frame cells (no trajectory).
    pub fn export_reference_snapshot(&self) -> MapSnapshot {
        self.reference.read().snapshot()
    }
}
