//! End-to-end alignment tests on simulated room scans.

mod common;

use common::{BEAMS_DEFAULT as BEAMS, Room, assert_poses_close, init_logging, seeded_config};
use ndtpso_slam::{NdtPsoSlam, Pose2D};

/// Recovery tolerance: 5cm translation.
const TRANS_TOL_M: f64 = 0.05;

/// Recovery tolerance: ~1.1 degrees rotation.
const ROT_TOL_RAD: f64 = 0.02;

// ============================================================================
// Single-step recovery
// ============================================================================

#[test]
fn test_recovers_one_meter_translation() {
    init_logging();
    let room = Room::furnished();
    let slam = NdtPsoSlam::new(seeded_config(200, 100, [1.5, 1.5, 0.15])).unwrap();

    let first = slam.submit_scan(&room.scan(Pose2D::identity(), BEAMS, 0.0), None);
    assert_eq!(first.pose, Pose2D::identity());

    let truth = Pose2D::new(1.0, 0.0, 0.0);
    let second = slam.submit_scan(&room.scan(truth, BEAMS, 0.1), None);

    let alignment = second.alignment.expect("second cycle aligns");
    assert!(alignment.improved);
    assert!(alignment.score > alignment.baseline_score);
    assert_poses_close(&second.pose, &truth, TRANS_TOL_M, ROT_TOL_RAD);
    assert_eq!(slam.current_pose().pose, second.pose);
}

#[test]
fn test_recovers_rotation_and_translation() {
    init_logging();
    let room = Room::furnished();
    let slam = NdtPsoSlam::new(seeded_config(120, 80, [0.5, 0.5, 0.25])).unwrap();

    slam.submit_scan(&room.scan(Pose2D::identity(), BEAMS, 0.0), None);

    let truth = Pose2D::new(0.3, -0.2, 0.12);
    let result = slam.submit_scan(&room.scan(truth, BEAMS, 0.1), None);
    assert_poses_close(&result.pose, &truth, TRANS_TOL_M, ROT_TOL_RAD);
}

#[test]
fn test_stationary_scan_keeps_pose() {
    let room = Room::furnished();
    let slam = NdtPsoSlam::new(seeded_config(60, 40, [0.5, 0.5, 0.2])).unwrap();

    let scan = room.scan(Pose2D::identity(), BEAMS, 0.0);
    slam.submit_scan(&scan, None);
    let result = slam.submit_scan(&scan, None);
    assert_poses_close(&result.pose, &Pose2D::identity(), 0.02, 0.01);
}

// ============================================================================
// Tracking
// ============================================================================

#[test]
fn test_tracks_short_trajectory() {
    init_logging();
    let room = Room::furnished();
    let slam = NdtPsoSlam::new(seeded_config(60, 40, [0.4, 0.4, 0.1])).unwrap();

    let truth: Vec<Pose2D> = (0..12)
        .map(|i| Pose2D::new(-1.5 + 0.2 * i as f64, 0.05 * i as f64, 0.02 * i as f64))
        .collect();

    let mut estimated = Vec::new();
    for (i, pose) in truth.iter().enumerate() {
        // The first scan defines the map frame
        let scan = room.scan(*pose, BEAMS, i as f64 * 0.1);
        estimated.push(slam.submit_scan(&scan, None).pose);
    }

    // Estimates live in the frame of the first scan
    let origin = truth[0];
    for (estimate, pose) in estimated.iter().zip(&truth) {
        let expected = origin.relative_to(*pose);
        assert_poses_close(estimate, &expected, 0.1, 0.05);
    }

    let snapshot = slam.export_snapshot();
    assert_eq!(snapshot.trajectory.len(), truth.len());
}

#[test]
fn test_odometry_is_recorded_with_estimate() {
    let room = Room::furnished();
    let slam = NdtPsoSlam::new(seeded_config(60, 40, [0.4, 0.4, 0.1])).unwrap();

    let odometry = [Pose2D::identity(), Pose2D::new(0.25, 0.0, 0.0)];
    let truth = [Pose2D::identity(), Pose2D::new(0.2, 0.0, 0.0)];
    for (i, (odom, pose)) in odometry.iter().zip(&truth).enumerate() {
        slam.submit_scan(&room.scan(*pose, BEAMS, i as f64), Some(*odom));
    }

    let trajectory = slam.export_snapshot().trajectory;
    assert_eq!(trajectory[1].auxiliary, Some(odometry[1]));
    // Scan matching corrects the odometry
    assert_poses_close(&trajectory[1].pose, &truth[1], TRANS_TOL_M, ROT_TOL_RAD);
}
