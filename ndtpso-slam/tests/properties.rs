//! Invariants of NDT frames and swarm alignment on realistic scans.

mod common;

use common::{BEAMS_DEFAULT, Room};
use approx::assert_relative_eq;
use ndtpso_slam::{GridCoord, NdtFrame, Point2D, Pose2D, PsoConfig, SwarmAligner};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn room_frames(offset: Pose2D) -> (NdtFrame, NdtFrame) {
    let room = Room::furnished();
    let mut first = NdtFrame::local(30.0, 0.5, 0.01);
    first.load_scan(&room.scan(Pose2D::identity(), BEAMS_DEFAULT, 0.0));
    let mut reference = NdtFrame::reference(30.0, 0.5, 0.01);
    reference.fuse(Pose2D::identity(), &first);

    let mut local = NdtFrame::local(30.0, 0.5, 0.01);
    local.load_scan(&room.scan(offset, BEAMS_DEFAULT, 0.1));
    (reference, local)
}

#[test]
fn test_self_evaluation_is_maximal_at_identity() {
    let (reference, local) = room_frames(Pose2D::identity());
    let at_identity = reference.evaluate(Pose2D::identity(), &local);
    assert!(at_identity > 0.0);

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let offset = Pose2D::new(
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
            rng.random_range(-0.3..=0.3),
        );
        if offset.position().length() < 0.05 && offset.theta.abs() < 0.01 {
            continue;
        }
        let score = reference.evaluate(offset, &local);
        assert!(
            score <= at_identity,
            "offset {} scored {:.3} > identity {:.3}",
            offset,
            score,
            at_identity
        );
    }
}

#[test]
fn test_alignment_never_regresses() {
    let (reference, local) = room_frames(Pose2D::new(0.4, 0.1, -0.05));
    let aligner = SwarmAligner::new(
        PsoConfig {
            population_size: 16,
            iterations: 8,
            ..PsoConfig::default()
        }
        .with_seed(3)
        .with_threads(2),
    )
    .unwrap();

    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..10 {
        let previous = Pose2D::new(
            rng.random_range(-2.0..=2.0),
            rng.random_range(-2.0..=2.0),
            rng.random_range(-1.0..=1.0),
        );
        let result = aligner.align(&reference, &local, previous, None);
        let baseline = reference.evaluate(previous, &local);
        assert!(result.score >= baseline);
        assert!(reference.evaluate(result.pose, &local) >= baseline);
        assert_eq!(result.improved, result.pose != previous);
    }
}

#[test]
fn test_fusing_empty_frame_is_noop() {
    let (mut reference, _) = room_frames(Pose2D::identity());
    let before = reference.snapshot();
    reference.fuse(
        Pose2D::new(1.0, 2.0, 0.5),
        &NdtFrame::local(30.0, 0.5, 0.01),
    );
    assert_eq!(reference.snapshot(), before);
}

#[test]
fn test_points_on_extent_edges_are_excluded() {
    let mut frame = NdtFrame::local(4.0, 0.5, 0.01);
    let edges = [
        Point2D::new(-2.0, 0.3),
        Point2D::new(2.0, 0.3),
        Point2D::new(0.3, -2.0),
        Point2D::new(0.3, 2.0),
    ];
    for p in edges {
        assert!(!frame.insert(p));
    }
    assert!(frame.is_empty());
    assert!(frame.snapshot().cells.is_empty());

    // Fused points landing on an edge are dropped as well
    let mut source = NdtFrame::local(4.0, 0.5, 0.01);
    source.insert(Point2D::new(1.0, 0.3));
    frame.fuse(Pose2D::new(1.0, 0.0, 0.0), &source);
    assert!(frame.is_empty());
}

#[test]
fn test_unit_square_cell_statistics() {
    // One 4m cell spans [0, 4) on both axes
    let mut frame = NdtFrame::reference(8.0, 4.0, 0.01);
    for (x, y) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)] {
        frame.insert(Point2D::new(x, y));
    }
    let snapshot = frame.snapshot();
    assert_eq!(snapshot.cells.len(), 1);
    let cell = snapshot.cells[0];
    assert_eq!(cell.count, 4);
    assert_eq!(cell.coord, GridCoord::new(1, 1));
    assert_eq!(frame.cell_at(cell.coord).map(|c| c.count()), Some(4));

    let mean = cell.mean.unwrap();
    assert_relative_eq!(mean.x, 0.5);
    assert_relative_eq!(mean.y, 0.5);
    let cov = cell.covariance.unwrap();
    assert_relative_eq!(cov.xx, 0.25, epsilon = 1e-12);
    assert_relative_eq!(cov.yy, 0.25, epsilon = 1e-12);
    assert_relative_eq!(cov.xy, 0.0, epsilon = 1e-12);
}
