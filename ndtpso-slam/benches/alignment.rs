//! Benchmark NDT evaluation and swarm alignment.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::f32::consts::PI;
use std::hint::black_box;
use ndtpso_slam::{LaserScan, NdtFrame, Pose2D, PsoConfig, SwarmAligner};

/// Scan of an axis-aligned room from a robot at (`robot_x`, `robot_y`).
fn room_scan(
    room_width: f32,
    room_height: f32,
    robot_x: f32,
    robot_y: f32,
    num_points: usize,
) -> LaserScan {
    let angle_increment = 2.0 * PI / num_points as f32;
    let max_range = (room_width * room_width + room_height * room_height).sqrt() + 1.0;

    let ranges = (0..num_points)
        .map(|i| {
            let angle = i as f32 * angle_increment - PI;
            let (sin_a, cos_a) = angle.sin_cos();
            let mut range = f32::INFINITY;

            // Vertical walls
            for wall_x in [0.0, room_width] {
                let t = (wall_x - robot_x) / cos_a;
                let y = robot_y + t * sin_a;
                if t > 0.0 && (0.0..=room_height).contains(&y) {
                    range = range.min(t);
                }
            }
            // Horizontal walls
            for wall_y in [0.0, room_height] {
                let t = (wall_y - robot_y) / sin_a;
                let x = robot_x + t * cos_a;
                if t > 0.0 && (0.0..=room_width).contains(&x) {
                    range = range.min(t);
                }
            }
            range.min(max_range)
        })
        .collect();

    LaserScan::new(ranges, -PI, angle_increment, max_range, 0.0)
}

fn frames(num_points: usize) -> (NdtFrame, NdtFrame) {
    let mut reference = NdtFrame::reference(20.0, 0.5, 0.01);
    let mut first = NdtFrame::local(20.0, 0.5, 0.01);
    first.load_scan(&room_scan(8.0, 6.0, 4.0, 3.0, num_points));
    reference.fuse(Pose2D::identity(), &first);

    let mut local = NdtFrame::local(20.0, 0.5, 0.01);
    local.load_scan(&room_scan(8.0, 6.0, 4.15, 2.9, num_points));
    (reference, local)
}

fn bench_evaluate(c: &mut Criterion) {
    let (reference, local) = frames(720);
    let points = local.points();
    let pose = Pose2D::new(0.1, -0.05, 0.02);

    c.bench_function("evaluate_720pts", |b| {
        b.iter(|| black_box(reference.evaluate_points(black_box(pose), &points)))
    });
}

fn bench_align_threads(c: &mut Criterion) {
    let mut group = c.benchmark_group("align_threads");
    group.sample_size(20);
    let (reference, local) = frames(720);

    for threads in [1, 2, 4] {
        let config = PsoConfig::default().with_seed(3).with_threads(threads);
        let aligner = SwarmAligner::new(config).expect("thread pool");

        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |b, _| {
            b.iter(|| {
                let result = aligner.align(
                    black_box(&reference),
                    black_box(&local),
                    Pose2D::identity(),
                    None,
                );
                black_box(result)
            })
        });
    }

    group.finish();
}

fn bench_align_population(c: &mut Criterion) {
    let mut group = c.benchmark_group("align_population");
    group.sample_size(20);
    let (reference, local) = frames(360);

    for population in [20, 40, 80] {
        let config = PsoConfig {
            population_size: population,
            ..PsoConfig::default()
        }
        .with_seed(3);
        let aligner = SwarmAligner::new(config).expect("thread pool");

        group.bench_with_input(
            BenchmarkId::from_parameter(population),
            &population,
            |b, _| {
                b.iter(|| {
                    black_box(aligner.align(&reference, &local, Pose2D::identity(), None))
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_evaluate,
    bench_align_threads,
    bench_align_population
);
criterion_main!(benches);
