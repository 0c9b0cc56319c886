//! Cycle cadence measurement.

use std::time::{Duration, Instant};

/// Running counters of the pipeline's cycle and matching rates.
#[derive(Clone, Debug)]
pub struct CycleStats {
    started: Instant,
    cycles: u64,
    alignments: u64,
    improved: u64,
    degenerate: u64,
    cycle_time: Duration,
    matching_time: Duration,
}

impl Default for CycleStats {
    fn default() -> Self {
        Self::new()
    }
}

impl CycleStats {
    /// Start measuring now.
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            cycles: 0,
            alignments: 0,
            improved: 0,
            degenerate: 0,
            cycle_time: Duration::ZERO,
            matching_time: Duration::ZERO,
        }
    }

    /// Record a cycle that did not run the aligner.
    pub fn record_cycle(&mut self, elapsed: Duration) {
        self.cycles += 1;
        self.cycle_time += elapsed;
    }

    /// Record a cycle and the time spent aligning within it.
    pub fn record_alignment(
        &mut self,
        elapsed: Duration,
        matching: Duration,
        improved: bool,
        degenerate: bool,
    ) {
        self.record_cycle(elapsed);
        self.alignments += 1;
        self.matching_time += matching;
        self.improved += improved as u64;
        self.degenerate += degenerate as u64;
    }

    /// Cycles recorded.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Alignments run.
    pub fn alignments(&self) -> u64 {
        self.alignments
    }

    /// Alignments that moved the pose.
    pub fn improved(&self) -> u64 {
        self.improved
    }

    /// Alignments skipped for an empty scan.
    pub fn degenerate(&self) -> u64 {
        self.degenerate
    }

    /// Cycles per second of wall-clock time since start.
    pub fn publish_rate_hz(&self) -> f64 {
        rate(self.cycles, self.started.elapsed())
    }

    /// Alignments per second of time spent aligning.
    pub fn matching_rate_hz(&self) -> f64 {
        rate(self.alignments, self.matching_time)
    }

    /// Mean time per cycle.
    pub fn mean_cycle_time(&self) -> Duration {
        if self.cycles == 0 {
            Duration::ZERO
        } else {
            self.cycle_time / self.cycles as u32
        }
    }

    /// One-line summary for logs.
    pub fn summary(&self) -> String {
        format!(
            "Average publish rate: {:.2}Hz, matching rate: {:.2}Hz ({} cycles, {:.1}ms mean, {} improved, {} degenerate)",
            self.publish_rate_hz(),
            self.matching_rate_hz(),
            self.cycles,
            self.mean_cycle_time().as_secs_f64() * 1e3,
            self.improved,
            self.degenerate
        )
    }
}

fn rate(count: u64, over: Duration) -> f64 {
    let secs = over.as_secs_f64();
    if count == 0 || secs <= 0.0 {
        0.0
    } else {
        count as f64 / secs
    }
}
