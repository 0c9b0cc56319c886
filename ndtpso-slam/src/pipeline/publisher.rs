//! Fixed-rate pose publisher thread.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};
use log::{info, trace, warn};

use crate::error::{NdtPsoError, Result};

use super::slam::{NdtPsoSlam, PublishedPose};

/// Publisher thread handle.
///
/// Reads [`NdtPsoSlam::current_pose`] at a fixed rate and sends it on a
/// bounded channel. A full channel drops the pose instead of blocking;
/// the thread exits when stopped or when every receiver is gone.
pub struct PosePublisher {
    handle: Option<JoinHandle<()>>,
    running: Arc<AtomicBool>,
    receiver: Receiver<PublishedPose>,
}

impl PosePublisher {
    /// Spawn the publisher thread.
    ///
    /// `rate_hz` must be finite and positive.
    pub fn spawn(slam: Arc<NdtPsoSlam>, rate_hz: f64) -> Result<Self> {
        let interval = (rate_hz.is_finite() && rate_hz > 0.0)
            .then(|| Duration::try_from_secs_f64(1.0 / rate_hz).ok())
            .flatten()
            .ok_or_else(|| {
                NdtPsoError::InvalidConfig(format!(
                    "publish rate must be positive, got {}",
                    rate_hz
                ))
            })?;
        let capacity = slam.config().publish.channel_capacity.max(1);
        let (sender, receiver) = bounded(capacity);
        let running = Arc::new(AtomicBool::new(true));

        let handle = thread::Builder::new()
            .name("pose-publisher".into())
            .spawn({
                let running = Arc::clone(&running);
                move || run_publisher_loop(slam, sender, interval, running)
            })?;

        Ok(Self {
            handle: Some(handle),
            running,
            receiver,
        })
    }

    /// Channel the poses arrive on.
    pub fn receiver(&self) -> &Receiver<PublishedPose> {
        &self.receiver
    }

    /// Whether the thread is still publishing.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
            && self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop the thread and wait for it to finish.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("[PosePublisher] Publisher thread panicked");
            }
        }
    }
}

impl Drop for PosePublisher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Longest single sleep, so `stop` is honored promptly at low rates.
const MAX_SLEEP: Duration = Duration::from_millis(50);

fn run_publisher_loop(
    slam: Arc<NdtPsoSlam>,
    sender: Sender<PublishedPose>,
    interval: Duration,
    running: Arc<AtomicBool>,
) {
    info!(
        "[PosePublisher] Publishing at {:.1}Hz",
        1.0 / interval.as_secs_f64()
    );

    let mut published: u64 = 0;
    let mut dropped: u64 = 0;
    let mut next = Instant::now();

    while running.load(Ordering::Relaxed) {
        let now = Instant::now();
        if now < next {
            thread::sleep((next - now).min(MAX_SLEEP));
            continue;
        }

        match sender.try_send(slam.current_pose()) {
            Ok(()) => published += 1,
            Err(TrySendError::Full(_)) => {
                dropped += 1;
                trace!("[PosePublisher] Channel full, dropping pose");
            }
            Err(TrySendError::Disconnected(_)) => break,
        }

        next += interval;
        // Fell behind (for example after a suspend): restart the schedule.
        if next < now {
            next = now + interval;
        }
    }

    info!(
        "[PosePublisher] Stopped after {} poses ({} dropped)",
        published, dropped
    );
}
