//! Live feed simulator: a fixed synthetic batch appended on a fixed
//! interval from a background thread. Unlike a self-rescheduling timer, the
//! thread carries an explicit stop signal and joins cleanly.

use crate::config::FeedConfig;
use crate::engine::AnalyticsEngine;
use crate::ingest::RawRecord;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{info, warn};

/// The fixed five-row batch each tick appends: three user10 rows (login,
/// delete, edit) plus two background rows.
pub fn synthetic_batch() -> Vec<RawRecord> {
    vec![
        RawRecord::new("2025-01-15T08:45:00", "user8", "login", "web"),
        RawRecord::new("2025-01-15T08:50:00", "user9", "delete", "file9"),
        RawRecord::new("2025-01-15T08:53:00", "user10", "login", "web"),
        RawRecord::new("2025-01-15T08:54:00", "user10", "delete", "file10"),
        RawRecord::new("2025-01-15T08:55:00", "user10", "edit", "file10"),
    ]
}

pub struct FeedSimulator;

/// Handle to a running feed thread. `stop` signals and joins; dropping the
/// handle without calling it signals but does not wait.
pub struct FeedHandle {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl FeedSimulator {
    pub fn spawn(engine: Arc<AnalyticsEngine>, config: FeedConfig) -> FeedHandle {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = stop.clone();
        let interval_secs = config.interval_secs.max(1);

        let thread = std::thread::Builder::new()
            .name("uba-feed".to_string())
            .spawn(move || {
                info!(interval_secs, "feed simulator running");
                let mut tick: u64 = 0;
                while !flag.load(Ordering::Relaxed) {
                    // Sleep in one-second slices so stop stays responsive.
                    for _ in 0..interval_secs {
                        if flag.load(Ordering::Relaxed) {
                            break;
                        }
                        std::thread::sleep(Duration::from_secs(1));
                    }
                    if flag.load(Ordering::Relaxed) {
                        break;
                    }
                    tick += 1;
                    match engine.append(synthetic_batch()) {
                        Ok(snap) => info!(
                            tick,
                            version = snap.version,
                            total_logs = snap.summary.total_logs,
                            "feed tick appended"
                        ),
                        Err(e) => warn!(tick, error = %e, "feed tick failed"),
                    }
                }
                info!("feed simulator stopped");
            })
            .expect("spawn feed thread");

        FeedHandle {
            stop,
            thread: Some(thread),
        }
    }
}

impl FeedHandle {
    /// Signal the feed thread and wait for it to exit.
    pub fn stop(mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(t) = self.thread.take() {
            let _ = t.join();
        }
    }
}

impl Drop for FeedHandle {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}
