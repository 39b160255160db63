//! UBA engine entrypoint: loads the startup log file, publishes the first
//! labeled snapshot, then runs the live feed and a periodic summary log
//! until Ctrl+C. Optionally writes a labeled CSV report on shutdown.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use uba_engine::{
    config::EngineConfig,
    engine::AnalyticsEngine,
    export,
    feed::FeedSimulator,
    logging::{LogLine, StructuredLogger},
    store::Snapshot,
};

/// Final summary as one standalone JSON line, regardless of log format.
fn emit_final_summary(snap: &Snapshot) {
    let line = LogLine {
        ts: chrono::Utc::now().to_rfc3339(),
        level: "info",
        message: "final summary",
        snapshot_version: Some(snap.version),
        total_logs: Some(snap.summary.total_logs),
        total_users: Some(snap.summary.total_users),
        total_threats: Some(snap.summary.total_threats),
        error: None,
    };
    StructuredLogger::emit_json(&line, &mut std::io::stdout());
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config_path = std::env::var("UBA_CONFIG_PATH")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::path::PathBuf::from("config.json"));
    let config = EngineConfig::load(&config_path);

    StructuredLogger::init(config.log.json, &config.log.level);

    info!(input = %config.input_path.display(), "uba engine starting");

    let engine = Arc::new(AnalyticsEngine::new(&config));
    let snap = engine.ingest_file(&config.input_path)?;
    info!(
        total_logs = snap.summary.total_logs,
        total_users = snap.summary.total_users,
        total_threats = snap.summary.total_threats,
        "initial snapshot published"
    );

    if !config.feed.enabled {
        if let Some(ref path) = config.report_path {
            export::write_report(&engine.snapshot(), path)?;
        }
        emit_final_summary(&engine.snapshot());
        info!("uba engine single pass complete");
        return Ok(());
    }

    static STOP: AtomicBool = AtomicBool::new(false);
    let _ = ctrlc::set_handler(|| {
        STOP.store(true, Ordering::Relaxed);
    });

    let feed = FeedSimulator::spawn(engine.clone(), config.feed.clone());
    info!("live mode (Ctrl+C to stop)");

    // Reader loop: each pass sees one complete published snapshot.
    let mut last_version = snap.version;
    while !STOP.load(Ordering::Relaxed) {
        std::thread::sleep(Duration::from_secs(2));
        let snap = engine.snapshot();
        if snap.version != last_version {
            last_version = snap.version;
            info!(
                version = snap.version,
                total_logs = snap.summary.total_logs,
                total_users = snap.summary.total_users,
                total_threats = snap.summary.total_threats,
                "summary"
            );
        }
    }

    feed.stop();

    if let Some(ref path) = config.report_path {
        if let Err(e) = export::write_report(&engine.snapshot(), path) {
            warn!(error = %e, "report export failed");
        }
    }
    emit_final_summary(&engine.snapshot());
    info!("uba engine stopping");
    Ok(())
}
