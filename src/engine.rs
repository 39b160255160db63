//! Pipeline orchestration: ingest → prepare → label → publish. One engine
//! instance is shared between the startup load, the live feed thread, and
//! any reader.

use crate::config::EngineConfig;
use crate::error::Result;
use crate::features::{FeaturePreparer, LogRecord};
use crate::ingest::{self, RawRecord};
use crate::labeler::{build_policy, LabelPolicy};
use crate::store::{Snapshot, SnapshotStore};
use crate::summary::LabeledRecord;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub struct AnalyticsEngine {
    preparer: FeaturePreparer,
    policy: Box<dyn LabelPolicy>,
    store: SnapshotStore,
}

impl AnalyticsEngine {
    pub fn new(config: &EngineConfig) -> Self {
        let policy = build_policy(&config.labeler);
        info!(policy = policy.name(), "label policy active");
        Self {
            preparer: FeaturePreparer::new(),
            policy,
            store: SnapshotStore::new(config.store.max_records),
        }
    }

    /// Startup load: read the whole file and run it through one append cycle.
    pub fn ingest_file(&self, path: &Path) -> Result<Arc<Snapshot>> {
        let rows = ingest::load_csv(path)?;
        self.append(rows)
    }

    /// Append a batch and relabel the entire accumulated set. Labels are
    /// always recomputed whole-set, never patched incrementally; a failure
    /// anywhere leaves the previously published snapshot current.
    pub fn append(&self, batch: Vec<RawRecord>) -> Result<Arc<Snapshot>> {
        let prepared = self.preparer.prepare(batch)?;

        let base = self.store.snapshot();
        let mut records: Vec<LogRecord> = base
            .records
            .iter()
            .map(|lr| lr.record.clone())
            .chain(prepared)
            .collect();
        self.store.trim_to_window(&mut records);

        let labels = self.policy.label(&records)?;
        let labeled: Vec<LabeledRecord> = records
            .into_iter()
            .zip(labels)
            .map(|(record, label)| LabeledRecord { record, label })
            .collect();

        let snap = self.store.publish(labeled);
        info!(
            version = snap.version,
            total_logs = snap.summary.total_logs,
            total_users = snap.summary.total_users,
            total_threats = snap.summary.total_threats,
            "published snapshot"
        );
        Ok(snap)
    }

    /// Reader entry point.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.store.snapshot()
    }
}
