//! Versioned snapshot store. Each relabeling pass publishes a complete
//! immutable snapshot by atomic swap; readers never observe a partially
//! rebuilt label column. The store is bounded by a rolling window.

use crate::summary::{summarize, LabeledRecord, Summary};
use chrono::{DateTime, Utc};
use std::sync::{Arc, RwLock};
use tracing::debug;

/// A fully consistent view of the record set at one point in time.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub version: u64,
    pub records: Vec<LabeledRecord>,
    pub summary: Summary,
    pub created_at: DateTime<Utc>,
}

impl Snapshot {
    fn empty() -> Self {
        Self {
            version: 0,
            records: Vec::new(),
            summary: Summary::default(),
            created_at: Utc::now(),
        }
    }
}

pub struct SnapshotStore {
    current: RwLock<Arc<Snapshot>>,
    max_records: usize,
}

impl SnapshotStore {
    pub fn new(max_records: usize) -> Self {
        Self {
            current: RwLock::new(Arc::new(Snapshot::empty())),
            max_records: max_records.max(1),
        }
    }

    /// Current published snapshot; a cheap Arc clone that stays valid and
    /// consistent no matter what is published after it.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current.read().expect("store lock").clone()
    }

    /// Oldest rows beyond the window bound, dropped before labeling so the
    /// labeler's cost stays bounded too.
    pub fn trim_to_window<T>(&self, records: &mut Vec<T>) {
        if records.len() > self.max_records {
            let excess = records.len() - self.max_records;
            records.drain(..excess);
            debug!(evicted = excess, "window bound evicted oldest rows");
        }
    }

    /// Publish a new snapshot from a fully labeled set. Version bumps by one
    /// per publish.
    pub fn publish(&self, records: Vec<LabeledRecord>) -> Arc<Snapshot> {
        let summary = summarize(&records);
        let mut guard = self.current.write().expect("store lock");
        let next = Arc::new(Snapshot {
            version: guard.version + 1,
            records,
            summary,
            created_at: Utc::now(),
        });
        *guard = next.clone();
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::LogRecord;
    use crate::labeler::Label;

    fn labeled(user: &str) -> LabeledRecord {
        LabeledRecord {
            record: LogRecord {
                ts: Utc::now(),
                user_id: user.to_string(),
                action: "login".into(),
                resource: "web".into(),
                action_code: 0,
                resource_code: 0,
            },
            label: Label::Normal,
        }
    }

    #[test]
    fn publish_bumps_version() {
        let store = SnapshotStore::new(100);
        assert_eq!(store.snapshot().version, 0);
        store.publish(vec![labeled("a")]);
        let snap = store.publish(vec![labeled("a"), labeled("b")]);
        assert_eq!(snap.version, 2);
        assert_eq!(store.snapshot().summary.total_logs, 2);
    }

    #[test]
    fn old_readers_keep_their_snapshot() {
        let store = SnapshotStore::new(100);
        store.publish(vec![labeled("a")]);
        let held = store.snapshot();
        store.publish(vec![labeled("a"), labeled("b"), labeled("c")]);
        assert_eq!(held.summary.total_logs, 1);
        assert_eq!(store.snapshot().summary.total_logs, 3);
    }

    #[test]
    fn window_evicts_oldest() {
        let store = SnapshotStore::new(3);
        let mut rows: Vec<u32> = vec![1, 2, 3, 4, 5];
        store.trim_to_window(&mut rows);
        assert_eq!(rows, vec![3, 4, 5]);
    }
}
