//! UBA Engine — user behavior analytics pipeline.
//!
//! Modular structure:
//! - [`ingest`] — Tabular log file ingestion
//! - [`features`] — Timestamp parsing and stable categorical encoding
//! - [`labeler`] — Normal/Threat labeling policies (rule, isolation forest)
//! - [`summary`] — Log/user/threat counters over a labeled set
//! - [`store`] — Versioned immutable snapshots with a rolling window bound
//! - [`engine`] — Pipeline orchestration shared by readers and the feed
//! - [`feed`] — Stoppable synthetic live-feed thread
//! - [`export`] — Labeled CSV report
//! - [`logging`] — Structured JSON logging

pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod feed;
pub mod features;
pub mod ingest;
pub mod labeler;
pub mod logging;
pub mod store;
pub mod summary;

pub use config::EngineConfig;
pub use engine::AnalyticsEngine;
pub use error::{PipelineError, Result};
pub use feed::{FeedHandle, FeedSimulator};
pub use features::{CategoryEncoder, FeaturePreparer, LogRecord};
pub use ingest::RawRecord;
pub use labeler::{Label, LabelPolicy};
pub use logging::StructuredLogger;
pub use store::{Snapshot, SnapshotStore};
pub use summary::{summarize, LabeledRecord, Summary};
