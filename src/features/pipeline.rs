//! Preparation pipeline: raw rows → parsed timestamps → encoded records.

use super::{CategoryEncoder, LogRecord};
use crate::error::{PipelineError, Result};
use crate::ingest::RawRecord;
use chrono::{DateTime, NaiveDateTime, Utc};
use std::sync::Mutex;

/// Accepts RFC 3339 or the naive `%Y-%m-%dT%H:%M:%S` form the log files use
/// (naive times are taken as UTC).
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S"))
        .map(|ndt| ndt.and_utc())
        .map_err(|source| PipelineError::Parse {
            value: value.to_string(),
            source,
        })
}

/// Holds the action and resource encoders for the life of the pipeline, so
/// code assignments never desynchronize between old and newly appended rows.
pub struct FeaturePreparer {
    encoders: Mutex<Encoders>,
}

#[derive(Default)]
struct Encoders {
    actions: CategoryEncoder,
    resources: CategoryEncoder,
}

impl FeaturePreparer {
    pub fn new() -> Self {
        Self {
            encoders: Mutex::new(Encoders::default()),
        }
    }

    /// Prepare a batch. The first parse failure aborts the whole batch; no
    /// partially encoded rows escape.
    pub fn prepare(&self, batch: Vec<RawRecord>) -> Result<Vec<LogRecord>> {
        let mut enc = self.encoders.lock().expect("encoder lock");
        let mut out = Vec::with_capacity(batch.len());
        for raw in batch {
            let ts = parse_timestamp(&raw.timestamp)?;
            let action_code = enc.actions.code(&raw.action);
            let resource_code = enc.resources.code(&raw.resource);
            out.push(LogRecord {
                ts,
                user_id: raw.user_id,
                action: raw.action,
                resource: raw.resource,
                action_code,
                resource_code,
            });
        }
        Ok(out)
    }

    /// (distinct actions, distinct resources) seen so far.
    pub fn vocabulary_sizes(&self) -> (usize, usize) {
        let enc = self.encoders.lock().expect("encoder lock");
        (enc.actions.len(), enc.resources.len())
    }
}

impl Default for FeaturePreparer {
    fn default() -> Self {
        Self::new()
    }
}
