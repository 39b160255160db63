//! Tabular log ingestion: CSV with timestamp, user_id, action, resource.

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// One row as read from the input file, before feature preparation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    pub timestamp: String,
    pub user_id: String,
    pub action: String,
    pub resource: String,
}

impl RawRecord {
    pub fn new(
        timestamp: impl Into<String>,
        user_id: impl Into<String>,
        action: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            user_id: user_id.into(),
            action: action.into(),
            resource: resource.into(),
        }
    }

    /// user_id, action, and resource must be non-empty; a blank field is a
    /// malformed row, not a default value.
    fn validate(&self, row: usize) -> Result<()> {
        for (field, value) in [
            ("user_id", &self.user_id),
            ("action", &self.action),
            ("resource", &self.resource),
        ] {
            if value.trim().is_empty() {
                return Err(PipelineError::Input(format!(
                    "row {}: empty {} field",
                    row, field
                )));
            }
        }
        Ok(())
    }
}

/// Read all rows from a headered CSV file. Missing columns or unreadable
/// rows abort the load.
pub fn load_csv(path: &Path) -> Result<Vec<RawRecord>> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        if matches!(e.kind(), csv::ErrorKind::Io(_)) {
            PipelineError::Input(format!("cannot open {}: {}", path.display(), e))
        } else {
            PipelineError::from(e)
        }
    })?;

    let mut records = Vec::new();
    for (i, row) in reader.deserialize::<RawRecord>().enumerate() {
        let record = row?;
        record.validate(i + 1)?;
        records.push(record);
    }
    info!(path = %path.display(), rows = records.len(), "loaded input file");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn rejects_empty_action() {
        let r = RawRecord::new("2025-01-15T08:00:00", "user1", "", "web");
        assert!(r.validate(1).is_err());
    }

    #[test]
    fn load_missing_file_is_input_error() {
        let err = load_csv(Path::new("no/such/file.csv")).unwrap_err();
        assert!(matches!(err, PipelineError::Input(_)));
    }

    #[test]
    fn load_csv_reads_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "timestamp,user_id,action,resource").unwrap();
        writeln!(f, "2025-01-15T08:00:00,user1,login,web").unwrap();
        writeln!(f, "2025-01-15T08:01:00,user2,view,file1").unwrap();
        drop(f);

        let rows = load_csv(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].user_id, "user1");
        assert_eq!(rows[1].action, "view");
    }
}
