//! Labeled-report export: the current snapshot as a CSV with the derived
//! codes and label column.

use crate::error::Result;
use crate::store::Snapshot;
use std::path::Path;
use tracing::info;

pub fn write_report(snapshot: &Snapshot, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "timestamp",
        "user_id",
        "action",
        "resource",
        "action_code",
        "resource_code",
        "label",
    ])?;
    for lr in &snapshot.records {
        let r = &lr.record;
        writer.write_record([
            r.ts.to_rfc3339().as_str(),
            r.user_id.as_str(),
            r.action.as_str(),
            r.resource.as_str(),
            r.action_code.to_string().as_str(),
            r.resource_code.to_string().as_str(),
            lr.label.as_str(),
        ])?;
    }
    writer.flush().map_err(crate::error::PipelineError::Io)?;
    info!(
        path = %path.display(),
        rows = snapshot.records.len(),
        version = snapshot.version,
        "report written"
    );
    Ok(())
}
