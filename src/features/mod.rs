//! Feature preparation: timestamp parsing and stable categorical encoding.

mod encoder;
mod pipeline;

pub use encoder::CategoryEncoder;
pub use pipeline::{parse_timestamp, FeaturePreparer};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A fully prepared log record: parsed timestamp plus the integer codes the
/// statistical labeler consumes. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub ts: DateTime<Utc>,
    pub user_id: String,
    pub action: String,
    pub resource: String,
    pub action_code: u32,
    pub resource_code: u32,
}

impl LogRecord {
    /// Two-dimensional feature for the outlier model.
    pub fn feature(&self) -> [f32; 2] {
        [self.action_code as f32, self.resource_code as f32]
    }
}
