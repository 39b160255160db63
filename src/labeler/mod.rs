//! Anomaly labeling policies. Exactly one policy is active per deployment,
//! selected by config; both produce one label per input record and recompute
//! over the whole set on every call.

mod forest;
mod rule;

pub use forest::ForestLabeler;
pub use rule::RuleLabeler;

use crate::config::{LabelerConfig, PolicyKind};
use crate::error::Result;
use crate::features::LogRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Normal,
    Threat,
}

impl Label {
    pub fn is_threat(self) -> bool {
        self == Label::Threat
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Label::Normal => "Normal",
            Label::Threat => "Threat",
        }
    }
}

/// A labeling policy over the full record set. Labels are positional: output
/// index i labels input index i.
pub trait LabelPolicy: Send + Sync {
    fn name(&self) -> &'static str;

    fn label(&self, records: &[LogRecord]) -> Result<Vec<Label>>;
}

/// Construct the active policy from config.
pub fn build_policy(config: &LabelerConfig) -> Box<dyn LabelPolicy> {
    match config.policy {
        PolicyKind::Rule => Box::new(RuleLabeler::new(config.rule.clone())),
        PolicyKind::Forest => Box::new(ForestLabeler::new(config.forest.clone())),
    }
}
