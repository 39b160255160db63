//! Rule policy: a single watched user and a fixed action set. Deterministic
//! and O(n) in the record count.

use super::{Label, LabelPolicy};
use crate::config::RuleConfig;
use crate::error::Result;
use crate::features::LogRecord;
use std::collections::HashSet;

pub struct RuleLabeler {
    user_id: String,
    actions: HashSet<String>,
}

impl RuleLabeler {
    pub fn new(config: RuleConfig) -> Self {
        Self {
            user_id: config.user_id,
            actions: config.actions.into_iter().collect(),
        }
    }
}

impl LabelPolicy for RuleLabeler {
    fn name(&self) -> &'static str {
        "rule"
    }

    fn label(&self, records: &[LogRecord]) -> Result<Vec<Label>> {
        Ok(records
            .iter()
            .map(|r| {
                if r.user_id == self.user_id && self.actions.contains(&r.action) {
                    Label::Threat
                } else {
                    Label::Normal
                }
            })
            .collect())
    }
}
