//! Summary counters: a pure projection of a labeled record set.

use crate::features::LogRecord;
use crate::labeler::Label;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One record with its most recent label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledRecord {
    #[serde(flatten)]
    pub record: LogRecord,
    pub label: Label,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_logs: usize,
    pub total_users: usize,
    pub total_threats: usize,
}

/// Count rows, distinct users, and threat labels. Stateless and
/// order-independent; running it twice on the same set yields the same
/// summary.
pub fn summarize(records: &[LabeledRecord]) -> Summary {
    let users: HashSet<&str> = records.iter().map(|r| r.record.user_id.as_str()).collect();
    Summary {
        total_logs: records.len(),
        total_users: users.len(),
        total_threats: records.iter().filter(|r| r.label.is_threat()).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn labeled(user: &str, label: Label) -> LabeledRecord {
        LabeledRecord {
            record: LogRecord {
                ts: Utc::now(),
                user_id: user.to_string(),
                action: "login".into(),
                resource: "web".into(),
                action_code: 0,
                resource_code: 0,
            },
            label,
        }
    }

    #[test]
    fn counts_distinct_users() {
        let set = vec![
            labeled("a", Label::Normal),
            labeled("b", Label::Threat),
            labeled("a", Label::Normal),
        ];
        let s = summarize(&set);
        assert_eq!(s.total_logs, 3);
        assert_eq!(s.total_users, 2);
        assert_eq!(s.total_threats, 1);
    }

    #[test]
    fn idempotent() {
        let set = vec![labeled("a", Label::Threat), labeled("b", Label::Normal)];
        assert_eq!(summarize(&set), summarize(&set));
    }

    #[test]
    fn empty_set() {
        assert_eq!(summarize(&[]), Summary::default());
    }
}
