//! Engine configuration. One label policy is active per deployment; the two
//! variants are alternatives, never composed.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Startup log file (CSV with timestamp, user_id, action, resource)
    pub input_path: PathBuf,
    /// Labeling policy and its parameters
    pub labeler: LabelerConfig,
    /// Snapshot store bounds
    pub store: StoreConfig,
    /// Live feed simulator
    pub feed: FeedConfig,
    /// Where to write the labeled report on shutdown, if anywhere
    pub report_path: Option<PathBuf>,
    /// Logging
    pub log: LogConfig,
}

/// Which anomaly labeler is the active policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Deterministic per-user/action rule
    Rule,
    /// Seeded isolation forest over the categorical codes
    Forest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelerConfig {
    pub policy: PolicyKind,
    pub rule: RuleConfig,
    pub forest: ForestConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    /// User whose flagged actions are labeled Threat
    pub user_id: String,
    /// Actions flagged for that user
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of isolation trees
    pub trees: usize,
    /// Subsample size per tree (clamped to the record count)
    pub sample_size: usize,
    /// Fraction of rows flagged as outliers (0.0–1.0)
    pub contamination: f32,
    /// RNG seed; identical input and seed yields identical labels
    pub seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Rolling window bound; oldest rows are evicted past this
    pub max_records: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub enabled: bool,
    /// Seconds between synthetic batches
    pub interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("data/user_logs.csv"),
            labeler: LabelerConfig::default(),
            store: StoreConfig::default(),
            feed: FeedConfig::default(),
            report_path: None,
            log: LogConfig::default(),
        }
    }
}

impl Default for LabelerConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::Rule,
            rule: RuleConfig::default(),
            forest: ForestConfig::default(),
        }
    }
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            user_id: "user10".to_string(),
            actions: vec![
                "login".to_string(),
                "delete".to_string(),
                "edit".to_string(),
            ],
        }
    }
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            trees: 100,
            sample_size: 256,
            contamination: 0.1,
            seed: 42,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_records: 10_000,
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 5,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl EngineConfig {
    /// Load from JSON file if present; otherwise return default
    pub fn load(path: &std::path::Path) -> Self {
        if path.exists() {
            if let Ok(data) = std::fs::read_to_string(path) {
                if let Ok(c) = serde_json::from_str::<EngineConfig>(&data) {
                    return c;
                }
            }
        }
        Self::default()
    }
}
