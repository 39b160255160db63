//! Isolation-forest policy over the two categorical codes. The whole set is
//! refit on every call; the seeded RNG makes a refit over identical input
//! reproduce identical labels.
//!
//! Scoring follows the standard formulation: s(x) = 2^(-E(h(x)) / c(m)) with
//! c(m) the expected path length of an unsuccessful BST search over m points.
//! The `contamination` fraction turns scores into labels by flagging the
//! top-k most isolable rows, k = round(contamination * n).

use super::{Label, LabelPolicy};
use crate::config::ForestConfig;
use crate::error::{PipelineError, Result};
use crate::features::LogRecord;
use ndarray::{Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

const EULER_MASCHERONI: f64 = 0.577_215_664_901_532_9;

pub struct ForestLabeler {
    config: ForestConfig,
}

enum Node {
    Leaf {
        size: usize,
    },
    Split {
        feature: usize,
        threshold: f32,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// Average path length of an unsuccessful search in a BST of n points.
fn c(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_MASCHERONI) - 2.0 * (n - 1.0) / n
        }
    }
}

fn grow(
    data: &Array2<f32>,
    indices: &[usize],
    depth: usize,
    max_depth: usize,
    rng: &mut StdRng,
) -> Node {
    if indices.len() <= 1 || depth >= max_depth {
        return Node::Leaf {
            size: indices.len(),
        };
    }

    // Split on a random feature with spread; all-constant partitions become
    // leaves.
    let n_features = data.ncols();
    let mut candidates: Vec<(usize, f32, f32)> = Vec::with_capacity(n_features);
    for f in 0..n_features {
        let mut lo = f32::INFINITY;
        let mut hi = f32::NEG_INFINITY;
        for &i in indices {
            let v = data[[i, f]];
            lo = lo.min(v);
            hi = hi.max(v);
        }
        if lo < hi {
            candidates.push((f, lo, hi));
        }
    }
    let Some(&(feature, lo, hi)) = candidates.get(rng.gen_range(0..candidates.len().max(1)))
    else {
        return Node::Leaf {
            size: indices.len(),
        };
    };

    let threshold = rng.gen_range(lo..hi);
    let (left, right): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .copied()
        .partition(|&i| data[[i, feature]] < threshold);

    Node::Split {
        feature,
        threshold,
        left: Box::new(grow(data, &left, depth + 1, max_depth, rng)),
        right: Box::new(grow(data, &right, depth + 1, max_depth, rng)),
    }
}

fn path_length(node: &Node, row: ArrayView1<'_, f32>, depth: usize) -> f64 {
    match node {
        Node::Leaf { size } => depth as f64 + c(*size),
        Node::Split {
            feature,
            threshold,
            left,
            right,
        } => {
            if row[*feature] < *threshold {
                path_length(left, row, depth + 1)
            } else {
                path_length(right, row, depth + 1)
            }
        }
    }
}

impl ForestLabeler {
    pub fn new(config: ForestConfig) -> Self {
        Self { config }
    }

    /// Fit on the full matrix and return one anomaly score per row, in [0, 1].
    pub fn score(&self, data: &Array2<f32>) -> Result<Vec<f64>> {
        let n = data.nrows();
        if n == 0 {
            return Err(PipelineError::Model("empty feature matrix".to_string()));
        }

        let sample_size = self.config.sample_size.max(2).min(n);
        let max_depth = (sample_size as f64).log2().ceil().max(1.0) as usize;
        let mut rng = StdRng::seed_from_u64(self.config.seed);

        let mut trees = Vec::with_capacity(self.config.trees);
        for _ in 0..self.config.trees {
            let indices = rand::seq::index::sample(&mut rng, n, sample_size).into_vec();
            trees.push(grow(data, &indices, 0, max_depth, &mut rng));
        }

        let norm = c(sample_size).max(1.0);
        let scores = (0..n)
            .map(|i| {
                let avg: f64 = trees
                    .iter()
                    .map(|t| path_length(t, data.row(i), 0))
                    .sum::<f64>()
                    / trees.len() as f64;
                2f64.powf(-avg / norm)
            })
            .collect();
        Ok(scores)
    }
}

impl LabelPolicy for ForestLabeler {
    fn name(&self) -> &'static str {
        "forest"
    }

    fn label(&self, records: &[LogRecord]) -> Result<Vec<Label>> {
        let n = records.len();
        let mut data = Array2::<f32>::zeros((n, 2));
        for (i, r) in records.iter().enumerate() {
            let [a, b] = r.feature();
            data[[i, 0]] = a;
            data[[i, 1]] = b;
        }

        let scores = self.score(&data)?;

        // Top-k cutoff: exactly round(contamination * n) rows flagged, ties
        // broken by row order.
        let k = ((self.config.contamination as f64 * n as f64).round() as usize).min(n);
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| {
            scores[b]
                .partial_cmp(&scores[a])
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.cmp(&b))
        });

        let mut labels = vec![Label::Normal; n];
        for &i in order.iter().take(k) {
            labels[i] = Label::Threat;
        }
        debug!(rows = n, flagged = k, "forest labeling pass");
        Ok(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(action_code: u32, resource_code: u32) -> LogRecord {
        LogRecord {
            ts: Utc::now(),
            user_id: format!("u{}", action_code),
            action: "a".into(),
            resource: "r".into(),
            action_code,
            resource_code,
        }
    }

    #[test]
    fn empty_input_is_model_error() {
        let f = ForestLabeler::new(ForestConfig::default());
        let err = f.label(&[]).unwrap_err();
        assert!(matches!(err, PipelineError::Model(_)));
    }

    #[test]
    fn deterministic_for_fixed_seed() {
        let records: Vec<LogRecord> = (0..50).map(|i| record(i % 5, i % 7)).collect();
        let f = ForestLabeler::new(ForestConfig::default());
        let a = f.label(&records).unwrap();
        let b = f.label(&records).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn flags_contamination_fraction() {
        let records: Vec<LogRecord> = (0..100).map(|i| record(i % 3, i % 4)).collect();
        let f = ForestLabeler::new(ForestConfig {
            contamination: 0.1,
            ..ForestConfig::default()
        });
        let labels = f.label(&records).unwrap();
        let threats = labels.iter().filter(|l| l.is_threat()).count();
        assert_eq!(threats, 10);
    }

    #[test]
    fn isolates_the_outlier() {
        // 49 rows in a tight cluster, one far away: the far row must be
        // among the flagged set.
        let mut records: Vec<LogRecord> = (0..49).map(|i| record(i % 2, i % 2)).collect();
        records.push(record(90, 90));
        let f = ForestLabeler::new(ForestConfig {
            contamination: 0.02,
            ..ForestConfig::default()
        });
        let labels = f.label(&records).unwrap();
        assert!(labels[49].is_threat());
    }
}
