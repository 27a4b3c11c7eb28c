//! CART Decision Tree
//!
//! Gini-impurity tree grown on a (bootstrap) subset of rows. Each split
//! examines a random subset of features; constant features are skipped
//! and do not count towards that subset.
//!
//! Nodes live in a flat array. Children are always pushed after their
//! parent, so child indices are strictly greater than the parent index and
//! traversal cannot loop.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// A node in the decision tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    /// `features[feature] <= threshold` goes left
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Class probabilities of the training rows that reached this leaf
    Leaf { distribution: Vec<f64> },
}

/// Growth limits
#[derive(Debug, Clone, Copy)]
pub struct TreeParams {
    /// Non-constant features examined per split
    pub max_features: usize,
    /// Nodes with fewer rows become leaves
    pub min_samples_split: usize,
    /// `None` grows until leaves are pure
    pub max_depth: Option<usize>,
}

/// A fitted decision tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
    n_features: usize,
    n_classes: usize,
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

// ============================================================================
// GROWTH
// ============================================================================

impl DecisionTree {
    /// Grow a tree over `indices` (may repeat rows, as in a bootstrap sample).
    ///
    /// `targets[i]` is the class index of `samples[i]`, `< n_classes`.
    pub fn grow<R: Rng>(
        samples: &[Vec<f64>],
        targets: &[usize],
        indices: Vec<usize>,
        n_classes: usize,
        params: &TreeParams,
        rng: &mut R,
    ) -> Self {
        let n_features = samples.first().map_or(0, Vec::len);
        let mut grower = Grower {
            samples,
            targets,
            n_features,
            n_classes,
            params,
            rng,
            nodes: Vec::new(),
        };
        grower.build(indices, 0);

        Self {
            nodes: grower.nodes,
            n_features,
            n_classes,
        }
    }
}

struct Grower<'a, R> {
    samples: &'a [Vec<f64>],
    targets: &'a [usize],
    n_features: usize,
    n_classes: usize,
    params: &'a TreeParams,
    rng: &'a mut R,
    nodes: Vec<TreeNode>,
}

impl<R: Rng> Grower<'_, R> {
    fn build(&mut self, indices: Vec<usize>, depth: usize) -> usize {
        let counts = self.class_counts(&indices);
        let n = indices.len();

        let at_depth_limit = self.params.max_depth.map_or(false, |d| depth >= d);
        if gini(&counts, n) == 0.0 || n < self.params.min_samples_split || at_depth_limit {
            return self.push_leaf(&counts, n);
        }

        let Some(split) = self.best_split(&indices) else {
            // Identical rows with different labels
            return self.push_leaf(&counts, n);
        };

        let samples = self.samples;
        let (left, right): (Vec<usize>, Vec<usize>) = indices
            .into_iter()
            .partition(|&i| samples[i][split.feature] <= split.threshold);

        // Reserve the slot so children land after the parent
        let node = self.nodes.len();
        self.nodes.push(TreeNode::Leaf { distribution: Vec::new() });

        let left = self.build(left, depth + 1);
        let right = self.build(right, depth + 1);

        self.nodes[node] = TreeNode::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        node
    }

    fn push_leaf(&mut self, counts: &[usize], n: usize) -> usize {
        let total = n.max(1) as f64;
        let distribution = counts.iter().map(|&c| c as f64 / total).collect();
        self.nodes.push(TreeNode::Leaf { distribution });
        self.nodes.len() - 1
    }

    fn class_counts(&self, indices: &[usize]) -> Vec<usize> {
        let mut counts = vec![0usize; self.n_classes];
        for &i in indices {
            counts[self.targets[i]] += 1;
        }
        counts
    }

    fn best_split(&mut self, indices: &[usize]) -> Option<SplitCandidate> {
        let mut order: Vec<usize> = (0..self.n_features).collect();
        order.shuffle(&mut *self.rng);

        let mut best: Option<SplitCandidate> = None;
        let mut visited = 0;

        for feature in order {
            if visited >= self.params.max_features {
                break;
            }
            let Some(candidate) = self.best_split_on(feature, indices) else {
                continue; // constant here
            };
            visited += 1;
            if best.as_ref().map_or(true, |b| candidate.impurity < b.impurity) {
                best = Some(candidate);
            }
        }

        best
    }

    fn best_split_on(&self, feature: usize, indices: &[usize]) -> Option<SplitCandidate> {
        let mut pairs: Vec<(f64, usize)> = indices
            .iter()
            .map(|&i| (self.samples[i][feature], self.targets[i]))
            .collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let (first, last) = (pairs.first()?.0, pairs.last()?.0);
        if first == last {
            return None;
        }

        let n = pairs.len();
        let mut total = vec![0usize; self.n_classes];
        for &(_, class) in &pairs {
            total[class] += 1;
        }

        let mut left = vec![0usize; self.n_classes];
        let mut right = total.clone();
        let mut best: Option<SplitCandidate> = None;

        for k in 0..n - 1 {
            let class = pairs[k].1;
            left[class] += 1;
            right[class] -= 1;

            if pairs[k].0 == pairs[k + 1].0 {
                continue;
            }

            let n_left = k + 1;
            let n_right = n - n_left;
            let impurity = (n_left as f64 * gini(&left, n_left)
                + n_right as f64 * gini(&right, n_right))
                / n as f64;

            if best.as_ref().map_or(true, |b| impurity < b.impurity) {
                best = Some(SplitCandidate {
                    feature,
                    threshold: (pairs[k].0 + pairs[k + 1].0) / 2.0,
                    impurity,
                });
            }
        }

        best
    }
}

/// Gini impurity of a class histogram
fn gini(counts: &[usize], n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / n;
            p * p
        })
        .sum::<f64>()
}

// ============================================================================
// INFERENCE
// ============================================================================

impl DecisionTree {
    /// Class probabilities for one row
    pub fn predict_proba(&self, features: &[f64]) -> &[f64] {
        let mut idx = 0usize;
        loop {
            match &self.nodes[idx] {
                TreeNode::Leaf { distribution } => return distribution,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = features.get(*feature).copied().unwrap_or(0.0);
                    idx = if value <= *threshold { *left } else { *right };
                }
            }
        }
    }

    /// Most probable class (lowest index wins ties)
    pub fn predict(&self, features: &[f64]) -> usize {
        argmax(self.predict_proba(features))
    }

    /// Structural check for trees read back from disk.
    pub fn check(&self) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    left,
                    right,
                    ..
                } => {
                    if *feature >= self.n_features {
                        return Err(format!("node {} splits on feature {} of {}", i, feature, self.n_features));
                    }
                    for &child in [left, right] {
                        if child <= i || child >= self.nodes.len() {
                            return Err(format!("node {} has invalid child {}", i, child));
                        }
                    }
                }
                TreeNode::Leaf { distribution } => {
                    if distribution.len() != self.n_classes {
                        return Err(format!(
                            "leaf {} has {} classes, expected {}",
                            i,
                            distribution.len(),
                            self.n_classes
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    /// Number of nodes in the tree.
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaf nodes.
    pub fn n_leaves(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, TreeNode::Leaf { .. }))
            .count()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Tree depth (longest root-to-leaf path).
    pub fn depth(&self) -> usize {
        if self.nodes.is_empty() {
            return 0;
        }
        self.node_depth(0)
    }

    fn node_depth(&self, idx: usize) -> usize {
        match &self.nodes[idx] {
            TreeNode::Leaf { .. } => 0,
            TreeNode::Split { left, right, .. } => {
                1 + self.node_depth(*left).max(self.node_depth(*right))
            }
        }
    }
}

/// Index of the first maximum
pub(crate) fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn params(n_features: usize) -> TreeParams {
        TreeParams {
            max_features: n_features,
            min_samples_split: 2,
            max_depth: None,
        }
    }

    fn grow(samples: &[Vec<f64>], targets: &[usize], n_classes: usize) -> DecisionTree {
        let mut rng = StdRng::seed_from_u64(7);
        let indices = (0..samples.len()).collect();
        DecisionTree::grow(samples, targets, indices, n_classes, &params(samples[0].len()), &mut rng)
    }

    #[test]
    fn test_single_split() {
        // f[0] <= 0.5 → class 0, else → class 1
        let samples = vec![vec![0.0], vec![0.0], vec![1.0], vec![1.0]];
        let tree = grow(&samples, &[0, 0, 1, 1], 2);

        assert_eq!(tree.n_nodes(), 3);
        assert_eq!(tree.n_leaves(), 2);
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.predict(&[0.0]), 0);
        assert_eq!(tree.predict(&[1.0]), 1);
        assert_eq!(tree.predict(&[0.5]), 0); // <= threshold goes left
        assert!(tree.check().is_ok());
    }

    #[test]
    fn test_pure_node_is_leaf() {
        let samples = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
        let tree = grow(&samples, &[1, 1], 2);
        assert_eq!(tree.n_nodes(), 1);
        assert_eq!(tree.predict_proba(&[0.0, 0.0]), &[0.0, 1.0]);
    }

    #[test]
    fn test_fits_training_rows() {
        // XOR on two flags plus a species code
        let samples = vec![
            vec![0.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
            vec![0.0, 1.0, 1.0],
            vec![2.0, 1.0, 1.0],
        ];
        let targets = [0, 1, 1, 0, 2];
        let tree = grow(&samples, &targets, 3);

        for (row, &target) in samples.iter().zip(targets.iter()) {
            assert_eq!(tree.predict(row), target);
        }
        assert!(tree.check().is_ok());
    }

    #[test]
    fn test_identical_rows_conflicting_labels() {
        let samples = vec![vec![1.0], vec![1.0], vec![1.0]];
        let tree = grow(&samples, &[0, 1, 1], 2);

        assert_eq!(tree.n_nodes(), 1);
        let proba = tree.predict_proba(&[1.0]);
        assert!((proba[0] - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(tree.predict(&[1.0]), 1);
    }

    #[test]
    fn test_depth_limit() {
        let samples = vec![vec![0.0], vec![1.0], vec![2.0], vec![3.0]];
        let mut rng = StdRng::seed_from_u64(1);
        let limited = TreeParams {
            max_depth: Some(1),
            ..params(1)
        };
        let tree = DecisionTree::grow(&samples, &[0, 1, 0, 1], vec![0, 1, 2, 3], 2, &limited, &mut rng);
        assert!(tree.depth() <= 1);
    }

    #[test]
    fn test_check_rejects_backward_child() {
        let tree = DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 0.5,
                    left: 0,
                    right: 1,
                },
                TreeNode::Leaf {
                    distribution: vec![1.0],
                },
            ],
            n_features: 1,
            n_classes: 1,
        };
        assert!(tree.check().is_err());
    }

    #[test]
    fn test_argmax_first_wins() {
        assert_eq!(argmax(&[0.2, 0.4, 0.4]), 1);
        assert_eq!(argmax(&[0.0]), 0);
    }
}
