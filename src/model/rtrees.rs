//! Random-trees backend.
//!
//! A self-contained random-forest classifier: every tree is grown on a
//! bootstrap resample with Gini-impurity splits chosen among a random
//! feature subsample, and prediction is a majority vote across trees.
//! Optional extras follow the hyperparameters: per-feature importance
//! (mean decrease in impurity, normalized to sum 1) and early stopping on
//! the running out-of-bag error.
//!
//! Trained state persists as a versioned JSON envelope; the byte layout is
//! owned by this backend and is not part of the workflow contract.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use ndarray::{ArrayView1, ArrayView2};
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use super::{Model, ModelError, RandomTreesParams};

/// Identifies the persisted envelope.
const FORMAT_TAG: &str = "pointclass.rtrees";

/// Current persisted format version.
const FORMAT_VERSION: u32 = 1;

/// Minimum impurity decrease for a split to be worth keeping.
const MIN_GAIN: f64 = 1e-12;

// ============================================================================
// Trees
// ============================================================================

/// One node of a decision tree, stored in a flat vector.
///
/// Children always sit at higher indices than their parent, so traversal
/// from the root terminates.
#[derive(Debug, Clone, Serialize, Deserialize)]
enum Node {
    /// Binary split: `value < threshold` goes left.
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
    },
    /// Terminal node holding a compact class id.
    Leaf { class: usize },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    /// Route a sample from the root to a leaf.
    fn predict(&self, sample: ArrayView1<'_, f32>) -> usize {
        let mut node = 0usize;
        loop {
            match self.nodes[node] {
                Node::Leaf { class } => return class,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if sample[feature] < threshold { left } else { right };
                }
            }
        }
    }
}

/// A trained ensemble.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Forest {
    /// Width of the training matrix.
    n_features: usize,
    /// Distinct class labels, ascending; tree leaves index into this.
    classes: Vec<i32>,
    trees: Vec<DecisionTree>,
    /// Normalized mean decrease in impurity, when requested.
    var_importance: Option<Vec<f64>>,
}

impl Forest {
    /// Majority vote across trees. Ties resolve toward the lowest class id.
    fn predict(&self, sample: ArrayView1<'_, f32>) -> i32 {
        let mut votes = vec![0u32; self.classes.len()];
        for tree in &self.trees {
            votes[tree.predict(sample)] += 1;
        }
        let mut best = 0usize;
        for (class, &count) in votes.iter().enumerate().skip(1) {
            if count > votes[best] {
                best = class;
            }
        }
        self.classes[best]
    }

    /// Check structural invariants of a deserialized forest: class ids and
    /// feature indices in range, child links strictly forward.
    fn validate(&self) -> Result<(), String> {
        if self.n_features == 0 {
            return Err("zero feature width".to_string());
        }
        if let Some(importance) = &self.var_importance {
            if importance.len() != self.n_features {
                return Err(format!(
                    "importance has {} entries for {} features",
                    importance.len(),
                    self.n_features
                ));
            }
        }
        for (tree_idx, tree) in self.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(format!("tree {tree_idx} has no nodes"));
            }
            for (node_idx, node) in tree.nodes.iter().enumerate() {
                match *node {
                    Node::Leaf { class } => {
                        if class >= self.classes.len() {
                            return Err(format!(
                                "tree {tree_idx} leaf {node_idx} references class {class} of {}",
                                self.classes.len()
                            ));
                        }
                    }
                    Node::Split {
                        feature,
                        left,
                        right,
                        ..
                    } => {
                        if feature >= self.n_features {
                            return Err(format!(
                                "tree {tree_idx} node {node_idx} splits on feature {feature} of {}",
                                self.n_features
                            ));
                        }
                        let n_nodes = tree.nodes.len();
                        if left <= node_idx || right <= node_idx || left >= n_nodes || right >= n_nodes
                        {
                            return Err(format!(
                                "tree {tree_idx} node {node_idx} has non-forward child links"
                            ));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// Training
// ============================================================================

/// Gini impurity of a class-count vector over `n` samples.
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

/// Best split found for one node.
struct Split {
    feature: usize,
    threshold: f32,
    gain: f64,
}

/// Grows one tree over a bootstrap sample.
struct TreeGrower<'s, 'a> {
    samples: ArrayView2<'s, f32>,
    class_ids: &'a [usize],
    n_classes: usize,
    n_total: usize,
    max_depth: usize,
    min_sample_count: usize,
    n_active: usize,
    feature_scratch: Vec<usize>,
    importance: &'a mut [f64],
}

impl TreeGrower<'_, '_> {
    fn grow(&mut self, rows: Vec<usize>, rng: &mut StdRng) -> DecisionTree {
        let mut nodes = Vec::new();
        self.grow_node(rows, 0, &mut nodes, rng);
        DecisionTree { nodes }
    }

    /// Grow one node, returning its index. A placeholder leaf is pushed
    /// first and overwritten once both children exist, which keeps child
    /// links strictly forward.
    fn grow_node(
        &mut self,
        rows: Vec<usize>,
        depth: usize,
        nodes: &mut Vec<Node>,
        rng: &mut StdRng,
    ) -> usize {
        let counts = self.class_counts(&rows);
        let node_idx = nodes.len();
        nodes.push(Node::Leaf {
            class: majority(&counts),
        });

        if depth >= self.max_depth
            || rows.len() < self.min_sample_count
            || counts.iter().filter(|&&c| c > 0).count() <= 1
        {
            return node_idx;
        }

        let Some(split) = self.best_split(&rows, &counts, rng) else {
            return node_idx;
        };

        self.importance[split.feature] += split.gain * rows.len() as f64 / self.n_total as f64;

        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
            .into_iter()
            .partition(|&row| self.samples[[row, split.feature]] < split.threshold);

        let left = self.grow_node(left_rows, depth + 1, nodes, rng);
        let right = self.grow_node(right_rows, depth + 1, nodes, rng);
        nodes[node_idx] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        node_idx
    }

    fn class_counts(&self, rows: &[usize]) -> Vec<usize> {
        let mut counts = vec![0usize; self.n_classes];
        for &row in rows {
            counts[self.class_ids[row]] += 1;
        }
        counts
    }

    /// Scan a random feature subsample for the impurity-minimizing
    /// threshold. Returns `None` when no candidate improves on the parent.
    fn best_split(&mut self, rows: &[usize], counts: &[usize], rng: &mut StdRng) -> Option<Split> {
        let parent_gini = gini(counts, rows.len());
        let n = rows.len();
        let n_features = self.feature_scratch.len();

        // partial Fisher-Yates: the first n_active entries become the
        // candidate features for this node
        for k in 0..self.n_active {
            let j = rng.gen_range(k..n_features);
            self.feature_scratch.swap(k, j);
        }

        let mut best: Option<Split> = None;
        let mut pairs: Vec<(f32, usize)> = Vec::with_capacity(n);
        let mut left_counts = vec![0usize; self.n_classes];

        for candidate in 0..self.n_active {
            let feature = self.feature_scratch[candidate];
            pairs.clear();
            pairs.extend(
                rows.iter()
                    .map(|&row| (self.samples[[row, feature]], self.class_ids[row])),
            );
            pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

            left_counts.iter_mut().for_each(|c| *c = 0);
            for i in 0..n - 1 {
                left_counts[pairs[i].1] += 1;
                if pairs[i].0 >= pairs[i + 1].0 {
                    continue;
                }
                let n_left = i + 1;
                let n_right = n - n_left;
                let right_counts: Vec<usize> = counts
                    .iter()
                    .zip(left_counts.iter())
                    .map(|(&total, &left)| total - left)
                    .collect();
                let weighted = (n_left as f64 * gini(&left_counts, n_left)
                    + n_right as f64 * gini(&right_counts, n_right))
                    / n as f64;
                let gain = parent_gini - weighted;
                if gain > MIN_GAIN && best.as_ref().map_or(true, |b| gain > b.gain) {
                    best = Some(Split {
                        feature,
                        threshold: (pairs[i].0 + pairs[i + 1].0) / 2.0,
                        gain,
                    });
                }
            }
        }
        best
    }
}

/// Index of the largest count; ties resolve toward the lowest class id.
fn majority(counts: &[usize]) -> usize {
    let mut best = 0usize;
    for (class, &count) in counts.iter().enumerate().skip(1) {
        if count > counts[best] {
            best = class;
        }
    }
    best
}

// ============================================================================
// RandomTrees
// ============================================================================

/// Persisted envelope around a forest.
#[derive(Debug, Serialize, Deserialize)]
struct ModelFile {
    format: String,
    version: u32,
    forest: Option<Forest>,
}

/// The default [`Model`] backend: a random-trees classifier.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use pointclass::model::{Model, RandomTrees, RandomTreesParams};
///
/// let samples = array![[-1.0f32], [-0.8], [0.9], [1.2]];
/// let labels = [0, 0, 1, 1];
///
/// let mut model = RandomTrees::default();
/// model
///     .train(samples.view(), &labels, &RandomTreesParams::default())
///     .unwrap();
/// assert_eq!(model.predict(array![1.0f32].view()).unwrap(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RandomTrees {
    forest: Option<Forest>,
}

impl RandomTrees {
    /// Per-feature importance of the last training run, when
    /// [`calc_var_importance`](RandomTreesParams::calc_var_importance) was
    /// set. Non-negative, sums to 1 unless every split was gainless.
    pub fn variable_importance(&self) -> Option<&[f64]> {
        self.forest
            .as_ref()
            .and_then(|f| f.var_importance.as_deref())
    }

    /// Number of trees in the trained ensemble (0 when untrained).
    pub fn tree_count(&self) -> usize {
        self.forest.as_ref().map_or(0, |f| f.trees.len())
    }

    fn train_forest(
        samples: ArrayView2<'_, f32>,
        labels: &[i32],
        params: &RandomTreesParams,
    ) -> Result<Forest, ModelError> {
        let n_samples = samples.nrows();
        let n_features = samples.ncols();

        if n_samples == 0 {
            return Err(ModelError::TrainingFailed(
                "training set is empty".to_string(),
            ));
        }
        if n_features == 0 {
            return Err(ModelError::TrainingFailed(
                "training set has no feature columns".to_string(),
            ));
        }
        if labels.len() != n_samples {
            return Err(ModelError::TrainingFailed(format!(
                "label count {} does not match sample count {}",
                labels.len(),
                n_samples
            )));
        }
        for (row, sample) in samples.outer_iter().enumerate() {
            for (column, &value) in sample.iter().enumerate() {
                if !value.is_finite() {
                    return Err(ModelError::TrainingFailed(format!(
                        "non-finite feature value at row {row}, column {column}"
                    )));
                }
            }
        }

        let mut classes: Vec<i32> = labels.to_vec();
        classes.sort_unstable();
        classes.dedup();
        let class_ids: Vec<usize> = labels
            .iter()
            .map(|label| {
                classes
                    .binary_search(label)
                    .expect("label is present in the class table")
            })
            .collect();
        let n_classes = classes.len();

        let n_active = if params.active_var_count == 0 {
            ((n_features as f64).sqrt().round() as usize).max(1)
        } else {
            params.active_var_count.min(n_features)
        };

        let mut rng = StdRng::seed_from_u64(params.seed);
        let mut trees = Vec::new();
        let mut importance = vec![0.0f64; n_features];

        // out-of-bag vote tally, kept only when early stopping is on
        let track_oob = params.term_epsilon > 0.0;
        let mut oob_votes = vec![vec![0u32; n_classes]; if track_oob { n_samples } else { 0 }];

        for _ in 0..params.max_tree_count {
            let rows: Vec<usize> = (0..n_samples)
                .map(|_| rng.gen_range(0..n_samples))
                .collect();

            let mut in_bag = vec![false; if track_oob { n_samples } else { 0 }];
            if track_oob {
                for &row in &rows {
                    in_bag[row] = true;
                }
            }

            let mut grower = TreeGrower {
                samples,
                class_ids: &class_ids,
                n_classes,
                n_total: n_samples,
                max_depth: params.max_depth,
                min_sample_count: params.min_sample_count,
                n_active,
                feature_scratch: (0..n_features).collect(),
                importance: &mut importance,
            };
            let tree = grower.grow(rows, &mut rng);

            if track_oob {
                for row in 0..n_samples {
                    if !in_bag[row] {
                        oob_votes[row][tree.predict(samples.row(row))] += 1;
                    }
                }
            }
            trees.push(tree);

            if track_oob {
                if let Some(error) = oob_error(&oob_votes, &class_ids) {
                    if error <= params.term_epsilon {
                        break;
                    }
                }
            }
        }

        let var_importance = params.calc_var_importance.then(|| {
            let total: f64 = importance.iter().sum();
            if total > 0.0 {
                importance.iter().map(|v| v / total).collect()
            } else {
                importance.clone()
            }
        });

        Ok(Forest {
            n_features,
            classes,
            trees,
            var_importance,
        })
    }
}

/// Fraction of out-of-bag samples whose vote majority disagrees with their
/// label. `None` until at least one sample has received a vote.
fn oob_error(votes: &[Vec<u32>], class_ids: &[usize]) -> Option<f64> {
    let mut voted = 0usize;
    let mut wrong = 0usize;
    for (row, tally) in votes.iter().enumerate() {
        if tally.iter().all(|&v| v == 0) {
            continue;
        }
        voted += 1;
        if majority_u32(tally) != class_ids[row] {
            wrong += 1;
        }
    }
    (voted > 0).then(|| wrong as f64 / voted as f64)
}

fn majority_u32(counts: &[u32]) -> usize {
    let mut best = 0usize;
    for (class, &count) in counts.iter().enumerate().skip(1) {
        if count > counts[best] {
            best = class;
        }
    }
    best
}

impl Model for RandomTrees {
    fn train(
        &mut self,
        samples: ArrayView2<f32>,
        labels: &[i32],
        params: &RandomTreesParams,
    ) -> Result<(), ModelError> {
        // discard any previous state up front: a failed run leaves the
        // model untrained, never partially trained
        self.forest = None;
        self.forest = Some(Self::train_forest(samples, labels, params)?);
        Ok(())
    }

    fn predict(&self, sample: ArrayView1<f32>) -> Result<i32, ModelError> {
        let forest = self.forest.as_ref().ok_or(ModelError::NotTrained)?;
        if sample.len() != forest.n_features {
            return Err(ModelError::FeatureCountMismatch {
                expected: forest.n_features,
                got: sample.len(),
            });
        }
        Ok(forest.predict(sample))
    }

    fn is_trained(&self) -> bool {
        self.forest.as_ref().is_some_and(|f| !f.trees.is_empty())
    }

    fn save(&self, path: &Path) -> Result<(), ModelError> {
        let forest = self.forest.as_ref().ok_or(ModelError::NotTrained)?;
        let envelope = ModelFile {
            format: FORMAT_TAG.to_string(),
            version: FORMAT_VERSION,
            forest: Some(forest.clone()),
        };
        let file = File::create(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &envelope).map_err(|source| ModelError::Format {
            path: path.to_path_buf(),
            source,
        })?;
        writer.flush().map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    fn load(&mut self, path: &Path) -> Result<(), ModelError> {
        let file = File::open(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let envelope: ModelFile = serde_json::from_reader(BufReader::new(file)).map_err(
            |source| ModelError::Format {
                path: path.to_path_buf(),
                source,
            },
        )?;
        if envelope.format != FORMAT_TAG || envelope.version != FORMAT_VERSION {
            return Err(ModelError::UnsupportedFormat {
                path: path.to_path_buf(),
                format: envelope.format,
                version: envelope.version,
            });
        }
        if let Some(forest) = &envelope.forest {
            forest.validate().map_err(|reason| ModelError::CorruptModel {
                path: path.to_path_buf(),
                reason,
            })?;
        }
        // wholesale replacement; an absent forest loads as untrained
        self.forest = envelope.forest;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    /// Two well-separated clusters on the first feature.
    fn separable(n: usize) -> (Array2<f32>, Vec<i32>) {
        let mut samples = Array2::zeros((n, 2));
        let mut labels = Vec::with_capacity(n);
        for i in 0..n {
            let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
            samples[[i, 0]] = sign * (0.5 + 0.4 * (i as f32 / n as f32));
            samples[[i, 1]] = (i % 7) as f32;
            labels.push(if sign > 0.0 { 1 } else { 0 });
        }
        (samples, labels)
    }

    #[test]
    fn learns_a_separable_problem() {
        let (samples, labels) = separable(64);
        let params = RandomTreesParams {
            active_var_count: 2,
            ..Default::default()
        };
        let mut model = RandomTrees::default();
        model.train(samples.view(), &labels, &params).unwrap();
        assert!(model.is_trained());
        for (row, &label) in samples.outer_iter().zip(&labels) {
            assert_eq!(model.predict(row).unwrap(), label);
        }
    }

    #[test]
    fn fixed_seed_is_deterministic() {
        let (samples, labels) = separable(40);
        let params = RandomTreesParams {
            seed: 7,
            max_tree_count: 20,
            ..Default::default()
        };

        let mut a = RandomTrees::default();
        a.train(samples.view(), &labels, &params).unwrap();
        let mut b = RandomTrees::default();
        b.train(samples.view(), &labels, &params).unwrap();

        let probe = array![0.05f32, 3.0];
        assert_eq!(a.predict(probe.view()).unwrap(), b.predict(probe.view()).unwrap());
        assert_eq!(a.tree_count(), b.tree_count());
    }

    #[test]
    fn untrained_prediction_fails() {
        let model = RandomTrees::default();
        let err = model.predict(array![0.0f32].view()).unwrap_err();
        assert!(matches!(err, ModelError::NotTrained));
    }

    #[test]
    fn wrong_sample_width_fails() {
        let (samples, labels) = separable(16);
        let mut model = RandomTrees::default();
        model
            .train(samples.view(), &labels, &RandomTreesParams::default())
            .unwrap();
        let err = model.predict(array![0.0f32].view()).unwrap_err();
        assert!(matches!(
            err,
            ModelError::FeatureCountMismatch { expected: 2, got: 1 }
        ));
    }

    #[test]
    fn empty_input_fails_training() {
        let samples = Array2::<f32>::zeros((0, 2));
        let mut model = RandomTrees::default();
        let err = model
            .train(samples.view(), &[], &RandomTreesParams::default())
            .unwrap_err();
        assert!(matches!(err, ModelError::TrainingFailed(_)));
        assert!(!model.is_trained());
    }

    #[test]
    fn non_finite_values_fail_training_and_revert() {
        let (samples, labels) = separable(16);
        let mut model = RandomTrees::default();
        model
            .train(samples.view(), &labels, &RandomTreesParams::default())
            .unwrap();
        assert!(model.is_trained());

        let bad = array![[f32::NAN, 0.0], [1.0, 2.0]];
        let err = model
            .train(bad.view(), &[0, 1], &RandomTreesParams::default())
            .unwrap_err();
        assert!(matches!(err, ModelError::TrainingFailed(ref msg) if msg.contains("row 0")));
        // no partially-trained state survives a failed run
        assert!(!model.is_trained());
    }

    #[test]
    fn label_count_mismatch_fails_training() {
        let (samples, _) = separable(8);
        let mut model = RandomTrees::default();
        let err = model
            .train(samples.view(), &[0, 1], &RandomTreesParams::default())
            .unwrap_err();
        assert!(matches!(err, ModelError::TrainingFailed(_)));
    }

    #[test]
    fn single_class_input_predicts_that_class() {
        let samples = array![[1.0f32], [2.0], [3.0]];
        let mut model = RandomTrees::default();
        model
            .train(samples.view(), &[5, 5, 5], &RandomTreesParams::default())
            .unwrap();
        assert_eq!(model.predict(array![9.0f32].view()).unwrap(), 5);
    }

    #[test]
    fn variable_importance_is_normalized_and_informative() {
        let (samples, labels) = separable(64);
        let params = RandomTreesParams {
            calc_var_importance: true,
            active_var_count: 2,
            ..Default::default()
        };
        let mut model = RandomTrees::default();
        model.train(samples.view(), &labels, &params).unwrap();

        let importance = model.variable_importance().unwrap();
        assert_eq!(importance.len(), 2);
        assert!(importance.iter().all(|&v| v >= 0.0));
        let total: f64 = importance.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
        // the split feature carries the signal
        assert!(importance[0] > importance[1]);
    }

    #[test]
    fn importance_is_absent_unless_requested() {
        let (samples, labels) = separable(16);
        let mut model = RandomTrees::default();
        model
            .train(samples.view(), &labels, &RandomTreesParams::default())
            .unwrap();
        assert!(model.variable_importance().is_none());
    }

    #[test]
    fn early_stopping_caps_the_ensemble() {
        let (samples, labels) = separable(64);
        let params = RandomTreesParams {
            term_epsilon: 0.05,
            max_tree_count: 100,
            active_var_count: 2,
            ..Default::default()
        };
        let mut model = RandomTrees::default();
        model.train(samples.view(), &labels, &params).unwrap();
        // a cleanly separable problem converges long before the cap
        assert!(model.tree_count() <= 10);
        assert!(model.tree_count() >= 1);
    }

    #[test]
    fn save_load_round_trips_predictions() {
        let (samples, labels) = separable(32);
        let mut model = RandomTrees::default();
        model
            .train(samples.view(), &labels, &RandomTreesParams::default())
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        model.save(&path).unwrap();

        let mut restored = RandomTrees::default();
        restored.load(&path).unwrap();
        assert!(restored.is_trained());

        for row in samples.outer_iter() {
            assert_eq!(model.predict(row).unwrap(), restored.predict(row).unwrap());
        }
    }

    #[test]
    fn save_requires_trained_state() {
        let model = RandomTrees::default();
        let dir = tempfile::tempdir().unwrap();
        let err = model.save(&dir.path().join("m.json")).unwrap_err();
        assert!(matches!(err, ModelError::NotTrained));
    }

    #[test]
    fn load_accepts_an_untrained_envelope() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("untrained.json");
        std::fs::write(
            &path,
            format!(r#"{{"format":"{FORMAT_TAG}","version":{FORMAT_VERSION},"forest":null}}"#),
        )
        .unwrap();

        let mut model = RandomTrees::default();
        model.load(&path).unwrap();
        assert!(!model.is_trained());
    }

    #[test]
    fn load_rejects_foreign_envelopes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("foreign.json");
        std::fs::write(&path, r#"{"format":"something.else","version":1,"forest":null}"#)
            .unwrap();

        let mut model = RandomTrees::default();
        let err = model.load(&path).unwrap_err();
        assert!(matches!(err, ModelError::UnsupportedFormat { .. }));
    }

    #[test]
    fn load_rejects_corrupt_forests() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.json");
        // leaf references class 3 but the class table has one entry
        std::fs::write(
            &path,
            format!(
                r#"{{"format":"{FORMAT_TAG}","version":{FORMAT_VERSION},"forest":{{"n_features":1,"classes":[0],"trees":[{{"nodes":[{{"Leaf":{{"class":3}}}}]}}],"var_importance":null}}}}"#
            ),
        )
        .unwrap();

        let mut model = RandomTrees::default();
        let err = model.load(&path).unwrap_err();
        assert!(matches!(err, ModelError::CorruptModel { .. }));
    }

    #[test]
    fn load_reports_missing_files() {
        let mut model = RandomTrees::default();
        let err = model.load(Path::new("/nonexistent/model.json")).unwrap_err();
        assert!(matches!(err, ModelError::Io { .. }));
    }
}
