//! Random-trees hyperparameters.

use thiserror::Error;

/// Hyperparameters recognized by the [`RandomTrees`](super::RandomTrees)
/// backend.
///
/// Defaults match the classification tool's stock configuration: deep
/// trees (depth 25), splits allowed down to single samples, and a
/// 100-tree ensemble with no early stopping.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomTreesParams {
    /// Maximum tree depth.
    pub max_depth: usize,

    /// Minimum number of samples a node must hold to be split.
    pub min_sample_count: usize,

    /// Upper bound on the number of trees grown.
    pub max_tree_count: usize,

    /// Out-of-bag error threshold that ends ensemble growth early.
    ///
    /// When positive, growth stops as soon as the running out-of-bag
    /// error drops to this value. 0 disables early stopping and exactly
    /// `max_tree_count` trees are grown.
    pub term_epsilon: f64,

    /// Whether to retain per-feature importance during training.
    pub calc_var_importance: bool,

    /// Number of candidate features considered per split.
    ///
    /// 0 selects `sqrt(n_features)` at training time.
    pub active_var_count: usize,

    /// Seed for bootstrap and feature sampling. Fixed seeds yield
    /// identical forests.
    pub seed: u64,
}

impl Default for RandomTreesParams {
    fn default() -> Self {
        Self {
            max_depth: 25,
            min_sample_count: 1,
            max_tree_count: 100,
            term_epsilon: 0.0,
            calc_var_importance: false,
            active_var_count: 0,
            seed: 0,
        }
    }
}

impl RandomTreesParams {
    /// Validate parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if any count is zero or the termination
    /// threshold is negative or non-finite.
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.max_depth == 0 {
            return Err(ParamError::InvalidMaxDepth);
        }
        if self.min_sample_count == 0 {
            return Err(ParamError::InvalidMinSampleCount);
        }
        if self.max_tree_count == 0 {
            return Err(ParamError::InvalidMaxTreeCount);
        }
        if !self.term_epsilon.is_finite() || self.term_epsilon < 0.0 {
            return Err(ParamError::InvalidTermEpsilon(self.term_epsilon));
        }
        Ok(())
    }
}

/// Hyperparameter validation error.
#[derive(Debug, Clone, Error)]
pub enum ParamError {
    /// max_depth must be >= 1.
    #[error("max_depth must be at least 1")]
    InvalidMaxDepth,

    /// min_sample_count must be >= 1.
    #[error("min_sample_count must be at least 1")]
    InvalidMinSampleCount,

    /// max_tree_count must be >= 1.
    #[error("max_tree_count must be at least 1")]
    InvalidMaxTreeCount,

    /// term_epsilon must be finite and >= 0.
    #[error("term_epsilon must be a non-negative finite value, got {0}")]
    InvalidTermEpsilon(f64),
}
