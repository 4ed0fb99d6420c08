//! Trainable-model backends.
//!
//! [`Model`] is the narrow seam between the classification workflows and
//! the learning algorithm: train, predict one row, report trained state,
//! persist, restore. Nothing outside this module depends on a backend's
//! internals, which keeps the default [`RandomTrees`] implementation
//! swappable for deterministic stubs in tests.

mod params;
mod rtrees;

pub use params::{ParamError, RandomTreesParams};
pub use rtrees::RandomTrees;

use std::path::{Path, PathBuf};

use ndarray::{ArrayView1, ArrayView2};
use thiserror::Error;

/// Errors surfaced by a model backend.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The model has no trained state.
    #[error("model has not been trained yet")]
    NotTrained,

    /// Training rejected its input or did not converge. The message names
    /// the offending input where applicable.
    #[error("training failed: {0}")]
    TrainingFailed(String),

    /// A prediction row has a different width than the training matrix.
    #[error("sample has {got} features but the model was trained with {expected}")]
    FeatureCountMismatch { expected: usize, got: usize },

    /// A persisted-model file could not be opened or created.
    #[error("failed to access model file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A persisted-model file could not be encoded or decoded.
    #[error("invalid model file '{path}': {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A persisted-model file carries an unrecognized envelope.
    #[error("model file '{path}' has unsupported format '{format}' version {version}")]
    UnsupportedFormat {
        path: PathBuf,
        format: String,
        version: u32,
    },

    /// A persisted-model file decoded but describes an inconsistent model.
    #[error("model file '{path}' contains an invalid model: {reason}")]
    CorruptModel { path: PathBuf, reason: String },
}

/// Narrow interface over the trainable-model capability.
///
/// # State machine
///
/// Untrained → Trained (via [`train`](Self::train)) → Trained (via
/// [`load`](Self::load)). A failed `train` reverts the backend to
/// Untrained; no partially-trained state is ever retained. `load` replaces
/// the state wholesale and succeeds structurally even when the restored
/// model reports itself untrained — callers check
/// [`is_trained`](Self::is_trained) and treat that case as a warning.
pub trait Model: Default {
    /// Fit the model to a sample matrix `[n_samples, n_features]` and a
    /// label vector of matching length.
    fn train(
        &mut self,
        samples: ArrayView2<f32>,
        labels: &[i32],
        params: &RandomTreesParams,
    ) -> Result<(), ModelError>;

    /// Predict the class label of one sample row.
    fn predict(&self, sample: ArrayView1<f32>) -> Result<i32, ModelError>;

    /// Whether the model holds trained state.
    fn is_trained(&self) -> bool;

    /// Persist the trained model to a file.
    fn save(&self, path: &Path) -> Result<(), ModelError>;

    /// Replace this model with the one persisted at `path`.
    fn load(&mut self, path: &Path) -> Result<(), ModelError>;
}
