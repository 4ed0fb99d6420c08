//! Training and evaluation workflows.
//!
//! [`Classifier`] exclusively owns a model backend and orchestrates the
//! supervised workflows around it: validation → dataset build → model
//! call. Retraining or reloading replaces the owned model entirely; there
//! is no partial update.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::cloud::Selection;
use crate::dataset::{DatasetBuilder, DatasetError};
use crate::feature::FeatureDescriptor;
use crate::logger::{TrainingLogger, Verbosity};
use crate::model::{Model, ModelError, ParamError, RandomTrees, RandomTreesParams};

/// Workflow-level errors.
///
/// Every failure carries a human-readable message naming the offending
/// input; none abort the process.
#[derive(Debug, Error)]
pub enum Error {
    /// The classifier has no trained model.
    #[error("classifier has not been trained yet")]
    NotTrained,

    /// Evaluation was invoked without a test subset.
    #[error("no test subset was provided")]
    MissingSubset,

    /// A training subset is bound to a different cloud than the features.
    #[error("train subset is bound to a different cloud than the features")]
    InvalidSubset,

    /// Invalid hyperparameters.
    #[error(transparent)]
    Params(#[from] ParamError),

    /// Dataset validation or assembly failed.
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// The model backend failed.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Classification accuracy over an evaluation subset.
///
/// Computed fresh per evaluation call; immutable result value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AccuracyMetrics {
    /// Number of evaluated rows.
    pub sample_count: usize,
    /// Rows whose prediction matched the ground truth exactly.
    pub correct_count: usize,
    /// `correct_count / sample_count`, 0 when the subset was empty.
    pub ratio: f64,
}

/// Per-point classifier around an exclusively owned model backend.
///
/// Generic over the backend so tests can substitute a deterministic stub;
/// the default is [`RandomTrees`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use pointclass::classifier::Classifier;
/// use pointclass::cloud::{PointCloud, Selection, CLASSIFICATION_FIELD};
/// use pointclass::feature::{Axis, FeatureDescriptor};
/// use pointclass::model::RandomTreesParams;
///
/// let cloud = Arc::new(
///     PointCloud::new(
///         "scan",
///         vec![[-1.0, 0.0, 0.0], [-0.8, 0.0, 0.0], [0.9, 0.0, 0.0], [1.1, 0.0, 0.0]],
///     )
///     .with_attribute(CLASSIFICATION_FIELD, vec![0.0, 0.0, 1.0, 1.0]),
/// );
/// let features = vec![FeatureDescriptor::coordinate(&cloud, Axis::X)];
///
/// let mut classifier = Classifier::new();
/// classifier
///     .train(&features, None, &RandomTreesParams::default())
///     .unwrap();
///
/// let test = Selection::full(Arc::clone(&cloud));
/// let metrics = classifier.evaluate(&features, Some(&test)).unwrap();
/// assert_eq!(metrics.ratio, 1.0);
/// ```
#[derive(Debug, Default)]
pub struct Classifier<M: Model = RandomTrees> {
    model: M,
    logger: TrainingLogger,
}

impl Classifier<RandomTrees> {
    /// Classifier with the default random-trees backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: Model> Classifier<M> {
    /// Set the logging verbosity.
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.logger = TrainingLogger::new(verbosity);
        self
    }

    /// Borrow the owned backend.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Whether the owned model holds trained state.
    pub fn is_trained(&self) -> bool {
        self.model.is_trained()
    }

    /// Train the classifier.
    ///
    /// The training cloud is the first descriptor's cloud; rows default to
    /// every point of that cloud unless `subset` narrows them. The
    /// ground-truth classification attribute must be present.
    ///
    /// # Errors
    ///
    /// Validation failures ([`ParamError`], empty feature set, cross-cloud
    /// subset, dataset errors) leave a previously trained model untouched.
    /// A failure inside the backend's own training run leaves the model
    /// untrained.
    pub fn train(
        &mut self,
        features: &[FeatureDescriptor],
        subset: Option<&Selection>,
        params: &RandomTreesParams,
    ) -> Result<(), Error> {
        params.validate()?;
        if features.is_empty() {
            return Err(DatasetError::EmptyFeatureSet.into());
        }
        let cloud = Arc::clone(features[0].cloud());
        if let Some(subset) = subset {
            if !Arc::ptr_eq(subset.cloud(), &cloud) {
                return Err(Error::InvalidSubset);
            }
        }

        let n_rows = subset.map_or(cloud.point_count(), Selection::len);
        self.logger.info(format!(
            "training data: {} samples with {} feature(s)",
            n_rows,
            features.len()
        ));

        let mut builder = DatasetBuilder::new(features, &cloud).with_labels();
        if let Some(subset) = subset {
            builder = builder.subset(subset);
        }
        let dataset = builder.build()?;
        let labels = dataset.labels().expect("dataset was built with labels");

        self.model.train(dataset.samples(), labels, params)?;
        self.logger.debug("training finished");
        Ok(())
    }

    /// Evaluate the classifier against an explicit test subset.
    ///
    /// The subset's cloud must carry the ground-truth classification
    /// attribute, which scores each prediction by exact integer
    /// comparison.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NotTrained`] before any dataset assembly, with
    /// [`Error::MissingSubset`] when no subset is given, and propagates
    /// dataset errors unchanged.
    pub fn evaluate(
        &self,
        features: &[FeatureDescriptor],
        subset: Option<&Selection>,
    ) -> Result<AccuracyMetrics, Error> {
        if !self.model.is_trained() {
            return Err(Error::NotTrained);
        }
        if features.is_empty() {
            return Err(DatasetError::EmptyFeatureSet.into());
        }
        let subset = subset.ok_or(Error::MissingSubset)?;
        let cloud = Arc::clone(subset.cloud());

        self.logger.info(format!(
            "testing data: {} samples with {} feature(s)",
            subset.len(),
            features.len()
        ));

        let dataset = DatasetBuilder::new(features, &cloud)
            .subset(subset)
            .with_labels()
            .build()?;
        let labels = dataset.labels().expect("dataset was built with labels");

        let mut correct_count = 0usize;
        for (row, &label) in dataset.samples().outer_iter().zip(labels) {
            if self.model.predict(row)? == label {
                correct_count += 1;
            }
        }

        let sample_count = dataset.n_samples();
        let ratio = if sample_count > 0 {
            correct_count as f64 / sample_count as f64
        } else {
            self.logger
                .warn("evaluation subset is empty; accuracy is uninformative");
            0.0
        };

        Ok(AccuracyMetrics {
            sample_count,
            correct_count,
            ratio,
        })
    }

    /// Persist the trained model.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NotTrained`] when there is nothing to save.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        if !self.model.is_trained() {
            return Err(Error::NotTrained);
        }
        self.model.save(path)?;
        self.logger
            .info(format!("classifier saved to '{}'", path.display()));
        Ok(())
    }

    /// Replace the owned model with one restored from a file.
    ///
    /// Succeeds structurally even when the restored model reports itself
    /// untrained; that case is logged as a warning and left to the caller
    /// to check via [`is_trained`](Self::is_trained).
    pub fn load(&mut self, path: &Path) -> Result<(), Error> {
        self.model.load(path)?;
        if !self.model.is_trained() {
            self.logger
                .warn("loaded classifier does not seem to be trained");
        }
        Ok(())
    }
}
