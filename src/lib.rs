//! pointclass: supervised per-point classification for 3D point clouds.
//!
//! Assigns a categorical label to each point of a point cloud by training a
//! random-trees classifier on per-point numeric features (geometry, color,
//! scalar attributes) against a ground-truth classification attribute, then
//! applying the classifier to unseen points.
//!
//! # Key Types
//!
//! - [`Classifier`] - High-level train/evaluate/persist workflows
//! - [`FeatureDescriptor`] - Which per-point value channel feeds which column
//! - [`DatasetBuilder`] / [`Dataset`] - Feature-to-matrix extraction
//! - [`RandomTreesParams`] - Training hyperparameters
//! - [`PointCloud`] / [`Selection`] - Data source and row subsets
//!
//! # Training
//!
//! Build a slice of [`FeatureDescriptor`]s against a cloud carrying the
//! reserved `"Classification"` attribute, then call [`Classifier::train`].
//! Evaluation against an explicit test [`Selection`] yields
//! [`AccuracyMetrics`]; trained classifiers round-trip through
//! [`Classifier::save`] / [`Classifier::load`].
//!
//! # Backends
//!
//! The learning algorithm sits behind the narrow [`Model`] trait. The
//! default backend is [`RandomTrees`]; the workflows never depend on its
//! internals, so deterministic stubs can stand in for it (see [`testing`]).

// Re-export approx traits for users who want to compare predictions
pub use approx;

pub mod classifier;
pub mod cloud;
pub mod dataset;
pub mod feature;
pub mod logger;
pub mod model;
pub mod testing;

// =============================================================================
// Convenience Re-exports
// =============================================================================

// High-level workflow types
pub use classifier::{AccuracyMetrics, Classifier, Error};

// Data source types
pub use cloud::{PointCloud, ScalarField, Selection, CLASSIFICATION_FIELD};

// Feature description and value channels
pub use feature::source::{ResolveError, ValueSource};
pub use feature::{Axis, ColorChannel, FeatureCategory, FeatureDescriptor, FeatureSource};

// Dataset assembly
pub use dataset::{Dataset, DatasetBuilder, DatasetError};

// Model backend types
pub use model::{Model, ModelError, ParamError, RandomTrees, RandomTreesParams};

// Logging
pub use logger::{TrainingLogger, Verbosity};
