//! Dataset assembly.
//!
//! [`DatasetBuilder`] turns an ordered slice of feature descriptors, a
//! cloud, and an optional row subset into a dense sample matrix (rows =
//! samples, columns = features) plus, when requested, a parallel label
//! vector read from the reserved ground-truth attribute.
//!
//! Assembly is all-or-nothing: every validation or resolution failure
//! aborts the build and no partial matrix is ever returned. Each
//! descriptor's value source is resolved once per build (not once per
//! row); the fill loop is column-outer, row-inner.

use std::sync::Arc;

use ndarray::{Array2, ArrayView2};
use thiserror::Error;

use crate::cloud::{PointCloud, ScalarField, Selection, CLASSIFICATION_FIELD};
use crate::feature::source::{ResolveError, ValueSource};
use crate::feature::FeatureDescriptor;

/// Dataset validation/assembly errors.
#[derive(Debug, Clone, Error)]
pub enum DatasetError {
    /// The descriptor slice was empty.
    #[error("no features were provided")]
    EmptyFeatureSet,

    /// A descriptor is bound to a different cloud than the build target.
    #[error("feature '{feature}' is bound to a different cloud than '{expected}'")]
    CloudMismatch { feature: String, expected: String },

    /// The subset is bound to a different cloud than the build target.
    #[error("subset is bound to a different cloud than '{expected}'")]
    SubsetMismatch { expected: String },

    /// A subset index does not address a point of the cloud.
    #[error("subset index {index} is out of bounds for cloud '{cloud}' with {point_count} points")]
    SubsetIndexOutOfBounds {
        index: u32,
        cloud: String,
        point_count: usize,
    },

    /// Labels were requested but the reserved classification attribute is
    /// absent.
    #[error("missing '{}' attribute on cloud '{cloud}'", CLASSIFICATION_FIELD)]
    MissingGroundTruth { cloud: String },

    /// The classification attribute covers fewer points than the cloud.
    #[error(
        "'{}' attribute on cloud '{cloud}' has {len} values but the cloud has {point_count} points",
        CLASSIFICATION_FIELD
    )]
    TruncatedGroundTruth {
        cloud: String,
        len: usize,
        point_count: usize,
    },

    /// A descriptor's value source failed to resolve.
    #[error("feature '{feature}': {source}")]
    Source {
        feature: String,
        #[source]
        source: ResolveError,
    },
}

// =============================================================================
// Dataset
// =============================================================================

/// An assembled sample matrix, ready for a trainable model.
///
/// Built fresh per train/evaluate call and owned exclusively by the
/// workflow that built it; never cached or mutated after construction.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Sample data: `[n_samples, n_features]` (row-major).
    samples: Array2<f32>,
    /// Ground-truth labels, one per row, when requested.
    labels: Option<Vec<i32>>,
}

impl Dataset {
    /// Number of sample rows.
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.samples.nrows()
    }

    /// Number of feature columns.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.samples.ncols()
    }

    /// View of the sample matrix, `[n_samples, n_features]`.
    pub fn samples(&self) -> ArrayView2<'_, f32> {
        self.samples.view()
    }

    /// Ground-truth labels, if the dataset was built with them.
    pub fn labels(&self) -> Option<&[i32]> {
        self.labels.as_deref()
    }
}

// =============================================================================
// DatasetBuilder
// =============================================================================

/// Builder for dataset assembly.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use pointclass::cloud::{PointCloud, CLASSIFICATION_FIELD};
/// use pointclass::dataset::DatasetBuilder;
/// use pointclass::feature::{Axis, FeatureDescriptor};
///
/// let cloud = Arc::new(
///     PointCloud::new("scan", vec![[0.0, 0.0, 1.0], [1.0, 0.0, 2.0]])
///         .with_attribute(CLASSIFICATION_FIELD, vec![1.0, 2.0]),
/// );
/// let features = vec![FeatureDescriptor::coordinate(&cloud, Axis::Z)];
///
/// let dataset = DatasetBuilder::new(&features, &cloud)
///     .with_labels()
///     .build()
///     .unwrap();
///
/// assert_eq!(dataset.n_samples(), 2);
/// assert_eq!(dataset.labels(), Some(&[1, 2][..]));
/// ```
#[derive(Debug)]
pub struct DatasetBuilder<'a> {
    features: &'a [FeatureDescriptor],
    cloud: &'a Arc<PointCloud>,
    subset: Option<&'a Selection>,
    want_labels: bool,
}

impl<'a> DatasetBuilder<'a> {
    /// Create a builder over a descriptor slice and its target cloud.
    pub fn new(features: &'a [FeatureDescriptor], cloud: &'a Arc<PointCloud>) -> Self {
        Self {
            features,
            cloud,
            subset: None,
            want_labels: false,
        }
    }

    /// Restrict rows to an explicit selection.
    ///
    /// Without a subset, the build covers every point of the cloud.
    pub fn subset(mut self, subset: &'a Selection) -> Self {
        self.subset = Some(subset);
        self
    }

    /// Also read the ground-truth classification attribute into a label
    /// vector parallel to the rows.
    pub fn with_labels(mut self) -> Self {
        self.want_labels = true;
        self
    }

    /// Assemble the dataset.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if:
    /// - No descriptors were provided
    /// - A descriptor or the subset is bound to a different cloud
    /// - A subset index is out of bounds
    /// - Labels were requested but the ground-truth attribute is missing
    ///   or truncated
    /// - A value source fails to resolve (the error names the offending
    ///   feature)
    pub fn build(self) -> Result<Dataset, DatasetError> {
        if self.features.is_empty() {
            return Err(DatasetError::EmptyFeatureSet);
        }
        for feature in self.features {
            if !Arc::ptr_eq(feature.cloud(), self.cloud) {
                return Err(DatasetError::CloudMismatch {
                    feature: feature.to_string(),
                    expected: self.cloud.name().to_string(),
                });
            }
        }

        let point_count = self.cloud.point_count();
        if let Some(subset) = self.subset {
            if !Arc::ptr_eq(subset.cloud(), self.cloud) {
                return Err(DatasetError::SubsetMismatch {
                    expected: self.cloud.name().to_string(),
                });
            }
            for &index in subset.indices() {
                if index as usize >= point_count {
                    return Err(DatasetError::SubsetIndexOutOfBounds {
                        index,
                        cloud: self.cloud.name().to_string(),
                        point_count,
                    });
                }
            }
        }

        let ground_truth = if self.want_labels {
            Some(self.locate_ground_truth()?)
        } else {
            None
        };

        let n_rows = self.subset.map_or(point_count, Selection::len);
        let n_cols = self.features.len();
        let mut samples = Array2::<f32>::zeros((n_rows, n_cols));

        for (column, feature) in self.features.iter().enumerate() {
            // one resolution per descriptor, not one per row
            let source = ValueSource::resolve(feature.source(), self.cloud).map_err(|source| {
                DatasetError::Source {
                    feature: feature.to_string(),
                    source,
                }
            })?;
            for row in 0..n_rows {
                let point = self.point_index(row);
                samples[[row, column]] = source.value_at(point) as f32;
            }
        }

        let labels = ground_truth.map(|field| {
            (0..n_rows)
                .map(|row| field.value(self.point_index(row)) as i32)
                .collect()
        });

        Ok(Dataset { samples, labels })
    }

    /// Map a local row index to the underlying point index.
    #[inline]
    fn point_index(&self, row: usize) -> usize {
        match self.subset {
            Some(subset) => subset.global_index(row) as usize,
            None => row,
        }
    }

    fn locate_ground_truth(&self) -> Result<&'a ScalarField, DatasetError> {
        let field = self
            .cloud
            .classification()
            .ok_or_else(|| DatasetError::MissingGroundTruth {
                cloud: self.cloud.name().to_string(),
            })?;
        if field.len() < self.cloud.point_count() {
            return Err(DatasetError::TruncatedGroundTruth {
                cloud: self.cloud.name().to_string(),
                len: field.len(),
                point_count: self.cloud.point_count(),
            });
        }
        Ok(field)
    }
}
