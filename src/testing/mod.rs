//! Synthetic data and a deterministic stub backend.
//!
//! Helpers for exercising the classification pipeline without real scans:
//! seeded synthetic clouds with known labellings, and [`StubModel`], a
//! deterministic [`Model`] implementation that stands in for the learning
//! algorithm at the trait seam.

use std::path::Path;
use std::sync::Arc;

use ndarray::{ArrayView1, ArrayView2};
use rand::prelude::*;

use crate::cloud::{PointCloud, CLASSIFICATION_FIELD};
use crate::model::{Model, ModelError, RandomTreesParams};

/// A cloud of `n` points split into two well-separated clusters along X.
///
/// Points alternate between `x in [0.5, 1.0]` (class 1) and
/// `x in [-1.0, -0.5]` (class 0); Y and Z are uniform noise in `[-1, 1]`.
/// The labelling is perfectly separable on the X coordinate, and the
/// reserved classification attribute carries it.
pub fn separable_cloud(n: usize, seed: u64) -> Arc<PointCloud> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut points = Vec::with_capacity(n);
    let mut labels = Vec::with_capacity(n);
    for i in 0..n {
        let sign = if i % 2 == 0 { 1.0f32 } else { -1.0 };
        let x = sign * (0.5 + 0.5 * rng.r#gen::<f32>());
        let y = rng.r#gen::<f32>() * 2.0 - 1.0;
        let z = rng.r#gen::<f32>() * 2.0 - 1.0;
        points.push([x, y, z]);
        labels.push(if sign > 0.0 { 1.0 } else { 0.0 });
    }
    Arc::new(PointCloud::new("synthetic", points).with_attribute(CLASSIFICATION_FIELD, labels))
}

/// A cloud of `n` points uniform in `[-1, 1]^3` with an intensity
/// attribute and colors, labelled by the sign of Z.
///
/// Richer than [`separable_cloud`]: every source kind (coordinate, color,
/// attribute) is populated.
pub fn full_featured_cloud(n: usize, seed: u64) -> Arc<PointCloud> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut points = Vec::with_capacity(n);
    let mut colors = Vec::with_capacity(n);
    let mut intensity = Vec::with_capacity(n);
    let mut labels = Vec::with_capacity(n);
    for _ in 0..n {
        let p = [
            rng.r#gen::<f32>() * 2.0 - 1.0,
            rng.r#gen::<f32>() * 2.0 - 1.0,
            rng.r#gen::<f32>() * 2.0 - 1.0,
        ];
        points.push(p);
        colors.push([rng.r#gen::<u8>(), rng.r#gen::<u8>(), rng.r#gen::<u8>()]);
        intensity.push(rng.r#gen::<f64>());
        labels.push(if p[2] > 0.0 { 1.0 } else { 0.0 });
    }
    Arc::new(
        PointCloud::new("synthetic-full", points)
            .with_colors(colors)
            .with_attribute("Intensity", intensity)
            .with_attribute(CLASSIFICATION_FIELD, labels),
    )
}

// =============================================================================
// StubModel
// =============================================================================

/// Deterministic stand-in for the trainable-model capability.
///
/// "Training" only records the feature width; prediction returns 1 when
/// the first feature is positive, else 0. Persistence stores the width as
/// plain text. Useful for workflow tests that must not depend on real
/// learning.
#[derive(Debug, Clone, Default)]
pub struct StubModel {
    n_features: Option<usize>,
}

impl Model for StubModel {
    fn train(
        &mut self,
        samples: ArrayView2<f32>,
        labels: &[i32],
        _params: &RandomTreesParams,
    ) -> Result<(), ModelError> {
        self.n_features = None;
        if samples.nrows() == 0 {
            return Err(ModelError::TrainingFailed(
                "training set is empty".to_string(),
            ));
        }
        if labels.len() != samples.nrows() {
            return Err(ModelError::TrainingFailed(format!(
                "label count {} does not match sample count {}",
                labels.len(),
                samples.nrows()
            )));
        }
        self.n_features = Some(samples.ncols());
        Ok(())
    }

    fn predict(&self, sample: ArrayView1<f32>) -> Result<i32, ModelError> {
        let expected = self.n_features.ok_or(ModelError::NotTrained)?;
        if sample.len() != expected {
            return Err(ModelError::FeatureCountMismatch {
                expected,
                got: sample.len(),
            });
        }
        Ok(if sample[0] > 0.0 { 1 } else { 0 })
    }

    fn is_trained(&self) -> bool {
        self.n_features.is_some()
    }

    fn save(&self, path: &Path) -> Result<(), ModelError> {
        let n_features = self.n_features.ok_or(ModelError::NotTrained)?;
        std::fs::write(path, n_features.to_string()).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    fn load(&mut self, path: &Path) -> Result<(), ModelError> {
        let text = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let n_features = text.trim().parse::<usize>().map_err(|e| ModelError::CorruptModel {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        self.n_features = Some(n_features);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn separable_cloud_labels_follow_x() {
        let cloud = separable_cloud(20, 1);
        let labels = cloud.classification().unwrap();
        for i in 0..cloud.point_count() {
            let expected = if cloud.point(i)[0] > 0.0 { 1.0 } else { 0.0 };
            assert_eq!(labels.value(i), expected);
        }
        // both classes are present
        assert!(labels.values().contains(&0.0));
        assert!(labels.values().contains(&1.0));
    }

    #[test]
    fn full_featured_cloud_has_every_source_kind() {
        let cloud = full_featured_cloud(10, 2);
        assert!(cloud.has_colors());
        assert!(cloud.attribute("Intensity").is_some());
        assert!(cloud.classification().is_some());
    }

    #[test]
    fn generators_are_seed_deterministic() {
        let a = separable_cloud(12, 9);
        let b = separable_cloud(12, 9);
        assert_eq!(a.points(), b.points());
    }

    #[test]
    fn stub_round_trips_its_width() {
        let samples = array![[1.0f32, 2.0], [3.0, 4.0]];
        let mut stub = StubModel::default();
        stub.train(samples.view(), &[1, 1], &RandomTreesParams::default())
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stub.txt");
        stub.save(&path).unwrap();

        let mut restored = StubModel::default();
        restored.load(&path).unwrap();
        assert!(restored.is_trained());
        assert_eq!(restored.predict(array![0.5f32, 0.0].view()).unwrap(), 1);
        assert_eq!(restored.predict(array![-0.5f32, 0.0].view()).unwrap(), 0);
    }
}
