//! Point-cloud data source.
//!
//! This module is the thin adapter over the host application's point-cloud
//! storage: per-point coordinates, optional RGB colors, named scalar
//! attributes, and named index subsets. The classification pipeline treats
//! it as an opaque, read-only value source.
//!
//! Clouds are shared via `Arc`; descriptors and selections hold a handle to
//! the cloud they were built against, and cloud identity is pointer
//! identity ([`Arc::ptr_eq`]).

use std::collections::HashMap;
use std::sync::Arc;

/// Reserved name of the per-point ground-truth classification attribute.
pub const CLASSIFICATION_FIELD: &str = "Classification";

// =============================================================================
// ScalarField
// =============================================================================

/// A named per-point scalar attribute.
#[derive(Debug, Clone, Default)]
pub struct ScalarField {
    name: String,
    values: Vec<f64>,
}

impl ScalarField {
    /// Create a named attribute from its per-point values.
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Attribute name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of stored values.
    ///
    /// May be smaller than the owning cloud's point count; consumers are
    /// expected to check before per-point access.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the attribute holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value for one point.
    #[inline]
    pub fn value(&self, point_index: usize) -> f64 {
        self.values[point_index]
    }

    /// All values as a slice.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

// =============================================================================
// PointCloud
// =============================================================================

/// An in-memory point cloud.
///
/// Exposes the capabilities the classification pipeline reads from:
/// coordinates, optional colors, named scalar attributes (looked up by
/// exact name), and named index subsets.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use pointclass::cloud::{PointCloud, CLASSIFICATION_FIELD};
///
/// let cloud = Arc::new(
///     PointCloud::new("scan", vec![[0.0, 0.0, 1.0], [1.0, 0.0, 2.0]])
///         .with_attribute("Intensity", vec![0.3, 0.9])
///         .with_attribute(CLASSIFICATION_FIELD, vec![2.0, 5.0]),
/// );
///
/// assert_eq!(cloud.point_count(), 2);
/// assert!(cloud.attribute("Intensity").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PointCloud {
    name: String,
    points: Vec<[f32; 3]>,
    colors: Option<Vec<[u8; 3]>>,
    attributes: Vec<ScalarField>,
    selections: HashMap<String, Vec<u32>>,
}

impl PointCloud {
    /// Create a cloud from its name and coordinates.
    pub fn new(name: impl Into<String>, points: Vec<[f32; 3]>) -> Self {
        Self {
            name: name.into(),
            points,
            colors: None,
            attributes: Vec::new(),
            selections: HashMap::new(),
        }
    }

    /// Attach per-point RGB colors.
    ///
    /// # Panics
    ///
    /// Debug-asserts that the color count matches the point count.
    pub fn with_colors(mut self, colors: Vec<[u8; 3]>) -> Self {
        debug_assert_eq!(
            colors.len(),
            self.points.len(),
            "colors must have same length as points"
        );
        self.colors = Some(colors);
        self
    }

    /// Attach a named scalar attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.attributes.push(ScalarField::new(name, values));
        self
    }

    /// Add a scalar attribute.
    pub fn add_attribute(&mut self, field: ScalarField) {
        self.attributes.push(field);
    }

    /// Register a named index subset.
    pub fn add_selection(&mut self, name: impl Into<String>, indices: Vec<u32>) {
        self.selections.insert(name.into(), indices);
    }

    /// Register a named index subset (builder form).
    pub fn with_selection(mut self, name: impl Into<String>, indices: Vec<u32>) -> Self {
        self.selections.insert(name.into(), indices);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Cloud name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of points.
    #[inline]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the cloud holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Coordinates of one point.
    #[inline]
    pub fn point(&self, point_index: usize) -> [f32; 3] {
        self.points[point_index]
    }

    /// All coordinates as a slice.
    pub fn points(&self) -> &[[f32; 3]] {
        &self.points
    }

    /// Returns true if the cloud carries per-point colors.
    pub fn has_colors(&self) -> bool {
        self.colors.is_some()
    }

    /// Per-point colors, if present.
    pub fn colors(&self) -> Option<&[[u8; 3]]> {
        self.colors.as_deref()
    }

    /// Look up a scalar attribute by exact name.
    ///
    /// Returns an explicit found/not-found result; an attribute stored at
    /// slot 0 is a perfectly valid hit.
    pub fn attribute(&self, name: &str) -> Option<&ScalarField> {
        self.attributes.iter().find(|f| f.name() == name)
    }

    /// The reserved ground-truth classification attribute, if present.
    pub fn classification(&self) -> Option<&ScalarField> {
        self.attribute(CLASSIFICATION_FIELD)
    }

    /// Names of the registered index subsets.
    pub fn selection_names(&self) -> impl Iterator<Item = &str> {
        self.selections.keys().map(String::as_str)
    }
}

// =============================================================================
// Selection
// =============================================================================

/// An ordered subset of point indices into one cloud.
///
/// Used to restrict the rows used for training or evaluation. Row `i` of a
/// dataset built over a selection reads from point
/// [`global_index(i)`](Self::global_index).
#[derive(Debug, Clone)]
pub struct Selection {
    cloud: Arc<PointCloud>,
    indices: Vec<u32>,
}

impl Selection {
    /// Create a selection from explicit point indices.
    ///
    /// Index validity against the cloud is checked when the selection is
    /// used to assemble a dataset.
    pub fn new(cloud: Arc<PointCloud>, indices: Vec<u32>) -> Self {
        Self { cloud, indices }
    }

    /// The identity selection covering every point of the cloud.
    pub fn full(cloud: Arc<PointCloud>) -> Self {
        let indices = (0..cloud.point_count() as u32).collect();
        Self { cloud, indices }
    }

    /// Resolve a subset registered on the cloud by name.
    pub fn named(cloud: &Arc<PointCloud>, name: &str) -> Option<Self> {
        cloud
            .selections
            .get(name)
            .map(|indices| Self::new(Arc::clone(cloud), indices.clone()))
    }

    /// The cloud this selection indexes into.
    pub fn cloud(&self) -> &Arc<PointCloud> {
        &self.cloud
    }

    /// Number of selected points.
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns true if the selection is empty.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Map a local row index to the underlying point index.
    #[inline]
    pub fn global_index(&self, row: usize) -> u32 {
        self.indices[row]
    }

    /// All selected indices, in order.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_cloud() -> Arc<PointCloud> {
        Arc::new(
            PointCloud::new(
                "cloud",
                vec![[0.0, 1.0, 2.0], [3.0, 4.0, 5.0], [6.0, 7.0, 8.0]],
            )
            .with_attribute("Intensity", vec![0.1, 0.2, 0.3])
            .with_selection("core", vec![2, 0]),
        )
    }

    #[test]
    fn attribute_lookup_is_exact() {
        let cloud = test_cloud();
        assert!(cloud.attribute("Intensity").is_some());
        assert!(cloud.attribute("intensity").is_none());
        assert!(cloud.attribute("Unknown").is_none());
    }

    #[test]
    fn first_attribute_slot_is_found() {
        // "Intensity" sits at slot 0; a zero-index sentinel would lose it.
        let cloud = test_cloud();
        let field = cloud.attribute("Intensity").unwrap();
        assert_eq!(field.value(1), 0.2);
    }

    #[test]
    fn classification_uses_reserved_name() {
        let cloud = Arc::new(
            PointCloud::new("c", vec![[0.0; 3]]).with_attribute(CLASSIFICATION_FIELD, vec![4.0]),
        );
        assert_eq!(cloud.classification().unwrap().value(0), 4.0);
        assert!(test_cloud().classification().is_none());
    }

    #[test]
    fn named_selection_binds_to_cloud() {
        let cloud = test_cloud();
        let sel = Selection::named(&cloud, "core").unwrap();
        assert!(Arc::ptr_eq(sel.cloud(), &cloud));
        assert_eq!(sel.indices(), &[2, 0]);
        assert!(Selection::named(&cloud, "missing").is_none());
        assert_eq!(cloud.selection_names().collect::<Vec<_>>(), vec!["core"]);
    }

    #[test]
    fn full_selection_is_identity() {
        let cloud = test_cloud();
        let sel = Selection::full(Arc::clone(&cloud));
        assert_eq!(sel.len(), cloud.point_count());
        assert_eq!(sel.global_index(2), 2);
    }

    #[test]
    fn colors_are_optional() {
        let cloud = test_cloud();
        assert!(!cloud.has_colors());

        let colored = Arc::new(
            PointCloud::new("c", vec![[0.0; 3]]).with_colors(vec![[255, 0, 10]]),
        );
        assert_eq!(colored.colors().unwrap()[0], [255, 0, 10]);
    }
}
