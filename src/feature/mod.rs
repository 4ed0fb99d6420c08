//! Feature descriptions.
//!
//! A [`FeatureDescriptor`] names one per-point value channel of a cloud and
//! the semantic category it belongs to. An ordered slice of descriptors
//! drives dataset assembly: column order in the resulting matrix equals
//! slice order. Descriptors are immutable once built and hold a shared
//! handle to the cloud they were defined against.

pub mod source;

use std::fmt;
use std::sync::Arc;

use crate::cloud::PointCloud;

// =============================================================================
// Category and source kinds
// =============================================================================

/// Semantic category of a feature.
///
/// The category describes how the feature's values were derived; dataset
/// assembly treats all categories uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeatureCategory {
    /// Plain per-point values (scalar attribute, coordinate, color).
    #[default]
    Point,
    /// Values derived from a point's neighborhood at a given scale.
    Neighborhood,
    /// Values derived from contextual structures.
    ContextBased,
    /// Values relating two clouds.
    DualCloud,
}

impl fmt::Display for FeatureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FeatureCategory::Point => "point",
            FeatureCategory::Neighborhood => "neighborhood",
            FeatureCategory::ContextBased => "context",
            FeatureCategory::DualCloud => "dual-cloud",
        };
        write!(f, "{name}")
    }
}

/// A spatial coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// An RGB color channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChannel {
    Red,
    Green,
    Blue,
}

/// Where a feature's per-point values come from.
///
/// The set of kinds is closed and stable; readers dispatch by tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureSource {
    /// A named scalar attribute. The name is mandatory and resolved by
    /// exact match when a dataset is assembled.
    Attribute(String),
    /// One coordinate axis.
    Coordinate(Axis),
    /// One color channel.
    Color(ColorChannel),
}

impl fmt::Display for FeatureSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureSource::Attribute(name) => write!(f, "{name}"),
            FeatureSource::Coordinate(Axis::X) => write!(f, "X"),
            FeatureSource::Coordinate(Axis::Y) => write!(f, "Y"),
            FeatureSource::Coordinate(Axis::Z) => write!(f, "Z"),
            FeatureSource::Color(ColorChannel::Red) => write!(f, "Red"),
            FeatureSource::Color(ColorChannel::Green) => write!(f, "Green"),
            FeatureSource::Color(ColorChannel::Blue) => write!(f, "Blue"),
        }
    }
}

// =============================================================================
// FeatureDescriptor
// =============================================================================

/// An immutable description of one dataset column.
///
/// Identifies the value source to read, the semantic category, optional
/// scale metadata, and the cloud the feature is bound to. Holds no data.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use pointclass::cloud::PointCloud;
/// use pointclass::feature::{Axis, FeatureCategory, FeatureDescriptor};
///
/// let cloud = Arc::new(PointCloud::new("scan", vec![[0.0, 0.0, 1.5]]));
/// let z = FeatureDescriptor::coordinate(&cloud, Axis::Z);
/// let rough = FeatureDescriptor::attribute(&cloud, "Roughness")
///     .with_category(FeatureCategory::Neighborhood)
///     .with_scale(0.5);
///
/// assert_eq!(z.to_string(), "Z");
/// assert_eq!(rough.to_string(), "Roughness@0.5");
/// ```
#[derive(Debug, Clone)]
pub struct FeatureDescriptor {
    category: FeatureCategory,
    source: FeatureSource,
    scale: Option<f64>,
    cloud: Arc<PointCloud>,
}

impl FeatureDescriptor {
    /// Create a descriptor from its parts.
    pub fn new(category: FeatureCategory, source: FeatureSource, cloud: &Arc<PointCloud>) -> Self {
        Self {
            category,
            source,
            scale: None,
            cloud: Arc::clone(cloud),
        }
    }

    /// Point-category feature reading a named scalar attribute.
    pub fn attribute(cloud: &Arc<PointCloud>, name: impl Into<String>) -> Self {
        Self::new(
            FeatureCategory::Point,
            FeatureSource::Attribute(name.into()),
            cloud,
        )
    }

    /// Point-category feature reading one coordinate axis.
    pub fn coordinate(cloud: &Arc<PointCloud>, axis: Axis) -> Self {
        Self::new(FeatureCategory::Point, FeatureSource::Coordinate(axis), cloud)
    }

    /// Point-category feature reading one color channel.
    pub fn color(cloud: &Arc<PointCloud>, channel: ColorChannel) -> Self {
        Self::new(FeatureCategory::Point, FeatureSource::Color(channel), cloud)
    }

    /// Set the semantic category.
    pub fn with_category(mut self, category: FeatureCategory) -> Self {
        self.category = category;
        self
    }

    /// Set the scale metadata (e.g. a neighborhood radius).
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Semantic category.
    pub fn category(&self) -> FeatureCategory {
        self.category
    }

    /// Value source kind.
    pub fn source(&self) -> &FeatureSource {
        &self.source
    }

    /// Scale metadata, if any.
    pub fn scale(&self) -> Option<f64> {
        self.scale
    }

    /// The cloud this feature is bound to.
    pub fn cloud(&self) -> &Arc<PointCloud> {
        &self.cloud
    }
}

impl fmt::Display for FeatureDescriptor {
    /// Formatted description: source name, with the scale appended when
    /// present (`Roughness@0.5`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)?;
        if let Some(scale) = self.scale {
            write!(f, "@{scale}")?;
        }
        Ok(())
    }
}
