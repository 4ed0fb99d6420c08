//! Resolved per-point value sources.
//!
//! A [`ValueSource`] is the readable binding between one
//! [`FeatureSource`](super::FeatureSource) and one cloud. Resolution
//! happens once per descriptor per dataset build; after that, reads are
//! bounded-cost random access over the borrowed storage and never
//! re-resolve the binding.

use thiserror::Error;

use super::{Axis, ColorChannel, FeatureSource};
use crate::cloud::PointCloud;

/// Errors resolving a feature source against a cloud.
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    /// No attribute with the requested name exists on the cloud.
    #[error("unknown scalar attribute '{name}' on cloud '{cloud}'")]
    UnknownAttribute { name: String, cloud: String },

    /// The attribute exists but holds fewer values than the cloud has
    /// points, so per-point access would run out of bounds.
    #[error("attribute '{name}' has {len} values but cloud '{cloud}' has {point_count} points")]
    Truncated {
        name: String,
        cloud: String,
        len: usize,
        point_count: usize,
    },

    /// A color channel was requested but the cloud carries no colors.
    #[error("cloud '{cloud}' has no color data")]
    MissingColors { cloud: String },
}

/// A resolved, read-only numeric channel over one cloud.
///
/// Valid for the lifetime of the cloud borrow it was resolved against.
#[derive(Debug, Clone, Copy)]
pub enum ValueSource<'a> {
    /// Values of a named scalar attribute.
    Attribute(&'a [f64]),
    /// One spatial coordinate axis.
    Coordinate { points: &'a [[f32; 3]], axis: Axis },
    /// One color channel, widened from 8-bit storage.
    Color {
        colors: &'a [[u8; 3]],
        channel: ColorChannel,
    },
}

impl<'a> ValueSource<'a> {
    /// Bind a source kind to a cloud.
    ///
    /// Attribute sources are looked up by exact name and checked to cover
    /// the whole cloud; color sources require the cloud to carry colors.
    /// Coordinate sources always resolve.
    pub fn resolve(source: &FeatureSource, cloud: &'a PointCloud) -> Result<Self, ResolveError> {
        match source {
            FeatureSource::Attribute(name) => {
                let field =
                    cloud
                        .attribute(name)
                        .ok_or_else(|| ResolveError::UnknownAttribute {
                            name: name.clone(),
                            cloud: cloud.name().to_string(),
                        })?;
                if field.len() < cloud.point_count() {
                    return Err(ResolveError::Truncated {
                        name: name.clone(),
                        cloud: cloud.name().to_string(),
                        len: field.len(),
                        point_count: cloud.point_count(),
                    });
                }
                Ok(ValueSource::Attribute(field.values()))
            }
            FeatureSource::Coordinate(axis) => Ok(ValueSource::Coordinate {
                points: cloud.points(),
                axis: *axis,
            }),
            FeatureSource::Color(channel) => {
                let colors = cloud.colors().ok_or_else(|| ResolveError::MissingColors {
                    cloud: cloud.name().to_string(),
                })?;
                Ok(ValueSource::Color {
                    colors,
                    channel: *channel,
                })
            }
        }
    }

    /// Value for one point.
    #[inline]
    pub fn value_at(&self, point_index: usize) -> f64 {
        match self {
            ValueSource::Attribute(values) => values[point_index],
            ValueSource::Coordinate { points, axis } => {
                let p = points[point_index];
                match axis {
                    Axis::X => p[0] as f64,
                    Axis::Y => p[1] as f64,
                    Axis::Z => p[2] as f64,
                }
            }
            ValueSource::Color { colors, channel } => {
                let c = colors[point_index];
                match channel {
                    ColorChannel::Red => c[0] as f64,
                    ColorChannel::Green => c[1] as f64,
                    ColorChannel::Blue => c[2] as f64,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cloud() -> PointCloud {
        PointCloud::new("c", vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]])
            .with_colors(vec![[10, 20, 30], [40, 50, 60]])
            .with_attribute("Intensity", vec![0.5, 0.75])
            .with_attribute("Short", vec![0.1])
    }

    #[test]
    fn attribute_resolution_reads_values() {
        let cloud = cloud();
        let src = ValueSource::resolve(&FeatureSource::Attribute("Intensity".into()), &cloud)
            .unwrap();
        assert_eq!(src.value_at(0), 0.5);
        assert_eq!(src.value_at(1), 0.75);
    }

    #[test]
    fn unknown_attribute_is_an_error() {
        let cloud = cloud();
        let err = ValueSource::resolve(&FeatureSource::Attribute("Nope".into()), &cloud)
            .unwrap_err();
        assert!(matches!(err, ResolveError::UnknownAttribute { ref name, .. } if name == "Nope"));
    }

    #[test]
    fn truncated_attribute_is_an_error() {
        let cloud = cloud();
        let err =
            ValueSource::resolve(&FeatureSource::Attribute("Short".into()), &cloud).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::Truncated { len: 1, point_count: 2, .. }
        ));
    }

    #[test]
    fn coordinates_always_resolve() {
        let cloud = cloud();
        for (axis, expected) in [(Axis::X, 4.0), (Axis::Y, 5.0), (Axis::Z, 6.0)] {
            let src = ValueSource::resolve(&FeatureSource::Coordinate(axis), &cloud).unwrap();
            assert_eq!(src.value_at(1), expected);
        }
    }

    #[test]
    fn color_channels_widen_to_f64() {
        let cloud = cloud();
        let src = ValueSource::resolve(&FeatureSource::Color(ColorChannel::Green), &cloud)
            .unwrap();
        assert_eq!(src.value_at(1), 50.0);
    }

    #[test]
    fn missing_colors_is_an_error() {
        let plain = PointCloud::new("plain", vec![[0.0; 3]]);
        let err = ValueSource::resolve(&FeatureSource::Color(ColorChannel::Red), &plain)
            .unwrap_err();
        assert!(matches!(err, ResolveError::MissingColors { .. }));
    }
}
