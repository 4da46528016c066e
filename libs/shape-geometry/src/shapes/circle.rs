//! Circle: an ellipse with equal axes.

use config::constants::{DEFAULT_GRANULARITY, DEFAULT_HEIGHT, DEFAULT_NUMBER_OF_VERTICAL_LINES};
use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::{required_extent, ShapeKind, ShapeVariant};
use crate::base::{EllipseDescription, Topology};
use crate::error::Result;
use crate::frame::ReferenceBody;
use crate::geometry::{GeometryOffsetAttribute, GeometryResult};
use crate::pack::Packable;

/// Construction parameters for a [`Circle`]. `radius` is mandatory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleOptions {
    pub center: DVec3,
    pub radius: Option<f64>,
    pub body: ReferenceBody,
    pub height: f64,
    pub extruded_height: Option<f64>,
    pub granularity: f64,
    pub st_rotation: f64,
    pub number_of_vertical_lines: u32,
    pub offset_attribute: GeometryOffsetAttribute,
}

impl Default for CircleOptions {
    fn default() -> Self {
        Self {
            center: DVec3::ZERO,
            radius: None,
            body: ReferenceBody::default(),
            height: DEFAULT_HEIGHT,
            extruded_height: None,
            granularity: DEFAULT_GRANULARITY,
            st_rotation: 0.0,
            number_of_vertical_lines: DEFAULT_NUMBER_OF_VERTICAL_LINES,
            offset_attribute: GeometryOffsetAttribute::None,
        }
    }
}

/// A circle on the reference body, filled or outlined.
///
/// # Example
///
/// ```rust
/// use shape_geometry::shapes::{Circle, CircleOptions};
///
/// let circle = Circle::outline(CircleOptions {
///     radius: Some(250.0),
///     ..Default::default()
/// })
/// .unwrap();
/// assert_eq!(circle.ellipse().semi_minor_axis, 250.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Circle {
    ellipse: EllipseDescription,
}

impl Circle {
    /// Creates a filled circle.
    pub fn new(options: CircleOptions) -> Result<Self> {
        Self::build(options, Topology::Fill)
    }

    /// Creates a circle outline.
    pub fn outline(options: CircleOptions) -> Result<Self> {
        Self::build(options, Topology::Outline)
    }

    fn build(options: CircleOptions, topology: Topology) -> Result<Self> {
        let radius = required_extent("radius", options.radius)?;
        let ellipse = EllipseDescription {
            center: options.center,
            semi_major_axis: radius,
            semi_minor_axis: radius,
            body: options.body,
            rotation: 0.0,
            height: options.height,
            extruded_height: options.extruded_height,
            granularity: options.granularity,
            number_of_vertical_lines: options.number_of_vertical_lines,
            topology,
            offset_attribute: options.offset_attribute,
            st_rotation: options.st_rotation,
        };
        ellipse.validate()?;
        Ok(Self { ellipse })
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.ellipse.semi_major_axis
    }

    #[inline]
    pub fn center(&self) -> DVec3 {
        self.ellipse.center
    }

    /// The canonical ellipse this circle reduces to.
    #[inline]
    pub fn ellipse(&self) -> &EllipseDescription {
        &self.ellipse
    }
}

impl ShapeVariant for Circle {
    fn kind(&self) -> ShapeKind {
        match self.ellipse.topology {
            Topology::Fill => ShapeKind::Circle,
            Topology::Outline => ShapeKind::CircleOutline,
        }
    }

    fn create_geometry(&self) -> Result<Option<GeometryResult>> {
        self.ellipse.create_geometry()
    }
}

impl Packable for Circle {
    const PACKED_LENGTH: usize = EllipseDescription::PACKED_LENGTH;

    fn write_packed(&self, out: &mut [f64]) {
        self.ellipse.write_packed(out);
    }

    fn read_packed(input: &[f64], result: &mut Self) -> Result<()> {
        EllipseDescription::read_packed(input, &mut result.ellipse)
    }
}
