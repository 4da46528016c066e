//! Cylinder: an extruded circle centered on its own mid-height.

use config::constants::{DEFAULT_GRANULARITY, DEFAULT_NUMBER_OF_VERTICAL_LINES};
use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::{required_extent, ShapeKind, ShapeVariant};
use crate::base::{EllipseDescription, Topology};
use crate::error::Result;
use crate::frame::ReferenceBody;
use crate::geometry::{GeometryOffsetAttribute, GeometryResult};
use crate::pack::Packable;

/// Construction parameters for a [`Cylinder`]. `length` and `radius` are
/// mandatory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CylinderOptions {
    pub center: DVec3,
    pub length: Option<f64>,
    pub radius: Option<f64>,
    pub body: ReferenceBody,
    pub granularity: f64,
    pub number_of_vertical_lines: u32,
    pub offset_attribute: GeometryOffsetAttribute,
}

impl Default for CylinderOptions {
    fn default() -> Self {
        Self {
            center: DVec3::ZERO,
            length: None,
            radius: None,
            body: ReferenceBody::default(),
            granularity: DEFAULT_GRANULARITY,
            number_of_vertical_lines: DEFAULT_NUMBER_OF_VERTICAL_LINES,
            offset_attribute: GeometryOffsetAttribute::None,
        }
    }
}

/// A right circular cylinder.
///
/// Stored as a circle at height `-length / 2` extruded to `+length / 2`,
/// so the cylinder's mid-height sits at `center`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cylinder {
    ellipse: EllipseDescription,
}

impl Cylinder {
    pub fn new(options: CylinderOptions) -> Result<Self> {
        Self::build(options, Topology::Fill)
    }

    pub fn outline(options: CylinderOptions) -> Result<Self> {
        Self::build(options, Topology::Outline)
    }

    fn build(options: CylinderOptions, topology: Topology) -> Result<Self> {
        let length = required_extent("length", options.length)?;
        let radius = required_extent("radius", options.radius)?;
        let half = length / 2.0;
        let ellipse = EllipseDescription {
            center: options.center,
            semi_major_axis: radius,
            semi_minor_axis: radius,
            body: options.body,
            rotation: 0.0,
            height: -half,
            extruded_height: Some(half),
            granularity: options.granularity,
            number_of_vertical_lines: options.number_of_vertical_lines,
            topology,
            offset_attribute: options.offset_attribute,
            st_rotation: 0.0,
        };
        ellipse.validate()?;
        Ok(Self { ellipse })
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.ellipse.semi_major_axis
    }

    /// Distance between the two caps.
    pub fn length(&self) -> f64 {
        self.ellipse
            .extruded_height
            .map_or(0.0, |extruded| extruded - self.ellipse.height)
    }

    #[inline]
    pub fn ellipse(&self) -> &EllipseDescription {
        &self.ellipse
    }
}

impl ShapeVariant for Cylinder {
    fn kind(&self) -> ShapeKind {
        match self.ellipse.topology {
            Topology::Fill => ShapeKind::Cylinder,
            Topology::Outline => ShapeKind::CylinderOutline,
        }
    }

    fn create_geometry(&self) -> Result<Option<GeometryResult>> {
        self.ellipse.create_geometry()
    }
}

impl Packable for Cylinder {
    const PACKED_LENGTH: usize = EllipseDescription::PACKED_LENGTH;

    fn write_packed(&self, out: &mut [f64]) {
        self.ellipse.write_packed(out);
    }

    fn read_packed(input: &[f64], result: &mut Self) -> Result<()> {
        EllipseDescription::read_packed(input, &mut result.ellipse)
    }
}
