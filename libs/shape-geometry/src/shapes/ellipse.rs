//! Ellipse: a rotated ellipse on the reference body, optionally extruded.

use config::constants::{
    DEFAULT_GRANULARITY, DEFAULT_HEIGHT, DEFAULT_NUMBER_OF_VERTICAL_LINES, DEFAULT_ROTATION,
};
use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::{required_extent, ShapeKind, ShapeVariant};
use crate::base::{EllipseDescription, Topology};
use crate::error::Result;
use crate::frame::ReferenceBody;
use crate::geometry::{GeometryOffsetAttribute, GeometryResult};
use crate::pack::Packable;

/// Construction parameters for an [`Ellipse`]. Both semi-axes are mandatory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EllipseOptions {
    pub center: DVec3,
    pub semi_major_axis: Option<f64>,
    pub semi_minor_axis: Option<f64>,
    pub body: ReferenceBody,
    pub rotation: f64,
    pub height: f64,
    pub extruded_height: Option<f64>,
    pub granularity: f64,
    pub st_rotation: f64,
    pub number_of_vertical_lines: u32,
    pub offset_attribute: GeometryOffsetAttribute,
}

impl Default for EllipseOptions {
    fn default() -> Self {
        Self {
            center: DVec3::ZERO,
            semi_major_axis: None,
            semi_minor_axis: None,
            body: ReferenceBody::default(),
            rotation: DEFAULT_ROTATION,
            height: DEFAULT_HEIGHT,
            extruded_height: None,
            granularity: DEFAULT_GRANULARITY,
            st_rotation: 0.0,
            number_of_vertical_lines: DEFAULT_NUMBER_OF_VERTICAL_LINES,
            offset_attribute: GeometryOffsetAttribute::None,
        }
    }
}

/// An ellipse on the reference body, filled or outlined.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ellipse {
    ellipse: EllipseDescription,
}

impl Ellipse {
    pub fn new(options: EllipseOptions) -> Result<Self> {
        Self::build(options, Topology::Fill)
    }

    pub fn outline(options: EllipseOptions) -> Result<Self> {
        Self::build(options, Topology::Outline)
    }

    fn build(options: EllipseOptions, topology: Topology) -> Result<Self> {
        let semi_major_axis = required_extent("semi_major_axis", options.semi_major_axis)?;
        let semi_minor_axis = required_extent("semi_minor_axis", options.semi_minor_axis)?;
        let ellipse = EllipseDescription {
            center: options.center,
            semi_major_axis,
            semi_minor_axis,
            body: options.body,
            rotation: options.rotation,
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
    pub fn semi_major_axis(&self) -> f64 {
        self.ellipse.semi_major_axis
    }

    #[inline]
    pub fn semi_minor_axis(&self) -> f64 {
        self.ellipse.semi_minor_axis
    }

    #[inline]
    pub fn ellipse(&self) -> &EllipseDescription {
        &self.ellipse
    }
}

impl ShapeVariant for Ellipse {
    fn kind(&self) -> ShapeKind {
        match self.ellipse.topology {
            Topology::Fill => ShapeKind::Ellipse,
            Topology::Outline => ShapeKind::EllipseOutline,
        }
    }

    fn create_geometry(&self) -> Result<Option<GeometryResult>> {
        self.ellipse.create_geometry()
    }
}

impl Packable for Ellipse {
    const PACKED_LENGTH: usize = EllipseDescription::PACKED_LENGTH;

    fn write_packed(&self, out: &mut [f64]) {
        self.ellipse.write_packed(out);
    }

    fn read_packed(input: &[f64], result: &mut Self) -> Result<()> {
        EllipseDescription::read_packed(input, &mut result.ellipse)
    }
}
