//! # Ellipse Description
//!
//! Canonical closed-curve description. Circles, ellipses and cylinders all
//! reduce to this.

use config::constants::{
    approx_equal, DEFAULT_GRANULARITY, DEFAULT_HEIGHT, DEFAULT_NUMBER_OF_VERTICAL_LINES,
    DEFAULT_ROTATION,
};
use glam::DVec3;

use super::{ensure_finite, ensure_non_negative, Topology};
use crate::error::{GeometryError, Result};
use crate::frame::ReferenceBody;
use crate::geometry::{GeometryOffsetAttribute, GeometryResult};
use crate::pack::{PackedReader, PackedWriter, Packable};
use crate::primitives;

/// An ellipse laid out in the tangent plane at `center`, optionally
/// extruded between `height` and `extruded_height`.
///
/// Packed layout (17 words): center (3), body radii (3), semi-major axis,
/// semi-minor axis, rotation, height, extruded flag, extruded height,
/// granularity, number of vertical lines, topology, offset attribute,
/// st rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct EllipseDescription {
    pub center: DVec3,
    pub semi_major_axis: f64,
    pub semi_minor_axis: f64,
    pub body: ReferenceBody,
    /// Rotation of the major axis from east, counter-clockwise, in radians
    pub rotation: f64,
    pub height: f64,
    pub extruded_height: Option<f64>,
    /// Angular distance between boundary points, in radians
    pub granularity: f64,
    /// Vertical lines between the rings of an extruded outline
    pub number_of_vertical_lines: u32,
    pub topology: Topology,
    pub offset_attribute: GeometryOffsetAttribute,
    /// Rotation of the texture coordinates, in radians
    pub st_rotation: f64,
}

impl Default for EllipseDescription {
    fn default() -> Self {
        Self {
            center: DVec3::ZERO,
            semi_major_axis: 0.0,
            semi_minor_axis: 0.0,
            body: ReferenceBody::default(),
            rotation: DEFAULT_ROTATION,
            height: DEFAULT_HEIGHT,
            extruded_height: None,
            granularity: DEFAULT_GRANULARITY,
            number_of_vertical_lines: DEFAULT_NUMBER_OF_VERTICAL_LINES,
            topology: Topology::Fill,
            offset_attribute: GeometryOffsetAttribute::None,
            st_rotation: 0.0,
        }
    }
}

impl EllipseDescription {
    /// Checks every field for range and finiteness.
    ///
    /// Constructors call this, and so does creation, since unpacked values
    /// bypass the constructors.
    pub fn validate(&self) -> Result<()> {
        if !self.center.is_finite() {
            return Err(GeometryError::invalid_argument("center", "must be finite"));
        }
        ensure_non_negative("semi_major_axis", self.semi_major_axis)?;
        ensure_non_negative("semi_minor_axis", self.semi_minor_axis)?;
        if self.semi_major_axis < self.semi_minor_axis {
            return Err(GeometryError::invalid_argument(
                "semi_major_axis",
                format!(
                    "must be greater than or equal to semi_minor_axis ({} < {})",
                    self.semi_major_axis, self.semi_minor_axis
                ),
            ));
        }
        if !self.body.is_valid() {
            return Err(GeometryError::invalid_argument(
                "body",
                "radii must be finite and positive",
            ));
        }
        ensure_finite("rotation", self.rotation)?;
        ensure_finite("height", self.height)?;
        if let Some(extruded_height) = self.extruded_height {
            ensure_finite("extruded_height", extruded_height)?;
        }
        ensure_finite("granularity", self.granularity)?;
        if self.granularity <= 0.0 {
            return Err(GeometryError::invalid_argument(
                "granularity",
                format!("must be positive, got {}", self.granularity),
            ));
        }
        ensure_finite("st_rotation", self.st_rotation)
    }

    /// True when the shape spans a volume between two heights.
    pub fn is_extruded(&self) -> bool {
        self.extruded_height
            .is_some_and(|extruded| !approx_equal(extruded, self.height))
    }

    /// True when the ellipse has collapsed to a line or a point.
    pub fn is_degenerate(&self) -> bool {
        self.semi_minor_axis == 0.0
    }

    /// Lower and upper heights of the shape.
    pub fn height_range(&self) -> (f64, f64) {
        match self.extruded_height {
            Some(extruded) if self.is_extruded() => {
                (self.height.min(extruded), self.height.max(extruded))
            }
            _ => (self.height, self.height),
        }
    }

    /// Tessellates the ellipse.
    ///
    /// Returns `Ok(None)` when the ellipse is degenerate.
    pub fn create_geometry(&self) -> Result<Option<GeometryResult>> {
        self.validate()?;
        if self.is_degenerate() {
            return Ok(None);
        }
        Ok(Some(primitives::ellipse::tessellate(self)))
    }
}

impl Packable for EllipseDescription {
    const PACKED_LENGTH: usize = 17;

    fn write_packed(&self, out: &mut [f64]) {
        let mut writer = PackedWriter::new(out);
        writer
            .vec3(self.center)
            .vec3(self.body.radii())
            .f64(self.semi_major_axis)
            .f64(self.semi_minor_axis)
            .f64(self.rotation)
            .f64(self.height)
            .flag(self.extruded_height.is_some())
            .f64(self.extruded_height.unwrap_or(0.0))
            .f64(self.granularity)
            .u32(self.number_of_vertical_lines)
            .u32(self.topology.tag())
            .u32(self.offset_attribute.tag())
            .f64(self.st_rotation);
        debug_assert_eq!(writer.written(), Self::PACKED_LENGTH);
    }

    fn read_packed(input: &[f64], result: &mut Self) -> Result<()> {
        let mut reader = PackedReader::new(input);
        result.center = reader.vec3();
        result.body = ReferenceBody::new(reader.vec3());
        result.semi_major_axis = reader.f64();
        result.semi_minor_axis = reader.f64();
        result.rotation = reader.f64();
        result.height = reader.f64();
        let has_extruded_height = reader.flag("extruded_height")?;
        let extruded_height = reader.f64();
        result.extruded_height = has_extruded_height.then_some(extruded_height);
        result.granularity = reader.f64();
        result.number_of_vertical_lines = reader.u32("number_of_vertical_lines")?;
        result.topology = Topology::from_tag(reader.u32("topology")?)?;
        result.offset_attribute =
            GeometryOffsetAttribute::from_tag(reader.u32("offset_attribute")?)?;
        result.st_rotation = reader.f64();
        debug_assert_eq!(reader.consumed(), Self::PACKED_LENGTH);
        Ok(())
    }
}
