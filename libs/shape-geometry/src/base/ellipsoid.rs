//! # Ellipsoid Description
//!
//! Canonical closed-surface description. Spheres and ellipsoids reduce to
//! this.

use config::constants::{
    DEFAULT_SLICE_PARTITIONS, DEFAULT_STACK_PARTITIONS, DEFAULT_SUBDIVISIONS,
    MAX_SLICE_PARTITIONS, MAX_STACK_PARTITIONS, MAX_SUBDIVISIONS, MIN_SLICE_PARTITIONS,
    MIN_STACK_PARTITIONS,
};
use glam::DVec3;

use super::Topology;
use crate::error::{GeometryError, Result};
use crate::geometry::{GeometryOffsetAttribute, GeometryResult};
use crate::pack::{PackedReader, PackedWriter, Packable};
use crate::primitives;

/// Minimum number of points along each outline circle.
pub const MIN_SUBDIVISIONS: u32 = 2;

/// An axis-aligned ellipsoid centered at `center`.
///
/// Packed layout (11 words): center (3), radii (3), stack partitions,
/// slice partitions, subdivisions, topology, offset attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct EllipsoidDescription {
    pub center: DVec3,
    pub radii: DVec3,
    pub stack_partitions: u32,
    pub slice_partitions: u32,
    /// Points per outline circle; unused when filled
    pub subdivisions: u32,
    pub topology: Topology,
    pub offset_attribute: GeometryOffsetAttribute,
}

impl Default for EllipsoidDescription {
    fn default() -> Self {
        Self {
            center: DVec3::ZERO,
            radii: DVec3::ZERO,
            stack_partitions: DEFAULT_STACK_PARTITIONS,
            slice_partitions: DEFAULT_SLICE_PARTITIONS,
            subdivisions: DEFAULT_SUBDIVISIONS,
            topology: Topology::Fill,
            offset_attribute: GeometryOffsetAttribute::None,
        }
    }
}

impl EllipsoidDescription {
    /// Checks every field for range and finiteness.
    pub fn validate(&self) -> Result<()> {
        if !self.center.is_finite() {
            return Err(GeometryError::invalid_argument("center", "must be finite"));
        }
        if !self.radii.is_finite() || self.radii.min_element() < 0.0 {
            return Err(GeometryError::invalid_argument(
                "radii",
                format!("must be finite and not negative, got {}", self.radii),
            ));
        }
        check_count(
            "stack_partitions",
            self.stack_partitions,
            MIN_STACK_PARTITIONS,
            MAX_STACK_PARTITIONS,
        )?;
        check_count(
            "slice_partitions",
            self.slice_partitions,
            MIN_SLICE_PARTITIONS,
            MAX_SLICE_PARTITIONS,
        )?;
        check_count("subdivisions", self.subdivisions, MIN_SUBDIVISIONS, MAX_SUBDIVISIONS)?;
        if self.offset_attribute == GeometryOffsetAttribute::Top {
            return Err(GeometryError::invalid_argument(
                "offset_attribute",
                "Top is only supported by extruded shapes",
            ));
        }
        Ok(())
    }

    /// True when any radius is zero.
    pub fn is_degenerate(&self) -> bool {
        self.radii.min_element() == 0.0
    }

    /// Tessellates the ellipsoid.
    ///
    /// Returns `Ok(None)` when the ellipsoid is degenerate.
    pub fn create_geometry(&self) -> Result<Option<GeometryResult>> {
        self.validate()?;
        if self.is_degenerate() {
            return Ok(None);
        }
        Ok(Some(primitives::ellipsoid::tessellate(self)))
    }
}

fn check_count(parameter: &'static str, value: u32, min: u32, max: u32) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(GeometryError::invalid_argument(
            parameter,
            format!("must be between {min} and {max}, got {value}"),
        ))
    }
}

impl Packable for EllipsoidDescription {
    const PACKED_LENGTH: usize = 11;

    fn write_packed(&self, out: &mut [f64]) {
        let mut writer = PackedWriter::new(out);
        writer
            .vec3(self.center)
            .vec3(self.radii)
            .u32(self.stack_partitions)
            .u32(self.slice_partitions)
            .u32(self.subdivisions)
            .u32(self.topology.tag())
            .u32(self.offset_attribute.tag());
        debug_assert_eq!(writer.written(), Self::PACKED_LENGTH);
    }

    fn read_packed(input: &[f64], result: &mut Self) -> Result<()> {
        let mut reader = PackedReader::new(input);
        result.center = reader.vec3();
        result.radii = reader.vec3();
        result.stack_partitions = reader.u32("stack_partitions")?;
        result.slice_partitions = reader.u32("slice_partitions")?;
        result.subdivisions = reader.u32("subdivisions")?;
        result.topology = Topology::from_tag(reader.u32("topology")?)?;
        result.offset_attribute =
            GeometryOffsetAttribute::from_tag(reader.u32("offset_attribute")?)?;
        debug_assert_eq!(reader.consumed(), Self::PACKED_LENGTH);
        Ok(())
    }
}
