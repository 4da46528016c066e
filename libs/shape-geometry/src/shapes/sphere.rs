//! Sphere: an ellipsoid with equal radii.

use config::constants::{
    DEFAULT_OUTLINE_SLICE_PARTITIONS, DEFAULT_OUTLINE_STACK_PARTITIONS, DEFAULT_SLICE_PARTITIONS,
    DEFAULT_STACK_PARTITIONS, DEFAULT_SUBDIVISIONS,
};
use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::{required_extent, ShapeKind, ShapeVariant};
use crate::base::{EllipsoidDescription, Topology};
use crate::error::Result;
use crate::geometry::{GeometryOffsetAttribute, GeometryResult};
use crate::pack::Packable;

/// Construction parameters for a [`Sphere`]. `radius` is mandatory.
///
/// Unset partition counts fall back to the defaults of the requested
/// topology; outlines use far fewer lines than fills use triangles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereOptions {
    pub center: DVec3,
    pub radius: Option<f64>,
    pub stack_partitions: Option<u32>,
    pub slice_partitions: Option<u32>,
    pub subdivisions: u32,
    pub offset_attribute: GeometryOffsetAttribute,
}

impl Default for SphereOptions {
    fn default() -> Self {
        Self {
            center: DVec3::ZERO,
            radius: None,
            stack_partitions: None,
            slice_partitions: None,
            subdivisions: DEFAULT_SUBDIVISIONS,
            offset_attribute: GeometryOffsetAttribute::None,
        }
    }
}

/// Stack and slice partitions for `topology`, honouring explicit values.
pub(super) fn partitions(
    topology: Topology,
    stack_partitions: Option<u32>,
    slice_partitions: Option<u32>,
) -> (u32, u32) {
    let (stacks, slices) = match topology {
        Topology::Fill => (DEFAULT_STACK_PARTITIONS, DEFAULT_SLICE_PARTITIONS),
        Topology::Outline => (
            DEFAULT_OUTLINE_STACK_PARTITIONS,
            DEFAULT_OUTLINE_SLICE_PARTITIONS,
        ),
    };
    (
        stack_partitions.unwrap_or(stacks),
        slice_partitions.unwrap_or(slices),
    )
}

/// A sphere, filled or outlined.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sphere {
    ellipsoid: EllipsoidDescription,
}

impl Sphere {
    pub fn new(options: SphereOptions) -> Result<Self> {
        Self::build(options, Topology::Fill)
    }

    pub fn outline(options: SphereOptions) -> Result<Self> {
        Self::build(options, Topology::Outline)
    }

    fn build(options: SphereOptions, topology: Topology) -> Result<Self> {
        let radius = required_extent("radius", options.radius)?;
        let (stack_partitions, slice_partitions) =
            partitions(topology, options.stack_partitions, options.slice_partitions);
        let ellipsoid = EllipsoidDescription {
            center: options.center,
            radii: DVec3::splat(radius),
            stack_partitions,
            slice_partitions,
            subdivisions: options.subdivisions,
            topology,
            offset_attribute: options.offset_attribute,
        };
        ellipsoid.validate()?;
        Ok(Self { ellipsoid })
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.ellipsoid.radii.x
    }

    #[inline]
    pub fn ellipsoid(&self) -> &EllipsoidDescription {
        &self.ellipsoid
    }
}

impl ShapeVariant for Sphere {
    fn kind(&self) -> ShapeKind {
        match self.ellipsoid.topology {
            Topology::Fill => ShapeKind::Sphere,
            Topology::Outline => ShapeKind::SphereOutline,
        }
    }

    fn create_geometry(&self) -> Result<Option<GeometryResult>> {
        self.ellipsoid.create_geometry()
    }
}

impl Packable for Sphere {
    const PACKED_LENGTH: usize = EllipsoidDescription::PACKED_LENGTH;

    fn write_packed(&self, out: &mut [f64]) {
        self.ellipsoid.write_packed(out);
    }

    fn read_packed(input: &[f64], result: &mut Self) -> Result<()> {
        EllipsoidDescription::read_packed(input, &mut result.ellipsoid)
    }
}
