//! Ellipsoid: three independent radii about a center.

use config::constants::DEFAULT_SUBDIVISIONS;
use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::sphere::partitions;
use super::{ShapeKind, ShapeVariant};
use crate::base::{EllipsoidDescription, Topology};
use crate::error::{GeometryError, Result};
use crate::geometry::{GeometryOffsetAttribute, GeometryResult};
use crate::pack::Packable;

/// Construction parameters for an [`Ellipsoid`]. `radii` is mandatory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EllipsoidOptions {
    pub center: DVec3,
    pub radii: Option<DVec3>,
    pub stack_partitions: Option<u32>,
    pub slice_partitions: Option<u32>,
    pub subdivisions: u32,
    pub offset_attribute: GeometryOffsetAttribute,
}

impl Default for EllipsoidOptions {
    fn default() -> Self {
        Self {
            center: DVec3::ZERO,
            radii: None,
            stack_partitions: None,
            slice_partitions: None,
            subdivisions: DEFAULT_SUBDIVISIONS,
            offset_attribute: GeometryOffsetAttribute::None,
        }
    }
}

/// An axis-aligned ellipsoid, filled or outlined.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ellipsoid {
    ellipsoid: EllipsoidDescription,
}

impl Ellipsoid {
    pub fn new(options: EllipsoidOptions) -> Result<Self> {
        Self::build(options, Topology::Fill)
    }

    pub fn outline(options: EllipsoidOptions) -> Result<Self> {
        Self::build(options, Topology::Outline)
    }

    fn build(options: EllipsoidOptions, topology: Topology) -> Result<Self> {
        let radii = options.radii.ok_or_else(|| GeometryError::missing("radii"))?;
        let (stack_partitions, slice_partitions) =
            partitions(topology, options.stack_partitions, options.slice_partitions);
        let ellipsoid = EllipsoidDescription {
            center: options.center,
            radii,
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
    pub fn radii(&self) -> DVec3 {
        self.ellipsoid.radii
    }

    #[inline]
    pub fn ellipsoid(&self) -> &EllipsoidDescription {
        &self.ellipsoid
    }
}

impl ShapeVariant for Ellipsoid {
    fn kind(&self) -> ShapeKind {
        match self.ellipsoid.topology {
            Topology::Fill => ShapeKind::Ellipsoid,
            Topology::Outline => ShapeKind::EllipsoidOutline,
        }
    }

    fn create_geometry(&self) -> Result<Option<GeometryResult>> {
        self.ellipsoid.create_geometry()
    }
}

impl Packable for Ellipsoid {
    const PACKED_LENGTH: usize = EllipsoidDescription::PACKED_LENGTH;

    fn write_packed(&self, out: &mut [f64]) {
        self.ellipsoid.write_packed(out);
    }

    fn read_packed(input: &[f64], result: &mut Self) -> Result<()> {
        EllipsoidDescription::read_packed(input, &mut result.ellipsoid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_radii() {
        let err = Ellipsoid::new(EllipsoidOptions::default()).unwrap_err();
        assert_eq!(err, GeometryError::missing("radii"));
    }

    #[test]
    fn test_negative_radius_rejected() {
        let result = Ellipsoid::new(EllipsoidOptions {
            radii: Some(DVec3::new(1.0, -1.0, 1.0)),
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_flat_ellipsoid_is_degenerate() {
        let ellipsoid = Ellipsoid::new(EllipsoidOptions {
            radii: Some(DVec3::new(1.0, 2.0, 0.0)),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(ellipsoid.create_geometry(), Ok(None));
    }

    #[test]
    fn test_options_from_json() {
        let options: EllipsoidOptions =
            serde_json::from_str(r#"{ "radii": [1.0, 2.0, 3.0], "stack_partitions": 5 }"#)
                .unwrap();
        let ellipsoid = Ellipsoid::outline(options).unwrap();
        assert_eq!(ellipsoid.radii(), DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(ellipsoid.ellipsoid().stack_partitions, 5);
        assert_eq!(ellipsoid.kind(), ShapeKind::EllipsoidOutline);
    }
}
