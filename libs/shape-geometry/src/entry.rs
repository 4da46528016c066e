//! # Creation Entrypoints
//!
//! One entrypoint per shape kind. Each accepts either a constructed
//! description or a packed array plus offset, and rejects descriptions
//! whose variant or topology does not match the entrypoint.

use crate::error::Result;
use crate::geometry::GeometryResult;
use crate::shapes::{
    ensure_kind, Circle, Cylinder, Ellipse, Ellipsoid, ShapeKind, ShapeVariant, Sphere,
};

/// Entrypoint over a packed description, as registered per module name.
pub type CreateGeometryFn = fn(&[f64], usize) -> Result<Option<GeometryResult>>;

/// Where an entrypoint reads its description from.
#[derive(Debug, Clone, Copy)]
pub enum DescriptionSource<'a, T> {
    Description(&'a T),
    Packed { array: &'a [f64], offset: usize },
}

impl<'a, T> From<&'a T> for DescriptionSource<'a, T> {
    fn from(description: &'a T) -> Self {
        Self::Description(description)
    }
}

fn create<T: ShapeVariant>(
    kind: ShapeKind,
    source: DescriptionSource<'_, T>,
) -> Result<Option<GeometryResult>> {
    match source {
        DescriptionSource::Description(description) => {
            ensure_kind(kind, description.kind())?;
            description.create_geometry()
        }
        DescriptionSource::Packed { array, offset } => {
            let description = T::unpack(array, offset)?;
            ensure_kind(kind, description.kind())?;
            description.create_geometry()
        }
    }
}

pub fn create_circle_geometry(
    source: DescriptionSource<'_, Circle>,
) -> Result<Option<GeometryResult>> {
    create(ShapeKind::Circle, source)
}

pub fn create_circle_outline_geometry(
    source: DescriptionSource<'_, Circle>,
) -> Result<Option<GeometryResult>> {
    create(ShapeKind::CircleOutline, source)
}

pub fn create_ellipse_geometry(
    source: DescriptionSource<'_, Ellipse>,
) -> Result<Option<GeometryResult>> {
    create(ShapeKind::Ellipse, source)
}

pub fn create_ellipse_outline_geometry(
    source: DescriptionSource<'_, Ellipse>,
) -> Result<Option<GeometryResult>> {
    create(ShapeKind::EllipseOutline, source)
}

pub fn create_cylinder_geometry(
    source: DescriptionSource<'_, Cylinder>,
) -> Result<Option<GeometryResult>> {
    create(ShapeKind::Cylinder, source)
}

pub fn create_cylinder_outline_geometry(
    source: DescriptionSource<'_, Cylinder>,
) -> Result<Option<GeometryResult>> {
    create(ShapeKind::CylinderOutline, source)
}

pub fn create_sphere_geometry(
    source: DescriptionSource<'_, Sphere>,
) -> Result<Option<GeometryResult>> {
    create(ShapeKind::Sphere, source)
}

pub fn create_sphere_outline_geometry(
    source: DescriptionSource<'_, Sphere>,
) -> Result<Option<GeometryResult>> {
    create(ShapeKind::SphereOutline, source)
}

pub fn create_ellipsoid_geometry(
    source: DescriptionSource<'_, Ellipsoid>,
) -> Result<Option<GeometryResult>> {
    create(ShapeKind::Ellipsoid, source)
}

pub fn create_ellipsoid_outline_geometry(
    source: DescriptionSource<'_, Ellipsoid>,
) -> Result<Option<GeometryResult>> {
    create(ShapeKind::EllipsoidOutline, source)
}

/// Packed-only adapters with the [`CreateGeometryFn`] signature.
pub(crate) mod packed {
    use super::*;

    pub(crate) fn circle(array: &[f64], offset: usize) -> Result<Option<GeometryResult>> {
        create_circle_geometry(DescriptionSource::Packed { array, offset })
    }

    pub(crate) fn circle_outline(array: &[f64], offset: usize) -> Result<Option<GeometryResult>> {
        create_circle_outline_geometry(DescriptionSource::Packed { array, offset })
    }

    pub(crate) fn ellipse(array: &[f64], offset: usize) -> Result<Option<GeometryResult>> {
        create_ellipse_geometry(DescriptionSource::Packed { array, offset })
    }

    pub(crate) fn ellipse_outline(array: &[f64], offset: usize) -> Result<Option<GeometryResult>> {
        create_ellipse_outline_geometry(DescriptionSource::Packed { array, offset })
    }

    pub(crate) fn cylinder(array: &[f64], offset: usize) -> Result<Option<GeometryResult>> {
        create_cylinder_geometry(DescriptionSource::Packed { array, offset })
    }

    pub(crate) fn cylinder_outline(array: &[f64], offset: usize) -> Result<Option<GeometryResult>> {
        create_cylinder_outline_geometry(DescriptionSource::Packed { array, offset })
    }

    pub(crate) fn sphere(array: &[f64], offset: usize) -> Result<Option<GeometryResult>> {
        create_sphere_geometry(DescriptionSource::Packed { array, offset })
    }

    pub(crate) fn sphere_outline(array: &[f64], offset: usize) -> Result<Option<GeometryResult>> {
        create_sphere_outline_geometry(DescriptionSource::Packed { array, offset })
    }

    pub(crate) fn ellipsoid(array: &[f64], offset: usize) -> Result<Option<GeometryResult>> {
        create_ellipsoid_geometry(DescriptionSource::Packed { array, offset })
    }

    pub(crate) fn ellipsoid_outline(
        array: &[f64],
        offset: usize,
    ) -> Result<Option<GeometryResult>> {
        create_ellipsoid_outline_geometry(DescriptionSource::Packed { array, offset })
    }
}
