//! # Shape Descriptions
//!
//! Public shape variants. Each wraps one canonical base description,
//! derives it from its own parameters at construction and delegates
//! packing and tessellation to it.
//!
//! [`ShapeKind`] names every variant/topology pair with a stable module
//! name; [`ShapeDescription`] is the tagged union the dispatch layer packs.

mod circle;
mod cylinder;
mod ellipse;
mod ellipsoid;
mod sphere;

pub use circle::{Circle, CircleOptions};
pub use cylinder::{Cylinder, CylinderOptions};
pub use ellipse::{Ellipse, EllipseOptions};
pub use ellipsoid::{Ellipsoid, EllipsoidOptions};
pub use sphere::{Sphere, SphereOptions};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::base::{
    ensure_finite, ensure_non_negative, EllipseDescription, EllipsoidDescription, Topology,
};
use crate::entry::{self, CreateGeometryFn};
use crate::error::{GeometryError, Result};
use crate::geometry::GeometryResult;
use crate::pack::Packable;

/// Behaviour shared by every shape variant.
pub trait ShapeVariant: Packable + Clone {
    /// Kind of this value, derived from its variant and topology.
    fn kind(&self) -> ShapeKind;

    /// Tessellates the shape. `Ok(None)` means the shape is degenerate.
    fn create_geometry(&self) -> Result<Option<GeometryResult>>;
}

/// Every shape kind the dispatch layer can route to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Circle,
    CircleOutline,
    Ellipse,
    EllipseOutline,
    Cylinder,
    CylinderOutline,
    Sphere,
    SphereOutline,
    Ellipsoid,
    EllipsoidOutline,
}

impl ShapeKind {
    /// All kinds, in registration order.
    pub const ALL: [ShapeKind; 10] = [
        ShapeKind::Circle,
        ShapeKind::CircleOutline,
        ShapeKind::Ellipse,
        ShapeKind::EllipseOutline,
        ShapeKind::Cylinder,
        ShapeKind::CylinderOutline,
        ShapeKind::Sphere,
        ShapeKind::SphereOutline,
        ShapeKind::Ellipsoid,
        ShapeKind::EllipsoidOutline,
    ];

    /// Stable module name used as the dispatch key.
    pub fn module_name(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::CircleOutline => "circle_outline",
            Self::Ellipse => "ellipse",
            Self::EllipseOutline => "ellipse_outline",
            Self::Cylinder => "cylinder",
            Self::CylinderOutline => "cylinder_outline",
            Self::Sphere => "sphere",
            Self::SphereOutline => "sphere_outline",
            Self::Ellipsoid => "ellipsoid",
            Self::EllipsoidOutline => "ellipsoid_outline",
        }
    }

    /// Looks a kind up by module name.
    pub fn from_module_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.module_name() == name)
            .ok_or_else(|| GeometryError::UnknownModule(name.to_string()))
    }

    /// Whether this kind fills or outlines its shape.
    pub fn topology(self) -> Topology {
        match self {
            Self::Circle | Self::Ellipse | Self::Cylinder | Self::Sphere | Self::Ellipsoid => {
                Topology::Fill
            }
            _ => Topology::Outline,
        }
    }

    /// Packed length of descriptions of this kind.
    pub fn packed_length(self) -> usize {
        match self {
            Self::Sphere | Self::SphereOutline | Self::Ellipsoid | Self::EllipsoidOutline => {
                EllipsoidDescription::PACKED_LENGTH
            }
            _ => EllipseDescription::PACKED_LENGTH,
        }
    }

    /// Creation entrypoint for packed descriptions of this kind.
    pub fn create_fn(self) -> CreateGeometryFn {
        match self {
            Self::Circle => entry::packed::circle,
            Self::CircleOutline => entry::packed::circle_outline,
            Self::Ellipse => entry::packed::ellipse,
            Self::EllipseOutline => entry::packed::ellipse_outline,
            Self::Cylinder => entry::packed::cylinder,
            Self::CylinderOutline => entry::packed::cylinder_outline,
            Self::Sphere => entry::packed::sphere,
            Self::SphereOutline => entry::packed::sphere_outline,
            Self::Ellipsoid => entry::packed::ellipsoid,
            Self::EllipsoidOutline => entry::packed::ellipsoid_outline,
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.module_name())
    }
}

impl FromStr for ShapeKind {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_module_name(s)
    }
}

/// Any shape description, tagged by variant.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeDescription {
    Circle(Circle),
    Ellipse(Ellipse),
    Cylinder(Cylinder),
    Sphere(Sphere),
    Ellipsoid(Ellipsoid),
}

impl ShapeDescription {
    /// Kind of the wrapped description.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Circle(shape) => shape.kind(),
            Self::Ellipse(shape) => shape.kind(),
            Self::Cylinder(shape) => shape.kind(),
            Self::Sphere(shape) => shape.kind(),
            Self::Ellipsoid(shape) => shape.kind(),
        }
    }

    /// Packed length of the wrapped description.
    pub fn packed_length(&self) -> usize {
        self.kind().packed_length()
    }

    /// Packs the wrapped description at `starting_index`.
    pub fn pack<'a>(&self, array: &'a mut Vec<f64>, starting_index: usize) -> &'a mut Vec<f64> {
        match self {
            Self::Circle(shape) => shape.pack(array, starting_index),
            Self::Ellipse(shape) => shape.pack(array, starting_index),
            Self::Cylinder(shape) => shape.pack(array, starting_index),
            Self::Sphere(shape) => shape.pack(array, starting_index),
            Self::Ellipsoid(shape) => shape.pack(array, starting_index),
        }
    }

    /// Unpacks a description of the given kind.
    ///
    /// Fails if the packed topology does not match the kind.
    pub fn unpack(kind: ShapeKind, array: &[f64], starting_index: usize) -> Result<Self> {
        let description = match kind {
            ShapeKind::Circle | ShapeKind::CircleOutline => {
                Self::Circle(Circle::unpack(array, starting_index)?)
            }
            ShapeKind::Ellipse | ShapeKind::EllipseOutline => {
                Self::Ellipse(Ellipse::unpack(array, starting_index)?)
            }
            ShapeKind::Cylinder | ShapeKind::CylinderOutline => {
                Self::Cylinder(Cylinder::unpack(array, starting_index)?)
            }
            ShapeKind::Sphere | ShapeKind::SphereOutline => {
                Self::Sphere(Sphere::unpack(array, starting_index)?)
            }
            ShapeKind::Ellipsoid | ShapeKind::EllipsoidOutline => {
                Self::Ellipsoid(Ellipsoid::unpack(array, starting_index)?)
            }
        };
        ensure_kind(kind, description.kind())?;
        Ok(description)
    }

    /// Tessellates the wrapped description.
    pub fn create_geometry(&self) -> Result<Option<GeometryResult>> {
        match self {
            Self::Circle(shape) => shape.create_geometry(),
            Self::Ellipse(shape) => shape.create_geometry(),
            Self::Cylinder(shape) => shape.create_geometry(),
            Self::Sphere(shape) => shape.create_geometry(),
            Self::Ellipsoid(shape) => shape.create_geometry(),
        }
    }
}

impl From<Circle> for ShapeDescription {
    fn from(shape: Circle) -> Self {
        Self::Circle(shape)
    }
}

impl From<Ellipse> for ShapeDescription {
    fn from(shape: Ellipse) -> Self {
        Self::Ellipse(shape)
    }
}

impl From<Cylinder> for ShapeDescription {
    fn from(shape: Cylinder) -> Self {
        Self::Cylinder(shape)
    }
}

impl From<Sphere> for ShapeDescription {
    fn from(shape: Sphere) -> Self {
        Self::Sphere(shape)
    }
}

impl From<Ellipsoid> for ShapeDescription {
    fn from(shape: Ellipsoid) -> Self {
        Self::Ellipsoid(shape)
    }
}

/// Fails unless a description of kind `actual` may be created as `expected`.
pub(crate) fn ensure_kind(expected: ShapeKind, actual: ShapeKind) -> Result<()> {
    if expected == actual {
        return Ok(());
    }
    Err(GeometryError::invalid_argument(
        "topology",
        format!("{expected} received a {actual} description"),
    ))
}

/// Reads a mandatory finite number.
pub(crate) fn required(parameter: &'static str, value: Option<f64>) -> Result<f64> {
    let value = value.ok_or_else(|| GeometryError::missing(parameter))?;
    ensure_finite(parameter, value)?;
    Ok(value)
}

/// Reads a mandatory finite, non-negative number.
pub(crate) fn required_extent(parameter: &'static str, value: Option<f64>) -> Result<f64> {
    let value = required(parameter, value)?;
    ensure_non_negative(parameter, value)?;
    Ok(value)
}
