//! # Shape Geometry
//!
//! Packable shape descriptions and their tessellation.
//!
//! ## Architecture
//!
//! ```text
//! Circle ─┐                                 ┌─> primitives::ellipse
//! Ellipse ├─> EllipseDescription ───────────┤
//! Cylinder┘                                 │
//! Sphere ──┬> EllipsoidDescription ─────────┴─> primitives::ellipsoid
//! Ellipsoid┘                                        │
//!                                                   v
//!                                            GeometryResult
//! ```
//!
//! Every variant reduces to one of two canonical descriptions, which own
//! the packing layout and the tessellation. Variants only derive their base
//! from their own parameters.
//!
//! ## Usage
//!
//! ```rust
//! use shape_geometry::{create_sphere_geometry, Sphere, SphereOptions};
//!
//! let sphere = Sphere::new(SphereOptions { radius: Some(2.0), ..Default::default() }).unwrap();
//! let geometry = create_sphere_geometry((&sphere).into()).unwrap().unwrap();
//! assert_eq!(geometry.bounding_sphere().radius, 2.0);
//! ```

pub mod base;
pub mod entry;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod pack;
pub mod primitives;
pub mod shapes;

pub use entry::{
    create_circle_geometry, create_circle_outline_geometry, create_cylinder_geometry,
    create_cylinder_outline_geometry, create_ellipse_geometry, create_ellipse_outline_geometry,
    create_ellipsoid_geometry, create_ellipsoid_outline_geometry, create_sphere_geometry,
    create_sphere_outline_geometry, CreateGeometryFn, DescriptionSource,
};
pub use error::{GeometryError, Result};
pub use frame::ReferenceBody;
pub use geometry::{BoundingSphere, GeometryOffsetAttribute, GeometryResult};
pub use pack::Packable;
pub use shapes::{
    Circle, CircleOptions, Cylinder, CylinderOptions, Ellipse, EllipseOptions, Ellipsoid,
    EllipsoidOptions, ShapeDescription, ShapeKind, ShapeVariant, Sphere, SphereOptions,
};
