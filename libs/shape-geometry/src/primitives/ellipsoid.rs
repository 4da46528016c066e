//! # Ellipsoid Tessellation
//!
//! Latitude/longitude tessellation. Filled ellipsoids duplicate the seam
//! and pole vertices so texture coordinates stay continuous; outlines draw
//! latitude circles and pole-to-pole meridians.

use std::f64::consts::{PI, TAU};

use glam::DVec3;

use super::GeometryBuilder;
use crate::base::{EllipsoidDescription, Topology};
use crate::geometry::{BoundingSphere, GeometryResult};

/// Tessellates a validated, non-degenerate ellipsoid.
pub fn tessellate(description: &EllipsoidDescription) -> GeometryResult {
    let builder = match description.topology {
        Topology::Fill => fill(description),
        Topology::Outline => outline(description),
    };

    let bounding_sphere =
        BoundingSphere::new(description.center, description.radii.max_element());
    builder.finish(
        description.topology,
        bounding_sphere,
        description.offset_attribute,
    )
}

/// Unit direction at polar angle `phi` (0 at +Z) and azimuth `theta`.
#[inline]
fn direction(phi: f64, theta: f64) -> DVec3 {
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    DVec3::new(sin_phi * cos_theta, sin_phi * sin_theta, cos_phi)
}

fn fill(description: &EllipsoidDescription) -> GeometryBuilder {
    let stacks = description.stack_partitions;
    let slices = description.slice_partitions;
    let radii = description.radii;
    let row = slices + 1;

    let vertex_count = (stacks as usize + 1) * row as usize;
    let triangle_count = slices as usize * (2 * stacks as usize - 2);
    let mut builder = GeometryBuilder::with_capacity(vertex_count, triangle_count * 3);

    for i in 0..=stacks {
        let phi = PI * i as f64 / stacks as f64;
        for j in 0..=slices {
            let theta = TAU * j as f64 / slices as f64;
            let unit = direction(phi, theta);
            let normal = (unit / radii).normalize_or_zero();
            let st = [j as f64 / slices as f64, 1.0 - i as f64 / stacks as f64];
            builder.vertex(description.center + radii * unit, normal, st, true);
        }
    }

    for i in 0..stacks {
        for j in 0..slices {
            let a = i * row + j;
            let b = a + row;
            if i != 0 {
                builder.triangle(a, b, a + 1);
            }
            if i != stacks - 1 {
                builder.triangle(a + 1, b, b + 1);
            }
        }
    }

    builder
}

fn outline(description: &EllipsoidDescription) -> GeometryBuilder {
    let stacks = description.stack_partitions;
    let slices = description.slice_partitions;
    let subdivisions = description.subdivisions;
    let radii = description.radii;
    let center = description.center;

    let circles = stacks as usize - 1;
    let points = subdivisions as usize;
    let vertex_count = (circles + slices as usize) * points;
    let line_count = circles * points + slices as usize * (points - 1);
    let mut builder = GeometryBuilder::with_capacity(vertex_count, line_count * 2);

    // Latitude circles, poles excluded
    for i in 1..stacks {
        let phi = PI * i as f64 / stacks as f64;
        let start = builder.vertex_count();
        for k in 0..subdivisions {
            let theta = TAU * k as f64 / subdivisions as f64;
            let unit = direction(phi, theta);
            builder.vertex(center + radii * unit, unit, [0.0, 0.0], true);
        }
        for k in 0..subdivisions {
            builder.line(start + k, start + (k + 1) % subdivisions);
        }
    }

    // Meridians from pole to pole
    for j in 0..slices {
        let theta = TAU * j as f64 / slices as f64;
        let start = builder.vertex_count();
        for k in 0..subdivisions {
            let phi = PI * k as f64 / (subdivisions - 1) as f64;
            let unit = direction(phi, theta);
            builder.vertex(center + radii * unit, unit, [0.0, 0.0], true);
        }
        for k in 0..subdivisions - 1 {
            builder.line(start + k, start + k + 1);
        }
    }

    builder
}
