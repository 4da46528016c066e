//! # Ellipse Tessellation
//!
//! Lays the ellipse out in the east-north-up frame at its center. The
//! boundary point count follows the granularity (see
//! [`config::constants::compute_ellipse_segments`]).
//!
//! | Topology | Extruded | Output |
//! |---|---|---|
//! | Fill | no | center + ring, triangle fan |
//! | Fill | yes | top cap, bottom cap, walls |
//! | Outline | no | ring as line loop |
//! | Outline | yes | two line loops + vertical lines |

use std::f64::consts::TAU;

use config::constants::compute_ellipse_segments;
use glam::DVec3;

use super::GeometryBuilder;
use crate::base::{EllipseDescription, Topology};
use crate::frame::LocalFrame;
use crate::geometry::{BoundingSphere, GeometryResult};

/// One boundary point in tangent-plane coordinates.
#[derive(Debug, Clone, Copy)]
struct RingPoint {
    east: f64,
    north: f64,
    normal_east: f64,
    normal_north: f64,
    st: [f64; 2],
}

/// Tessellates a validated, non-degenerate ellipse.
pub fn tessellate(description: &EllipseDescription) -> GeometryResult {
    let frame = description.body.east_north_up(description.center);
    let segments = compute_ellipse_segments(
        description.semi_major_axis,
        description.granularity,
        description.body.maximum_radius(),
    ) as usize;
    let ring = ring_points(description, segments);
    let (low, high) = description.height_range();

    let builder = match (description.topology, description.is_extruded()) {
        (Topology::Fill, false) => fill(&frame, &ring, high),
        (Topology::Fill, true) => fill_extruded(&frame, &ring, low, high),
        (Topology::Outline, false) => outline(&frame, &ring, high),
        (Topology::Outline, true) => {
            outline_extruded(&frame, &ring, low, high, description.number_of_vertical_lines)
        }
    };

    builder.finish(
        description.topology,
        bounding_sphere(description, &frame),
        description.offset_attribute,
    )
}

/// Sphere of the semi-major axis around the center, spanning both heights.
fn bounding_sphere(description: &EllipseDescription, frame: &LocalFrame) -> BoundingSphere {
    let (low, high) = description.height_range();
    let radius = description.semi_major_axis;
    let bottom = BoundingSphere::new(frame.to_fixed(0.0, 0.0, low), radius);
    let top = BoundingSphere::new(frame.to_fixed(0.0, 0.0, high), radius);
    bottom.union(&top)
}

fn ring_points(description: &EllipseDescription, segments: usize) -> Vec<RingPoint> {
    let a = description.semi_major_axis;
    let b = description.semi_minor_axis;
    let (sin_r, cos_r) = description.rotation.sin_cos();
    let (sin_st, cos_st) = description.st_rotation.sin_cos();

    (0..segments)
        .map(|i| {
            let theta = TAU * i as f64 / segments as f64;
            let (sin_t, cos_t) = theta.sin_cos();
            let u = a * cos_t;
            let v = b * sin_t;

            // Gradient of the implicit ellipse is the outward normal
            let nu = u / (a * a);
            let nv = v / (b * b);
            let n_len = (nu * nu + nv * nv).sqrt();

            let s = 0.5 + (u * cos_st - v * sin_st) / (2.0 * a);
            let t = 0.5 + (u * sin_st + v * cos_st) / (2.0 * a);

            RingPoint {
                east: u * cos_r - v * sin_r,
                north: u * sin_r + v * cos_r,
                normal_east: (nu * cos_r - nv * sin_r) / n_len,
                normal_north: (nu * sin_r + nv * cos_r) / n_len,
                st: [s, t],
            }
        })
        .collect()
}

fn fill(frame: &LocalFrame, ring: &[RingPoint], height: f64) -> GeometryBuilder {
    let n = ring.len() as u32;
    let mut builder = GeometryBuilder::with_capacity(ring.len() + 1, ring.len() * 3);

    cap(&mut builder, frame, ring, height, frame.up, true);
    debug_assert_eq!(builder.vertex_count(), n + 1);
    builder
}

fn fill_extruded(frame: &LocalFrame, ring: &[RingPoint], low: f64, high: f64) -> GeometryBuilder {
    let n = ring.len() as u32;
    let mut builder = GeometryBuilder::with_capacity(ring.len() * 4 + 2, ring.len() * 12);

    cap(&mut builder, frame, ring, high, frame.up, true);
    cap(&mut builder, frame, ring, low, -frame.up, false);

    let top_start = builder.vertex_count();
    for (i, p) in ring.iter().enumerate() {
        let normal = frame.direction(p.normal_east, p.normal_north);
        let s = i as f64 / n as f64;
        builder.vertex(frame.to_fixed(p.east, p.north, high), normal, [s, 1.0], true);
    }
    let bottom_start = builder.vertex_count();
    for (i, p) in ring.iter().enumerate() {
        let normal = frame.direction(p.normal_east, p.normal_north);
        let s = i as f64 / n as f64;
        builder.vertex(frame.to_fixed(p.east, p.north, low), normal, [s, 0.0], false);
    }

    for i in 0..n {
        let j = (i + 1) % n;
        let (t_i, t_j) = (top_start + i, top_start + j);
        let (b_i, b_j) = (bottom_start + i, bottom_start + j);
        builder.triangle(b_i, b_j, t_j);
        builder.triangle(b_i, t_j, t_i);
    }

    builder
}

/// Adds a center vertex plus ring at `height` and fans it.
///
/// Upward caps wind counter-clockwise seen from above; downward caps are
/// reversed so both face outward.
fn cap(
    builder: &mut GeometryBuilder,
    frame: &LocalFrame,
    ring: &[RingPoint],
    height: f64,
    normal: DVec3,
    top: bool,
) {
    let n = ring.len() as u32;
    let center = builder.vertex(frame.to_fixed(0.0, 0.0, height), normal, [0.5, 0.5], top);
    for p in ring {
        builder.vertex(frame.to_fixed(p.east, p.north, height), normal, p.st, top);
    }

    for i in 0..n {
        let a = center + 1 + i;
        let b = center + 1 + (i + 1) % n;
        if top {
            builder.triangle(center, a, b);
        } else {
            builder.triangle(center, b, a);
        }
    }
}

fn outline(frame: &LocalFrame, ring: &[RingPoint], height: f64) -> GeometryBuilder {
    let mut builder = GeometryBuilder::with_capacity(ring.len(), ring.len() * 2);
    line_loop(&mut builder, frame, ring, height, true);
    builder
}

fn outline_extruded(
    frame: &LocalFrame,
    ring: &[RingPoint],
    low: f64,
    high: f64,
    number_of_vertical_lines: u32,
) -> GeometryBuilder {
    let n = ring.len() as u32;
    let vertical = number_of_vertical_lines.min(n);
    let mut builder =
        GeometryBuilder::with_capacity(ring.len() * 2, (ring.len() * 2 + vertical as usize) * 2);

    let top_start = line_loop(&mut builder, frame, ring, high, true);
    let bottom_start = line_loop(&mut builder, frame, ring, low, false);

    for k in 0..vertical {
        let i = k * n / vertical;
        builder.line(top_start + i, bottom_start + i);
    }

    builder
}

/// Adds the ring at `height` as a closed loop of lines. Returns the index
/// of its first vertex.
fn line_loop(
    builder: &mut GeometryBuilder,
    frame: &LocalFrame,
    ring: &[RingPoint],
    height: f64,
    top: bool,
) -> u32 {
    let n = ring.len() as u32;
    let start = builder.vertex_count();
    for p in ring {
        builder.vertex(frame.to_fixed(p.east, p.north, height), frame.up, p.st, top);
    }
    for i in 0..n {
        builder.line(start + i, start + (i + 1) % n);
    }
    start
}
