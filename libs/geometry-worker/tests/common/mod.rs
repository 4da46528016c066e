#![allow(dead_code)]

use std::sync::Once;

use glam::DVec3;
use shape_geometry::{
    Circle, CircleOptions, Ellipse, EllipseOptions, Ellipsoid, EllipsoidOptions, ShapeDescription,
    Sphere, SphereOptions,
};
use simplelog::{Config, LevelFilter, TestLogger};

static LOGGING: Once = Once::new();

/// Routes worker logs into the test output.
pub fn init_logging() {
    LOGGING.call_once(|| {
        let _ = TestLogger::init(LevelFilter::Debug, Config::default());
    });
}

pub fn circle(radius: f64) -> ShapeDescription {
    Circle::new(CircleOptions {
        radius: Some(radius),
        ..Default::default()
    })
    .unwrap()
    .into()
}

pub fn sphere_outline(radius: f64) -> ShapeDescription {
    Sphere::outline(SphereOptions {
        center: DVec3::new(0.0, 0.0, 10.0),
        radius: Some(radius),
        ..Default::default()
    })
    .unwrap()
    .into()
}

pub fn ellipse(semi_major_axis: f64, semi_minor_axis: f64) -> ShapeDescription {
    Ellipse::new(EllipseOptions {
        semi_major_axis: Some(semi_major_axis),
        semi_minor_axis: Some(semi_minor_axis),
        rotation: 0.25,
        extruded_height: Some(30.0),
        ..Default::default()
    })
    .unwrap()
    .into()
}

pub fn dense_ellipsoid() -> ShapeDescription {
    Ellipsoid::new(EllipsoidOptions {
        radii: Some(DVec3::new(1.0, 2.0, 3.0)),
        stack_partitions: Some(300),
        slice_partitions: Some(300),
        ..Default::default()
    })
    .unwrap()
    .into()
}
