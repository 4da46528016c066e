//! Packing integration tests across every shape variant.

use approx::assert_relative_eq;
use glam::DVec3;
use shape_geometry::{
    Circle, CircleOptions, Cylinder, CylinderOptions, Ellipse, EllipseOptions, Ellipsoid,
    EllipsoidOptions, GeometryError, GeometryOffsetAttribute, GeometryResult, Packable,
    ReferenceBody, ShapeDescription, ShapeKind, ShapeVariant, Sphere, SphereOptions,
};

fn samples() -> Vec<ShapeDescription> {
    let center = DVec3::new(1_113_194.9, 2_000_000.0, 5_800_000.0);
    vec![
        Circle::new(CircleOptions {
            center,
            radius: Some(1234.5),
            height: 10.0,
            extruded_height: Some(250.0),
            st_rotation: 0.3,
            offset_attribute: GeometryOffsetAttribute::Top,
            ..Default::default()
        })
        .unwrap()
        .into(),
        Circle::outline(CircleOptions {
            radius: Some(77.0),
            body: ReferenceBody::UNIT_SPHERE,
            granularity: 0.05,
            number_of_vertical_lines: 3,
            ..Default::default()
        })
        .unwrap()
        .into(),
        Ellipse::new(EllipseOptions {
            center,
            semi_major_axis: Some(5000.0),
            semi_minor_axis: Some(3000.0),
            rotation: 1.1,
            ..Default::default()
        })
        .unwrap()
        .into(),
        Ellipse::outline(EllipseOptions {
            semi_major_axis: Some(20.0),
            semi_minor_axis: Some(20.0),
            extruded_height: Some(-5.0),
            ..Default::default()
        })
        .unwrap()
        .into(),
        Cylinder::new(CylinderOptions {
            length: Some(40.0),
            radius: Some(8.0),
            offset_attribute: GeometryOffsetAttribute::All,
            ..Default::default()
        })
        .unwrap()
        .into(),
        Cylinder::outline(CylinderOptions {
            center,
            length: Some(3.0),
            radius: Some(1.5),
            ..Default::default()
        })
        .unwrap()
        .into(),
        Sphere::new(SphereOptions {
            radius: Some(6.0),
            stack_partitions: Some(12),
            slice_partitions: Some(9),
            ..Default::default()
        })
        .unwrap()
        .into(),
        Sphere::outline(SphereOptions {
            center,
            radius: Some(6.0),
            subdivisions: 33,
            ..Default::default()
        })
        .unwrap()
        .into(),
        Ellipsoid::new(EllipsoidOptions {
            center,
            radii: Some(DVec3::new(3.0, 4.0, 5.0)),
            stack_partitions: Some(7),
            slice_partitions: Some(11),
            offset_attribute: GeometryOffsetAttribute::All,
            ..Default::default()
        })
        .unwrap()
        .into(),
        Ellipsoid::outline(EllipsoidOptions {
            radii: Some(DVec3::new(0.5, 1.5, 2.5)),
            ..Default::default()
        })
        .unwrap()
        .into(),
    ]
}

fn assert_geometry_close(actual: &GeometryResult, expected: &GeometryResult) {
    assert_eq!(actual.vertex_count(), expected.vertex_count());
    assert_eq!(actual.indices(), expected.indices());
    assert_eq!(actual.primitive_type(), expected.primitive_type());

    let (a, b) = (actual.bounding_sphere(), expected.bounding_sphere());
    assert_relative_eq!(a.radius, b.radius, max_relative = 1e-12);
    assert_relative_eq!(a.center.x, b.center.x, max_relative = 1e-12);
    assert_relative_eq!(a.center.y, b.center.y, max_relative = 1e-12);
    assert_relative_eq!(a.center.z, b.center.z, max_relative = 1e-12);

    for (p, q) in actual.positions().iter().zip(expected.positions()) {
        assert_relative_eq!(p.x, q.x, max_relative = 1e-12);
        assert_relative_eq!(p.y, q.y, max_relative = 1e-12);
        assert_relative_eq!(p.z, q.z, max_relative = 1e-12);
    }
}

#[test]
fn test_every_variant_round_trips() {
    for description in samples() {
        let kind = description.kind();
        let mut packed = vec![-1.0; 4];
        description.pack(&mut packed, 4);
        assert_eq!(packed.len(), 4 + kind.packed_length());

        let unpacked = ShapeDescription::unpack(kind, &packed, 4).unwrap();
        assert_eq!(unpacked, description, "{kind} changed across packing");

        let expected = description.create_geometry().unwrap().unwrap();
        let actual = unpacked.create_geometry().unwrap().unwrap();
        assert_geometry_close(&actual, &expected);
    }
}

#[test]
fn test_pack_preserves_surrounding_words() {
    let descriptions = samples();
    let mut packed = Vec::new();
    let mut offsets = Vec::new();
    for description in &descriptions {
        offsets.push(packed.len());
        let start = packed.len();
        description.pack(&mut packed, start);
    }

    for (description, offset) in descriptions.iter().zip(offsets) {
        let unpacked = ShapeDescription::unpack(description.kind(), &packed, offset).unwrap();
        assert_eq!(&unpacked, description);
    }
}

#[test]
fn test_circle_outline_scenario() {
    let circle = Circle::outline(CircleOptions {
        center: DVec3::ZERO,
        radius: Some(100_000.0),
        ..Default::default()
    })
    .unwrap();

    let packed = circle.to_packed();
    let unpacked = Circle::unpack(&packed, 0).unwrap();
    assert_eq!(unpacked.ellipse().semi_major_axis, 100_000.0);
    assert_eq!(unpacked.ellipse().semi_minor_axis, 100_000.0);

    let geometry = unpacked.create_geometry().unwrap().unwrap();
    assert_relative_eq!(geometry.bounding_sphere().radius, 100_000.0, epsilon = 1e-6);
}

#[test]
fn test_unpack_past_end() {
    let circle = Circle::new(CircleOptions {
        radius: Some(1.0),
        ..Default::default()
    })
    .unwrap();
    let packed = circle.to_packed();
    let err = Circle::unpack(&packed, 1).unwrap_err();
    assert!(matches!(
        err,
        GeometryError::InvalidArgument {
            parameter: "packed_array",
            ..
        }
    ));
}

#[test]
fn test_unpack_into_reuses_scratch() {
    let first = Sphere::new(SphereOptions {
        radius: Some(1.0),
        ..Default::default()
    })
    .unwrap();
    let second = Sphere::new(SphereOptions {
        radius: Some(9.0),
        ..Default::default()
    })
    .unwrap();

    let mut packed = first.to_packed();
    second.pack(&mut packed, Sphere::PACKED_LENGTH);

    let mut scratch = Sphere::default();
    Sphere::unpack_into(&packed, 0, &mut scratch).unwrap();
    assert_eq!(scratch, first);
    Sphere::unpack_into(&packed, Sphere::PACKED_LENGTH, &mut scratch).unwrap();
    assert_eq!(scratch, second);
}

#[test]
fn test_unpack_rejects_fractional_tag() {
    let sphere = Sphere::new(SphereOptions {
        radius: Some(1.0),
        ..Default::default()
    })
    .unwrap();
    let mut packed = sphere.to_packed();
    // stack_partitions follows center and radii
    packed[6] = 2.5;
    assert!(ShapeDescription::unpack(ShapeKind::Sphere, &packed, 0).is_err());
}
