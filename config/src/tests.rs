//! # Tests for Config Constants
//!
//! Unit tests verifying the correctness of configuration constants
//! and helper functions.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_epsilon_is_positive() {
    assert!(EPSILON > 0.0, "EPSILON must be positive");
}

#[test]
fn test_origin_epsilon_larger_than_epsilon() {
    assert!(ORIGIN_EPSILON >= EPSILON);
}

// =============================================================================
// TESSELLATION TESTS
// =============================================================================

#[test]
fn test_default_granularity_is_one_degree() {
    assert!((DEFAULT_GRANULARITY - 1.0_f64.to_radians()).abs() < 1e-15);
}

#[test]
fn test_partition_defaults_above_minimums() {
    assert!(DEFAULT_STACK_PARTITIONS >= MIN_STACK_PARTITIONS);
    assert!(DEFAULT_SLICE_PARTITIONS >= MIN_SLICE_PARTITIONS);
    assert!(DEFAULT_OUTLINE_STACK_PARTITIONS >= MIN_STACK_PARTITIONS);
    assert!(DEFAULT_OUTLINE_SLICE_PARTITIONS >= MIN_SLICE_PARTITIONS);
}

#[test]
fn test_partition_limits_bound_vertex_count() {
    assert!(DEFAULT_STACK_PARTITIONS <= MAX_STACK_PARTITIONS);
    assert!(DEFAULT_SLICE_PARTITIONS <= MAX_SLICE_PARTITIONS);
    assert!(DEFAULT_SUBDIVISIONS <= MAX_SUBDIVISIONS);

    let stacks = MAX_STACK_PARTITIONS as usize;
    let slices = MAX_SLICE_PARTITIONS as usize;
    let subdivisions = MAX_SUBDIVISIONS as usize;
    let outline_vertices = (stacks - 1) * subdivisions + slices * subdivisions;
    assert!(outline_vertices < 10_000_000);
}

#[test]
fn test_segment_bounds_ordered() {
    assert!(MIN_ELLIPSE_SEGMENTS >= 3);
    assert!(MIN_ELLIPSE_SEGMENTS < MAX_ELLIPSE_SEGMENTS);
}

// =============================================================================
// COMPUTE_ELLIPSE_SEGMENTS TESTS
// =============================================================================

#[test]
fn test_segments_follow_arc_length() {
    // circumference 2*PI*100 ~ 628.3, arc length 10 => 63 segments
    let segments = compute_ellipse_segments(100.0, 0.1, 100.0);
    assert_eq!(segments, 63);
}

#[test]
fn test_segments_clamped_to_minimum() {
    assert_eq!(compute_ellipse_segments(0.5, 1.0, 100.0), MIN_ELLIPSE_SEGMENTS);
}

#[test]
fn test_segments_clamped_to_maximum() {
    assert_eq!(compute_ellipse_segments(1e15, 1e-9, 1.0), MAX_ELLIPSE_SEGMENTS);
}

#[test]
fn test_segments_non_positive_granularity() {
    assert_eq!(compute_ellipse_segments(100.0, 0.0, 100.0), MIN_ELLIPSE_SEGMENTS);
    assert_eq!(compute_ellipse_segments(100.0, -1.0, 100.0), MIN_ELLIPSE_SEGMENTS);
}

#[test]
fn test_segments_wgs84_default() {
    // 100km circle at 1 degree granularity on WGS84 is coarse
    let segments = compute_ellipse_segments(100_000.0, DEFAULT_GRANULARITY, WGS84_RADII[0]);
    assert_eq!(segments, MIN_ELLIPSE_SEGMENTS);
}

// =============================================================================
// PACKING TESTS
// =============================================================================

#[test]
fn test_sixty_four_kilobytes_matches_u16_range() {
    assert_eq!(SIXTY_FOUR_KILOBYTES, 65_536);
}

#[test]
fn test_bounding_sphere_packed_length() {
    assert_eq!(BOUNDING_SPHERE_PACKED_LENGTH, 4);
}

// =============================================================================
// WORKER TESTS
// =============================================================================

#[test]
fn test_default_worker_count_in_range() {
    let count = default_worker_count();
    assert!(count >= 1);
    assert!(count <= MAX_WORKER_COUNT);
}

#[test]
fn test_default_worker_count_is_stable() {
    assert_eq!(default_worker_count(), default_worker_count());
}

// =============================================================================
// APPROX HELPERS
// =============================================================================

#[test]
fn test_approx_equal_relative() {
    assert!(approx_equal(1e6, 1e6 + 1e-7));
    assert!(!approx_equal(1e6, 1e6 + 1.0));
}

#[test]
fn test_approx_equal_near_zero() {
    assert!(approx_equal(0.0, 1e-13));
    assert!(!approx_equal(0.0, 1e-6));
}
