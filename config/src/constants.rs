//! # Configuration Constants
//!
//! Centralized constants for the shape geometry pipeline. Tessellation
//! defaults, packing layout sizes and worker limits are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Tessellation**: Default granularity and partition counts
//! - **Reference Body**: Default ellipsoid radii
//! - **Packing**: Buffer sizing and index width thresholds
//! - **Workers**: Pool sizing and scheduling limits

use std::sync::OnceLock;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-13));
/// ```
pub const EPSILON: f64 = 1e-12;

/// Tolerance used when deciding whether a position sits at the body origin.
///
/// A local tangent frame cannot be derived at the origin, so positions
/// closer than this fall back to the fixed axes.
pub const ORIGIN_EPSILON: f64 = 1e-9;

// =============================================================================
// TESSELLATION CONSTANTS
// =============================================================================

/// Default angular distance between consecutive ellipse points, in radians.
///
/// One degree. Multiplied by the reference body's maximum radius this gives
/// the target arc length of one boundary segment.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_GRANULARITY;
///
/// assert!((DEFAULT_GRANULARITY.to_degrees() - 1.0).abs() < 1e-12);
/// ```
pub const DEFAULT_GRANULARITY: f64 = std::f64::consts::PI / 180.0;

/// Default height of a shape above the reference body surface.
pub const DEFAULT_HEIGHT: f64 = 0.0;

/// Default rotation of an ellipse, in radians from north.
pub const DEFAULT_ROTATION: f64 = 0.0;

/// Default number of vertical lines drawn between the top and bottom rings
/// of an extruded ellipse outline.
pub const DEFAULT_NUMBER_OF_VERTICAL_LINES: u32 = 16;

/// Default stack (latitude band) count for filled ellipsoids.
pub const DEFAULT_STACK_PARTITIONS: u32 = 64;

/// Default slice (longitude band) count for filled ellipsoids.
pub const DEFAULT_SLICE_PARTITIONS: u32 = 64;

/// Default number of latitude circles in an ellipsoid outline.
pub const DEFAULT_OUTLINE_STACK_PARTITIONS: u32 = 10;

/// Default number of longitude half-circles in an ellipsoid outline.
pub const DEFAULT_OUTLINE_SLICE_PARTITIONS: u32 = 8;

/// Default number of points used to draw each ellipsoid outline circle.
pub const DEFAULT_SUBDIVISIONS: u32 = 128;

/// Minimum number of stacks for any ellipsoid tessellation.
pub const MIN_STACK_PARTITIONS: u32 = 2;

/// Minimum number of slices for any ellipsoid tessellation.
pub const MIN_SLICE_PARTITIONS: u32 = 3;

/// Maximum number of stacks for any ellipsoid tessellation.
///
/// Together with [`MAX_SLICE_PARTITIONS`] and [`MAX_SUBDIVISIONS`] this keeps
/// a single ellipsoid under ten million vertices.
///
/// # Example
///
/// ```rust
/// use config::constants::{MAX_SLICE_PARTITIONS, MAX_STACK_PARTITIONS};
///
/// let fill_vertices = (MAX_STACK_PARTITIONS as usize + 1) * (MAX_SLICE_PARTITIONS as usize + 1);
/// assert!(fill_vertices < 10_000_000);
/// ```
pub const MAX_STACK_PARTITIONS: u32 = 2048;

/// Maximum number of slices for any ellipsoid tessellation.
pub const MAX_SLICE_PARTITIONS: u32 = 2048;

/// Maximum number of points along each ellipsoid outline circle.
pub const MAX_SUBDIVISIONS: u32 = 2048;

/// Minimum number of boundary points for an ellipse.
///
/// # Example
///
/// ```rust
/// use config::constants::MIN_ELLIPSE_SEGMENTS;
///
/// let computed = 2;
/// assert_eq!(computed.max(MIN_ELLIPSE_SEGMENTS), MIN_ELLIPSE_SEGMENTS);
/// ```
pub const MIN_ELLIPSE_SEGMENTS: u32 = 8;

/// Maximum number of boundary points for an ellipse.
///
/// Safety limit preventing a tiny granularity from exhausting memory.
pub const MAX_ELLIPSE_SEGMENTS: u32 = 1 << 16;

// =============================================================================
// REFERENCE BODY CONSTANTS
// =============================================================================

/// Radii of the WGS84 ellipsoid in meters, used as the default body.
pub const WGS84_RADII: [f64; 3] = [6_378_137.0, 6_378_137.0, 6_356_752.314_245_179_3];

// =============================================================================
// PACKING CONSTANTS
// =============================================================================

/// Vertex count at which 16-bit indices stop being sufficient.
///
/// A geometry with this many vertices or more needs 32-bit indices.
///
/// # Example
///
/// ```rust
/// use config::constants::SIXTY_FOUR_KILOBYTES;
///
/// assert_eq!(SIXTY_FOUR_KILOBYTES, u16::MAX as usize + 1);
/// ```
pub const SIXTY_FOUR_KILOBYTES: usize = 64 * 1024;

/// Number of f64 words used to encode one bounding sphere (center xyz, radius).
pub const BOUNDING_SPHERE_PACKED_LENGTH: usize = 4;

// =============================================================================
// WORKER CONSTANTS
// =============================================================================

/// Minimum number of packed sub-tasks before a batch is fanned out across
/// the rayon pool. Smaller batches run in order on the worker thread.
pub const PARALLEL_BATCH_THRESHOLD: usize = 4;

/// Default cap on in-flight requests per worker pool.
pub const DEFAULT_MAX_ACTIVE_TASKS: usize = 64;

/// Upper bound applied to the detected worker count.
pub const MAX_WORKER_COUNT: usize = 16;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Computes the number of boundary points for an ellipse.
///
/// The target arc length of one segment is `granularity * max_radius`,
/// where `max_radius` is the largest radius of the reference body. The
/// circumference is bounded above by the circle of the semi-major axis.
///
/// # Arguments
///
/// * `semi_major_axis` - Largest axis of the ellipse
/// * `granularity` - Angular distance between points, in radians
/// * `max_radius` - Largest radius of the reference body
///
/// # Example
///
/// ```rust
/// use config::constants::{compute_ellipse_segments, MAX_ELLIPSE_SEGMENTS, MIN_ELLIPSE_SEGMENTS};
///
/// // Tiny ellipses still get the minimum count
/// assert_eq!(compute_ellipse_segments(1.0, 0.1, 10.0), MIN_ELLIPSE_SEGMENTS);
/// // Huge ones are capped
/// assert_eq!(compute_ellipse_segments(1e12, 1e-6, 1.0), MAX_ELLIPSE_SEGMENTS);
/// ```
pub fn compute_ellipse_segments(semi_major_axis: f64, granularity: f64, max_radius: f64) -> u32 {
    let arc_length = granularity * max_radius;
    if !(arc_length > 0.0) || !semi_major_axis.is_finite() {
        return MIN_ELLIPSE_SEGMENTS;
    }

    let circumference = std::f64::consts::TAU * semi_major_axis;
    let segments = (circumference / arc_length).ceil();
    if segments >= MAX_ELLIPSE_SEGMENTS as f64 {
        return MAX_ELLIPSE_SEGMENTS;
    }

    (segments as u32).clamp(MIN_ELLIPSE_SEGMENTS, MAX_ELLIPSE_SEGMENTS)
}

/// Number of worker threads to spawn by default.
///
/// Leaves one core for the caller's thread. Uses `available_parallelism()`
/// when available, falling back to 2.
///
/// # Example
///
/// ```rust
/// use config::constants::{default_worker_count, MAX_WORKER_COUNT};
///
/// let count = default_worker_count();
/// assert!(count >= 1 && count <= MAX_WORKER_COUNT);
/// ```
pub fn default_worker_count() -> usize {
    static COUNT: OnceLock<usize> = OnceLock::new();
    *COUNT.get_or_init(|| {
        std::thread::available_parallelism()
            .map(|n| n.get().saturating_sub(1))
            .unwrap_or(2)
            .clamp(1, MAX_WORKER_COUNT)
    })
}

/// Checks if two f64 values are equal within a relative tolerance of
/// `EPSILON` (absolute near zero).
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(100_000.0, 100_000.0 + 1e-8));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= EPSILON * scale
}
