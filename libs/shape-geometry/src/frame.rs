//! # Reference Frames
//!
//! The reference body a shape sits on and the local tangent frame used to
//! lay out curves around a center point.

use config::constants::{ORIGIN_EPSILON, WGS84_RADII};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Triaxial ellipsoid a shape is anchored to.
///
/// Crosses the packing boundary by value: only the three radii are packed.
///
/// # Example
///
/// ```rust
/// use shape_geometry::frame::ReferenceBody;
///
/// let body = ReferenceBody::WGS84;
/// assert_eq!(body.maximum_radius(), 6_378_137.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceBody {
    radii: DVec3,
}

impl ReferenceBody {
    /// The WGS84 ellipsoid.
    pub const WGS84: Self = Self {
        radii: DVec3::new(WGS84_RADII[0], WGS84_RADII[1], WGS84_RADII[2]),
    };

    /// The unit sphere.
    pub const UNIT_SPHERE: Self = Self { radii: DVec3::ONE };

    /// Creates a body from its radii along x, y and z.
    pub fn new(radii: DVec3) -> Self {
        Self { radii }
    }

    /// Returns the radii.
    #[inline]
    pub fn radii(&self) -> DVec3 {
        self.radii
    }

    /// Returns the largest of the three radii.
    #[inline]
    pub fn maximum_radius(&self) -> f64 {
        self.radii.max_element()
    }

    /// Returns true if all radii are finite and positive.
    pub fn is_valid(&self) -> bool {
        self.radii.is_finite() && self.radii.min_element() > 0.0
    }

    /// Surface normal of the body at the given position.
    ///
    /// Returns `None` at the body origin, where no normal is defined.
    pub fn geodetic_surface_normal(&self, position: DVec3) -> Option<DVec3> {
        if position.length() < ORIGIN_EPSILON {
            return None;
        }
        (position / (self.radii * self.radii)).try_normalize()
    }

    /// East-north-up frame at `origin`.
    ///
    /// At the body origin the fixed axes are used. At the poles east is
    /// taken along +X.
    pub fn east_north_up(&self, origin: DVec3) -> LocalFrame {
        let Some(up) = self.geodetic_surface_normal(origin) else {
            return LocalFrame {
                origin,
                east: DVec3::X,
                north: DVec3::Y,
                up: DVec3::Z,
            };
        };

        let east = DVec3::new(-up.y, up.x, 0.0).try_normalize().unwrap_or(DVec3::X);
        let north = up.cross(east);

        LocalFrame {
            origin,
            east,
            north,
            up,
        }
    }
}

impl Default for ReferenceBody {
    fn default() -> Self {
        Self::WGS84
    }
}

/// Orthonormal tangent frame anchored at a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalFrame {
    pub origin: DVec3,
    pub east: DVec3,
    pub north: DVec3,
    pub up: DVec3,
}

impl LocalFrame {
    /// Maps local (east, north, up) coordinates to body-fixed coordinates.
    #[inline]
    pub fn to_fixed(&self, east: f64, north: f64, up: f64) -> DVec3 {
        self.origin + self.east * east + self.north * north + self.up * up
    }

    /// Maps a tangent-plane direction to body-fixed coordinates.
    #[inline]
    pub fn direction(&self, east: f64, north: f64) -> DVec3 {
        self.east * east + self.north * north
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_origin_uses_fixed_axes() {
        let frame = ReferenceBody::WGS84.east_north_up(DVec3::ZERO);
        assert_eq!(frame.east, DVec3::X);
        assert_eq!(frame.north, DVec3::Y);
        assert_eq!(frame.up, DVec3::Z);
    }

    #[test]
    fn test_equator_frame() {
        let frame = ReferenceBody::WGS84.east_north_up(DVec3::new(6_378_137.0, 0.0, 0.0));
        assert_relative_eq!(frame.up.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(frame.east.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(frame.north.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pole_frame_is_orthonormal() {
        let frame = ReferenceBody::WGS84.east_north_up(DVec3::new(0.0, 0.0, 6_356_752.0));
        assert_relative_eq!(frame.east.dot(frame.north), 0.0, epsilon = 1e-12);
        assert_relative_eq!(frame.east.dot(frame.up), 0.0, epsilon = 1e-12);
        assert_relative_eq!(frame.north.length(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_body() {
        assert!(!ReferenceBody::new(DVec3::new(1.0, 0.0, 1.0)).is_valid());
        assert!(!ReferenceBody::new(DVec3::new(1.0, f64::NAN, 1.0)).is_valid());
        assert!(ReferenceBody::UNIT_SPHERE.is_valid());
    }
}
