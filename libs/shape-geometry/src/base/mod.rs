//! # Canonical Base Descriptions
//!
//! Every closed curve reduces to an [`EllipseDescription`] and every closed
//! surface to an [`EllipsoidDescription`]. Shape variants wrap one of these
//! and never store a second copy of the numbers.

pub mod ellipse;
pub mod ellipsoid;

pub use ellipse::EllipseDescription;
pub use ellipsoid::EllipsoidDescription;

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};
use crate::geometry::PrimitiveType;

/// Whether a shape is tessellated as a surface or as its outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Topology {
    #[default]
    Fill,
    Outline,
}

impl Topology {
    /// Packed tag of this value.
    pub fn tag(self) -> u32 {
        match self {
            Self::Fill => 0,
            Self::Outline => 1,
        }
    }

    /// Value for a packed tag.
    pub fn from_tag(tag: u32) -> Result<Self> {
        match tag {
            0 => Ok(Self::Fill),
            1 => Ok(Self::Outline),
            other => Err(GeometryError::invalid_argument(
                "topology",
                format!("unknown tag {other}"),
            )),
        }
    }

    /// Primitive type produced by this topology.
    pub fn primitive_type(self) -> PrimitiveType {
        match self {
            Self::Fill => PrimitiveType::Triangles,
            Self::Outline => PrimitiveType::Lines,
        }
    }
}

/// Fails unless `value` is finite.
pub(crate) fn ensure_finite(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::invalid_argument(
            parameter,
            format!("must be a finite number, got {value}"),
        ))
    }
}

/// Fails unless `value` is finite and not negative.
pub(crate) fn ensure_non_negative(parameter: &'static str, value: f64) -> Result<()> {
    ensure_finite(parameter, value)?;
    if value < 0.0 {
        return Err(GeometryError::invalid_argument(
            parameter,
            format!("must not be negative, got {value}"),
        ));
    }
    Ok(())
}
