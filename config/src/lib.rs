//! # Config Crate
//!
//! Centralized configuration constants for the shape geometry pipeline.
//! All magic numbers and tunable parameters are defined here so the
//! tessellation kernels, the packing protocol and the worker layer agree
//! on the same values.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{compute_ellipse_segments, DEFAULT_GRANULARITY, WGS84_RADII};
//!
//! let max_radius = WGS84_RADII[0];
//! let segments = compute_ellipse_segments(100_000.0, DEFAULT_GRANULARITY, max_radius);
//! assert!(segments >= config::constants::MIN_ELLIPSE_SEGMENTS);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Thread-Safe**: Only immutable values, safe to read from any worker
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

#[cfg(test)]
mod tests;
