//! Core math and geometry primitives for `patternproj`.
//!
//! This crate contains:
//! - linear algebra type aliases (`Real`, `Pt2`, `Vec2`, `Mat3`, ...),
//! - point/vector primitives and the [`Line`] type used for measurement,
//! - units of measure and physical mat dimensions,
//! - the shared [`GeometryError`] taxonomy.
//!
//! Coordinate spaces:
//! `screen = calibration ∘ local(pattern)`
//!
//! Points carry no unit; their meaning is fixed by the transform that
//! produced them (screen px, pattern px, or physical units).

/// Error taxonomy for degenerate geometry.
mod error;
/// Point and line primitives.
mod geometry;
/// Linear algebra type aliases and homogeneous helpers.
mod math;
/// Units of measure and physical dimensions.
mod units;
/// Deterministic synthetic quads for tests and benchmarks.
pub mod synthetic;
/// Test utilities shared by the workspace test suites.
///
/// Public so integration tests in other crates can use it; not intended
/// for production use.
pub mod test_utils;

pub use error::*;
pub use geometry::*;
pub use math::*;
pub use units::*;
