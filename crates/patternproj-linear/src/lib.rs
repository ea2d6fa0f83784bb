//! Closed-form geometry for projector calibration.
//!
//! - [`perspective`]: exact four-point perspective solve, point application
//!   and checked inversion.
//! - [`transforms`]: translation, scale, rotation, flips and line alignment
//!   builders, composable by matrix multiplication.
//! - [`css`]: the 3x3 to CSS `matrix3d()` embedding.

pub mod css;
pub mod perspective;
pub mod transforms;

pub use css::*;
pub use perspective::*;
pub use transforms::*;
