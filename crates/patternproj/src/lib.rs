//! High-level entry crate for the `patternproj` toolbox.
//!
//! `patternproj` aligns a video projector with a physical cutting mat so a
//! sewing pattern can be projected at true scale, then placed and measured
//! on the mat.
//!
//! ## 1. Session API
//!
//! One [`ProjectorSession`](session::ProjectorSession) owns the calibration,
//! the document placement and the measurement lines, and routes pointer and
//! keyboard input to them.
//!
//! ```no_run
//! use patternproj::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dims = PhysicalDimensions::new(24.0, 18.0, Unit::Inches);
//! let corners = [
//!     Pt2::new(110.0, 70.0),
//!     Pt2::new(820.0, 95.0),
//!     Pt2::new(790.0, 610.0),
//!     Pt2::new(95.0, 560.0),
//! ];
//! let mut session = ProjectorSession::new(Calibration::new(corners, dims), SessionConfig::default());
//! session.load_document(2304.0, 1728.0);
//! session.recenter();
//! session.rotate_90();
//!
//! // Position the rendered page.
//! println!("transform: {}", session.document_css_transform()?);
//!
//! // Persist the corners for the next run.
//! std::fs::write("calibration.json", session.persisted().to_json()?)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## 2. Building blocks
//!
//! ```no_run
//! use patternproj::core::Pt2;
//! use patternproj::linear::{apply, css_matrix3d, solve_perspective};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let src = [Pt2::new(33.0, 582.0), Pt2::new(151.0, 579.0), Pt2::new(145.0, 702.0), Pt2::new(25.0, 703.0)];
//! let dst = [Pt2::new(0.0, 0.0), Pt2::new(300.0, 0.0), Pt2::new(300.0, 300.0), Pt2::new(0.0, 300.0)];
//! let h = solve_perspective(&src, &dst)?;
//! println!("{:?} -> {}", apply(&src[2], &h), css_matrix3d(&h)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - **[`session`]**: the session owner and persisted calibration state
//! - **[`pipeline`]**: calibration, local transform and measurement engines
//! - **[`core`]**: math aliases, points and lines, units of measure
//! - **[`linear`]**: perspective solver, transform builders, CSS embedding
//! - **[`prelude`]**: convenient re-exports for common use cases

/// Session owner and persisted calibration state.
pub mod session {
    pub use patternproj_pipeline::session::*;
}

/// Calibration, local transform and measurement engines.
pub mod pipeline {
    pub use patternproj_pipeline::*;
}

/// Math aliases, geometry primitives and units.
pub mod core {
    pub use patternproj_core::*;
}

/// Closed-form perspective solve and transform builders.
pub mod linear {
    pub use patternproj_linear::*;
}

/// Convenient re-exports for common use cases.
///
/// Import with `use patternproj::prelude::*;` to get started quickly.
pub mod prelude {
    pub use crate::core::{Line, Mat3, PhysicalDimensions, Pt2, Real, Unit, Vec2};

    pub use crate::session::{Mode, PersistedCalibration, ProjectorSession};

    pub use crate::pipeline::{
        ArrowKey, Calibration, CalibrationError, LineMeasure, LocalTransformCommand,
        SessionConfig,
    };

    pub use crate::linear::{apply, css_matrix3d, invert, solve_perspective, try_apply};
}
