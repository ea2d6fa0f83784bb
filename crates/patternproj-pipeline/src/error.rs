use patternproj_core::GeometryError;
use thiserror::Error;

/// Why a derived calibration matrix could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CalibrationError {
    /// Fewer than four corners, or zero width/height.
    #[error("calibration not ready: {0}")]
    NotReady(&'static str),
    /// The corner quad or the solved matrix is degenerate.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
