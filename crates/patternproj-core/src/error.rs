use thiserror::Error;

/// Failure modes of the geometric core.
///
/// All of these are recoverable: callers keep their last valid matrix and
/// surface an "invalid calibration" flag instead of rendering garbage.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    /// Coincident points or three collinear points in a quadrilateral.
    #[error("degenerate point configuration: {0}")]
    DegenerateConfiguration(&'static str),
    /// The linear system or matrix has no inverse.
    #[error("matrix is singular")]
    SingularMatrix,
    /// A computation produced NaN or infinity.
    #[error("non-finite value in geometry computation")]
    NonFinite,
    /// Homogeneous divisor is (near) zero; the point projects to infinity.
    #[error("point projects to infinity (w = {0:e})")]
    PointAtInfinity(f64),
    /// Width or height is zero, negative or non-finite.
    #[error("invalid physical dimensions {width} x {height}")]
    InvalidDimensions { width: f64, height: f64 },
    /// Corner index outside `0..4`.
    #[error("corner index {0} out of range (expected 0..4)")]
    CornerIndexOutOfRange(usize),
}
