//! Embedding a 3x3 homogeneous matrix as a CSS `matrix3d()`.
//!
//! The 2D transform is lifted to 4x4 by inserting an identity Z row and
//! column (zero Z translation, unit Z scale):
//!
//! ```text
//! | a b c |      | a b 0 c |
//! | d e f |  ->  | d e 0 f |
//! | g h i |      | 0 0 1 0 |
//!                | g h 0 i |
//! ```
//!
//! and serialised column-major, which is the order `matrix3d()` expects.

use patternproj_core::{is_finite_matrix, GeometryError, Mat3, Mat4, Real};

/// Lift a 2D homogeneous transform to the 4x4 CSS embedding.
pub fn lift_to_mat4(m: &Mat3) -> Mat4 {
    Mat4::new(
        m[(0, 0)],
        m[(0, 1)],
        0.0,
        m[(0, 2)],
        m[(1, 0)],
        m[(1, 1)],
        0.0,
        m[(1, 2)],
        0.0,
        0.0,
        1.0,
        0.0,
        m[(2, 0)],
        m[(2, 1)],
        0.0,
        m[(2, 2)],
    )
}

/// The 16 `matrix3d()` arguments in column-major order.
pub fn to_css_matrix3d(m: &Mat3) -> [Real; 16] {
    let lifted = lift_to_mat4(m);
    let mut out = [0.0; 16];
    // nalgebra storage is column-major already.
    out.copy_from_slice(lifted.as_slice());
    out
}

/// `matrix3d(...)` string for a rendering layer.
///
/// Refuses matrices containing NaN or infinity so they never reach the
/// renderer.
pub fn css_matrix3d(m: &Mat3) -> Result<String, GeometryError> {
    if !is_finite_matrix(m) {
        return Err(GeometryError::NonFinite);
    }
    let values: Vec<String> = to_css_matrix3d(m).iter().map(|v| v.to_string()).collect();
    Ok(format!("matrix3d({})", values.join(",")))
}
