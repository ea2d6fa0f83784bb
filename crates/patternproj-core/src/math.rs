//! Mathematical type definitions and homogeneous helpers.
//!
//! The rest of the workspace speaks in these aliases so the backing
//! linear-algebra crate stays a single-point decision.

use nalgebra::{Matrix3, Matrix4, Point2, Vector2, Vector3};

/// Scalar type used throughout the library (currently `f64`).
pub type Real = f64;

/// 2D vector with [`Real`] components.
pub type Vec2 = Vector2<Real>;
/// 3D vector with [`Real`] components (homogeneous 2D).
pub type Vec3 = Vector3<Real>;
/// 2D point with [`Real`] coordinates.
pub type Pt2 = Point2<Real>;
/// 3×3 matrix with [`Real`] entries.
pub type Mat3 = Matrix3<Real>;
/// 4×4 matrix with [`Real`] entries.
pub type Mat4 = Matrix4<Real>;

/// Smallest homogeneous divisor still treated as a finite projection.
pub const HOMOGENEOUS_EPS: Real = 1e-12;

/// Convert a 2D point in Euclidean coordinates into homogeneous coordinates.
///
/// Given a point `p = (x, y)`, returns the homogeneous vector `(x, y, 1)`.
pub fn to_homogeneous(p: &Pt2) -> Vec3 {
    Vec3::new(p.x, p.y, 1.0)
}

/// Convert a 3D homogeneous vector back to a 2D point.
///
/// The input is interpreted as `(x, y, w)` and the result is `(x / w, y / w)`.
/// The caller is responsible for ensuring that `w != 0`; see
/// [`try_from_homogeneous`] for the checked variant.
pub fn from_homogeneous(v: &Vec3) -> Pt2 {
    Pt2::new(v.x / v.z, v.y / v.z)
}

/// Checked homogeneous divide.
///
/// Returns `None` when `|w|` is below [`HOMOGENEOUS_EPS`] or the result is
/// not finite.
pub fn try_from_homogeneous(v: &Vec3) -> Option<Pt2> {
    if !v.z.is_finite() || v.z.abs() < HOMOGENEOUS_EPS {
        return None;
    }
    let p = from_homogeneous(v);
    is_finite_point(&p).then_some(p)
}

/// True when both coordinates are finite.
pub fn is_finite_point(p: &Pt2) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

/// True when every entry of the matrix is finite.
pub fn is_finite_matrix(m: &Mat3) -> bool {
    m.iter().all(|v| v.is_finite())
}

/// Build a matrix from row-major nested arrays.
pub fn mat3_from_rows(rows: &[[Real; 3]; 3]) -> Mat3 {
    Mat3::new(
        rows[0][0], rows[0][1], rows[0][2], rows[1][0], rows[1][1], rows[1][2], rows[2][0],
        rows[2][1], rows[2][2],
    )
}

/// Flatten a matrix into row-major nested arrays.
pub fn mat3_to_rows(m: &Mat3) -> [[Real; 3]; 3] {
    [
        [m[(0, 0)], m[(0, 1)], m[(0, 2)]],
        [m[(1, 0)], m[(1, 1)], m[(1, 2)]],
        [m[(2, 0)], m[(2, 1)], m[(2, 2)]],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn homogeneous_roundtrip() {
        let p = Pt2::new(3.5, -2.0);
        let h = to_homogeneous(&p) * 4.0;
        let back = from_homogeneous(&h);
        assert!((back - p).norm() < 1e-12);
    }

    #[test]
    fn checked_divide_rejects_zero_w() {
        assert!(try_from_homogeneous(&Vec3::new(1.0, 2.0, 0.0)).is_none());
        assert!(try_from_homogeneous(&Vec3::new(1.0, 2.0, 1e-15)).is_none());
        assert!(try_from_homogeneous(&Vec3::new(f64::NAN, 2.0, 1.0)).is_none());
        assert_eq!(
            try_from_homogeneous(&Vec3::new(2.0, 4.0, 2.0)),
            Some(Pt2::new(1.0, 2.0))
        );
    }

    #[test]
    fn row_array_roundtrip() {
        let rows = [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        let m = mat3_from_rows(&rows);
        assert_eq!(m[(1, 2)], 6.0);
        assert_eq!(mat3_to_rows(&m), rows);
    }
}
