//! Exact four-point perspective transform (plane-to-plane homography).
//!
//! The solver maps a source quadrilateral onto a destination quadrilateral:
//! `dst ~ H src`, normalised so that `H[2,2] == 1`. With exactly four
//! correspondences the 8 unknowns are fully determined, so instead of the
//! least-squares DLT the 8x8 linear system is solved directly with LU:
//!
//! ```text
//! | x y 1 0 0 0 -u·x -u·y | h = u
//! | 0 0 0 x y 1 -v·x -v·y | h = v
//! ```
//!
//! Degenerate quads (coincident or collinear points) are rejected up front
//! rather than producing a garbage matrix.

use log::{debug, trace};
use nalgebra::{SMatrix, SVector};
use patternproj_core::{
    distance_squared, from_homogeneous, is_finite_matrix, to_homogeneous, try_from_homogeneous,
    turn_orientation, GeometryError, Mat3, Pt2, Real, HOMOGENEOUS_EPS,
};

/// Relative tolerance for coincident/collinear point detection.
const DEGENERACY_EPS: Real = 1e-9;

/// High-level entry point for perspective estimation.
///
/// Thin wrapper around [`solve_perspective`] and the application helpers,
/// kept for API symmetry with the rest of the workspace.
#[derive(Debug, Clone, Copy)]
pub struct PerspectiveSolver;

/// Solve `H` such that `apply(src[i], H) == dst[i]` for all four corners.
pub fn solve_perspective(src: &[Pt2; 4], dst: &[Pt2; 4]) -> Result<Mat3, GeometryError> {
    PerspectiveSolver::solve(src, dst)
}

impl PerspectiveSolver {
    /// Solve the 8x8 system built from four correspondences.
    pub fn solve(src: &[Pt2; 4], dst: &[Pt2; 4]) -> Result<Mat3, GeometryError> {
        check_quad(src)?;
        check_quad(dst)?;

        let mut a = SMatrix::<Real, 8, 8>::zeros();
        let mut b = SVector::<Real, 8>::zeros();

        for (i, (ps, pd)) in src.iter().zip(dst.iter()).enumerate() {
            let x = ps.x;
            let y = ps.y;
            let u = pd.x;
            let v = pd.y;

            let r0 = 2 * i;
            let r1 = 2 * i + 1;

            a[(r0, 0)] = x;
            a[(r0, 1)] = y;
            a[(r0, 2)] = 1.0;
            a[(r0, 6)] = -u * x;
            a[(r0, 7)] = -u * y;
            b[r0] = u;

            a[(r1, 3)] = x;
            a[(r1, 4)] = y;
            a[(r1, 5)] = 1.0;
            a[(r1, 6)] = -v * x;
            a[(r1, 7)] = -v * y;
            b[r1] = v;
        }

        let h = a.lu().solve(&b).ok_or(GeometryError::SingularMatrix)?;
        let m = Mat3::new(h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], 1.0);
        if !is_finite_matrix(&m) {
            return Err(GeometryError::SingularMatrix);
        }

        trace!("perspective solved: {:?}", m);
        Ok(m)
    }

    /// Apply `m` to `p` with a raw homogeneous divide.
    ///
    /// Near-zero `w` yields extreme or non-finite coordinates; UI callers
    /// should use [`try_apply`] and skip rendering on `None`.
    pub fn apply(p: &Pt2, m: &Mat3) -> Pt2 {
        from_homogeneous(&(m * to_homogeneous(p)))
    }

    /// Apply `m` to `p`, returning `None` when the point projects to infinity.
    pub fn try_apply(p: &Pt2, m: &Mat3) -> Option<Pt2> {
        try_from_homogeneous(&(m * to_homogeneous(p)))
    }
}

/// See [`PerspectiveSolver::apply`].
pub fn apply(p: &Pt2, m: &Mat3) -> Pt2 {
    PerspectiveSolver::apply(p, m)
}

/// See [`PerspectiveSolver::try_apply`].
pub fn try_apply(p: &Pt2, m: &Mat3) -> Option<Pt2> {
    PerspectiveSolver::try_apply(p, m)
}

/// Apply `m` to `p`, reporting the homogeneous divisor on failure.
pub fn apply_checked(p: &Pt2, m: &Mat3) -> Result<Pt2, GeometryError> {
    let v = m * to_homogeneous(p);
    if !v.z.is_finite() || v.z.abs() < HOMOGENEOUS_EPS {
        return Err(GeometryError::PointAtInfinity(v.z));
    }
    try_from_homogeneous(&v).ok_or(GeometryError::NonFinite)
}

/// Invert a homogeneous transform, rejecting singular and non-finite input.
pub fn invert(m: &Mat3) -> Result<Mat3, GeometryError> {
    if !is_finite_matrix(m) {
        return Err(GeometryError::NonFinite);
    }
    // Hadamard ratio |det| / prod(|col|) lies in [0, 1] and does not change
    // when any column is rescaled, so large screen translations stay invertible.
    let norms: Real = m.column_iter().map(|c| c.norm()).product();
    if norms == 0.0 {
        return Err(GeometryError::SingularMatrix);
    }
    let ratio = m.determinant().abs() / norms;
    if ratio < DEGENERACY_EPS {
        debug!("refusing to invert near-singular matrix (hadamard ratio {ratio:e})");
        return Err(GeometryError::SingularMatrix);
    }
    let inv = m.try_inverse().ok_or(GeometryError::SingularMatrix)?;
    if !is_finite_matrix(&inv) {
        return Err(GeometryError::NonFinite);
    }
    Ok(inv)
}

/// Reject quads with coincident points or any three collinear points.
///
/// Tolerances are relative to the quad's squared extent so the check is
/// independent of whether coordinates are inches or screen pixels.
pub fn check_quad(quad: &[Pt2; 4]) -> Result<(), GeometryError> {
    if quad.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return Err(GeometryError::NonFinite);
    }

    let mut extent_sq: Real = 0.0;
    for i in 0..4 {
        for j in (i + 1)..4 {
            extent_sq = extent_sq.max(distance_squared(&quad[i], &quad[j]));
        }
    }
    if extent_sq == 0.0 {
        return Err(GeometryError::DegenerateConfiguration("all points coincide"));
    }

    for i in 0..4 {
        for j in (i + 1)..4 {
            if distance_squared(&quad[i], &quad[j]) <= DEGENERACY_EPS * extent_sq {
                return Err(GeometryError::DegenerateConfiguration("repeated point"));
            }
        }
    }

    const TRIPLES: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];
    for [i, j, k] in TRIPLES {
        if turn_orientation(&quad[i], &quad[j], &quad[k]).abs() <= DEGENERACY_EPS * extent_sq {
            return Err(GeometryError::DegenerateConfiguration(
                "three collinear points",
            ));
        }
    }
    Ok(())
}
