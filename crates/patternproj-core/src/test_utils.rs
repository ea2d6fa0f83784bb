//! Utilities and common types for testing geometry code.
//!
//! This module is public to allow use across workspace test suites,
//! but is not intended for production use.

use crate::{Mat3, Pt2, Real};
use serde::Deserialize;

/// A recorded perspective correspondence with its expected matrix.
///
/// Points are stored as `[x, y]` pairs and the matrix row-major, matching
/// the JSON fixtures under `tests/data`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferencePerspective {
    /// Human-readable case name.
    pub name: String,
    /// Source quad, clockwise from top-left.
    pub src: [[Real; 2]; 4],
    /// Destination quad, clockwise from top-left.
    pub dst: [[Real; 2]; 4],
    /// Expected coefficients, row-major, `h[8] == 1`.
    pub expected: [Real; 9],
}

impl ReferencePerspective {
    pub fn src_points(&self) -> [Pt2; 4] {
        self.src.map(|[x, y]| Pt2::new(x, y))
    }

    pub fn dst_points(&self) -> [Pt2; 4] {
        self.dst.map(|[x, y]| Pt2::new(x, y))
    }
}

/// Largest absolute coefficient difference between `m` and a row-major array.
pub fn max_abs_diff_row_major(m: &Mat3, expected: &[Real; 9]) -> Real {
    let mut worst: Real = 0.0;
    for r in 0..3 {
        for c in 0..3 {
            worst = worst.max((m[(r, c)] - expected[3 * r + c]).abs());
        }
    }
    worst
}

/// Largest absolute coefficient difference between two matrices.
pub fn max_abs_diff(a: &Mat3, b: &Mat3) -> Real {
    (a - b).abs().max()
}

/// Panics with a descriptive message if `a` and `b` differ by more than `tol`.
pub fn assert_pt_near(a: &Pt2, b: &Pt2, tol: Real) {
    let err = (a - b).norm();
    assert!(err <= tol, "points differ: {a:?} vs {b:?} (err {err:e}, tol {tol:e})");
}
