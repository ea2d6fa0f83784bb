//! Deterministic synthetic calibration quads.
//!
//! Small building blocks for tests and benchmarks:
//! - axis-aligned corner sets,
//! - seeded convex perturbations to produce perspective-distorted quads,
//! - bilinear interior sample points.
//!
//! Everything is seeded explicitly and independent of any RNG crate so
//! fixtures stay stable across versions and platforms.
//!
//! # Example
//!
//! ```
//! use patternproj_core::synthetic::{quad_winding, rectangle_corners, QuadSampler};
//! use patternproj_core::Pt2;
//!
//! let base = rectangle_corners(Pt2::new(100.0, 50.0), 400.0, 300.0);
//! let quad = QuadSampler::new(7, 30.0).next_quad(&base);
//! assert_eq!(quad_winding(&quad), quad_winding(&base));
//! ```

pub mod quads;

pub use quads::{quad_winding, QuadSampler};

use crate::{lerp, Pt2, Real};

/// Corners of an axis-aligned rectangle, clockwise on screen from top-left.
pub fn rectangle_corners(origin: Pt2, width: Real, height: Real) -> [Pt2; 4] {
    [
        origin,
        Pt2::new(origin.x + width, origin.y),
        Pt2::new(origin.x + width, origin.y + height),
        Pt2::new(origin.x, origin.y + height),
    ]
}

/// `n × n` bilinear samples strictly inside the quad (no corners, no edges).
pub fn interior_samples(quad: &[Pt2; 4], n: usize) -> Vec<Pt2> {
    let mut out = Vec::with_capacity(n * n);
    for i in 0..n {
        let u = (i as Real + 1.0) / (n as Real + 1.0);
        for j in 0..n {
            let v = (j as Real + 1.0) / (n as Real + 1.0);
            let top = lerp(&quad[0], &quad[1], u);
            let bottom = lerp(&quad[3], &quad[2], u);
            out.push(lerp(&top, &bottom, v));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_stay_inside_rectangle() {
        let quad = rectangle_corners(Pt2::new(0.0, 0.0), 10.0, 20.0);
        let pts = interior_samples(&quad, 3);
        assert_eq!(pts.len(), 9);
        for p in pts {
            assert!(p.x > 0.0 && p.x < 10.0);
            assert!(p.y > 0.0 && p.y < 20.0);
        }
    }
}
