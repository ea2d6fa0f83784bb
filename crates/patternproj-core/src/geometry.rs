//! Point/vector primitives and the measurement [`Line`].

use crate::{Pt2, Real, Vec2};
use serde::{Deserialize, Serialize};

/// Euclidean distance between two points.
pub fn distance(a: &Pt2, b: &Pt2) -> Real {
    nalgebra::distance(a, b)
}

/// Squared Euclidean distance; used for nearest-feature comparisons.
pub fn distance_squared(a: &Pt2, b: &Pt2) -> Real {
    nalgebra::distance_squared(a, b)
}

/// Midpoint of the segment `ab`.
pub fn midpoint(a: &Pt2, b: &Pt2) -> Pt2 {
    nalgebra::center(a, b)
}

/// Linear interpolation `a + t (b - a)`.
pub fn lerp(a: &Pt2, b: &Pt2, t: Real) -> Pt2 {
    a + (b - a) * t
}

/// Arithmetic mean of a set of points. Returns the origin for an empty slice.
pub fn centroid(points: &[Pt2]) -> Pt2 {
    if points.is_empty() {
        return Pt2::origin();
    }
    let sum = points.iter().fold(Vec2::zeros(), |acc, p| acc + p.coords);
    Pt2::from(sum / points.len() as Real)
}

/// Z component of `(b - a) × (c - b)`.
///
/// Positive for a counter-clockwise turn in a y-up frame, which is a
/// clockwise turn on screen where y grows downward.
pub fn turn_orientation(a: &Pt2, b: &Pt2, c: &Pt2) -> Real {
    let ab = b - a;
    let bc = c - b;
    ab.x * bc.y - ab.y * bc.x
}

/// Perpendicular distance from `p` to the segment `ab`.
///
/// Projections falling outside the segment are clamped to its endpoints.
pub fn distance_to_segment(p: &Pt2, a: &Pt2, b: &Pt2) -> Real {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq == 0.0 {
        return distance(p, a);
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    distance(p, &(a + ab * t))
}

/// Screen/pattern axis, used for axis-locked drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Keep only this axis' component of `v`.
    pub fn project(self, v: Vec2) -> Vec2 {
        match self {
            Axis::X => Vec2::new(v.x, 0.0),
            Axis::Y => Vec2::new(0.0, v.y),
        }
    }

    /// Axis with the larger magnitude component; ties go to `X`.
    pub fn dominant(v: &Vec2) -> Self {
        if v.y.abs() > v.x.abs() {
            Axis::Y
        } else {
            Axis::X
        }
    }
}

/// Zero the smaller component of `v`.
pub fn lock_to_dominant_axis(v: Vec2) -> Vec2 {
    Axis::dominant(&v).project(v)
}

/// A directed segment used for on-screen measurement and line alignment.
///
/// Which space the endpoints live in (screen or pattern) is decided by the
/// owner; conversions happen explicitly at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Pt2,
    pub end: Pt2,
}

impl Line {
    pub fn new(start: Pt2, end: Pt2) -> Self {
        Self { start, end }
    }

    /// Direction vector `end - start`.
    pub fn delta(&self) -> Vec2 {
        self.end - self.start
    }

    pub fn length(&self) -> Real {
        distance(&self.start, &self.end)
    }

    /// Direction angle in radians, `atan2(dy, dx)`.
    pub fn angle(&self) -> Real {
        let d = self.delta();
        d.y.atan2(d.x)
    }

    pub fn midpoint(&self) -> Pt2 {
        midpoint(&self.start, &self.end)
    }

    /// Same segment with endpoints swapped.
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }

    /// Map both endpoints through `f`.
    pub fn map(&self, mut f: impl FnMut(&Pt2) -> Pt2) -> Self {
        Self::new(f(&self.start), f(&self.end))
    }

    /// Map both endpoints through a fallible `f`, failing if either does.
    pub fn try_map(&self, mut f: impl FnMut(&Pt2) -> Option<Pt2>) -> Option<Self> {
        Some(Self::new(f(&self.start)?, f(&self.end)?))
    }
}
