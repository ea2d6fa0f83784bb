//! Calibration engine: four screen corners mapped to a physical rectangle.
//!
//! Two matrices are derived from the corners and the physical dimensions:
//!
//! - **perspective**: physical units (density 1) → screen,
//!   `solve(unit_rectangle(w, h), corners)`;
//! - **calibration transform**: pattern px (physical × point density) →
//!   screen, `solve(density_rectangle(w, h, d), corners)`.
//!
//! Both are re-derived from scratch on every corner, size or unit change.
//! A failed solve keeps the previous valid matrices and records the error.

pub mod drag;
pub mod hit_test;

pub use drag::*;
pub use hit_test::*;

use crate::CalibrationError;
use log::{debug, warn};
use patternproj_core::{
    centroid, turn_orientation, GeometryError, Mat3, PhysicalDimensions, Pt2, Real, Unit, Vec2,
};
use patternproj_linear::{invert, solve_perspective, try_apply};

/// Number of calibration corners.
pub const CORNER_COUNT: usize = 4;

/// Corners of `[0, w] × [0, h]`, clockwise on screen from top-left.
pub fn unit_rectangle(width: Real, height: Real) -> [Pt2; 4] {
    density_rectangle(width, height, 1.0)
}

/// Corners of `[0, w·d] × [0, h·d]`, clockwise on screen from top-left.
pub fn density_rectangle(width: Real, height: Real, pt_density: Real) -> [Pt2; 4] {
    let w = width * pt_density;
    let h = height * pt_density;
    [
        Pt2::new(0.0, 0.0),
        Pt2::new(w, 0.0),
        Pt2::new(w, h),
        Pt2::new(0.0, h),
    ]
}

/// Axis-aligned corner set for the physical rectangle drawn `scale` screen
/// px per unit from `origin`.
pub fn corners_from_dimensions(origin: Pt2, dimensions: &PhysicalDimensions, scale: Real) -> [Pt2; 4] {
    density_rectangle(dimensions.width, dimensions.height, scale).map(|p| p + origin.coords)
}

/// True when the polygon's turn direction is not uniform.
///
/// Concave, self-intersecting and collinear (zero turn) configurations all
/// count; fewer than three points is never flagged.
pub fn is_concave(points: &[Pt2]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut positive = false;
    let mut negative = false;
    for i in 0..n {
        let turn = turn_orientation(&points[i], &points[(i + 1) % n], &points[(i + 2) % n]);
        if turn > 0.0 {
            positive = true;
        } else if turn < 0.0 {
            negative = true;
        } else {
            return true;
        }
    }
    positive && negative
}

/// Matrices derived from one consistent calibration state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedMatrices {
    /// Physical units → screen.
    pub perspective: Mat3,
    /// Screen → physical units.
    pub perspective_inverse: Mat3,
    /// Pattern px → screen.
    pub calibration_transform: Mat3,
    /// Screen → pattern px.
    pub calibration_inverse: Mat3,
}

/// Calibration corner set, physical dimensions and the derived matrices.
#[derive(Debug, Clone)]
pub struct Calibration {
    corners: Vec<Pt2>,
    dimensions: PhysicalDimensions,
    derived: Option<DerivedMatrices>,
    last_error: Option<CalibrationError>,
}

impl Calibration {
    /// Fully placed calibration.
    pub fn new(corners: [Pt2; 4], dimensions: PhysicalDimensions) -> Self {
        Self::from_points(corners.to_vec(), dimensions)
    }

    /// Calibration from any number of points; fewer than four is the
    /// transient initial-placement state and derives nothing.
    pub fn from_points(mut points: Vec<Pt2>, dimensions: PhysicalDimensions) -> Self {
        points.truncate(CORNER_COUNT);
        let mut calibration = Self {
            corners: points,
            dimensions,
            derived: None,
            last_error: None,
        };
        calibration.refresh();
        calibration
    }

    /// The four corners, once all are placed.
    pub fn corners(&self) -> Option<[Pt2; 4]> {
        <[Pt2; 4]>::try_from(self.corners.as_slice()).ok()
    }

    pub fn points(&self) -> &[Pt2] {
        &self.corners
    }

    pub fn dimensions(&self) -> &PhysicalDimensions {
        &self.dimensions
    }

    pub fn unit(&self) -> Unit {
        self.dimensions.unit
    }

    /// Last valid derived matrices, possibly older than the current corners
    /// if the latest recompute failed.
    pub fn derived(&self) -> Option<&DerivedMatrices> {
        self.derived.as_ref()
    }

    pub fn perspective(&self) -> Option<Mat3> {
        self.derived.map(|d| d.perspective)
    }

    pub fn calibration_transform(&self) -> Option<Mat3> {
        self.derived.map(|d| d.calibration_transform)
    }

    /// Error from the most recent recompute, cleared on success.
    pub fn last_error(&self) -> Option<CalibrationError> {
        self.last_error
    }

    /// Whether the current corners should be drawn with the error fill.
    pub fn is_concave(&self) -> bool {
        self.corners.len() == CORNER_COUNT && is_concave(&self.corners)
    }

    /// Append a corner during initial placement.
    pub fn push_corner(&mut self, point: Pt2) {
        if self.corners.len() < CORNER_COUNT {
            self.corners.push(point);
            self.refresh();
        }
    }

    /// Move one corner.
    ///
    /// # Panics
    /// Panics if `index` does not name a placed corner; the corner count is
    /// a fixed invariant, so this is a caller bug.
    pub fn set_corner(&mut self, index: usize, point: Pt2) {
        assert!(
            index < self.corners.len(),
            "corner index {index} out of range (have {})",
            self.corners.len()
        );
        self.corners[index] = point;
        self.refresh();
    }

    /// Non-panicking [`set_corner`](Self::set_corner).
    pub fn try_set_corner(&mut self, index: usize, point: Pt2) -> Result<(), GeometryError> {
        if index >= self.corners.len() {
            return Err(GeometryError::CornerIndexOutOfRange(index));
        }
        self.set_corner(index, point);
        Ok(())
    }

    /// Replace all four corners.
    pub fn set_corners(&mut self, corners: [Pt2; 4]) {
        self.corners = corners.to_vec();
        self.refresh();
    }

    /// Move the listed corners by `delta`.
    ///
    /// # Panics
    /// Panics on an index outside the placed corners.
    pub fn offset_corners(&mut self, indices: &[usize], delta: Vec2) {
        for &i in indices {
            assert!(i < self.corners.len(), "corner index {i} out of range");
            self.corners[i] += delta;
        }
        self.refresh();
    }

    pub fn set_dimensions(&mut self, width: Real, height: Real) {
        self.dimensions.width = width;
        self.dimensions.height = height;
        self.refresh();
    }

    /// Switch unit, converting width/height so the physical size is kept.
    pub fn set_unit(&mut self, unit: Unit) {
        self.dimensions = self.dimensions.with_unit(unit);
        self.refresh();
    }

    /// Solve physical units → screen for the current state.
    pub fn recompute_perspective(&self) -> Result<Mat3, CalibrationError> {
        let corners = self.ready_corners()?;
        let d = &self.dimensions;
        Ok(solve_perspective(&unit_rectangle(d.width, d.height), &corners)?)
    }

    /// Solve pattern px → screen for the current state at `pt_density`.
    pub fn recompute_calibration_transform(&self, pt_density: Real) -> Result<Mat3, CalibrationError> {
        let corners = self.ready_corners()?;
        let d = &self.dimensions;
        Ok(solve_perspective(
            &density_rectangle(d.width, d.height, pt_density),
            &corners,
        )?)
    }

    /// Screen position of the physical rectangle's centre.
    pub fn grid_center(&self) -> Option<Pt2> {
        let d = &self.dimensions;
        try_apply(&Pt2::new(d.width / 2.0, d.height / 2.0), &self.perspective()?)
    }

    /// Centre of the physical rectangle in pattern px.
    pub fn grid_center_pattern(&self) -> Pt2 {
        let (w, h) = self.dimensions.size_px();
        Pt2::new(w / 2.0, h / 2.0)
    }

    /// Centroid of the placed corners in screen space.
    pub fn corner_centroid(&self) -> Pt2 {
        centroid(&self.corners)
    }

    fn ready_corners(&self) -> Result<[Pt2; 4], CalibrationError> {
        let corners = self
            .corners()
            .ok_or(CalibrationError::NotReady("fewer than four corners placed"))?;
        if self.dimensions.validate().is_err() {
            return Err(CalibrationError::NotReady("width and height must be positive"));
        }
        Ok(corners)
    }

    fn derive(&self) -> Result<DerivedMatrices, CalibrationError> {
        let perspective = self.recompute_perspective()?;
        let calibration_transform =
            self.recompute_calibration_transform(self.dimensions.unit.pt_density())?;
        Ok(DerivedMatrices {
            perspective,
            perspective_inverse: invert(&perspective)?,
            calibration_transform,
            calibration_inverse: invert(&calibration_transform)?,
        })
    }

    fn refresh(&mut self) {
        if self.corners.len() < CORNER_COUNT {
            return;
        }
        match self.derive() {
            Ok(derived) => {
                debug!(
                    "calibration recomputed ({} x {} {})",
                    self.dimensions.width, self.dimensions.height, self.dimensions.unit
                );
                self.derived = Some(derived);
                self.last_error = None;
            }
            Err(err) => {
                warn!("calibration recompute failed, keeping last valid matrices: {err}");
                self.last_error = Some(err);
            }
        }
    }
}

impl Default for Calibration {
    fn default() -> Self {
        let dimensions = PhysicalDimensions::default();
        Self::new(
            corners_from_dimensions(Pt2::new(100.0, 100.0), &dimensions, 30.0),
            dimensions,
        )
    }
}
