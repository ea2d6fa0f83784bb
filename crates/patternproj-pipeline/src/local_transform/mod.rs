//! User placement of the document before calibration.
//!
//! The state is a single matrix acting on pattern px. Every transition is
//! a pure function `(old matrix, command) -> new matrix`, see [`reduce`];
//! [`LocalTransform`] is the thin owner that stores the result.
//!
//! Composition order: new operations multiply on the left, so they act on
//! the already-placed document:
//! `screen = calibration · (op · local) · pattern`.

pub mod gesture;

pub use gesture::*;

use log::debug;
use patternproj_core::{GeometryError, Mat3, Pt2, Real, Vec2};
use patternproj_linear::{
    css_matrix3d, flip_horizontal_about, flip_vertical_about, invert, rotate_degrees_about,
    translate, try_apply,
};
use serde::{Deserialize, Serialize};

/// A transition of the local transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LocalTransformCommand {
    /// Replace wholesale (persisted state, unit change).
    Set(Mat3),
    /// `translate(vector) · current`.
    TranslateBy(Vec2),
    /// Quarter turn about `pivot`.
    Rotate90 { pivot: Pt2 },
    /// Mirror left-right about `pivot`.
    FlipHorizontal { pivot: Pt2 },
    /// Mirror top-bottom about `pivot`.
    FlipVertical { pivot: Pt2 },
    /// Translate so the document centre projects onto `target` (screen px).
    ///
    /// `calibration` is the pattern px → screen transform in effect; if it
    /// cannot be inverted the command is a no-op.
    Recenter {
        target: Pt2,
        calibration: Mat3,
        document_width: Real,
        document_height: Real,
    },
    /// `matrix · current`; used by the line tools.
    Compose(Mat3),
    /// Back to identity.
    Reset,
}

/// Apply one command to `current`.
pub fn reduce(current: &Mat3, command: &LocalTransformCommand) -> Mat3 {
    match *command {
        LocalTransformCommand::Set(m) => m,
        LocalTransformCommand::TranslateBy(v) => translate(&v) * current,
        LocalTransformCommand::Rotate90 { pivot } => rotate_degrees_about(&pivot, 90.0) * current,
        LocalTransformCommand::FlipHorizontal { pivot } => flip_horizontal_about(&pivot) * current,
        LocalTransformCommand::FlipVertical { pivot } => flip_vertical_about(&pivot) * current,
        LocalTransformCommand::Recenter {
            target,
            calibration,
            document_width,
            document_height,
        } => recenter(current, &target, &calibration, document_width, document_height)
            .unwrap_or(*current),
        LocalTransformCommand::Compose(m) => m * current,
        LocalTransformCommand::Reset => Mat3::identity(),
    }
}

fn recenter(
    current: &Mat3,
    target: &Pt2,
    calibration: &Mat3,
    document_width: Real,
    document_height: Real,
) -> Option<Mat3> {
    let target_pattern = try_apply(target, &invert(calibration).ok()?)?;
    let center = Pt2::new(document_width / 2.0, document_height / 2.0);
    let placed_center = try_apply(&center, current)?;
    Some(translate(&(target_pattern - placed_center)) * current)
}

/// Owner of the current local transform matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    matrix: Mat3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            matrix: Mat3::identity(),
        }
    }
}

impl LocalTransform {
    pub fn new(matrix: Mat3) -> Self {
        Self { matrix }
    }

    pub fn matrix(&self) -> &Mat3 {
        &self.matrix
    }

    /// Replace the matrix with `reduce(matrix, command)`.
    pub fn dispatch(&mut self, command: LocalTransformCommand) -> &Mat3 {
        debug!("local transform: {:?}", command);
        self.matrix = reduce(&self.matrix, &command);
        &self.matrix
    }

    /// Pattern px → screen for the given calibration transform.
    pub fn pattern_to_client(&self, calibration: &Mat3) -> Mat3 {
        calibration * self.matrix
    }

    /// `matrix3d(...)` string positioning the document layer.
    pub fn css_transform(&self, calibration: &Mat3) -> Result<String, GeometryError> {
        css_matrix3d(&self.pattern_to_client(calibration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patternproj_core::test_utils::{assert_pt_near, max_abs_diff};
    use patternproj_linear::apply;

    fn pivot() -> Pt2 {
        Pt2::new(1152.0, 864.0)
    }

    #[test]
    fn four_rotations_return_to_start() {
        let mut t = LocalTransform::default();
        t.dispatch(LocalTransformCommand::TranslateBy(Vec2::new(12.0, -30.0)));
        let start = *t.matrix();
        for _ in 0..4 {
            t.dispatch(LocalTransformCommand::Rotate90 { pivot: pivot() });
        }
        assert!(max_abs_diff(t.matrix(), &start) < 1e-9);
    }

    #[test]
    fn double_flips_return_to_start() {
        let start = reduce(
            &Mat3::identity(),
            &LocalTransformCommand::Rotate90 { pivot: pivot() },
        );
        let h = LocalTransformCommand::FlipHorizontal { pivot: pivot() };
        let v = LocalTransformCommand::FlipVertical { pivot: pivot() };
        assert!(max_abs_diff(&reduce(&reduce(&start, &h), &h), &start) < 1e-12);
        assert!(max_abs_diff(&reduce(&reduce(&start, &v), &v), &start) < 1e-12);
    }

    #[test]
    fn translate_and_back_is_identity() {
        let v = Vec2::new(3.0, 4.0);
        let m = reduce(&Mat3::identity(), &LocalTransformCommand::TranslateBy(v));
        let m = reduce(&m, &LocalTransformCommand::TranslateBy(-v));
        assert!(max_abs_diff(&m, &Mat3::identity()) < 1e-15);
    }

    #[test]
    fn reset_always_yields_identity() {
        let mut t = LocalTransform::default();
        t.dispatch(LocalTransformCommand::Rotate90 { pivot: pivot() });
        t.dispatch(LocalTransformCommand::FlipVertical { pivot: Pt2::new(3.0, 9.0) });
        t.dispatch(LocalTransformCommand::TranslateBy(Vec2::new(-7.0, 2.0)));
        assert_eq!(*t.dispatch(LocalTransformCommand::Reset), Mat3::identity());
        assert_eq!(*t.dispatch(LocalTransformCommand::Reset), Mat3::identity());
    }

    #[test]
    fn set_replaces_wholesale() {
        let m = Mat3::new(0.0, -1.0, 5.0, 1.0, 0.0, 6.0, 0.0, 0.0, 1.0);
        let mut t = LocalTransform::default();
        t.dispatch(LocalTransformCommand::TranslateBy(Vec2::new(1.0, 1.0)));
        assert_eq!(*t.dispatch(LocalTransformCommand::Set(m)), m);
    }

    #[test]
    fn recenter_puts_document_centre_on_target() {
        let calibration = Mat3::new(0.5, 0.0, 100.0, 0.0, 0.5, 50.0, 0.0, 0.0, 1.0);
        let start = reduce(
            &Mat3::identity(),
            &LocalTransformCommand::Rotate90 { pivot: Pt2::new(10.0, 10.0) },
        );
        let target = Pt2::new(400.0, 300.0);
        let m = reduce(
            &start,
            &LocalTransformCommand::Recenter {
                target,
                calibration,
                document_width: 600.0,
                document_height: 200.0,
            },
        );
        let centre_on_screen = apply(&apply(&Pt2::new(300.0, 100.0), &m), &calibration);
        assert_pt_near(&centre_on_screen, &target, 1e-9);
    }

    #[test]
    fn recenter_with_singular_calibration_is_no_op() {
        let start = reduce(
            &Mat3::identity(),
            &LocalTransformCommand::TranslateBy(Vec2::new(5.0, 5.0)),
        );
        let m = reduce(
            &start,
            &LocalTransformCommand::Recenter {
                target: Pt2::new(1.0, 1.0),
                calibration: Mat3::zeros(),
                document_width: 10.0,
                document_height: 10.0,
            },
        );
        assert_eq!(m, start);
    }

    #[test]
    fn css_transform_composes_calibration_first() {
        let mut local = LocalTransform::default();
        local.dispatch(LocalTransformCommand::TranslateBy(Vec2::new(10.0, 0.0)));
        let calibration = Mat3::new(2.0, 0.0, 5.0, 0.0, 2.0, 7.0, 0.0, 0.0, 1.0);
        assert_eq!(
            local.css_transform(&calibration).unwrap(),
            "matrix3d(2,0,0,0,0,2,0,0,0,0,1,0,25,7,0,1)"
        );
    }
}
