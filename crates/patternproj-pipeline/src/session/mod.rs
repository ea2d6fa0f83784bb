//! One projector session: calibration, document placement and measurement.
//!
//! [`ProjectorSession`] owns one instance of each engine and routes pointer
//! and keyboard input to the engine selected by the current [`Mode`].
//! Screen-space input is converted with the composed matrices
//!
//! ```text
//! pattern_to_client = calibration_transform · local
//! client_to_pattern = pattern_to_client⁻¹
//! ```

pub mod persisted;

pub use persisted::*;

use crate::{
    ArrowKey, Calibration, CalibrationError, CornerGesture, LineMeasure, LocalTransform,
    LocalTransformCommand, Measurement, NudgeAccelerator, SessionConfig, TransformGesture,
};
use anyhow::Result;
use log::debug;
use patternproj_core::{Mat3, Pt2, Real, Unit};
use patternproj_linear::{css_matrix3d, invert};
use serde::{Deserialize, Serialize};

/// Which engine receives pointer and keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Drag and nudge calibration corners.
    #[default]
    Calibrate,
    /// Pan and nudge the document.
    Move,
    /// Draw and edit measurement lines.
    Measure,
}

/// Pixel size of the rendered document page.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentSize {
    pub width: Real,
    pub height: Real,
}

#[derive(Debug, Clone)]
pub struct ProjectorSession {
    config: SessionConfig,
    calibration: Calibration,
    local: LocalTransform,
    measurement: Measurement,
    corner_gesture: CornerGesture,
    transform_gesture: TransformGesture,
    document: DocumentSize,
    mode: Mode,
}

impl Default for ProjectorSession {
    fn default() -> Self {
        Self::new(Calibration::default(), SessionConfig::default())
    }
}

impl ProjectorSession {
    pub fn new(calibration: Calibration, config: SessionConfig) -> Self {
        Self {
            corner_gesture: CornerGesture::new(NudgeAccelerator::new(&config.nudge)),
            transform_gesture: TransformGesture::new(NudgeAccelerator::new(&config.nudge)),
            measurement: Measurement::new(config.measurement),
            local: LocalTransform::default(),
            document: DocumentSize::default(),
            mode: Mode::default(),
            calibration,
            config,
        }
    }

    pub fn from_persisted(persisted: &PersistedCalibration, config: SessionConfig) -> Result<Self> {
        Ok(Self::new(persisted.to_calibration()?, config))
    }

    pub fn persisted(&self) -> PersistedCalibration {
        PersistedCalibration::from_calibration(&self.calibration)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    pub fn local(&self) -> &LocalTransform {
        &self.local
    }

    pub fn measurement(&self) -> &Measurement {
        &self.measurement
    }

    pub fn unit(&self) -> Unit {
        self.calibration.unit()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch mode, ending any drag in progress.
    pub fn set_mode(&mut self, mode: Mode) {
        self.pointer_up();
        debug!("mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
    }

    pub fn document(&self) -> DocumentSize {
        self.document
    }

    /// A new document starts at the identity placement.
    pub fn load_document(&mut self, width: Real, height: Real) {
        self.document = DocumentSize { width, height };
        self.local.dispatch(LocalTransformCommand::Reset);
    }

    pub fn set_corner(&mut self, index: usize, point: Pt2) -> Result<()> {
        self.calibration.try_set_corner(index, point)?;
        Ok(())
    }

    pub fn set_corners(&mut self, corners: [Pt2; 4]) {
        self.calibration.set_corners(corners);
    }

    pub fn set_dimensions(&mut self, width: Real, height: Real) {
        self.calibration.set_dimensions(width, height);
    }

    /// Change unit, keeping the physical size and resetting the placement.
    pub fn set_unit(&mut self, unit: Unit) {
        if unit == self.unit() {
            return;
        }
        self.calibration.set_unit(unit);
        self.local.dispatch(LocalTransformCommand::Reset);
    }

    pub fn dispatch(&mut self, command: LocalTransformCommand) -> &Mat3 {
        self.local.dispatch(command)
    }

    /// Pattern px → screen, once calibrated.
    pub fn pattern_to_client(&self) -> Option<Mat3> {
        Some(self.local.pattern_to_client(&self.calibration.calibration_transform()?))
    }

    /// Screen → pattern px, if the composed matrix is invertible.
    pub fn client_to_pattern(&self) -> Option<Mat3> {
        invert(&self.pattern_to_client()?).ok()
    }

    /// `matrix3d(...)` for the document layer.
    pub fn document_css_transform(&self) -> Result<String> {
        let m = self
            .pattern_to_client()
            .ok_or(CalibrationError::NotReady("calibration has not been solved"))?;
        Ok(css_matrix3d(&m)?)
    }

    /// Put the document centre back on the grid centre.
    pub fn recenter(&mut self) -> bool {
        let (Some(target), Some(calibration)) = (
            self.calibration.grid_center(),
            self.calibration.calibration_transform(),
        ) else {
            return false;
        };
        self.local.dispatch(LocalTransformCommand::Recenter {
            target,
            calibration,
            document_width: self.document.width,
            document_height: self.document.height,
        });
        true
    }

    pub fn rotate_90(&mut self) {
        let pivot = self.calibration.grid_center_pattern();
        self.local.dispatch(LocalTransformCommand::Rotate90 { pivot });
    }

    pub fn flip_horizontal(&mut self) {
        let pivot = self.calibration.grid_center_pattern();
        self.local.dispatch(LocalTransformCommand::FlipHorizontal { pivot });
    }

    pub fn flip_vertical(&mut self) {
        let pivot = self.calibration.grid_center_pattern();
        self.local.dispatch(LocalTransformCommand::FlipVertical { pivot });
    }

    pub fn reset_placement(&mut self) {
        self.local.dispatch(LocalTransformCommand::Reset);
    }

    pub fn pointer_down(&mut self, pointer: Pt2) -> bool {
        match self.mode {
            Mode::Calibrate => {
                if self.calibration.corners().is_none() {
                    self.calibration.push_corner(pointer);
                    return true;
                }
                self.corner_gesture
                    .pointer_down(&self.calibration, pointer, &self.config.hit_test)
            }
            Mode::Move => {
                let Some(derived) = self.calibration.derived() else {
                    return false;
                };
                self.transform_gesture
                    .pointer_down(&self.local, pointer, &derived.perspective_inverse)
            }
            Mode::Measure => {
                let (Some(p2c), Some(c2p)) = (self.pattern_to_client(), self.client_to_pattern())
                else {
                    return false;
                };
                self.measurement.pointer_down(pointer, &p2c, &c2p)
            }
        }
    }

    pub fn pointer_move(&mut self, pointer: Pt2, axis_lock: bool) -> bool {
        match self.mode {
            Mode::Calibrate => {
                self.corner_gesture
                    .pointer_move(&mut self.calibration, pointer, axis_lock)
            }
            Mode::Move => {
                let Some(derived) = self.calibration.derived() else {
                    return false;
                };
                let unit = self.unit();
                self.transform_gesture.pointer_move(
                    &mut self.local,
                    pointer,
                    &derived.perspective_inverse,
                    unit,
                    axis_lock,
                )
            }
            Mode::Measure => {
                let Some(c2p) = self.client_to_pattern() else {
                    return false;
                };
                self.measurement.pointer_move(pointer, &c2p, axis_lock)
            }
        }
    }

    /// End whatever drag is active; also used for leave and cancel.
    pub fn pointer_up(&mut self) -> bool {
        let unit = self.unit();
        let corner = self.corner_gesture.pointer_up();
        let transform = self.transform_gesture.pointer_up();
        let line = self.measurement.pointer_up(unit);
        corner || transform || line
    }

    pub fn key_down(&mut self, key: ArrowKey) {
        match self.mode {
            Mode::Calibrate => {
                self.corner_gesture.key_down(&mut self.calibration, key);
            }
            Mode::Move | Mode::Measure => {
                let unit = self.unit();
                self.transform_gesture.key_down(&mut self.local, key, unit);
            }
        }
    }

    pub fn key_up(&mut self) {
        self.corner_gesture.key_up();
        self.transform_gesture.key_up();
    }

    /// Length and angle of the selected line on the mat.
    pub fn measure_selected_line(&self) -> Option<LineMeasure> {
        self.measurement
            .measure_selected(self.local.matrix(), self.unit())
    }

    pub fn align_selected_line(&mut self) -> bool {
        let center = self.calibration.grid_center_pattern();
        let command = self
            .measurement
            .align_selected(self.local.matrix(), &center);
        self.apply_line_command(command)
    }

    pub fn flip_along_selected_line(&mut self) -> bool {
        let command = self.measurement.flip_selected(self.local.matrix());
        self.apply_line_command(command)
    }

    pub fn center_selected_line(&mut self) -> bool {
        let center = self.calibration.grid_center_pattern();
        let command = self
            .measurement
            .center_selected(self.local.matrix(), &center);
        self.apply_line_command(command)
    }

    /// Select the next line and align it.
    pub fn next_line(&mut self) -> bool {
        self.measurement.select_next().is_some() && self.align_selected_line()
    }

    /// Select the previous line and align it.
    pub fn previous_line(&mut self) -> bool {
        self.measurement.select_previous().is_some() && self.align_selected_line()
    }

    pub fn delete_selected_line(&mut self) -> bool {
        self.measurement.delete_selected().is_some()
    }

    pub fn clear_lines(&mut self) {
        self.measurement.clear();
    }

    fn apply_line_command(&mut self, command: Option<LocalTransformCommand>) -> bool {
        match command {
            Some(command) => {
                self.local.dispatch(command);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corners_from_dimensions;
    use patternproj_core::test_utils::{assert_pt_near, max_abs_diff};
    use patternproj_core::PhysicalDimensions;
    use patternproj_linear::apply;

    /// 24 x 18 in mat drawn at 30 screen px per inch from (100, 100).
    fn session() -> ProjectorSession {
        let dims = PhysicalDimensions::new(24.0, 18.0, Unit::Inches);
        let corners = corners_from_dimensions(Pt2::new(100.0, 100.0), &dims, 30.0);
        let mut session = ProjectorSession::new(Calibration::new(corners, dims), SessionConfig::default());
        session.load_document(960.0, 480.0);
        session
    }

    #[test]
    fn identity_placement_css() {
        let s = session();
        // 96 pattern px per inch shown at 30 screen px per inch.
        let k = 30.0 / 96.0;
        let expected = format!("matrix3d({k},0,0,0,0,{k},0,0,0,0,1,0,100,100,0,1)");
        let css = s.document_css_transform().unwrap();
        let parse = |s: &str| -> Vec<Real> {
            s.trim_start_matches("matrix3d(")
                .trim_end_matches(')')
                .split(',')
                .map(|v| v.parse().unwrap())
                .collect()
        };
        for (a, b) in parse(&css).iter().zip(parse(&expected)) {
            assert!((a - b).abs() < 1e-9, "{css}");
        }
    }

    #[test]
    fn projector_layout_far_from_origin() {
        let dims = PhysicalDimensions::new(24.0, 18.0, Unit::Inches);
        let corners = corners_from_dimensions(Pt2::new(1000.0, 300.0), &dims, 30.0);
        let mut s = ProjectorSession::new(Calibration::new(corners, dims), SessionConfig::default());
        s.load_document(960.0, 480.0);

        assert!(s.document_css_transform().is_ok());
        let c2p = s.client_to_pattern().unwrap();
        assert_pt_near(&apply(&Pt2::new(1720.0, 840.0), &c2p), &Pt2::new(2304.0, 1728.0), 1e-7);

        s.set_mode(Mode::Measure);
        assert!(s.pointer_down(Pt2::new(1030.0, 330.0)));
        // 30 screen px = 1 inch.
        assert!(s.pointer_move(Pt2::new(1060.0, 330.0), false));
        assert!(s.pointer_up());
        let measure = s.measure_selected_line().unwrap();
        assert!((measure.length - 1.0).abs() < 1e-9);
    }

    #[test]
    fn initial_placement_collects_four_corners() {
        let mut s = ProjectorSession::new(
            Calibration::from_points(Vec::new(), PhysicalDimensions::default()),
            SessionConfig::default(),
        );
        assert!(s.document_css_transform().is_err());
        for p in [(0.0, 0.0), (720.0, 0.0), (720.0, 540.0), (0.0, 540.0)] {
            assert!(s.pointer_down(Pt2::new(p.0, p.1)));
        }
        assert!(s.calibration().perspective().is_some());
        assert!(!s.calibration().is_concave());
    }

    #[test]
    fn corner_drag_updates_calibration() {
        let mut s = session();
        assert!(s.pointer_down(Pt2::new(102.0, 98.0)));
        assert!(s.pointer_move(Pt2::new(92.0, 88.0), false));
        assert!(s.pointer_up());
        assert_pt_near(&s.calibration().points()[0], &Pt2::new(90.0, 90.0), 1e-12);
        // Unmatched move/up.
        assert!(!s.pointer_move(Pt2::new(0.0, 0.0), false));
        assert!(!s.pointer_up());
    }

    #[test]
    fn move_mode_drags_in_physical_units() {
        let mut s = session();
        s.set_mode(Mode::Move);
        assert!(s.pointer_down(Pt2::new(400.0, 300.0)));
        // 60 screen px = 2 inches.
        assert!(s.pointer_move(Pt2::new(460.0, 300.0), false));
        s.pointer_up();
        let origin = apply(&Pt2::origin(), &s.pattern_to_client().unwrap());
        assert_pt_near(&origin, &Pt2::new(160.0, 100.0), 1e-9);
    }

    #[test]
    fn recenter_after_pan_and_rotation() {
        let mut s = session();
        s.dispatch(LocalTransformCommand::TranslateBy(patternproj_core::Vec2::new(300.0, -40.0)));
        s.rotate_90();
        assert!(s.recenter());
        let center = apply(&Pt2::new(480.0, 240.0), &s.pattern_to_client().unwrap());
        assert_pt_near(&center, &s.calibration().grid_center().unwrap(), 1e-9);
    }

    #[test]
    fn unit_change_resets_placement_and_keeps_mapping() {
        let mut s = session();
        s.flip_horizontal();
        let before = s.calibration().calibration_transform().unwrap();
        s.set_unit(Unit::Centimeters);
        assert_eq!(*s.local().matrix(), Mat3::identity());
        let after = s.calibration().calibration_transform().unwrap();
        assert!(max_abs_diff(&before, &after) < 1e-9);
        assert_eq!(s.persisted().unit, Unit::Centimeters);
    }

    #[test]
    fn measure_line_on_mat() {
        let mut s = session();
        s.set_mode(Mode::Measure);
        // 30 screen px is one inch on the mat.
        assert!(s.pointer_down(Pt2::new(200.0, 200.0)));
        assert!(s.pointer_move(Pt2::new(230.0, 201.0), true));
        assert!(s.pointer_up());
        let m = s.measure_selected_line().unwrap();
        assert_eq!(m.length_label(Unit::Inches), "1.00\"");
        assert_eq!(m.angle_label(), "0°");

        s.set_unit(Unit::Centimeters);
        let m = s.measure_selected_line().unwrap();
        assert_eq!(m.length_label(Unit::Centimeters), "2.54cm");
    }

    #[test]
    fn next_line_aligns_at_grid_centre() {
        let mut s = session();
        s.set_mode(Mode::Measure);
        s.pointer_down(Pt2::new(200.0, 200.0));
        s.pointer_move(Pt2::new(260.0, 260.0), false);
        s.pointer_up();
        assert!(s.next_line());
        let placed = s
            .measurement()
            .placed_selected(s.local().matrix())
            .unwrap();
        assert_pt_near(&placed.start, &s.calibration().grid_center_pattern(), 1e-9);
        assert!((placed.start.y - placed.end.y).abs() < 1e-9);
        assert!(s.delete_selected_line());
        assert!(!s.next_line());
    }

    #[test]
    fn session_survives_persistence() {
        let s = session();
        let json = s.persisted().to_json().unwrap();
        let restored =
            ProjectorSession::from_persisted(&PersistedCalibration::from_json(&json).unwrap(), SessionConfig::default())
                .unwrap();
        assert_eq!(restored.calibration().points(), s.calibration().points());
    }
}
