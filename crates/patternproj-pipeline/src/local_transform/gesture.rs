//! Dragging and nudging the document.

use super::{LocalTransform, LocalTransformCommand};
use crate::{ArrowKey, NudgeAccelerator};
use log::trace;
use patternproj_core::{lock_to_dominant_axis, Mat3, Pt2, Real, Unit};
use patternproj_linear::{translate, try_apply};

/// An in-flight document drag.
///
/// The anchor is the pointer-down position in physical units (via the
/// inverse perspective). Each move rebuilds the translation from the anchor
/// and applies it to the matrix captured at pointer-down, never to the
/// live matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformDrag {
    pub start_matrix: Mat3,
    pub anchor: Pt2,
}

impl TransformDrag {
    /// Capture a drag, or `None` if the pointer does not map to the mat.
    pub fn begin(current: &Mat3, pointer: &Pt2, perspective_inverse: &Mat3) -> Option<Self> {
        let anchor = try_apply(pointer, perspective_inverse)?;
        Some(Self {
            start_matrix: *current,
            anchor,
        })
    }

    /// Matrix for the pointer at `pointer`.
    ///
    /// The physical-unit delta is scaled to pattern px by `pt_density`.
    pub fn matrix_at(
        &self,
        pointer: &Pt2,
        perspective_inverse: &Mat3,
        pt_density: Real,
        axis_lock: bool,
    ) -> Option<Mat3> {
        let here = try_apply(pointer, perspective_inverse)?;
        let mut delta = here - self.anchor;
        if axis_lock {
            delta = lock_to_dominant_axis(delta);
        }
        Some(translate(&(delta * pt_density)) * self.start_matrix)
    }
}

/// Pointer and keyboard state for moving the document.
#[derive(Debug, Clone, Default)]
pub struct TransformGesture {
    drag: Option<TransformDrag>,
    nudge: NudgeAccelerator,
}

impl TransformGesture {
    pub fn new(nudge: NudgeAccelerator) -> Self {
        Self { drag: None, nudge }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn pointer_down(&mut self, local: &LocalTransform, pointer: Pt2, perspective_inverse: &Mat3) -> bool {
        self.drag = TransformDrag::begin(local.matrix(), &pointer, perspective_inverse);
        trace!("document drag start: {}", self.drag.is_some());
        self.drag.is_some()
    }

    /// Follow the pointer. Ignored without an active drag or when the
    /// pointer does not map to the mat.
    pub fn pointer_move(
        &mut self,
        local: &mut LocalTransform,
        pointer: Pt2,
        perspective_inverse: &Mat3,
        unit: Unit,
        axis_lock: bool,
    ) -> bool {
        let Some(drag) = &self.drag else {
            return false;
        };
        match drag.matrix_at(&pointer, perspective_inverse, unit.pt_density(), axis_lock) {
            Some(m) => {
                local.dispatch(LocalTransformCommand::Set(m));
                true
            }
            None => false,
        }
    }

    /// Commit the drag; also used for leave/cancel.
    pub fn pointer_up(&mut self) -> bool {
        self.drag.take().is_some()
    }

    /// Translate by an accelerating number of sub-units (1/16" or 1 mm).
    pub fn key_down(&mut self, local: &mut LocalTransform, key: ArrowKey, unit: Unit) {
        let step = unit.nudge_sub_unit() * unit.pt_density();
        let offset = self.nudge.offset(key, step);
        local.dispatch(LocalTransformCommand::TranslateBy(offset));
    }

    pub fn key_up(&mut self) {
        self.nudge.release();
    }
}
