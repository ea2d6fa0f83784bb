//! Corner drag and keyboard nudge gestures.

use super::{hit_test, Calibration, Selection};
use crate::{ArrowKey, HitTestOptions, NudgeAccelerator};
use log::trace;
use patternproj_core::{lock_to_dominant_axis, Pt2, Vec2};

/// An in-flight corner drag.
///
/// Offsets are always applied to the corners captured at pointer-down, so
/// a long drag does not accumulate rounding from incremental updates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerDrag {
    pub selection: Selection,
    pub start_pointer: Pt2,
    pub start_corners: [Pt2; 4],
}

impl CornerDrag {
    pub fn new(selection: Selection, start_pointer: Pt2, start_corners: [Pt2; 4]) -> Self {
        Self {
            selection,
            start_pointer,
            start_corners,
        }
    }

    /// Corner positions for the pointer at `pointer`.
    ///
    /// Edge drags move only perpendicular to the edge. With `axis_lock`,
    /// corner and whole-quad drags keep only the dominant axis.
    pub fn corners_at(&self, pointer: &Pt2, axis_lock: bool) -> [Pt2; 4] {
        let raw = pointer - self.start_pointer;
        let delta: Vec2 = match self.selection.fixed_axis() {
            Some(axis) => axis.project(raw),
            None if axis_lock => lock_to_dominant_axis(raw),
            None => raw,
        };
        let mut corners = self.start_corners;
        for i in self.selection.indices() {
            corners[i] = self.start_corners[i] + delta;
        }
        corners
    }
}

/// Pointer and keyboard state for editing calibration corners.
#[derive(Debug, Clone, Default)]
pub struct CornerGesture {
    selection: Option<Selection>,
    drag: Option<CornerDrag>,
    nudge: NudgeAccelerator,
}

impl CornerGesture {
    pub fn new(nudge: NudgeAccelerator) -> Self {
        Self {
            selection: None,
            drag: None,
            nudge,
        }
    }

    /// Currently selected corners (kept after pointer-up for keyboard nudges).
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn set_selection(&mut self, selection: Option<Selection>) {
        self.selection = selection;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Start a drag if `pointer` hits a corner, edge or the centre.
    ///
    /// Returns whether a drag started. A miss clears the selection.
    pub fn pointer_down(
        &mut self,
        calibration: &Calibration,
        pointer: Pt2,
        options: &HitTestOptions,
    ) -> bool {
        let Some(corners) = calibration.corners() else {
            return false;
        };
        self.selection = hit_test(&corners, &pointer, options);
        self.drag = self
            .selection
            .map(|selection| CornerDrag::new(selection, pointer, corners));
        trace!("corner drag start: {:?}", self.selection);
        self.drag.is_some()
    }

    /// Update the dragged corners. A move with no active drag is ignored.
    pub fn pointer_move(&mut self, calibration: &mut Calibration, pointer: Pt2, axis_lock: bool) -> bool {
        let Some(drag) = &self.drag else {
            return false;
        };
        calibration.set_corners(drag.corners_at(&pointer, axis_lock));
        true
    }

    /// End the drag. Also used for pointer leave/cancel; an unmatched
    /// up is a no-op.
    pub fn pointer_up(&mut self) -> bool {
        let ended = self.drag.take().is_some();
        if ended {
            trace!("corner drag end");
        }
        ended
    }

    /// Move the selected corners by an accelerating step of screen pixels.
    pub fn key_down(&mut self, calibration: &mut Calibration, key: ArrowKey) -> bool {
        let Some(selection) = self.selection else {
            return false;
        };
        if self.drag.is_some() || calibration.corners().is_none() {
            return false;
        }
        let mut delta = self.nudge.offset(key, 1.0);
        if let Some(axis) = selection.fixed_axis() {
            delta = axis.project(delta);
        }
        calibration.offset_corners(&selection.indices(), delta);
        true
    }

    pub fn key_up(&mut self) {
        self.nudge.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::Edge;
    use crate::NudgeOptions;
    use patternproj_core::PhysicalDimensions;

    fn calibration() -> Calibration {
        Calibration::new(
            [
                Pt2::new(0.0, 0.0),
                Pt2::new(400.0, 0.0),
                Pt2::new(400.0, 300.0),
                Pt2::new(0.0, 300.0),
            ],
            PhysicalDimensions::default(),
        )
    }

    #[test]
    fn drag_uses_captured_corners() {
        let start = calibration().corners().unwrap();
        let drag = CornerDrag::new(Selection::Corner(2), Pt2::new(400.0, 300.0), start);
        let a = drag.corners_at(&Pt2::new(410.0, 305.0), false);
        let b = drag.corners_at(&Pt2::new(420.0, 310.0), false);
        assert_eq!(a[2], Pt2::new(410.0, 305.0));
        assert_eq!(b[2], Pt2::new(420.0, 310.0));
        assert_eq!(b[0], start[0]);
    }

    #[test]
    fn edge_drag_moves_perpendicular_only() {
        let start = calibration().corners().unwrap();
        let drag = CornerDrag::new(Selection::Edge(Edge::Top), Pt2::new(200.0, 0.0), start);
        let c = drag.corners_at(&Pt2::new(250.0, -20.0), false);
        assert_eq!(c[0], Pt2::new(0.0, -20.0));
        assert_eq!(c[1], Pt2::new(400.0, -20.0));
        assert_eq!(c[2], start[2]);
    }

    #[test]
    fn axis_lock_keeps_dominant_axis() {
        let start = calibration().corners().unwrap();
        let drag = CornerDrag::new(Selection::All, Pt2::new(200.0, 150.0), start);
        let c = drag.corners_at(&Pt2::new(230.0, 160.0), true);
        assert_eq!(c[0], Pt2::new(30.0, 0.0));
        assert_eq!(c[3], Pt2::new(30.0, 300.0));
    }

    #[test]
    fn gesture_lifecycle() {
        let mut cal = calibration();
        let mut gesture = CornerGesture::default();
        let opts = HitTestOptions::default();

        assert!(!gesture.pointer_move(&mut cal, Pt2::new(5.0, 5.0), false));
        assert!(!gesture.pointer_up());

        assert!(gesture.pointer_down(&cal, Pt2::new(2.0, 3.0), &opts));
        assert!(gesture.pointer_move(&mut cal, Pt2::new(12.0, 13.0), false));
        assert_eq!(cal.corners().unwrap()[0], Pt2::new(10.0, 10.0));
        assert!(gesture.pointer_up());
        assert!(!gesture.is_dragging());
        assert_eq!(gesture.selection(), Some(Selection::Corner(0)));

        assert!(!gesture.pointer_down(&cal, Pt2::new(100.0, 100.0), &opts));
        assert_eq!(gesture.selection(), None);
    }

    #[test]
    fn keyboard_nudge_accelerates() {
        let mut cal = calibration();
        let mut gesture = CornerGesture::new(NudgeAccelerator::new(&NudgeOptions {
            steps: vec![1.0, 5.0],
            repeats_per_step: 1,
        }));
        gesture.set_selection(Some(Selection::Corner(1)));
        assert!(gesture.key_down(&mut cal, ArrowKey::Right));
        assert!(gesture.key_down(&mut cal, ArrowKey::Right));
        assert_eq!(cal.corners().unwrap()[1], Pt2::new(406.0, 0.0));
        gesture.key_up();
        assert!(gesture.key_down(&mut cal, ArrowKey::Down));
        assert_eq!(cal.corners().unwrap()[1], Pt2::new(406.0, 1.0));
    }

    #[test]
    fn nudge_without_selection_is_ignored() {
        let mut cal = calibration();
        let mut gesture = CornerGesture::default();
        assert!(!gesture.key_down(&mut cal, ArrowKey::Up));
    }
}
