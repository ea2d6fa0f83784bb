//! Measurement lines drawn over the projected pattern.
//!
//! Lines are stored in pattern px so they stay attached to the document
//! through pan/rotate/flip and recalibration. Pointer input arrives in
//! screen px and is converted at the boundary with
//! `client_to_pattern = (calibration · local)⁻¹`.

pub mod format;

pub use format::*;

use crate::{LocalTransformCommand, MeasurementOptions};
use log::trace;
use patternproj_core::{distance_squared, Line, Mat3, Pt2, Real, Unit, Vec2};
use patternproj_linear::{align_line_to_line, flip_along_line, translate, try_apply};

/// Constrain `p` to horizontal, vertical or 45° relative to `anchor`.
///
/// An axis wins when its component is more than twice the other; anything
/// in between snaps to the diagonal in the direction of travel.
pub fn constrained(anchor: &Pt2, p: &Pt2) -> Pt2 {
    let dx = p.x - anchor.x;
    let dy = p.y - anchor.y;
    if dx.abs() > 2.0 * dy.abs() {
        Pt2::new(p.x, anchor.y)
    } else if dy.abs() > 2.0 * dx.abs() {
        Pt2::new(anchor.x, p.y)
    } else {
        let m = (dx.abs() + dy.abs()) / 2.0;
        Pt2::new(anchor.x + m * dx.signum(), anchor.y + m * dy.signum())
    }
}

/// Endpoint of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Start,
    End,
}

impl Endpoint {
    fn of(self, line: &Line) -> Pt2 {
        match self {
            Endpoint::Start => line.start,
            Endpoint::End => line.end,
        }
    }

    fn other(self) -> Self {
        match self {
            Endpoint::Start => Endpoint::End,
            Endpoint::End => Endpoint::Start,
        }
    }
}

/// An endpoint being dragged; the other endpoint is the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineDrag {
    pub index: usize,
    pub free: Endpoint,
}

/// Measurement lines, the selected line and the in-flight drag.
#[derive(Debug, Clone, Default)]
pub struct Measurement {
    lines: Vec<Line>,
    selected: Option<usize>,
    drag: Option<LineDrag>,
    options: MeasurementOptions,
}

impl Measurement {
    pub fn new(options: MeasurementOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Replace all lines (e.g. when restoring state); clears selection.
    pub fn set_lines(&mut self, lines: Vec<Line>) {
        self.lines = lines;
        self.selected = None;
        self.drag = None;
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_line(&self) -> Option<&Line> {
        self.lines.get(self.selected?)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Grab an endpoint near `pointer`, or start a new line there.
    ///
    /// Returns false if the pointer cannot be mapped into pattern space.
    pub fn pointer_down(&mut self, pointer: Pt2, pattern_to_client: &Mat3, client_to_pattern: &Mat3) -> bool {
        if let Some(drag) = self.endpoint_at(&pointer, pattern_to_client) {
            trace!("grabbed line {} {:?}", drag.index, drag.free);
            self.selected = Some(drag.index);
            self.drag = Some(drag);
            return true;
        }

        let Some(anchor) = try_apply(&pointer, client_to_pattern) else {
            return false;
        };
        self.lines.push(Line::new(anchor, anchor));
        let index = self.lines.len() - 1;
        trace!("new line {index}");
        self.selected = Some(index);
        self.drag = Some(LineDrag {
            index,
            free: Endpoint::End,
        });
        true
    }

    /// Move the free endpoint; ignored without an active drag.
    pub fn pointer_move(&mut self, pointer: Pt2, client_to_pattern: &Mat3, axis_lock: bool) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        let Some(p) = try_apply(&pointer, client_to_pattern) else {
            return false;
        };
        let Some(line) = self.lines.get_mut(drag.index) else {
            self.drag = None;
            return false;
        };
        let anchor = drag.free.other().of(line);
        let p = if axis_lock { constrained(&anchor, &p) } else { p };
        match drag.free {
            Endpoint::Start => line.start = p,
            Endpoint::End => line.end = p,
        }
        true
    }

    /// Finalise the drag (also on pointer leave/cancel).
    ///
    /// A line shorter than the minimum becomes a one-unit horizontal line
    /// from its anchor.
    pub fn pointer_up(&mut self, unit: Unit) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        if let Some(line) = self.lines.get_mut(drag.index) {
            if line.length() < self.options.min_line_length {
                let anchor = drag.free.other().of(line);
                *line = default_line(anchor, unit);
            }
        }
        true
    }

    pub fn delete_selected(&mut self) -> Option<Line> {
        let index = self.selected.take()?;
        self.drag = None;
        (index < self.lines.len()).then(|| self.lines.remove(index))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.selected = None;
        self.drag = None;
    }

    /// Select the following line, wrapping around.
    pub fn select_next(&mut self) -> Option<usize> {
        self.cycle(1)
    }

    /// Select the preceding line, wrapping around.
    pub fn select_previous(&mut self) -> Option<usize> {
        self.cycle(-1)
    }

    fn cycle(&mut self, step: isize) -> Option<usize> {
        let n = self.lines.len();
        if n == 0 {
            self.selected = None;
            return None;
        }
        let next = match self.selected {
            Some(i) => (i as isize + step).rem_euclid(n as isize) as usize,
            None if step > 0 => 0,
            None => n - 1,
        };
        self.selected = Some(next);
        self.selected
    }

    /// Selected line as placed by `local` (calibrated pattern px).
    pub fn placed_selected(&self, local: &Mat3) -> Option<Line> {
        self.selected_line()?.try_map(|p| try_apply(p, local))
    }

    /// Length/angle of the selected line as it lies on the mat.
    pub fn measure_selected(&self, local: &Mat3, unit: Unit) -> Option<LineMeasure> {
        Some(measure(&self.placed_selected(local)?, unit))
    }

    /// Rotate the document so the selected line runs horizontally from the
    /// grid centre.
    pub fn align_selected(&self, local: &Mat3, grid_center: &Pt2) -> Option<LocalTransformCommand> {
        let placed = self.placed_selected(local)?;
        let target = Line::new(*grid_center, grid_center + Vec2::new(1.0, 0.0));
        Some(LocalTransformCommand::Compose(align_line_to_line(&placed, &target)))
    }

    /// Mirror the document across the selected line.
    pub fn flip_selected(&self, local: &Mat3) -> Option<LocalTransformCommand> {
        let placed = self.placed_selected(local)?;
        (placed.length() > 0.0).then(|| LocalTransformCommand::Compose(flip_along_line(&placed)))
    }

    /// Translate the document so the selected line's midpoint sits on the
    /// grid centre.
    pub fn center_selected(&self, local: &Mat3, grid_center: &Pt2) -> Option<LocalTransformCommand> {
        let placed = self.placed_selected(local)?;
        Some(LocalTransformCommand::Compose(translate(
            &(grid_center - placed.midpoint()),
        )))
    }

    fn endpoint_at(&self, pointer: &Pt2, pattern_to_client: &Mat3) -> Option<LineDrag> {
        let limit = self.options.endpoint_margin * self.options.endpoint_margin;
        let mut best: Option<(LineDrag, Real)> = None;
        for (index, line) in self.lines.iter().enumerate() {
            for free in [Endpoint::Start, Endpoint::End] {
                let Some(screen) = try_apply(&free.of(line), pattern_to_client) else {
                    continue;
                };
                let d_sq = distance_squared(&screen, pointer);
                if d_sq <= limit && best.map_or(true, |(_, b)| d_sq < b) {
                    best = Some((LineDrag { index, free }, d_sq));
                }
            }
        }
        best.map(|(drag, _)| drag)
    }
}

/// One unit of `unit`, horizontal, starting at `anchor`.
pub fn default_line(anchor: Pt2, unit: Unit) -> Line {
    Line::new(anchor, anchor + Vec2::new(unit.pt_density(), 0.0))
}
