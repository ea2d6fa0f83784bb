//! Choosing what a calibration drag grabs.
//!
//! Priority is corner, then edge, then the quad centre. Within a class the
//! nearest feature by squared distance wins; exact ties go to the lower
//! index.

use crate::HitTestOptions;
use patternproj_core::{centroid, distance_squared, distance_to_segment, Axis, Pt2, Real};

/// A side of the calibration quad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Corners 0 and 1.
    Top,
    /// Corners 1 and 2.
    Right,
    /// Corners 2 and 3.
    Bottom,
    /// Corners 3 and 0.
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    pub fn corners(self) -> [usize; 2] {
        match self {
            Edge::Top => [0, 1],
            Edge::Right => [1, 2],
            Edge::Bottom => [2, 3],
            Edge::Left => [3, 0],
        }
    }

    /// Axis an edge drag is constrained to: perpendicular to the edge.
    pub fn drag_axis(self) -> Axis {
        match self {
            Edge::Top | Edge::Bottom => Axis::Y,
            Edge::Left | Edge::Right => Axis::X,
        }
    }
}

/// Which corners a drag or keyboard nudge moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection {
    Corner(usize),
    Edge(Edge),
    All,
}

impl Selection {
    pub fn indices(&self) -> Vec<usize> {
        match *self {
            Selection::Corner(i) => vec![i],
            Selection::Edge(edge) => edge.corners().to_vec(),
            Selection::All => vec![0, 1, 2, 3],
        }
    }

    /// Axis the selection is always constrained to, if any.
    pub fn fixed_axis(&self) -> Option<Axis> {
        match *self {
            Selection::Edge(edge) => Some(edge.drag_axis()),
            _ => None,
        }
    }
}

fn nearest_within<T: Copy>(
    candidates: impl IntoIterator<Item = (T, Real)>,
    margin: Real,
) -> Option<T> {
    let limit = margin * margin;
    let mut best: Option<(T, Real)> = None;
    for (item, d_sq) in candidates {
        if d_sq > limit {
            continue;
        }
        // Strict comparison keeps the first (lowest-index) of equal candidates.
        if best.map_or(true, |(_, b)| d_sq < b) {
            best = Some((item, d_sq));
        }
    }
    best.map(|(item, _)| item)
}

/// Feature of `corners` under `pointer`, if any.
pub fn hit_test(corners: &[Pt2; 4], pointer: &Pt2, options: &HitTestOptions) -> Option<Selection> {
    let corner = nearest_within(
        corners
            .iter()
            .enumerate()
            .map(|(i, c)| (i, distance_squared(c, pointer))),
        options.corner_margin,
    );
    if let Some(i) = corner {
        return Some(Selection::Corner(i));
    }

    let edge = nearest_within(
        Edge::ALL.iter().map(|&edge| {
            let [a, b] = edge.corners();
            let d = distance_to_segment(pointer, &corners[a], &corners[b]);
            (edge, d * d)
        }),
        options.edge_margin,
    );
    if let Some(edge) = edge {
        return Some(Selection::Edge(edge));
    }

    let center = centroid(corners);
    (distance_squared(&center, pointer) <= options.center_margin * options.center_margin)
        .then_some(Selection::All)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> [Pt2; 4] {
        [
            Pt2::new(0.0, 0.0),
            Pt2::new(400.0, 0.0),
            Pt2::new(400.0, 300.0),
            Pt2::new(0.0, 300.0),
        ]
    }

    fn opts() -> HitTestOptions {
        HitTestOptions {
            corner_margin: 20.0,
            edge_margin: 10.0,
            center_margin: 30.0,
        }
    }

    #[test]
    fn grabs_nearest_corner() {
        let hit = hit_test(&quad(), &Pt2::new(395.0, 290.0), &opts());
        assert_eq!(hit, Some(Selection::Corner(2)));
    }

    #[test]
    fn corner_tie_goes_to_lower_index() {
        let tiny = [
            Pt2::new(0.0, 0.0),
            Pt2::new(10.0, 0.0),
            Pt2::new(10.0, 10.0),
            Pt2::new(0.0, 10.0),
        ];
        let hit = hit_test(&tiny, &Pt2::new(5.0, 0.0), &opts());
        assert_eq!(hit, Some(Selection::Corner(0)));
    }

    #[test]
    fn grabs_edge_between_corners() {
        assert_eq!(
            hit_test(&quad(), &Pt2::new(200.0, 6.0), &opts()),
            Some(Selection::Edge(Edge::Top))
        );
        assert_eq!(
            hit_test(&quad(), &Pt2::new(-4.0, 150.0), &opts()),
            Some(Selection::Edge(Edge::Left))
        );
        assert_eq!(Edge::Top.drag_axis(), Axis::Y);
        assert_eq!(Edge::Left.drag_axis(), Axis::X);
    }

    #[test]
    fn grabs_everything_near_centre() {
        assert_eq!(
            hit_test(&quad(), &Pt2::new(210.0, 160.0), &opts()),
            Some(Selection::All)
        );
        assert_eq!(Selection::All.indices(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn misses_empty_space() {
        assert_eq!(hit_test(&quad(), &Pt2::new(100.0, 100.0), &opts()), None);
        assert_eq!(hit_test(&quad(), &Pt2::new(900.0, 900.0), &opts()), None);
    }
}
