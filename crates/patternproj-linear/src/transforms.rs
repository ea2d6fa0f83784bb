//! Pure builders for 2D homogeneous transforms.
//!
//! Every builder returns a fresh [`Mat3`]; compose with `*`, where the
//! rightmost factor is applied to a point first. Angles are radians
//! internally; the degree wrapper converts exactly once at the boundary.

use patternproj_core::{Line, Mat3, Pt2, Real, Vec2};

/// Translation by `offset`.
pub fn translate(offset: &Vec2) -> Mat3 {
    Mat3::new(1.0, 0.0, offset.x, 0.0, 1.0, offset.y, 0.0, 0.0, 1.0)
}

/// Uniform scale about the origin.
pub fn scale(s: Real) -> Mat3 {
    scale_xy(s, s)
}

/// Non-uniform scale about the origin.
pub fn scale_xy(sx: Real, sy: Real) -> Mat3 {
    Mat3::new(sx, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 1.0)
}

/// Rotation by `angle` radians about the origin.
///
/// Positive angles turn +x towards +y, which is clockwise on a y-down screen.
pub fn rotate(angle: Real) -> Mat3 {
    let (s, c) = angle.sin_cos();
    rotation_from_sin_cos(s, c)
}

fn rotation_from_sin_cos(s: Real, c: Real) -> Mat3 {
    Mat3::new(c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0)
}

/// `translate(pivot) · m · translate(-pivot)`: apply `m` about `pivot`.
pub fn transform_about_point(m: &Mat3, pivot: &Pt2) -> Mat3 {
    translate(&pivot.coords) * m * translate(&-pivot.coords)
}

/// Rotation by `degrees` about `pivot`.
///
/// Whole quarter turns use exact sine/cosine so repeated 90° steps do not
/// accumulate rounding error.
pub fn rotate_degrees_about(pivot: &Pt2, degrees: Real) -> Mat3 {
    let r = if degrees.fract() == 0.0 && degrees % 90.0 == 0.0 {
        let quarter = ((degrees / 90.0) as i64).rem_euclid(4);
        let (s, c) = match quarter {
            0 => (0.0, 1.0),
            1 => (1.0, 0.0),
            2 => (0.0, -1.0),
            _ => (-1.0, 0.0),
        };
        rotation_from_sin_cos(s, c)
    } else {
        rotate(degrees.to_radians())
    };
    transform_about_point(&r, pivot)
}

/// Mirror left-right about the vertical line through `pivot`.
pub fn flip_horizontal_about(pivot: &Pt2) -> Mat3 {
    transform_about_point(&scale_xy(-1.0, 1.0), pivot)
}

/// Mirror top-bottom about the horizontal line through `pivot`.
pub fn flip_vertical_about(pivot: &Pt2) -> Mat3 {
    transform_about_point(&scale_xy(1.0, -1.0), pivot)
}

/// Move `line.start` onto `target.start` and turn `line` to `target`'s direction.
pub fn align_line_to_line(line: &Line, target: &Line) -> Mat3 {
    let delta = target.angle() - line.angle();
    let shift = translate(&(target.start - line.start));
    transform_about_point(&rotate(delta), &target.start) * shift
}

/// Reflection across the infinite line through `line`.
///
/// Rotates the line to horizontal about its start, mirrors vertically, and
/// rotates back.
pub fn flip_along_line(line: &Line) -> Mat3 {
    let angle = line.angle();
    let pivot = line.start;
    transform_about_point(&rotate(angle), &pivot)
        * flip_vertical_about(&pivot)
        * transform_about_point(&rotate(-angle), &pivot)
}
