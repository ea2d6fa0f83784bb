//! Length and angle read-outs for the measurement overlay.

use patternproj_core::{Line, Real, Unit};
use serde::{Deserialize, Serialize};

/// Length in the active unit and the compass-style angle of a line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineMeasure {
    pub length: Real,
    /// Degrees in `[0, 360)`, counter-clockwise as seen on the mat.
    pub angle_degrees: Real,
}

/// Measure a line given in pattern px.
///
/// Screen y grows downward, so the `atan2` angle is negated to read
/// counter-clockwise.
pub fn measure(line: &Line, unit: Unit) -> LineMeasure {
    LineMeasure {
        length: unit.from_pattern_px(line.length()),
        angle_degrees: normalize_degrees(-line.angle().to_degrees()),
    }
}

/// Wrap an angle into `[0, 360)`.
pub fn normalize_degrees(deg: Real) -> Real {
    // `+ 0.0` turns -0.0 into 0.0 so it never prints as "-0".
    let wrapped = deg.rem_euclid(360.0) + 0.0;
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// `1.00"` or `2.54cm`.
pub fn format_length(length: Real, unit: Unit) -> String {
    format!("{:.2}{}", length, unit.suffix())
}

/// Whole degrees, wrapped after rounding so 359.7° reads `0°`.
pub fn format_angle(angle_degrees: Real) -> String {
    let rounded = normalize_degrees(angle_degrees.round());
    format!("{rounded:.0}°")
}

impl LineMeasure {
    pub fn length_label(&self, unit: Unit) -> String {
        format_length(self.length, unit)
    }

    pub fn angle_label(&self) -> String {
        format_angle(self.angle_degrees)
    }
}
