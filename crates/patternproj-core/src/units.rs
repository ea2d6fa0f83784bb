//! Units of measure and the physical size of the calibration rectangle.

use crate::{GeometryError, Real};
use serde::{Deserialize, Serialize};

/// CSS reference pixels per inch; pattern space is measured in these.
pub const PX_PER_INCH: Real = 96.0;
/// Centimetres per inch.
pub const CM_PER_INCH: Real = 2.54;

/// Unit the user measures the mat in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Unit {
    #[default]
    #[serde(rename = "IN")]
    Inches,
    #[serde(rename = "CM")]
    Centimeters,
}

impl Unit {
    /// Pattern pixels per one unit.
    pub fn pt_density(self) -> Real {
        match self {
            Unit::Inches => PX_PER_INCH,
            Unit::Centimeters => PX_PER_INCH / CM_PER_INCH,
        }
    }

    /// Suffix appended to displayed lengths.
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Inches => "\"",
            Unit::Centimeters => "cm",
        }
    }

    /// Convert a length expressed in `self` into `to`.
    pub fn convert(self, value: Real, to: Unit) -> Real {
        match (self, to) {
            (Unit::Inches, Unit::Centimeters) => value * CM_PER_INCH,
            (Unit::Centimeters, Unit::Inches) => value / CM_PER_INCH,
            _ => value,
        }
    }

    /// Convert a pattern-pixel length to this unit.
    pub fn from_pattern_px(self, px: Real) -> Real {
        Unit::Inches.convert(px / PX_PER_INCH, self)
    }

    /// Keyboard nudge sub-unit in this unit: 1/16 inch or 1 mm.
    pub fn nudge_sub_unit(self) -> Real {
        match self {
            Unit::Inches => 1.0 / 16.0,
            Unit::Centimeters => 0.1,
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unit::Inches => write!(f, "IN"),
            Unit::Centimeters => write!(f, "CM"),
        }
    }
}

/// Real-world size of the rectangle the four calibration corners map to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalDimensions {
    pub width: Real,
    pub height: Real,
    pub unit: Unit,
}

impl Default for PhysicalDimensions {
    fn default() -> Self {
        Self {
            width: 24.0,
            height: 18.0,
            unit: Unit::Inches,
        }
    }
}

impl PhysicalDimensions {
    pub fn new(width: Real, height: Real, unit: Unit) -> Self {
        Self {
            width,
            height,
            unit,
        }
    }

    /// Dimensions usable for calibration: finite and strictly positive.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let ok = |v: Real| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(GeometryError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Same physical rectangle expressed in another unit.
    pub fn with_unit(&self, unit: Unit) -> Self {
        Self {
            width: self.unit.convert(self.width, unit),
            height: self.unit.convert(self.height, unit),
            unit,
        }
    }

    /// Width and height in pattern pixels.
    pub fn size_px(&self) -> (Real, Real) {
        let d = self.unit.pt_density();
        (self.width * d, self.height * d)
    }
}

/// Parse a user-typed width/height field.
///
/// Everything except ASCII digits and the first decimal point is dropped
/// before parsing. Empty or zero input yields `None` ("not ready").
pub fn parse_dimension(text: &str) -> Option<Real> {
    let mut seen_dot = false;
    let filtered: String = text
        .chars()
        .filter(|c| {
            if c.is_ascii_digit() {
                true
            } else if *c == '.' && !seen_dot {
                seen_dot = true;
                true
            } else {
                false
            }
        })
        .collect();
    let value: Real = filtered.parse().ok()?;
    (value > 0.0).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn densities() {
        assert_eq!(Unit::Inches.pt_density(), 96.0);
        assert!((Unit::Centimeters.pt_density() * 2.54 - 96.0).abs() < 1e-12);
    }

    #[test]
    fn unit_change_preserves_physical_size() {
        let dims = PhysicalDimensions::new(24.0, 18.0, Unit::Inches);
        let cm = dims.with_unit(Unit::Centimeters);
        assert!((cm.width - 60.96).abs() < 1e-9);
        let (w_in, h_in) = dims.size_px();
        let (w_cm, h_cm) = cm.size_px();
        assert!((w_in - w_cm).abs() < 1e-9);
        assert!((h_in - h_cm).abs() < 1e-9);
        let back = cm.with_unit(Unit::Inches);
        assert!((back.width - 24.0).abs() < 1e-12);
    }

    #[test]
    fn pattern_px_to_units() {
        assert!((Unit::Inches.from_pattern_px(96.0) - 1.0).abs() < 1e-12);
        assert!((Unit::Centimeters.from_pattern_px(96.0) - 2.54).abs() < 1e-12);
    }

    #[test]
    fn dimension_filter() {
        assert_eq!(parse_dimension("24"), Some(24.0));
        assert_eq!(parse_dimension(" 2a4in "), Some(24.0));
        assert_eq!(parse_dimension("18.5.2"), Some(18.52));
        assert_eq!(parse_dimension("abc"), None);
        assert_eq!(parse_dimension("0"), None);
        assert_eq!(parse_dimension(""), None);
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert!(PhysicalDimensions::new(0.0, 10.0, Unit::Inches)
            .validate()
            .is_err());
        assert!(PhysicalDimensions::default().validate().is_ok());
    }

    #[test]
    fn unit_serializes_as_short_code() {
        assert_eq!(serde_json::to_string(&Unit::Centimeters).unwrap(), "\"CM\"");
        let u: Unit = serde_json::from_str("\"IN\"").unwrap();
        assert_eq!(u, Unit::Inches);
    }
}
