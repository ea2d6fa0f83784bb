//! Calibration state as stored between runs.

use crate::Calibration;
use anyhow::{ensure, Result};
use patternproj_core::{PhysicalDimensions, Pt2, Real, Unit};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub x: Real,
    pub y: Real,
}

impl From<Pt2> for PointRecord {
    fn from(p: Pt2) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<PointRecord> for Pt2 {
    fn from(p: PointRecord) -> Self {
        Pt2::new(p.x, p.y)
    }
}

/// Last calibration corners plus width/height/unit.
///
/// ```json
/// {
///   "points": [{"x": 100, "y": 100}, {"x": 820, "y": 100},
///              {"x": 820, "y": 640}, {"x": 100, "y": 640}],
///   "width": 24, "height": 18, "unit": "IN"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedCalibration {
    pub points: Vec<PointRecord>,
    pub width: Real,
    pub height: Real,
    #[serde(default)]
    pub unit: Unit,
}

impl PersistedCalibration {
    pub fn from_calibration(calibration: &Calibration) -> Self {
        let d = calibration.dimensions();
        Self {
            points: calibration.points().iter().copied().map(PointRecord::from).collect(),
            width: d.width,
            height: d.height,
            unit: d.unit,
        }
    }

    pub fn dimensions(&self) -> PhysicalDimensions {
        PhysicalDimensions::new(self.width, self.height, self.unit)
    }

    /// Four finite points and positive finite dimensions.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.points.len() == 4,
            "expected 4 calibration points, found {}",
            self.points.len()
        );
        ensure!(
            self.points.iter().all(|p| p.x.is_finite() && p.y.is_finite()),
            "calibration points must be finite"
        );
        self.dimensions().validate()?;
        Ok(())
    }

    pub fn corners(&self) -> Result<[Pt2; 4]> {
        self.validate()?;
        Ok([0, 1, 2, 3].map(|i| Pt2::from(self.points[i])))
    }

    /// Rebuild the engine; a degenerate quad still loads and reports its
    /// error through [`Calibration::last_error`].
    pub fn to_calibration(&self) -> Result<Calibration> {
        Ok(Calibration::new(self.corners()?, self.dimensions()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let persisted: Self = serde_json::from_str(json)?;
        persisted.validate()?;
        Ok(persisted)
    }
}
