//! Tunable constants for gestures and measurement.
//!
//! All option structs are `serde`-serialisable with defaults, so a JSON
//! config may specify only the fields it wants to override.

use patternproj_core::Real;
use serde::{Deserialize, Serialize};

/// Pick radii for calibration drag start, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitTestOptions {
    /// Max distance from a corner to grab that corner.
    pub corner_margin: Real,
    /// Max perpendicular distance from an edge to grab its two corners.
    pub edge_margin: Real,
    /// Max distance from the centroid to grab all four corners.
    pub center_margin: Real,
}

impl Default for HitTestOptions {
    fn default() -> Self {
        Self {
            corner_margin: 30.0,
            edge_margin: 20.0,
            center_margin: 40.0,
        }
    }
}

/// Accelerating keyboard nudge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NudgeOptions {
    /// Step multipliers, advanced the longer a key is held.
    pub steps: Vec<Real>,
    /// Key repeats spent on each step before moving to the next one.
    pub repeats_per_step: u32,
}

impl Default for NudgeOptions {
    fn default() -> Self {
        Self {
            steps: vec![1.0, 3.0, 5.0, 10.0],
            repeats_per_step: 8,
        }
    }
}

/// Line tool thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasurementOptions {
    /// Finalised lines shorter than this (pattern px) are replaced by a
    /// one-unit horizontal line.
    pub min_line_length: Real,
    /// Max screen distance from an endpoint to grab it.
    pub endpoint_margin: Real,
}

impl Default for MeasurementOptions {
    fn default() -> Self {
        Self {
            min_line_length: 2.0,
            endpoint_margin: 24.0,
        }
    }
}

/// Everything a [`ProjectorSession`](crate::ProjectorSession) can be tuned with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub hit_test: HitTestOptions,
    pub nudge: NudgeOptions,
    pub measurement: MeasurementOptions,
}
