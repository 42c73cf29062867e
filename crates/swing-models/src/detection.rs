//! Per-frame detection results and swing phases.
//!
//! A swing is modeled as a rise above a lower threshold (`Armed`), followed
//! by a peak above a higher threshold and a settle (`Detected`).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Phase of the swing tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum SwingPhase {
    /// No sustained motion yet.
    #[default]
    Idle,

    /// Average motion crossed the swing threshold; waiting for peak and settle.
    Armed,

    /// A full swing was recognized. Terminal until reset.
    Detected,
}

impl SwingPhase {
    /// All phases in lifecycle order.
    pub const ALL: &'static [SwingPhase] = &[
        SwingPhase::Idle,
        SwingPhase::Armed,
        SwingPhase::Detected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SwingPhase::Idle => "idle",
            SwingPhase::Armed => "armed",
            SwingPhase::Detected => "detected",
        }
    }

    /// Returns true if no further transitions can happen before a reset.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SwingPhase::Detected)
    }
}

impl fmt::Display for SwingPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SwingPhase {
    type Err = SwingPhaseParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "idle" => Ok(SwingPhase::Idle),
            "armed" => Ok(SwingPhase::Armed),
            "detected" => Ok(SwingPhase::Detected),
            _ => Err(SwingPhaseParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown swing phase: {0}")]
pub struct SwingPhaseParseError(String);

/// Result returned for every processed frame.
///
/// `speed` is only non-zero on the single frame that completes a swing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    pub swing_detected: bool,
    pub speed: f64,
}

impl DetectionResult {
    /// Result for a frame that did not complete a swing.
    pub const fn none() -> Self {
        Self {
            swing_detected: false,
            speed: 0.0,
        }
    }

    /// Result for the frame that completed a swing.
    pub const fn detected(speed: f64) -> Self {
        Self {
            swing_detected: true,
            speed,
        }
    }
}
