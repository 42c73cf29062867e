//! Speed estimation from peak intensity and swing duration.
//!
//! A deterministic, monotone-in-intensity heuristic, not a physical model:
//!
//! ```text
//! speed_factor    = peak * intensity_scale
//! duration_factor = max(min_duration_factor, 1 - (secs - reference_duration_secs))
//! speed           = round1(clamp(speed_factor * duration_factor, min_speed, max_speed))
//! ```
//!
//! Identical inputs always produce identical outputs. Realism noise, if
//! wanted, is applied by the caller (see [`crate::jitter`]).

use serde::{Deserialize, Serialize};

use crate::error::{AnalyzerError, AnalyzerResult};

/// Parameters of the speed heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedModel {
    /// Maps normalized intensity to an mph-like range
    pub intensity_scale: f64,
    /// Duration (seconds) at which no duration penalty applies
    pub reference_duration_secs: f64,
    /// Floor of the duration factor
    pub min_duration_factor: f64,
    /// Lower output bound
    pub min_speed: f64,
    /// Upper output bound
    pub max_speed: f64,
}

impl Default for SpeedModel {
    fn default() -> Self {
        Self {
            intensity_scale: 400.0,
            reference_duration_secs: 0.25,
            min_duration_factor: 0.5,
            min_speed: 30.0,
            max_speed: 130.0,
        }
    }
}

impl SpeedModel {
    /// Estimate the swing speed for a peak intensity and a duration in ms.
    pub fn estimate(&self, peak_intensity: f64, duration_ms: i64) -> f64 {
        let duration_secs = duration_ms as f64 / 1000.0;
        let speed_factor = peak_intensity * self.intensity_scale;
        let duration_factor =
            (1.0 - (duration_secs - self.reference_duration_secs)).max(self.min_duration_factor);

        let raw = speed_factor * duration_factor;
        let bounded = if raw.is_nan() {
            self.min_speed
        } else {
            raw.clamp(self.min_speed, self.max_speed)
        };

        round_to_tenth(bounded)
    }

    /// Clamp an externally adjusted speed back into the model bounds.
    pub fn bound(&self, speed: f64) -> f64 {
        round_to_tenth(speed.clamp(self.min_speed, self.max_speed))
    }

    pub fn validate(&self) -> AnalyzerResult<()> {
        let fields = [
            ("intensity_scale", self.intensity_scale),
            ("reference_duration_secs", self.reference_duration_secs),
            ("min_duration_factor", self.min_duration_factor),
            ("min_speed", self.min_speed),
            ("max_speed", self.max_speed),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(AnalyzerError::invalid_config(format!(
                "speed.{name} must be finite"
            )));
        }
        if self.intensity_scale <= 0.0 {
            return Err(AnalyzerError::invalid_config(
                "speed.intensity_scale must be positive",
            ));
        }
        if self.min_duration_factor < 0.0 {
            return Err(AnalyzerError::invalid_config(
                "speed.min_duration_factor must not be negative",
            ));
        }
        if self.min_speed > self.max_speed {
            return Err(AnalyzerError::invalid_config(format!(
                "speed.min_speed ({}) exceeds speed.max_speed ({})",
                self.min_speed, self.max_speed
            )));
        }
        Ok(())
    }
}

/// Estimate speed with the default model.
pub fn estimate_speed(peak_intensity: f64, duration_ms: i64) -> f64 {
    SpeedModel::default().estimate(peak_intensity, duration_ms)
}

/// Round to one decimal digit.
pub(crate) fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
