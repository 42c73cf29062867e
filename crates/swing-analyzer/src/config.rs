//! Configuration for the swing analyzer and session driver.
//!
//! The defaults reproduce the reference tuning: a 60-sample window, a
//! 10-sample analysis span, 0.15 to arm, 0.25 for the peak and a settle
//! below half the arming threshold.

use serde::{Deserialize, Serialize};

use crate::error::{AnalyzerError, AnalyzerResult};
use crate::speed::SpeedModel;
use crate::window::DEFAULT_WINDOW_CAPACITY;

/// Configuration for swing detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Number of recent samples kept in the sliding window.
    pub window_capacity: usize,

    /// Minimum buffered samples before any phase transition is evaluated.
    ///
    /// Guards against noise on short histories.
    pub min_samples: usize,

    /// Number of most recent samples the mean and max are computed over.
    pub analysis_window: usize,

    /// Mean intensity above which the tracker arms (0.0-1.0).
    pub swing_threshold: f64,

    /// Max intensity the swing must exceed to count as a peak (0.0-1.0).
    pub peak_threshold: f64,

    /// Fraction of `swing_threshold` the mean must drop below to settle.
    pub settle_ratio: f64,

    /// Speed heuristic parameters.
    pub speed: SpeedModel,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            window_capacity: DEFAULT_WINDOW_CAPACITY,
            min_samples: 10,
            analysis_window: 10,
            swing_threshold: 0.15,
            peak_threshold: 0.25,
            settle_ratio: 0.5,
            speed: SpeedModel::default(),
        }
    }
}

impl DetectorConfig {
    /// Mean intensity below which motion counts as settled.
    pub fn settle_threshold(&self) -> f64 {
        self.swing_threshold * self.settle_ratio
    }

    /// Builder-style setter for the arming threshold.
    pub fn with_swing_threshold(mut self, threshold: f64) -> Self {
        self.swing_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Builder-style setter for the peak threshold.
    pub fn with_peak_threshold(mut self, threshold: f64) -> Self {
        self.peak_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Builder-style setter for the window capacity.
    pub fn with_window_capacity(mut self, capacity: usize) -> Self {
        self.window_capacity = capacity;
        self
    }

    /// Builder-style setter for the speed model.
    pub fn with_speed_model(mut self, speed: SpeedModel) -> Self {
        self.speed = speed;
        self
    }

    pub fn validate(&self) -> AnalyzerResult<()> {
        if self.analysis_window == 0 {
            return Err(AnalyzerError::invalid_config(
                "analysis_window must be at least 1",
            ));
        }
        if self.window_capacity < self.analysis_window {
            return Err(AnalyzerError::invalid_config(format!(
                "window_capacity ({}) is smaller than analysis_window ({})",
                self.window_capacity, self.analysis_window
            )));
        }
        if self.min_samples > self.window_capacity {
            return Err(AnalyzerError::invalid_config(format!(
                "min_samples ({}) can never be reached with window_capacity ({})",
                self.min_samples, self.window_capacity
            )));
        }
        for (name, value) in [
            ("swing_threshold", self.swing_threshold),
            ("peak_threshold", self.peak_threshold),
            ("settle_ratio", self.settle_ratio),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(AnalyzerError::invalid_config(format!(
                    "{name} must be in (0, 1], got {value}"
                )));
            }
        }
        self.speed.validate()
    }
}

/// Explicit, seedable realism noise applied to detected speeds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JitterConfig {
    /// RNG seed; equal seeds give equal sequences
    pub seed: u64,
    /// Total width of the uniform offset (mph)
    pub amplitude: f64,
}

/// Configuration for the countdown / detection / result session policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Countdown before the detection window opens (ms).
    pub countdown_ms: i64,

    /// Detection window length before reporting a zero-speed timeout (ms).
    pub detection_timeout_ms: i64,

    /// Optional realism noise for detected speeds. Off by default.
    pub jitter: Option<JitterConfig>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            countdown_ms: 5_000,
            detection_timeout_ms: 10_000,
            jitter: None,
        }
    }
}

impl SessionConfig {
    /// Builder-style setter for the countdown length.
    pub fn with_countdown_ms(mut self, ms: i64) -> Self {
        self.countdown_ms = ms;
        self
    }

    /// Builder-style setter for the detection timeout.
    pub fn with_timeout_ms(mut self, ms: i64) -> Self {
        self.detection_timeout_ms = ms;
        self
    }

    /// Builder-style setter for seeded jitter.
    pub fn with_jitter(mut self, seed: u64, amplitude: f64) -> Self {
        self.jitter = Some(JitterConfig { seed, amplitude });
        self
    }

    pub fn validate(&self) -> AnalyzerResult<()> {
        if self.countdown_ms < 0 {
            return Err(AnalyzerError::invalid_config(
                "countdown_ms must not be negative",
            ));
        }
        if self.detection_timeout_ms <= 0 {
            return Err(AnalyzerError::invalid_config(
                "detection_timeout_ms must be positive",
            ));
        }
        if let Some(jitter) = self.jitter {
            if !jitter.amplitude.is_finite() || jitter.amplitude < 0.0 {
                return Err(AnalyzerError::invalid_config(format!(
                    "jitter amplitude must be a non-negative number, got {}",
                    jitter.amplitude
                )));
            }
        }
        Ok(())
    }
}
