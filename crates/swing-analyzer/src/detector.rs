//! Swing detector facade.
//!
//! All analyzer state lives in an explicit, serializable [`AnalyzerState`]
//! that is threaded through the pure [`step`] function. [`SwingDetector`]
//! is a thin owner of that state for callers that want an object.
//!
//! # Usage
//!
//! ```rust
//! use swing_analyzer::SwingDetector;
//! use swing_models::MotionSample;
//!
//! let mut detector = SwingDetector::new();
//! for i in 0..15 {
//!     let result = detector.process_frame(MotionSample::new(i * 33, 0.01));
//!     assert!(!result.swing_detected);
//! }
//! assert!((detector.average_motion() - 0.01).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use swing_models::{DetectionResult, MotionSample, SwingPhase};
use tracing::debug;

use crate::config::DetectorConfig;
use crate::error::{AnalyzerError, AnalyzerResult};
use crate::metrics;
use crate::tracker::{advance, TrackerState};
use crate::window::FrameWindow;

/// Complete analyzer state: the sample window and the tracker scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AnalyzerState {
    pub window: FrameWindow,
    pub tracker: TrackerState,
}

impl AnalyzerState {
    /// Fresh state sized for `config`.
    pub fn new(config: &DetectorConfig) -> Self {
        Self {
            window: FrameWindow::with_capacity(config.window_capacity),
            tracker: TrackerState::default(),
        }
    }
}

/// Process one sample against an explicit state.
///
/// Out-of-range intensities are clamped to `[0, 1]` before use.
pub fn step(
    mut state: AnalyzerState,
    sample: MotionSample,
    config: &DetectorConfig,
) -> (AnalyzerState, DetectionResult) {
    let result = step_mut(&mut state, sample, config);
    (state, result)
}

/// In-place form of [`step`].
pub fn step_mut(
    state: &mut AnalyzerState,
    sample: MotionSample,
    config: &DetectorConfig,
) -> DetectionResult {
    if !sample.is_in_range() {
        debug!(
            timestamp = sample.timestamp,
            intensity = sample.intensity,
            "Clamping out-of-range intensity"
        );
        metrics::record_sample_clamped();
    }
    let sample = sample.clamped();

    state.window.push(sample);
    let (tracker, result) = advance(state.tracker, &state.window, &sample, config);
    state.tracker = tracker;
    result
}

/// Stateful swing detector for one tracking session.
///
/// Not meant to be shared between threads; callers serialize access.
#[derive(Debug, Clone)]
pub struct SwingDetector {
    config: DetectorConfig,
    state: AnalyzerState,
}

impl SwingDetector {
    /// Create a detector with the default tuning.
    pub fn new() -> Self {
        let config = DetectorConfig::default();
        let state = AnalyzerState::new(&config);
        Self { config, state }
    }

    /// Create with full configuration.
    pub fn with_config(config: DetectorConfig) -> AnalyzerResult<Self> {
        config.validate()?;
        let state = AnalyzerState::new(&config);
        Ok(Self { config, state })
    }

    /// Resume from a previously captured state.
    pub fn from_state(config: DetectorConfig, state: AnalyzerState) -> AnalyzerResult<Self> {
        config.validate()?;
        if state.window.capacity() != config.window_capacity {
            return Err(AnalyzerError::invalid_state(format!(
                "window capacity {} does not match configured {}",
                state.window.capacity(),
                config.window_capacity
            )));
        }
        if state.window.len() > state.window.capacity() {
            return Err(AnalyzerError::invalid_state(format!(
                "window holds {} samples but capacity is {}",
                state.window.len(),
                state.window.capacity()
            )));
        }
        Ok(Self { config, state })
    }

    /// Push a sample and advance the phase tracker.
    pub fn process_frame(&mut self, sample: MotionSample) -> DetectionResult {
        step_mut(&mut self.state, sample, &self.config)
    }

    /// Clear the window and return the tracker to `Idle`.
    pub fn reset(&mut self) {
        self.state.window.clear();
        self.state.tracker = TrackerState::default();
    }

    /// Mean intensity over the whole window (0 when empty).
    pub fn average_motion(&self) -> f64 {
        self.state.window.mean_intensity()
    }

    /// Highest windowed intensity seen this session.
    pub fn peak_motion(&self) -> f64 {
        self.state.tracker.peak_intensity
    }

    pub fn is_swing_detected(&self) -> bool {
        self.state.tracker.is_detected()
    }

    pub fn phase(&self) -> SwingPhase {
        self.state.tracker.phase
    }

    pub fn armed_at(&self) -> Option<i64> {
        self.state.tracker.armed_at
    }

    pub fn sample_count(&self) -> usize {
        self.state.window.len()
    }

    pub fn state(&self) -> &AnalyzerState {
        &self.state
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn into_state(self) -> AnalyzerState {
        self.state
    }
}

impl Default for SwingDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_does_not_touch_input_clone() {
        let config = DetectorConfig::default();
        let before = AnalyzerState::new(&config);
        let (after, result) = step(before.clone(), MotionSample::new(0, 0.5), &config);

        assert!(before.window.is_empty());
        assert_eq!(after.window.len(), 1);
        assert!(!result.swing_detected);
    }

    #[test]
    fn test_step_clamps_intensity() {
        let config = DetectorConfig::default();
        let (state, _) = step(AnalyzerState::new(&config), MotionSample::new(0, 3.0), &config);
        let (state, _) = step(state, MotionSample::new(33, -1.0), &config);

        let stored: Vec<f64> = state.window.iter().map(|s| s.intensity).collect();
        assert_eq!(stored, vec![1.0, 0.0]);
    }

    #[test]
    fn test_reset_matches_fresh_instance() {
        let fresh = SwingDetector::new();

        let mut detector = SwingDetector::new();
        detector.reset();
        assert_eq!(detector.state(), fresh.state());
        detector.reset();
        assert_eq!(detector.state(), fresh.state());

        for i in 0..30 {
            detector.process_frame(MotionSample::new(i * 33, 0.4));
        }
        assert_ne!(detector.state(), fresh.state());

        detector.reset();
        assert_eq!(detector.state(), fresh.state());
        assert_eq!(detector.phase(), SwingPhase::Idle);
        assert_eq!(detector.peak_motion(), 0.0);
        assert_eq!(detector.armed_at(), None);
        assert_eq!(detector.sample_count(), 0);
    }

    #[test]
    fn test_average_motion_covers_whole_window() {
        let mut detector = SwingDetector::new();
        assert_eq!(detector.average_motion(), 0.0);

        for i in 0..20 {
            let intensity = if i < 10 { 0.0 } else { 0.2 };
            detector.process_frame(MotionSample::new(i * 33, intensity));
        }
        assert!((detector.average_motion() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_with_config_validates() {
        let bad = DetectorConfig::default().with_window_capacity(3);
        assert!(matches!(
            SwingDetector::with_config(bad),
            Err(AnalyzerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_state_roundtrip() {
        let mut detector = SwingDetector::new();
        for i in 0..12 {
            detector.process_frame(MotionSample::new(i * 33, 0.2));
        }
        let config = detector.config().clone();
        let snapshot = serde_json::to_string(detector.state()).unwrap();

        let restored: AnalyzerState = serde_json::from_str(&snapshot).unwrap();
        let resumed = SwingDetector::from_state(config, restored).unwrap();
        assert_eq!(resumed.phase(), SwingPhase::Armed);
        assert_eq!(resumed.state(), detector.state());
    }

    #[test]
    fn test_from_state_rejects_capacity_mismatch() {
        let config = DetectorConfig::default();
        let state = AnalyzerState {
            window: FrameWindow::with_capacity(20),
            tracker: TrackerState::default(),
        };
        assert!(matches!(
            SwingDetector::from_state(config, state),
            Err(AnalyzerError::InvalidState(_))
        ));
    }
}
