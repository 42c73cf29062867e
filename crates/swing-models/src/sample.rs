//! Motion samples produced by the sensor pipeline.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Lowest intensity the analyzer accepts.
pub const MIN_INTENSITY: f64 = 0.0;

/// Highest intensity the analyzer accepts.
pub const MAX_INTENSITY: f64 = 1.0;

/// One reduced camera frame: a timestamp and a normalized motion intensity.
///
/// Samples are produced externally and never mutated. Timestamps are
/// milliseconds and are expected to be non-decreasing within a session;
/// intensity is expected to lie in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MotionSample {
    /// Capture time in milliseconds
    pub timestamp: i64,
    /// Motion magnitude for the frame
    pub intensity: f64,
}

impl MotionSample {
    pub fn new(timestamp: i64, intensity: f64) -> Self {
        Self {
            timestamp,
            intensity,
        }
    }

    /// Returns true if the intensity lies in `[0, 1]`.
    pub fn is_in_range(&self) -> bool {
        (MIN_INTENSITY..=MAX_INTENSITY).contains(&self.intensity)
    }

    /// Copy of this sample with intensity clamped to `[0, 1]`.
    ///
    /// NaN intensities become 0.
    pub fn clamped(&self) -> Self {
        let intensity = if self.intensity.is_nan() {
            MIN_INTENSITY
        } else {
            self.intensity.clamp(MIN_INTENSITY, MAX_INTENSITY)
        };

        Self {
            timestamp: self.timestamp,
            intensity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_out_of_range() {
        assert_eq!(MotionSample::new(0, 1.7).clamped().intensity, 1.0);
        assert_eq!(MotionSample::new(0, -0.2).clamped().intensity, 0.0);
        assert_eq!(MotionSample::new(0, f64::NAN).clamped().intensity, 0.0);
        assert_eq!(MotionSample::new(42, 0.4).clamped(), MotionSample::new(42, 0.4));
    }

    #[test]
    fn test_range_check() {
        assert!(MotionSample::new(0, 0.0).is_in_range());
        assert!(MotionSample::new(0, 1.0).is_in_range());
        assert!(!MotionSample::new(0, 1.01).is_in_range());
        assert!(!MotionSample::new(0, f64::NAN).is_in_range());
    }

    #[test]
    fn test_json_shape() {
        let sample: MotionSample =
            serde_json::from_str(r#"{"timestamp": 1500, "intensity": 0.12}"#).unwrap();
        assert_eq!(sample, MotionSample::new(1500, 0.12));

        let json = serde_json::to_string(&sample).unwrap();
        assert_eq!(json, r#"{"timestamp":1500,"intensity":0.12}"#);
    }
}
