//! Metrics emitted by the analyzer.
//!
//! Recorded through the `metrics` facade; these are no-ops unless the host
//! installs a recorder.

use metrics::{counter, histogram};
use swing_models::SwingOutcome;

/// Metric names as constants for consistency.
pub mod names {
    pub const SESSIONS_STARTED_TOTAL: &str = "swing_sessions_started_total";
    pub const OUTCOMES_TOTAL: &str = "swing_outcomes_total";
    pub const SPEED_MPH: &str = "swing_speed_mph";
    pub const SAMPLES_CLAMPED_TOTAL: &str = "swing_samples_clamped_total";
    pub const DETECTIONS_DEFERRED_TOTAL: &str = "swing_detections_deferred_total";
}

/// Record a session entering its countdown.
pub fn record_session_started() {
    counter!(names::SESSIONS_STARTED_TOTAL).increment(1);
}

/// Record a completed session.
pub fn record_outcome(outcome: &SwingOutcome) {
    let labels = [("reason", outcome.reason.as_str().to_string())];
    counter!(names::OUTCOMES_TOTAL, &labels).increment(1);

    if outcome.is_detected() {
        histogram!(names::SPEED_MPH).record(outcome.speed);
    }
}

/// Record an out-of-range intensity that was clamped.
pub fn record_sample_clamped() {
    counter!(names::SAMPLES_CLAMPED_TOTAL).increment(1);
}

/// Record a detection postponed because of a non-positive duration.
pub fn record_detection_deferred() {
    counter!(names::DETECTIONS_DEFERRED_TOTAL).increment(1);
}
