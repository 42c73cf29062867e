//! Session-level types: identity, phases and outcomes of one swing attempt.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique swing session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    /// Generate a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Presentation phase of a swing attempt as seen by the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Not started yet
    #[default]
    Idle,
    /// Counting down before the detection window opens
    Countdown,
    /// Detection window open; frames are analyzed
    Detecting,
    /// Outcome available
    Completed,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Countdown => "countdown",
            SessionPhase::Detecting => "detecting",
            SessionPhase::Completed => "completed",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a session completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeReason {
    /// The analyzer recognized a swing
    Detected,
    /// The detection window elapsed without a swing
    TimedOut,
}

impl OutcomeReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeReason::Detected => "detected",
            OutcomeReason::TimedOut => "timed_out",
        }
    }
}

impl fmt::Display for OutcomeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Final result of a swing attempt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SwingOutcome {
    pub reason: OutcomeReason,
    /// Estimated speed (mph-like); 0 when timed out
    pub speed: f64,
    /// Peak intensity observed during the detection window
    pub peak_intensity: f64,
    /// Sample clock time (ms) at which the session completed
    pub completed_at: i64,
}

impl SwingOutcome {
    pub fn detected(speed: f64, peak_intensity: f64, completed_at: i64) -> Self {
        Self {
            reason: OutcomeReason::Detected,
            speed,
            peak_intensity,
            completed_at,
        }
    }

    /// Timeout outcome. The speed estimator is never consulted.
    pub fn timed_out(peak_intensity: f64, completed_at: i64) -> Self {
        Self {
            reason: OutcomeReason::TimedOut,
            speed: 0.0,
            peak_intensity,
            completed_at,
        }
    }

    pub fn is_detected(&self) -> bool {
        self.reason == OutcomeReason::Detected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_unique() {
        assert_ne!(SessionId::new(), SessionId::new());
        assert_eq!(SessionId::from_string("abc").as_str(), "abc");
    }

    #[test]
    fn test_timed_out_has_zero_speed() {
        let outcome = SwingOutcome::timed_out(0.2, 15_000);
        assert_eq!(outcome.speed, 0.0);
        assert!(!outcome.is_detected());
        assert_eq!(outcome.reason.to_string(), "timed_out");
    }

    #[test]
    fn test_phase_serde_names() {
        assert_eq!(
            serde_json::to_string(&SessionPhase::Countdown).unwrap(),
            "\"countdown\""
        );
        assert_eq!(
            serde_json::to_string(&OutcomeReason::TimedOut).unwrap(),
            "\"timed_out\""
        );
    }
}
