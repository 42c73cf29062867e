//! Replay event types.
//!
//! One event is written per line by the replay tool so downstream consumers
//! can follow a session without linking against the analyzer.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::session::{SessionId, SessionPhase, SwingOutcome};

/// Replay event envelope.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ReplayEvent {
    /// Session moved to a new presentation phase
    PhaseChanged {
        session_id: SessionId,
        phase: SessionPhase,
        /// Sample clock time (ms)
        at: i64,
    },

    /// Session completed
    Outcome {
        session_id: SessionId,
        #[serde(flatten)]
        outcome: SwingOutcome,
    },

    /// End-of-input summary
    Summary {
        session_id: SessionId,
        samples_read: u64,
        samples_clamped: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        outcome: Option<SwingOutcome>,
        finished_at: DateTime<Utc>,
    },
}

impl ReplayEvent {
    pub fn phase_changed(session_id: &SessionId, phase: SessionPhase, at: i64) -> Self {
        Self::PhaseChanged {
            session_id: session_id.clone(),
            phase,
            at,
        }
    }

    pub fn outcome(session_id: &SessionId, outcome: SwingOutcome) -> Self {
        Self::Outcome {
            session_id: session_id.clone(),
            outcome,
        }
    }

    pub fn summary(
        session_id: &SessionId,
        samples_read: u64,
        samples_clamped: u64,
        outcome: Option<SwingOutcome>,
    ) -> Self {
        Self::Summary {
            session_id: session_id.clone(),
            samples_read,
            samples_clamped,
            outcome,
            finished_at: Utc::now(),
        }
    }

    /// Event name as written in the `event` tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplayEvent::PhaseChanged { .. } => "phase_changed",
            ReplayEvent::Outcome { .. } => "outcome",
            ReplayEvent::Summary { .. } => "summary",
        }
    }
}
