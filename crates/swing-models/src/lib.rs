//! Shared data models for the swing motion analyzer.
//!
//! This crate provides Serde-serializable types for:
//! - Motion samples delivered by the sensor pipeline
//! - Per-frame detection results and swing phases
//! - Session phases and outcomes
//! - JSON-lines replay event schemas

pub mod detection;
pub mod event;
pub mod sample;
pub mod session;

// Re-export common types
pub use detection::{DetectionResult, SwingPhase, SwingPhaseParseError};
pub use event::ReplayEvent;
pub use sample::MotionSample;
pub use session::{OutcomeReason, SessionId, SessionPhase, SwingOutcome};
