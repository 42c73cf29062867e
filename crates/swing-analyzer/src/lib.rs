//! Motion-sample stream analyzer for swing detection.
//!
//! This crate provides:
//! - A bounded sliding window of recent motion samples
//! - A swing phase tracker (idle → armed → detected)
//! - A deterministic speed estimator
//! - A detector facade over an explicit, serializable state
//! - A clock-free session driver (countdown, detection window, timeout)
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ MotionSample │───►│ FrameWindow  │───►│ Phase Tracker│
//! │ (ts, 0..1)   │    │ (last 60)    │    │ (mean / max) │
//! └──────────────┘    └──────────────┘    └──────┬───────┘
//!                                                │ detected
//!                                                ▼
//!                     ┌──────────────┐    ┌──────────────┐
//!                     │ SwingSession │◄───│ SpeedModel   │
//!                     │ (outcome)    │    │ (peak, dur)  │
//!                     └──────────────┘    └──────────────┘
//! ```
//!
//! Processing is synchronous and allocation-free in steady state; one
//! detector belongs to one session and is driven from a single thread.

pub mod config;
pub mod detector;
pub mod error;
pub mod jitter;
pub mod metrics;
pub mod session;
pub mod speed;
pub mod tracker;
pub mod window;


pub use config::{DetectorConfig, JitterConfig, SessionConfig};
pub use detector::{step, step_mut, AnalyzerState, SwingDetector};
pub use error::{AnalyzerError, AnalyzerResult};
pub use jitter::SeededJitter;
pub use session::SwingSession;
pub use speed::{estimate_speed, SpeedModel};
pub use tracker::{advance, TrackerState};
pub use window::{FrameWindow, WindowStats, DEFAULT_WINDOW_CAPACITY};
