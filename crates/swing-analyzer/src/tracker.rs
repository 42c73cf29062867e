//! State machine that turns window statistics into swing phases.
//!
//! Only three scalars survive between ticks: the phase, the timestamp the
//! tracker armed at, and the peak intensity seen so far.
//!
//! # State Machine
//!
//! ```text
//!               mean > swing_threshold
//! ┌──────┐   (armed_at = sample.timestamp)   ┌───────┐
//! │ Idle │──────────────────────────────────►│ Armed │
//! └──────┘                                   └───────┘
//!                                                │
//!      max > peak_threshold && mean < swing_threshold * settle_ratio
//!                 (speed = estimate(peak, now - armed_at))
//!                                                ▼
//!                                          ┌──────────┐
//!                                          │ Detected │  (until reset)
//!                                          └──────────┘
//! ```
//!
//! Nothing is evaluated until the window holds `min_samples` samples.

use serde::{Deserialize, Serialize};
use swing_models::{DetectionResult, MotionSample, SwingPhase};
use tracing::{debug, info, warn};

use crate::config::DetectorConfig;
use crate::metrics;
use crate::window::FrameWindow;

/// Tracker state carried across ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct TrackerState {
    pub phase: SwingPhase,
    /// Timestamp of the sample that armed the tracker
    pub armed_at: Option<i64>,
    /// Highest windowed max seen since the window first qualified
    pub peak_intensity: f64,
}

impl TrackerState {
    pub fn is_detected(&self) -> bool {
        self.phase == SwingPhase::Detected
    }
}

/// Advance the tracker by one sample.
///
/// `window` must already contain `sample`. Returns the next state and the
/// result for this tick; the input state is never modified in place.
pub fn advance(
    state: TrackerState,
    window: &FrameWindow,
    sample: &MotionSample,
    config: &DetectorConfig,
) -> (TrackerState, DetectionResult) {
    if window.len() < config.min_samples {
        return (state, DetectionResult::none());
    }

    let stats = match window.recent_stats(config.analysis_window) {
        Some(stats) => stats,
        None => return (state, DetectionResult::none()),
    };

    let mut next = state;
    next.peak_intensity = next.peak_intensity.max(stats.max);

    match next.phase {
        SwingPhase::Idle => {
            if stats.mean > config.swing_threshold {
                next.phase = SwingPhase::Armed;
                next.armed_at = Some(sample.timestamp);
                debug!(
                    timestamp = sample.timestamp,
                    mean = format!("{:.3}", stats.mean),
                    "Swing armed"
                );
            }
            (next, DetectionResult::none())
        }

        SwingPhase::Armed => {
            let peaked = stats.max > config.peak_threshold;
            let settled = stats.mean < config.settle_threshold();

            let armed_at = match next.armed_at {
                Some(ts) if peaked && settled => ts,
                _ => return (next, DetectionResult::none()),
            };

            let duration_ms = match sample.timestamp.checked_sub(armed_at) {
                Some(ms) if ms > 0 => ms,
                _ => {
                    // Out-of-order timestamp; try again on a later tick
                    warn!(
                        timestamp = sample.timestamp,
                        armed_at,
                        "Deferring swing detection: non-positive duration"
                    );
                    metrics::record_detection_deferred();
                    return (next, DetectionResult::none());
                }
            };

            let speed = config.speed.estimate(next.peak_intensity, duration_ms);
            next.phase = SwingPhase::Detected;

            info!(
                speed,
                duration_ms,
                peak = format!("{:.3}", next.peak_intensity),
                "Swing detected"
            );
            (next, DetectionResult::detected(speed))
        }

        SwingPhase::Detected => (next, DetectionResult::none()),
    }
}
