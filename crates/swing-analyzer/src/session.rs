//! Countdown → detecting → completed policy around a [`SwingDetector`].
//!
//! The session owns no timers. Time only advances through the timestamps of
//! ingested samples or explicit [`SwingSession::tick`] calls, so a whole
//! attempt can be replayed deterministically.
//!
//! When the detection window elapses without a swing the session completes
//! with a zero speed and the estimator is not consulted. The detector is
//! reset when the next detection window opens, not at timeout.

use swing_models::{MotionSample, SessionId, SessionPhase, SwingOutcome};
use tracing::{debug, info};

use crate::config::{DetectorConfig, SessionConfig};
use crate::detector::SwingDetector;
use crate::error::AnalyzerResult;
use crate::jitter::SeededJitter;
use crate::metrics;

/// One swing attempt (and its retries) driven by sample time.
#[derive(Debug)]
pub struct SwingSession {
    id: SessionId,
    config: SessionConfig,
    detector: SwingDetector,
    jitter: Option<SeededJitter>,
    phase: SessionPhase,
    countdown_ends_at: i64,
    detecting_since: i64,
    outcome: Option<SwingOutcome>,
}

impl SwingSession {
    pub fn new(detector_config: DetectorConfig, config: SessionConfig) -> AnalyzerResult<Self> {
        config.validate()?;
        let jitter = config
            .jitter
            .as_ref()
            .map(|j| SeededJitter::from_config(j).with_bounds(&detector_config.speed));
        let detector = SwingDetector::with_config(detector_config)?;

        Ok(Self {
            id: SessionId::new(),
            config,
            detector,
            jitter,
            phase: SessionPhase::Idle,
            countdown_ends_at: 0,
            detecting_since: 0,
            outcome: None,
        })
    }

    /// Use a caller-provided session ID.
    pub fn with_id(mut self, id: SessionId) -> Self {
        self.id = id;
        self
    }

    /// Begin the countdown at `at_ms`.
    ///
    /// Restarts the attempt if one is already in progress.
    pub fn start(&mut self, at_ms: i64) {
        self.outcome = None;
        self.countdown_ends_at = at_ms.saturating_add(self.config.countdown_ms);
        self.phase = SessionPhase::Countdown;
        metrics::record_session_started();

        info!(
            session_id = %self.id,
            countdown_ms = self.config.countdown_ms,
            "Session countdown started"
        );
    }

    /// Start a fresh attempt after a completed (or abandoned) one.
    pub fn retry(&mut self, at_ms: i64) {
        self.detector.reset();
        self.start(at_ms);
    }

    /// Advance sample time without a frame.
    ///
    /// Opens the detection window once the countdown has elapsed and
    /// completes with a timeout once the window has been open for
    /// `detection_timeout_ms`. Returns the outcome on the tick that
    /// completes the session.
    pub fn tick(&mut self, now_ms: i64) -> Option<SwingOutcome> {
        if self.phase == SessionPhase::Countdown && now_ms >= self.countdown_ends_at {
            self.open_detection(self.countdown_ends_at);
        }

        if self.phase == SessionPhase::Detecting
            && now_ms.saturating_sub(self.detecting_since) >= self.config.detection_timeout_ms
        {
            let outcome = SwingOutcome::timed_out(self.detector.peak_motion(), now_ms);
            return Some(self.complete(outcome));
        }

        None
    }

    /// Feed one frame. Frames outside the detection window are ignored.
    ///
    /// A timeout falling on the frame's timestamp wins over the frame.
    pub fn ingest(&mut self, sample: MotionSample) -> Option<SwingOutcome> {
        if let Some(outcome) = self.tick(sample.timestamp) {
            return Some(outcome);
        }
        if self.phase != SessionPhase::Detecting {
            return None;
        }

        let result = self.detector.process_frame(sample);
        if !result.swing_detected {
            return None;
        }

        let speed = match self.jitter.as_mut() {
            Some(jitter) => jitter.apply(result.speed),
            None => result.speed,
        };
        let outcome = SwingOutcome::detected(speed, self.detector.peak_motion(), sample.timestamp);
        Some(self.complete(outcome))
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<&SwingOutcome> {
        self.outcome.as_ref()
    }

    pub fn detector(&self) -> &SwingDetector {
        &self.detector
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn open_detection(&mut self, at_ms: i64) {
        self.detector.reset();
        self.detecting_since = at_ms;
        self.phase = SessionPhase::Detecting;
        debug!(session_id = %self.id, at_ms, "Detection window opened");
    }

    fn complete(&mut self, outcome: SwingOutcome) -> SwingOutcome {
        self.phase = SessionPhase::Completed;
        self.outcome = Some(outcome);
        metrics::record_outcome(&outcome);

        info!(
            session_id = %self.id,
            reason = %outcome.reason,
            speed = outcome.speed,
            "Session completed"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swing_models::OutcomeReason;

    fn session(countdown_ms: i64, timeout_ms: i64) -> SwingSession {
        SwingSession::new(
            DetectorConfig::default(),
            SessionConfig::default()
                .with_countdown_ms(countdown_ms)
                .with_timeout_ms(timeout_ms),
        )
        .unwrap()
    }

    #[test]
    fn test_idle_until_started() {
        let mut session = session(0, 1_000);
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.ingest(MotionSample::new(0, 0.5)).is_none());
        assert_eq!(session.detector().sample_count(), 0);
    }

    #[test]
    fn test_countdown_ignores_frames() {
        let mut session = session(5_000, 10_000);
        session.start(0);

        for i in 0..100 {
            assert!(session.ingest(MotionSample::new(i * 33, 0.4)).is_none());
        }
        assert_eq!(session.phase(), SessionPhase::Countdown);
        assert_eq!(session.detector().sample_count(), 0);

        session.tick(5_000);
        assert_eq!(session.phase(), SessionPhase::Detecting);
    }

    #[test]
    fn test_timeout_reports_zero_speed() {
        let mut session = session(1_000, 10_000);
        session.start(0);

        let mut outcome = None;
        let mut t = 0;
        while outcome.is_none() && t < 20_000 {
            outcome = session.ingest(MotionSample::new(t, 0.01));
            t += 33;
        }

        let outcome = outcome.expect("session should time out");
        assert_eq!(outcome.reason, OutcomeReason::TimedOut);
        assert_eq!(outcome.speed, 0.0);
        assert!(outcome.completed_at >= 11_000);
        assert!(outcome.completed_at < 11_033);
        assert_eq!(session.phase(), SessionPhase::Completed);
    }

    #[test]
    fn test_tick_alone_can_time_out() {
        let mut session = session(0, 2_000);
        session.start(100);
        assert!(session.tick(1_000).is_none());
        assert_eq!(session.phase(), SessionPhase::Detecting);

        let outcome = session.tick(2_100).unwrap();
        assert_eq!(outcome.reason, OutcomeReason::TimedOut);
        assert!(session.tick(9_000).is_none());
    }

    #[test]
    fn test_completed_ignores_frames_and_retry_resets() {
        let mut session = session(0, 500);
        session.start(0);
        assert!(session.tick(500).is_some());

        assert!(session.ingest(MotionSample::new(600, 0.9)).is_none());
        assert_eq!(session.phase(), SessionPhase::Completed);
        assert!(session.outcome().is_some());

        session.retry(1_000);
        assert_eq!(session.phase(), SessionPhase::Countdown);
        assert!(session.outcome().is_none());
        assert_eq!(session.detector().sample_count(), 0);
    }

    #[test]
    fn test_invalid_session_config_rejected() {
        let result = SwingSession::new(
            DetectorConfig::default(),
            SessionConfig::default().with_timeout_ms(-5),
        );
        assert!(result.is_err());
    }
}
