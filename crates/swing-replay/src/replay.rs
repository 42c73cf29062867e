//! Drive a swing session from a sample source and emit JSON-lines events.
//!
//! The session starts at the first sample's timestamp. Reading stops as
//! soon as the session completes; if the input ends first, the summary
//! carries no outcome.

use std::io::Write;
use swing_analyzer::SwingSession;
use swing_models::{ReplayEvent, SessionId, SessionPhase, SwingOutcome};

use crate::config::ReplayConfig;
use crate::error::{ReplayError, ReplayResult};
use crate::logging::SessionLogger;
use crate::source::SampleSource;

/// Totals for one replay.
#[derive(Debug, Clone)]
pub struct ReplaySummary {
    pub session_id: SessionId,
    pub samples_read: u64,
    pub samples_clamped: u64,
    pub outcome: Option<SwingOutcome>,
}

/// Replays samples through a [`SwingSession`], writing one event per line.
pub struct Replayer<W: Write> {
    session: SwingSession,
    out: W,
    last_phase: SessionPhase,
    samples_read: u64,
    samples_clamped: u64,
}

impl<W: Write> Replayer<W> {
    pub fn new(config: &ReplayConfig, out: W) -> ReplayResult<Self> {
        config.validate()?;
        let session = SwingSession::new(config.detector.clone(), config.session.clone())?;

        Ok(Self {
            session,
            out,
            last_phase: SessionPhase::Idle,
            samples_read: 0,
            samples_clamped: 0,
        })
    }

    /// Use a caller-provided session ID.
    pub fn with_session_id(mut self, id: SessionId) -> Self {
        self.session = self.session.with_id(id);
        self
    }

    /// Consume `source` until the session completes or the input ends.
    pub fn run<S: SampleSource + ?Sized>(mut self, source: &mut S) -> ReplayResult<ReplaySummary> {
        let logger = SessionLogger::new(self.session.id(), &source.describe());
        let span = logger.create_span();
        let _guard = span.enter();

        let mut outcome = None;
        while let Some(sample) = source.next_sample()? {
            if self.samples_read == 0 {
                logger.log_start(sample.timestamp);
                self.session.start(sample.timestamp);
                self.emit_phase_change(&logger, sample.timestamp)?;
            }

            self.samples_read += 1;
            if !sample.is_in_range() {
                self.samples_clamped += 1;
            }

            let completed = self.session.ingest(sample);
            self.emit_phase_change(&logger, sample.timestamp)?;

            if let Some(result) = completed {
                logger.log_outcome(&result);
                self.emit(&ReplayEvent::outcome(self.session.id(), result))?;
                outcome = Some(result);
                break;
            }
        }

        if self.samples_read == 0 {
            logger.log_warning("source produced no samples");
        } else if outcome.is_none() {
            logger.log_warning("input ended before the session completed");
        }

        let summary = ReplaySummary {
            session_id: self.session.id().clone(),
            samples_read: self.samples_read,
            samples_clamped: self.samples_clamped,
            outcome,
        };
        self.emit(&ReplayEvent::summary(
            &summary.session_id,
            summary.samples_read,
            summary.samples_clamped,
            summary.outcome,
        ))?;

        Ok(summary)
    }

    fn emit_phase_change(&mut self, logger: &SessionLogger, at: i64) -> ReplayResult<()> {
        let phase = self.session.phase();
        if phase == self.last_phase {
            return Ok(());
        }
        self.last_phase = phase;
        logger.log_phase(phase, at);
        self.emit(&ReplayEvent::phase_changed(self.session.id(), phase, at))
    }

    fn emit(&mut self, event: &ReplayEvent) -> ReplayResult<()> {
        serde_json::to_writer(&mut self.out, event).map_err(ReplayError::Emit)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{JsonLinesSource, SyntheticSource};
    use std::io::Cursor;
    use swing_models::OutcomeReason;

    fn events(buf: &[u8]) -> Vec<serde_json::Value> {
        std::str::from_utf8(buf)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_synthetic_swing_replay() {
        let config = ReplayConfig::default();
        let lead_in = (config.session.countdown_ms / config.frame_interval_ms) as usize + 30;
        let mut source = SyntheticSource::swing(3, 1_000, config.frame_interval_ms, lead_in);

        let mut out = Vec::new();
        let summary = Replayer::new(&config, &mut out)
            .unwrap()
            .with_session_id(SessionId::from_string("replay-1"))
            .run(&mut source)
            .unwrap();

        let outcome = summary.outcome.expect("swing detected");
        assert_eq!(outcome.reason, OutcomeReason::Detected);
        assert!((30.0..=130.0).contains(&outcome.speed));
        // Stops reading once the session completes
        assert!(source.remaining() > 0);

        let events = events(&out);
        let names: Vec<&str> = events.iter().map(|e| e["event"].as_str().unwrap()).collect();
        assert_eq!(
            names,
            vec!["phase_changed", "phase_changed", "phase_changed", "outcome", "summary"]
        );
        assert_eq!(events[0]["phase"], "countdown");
        assert_eq!(events[1]["phase"], "detecting");
        // First frame at or past the 5s countdown
        assert_eq!(events[1]["at"], 6_016);
        assert_eq!(events[2]["phase"], "completed");
        assert_eq!(events[4]["session_id"], "replay-1");
    }

    #[test]
    fn test_noise_replay_times_out() {
        let mut config = ReplayConfig::default();
        config.session.countdown_ms = 0;
        config.session.detection_timeout_ms = 2_000;
        // Noise stays below 0.3, so no window can ever peak
        config.detector.peak_threshold = 0.3;
        let mut source = SyntheticSource::noise(1, 0, 33, 200);

        let mut out = Vec::new();
        let summary = Replayer::new(&config, &mut out)
            .unwrap()
            .run(&mut source)
            .unwrap();

        let outcome = summary.outcome.expect("session completes within 200 frames");
        assert_eq!(outcome.reason, OutcomeReason::TimedOut);
        assert_eq!(outcome.speed, 0.0);
        // First frame at or past 2s
        assert_eq!(outcome.completed_at, 61 * 33);
        assert_eq!(summary.samples_read, 62);
        assert!(source.remaining() > 0);
    }

    #[test]
    fn test_input_ending_early_has_no_outcome() {
        let input = "{\"timestamp\": 0, \"intensity\": 0.01}\n{\"timestamp\": 33, \"intensity\": 1.5}\n";
        let mut source = JsonLinesSource::new(Cursor::new(input), "inline");

        let mut out = Vec::new();
        let summary = Replayer::new(&ReplayConfig::default(), &mut out)
            .unwrap()
            .run(&mut source)
            .unwrap();

        assert_eq!(summary.samples_read, 2);
        assert_eq!(summary.samples_clamped, 1);
        assert!(summary.outcome.is_none());

        let events = events(&out);
        let last = events.last().unwrap();
        assert_eq!(last["event"], "summary");
        assert!(last.get("outcome").is_none());
    }

    #[test]
    fn test_empty_source() {
        let mut source = JsonLinesSource::new(Cursor::new(""), "empty");
        let mut out = Vec::new();
        let summary = Replayer::new(&ReplayConfig::default(), &mut out)
            .unwrap()
            .run(&mut source)
            .unwrap();

        assert_eq!(summary.samples_read, 0);
        assert_eq!(events(&out).len(), 1);
    }

    #[test]
    fn test_parse_error_propagates() {
        let mut source = JsonLinesSource::new(Cursor::new("not json\n"), "bad");
        let mut out = Vec::new();
        let err = Replayer::new(&ReplayConfig::default(), &mut out)
            .unwrap()
            .run(&mut source)
            .unwrap_err();
        assert_eq!(err.line(), Some(1));
    }
}
