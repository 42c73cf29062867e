//! Tracing setup and structured session logging.
//!
//! Events go to stdout, so all logs are written to stderr.

use swing_models::{SessionId, SessionPhase, SwingOutcome};
use tracing::{info, warn, Span};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_DIRECTIVES: &str = "swing_analyzer=info,swing_replay=info";

/// Initialize tracing with colored output for dev, JSON when `LOG_FORMAT=json`.
pub fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}

/// Session logger for structured logging with consistent fields.
#[derive(Debug, Clone)]
pub struct SessionLogger {
    session_id: String,
    source: String,
}

impl SessionLogger {
    /// Create a logger for a session reading from `source`.
    ///
    /// # Arguments
    /// * `session_id` - The session being replayed
    /// * `source` - Human-readable description of the sample source
    pub fn new(session_id: &SessionId, source: &str) -> Self {
        Self {
            session_id: session_id.to_string(),
            source: source.to_string(),
        }
    }

    pub fn log_start(&self, first_timestamp: i64) {
        info!(
            session_id = %self.session_id,
            source = %self.source,
            first_timestamp,
            "Replay started"
        );
    }

    pub fn log_phase(&self, phase: SessionPhase, at: i64) {
        info!(
            session_id = %self.session_id,
            phase = %phase,
            at,
            "Session phase changed"
        );
    }

    pub fn log_outcome(&self, outcome: &SwingOutcome) {
        info!(
            session_id = %self.session_id,
            reason = %outcome.reason,
            speed = outcome.speed,
            peak = format!("{:.3}", outcome.peak_intensity),
            "Replay outcome"
        );
    }

    pub fn log_warning(&self, message: &str) {
        warn!(
            session_id = %self.session_id,
            source = %self.source,
            "Replay warning: {}", message
        );
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Create a tracing span covering the replay of this session.
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "replay",
            session_id = %self.session_id,
            source = %self.source
        )
    }
}
