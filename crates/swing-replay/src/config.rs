//! Replay configuration.

use serde::Serialize;
use swing_analyzer::{DetectorConfig, JitterConfig, SessionConfig};

use crate::error::{ReplayError, ReplayResult};

/// Replay configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayConfig {
    /// Detector tuning
    pub detector: DetectorConfig,
    /// Countdown, timeout and jitter policy
    pub session: SessionConfig,
    /// Seed for synthetic sources and jitter
    pub seed: u64,
    /// Frame spacing for synthetic sources (ms)
    pub frame_interval_ms: i64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            detector: DetectorConfig::default(),
            session: SessionConfig::default(),
            seed: 0,
            frame_interval_ms: 33, // ~30 fps
        }
    }
}

impl ReplayConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup.
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let detector_defaults = &defaults.detector;
        let session_defaults = &defaults.session;

        let detector = DetectorConfig {
            window_capacity: lookup("SWING_WINDOW_CAPACITY")
                .and_then(|s| s.parse().ok())
                .unwrap_or(detector_defaults.window_capacity),
            swing_threshold: lookup("SWING_THRESHOLD")
                .and_then(|s| s.parse().ok())
                .unwrap_or(detector_defaults.swing_threshold),
            peak_threshold: lookup("SWING_PEAK_THRESHOLD")
                .and_then(|s| s.parse().ok())
                .unwrap_or(detector_defaults.peak_threshold),
            ..detector_defaults.clone()
        };

        let seed = lookup("SWING_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.seed);

        let jitter = lookup("SWING_JITTER")
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|amplitude| *amplitude > 0.0)
            .map(|amplitude| JitterConfig { seed, amplitude });

        let session = SessionConfig {
            countdown_ms: lookup("SWING_COUNTDOWN_MS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(session_defaults.countdown_ms),
            detection_timeout_ms: lookup("SWING_TIMEOUT_MS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(session_defaults.detection_timeout_ms),
            jitter,
        };

        Self {
            detector,
            session,
            seed,
            frame_interval_ms: lookup("SWING_FRAME_INTERVAL_MS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.frame_interval_ms),
        }
    }

    /// Set the seed, carrying it over to any configured jitter.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        if let Some(jitter) = self.session.jitter.as_mut() {
            jitter.seed = seed;
        }
        self
    }

    /// Enable jitter with the current seed; an amplitude of 0 disables it.
    pub fn with_jitter(mut self, amplitude: f64) -> Self {
        self.session.jitter = if amplitude == 0.0 {
            None
        } else {
            Some(JitterConfig {
                seed: self.seed,
                amplitude,
            })
        };
        self
    }

    pub fn validate(&self) -> ReplayResult<()> {
        if self.frame_interval_ms <= 0 {
            return Err(ReplayError::config_error(
                "frame_interval_ms must be positive",
            ));
        }
        self.detector.validate()?;
        self.session.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = ReplayConfig::from_lookup(|_| None);
        assert_eq!(config.detector, DetectorConfig::default());
        assert_eq!(config.session, SessionConfig::default());
        assert_eq!(config.frame_interval_ms, 33);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let config = ReplayConfig::from_lookup(lookup_from(&[
            ("SWING_WINDOW_CAPACITY", "90"),
            ("SWING_THRESHOLD", "0.2"),
            ("SWING_COUNTDOWN_MS", "0"),
            ("SWING_TIMEOUT_MS", "3000"),
            ("SWING_SEED", "17"),
            ("SWING_JITTER", "8"),
        ]));

        assert_eq!(config.detector.window_capacity, 90);
        assert!((config.detector.swing_threshold - 0.2).abs() < f64::EPSILON);
        assert_eq!(config.session.countdown_ms, 0);
        assert_eq!(config.session.detection_timeout_ms, 3_000);
        assert_eq!(
            config.session.jitter,
            Some(JitterConfig {
                seed: 17,
                amplitude: 8.0
            })
        );
    }

    #[test]
    fn test_unparsable_values_fall_back() {
        let config = ReplayConfig::from_lookup(lookup_from(&[
            ("SWING_TIMEOUT_MS", "ten seconds"),
            ("SWING_JITTER", "-3"),
        ]));
        assert_eq!(config.session.detection_timeout_ms, 10_000);
        assert!(config.session.jitter.is_none());
    }

    #[test]
    fn test_seed_follows_into_jitter() {
        let config = ReplayConfig::default().with_jitter(10.0).with_seed(5);
        assert_eq!(config.session.jitter.map(|j| j.seed), Some(5));

        let disabled = config.with_jitter(0.0);
        assert!(disabled.session.jitter.is_none());
    }

    #[test]
    fn test_validate_reports_analyzer_errors() {
        let mut config = ReplayConfig::default();
        config.detector.window_capacity = 2;
        assert!(matches!(config.validate(), Err(ReplayError::Analyzer(_))));

        let mut config = ReplayConfig::default();
        config.frame_interval_ms = 0;
        assert!(matches!(config.validate(), Err(ReplayError::ConfigError(_))));
    }
}
