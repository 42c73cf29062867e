//! Swing session replay.
//!
//! This crate provides:
//! - Sample sources (JSON-lines files, seeded synthetic streams)
//! - A replay driver emitting JSON-lines session events
//! - Environment-driven configuration and tracing setup

pub mod config;
pub mod error;
pub mod logging;
pub mod replay;
pub mod source;

pub use config::ReplayConfig;
pub use error::{ReplayError, ReplayResult};
pub use logging::SessionLogger;
pub use replay::{ReplaySummary, Replayer};
pub use source::{JsonLinesSource, SampleSource, SyntheticSource};
