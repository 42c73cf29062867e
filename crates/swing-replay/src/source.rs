//! Sample sources feeding the replay driver.
//!
//! Recorded sessions are JSON lines, one sample per line:
//!
//! ```text
//! {"timestamp": 1000, "intensity": 0.04}
//! {"timestamp": 1033, "intensity": 0.05}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use swing_models::MotionSample;

use crate::error::{ReplayError, ReplayResult};

/// Anything that yields motion samples in delivery order.
pub trait SampleSource {
    /// Next sample, or `None` when the source is exhausted.
    fn next_sample(&mut self) -> ReplayResult<Option<MotionSample>>;

    /// Short description used in logs.
    fn describe(&self) -> String;
}

/// JSON-lines reader over any buffered input.
pub struct JsonLinesSource<R> {
    reader: R,
    label: String,
    line: usize,
    buf: String,
}

impl JsonLinesSource<BufReader<File>> {
    /// Open a JSON-lines file.
    pub fn open(path: &Path) -> ReplayResult<Self> {
        let file = File::open(path)?;
        Ok(Self::new(
            BufReader::new(file),
            format!("file:{}", path.display()),
        ))
    }
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R, label: impl Into<String>) -> Self {
        Self {
            reader,
            label: label.into(),
            line: 0,
            buf: String::new(),
        }
    }

    /// Number of lines consumed so far.
    pub fn lines_read(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> SampleSource for JsonLinesSource<R> {
    fn next_sample(&mut self) -> ReplayResult<Option<MotionSample>> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            let trimmed = self.buf.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let sample = serde_json::from_str(trimmed).map_err(|source| ReplayError::Parse {
                line: self.line,
                source,
            })?;
            return Ok(Some(sample));
        }
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

/// Seeded generator of synthetic sample streams.
pub struct SyntheticSource {
    samples: std::vec::IntoIter<MotionSample>,
    label: &'static str,
}

impl SyntheticSource {
    /// Uniform noise in `[0, 0.3)`, the stand-in signal of a camera
    /// pipeline without real frame analysis.
    pub fn noise(seed: u64, start_ms: i64, interval_ms: i64, frames: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let samples = (0..frames)
            .map(|i| {
                MotionSample::new(
                    start_ms + i as i64 * interval_ms,
                    rng.random_range(0.0..0.3),
                )
            })
            .collect::<Vec<_>>();

        Self {
            samples: samples.into_iter(),
            label: "synthetic:noise",
        }
    }

    /// A single swing after `lead_in_frames` of near-stillness:
    /// rise, one peak frame, then settle.
    pub fn swing(seed: u64, start_ms: i64, interval_ms: i64, lead_in_frames: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut intensities = Vec::with_capacity(lead_in_frames + 40);

        for _ in 0..lead_in_frames {
            intensities.push(rng.random_range(0.0..0.04));
        }
        for _ in 0..12 {
            intensities.push(rng.random_range(0.18..0.22));
        }
        intensities.push(rng.random_range(0.30..0.36));
        for _ in 0..20 {
            intensities.push(rng.random_range(0.0..0.03));
        }

        let samples = intensities
            .into_iter()
            .enumerate()
            .map(|(i, intensity)| MotionSample::new(start_ms + i as i64 * interval_ms, intensity))
            .collect::<Vec<_>>();

        Self {
            samples: samples.into_iter(),
            label: "synthetic:swing",
        }
    }

    /// Samples not yet yielded.
    pub fn remaining(&self) -> usize {
        self.samples.len()
    }
}

impl SampleSource for SyntheticSource {
    fn next_sample(&mut self) -> ReplayResult<Option<MotionSample>> {
        Ok(self.samples.next())
    }

    fn describe(&self) -> String {
        self.label.to_string()
    }
}
