//! Bounded sliding window of recent motion samples.
//!
//! Stores the most recent samples in chronological order (oldest first).
//! Pushing into a full window evicts exactly one sample, the oldest.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use swing_models::MotionSample;

/// Default window capacity: ~2 seconds at 30 fps.
pub const DEFAULT_WINDOW_CAPACITY: usize = 60;

/// Intensity statistics over a run of samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStats {
    /// Number of samples the statistics cover
    pub count: usize,
    /// Arithmetic mean intensity
    pub mean: f64,
    /// Maximum intensity
    pub max: f64,
}

/// Fixed-capacity FIFO of recent samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameWindow {
    capacity: usize,
    samples: VecDeque<MotionSample>,
}

impl FrameWindow {
    /// Create an empty window holding at most `capacity` samples (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a sample, returning the evicted one if the window was full.
    pub fn push(&mut self, sample: MotionSample) -> Option<MotionSample> {
        let evicted = if self.samples.len() >= self.capacity {
            self.samples.pop_front()
        } else {
            None
        };
        self.samples.push_back(sample);
        evicted
    }

    /// The most recent `k` samples in chronological order.
    ///
    /// Yields fewer than `k` when the window holds fewer.
    pub fn last_n(&self, k: usize) -> std::collections::vec_deque::Iter<'_, MotionSample> {
        let start = self.samples.len().saturating_sub(k);
        self.samples.range(start..)
    }

    /// All samples, oldest first.
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, MotionSample> {
        self.samples.iter()
    }

    /// Most recently pushed sample.
    pub fn latest(&self) -> Option<&MotionSample> {
        self.samples.back()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.samples.len() >= self.capacity
    }

    /// Drop all samples; capacity is kept.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Mean intensity over the whole window, 0 when empty.
    pub fn mean_intensity(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.samples.iter().map(|s| s.intensity).sum();
        sum / self.samples.len() as f64
    }

    /// Mean and max over the most recent `k` samples.
    ///
    /// Returns `None` when there is nothing to summarize.
    pub fn recent_stats(&self, k: usize) -> Option<WindowStats> {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut max = f64::MIN;

        for sample in self.last_n(k) {
            count += 1;
            sum += sample.intensity;
            max = max.max(sample.intensity);
        }

        if count == 0 {
            return None;
        }

        Some(WindowStats {
            count,
            mean: sum / count as f64,
            max,
        })
    }
}

impl Default for FrameWindow {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_WINDOW_CAPACITY)
    }
}
