//! Seeded realism noise for reported speeds.
//!
//! The speed estimator is deterministic. Consumers that want the reported
//! number to wobble between attempts inject a [`SeededJitter`] explicitly;
//! equal seeds reproduce equal sequences.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::JitterConfig;
use crate::speed::SpeedModel;

/// Uniform offset source bounded by a speed model.
#[derive(Debug, Clone)]
pub struct SeededJitter {
    rng: StdRng,
    amplitude: f64,
    bounds: SpeedModel,
}

impl SeededJitter {
    /// Offsets are drawn from `[-amplitude / 2, amplitude / 2)`.
    pub fn new(seed: u64, amplitude: f64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            amplitude: amplitude.max(0.0),
            bounds: SpeedModel::default(),
        }
    }

    pub fn from_config(config: &JitterConfig) -> Self {
        Self::new(config.seed, config.amplitude)
    }

    /// Keep jittered speeds inside the bounds of `model`.
    pub fn with_bounds(mut self, model: &SpeedModel) -> Self {
        self.bounds = model.clone();
        self
    }

    /// Apply one offset, re-clamped and rounded to one decimal.
    pub fn apply(&mut self, speed: f64) -> f64 {
        let offset = (self.rng.random::<f64>() - 0.5) * self.amplitude;
        self.bounds.bound(speed + offset)
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }
}
