use std::sync::mpsc;

use crate::error::{RegressionError, Result};
use crate::train::epoch_stats::EpochStats;

/// Configuration for an `MlpRegressor::fit` run.
///
/// # Fields
/// - `epochs`        — total number of full passes over the training data
/// - `learning_rate` — step size of each gradient-descent update
/// - `batch_size`    — rows per mini-batch; the last batch may be shorter
/// - `progress_tx`   — optional channel sender; one `EpochStats` is sent per
///                     completed epoch. A dropped receiver is logged and
///                     otherwise ignored.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub epochs: usize,
    pub learning_rate: f64,
    pub batch_size: usize,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
}

impl TrainConfig {
    /// Creates a `TrainConfig` with no progress channel.
    pub fn new(epochs: usize, learning_rate: f64, batch_size: usize) -> Self {
        TrainConfig {
            epochs,
            learning_rate,
            batch_size,
            progress_tx: None,
        }
    }

    pub fn with_progress(mut self, tx: mpsc::Sender<EpochStats>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(RegressionError::InvalidConfiguration(
                "batch_size must be at least 1".to_string(),
            ));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(RegressionError::InvalidConfiguration(format!(
                "learning_rate must be finite and positive, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig::new(100, 1e-3, 32)
    }
}
