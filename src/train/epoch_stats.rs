use serde::{Serialize, Deserialize};

/// Per-epoch training statistics emitted by `train_loop`.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, the training
/// loop sends one `EpochStats` value at the end of every completed epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// MSE over the epoch's (shuffled) training data after the last update.
    pub loss: f64,
    /// R² over the same data.
    pub r2: f64,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}

/// Loss and R² recorded after every epoch, in epoch order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingHistory {
    pub loss: Vec<f64>,
    pub r2: Vec<f64>,
}

impl TrainingHistory {
    pub fn with_capacity(epochs: usize) -> Self {
        TrainingHistory {
            loss: Vec::with_capacity(epochs),
            r2: Vec::with_capacity(epochs),
        }
    }

    pub fn push(&mut self, loss: f64, r2: f64) {
        self.loss.push(loss);
        self.r2.push(r2);
    }

    pub fn len(&self) -> usize {
        self.loss.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loss.is_empty()
    }

    /// Loss and R² of the final epoch.
    pub fn last(&self) -> Option<(f64, f64)> {
        self.loss.last().copied().zip(self.r2.last().copied())
    }

    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.loss, self.r2)
    }
}
