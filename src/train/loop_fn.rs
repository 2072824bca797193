use std::time::Instant;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{RegressionError, Result};
use crate::loss::r2::regression_scores;
use crate::math::matrix::Matrix;
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::epoch_stats::{EpochStats, TrainingHistory};
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` for `config.epochs` epochs of mini-batch gradient descent
/// and returns the per-epoch loss and R² history.
///
/// Every epoch draws a fresh permutation of the rows from `rng`, steps through
/// consecutive batches of at most `config.batch_size` rows, and then scores
/// the network on that epoch's shuffled data.
///
/// # Errors
/// `NumericalDivergence` if an epoch ends with a non-finite loss or
/// non-finite parameters. Shapes and config are assumed validated by the caller.
pub fn train_loop<R: Rng + ?Sized>(
    network: &mut Network,
    inputs: &Matrix,
    targets: &[f64],
    config: &TrainConfig,
    rng: &mut R,
) -> Result<TrainingHistory> {
    let optimizer = Sgd::new(config.learning_rate);
    let mut history = TrainingHistory::with_capacity(config.epochs);
    let mut progress = config.progress_tx.as_ref();

    let mut x = inputs.clone();
    let mut y = targets.to_vec();

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();

        (x, y) = shuffle_pairs(&x, &y, rng);
        run_one_epoch(network, &x, &y, &optimizer, config.batch_size);

        let predictions = network.forward(&x).column_values(0);
        let (loss, r2) = regression_scores(&predictions, &y)?;
        if !loss.is_finite() || !network.is_finite() {
            return Err(RegressionError::NumericalDivergence { epoch });
        }
        history.push(loss, r2);

        let elapsed_ms = t_start.elapsed().as_millis() as u64;
        log::debug!("epoch {epoch}/{}: loss={loss:.6} r2={r2:.6} ({elapsed_ms} ms)", config.epochs);

        if let Some(tx) = progress {
            let stats = EpochStats {
                epoch,
                total_epochs: config.epochs,
                loss,
                r2,
                elapsed_ms,
            };
            if tx.send(stats).is_err() {
                log::warn!("progress receiver dropped at epoch {epoch}; training continues");
                progress = None;
            }
        }
    }

    Ok(history)
}

/// Applies one random permutation to the rows of `x` and the entries of `y`,
/// keeping every (row, target) pair together.
pub fn shuffle_pairs<R: Rng + ?Sized>(x: &Matrix, y: &[f64], rng: &mut R) -> (Matrix, Vec<f64>) {
    let mut indices: Vec<usize> = (0..y.len()).collect();
    indices.shuffle(rng);
    let shuffled_y = indices.iter().map(|&i| y[i]).collect();
    (x.select_rows(&indices), shuffled_y)
}

/// Consecutive `(start, end)` row ranges of at most `batch_size` rows.
pub fn batch_bounds(n: usize, batch_size: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).step_by(batch_size).map(move |start| (start, (start + batch_size).min(n)))
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// One pass of gradient-descent steps over already-shuffled data.
fn run_one_epoch(
    network: &mut Network,
    x: &Matrix,
    y: &[f64],
    optimizer: &Sgd,
    batch_size: usize,
) {
    for (start, end) in batch_bounds(y.len(), batch_size) {
        let x_batch = x.slice_rows(start, end);
        let y_batch = Matrix::column(y[start..end].to_vec());
        network.train_step(&x_batch, &y_batch, optimizer);
    }
}
