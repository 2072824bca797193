use rand::Rng;

use crate::activation::activation::ActivationFunction;
use crate::error::{ensure_len, RegressionError, Result};
use crate::layers::dense::Layer;
use crate::loss::r2::{ensure_target_variance, regression_scores};
use crate::math::matrix::Matrix;
use crate::network::network::Network;
use crate::train::epoch_stats::TrainingHistory;
use crate::train::loop_fn::train_loop;
use crate::train::train_config::TrainConfig;

/// Feed-forward regressor trained by mini-batch gradient descent.
///
/// Hidden layers use the configured activation; the single output unit is
/// linear. Every `fit` starts from freshly initialized parameters.
///
/// Not thread-safe: `fit` takes `&mut self`, one fit in flight per instance.
#[derive(Debug, Clone)]
pub struct MlpRegressor {
    hidden_sizes: Vec<usize>,
    activation: ActivationFunction,
    network: Option<Network>,
}

impl MlpRegressor {
    /// Fails with `InvalidConfiguration` if any hidden width is zero.
    /// An empty `hidden_sizes` gives a single linear layer.
    pub fn new(hidden_sizes: Vec<usize>, activation: ActivationFunction) -> Result<Self> {
        if let Some(pos) = hidden_sizes.iter().position(|&units| units == 0) {
            return Err(RegressionError::InvalidConfiguration(format!(
                "hidden layer {pos} has zero units"
            )));
        }
        Ok(MlpRegressor {
            hidden_sizes,
            activation,
            network: None,
        })
    }

    pub fn hidden_sizes(&self) -> &[usize] {
        &self.hidden_sizes
    }

    pub fn activation(&self) -> ActivationFunction {
        self.activation
    }

    /// Input and output layers included.
    pub fn n_layers(&self) -> usize {
        self.hidden_sizes.len() + 2
    }

    pub fn is_fitted(&self) -> bool {
        self.network.is_some()
    }

    /// Fitted layers, input side first.
    pub fn layers(&self) -> Option<&[Layer]> {
        self.network.as_ref().map(|net| net.layers.as_slice())
    }

    pub fn n_features(&self) -> Option<usize> {
        self.network.as_ref().map(Network::input_size)
    }

    /// Reinitializes all parameters and trains on `(x, y)`.
    ///
    /// Returns the per-epoch loss and R² history. On error the previously
    /// fitted parameters (if any) are left untouched.
    pub fn fit<R: Rng + ?Sized>(
        &mut self,
        x: &Matrix,
        y: &[f64],
        config: &TrainConfig,
        rng: &mut R,
    ) -> Result<TrainingHistory> {
        config.validate()?;
        ensure_len("target rows", y.len(), x.rows)?;
        if x.cols == 0 {
            return Err(RegressionError::ShapeMismatch { what: "feature columns", got: 0, expected: 1 });
        }
        ensure_target_variance(y)?;

        let mut sizes = Vec::with_capacity(self.n_layers());
        sizes.push(x.cols);
        sizes.extend_from_slice(&self.hidden_sizes);
        sizes.push(1);

        let mut network = Network::new(&sizes, self.activation, rng);
        let history = train_loop(&mut network, x, y, config, rng)?;

        if let Some((loss, r2)) = history.last() {
            log::info!(
                "mlp fit: {} samples, layers {:?}, {} epochs, final loss={loss:.6} r2={r2:.6}",
                x.rows, sizes, config.epochs
            );
        }
        self.network = Some(network);
        Ok(history)
    }

    /// One prediction per row of `x`.
    pub fn predict(&self, x: &Matrix) -> Result<Vec<f64>> {
        let network = self.network.as_ref().ok_or(RegressionError::UnfittedModel)?;
        ensure_len("feature columns", x.cols, network.input_size())?;
        Ok(network.forward(x).column_values(0))
    }

    /// Returns `(mse, r2)` of the fitted model on `(x, y)`.
    pub fn evaluate(&self, x: &Matrix, y: &[f64]) -> Result<(f64, f64)> {
        let predictions = self.predict(x)?;
        regression_scores(&predictions, y)
    }
}

impl Default for MlpRegressor {
    /// One hidden layer of 10 ReLU units.
    fn default() -> Self {
        MlpRegressor {
            hidden_sizes: vec![10],
            activation: ActivationFunction::ReLU,
            network: None,
        }
    }
}
