pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod loss;
pub mod optim;
pub mod train;
pub mod network;
pub mod linear;

// Convenience re-exports
pub use error::{RegressionError, Result};
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use linear::regressor::{LinearParameters, LinearRegression};
pub use network::mlp::MlpRegressor;
pub use network::network::Network;
pub use optim::sgd::Sgd;
pub use train::{EpochStats, TrainConfig, TrainingHistory};
