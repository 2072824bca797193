pub mod regressor;

pub use regressor::{LinearParameters, LinearRegression};
