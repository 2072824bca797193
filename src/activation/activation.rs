use serde::{Serialize, Deserialize};
use std::f64::consts::E;
use std::fmt;
use std::str::FromStr;

use crate::error::RegressionError;
use crate::math::matrix::Matrix;

/// Hidden-layer non-linearity of an `MlpRegressor`.
///
/// Each variant is a (function, derivative) pair evaluated element-wise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationFunction {
    Identity,
    Sigmoid,
    Tanh,
    ReLU,
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Identity => x,
            ActivationFunction::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
        }
    }

    /// Element-wise derivative, evaluated at the pre-activation `x`.
    ///
    /// ReLU uses the subgradient 0 at exactly `x == 0`.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Identity => 1.0,
            ActivationFunction::Sigmoid => {
                let fx = self.function(x);
                fx * (1.0 - fx)
            },
            ActivationFunction::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            ActivationFunction::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
        }
    }

    pub fn apply(&self, z: &Matrix) -> Matrix {
        z.map(|x| self.function(x))
    }

    pub fn derive(&self, z: &Matrix) -> Matrix {
        z.map(|x| self.derivative(x))
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActivationFunction::Identity => "identity",
            ActivationFunction::Sigmoid => "sigmoid",
            ActivationFunction::Tanh => "tanh",
            ActivationFunction::ReLU => "relu",
        }
    }
}

impl fmt::Display for ActivationFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActivationFunction {
    type Err = RegressionError;

    /// Case-insensitive; anything outside the four known names is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "identity" => Ok(ActivationFunction::Identity),
            "sigmoid" => Ok(ActivationFunction::Sigmoid),
            "tanh" => Ok(ActivationFunction::Tanh),
            "relu" => Ok(ActivationFunction::ReLU),
            other => Err(RegressionError::InvalidConfiguration(format!(
                "unknown activation '{other}', expected one of identity, sigmoid, tanh, relu"
            ))),
        }
    }
}
