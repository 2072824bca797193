use std::fmt;

/// The result type used across the crate.
pub type Result<T> = std::result::Result<T, RegressionError>;

/// Errors produced while fitting or querying a regressor.
#[derive(Debug, Clone, PartialEq)]
pub enum RegressionError {
    /// A shape invariant was violated (e.g. X and y row counts differ).
    ShapeMismatch {
        /// Which dimension was being checked, e.g. "feature columns".
        what: &'static str,
        got: usize,
        expected: usize,
    },
    /// The normal equations have no unique solution.
    SingularMatrix,
    /// The target has zero variance, so R² is undefined.
    DegenerateTarget,
    /// `predict`, `score` or `evaluate` was called before a successful `fit`.
    UnfittedModel,
    /// A hyperparameter or activation name was rejected.
    InvalidConfiguration(String),
    /// Training produced a non-finite loss at the given 1-based epoch.
    NumericalDivergence { epoch: usize },
}

impl fmt::Display for RegressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegressionError::ShapeMismatch { what, got, expected } => {
                write!(f, "shape mismatch for {what}: got {got}, expected {expected}")
            }
            RegressionError::SingularMatrix => {
                write!(f, "normal equations are singular (collinear or too few samples)")
            }
            RegressionError::DegenerateTarget => {
                write!(f, "target has zero variance, R² is undefined")
            }
            RegressionError::UnfittedModel => write!(f, "model has not been fitted"),
            RegressionError::InvalidConfiguration(msg) => {
                write!(f, "invalid configuration: {msg}")
            }
            RegressionError::NumericalDivergence { epoch } => {
                write!(f, "training diverged: non-finite loss at epoch {epoch}")
            }
        }
    }
}

impl std::error::Error for RegressionError {}

/// Checks that `got == expected`, naming the dimension on failure.
pub(crate) fn ensure_len(what: &'static str, got: usize, expected: usize) -> Result<()> {
    if got == expected {
        Ok(())
    } else {
        Err(RegressionError::ShapeMismatch { what, got, expected })
    }
}
