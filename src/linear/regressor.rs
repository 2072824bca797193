use serde::{Serialize, Deserialize};

use crate::error::{ensure_len, RegressionError, Result};
use crate::loss::r2::{ensure_target_variance, regression_scores};
use crate::math::matrix::Matrix;
use crate::math::solve::solve_normal_equations;

/// Coefficients of a fitted linear model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearParameters {
    /// One coefficient per feature column.
    pub weights: Vec<f64>,
    /// Intercept; exactly 0.0 when the model was built without one.
    pub bias: f64,
}

/// Ordinary least squares solved in closed form through the normal
/// equations `(XᵀX) β = Xᵀy`.
///
/// Not thread-safe: `fit` takes `&mut self`, one fit in flight per instance.
#[derive(Debug, Clone)]
pub struct LinearRegression {
    fit_intercept: bool,
    params: Option<LinearParameters>,
}

impl LinearRegression {
    pub fn new(fit_intercept: bool) -> Self {
        LinearRegression { fit_intercept, params: None }
    }

    pub fn fit_intercept(&self) -> bool {
        self.fit_intercept
    }

    pub fn is_fitted(&self) -> bool {
        self.params.is_some()
    }

    pub fn params(&self) -> Option<&LinearParameters> {
        self.params.as_ref()
    }

    pub fn weights(&self) -> Option<&[f64]> {
        self.params.as_ref().map(|p| p.weights.as_slice())
    }

    pub fn bias(&self) -> Option<f64> {
        self.params.as_ref().map(|p| p.bias)
    }

    pub fn n_features(&self) -> Option<usize> {
        self.params.as_ref().map(|p| p.weights.len())
    }

    /// Fits the model and returns the training `(mse, r2)`.
    ///
    /// # Errors
    /// - `ShapeMismatch` if `y.len() != x.rows`
    /// - `DegenerateTarget` if `y` is constant
    /// - `SingularMatrix` if the columns of the design matrix are linearly
    ///   dependent (collinear features, more features than samples)
    ///
    /// A failed fit keeps whatever parameters the model had before.
    pub fn fit(&mut self, x: &Matrix, y: &[f64]) -> Result<(f64, f64)> {
        ensure_len("target rows", y.len(), x.rows)?;
        ensure_target_variance(y)?;

        let design = if self.fit_intercept { x.prepend_column(1.0) } else { x.clone() };
        let design_t = design.transpose();
        let gram = &design_t * &design;
        let moments = &design_t * &Matrix::column(y.to_vec());
        let beta = solve_normal_equations(&gram, &moments)?.column_values(0);

        let fitted = (&design * &Matrix::column(beta.clone())).column_values(0);
        let (loss, r2) = regression_scores(&fitted, y)?;

        let params = if self.fit_intercept {
            LinearParameters { bias: beta[0], weights: beta[1..].to_vec() }
        } else {
            LinearParameters { bias: 0.0, weights: beta }
        };
        log::info!(
            "linear fit: {} samples, {} features, bias={:.6}, loss={loss:.6} r2={r2:.6}",
            x.rows, x.cols, params.bias
        );
        self.params = Some(params);
        Ok((loss, r2))
    }

    /// `x · weights + bias`, one value per row.
    pub fn predict(&self, x: &Matrix) -> Result<Vec<f64>> {
        let params = self.params.as_ref().ok_or(RegressionError::UnfittedModel)?;
        ensure_len("feature columns", x.cols, params.weights.len())?;
        let product = x * &Matrix::column(params.weights.clone());
        Ok(product.column_values(0).into_iter().map(|v| v + params.bias).collect())
    }

    /// R² of the fitted model on `(x, y)`.
    pub fn score(&self, x: &Matrix, y: &[f64]) -> Result<f64> {
        let predictions = self.predict(x)?;
        regression_scores(&predictions, y).map(|(_, r2)| r2)
    }
}

impl Default for LinearRegression {
    fn default() -> Self {
        LinearRegression::new(true)
    }
}
