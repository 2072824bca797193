use crate::error::{ensure_len, RegressionError, Result};
use crate::loss::mse::MseLoss;

/// Total sum of squares: squared deviations of `expected` from its mean.
pub fn total_sum_of_squares(expected: &[f64]) -> f64 {
    let n = expected.len() as f64;
    let mean = expected.iter().sum::<f64>() / n;
    expected.iter().map(|y| (y - mean).powi(2)).sum()
}

/// Fails with `DegenerateTarget` when the target is empty or constant.
///
/// Constancy is decided on the values themselves: the mean of identical
/// values can round away from them and leave a tiny non-zero SST.
pub fn ensure_target_variance(expected: &[f64]) -> Result<f64> {
    let first = match expected.first() {
        Some(&v) => v,
        None => {
            return Err(RegressionError::ShapeMismatch { what: "target rows", got: 0, expected: 1 });
        }
    };
    if expected.iter().all(|&v| v == first) {
        return Err(RegressionError::DegenerateTarget);
    }
    let sst = total_sum_of_squares(expected);
    if sst > 0.0 && sst.is_finite() {
        Ok(sst)
    } else {
        Err(RegressionError::DegenerateTarget)
    }
}

/// Returns `(mse, r2)` for a set of predictions.
///
/// `r2 = 1 - SSE / SST`; undefined (and rejected) when SST is zero.
pub fn regression_scores(predicted: &[f64], expected: &[f64]) -> Result<(f64, f64)> {
    ensure_len("prediction rows", predicted.len(), expected.len())?;
    let sst = ensure_target_variance(expected)?;
    let sse = MseLoss::sse(predicted, expected);
    Ok((sse / expected.len() as f64, 1.0 - sse / sst))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_predictions_score_one() {
        let y = [1.0, 2.0, 3.0];
        let (mse, r2) = regression_scores(&y, &y).unwrap();
        assert_eq!(mse, 0.0);
        assert_eq!(r2, 1.0);
    }

    #[test]
    fn predicting_the_mean_scores_zero() {
        let y = [1.0, 2.0, 3.0];
        let (mse, r2) = regression_scores(&[2.0, 2.0, 2.0], &y).unwrap();
        assert!((mse - 2.0 / 3.0).abs() < 1e-12);
        assert!(r2.abs() < 1e-12);
    }

    #[test]
    fn constant_target_is_degenerate() {
        assert_eq!(
            regression_scores(&[1.0, 2.0], &[5.0, 5.0]),
            Err(RegressionError::DegenerateTarget)
        );
    }

    #[test]
    fn constant_target_with_inexact_mean_is_degenerate() {
        // The float mean of [0.1; 3] is not exactly 0.1.
        assert_eq!(ensure_target_variance(&[0.1, 0.1, 0.1]), Err(RegressionError::DegenerateTarget));
        assert_eq!(
            regression_scores(&[0.0, 0.1, 0.2], &[0.1, 0.1, 0.1]),
            Err(RegressionError::DegenerateTarget)
        );
    }

    #[test]
    fn tiny_but_real_variance_is_accepted() {
        let y = [0.1, 0.1 + 1e-12, 0.1];
        assert!(ensure_target_variance(&y).unwrap() > 0.0);
    }

    #[test]
    fn length_mismatch_is_reported() {
        assert!(matches!(
            regression_scores(&[1.0], &[1.0, 2.0]),
            Err(RegressionError::ShapeMismatch { .. })
        ));
    }
}
