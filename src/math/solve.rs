use crate::error::{ensure_len, RegressionError, Result};
use crate::math::matrix::Matrix;

/// Pivots smaller than this fraction of the largest entry count as zero.
const PIVOT_TOLERANCE: f64 = 1e-10;

/// Solves `a · x = b` for `x` by LU decomposition with partial pivoting.
///
/// `a` must be square; `b` may carry several right-hand sides as columns.
/// Returns `SingularMatrix` when a pivot vanishes relative to the scale of
/// `a`, which is how collinear or underdetermined normal equations show up.
pub fn solve(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    let n = a.rows;
    ensure_len("solver matrix columns", a.cols, n)?;
    ensure_len("solver right-hand side rows", b.rows, n)?;

    let scale = a.data.iter()
        .flat_map(|row| row.iter())
        .fold(0.0_f64, |acc, x| acc.max(x.abs()));
    if n == 0 || scale == 0.0 || !scale.is_finite() {
        return Err(RegressionError::SingularMatrix);
    }
    let tolerance = scale * PIVOT_TOLERANCE;

    let mut lu = a.data.clone();
    let mut rhs = b.data.clone();

    // Forward elimination, L stored implicitly.
    for k in 0..n {
        let pivot_row = (k..n)
            .max_by(|&i, &j| lu[i][k].abs().total_cmp(&lu[j][k].abs()))
            .unwrap_or(k);
        if lu[pivot_row][k].abs() <= tolerance {
            return Err(RegressionError::SingularMatrix);
        }
        lu.swap(k, pivot_row);
        rhs.swap(k, pivot_row);

        for i in (k + 1)..n {
            let factor = lu[i][k] / lu[k][k];
            if factor == 0.0 {
                continue;
            }
            for j in k..n {
                lu[i][j] -= factor * lu[k][j];
            }
            for j in 0..b.cols {
                rhs[i][j] -= factor * rhs[k][j];
            }
        }
    }

    // Back substitution on U.
    let mut x = Matrix::zeros(n, b.cols);
    for col in 0..b.cols {
        for i in (0..n).rev() {
            let tail: f64 = ((i + 1)..n).map(|j| lu[i][j] * x.data[j][col]).sum();
            x.data[i][col] = (rhs[i][col] - tail) / lu[i][i];
        }
    }

    if !x.is_finite() {
        return Err(RegressionError::SingularMatrix);
    }
    Ok(x)
}

/// Solves the normal equations `gram · β = moments` after symmetric
/// diagonal scaling.
///
/// `gram` is `XᵀX`, so its diagonal holds the squared column norms of `X`.
/// Dividing row and column `i` by `sqrt(gram[i][i])` is the same as solving
/// with unit-norm columns, which makes the singularity test independent of
/// each feature's units. A zero column is singular outright.
pub fn solve_normal_equations(gram: &Matrix, moments: &Matrix) -> Result<Matrix> {
    let n = gram.rows;
    ensure_len("solver matrix columns", gram.cols, n)?;
    ensure_len("solver right-hand side rows", moments.rows, n)?;

    let mut inv_norms = Vec::with_capacity(n);
    for i in 0..n {
        let d = gram.data[i][i];
        if !(d > 0.0 && d.is_finite()) {
            return Err(RegressionError::SingularMatrix);
        }
        inv_norms.push(1.0 / d.sqrt());
    }

    let mut scaled = gram.clone();
    for i in 0..n {
        for j in 0..n {
            scaled.data[i][j] *= inv_norms[i] * inv_norms[j];
        }
    }
    let mut rhs = moments.clone();
    for (row, s) in rhs.data.iter_mut().zip(inv_norms.iter()) {
        for v in row.iter_mut() {
            *v *= s;
        }
    }

    let mut beta = solve(&scaled, &rhs)?;
    for (row, s) in beta.data.iter_mut().zip(inv_norms.iter()) {
        for v in row.iter_mut() {
            *v *= s;
        }
    }
    Ok(beta)
}
