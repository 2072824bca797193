use rand::Rng;
use serde::{Serialize, Deserialize};
use std::f64::consts::PI;
use std::ops::{Add, Sub, Mul};

use crate::error::{RegressionError, Result};

/// Dense row-major matrix of `f64`.
///
/// The arithmetic operators panic on incompatible shapes; they are used on
/// values whose shapes are fixed by construction. Shapes that come from a
/// caller are checked first and reported as `RegressionError::ShapeMismatch`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix{
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    /// Builds a matrix from rows, rejecting ragged input.
    pub fn from_data(data: Vec<Vec<f64>>) -> Result<Matrix> {
        let cols = data.first().map_or(0, |row| row.len());
        for row in &data {
            if row.len() != cols {
                return Err(RegressionError::ShapeMismatch {
                    what: "row length",
                    got: row.len(),
                    expected: cols,
                });
            }
        }

        Ok(Matrix {
            rows: data.len(),
            cols,
            data
        })
    }

    /// Reinterprets a 1D slice of samples as an (n, 1) design matrix.
    pub fn column(values: Vec<f64>) -> Matrix {
        Matrix {
            rows: values.len(),
            cols: 1,
            data: values.into_iter().map(|v| vec![v]).collect()
        }
    }

    /// A single (1, n) row, used for bias vectors.
    pub fn row(values: Vec<f64>) -> Matrix {
        Matrix {
            rows: 1,
            cols: values.len(),
            data: vec![values]
        }
    }

    /// Samples a single value from N(0, 1) using the Box-Muller transform.
    fn sample_standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
        // (0, 1] keeps ln() finite.
        let u1: f64 = 1.0 - rng.gen::<f64>();
        let u2: f64 = 1.0 - rng.gen::<f64>();
        (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }

    /// Variance-scaling initialization: N(0, 1) / sqrt(rows).
    ///
    /// Shape: (rows, cols). `rows` is the fan-in, since layers compute `a · W`.
    pub fn scaled_normal<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let scale = 1.0 / (rows.max(1) as f64).sqrt();
        let mut res = Matrix::zeros(rows, cols);
        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = Matrix::sample_standard_normal(rng) * scale;
            }
        }
        res
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data
                .iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect()
        }
    }

    pub fn scale(&self, factor: f64) -> Matrix {
        self.map(|x| x * factor)
    }

    /// Element-wise (Hadamard) product of two same-shape matrices.
    pub fn hadamard(&self, rhs: &Matrix) -> Matrix {
        assert_eq!(self.shape(), rhs.shape(), "hadamard operands differ in shape");
        let data = self.data.iter().zip(rhs.data.iter())
            .map(|(row_a, row_b)| {
                row_a.iter().zip(row_b.iter()).map(|(x, y)| x * y).collect()
            })
            .collect();
        Matrix { rows: self.rows, cols: self.cols, data }
    }

    /// Adds a (1, cols) row to every row of `self`.
    pub fn add_row(&self, row: &Matrix) -> Matrix {
        assert!(row.rows == 1 && row.cols == self.cols, "broadcast row has wrong shape");
        let bias = &row.data[0];
        let data = self.data.iter()
            .map(|r| r.iter().zip(bias.iter()).map(|(x, b)| x + b).collect())
            .collect();
        Matrix { rows: self.rows, cols: self.cols, data }
    }

    /// Column means as a (1, cols) row.
    pub fn mean_rows(&self) -> Matrix {
        let mut sums = vec![0.0; self.cols];
        for row in &self.data {
            for (s, x) in sums.iter_mut().zip(row.iter()) {
                *s += x;
            }
        }
        let n = self.rows.max(1) as f64;
        Matrix::row(sums.into_iter().map(|s| s / n).collect())
    }

    /// Copies the rows at `indices`, in that order.
    pub fn select_rows(&self, indices: &[usize]) -> Matrix {
        Matrix {
            rows: indices.len(),
            cols: self.cols,
            data: indices.iter().map(|&i| self.data[i].clone()).collect()
        }
    }

    /// Copies rows `start..end`.
    pub fn slice_rows(&self, start: usize, end: usize) -> Matrix {
        Matrix {
            rows: end - start,
            cols: self.cols,
            data: self.data[start..end].to_vec()
        }
    }

    /// Returns a copy with a constant column inserted at index 0.
    pub fn prepend_column(&self, value: f64) -> Matrix {
        let data = self.data.iter()
            .map(|row| {
                let mut r = Vec::with_capacity(row.len() + 1);
                r.push(value);
                r.extend_from_slice(row);
                r
            })
            .collect();
        Matrix { rows: self.rows, cols: self.cols + 1, data }
    }

    pub fn column_values(&self, col: usize) -> Vec<f64> {
        self.data.iter().map(|row| row[col]).collect()
    }

    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|row| row.iter().all(|x| x.is_finite()))
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

impl From<Vec<f64>> for Matrix {
    fn from(values: Vec<f64>) -> Self {
        Matrix::column(values)
    }
}

impl Add for &Matrix {
    type Output = Matrix;

    fn add(self, rhs: Self) -> Self::Output {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res = Matrix::zeros(self.rows, self.cols);

        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[i][j] = self.data[i][j] + rhs.data[i][j];
            }
        }

        res
    }
}

impl Sub for &Matrix {
    type Output = Matrix;

    fn sub(self, rhs: Self) -> Self::Output {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res = Matrix::zeros(self.rows, self.cols);

        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[i][j] = self.data[i][j] - rhs.data[i][j];
            }
        }

        res
    }
}

impl Mul for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Self) -> Self::Output {
        if self.cols != rhs.rows {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res = Matrix::zeros(self.rows, rhs.cols);

        // i-k-j order walks both operands row-wise.
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self.data[i][k];
                for j in 0..rhs.cols {
                    res.data[i][j] += a * rhs.data[k][j];
                }
            }
        }

        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn m(rows: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_data(rows).unwrap()
    }

    #[test]
    fn from_data_rejects_ragged_rows() {
        let err = Matrix::from_data(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(err, RegressionError::ShapeMismatch { what: "row length", got: 1, expected: 2 });
    }

    #[test]
    fn column_reinterprets_flat_samples() {
        let x = Matrix::from(vec![1.0, 2.0, 3.0]);
        assert_eq!(x.shape(), (3, 1));
        assert_eq!(x.column_values(0), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn product_matches_hand_computation() {
        let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let b = m(vec![vec![5.0], vec![6.0]]);
        assert_eq!(&a * &b, m(vec![vec![17.0], vec![39.0]]));
    }

    #[test]
    #[should_panic(expected = "incorrect sizes")]
    fn product_panics_on_inner_dimension_mismatch() {
        let a = Matrix::zeros(2, 3);
        let b = Matrix::zeros(2, 3);
        let _ = &a * &b;
    }

    #[test]
    fn product_propagates_non_finite_values_through_zeros() {
        let a = m(vec![vec![0.0, 1.0]]);
        let b = m(vec![vec![f64::INFINITY], vec![2.0]]);
        let p = &a * &b;
        assert!(p.data[0][0].is_nan());
        assert!(!p.is_finite());
    }

    #[test]
    fn broadcasting_and_means() {
        let a = m(vec![vec![1.0, 2.0], vec![3.0, 6.0]]);
        let shifted = a.add_row(&Matrix::row(vec![10.0, -1.0]));
        assert_eq!(shifted, m(vec![vec![11.0, 1.0], vec![13.0, 5.0]]));
        assert_eq!(a.mean_rows(), Matrix::row(vec![2.0, 4.0]));
    }

    #[test]
    fn prepend_column_adds_intercept() {
        let a = m(vec![vec![2.0], vec![5.0]]);
        assert_eq!(a.prepend_column(1.0), m(vec![vec![1.0, 2.0], vec![1.0, 5.0]]));
    }

    #[test]
    fn select_rows_follows_index_order() {
        let a = m(vec![vec![0.0], vec![1.0], vec![2.0]]);
        assert_eq!(a.select_rows(&[2, 0]), m(vec![vec![2.0], vec![0.0]]));
        assert_eq!(a.slice_rows(1, 3), m(vec![vec![1.0], vec![2.0]]));
    }

    #[test]
    fn scaled_normal_has_roughly_unit_variance_times_fan_in() {
        let mut rng = StdRng::seed_from_u64(7);
        let w = Matrix::scaled_normal(4, 5000, &mut rng);
        let values: Vec<f64> = w.data.iter().flatten().copied().collect();
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        assert!(mean.abs() < 0.02, "mean {mean}");
        assert!((var - 0.25).abs() < 0.02, "variance {var}");
    }
}
