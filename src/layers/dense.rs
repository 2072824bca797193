use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::math::matrix::Matrix;

/// One fully-connected transition: `z = a · W + b`.
///
/// `weights` has shape (input_size, size), `biases` has shape (1, size).
/// The layer holds no activation; the network decides whether to apply one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer{
    pub weights: Matrix,
    pub biases: Matrix,
}

impl Layer {
    /// Scaled-normal weights and zero biases.
    pub fn new<R: Rng + ?Sized>(input_size: usize, size: usize, rng: &mut R) -> Layer {
        Layer {
            weights: Matrix::scaled_normal(input_size, size, rng),
            biases: Matrix::zeros(1, size),
        }
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    pub fn size(&self) -> usize {
        self.weights.cols
    }

    /// Pre-activation for a batch of inputs, one row per sample.
    pub fn forward(&self, input: &Matrix) -> Matrix {
        (input * &self.weights).add_row(&self.biases)
    }

    /// Batch-averaged gradients. Returns (weights_grad, biases_grad).
    ///
    /// `delta` is ∂L/∂z for this layer, `inputs` the activations that fed it;
    /// both have one row per sample.
    pub fn compute_gradients(&self, delta: &Matrix, inputs: &Matrix) -> (Matrix, Matrix) {
        let batch_size = delta.rows.max(1) as f64;
        let weights_grad = (&inputs.transpose() * delta).scale(1.0 / batch_size);
        let biases_grad = delta.mean_rows();
        (weights_grad, biases_grad)
    }

    /// Applies pre-computed gradients scaled by lr.
    pub fn apply_gradients(&mut self, weights_grad: &Matrix, biases_grad: &Matrix, lr: f64) {
        self.weights = &self.weights - &weights_grad.scale(lr);
        self.biases = &self.biases - &biases_grad.scale(lr);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn fixed_layer() -> Layer {
        Layer {
            weights: Matrix::from_data(vec![vec![1.0, -1.0], vec![0.5, 2.0]]).unwrap(),
            biases: Matrix::row(vec![0.25, -0.5]),
        }
    }

    #[test]
    fn new_layer_has_chained_shapes_and_zero_bias() {
        let mut rng = StdRng::seed_from_u64(1);
        let layer = Layer::new(3, 4, &mut rng);
        assert_eq!(layer.weights.shape(), (3, 4));
        assert_eq!(layer.biases, Matrix::zeros(1, 4));
        assert_eq!((layer.input_size(), layer.size()), (3, 4));
    }

    #[test]
    fn forward_adds_bias_to_every_row() {
        let x = Matrix::from_data(vec![vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
        let z = fixed_layer().forward(&x);
        assert_eq!(z, Matrix::from_data(vec![vec![1.25, -1.5], vec![0.75, 1.5]]).unwrap());
    }

    #[test]
    fn gradients_are_averaged_over_the_batch() {
        let layer = fixed_layer();
        let inputs = Matrix::from_data(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let delta = Matrix::from_data(vec![vec![1.0, 0.0], vec![0.0, 2.0]]).unwrap();
        let (w, b) = layer.compute_gradients(&delta, &inputs);
        // inputsᵗ · delta = [[1, 6], [2, 8]], halved
        assert_eq!(w, Matrix::from_data(vec![vec![0.5, 3.0], vec![1.0, 4.0]]).unwrap());
        assert_eq!(b, Matrix::row(vec![0.5, 1.0]));
    }

    #[test]
    fn apply_gradients_steps_against_the_gradient() {
        let mut layer = fixed_layer();
        let w_grad = Matrix::from_data(vec![vec![1.0, 1.0], vec![1.0, 1.0]]).unwrap();
        let b_grad = Matrix::row(vec![1.0, -1.0]);
        layer.apply_gradients(&w_grad, &b_grad, 0.5);
        assert_eq!(layer.weights, Matrix::from_data(vec![vec![0.5, -1.5], vec![0.0, 1.5]]).unwrap());
        assert_eq!(layer.biases, Matrix::row(vec![-0.25, 0.0]));
    }
}
