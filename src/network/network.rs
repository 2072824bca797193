use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::{activation::activation::ActivationFunction, layers::dense::Layer};
use crate::loss::mse::MseLoss;
use crate::math::matrix::Matrix;
use crate::network::cache::ForwardCache;
use crate::optim::sgd::Sgd;

/// A stack of dense layers with a shared hidden activation and a linear
/// output layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub layers: Vec<Layer>,
    pub activation: ActivationFunction,
}

impl Network {
    /// Builds freshly initialized layers for the unit counts in `sizes`
    /// (input, hidden..., output).
    pub fn new<R: Rng + ?Sized>(sizes: &[usize], activation: ActivationFunction, rng: &mut R) -> Network {
        let layers = sizes.windows(2)
            .map(|pair| Layer::new(pair[0], pair[1], &mut *rng))
            .collect();
        Network { layers, activation }
    }

    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, Layer::input_size)
    }

    /// Forward pass for inference; nothing is cached.
    pub fn forward(&self, input: &Matrix) -> Matrix {
        let last = self.layers.len().saturating_sub(1);
        let mut current = input.clone();
        for (i, layer) in self.layers.iter().enumerate() {
            let z = layer.forward(&current);
            current = if i == last { z } else { self.activation.apply(&z) };
        }
        current
    }

    /// Forward pass that records every layer input and hidden `z` for backprop.
    pub fn forward_cached(&self, input: &Matrix) -> (Matrix, ForwardCache) {
        let last = self.layers.len().saturating_sub(1);
        let mut cache = ForwardCache::with_layers(self.layers.len());
        let mut current = input.clone();
        for (i, layer) in self.layers.iter().enumerate() {
            let z = layer.forward(&current);
            cache.inputs.push(current);
            if i == last {
                return (z, cache);
            }
            current = self.activation.apply(&z);
            cache.pre_activations.push(z);
        }
        (current, cache)
    }

    /// Backward pass. Returns (weights_grad, biases_grad) per layer, in layer order.
    pub fn backward(&self, cache: &ForwardCache, output: &Matrix, target: &Matrix) -> Vec<(Matrix, Matrix)> {
        let mut grads = Vec::with_capacity(self.layers.len());
        // Linear head: ∂L/∂z of the output layer is the residual.
        let mut delta = MseLoss::derivative(output, target);

        for i in (0..self.layers.len()).rev() {
            let layer = &self.layers[i];
            grads.push(layer.compute_gradients(&delta, &cache.inputs[i]));

            if i > 0 {
                let upstream = &delta * &layer.weights.transpose();
                delta = upstream.hadamard(&self.activation.derive(&cache.pre_activations[i - 1]));
            }
        }

        grads.reverse();
        grads
    }

    /// One gradient-descent step on a batch. The cache lives only for this call.
    pub fn train_step(&mut self, inputs: &Matrix, targets: &Matrix, optimizer: &Sgd) {
        let (output, cache) = self.forward_cached(inputs);
        let grads = self.backward(&cache, &output, targets);
        for (layer, (w_grad, b_grad)) in self.layers.iter_mut().zip(grads.iter()) {
            optimizer.step(layer, w_grad, b_grad);
        }
    }

    pub fn is_finite(&self) -> bool {
        self.layers.iter().all(|l| l.weights.is_finite() && l.biases.is_finite())
    }
}
