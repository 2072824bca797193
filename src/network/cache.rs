use crate::math::matrix::Matrix;

/// Values recorded by one forward pass and consumed by the matching
/// backward pass.
///
/// `inputs[i]` is the batch fed into layer `i` (the raw batch for `i == 0`),
/// so there is one entry per layer. `pre_activations[i]` is `z` of hidden
/// layer `i`; the linear output layer has no entry.
#[derive(Debug, Default)]
pub struct ForwardCache {
    pub inputs: Vec<Matrix>,
    pub pre_activations: Vec<Matrix>,
}

impl ForwardCache {
    pub fn with_layers(n_layers: usize) -> Self {
        ForwardCache {
            inputs: Vec::with_capacity(n_layers),
            pre_activations: Vec::with_capacity(n_layers.saturating_sub(1)),
        }
    }
}
