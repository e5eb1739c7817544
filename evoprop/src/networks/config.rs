use super::Activation;

use serde::{Deserialize, Serialize};

use std::num::NonZeroUsize;

/// Configuration data for network construction
/// and gradient training.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Number of neurons in the input layer.
    pub input_count: NonZeroUsize,
    /// Sizes of the hidden layers, in order.
    pub hidden_sizes: Vec<usize>,
    /// Number of neurons in the output layer.
    pub output_count: NonZeroUsize,
    /// Activation function of every hidden neuron.
    pub hidden_activation: Activation,
    /// Activation function of every output neuron.
    pub output_activation: Activation,
    /// Whether weights start uniformly distributed
    /// over [-1, 1), instead of at 0.
    pub random_weights: bool,
    /// Whether non-input biases start uniformly distributed
    /// over [-1, 1), instead of at 0.
    pub random_biases: bool,
    /// Whether weights are kept within [-1, 1]
    /// after mutation and gradient steps.
    pub clamp_weights: bool,
    /// Whether biases are kept within [-1, 1]
    /// after mutation and gradient steps.
    pub clamp_biases: bool,
    /// Step size of the gradient trainer.
    pub learning_rate: f64,
    /// Decay factor of the gradient trainer's
    /// momentum velocity.
    pub momentum: f64,
}

impl NetworkConfig {
    /// Returns a "zero-valued" default configuration.
    /// All values are 0, false, or empty, sizes are 1,
    /// and both activations are [`Sigmoid`].
    ///
    /// # Note
    /// This value is not suitable for use in most experiments.
    /// It is meant as a way to fill in unused values during
    /// configuration instantiation.
    ///
    /// [`Sigmoid`]: crate::networks::Activation::Sigmoid
    ///
    /// # Examples
    /// ```
    /// use evoprop::networks::{Activation, NetworkConfig};
    ///
    /// let cfg1 = NetworkConfig::zero();
    ///
    /// let cfg2 = NetworkConfig {
    ///     // Specify some values here...
    ///     hidden_sizes: vec![4, 4],
    ///     hidden_activation: Activation::Relu,
    ///     random_weights: true,
    ///     // Default the rest...
    ///     ..NetworkConfig::zero()
    /// };
    /// ```
    pub const fn zero() -> NetworkConfig {
        NetworkConfig {
            // SAFETY: 1 is a valid NonZeroUsize.
            input_count: unsafe { NonZeroUsize::new_unchecked(1) },
            hidden_sizes: Vec::new(),
            output_count: unsafe { NonZeroUsize::new_unchecked(1) },
            hidden_activation: Activation::Sigmoid,
            output_activation: Activation::Sigmoid,
            random_weights: false,
            random_biases: false,
            clamp_weights: false,
            clamp_biases: false,
            learning_rate: 0.0,
            momentum: 0.0,
        }
    }

    /// Returns the size of every layer, input and output included.
    ///
    /// # Examples
    /// ```
    /// use evoprop::networks::NetworkConfig;
    /// use std::num::NonZeroUsize;
    ///
    /// let config = NetworkConfig {
    ///     input_count: NonZeroUsize::new(2).unwrap(),
    ///     hidden_sizes: vec![5, 3],
    ///     ..NetworkConfig::zero()
    /// };
    /// assert_eq!(config.layer_sizes(), vec![2, 5, 3, 1]);
    /// ```
    pub fn layer_sizes(&self) -> Vec<usize> {
        std::iter::once(self.input_count.get())
            .chain(self.hidden_sizes.iter().copied())
            .chain(std::iter::once(self.output_count.get()))
            .collect()
    }
}

/// Parameters of the evolutionary mutation operator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MutationConfig {
    /// Number of random weight edits per mutation.
    pub weight_edits: usize,
    /// Magnitude of the uniform weight perturbation.
    pub weight_strength: f64,
    /// Number of random bias edits per mutation.
    pub bias_edits: usize,
    /// Magnitude of the uniform bias perturbation.
    pub bias_strength: f64,
}

/// Factor by which [`MutationConfig::anneal`] scales strengths.
const ANNEALING_FACTOR: f64 = 1.001;

impl MutationConfig {
    /// Returns a configuration performing no edits.
    pub const fn zero() -> MutationConfig {
        MutationConfig {
            weight_edits: 0,
            weight_strength: 0.0,
            bias_edits: 0,
            bias_strength: 0.0,
        }
    }

    /// Adapts both strengths to the progress of evolution:
    /// shrinks them slightly if the best error `stalled`,
    /// grows them slightly otherwise.
    ///
    /// # Examples
    /// ```
    /// use evoprop::networks::MutationConfig;
    ///
    /// let mut mutation = MutationConfig {
    ///     weight_edits: 10,
    ///     weight_strength: 0.1,
    ///     bias_edits: 10,
    ///     bias_strength: 0.1,
    /// };
    /// mutation.anneal(true);
    /// assert!(mutation.weight_strength < 0.1);
    /// mutation.anneal(false);
    /// mutation.anneal(false);
    /// assert!(mutation.bias_strength > 0.1);
    /// ```
    pub fn anneal(&mut self, stalled: bool) {
        if stalled {
            self.weight_strength /= ANNEALING_FACTOR;
            self.bias_strength /= ANNEALING_FACTOR;
        } else {
            self.weight_strength *= ANNEALING_FACTOR;
            self.bias_strength *= ANNEALING_FACTOR;
        }
    }
}
