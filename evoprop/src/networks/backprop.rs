//! Gradient computation and momentum gradient descent.
//!
//! The loss being minimized is the squared error
//! `Σ (output_i - target_i)²` of each sample. Biases and
//! weights accumulate their gradient across calls to
//! [`Network::backpropagate`] until gradients are reset,
//! which is how [`Network::train_batch`] sums a whole batch.
use super::{Network, NetworkError};

impl Network {
    /// Computes the loss gradient of every weight and bias for
    /// the last forward pass, given the expected `targets`.
    ///
    /// If `reset_gradients`, previously accumulated gradients are
    /// cleared first; otherwise the new gradients are added to them.
    /// [`run`] must have been called with the matching inputs.
    ///
    /// [`run`]: Network::run
    ///
    /// # Errors
    /// Returns an error if `targets` is not as long as the output layer.
    ///
    /// # Examples
    /// ```
    /// use evoprop::networks::{Activation, Network, NetworkConfig};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let config = NetworkConfig {
    ///     output_activation: Activation::Tanh,
    ///     ..NetworkConfig::zero()
    /// };
    /// let mut network = Network::new(&config, &mut StdRng::seed_from_u64(0));
    /// network.run(&[2.0]).unwrap();
    /// network.backpropagate(&[1.0], true).unwrap();
    ///
    /// // Output is tanh(0) = 0: d/db (0 - 1)² = 2 × (0 - 1) × (1 - 0²).
    /// let output = &network.output_layer().neurons()[0];
    /// assert_eq!(output.gradient(), -2.0);
    /// assert_eq!(output.weights()[0].gradient(), -4.0);
    /// ```
    pub fn backpropagate(
        &mut self,
        targets: &[f64],
        reset_gradients: bool,
    ) -> Result<(), NetworkError> {
        if targets.len() != self.output_count() {
            return Err(NetworkError::OutputSizeMismatch {
                expected: self.output_count(),
                got: targets.len(),
            });
        }
        if reset_gradients {
            self.reset_gradients();
        }

        let last = self.layers.len() - 1;
        for (neuron, target) in self.layers[last].neurons.iter_mut().zip(targets) {
            neuron.delta = 2.0 * (neuron.value - target) * neuron.activation_derivative();
            neuron.gradient += neuron.delta;
        }

        // Walk down to the input layer so that the weights
        // reading from it receive their gradient too.
        for l in (0..last).rev() {
            let (lower, upper) = self.layers.split_at_mut(l + 1);
            let current = &mut lower[l];
            let next = &mut upper[0];

            let mut sums = vec![0.0; current.neurons.len()];
            for next_neuron in next.neurons.iter_mut() {
                let delta = next_neuron.delta;
                for weight in next_neuron.weights.iter_mut() {
                    let source = weight.source.index;
                    sums[source] += delta * weight.value;
                    weight.gradient += delta * current.neurons[source].value;
                }
            }

            if l > 0 {
                for (neuron, sum) in current.neurons.iter_mut().zip(sums) {
                    neuron.delta = sum * neuron.activation_derivative();
                    neuron.gradient += neuron.delta;
                }
            }
        }

        Ok(())
    }

    /// Clears every accumulated weight and bias gradient.
    pub fn reset_gradients(&mut self) {
        for neuron in self.layers.iter_mut().flat_map(|l| &mut l.neurons) {
            neuron.gradient = 0.0;
            neuron.delta = 0.0;
            for weight in &mut neuron.weights {
                weight.gradient = 0.0;
            }
        }
    }

    /// Takes one momentum gradient descent step with the
    /// accumulated gradients. For every non-input bias and weight:
    /// `velocity = momentum × velocity - learning_rate × gradient`,
    /// then `parameter += velocity`, clamped if so configured.
    ///
    /// # Examples
    /// ```
    /// use evoprop::networks::{Activation, Network, NetworkConfig};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let config = NetworkConfig {
    ///     output_activation: Activation::Tanh,
    ///     learning_rate: 0.5,
    ///     momentum: 0.9,
    ///     ..NetworkConfig::zero()
    /// };
    /// let mut network = Network::new(&config, &mut StdRng::seed_from_u64(0));
    /// network.run(&[2.0]).unwrap();
    /// network.backpropagate(&[1.0], true).unwrap();
    /// network.apply_gradients();
    ///
    /// let output = &network.output_layer().neurons()[0];
    /// assert_eq!(output.bias(), 1.0);
    /// assert_eq!(output.weights()[0].value(), 2.0);
    ///
    /// // Without new gradients, momentum keeps moving the parameters.
    /// network.reset_gradients();
    /// network.apply_gradients();
    /// let output = &network.output_layer().neurons()[0];
    /// assert_eq!(output.bias(), 1.0 + 0.9);
    /// ```
    pub fn apply_gradients(&mut self) {
        let learning_rate = self.config.learning_rate;
        let momentum = self.config.momentum;
        let clamp_weights = self.config.clamp_weights;
        let clamp_biases = self.config.clamp_biases;

        for neuron in self.layers[1..].iter_mut().flat_map(|l| &mut l.neurons) {
            neuron.bias_velocity = momentum * neuron.bias_velocity - learning_rate * neuron.gradient;
            neuron.bias += neuron.bias_velocity;
            if clamp_biases {
                neuron.bias = neuron.bias.clamp(-1.0, 1.0);
            }
            for weight in &mut neuron.weights {
                weight.velocity = momentum * weight.velocity - learning_rate * weight.gradient;
                weight.value += weight.velocity;
                if clamp_weights {
                    weight.value = weight.value.clamp(-1.0, 1.0);
                }
            }
        }
    }

    /// Trains the network on a whole batch with a single
    /// gradient step: gradients are summed over every sample,
    /// divided by the batch size, then applied once.
    ///
    /// An empty batch does nothing.
    ///
    /// # Errors
    /// Returns an error if `inputs` and `targets` differ in length,
    /// or if a sample doesn't match the network's shape. Parameters
    /// are left unchanged in that case.
    ///
    /// # Examples
    /// ```
    /// use evoprop::networks::{Activation, Network, NetworkConfig};
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use std::num::NonZeroUsize;
    ///
    /// let config = NetworkConfig {
    ///     input_count: NonZeroUsize::new(2).unwrap(),
    ///     output_activation: Activation::Tanh,
    ///     random_weights: true,
    ///     learning_rate: 0.1,
    ///     momentum: 0.5,
    ///     ..NetworkConfig::zero()
    /// };
    /// let mut network = Network::new(&config, &mut StdRng::seed_from_u64(1));
    /// let inputs = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
    /// let targets = vec![vec![0.5], vec![-0.5]];
    ///
    /// network.reset_error();
    /// network.test_error_trials(&inputs, &targets, 2.0).unwrap();
    /// let before = network.error();
    ///
    /// for _ in 0..100 {
    ///     network.train_batch(&inputs, &targets).unwrap();
    /// }
    ///
    /// network.reset_error();
    /// network.test_error_trials(&inputs, &targets, 2.0).unwrap();
    /// assert!(network.error() < before);
    /// ```
    pub fn train_batch(
        &mut self,
        inputs: &[Vec<f64>],
        targets: &[Vec<f64>],
    ) -> Result<(), NetworkError> {
        if inputs.len() != targets.len() {
            return Err(NetworkError::BatchLengthMismatch {
                inputs: inputs.len(),
                targets: targets.len(),
            });
        }
        if inputs.is_empty() {
            return Ok(());
        }

        for (i, (input, target)) in inputs.iter().zip(targets).enumerate() {
            self.run(input)?;
            self.backpropagate(target, i == 0)?;
        }

        self.scale_gradients(1.0 / inputs.len() as f64);
        self.apply_gradients();
        Ok(())
    }

    fn scale_gradients(&mut self, factor: f64) {
        for neuron in self.layers[1..].iter_mut().flat_map(|l| &mut l.neurons) {
            neuron.gradient *= factor;
            for weight in &mut neuron.weights {
                weight.gradient *= factor;
            }
        }
    }
}
