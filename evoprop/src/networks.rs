//! A Network is an ordered stack of fully-connected layers
//! of scalar neurons. The first layer holds the inputs,
//! the last one the outputs.
//!
//! Every weight names the neuron it reads from with a
//! [`NeuronPosition`] into the previous layer, so a network
//! is a pair of nested vectors with no internal references.
//!
//! Networks are trained either by an evolutionary
//! [`Population`], through [`Network::mutate`], or by
//! momentum gradient descent, through [`Network::train_batch`].
//!
//! [`Population`]: crate::Population
mod activation;
mod backprop;
mod config;
mod errors;
mod neurons;
pub mod sampling;

pub use activation::Activation;
pub use config::{MutationConfig, NetworkConfig};
pub use errors::NetworkError;
pub use neurons::{Layer, Neuron, NeuronPosition, Weight};

use rand::Rng;
use serde::{Deserialize, Serialize};

use std::fmt;

/// A fully-connected feedforward neural network.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Network {
    layers: Vec<Layer>,
    config: NetworkConfig,
    error: f64,
    mean_error: f64,
}

impl Network {
    /// Generates a new network with the configured topology.
    /// Weights and biases are drawn from `rng` if the configuration
    /// asks for random initialization, and are 0 otherwise.
    /// Input neurons never have weights nor a bias.
    ///
    /// # Examples
    /// ```
    /// use evoprop::networks::{Network, NetworkConfig};
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use std::num::NonZeroUsize;
    ///
    /// let config = NetworkConfig {
    ///     input_count: NonZeroUsize::new(3).unwrap(),
    ///     hidden_sizes: vec![4],
    ///     output_count: NonZeroUsize::new(2).unwrap(),
    ///     random_weights: true,
    ///     ..NetworkConfig::zero()
    /// };
    /// let network = Network::new(&config, &mut StdRng::seed_from_u64(7));
    ///
    /// assert_eq!(network.layers().len(), 3);
    /// assert_eq!(network.layer(1).neurons()[0].weights().len(), 3);
    /// assert_eq!(network.output_layer().len(), 2);
    /// ```
    pub fn new<R: Rng + ?Sized>(config: &NetworkConfig, rng: &mut R) -> Network {
        let sizes = config.layer_sizes();
        let last = sizes.len() - 1;
        let mut layers: Vec<Layer> = Vec::with_capacity(sizes.len());

        for (l, &size) in sizes.iter().enumerate() {
            let activation = if l == last {
                config.output_activation
            } else {
                config.hidden_activation
            };
            let neurons = (0..size)
                .map(|_| {
                    let weights = match l.checked_sub(1) {
                        Some(previous) => (0..sizes[previous])
                            .map(|i| {
                                let value = if config.random_weights {
                                    rng.gen_range(-1.0..1.0)
                                } else {
                                    0.0
                                };
                                Weight::new(value, NeuronPosition::new(previous, i))
                            })
                            .collect(),
                        None => vec![],
                    };
                    let bias = if l > 0 && config.random_biases {
                        rng.gen_range(-1.0..1.0)
                    } else {
                        0.0
                    };
                    Neuron::new(weights, bias, activation)
                })
                .collect();
            layers.push(Layer { neurons });
        }

        Network {
            layers,
            config: config.clone(),
            error: 0.0,
            mean_error: 0.0,
        }
    }

    /// Computes the value of every neuron for the given inputs,
    /// and returns the output layer.
    ///
    /// Inputs are copied verbatim into the input layer. Every other
    /// neuron takes the weighted sum of the previous layer plus its
    /// bias, passed through its activation function. The whole
    /// network state is overwritten, so repeated calls with the same
    /// inputs give identical results.
    ///
    /// # Errors
    /// Returns an error if `inputs` is not as long as the input layer.
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
    ///     ..NetworkConfig::zero()
    /// };
    /// let mut network = Network::new(&config, &mut StdRng::seed_from_u64(0));
    /// network.layer_mut(1).neurons_mut()[0].weights_mut()[0].set_value(1.0);
    ///
    /// let output = network.run(&[0.5, -0.3]).unwrap();
    /// assert_eq!(output.neurons()[0].value(), 0.5f64.tanh());
    ///
    /// assert!(network.run(&[1.0]).is_err());
    /// ```
    pub fn run(&mut self, inputs: &[f64]) -> Result<&Layer, NetworkError> {
        if inputs.len() != self.input_count() {
            return Err(NetworkError::InputSizeMismatch {
                expected: self.input_count(),
                got: inputs.len(),
            });
        }

        for (neuron, input) in self.layers[0].neurons.iter_mut().zip(inputs) {
            neuron.value = *input;
        }

        for l in 1..self.layers.len() {
            let (computed, remaining) = self.layers.split_at_mut(l);
            let previous = &computed[l - 1];
            for neuron in remaining[0].neurons.iter_mut() {
                let mut sum = 0.0;
                for weight in &neuron.weights {
                    debug_assert_eq!(weight.source.layer, l - 1);
                    sum += weight.value * previous.neurons[weight.source.index].value;
                }
                sum += neuron.bias;
                neuron.pre_activation = sum;
                neuron.value = neuron.activation.activate(sum);
            }
        }

        Ok(self.output_layer())
    }

    /// Applies `mutation.weight_edits` random weight perturbations
    /// and `mutation.bias_edits` random bias perturbations.
    ///
    /// Each edit picks a non-input layer, then a neuron in it,
    /// then (for weights) one of its weights, all uniformly, and
    /// adds a uniform value in `[-strength, strength)`. The same
    /// parameter may be picked more than once. Edited values are
    /// clamped to [-1, 1] if the network is configured to do so.
    ///
    /// # Examples
    /// ```
    /// use evoprop::networks::{MutationConfig, Network, NetworkConfig};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let mut rng = StdRng::seed_from_u64(3);
    /// let mut network = Network::new(&NetworkConfig::zero(), &mut rng);
    ///
    /// network.mutate(
    ///     &MutationConfig {
    ///         weight_edits: 5,
    ///         weight_strength: 0.5,
    ///         ..MutationConfig::zero()
    ///     },
    ///     &mut rng,
    /// );
    ///
    /// assert_ne!(network.output_layer().neurons()[0].weights()[0].value(), 0.0);
    /// assert_eq!(network.output_layer().neurons()[0].bias(), 0.0);
    /// ```
    pub fn mutate<R: Rng + ?Sized>(&mut self, mutation: &MutationConfig, rng: &mut R) {
        let layer_count = self.layers.len();

        for _ in 0..mutation.weight_edits {
            let layer = &mut self.layers[rng.gen_range(1..layer_count)];
            if layer.neurons.is_empty() {
                continue;
            }
            let neuron_index = rng.gen_range(0..layer.neurons.len());
            let weights = &mut layer.neurons[neuron_index].weights;
            if weights.is_empty() {
                continue;
            }
            let weight_index = rng.gen_range(0..weights.len());
            let weight = &mut weights[weight_index];
            weight.value += rng.gen_range(-1.0..1.0) * mutation.weight_strength;
            if self.config.clamp_weights {
                weight.value = weight.value.clamp(-1.0, 1.0);
            }
        }

        for _ in 0..mutation.bias_edits {
            let layer = &mut self.layers[rng.gen_range(1..layer_count)];
            if layer.neurons.is_empty() {
                continue;
            }
            let neuron_index = rng.gen_range(0..layer.neurons.len());
            let neuron = &mut layer.neurons[neuron_index];
            neuron.bias += rng.gen_range(-1.0..1.0) * mutation.bias_strength;
            if self.config.clamp_biases {
                neuron.bias = neuron.bias.clamp(-1.0, 1.0);
            }
        }
    }

    /// Scores the current outputs against `targets`.
    ///
    /// With `diff_i = |output_i - target_i|`, the error becomes
    /// `Σ diff_i ^ power` and the mean error `Σ diff_i`. If `additive`,
    /// both are added to the current values instead of replacing them.
    ///
    /// # Errors
    /// Returns an error if `targets` is not as long as the output layer.
    /// The stored errors are left untouched in that case.
    ///
    /// # Examples
    /// ```
    /// use evoprop::networks::{Network, NetworkConfig};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let mut network = Network::new(&NetworkConfig::zero(), &mut StdRng::seed_from_u64(0));
    /// network.run(&[1.0]).unwrap();
    ///
    /// // Zero weights and bias: the sigmoid output is 0.5.
    /// network.test_error(&[1.5], false, 2.0).unwrap();
    /// assert_eq!(network.error(), 1.0);
    /// assert_eq!(network.mean_error(), 1.0);
    ///
    /// network.test_error(&[0.0], true, 2.0).unwrap();
    /// assert_eq!(network.error(), 1.25);
    /// assert_eq!(network.mean_error(), 1.5);
    /// ```
    pub fn test_error(
        &mut self,
        targets: &[f64],
        additive: bool,
        power: f64,
    ) -> Result<(), NetworkError> {
        if targets.len() != self.output_count() {
            return Err(NetworkError::OutputSizeMismatch {
                expected: self.output_count(),
                got: targets.len(),
            });
        }

        let (mut sum, mut mean_sum) = (0.0, 0.0);
        for (neuron, target) in self.output_layer().neurons.iter().zip(targets) {
            let diff = (neuron.value - target).abs();
            sum += diff.powf(power);
            mean_sum += diff;
        }

        if additive {
            self.error += sum;
            self.mean_error += mean_sum;
        } else {
            self.error = sum;
            self.mean_error = mean_sum;
        }
        Ok(())
    }

    /// Runs and scores every input/target pair, adding onto the
    /// current errors, then turns the totals into averages: the
    /// error becomes the Lp mean `(Σ / n) ^ (1 / power)`, and the
    /// mean error the mean absolute difference `Σ / n`.
    ///
    /// Call [`reset_error`] first to score from scratch. An empty
    /// set leaves the errors untouched.
    ///
    /// [`reset_error`]: Network::reset_error
    ///
    /// # Errors
    /// Returns an error if `inputs` and `targets` differ in length,
    /// or if any of them doesn't match the network's shape. Every
    /// pair is checked before scoring starts, so the errors are
    /// left untouched on failure.
    ///
    /// # Examples
    /// ```
    /// use evoprop::networks::{Network, NetworkConfig};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let mut network = Network::new(&NetworkConfig::zero(), &mut StdRng::seed_from_u64(0));
    ///
    /// // Output is always 0.5, so differences are 0.5 and 1.5.
    /// network
    ///     .test_error_trials(&[vec![0.0], vec![1.0]], &[vec![0.0], vec![2.0]], 2.0)
    ///     .unwrap();
    /// assert_eq!(network.error(), ((0.25 + 2.25) / 2.0f64).powf(1.0 / 2.0));
    /// assert_eq!(network.mean_error(), 1.0);
    /// ```
    pub fn test_error_trials(
        &mut self,
        inputs: &[Vec<f64>],
        targets: &[Vec<f64>],
        power: f64,
    ) -> Result<(), NetworkError> {
        self.check_trials(inputs, targets)?;
        if inputs.is_empty() {
            return Ok(());
        }

        for (input, target) in inputs.iter().zip(targets) {
            self.run(input)?;
            self.test_error(target, true, power)?;
        }

        let count = inputs.len() as f64;
        self.error = (self.error / count).powf(1.0 / power);
        self.mean_error /= count;
        Ok(())
    }

    /// Checks that `inputs` and `targets` pair up and that every
    /// pair fits the input and output layers.
    ///
    /// # Errors
    /// Returns the first mismatch found.
    pub fn check_trials(
        &self,
        inputs: &[Vec<f64>],
        targets: &[Vec<f64>],
    ) -> Result<(), NetworkError> {
        if inputs.len() != targets.len() {
            return Err(NetworkError::BatchLengthMismatch {
                inputs: inputs.len(),
                targets: targets.len(),
            });
        }
        let (input_count, output_count) = (self.input_count(), self.output_count());
        for (input, target) in inputs.iter().zip(targets) {
            if input.len() != input_count {
                return Err(NetworkError::InputSizeMismatch {
                    expected: input_count,
                    got: input.len(),
                });
            }
            if target.len() != output_count {
                return Err(NetworkError::OutputSizeMismatch {
                    expected: output_count,
                    got: target.len(),
                });
            }
        }
        Ok(())
    }

    /// Sets both the error and the mean error to 0.
    pub fn reset_error(&mut self) {
        self.error = 0.0;
        self.mean_error = 0.0;
    }

    /// Overwrites the error, leaving the mean error as is.
    pub fn set_error(&mut self, error: f64) {
        self.error = error;
    }

    /// Returns the last computed error.
    pub fn error(&self) -> f64 {
        self.error
    }

    /// Returns the last computed mean error.
    pub fn mean_error(&self) -> f64 {
        self.mean_error
    }

    /// Returns all layers, input layer first.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Returns the layer at `index`.
    ///
    /// # Panics
    /// Panics if `index` is not less than the number of layers.
    pub fn layer(&self, index: usize) -> &Layer {
        &self.layers[index]
    }

    /// Returns the layer at `index` mutably. Weights and biases
    /// can be edited through it, but not the topology.
    ///
    /// # Panics
    /// Panics if `index` is not less than the number of layers.
    pub fn layer_mut(&mut self, index: usize) -> &mut Layer {
        &mut self.layers[index]
    }

    /// Returns the input layer.
    pub fn input_layer(&self) -> &Layer {
        &self.layers[0]
    }

    /// Returns the output layer.
    pub fn output_layer(&self) -> &Layer {
        &self.layers[self.layers.len() - 1]
    }

    /// Returns the current output values.
    pub fn outputs(&self) -> Vec<f64> {
        self.output_layer().values()
    }

    /// Returns the neuron at `position`, if it exists.
    pub fn neuron(&self, position: NeuronPosition) -> Option<&Neuron> {
        self.layers
            .get(position.layer)
            .and_then(|l| l.neurons.get(position.index))
    }

    /// Returns the current value of the neuron at `position`.
    ///
    /// # Panics
    /// Panics if no neuron exists at `position`.
    pub fn neuron_value(&self, position: NeuronPosition) -> f64 {
        self.layers[position.layer].neurons[position.index].value
    }

    /// Returns the configuration the network was built with.
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn input_count(&self) -> usize {
        self.config.input_count.get()
    }

    pub fn output_count(&self) -> usize {
        self.config.output_count.get()
    }

    pub fn hidden_sizes(&self) -> &[usize] {
        &self.config.hidden_sizes
    }

    /// Returns the number of trainable parameters (weights and biases).
    pub fn parameter_count(&self) -> usize {
        self.layers[1..]
            .iter()
            .flat_map(|l| &l.neurons)
            .map(|n| n.weights.len() + 1)
            .sum()
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Network {:?} (error: {}, mean error: {})",
            self.config.layer_sizes(),
            self.error,
            self.mean_error
        )?;
        for (l, layer) in self.layers.iter().enumerate().skip(1) {
            let biases: Vec<String> = layer
                .neurons
                .iter()
                .map(|n| format!("{:.4}", n.bias))
                .collect();
            writeln!(f, "\tlayer {} biases: [{}]", l, biases.join(", "))?;
        }
        Ok(())
    }
}
