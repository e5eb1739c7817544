use super::Activation;

use serde::{Deserialize, Serialize};

use std::fmt;

/// Index of a neuron inside a network:
/// its layer, and its place in that layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NeuronPosition {
    pub layer: usize,
    pub index: usize,
}

impl NeuronPosition {
    pub fn new(layer: usize, index: usize) -> NeuronPosition {
        NeuronPosition { layer, index }
    }
}

impl fmt::Display for NeuronPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.layer, self.index)
    }
}

/// A connection reading the value of a neuron
/// in the previous layer.
///
/// Cloning a weight keeps its value and momentum
/// velocity, and clears its accumulated gradient.
#[derive(Debug, Serialize, Deserialize)]
pub struct Weight {
    pub(super) value: f64,
    pub(super) source: NeuronPosition,
    #[serde(skip)]
    pub(super) gradient: f64,
    pub(super) velocity: f64,
}

impl Weight {
    pub(super) fn new(value: f64, source: NeuronPosition) -> Weight {
        Weight {
            value,
            source,
            gradient: 0.0,
            velocity: 0.0,
        }
    }

    /// Returns the weight's value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Sets the weight's value.
    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    /// Returns the position of the neuron this weight reads from.
    pub fn source(&self) -> NeuronPosition {
        self.source
    }

    /// Returns the gradient accumulated by the last backward pass(es).
    pub fn gradient(&self) -> f64 {
        self.gradient
    }

    /// Returns the momentum velocity.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }
}

impl Clone for Weight {
    fn clone(&self) -> Weight {
        Weight {
            value: self.value,
            source: self.source,
            gradient: 0.0,
            velocity: self.velocity,
        }
    }
}

/// A scalar unit of a layer.
///
/// Input-layer neurons have no weights and
/// simply hold the value they are given.
///
/// Cloning a neuron keeps its value, bias, bias velocity
/// and weights, and clears all backward-pass state.
#[derive(Debug, Serialize, Deserialize)]
pub struct Neuron {
    pub(super) value: f64,
    #[serde(skip)]
    pub(super) pre_activation: f64,
    pub(super) bias: f64,
    pub(super) bias_velocity: f64,
    #[serde(skip)]
    pub(super) gradient: f64,
    #[serde(skip)]
    pub(super) delta: f64,
    pub(super) weights: Vec<Weight>,
    pub(super) activation: Activation,
}

impl Neuron {
    pub(super) fn new(weights: Vec<Weight>, bias: f64, activation: Activation) -> Neuron {
        Neuron {
            value: 0.0,
            pre_activation: 0.0,
            bias,
            bias_velocity: 0.0,
            gradient: 0.0,
            delta: 0.0,
            weights,
            activation,
        }
    }

    /// Returns the neuron's last computed value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns the neuron's bias.
    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Sets the neuron's bias.
    pub fn set_bias(&mut self, bias: f64) {
        self.bias = bias;
    }

    /// Returns the bias gradient accumulated by
    /// the last backward pass(es).
    pub fn gradient(&self) -> f64 {
        self.gradient
    }

    /// Returns the momentum velocity of the bias.
    pub fn bias_velocity(&self) -> f64 {
        self.bias_velocity
    }

    /// Returns the neuron's activation function.
    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Returns the neuron's incoming weights, one per
    /// neuron in the previous layer.
    pub fn weights(&self) -> &[Weight] {
        &self.weights
    }

    /// Returns the neuron's incoming weights mutably.
    pub fn weights_mut(&mut self) -> &mut [Weight] {
        &mut self.weights
    }

    /// Derivative of the activation at the last forward pass.
    pub(super) fn activation_derivative(&self) -> f64 {
        self.activation.derivative(self.pre_activation, self.value)
    }
}

impl Clone for Neuron {
    fn clone(&self) -> Neuron {
        Neuron {
            value: self.value,
            pre_activation: 0.0,
            bias: self.bias,
            bias_velocity: self.bias_velocity,
            gradient: 0.0,
            delta: 0.0,
            weights: self.weights.clone(),
            activation: self.activation,
        }
    }
}

/// An ordered sequence of neurons.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Layer {
    pub(super) neurons: Vec<Neuron>,
}

impl Layer {
    /// Returns the layer's neurons, in index order.
    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    /// Returns the layer's neurons mutably.
    pub fn neurons_mut(&mut self) -> &mut [Neuron] {
        &mut self.neurons
    }

    /// Returns the current value of every neuron in the layer.
    pub fn values(&self) -> Vec<f64> {
        self.neurons.iter().map(|n| n.value).collect()
    }

    /// Returns the number of neurons in the layer.
    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    /// Returns whether the layer has no neurons.
    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_drops_gradients() {
        let mut weight = Weight::new(0.4, NeuronPosition::new(0, 1));
        weight.gradient = 3.0;
        weight.velocity = -0.2;
        let mut neuron = Neuron::new(vec![weight], 0.1, Activation::Tanh);
        neuron.value = 0.7;
        neuron.pre_activation = 0.9;
        neuron.gradient = 1.5;
        neuron.delta = 2.5;
        neuron.bias_velocity = 0.05;

        let copy = neuron.clone();
        assert_eq!(copy.value, 0.7);
        assert_eq!(copy.bias, 0.1);
        assert_eq!(copy.bias_velocity, 0.05);
        assert_eq!(copy.pre_activation, 0.0);
        assert_eq!(copy.gradient, 0.0);
        assert_eq!(copy.delta, 0.0);
        assert_eq!(copy.weights[0].value, 0.4);
        assert_eq!(copy.weights[0].velocity, -0.2);
        assert_eq!(copy.weights[0].gradient, 0.0);
        assert_eq!(copy.weights[0].source, NeuronPosition::new(0, 1));
    }

    #[test]
    fn position_display() {
        assert_eq!(NeuronPosition::new(2, 5).to_string(), "(2, 5)");
    }
}
