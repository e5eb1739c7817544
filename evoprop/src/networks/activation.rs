use serde::{Deserialize, Serialize};

use std::fmt;

/// The activation function applied by every
/// neuron of a non-input layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Activation {
    // 0   if x ≤ 0
    // x   if x > 0
    Relu,
    // 1 / (1 + exp(-x))
    Sigmoid,
    // tanh(x)
    Tanh,
}

impl Activation {
    /// Applies the function to a pre-activation value.
    ///
    /// # Examples
    /// ```
    /// use evoprop::networks::Activation;
    ///
    /// assert_eq!(Activation::Relu.activate(-2.0), 0.0);
    /// assert_eq!(Activation::Relu.activate(1.5), 1.5);
    /// assert_eq!(Activation::Sigmoid.activate(0.0), 0.5);
    /// assert_eq!(Activation::Tanh.activate(0.5), 0.5f64.tanh());
    /// ```
    pub fn activate(self, x: f64) -> f64 {
        match self {
            Activation::Relu => {
                if x <= 0.0 {
                    0.0
                } else {
                    x
                }
            }
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Activation::Tanh => x.tanh(),
        }
    }

    /// Returns the derivative of the function at `pre`,
    /// where `post` is the already computed `activate(pre)`.
    ///
    /// Sigmoid and tanh derivatives only read `post`;
    /// relu only reads `pre`.
    ///
    /// # Examples
    /// ```
    /// use evoprop::networks::Activation;
    ///
    /// assert_eq!(Activation::Relu.derivative(0.3, 0.3), 1.0);
    /// assert_eq!(Activation::Relu.derivative(0.0, 0.0), 0.0);
    /// assert_eq!(Activation::Sigmoid.derivative(0.0, 0.5), 0.25);
    /// assert_eq!(Activation::Tanh.derivative(0.0, 0.0), 1.0);
    /// ```
    pub fn derivative(self, pre: f64, post: f64) -> f64 {
        match self {
            Activation::Relu => {
                if pre > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Activation::Sigmoid => post * (1.0 - post),
            Activation::Tanh => 1.0 - post * post,
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Activation::Relu => "relu",
            Activation::Sigmoid => "sigmoid",
            Activation::Tanh => "tanh",
        };
        write!(f, "{}", name)
    }
}
