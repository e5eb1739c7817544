use std::error::Error;
use std::fmt;

/// An error type indicating a network was
/// given data of the wrong shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NetworkError {
    /// The input vector's length differs from the input layer size.
    InputSizeMismatch { expected: usize, got: usize },
    /// The target vector's length differs from the output layer size.
    OutputSizeMismatch { expected: usize, got: usize },
    /// A training batch has a different number of inputs and targets.
    BatchLengthMismatch { inputs: usize, targets: usize },
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputSizeMismatch { expected, got } => write!(
                f,
                "wrong number of inputs, expected {} but received {}",
                expected, got
            ),
            Self::OutputSizeMismatch { expected, got } => write!(
                f,
                "wrong number of outputs, expected {} but received {}",
                expected, got
            ),
            Self::BatchLengthMismatch { inputs, targets } => write!(
                f,
                "training batch with {} inputs but {} targets",
                inputs, targets
            ),
        }
    }
}

impl Error for NetworkError {}
