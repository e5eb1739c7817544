use crate::networks::NetworkError;

use std::error::Error;
use std::fmt;

/// An error type indicating a population
/// could not be scored or trained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PopulationError {
    /// A network rejected the data it was given.
    Network(NetworkError),
    /// A trial set was built with more inputs than outputs, or vice versa.
    TrialLengthMismatch { inputs: usize, outputs: usize },
    /// Scoring was attempted without any trials.
    EmptyTrialSet,
}

impl fmt::Display for PopulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(e) => write!(f, "network error: {}", e),
            Self::TrialLengthMismatch { inputs, outputs } => write!(
                f,
                "trial set with {} inputs but {} outputs",
                inputs, outputs
            ),
            Self::EmptyTrialSet => write!(f, "attempted scoring on an empty trial set"),
        }
    }
}

impl Error for PopulationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Network(e) => Some(e),
            _ => None,
        }
    }
}

impl From<NetworkError> for PopulationError {
    fn from(e: NetworkError) -> PopulationError {
        PopulationError::Network(e)
    }
}
