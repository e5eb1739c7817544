use serde::{Deserialize, Serialize};

use std::f64::consts::PI;
use std::fmt;

/// Two-input, one-output functions the networks learn to approximate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetFunction {
    /// 1 on one side of the curve `x = sin(2πy)`, -1 on the other.
    Wave,
    /// A cone peaking at 1 on the origin, clamped to [-1, 1].
    Radial,
    /// The product of both inputs.
    Xy,
}

impl TargetFunction {
    /// Returns the expected output for `inputs`.
    ///
    /// # Panics
    /// Panics if `inputs` has fewer than two values.
    pub fn label(self, inputs: &[f64]) -> Vec<f64> {
        let (x, y) = (inputs[0], inputs[1]);
        let out = match self {
            Self::Wave => {
                if x > (y * 2.0 * PI).sin() {
                    1.0
                } else {
                    -1.0
                }
            }
            Self::Radial => (1.0 - 2.0 * (x * x + y * y)).clamp(-1.0, 1.0),
            Self::Xy => x * y,
        };
        vec![out]
    }
}

impl fmt::Display for TargetFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wave => write!(f, "wave"),
            Self::Radial => write!(f, "radial"),
            Self::Xy => write!(f, "xy"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wave() {
        assert_eq!(TargetFunction::Wave.label(&[0.5, 0.0]), vec![1.0]);
        assert_eq!(TargetFunction::Wave.label(&[-0.5, 0.0]), vec![-1.0]);
        assert_eq!(TargetFunction::Wave.label(&[0.9, 0.25]), vec![-1.0]);
        assert_eq!(TargetFunction::Wave.label(&[0.0, 0.75]), vec![1.0]);
    }

    #[test]
    fn radial() {
        assert_eq!(TargetFunction::Radial.label(&[0.0, 0.0]), vec![1.0]);
        assert_eq!(TargetFunction::Radial.label(&[0.5, 0.0]), vec![0.5]);
        assert_eq!(TargetFunction::Radial.label(&[1.0, 1.0]), vec![-1.0]);
    }

    #[test]
    fn xy() {
        assert_eq!(TargetFunction::Xy.label(&[-0.5, 0.5]), vec![-0.25]);
    }
}
