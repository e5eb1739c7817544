//! Frozen input/target pairs used to score networks.
use super::PopulationError;

use serde::{Deserialize, Serialize};

/// A set of trial inputs and the outputs expected for each.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrialSet {
    inputs: Vec<Vec<f64>>,
    outputs: Vec<Vec<f64>>,
}

impl TrialSet {
    /// Pairs each input with the output at the same index.
    ///
    /// # Errors
    /// Returns an error if there are not as many outputs as inputs.
    ///
    /// # Examples
    /// ```
    /// use evoprop::trials::TrialSet;
    ///
    /// let trials = TrialSet::new(vec![vec![1.0, 0.0]], vec![vec![1.0]]).unwrap();
    /// assert_eq!(trials.len(), 1);
    /// assert!(TrialSet::new(vec![vec![1.0]], vec![]).is_err());
    /// ```
    pub fn new(inputs: Vec<Vec<f64>>, outputs: Vec<Vec<f64>>) -> Result<TrialSet, PopulationError> {
        if inputs.len() != outputs.len() {
            return Err(PopulationError::TrialLengthMismatch {
                inputs: inputs.len(),
                outputs: outputs.len(),
            });
        }
        Ok(TrialSet { inputs, outputs })
    }

    /// Computes the expected output of every input with `label_fn`,
    /// once, and stores both.
    ///
    /// # Examples
    /// ```
    /// use evoprop::trials::TrialSet;
    ///
    /// let trials = TrialSet::labelled(vec![vec![2.0], vec![3.0]], |x| vec![x[0] * x[0]]);
    /// assert_eq!(trials.outputs(), &[vec![4.0], vec![9.0]]);
    /// ```
    pub fn labelled<F>(inputs: Vec<Vec<f64>>, label_fn: F) -> TrialSet
    where
        F: Fn(&[f64]) -> Vec<f64>,
    {
        let outputs = inputs.iter().map(|input| label_fn(input.as_slice())).collect();
        TrialSet { inputs, outputs }
    }

    pub fn inputs(&self) -> &[Vec<f64>] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Vec<f64>] {
        &self.outputs
    }

    /// Returns the number of trials.
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Iterates over all input/output pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&[f64], &[f64])> {
        self.inputs
            .iter()
            .zip(&self.outputs)
            .map(|(i, o)| (i.as_slice(), o.as_slice()))
    }
}

/// Upper bound slack, relative to the spacing, which absorbs
/// the rounding error accumulated by `low + k * spacing`.
const LATTICE_TOLERANCE: f64 = 1e-9;

/// Returns every `dimensions`-long combination of the values
/// `low, low + spacing, low + 2 * spacing, ...` up to `high`
/// inclusive. Earlier coordinates vary slowest.
///
/// A non-positive spacing or an empty range yields no points.
/// Zero dimensions yield a single empty point.
///
/// # Examples
/// ```
/// use evoprop::trials::lattice;
///
/// let points = lattice(2, -1.0, 1.0, 1.0);
/// assert_eq!(points.len(), 9);
/// assert_eq!(points[0], vec![-1.0, -1.0]);
/// assert_eq!(points[1], vec![-1.0, 0.0]);
/// assert_eq!(points[8], vec![1.0, 1.0]);
///
/// // Ten steps of 0.1 still reach the upper bound.
/// assert_eq!(lattice(1, -1.0, 1.0, 0.1).len(), 21);
/// ```
pub fn lattice(dimensions: usize, low: f64, high: f64, spacing: f64) -> Vec<Vec<f64>> {
    let values: Vec<f64> = if spacing > 0.0 {
        (0usize..)
            .map(|k| low + k as f64 * spacing)
            .take_while(|v| *v <= high + spacing * LATTICE_TOLERANCE)
            .collect()
    } else {
        vec![]
    };

    let mut points = vec![vec![]];
    for _ in 0..dimensions {
        points = points
            .into_iter()
            .flat_map(|prefix: Vec<f64>| {
                values.iter().map(move |&v| {
                    let mut point = prefix.clone();
                    point.push(v);
                    point
                })
            })
            .collect();
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lattice_order_and_values() {
        let points = lattice(3, 0.0, 0.5, 0.25);
        assert_eq!(points.len(), 27);
        assert_eq!(points[0], vec![0.0, 0.0, 0.0]);
        assert_eq!(points[1], vec![0.0, 0.0, 0.25]);
        assert_eq!(points[3], vec![0.0, 0.25, 0.0]);
        assert_eq!(points[9], vec![0.25, 0.0, 0.0]);
        assert_eq!(points[26], vec![0.5, 0.5, 0.5]);
    }

    #[test]
    fn lattice_upper_bound() {
        let values: Vec<f64> = lattice(1, -1.0, 1.0, 0.1).into_iter().map(|p| p[0]).collect();
        assert_eq!(values.len(), 21);
        assert_eq!(values[0], -1.0);
        assert!((values[20] - 1.0).abs() < 1e-12);
        assert_eq!(values[10], -1.0 + 10.0 * 0.1);

        // A spacing that doesn't divide the range stops short of `high`.
        assert_eq!(lattice(1, 0.0, 1.0, 0.3).len(), 4);
    }

    #[test]
    fn lattice_degenerate() {
        assert!(lattice(2, 0.0, 1.0, 0.0).is_empty());
        assert!(lattice(2, 0.0, 1.0, -0.5).is_empty());
        assert!(lattice(2, 1.0, 0.0, 0.1).is_empty());
        assert_eq!(lattice(0, 0.0, 1.0, 0.1), vec![Vec::<f64>::new()]);
        assert_eq!(lattice(1, 0.5, 0.5, 0.1), vec![vec![0.5]]);
    }

    #[test]
    fn labelled_calls_label_once_per_input() {
        let calls = std::cell::Cell::new(0);
        let trials = TrialSet::labelled(lattice(2, 0.0, 1.0, 0.5), |x| {
            calls.set(calls.get() + 1);
            vec![x[0] - x[1]]
        });
        assert_eq!(calls.get(), 9);
        assert_eq!(trials.len(), 9);
        for (input, output) in trials.iter() {
            assert_eq!(output, &[input[0] - input[1]]);
        }
    }

    #[test]
    fn mismatched_lengths() {
        assert_eq!(
            TrialSet::new(vec![vec![0.0]; 3], vec![vec![0.0]; 2]),
            Err(PopulationError::TrialLengthMismatch {
                inputs: 3,
                outputs: 2
            })
        );
    }
}
