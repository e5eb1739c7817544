//! Evaluation of two-input networks over a rectangular grid.
//!
//! The sampled matrices are row-major: the first axis varies
//! along a row (across columns), the second axis down the rows.
use super::{Network, NetworkError};

use serde::{Deserialize, Serialize};

/// A rectangular lattice of two-dimensional input points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    /// Range spanned by the first input, across columns.
    pub axis1: (f64, f64),
    /// Range spanned by the second input, down the rows.
    pub axis2: (f64, f64),
    pub rows: usize,
    pub columns: usize,
}

impl Grid {
    /// Returns the input point in row `row` and column `column`.
    ///
    /// Both ends of each range are included. An axis
    /// with a single point sits at the low end of its range.
    ///
    /// # Examples
    /// ```
    /// use evoprop::networks::sampling::Grid;
    ///
    /// let grid = Grid {
    ///     axis1: (-1.0, 1.0),
    ///     axis2: (0.0, 10.0),
    ///     rows: 3,
    ///     columns: 5,
    /// };
    /// assert_eq!(grid.point(0, 0), [-1.0, 0.0]);
    /// assert_eq!(grid.point(1, 2), [0.0, 5.0]);
    /// assert_eq!(grid.point(2, 4), [1.0, 10.0]);
    /// ```
    pub fn point(&self, row: usize, column: usize) -> [f64; 2] {
        [
            axis_value(self.axis1, self.columns, column),
            axis_value(self.axis2, self.rows, row),
        ]
    }

    /// Returns every point of the grid, row by row.
    pub fn points(&self) -> impl Iterator<Item = Vec<[f64; 2]>> + '_ {
        (0..self.rows).map(move |r| (0..self.columns).map(|c| self.point(r, c)).collect())
    }
}

fn axis_value((low, high): (f64, f64), count: usize, i: usize) -> f64 {
    if count < 2 {
        low
    } else {
        low + i as f64 * (high - low) / (count - 1) as f64
    }
}

impl Network {
    /// Runs the network on every point of `grid`, and returns
    /// the first output of each.
    ///
    /// # Errors
    /// Returns an error if the network does not take two inputs.
    ///
    /// # Examples
    /// ```
    /// use evoprop::networks::{sampling::Grid, Network, NetworkConfig};
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use std::num::NonZeroUsize;
    ///
    /// let config = NetworkConfig {
    ///     input_count: NonZeroUsize::new(2).unwrap(),
    ///     ..NetworkConfig::zero()
    /// };
    /// let mut network = Network::new(&config, &mut StdRng::seed_from_u64(0));
    /// let grid = Grid { axis1: (-1.0, 1.0), axis2: (-1.0, 1.0), rows: 2, columns: 3 };
    ///
    /// let outputs = network.sample_outputs(&grid).unwrap();
    /// assert_eq!(outputs, vec![vec![0.5; 3]; 2]);
    /// ```
    pub fn sample_outputs(&mut self, grid: &Grid) -> Result<Vec<Vec<f64>>, NetworkError> {
        grid.points()
            .map(|row| {
                row.iter()
                    .map(|point| Ok(self.run(point)?.neurons[0].value))
                    .collect::<Result<Vec<f64>, NetworkError>>()
            })
            .collect()
    }

    /// Runs the network on every point of `grid`, and returns
    /// `target - output` for the first output of each, with
    /// targets given by `label_fn`.
    ///
    /// # Errors
    /// Returns an error if the network does not take two inputs,
    /// or if `label_fn` does not return one target per output.
    pub fn sample_errors<F>(
        &mut self,
        grid: &Grid,
        label_fn: F,
    ) -> Result<Vec<Vec<f64>>, NetworkError>
    where
        F: Fn(&[f64]) -> Vec<f64>,
    {
        let output_count = self.output_count();
        grid.points()
            .map(|row| {
                row.iter()
                    .map(|point| {
                        let target = label_fn(&point[..]);
                        if target.len() != output_count {
                            return Err(NetworkError::OutputSizeMismatch {
                                expected: output_count,
                                got: target.len(),
                            });
                        }
                        let output = self.run(point)?.neurons[0].value;
                        Ok(target[0] - output)
                    })
                    .collect::<Result<Vec<f64>, NetworkError>>()
            })
            .collect()
    }
}

/// Returns the first target `label_fn` assigns to
/// every point of `grid`.
///
/// # Panics
/// Panics if `label_fn` returns an empty vector.
///
/// # Examples
/// ```
/// use evoprop::networks::sampling::{sample_targets, Grid};
///
/// let grid = Grid { axis1: (0.0, 1.0), axis2: (0.0, 2.0), rows: 2, columns: 2 };
/// let targets = sample_targets(&grid, |x| vec![x[0] * x[1]]);
/// assert_eq!(targets, vec![vec![0.0, 0.0], vec![0.0, 2.0]]);
/// ```
pub fn sample_targets<F>(grid: &Grid, label_fn: F) -> Vec<Vec<f64>>
where
    F: Fn(&[f64]) -> Vec<f64>,
{
    grid.points()
        .map(|row| row.iter().map(|point| label_fn(&point[..])[0]).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::networks::{Activation, NetworkConfig};
    use rand::{rngs::StdRng, SeedableRng};
    use std::num::NonZeroUsize;

    fn two_input(output_count: usize) -> Network {
        let config = NetworkConfig {
            input_count: NonZeroUsize::new(2).unwrap(),
            hidden_sizes: vec![3],
            output_count: NonZeroUsize::new(output_count).unwrap(),
            hidden_activation: Activation::Tanh,
            output_activation: Activation::Tanh,
            random_weights: true,
            random_biases: true,
            ..NetworkConfig::zero()
        };
        Network::new(&config, &mut StdRng::seed_from_u64(11))
    }

    #[test]
    fn single_point_axes() {
        let grid = Grid {
            axis1: (0.25, 9.0),
            axis2: (-3.0, 3.0),
            rows: 1,
            columns: 1,
        };
        let points: Vec<_> = grid.points().collect();
        assert_eq!(points, vec![vec![[0.25, -3.0]]]);
    }

    #[test]
    fn empty_grid() {
        let grid = Grid {
            axis1: (0.0, 1.0),
            axis2: (0.0, 1.0),
            rows: 0,
            columns: 4,
        };
        assert_eq!(grid.points().count(), 0);
        assert!(sample_targets(&grid, |_| vec![1.0]).is_empty());
    }

    #[test]
    fn outputs_are_row_major() {
        let mut network = two_input(1);
        let grid = Grid {
            axis1: (-1.0, 1.0),
            axis2: (0.0, 0.5),
            rows: 2,
            columns: 3,
        };
        let outputs = network.sample_outputs(&grid).unwrap();

        assert_eq!(outputs.len(), 2);
        for (r, row) in outputs.iter().enumerate() {
            assert_eq!(row.len(), 3);
            for (c, &value) in row.iter().enumerate() {
                let expected = network.run(&grid.point(r, c)).unwrap().values()[0];
                assert_eq!(value, expected);
            }
        }
    }

    #[test]
    fn errors_are_target_minus_output() {
        let mut network = two_input(1);
        let grid = Grid {
            axis1: (-1.0, 1.0),
            axis2: (-1.0, 1.0),
            rows: 4,
            columns: 4,
        };
        let label = |x: &[f64]| vec![x[0] * x[1]];
        let outputs = network.sample_outputs(&grid).unwrap();
        let targets = sample_targets(&grid, label);
        let errors = network.sample_errors(&grid, label).unwrap();

        for r in 0..4 {
            for c in 0..4 {
                assert_eq!(errors[r][c], targets[r][c] - outputs[r][c]);
            }
        }
    }

    #[test]
    fn wrong_shapes() {
        let grid = Grid {
            axis1: (0.0, 1.0),
            axis2: (0.0, 1.0),
            rows: 2,
            columns: 2,
        };
        let mut single_input =
            Network::new(&NetworkConfig::zero(), &mut StdRng::seed_from_u64(0));
        assert_eq!(
            single_input.sample_outputs(&grid),
            Err(NetworkError::InputSizeMismatch {
                expected: 1,
                got: 2
            })
        );

        let mut network = two_input(2);
        assert_eq!(
            network.sample_errors(&grid, |_| vec![0.0]),
            Err(NetworkError::OutputSizeMismatch {
                expected: 2,
                got: 1
            })
        );
    }
}
