//! A Population is a fixed-size collection of networks
//! sharing a topology and a frozen trial set. It can be
//! evolved by elitist truncation selection, and its best
//! network refined by gradient descent.
mod config;
mod errors;
pub mod logging;
pub mod trials;

pub use config::PopulationConfig;
pub use errors::PopulationError;
use trials::TrialSet;

use crate::networks::{MutationConfig, Network, NetworkConfig, NetworkError};

use log::{debug, info};
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use std::cmp::Ordering;

/// A population of networks.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Population {
    networks: Vec<Network>,
    trials: TrialSet,
    generation: usize,
    population_config: PopulationConfig,
    network_config: NetworkConfig,
}

impl Population {
    /// Creates a new population using the passed configurations.
    /// Every network is initialized independently from `rng`.
    ///
    /// The population starts with no trials; see [`create_trials`].
    ///
    /// [`create_trials`]: Population::create_trials
    ///
    /// # Examples
    /// ```
    /// use evoprop::networks::NetworkConfig;
    /// use evoprop::{Population, PopulationConfig};
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use std::num::NonZeroUsize;
    ///
    /// let pop_config = PopulationConfig {
    ///     size: NonZeroUsize::new(16).unwrap(),
    ///     ..PopulationConfig::zero()
    /// };
    /// let network_config = NetworkConfig {
    ///     random_weights: true,
    ///     ..NetworkConfig::zero()
    /// };
    ///
    /// let population = Population::new(pop_config, network_config, &mut StdRng::seed_from_u64(0));
    /// assert_eq!(population.networks().len(), 16);
    /// assert_eq!(population.generation(), 0);
    /// ```
    pub fn new<R: Rng + ?Sized>(
        population_config: PopulationConfig,
        network_config: NetworkConfig,
        rng: &mut R,
    ) -> Population {
        Population {
            networks: (0..population_config.size.get())
                .map(|_| Network::new(&network_config, rng))
                .collect(),
            trials: TrialSet::default(),
            generation: 0,
            population_config,
            network_config,
        }
    }

    /// Replaces the trial set: stores `inputs` as they are, and
    /// the output `label_fn` gives for each of them, computed once.
    ///
    /// Errors of previous generations are not comparable with
    /// those scored on the new trials.
    ///
    /// # Errors
    /// Returns an error if any input or labelled output doesn't
    /// match the networks' shape. The trial set is left unchanged
    /// in that case.
    ///
    /// # Examples
    /// ```
    /// use evoprop::networks::NetworkConfig;
    /// use evoprop::{Population, PopulationConfig};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let mut rng = StdRng::seed_from_u64(0);
    /// let mut population = Population::new(PopulationConfig::zero(), NetworkConfig::zero(), &mut rng);
    ///
    /// population
    ///     .create_trials(vec![vec![-1.0], vec![1.0]], |x| vec![x[0].abs()])
    ///     .unwrap();
    /// assert_eq!(population.trials().outputs(), &[vec![1.0], vec![1.0]]);
    ///
    /// // Networks take a single input.
    /// assert!(population.create_trials(vec![vec![0.0, 0.0]], |_| vec![0.0]).is_err());
    /// assert_eq!(population.trials().len(), 2);
    /// ```
    pub fn create_trials<F>(
        &mut self,
        inputs: Vec<Vec<f64>>,
        label_fn: F,
    ) -> Result<(), PopulationError>
    where
        F: Fn(&[f64]) -> Vec<f64>,
    {
        self.set_trials(TrialSet::labelled(inputs, label_fn))
    }

    /// Replaces the trial set with a prebuilt one.
    ///
    /// # Errors
    /// Returns an error if any trial doesn't match the networks' shape.
    pub fn set_trials(&mut self, trials: TrialSet) -> Result<(), PopulationError> {
        let (input_count, output_count) = (
            self.network_config.input_count.get(),
            self.network_config.output_count.get(),
        );
        for (input, output) in trials.iter() {
            if input.len() != input_count {
                return Err(NetworkError::InputSizeMismatch {
                    expected: input_count,
                    got: input.len(),
                }
                .into());
            }
            if output.len() != output_count {
                return Err(NetworkError::OutputSizeMismatch {
                    expected: output_count,
                    got: output.len(),
                }
                .into());
            }
        }
        debug!("created {} trials", trials.len());
        self.trials = trials;
        Ok(())
    }

    /// Runs every network on the same inputs.
    ///
    /// # Errors
    /// Returns an error if `inputs` doesn't match the networks' input size.
    pub fn run(&mut self, inputs: &[f64]) -> Result<(), PopulationError> {
        for network in &mut self.networks {
            network.run(inputs)?;
        }
        Ok(())
    }

    /// Mutates every network, survivors included.
    pub fn mutate<R: Rng + ?Sized>(&mut self, mutation: &MutationConfig, rng: &mut R) {
        for network in &mut self.networks {
            network.mutate(mutation, rng);
        }
    }

    /// Scores the current output of every network against
    /// `targets`, overwriting their errors. The configured
    /// trial power is used as the error exponent.
    ///
    /// # Errors
    /// Returns an error if `targets` doesn't match the networks'
    /// output size. No network is scored in that case.
    pub fn test_error(&mut self, targets: &[f64]) -> Result<(), PopulationError> {
        let output_count = self.network_config.output_count.get();
        if targets.len() != output_count {
            return Err(NetworkError::OutputSizeMismatch {
                expected: output_count,
                got: targets.len(),
            }
            .into());
        }
        let power = self.population_config.trial_power;
        for network in &mut self.networks {
            network.test_error(targets, false, power)?;
        }
        Ok(())
    }

    /// Scores every network over an arbitrary input/output set,
    /// adding onto their current errors before averaging, as in
    /// [`Network::test_error_trials`]. Networks are scored in parallel.
    ///
    /// # Errors
    /// Returns an error if the set is empty, if `inputs` and
    /// `outputs` differ in length, or if any pair doesn't match
    /// the networks' shape. No network is scored in that case.
    pub fn test_error_trials(
        &mut self,
        inputs: &[Vec<f64>],
        outputs: &[Vec<f64>],
        power: f64,
    ) -> Result<(), PopulationError> {
        if inputs.len() != outputs.len() {
            return Err(PopulationError::TrialLengthMismatch {
                inputs: inputs.len(),
                outputs: outputs.len(),
            });
        }
        if inputs.is_empty() {
            return Err(PopulationError::EmptyTrialSet);
        }
        self.networks[0].check_trials(inputs, outputs)?;
        self.networks
            .par_iter_mut()
            .try_for_each(|n| n.test_error_trials(inputs, outputs, power))?;
        Ok(())
    }

    /// Sets the error and mean error of every network to 0.
    pub fn reset_error(&mut self) {
        for network in &mut self.networks {
            network.reset_error();
        }
    }

    /// Sorts the networks by increasing error. Equal errors keep
    /// their relative order, and NaN errors come last.
    pub fn sort(&mut self) {
        self.networks
            .sort_by(|a, b| error_order(a.error(), b.error()));
    }

    /// Sorts the networks and keeps only the best `count`,
    /// or the single best one if `count` is 0.
    pub fn cull(&mut self, count: usize) {
        self.sort();
        self.networks.truncate(count.max(1));
    }

    /// Refills the population up to its configured size with
    /// mutated clones of the current networks, cycling through
    /// them in order. The current networks are left untouched.
    ///
    /// # Examples
    /// ```
    /// use evoprop::networks::{MutationConfig, NetworkConfig};
    /// use evoprop::{Population, PopulationConfig};
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use std::num::NonZeroUsize;
    ///
    /// let mut rng = StdRng::seed_from_u64(0);
    /// let config = PopulationConfig {
    ///     size: NonZeroUsize::new(5).unwrap(),
    ///     ..PopulationConfig::zero()
    /// };
    /// let mut population = Population::new(config, NetworkConfig::zero(), &mut rng);
    ///
    /// population.cull(2);
    /// assert_eq!(population.networks().len(), 2);
    /// population.reproduce_survivors(&MutationConfig::zero(), &mut rng);
    /// assert_eq!(population.networks().len(), 5);
    /// ```
    pub fn reproduce_survivors<R: Rng + ?Sized>(&mut self, mutation: &MutationConfig, rng: &mut R) {
        let survivors = self.networks.len();
        let size = self.population_config.size.get();
        if survivors == 0 {
            return;
        }
        for i in 0..size.saturating_sub(survivors) {
            let mut child = self.networks[i % survivors].clone();
            child.mutate(mutation, rng);
            self.networks.push(child);
        }
    }

    /// Runs one generation of evolution and returns the best error
    /// found while scoring it:
    ///
    /// 1. every network is scored from scratch over the trial set,
    /// 2. networks are sorted by increasing error,
    /// 3. the best half (rounded down, at least one) survives as is,
    /// 4. the population is refilled with mutated clones of survivors.
    ///
    /// # Errors
    /// Returns an error if the trial set is empty, in which case
    /// the population is left unchanged.
    ///
    /// # Examples
    /// ```
    /// use evoprop::networks::{MutationConfig, NetworkConfig};
    /// use evoprop::{Population, PopulationConfig};
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use std::num::NonZeroUsize;
    ///
    /// let mut rng = StdRng::seed_from_u64(0);
    /// let mut population = Population::new(
    ///     PopulationConfig {
    ///         size: NonZeroUsize::new(8).unwrap(),
    ///         ..PopulationConfig::zero()
    ///     },
    ///     NetworkConfig {
    ///         random_weights: true,
    ///         random_biases: true,
    ///         ..NetworkConfig::zero()
    ///     },
    ///     &mut rng,
    /// );
    /// population
    ///     .create_trials(vec![vec![0.0], vec![1.0]], |x| vec![1.0 - x[0]])
    ///     .unwrap();
    ///
    /// let mutation = MutationConfig {
    ///     weight_edits: 1,
    ///     weight_strength: 0.1,
    ///     bias_edits: 1,
    ///     bias_strength: 0.1,
    /// };
    /// let mut best = f64::INFINITY;
    /// for _ in 0..10 {
    ///     let error = population.run_generation(&mutation, &mut rng).unwrap();
    ///     // Survivors are never mutated, so the best error can't grow.
    ///     assert!(error <= best);
    ///     best = error;
    /// }
    /// assert_eq!(population.generation(), 10);
    /// ```
    pub fn run_generation<R: Rng + ?Sized>(
        &mut self,
        mutation: &MutationConfig,
        rng: &mut R,
    ) -> Result<f64, PopulationError> {
        if self.trials.is_empty() {
            return Err(PopulationError::EmptyTrialSet);
        }
        self.generation += 1;
        self.score()?;
        self.sort();
        let best = self.networks[0].error();
        debug!(
            "generation {}: best error {} (mean error {}), weight strength {}, bias strength {}",
            self.generation,
            best,
            self.networks[0].mean_error(),
            mutation.weight_strength,
            mutation.bias_strength
        );

        self.networks
            .truncate(self.population_config.survivor_count());
        self.reproduce_survivors(mutation, rng);
        Ok(best)
    }

    /// Refines the best network by `epochs` full-batch gradient
    /// descent steps over the trial set, and returns its error.
    ///
    /// The population is rescored and sorted first. If training
    /// doesn't improve on the best error (or produces NaN), the
    /// network is restored to its state before training, and the
    /// previous error is returned. The result thus never exceeds
    /// the best error of the population before the call.
    ///
    /// # Errors
    /// Returns an error if the trial set is empty.
    ///
    /// # Examples
    /// ```
    /// use evoprop::networks::{Activation, NetworkConfig};
    /// use evoprop::{Population, PopulationConfig};
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use std::num::NonZeroUsize;
    ///
    /// let mut rng = StdRng::seed_from_u64(0);
    /// let mut population = Population::new(
    ///     PopulationConfig {
    ///         size: NonZeroUsize::new(4).unwrap(),
    ///         ..PopulationConfig::zero()
    ///     },
    ///     NetworkConfig {
    ///         output_activation: Activation::Tanh,
    ///         random_weights: true,
    ///         learning_rate: 0.05,
    ///         momentum: 0.5,
    ///         ..NetworkConfig::zero()
    ///     },
    ///     &mut rng,
    /// );
    /// population
    ///     .create_trials(vec![vec![-0.5], vec![0.5]], |x| vec![x[0]])
    ///     .unwrap();
    ///
    /// let error = population.train_backpropagation(20).unwrap();
    /// assert_eq!(population.champion().error(), error);
    /// ```
    pub fn train_backpropagation(&mut self, epochs: usize) -> Result<f64, PopulationError> {
        self.score()?;
        self.sort();
        let before = self.networks[0].error();
        let backup = self.networks[0].clone();

        let power = self.population_config.trial_power;
        let (inputs, outputs) = (self.trials.inputs(), self.trials.outputs());
        let champion = &mut self.networks[0];
        let trained = (0..epochs)
            .try_for_each(|_| champion.train_batch(inputs, outputs))
            .and_then(|_| {
                champion.reset_error();
                champion.test_error_trials(inputs, outputs, power)
            });
        if let Err(e) = trained {
            *champion = backup;
            return Err(e.into());
        }

        let after = champion.error();
        // Also rejects NaN.
        if after <= before {
            info!(
                "backpropagation accepted: error {} -> {} after {} epochs",
                before, after, epochs
            );
            Ok(after)
        } else {
            info!(
                "backpropagation rolled back: error {} -> {} after {} epochs",
                before, after, epochs
            );
            *champion = backup;
            Ok(before)
        }
    }

    /// Scores every network from scratch over the trial set.
    fn score(&mut self) -> Result<(), PopulationError> {
        if self.trials.is_empty() {
            return Err(PopulationError::EmptyTrialSet);
        }
        let power = self.population_config.trial_power;
        let (inputs, outputs) = (self.trials.inputs(), self.trials.outputs());
        self.networks.par_iter_mut().try_for_each(|n| {
            n.reset_error();
            n.test_error_trials(inputs, outputs, power)
        })?;
        Ok(())
    }

    /// Returns the current generation number.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Returns all networks. After a generation or a sort,
    /// they are ordered from best to worst.
    pub fn networks(&self) -> &[Network] {
        &self.networks
    }

    /// Returns the first network, which is the best one
    /// as of the last generation or sort.
    pub fn champion(&self) -> &Network {
        &self.networks[0]
    }

    pub fn trials(&self) -> &TrialSet {
        &self.trials
    }

    /// Returns the configured population size.
    pub fn size(&self) -> usize {
        self.population_config.size.get()
    }

    pub fn config(&self) -> &PopulationConfig {
        &self.population_config
    }

    pub fn network_config(&self) -> &NetworkConfig {
        &self.network_config
    }
}

/// Ascending order of errors, with NaN (of either sign) last.
fn error_order(a: f64, b: f64) -> Ordering {
    a.is_nan()
        .cmp(&b.is_nan())
        .then_with(|| a.total_cmp(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::networks::Activation;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, SeedableRng};
    use std::num::NonZeroUsize;

    fn population(size: usize, hidden_sizes: Vec<usize>, seed: u64) -> Population {
        trained_population(size, hidden_sizes, seed, 0.01)
    }

    fn trained_population(
        size: usize,
        hidden_sizes: Vec<usize>,
        seed: u64,
        learning_rate: f64,
    ) -> Population {
        let network_config = NetworkConfig {
            input_count: NonZeroUsize::new(2).unwrap(),
            hidden_sizes,
            hidden_activation: Activation::Tanh,
            output_activation: Activation::Tanh,
            random_weights: true,
            random_biases: true,
            learning_rate,
            momentum: 0.0,
            ..NetworkConfig::zero()
        };
        let mut population = Population::new(
            PopulationConfig {
                size: NonZeroUsize::new(size).unwrap(),
                ..PopulationConfig::zero()
            },
            network_config,
            &mut StdRng::seed_from_u64(seed),
        );
        population
            .create_trials(
                vec![vec![1.0, 0.0], vec![0.0, 1.0]],
                |x| vec![x[0] - x[1]],
            )
            .unwrap();
        population
    }

    fn mutation() -> MutationConfig {
        MutationConfig {
            weight_edits: 3,
            weight_strength: 0.5,
            bias_edits: 3,
            bias_strength: 0.5,
        }
    }

    fn parameters(network: &Network) -> Vec<f64> {
        network
            .layers()
            .iter()
            .flat_map(|l| l.neurons())
            .flat_map(|n| std::iter::once(n.bias()).chain(n.weights().iter().map(|w| w.value())))
            .collect()
    }

    #[test]
    fn size_is_kept() {
        let mut rng = StdRng::seed_from_u64(0);
        for size in [1, 2, 5, 16] {
            let mut population = population(size, vec![3], 1);
            assert_eq!(population.networks().len(), size);
            for _ in 0..5 {
                population.run_generation(&mutation(), &mut rng).unwrap();
                assert_eq!(population.networks().len(), size);
            }
        }
    }

    #[test]
    fn two_survivors_of_four() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut population = population(4, vec![], 4);
        let before: Vec<Vec<f64>> = population.networks().iter().map(parameters).collect();

        population.run_generation(&mutation(), &mut rng).unwrap();

        assert_eq!(population.networks().len(), 4);
        let unchanged = population
            .networks()
            .iter()
            .map(parameters)
            .filter(|p| before.contains(p))
            .count();
        assert_eq!(unchanged, 2);
    }

    #[test]
    fn survivors_are_the_best_unmodified() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut population = population(7, vec![4], 6);
        let mut ranked = population.clone();
        ranked.score().unwrap();
        ranked.sort();

        let best = population.run_generation(&mutation(), &mut rng).unwrap();

        assert_eq!(best, ranked.networks()[0].error());
        // 7 networks leave 3 survivors.
        for i in 0..3 {
            assert_eq!(
                parameters(&population.networks()[i]),
                parameters(&ranked.networks()[i])
            );
            assert_eq!(
                population.networks()[i].error(),
                ranked.networks()[i].error()
            );
        }
    }

    #[test]
    fn reproduction_is_round_robin() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut population = population(5, vec![2], 8);
        population
            .run_generation(&MutationConfig::zero(), &mut rng)
            .unwrap();

        let networks = population.networks();
        for (child, parent) in [(2, 0), (3, 1), (4, 0)] {
            assert_eq!(parameters(&networks[child]), parameters(&networks[parent]));
        }
    }

    #[test]
    fn single_network_survives_alone() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut population = population(1, vec![2], 10);
        let before = parameters(population.champion());
        population.run_generation(&mutation(), &mut rng).unwrap();
        assert_eq!(population.networks().len(), 1);
        assert_eq!(parameters(population.champion()), before);
    }

    #[test]
    fn generation_is_reproducible() {
        let run = || {
            let mut rng = StdRng::seed_from_u64(11);
            let mut population = population(6, vec![3], 12);
            for _ in 0..3 {
                population.run_generation(&mutation(), &mut rng).unwrap();
            }
            population.networks().iter().map(parameters).collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn empty_trials() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut population = Population::new(
            PopulationConfig::zero(),
            NetworkConfig::zero(),
            &mut rng,
        );
        assert_eq!(
            population.run_generation(&mutation(), &mut rng),
            Err(PopulationError::EmptyTrialSet)
        );
        assert_eq!(population.generation(), 0);
        assert_eq!(
            population.train_backpropagation(1),
            Err(PopulationError::EmptyTrialSet)
        );
        assert_eq!(
            population.test_error_trials(&[], &[], 2.0),
            Err(PopulationError::EmptyTrialSet)
        );
    }

    #[test]
    fn trials_must_fit_networks() {
        let mut population = population(2, vec![], 0);
        assert_eq!(
            population.create_trials(vec![vec![0.0]], |_| vec![0.0]),
            Err(PopulationError::Network(NetworkError::InputSizeMismatch {
                expected: 2,
                got: 1
            }))
        );
        assert_eq!(
            population.create_trials(vec![vec![0.0, 0.0]], |_| vec![0.0, 0.0]),
            Err(PopulationError::Network(NetworkError::OutputSizeMismatch {
                expected: 1,
                got: 2
            }))
        );
        assert_eq!(population.trials().len(), 2);
    }

    #[test]
    fn test_error_propagates_mismatch() {
        let mut population = population(3, vec![], 0);
        population.run(&[0.5, 0.5]).unwrap();
        assert_eq!(
            population.test_error(&[0.0, 1.0]),
            Err(PopulationError::Network(NetworkError::OutputSizeMismatch {
                expected: 1,
                got: 2
            }))
        );
        assert!(population.run(&[0.5]).is_err());

        population.test_error(&[0.25]).unwrap();
        for network in population.networks() {
            let diff = network.outputs()[0] - 0.25;
            assert_eq!(network.error(), diff.abs().powf(2.0));
        }
    }

    #[test]
    fn test_error_trials_accumulates() {
        let mut population = population(3, vec![2], 13);
        let (inputs, outputs) = (vec![vec![0.1, 0.2]], vec![vec![0.3]]);
        population.reset_error();
        population.test_error_trials(&inputs, &outputs, 2.0).unwrap();
        let single: Vec<f64> = population.networks().iter().map(|n| n.error()).collect();

        // Scoring again without a reset adds the root onto the sum.
        population.test_error_trials(&inputs, &outputs, 2.0).unwrap();
        for (network, e) in population.networks().iter().zip(single) {
            assert_relative_eq!(network.error(), (e + e * e).powf(0.5), epsilon = 1e-12);
        }

        assert_eq!(
            population.test_error_trials(&inputs, &[], 2.0),
            Err(PopulationError::TrialLengthMismatch {
                inputs: 1,
                outputs: 0
            })
        );
    }

    #[test]
    fn test_error_trials_leaves_errors_on_mismatch() {
        let mut population = population(3, vec![2], 13);
        population
            .test_error_trials(&[vec![0.5, 0.5]], &[vec![0.2]], 2.0)
            .unwrap();
        let before: Vec<(f64, f64)> = population
            .networks()
            .iter()
            .map(|n| (n.error(), n.mean_error()))
            .collect();

        let inputs = vec![vec![0.5, 0.5], vec![0.5, 0.5]];
        assert_eq!(
            population.test_error_trials(&inputs, &[vec![3.0], vec![0.0, 0.0]], 2.0),
            Err(PopulationError::Network(NetworkError::OutputSizeMismatch {
                expected: 1,
                got: 2
            }))
        );
        let after: Vec<(f64, f64)> = population
            .networks()
            .iter()
            .map(|n| (n.error(), n.mean_error()))
            .collect();
        assert_eq!(after, before);
    }

    #[test]
    fn sort_puts_nan_last() {
        let mut population = population(4, vec![], 0);
        for (network, error) in population.networks.iter_mut().zip([0.5, f64::NAN, -f64::NAN, 0.1]) {
            network.set_error(error);
        }
        population.sort();
        let errors: Vec<f64> = population.networks().iter().map(|n| n.error()).collect();
        assert_eq!(&errors[..2], &[0.1, 0.5]);
        assert!(errors[2].is_nan() && errors[3].is_nan());
    }

    #[test]
    fn cull_keeps_at_least_one() {
        let mut population = population(4, vec![], 0);
        population.cull(0);
        assert_eq!(population.networks().len(), 1);
        population.reproduce_survivors(&mutation(), &mut StdRng::seed_from_u64(0));
        assert_eq!(population.networks().len(), 4);
    }

    #[test]
    fn mutate_changes_every_network() {
        let mut population = population(3, vec![2], 14);
        let before: Vec<Vec<f64>> = population.networks().iter().map(parameters).collect();
        population.mutate(&mutation(), &mut StdRng::seed_from_u64(1));
        for (network, old) in population.networks().iter().zip(&before) {
            assert_ne!(&parameters(network), old);
        }
    }

    #[test]
    fn backpropagation_never_regresses() {
        for learning_rate in [0.001, 0.1, 50.0] {
            let mut population = trained_population(4, vec![3], 15, learning_rate);
            let mut ranked = population.clone();
            ranked.score().unwrap();
            ranked.sort();
            let before = ranked.networks()[0].error();

            for _ in 0..3 {
                let after = population.train_backpropagation(10).unwrap();
                assert!(after <= before);
                assert_eq!(population.champion().error(), after);
            }
        }
    }

    #[test]
    fn small_steps_are_accepted() {
        let mut population = population(2, vec![3], 16);
        let mut ranked = population.clone();
        ranked.score().unwrap();
        ranked.sort();
        let before = ranked.networks()[0].error();

        let after = population.train_backpropagation(5).unwrap();
        assert!(after < before);
        assert_ne!(
            parameters(population.champion()),
            parameters(&ranked.networks()[0])
        );
    }

    #[test]
    fn serde_roundtrip() {
        let population = population(3, vec![2], 17);
        let json = serde_json::to_string(&population).unwrap();
        let restored: Population = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.networks().len(), 3);
        assert_eq!(restored.trials(), population.trials());
        assert_eq!(restored.config(), population.config());
        assert_eq!(restored.network_config(), population.network_config());
    }
}
