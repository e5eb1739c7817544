//! Small fully-connected feedforward neural networks, trained either
//! by an evolutionary population or by momentum backpropagation.
//!
//! A [`Population`] holds a fixed number of networks sharing a topology
//! and a frozen trial set. Every generation scores each network over the
//! trials, keeps the best half unchanged, and refills the population with
//! mutated copies of the survivors. Between generations, the best network
//! can be refined by gradient descent, with changes rolled back if they
//! make it worse.
//!
//! All randomness is drawn from a caller-supplied [`rand::Rng`], so runs
//! are reproducible with a seeded generator.
//!
//! # Example usage: fitting x·y over [-1, 1]²
//! ```
//! use evoprop::networks::{Activation, MutationConfig, NetworkConfig};
//! use evoprop::trials::lattice;
//! use evoprop::{Population, PopulationConfig};
//! use rand::{rngs::StdRng, SeedableRng};
//! use std::num::NonZeroUsize;
//!
//! let network_config = NetworkConfig {
//!     input_count: NonZeroUsize::new(2).unwrap(),
//!     hidden_sizes: vec![6],
//!     output_count: NonZeroUsize::new(1).unwrap(),
//!     hidden_activation: Activation::Relu,
//!     output_activation: Activation::Tanh,
//!     random_weights: true,
//!     random_biases: true,
//!     learning_rate: 0.01,
//!     momentum: 0.9,
//!     ..NetworkConfig::zero()
//! };
//! let population_config = PopulationConfig {
//!     size: NonZeroUsize::new(16).unwrap(),
//!     ..PopulationConfig::zero()
//! };
//! let mut mutation = MutationConfig {
//!     weight_edits: 4,
//!     weight_strength: 0.1,
//!     bias_edits: 2,
//!     bias_strength: 0.1,
//! };
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut population = Population::new(population_config, network_config, &mut rng);
//! population
//!     .create_trials(lattice(2, -1.0, 1.0, 0.25), |x| vec![x[0] * x[1]])
//!     .unwrap();
//!
//! let mut best = f64::INFINITY;
//! for generation in 1..=50 {
//!     let error = population.run_generation(&mutation, &mut rng).unwrap();
//!     mutation.anneal(error == best);
//!     best = error;
//!     if generation % 10 == 0 {
//!         best = population.train_backpropagation(5).unwrap();
//!     }
//! }
//! println!("Best network: {}", population.champion());
//! ```
pub mod networks;
mod populations;

pub use populations::*;
