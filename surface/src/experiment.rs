use crate::targets::TargetFunction;

use evoprop::networks::sampling::Grid;
use evoprop::networks::{Activation, MutationConfig, NetworkConfig};
use evoprop::PopulationConfig;

use serde::{Deserialize, Serialize};

use std::num::NonZeroUsize;

/// Evenly spaced values taken by every input of the trial set.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatticeConfig {
    pub low: f64,
    pub high: f64,
    pub spacing: f64,
}

/// What is printed over the sampling grid once evolution ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayMode {
    /// The champion's output.
    Output,
    /// Target minus the champion's output.
    Error,
    /// The target function itself.
    Test,
}

/// A complete experiment description, loadable from RON.
/// Fields missing from the file keep their default value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub population: PopulationConfig,
    pub network: NetworkConfig,
    /// Initial mutation parameters. Strengths are annealed
    /// from generation to generation.
    pub mutation: MutationConfig,
    pub target: TargetFunction,
    pub lattice: LatticeConfig,
    pub generations: usize,
    /// Generations between backpropagation passes on
    /// the champion. 0 disables backpropagation.
    pub backprop_interval: usize,
    pub backprop_epochs: usize,
    /// Generations between logged snapshots. 0 disables them.
    pub report_interval: usize,
    pub seed: u64,
    pub display: DisplayMode,
    pub grid: Grid,
}

impl Default for ExperimentConfig {
    fn default() -> ExperimentConfig {
        ExperimentConfig {
            population: PopulationConfig {
                size: NonZeroUsize::new(16).unwrap(),
                ..PopulationConfig::zero()
            },
            network: NetworkConfig {
                input_count: NonZeroUsize::new(2).unwrap(),
                hidden_sizes: vec![7, 10, 20, 20, 10, 7],
                output_count: NonZeroUsize::new(1).unwrap(),
                hidden_activation: Activation::Relu,
                output_activation: Activation::Tanh,
                random_weights: true,
                random_biases: true,
                learning_rate: 0.01,
                momentum: 0.9,
                ..NetworkConfig::zero()
            },
            mutation: MutationConfig {
                weight_edits: 100,
                weight_strength: 0.01,
                bias_edits: 100,
                bias_strength: 0.01,
            },
            target: TargetFunction::Wave,
            lattice: LatticeConfig {
                low: -1.0,
                high: 1.0,
                spacing: 0.1,
            },
            generations: 500,
            backprop_interval: 50,
            backprop_epochs: 10,
            report_interval: 100,
            seed: 0,
            display: DisplayMode::Output,
            grid: Grid {
                axis1: (1.0, -1.0),
                axis2: (1.0, -1.0),
                rows: 11,
                columns: 11,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_ron_keeps_defaults() {
        let config: ExperimentConfig =
            ron::from_str("(generations: 20, target: Radial, display: Error)").unwrap();
        assert_eq!(config.generations, 20);
        assert_eq!(config.target, TargetFunction::Radial);
        assert_eq!(config.display, DisplayMode::Error);
        assert_eq!(config.network, ExperimentConfig::default().network);
        assert_eq!(config.population.size.get(), 16);
    }

    #[test]
    fn nested_ron() {
        let config: ExperimentConfig = ron::from_str(
            "(
                population: (size: 8, trial_power: 1.0),
                lattice: (low: 0.0, high: 1.0, spacing: 0.5),
                seed: 7,
            )",
        )
        .unwrap();
        assert_eq!(config.population.size.get(), 8);
        assert_eq!(config.population.trial_power, 1.0);
        assert_eq!(config.lattice.spacing, 0.5);
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn ron_roundtrip() {
        let config = ExperimentConfig::default();
        let text = ron::to_string(&config).unwrap();
        assert_eq!(ron::from_str::<ExperimentConfig>(&text).unwrap(), config);
    }
}
