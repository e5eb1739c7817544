use super::Population;

use crate::networks::Network;

use std::cmp::Ordering;
use std::fmt;

/// Defines different possible reporting levels for logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportingLevel {
    /// Clones the entire population.
    AllNetworks,
    /// Clones only the population champion.
    Champion,
    /// Clones no networks.
    NoNetworks,
}

/// A snapshot of a population.
#[derive(Clone, Debug)]
pub struct Log {
    pub generation_number: usize,
    pub generation_sample: GenerationMemberRecord,
    pub population_size: usize,
    pub network_stats: Vec<(String, Stats)>,
}

impl fmt::Display for Log {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Log {{\n\
            \tgeneration_number: {:?}\n\
            \tpopulation_size: {:?}\n\
            {}\
            }}",
            &self.generation_number,
            &self.population_size,
            self.network_stats
                .iter()
                .map(|(name, stats)| format!("\t{}: {:?}\n", name, stats))
                .collect::<Vec<_>>()
                .join("")
        )
    }
}

/// A struct for reporting basic statistical data.
#[derive(Clone, Debug, PartialEq)]
pub struct Stats {
    pub maximum: f64,
    pub minimum: f64,
    pub mean: f64,
    pub median: f64,
}

impl Stats {
    /// Returns statistics about numbers in a sequence.
    /// An empty sequence gives NaN everywhere.
    ///
    /// # Examples
    /// ```
    /// use evoprop::logging::Stats;
    ///
    /// let stats = Stats::from([-2.0, -1.0, 0.5, 1.0, 1.5].iter().copied());
    /// assert_eq!(stats.maximum, 1.5);
    /// assert_eq!(stats.minimum, -2.0);
    /// assert_eq!(stats.mean, 0.0);
    /// assert_eq!(stats.median, 0.5);
    ///
    /// let stats = Stats::from([4.0, 1.0, 3.0, 2.0].iter().copied());
    /// assert_eq!(stats.median, 2.5);
    /// ```
    pub fn from(data: impl Iterator<Item = f64>) -> Stats {
        let mut data: Vec<f64> = data.collect();
        if data.is_empty() {
            return Stats {
                maximum: f64::NAN,
                minimum: f64::NAN,
                mean: f64::NAN,
                median: f64::NAN,
            };
        }
        let mid = data.len() / 2;
        let (mut max, mut min, mut sum) = (f64::MIN, f64::MAX, 0.0);
        for d in &data {
            max = d.max(max);
            min = d.min(min);
            sum += d;
        }
        let mean = sum / data.len() as f64;
        let mut median = *data.select_nth_unstable_by(mid, order).1;
        if data.len() % 2 == 0 {
            // The lower half now sits before `mid`.
            let lower = data[..mid]
                .iter()
                .copied()
                .max_by(|a, b| order(a, b))
                .unwrap_or(median);
            median = (median + lower) / 2.0;
        }
        Stats {
            maximum: max,
            minimum: min,
            mean,
            median,
        }
    }
}

fn order(a: &f64, b: &f64) -> Ordering {
    a.total_cmp(b)
}

/// A reporting-level dependant store
/// of networks from a population.
#[derive(Clone, Debug)]
pub enum GenerationMemberRecord {
    /// Every network, best first.
    Networks(Vec<Network>),
    /// Only the population champion.
    Champion(Network),
    /// Empty.
    None,
}

/// A log of the evolution of a population over time.
#[derive(Clone, Debug)]
pub struct EvolutionLogger {
    reporting_level: ReportingLevel,
    logs: Vec<Log>,
}

impl EvolutionLogger {
    /// Returns a logger with the appropiate reporting level.
    ///
    /// # Examples
    /// ```
    /// use evoprop::logging::{EvolutionLogger, ReportingLevel};
    ///
    /// let logger = EvolutionLogger::new(ReportingLevel::NoNetworks);
    /// assert_eq!(logger.iter().count(), 0);
    /// ```
    pub fn new(reporting_level: ReportingLevel) -> EvolutionLogger {
        EvolutionLogger {
            reporting_level,
            logs: vec![],
        }
    }

    /// Store a snapshot of a population.
    ///
    /// The `network_stat_extractor` provides a way of
    /// obtaining arbitrary statistics on the population,
    /// where each statistic is named by `stat_names`.
    ///
    /// # Examples
    /// ```
    /// use evoprop::logging::{EvolutionLogger, ReportingLevel};
    /// use evoprop::networks::NetworkConfig;
    /// use evoprop::{Population, PopulationConfig};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let mut rng = StdRng::seed_from_u64(0);
    /// let population = Population::new(PopulationConfig::zero(), NetworkConfig::zero(), &mut rng);
    ///
    /// let mut logger = EvolutionLogger::new(ReportingLevel::Champion);
    /// // Evolve the population some...
    /// // Then log a snapshot.
    /// logger.log(&population, &|n| [n.error(), n.mean_error()], ["error", "mean error"]);
    ///
    /// let log = logger.iter().next().unwrap();
    /// assert_eq!(log.network_stats[1].0, "mean error");
    /// ```
    pub fn log<NSE, const N: usize>(
        &mut self,
        population: &Population,
        network_stat_extractor: &NSE,
        stat_names: [&str; N],
    ) where
        NSE: Fn(&Network) -> [f64; N],
    {
        let stats: Vec<[f64; N]> = population
            .networks()
            .iter()
            .map(network_stat_extractor)
            .collect();
        let network_stats = stat_names
            .iter()
            .cloned()
            .map(String::from)
            .zip(unzip_n_vecs(stats.into_iter()))
            .map(|(name, data)| (name, Stats::from(data.into_iter())))
            .collect();
        self.logs.push(Log {
            generation_number: population.generation(),
            generation_sample: match self.reporting_level {
                ReportingLevel::AllNetworks => {
                    GenerationMemberRecord::Networks(population.networks().to_vec())
                }
                ReportingLevel::Champion => {
                    GenerationMemberRecord::Champion(population.champion().clone())
                }
                ReportingLevel::NoNetworks => GenerationMemberRecord::None,
            },
            population_size: population.networks().len(),
            network_stats,
        })
    }

    /// Iterate over all logged snapshots.
    pub fn iter(&self) -> impl Iterator<Item = &Log> {
        self.logs.iter()
    }

    /// Returns the most recent snapshot, if any.
    pub fn last(&self) -> Option<&Log> {
        self.logs.last()
    }
}

fn unzip_n_vecs<T: Clone, const N: usize>(iter: impl Iterator<Item = [T; N]>) -> Vec<Vec<T>> {
    let mut vecs = vec![Vec::default(); N];
    for items in iter {
        for (vec, item) in vecs.iter_mut().zip(items) {
            vec.push(item);
        }
    }
    vecs
}
