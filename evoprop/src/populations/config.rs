use serde::{Deserialize, Serialize};

use std::num::NonZeroUsize;

/// Configuration data for population generation
/// and evolution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Size of the population.
    pub size: NonZeroUsize,
    /// Exponent of the Lp error used to score
    /// networks over the trial set.
    pub trial_power: f64,
}

impl PopulationConfig {
    /// Returns a "zero-valued" default configuration.
    /// The size is 1, and the trial power is 2,
    /// which scores networks by their root mean
    /// squared error.
    ///
    /// # Note
    /// This value is not suitable for use in most experiments.
    /// It is meant as a way to abbreviate configuration
    /// instantiation, or to fill in unused values.
    ///
    /// # Examples
    /// ```
    /// use evoprop::PopulationConfig;
    /// use std::num::NonZeroUsize;
    ///
    /// let cfg1 = PopulationConfig::zero();
    ///
    /// let cfg2 = PopulationConfig {
    ///     // Specify some values here...
    ///     size: NonZeroUsize::new(16).unwrap(),
    ///     // Default the rest...
    ///     ..PopulationConfig::zero()
    /// };
    /// assert_eq!(cfg2.trial_power, 2.0);
    /// ```
    pub const fn zero() -> PopulationConfig {
        PopulationConfig {
            // SAFETY: 1 is a valid NonZeroUsize.
            size: unsafe { NonZeroUsize::new_unchecked(1) },
            trial_power: 2.0,
        }
    }

    /// Returns the number of networks kept after each
    /// generation's selection: half the population,
    /// rounded down, but never less than one.
    ///
    /// # Examples
    /// ```
    /// use evoprop::PopulationConfig;
    /// use std::num::NonZeroUsize;
    ///
    /// let survivors = |size| PopulationConfig {
    ///     size: NonZeroUsize::new(size).unwrap(),
    ///     ..PopulationConfig::zero()
    /// }
    /// .survivor_count();
    ///
    /// assert_eq!(survivors(16), 8);
    /// assert_eq!(survivors(7), 3);
    /// assert_eq!(survivors(1), 1);
    /// ```
    pub fn survivor_count(&self) -> usize {
        (self.size.get() / 2).max(1)
    }
}
