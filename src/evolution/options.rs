//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct holds the driver-level configuration of a run:
//! how many individuals, how many generations, how many elites survive, the seed,
//! logging and the parallel/caching knobs. The variation rates live on the
//! breeding strategy.
//!
//! ## Example
//!
//! ```rust
//! use ascii_evolve::evolution::options::{EvolutionOptions, LogLevel};
//!
//! // Create a new EvolutionOptions instance with custom parameters
//! let custom_options = EvolutionOptions::new(200, LogLevel::Minimal, 50);
//! assert!(custom_options.validate().is_ok());
//!
//! // Create a new EvolutionOptions instance with default parameters
//! let default_options = EvolutionOptions::default();
//! assert_eq!(default_options.get_population_size(), 100);
//! assert_eq!(default_options.get_num_generations(), 150);
//! ```
//!
//! ## Fields
//!
//! - `num_generations`: Number of breeding rounds. The population is evaluated
//!   `num_generations + 1` times.
//! - `log_level`: How chatty the driver is, see [`LogLevel`].
//! - `population_size`: Number of individuals in every generation.
//! - `elite_count`: Number of top individuals copied unchanged into the next generation.
//! - `seed`: Seed of the run's random generator; `None` seeds from system entropy.
//! - `shape`: Expected grid shape; checked against the challenge before the run starts.
//! - `report_interval`: Generations between progress lines at `LogLevel::Minimal`.
//! - `parallel_threshold`: Minimum population size for parallel evaluation and breeding.
//! - `cache_type`: Optional fitness cache, see [`CacheType`].

use crate::error::{GeneticError, Result};
use crate::grid::Shape;

/// Verbosity of per-generation progress events.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Every generation at debug level, including the rendered best individual.
    Verbose,
    /// Every `report_interval` generations at info level.
    Minimal,
    /// No per-generation events.
    None,
}

/// The type of fitness cache placed in front of the challenge.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheType {
    /// One cache shared by all threads behind a mutex.
    Global,
    /// One cache per thread, no locking.
    ThreadLocal,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct EvolutionOptions {
    num_generations: usize,
    log_level: LogLevel,
    population_size: usize,
    elite_count: usize,
    seed: Option<u64>,
    shape: Option<Shape>,
    report_interval: usize,
    /// Minimum number of items to process in parallel
    parallel_threshold: usize,
    cache_type: Option<CacheType>,
}

impl EvolutionOptions {
    pub fn new(num_generations: usize, log_level: LogLevel, population_size: usize) -> Self {
        Self {
            num_generations,
            log_level,
            population_size,
            ..Self::default()
        }
    }

    pub fn get_num_generations(&self) -> usize {
        self.num_generations
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_elite_count(&self) -> usize {
        self.elite_count
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn get_shape(&self) -> Option<Shape> {
        self.shape
    }

    pub fn get_report_interval(&self) -> usize {
        self.report_interval
    }

    /// Returns the minimum number of items to process in parallel.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn get_cache_type(&self) -> Option<CacheType> {
        self.cache_type
    }

    /// Sets the number of generations.
    pub fn set_num_generations(&mut self, num_generations: usize) {
        self.num_generations = num_generations;
    }

    /// Sets the log level.
    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    /// Sets the population size.
    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    /// Sets the number of elites.
    pub fn set_elite_count(&mut self, elite_count: usize) {
        self.elite_count = elite_count;
    }

    /// Sets or clears the seed.
    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }

    /// Sets or clears the expected grid shape.
    pub fn set_shape(&mut self, shape: Option<Shape>) {
        self.shape = shape;
    }

    pub fn set_report_interval(&mut self, report_interval: usize) {
        self.report_interval = report_interval;
    }

    /// Sets the parallel threshold.
    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold;
    }

    pub fn set_cache_type(&mut self, cache_type: Option<CacheType>) {
        self.cache_type = cache_type;
    }

    /// Checks the options for values no run can work with.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the population size, the number of
    /// generations or the report interval is zero, or if more elites are
    /// requested than the population holds.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(GeneticError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }

        if self.num_generations == 0 {
            return Err(GeneticError::Configuration(
                "Number of generations cannot be zero".to_string(),
            ));
        }

        if self.elite_count > self.population_size {
            return Err(GeneticError::Configuration(format!(
                "Elite count ({}) cannot exceed population size ({})",
                self.elite_count, self.population_size
            )));
        }

        if self.report_interval == 0 {
            return Err(GeneticError::Configuration(
                "Report interval cannot be zero".to_string(),
            ));
        }

        // Deserialized shapes skip `Shape::new`
        if let Some(shape) = self.shape {
            Shape::new(shape.height(), shape.width())?;
        }

        Ok(())
    }

    /// Returns a builder for creating an `EvolutionOptions` instance.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ascii_evolve::evolution::options::{EvolutionOptions, LogLevel};
    ///
    /// let options = EvolutionOptions::builder()
    ///     .num_generations(50)
    ///     .log_level(LogLevel::Minimal)
    ///     .population_size(20)
    ///     .seed(7)
    ///     .parallel_threshold(500)
    ///     .build();
    ///
    /// assert_eq!(options.get_seed(), Some(7));
    /// assert_eq!(options.get_elite_count(), 2);
    /// ```
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            num_generations: 150,
            log_level: LogLevel::None,
            population_size: 100,
            elite_count: 2,
            seed: None,
            shape: None,
            report_interval: 10,
            parallel_threshold: 1000,
            cache_type: None,
        }
    }
}

/// Builder for `EvolutionOptions`.
///
/// Unset fields fall back to [`EvolutionOptions::default`].
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    num_generations: Option<usize>,
    log_level: Option<LogLevel>,
    population_size: Option<usize>,
    elite_count: Option<usize>,
    seed: Option<u64>,
    shape: Option<Shape>,
    report_interval: Option<usize>,
    parallel_threshold: Option<usize>,
    cache_type: Option<CacheType>,
}

impl EvolutionOptionsBuilder {
    /// Sets the number of generations.
    pub fn num_generations(mut self, value: usize) -> Self {
        self.num_generations = Some(value);
        self
    }

    /// Sets the log level.
    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    /// Sets the population size.
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    /// Sets the number of elites.
    pub fn elite_count(mut self, value: usize) -> Self {
        self.elite_count = Some(value);
        self
    }

    /// Sets the seed.
    pub fn seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    /// Sets the expected grid shape.
    pub fn shape(mut self, value: Shape) -> Self {
        self.shape = Some(value);
        self
    }

    pub fn report_interval(mut self, value: usize) -> Self {
        self.report_interval = Some(value);
        self
    }

    /// Sets the parallel threshold.
    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    /// Enables a fitness cache.
    pub fn cache_type(mut self, value: CacheType) -> Self {
        self.cache_type = Some(value);
        self
    }

    /// Builds the `EvolutionOptions` instance.
    pub fn build(self) -> EvolutionOptions {
        let defaults = EvolutionOptions::default();
        EvolutionOptions {
            num_generations: self.num_generations.unwrap_or(defaults.num_generations),
            log_level: self.log_level.unwrap_or(defaults.log_level),
            population_size: self.population_size.unwrap_or(defaults.population_size),
            elite_count: self.elite_count.unwrap_or(defaults.elite_count),
            seed: self.seed,
            shape: self.shape,
            report_interval: self.report_interval.unwrap_or(defaults.report_interval),
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(defaults.parallel_threshold),
            cache_type: self.cache_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let options = EvolutionOptions::default();

        assert!(options.validate().is_ok());
        assert_eq!(options.get_elite_count(), 2);
        assert_eq!(options.get_report_interval(), 10);
        assert_eq!(options.get_log_level(), LogLevel::None);
        assert!(options.get_seed().is_none());
        assert!(options.get_cache_type().is_none());
    }

    #[test]
    fn test_validate() {
        let mut options = EvolutionOptions::new(10, LogLevel::None, 0);
        match options.validate() {
            Err(GeneticError::Configuration(msg)) => {
                assert!(msg.contains("Population size cannot be zero"))
            }
            other => panic!("Expected Configuration error, got {:?}", other),
        }

        options.set_population_size(10);
        options.set_num_generations(0);
        assert!(options.validate().is_err());

        options.set_num_generations(10);
        options.set_elite_count(11);
        assert!(options.validate().is_err());

        options.set_elite_count(10);
        assert!(options.validate().is_ok());

        options.set_report_interval(0);
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_builder() {
        let shape = Shape::new(4, 4).unwrap();
        let options = EvolutionOptions::builder()
            .num_generations(5)
            .population_size(7)
            .elite_count(1)
            .shape(shape)
            .cache_type(CacheType::ThreadLocal)
            .build();

        assert_eq!(options.get_num_generations(), 5);
        assert_eq!(options.get_population_size(), 7);
        assert_eq!(options.get_elite_count(), 1);
        assert_eq!(options.get_shape(), Some(shape));
        assert_eq!(options.get_cache_type(), Some(CacheType::ThreadLocal));
        assert_eq!(options.get_parallel_threshold(), 1000);
    }
}
