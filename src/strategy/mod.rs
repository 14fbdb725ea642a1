//! # BreedStrategy
//!
//! The `BreedStrategy` trait defines the interface for strategies responsible for breeding
//! the next generation from a ranked population.
pub mod generational;

use std::fmt::Debug;

use crate::{
    error::Result, evolution::options::EvolutionOptions, individual::Individual,
    palette::Palette, rng::RandomNumberGenerator,
};

/// # BreedStrategy
///
/// Produces the next population from the current one, already scored and ranked
/// best first.
pub trait BreedStrategy
where
    Self: Debug + Clone + Send + Sync,
{
    /// Checks the strategy against the run options before the first generation.
    ///
    /// The default implementation accepts every configuration.
    fn validate(&self, _evol_options: &EvolutionOptions) -> Result<()> {
        Ok(())
    }

    /// Breeds the next generation.
    ///
    /// ## Parameters
    ///
    /// - `ranked`: The current population, best first.
    /// - `fitness`: The fitness of each member of `ranked`, in the same order.
    /// - `palette`: The characters mutation may draw from.
    /// - `evol_options`: The evolution options specifying algorithm parameters.
    /// - `rng`: The random number generator driving every random decision.
    ///
    /// ## Returns
    ///
    /// Exactly `evol_options.get_population_size()` individuals.
    ///
    /// ## Errors
    ///
    /// This method can fail if:
    /// - The ranked population is empty
    /// - Selection or crossover rejects its inputs
    fn breed(
        &self,
        ranked: &[Individual],
        fitness: &[f64],
        palette: &Palette,
        evol_options: &EvolutionOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Individual>>;
}

pub use generational::{GenerationalStrategy, DEFAULT_CROSSOVER_RATE, DEFAULT_MUTATION_RATE};
