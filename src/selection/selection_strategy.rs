use std::fmt::Debug;

use crate::error::{GeneticError, Result};
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;

/// Trait for selection strategies.
///
/// Selection strategies choose individuals from a scored population. The
/// population is never modified; selected individuals are returned as copies.
///
/// # Examples
///
/// ```
/// use ascii_evolve::error::Result;
/// use ascii_evolve::individual::Individual;
/// use ascii_evolve::rng::RandomNumberGenerator;
/// use ascii_evolve::selection::{ElitistSelection, SelectionStrategy};
///
/// fn main() -> Result<()> {
///     let population = vec![
///         Individual::from_rows(&["a"])?,
///         Individual::from_rows(&["b"])?,
///         Individual::from_rows(&["c"])?,
///     ];
///     let fitness = vec![-0.5, -0.2, -0.7];
///     let mut rng = RandomNumberGenerator::from_seed(1);
///
///     let selected = ElitistSelection::new().select(&population, &fitness, 2, &mut rng)?;
///
///     assert_eq!(selected.len(), 2);
///     assert_eq!(selected[0], population[1]);
///     assert_eq!(selected[1], population[0]);
///
///     Ok(())
/// }
/// ```
pub trait SelectionStrategy: Debug + Send + Sync {
    /// Selects individuals from the population based on their fitness scores.
    ///
    /// # Arguments
    ///
    /// * `population` - The current population of individuals.
    /// * `fitness` - The fitness scores corresponding to each individual in the population.
    /// * `num_to_select` - The number of individuals to select.
    /// * `rng` - The random number generator for strategies that use randomness.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The population is empty
    /// - The fitness vector length doesn't match the population length
    /// - The strategy cannot work with a population of this size
    fn select(
        &self,
        population: &[Individual],
        fitness: &[f64],
        num_to_select: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Individual>>;
}

/// Checks the inputs every selection strategy shares.
pub(crate) fn check_population(population: &[Individual], fitness: &[f64]) -> Result<()> {
    if population.is_empty() {
        return Err(GeneticError::EmptyPopulation);
    }

    if fitness.len() != population.len() {
        return Err(GeneticError::Configuration(format!(
            "Fitness vector length ({}) doesn't match population length ({})",
            fitness.len(),
            population.len()
        )));
    }

    Ok(())
}
