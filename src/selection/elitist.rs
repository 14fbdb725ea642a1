use crate::error::Result;
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::{check_population, SelectionStrategy};

/// A selection strategy that selects the best individuals based on fitness.
///
/// This strategy ranks individuals by fitness, highest first, and selects the top N.
/// The ranking is stable: individuals with equal fitness keep their population
/// order. It implements elitism, which preserves the best solutions across
/// generations. No randomness is involved.
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
///         Individual::from_rows(&["x"])?,
///         Individual::from_rows(&["y"])?,
///         Individual::from_rows(&["z"])?,
///     ];
///     let fitness = vec![-1.0, -3.0, -1.0];
///     let mut rng = RandomNumberGenerator::from_seed(0);
///
///     let selected = ElitistSelection::default().select(&population, &fitness, 2, &mut rng)?;
///
///     assert_eq!(selected, vec![population[0].clone(), population[2].clone()]);
///
///     Ok(())
/// }
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct ElitistSelection;

impl ElitistSelection {
    pub fn new() -> Self {
        Self
    }

    /// Indices of `fitness`, best first, ties in original order.
    pub fn ranking(fitness: &[f64]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..fitness.len()).collect();
        indices.sort_by(|&a, &b| fitness[b].total_cmp(&fitness[a]));
        indices
    }
}

impl SelectionStrategy for ElitistSelection {
    /// Selects at most `num_to_select` individuals; fewer if the population is smaller.
    fn select(
        &self,
        population: &[Individual],
        fitness: &[f64],
        num_to_select: usize,
        _rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Individual>> {
        check_population(population, fitness)?;

        Ok(Self::ranking(fitness)
            .into_iter()
            .take(num_to_select)
            .map(|idx| population[idx].clone())
            .collect())
    }
}
