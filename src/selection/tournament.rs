use crate::error::{GeneticError, Result};
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::{check_population, SelectionStrategy};

/// Default number of contestants per tournament.
pub const DEFAULT_TOURNAMENT_SIZE: usize = 3;

/// A selection strategy that selects individuals through tournament selection.
///
/// Each tournament samples `tournament_size` distinct individuals uniformly,
/// without replacement, and keeps the one with the highest fitness. Ties go to
/// the contestant drawn first. Every selected individual comes from its own
/// tournament, so the same individual can be selected more than once.
///
/// Tournament selection provides a balance between exploration and exploitation:
/// - Smaller tournament sizes lead to more exploration (more random selection)
/// - Larger tournament sizes lead to more exploitation (more focus on the best individuals)
///
/// # Examples
///
/// ```
/// use ascii_evolve::error::Result;
/// use ascii_evolve::individual::Individual;
/// use ascii_evolve::rng::RandomNumberGenerator;
/// use ascii_evolve::selection::{SelectionStrategy, TournamentSelection};
///
/// fn main() -> Result<()> {
///     let population: Vec<Individual> = ["a", "b", "c", "d", "e"]
///         .iter()
///         .map(|row| Individual::from_rows(&[*row]))
///         .collect::<Result<_>>()?;
///     let fitness = vec![-0.5, -0.2, -0.7, -0.1, -0.9];
///     let mut rng = RandomNumberGenerator::from_seed(3);
///
///     // A tournament over the whole population always finds the best individual
///     let selection = TournamentSelection::new(5)?;
///     let selected = selection.select(&population, &fitness, 3, &mut rng)?;
///
///     assert_eq!(selected, vec![population[3].clone(); 3]);
///
///     Ok(())
/// }
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct TournamentSelection {
    tournament_size: usize,
}

impl TournamentSelection {
    /// Creates a new TournamentSelection strategy with the specified tournament size.
    ///
    /// # Arguments
    ///
    /// * `tournament_size` - The number of individuals that participate in each tournament.
    ///   Must be at least 1. A tournament size of 1 is equivalent to random selection.
    ///
    /// # Errors
    ///
    /// Returns an error if `tournament_size` is 0.
    pub fn new(tournament_size: usize) -> Result<Self> {
        if tournament_size < 1 {
            return Err(GeneticError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }

        Ok(Self { tournament_size })
    }

    pub fn with_tournament_size(mut self, tournament_size: usize) -> Result<Self> {
        self.tournament_size = Self::new(tournament_size)?.tournament_size;
        Ok(self)
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    /// Runs a single tournament and returns the index of the winner.
    ///
    /// The caller guarantees `tournament_size <= fitness.len()`.
    fn run_tournament(&self, fitness: &[f64], rng: &mut RandomNumberGenerator) -> usize {
        let participants = rng.sample_indices(fitness.len(), self.tournament_size);

        let mut best_idx = participants[0];
        for &idx in &participants[1..] {
            if fitness[idx] > fitness[best_idx] {
                best_idx = idx;
            }
        }

        best_idx
    }
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self {
            tournament_size: DEFAULT_TOURNAMENT_SIZE,
        }
    }
}

impl SelectionStrategy for TournamentSelection {
    fn select(
        &self,
        population: &[Individual],
        fitness: &[f64],
        num_to_select: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Individual>> {
        check_population(population, fitness)?;

        if self.tournament_size > population.len() {
            return Err(GeneticError::Configuration(format!(
                "Tournament size ({}) exceeds population size ({})",
                self.tournament_size,
                population.len()
            )));
        }

        Ok((0..num_to_select)
            .map(|_| population[self.run_tournament(fitness, rng)].clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn population(n: usize) -> Vec<Individual> {
        (0..n)
            .map(|i| Individual::from_rows(&[i.to_string()]).unwrap())
            .collect()
    }

    #[test]
    fn test_tournament_selection() {
        let population = population(5);
        let fitness = vec![-0.5, -0.8, -0.3, -0.9, -0.1];
        let mut rng = RandomNumberGenerator::from_seed(42);

        let selection = TournamentSelection::default();
        let selected = selection.select(&population, &fitness, 3, &mut rng).unwrap();

        assert_eq!(selected.len(), 3);
        // With three distinct contestants out of five, the two worst can never win
        for individual in &selected {
            assert_ne!(individual, &population[1]);
            assert_ne!(individual, &population[3]);
        }
    }

    #[test]
    fn test_tournament_size_one_is_random_selection() {
        let population = population(4);
        let fitness = vec![-3.0, -2.0, -1.0, 0.0];
        let mut rng = RandomNumberGenerator::from_seed(7);

        let selection = TournamentSelection::new(1).unwrap();
        let selected = selection.select(&population, &fitness, 400, &mut rng).unwrap();

        for individual in &population {
            assert!(selected.contains(individual));
        }
    }

    #[test]
    fn test_full_tournament_tie_goes_to_first_drawn() {
        let population = population(3);
        let fitness = vec![-1.0, -1.0, -1.0];
        let selection = TournamentSelection::new(3).unwrap();

        for seed in 0..20 {
            let mut rng = RandomNumberGenerator::from_seed(seed);
            let expected = rng.clone().sample_indices(3, 3)[0];
            let winner = selection.run_tournament(&fitness, &mut rng);
            assert_eq!(winner, expected);
        }
    }

    #[test]
    fn test_selection_does_not_modify_population() {
        let population = population(5);
        let snapshot = population.clone();
        let fitness = vec![-0.5, -0.8, -0.3, -0.9, -0.1];
        let mut rng = RandomNumberGenerator::from_seed(1);

        TournamentSelection::default()
            .select(&population, &fitness, 10, &mut rng)
            .unwrap();

        assert_eq!(population, snapshot);
    }

    #[test]
    fn test_tournament_selection_empty_population() {
        let mut rng = RandomNumberGenerator::from_seed(0);
        let result = TournamentSelection::default().select(&[], &[], 3, &mut rng);

        assert!(matches!(result, Err(GeneticError::EmptyPopulation)));
    }

    #[test]
    fn test_tournament_selection_mismatched_lengths() {
        let population = population(2);
        let mut rng = RandomNumberGenerator::from_seed(0);

        let result = TournamentSelection::default().select(&population, &[-0.5], 1, &mut rng);
        assert!(result.is_err());
    }

    #[test]
    fn test_tournament_larger_than_population() {
        let population = population(2);
        let mut rng = RandomNumberGenerator::from_seed(0);

        let result =
            TournamentSelection::new(3)
                .unwrap()
                .select(&population, &[-0.5, -0.1], 1, &mut rng);
        assert!(matches!(result, Err(GeneticError::Configuration(_))));
    }

    #[test]
    fn test_tournament_selection_invalid_size() {
        assert!(TournamentSelection::new(0).is_err());
        assert!(TournamentSelection::default().with_tournament_size(0).is_err());
        assert_eq!(
            TournamentSelection::default()
                .with_tournament_size(5)
                .unwrap()
                .tournament_size(),
            5
        );
    }
}
