//! # GenerationalStrategy
//!
//! Replaces the whole population every generation. The top `elite_count`
//! individuals are copied unchanged; the rest are children produced in pairs:
//! two tournament winners are crossed over and both children are mutated. When
//! the population size leaves room for only one child of the last pair, that
//! pair's second child is dropped.
//!
//! Each pair is bred with its own generator forked from the driver's generator
//! in pair order. Sequential and parallel breeding therefore produce the same
//! generation for the same seed.
use rayon::prelude::*;

use super::BreedStrategy;
use crate::{
    error::{GeneticError, OptionExt, Result},
    evolution::options::EvolutionOptions,
    individual::Individual,
    palette::Palette,
    rng::RandomNumberGenerator,
    selection::{
        selection_strategy::check_population, ElitistSelection, SelectionStrategy,
        TournamentSelection,
    },
};

/// Default probability that a selected pair is recombined.
pub const DEFAULT_CROSSOVER_RATE: f64 = 0.8;

/// Default per-cell mutation probability of the operator.
pub const DEFAULT_MUTATION_RATE: f64 = 0.1;

/// Elitism, tournament selection, row crossover and per-cell mutation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct GenerationalStrategy {
    crossover_rate: f64,
    mutation_rate: f64,
    tournament: TournamentSelection,
    elitism: ElitistSelection,
}

fn check_rate(name: &str, rate: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&rate) {
        return Err(GeneticError::Configuration(format!(
            "{} must be within [0, 1], got {}",
            name, rate
        )));
    }
    Ok(rate)
}

impl GenerationalStrategy {
    /// Creates a new `GenerationalStrategy`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a rate lies outside `[0, 1]` (NaN included)
    /// or if `tournament_size` is 0.
    pub fn new(crossover_rate: f64, mutation_rate: f64, tournament_size: usize) -> Result<Self> {
        Ok(Self {
            crossover_rate: check_rate("Crossover rate", crossover_rate)?,
            mutation_rate: check_rate("Mutation rate", mutation_rate)?,
            tournament: TournamentSelection::new(tournament_size)?,
            elitism: ElitistSelection::new(),
        })
    }

    pub fn with_crossover_rate(mut self, crossover_rate: f64) -> Result<Self> {
        self.crossover_rate = check_rate("Crossover rate", crossover_rate)?;
        Ok(self)
    }

    pub fn with_mutation_rate(mut self, mutation_rate: f64) -> Result<Self> {
        self.mutation_rate = check_rate("Mutation rate", mutation_rate)?;
        Ok(self)
    }

    pub fn with_tournament_size(mut self, tournament_size: usize) -> Result<Self> {
        self.tournament = self.tournament.with_tournament_size(tournament_size)?;
        Ok(self)
    }

    pub fn crossover_rate(&self) -> f64 {
        self.crossover_rate
    }

    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament.tournament_size()
    }

    fn breed_pair(
        &self,
        ranked: &[Individual],
        fitness: &[f64],
        palette: &Palette,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(Individual, Individual)> {
        let mut parents = self.tournament.select(ranked, fitness, 2, rng)?.into_iter();
        let mom = parents
            .next()
            .ok_or_else_genetic(|| GeneticError::EmptyPopulation)?;
        let dad = parents
            .next()
            .ok_or_else_genetic(|| GeneticError::EmptyPopulation)?;

        let (mut first, mut second) = mom.crossover(&dad, self.crossover_rate, rng)?;
        first.mutate_in_place(palette, self.mutation_rate, rng);
        second.mutate_in_place(palette, self.mutation_rate, rng);

        Ok((first, second))
    }
}

impl Default for GenerationalStrategy {
    fn default() -> Self {
        Self {
            crossover_rate: DEFAULT_CROSSOVER_RATE,
            mutation_rate: DEFAULT_MUTATION_RATE,
            tournament: TournamentSelection::default(),
            elitism: ElitistSelection::new(),
        }
    }
}

impl BreedStrategy for GenerationalStrategy {
    /// Rejects a tournament larger than the population, and rates that
    /// bypassed the constructors through deserialization.
    fn validate(&self, evol_options: &EvolutionOptions) -> Result<()> {
        check_rate("Crossover rate", self.crossover_rate)?;
        check_rate("Mutation rate", self.mutation_rate)?;

        let population_size = evol_options.get_population_size();
        if self.tournament_size() == 0 || self.tournament_size() > population_size {
            return Err(GeneticError::Configuration(format!(
                "Tournament size ({}) must be between 1 and the population size ({})",
                self.tournament_size(),
                population_size
            )));
        }
        Ok(())
    }

    fn breed(
        &self,
        ranked: &[Individual],
        fitness: &[f64],
        palette: &Palette,
        evol_options: &EvolutionOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Individual>> {
        check_population(ranked, fitness)?;

        let population_size = evol_options.get_population_size();
        let mut next = self
            .elitism
            .select(ranked, fitness, evol_options.get_elite_count(), rng)?;
        next.truncate(population_size);

        let pairs = population_size.saturating_sub(next.len()).div_ceil(2);
        let pair_rngs: Vec<RandomNumberGenerator> = (0..pairs).map(|_| rng.fork()).collect();

        let children: Vec<(Individual, Individual)> =
            if population_size >= evol_options.get_parallel_threshold() {
                pair_rngs
                    .into_par_iter()
                    .map(|mut pair_rng| self.breed_pair(ranked, fitness, palette, &mut pair_rng))
                    .collect::<Result<_>>()?
            } else {
                pair_rngs
                    .into_iter()
                    .map(|mut pair_rng| self.breed_pair(ranked, fitness, palette, &mut pair_rng))
                    .collect::<Result<_>>()?
            };

        next.reserve(children.len() * 2);
        for (first, second) in children {
            next.push(first);
            next.push(second);
        }
        // An odd number of open slots leaves the last second child without a place
        next.truncate(population_size);

        Ok(next)
    }
}
