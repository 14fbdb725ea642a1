use rayon::prelude::*;
use tracing::{debug, info};

use super::{
    challenge::Challenge,
    history::FitnessHistory,
    options::{CacheType, EvolutionOptions, LogLevel},
};
use crate::{
    caching::{CachedChallenge, ThreadLocalCachedChallenge},
    error::{GeneticError, OptionExt, Result},
    individual::Individual,
    palette::Palette,
    population,
    rng::RandomNumberGenerator,
    strategy::BreedStrategy,
};

/// Represents the result of an evolution, containing an individual and its associated score.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionResult {
    /// The evolved individual.
    pub individual: Individual,
    /// The fitness score of the individual.
    pub score: f64,
}

/// Everything a finished run produced.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone)]
pub struct EvolutionOutcome {
    /// The best individual of the last evaluated generation.
    pub best: EvolutionResult,
    /// Best and average fitness of every evaluated generation.
    pub history: FitnessHistory,
    /// Number of breeding rounds that were run.
    pub generations: usize,
}

/// Where a run currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvolutionState {
    /// No population yet.
    Initializing,
    /// The current population waits to be scored and ranked.
    Evaluating,
    /// The ranked population waits to be replaced by its offspring.
    Breeding,
    /// The generation budget is spent; the best individual is final.
    Terminated,
}

/// Manages the evolution process using a specified breeding strategy and challenge.
#[derive(Debug, Clone)]
pub struct EvolutionLauncher<Strategy, Chall>
where
    Strategy: BreedStrategy,
    Chall: Challenge,
{
    strategy: Strategy,
    challenge: Chall,
    palette: Palette,
}

impl<Strategy, Chall> EvolutionLauncher<Strategy, Chall>
where
    Strategy: BreedStrategy,
    Chall: Challenge,
{
    /// Creates a new `EvolutionLauncher` instance.
    ///
    /// # Arguments
    ///
    /// * `strategy` - The breeding strategy used for producing each next generation.
    /// * `challenge` - The challenge used to evaluate the fitness of individuals.
    /// * `palette` - The characters individuals are made of.
    pub fn new(strategy: Strategy, challenge: Chall, palette: Palette) -> Self {
        Self {
            strategy,
            challenge,
            palette,
        }
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    pub fn challenge(&self) -> &Chall {
        &self.challenge
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Validates `options` and prepares a run in the `Initializing` state.
    ///
    /// # Errors
    ///
    /// - `Configuration` if the options or the strategy reject the configuration.
    /// - `InvalidPalette` if the palette is empty.
    /// - `ShapeMismatch` if the options expect a different grid shape than the challenge scores.
    pub fn configure(&self, options: EvolutionOptions) -> Result<Evolution<'_, Strategy>> {
        options.validate()?;
        self.strategy.validate(&options)?;

        if self.palette.is_empty() {
            return Err(GeneticError::InvalidPalette(
                "Palette must contain at least one character".to_string(),
            ));
        }

        let shape = self.challenge.shape();
        if let Some(expected) = options.get_shape() {
            if expected != shape {
                return Err(GeneticError::ShapeMismatch {
                    expected,
                    actual: shape,
                });
            }
        }

        let challenge: Box<dyn Challenge + '_> = match options.get_cache_type() {
            None => Box::new(&self.challenge),
            Some(CacheType::Global) => Box::new(CachedChallenge::new(&self.challenge)),
            Some(CacheType::ThreadLocal) => {
                Box::new(ThreadLocalCachedChallenge::new(&self.challenge))
            }
        };

        let rng = options
            .get_seed()
            .map(RandomNumberGenerator::from_seed)
            .unwrap_or_default();

        info!(
            population_size = options.get_population_size(),
            generations = options.get_num_generations(),
            shape = %shape,
            palette = %self.palette.chars().iter().collect::<String>(),
            seed = ?options.get_seed(),
            "Starting evolution"
        );

        Ok(Evolution {
            strategy: &self.strategy,
            challenge,
            palette: &self.palette,
            options,
            rng,
            state: EvolutionState::Initializing,
            generation: 0,
            population: Vec::new(),
            ranked: Vec::new(),
            fitness: Vec::new(),
            history: FitnessHistory::new(),
        })
    }

    /// Runs a complete evolution.
    ///
    /// # Errors
    ///
    /// Returns the setup errors of [`EvolutionLauncher::configure`] before any
    /// generation is produced, and any failure during the run wrapped in
    /// `GeneticError::Evolution` with the generation it happened in.
    ///
    /// # Performance
    ///
    /// Fitness evaluation and breeding run on Rayon's parallel iterators once
    /// the population reaches the options' parallel threshold.
    pub fn evolve(&self, options: EvolutionOptions) -> Result<EvolutionOutcome> {
        self.configure(options)?.run()
    }
}

/// A single run of the generational loop.
///
/// Created by [`EvolutionLauncher::configure`]. Each call to [`Evolution::step`]
/// performs one state transition; [`Evolution::run`] steps until the run
/// terminates and consumes it.
pub struct Evolution<'a, Strategy>
where
    Strategy: BreedStrategy,
{
    strategy: &'a Strategy,
    challenge: Box<dyn Challenge + 'a>,
    palette: &'a Palette,
    options: EvolutionOptions,
    rng: RandomNumberGenerator,
    state: EvolutionState,
    generation: usize,
    population: Vec<Individual>,
    ranked: Vec<Individual>,
    fitness: Vec<f64>,
    history: FitnessHistory,
}

impl<Strategy> Evolution<'_, Strategy>
where
    Strategy: BreedStrategy,
{
    pub fn state(&self) -> EvolutionState {
        self.state
    }

    /// Number of breeding rounds completed so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn options(&self) -> &EvolutionOptions {
        &self.options
    }

    pub fn history(&self) -> &FitnessHistory {
        &self.history
    }

    /// The population that will be evaluated next.
    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    /// The last evaluated population, best first, with its scores.
    pub fn ranked(&self) -> (&[Individual], &[f64]) {
        (&self.ranked, &self.fitness)
    }

    /// The best individual of the last evaluation, if any evaluation happened.
    pub fn best(&self) -> Option<EvolutionResult> {
        self.ranked.first().map(|individual| EvolutionResult {
            individual: individual.clone(),
            score: self.fitness[0],
        })
    }

    /// Performs one state transition and returns the new state.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Terminated` once the run is over, and wraps any
    /// other failure in `GeneticError::Evolution` with the current generation.
    pub fn step(&mut self) -> Result<EvolutionState> {
        let generation = self.generation;

        match self.state {
            EvolutionState::Initializing => {
                self.population = population::generate(
                    self.options.get_population_size(),
                    self.challenge.shape(),
                    self.palette,
                    &mut self.rng,
                )
                .map_err(|e| e.in_generation(generation))?;
                self.state = EvolutionState::Evaluating;
            }
            EvolutionState::Evaluating => {
                self.evaluate().map_err(|e| e.in_generation(generation))?;
                self.report();
                self.state = if generation >= self.options.get_num_generations() {
                    EvolutionState::Terminated
                } else {
                    EvolutionState::Breeding
                };
            }
            EvolutionState::Breeding => {
                self.population = self
                    .strategy
                    .breed(
                        &self.ranked,
                        &self.fitness,
                        self.palette,
                        &self.options,
                        &mut self.rng,
                    )
                    .map_err(|e| e.in_generation(generation))?;
                self.generation += 1;
                self.state = EvolutionState::Evaluating;
            }
            EvolutionState::Terminated => return Err(GeneticError::Terminated),
        }

        Ok(self.state)
    }

    /// Steps until the run terminates and returns its outcome.
    pub fn run(mut self) -> Result<EvolutionOutcome> {
        while self.state != EvolutionState::Terminated {
            self.step()?;
        }

        let best = self.best().ok_or_else_genetic(|| {
            GeneticError::Evolution {
                generation: self.generation,
                source: Box::new(GeneticError::EmptyPopulation),
            }
        })?;

        info!(
            generations = self.generation,
            best = best.score,
            "Evolution finished"
        );

        Ok(EvolutionOutcome {
            best,
            history: self.history,
            generations: self.generation,
        })
    }

    /// Scores the pending population, ranks it best first and records the statistics.
    ///
    /// Ties keep their population order.
    fn evaluate(&mut self) -> Result<()> {
        let population = std::mem::take(&mut self.population);
        if population.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        let challenge = &self.challenge;
        let score = |individual: &Individual| -> Result<f64> {
            let score = challenge.score(individual)?;
            if !score.is_finite() {
                return Err(GeneticError::FitnessCalculation(format!(
                    "Non-finite fitness score encountered: {}",
                    score
                )));
            }
            Ok(score)
        };

        let scores: Vec<f64> = if population.len() >= self.options.get_parallel_threshold() {
            population.par_iter().map(score).collect::<Result<_>>()?
        } else {
            population.iter().map(score).collect::<Result<_>>()?
        };

        let mut scored: Vec<(f64, Individual)> = scores.into_iter().zip(population).collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        let (fitness, ranked): (Vec<f64>, Vec<Individual>) = scored.into_iter().unzip();
        self.fitness = fitness;
        self.ranked = ranked;

        let best = self.fitness[0];
        let average = self.fitness.iter().sum::<f64>() / self.fitness.len() as f64;
        self.history.record(best, average);

        Ok(())
    }

    fn report(&self) {
        let (Some(&best), Some(&average)) = (self.history.best().last(), self.history.average().last())
        else {
            return;
        };

        match self.options.get_log_level() {
            LogLevel::Minimal => {
                if self.generation % self.options.get_report_interval() == 0 {
                    info!(generation = self.generation, best, average, "Generation evaluated");
                }
            }
            LogLevel::Verbose => {
                debug!(
                    generation = self.generation,
                    best,
                    average,
                    "Generation evaluated\n{}",
                    self.ranked[0]
                );
            }
            LogLevel::None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::BrightnessChallenge;
    use crate::grid::{Shape, TargetGrid};
    use crate::palette::BrightnessMap;
    use crate::strategy::GenerationalStrategy;

    fn launcher() -> EvolutionLauncher<GenerationalStrategy, BrightnessChallenge> {
        let palette = Palette::parse(".:#").unwrap();
        let target =
            TargetGrid::from_rows(vec![vec![0.0, 0.5, 1.0], vec![1.0, 0.5, 0.0]]).unwrap();
        let challenge = BrightnessChallenge::new(target, BrightnessMap::new(&palette));
        EvolutionLauncher::new(GenerationalStrategy::default(), challenge, palette)
    }

    fn options(generations: usize) -> EvolutionOptions {
        EvolutionOptions::builder()
            .population_size(6)
            .num_generations(generations)
            .seed(12)
            .build()
    }

    #[test]
    fn test_state_transitions() {
        let launcher = launcher();
        let mut evolution = launcher.configure(options(2)).unwrap();

        assert_eq!(evolution.state(), EvolutionState::Initializing);
        assert!(evolution.best().is_none());

        assert_eq!(evolution.step().unwrap(), EvolutionState::Evaluating);
        assert_eq!(evolution.population().len(), 6);

        assert_eq!(evolution.step().unwrap(), EvolutionState::Breeding);
        assert_eq!(evolution.history().len(), 1);
        let (ranked, fitness) = evolution.ranked();
        assert_eq!(ranked.len(), 6);
        assert!(fitness.windows(2).all(|w| w[0] >= w[1]));

        assert_eq!(evolution.step().unwrap(), EvolutionState::Evaluating);
        assert_eq!(evolution.generation(), 1);
        assert_eq!(evolution.step().unwrap(), EvolutionState::Breeding);
        assert_eq!(evolution.step().unwrap(), EvolutionState::Evaluating);
        assert_eq!(evolution.step().unwrap(), EvolutionState::Terminated);
        assert_eq!(evolution.generation(), 2);
        assert_eq!(evolution.history().len(), 3);

        assert!(matches!(evolution.step(), Err(GeneticError::Terminated)));
        assert!(evolution.best().is_some());
    }

    #[test]
    fn test_configure_rejects_bad_setup() {
        let launcher = launcher();

        let zero = EvolutionOptions::builder().population_size(0).build();
        assert!(matches!(
            launcher.configure(zero),
            Err(GeneticError::Configuration(_))
        ));

        let tiny = EvolutionOptions::builder().population_size(2).elite_count(1).build();
        assert!(matches!(
            launcher.configure(tiny),
            Err(GeneticError::Configuration(_))
        ));

        let wrong_shape = EvolutionOptions::builder()
            .shape(Shape::new(3, 2).unwrap())
            .build();
        assert!(matches!(
            launcher.configure(wrong_shape),
            Err(GeneticError::ShapeMismatch { .. })
        ));

        let right_shape = EvolutionOptions::builder()
            .shape(Shape::new(2, 3).unwrap())
            .build();
        assert!(launcher.configure(right_shape).is_ok());
    }

    #[test]
    fn test_history_length_and_best() {
        let outcome = launcher().evolve(options(5)).unwrap();

        assert_eq!(outcome.generations, 5);
        assert_eq!(outcome.history.len(), 6);
        assert_eq!(outcome.history.best().last(), Some(&outcome.best.score));
        assert!(outcome.best.score <= 0.0);
    }

    #[test]
    fn test_unknown_character_aborts_with_generation() {
        // The palette offers a character the brightness map has never seen
        let palette = Palette::parse(".#").unwrap();
        let map = BrightnessMap::from_chars(&['.']).unwrap();
        let target = TargetGrid::from_rows(vec![vec![0.0; 8]; 8]).unwrap();
        let launcher = EvolutionLauncher::new(
            GenerationalStrategy::default(),
            BrightnessChallenge::new(target, map),
            palette,
        );

        match launcher.evolve(options(3)) {
            Err(GeneticError::Evolution { generation, source }) => {
                assert_eq!(generation, 0);
                assert!(matches!(*source, GeneticError::UnknownCharacter { .. }));
            }
            other => panic!("Expected Evolution error, got {:?}", other.map(|o| o.best)),
        }
    }
}
