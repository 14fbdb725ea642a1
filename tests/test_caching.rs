use ascii_evolve::{
    caching::{CachedChallenge, ThreadLocalCachedChallenge},
    evolution::{BrightnessChallenge, CacheType, Challenge, EvolutionLauncher, EvolutionOptions},
    grid::{Shape, TargetGrid},
    individual::Individual,
    palette::{BrightnessMap, Palette},
    strategy::GenerationalStrategy,
    Result,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

// Define a challenge that tracks the number of evaluations
#[derive(Clone)]
struct CostlyChallenge {
    inner: BrightnessChallenge,
    // Use Arc<AtomicUsize> to track evaluations across clones
    evaluations: Arc<AtomicUsize>,
}

impl CostlyChallenge {
    fn new(palette: &Palette) -> Self {
        let target = TargetGrid::from_rows(vec![
            vec![0.0, 0.5, 1.0],
            vec![0.5, 1.0, 0.5],
            vec![1.0, 0.5, 0.0],
        ])
        .unwrap();
        Self {
            inner: BrightnessChallenge::new(target, BrightnessMap::new(palette)),
            evaluations: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn get_evaluations(&self) -> usize {
        self.evaluations.load(Ordering::SeqCst)
    }
}

impl Challenge for CostlyChallenge {
    fn shape(&self) -> Shape {
        self.inner.shape()
    }

    fn score(&self, individual: &Individual) -> Result<f64> {
        // Increment evaluation counter
        self.evaluations.fetch_add(1, Ordering::SeqCst);

        // Simulate an expensive computation
        std::thread::sleep(std::time::Duration::from_micros(50));

        self.inner.score(individual)
    }
}

fn palette() -> Palette {
    Palette::parse(".:#").unwrap()
}

fn options(cache_type: Option<CacheType>) -> EvolutionOptions {
    let mut options = EvolutionOptions::builder()
        .population_size(20)
        .num_generations(10)
        .seed(42)
        .build();
    options.set_cache_type(cache_type);
    options
}

#[test]
fn test_direct_caching() {
    let challenge = CostlyChallenge::new(&palette());
    let cached_challenge = CachedChallenge::new(challenge.clone());

    let individual = Individual::from_rows(&[".:#", ":#:", "#:."]).unwrap();

    // First evaluation should compute the score
    assert_eq!(cached_challenge.score(&individual).unwrap(), 0.0);
    assert_eq!(challenge.get_evaluations(), 1);

    // Second evaluation should use the cache
    assert_eq!(cached_challenge.score(&individual).unwrap(), 0.0);
    assert_eq!(challenge.get_evaluations(), 1);

    let other = Individual::from_rows(&["###", "###", "###"]).unwrap();
    assert_eq!(cached_challenge.score(&other).unwrap(), -4.0);
    assert_eq!(challenge.get_evaluations(), 2);
    assert_eq!(cached_challenge.cache_size(), 2);
}

#[test]
fn test_cached_runs_match_uncached() {
    let palette = palette();
    let uncached = CostlyChallenge::new(&palette);
    let launcher = EvolutionLauncher::new(
        GenerationalStrategy::default(),
        uncached.clone(),
        palette.clone(),
    );
    let expected = launcher.evolve(options(None)).unwrap();
    assert_eq!(uncached.get_evaluations(), 20 * 11);

    for cache_type in [CacheType::Global, CacheType::ThreadLocal] {
        let challenge = CostlyChallenge::new(&palette);
        let launcher = EvolutionLauncher::new(
            GenerationalStrategy::default(),
            challenge.clone(),
            palette.clone(),
        );
        let outcome = launcher.evolve(options(Some(cache_type))).unwrap();

        assert_eq!(outcome.best, expected.best);
        assert_eq!(outcome.history, expected.history);
        // Elites are re-scored from the cache every generation
        assert!(challenge.get_evaluations() <= 20 * 11 - 2 * 10);
    }
}

#[test]
fn test_thread_local_cache_on_one_thread() {
    let challenge = CostlyChallenge::new(&palette());
    let cached = ThreadLocalCachedChallenge::new(challenge.clone());
    let individual = Individual::from_rows(&["...", "...", "..."]).unwrap();

    for _ in 0..5 {
        assert_eq!(cached.score(&individual).unwrap(), -5.0);
    }

    assert_eq!(challenge.get_evaluations(), 1);
    assert_eq!(cached.cache_size(), 1);
}
