//! # Caching Module
//!
//! Fitness memoization. Elites and unchanged offspring are scored again every
//! generation; a cache in front of the challenge answers those repeats without
//! walking the grid. Only successful scores are stored, and a cache that
//! reaches its capacity starts over empty.
//!
//! ## Example
//!
//! ```rust
//! use ascii_evolve::caching::CachedChallenge;
//! use ascii_evolve::evolution::{BrightnessChallenge, Challenge};
//! use ascii_evolve::grid::TargetGrid;
//! use ascii_evolve::individual::Individual;
//! use ascii_evolve::palette::{BrightnessMap, Palette};
//!
//! let palette = Palette::parse(".#").unwrap();
//! let target = TargetGrid::from_rows(vec![vec![0.0, 1.0]]).unwrap();
//! let cached = CachedChallenge::new(BrightnessChallenge::new(target, BrightnessMap::new(&palette)));
//!
//! let individual = Individual::from_rows(&["##"]).unwrap();
//! assert_eq!(cached.score(&individual).unwrap(), -1.0);
//! assert_eq!(cached.score(&individual).unwrap(), -1.0);
//! assert_eq!(cached.cache_size(), 1);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::Result;
use crate::evolution::Challenge;
use crate::grid::Shape;
use crate::individual::Individual;

/// Number of scores a cache holds before it is cleared.
pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;

/// A wrapper around a challenge that caches fitness evaluations in one map
/// shared by all threads.
///
/// Clones share the same cache.
#[derive(Debug, Clone)]
pub struct CachedChallenge<C>
where
    C: Challenge,
{
    /// The wrapped challenge
    challenge: C,
    /// The cache of fitness evaluations
    cache: Arc<Mutex<HashMap<Individual, f64>>>,
    capacity: usize,
}

impl<C> CachedChallenge<C>
where
    C: Challenge,
{
    /// Creates a new cached challenge wrapping the given challenge.
    pub fn new(challenge: C) -> Self {
        Self::with_capacity(challenge, DEFAULT_CACHE_CAPACITY)
    }

    /// Creates a cached challenge that is cleared after `capacity` entries.
    /// A capacity of 0 is treated as 1.
    pub fn with_capacity(challenge: C, capacity: usize) -> Self {
        Self {
            challenge,
            cache: Arc::new(Mutex::new(HashMap::new())),
            capacity: capacity.max(1),
        }
    }

    /// Returns a reference to the wrapped challenge.
    pub fn inner(&self) -> &C {
        &self.challenge
    }

    /// Returns the number of cached fitness evaluations.
    pub fn cache_size(&self) -> usize {
        self.lock().len()
    }

    /// Clears the cache.
    pub fn clear_cache(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Individual, f64>> {
        // The map stays consistent even if a holder panicked
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C> Challenge for CachedChallenge<C>
where
    C: Challenge,
{
    fn shape(&self) -> Shape {
        self.challenge.shape()
    }

    fn score(&self, individual: &Individual) -> Result<f64> {
        if let Some(score) = self.lock().get(individual) {
            return Ok(*score);
        }

        // Score without holding the lock so other threads can keep reading
        let score = self.challenge.score(individual)?;

        let mut cache = self.lock();
        if cache.len() >= self.capacity {
            cache.clear();
        }
        cache.insert(individual.clone(), score);

        Ok(score)
    }
}

/// A wrapper around a challenge with one cache per thread.
///
/// There is no locking, at the price of threads not seeing each other's scores.
#[derive(Debug)]
pub struct ThreadLocalCachedChallenge<C>
where
    C: Challenge,
{
    challenge: C,
    cache: thread_local::ThreadLocal<RefCell<HashMap<Individual, f64>>>,
    capacity: usize,
}

impl<C> ThreadLocalCachedChallenge<C>
where
    C: Challenge,
{
    pub fn new(challenge: C) -> Self {
        Self::with_capacity(challenge, DEFAULT_CACHE_CAPACITY)
    }

    /// Creates a cached challenge whose per-thread caches are cleared after
    /// `capacity` entries. A capacity of 0 is treated as 1.
    pub fn with_capacity(challenge: C, capacity: usize) -> Self {
        Self {
            challenge,
            cache: thread_local::ThreadLocal::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn inner(&self) -> &C {
        &self.challenge
    }

    /// Returns the number of cached fitness evaluations for the current thread.
    pub fn cache_size(&self) -> usize {
        self.cache.get().map_or(0, |cell| cell.borrow().len())
    }

    /// Clears the cache of every thread.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

impl<C> Challenge for ThreadLocalCachedChallenge<C>
where
    C: Challenge,
{
    fn shape(&self) -> Shape {
        self.challenge.shape()
    }

    fn score(&self, individual: &Individual) -> Result<f64> {
        let cell = self.cache.get_or_default();

        if let Some(score) = cell.borrow().get(individual) {
            return Ok(*score);
        }

        let score = self.challenge.score(individual)?;

        let mut cache = cell.borrow_mut();
        if cache.len() >= self.capacity {
            cache.clear();
        }
        cache.insert(individual.clone(), score);

        Ok(score)
    }
}
