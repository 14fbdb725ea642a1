//! # Challenge
//!
//! A [`Challenge`] scores individuals; higher is better. [`BrightnessChallenge`]
//! is the fitness function of ASCII art evolution: the negated sum of absolute
//! differences between each target sample and the brightness of the character
//! drawn in that cell.
//!
//! ## Example
//!
//! ```rust
//! use ascii_evolve::evolution::{BrightnessChallenge, Challenge};
//! use ascii_evolve::grid::TargetGrid;
//! use ascii_evolve::individual::Individual;
//! use ascii_evolve::palette::{BrightnessMap, Palette};
//!
//! let palette = Palette::parse(".#").unwrap();
//! let target = TargetGrid::from_rows(vec![vec![0.0, 1.0]]).unwrap();
//! let challenge = BrightnessChallenge::new(target, BrightnessMap::new(&palette));
//!
//! let perfect = Individual::from_rows(&[".#"]).unwrap();
//! let inverted = Individual::from_rows(&["#."]).unwrap();
//!
//! assert_eq!(challenge.score(&perfect).unwrap(), 0.0);
//! assert_eq!(challenge.score(&inverted).unwrap(), -2.0);
//! ```

use crate::error::{GeneticError, Result};
use crate::grid::{Shape, TargetGrid};
use crate::individual::Individual;
use crate::palette::BrightnessMap;

/// Fitness function for individuals.
///
/// Implementations must be pure: the same individual always gets the same score.
/// They are shared across threads during parallel evaluation.
pub trait Challenge: Send + Sync {
    /// Shape every scored individual must have.
    fn shape(&self) -> Shape;

    /// Scores an individual. Higher is better.
    fn score(&self, individual: &Individual) -> Result<f64>;
}

impl<C: Challenge + ?Sized> Challenge for &C {
    fn shape(&self) -> Shape {
        (**self).shape()
    }

    fn score(&self, individual: &Individual) -> Result<f64> {
        (**self).score(individual)
    }
}

impl<C: Challenge + ?Sized> Challenge for Box<C> {
    fn shape(&self) -> Shape {
        (**self).shape()
    }

    fn score(&self, individual: &Individual) -> Result<f64> {
        (**self).score(individual)
    }
}

/// Scores how closely character brightness follows a target image.
#[derive(Debug, Clone)]
pub struct BrightnessChallenge {
    target: TargetGrid,
    brightness: BrightnessMap,
}

impl BrightnessChallenge {
    pub fn new(target: TargetGrid, brightness: BrightnessMap) -> Self {
        Self { target, brightness }
    }

    pub fn target(&self) -> &TargetGrid {
        &self.target
    }

    pub fn brightness(&self) -> &BrightnessMap {
        &self.brightness
    }
}

impl Challenge for BrightnessChallenge {
    fn shape(&self) -> Shape {
        self.target.shape()
    }

    /// Returns `-Σ |target - brightness|`, in `(-cells, 0]`.
    ///
    /// # Errors
    ///
    /// - `ShapeMismatch` if the individual is not shaped like the target.
    /// - `UnknownCharacter` if a cell holds a character outside the brightness map.
    fn score(&self, individual: &Individual) -> Result<f64> {
        let shape = self.target.shape();
        if individual.shape() != shape {
            return Err(GeneticError::ShapeMismatch {
                expected: shape,
                actual: individual.shape(),
            });
        }

        let mut distance = 0.0;
        for (i, (&pixel, &character)) in self
            .target
            .values()
            .iter()
            .zip(individual.cells())
            .enumerate()
        {
            let value = self.brightness.brightness(character).ok_or_else(|| {
                GeneticError::UnknownCharacter {
                    character,
                    row: i / shape.width(),
                    column: i % shape.width(),
                }
            })?;
            distance += (pixel - value).abs();
        }

        Ok(-distance)
    }
}
