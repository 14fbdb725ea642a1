//! # Individual
//!
//! An [`Individual`] is one candidate picture: a fixed-shape grid of palette
//! characters stored row-major. It carries the two variation operators of the
//! genetic algorithm:
//!
//! - [`Individual::crossover`] recombines two parents by splitting them at a row.
//! - [`Individual::mutate`] resamples cells independently from the palette.
//!
//! Both return new individuals and leave their inputs untouched. Neither can
//! introduce a character that was not already in a parent or in the palette.
//!
//! ## Example
//!
//! ```rust
//! use ascii_evolve::individual::Individual;
//! use ascii_evolve::palette::Palette;
//! use ascii_evolve::rng::RandomNumberGenerator;
//!
//! let palette = Palette::parse(".#").unwrap();
//! let mut rng = RandomNumberGenerator::from_seed(1);
//!
//! let mom = Individual::from_rows(&["..", ".."]).unwrap();
//! let dad = Individual::from_rows(&["##", "##"]).unwrap();
//!
//! let (son, daughter) = mom.crossover(&dad, 1.0, &mut rng).unwrap();
//! assert_eq!(son.render(), "..\n##");
//! assert_eq!(daughter.render(), "##\n..");
//!
//! let same = son.mutate(&palette, 0.0, &mut rng);
//! assert_eq!(same, son);
//! ```

use std::fmt;

use crate::error::{GeneticError, Result};
use crate::grid::Shape;
use crate::palette::Palette;
use crate::rng::RandomNumberGenerator;

/// A grid of characters with a fixed shape.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Individual {
    shape: Shape,
    cells: Vec<char>,
}

impl Individual {
    /// Creates an individual from row-major cells.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `cells.len()` is not `shape.area()`.
    pub fn new(shape: Shape, cells: Vec<char>) -> Result<Self> {
        if cells.len() != shape.area() {
            return Err(GeneticError::Configuration(format!(
                "Expected {} cells for a {} grid, got {}",
                shape.area(),
                shape,
                cells.len()
            )));
        }
        Ok(Self { shape, cells })
    }

    /// Creates an individual from one string per row.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for empty input or rows of different lengths.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let rows: Vec<Vec<char>> = rows.iter().map(|r| r.as_ref().chars().collect()).collect();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        let shape = Shape::new(rows.len(), width)?;

        if let Some(row) = rows.iter().position(|r| r.len() != width) {
            return Err(GeneticError::Configuration(format!(
                "Row {} has {} characters, expected {}",
                row,
                rows[row].len(),
                width
            )));
        }

        Ok(Self {
            shape,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Creates an individual whose cells are drawn uniformly, with replacement,
    /// from `palette`.
    pub fn random(shape: Shape, palette: &Palette, rng: &mut RandomNumberGenerator) -> Self {
        let cells = (0..shape.area()).map(|_| palette.sample(rng)).collect();
        Self { shape, cells }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    /// Returns the character at `(row, column)`, if inside the grid.
    pub fn get(&self, row: usize, column: usize) -> Option<char> {
        self.index(row, column).map(|i| self.cells[i])
    }

    /// Replaces the character at `(row, column)` and returns the old one.
    ///
    /// Returns `None` and leaves the grid unchanged when the position is outside it.
    pub fn set(&mut self, row: usize, column: usize, character: char) -> Option<char> {
        let i = self.index(row, column)?;
        Some(std::mem::replace(&mut self.cells[i], character))
    }

    fn index(&self, row: usize, column: usize) -> Option<usize> {
        (row < self.shape.height() && column < self.shape.width())
            .then(|| row * self.shape.width() + column)
    }

    /// Iterates over the rows of the grid.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.chunks(self.shape.width())
    }

    /// Single-point row crossover.
    ///
    /// With probability `1 - crossover_rate` both parents are returned as copies.
    /// Otherwise a row `r` is drawn from `1..height`; the first child takes rows
    /// `[0, r)` from `self` and the rest from `other`, the second child the
    /// complement. A single-row grid has no split point, so the recombination
    /// becomes a fair coin flip between swapping the row and keeping it.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the parents differ in shape.
    pub fn crossover(
        &self,
        other: &Self,
        crossover_rate: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(Self, Self)> {
        if self.shape != other.shape {
            return Err(GeneticError::ShapeMismatch {
                expected: self.shape,
                actual: other.shape,
            });
        }

        if !rng.gen_bool(crossover_rate) {
            return Ok((self.clone(), other.clone()));
        }

        let height = self.shape.height();
        if height == 1 {
            return Ok(if rng.gen_bool(0.5) {
                (other.clone(), self.clone())
            } else {
                (self.clone(), other.clone())
            });
        }

        let split = rng.gen_range(1..height) * self.shape.width();
        Ok((self.spliced(other, split), other.spliced(self, split)))
    }

    fn spliced(&self, tail: &Self, at: usize) -> Self {
        let mut cells = Vec::with_capacity(self.cells.len());
        cells.extend_from_slice(&self.cells[..at]);
        cells.extend_from_slice(&tail.cells[at..]);
        Self {
            shape: self.shape,
            cells,
        }
    }

    /// Returns a copy in which every cell was, with probability
    /// `mutation_rate`, replaced by a uniformly drawn palette character.
    ///
    /// The drawn character may equal the one it replaces.
    pub fn mutate(
        &self,
        palette: &Palette,
        mutation_rate: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Self {
        let mut mutated = self.clone();
        mutated.mutate_in_place(palette, mutation_rate, rng);
        mutated
    }

    /// Same as [`Individual::mutate`] but reuses `self`.
    pub fn mutate_in_place(
        &mut self,
        palette: &Palette,
        mutation_rate: f64,
        rng: &mut RandomNumberGenerator,
    ) {
        for cell in self.cells.iter_mut() {
            if rng.gen_bool(mutation_rate) {
                *cell = palette.sample(rng);
            }
        }
    }

    /// Renders the grid as text: one line per row, joined by newlines.
    pub fn render(&self) -> String {
        let mut text = String::with_capacity(self.cells.len() + self.shape.height());
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                text.push('\n');
            }
            text.extend(row);
        }
        text
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
