//! # Grids
//!
//! [`Shape`] describes the fixed dimensions shared by the target image and every
//! individual of a run. [`TargetGrid`] holds the brightness samples the
//! evolution tries to reproduce.
//!
//! Both validate their invariants once, at construction, so the genetic
//! operators never have to re-check them.
//!
//! ## Example
//!
//! ```rust
//! use ascii_evolve::grid::{Shape, TargetGrid};
//!
//! let target = TargetGrid::from_rows(vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
//! assert_eq!(target.shape(), Shape::new(2, 2).unwrap());
//! assert_eq!(target.get(1, 0), Some(1.0));
//! ```

use std::fmt;

use crate::error::{GeneticError, Result};

/// Dimensions of a grid: `height` rows of `width` cells, both at least 1.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    height: usize,
    width: usize,
}

impl Shape {
    /// Creates a shape.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if either dimension is zero.
    pub fn new(height: usize, width: usize) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(GeneticError::Configuration(format!(
                "Grid dimensions must be at least 1x1, got {}x{}",
                height, width
            )));
        }
        Ok(Self { height, width })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of cells in the grid.
    pub fn area(&self) -> usize {
        self.height * self.width
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}

/// Brightness samples in `[0, 1]`, stored row-major.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct TargetGrid {
    shape: Shape,
    values: Vec<f64>,
}

impl TargetGrid {
    /// Creates a target grid from row-major samples.
    ///
    /// # Errors
    ///
    /// - `Configuration` if `values.len()` is not `shape.area()`.
    /// - `InvalidNumericValue` if a sample is not finite or lies outside `[0, 1]`.
    pub fn new(shape: Shape, values: Vec<f64>) -> Result<Self> {
        if values.len() != shape.area() {
            return Err(GeneticError::Configuration(format!(
                "Expected {} samples for a {} grid, got {}",
                shape.area(),
                shape,
                values.len()
            )));
        }

        if let Some((idx, value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || !(0.0..=1.0).contains(*v))
        {
            return Err(GeneticError::InvalidNumericValue(format!(
                "Target sample at row {}, column {} is {}; expected a value in [0, 1]",
                idx / shape.width,
                idx % shape.width,
                value
            )));
        }

        Ok(Self { shape, values })
    }

    /// Creates a target grid from a list of rows.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an empty or ragged list, plus the
    /// errors of [`TargetGrid::new`].
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        let shape = Shape::new(rows.len(), width)?;

        if let Some(row) = rows.iter().position(|r| r.len() != width) {
            return Err(GeneticError::Configuration(format!(
                "Row {} has {} samples, expected {}",
                row,
                rows[row].len(),
                width
            )));
        }

        Self::new(shape, rows.into_iter().flatten().collect())
    }

    /// Creates a target grid from 8-bit luma samples, mapping 0..=255 onto `[0, 1]`.
    pub fn from_luma(shape: Shape, pixels: &[u8]) -> Result<Self> {
        let values = pixels.iter().map(|&p| f64::from(p) / 255.0).collect();
        Self::new(shape, values)
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// All samples, row-major.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the sample at `(row, column)`, if inside the grid.
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        if row >= self.shape.height || column >= self.shape.width {
            return None;
        }
        Some(self.values[row * self.shape.width + column])
    }

    /// Iterates over the rows of the grid.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks(self.shape.width)
    }
}
