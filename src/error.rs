//! # Error Types
//!
//! This module defines the error type shared by every part of the crate. All
//! failures are fatal for the run that produced them: setup errors are reported
//! before the first generation, and errors raised while a run is in progress
//! are wrapped in [`GeneticError::Evolution`] together with the generation index.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use ascii_evolve::error::{GeneticError, Result};
//! use ascii_evolve::palette::Palette;
//!
//! fn load() -> Result<Palette> {
//!     Palette::parse("  .:-=+*#%@  ")
//! }
//!
//! match load() {
//!     Ok(palette) => assert_eq!(palette.len(), 9),
//!     Err(e) => panic!("unexpected error: {}", e),
//! }
//!
//! assert!(matches!(Palette::parse("   "), Err(GeneticError::InvalidPalette(_))));
//! ```
//!
//! Using the `ResultExt` trait to add context to errors:
//!
//! ```rust
//! use ascii_evolve::error::{Result, ResultExt};
//! use std::fs::File;
//!
//! fn open_palette(path: &str) -> Result<()> {
//!     File::open(path).context("Failed to open palette file")?;
//!     Ok(())
//! }
//!
//! assert!(open_palette("/definitely/not/here.txt").is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use ascii_evolve::error::{GeneticError, OptionExt};
//!
//! fn best_score(scores: &[f64]) -> ascii_evolve::error::Result<f64> {
//!     scores
//!         .iter()
//!         .cloned()
//!         .reduce(f64::max)
//!         .ok_or_else_genetic(|| GeneticError::EmptyPopulation)
//! }
//!
//! assert_eq!(best_score(&[-3.0, -1.5]).unwrap(), -1.5);
//! assert!(best_score(&[]).is_err());
//! ```

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

use crate::grid::Shape;

/// Represents errors that can occur while evolving ASCII art.
#[derive(Error, Debug)]
pub enum GeneticError {
    /// The character palette is unusable, e.g. empty after trimming.
    #[error("Invalid palette: {0}")]
    InvalidPalette(String),

    /// Two grids that must line up cell by cell have different dimensions.
    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: Shape, actual: Shape },

    /// An individual holds a character the brightness map does not know.
    #[error("Unknown character {character:?} at row {row}, column {column}")]
    UnknownCharacter {
        character: char,
        row: usize,
        column: usize,
    },

    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// Error that occurs when a fitness calculation produces an unusable value.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// Error that occurs when NaN, infinity or out-of-range samples are encountered.
    #[error("Invalid numeric value: {0}")]
    InvalidNumericValue(String),

    /// The source image could not be opened or decoded.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// A finished run was asked to advance again.
    #[error("Evolution already terminated")]
    Terminated,

    /// A failure raised while a run was in progress.
    #[error("Evolution failed in generation {generation}: {source}")]
    Evolution {
        generation: usize,
        #[source]
        source: Box<GeneticError>,
    },

    /// Error that occurs when an I/O operation fails.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

impl GeneticError {
    /// Wraps `self` with the generation in which it happened.
    ///
    /// Errors that already carry a generation are returned unchanged.
    pub fn in_generation(self, generation: usize) -> Self {
        match self {
            GeneticError::Evolution { .. } => self,
            other => GeneticError::Evolution {
                generation,
                source: Box::new(other),
            },
        }
    }
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Result to add context to errors.
///
/// ## Examples
///
/// ```rust
/// use ascii_evolve::error::ResultExt;
/// use std::fs::File;
///
/// fn read_file(path: &str) -> ascii_evolve::error::Result<()> {
///     File::open(path).context("Failed to open file")?;
///     Ok(())
/// }
/// ```
pub trait ResultExt<T, E> {
    /// Converts the error to a `GeneticError::Other` prefixed with `context`.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| GeneticError::Other(format!("{}: {}", context, e)))
    }
}

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, GeneticError>` using
    /// a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_generation_wraps_once() {
        let err = GeneticError::EmptyPopulation.in_generation(4);
        let err = err.in_generation(9);

        match err {
            GeneticError::Evolution { generation, source } => {
                assert_eq!(generation, 4);
                assert!(matches!(*source, GeneticError::EmptyPopulation));
            }
            other => panic!("Expected Evolution error, got {:?}", other),
        }
    }

    #[test]
    fn test_display_messages() {
        let err = GeneticError::UnknownCharacter {
            character: 'x',
            row: 1,
            column: 2,
        };
        assert_eq!(err.to_string(), "Unknown character 'x' at row 1, column 2");

        let err = GeneticError::ShapeMismatch {
            expected: Shape::new(2, 3).unwrap(),
            actual: Shape::new(3, 2).unwrap(),
        };
        assert_eq!(err.to_string(), "Shape mismatch: expected 2x3, got 3x2");
    }

    #[test]
    fn test_context() {
        let io_error: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let err = io_error.context("Failed to read palette").unwrap_err();
        assert_eq!(err.to_string(), "Failed to read palette: missing");
    }
}
