pub mod caching;
pub mod error;
pub mod evolution;
pub mod grid;
pub mod individual;
pub mod io;
pub mod palette;
pub mod population;
pub mod rng;
pub mod selection;
pub mod strategy;

// Re-export commonly used types for convenience
pub use error::{GeneticError, OptionExt, Result, ResultExt};
