pub mod challenge;
pub mod history;
pub mod launcher;
pub mod options;

pub use challenge::{BrightnessChallenge, Challenge};
pub use history::FitnessHistory;
pub use launcher::{Evolution, EvolutionLauncher, EvolutionOutcome, EvolutionResult, EvolutionState};
pub use options::{CacheType, EvolutionOptions, EvolutionOptionsBuilder, LogLevel};
