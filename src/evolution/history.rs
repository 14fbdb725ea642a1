//! Per-generation fitness statistics.

use std::fmt::Write;

/// Append-only record of the best and average fitness of every evaluated generation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FitnessHistory {
    best: Vec<f64>,
    average: Vec<f64>,
}

impl FitnessHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, best: f64, average: f64) {
        self.best.push(best);
        self.average.push(average);
    }

    pub fn best(&self) -> &[f64] {
        &self.best
    }

    pub fn average(&self) -> &[f64] {
        &self.average
    }

    pub fn len(&self) -> usize {
        self.best.len()
    }

    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }

    /// Iterates over `(best, average)` pairs in generation order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.best.iter().copied().zip(self.average.iter().copied())
    }

    /// Renders the history as CSV with a `generation,best,average` header.
    pub fn to_csv(&self) -> String {
        let mut csv = String::from("generation,best,average\n");
        for (generation, (best, average)) in self.iter().enumerate() {
            // Writing into a String cannot fail
            let _ = writeln!(csv, "{},{},{}", generation, best, average);
        }
        csv
    }
}
