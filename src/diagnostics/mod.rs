//! Diagnostics and statistics
//!
//! This module provides the per-generation time series a run records into its
//! context: best fitness and the control parameters in force.

use serde::{Deserialize, Serialize};

/// Snapshot recorded each time a population advances a generation
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// Generation number that just completed
    pub generation: usize,
    /// Total fitness evaluations so far
    pub evaluations: usize,
    /// Best fitness in the population
    pub best_fitness: f64,
    /// Scale factor F in force
    pub f: f64,
    /// Crossover rate CR in force
    pub cr: f64,
    /// Population size NP
    pub population_size: usize,
}

/// History collector for an entire run
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RunHistory {
    /// Records per generation
    pub generations: Vec<GenerationRecord>,
    /// Reason for termination
    pub termination_reason: Option<String>,
}

impl RunHistory {
    /// Create a new history collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a generation
    pub fn record(&mut self, record: GenerationRecord) {
        self.generations.push(record);
    }

    /// Get the number of generations recorded
    pub fn num_generations(&self) -> usize {
        self.generations.len()
    }

    /// Get the best (lowest) fitness across all generations
    pub fn best_fitness(&self) -> Option<f64> {
        self.generations
            .iter()
            .map(|g| g.best_fitness)
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }

    /// Get the final best fitness
    pub fn final_best_fitness(&self) -> Option<f64> {
        self.generations.last().map(|g| g.best_fitness)
    }

    /// Best fitness time series
    pub fn best_fitness_history(&self) -> Vec<f64> {
        self.generations.iter().map(|g| g.best_fitness).collect()
    }

    /// F time series
    pub fn f_history(&self) -> Vec<f64> {
        self.generations.iter().map(|g| g.f).collect()
    }

    /// CR time series
    pub fn cr_history(&self) -> Vec<f64> {
        self.generations.iter().map(|g| g.cr).collect()
    }

    /// NP time series
    pub fn population_size_history(&self) -> Vec<usize> {
        self.generations.iter().map(|g| g.population_size).collect()
    }

    /// Set the termination reason
    pub fn set_termination_reason(&mut self, reason: &str) {
        self.termination_reason = Some(reason.to_string());
    }

    /// Get a summary of the run
    pub fn summary(&self) -> String {
        format!(
            "Run Summary:\n\
             - Generations: {}\n\
             - Best fitness: {:.6e}\n\
             - Final best: {:.6e}\n\
             - Termination: {}",
            self.num_generations(),
            self.best_fitness().unwrap_or(f64::INFINITY),
            self.final_best_fitness().unwrap_or(f64::INFINITY),
            self.termination_reason.as_deref().unwrap_or("unknown")
        )
    }
}

pub mod prelude {
    pub use super::{GenerationRecord, RunHistory};
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(generation: usize, best_fitness: f64, population_size: usize) -> GenerationRecord {
        GenerationRecord {
            generation,
            evaluations: generation * 10,
            best_fitness,
            f: 0.5,
            cr: 0.9,
            population_size,
        }
    }

    #[test]
    fn test_history_record() {
        let mut history = RunHistory::new();
        history.record(record(1, 5.0, 20));
        history.record(record(2, 3.0, 20));
        history.record(record(3, 4.0, 10));

        assert_eq!(history.num_generations(), 3);
        assert_eq!(history.best_fitness(), Some(3.0));
        assert_eq!(history.final_best_fitness(), Some(4.0));
        assert_eq!(history.best_fitness_history(), vec![5.0, 3.0, 4.0]);
        assert_eq!(history.population_size_history(), vec![20, 20, 10]);
        assert_eq!(history.f_history(), vec![0.5; 3]);
        assert_eq!(history.cr_history(), vec![0.9; 3]);
    }

    #[test]
    fn test_empty_history() {
        let history = RunHistory::new();
        assert_eq!(history.best_fitness(), None);
        assert_eq!(history.final_best_fitness(), None);
    }

    #[test]
    fn test_summary() {
        let mut history = RunHistory::new();
        history.record(record(1, 0.25, 20));
        history.set_termination_reason("evaluation budget exhausted");

        let summary = history.summary();
        assert!(summary.contains("Generations: 1"));
        assert!(summary.contains("evaluation budget exhausted"));
    }
}
