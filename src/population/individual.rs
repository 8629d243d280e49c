//! Individual type
//!
//! This module provides the Individual type: a genotype with its fitness.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::context::RunContext;
use crate::error::EvoResult;

/// Order two fitness values ascending, NaN last.
pub fn compare_fitness(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// An individual in the population
///
/// The genotype length is fixed at construction. Fitness is `+inf` until the
/// individual is evaluated; lower is better.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    genotype: Vec<f64>,
    /// The fitness value (`+inf` if not yet evaluated)
    pub fitness: f64,
    /// Generation when this individual was created
    pub birth_generation: usize,
}

impl Individual {
    /// Create a zero-filled individual of dimension `dimension`
    pub fn new(dimension: usize) -> Self {
        Self::from_genotype(vec![0.0; dimension])
    }

    /// Create an unevaluated individual from a genotype
    pub fn from_genotype(genotype: Vec<f64>) -> Self {
        Self {
            genotype,
            fitness: f64::INFINITY,
            birth_generation: 0,
        }
    }

    /// Create an unevaluated individual with birth generation
    pub fn with_generation(genotype: Vec<f64>, generation: usize) -> Self {
        Self {
            birth_generation: generation,
            ..Self::from_genotype(genotype)
        }
    }

    /// Create an individual with a known fitness
    pub fn with_fitness(genotype: Vec<f64>, fitness: f64) -> Self {
        Self {
            fitness,
            ..Self::from_genotype(genotype)
        }
    }

    /// Problem dimension
    pub fn dimension(&self) -> usize {
        self.genotype.len()
    }

    /// Read one gene
    pub fn gene(&self, index: usize) -> f64 {
        debug_assert!(index < self.genotype.len(), "gene index out of range");
        self.genotype[index]
    }

    /// Write one gene
    pub fn set_gene(&mut self, index: usize, value: f64) {
        debug_assert!(index < self.genotype.len(), "gene index out of range");
        self.genotype[index] = value;
    }

    /// Copy a whole genotype in place.
    ///
    /// # Panics
    /// Panics if `source` has a different length
    pub fn copy_genotype(&mut self, source: &[f64]) {
        self.genotype.copy_from_slice(source);
    }

    /// Get the genotype
    pub fn genotype(&self) -> &[f64] {
        &self.genotype
    }

    /// Get the genotype for in-place modification
    pub fn genotype_mut(&mut self) -> &mut [f64] {
        &mut self.genotype
    }

    /// Take the genotype out of this individual
    pub fn into_genotype(self) -> Vec<f64> {
        self.genotype
    }

    /// Check if this individual has been evaluated
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_finite() || self.fitness.is_nan()
    }

    /// Evaluate through the run's evaluator, storing and returning the fitness.
    ///
    /// Counts one evaluation on the context.
    pub fn update_fitness(&mut self, ctx: &mut RunContext) -> EvoResult<f64> {
        self.fitness = ctx.evaluate(&self.genotype)?;
        Ok(self.fitness)
    }

    /// Check if this individual is strictly better than another
    pub fn is_better_than(&self, other: &Self) -> bool {
        compare_fitness(self.fitness, other.fitness) == Ordering::Less
    }

    /// Age of this individual (generations since birth)
    pub fn age(&self, current_generation: usize) -> usize {
        current_generation.saturating_sub(self.birth_generation)
    }
}

impl PartialOrd for Individual {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(compare_fitness(self.fitness, other.fitness))
    }
}
