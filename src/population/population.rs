//! Population type
//!
//! This module provides the Population container type.

use rand::Rng;

use crate::context::RunContext;
use crate::error::{EvoResult, OperatorError};
use crate::population::individual::{compare_fitness, Individual};
use crate::sampling::uniform_distinct_indices;

/// A population of individuals
///
/// Index order carries no identity beyond position; it is stable within one
/// generation. An optional `[lb, ub)` window restricts random sampling to a
/// contiguous slice.
#[derive(Clone, Debug)]
pub struct Population {
    individuals: Vec<Individual>,
    generation: usize,
    window: Option<(usize, usize)>,
}

impl Population {
    /// Create an empty population at generation 1
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a population with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            individuals: Vec::with_capacity(capacity),
            generation: 1,
            window: None,
        }
    }

    /// Create a population from a vector of individuals
    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        Self {
            individuals,
            generation: 1,
            window: None,
        }
    }

    /// Get the current generation
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Get the population size
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Check if the population is empty
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Get an individual by index
    pub fn get(&self, index: usize) -> Option<&Individual> {
        self.individuals.get(index)
    }

    /// Add an individual to the population
    pub fn push(&mut self, individual: Individual) {
        self.individuals.push(individual);
    }

    /// Overwrite slot `index`, returning the individual it held
    pub fn replace(&mut self, index: usize, individual: Individual) -> Individual {
        std::mem::replace(&mut self.individuals[index], individual)
    }

    /// Get an iterator over the individuals
    pub fn iter(&self) -> impl Iterator<Item = &Individual> {
        self.individuals.iter()
    }

    /// Get the underlying individuals
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// A fresh copy of the individuals sorted by ascending fitness.
    ///
    /// Equal fitness keeps the stored order; NaN sorts last.
    pub fn sorted_by_fitness(&self) -> Vec<Individual> {
        let mut sorted = self.individuals.clone();
        sorted.sort_by(|a, b| compare_fitness(a.fitness, b.fitness));
        sorted
    }

    /// Index of the best individual; the earliest index wins ties
    pub fn best_index(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, ind) in self.individuals.iter().enumerate() {
            match best {
                Some(b) if !ind.is_better_than(&self.individuals[b]) => {}
                _ => best = Some(i),
            }
        }
        best
    }

    /// Get the best individual (lowest fitness)
    pub fn best(&self) -> Option<&Individual> {
        self.best_index().map(|i| &self.individuals[i])
    }

    /// The k-th best individual (0 = best), copied from a sorted view
    pub fn kth_best(&self, k: usize) -> Option<Individual> {
        self.sorted_by_fitness().into_iter().nth(k)
    }

    /// Restrict sampling to `[lb, ub)`
    pub fn set_window(&mut self, lb: usize, ub: usize) {
        debug_assert!(lb <= ub && ub <= self.individuals.len(), "invalid window");
        self.window = Some((lb, ub));
    }

    /// Sample from the whole population again
    pub fn clear_window(&mut self) {
        self.window = None;
    }

    /// The active sampling window, if any
    pub fn window(&self) -> Option<(usize, usize)> {
        self.window
    }

    /// Draw `n` pairwise-distinct indices uniformly from the active window
    /// (or the whole population), never returning `exclude`.
    pub fn random_distinct<R: Rng + ?Sized>(
        &self,
        n: usize,
        exclude: Option<usize>,
        rng: &mut R,
    ) -> Result<Vec<usize>, OperatorError> {
        let (lb, ub) = self.window.unwrap_or((0, self.individuals.len()));
        let relative_exclude = exclude.and_then(|e| e.checked_sub(lb));
        let picked = uniform_distinct_indices(relative_exclude, n, ub - lb, rng)?;
        Ok(picked.into_iter().map(|i| i + lb).collect())
    }

    /// Keep only the first `round(len * factor)` individuals, and never
    /// fewer than one.
    ///
    /// A factor of 1 or more leaves the population untouched. Returns the new
    /// size.
    pub fn reduce(&mut self, factor: f64) -> usize {
        if factor < 1.0 {
            let len = self.individuals.len();
            let keep = ((len as f64 * factor).round() as usize).max(1).min(len);
            self.individuals.truncate(keep);
            if matches!(self.window, Some((_, ub)) if ub > keep) {
                self.window = None;
            }
        }
        self.individuals.len()
    }

    /// Evaluate every individual
    pub fn evaluate(&mut self, ctx: &mut RunContext) -> EvoResult<()> {
        for individual in &mut self.individuals {
            individual.update_fitness(ctx)?;
        }
        Ok(())
    }

    /// Close the current generation.
    ///
    /// Records the best fitness and the F/CR/NP in force on the context, then
    /// increments both the population's and the context's generation counters.
    pub fn advance_generation(&mut self, ctx: &mut RunContext) {
        let best_fitness = self.best().map_or(f64::INFINITY, |b| b.fitness);
        ctx.record_generation(self.generation, best_fitness);
        self.generation += 1;
    }
}

impl Default for Population {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for Population {
    type Output = Individual;

    fn index(&self, index: usize) -> &Self::Output {
        &self.individuals[index]
    }
}

impl FromIterator<Individual> for Population {
    fn from_iter<I: IntoIterator<Item = Individual>>(iter: I) -> Self {
        Self::from_individuals(iter.into_iter().collect())
    }
}
