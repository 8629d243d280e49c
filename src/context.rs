//! Run context
//!
//! The mutable state shared between an algorithm and its operators for the
//! duration of one run: problem shape, bounds, the control parameters in
//! force, counters and the recorded history.

use serde::{Deserialize, Serialize};

use crate::bounds::MultiBounds;
use crate::diagnostics::{GenerationRecord, RunHistory};
use crate::error::{EvoResult, EvolutionError};
use crate::fitness::traits::Evaluator;

/// Differential weight and crossover probability passed to every operator call
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlParameters {
    /// Scale factor F
    pub f: f64,
    /// Crossover rate CR
    pub cr: f64,
}

impl ControlParameters {
    /// Create new control parameters
    pub fn new(f: f64, cr: f64) -> Self {
        Self { f, cr }
    }
}

impl Default for ControlParameters {
    fn default() -> Self {
        Self { f: 0.5, cr: 0.9 }
    }
}

/// Everything one optimization run reads and writes besides its population
pub struct RunContext {
    evaluator: Box<dyn Evaluator>,
    population_size: usize,
    bounds: Option<MultiBounds>,
    control: ControlParameters,
    evaluations: usize,
    generations: usize,
    history: RunHistory,
}

impl RunContext {
    /// Create a context for `evaluator` with population size `population_size`.
    ///
    /// The problem dimension is taken from the evaluator.
    pub fn new<E: Evaluator + 'static>(evaluator: E, population_size: usize) -> Self {
        Self {
            evaluator: Box::new(evaluator),
            population_size,
            bounds: None,
            control: ControlParameters::default(),
            evaluations: 0,
            generations: 0,
            history: RunHistory::new(),
        }
    }

    /// Set the search-space bounds
    pub fn with_bounds(mut self, bounds: MultiBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Set the initial control parameters
    pub fn with_control(mut self, control: ControlParameters) -> Self {
        self.control = control;
        self
    }

    /// Problem dimension D
    pub fn dimension(&self) -> usize {
        self.evaluator.dimension()
    }

    /// Population size NP
    pub fn population_size(&self) -> usize {
        self.population_size
    }

    /// Change the population size (after a size reduction)
    pub fn set_population_size(&mut self, size: usize) {
        self.population_size = size;
    }

    /// Search-space bounds, if configured
    pub fn bounds(&self) -> Option<&MultiBounds> {
        self.bounds.as_ref()
    }

    /// Search-space bounds, failing when absent or of the wrong dimension
    pub fn require_bounds(&self) -> EvoResult<&MultiBounds> {
        let bounds = self.bounds.as_ref().ok_or_else(|| {
            EvolutionError::Configuration("search-space bounds must be specified".to_string())
        })?;
        if bounds.dimension() != self.dimension() {
            return Err(EvolutionError::Configuration(format!(
                "bounds cover {} dimensions but the problem has {}",
                bounds.dimension(),
                self.dimension()
            )));
        }
        Ok(bounds)
    }

    /// Control parameters currently in force
    pub fn control(&self) -> ControlParameters {
        self.control
    }

    /// Replace the control parameters in force
    pub fn set_control(&mut self, control: ControlParameters) {
        self.control = control;
    }

    /// The objective function
    pub fn evaluator(&self) -> &dyn Evaluator {
        self.evaluator.as_ref()
    }

    /// Evaluate a genotype, counting the evaluation
    pub fn evaluate(&mut self, genotype: &[f64]) -> EvoResult<f64> {
        let fitness = self.evaluator.evaluate(genotype)?;
        self.evaluations += 1;
        Ok(fitness)
    }

    /// Fitness evaluations consumed so far
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Generations completed so far
    pub fn generations(&self) -> usize {
        self.generations
    }

    /// Count a completed generation and record its snapshot
    pub fn record_generation(&mut self, generation: usize, best_fitness: f64) {
        self.generations += 1;
        self.history.record(GenerationRecord {
            generation,
            evaluations: self.evaluations,
            best_fitness,
            f: self.control.f,
            cr: self.control.cr,
            population_size: self.population_size,
        });
    }

    /// Recorded per-generation history
    pub fn history(&self) -> &RunHistory {
        &self.history
    }

    /// Mutable access to the history (termination reason)
    pub fn history_mut(&mut self) -> &mut RunHistory {
        &mut self.history
    }

    /// Reset counters and history so the context can drive another run
    pub fn reset(&mut self) {
        self.evaluations = 0;
        self.generations = 0;
        self.history = RunHistory::new();
    }
}

impl std::fmt::Debug for RunContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunContext")
            .field("evaluator", &self.evaluator.name())
            .field("dimension", &self.dimension())
            .field("population_size", &self.population_size)
            .field("bounds", &self.bounds)
            .field("control", &self.control)
            .field("evaluations", &self.evaluations)
            .field("generations", &self.generations)
            .finish()
    }
}
