//! Termination criteria
//!
//! This module provides the stopping criteria checked at the top of every
//! algorithm loop.

use crate::context::RunContext;

/// Stopping criterion trait
pub trait StoppingCriterion: Send + Sync {
    /// Check if the run should stop
    fn stops(&self, ctx: &RunContext) -> bool {
        self.elapsed(ctx) >= self.budget()
    }

    /// The configured budget, in the criterion's own unit
    fn budget(&self) -> usize;

    /// How much of the budget the run has consumed so far
    fn elapsed(&self, ctx: &RunContext) -> usize;

    /// Fraction of the budget consumed, in `[0, 1]` once the run is going
    fn progress(&self, ctx: &RunContext) -> f64 {
        if self.budget() == 0 {
            return 1.0;
        }
        self.elapsed(ctx) as f64 / self.budget() as f64
    }

    /// Get a description of why termination occurred
    fn reason(&self) -> &'static str;

    /// Registry name
    fn name(&self) -> &'static str;
}

/// Terminate after a maximum number of generations
#[derive(Clone, Copy, Debug)]
pub struct MaxGenerations(pub usize);

impl MaxGenerations {
    /// Create a new max generations criterion
    pub fn new(max: usize) -> Self {
        Self(max)
    }
}

impl StoppingCriterion for MaxGenerations {
    fn budget(&self) -> usize {
        self.0
    }

    fn elapsed(&self, ctx: &RunContext) -> usize {
        ctx.generations()
    }

    fn reason(&self) -> &'static str {
        "Maximum generations reached"
    }

    fn name(&self) -> &'static str {
        "maxGenerations"
    }
}

/// Terminate after a maximum number of fitness evaluations
#[derive(Clone, Copy, Debug)]
pub struct MaxEvaluations(pub usize);

impl MaxEvaluations {
    /// Create a new max evaluations criterion
    pub fn new(max: usize) -> Self {
        Self(max)
    }
}

impl StoppingCriterion for MaxEvaluations {
    fn budget(&self) -> usize {
        self.0
    }

    fn elapsed(&self, ctx: &RunContext) -> usize {
        ctx.evaluations()
    }

    fn reason(&self) -> &'static str {
        "Maximum evaluations reached"
    }

    fn name(&self) -> &'static str {
        "maxFEs"
    }
}

pub mod prelude {
    pub use super::{MaxEvaluations, MaxGenerations, StoppingCriterion};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::benchmarks::Sphere;

    fn context() -> RunContext {
        RunContext::new(Sphere::new(1), 4)
    }

    #[test]
    fn test_max_generations() {
        let criterion = MaxGenerations::new(2);
        let mut ctx = context();

        assert!(!criterion.stops(&ctx));
        ctx.record_generation(1, 0.0);
        assert!(!criterion.stops(&ctx));
        assert_eq!(criterion.progress(&ctx), 0.5);
        ctx.record_generation(2, 0.0);
        assert!(criterion.stops(&ctx));
    }

    #[test]
    fn test_max_evaluations() {
        let criterion = MaxEvaluations::new(3);
        let mut ctx = context();

        for _ in 0..2 {
            ctx.evaluate(&[1.0]).unwrap();
        }
        assert!(!criterion.stops(&ctx));
        ctx.evaluate(&[1.0]).unwrap();
        assert!(criterion.stops(&ctx));
        assert_eq!(criterion.elapsed(&ctx), 3);
    }

    #[test]
    fn test_zero_budget_stops_immediately() {
        let ctx = context();
        assert!(MaxEvaluations::new(0).stops(&ctx));
        assert_eq!(MaxGenerations::new(0).progress(&ctx), 1.0);
    }

    #[test]
    fn test_reasons() {
        assert_eq!(MaxGenerations(10).reason(), "Maximum generations reached");
        assert_eq!(MaxEvaluations(10).reason(), "Maximum evaluations reached");
    }
}
