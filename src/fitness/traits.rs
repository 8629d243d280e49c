//! Fitness traits
//!
//! This module defines the objective-function contract consumed by every
//! algorithm. Lower values are better.

use std::fmt;

use crate::error::GenomeError;

/// Objective function evaluation trait
///
/// Implementors only provide [`Evaluator::evaluate_raw`]; the checked
/// [`Evaluator::evaluate`] rejects vectors of the wrong length before the
/// raw function ever sees them.
pub trait Evaluator: Send + Sync {
    /// Problem dimension this evaluator accepts
    fn dimension(&self) -> usize;

    /// Evaluate a vector of exactly `dimension()` reals (value to be MINIMIZED)
    fn evaluate_raw(&self, x: &[f64]) -> f64;

    /// Evaluate a vector, failing on a dimension mismatch
    fn evaluate(&self, x: &[f64]) -> Result<f64, GenomeError> {
        if x.len() != self.dimension() {
            return Err(GenomeError::DimensionMismatch {
                expected: self.dimension(),
                actual: x.len(),
            });
        }
        Ok(self.evaluate_raw(x))
    }

    /// Human-readable name
    fn name(&self) -> &str {
        "objective"
    }
}

impl<E: Evaluator + ?Sized> Evaluator for Box<E> {
    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn evaluate_raw(&self, x: &[f64]) -> f64 {
        (**self).evaluate_raw(x)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// A simple closure wrapper for objective evaluation
pub struct FnEvaluator<F>
where
    F: Fn(&[f64]) -> f64,
{
    dimension: usize,
    f: F,
}

impl<F> FnEvaluator<F>
where
    F: Fn(&[f64]) -> f64,
{
    /// Create a new function-based evaluator for vectors of `dimension` reals
    pub fn new(dimension: usize, f: F) -> Self {
        Self { dimension, f }
    }
}

impl<F> Evaluator for FnEvaluator<F>
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn evaluate_raw(&self, x: &[f64]) -> f64 {
        (self.f)(x)
    }
}

impl<F> fmt::Debug for FnEvaluator<F>
where
    F: Fn(&[f64]) -> f64,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnEvaluator")
            .field("dimension", &self.dimension)
            .finish_non_exhaustive()
    }
}
