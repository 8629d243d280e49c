//! Self-adaptive control parameters
//!
//! In jDE-style self-adaptation every individual carries its own F and CR.
//! Before each use they are independently resampled with probability tau1
//! (F) and tau2 (CR), otherwise the previous value is kept, so values that
//! produced surviving trials tend to persist.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::context::ControlParameters;

/// Ranges and resampling probabilities for per-individual F/CR
///
/// A resampled F is `f_lower + u * f_span` and a resampled CR is
/// `cr_lower + u * cr_span`, with `u` uniform in `[0, 1)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelfAdaptiveRanges {
    /// Lower end of F
    pub f_lower: f64,
    /// Width of the F range
    pub f_span: f64,
    /// Lower end of CR
    pub cr_lower: f64,
    /// Width of the CR range
    pub cr_span: f64,
    /// Probability of resampling F
    pub tau1: f64,
    /// Probability of resampling CR
    pub tau2: f64,
}

impl Default for SelfAdaptiveRanges {
    /// Brest et al. (2006): F in `[0.1, 1.0)`, CR in `[0, 1)`, tau = 0.1
    fn default() -> Self {
        Self {
            f_lower: 0.1,
            f_span: 0.9,
            cr_lower: 0.0,
            cr_span: 1.0,
            tau1: 0.1,
            tau2: 0.1,
        }
    }
}

/// Per-individual F/CR values
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SelfAdaptiveControl {
    /// Resampling configuration
    pub ranges: SelfAdaptiveRanges,
    values: Vec<ControlParameters>,
}

impl SelfAdaptiveControl {
    /// One slot per individual, all starting from `initial`
    pub fn new(population_size: usize, initial: ControlParameters, ranges: SelfAdaptiveRanges) -> Self {
        Self {
            ranges,
            values: vec![initial; population_size],
        }
    }

    /// Current values of individual `i`
    pub fn get(&self, i: usize) -> ControlParameters {
        self.values[i]
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no slots
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Resample F of individual `i` as `lower + u * span` with probability tau1.
    ///
    /// Two uniforms are drawn whether or not the value changes.
    pub fn update_f_within<R: Rng + ?Sized>(
        &mut self,
        i: usize,
        lower: f64,
        span: f64,
        rng: &mut R,
    ) -> f64 {
        let gate: f64 = rng.gen();
        let u: f64 = rng.gen();
        if gate < self.ranges.tau1 {
            self.values[i].f = lower + u * span;
        }
        self.values[i].f
    }

    /// Resample CR of individual `i` as `lower + u * span` with probability tau2.
    ///
    /// Two uniforms are drawn whether or not the value changes.
    pub fn update_cr_within<R: Rng + ?Sized>(
        &mut self,
        i: usize,
        lower: f64,
        span: f64,
        rng: &mut R,
    ) -> f64 {
        let gate: f64 = rng.gen();
        let u: f64 = rng.gen();
        if gate < self.ranges.tau2 {
            self.values[i].cr = lower + u * span;
        }
        self.values[i].cr
    }

    /// Resample F of individual `i` over the configured range
    pub fn update_f<R: Rng + ?Sized>(&mut self, i: usize, rng: &mut R) -> f64 {
        let SelfAdaptiveRanges { f_lower, f_span, .. } = self.ranges;
        self.update_f_within(i, f_lower, f_span, rng)
    }

    /// Resample CR of individual `i` over the configured range
    pub fn update_cr<R: Rng + ?Sized>(&mut self, i: usize, rng: &mut R) -> f64 {
        let SelfAdaptiveRanges { cr_lower, cr_span, .. } = self.ranges;
        self.update_cr_within(i, cr_lower, cr_span, rng)
    }

    /// Drop the slots of individuals removed by a population reduction
    pub fn truncate(&mut self, population_size: usize) {
        self.values.truncate(population_size);
    }
}
