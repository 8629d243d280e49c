//! Adaptive control mechanisms
//!
//! These mechanisms adapt parameters based on feedback from the search
//! process: which trials survived, and with which settings.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::bounds::MultiBounds;
use crate::error::OperatorError;
use crate::sampling::{arithmetic_mean, cauchy, lehmer_mean, normal, roulette_select};

/// Cauchy redraws allowed before a non-positive F is clamped instead.
pub const MAX_CAUCHY_DRAWS: usize = 32;

/// JADE success-history mean adaptation
///
/// F is drawn from `Cauchy(mu_f, scale)` and CR from `Normal(mu_cr, scale)`.
/// After each generation the means move towards the Lehmer mean of the
/// successful F values and the arithmetic mean of the successful CR values.
///
/// Reference: Zhang, J. & Sanderson, A. C. (2009). JADE: Adaptive Differential
/// Evolution With Optional External Archive.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MeanAdaptation {
    /// Location of the F distribution
    pub mu_f: f64,
    /// Mean of the CR distribution
    pub mu_cr: f64,
    /// Learning rate c
    pub learning_rate: f64,
    /// Scale of both sampling distributions
    pub scale: f64,
    successful_f: Vec<f64>,
    successful_cr: Vec<f64>,
}

impl MeanAdaptation {
    /// Create with initial means, c = 0.5 and scale 0.1
    pub fn new(mu_f: f64, mu_cr: f64) -> Self {
        Self {
            mu_f,
            mu_cr,
            learning_rate: 0.5,
            scale: 0.1,
            successful_f: Vec::new(),
            successful_cr: Vec::new(),
        }
    }

    /// Set the learning rate c
    pub fn with_learning_rate(mut self, c: f64) -> Self {
        self.learning_rate = c;
        self
    }

    /// Set the sampling scale
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Draw F from `Cauchy(mu_f, scale)`.
    ///
    /// Non-positive or non-finite draws are redrawn up to
    /// [`MAX_CAUCHY_DRAWS`] times; draws above 1 are capped at 1 and a
    /// final miss is clamped into `[0, 1]`.
    pub fn sample_f<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64, OperatorError> {
        let mut f = cauchy(self.mu_f, self.scale, rng)?;
        for _ in 1..MAX_CAUCHY_DRAWS {
            if f > 0.0 && f.is_finite() {
                break;
            }
            f = cauchy(self.mu_f, self.scale, rng)?;
        }
        if f.is_nan() {
            return Ok(0.0);
        }
        Ok(f.clamp(0.0, 1.0))
    }

    /// Draw CR from `Normal(mu_cr, scale)` clamped to `[0, 1]`
    ///
    /// The published JADE leaves this draw unclamped. Clamping changes no
    /// binomial crossover outcome, but keeps the recorded successes and
    /// `mu_cr` inside `[0, 1]`.
    pub fn sample_cr<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        normal(self.mu_cr, self.scale, rng).clamp(0.0, 1.0)
    }

    /// Remember the settings of a trial that replaced its target
    pub fn record_success(&mut self, f: f64, cr: f64) {
        self.successful_f.push(f);
        self.successful_cr.push(cr);
    }

    /// Number of successes recorded this generation
    pub fn success_count(&self) -> usize {
        self.successful_f.len()
    }

    /// Blend the means with this generation's successes and clear them.
    ///
    /// A generation without successes blends both means with 0.
    pub fn update(&mut self) {
        let c = self.learning_rate;
        let (mean_f, mean_cr) = if self.successful_f.is_empty() {
            (0.0, 0.0)
        } else {
            (
                lehmer_mean(&self.successful_f),
                arithmetic_mean(&self.successful_cr),
            )
        };
        self.mu_f = (1.0 - c) * self.mu_f + c * mean_f;
        self.mu_cr = (1.0 - c) * self.mu_cr + c * mean_cr;
        self.successful_f.clear();
        self.successful_cr.clear();
    }
}

/// SaDE strategy-success memory
///
/// Holds `LP x K` success and failure counters, a `K x LP` memory of the CR
/// values that produced successes, and the per-strategy selection
/// probabilities derived from them. All memories are written at a rotating
/// pointer that advances after every recorded trial.
///
/// Reference: Qin, A. K., Huang, V. L. & Suganthan, P. N. (2009). Differential
/// Evolution Algorithm With Strategy Adaptation for Global Numerical
/// Optimization.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StrategyMemory {
    strategies: usize,
    learning_period: usize,
    success: Vec<Vec<f64>>,
    failure: Vec<Vec<f64>>,
    cr_memory: Vec<Vec<f64>>,
    pointer: usize,
    probabilities: Vec<f64>,
    cr_means: Vec<f64>,
}

impl StrategyMemory {
    /// Create memories for `strategies` strategies over `learning_period`
    /// slots, CR memory filled with `initial_cr`, uniform probabilities.
    pub fn new(strategies: usize, learning_period: usize, initial_cr: f64) -> Self {
        Self {
            strategies,
            learning_period,
            success: vec![vec![0.0; strategies]; learning_period],
            failure: vec![vec![0.0; strategies]; learning_period],
            cr_memory: vec![vec![initial_cr; learning_period]; strategies],
            pointer: 0,
            probabilities: vec![1.0 / strategies as f64; strategies],
            cr_means: vec![initial_cr; strategies],
        }
    }

    /// Number of strategies K
    pub fn strategies(&self) -> usize {
        self.strategies
    }

    /// Learning period LP
    pub fn learning_period(&self) -> usize {
        self.learning_period
    }

    /// Current memory slot
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    /// Current selection probabilities
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Current CR distribution mean of strategy `k`
    pub fn cr_mean(&self, k: usize) -> f64 {
        self.cr_means[k]
    }

    /// Pick a strategy by roulette wheel over the probabilities
    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        roulette_select(&self.probabilities, rng)
    }

    /// Record one trial of strategy `k` at the current slot, then advance
    /// the pointer.
    ///
    /// Counters accumulate on top of whatever the slot held before.
    pub fn record(&mut self, k: usize, success: bool, cr: f64) {
        let slot = self.pointer;
        if success {
            self.success[slot][k] += 1.0;
            self.cr_memory[k][slot] = cr;
        } else {
            self.failure[slot][k] += 1.0;
        }
        self.pointer = (self.pointer + 1) % self.learning_period;
    }

    /// Success ratio of strategy `k` plus `epsilon`, summed over every slot.
    ///
    /// A strategy with no recorded trials has ratio 0.
    pub fn success_rate(&self, k: usize, epsilon: f64) -> f64 {
        let successes: f64 = self.success.iter().map(|slot| slot[k]).sum();
        let failures: f64 = self.failure.iter().map(|slot| slot[k]).sum();
        let total = successes + failures;
        let ratio = if total > 0.0 { successes / total } else { 0.0 };
        ratio + epsilon
    }

    /// Recompute `p_k = S_k / Σ S` with `S_k = success_rate(k, epsilon)`
    pub fn update_probabilities(&mut self, epsilon: f64) {
        let rates: Vec<f64> = (0..self.strategies)
            .map(|k| self.success_rate(k, epsilon))
            .collect();
        let total: f64 = rates.iter().sum();
        if total > 0.0 {
            self.probabilities = rates.iter().map(|s| s / total).collect();
        }
        trace!(probabilities = ?self.probabilities, "strategy probabilities updated");
    }

    /// Recompute each strategy's CR mean from its CR memory
    pub fn update_cr_means(&mut self) {
        self.cr_means = self.cr_memory.iter().map(|m| arithmetic_mean(m)).collect();
    }
}

/// LSGOjDE local-search radius
///
/// One radius per dimension, grown by 1.5 after a successful local-search
/// trial and halved after a failed one. Components that leave
/// `[eps * range, range]` are reseeded to `0.4 * range + u * range`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocalSearchRange {
    radius: Vec<f64>,
    ranges: Vec<f64>,
    /// Relative lower limit of a radius component
    pub eps: f64,
}

impl LocalSearchRange {
    /// Growth factor after a success
    pub const GROWTH: f64 = 1.5;
    /// Shrink divisor after a failure
    pub const SHRINK: f64 = 2.0;

    /// Seed a radius for every dimension of `bounds`
    pub fn new<R: Rng + ?Sized>(bounds: &MultiBounds, eps: f64, rng: &mut R) -> Self {
        let ranges: Vec<f64> = bounds.iter().map(|b| b.range()).collect();
        let radius = ranges.iter().map(|&r| Self::seed(r, rng)).collect();
        Self { radius, ranges, eps }
    }

    fn seed<R: Rng + ?Sized>(range: f64, rng: &mut R) -> f64 {
        0.4 * range + rng.gen::<f64>() * range
    }

    /// Current radius vector
    pub fn radius(&self) -> &[f64] {
        &self.radius
    }

    /// Scale after a local-search trial, then reseed components that left
    /// their admissible band.
    pub fn update<R: Rng + ?Sized>(&mut self, success: bool, rng: &mut R) {
        for r in &mut self.radius {
            if success {
                *r *= Self::GROWTH;
            } else {
                *r /= Self::SHRINK;
            }
        }
        for (r, &range) in self.radius.iter_mut().zip(&self.ranges) {
            if r.abs() < self.eps * range || r.abs() > range {
                *r = Self::seed(range, rng);
            }
        }
    }
}
