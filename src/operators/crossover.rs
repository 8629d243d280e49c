//! Crossover operators
//!
//! This module provides the DE crossover schemes that mix the target X with
//! the mutant V into the trial U.

use rand::{Rng, RngCore};

use crate::context::ControlParameters;
use crate::error::OperatorError;
use crate::operators::traits::{require_auxiliary, require_dimension, Crossover};
use crate::population::individual::Individual;

fn check_shapes(target: &Individual, mutant: &Individual) -> Result<(), OperatorError> {
    if target.dimension() != mutant.dimension() {
        return Err(OperatorError::InvalidConfiguration(format!(
            "target has {} genes but mutant has {}",
            target.dimension(),
            mutant.dimension()
        )));
    }
    Ok(())
}

fn trial(mutant: &Individual, genotype: Vec<f64>) -> Individual {
    Individual::with_generation(genotype, mutant.birth_generation)
}

/// Binomial crossover
///
/// Each gene comes from V with probability CR; gene `j_rand` always does.
#[derive(Clone, Copy, Debug, Default)]
pub struct BinomialCrossover;

impl Crossover for BinomialCrossover {
    fn cross(
        &self,
        target: &Individual,
        mutant: &Individual,
        _auxiliary: &[&[f64]],
        params: ControlParameters,
        rng: &mut dyn RngCore,
    ) -> Result<Individual, OperatorError> {
        check_shapes(target, mutant)?;
        let d = target.dimension();
        if d == 0 {
            return Ok(trial(mutant, Vec::new()));
        }

        let j_rand = rng.gen_range(0..d);
        let genotype = target
            .genotype()
            .iter()
            .zip(mutant.genotype())
            .enumerate()
            .map(|(j, (&x, &v))| {
                if rng.gen::<f64>() < params.cr || j == j_rand {
                    v
                } else {
                    x
                }
            })
            .collect();
        Ok(trial(mutant, genotype))
    }

    fn name(&self) -> &'static str {
        "bin"
    }
}

/// Exponential crossover
///
/// Copies a contiguous, wrap-around run of L genes from V starting at a
/// random index. The run keeps growing while a uniform draw stays below CR,
/// so `1 <= L <= D`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExponentialCrossover;

impl Crossover for ExponentialCrossover {
    fn cross(
        &self,
        target: &Individual,
        mutant: &Individual,
        _auxiliary: &[&[f64]],
        params: ControlParameters,
        rng: &mut dyn RngCore,
    ) -> Result<Individual, OperatorError> {
        check_shapes(target, mutant)?;
        let d = target.dimension();
        let mut genotype = target.genotype().to_vec();
        if d == 0 {
            return Ok(trial(mutant, genotype));
        }

        let start = rng.gen_range(0..d);
        let mut run = 0;
        loop {
            run += 1;
            if run >= d || rng.gen::<f64>() >= params.cr {
                break;
            }
        }

        for k in 0..run {
            let j = (start + k) % d;
            genotype[j] = mutant.gene(j);
        }
        Ok(trial(mutant, genotype))
    }

    fn name(&self) -> &'static str {
        "exp"
    }
}

/// Arithmetic crossover: `U = X + K∘(V - X)`
///
/// The per-gene weights K are supplied as `auxiliary[0]`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ArithmeticCrossover;

impl Crossover for ArithmeticCrossover {
    fn cross(
        &self,
        target: &Individual,
        mutant: &Individual,
        auxiliary: &[&[f64]],
        _params: ControlParameters,
        _rng: &mut dyn RngCore,
    ) -> Result<Individual, OperatorError> {
        check_shapes(target, mutant)?;
        require_auxiliary("DE/ari", auxiliary, 1)?;
        let k = auxiliary[0];
        require_dimension("DE/ari", k, target.dimension())?;

        let genotype = target
            .genotype()
            .iter()
            .zip(mutant.genotype())
            .zip(k)
            .map(|((&x, &v), &kj)| x + kj * (v - x))
            .collect();
        Ok(trial(mutant, genotype))
    }

    fn name(&self) -> &'static str {
        "ari"
    }
}
