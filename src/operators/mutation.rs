//! Mutation operators
//!
//! This module provides the differential mutation strategies. Every strategy
//! draws its random donors pairwise distinct and distinct from the target,
//! honouring the population's sampling window.

use rand::{Rng, RngCore};

use crate::context::ControlParameters;
use crate::error::OperatorError;
use crate::operators::traits::{require_auxiliary, require_dimension, Mutator};
use crate::population::individual::Individual;
use crate::population::population::Population;

/// `base + f * Σ (a - b)` componentwise
fn differential(base: &[f64], f: f64, pairs: &[(&[f64], &[f64])]) -> Vec<f64> {
    base.iter()
        .enumerate()
        .map(|(j, &b)| b + pairs.iter().map(|(x, y)| f * (x[j] - y[j])).sum::<f64>())
        .collect()
}

/// Genotypes of `n` random donors, none of them the target
fn donors<'p>(
    population: &'p Population,
    target: usize,
    n: usize,
    rng: &mut dyn RngCore,
) -> Result<Vec<&'p [f64]>, OperatorError> {
    Ok(population
        .random_distinct(n, Some(target), rng)?
        .into_iter()
        .map(|i| population[i].genotype())
        .collect())
}

fn target_genotype(population: &Population, target: usize) -> Result<&[f64], OperatorError> {
    population
        .get(target)
        .map(Individual::genotype)
        .ok_or(OperatorError::InsufficientIndividuals {
            requested: target + 1,
            available: population.len(),
        })
}

fn best_genotype(population: &Population) -> Result<&[f64], OperatorError> {
    population
        .best()
        .map(Individual::genotype)
        .ok_or(OperatorError::InsufficientIndividuals {
            requested: 1,
            available: 0,
        })
}

fn mutant(population: &Population, genotype: Vec<f64>) -> Individual {
    Individual::with_generation(genotype, population.generation())
}

/// DE/rand/1: `r1 + F(r2 - r3)`
#[derive(Clone, Copy, Debug, Default)]
pub struct Rand1;

impl Mutator for Rand1 {
    fn mutate(
        &self,
        population: &Population,
        target: usize,
        _auxiliary: &[&[f64]],
        params: ControlParameters,
        rng: &mut dyn RngCore,
    ) -> Result<Individual, OperatorError> {
        let r = donors(population, target, 3, rng)?;
        Ok(mutant(population, differential(r[0], params.f, &[(r[1], r[2])])))
    }

    fn name(&self) -> &'static str {
        "rand/1"
    }
}

/// DE/rand/2: `r1 + F(r2 - r3) + F(r4 - r5)`
#[derive(Clone, Copy, Debug, Default)]
pub struct Rand2;

impl Mutator for Rand2 {
    fn mutate(
        &self,
        population: &Population,
        target: usize,
        _auxiliary: &[&[f64]],
        params: ControlParameters,
        rng: &mut dyn RngCore,
    ) -> Result<Individual, OperatorError> {
        let r = donors(population, target, 5, rng)?;
        Ok(mutant(
            population,
            differential(r[0], params.f, &[(r[1], r[2]), (r[3], r[4])]),
        ))
    }

    fn name(&self) -> &'static str {
        "rand/2"
    }
}

/// DE/rand/3: `r1 + F(r2 - r3) + F(r4 - r5) + F(r6 - r7)`
#[derive(Clone, Copy, Debug, Default)]
pub struct Rand3;

impl Mutator for Rand3 {
    fn mutate(
        &self,
        population: &Population,
        target: usize,
        _auxiliary: &[&[f64]],
        params: ControlParameters,
        rng: &mut dyn RngCore,
    ) -> Result<Individual, OperatorError> {
        let r = donors(population, target, 7, rng)?;
        Ok(mutant(
            population,
            differential(r[0], params.f, &[(r[1], r[2]), (r[3], r[4]), (r[5], r[6])]),
        ))
    }

    fn name(&self) -> &'static str {
        "rand/3"
    }
}

/// DE/best/1: `best + F(r1 - r2)`
#[derive(Clone, Copy, Debug, Default)]
pub struct Best1;

impl Mutator for Best1 {
    fn mutate(
        &self,
        population: &Population,
        target: usize,
        _auxiliary: &[&[f64]],
        params: ControlParameters,
        rng: &mut dyn RngCore,
    ) -> Result<Individual, OperatorError> {
        let best = best_genotype(population)?;
        let r = donors(population, target, 2, rng)?;
        Ok(mutant(population, differential(best, params.f, &[(r[0], r[1])])))
    }

    fn name(&self) -> &'static str {
        "best/1"
    }
}

/// DE/best/2: `best + F(r1 - r2) + F(r3 - r4)`
#[derive(Clone, Copy, Debug, Default)]
pub struct Best2;

impl Mutator for Best2 {
    fn mutate(
        &self,
        population: &Population,
        target: usize,
        _auxiliary: &[&[f64]],
        params: ControlParameters,
        rng: &mut dyn RngCore,
    ) -> Result<Individual, OperatorError> {
        let best = best_genotype(population)?;
        let r = donors(population, target, 4, rng)?;
        Ok(mutant(
            population,
            differential(best, params.f, &[(r[0], r[1]), (r[2], r[3])]),
        ))
    }

    fn name(&self) -> &'static str {
        "best/2"
    }
}

/// DE/best/3: `best + F(r1 - r2) + F(r3 - r4) + F(r5 - r6)`
#[derive(Clone, Copy, Debug, Default)]
pub struct Best3;

impl Mutator for Best3 {
    fn mutate(
        &self,
        population: &Population,
        target: usize,
        _auxiliary: &[&[f64]],
        params: ControlParameters,
        rng: &mut dyn RngCore,
    ) -> Result<Individual, OperatorError> {
        let best = best_genotype(population)?;
        let r = donors(population, target, 6, rng)?;
        Ok(mutant(
            population,
            differential(best, params.f, &[(r[0], r[1]), (r[2], r[3]), (r[4], r[5])]),
        ))
    }

    fn name(&self) -> &'static str {
        "best/3"
    }
}

/// DE/current-to-best/1: `X + F(best - X) + F(r1 - r2)`
#[derive(Clone, Copy, Debug, Default)]
pub struct CurrentToBest1;

impl Mutator for CurrentToBest1 {
    fn mutate(
        &self,
        population: &Population,
        target: usize,
        _auxiliary: &[&[f64]],
        params: ControlParameters,
        rng: &mut dyn RngCore,
    ) -> Result<Individual, OperatorError> {
        let x = target_genotype(population, target)?;
        let best = best_genotype(population)?;
        let r = donors(population, target, 2, rng)?;
        Ok(mutant(
            population,
            differential(x, params.f, &[(best, x), (r[0], r[1])]),
        ))
    }

    fn name(&self) -> &'static str {
        "current-to-best/1"
    }
}

/// DE/current-to-best/2: `X + F(best - X) + F(r1 - r2) + F(r3 - r4)`
#[derive(Clone, Copy, Debug, Default)]
pub struct CurrentToBest2;

impl Mutator for CurrentToBest2 {
    fn mutate(
        &self,
        population: &Population,
        target: usize,
        _auxiliary: &[&[f64]],
        params: ControlParameters,
        rng: &mut dyn RngCore,
    ) -> Result<Individual, OperatorError> {
        let x = target_genotype(population, target)?;
        let best = best_genotype(population)?;
        let r = donors(population, target, 4, rng)?;
        Ok(mutant(
            population,
            differential(x, params.f, &[(best, x), (r[0], r[1]), (r[2], r[3])]),
        ))
    }

    fn name(&self) -> &'static str {
        "current-to-best/2"
    }
}

/// DE/current-to-pbest/1: `X + F(pbest - X) + F(r1 - r2)`
///
/// The caller draws the donors (`auxiliary = [pbest, r1, r2]`), since r2 may
/// come from an external archive.
#[derive(Clone, Copy, Debug, Default)]
pub struct CurrentToPBest1;

impl Mutator for CurrentToPBest1 {
    fn mutate(
        &self,
        population: &Population,
        target: usize,
        auxiliary: &[&[f64]],
        params: ControlParameters,
        _rng: &mut dyn RngCore,
    ) -> Result<Individual, OperatorError> {
        require_auxiliary("DE/current-to-pbest/1", auxiliary, 3)?;
        let x = target_genotype(population, target)?;
        for aux in &auxiliary[..3] {
            require_dimension("DE/current-to-pbest/1", aux, x.len())?;
        }
        let (pbest, r1, r2) = (auxiliary[0], auxiliary[1], auxiliary[2]);
        Ok(mutant(
            population,
            differential(x, params.f, &[(pbest, x), (r1, r2)]),
        ))
    }

    fn name(&self) -> &'static str {
        "current-to-pbest/1"
    }
}

/// DE/rand-to-current/1: `r1 + F(X - r1) + F(r2 - r3)`
#[derive(Clone, Copy, Debug, Default)]
pub struct RandToCurrent1;

impl Mutator for RandToCurrent1 {
    fn mutate(
        &self,
        population: &Population,
        target: usize,
        _auxiliary: &[&[f64]],
        params: ControlParameters,
        rng: &mut dyn RngCore,
    ) -> Result<Individual, OperatorError> {
        let x = target_genotype(population, target)?;
        let r = donors(population, target, 3, rng)?;
        Ok(mutant(
            population,
            differential(r[0], params.f, &[(x, r[0]), (r[1], r[2])]),
        ))
    }

    fn name(&self) -> &'static str {
        "rand-to-current/1"
    }
}

/// DE/current-to-rand/1: `X + K(r1 - X) + F(r2 - r3)`, K uniform in `[0, 1)`
#[derive(Clone, Copy, Debug, Default)]
pub struct CurrentToRand1;

impl Mutator for CurrentToRand1 {
    fn mutate(
        &self,
        population: &Population,
        target: usize,
        _auxiliary: &[&[f64]],
        params: ControlParameters,
        rng: &mut dyn RngCore,
    ) -> Result<Individual, OperatorError> {
        let x = target_genotype(population, target)?;
        let r = donors(population, target, 3, rng)?;
        let k: f64 = rng.gen();
        let genotype = x
            .iter()
            .enumerate()
            .map(|(j, &xj)| xj + k * (r[0][j] - xj) + params.f * (r[1][j] - r[2][j]))
            .collect();
        Ok(mutant(population, genotype))
    }

    fn name(&self) -> &'static str {
        "current-to-rand/1"
    }
}

/// DE/rand-to-best-and-current/2: `r1 + F(best - r1) + F(r2 - X)`
#[derive(Clone, Copy, Debug, Default)]
pub struct RandToBestAndCurrent2;

impl Mutator for RandToBestAndCurrent2 {
    fn mutate(
        &self,
        population: &Population,
        target: usize,
        _auxiliary: &[&[f64]],
        params: ControlParameters,
        rng: &mut dyn RngCore,
    ) -> Result<Individual, OperatorError> {
        let x = target_genotype(population, target)?;
        let best = best_genotype(population)?;
        let r = donors(population, target, 2, rng)?;
        Ok(mutant(
            population,
            differential(r[0], params.f, &[(best, r[0]), (r[1], x)]),
        ))
    }

    fn name(&self) -> &'static str {
        "rand-to-best-and-current/2"
    }
}

/// jDE local search: `X - lsr` or `X + lsr` with probability 0.5 each.
///
/// The local-search radius vector is supplied as `auxiliary[0]`.
#[derive(Clone, Copy, Debug, Default)]
pub struct JdeLocalSearch;

impl Mutator for JdeLocalSearch {
    fn mutate(
        &self,
        population: &Population,
        target: usize,
        auxiliary: &[&[f64]],
        _params: ControlParameters,
        rng: &mut dyn RngCore,
    ) -> Result<Individual, OperatorError> {
        require_auxiliary("DE/jDELS", auxiliary, 1)?;
        let x = target_genotype(population, target)?;
        let lsr = auxiliary[0];
        require_dimension("DE/jDELS", lsr, x.len())?;

        let sign = if rng.gen::<f64>() < 0.5 { -1.0 } else { 1.0 };
        let genotype = x.iter().zip(lsr).map(|(&xj, &r)| xj + sign * r).collect();
        Ok(mutant(population, genotype))
    }

    fn name(&self) -> &'static str {
        "jDELS"
    }
}
