//! Operator traits
//!
//! This module defines the operator contracts every algorithm composes.
//! Randomness is threaded through as `&mut dyn RngCore` so operators stay
//! object-safe and can be stored boxed or created from the registry.

use rand::RngCore;

use crate::bounds::MultiBounds;
use crate::context::{ControlParameters, RunContext};
use crate::error::{EvoResult, OperatorError};
use crate::population::individual::Individual;
use crate::population::population::Population;

/// Initialization operator trait
///
/// Fills a population up to the context's population size.
pub trait Initializer: Send + Sync {
    /// Populate `population` up to `ctx.population_size()` individuals
    fn populate(
        &self,
        population: &mut Population,
        ctx: &RunContext,
        rng: &mut dyn RngCore,
    ) -> EvoResult<()>;

    /// Registry name
    fn name(&self) -> &'static str;
}

/// Mutation operator trait
///
/// Produces an unchecked mutant vector V for the target at `target` in
/// `population`. Strategies that need externally drawn vectors (pbest and
/// archive members, a local-search radius) take them through `auxiliary`.
pub trait Mutator: Send + Sync {
    /// Build the mutant for `population[target]`
    fn mutate(
        &self,
        population: &Population,
        target: usize,
        auxiliary: &[&[f64]],
        params: ControlParameters,
        rng: &mut dyn RngCore,
    ) -> Result<Individual, OperatorError>;

    /// Registry name, e.g. `"rand/1"`
    fn name(&self) -> &'static str;
}

/// Crossover operator trait
///
/// Mixes the target X and the mutant V into the trial U.
pub trait Crossover: Send + Sync {
    /// Build the trial vector
    fn cross(
        &self,
        target: &Individual,
        mutant: &Individual,
        auxiliary: &[&[f64]],
        params: ControlParameters,
        rng: &mut dyn RngCore,
    ) -> Result<Individual, OperatorError>;

    /// Registry name, e.g. `"bin"`
    fn name(&self) -> &'static str;
}

/// Selection operator trait
pub trait Selector: Send + Sync {
    /// Return the index of the surviving candidate
    fn select(&self, candidates: &[&Individual]) -> Result<usize, OperatorError>;
}

/// Bounds repair trait
///
/// Pulls out-of-range genes back into the search space.
pub trait BoundsRepair {
    /// Repair `individual` in place
    fn repair(&self, bounds: &MultiBounds, individual: &mut Individual);
}

/// Fail unless at least `needed` auxiliary vectors were supplied
pub(crate) fn require_auxiliary(
    operator: &'static str,
    auxiliary: &[&[f64]],
    needed: usize,
) -> Result<(), OperatorError> {
    if auxiliary.len() < needed {
        return Err(OperatorError::MissingAuxiliary {
            operator,
            needed,
            supplied: auxiliary.len(),
        });
    }
    Ok(())
}

/// Fail unless `vector` matches the target dimension
pub(crate) fn require_dimension(
    operator: &'static str,
    vector: &[f64],
    dimension: usize,
) -> Result<(), OperatorError> {
    if vector.len() != dimension {
        return Err(OperatorError::InvalidConfiguration(format!(
            "{} auxiliary vector has {} entries, expected {}",
            operator,
            vector.len(),
            dimension
        )));
    }
    Ok(())
}
