//! Algorithm trait

use rand::RngCore;

use crate::context::RunContext;
use crate::error::EvoResult;
use crate::population::individual::Individual;

/// A complete optimization run
///
/// Every variant initializes a population, evaluates it, then loops until the
/// stopping criterion holds and returns a copy of the best individual found.
/// Counters and history of `ctx` are reset at the start of each run.
pub trait Algorithm {
    /// Registry name, e.g. `"jDE"`
    fn name(&self) -> &'static str;

    /// Run the optimization against `ctx`
    fn run(&mut self, ctx: &mut RunContext, rng: &mut dyn RngCore) -> EvoResult<Individual>;
}

impl<A: Algorithm + ?Sized> Algorithm for Box<A> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn run(&mut self, ctx: &mut RunContext, rng: &mut dyn RngCore) -> EvoResult<Individual> {
        (**self).run(ctx, rng)
    }
}
