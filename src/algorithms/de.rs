//! Classic Differential Evolution
//!
//! Storn & Price (1997). Each generation sweeps the population once: for
//! every target X a mutant V is built with the configured strategy, crossed
//! with X into the trial U, and U replaces X only if it is strictly better.

use rand::RngCore;
use tracing::{debug, instrument};

use crate::algorithms::components::Components;
use crate::algorithms::traits::Algorithm;
use crate::context::RunContext;
use crate::error::EvoResult;
use crate::operators::repair::ClampRepair;
use crate::operators::traits::BoundsRepair;
use crate::population::individual::Individual;

/// Baseline DE with fixed F/CR taken from the run context
#[derive(Debug)]
pub struct De {
    components: Components,
}

impl De {
    /// Create with the given operators
    pub fn new(components: Components) -> Self {
        Self { components }
    }

    /// The operators in use
    pub fn components(&self) -> &Components {
        &self.components
    }
}

impl Algorithm for De {
    fn name(&self) -> &'static str {
        "DE"
    }

    #[instrument(level = "debug", skip_all, fields(algorithm = "DE", dimension = ctx.dimension(), population_size = ctx.population_size()))]
    fn run(&mut self, ctx: &mut RunContext, rng: &mut dyn RngCore) -> EvoResult<Individual> {
        let bounds = ctx.require_bounds()?.clone();
        let mut population = self.components.initialize(ctx, rng)?;

        while !self.components.stopping.stops(ctx) {
            let params = ctx.control();
            for i in 0..population.len() {
                let mut mutant = self
                    .components
                    .mutator
                    .mutate(&population, i, &[], params, rng)?;
                ClampRepair.repair(&bounds, &mut mutant);
                let mut trial =
                    self.components
                        .crossover
                        .cross(&population[i], &mutant, &[], params, rng)?;
                ClampRepair.repair(&bounds, &mut trial);
                self.components
                    .evaluate_and_select(&mut population, i, trial, ctx)?;
            }
            population.advance_generation(ctx);
            debug!(
                generation = ctx.generations(),
                best_fitness = population.best().map(|b| b.fitness),
                f = params.f,
                cr = params.cr,
                "generation complete"
            );
        }

        self.components.finish(self.name(), &population, ctx)
    }
}
