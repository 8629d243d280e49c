//! Self-adaptive Differential Evolution (jDE)
//!
//! Brest, J. et al. (2006). Self-Adapting Control Parameters in Differential
//! Evolution. Every individual carries its own F and CR, resampled with small
//! probability before use; values that produce surviving trials persist.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::algorithms::components::Components;
use crate::algorithms::traits::Algorithm;
use crate::context::{ControlParameters, RunContext};
use crate::error::EvoResult;
use crate::hyperparameter::self_adaptive::{SelfAdaptiveControl, SelfAdaptiveRanges};
use crate::operators::repair::ClampRepair;
use crate::operators::traits::BoundsRepair;
use crate::population::individual::Individual;

/// Configuration for jDE
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct JdeConfig {
    /// F/CR ranges and resampling probabilities
    pub ranges: SelfAdaptiveRanges,
}

/// jDE
#[derive(Debug)]
pub struct Jde {
    components: Components,
    config: JdeConfig,
    control: Option<SelfAdaptiveControl>,
}

impl Jde {
    /// Create with the given operators and default ranges
    pub fn new(components: Components) -> Self {
        Self::with_config(components, JdeConfig::default())
    }

    /// Create with an explicit configuration
    pub fn with_config(components: Components, config: JdeConfig) -> Self {
        Self {
            components,
            config,
            control: None,
        }
    }

    /// Per-individual F/CR of the last run
    pub fn control(&self) -> Option<&SelfAdaptiveControl> {
        self.control.as_ref()
    }
}

impl Algorithm for Jde {
    fn name(&self) -> &'static str {
        "jDE"
    }

    #[instrument(level = "debug", skip_all, fields(algorithm = "jDE", dimension = ctx.dimension(), population_size = ctx.population_size()))]
    fn run(&mut self, ctx: &mut RunContext, rng: &mut dyn RngCore) -> EvoResult<Individual> {
        let bounds = ctx.require_bounds()?.clone();
        let mut population = self.components.initialize(ctx, rng)?;
        let mut control =
            SelfAdaptiveControl::new(population.len(), ctx.control(), self.config.ranges);

        while !self.components.stopping.stops(ctx) {
            for i in 0..population.len() {
                let f = control.update_f(i, rng);
                ctx.set_control(ControlParameters::new(f, control.get(i).cr));
                let mut mutant =
                    self.components
                        .mutator
                        .mutate(&population, i, &[], ctx.control(), rng)?;
                ClampRepair.repair(&bounds, &mut mutant);

                let cr = control.update_cr(i, rng);
                ctx.set_control(ControlParameters::new(f, cr));
                let mut trial = self.components.crossover.cross(
                    &population[i],
                    &mutant,
                    &[],
                    ctx.control(),
                    rng,
                )?;
                ClampRepair.repair(&bounds, &mut trial);
                self.components
                    .evaluate_and_select(&mut population, i, trial, ctx)?;
            }
            population.advance_generation(ctx);
            debug!(
                generation = ctx.generations(),
                best_fitness = population.best().map(|b| b.fitness),
                f = ctx.control().f,
                cr = ctx.control().cr,
                "generation complete"
            );
        }

        let best = self.components.finish(self.name(), &population, ctx);
        self.control = Some(control);
        best
    }
}
