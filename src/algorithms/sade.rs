//! SaDE: DE with strategy adaptation
//!
//! Qin, Huang & Suganthan (2009). Four mutation strategies compete; each trial
//! picks one by roulette wheel over probabilities proportional to the
//! strategies' recent success rates, and CR is drawn around a per-strategy
//! mean learnt from the CR values that produced successes.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::algorithms::components::Components;
use crate::algorithms::traits::Algorithm;
use crate::context::{ControlParameters, RunContext};
use crate::error::EvoResult;
use crate::hyperparameter::adaptive::StrategyMemory;
use crate::operators::mutation::{CurrentToBest2, CurrentToRand1, Rand1, Rand2};
use crate::operators::repair::MidpointRepair;
use crate::operators::traits::{BoundsRepair, Mutator};
use crate::population::individual::Individual;
use crate::sampling::{normal, normal_within};

/// The strategy pool, indexed by the memory
pub const STRATEGIES: [&dyn Mutator; 4] = [&Rand1, &Rand2, &CurrentToRand1, &CurrentToBest2];

/// Strategy whose mutant is used directly as the trial
const NO_CROSSOVER: usize = 3;

/// Configuration for SaDE
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SadeConfig {
    /// Learning period LP in memory slots
    pub learning_period: usize,
    /// Floor added to every success rate
    pub epsilon: f64,
    /// Standard deviation of F around the context's F
    pub f_std: f64,
    /// Standard deviation of CR around a strategy's CR mean
    pub cr_std: f64,
}

impl Default for SadeConfig {
    fn default() -> Self {
        Self {
            learning_period: 50,
            epsilon: 0.01,
            f_std: 0.3,
            cr_std: 0.1,
        }
    }
}

/// SaDE
///
/// The configured mutator is not used; the strategies come from
/// [`STRATEGIES`]. The configured crossover is applied to every strategy but
/// current-to-best/2.
#[derive(Debug)]
pub struct Sade {
    components: Components,
    config: SadeConfig,
    memory: Option<StrategyMemory>,
}

impl Sade {
    /// Create with the given operators and default parameters
    pub fn new(components: Components) -> Self {
        Self::with_config(components, SadeConfig::default())
    }

    /// Create with an explicit configuration
    pub fn with_config(components: Components, config: SadeConfig) -> Self {
        Self {
            components,
            config,
            memory: None,
        }
    }

    /// Strategy memory after the last run
    pub fn memory(&self) -> Option<&StrategyMemory> {
        self.memory.as_ref()
    }
}

impl Algorithm for Sade {
    fn name(&self) -> &'static str {
        "SaDE"
    }

    #[instrument(level = "debug", skip_all, fields(algorithm = "SaDE", dimension = ctx.dimension(), population_size = ctx.population_size()))]
    fn run(&mut self, ctx: &mut RunContext, rng: &mut dyn RngCore) -> EvoResult<Individual> {
        let bounds = ctx.require_bounds()?.clone();
        let mut population = self.components.initialize(ctx, rng)?;
        let initial = ctx.control();
        let lp = self.config.learning_period.max(1);
        let mut memory = StrategyMemory::new(STRATEGIES.len(), lp, initial.cr);

        while !self.components.stopping.stops(ctx) {
            let generation = population.generation();
            let np = population.len();
            if generation > lp {
                memory.update_probabilities(self.config.epsilon);
            }

            let mut plan: Vec<(usize, f64)> = Vec::with_capacity(np);
            for _ in 0..np {
                let k = memory.select(rng);
                let f = normal(initial.f, self.config.f_std, rng);
                plan.push((k, f));
            }
            if generation >= lp {
                memory.update_cr_means();
            }
            let crs: Vec<f64> = plan
                .iter()
                .map(|&(k, _)| normal_within(memory.cr_mean(k), self.config.cr_std, 0.0, 1.0, rng))
                .collect();

            for (i, (&(k, f), &cr)) in plan.iter().zip(&crs).enumerate() {
                let params = ControlParameters::new(f, cr);
                ctx.set_control(params);

                let mut mutant = STRATEGIES[k].mutate(&population, i, &[], params, rng)?;
                let repair = MidpointRepair::new(population[i].genotype());
                repair.repair(&bounds, &mut mutant);
                let trial = if k == NO_CROSSOVER {
                    mutant
                } else {
                    let mut trial =
                        self.components
                            .crossover
                            .cross(&population[i], &mutant, &[], params, rng)?;
                    repair.repair(&bounds, &mut trial);
                    trial
                };

                let success = self
                    .components
                    .evaluate_and_select(&mut population, i, trial, ctx)?
                    .is_some();
                memory.record(k, success, cr);
            }

            population.advance_generation(ctx);
            debug!(
                generation = ctx.generations(),
                best_fitness = population.best().map(|b| b.fitness),
                probabilities = ?memory.probabilities(),
                pointer = memory.pointer(),
                "generation complete"
            );
        }

        let best = self.components.finish(self.name(), &population, ctx);
        self.memory = Some(memory);
        best
    }
}
