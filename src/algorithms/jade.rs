//! JADE: adaptive DE with an optional external archive
//!
//! Zhang, J. & Sanderson, A. C. (2009). F and CR are sampled per trial around
//! means that drift towards the settings of successful trials. Mutation is
//! always current-to-pbest/1; the second difference vector may come from an
//! archive of recently displaced targets.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::algorithms::components::Components;
use crate::algorithms::traits::Algorithm;
use crate::context::{ControlParameters, RunContext};
use crate::error::{EvoResult, EvolutionError};
use crate::hyperparameter::adaptive::MeanAdaptation;
use crate::operators::mutation::CurrentToPBest1;
use crate::operators::repair::MidpointRepair;
use crate::operators::traits::{BoundsRepair, Mutator};
use crate::population::archive::Archive;
use crate::population::individual::Individual;
use crate::population::population::Population;
use crate::sampling::uniform_index_excluding;

/// Configuration for JADE
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JadeConfig {
    /// Fraction of the population pbest is drawn from
    pub p: f64,
    /// Learning rate c of the mean adaptation
    pub learning_rate: f64,
    /// Scale of the Cauchy and normal samplers
    pub scale: f64,
}

impl Default for JadeConfig {
    fn default() -> Self {
        Self {
            p: 0.1,
            learning_rate: 0.5,
            scale: 0.1,
        }
    }
}

/// JADE
///
/// The configured mutator is not used; crossover, selection and stopping
/// come from the components.
#[derive(Debug)]
pub struct Jade {
    components: Components,
    config: JadeConfig,
    adaptation: Option<MeanAdaptation>,
    archive: Archive,
}

impl Jade {
    /// Create with the given operators and default parameters
    pub fn new(components: Components) -> Self {
        Self::with_config(components, JadeConfig::default())
    }

    /// Create with an explicit configuration
    pub fn with_config(components: Components, config: JadeConfig) -> Self {
        Self {
            components,
            config,
            adaptation: None,
            archive: Archive::new(),
        }
    }

    /// Mean adaptation state after the last run
    pub fn adaptation(&self) -> Option<&MeanAdaptation> {
        self.adaptation.as_ref()
    }

    /// Archive contents after the last run
    pub fn archive(&self) -> &Archive {
        &self.archive
    }

    /// Number of top individuals pbest is drawn from, at least one
    fn pbest_pool(&self, population_size: usize) -> usize {
        let pool = (population_size as f64 * self.config.p).ceil() as usize;
        pool.clamp(1, population_size.max(1))
    }

    /// Genotype of `index` in the concatenation of population and archive
    fn donor<'a>(&'a self, population: &'a Population, index: usize) -> EvoResult<&'a [f64]> {
        if index < population.len() {
            return Ok(population[index].genotype());
        }
        self.archive
            .get(index - population.len())
            .map(|ind| ind.genotype())
            .ok_or(EvolutionError::EmptyPopulation)
    }
}

impl Algorithm for Jade {
    fn name(&self) -> &'static str {
        "JADE"
    }

    #[instrument(level = "debug", skip_all, fields(algorithm = "JADE", dimension = ctx.dimension(), population_size = ctx.population_size()))]
    fn run(&mut self, ctx: &mut RunContext, rng: &mut dyn RngCore) -> EvoResult<Individual> {
        let bounds = ctx.require_bounds()?.clone();
        let mut population = self.components.initialize(ctx, rng)?;
        let initial = ctx.control();
        let mut adaptation = MeanAdaptation::new(initial.f, initial.cr)
            .with_learning_rate(self.config.learning_rate)
            .with_scale(self.config.scale);
        self.archive.clear();

        while !self.components.stopping.stops(ctx) {
            let np = population.len();
            let pool = self.pbest_pool(np);
            for i in 0..np {
                let f = adaptation.sample_f(rng)?;
                let cr = adaptation.sample_cr(rng);
                let params = ControlParameters::new(f, cr);
                ctx.set_control(params);

                let pbest = population
                    .kth_best(rng.gen_range(0..pool))
                    .ok_or(EvolutionError::EmptyPopulation)?;
                let r1 = population.random_distinct(1, Some(i), rng)?[0];
                let r2 = uniform_index_excluding(np + self.archive.len(), &[i, r1], rng)?;
                let auxiliary = [
                    pbest.genotype(),
                    population[r1].genotype(),
                    self.donor(&population, r2)?,
                ];

                let mut mutant = CurrentToPBest1.mutate(&population, i, &auxiliary, params, rng)?;
                let repair = MidpointRepair::new(population[i].genotype());
                repair.repair(&bounds, &mut mutant);
                let mut trial =
                    self.components
                        .crossover
                        .cross(&population[i], &mutant, &[], params, rng)?;
                repair.repair(&bounds, &mut trial);

                if let Some(displaced) =
                    self.components
                        .evaluate_and_select(&mut population, i, trial, ctx)?
                {
                    self.archive.push(displaced);
                    adaptation.record_success(f, cr);
                }
            }

            self.archive.prune(np, rng);
            let successes = adaptation.success_count();
            adaptation.update();
            population.advance_generation(ctx);
            debug!(
                generation = ctx.generations(),
                best_fitness = population.best().map(|b| b.fitness),
                mu_f = adaptation.mu_f,
                mu_cr = adaptation.mu_cr,
                successes,
                archive = self.archive.len(),
                "generation complete"
            );
        }

        let best = self.components.finish(self.name(), &population, ctx);
        self.adaptation = Some(adaptation);
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::MultiBounds;
    use crate::fitness::benchmarks::{Rastrigin, Sphere};
    use crate::termination::{MaxEvaluations, MaxGenerations};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn components(stopping: MaxGenerations) -> Components {
        Components::builder().stopping(stopping).build().unwrap()
    }

    #[test]
    fn test_pbest_pool() {
        let jade = Jade::new(components(MaxGenerations(1)));
        assert_eq!(jade.pbest_pool(20), 2);
        assert_eq!(jade.pbest_pool(21), 3);
        assert_eq!(jade.pbest_pool(5), 1);
    }

    #[test]
    fn test_archive_bounded_and_means_in_unit_interval() {
        let mut jade = Jade::new(components(MaxGenerations(60)));
        let mut ctx =
            RunContext::new(Rastrigin::new(5), 20).with_bounds(MultiBounds::symmetric(5.12, 5));
        let mut rng = StdRng::seed_from_u64(17);

        jade.run(&mut ctx, &mut rng).unwrap();
        assert!(jade.archive().len() <= 20);
        let adaptation = jade.adaptation().unwrap();
        assert!((0.0..=1.0).contains(&adaptation.mu_f));
        assert!((0.0..=1.0).contains(&adaptation.mu_cr));
        assert!(ctx.history().cr_history().iter().all(|cr| (0.0..=1.0).contains(cr)));
    }

    #[test]
    fn test_jade_minimizes_sphere() {
        let components = Components::builder()
            .stopping(MaxEvaluations(20_000))
            .build()
            .unwrap();
        let mut jade = Jade::new(components);
        let mut ctx =
            RunContext::new(Sphere::new(2), 20).with_bounds(MultiBounds::symmetric(5.0, 2));
        let mut rng = StdRng::seed_from_u64(42);

        let best = jade.run(&mut ctx, &mut rng).unwrap();
        assert!(best.fitness < 1e-3, "best fitness {}", best.fitness);
    }

    #[test]
    fn test_trials_stay_in_bounds() {
        let mut jade = Jade::new(components(MaxGenerations(20)));
        let bounds = MultiBounds::symmetric(1.0, 3);
        let mut ctx = RunContext::new(Sphere::new(3), 10).with_bounds(bounds.clone());
        let mut rng = StdRng::seed_from_u64(9);

        let best = jade.run(&mut ctx, &mut rng).unwrap();
        assert!(bounds.contains_vec(best.genotype()));
        assert!(jade.archive().iter().all(|ind| bounds.contains_vec(ind.genotype())));
    }

    #[test]
    fn test_too_small_population() {
        let mut jade = Jade::new(components(MaxGenerations(5)));
        let mut ctx =
            RunContext::new(Sphere::new(2), 1).with_bounds(MultiBounds::symmetric(5.0, 2));
        let mut rng = StdRng::seed_from_u64(9);

        let err = jade.run(&mut ctx, &mut rng).unwrap_err();
        assert!(err.is_configuration_error());
    }
}
