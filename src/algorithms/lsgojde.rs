//! LSGOjDE: jDE for large-scale global optimization
//!
//! Brest, J. & Maučec, M. S. (2011). Generations are flattened into a rolling
//! index over individuals. Each step samples donors from a window of at most
//! 200 individuals around the current one and dispatches to one of three
//! strategies, each with its own F/CR ranges:
//!
//! * jDELS local search, with probability 0.1 once 20% of the budget is spent
//! * current-to-best/1, with probability 0.2 once 40% of the budget is spent
//! * rand/1 otherwise
//!
//! The population is halved periodically while it holds more than 50
//! individuals.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::algorithms::components::Components;
use crate::algorithms::traits::Algorithm;
use crate::context::{ControlParameters, RunContext};
use crate::error::{EvoResult, EvolutionError};
use crate::hyperparameter::adaptive::LocalSearchRange;
use crate::hyperparameter::self_adaptive::{SelfAdaptiveControl, SelfAdaptiveRanges};
use crate::operators::mutation::{CurrentToBest1, JdeLocalSearch, Rand1};
use crate::operators::repair::MidpointRepair;
use crate::operators::traits::{BoundsRepair, Mutator};
use crate::population::individual::Individual;

/// Strategy chosen for one step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Strategy {
    LocalSearch,
    CurrentToBest,
    Rand,
}

/// Configuration for LSGOjDE
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LsgoJdeConfig {
    /// Largest sampling window
    pub max_subpopulation: usize,
    /// Population size at or below which no more reductions happen
    pub min_population: usize,
    /// Fraction of the population kept by a reduction
    pub reduction_factor: f64,
    /// Steps between reductions; the stopping budget when unset
    pub reduction_period: Option<usize>,
    /// Probability of the local search once enabled
    pub local_search_probability: f64,
    /// Budget fraction after which the local search is enabled
    pub local_search_after: f64,
    /// Probability of current-to-best/1 once enabled
    pub current_to_best_probability: f64,
    /// Budget fraction after which current-to-best/1 is enabled
    pub current_to_best_after: f64,
    /// Width of the local-search CR range
    pub local_search_cr_span: f64,
    /// Width of the current-to-best/1 F range
    pub current_to_best_f_span: f64,
    /// Width of the rand/1 F range
    pub rand_f_span: f64,
    /// Width of the CR range of both differential strategies
    pub cr_span: f64,
    /// Probability of resampling F and CR
    pub tau: f64,
    /// Relative lower limit of the local-search radius
    pub eps: f64,
}

impl LsgoJdeConfig {
    /// Reject settings under which a reduction could empty the population
    /// or a window could not supply rand/1 donors
    pub fn validate(&self) -> EvoResult<()> {
        if !(self.reduction_factor > 0.0 && self.reduction_factor <= 1.0) {
            return Err(EvolutionError::Configuration(format!(
                "reduction factor must be in (0, 1], got {}",
                self.reduction_factor
            )));
        }
        if self.min_population < 4 {
            return Err(EvolutionError::Configuration(format!(
                "minimum population must be at least 4, got {}",
                self.min_population
            )));
        }
        if self.max_subpopulation < 4 {
            return Err(EvolutionError::Configuration(format!(
                "subpopulation window must be at least 4, got {}",
                self.max_subpopulation
            )));
        }
        Ok(())
    }
}

impl Default for LsgoJdeConfig {
    fn default() -> Self {
        Self {
            max_subpopulation: 200,
            min_population: 50,
            reduction_factor: 0.5,
            reduction_period: None,
            local_search_probability: 0.1,
            local_search_after: 0.2,
            current_to_best_probability: 0.2,
            current_to_best_after: 0.4,
            local_search_cr_span: 0.25,
            current_to_best_f_span: 1.0,
            rand_f_span: 2.0,
            cr_span: 1.2,
            tau: 0.5,
            eps: 1e-5,
        }
    }
}

/// LSGOjDE
///
/// The configured mutator is not used; crossover, selection and stopping
/// come from the components.
#[derive(Debug)]
pub struct LsgoJde {
    components: Components,
    config: LsgoJdeConfig,
    control: Option<SelfAdaptiveControl>,
    local_search: Option<LocalSearchRange>,
}

impl LsgoJde {
    /// Create with the given operators and default parameters
    pub fn new(components: Components) -> Self {
        Self {
            components,
            config: LsgoJdeConfig::default(),
            control: None,
            local_search: None,
        }
    }

    /// Create with an explicit configuration, failing when it does not
    /// validate
    pub fn with_config(components: Components, config: LsgoJdeConfig) -> EvoResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new(components)
        })
    }

    /// Per-individual F/CR after the last run
    pub fn control(&self) -> Option<&SelfAdaptiveControl> {
        self.control.as_ref()
    }

    /// Local-search radius after the last run
    pub fn local_search(&self) -> Option<&LocalSearchRange> {
        self.local_search.as_ref()
    }

    /// Window `[lb, ub)` of width `min(np, max_subpopulation)` holding `index`
    fn window(&self, index: usize, np: usize) -> (usize, usize) {
        let sub = np.min(self.config.max_subpopulation).max(1);
        let lb = (index / sub) * sub;
        let ub = (lb + sub).min(np);
        (ub.saturating_sub(sub), ub)
    }

    fn choose_strategy(&self, progress: f64, rng: &mut dyn RngCore) -> Strategy {
        let config = &self.config;
        if rng.gen::<f64>() < config.local_search_probability
            && progress > config.local_search_after
        {
            Strategy::LocalSearch
        } else if rng.gen::<f64>() < config.current_to_best_probability
            && progress > config.current_to_best_after
        {
            Strategy::CurrentToBest
        } else {
            Strategy::Rand
        }
    }
}

impl Algorithm for LsgoJde {
    fn name(&self) -> &'static str {
        "LSGOjDE"
    }

    #[instrument(level = "debug", skip_all, fields(algorithm = "LSGOjDE", dimension = ctx.dimension(), population_size = ctx.population_size()))]
    fn run(&mut self, ctx: &mut RunContext, rng: &mut dyn RngCore) -> EvoResult<Individual> {
        let bounds = ctx.require_bounds()?.clone();
        let mut population = self.components.initialize(ctx, rng)?;
        let ranges = SelfAdaptiveRanges {
            tau1: self.config.tau,
            tau2: self.config.tau,
            ..SelfAdaptiveRanges::default()
        };
        let mut control = SelfAdaptiveControl::new(population.len(), ctx.control(), ranges);
        let mut lsr = LocalSearchRange::new(&bounds, self.config.eps, rng);
        let reduction_period = self
            .config
            .reduction_period
            .unwrap_or_else(|| self.components.stopping.budget())
            .max(1);

        let mut it = 0usize;
        while !self.components.stopping.stops(ctx) {
            let np = population.len();
            let i = it % np;
            it += 1;

            let (lb, ub) = self.window(i, np);
            population.set_window(lb, ub);
            let sub = (ub - lb) as f64;

            // Budget fraction from the stopping criterion, so the NP initial
            // evaluations count towards the 20% and 40% gates
            let progress = self.components.stopping.progress(ctx);
            let strategy = self.choose_strategy(progress, rng);
            let f_lower = (3.0 / sub).sqrt();
            let mut mutant = match strategy {
                Strategy::LocalSearch => {
                    let cr =
                        control.update_cr_within(i, 0.0, self.config.local_search_cr_span, rng);
                    let params = ControlParameters::new(control.get(i).f, cr);
                    ctx.set_control(params);
                    JdeLocalSearch.mutate(&population, i, &[lsr.radius()], params, rng)?
                }
                Strategy::CurrentToBest => {
                    let f =
                        control.update_f_within(i, f_lower, self.config.current_to_best_f_span, rng);
                    let cr = control.update_cr_within(i, 0.0, self.config.cr_span, rng);
                    let params = ControlParameters::new(f, cr);
                    ctx.set_control(params);
                    CurrentToBest1.mutate(&population, i, &[], params, rng)?
                }
                Strategy::Rand => {
                    let f = control.update_f_within(i, f_lower, self.config.rand_f_span, rng);
                    let cr = control.update_cr_within(i, 0.0, self.config.cr_span, rng);
                    let params = ControlParameters::new(f, cr);
                    ctx.set_control(params);
                    Rand1.mutate(&population, i, &[], params, rng)?
                }
            };

            let repair = MidpointRepair::new(population[i].genotype());
            repair.repair(&bounds, &mut mutant);
            let mut trial = self.components.crossover.cross(
                &population[i],
                &mutant,
                &[],
                ctx.control(),
                rng,
            )?;
            repair.repair(&bounds, &mut trial);
            let success = self
                .components
                .evaluate_and_select(&mut population, i, trial, ctx)?
                .is_some();

            if strategy == Strategy::LocalSearch {
                lsr.update(success, rng);
                trace!(success, radius = ?lsr.radius(), "local search radius updated");
            }

            if population.len() > self.config.min_population && it % reduction_period == 0 {
                let before = population.len();
                let after = population.reduce(self.config.reduction_factor);
                control.truncate(after);
                ctx.set_population_size(after);
                trace!(before, after, step = it, "population reduced");
            }

            if it % population.len() == 0 {
                population.advance_generation(ctx);
                debug!(
                    generation = ctx.generations(),
                    best_fitness = population.best().map(|b| b.fitness),
                    f = ctx.control().f,
                    cr = ctx.control().cr,
                    population_size = population.len(),
                    "generation complete"
                );
            }
        }

        population.clear_window();
        let best = self.components.finish(self.name(), &population, ctx);
        self.control = Some(control);
        self.local_search = Some(lsr);
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

    fn components(stopping: MaxEvaluations) -> Components {
        Components::builder().stopping(stopping).build().unwrap()
    }

    #[test]
    fn test_window_contains_index() {
        let lsgo = LsgoJde::new(components(MaxEvaluations(10)));
        assert_eq!(lsgo.window(5, 100), (0, 100));
        assert_eq!(lsgo.window(150, 500), (0, 200));
        assert_eq!(lsgo.window(210, 500), (200, 400));
        // trailing window shifted back to full width
        assert_eq!(lsgo.window(210, 250), (50, 250));
        assert_eq!(lsgo.window(449, 450), (250, 450));
    }

    #[test]
    fn test_population_shrinks() {
        let config = LsgoJdeConfig {
            reduction_period: Some(500),
            ..LsgoJdeConfig::default()
        };
        let mut lsgo = LsgoJde::with_config(components(MaxEvaluations(3_000)), config).unwrap();
        let mut ctx =
            RunContext::new(Rastrigin::new(10), 120).with_bounds(MultiBounds::symmetric(5.12, 10));
        let mut rng = StdRng::seed_from_u64(21);

        lsgo.run(&mut ctx, &mut rng).unwrap();
        // reductions at steps 500 and 1000, then NP = 30 is below the floor
        assert_eq!(ctx.population_size(), 30);
        let sizes = ctx.history().population_size_history();
        assert!(sizes.windows(2).any(|w| w[1] < w[0]));
        assert_eq!(lsgo.control().unwrap().len(), ctx.population_size());
    }

    #[test]
    fn test_no_reduction_at_floor() {
        let config = LsgoJdeConfig {
            reduction_period: Some(10),
            ..LsgoJdeConfig::default()
        };
        let mut lsgo = LsgoJde::with_config(components(MaxEvaluations(1_000)), config).unwrap();
        let mut ctx =
            RunContext::new(Sphere::new(3), 40).with_bounds(MultiBounds::symmetric(5.0, 3));
        let mut rng = StdRng::seed_from_u64(4);

        lsgo.run(&mut ctx, &mut rng).unwrap();
        assert_eq!(ctx.population_size(), 40);
    }

    #[test]
    fn test_config_that_could_empty_population_rejected() {
        for config in [
            LsgoJdeConfig {
                reduction_factor: 0.0,
                min_population: 0,
                reduction_period: Some(5),
                ..LsgoJdeConfig::default()
            },
            LsgoJdeConfig {
                reduction_factor: 1.5,
                ..LsgoJdeConfig::default()
            },
            LsgoJdeConfig {
                min_population: 3,
                ..LsgoJdeConfig::default()
            },
        ] {
            let err = LsgoJde::with_config(components(MaxEvaluations(200)), config).unwrap_err();
            assert!(err.is_configuration_error());
        }
    }

    #[test]
    fn test_aggressive_reduction_keeps_one_individual() {
        let config = LsgoJdeConfig {
            reduction_factor: 0.01,
            min_population: 4,
            reduction_period: Some(5),
            ..LsgoJdeConfig::default()
        };
        let mut lsgo = LsgoJde::with_config(components(MaxEvaluations(200)), config).unwrap();
        let mut ctx =
            RunContext::new(Sphere::new(2), 10).with_bounds(MultiBounds::symmetric(5.0, 2));
        let mut rng = StdRng::seed_from_u64(8);

        // one survivor cannot supply rand/1 donors, which is an error, not a panic
        let err = lsgo.run(&mut ctx, &mut rng).unwrap_err();
        assert!(err.is_configuration_error());
        assert_eq!(ctx.population_size(), 1);
    }

    #[test]
    fn test_lsgojde_minimizes_sphere() {
        let mut lsgo = LsgoJde::new(components(MaxEvaluations(20_000)));
        let mut ctx =
            RunContext::new(Sphere::new(2), 20).with_bounds(MultiBounds::symmetric(5.0, 2));
        let mut rng = StdRng::seed_from_u64(42);

        let best = lsgo.run(&mut ctx, &mut rng).unwrap();
        assert!(best.fitness < 1e-2, "best fitness {}", best.fitness);
    }

    #[test]
    fn test_local_search_radius_stays_in_band() {
        let mut lsgo = LsgoJde::new(components(MaxEvaluations(5_000)));
        let bounds = MultiBounds::symmetric(5.0, 4);
        let mut ctx = RunContext::new(Sphere::new(4), 20).with_bounds(bounds.clone());
        let mut rng = StdRng::seed_from_u64(13);

        lsgo.run(&mut ctx, &mut rng).unwrap();
        let lsr = lsgo.local_search().unwrap();
        for (r, b) in lsr.radius().iter().zip(bounds.iter()) {
            assert!(r.abs() <= 1.4 * b.range());
            assert!(r.abs() >= 1e-5 * b.range());
        }
    }

    #[test]
    fn test_generation_budget() {
        let components = Components::builder()
            .stopping(MaxGenerations(4))
            .build()
            .unwrap();
        let mut lsgo = LsgoJde::new(components);
        let mut ctx =
            RunContext::new(Sphere::new(2), 10).with_bounds(MultiBounds::symmetric(5.0, 2));
        let mut rng = StdRng::seed_from_u64(1);

        lsgo.run(&mut ctx, &mut rng).unwrap();
        assert_eq!(ctx.generations(), 4);
        assert_eq!(ctx.evaluations(), 10 + 4 * 10);
    }
}
