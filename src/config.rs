//! Run configuration
//!
//! A [`RunConfig`] names every component of a run and is resolved through a
//! [`Registry`]. It derives serde so callers can load it from whatever format
//! they use; parsing files is left to them.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::algorithms::components::Components;
use crate::algorithms::traits::Algorithm;
use crate::bounds::MultiBounds;
use crate::context::{ControlParameters, RunContext};
use crate::error::{EvoResult, EvolutionError};
use crate::fitness::traits::Evaluator;
use crate::population::individual::Individual;
use crate::registry::Registry;

/// Everything needed to assemble and run an optimization
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Algorithm alias, e.g. `"jDE"`
    pub algorithm: String,
    /// Mutation strategy alias, used by DE and jDE
    pub mutator: String,
    /// Crossover alias
    pub crossover: String,
    /// Stopping criterion alias
    pub stopping: String,
    /// Budget of the stopping criterion
    pub budget: usize,
    /// Population size NP
    pub population_size: usize,
    /// Initial or fixed F
    pub f: f64,
    /// Initial or fixed CR
    pub cr: f64,
    /// Lower bound per dimension
    pub lower_bounds: Vec<f64>,
    /// Upper bound per dimension
    pub upper_bounds: Vec<f64>,
    /// Generator seed
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        let control = ControlParameters::default();
        Self {
            algorithm: "DE".to_string(),
            mutator: "rand/1".to_string(),
            crossover: "bin".to_string(),
            stopping: "maxFEs".to_string(),
            budget: 10_000,
            population_size: 50,
            f: control.f,
            cr: control.cr,
            lower_bounds: Vec::new(),
            upper_bounds: Vec::new(),
            seed: 0,
        }
    }
}

impl RunConfig {
    /// Check the values the registry cannot
    pub fn validate(&self) -> EvoResult<()> {
        if self.population_size == 0 {
            return Err(EvolutionError::Configuration(
                "Population size must be positive".to_string(),
            ));
        }
        if self.lower_bounds.is_empty() {
            return Err(EvolutionError::Configuration(
                "Bounds must be specified".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolve the component names in `registry`
    pub fn components(&self, registry: &Registry) -> EvoResult<Components> {
        Components::builder()
            .boxed_mutator(registry.mutator(&self.mutator)?)
            .boxed_crossover(registry.crossover(&self.crossover)?)
            .boxed_stopping(registry.stopping(&self.stopping, self.budget)?)
            .build()
    }

    /// Build the algorithm and a context for `evaluator`
    pub fn build<E: Evaluator + 'static>(
        &self,
        evaluator: E,
        registry: &Registry,
    ) -> EvoResult<(Box<dyn Algorithm>, RunContext)> {
        self.validate()?;
        let bounds = MultiBounds::from_arrays(&self.lower_bounds, &self.upper_bounds)?;
        let ctx = RunContext::new(evaluator, self.population_size)
            .with_bounds(bounds)
            .with_control(ControlParameters::new(self.f, self.cr));
        let algorithm = registry.algorithm(&self.algorithm, self.components(registry)?)?;
        Ok((algorithm, ctx))
    }

    /// Build with the global registry and run with a generator seeded from
    /// `seed`. Returns the best individual and the final context.
    pub fn run<E: Evaluator + 'static>(&self, evaluator: E) -> EvoResult<(Individual, RunContext)> {
        let (mut algorithm, mut ctx) = self.build(evaluator, Registry::global())?;
        let mut rng = StdRng::seed_from_u64(self.seed);
        info!(
            algorithm = %self.algorithm,
            mutator = %self.mutator,
            crossover = %self.crossover,
            stopping = %self.stopping,
            budget = self.budget,
            seed = self.seed,
            "starting run"
        );
        let best = algorithm.run(&mut ctx, &mut rng)?;
        Ok((best, ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::benchmarks::Sphere;

    fn sphere_config(algorithm: &str) -> RunConfig {
        RunConfig {
            algorithm: algorithm.to_string(),
            budget: 2_000,
            population_size: 20,
            lower_bounds: vec![-5.0; 2],
            upper_bounds: vec![5.0; 2],
            seed: 42,
            ..RunConfig::default()
        }
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: RunConfig = serde_json::from_str(
            r#"{"algorithm": "JADE", "lower_bounds": [-1.0], "upper_bounds": [1.0]}"#,
        )
        .unwrap();
        assert_eq!(config.algorithm, "JADE");
        assert_eq!(config.crossover, "bin");
        assert_eq!(config.population_size, 50);
        assert_eq!(config.seed, 0);
    }

    #[test]
    fn test_every_algorithm_runs() {
        for name in ["DE", "jDE", "JADE", "SaDE", "LSGOjDE"] {
            let (best, ctx) = sphere_config(name).run(Sphere::new(2)).unwrap();
            assert!(best.is_evaluated(), "{}", name);
            assert!(ctx.evaluations() >= 2_000, "{}", name);
            assert!(ctx.history().termination_reason.is_some(), "{}", name);
        }
    }

    #[test]
    fn test_same_seed_same_result() {
        let config = sphere_config("SaDE");
        let (a, _) = config.run(Sphere::new(2)).unwrap();
        let (b, _) = config.run(Sphere::new(2)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_algorithm() {
        let err = sphere_config("CMA-ES").run(Sphere::new(2)).unwrap_err();
        assert!(matches!(err, EvolutionError::Registry(_)));
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_missing_bounds() {
        let config = RunConfig::default();
        let err = config.run(Sphere::new(2)).unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_bounds_dimension_checked_at_run() {
        let mut config = sphere_config("DE");
        config.lower_bounds = vec![-5.0; 3];
        config.upper_bounds = vec![5.0; 3];
        let err = config.run(Sphere::new(2)).unwrap_err();
        assert!(err.is_configuration_error());
    }
}
