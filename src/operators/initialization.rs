//! Initialization operators

use rand::RngCore;

use crate::context::RunContext;
use crate::error::EvoResult;
use crate::operators::traits::Initializer;
use crate::population::individual::Individual;
use crate::population::population::Population;
use crate::sampling::uniform;

/// Uniform random initialization
///
/// Every gene d is drawn uniformly from `[LB_d, UB_d)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomInitializer;

impl Initializer for RandomInitializer {
    fn populate(
        &self,
        population: &mut Population,
        ctx: &RunContext,
        rng: &mut dyn RngCore,
    ) -> EvoResult<()> {
        let bounds = ctx.require_bounds()?;
        while population.len() < ctx.population_size() {
            let genotype = bounds
                .iter()
                .map(|b| uniform(b.min, b.max, rng))
                .collect();
            population.push(Individual::with_generation(
                genotype,
                population.generation(),
            ));
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::MultiBounds;
    use crate::fitness::benchmarks::Sphere;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_populate_within_bounds() {
        let bounds = MultiBounds::from_arrays(&[-1.0, 10.0], &[1.0, 20.0]).unwrap();
        let ctx = RunContext::new(Sphere::new(2), 30).with_bounds(bounds.clone());
        let mut pop = Population::new();
        let mut rng = StdRng::seed_from_u64(42);

        RandomInitializer.populate(&mut pop, &ctx, &mut rng).unwrap();
        assert_eq!(pop.len(), 30);
        for ind in pop.iter() {
            assert!(bounds.contains_vec(ind.genotype()));
            assert!(!ind.is_evaluated());
        }
    }

    #[test]
    fn test_populate_tops_up() {
        let ctx = RunContext::new(Sphere::new(1), 4).with_bounds(MultiBounds::symmetric(1.0, 1));
        let mut pop: Population = vec![Individual::from_genotype(vec![0.0])].into_iter().collect();
        let mut rng = StdRng::seed_from_u64(42);

        RandomInitializer.populate(&mut pop, &ctx, &mut rng).unwrap();
        assert_eq!(pop.len(), 4);
        assert_eq!(pop[0].gene(0), 0.0);
    }

    #[test]
    fn test_missing_bounds() {
        let ctx = RunContext::new(Sphere::new(2), 4);
        let mut pop = Population::new();
        let mut rng = StdRng::seed_from_u64(42);

        let err = RandomInitializer.populate(&mut pop, &ctx, &mut rng).unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_mismatched_bounds() {
        let ctx = RunContext::new(Sphere::new(2), 4).with_bounds(MultiBounds::symmetric(1.0, 5));
        let mut pop = Population::new();
        let mut rng = StdRng::seed_from_u64(42);

        assert!(RandomInitializer.populate(&mut pop, &ctx, &mut rng).is_err());
    }
}
