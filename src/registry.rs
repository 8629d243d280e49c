//! Component registry
//!
//! Maps string aliases to factory functions so runs can be assembled from
//! names, e.g. from a [`RunConfig`](crate::config::RunConfig). The global
//! registry holds every built-in component; custom components go into a
//! registry created with [`Registry::new`].

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::algorithms::components::Components;
use crate::algorithms::de::De;
use crate::algorithms::jade::Jade;
use crate::algorithms::jde::Jde;
use crate::algorithms::lsgojde::LsgoJde;
use crate::algorithms::sade::Sade;
use crate::algorithms::traits::Algorithm;
use crate::error::RegistryError;
use crate::operators::crossover::{ArithmeticCrossover, BinomialCrossover, ExponentialCrossover};
use crate::operators::mutation::*;
use crate::operators::traits::{Crossover, Mutator};
use crate::termination::{MaxEvaluations, MaxGenerations, StoppingCriterion};

/// Builds a mutation strategy
pub type MutatorFactory = fn() -> Box<dyn Mutator>;
/// Builds a crossover
pub type CrossoverFactory = fn() -> Box<dyn Crossover>;
/// Builds a stopping criterion from its budget
pub type StoppingFactory = fn(usize) -> Box<dyn StoppingCriterion>;
/// Builds an algorithm around a component set
pub type AlgorithmFactory = fn(Components) -> Box<dyn Algorithm>;

/// Name to factory tables
#[derive(Clone, Debug, Default)]
pub struct Registry {
    mutators: HashMap<String, MutatorFactory>,
    crossovers: HashMap<String, CrossoverFactory>,
    stopping: HashMap<String, StoppingFactory>,
    algorithms: HashMap<String, AlgorithmFactory>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in component
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();

        registry.register_mutator("rand/1", || Box::new(Rand1));
        registry.register_mutator("rand/2", || Box::new(Rand2));
        registry.register_mutator("rand/3", || Box::new(Rand3));
        registry.register_mutator("best/1", || Box::new(Best1));
        registry.register_mutator("best/2", || Box::new(Best2));
        registry.register_mutator("best/3", || Box::new(Best3));
        registry.register_mutator("current-to-best/1", || Box::new(CurrentToBest1));
        registry.register_mutator("current-to-best/2", || Box::new(CurrentToBest2));
        registry.register_mutator("current-to-pbest/1", || Box::new(CurrentToPBest1));
        registry.register_mutator("rand-to-current/1", || Box::new(RandToCurrent1));
        registry.register_mutator("current-to-rand/1", || Box::new(CurrentToRand1));
        registry.register_mutator("rand-to-best-and-current/2", || {
            Box::new(RandToBestAndCurrent2)
        });
        registry.register_mutator("jDELS", || Box::new(JdeLocalSearch));

        registry.register_crossover("bin", || Box::new(BinomialCrossover));
        registry.register_crossover("exp", || Box::new(ExponentialCrossover));
        registry.register_crossover("ari", || Box::new(ArithmeticCrossover));

        registry.register_stopping("maxFEs", |budget| Box::new(MaxEvaluations(budget)));
        registry.register_stopping("maxGenerations", |budget| Box::new(MaxGenerations(budget)));

        registry.register_algorithm("DE", |components| Box::new(De::new(components)));
        registry.register_algorithm("jDE", |components| Box::new(Jde::new(components)));
        registry.register_algorithm("JADE", |components| Box::new(Jade::new(components)));
        registry.register_algorithm("SaDE", |components| Box::new(Sade::new(components)));
        registry.register_algorithm("LSGOjDE", |components| Box::new(LsgoJde::new(components)));

        registry
    }

    /// The shared registry of built-in components
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::with_builtins)
    }

    /// Register a mutation strategy, replacing any previous entry
    pub fn register_mutator(&mut self, name: impl Into<String>, factory: MutatorFactory) {
        self.mutators.insert(name.into(), factory);
    }

    /// Register a crossover, replacing any previous entry
    pub fn register_crossover(&mut self, name: impl Into<String>, factory: CrossoverFactory) {
        self.crossovers.insert(name.into(), factory);
    }

    /// Register a stopping criterion, replacing any previous entry
    pub fn register_stopping(&mut self, name: impl Into<String>, factory: StoppingFactory) {
        self.stopping.insert(name.into(), factory);
    }

    /// Register an algorithm, replacing any previous entry
    pub fn register_algorithm(&mut self, name: impl Into<String>, factory: AlgorithmFactory) {
        self.algorithms.insert(name.into(), factory);
    }

    /// Build the mutation strategy registered as `name`
    pub fn mutator(&self, name: &str) -> Result<Box<dyn Mutator>, RegistryError> {
        lookup(&self.mutators, "mutator", name).map(|factory| factory())
    }

    /// Build the crossover registered as `name`
    pub fn crossover(&self, name: &str) -> Result<Box<dyn Crossover>, RegistryError> {
        lookup(&self.crossovers, "crossover", name).map(|factory| factory())
    }

    /// Build the stopping criterion registered as `name` with `budget`
    pub fn stopping(
        &self,
        name: &str,
        budget: usize,
    ) -> Result<Box<dyn StoppingCriterion>, RegistryError> {
        lookup(&self.stopping, "stopping criterion", name).map(|factory| factory(budget))
    }

    /// Build the algorithm registered as `name` around `components`
    pub fn algorithm(
        &self,
        name: &str,
        components: Components,
    ) -> Result<Box<dyn Algorithm>, RegistryError> {
        lookup(&self.algorithms, "algorithm", name).map(|factory| factory(components))
    }

    /// Registered mutator names, sorted
    pub fn mutator_names(&self) -> Vec<&str> {
        sorted_names(&self.mutators)
    }

    /// Registered crossover names, sorted
    pub fn crossover_names(&self) -> Vec<&str> {
        sorted_names(&self.crossovers)
    }

    /// Registered stopping criterion names, sorted
    pub fn stopping_names(&self) -> Vec<&str> {
        sorted_names(&self.stopping)
    }

    /// Registered algorithm names, sorted
    pub fn algorithm_names(&self) -> Vec<&str> {
        sorted_names(&self.algorithms)
    }
}

fn lookup<F: Copy>(
    table: &HashMap<String, F>,
    kind: &'static str,
    name: &str,
) -> Result<F, RegistryError> {
    table
        .get(name)
        .copied()
        .ok_or_else(|| RegistryError::UnknownComponent {
            kind,
            name: name.to_string(),
        })
}

fn sorted_names<F>(table: &HashMap<String, F>) -> Vec<&str> {
    let mut names: Vec<&str> = table.keys().map(String::as_str).collect();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::selection::BinarySelector;

    #[test]
    fn test_builtin_names_resolve() {
        let registry = Registry::global();
        for name in registry.mutator_names() {
            assert_eq!(registry.mutator(name).unwrap().name(), name);
        }
        for name in registry.crossover_names() {
            assert_eq!(registry.crossover(name).unwrap().name(), name);
        }
        for name in registry.stopping_names() {
            assert_eq!(registry.stopping(name, 10).unwrap().name(), name);
        }
        assert_eq!(registry.mutator_names().len(), 13);
    }

    #[test]
    fn test_algorithm_names() {
        let registry = Registry::global();
        assert_eq!(
            registry.algorithm_names(),
            vec!["DE", "JADE", "LSGOjDE", "SaDE", "jDE"]
        );
        for name in registry.algorithm_names() {
            let components = Components::builder()
                .stopping(MaxEvaluations(10))
                .build()
                .unwrap();
            assert_eq!(registry.algorithm(name, components).unwrap().name(), name);
        }
    }

    #[test]
    fn test_unknown_name() {
        let err = Registry::global().mutator("rand/9").err().unwrap();
        assert_eq!(err.to_string(), "Unknown mutator: rand/9");

        let err = Registry::global().stopping("wallClock", 5).err().unwrap();
        assert!(matches!(
            err,
            RegistryError::UnknownComponent { kind: "stopping criterion", .. }
        ));
    }

    #[test]
    fn test_custom_registration() {
        #[derive(Debug)]
        struct Always;

        impl Mutator for Always {
            fn mutate(
                &self,
                population: &crate::population::population::Population,
                target: usize,
                _auxiliary: &[&[f64]],
                _params: crate::context::ControlParameters,
                _rng: &mut dyn rand::RngCore,
            ) -> Result<crate::population::individual::Individual, crate::error::OperatorError>
            {
                Ok(population[target].clone())
            }

            fn name(&self) -> &'static str {
                "identity"
            }
        }

        let mut registry = Registry::new();
        assert!(registry.mutator("identity").is_err());
        registry.register_mutator("identity", || Box::new(Always));
        assert_eq!(registry.mutator("identity").unwrap().name(), "identity");

        let components = Components::builder()
            .boxed_mutator(registry.mutator("identity").unwrap())
            .selector(BinarySelector)
            .stopping(MaxEvaluations(10))
            .build()
            .unwrap();
        assert_eq!(components.mutator.name(), "identity");
    }
}
