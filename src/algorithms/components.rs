//! Operator set shared by every algorithm
//!
//! An algorithm is a loop over a fixed set of operators. [`Components`]
//! bundles them, and the helpers here implement the steps every variant has
//! in common: setting up the initial population, the evaluate/select/replace
//! step of a trial, and reporting the result.

use rand::RngCore;
use tracing::info;

use crate::context::RunContext;
use crate::error::{EvoResult, EvolutionError};
use crate::operators::crossover::BinomialCrossover;
use crate::operators::initialization::RandomInitializer;
use crate::operators::mutation::Rand1;
use crate::operators::selection::BinarySelector;
use crate::operators::traits::{Crossover, Initializer, Mutator, Selector};
use crate::population::individual::Individual;
use crate::population::population::Population;
use crate::termination::StoppingCriterion;

/// The operators an algorithm composes
pub struct Components {
    /// Initial population
    pub initializer: Box<dyn Initializer>,
    /// Mutation strategy
    pub mutator: Box<dyn Mutator>,
    /// Crossover
    pub crossover: Box<dyn Crossover>,
    /// Survivor selection
    pub selector: Box<dyn Selector>,
    /// When to stop
    pub stopping: Box<dyn StoppingCriterion>,
}

impl Components {
    /// Create a builder
    pub fn builder() -> ComponentsBuilder {
        ComponentsBuilder::new()
    }

    /// Reset `ctx`, build the initial population and evaluate it
    pub(crate) fn initialize(
        &self,
        ctx: &mut RunContext,
        rng: &mut dyn RngCore,
    ) -> EvoResult<Population> {
        ctx.reset();
        let mut population = Population::with_capacity(ctx.population_size());
        self.initializer.populate(&mut population, ctx, rng)?;
        if population.is_empty() {
            return Err(EvolutionError::EmptyPopulation);
        }
        population.evaluate(ctx)?;
        Ok(population)
    }

    /// Evaluate `trial`, let the selector choose between the target at
    /// `index` and the trial, and replace the target if the trial wins.
    ///
    /// Returns the displaced target on success. Ties keep the target.
    pub(crate) fn evaluate_and_select(
        &self,
        population: &mut Population,
        index: usize,
        mut trial: Individual,
        ctx: &mut RunContext,
    ) -> EvoResult<Option<Individual>> {
        trial.update_fitness(ctx)?;
        let chosen = self.selector.select(&[&population[index], &trial])?;
        if chosen == 1 {
            Ok(Some(population.replace(index, trial)))
        } else {
            Ok(None)
        }
    }

    /// Record the stop reason and return a copy of the best individual
    pub(crate) fn finish(
        &self,
        algorithm: &'static str,
        population: &Population,
        ctx: &mut RunContext,
    ) -> EvoResult<Individual> {
        let best = population
            .best()
            .cloned()
            .ok_or(EvolutionError::EmptyPopulation)?;
        let reason = self.stopping.reason();
        ctx.history_mut().set_termination_reason(reason);
        info!(
            algorithm,
            reason,
            generations = ctx.generations(),
            evaluations = ctx.evaluations(),
            best_fitness = best.fitness,
            "run finished"
        );
        Ok(best)
    }
}

impl std::fmt::Debug for Components {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Components")
            .field("initializer", &self.initializer.name())
            .field("mutator", &self.mutator.name())
            .field("crossover", &self.crossover.name())
            .field("stopping", &self.stopping.name())
            .finish()
    }
}

/// Builder for [`Components`]
///
/// Defaults to random initialization, rand/1, binomial crossover and binary
/// selection. A stopping criterion has to be given.
#[derive(Default)]
pub struct ComponentsBuilder {
    initializer: Option<Box<dyn Initializer>>,
    mutator: Option<Box<dyn Mutator>>,
    crossover: Option<Box<dyn Crossover>>,
    selector: Option<Box<dyn Selector>>,
    stopping: Option<Box<dyn StoppingCriterion>>,
}

impl ComponentsBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initializer
    pub fn initializer<I: Initializer + 'static>(self, initializer: I) -> Self {
        self.boxed_initializer(Box::new(initializer))
    }

    /// Set an already boxed initializer
    pub fn boxed_initializer(mut self, initializer: Box<dyn Initializer>) -> Self {
        self.initializer = Some(initializer);
        self
    }

    /// Set the mutation strategy
    pub fn mutator<M: Mutator + 'static>(self, mutator: M) -> Self {
        self.boxed_mutator(Box::new(mutator))
    }

    /// Set an already boxed mutation strategy
    pub fn boxed_mutator(mut self, mutator: Box<dyn Mutator>) -> Self {
        self.mutator = Some(mutator);
        self
    }

    /// Set the crossover
    pub fn crossover<C: Crossover + 'static>(self, crossover: C) -> Self {
        self.boxed_crossover(Box::new(crossover))
    }

    /// Set an already boxed crossover
    pub fn boxed_crossover(mut self, crossover: Box<dyn Crossover>) -> Self {
        self.crossover = Some(crossover);
        self
    }

    /// Set the selector
    pub fn selector<S: Selector + 'static>(mut self, selector: S) -> Self {
        self.selector = Some(Box::new(selector));
        self
    }

    /// Set the stopping criterion
    pub fn stopping<T: StoppingCriterion + 'static>(self, stopping: T) -> Self {
        self.boxed_stopping(Box::new(stopping))
    }

    /// Set an already boxed stopping criterion
    pub fn boxed_stopping(mut self, stopping: Box<dyn StoppingCriterion>) -> Self {
        self.stopping = Some(stopping);
        self
    }

    /// Build the component set
    pub fn build(self) -> EvoResult<Components> {
        let stopping = self.stopping.ok_or_else(|| {
            EvolutionError::Configuration("Stopping criterion must be specified".to_string())
        })?;

        Ok(Components {
            initializer: self
                .initializer
                .unwrap_or_else(|| Box::new(RandomInitializer)),
            mutator: self.mutator.unwrap_or_else(|| Box::new(Rand1)),
            crossover: self
                .crossover
                .unwrap_or_else(|| Box::new(BinomialCrossover)),
            selector: self.selector.unwrap_or_else(|| Box::new(BinarySelector)),
            stopping,
        })
    }
}
