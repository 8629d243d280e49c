//! # adaptive-de
//!
//! Self-adaptive Differential Evolution for box-constrained real-valued
//! minimization.
//!
//! The crate provides the candidate and population data model, pluggable
//! operators (initialization, mutation, crossover, selection, bounds repair,
//! stopping) and five algorithms composed from them: classic DE, jDE, JADE,
//! SaDE and LSGOjDE.
//!
//! ## Core Concepts
//!
//! - **Explicit control parameters**: operators receive F and CR as a
//!   [`ControlParameters`](context::ControlParameters) value; the run context
//!   records the values in force each generation
//! - **One generator per run**: every random draw goes through a single
//!   seedable generator, so a fixed seed reproduces a run bit for bit
//! - **Registry**: components can be assembled by name from a
//!   [`RunConfig`](config::RunConfig)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use adaptive_de::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let mut ctx = RunContext::new(Rastrigin::new(10), 50)
//!     .with_bounds(MultiBounds::symmetric(5.12, 10));
//!
//! let components = Components::builder()
//!     .stopping(MaxEvaluations(100_000))
//!     .build()?;
//! let best = Jde::new(components).run(&mut ctx, &mut rng)?;
//! ```

pub mod algorithms;
pub mod bounds;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod fitness;
pub mod hyperparameter;
pub mod operators;
pub mod population;
pub mod registry;
pub mod sampling;
pub mod termination;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithms::prelude::*;
    pub use crate::bounds::*;
    pub use crate::config::*;
    pub use crate::context::*;
    pub use crate::diagnostics::prelude::*;
    pub use crate::error::*;
    pub use crate::fitness::prelude::*;
    pub use crate::hyperparameter::prelude::*;
    pub use crate::operators::prelude::*;
    pub use crate::population::prelude::*;
    pub use crate::registry::*;
    pub use crate::termination::prelude::*;
}
