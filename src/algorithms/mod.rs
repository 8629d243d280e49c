//! Differential evolution algorithms
//!
//! This module provides the baseline DE and four adaptive variants built on
//! the same operator set:
//!
//! 1. **DE**: fixed F/CR from the run context
//! 2. **jDE**: per-individual self-adaptive F/CR
//! 3. **JADE**: success-driven F/CR means with an archive
//! 4. **SaDE**: strategy pool with success-rate probabilities
//! 5. **LSGOjDE**: windowed jDE with local search and population reduction

pub mod components;
pub mod de;
pub mod jade;
pub mod jde;
pub mod lsgojde;
pub mod sade;
pub mod traits;

pub mod prelude {
    pub use super::components::*;
    pub use super::de::*;
    pub use super::jade::*;
    pub use super::jde::*;
    pub use super::lsgojde::*;
    pub use super::sade::*;
    pub use super::traits::*;
}
