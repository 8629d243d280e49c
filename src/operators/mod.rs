//! Differential evolution operators
//!
//! This module provides initialization, mutation, crossover, selection and
//! bounds repair operators.

pub mod crossover;
pub mod initialization;
pub mod mutation;
pub mod repair;
pub mod selection;
pub mod traits;

pub mod prelude {
    pub use super::crossover::*;
    pub use super::initialization::*;
    pub use super::mutation::*;
    pub use super::repair::*;
    pub use super::selection::*;
    pub use super::traits::*;
}
