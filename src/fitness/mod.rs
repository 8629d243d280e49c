//! Objective functions
//!
//! The `Evaluator` contract the engine minimizes, and the benchmark
//! functions used by tests and demos.

pub mod benchmarks;
pub mod traits;

pub mod prelude {
    pub use super::benchmarks::*;
    pub use super::traits::*;
}
