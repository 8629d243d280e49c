//! Population management
//!
//! This module provides the Individual, Population and Archive types.

pub mod archive;
pub mod individual;
#[allow(clippy::module_inception)]
pub mod population;

pub mod prelude {
    pub use super::archive::*;
    pub use super::individual::*;
    pub use super::population::*;
}
