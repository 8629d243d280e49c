//! Hyperparameter adaptation mechanisms
//!
//! This module provides the control-parameter adaptation schemes used by the
//! adaptive DE variants:
//!
//! 1. **Self-Adaptive Control**: per-individual F/CR resampled stochastically (jDE, LSGOjDE)
//! 2. **Adaptive Control**: parameters driven by success feedback (JADE means,
//!    SaDE strategy memory, LSGOjDE local-search radius)

pub mod adaptive;
pub mod self_adaptive;

pub mod prelude {
    pub use super::adaptive::*;
    pub use super::self_adaptive::*;
}
