//! Benchmark objectives
//!
//! Sphere and Rastrigin, each as a plain function over a slice and as an
//! [`Evaluator`] of fixed dimension. Both reach 0 at the origin and are
//! usually searched inside [-5.12, 5.12]^D.

use std::f64::consts::TAU;

use crate::bounds::MultiBounds;
use crate::fitness::traits::Evaluator;

/// Customary half-width of the Sphere and Rastrigin search box
pub const HALF_WIDTH: f64 = 5.12;

/// Σ x_i²
pub fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|v| v * v).sum()
}

/// 10·D + Σ (x_i² − 10·cos(2π·x_i))
pub fn rastrigin(x: &[f64]) -> f64 {
    x.iter()
        .map(|v| v * v - 10.0 * (TAU * v).cos() + 10.0)
        .sum()
}

/// Unimodal, separable bowl
#[derive(Clone, Copy, Debug)]
pub struct Sphere {
    dimension: usize,
}

impl Sphere {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    /// The `[-5.12, 5.12]^D` box
    pub fn search_space(&self) -> MultiBounds {
        MultiBounds::symmetric(HALF_WIDTH, self.dimension)
    }
}

impl Evaluator for Sphere {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn evaluate_raw(&self, x: &[f64]) -> f64 {
        sphere(x)
    }

    fn name(&self) -> &str {
        "Sphere"
    }
}

/// Separable with a local minimum near every integer lattice point
#[derive(Clone, Copy, Debug)]
pub struct Rastrigin {
    dimension: usize,
}

impl Rastrigin {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    /// The `[-5.12, 5.12]^D` box
    pub fn search_space(&self) -> MultiBounds {
        MultiBounds::symmetric(HALF_WIDTH, self.dimension)
    }
}

impl Evaluator for Rastrigin {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn evaluate_raw(&self, x: &[f64]) -> f64 {
        rastrigin(x)
    }

    fn name(&self) -> &str {
        "Rastrigin"
    }
}
