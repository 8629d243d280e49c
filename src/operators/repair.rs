//! Bounds repair operators
//!
//! Mutation and arithmetic crossover can push genes outside the search box.
//! These operators bring them back.

use crate::bounds::MultiBounds;
use crate::operators::traits::BoundsRepair;
use crate::population::individual::Individual;

/// Hard clamp to the violated bound
#[derive(Clone, Copy, Debug, Default)]
pub struct ClampRepair;

impl BoundsRepair for ClampRepair {
    fn repair(&self, bounds: &MultiBounds, individual: &mut Individual) {
        bounds.clamp_vec(individual.genotype_mut());
    }
}

/// Midpoint repair towards the current target
///
/// A gene below `LB[d]` becomes `(LB[d] + X[d]) / 2`, one above `UB[d]`
/// becomes `(X[d] + UB[d]) / 2`, where X is the target of the trial being
/// built.
#[derive(Clone, Copy, Debug)]
pub struct MidpointRepair<'a> {
    target: &'a [f64],
}

impl<'a> MidpointRepair<'a> {
    /// Repair towards `target`
    pub fn new(target: &'a [f64]) -> Self {
        Self { target }
    }
}

impl BoundsRepair for MidpointRepair<'_> {
    fn repair(&self, bounds: &MultiBounds, individual: &mut Individual) {
        for ((gene, b), &anchor) in individual
            .genotype_mut()
            .iter_mut()
            .zip(bounds.iter())
            .zip(self.target)
        {
            *gene = b.midpoint(*gene, anchor);
        }
    }
}
