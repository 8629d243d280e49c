//! Selection operators
//!
//! This module provides the elitist one-to-one survivor selection used by DE.

use std::cmp::Ordering;

use crate::error::OperatorError;
use crate::operators::traits::Selector;
use crate::population::individual::{compare_fitness, Individual};

/// Binary elitist selection
///
/// Returns the candidate with the smallest fitness. Ties go to the
/// earliest-listed candidate, and NaN fitness always loses.
#[derive(Clone, Copy, Debug, Default)]
pub struct BinarySelector;

impl Selector for BinarySelector {
    fn select(&self, candidates: &[&Individual]) -> Result<usize, OperatorError> {
        let mut chosen: Option<usize> = None;
        for (i, candidate) in candidates.iter().enumerate() {
            match chosen {
                Some(c) if compare_fitness(candidate.fitness, candidates[c].fitness)
                    != Ordering::Less => {}
                _ => chosen = Some(i),
            }
        }
        chosen.ok_or(OperatorError::EmptyCandidates)
    }
}
