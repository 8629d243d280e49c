//! External archive of displaced individuals
//!
//! Targets that lose a trial comparison are kept here as an extra source of
//! difference vectors. The archive never advances generations.

use rand::Rng;
use tracing::trace;

use crate::population::individual::Individual;

/// Growable pool of individuals pruned by uniform random eviction
#[derive(Clone, Debug, Default)]
pub struct Archive {
    members: Vec<Individual>,
}

impl Archive {
    /// Create an empty archive
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of archived individuals
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the archive is empty
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Add a displaced individual
    pub fn push(&mut self, individual: Individual) {
        self.members.push(individual);
    }

    /// Get a member by index
    pub fn get(&self, index: usize) -> Option<&Individual> {
        self.members.get(index)
    }

    /// Iterate over the archived individuals
    pub fn iter(&self) -> impl Iterator<Item = &Individual> {
        self.members.iter()
    }

    /// Evict uniformly random members until at most `capacity` remain.
    ///
    /// Returns the number of evicted individuals.
    pub fn prune<R: Rng + ?Sized>(&mut self, capacity: usize, rng: &mut R) -> usize {
        let mut evicted = 0;
        while self.members.len() > capacity {
            let victim = rng.gen_range(0..self.members.len());
            self.members.swap_remove(victim);
            evicted += 1;
        }
        if evicted > 0 {
            trace!(evicted, remaining = self.members.len(), "archive pruned");
        }
        evicted
    }

    /// Drop every member
    pub fn clear(&mut self) {
        self.members.clear();
    }
}
