//! Random sampling primitives
//!
//! Every stochastic decision in the engine goes through one of these
//! functions. They are pure functions of the generator state, so a seeded
//! generator reproduces a run exactly.

use rand::seq::index;
use rand::Rng;
use rand_distr::{Cauchy, Distribution, StandardNormal};

use crate::error::OperatorError;

/// Redraws allowed before [`normal_within`] falls back to clamping.
pub const MAX_TRUNCATED_DRAWS: usize = 1_000;

/// Draw `n` pairwise-distinct indices uniformly from `[0, len)`, none equal
/// to `exclude`.
///
/// When an exclusion is given, `n + 1` distinct candidates are drawn without
/// replacement and the excluded value is filtered out, so the cost is bounded
/// regardless of how the generator behaves.
pub fn uniform_distinct_indices<R: Rng + ?Sized>(
    exclude: Option<usize>,
    n: usize,
    len: usize,
    rng: &mut R,
) -> Result<Vec<usize>, OperatorError> {
    let exclude = exclude.filter(|&e| e < len);
    let draws = n + usize::from(exclude.is_some());
    if draws > len {
        return Err(OperatorError::InsufficientIndividuals {
            requested: n,
            available: len - usize::from(exclude.is_some()),
        });
    }

    let mut picked: Vec<usize> = index::sample(rng, len, draws)
        .into_iter()
        .filter(|&i| Some(i) != exclude)
        .collect();
    picked.truncate(n);
    Ok(picked)
}

/// Draw one index uniformly from `[0, len)` skipping every value in `excluded`.
///
/// Maps a draw over the `len - |excluded|` admissible values onto the full
/// range, so no rejection loop is needed.
pub fn uniform_index_excluding<R: Rng + ?Sized>(
    len: usize,
    excluded: &[usize],
    rng: &mut R,
) -> Result<usize, OperatorError> {
    let mut skip: Vec<usize> = excluded.iter().copied().filter(|&e| e < len).collect();
    skip.sort_unstable();
    skip.dedup();

    let admissible = len - skip.len();
    if admissible == 0 {
        return Err(OperatorError::InsufficientIndividuals {
            requested: 1,
            available: 0,
        });
    }

    let mut pick = rng.gen_range(0..admissible);
    for &s in &skip {
        if s <= pick {
            pick += 1;
        } else {
            break;
        }
    }
    Ok(pick)
}

/// Uniform real in `[low, high)`; returns `low` when the interval is empty.
pub fn uniform<R: Rng + ?Sized>(low: f64, high: f64, rng: &mut R) -> f64 {
    low + rng.gen::<f64>() * (high - low)
}

/// Normal draw with the given mean and standard deviation
pub fn normal<R: Rng + ?Sized>(mean: f64, std_dev: f64, rng: &mut R) -> f64 {
    let z: f64 = StandardNormal.sample(rng);
    mean + std_dev * z
}

/// Normal draw redrawn until it lands in `[low, high]`.
///
/// After [`MAX_TRUNCATED_DRAWS`] misses the last draw is clamped.
pub fn normal_within<R: Rng + ?Sized>(
    mean: f64,
    std_dev: f64,
    low: f64,
    high: f64,
    rng: &mut R,
) -> f64 {
    let mut value = normal(mean, std_dev, rng);
    for _ in 1..MAX_TRUNCATED_DRAWS {
        if (low..=high).contains(&value) {
            return value;
        }
        value = normal(mean, std_dev, rng);
    }
    value.clamp(low, high)
}

/// Cauchy draw with the given location and scale
pub fn cauchy<R: Rng + ?Sized>(
    location: f64,
    scale: f64,
    rng: &mut R,
) -> Result<f64, OperatorError> {
    let dist = Cauchy::new(location, scale).map_err(|e| {
        OperatorError::InvalidConfiguration(format!(
            "Cauchy(location={}, scale={}): {}",
            location, scale, e
        ))
    })?;
    Ok(dist.sample(rng))
}

/// Roulette-wheel selection over `probabilities`.
///
/// Returns the first bucket whose cumulative probability is at least a
/// uniform draw in `[0, 1)`. Rounding shortfalls fall through to the last
/// bucket.
pub fn roulette_select<R: Rng + ?Sized>(probabilities: &[f64], rng: &mut R) -> usize {
    let u: f64 = rng.gen();
    let mut cumulative = 0.0;
    for (k, &p) in probabilities.iter().enumerate() {
        cumulative += p;
        if u <= cumulative {
            return k;
        }
    }
    probabilities.len().saturating_sub(1)
}

/// Lehmer mean `Σx² / Σx`; 0 for an empty list or a zero sum
pub fn lehmer_mean(values: &[f64]) -> f64 {
    let sum: f64 = values.iter().sum();
    if values.is_empty() || sum == 0.0 {
        return 0.0;
    }
    values.iter().map(|v| v * v).sum::<f64>() / sum
}

/// Arithmetic mean; 0 for an empty list
pub fn arithmetic_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
