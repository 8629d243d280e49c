//! Box constraints for the search space
//!
//! Every run is confined to `[LB[d], UB[d]]` in each dimension d. Bounds are
//! checked once at construction; repair operators rely on `min <= max`.

use serde::{Deserialize, Serialize};

use crate::error::{EvoResult, EvolutionError};

/// Closed interval for one dimension
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// LB[d]
    pub min: f64,
    /// UB[d]
    pub max: f64,
}

impl Bounds {
    /// Interval `[min, max]`, failing with a configuration error when
    /// `min > max` or either end is NaN
    pub fn new(min: f64, max: f64) -> EvoResult<Self> {
        if min <= max {
            Ok(Self { min, max })
        } else {
            Err(EvolutionError::Configuration(format!(
                "lower bound {} exceeds upper bound {}",
                min, max
            )))
        }
    }

    /// `[-|h|, |h|]`
    pub fn symmetric(half_width: f64) -> Self {
        let h = half_width.abs();
        Self { min: -h, max: h }
    }

    /// UB − LB
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Move a violating value halfway between the violated bound and `anchor`.
    ///
    /// Values inside the bounds are returned unchanged.
    pub fn midpoint(&self, value: f64, anchor: f64) -> f64 {
        if value < self.min {
            (self.min + anchor) / 2.0
        } else if value > self.max {
            (anchor + self.max) / 2.0
        } else {
            value
        }
    }
}

/// Per-dimension search box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiBounds {
    bounds: Vec<Bounds>,
}

impl MultiBounds {
    /// The same symmetric interval in every one of `dimension` dimensions
    pub fn symmetric(half_width: f64, dimension: usize) -> Self {
        Self {
            bounds: vec![Bounds::symmetric(half_width); dimension],
        }
    }

    /// Build bounds from separate lower/upper arrays.
    ///
    /// Fails with a configuration error when the arrays differ in length or
    /// any lower bound exceeds its upper bound.
    pub fn from_arrays(lower: &[f64], upper: &[f64]) -> EvoResult<Self> {
        if lower.len() != upper.len() {
            return Err(EvolutionError::Configuration(format!(
                "lower bounds have {} entries but upper bounds have {}",
                lower.len(),
                upper.len()
            )));
        }
        let bounds = lower
            .iter()
            .zip(upper)
            .enumerate()
            .map(|(d, (&min, &max))| {
                Bounds::new(min, max).map_err(|err| match err {
                    EvolutionError::Configuration(msg) => {
                        EvolutionError::Configuration(format!("dimension {}: {}", d, msg))
                    }
                    other => other,
                })
            })
            .collect::<EvoResult<Vec<_>>>()?;
        Ok(Self { bounds })
    }

    /// D
    pub fn dimension(&self) -> usize {
        self.bounds.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bounds> {
        self.bounds.iter()
    }

    /// Clamp every gene to its interval
    pub fn clamp_vec(&self, values: &mut [f64]) {
        for (value, b) in values.iter_mut().zip(&self.bounds) {
            *value = b.clamp(*value);
        }
    }

    /// `true` when `values` has D genes, each inside its interval
    pub fn contains_vec(&self, values: &[f64]) -> bool {
        values.len() == self.bounds.len()
            && values.iter().zip(&self.bounds).all(|(&v, b)| b.contains(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverted_bounds_rejected() {
        let err = Bounds::new(5.0, -5.0).unwrap_err();
        assert!(err.is_configuration_error());
        assert!(Bounds::new(0.0, f64::NAN).is_err());
        assert_eq!(Bounds::new(1.0, 1.0).unwrap().range(), 0.0);
    }

    #[test]
    fn test_symmetric_ignores_sign() {
        assert_eq!(Bounds::symmetric(-2.0), Bounds::symmetric(2.0));
        assert_eq!(Bounds::symmetric(2.0).range(), 4.0);
    }

    #[test]
    fn test_clamp_and_contains() {
        let b = Bounds::symmetric(5.0);
        assert!(b.contains(-5.0) && b.contains(5.0));
        assert!(!b.contains(5.1));
        assert_eq!(b.clamp(-10.0), -5.0);
        assert_eq!(b.clamp(10.0), 5.0);
        assert_eq!(b.clamp(1.5), 1.5);
    }

    #[test]
    fn test_midpoint() {
        let b = Bounds::symmetric(5.0);
        assert_eq!(b.midpoint(-9.0, 1.0), -2.0);
        assert_eq!(b.midpoint(7.0, 1.0), 3.0);
        assert_eq!(b.midpoint(4.0, 1.0), 4.0);
    }

    #[test]
    fn test_from_arrays() {
        let mb = MultiBounds::from_arrays(&[0.0, -1.0], &[1.0, 1.0]).unwrap();
        assert_eq!(mb.dimension(), 2);
        assert_eq!(mb.iter().nth(1), Some(&Bounds { min: -1.0, max: 1.0 }));

        let err = MultiBounds::from_arrays(&[0.0], &[1.0, 2.0]).unwrap_err();
        assert!(err.is_configuration_error());

        let err = MultiBounds::from_arrays(&[0.0, 3.0], &[1.0, 1.0]).unwrap_err();
        assert!(err.is_configuration_error());
        assert!(err.to_string().contains("dimension 1"));
    }

    #[test]
    fn test_clamp_vec() {
        let mb = MultiBounds::symmetric(5.0, 3);
        let mut values = vec![-10.0, 0.0, 10.0];
        mb.clamp_vec(&mut values);
        assert_eq!(values, vec![-5.0, 0.0, 5.0]);
    }

    #[test]
    fn test_contains_vec_checks_length() {
        let mb = MultiBounds::symmetric(5.0, 3);
        assert!(mb.contains_vec(&[-5.0, 5.0, 0.0]));
        assert!(!mb.contains_vec(&[-6.0, 0.0, 0.0]));
        assert!(!mb.contains_vec(&[0.0, 0.0]));
    }
}
