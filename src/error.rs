//! Error types for adaptive-de
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Error type for genotype/evaluator shape problems
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GenomeError {
    /// Dimension mismatch between a genotype and the configured problem
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Error type for operator failures
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OperatorError {
    /// An operator needs auxiliary vectors that were not supplied
    #[error("{operator} needs {needed} auxiliary vector(s), got {supplied}")]
    MissingAuxiliary {
        operator: &'static str,
        needed: usize,
        supplied: usize,
    },

    /// Not enough individuals to draw the requested distinct samples
    #[error("Cannot draw {requested} distinct individuals from {available}")]
    InsufficientIndividuals { requested: usize, available: usize },

    /// Selection was asked to choose among zero candidates
    #[error("Selection requires at least one candidate")]
    EmptyCandidates,

    /// Invalid operator configuration
    #[error("Invalid operator configuration: {0}")]
    InvalidConfiguration(String),
}

/// Error type for component lookup by name
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RegistryError {
    /// No factory registered under this name
    #[error("Unknown {kind}: {name}")]
    UnknownComponent { kind: &'static str, name: String },
}

/// Top-level error type for evolution operations
#[derive(Debug, Error)]
pub enum EvolutionError {
    /// Genome error
    #[error("Genome error: {0}")]
    Genome(#[from] GenomeError),

    /// Operator error
    #[error("Operator error: {0}")]
    Operator(#[from] OperatorError),

    /// Registry error
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Empty population
    #[error("Empty population")]
    EmptyPopulation,
}

impl EvolutionError {
    /// Returns `true` for errors caused by how the run was set up.
    ///
    /// This covers missing bounds, operators lacking auxiliary vectors,
    /// unknown component names and explicit configuration errors.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            EvolutionError::Configuration(_)
                | EvolutionError::Operator(_)
                | EvolutionError::Registry(_)
        )
    }

    /// Returns `true` if this is a genotype/evaluator dimension mismatch.
    pub fn is_dimension_error(&self) -> bool {
        matches!(
            self,
            EvolutionError::Genome(GenomeError::DimensionMismatch { .. })
        )
    }
}

/// Result type alias for evolution operations
pub type EvoResult<T> = Result<T, EvolutionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genome_error_display() {
        let err = GenomeError::DimensionMismatch {
            expected: 10,
            actual: 5,
        };
        assert_eq!(err.to_string(), "Dimension mismatch: expected 10, got 5");
    }

    #[test]
    fn test_operator_error_display() {
        let err = OperatorError::MissingAuxiliary {
            operator: "DE/jDELS",
            needed: 1,
            supplied: 0,
        };
        assert_eq!(
            err.to_string(),
            "DE/jDELS needs 1 auxiliary vector(s), got 0"
        );

        let err = OperatorError::InsufficientIndividuals {
            requested: 7,
            available: 4,
        };
        assert_eq!(
            err.to_string(),
            "Cannot draw 7 distinct individuals from 4"
        );
    }

    #[test]
    fn test_evolution_error_from_genome_error() {
        let genome_err = GenomeError::DimensionMismatch {
            expected: 2,
            actual: 3,
        };
        let evo_err: EvolutionError = genome_err.into();
        assert!(matches!(evo_err, EvolutionError::Genome(_)));
        assert!(evo_err.is_dimension_error());
        assert!(!evo_err.is_configuration_error());
    }

    #[test]
    fn test_configuration_classification() {
        let op: EvolutionError = OperatorError::EmptyCandidates.into();
        assert!(op.is_configuration_error());

        let reg: EvolutionError = RegistryError::UnknownComponent {
            kind: "mutator",
            name: "rand/9".to_string(),
        }
        .into();
        assert!(reg.is_configuration_error());
        assert_eq!(reg.to_string(), "Registry error: Unknown mutator: rand/9");

        assert!(EvolutionError::Configuration("no bounds".into()).is_configuration_error());
        assert!(!EvolutionError::EmptyPopulation.is_configuration_error());
    }
}
