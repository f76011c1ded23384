use thiserror::Error;

use crate::models::{format_diagnostics, DataModelError, SchemaDiagnostic};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CypherGeneratorError {
    #[error(
        "A {kind} key on {label_or_type} needs at least two properties, got {count} (use a uniqueness constraint for a single property)"
    )]
    InsufficientKeyProperties {
        kind: &'static str,
        label_or_type: String,
        count: usize,
    },
    #[error("Node {0} has no unique or key property to match or merge on")]
    NoIdentifyingProperties(String),
    #[error(
        "Relationship {rel_type} expects {role} node {expected} but was given {actual}"
    )]
    EndpointMismatch {
        rel_type: String,
        role: &'static str,
        expected: String,
        actual: String,
    },
    #[error(
        "Constraint name {name} is derived from both {first} and {second}; rename one of the properties"
    )]
    ConstraintNameCollision {
        name: String,
        first: String,
        second: String,
    },
    #[error("Invalid generator configuration: {0}")]
    InvalidConfig(String),
    #[error("Batch size must be a positive number of rows")]
    InvalidBatchSize,
    #[error("Data model cannot be compiled:\n{}", format_diagnostics(.diagnostics))]
    InvalidModel { diagnostics: Vec<SchemaDiagnostic> },
    #[error("Data model error: {0}")]
    DataModel(#[from] DataModelError),
    #[error("Failed to render PyIngest config: {0}")]
    PyIngestRender(String),
}

/// Helper for creating errors with context
impl CypherGeneratorError {
    /// Create an EndpointMismatch error for one end of a relationship
    pub fn endpoint_mismatch(
        rel_type: impl Into<String>,
        role: &'static str,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        CypherGeneratorError::EndpointMismatch {
            rel_type: rel_type.into(),
            role,
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}
