//! # Data Model Error Types
//!
//! Errors raised while loading, dumping or looking up data models. Rule
//! violations inside a successfully loaded model are not errors here; they are
//! [`SchemaDiagnostic`] values returned by validation, and only become a
//! [`DataModelError::InvalidModel`] when a caller asks for a validated model.

use thiserror::Error;

use super::diagnostics::{format_diagnostics, SchemaDiagnostic};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DataModelError {
    #[error("Failed to read data model file '{path}': {error}")]
    ReadError { path: String, error: String },
    #[error("Failed to parse data model {format}: {error}")]
    ParseError { format: String, error: String },
    #[error("Failed to serialize data model as {format}: {error}")]
    SerializeError { format: String, error: String },
    #[error("Data model failed validation:\n{}", format_diagnostics(.diagnostics))]
    InvalidModel { diagnostics: Vec<SchemaDiagnostic> },
    #[error("No node with label `{label}` in the data model")]
    UnknownNode { label: String },
    #[error("Data model version {version} does not exist (history holds {len} versions)")]
    VersionOutOfRange { version: isize, len: usize },
    #[error("Data model history is empty")]
    EmptyHistory,
}

impl DataModelError {
    /// Create an UnknownNode error with context information
    ///
    /// # Example
    /// ```ignore
    /// DataModelError::unknown_node_with_context(
    ///     "Person",
    ///     "Resolving source of relationship KNOWS"
    /// )
    /// ```
    pub fn unknown_node_with_context(
        label: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        DataModelError::UnknownNode {
            label: format!("{}\n  Context: {}", label.into(), context.into()),
        }
    }
}
