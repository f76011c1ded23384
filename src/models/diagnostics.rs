//! # Schema Diagnostics
//!
//! Validation never fails fast. Every rule violation found in a data model is
//! reported as a [`SchemaDiagnostic`] value attached to the element it concerns,
//! and callers decide which of them are fatal. The generator itself only refuses
//! the kinds for which [`SchemaDiagnostic::blocks_generation`] is true.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to a data model element by label or relationship type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementRef {
    Node(String),
    Relationship(String),
}

impl ElementRef {
    pub fn name(&self) -> &str {
        match self {
            ElementRef::Node(label) => label,
            ElementRef::Relationship(rel_type) => rel_type,
        }
    }

    /// Lowercase element kind as used inside sentences
    pub fn kind(&self) -> &'static str {
        match self {
            ElementRef::Node(_) => "node",
            ElementRef::Relationship(_) => "relationship",
        }
    }

    fn kind_title(&self) -> &'static str {
        match self {
            ElementRef::Node(_) => "Node",
            ElementRef::Relationship(_) => "Relationship",
        }
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.name())
    }
}

/// Which end of a relationship a node label was referenced from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndpointRole {
    Source,
    Target,
}

impl fmt::Display for EndpointRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointRole::Source => f.write_str("source"),
            EndpointRole::Target => f.write_str("target"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaDiagnostic {
    /// A property is mapped to a column its source file does not have
    MissingColumn {
        element: ElementRef,
        property: String,
        column: String,
    },
    /// A relationship's rows do not carry the column one of its endpoints is
    /// matched on
    MissingEndpointColumn {
        rel_type: String,
        role: EndpointRole,
        label: String,
        property: String,
        column: String,
        source_name: String,
    },
    /// A declared `source_name` is not among the known source files
    UnknownSourceName {
        element: ElementRef,
        source_name: String,
        available: Vec<String>,
    },
    /// Exactly one property is flagged `part_of_key`
    SingleKeyProperty {
        element: ElementRef,
        property: String,
    },
    DuplicatePropertyName {
        element: ElementRef,
        property: String,
    },
    DuplicateNodeLabel {
        label: String,
    },
    /// A node with neither a unique nor a key property cannot be merged or matched
    NoIdentifyingProperty {
        label: String,
    },
    DuplicateRelationship {
        rel_type: String,
        source: String,
        target: String,
    },
    /// A relationship endpoint names a label no node declares
    UnknownEndpoint {
        rel_type: String,
        role: EndpointRole,
        label: String,
    },
    /// The relationship has no `source_name` but its endpoints live in
    /// different files, so the file holding its rows cannot be determined
    AmbiguousRelationshipSource {
        rel_type: String,
        source_file: String,
        target_file: String,
    },
}

impl SchemaDiagnostic {
    /// The element this diagnostic is attached to
    pub fn element(&self) -> ElementRef {
        match self {
            SchemaDiagnostic::MissingColumn { element, .. }
            | SchemaDiagnostic::UnknownSourceName { element, .. }
            | SchemaDiagnostic::SingleKeyProperty { element, .. }
            | SchemaDiagnostic::DuplicatePropertyName { element, .. } => element.clone(),
            SchemaDiagnostic::DuplicateNodeLabel { label }
            | SchemaDiagnostic::NoIdentifyingProperty { label } => ElementRef::Node(label.clone()),
            SchemaDiagnostic::DuplicateRelationship { rel_type, .. }
            | SchemaDiagnostic::UnknownEndpoint { rel_type, .. }
            | SchemaDiagnostic::MissingEndpointColumn { rel_type, .. }
            | SchemaDiagnostic::AmbiguousRelationshipSource { rel_type, .. } => {
                ElementRef::Relationship(rel_type.clone())
            }
        }
    }

    /// Statements cannot be generated while one of these is present.
    pub fn blocks_generation(&self) -> bool {
        matches!(
            self,
            SchemaDiagnostic::SingleKeyProperty { .. }
                | SchemaDiagnostic::UnknownEndpoint { .. }
                | SchemaDiagnostic::DuplicateNodeLabel { .. }
                | SchemaDiagnostic::NoIdentifyingProperty { .. }
        )
    }
}

impl fmt::Display for SchemaDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaDiagnostic::MissingColumn {
                element,
                property,
                column,
            } => write!(
                f,
                "The {} {} has the property {} mapped to csv column {} which does not exist. \
                 {} should be edited or removed from {} {}.",
                element.kind(),
                element.name(),
                property,
                column,
                property,
                element.kind(),
                element.name()
            ),
            SchemaDiagnostic::MissingEndpointColumn {
                rel_type,
                role,
                label,
                property,
                column,
                source_name,
            } => write!(
                f,
                "The relationship {} matches its {} node {} on the property {} read from csv column {}, \
                 which does not exist in {}. Add the column to {} or set an alias for {}.",
                rel_type, role, label, property, column, source_name, source_name, property
            ),
            SchemaDiagnostic::UnknownSourceName {
                element,
                source_name,
                available,
            } => {
                let files = available
                    .iter()
                    .map(|file| format!("'{}'", file))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(
                    f,
                    "{} {} has source_name {} which is not in the provided file list: [{}].",
                    element.kind_title(),
                    element.name(),
                    source_name,
                    files
                )
            }
            SchemaDiagnostic::SingleKeyProperty { element, property } => write!(
                f,
                "The {kind} {name} has a {kind} key on only one property {property}. \
                 {title} keys must exist on two or more properties.",
                kind = element.kind(),
                name = element.name(),
                property = property,
                title = element.kind_title()
            ),
            SchemaDiagnostic::DuplicatePropertyName { element, property } => write!(
                f,
                "The {} {} declares the property {} more than once.",
                element.kind(),
                element.name(),
                property
            ),
            SchemaDiagnostic::DuplicateNodeLabel { label } => write!(
                f,
                "The node label {} is declared more than once. Node labels must be unique.",
                label
            ),
            SchemaDiagnostic::NoIdentifyingProperty { label } => write!(
                f,
                "The node {} has no unique or key property to merge on.",
                label
            ),
            SchemaDiagnostic::DuplicateRelationship {
                rel_type,
                source,
                target,
            } => write!(
                f,
                "The relationship ({})-[:{}]->({}) is declared more than once.",
                source, rel_type, target
            ),
            SchemaDiagnostic::UnknownEndpoint {
                rel_type,
                role,
                label,
            } => write!(
                f,
                "The relationship {} has {} node {} which does not exist in the data model.",
                rel_type, role, label
            ),
            SchemaDiagnostic::AmbiguousRelationshipSource {
                rel_type,
                source_file,
                target_file,
            } => write!(
                f,
                "The relationship {} declares no source_name but its source node is read from {} \
                 and its target node from {}. Declare the file holding the relationship rows.",
                rel_type, source_file, target_file
            ),
        }
    }
}

/// Render diagnostics one per line, for error messages and CLI output.
pub fn format_diagnostics(diagnostics: &[SchemaDiagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| format!("  - {}", d))
        .collect::<Vec<_>>()
        .join("\n")
}
