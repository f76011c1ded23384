//! Relationship endpoint resolution across source files
//!
//! A relationship statement iterates the rows of the relationship's file and
//! must find both endpoint nodes from values on that row. Two layouts exist:
//!
//! - **Single-file**: the relationship and both endpoints are read from the same
//!   file. Both endpoints are bound in one `MATCH` clause, each from its own
//!   `column_mapping`.
//! - **Multi-file**: at least one endpoint is declared in another file. Each
//!   endpoint gets its own `MATCH` clause, and an endpoint from another file reads
//!   its keys from the `alias` column the relationship file carries for it.
//!
//! For self-relationships the target always reads from the alias column so the
//! two bindings never collapse onto one node.
//!
//! Elements without a `source_name` are read from the default source passed in
//! by the caller: [`DEFAULT_SOURCE_NAME`](super::DEFAULT_SOURCE_NAME) for plain
//! model validation, the configured file name during generation. A relationship
//! without a `source_name` inherits the file its endpoints share. When they do
//! not share one, the row source is ambiguous: the default source is assumed and
//! the multi-file layout is used. Validation reports the same case as
//! `AmbiguousRelationshipSource`.

use super::diagnostics::EndpointRole;
use super::element::SchemaElement;
use super::node::Node;
use super::property::ColumnRole;
use super::relationship::Relationship;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointLayout {
    SingleFile,
    MultiFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointPlan<'a> {
    pub layout: EndpointLayout,
    pub source_role: ColumnRole,
    pub target_role: ColumnRole,
    /// File holding the relationship rows, with the default source applied
    pub row_source: &'a str,
    /// Whether the row source was declared on the relationship or inherited
    /// from its endpoints rather than assumed
    pub row_source_declared: bool,
    pub ambiguous: bool,
}

impl EndpointPlan<'_> {
    /// Column role used for the node at `end`
    pub fn role(&self, end: EndpointRole) -> ColumnRole {
        match end {
            EndpointRole::Source => self.source_role,
            EndpointRole::Target => self.target_role,
        }
    }
}

pub fn plan_endpoints<'a>(
    relationship: &'a Relationship,
    source_node: &'a Node,
    target_node: &'a Node,
    default_source: &'a str,
) -> EndpointPlan<'a> {
    let source_file = source_node.source_name_or(default_source);
    let target_file = target_node.source_name_or(default_source);

    let (row_source, row_source_declared, ambiguous) = match relationship.source_name.as_deref() {
        Some(name) => (name, true, false),
        None if source_file == target_file => {
            (source_file, source_node.source_name.is_some(), false)
        }
        None => (default_source, false, true),
    };

    let layout = if source_file == row_source && target_file == row_source {
        EndpointLayout::SingleFile
    } else {
        EndpointLayout::MultiFile
    };

    let self_relationship = relationship.is_self_relationship();
    let source_role = if !self_relationship && source_file != row_source {
        ColumnRole::Alias
    } else {
        ColumnRole::Primary
    };
    let target_role = if self_relationship || target_file != row_source {
        ColumnRole::Alias
    } else {
        ColumnRole::Primary
    };

    EndpointPlan {
        layout,
        source_role,
        target_role,
        row_source,
        row_source_declared,
        ambiguous,
    }
}
