//! The full graph data model: nodes, relationships and the invariants that
//! span them.
//!
//! A `DataModel` is an immutable snapshot. Revisions are new values, kept in
//! order by [`ModelHistory`](super::ModelHistory).
//!
//! Data models are described in YAML or JSON:
//!
//! ```yaml
//! nodes:
//!   - label: Person
//!     source_name: owners.csv
//!     properties:
//!       - name: name
//!         column_mapping: name
//!         type: str
//!         alias: person_name
//!         is_unique: true
//! relationships:
//!   - type: LOVES
//!     source: Pet
//!     target: Person
//!     source_name: pets.csv
//! ```

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::diagnostics::{EndpointRole, SchemaDiagnostic};
use super::element::SchemaElement;
use super::endpoints::plan_endpoints;
use super::errors::DataModelError;
use super::node::Node;
use super::property::ColumnRole;
use super::relationship::Relationship;
use super::source_columns::{SourceColumns, DEFAULT_SOURCE_NAME};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataModel {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl DataModel {
    pub fn new(nodes: Vec<Node>, relationships: Vec<Relationship>) -> Self {
        DataModel {
            nodes,
            relationships,
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, DataModelError> {
        serde_yaml::from_str(content).map_err(|e| DataModelError::ParseError {
            format: "yaml".to_string(),
            error: e.to_string(),
        })
    }

    pub fn from_json_str(content: &str) -> Result<Self, DataModelError> {
        serde_json::from_str(content).map_err(|e| DataModelError::ParseError {
            format: "json".to_string(),
            error: e.to_string(),
        })
    }

    /// Load a data model file. `.json` files are parsed as JSON, anything else as YAML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DataModelError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| DataModelError::ReadError {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        debug!("Loading data model from {}", path.display());
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    pub fn to_yaml_string(&self) -> Result<String, DataModelError> {
        serde_yaml::to_string(self).map_err(|e| DataModelError::SerializeError {
            format: "yaml".to_string(),
            error: e.to_string(),
        })
    }

    pub fn to_json_string(&self) -> Result<String, DataModelError> {
        serde_json::to_string_pretty(self).map_err(|e| DataModelError::SerializeError {
            format: "json".to_string(),
            error: e.to_string(),
        })
    }

    pub fn node_labels(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.label.as_str()).collect()
    }

    pub fn relationship_types(&self) -> Vec<&str> {
        self.relationships
            .iter()
            .map(|r| r.rel_type.as_str())
            .collect()
    }

    pub fn get_node(&self, label: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.label == label)
    }

    /// Resolve a relationship's `(source, target)` nodes.
    pub fn relationship_endpoints(
        &self,
        relationship: &Relationship,
    ) -> Result<(&Node, &Node), DataModelError> {
        let resolve = |label: &str, role: EndpointRole| {
            self.get_node(label).ok_or_else(|| {
                DataModelError::unknown_node_with_context(
                    label,
                    format!("Resolving {} of relationship {}", role, relationship.rel_type),
                )
            })
        };
        Ok((
            resolve(&relationship.source, EndpointRole::Source)?,
            resolve(&relationship.target, EndpointRole::Target)?,
        ))
    }

    /// True when any element declares its own source file.
    pub fn is_multi_file(&self) -> bool {
        self.nodes.iter().any(|n| n.source_name.is_some())
            || self.relationships.iter().any(|r| r.source_name.is_some())
    }

    /// Distinct effective source files in first-seen order
    pub fn source_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.nodes
            .iter()
            .map(|n| n.effective_source_name())
            .chain(self.relationships.iter().map(|r| r.effective_source_name()))
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Rules that need no knowledge of the source files.
    pub fn validate_structure(&self) -> Vec<SchemaDiagnostic> {
        self.diagnostics(None, DEFAULT_SOURCE_NAME)
    }

    /// All rules, including source file names and column mappings.
    pub fn validate(&self, valid_columns: &SourceColumns) -> Vec<SchemaDiagnostic> {
        self.diagnostics(Some(valid_columns), DEFAULT_SOURCE_NAME)
    }

    /// Run validation with elements that declare no `source_name` read from
    /// `default_source`. Column rules only run when `valid_columns` is given.
    pub fn diagnostics(
        &self,
        valid_columns: Option<&SourceColumns>,
        default_source: &str,
    ) -> Vec<SchemaDiagnostic> {
        let mut diagnostics = self.validate_model_invariants(default_source);
        let elements = self
            .nodes
            .iter()
            .map(|n| n as &dyn SchemaElement)
            .chain(self.relationships.iter().map(|r| r as &dyn SchemaElement));

        for element in elements {
            match valid_columns {
                Some(columns) => {
                    diagnostics.extend(element.validate_source_name(columns));
                    diagnostics.extend(element.validate_properties(columns));
                }
                None => {
                    diagnostics.extend(element.validate_property_names());
                    diagnostics.extend(element.validate_key());
                }
            }
        }

        if let Some(columns) = valid_columns {
            diagnostics.extend(self.validate_endpoint_columns(columns, default_source));
        }
        diagnostics
    }

    /// Consume the model, returning it only if validation reports nothing.
    pub fn validated(self, valid_columns: &SourceColumns) -> Result<Self, DataModelError> {
        let diagnostics = self.validate(valid_columns);
        if diagnostics.is_empty() {
            Ok(self)
        } else {
            Err(DataModelError::InvalidModel { diagnostics })
        }
    }

    /// Every endpoint key a relationship statement reads must be a column of the
    /// relationship's row file.
    fn validate_endpoint_columns(
        &self,
        valid_columns: &SourceColumns,
        default_source: &str,
    ) -> Vec<SchemaDiagnostic> {
        let mut diagnostics = Vec::new();
        for rel in &self.relationships {
            let (Some(source), Some(target)) =
                (self.get_node(&rel.source), self.get_node(&rel.target))
            else {
                continue;
            };

            let plan = plan_endpoints(rel, source, target, default_source);
            let row_columns = if plan.row_source_declared {
                valid_columns.columns_for(Some(plan.row_source))
            } else {
                valid_columns
                    .columns_for(None)
                    .or_else(|| valid_columns.columns_for(Some(plan.row_source)))
            };
            // Unknown files are reported by validate_source_name.
            let Some(row_columns) = row_columns else {
                continue;
            };

            for (role, node) in [(EndpointRole::Source, source), (EndpointRole::Target, target)] {
                let column_role = plan.role(role);
                if column_role == ColumnRole::Primary
                    && node.source_name_or(default_source) == plan.row_source
                {
                    continue;
                }

                for prop in node.identifying_properties() {
                    let column = column_role.column(prop);
                    if !row_columns.iter().any(|c| c == column) {
                        diagnostics.push(SchemaDiagnostic::MissingEndpointColumn {
                            rel_type: rel.rel_type.clone(),
                            role,
                            label: node.label.clone(),
                            property: prop.name.clone(),
                            column: column.to_string(),
                            source_name: plan.row_source.to_string(),
                        });
                    }
                }
            }
        }
        diagnostics
    }

    fn validate_model_invariants(&self, default_source: &str) -> Vec<SchemaDiagnostic> {
        let mut diagnostics = Vec::new();

        let mut labels = HashSet::new();
        let mut reported = HashSet::new();
        for node in &self.nodes {
            if !labels.insert(node.label.as_str()) && reported.insert(node.label.as_str()) {
                diagnostics.push(SchemaDiagnostic::DuplicateNodeLabel {
                    label: node.label.clone(),
                });
            }
        }

        for node in &self.nodes {
            if node.identifying_properties().is_empty() {
                diagnostics.push(SchemaDiagnostic::NoIdentifyingProperty {
                    label: node.label.clone(),
                });
            }
        }

        let mut triples = HashSet::new();
        let mut reported = HashSet::new();
        for rel in &self.relationships {
            let triple = (rel.rel_type.as_str(), rel.source.as_str(), rel.target.as_str());
            if !triples.insert(triple) && reported.insert(triple) {
                diagnostics.push(SchemaDiagnostic::DuplicateRelationship {
                    rel_type: rel.rel_type.clone(),
                    source: rel.source.clone(),
                    target: rel.target.clone(),
                });
            }
        }

        for rel in &self.relationships {
            let source = self.get_node(&rel.source);
            let target = self.get_node(&rel.target);

            for (role, label, node) in [
                (EndpointRole::Source, &rel.source, source),
                (EndpointRole::Target, &rel.target, target),
            ] {
                if node.is_none() {
                    diagnostics.push(SchemaDiagnostic::UnknownEndpoint {
                        rel_type: rel.rel_type.clone(),
                        role,
                        label: label.clone(),
                    });
                }
            }

            if let (None, Some(source), Some(target)) = (&rel.source_name, source, target) {
                let source_file = source.source_name_or(default_source);
                let target_file = target.source_name_or(default_source);
                if source_file != target_file {
                    diagnostics.push(SchemaDiagnostic::AmbiguousRelationshipSource {
                        rel_type: rel.rel_type.clone(),
                        source_file: source_file.to_string(),
                        target_file: target_file.to_string(),
                    });
                }
            }
        }

        diagnostics
    }
}
