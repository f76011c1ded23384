//! Ingestion orchestration over a whole data model
//!
//! `IngestionGenerator` validates a [`DataModel`] once and then emits, in
//! declaration order (nodes before relationships):
//!
//! - the constraint DDL for every element
//! - one loading statement per element, for either strategy
//! - a complete `LOAD CSV` script (constraints, then loads)
//! - a PyIngest configuration
//!
//! Each element is loaded from its own `source_name`. A relationship without one
//! inherits the file its endpoints share, and anything left unresolved falls back
//! to `GeneratorConfig::source_name`.

use log::{debug, info, warn};
use validator::Validate;

use super::constraints::data_model_constraints;
use super::errors::CypherGeneratorError;
use super::merge_clause::{merge_node_body, merge_relationship_body, wrap_load_csv, wrap_standard};
use super::pyingest::{PyIngestConfig, PyIngestFile, PyIngestSettings};
use crate::config::GeneratorConfig;
use crate::models::{
    plan_endpoints, DataModel, ElementRef, Node, Relationship, SchemaDiagnostic, SchemaElement,
    SourceColumns,
};

/// One loading statement together with the file it reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionStatement {
    /// File name as resolved for the element, without `file_directory`
    pub source_name: String,
    pub element: ElementRef,
    pub cypher: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    Standard,
    LoadCsv,
}

pub struct IngestionGenerator<'a> {
    data_model: &'a DataModel,
    config: GeneratorConfig,
    source_columns: Option<SourceColumns>,
}

impl<'a> IngestionGenerator<'a> {
    pub fn new(data_model: &'a DataModel, config: GeneratorConfig) -> Result<Self, CypherGeneratorError> {
        config
            .validate()
            .map_err(|e| CypherGeneratorError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            data_model,
            config,
            source_columns: None,
        })
    }

    /// Check column mappings against known source files before generating.
    pub fn with_source_columns(mut self, source_columns: SourceColumns) -> Self {
        self.source_columns = Some(source_columns);
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Model diagnostics as generation sees them: undeclared sources read the
    /// configured `source_name`, and column rules run when source columns were
    /// supplied.
    pub fn diagnostics(&self) -> Vec<SchemaDiagnostic> {
        self.data_model
            .diagnostics(self.source_columns.as_ref(), &self.config.source_name)
    }

    /// Whether `diagnostic` stops generation. Column diagnostics only arise
    /// when source columns were supplied, and then they block as well.
    pub fn blocks_generation(diagnostic: &SchemaDiagnostic) -> bool {
        diagnostic.blocks_generation()
            || matches!(
                diagnostic,
                SchemaDiagnostic::MissingColumn { .. }
                    | SchemaDiagnostic::MissingEndpointColumn { .. }
                    | SchemaDiagnostic::UnknownSourceName { .. }
            )
    }

    /// Reject the model if any diagnostic prevents generation. Other
    /// diagnostics are logged and tolerated.
    ///
    /// With source columns supplied, missing columns, missing endpoint columns
    /// and unknown source files are blocking as well.
    pub fn validate(&self) -> Result<(), CypherGeneratorError> {
        let (blocking, tolerated): (Vec<_>, Vec<_>) = self
            .diagnostics()
            .into_iter()
            .partition(Self::blocks_generation);

        for diagnostic in &tolerated {
            warn!("{}", diagnostic);
        }

        if blocking.is_empty() {
            Ok(())
        } else {
            Err(CypherGeneratorError::InvalidModel {
                diagnostics: blocking,
            })
        }
    }

    /// Constraint statements for every node, then every relationship.
    pub fn constraints(&self) -> Result<Vec<String>, CypherGeneratorError> {
        self.validate()?;

        let statements = data_model_constraints(self.data_model)?;

        info!("Generated {} constraint statements", statements.len());
        Ok(statements)
    }

    pub fn standard_statements(&self) -> Result<Vec<IngestionStatement>, CypherGeneratorError> {
        self.statements(Strategy::Standard)
    }

    pub fn load_csv_statements(&self) -> Result<Vec<IngestionStatement>, CypherGeneratorError> {
        self.statements(Strategy::LoadCsv)
    }

    /// Constraints followed by the bulk-load statements, blank-line separated.
    pub fn generate_load_csv_script(&self) -> Result<String, CypherGeneratorError> {
        let mut sections = self.constraints()?;
        sections.extend(self.load_csv_statements()?.into_iter().map(|s| s.cypher));
        Ok(sections.join("\n\n") + "\n")
    }

    pub fn generate_pyingest_config(
        &self,
        settings: &PyIngestSettings,
    ) -> Result<PyIngestConfig, CypherGeneratorError> {
        let pre_ingest = self.constraints()?;
        let files = self
            .standard_statements()?
            .into_iter()
            .map(|s| PyIngestFile::new(&s.source_name, self.config.batch_size, s.cypher))
            .collect::<Vec<_>>();

        info!("PyIngest config covers {} files entries", files.len());
        Ok(PyIngestConfig::new(settings, pre_ingest, files))
    }

    pub fn generate_pyingest_yaml(
        &self,
        settings: &PyIngestSettings,
    ) -> Result<String, CypherGeneratorError> {
        self.generate_pyingest_config(settings)?.to_yaml_string()
    }

    /// File a node's rows are loaded from
    pub fn node_source_name(&self, node: &Node) -> String {
        node.source_name
            .clone()
            .unwrap_or_else(|| self.config.source_name.clone())
    }

    /// File a relationship's rows are loaded from
    pub fn relationship_source_name(
        &self,
        relationship: &Relationship,
        source_node: &Node,
        target_node: &Node,
    ) -> String {
        plan_endpoints(relationship, source_node, target_node, &self.config.source_name)
            .row_source
            .to_string()
    }

    fn file_path(&self, source_name: &str) -> String {
        format!("{}{}", self.config.file_directory, source_name)
    }

    fn wrap(
        &self,
        strategy: Strategy,
        body: &[String],
        source_name: &str,
    ) -> Result<String, CypherGeneratorError> {
        match strategy {
            Strategy::Standard => Ok(wrap_standard(body)),
            Strategy::LoadCsv => wrap_load_csv(
                body,
                &self.file_path(source_name),
                self.config.method,
                self.config.batch_size,
            ),
        }
    }

    fn statements(&self, strategy: Strategy) -> Result<Vec<IngestionStatement>, CypherGeneratorError> {
        self.validate()?;
        let strict = self.config.strict_typing;

        let mut statements = Vec::new();
        for node in &self.data_model.nodes {
            let source_name = self.node_source_name(node);
            let body = merge_node_body(node, strict)?;
            let cypher = self.wrap(strategy, &body, &source_name)?;
            statements.push(IngestionStatement {
                source_name,
                element: node.element_ref(),
                cypher,
            });
        }

        for rel in &self.data_model.relationships {
            let (source_node, target_node) = self.data_model.relationship_endpoints(rel)?;
            let source_name = self.relationship_source_name(rel, source_node, target_node);
            let body = merge_relationship_body(
                rel,
                source_node,
                target_node,
                &self.config.source_name,
                strict,
            )?;
            let cypher = self.wrap(strategy, &body, &source_name)?;
            statements.push(IngestionStatement {
                source_name,
                element: rel.element_ref(),
                cypher,
            });
        }

        debug!("Generated {} {:?} statements", statements.len(), strategy);
        Ok(statements)
    }
}
