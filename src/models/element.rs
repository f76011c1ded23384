//! Behaviour shared by nodes and relationships
//!
//! Both element kinds are an ordered list of properties read from one source
//! file. The derived views and element-level validation rules live here as
//! provided methods so the two types only supply their identity.

use std::collections::{HashMap, HashSet};

use super::diagnostics::{ElementRef, SchemaDiagnostic};
use super::property::Property;
use super::source_columns::{SourceColumns, DEFAULT_SOURCE_NAME};

pub trait SchemaElement {
    fn properties(&self) -> &[Property];

    fn element_ref(&self) -> ElementRef;

    /// Declared source file, if any
    fn source_name(&self) -> Option<&str>;

    /// Source file the element's rows come from, with the implicit default applied.
    fn effective_source_name(&self) -> &str {
        self.source_name_or(DEFAULT_SOURCE_NAME)
    }

    /// Declared source file, or `default_source` when none is declared
    fn source_name_or<'a>(&'a self, default_source: &'a str) -> &'a str {
        self.source_name().unwrap_or(default_source)
    }

    fn property_names(&self) -> Vec<&str> {
        self.properties().iter().map(|p| p.name.as_str()).collect()
    }

    fn unique_properties(&self) -> Vec<&Property> {
        self.properties().iter().filter(|p| p.is_unique).collect()
    }

    fn nonunique_properties(&self) -> Vec<&Property> {
        self.properties().iter().filter(|p| !p.is_unique).collect()
    }

    /// Properties flagged as members of the composite key, in declared order
    fn key_properties(&self) -> Vec<&Property> {
        self.properties().iter().filter(|p| p.part_of_key).collect()
    }

    /// Properties that identify an instance: unique ones and composite-key members.
    /// These are the MERGE and MATCH keys.
    fn identifying_properties(&self) -> Vec<&Property> {
        self.properties()
            .iter()
            .filter(|p| p.is_unique || p.part_of_key)
            .collect()
    }

    /// Properties set after the element is merged
    fn descriptive_properties(&self) -> Vec<&Property> {
        self.properties()
            .iter()
            .filter(|p| !p.is_unique && !p.part_of_key)
            .collect()
    }

    fn property_column_mapping(&self) -> HashMap<String, String> {
        column_mapping(self.properties().iter())
    }

    fn unique_properties_column_mapping(&self) -> HashMap<String, String> {
        column_mapping(self.properties().iter().filter(|p| p.is_unique))
    }

    fn nonunique_properties_column_mapping(&self) -> HashMap<String, String> {
        column_mapping(self.properties().iter().filter(|p| !p.is_unique))
    }

    /// Check property names, key cardinality and column mappings against the
    /// columns of the element's source file.
    ///
    /// Column checks are skipped when the source file itself is unknown; that
    /// case is reported by [`SchemaElement::validate_source_name`].
    fn validate_properties(&self, valid_columns: &SourceColumns) -> Vec<SchemaDiagnostic> {
        let mut diagnostics = self.validate_property_names();
        diagnostics.extend(self.validate_key());

        if let Some(columns) = valid_columns.columns_for(self.source_name()) {
            for prop in self.properties() {
                if !columns.contains(&prop.column_mapping) {
                    diagnostics.push(SchemaDiagnostic::MissingColumn {
                        element: self.element_ref(),
                        property: prop.name.clone(),
                        column: prop.column_mapping.clone(),
                    });
                }
            }
        }

        diagnostics
    }

    fn validate_source_name(&self, valid_columns: &SourceColumns) -> Vec<SchemaDiagnostic> {
        match self.source_name() {
            Some(name) if !valid_columns.contains_file(name) => {
                vec![SchemaDiagnostic::UnknownSourceName {
                    element: self.element_ref(),
                    source_name: name.to_string(),
                    available: valid_columns.file_names(),
                }]
            }
            _ => Vec::new(),
        }
    }

    /// A composite key needs two or more members.
    fn validate_key(&self) -> Option<SchemaDiagnostic> {
        match self.key_properties().as_slice() {
            [only] => Some(SchemaDiagnostic::SingleKeyProperty {
                element: self.element_ref(),
                property: only.name.clone(),
            }),
            _ => None,
        }
    }

    fn validate_property_names(&self) -> Vec<SchemaDiagnostic> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut diagnostics = Vec::new();
        for prop in self.properties() {
            if !seen.insert(prop.name.as_str()) && reported.insert(prop.name.as_str()) {
                diagnostics.push(SchemaDiagnostic::DuplicatePropertyName {
                    element: self.element_ref(),
                    property: prop.name.clone(),
                });
            }
        }
        diagnostics
    }
}

fn column_mapping<'a>(properties: impl Iterator<Item = &'a Property>) -> HashMap<String, String> {
    properties
        .map(|p| (p.name.clone(), p.column_mapping.clone()))
        .collect()
}
