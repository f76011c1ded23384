//! Compiles a data model into Neo4j Cypher: constraint DDL and MERGE-based
//! loading statements for the standard (`$dict.rows`) and `LOAD CSV` strategies.

pub mod common;
pub mod constraints;
mod errors;
pub mod ingestion;
pub mod match_clause;
pub mod merge_clause;
pub mod pyingest;

pub use constraints::{
    data_model_constraints, generate_node_key_constraint, generate_relationship_key_constraint,
    generate_relationship_unique_constraint, generate_unique_constraint, node_constraints,
    relationship_constraints,
};
pub use errors::CypherGeneratorError;
pub use ingestion::{IngestionGenerator, IngestionStatement};
pub use match_clause::{
    generate_match_endpoints_clause, generate_match_node_clause,
    generate_match_same_node_labels_clause, match_endpoints_from_source,
};
pub use merge_clause::{
    generate_merge_node_clause_standard, generate_merge_node_load_csv_clause,
    generate_merge_relationship_clause_standard, generate_merge_relationship_load_csv_clause,
    generate_set_property, generate_set_unique_property,
};
pub use pyingest::{PyIngestConfig, PyIngestFile, PyIngestSettings};
