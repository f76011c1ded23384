//! Runway - graph data model to Cypher ingestion compiler
//!
//! This crate provides:
//! - A property-graph data model (nodes, relationships, typed properties)
//!   loaded from YAML or JSON, with validation against source file columns
//! - Constraint generation for uniqueness and composite keys
//! - MERGE-based loading statements for parameterised rows and `LOAD CSV`
//! - PyIngest configuration output

pub mod config;
pub mod cypher_generator;
pub mod models;
