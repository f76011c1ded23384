//! Constraint DDL
//!
//! One uniqueness constraint per unique property and one composite key
//! constraint per element whose key spans two or more properties. Constraint
//! names derive only from labels, types and property names, so repeated
//! generation over the same model yields the same statements and
//! `IF NOT EXISTS` keeps re-execution harmless.
//!
//! Sanitizing can map two different names onto one constraint name
//! (`Person.ID` and `Person.id` both give `person_id`). `IF NOT EXISTS` would
//! then silently skip the second constraint, so such models are rejected.

use std::collections::HashMap;

use log::debug;

use super::common::{generate_constraints_key, quote_identifier, sanitize_constraint_name};
use super::errors::CypherGeneratorError;
use crate::models::{DataModel, Node, Property, Relationship, SchemaElement};

/// A constraint statement with its name and what it was derived from.
struct NamedConstraint {
    name: String,
    origin: String,
    cypher: String,
}

/// Uniqueness constraint on a node property.
pub fn generate_unique_constraint(label: &str, unique_property: &Property) -> String {
    format!(
        "CREATE CONSTRAINT {} IF NOT EXISTS FOR (n:{}) REQUIRE n.{} IS UNIQUE;",
        generate_constraints_key(label, unique_property),
        quote_identifier(label),
        quote_identifier(&unique_property.name)
    )
}

/// Uniqueness constraint on a relationship property.
pub fn generate_relationship_unique_constraint(
    rel_type: &str,
    unique_property: &Property,
) -> String {
    format!(
        "CREATE CONSTRAINT {} IF NOT EXISTS FOR ()-[r:{}]-() REQUIRE r.{} IS UNIQUE;",
        generate_constraints_key(rel_type, unique_property),
        quote_identifier(rel_type),
        quote_identifier(&unique_property.name)
    )
}

pub fn generate_node_key_constraint(
    label: &str,
    key_properties: &[&Property],
) -> Result<String, CypherGeneratorError> {
    ensure_key_cardinality("node", label, key_properties)?;
    Ok(format!(
        "CREATE CONSTRAINT {} IF NOT EXISTS FOR (n:{}) REQUIRE ({}) IS NODE KEY;",
        key_constraint_name(label, key_properties),
        quote_identifier(label),
        key_property_list("n", key_properties)
    ))
}

pub fn generate_relationship_key_constraint(
    rel_type: &str,
    key_properties: &[&Property],
) -> Result<String, CypherGeneratorError> {
    ensure_key_cardinality("relationship", rel_type, key_properties)?;
    Ok(format!(
        "CREATE CONSTRAINT {} IF NOT EXISTS FOR ()-[r:{}]-() REQUIRE ({}) IS RELATIONSHIP KEY;",
        key_constraint_name(rel_type, key_properties),
        quote_identifier(rel_type),
        key_property_list("r", key_properties)
    ))
}

/// Every constraint a node needs, uniqueness constraints first.
pub fn node_constraints(node: &Node) -> Result<Vec<String>, CypherGeneratorError> {
    let constraints = node_constraint_entries(node)?;
    ensure_distinct_names(&constraints)?;
    debug!("{} constraints for node {}", constraints.len(), node.label);
    Ok(into_statements(constraints))
}

/// Every constraint a relationship needs, uniqueness constraints first.
pub fn relationship_constraints(
    relationship: &Relationship,
) -> Result<Vec<String>, CypherGeneratorError> {
    let constraints = relationship_constraint_entries(relationship)?;
    ensure_distinct_names(&constraints)?;
    debug!(
        "{} constraints for relationship {}",
        constraints.len(),
        relationship.rel_type
    );
    Ok(into_statements(constraints))
}

/// Constraints for every node, then every relationship, with names checked
/// for collisions across the whole model.
pub fn data_model_constraints(data_model: &DataModel) -> Result<Vec<String>, CypherGeneratorError> {
    let mut constraints = Vec::new();
    for node in &data_model.nodes {
        constraints.extend(node_constraint_entries(node)?);
    }
    for rel in &data_model.relationships {
        constraints.extend(relationship_constraint_entries(rel)?);
    }
    ensure_distinct_names(&constraints)?;
    Ok(into_statements(constraints))
}

fn node_constraint_entries(node: &Node) -> Result<Vec<NamedConstraint>, CypherGeneratorError> {
    let mut constraints: Vec<NamedConstraint> = node
        .unique_properties()
        .into_iter()
        .map(|prop| NamedConstraint {
            name: generate_constraints_key(&node.label, prop),
            origin: format!("node property {}.{}", node.label, prop.name),
            cypher: generate_unique_constraint(&node.label, prop),
        })
        .collect();

    let keys = node.key_properties();
    if !keys.is_empty() {
        constraints.push(NamedConstraint {
            name: key_constraint_name(&node.label, &keys),
            origin: format!("node key of {}", node.label),
            cypher: generate_node_key_constraint(&node.label, &keys)?,
        });
    }
    Ok(constraints)
}

fn relationship_constraint_entries(
    relationship: &Relationship,
) -> Result<Vec<NamedConstraint>, CypherGeneratorError> {
    let rel_type = &relationship.rel_type;
    let mut constraints: Vec<NamedConstraint> = relationship
        .unique_properties()
        .into_iter()
        .map(|prop| NamedConstraint {
            name: generate_constraints_key(rel_type, prop),
            origin: format!("relationship property {}.{}", rel_type, prop.name),
            cypher: generate_relationship_unique_constraint(rel_type, prop),
        })
        .collect();

    let keys = relationship.key_properties();
    if !keys.is_empty() {
        constraints.push(NamedConstraint {
            name: key_constraint_name(rel_type, &keys),
            origin: format!("relationship key of {}", rel_type),
            cypher: generate_relationship_key_constraint(rel_type, &keys)?,
        });
    }
    Ok(constraints)
}

fn ensure_distinct_names(constraints: &[NamedConstraint]) -> Result<(), CypherGeneratorError> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for constraint in constraints {
        if let Some(first) = seen.insert(&constraint.name, &constraint.origin) {
            return Err(CypherGeneratorError::ConstraintNameCollision {
                name: constraint.name.clone(),
                first: first.to_string(),
                second: constraint.origin.clone(),
            });
        }
    }
    Ok(())
}

fn into_statements(constraints: Vec<NamedConstraint>) -> Vec<String> {
    constraints.into_iter().map(|c| c.cypher).collect()
}

fn ensure_key_cardinality(
    kind: &'static str,
    label_or_type: &str,
    key_properties: &[&Property],
) -> Result<(), CypherGeneratorError> {
    if key_properties.len() < 2 {
        return Err(CypherGeneratorError::InsufficientKeyProperties {
            kind,
            label_or_type: label_or_type.to_string(),
            count: key_properties.len(),
        });
    }
    Ok(())
}

fn key_constraint_name(label_or_type: &str, key_properties: &[&Property]) -> String {
    let names = key_properties
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join("_");
    sanitize_constraint_name(&format!("{}_{}_key", label_or_type, names))
}

fn key_property_list(variable: &str, key_properties: &[&Property]) -> String {
    key_properties
        .iter()
        .map(|p| format!("{}.{}", variable, quote_identifier(&p.name)))
        .collect::<Vec<_>>()
        .join(", ")
}
