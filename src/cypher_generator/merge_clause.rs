//! MERGE statement generation
//!
//! Each element compiles to a per-row body (MERGE on identifying properties,
//! then an unconditional SET of the remaining ones). The body is then wrapped for
//! one of two loading strategies:
//!
//! - **standard**: rows arrive as a `$dict.rows` parameter and are unwound
//!   (PyIngest and driver batches)
//! - **bulk-load**: rows stream from a CSV file through `LOAD CSV`, committed in
//!   `CALL { } IN TRANSACTIONS OF <batch_size> ROWS`
//!
//! Both strategies share the body text exactly.

use log::debug;

use super::common::{cast_value, property_map_entries, quote_identifier};
use super::errors::CypherGeneratorError;
use super::match_clause::{
    match_endpoints_from_source, node_pattern, SOURCE_VARIABLE, TARGET_VARIABLE,
};
use crate::config::LoadMethod;
use crate::models::{ColumnRole, Node, Property, Relationship, SchemaElement, DEFAULT_SOURCE_NAME};

const NODE_VARIABLE: &str = "n";
const RELATIONSHIP_VARIABLE: &str = "r";
const BODY_INDENT: &str = "    ";

/// `key: value, ...` entries of a MERGE pattern
pub fn generate_set_unique_property(unique_properties: &[&Property], strict_typing: bool) -> String {
    property_map_entries(unique_properties, ColumnRole::Primary, strict_typing)
}

/// `SET v.p = value, ...`, or an empty string when there is nothing to set.
pub fn generate_set_property(
    variable: &str,
    properties: &[&Property],
    strict_typing: bool,
) -> String {
    if properties.is_empty() {
        return String::new();
    }

    let assignments = properties
        .iter()
        .map(|prop| {
            format!(
                "{}.{} = {}",
                variable,
                quote_identifier(&prop.name),
                cast_value(prop, strict_typing)
            )
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!("SET {}", assignments)
}

pub fn merge_node_body(node: &Node, strict_typing: bool) -> Result<Vec<String>, CypherGeneratorError> {
    let mut lines = vec![format!(
        "MERGE {}",
        node_pattern(node, NODE_VARIABLE, ColumnRole::Primary, strict_typing)?
    )];

    let set = generate_set_property(NODE_VARIABLE, &node.descriptive_properties(), strict_typing);
    if !set.is_empty() {
        lines.push(set);
    }
    Ok(lines)
}

/// Per-row relationship body. Elements without a `source_name` read
/// `default_source`.
pub fn merge_relationship_body(
    relationship: &Relationship,
    source_node: &Node,
    target_node: &Node,
    default_source: &str,
    strict_typing: bool,
) -> Result<Vec<String>, CypherGeneratorError> {
    let mut lines = match_endpoints_from_source(
        relationship,
        source_node,
        target_node,
        default_source,
        strict_typing,
    )?;

    let keys = relationship.identifying_properties();
    let key_map = if keys.is_empty() {
        String::new()
    } else {
        format!(
            " {{{}}}",
            property_map_entries(&keys, ColumnRole::Primary, strict_typing)
        )
    };
    lines.push(format!(
        "MERGE ({})-[{}:{}{}]->({})",
        SOURCE_VARIABLE,
        RELATIONSHIP_VARIABLE,
        quote_identifier(&relationship.rel_type),
        key_map,
        TARGET_VARIABLE
    ));

    let set = generate_set_property(
        RELATIONSHIP_VARIABLE,
        &relationship.descriptive_properties(),
        strict_typing,
    );
    if !set.is_empty() {
        lines.push(set);
    }
    Ok(lines)
}

/// Standard-strategy node MERGE.
///
/// ```text
/// WITH $dict.rows AS rows
/// UNWIND rows AS row
/// MERGE (n:NodeA {uniqueProp1: row.unique_prop_1})
/// SET n.prop1 = row.prop_1
/// ```
pub fn generate_merge_node_clause_standard(
    node: &Node,
    strict_typing: bool,
) -> Result<String, CypherGeneratorError> {
    let body = merge_node_body(node, strict_typing)?;
    debug!("Standard MERGE for node {}", node.label);
    Ok(wrap_standard(&body))
}

/// Bulk-load node MERGE reading `source_name`.
pub fn generate_merge_node_load_csv_clause(
    node: &Node,
    source_name: &str,
    method: LoadMethod,
    batch_size: u32,
    strict_typing: bool,
) -> Result<String, CypherGeneratorError> {
    let body = merge_node_body(node, strict_typing)?;
    debug!("LOAD CSV MERGE for node {} from {}", node.label, source_name);
    wrap_load_csv(&body, source_name, method, batch_size)
}

pub fn generate_merge_relationship_clause_standard(
    relationship: &Relationship,
    source_node: &Node,
    target_node: &Node,
    strict_typing: bool,
) -> Result<String, CypherGeneratorError> {
    let body = merge_relationship_body(
        relationship,
        source_node,
        target_node,
        DEFAULT_SOURCE_NAME,
        strict_typing,
    )?;
    debug!("Standard MERGE for relationship {}", relationship.rel_type);
    Ok(wrap_standard(&body))
}

pub fn generate_merge_relationship_load_csv_clause(
    relationship: &Relationship,
    source_node: &Node,
    target_node: &Node,
    source_name: &str,
    method: LoadMethod,
    batch_size: u32,
    strict_typing: bool,
) -> Result<String, CypherGeneratorError> {
    let body = merge_relationship_body(
        relationship,
        source_node,
        target_node,
        DEFAULT_SOURCE_NAME,
        strict_typing,
    )?;
    debug!(
        "LOAD CSV MERGE for relationship {} from {}",
        relationship.rel_type, source_name
    );
    wrap_load_csv(&body, source_name, method, batch_size)
}

/// Unwind `$dict.rows` and run the per-row body on each.
pub fn wrap_standard(body: &[String]) -> String {
    let mut lines = vec![
        "WITH $dict.rows AS rows".to_string(),
        "UNWIND rows AS row".to_string(),
    ];
    lines.extend(body.iter().cloned());
    lines.join("\n")
}

/// Wrap a per-row body in a batched `LOAD CSV` over `source_name`.
pub fn wrap_load_csv(
    body: &[String],
    source_name: &str,
    method: LoadMethod,
    batch_size: u32,
) -> Result<String, CypherGeneratorError> {
    if batch_size == 0 {
        return Err(CypherGeneratorError::InvalidBatchSize);
    }

    let prefix = match method {
        LoadMethod::Browser => ":auto ",
        LoadMethod::Api => "",
    };

    let mut lines = vec![
        format!(
            "{}LOAD CSV WITH HEADERS FROM 'file:///{}' AS row",
            prefix,
            source_name.replace('\\', "\\\\").replace('\'', "\\'")
        ),
        "CALL {".to_string(),
        format!("{}WITH row", BODY_INDENT),
    ];
    lines.extend(body.iter().map(|line| format!("{}{}", BODY_INDENT, line)));
    lines.push(format!("}} IN TRANSACTIONS OF {} ROWS;", batch_size));
    Ok(lines.join("\n"))
}
