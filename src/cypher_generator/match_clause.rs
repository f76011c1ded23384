use log::{debug, warn};

use super::common::{property_map_entries, quote_identifier};
use super::errors::CypherGeneratorError;
use crate::models::{
    plan_endpoints, ColumnRole, EndpointLayout, Node, Relationship, SchemaElement,
    DEFAULT_SOURCE_NAME,
};

/// Variable bound to a relationship's source node
pub const SOURCE_VARIABLE: &str = "source";
/// Variable bound to a relationship's target node
pub const TARGET_VARIABLE: &str = "target";

/// `(<variable>:<Label> {key: value, ...})` over the node's identifying properties.
pub fn node_pattern(
    node: &Node,
    variable: &str,
    role: ColumnRole,
    strict_typing: bool,
) -> Result<String, CypherGeneratorError> {
    let keys = node.identifying_properties();
    if keys.is_empty() {
        return Err(CypherGeneratorError::NoIdentifyingProperties(
            node.label.clone(),
        ));
    }

    Ok(format!(
        "({}:{} {{{}}})",
        variable,
        quote_identifier(&node.label),
        property_map_entries(&keys, role, strict_typing)
    ))
}

/// Match a node on its identifying properties, bound to `n`.
pub fn generate_match_node_clause(
    node: &Node,
    strict_typing: bool,
) -> Result<String, CypherGeneratorError> {
    Ok(format!(
        "MATCH {}",
        node_pattern(node, "n", ColumnRole::Primary, strict_typing)?
    ))
}

/// Match the same label twice from one row: the source from `column_mapping`,
/// the target from `alias`.
pub fn generate_match_same_node_labels_clause(
    node: &Node,
    strict_typing: bool,
) -> Result<String, CypherGeneratorError> {
    Ok(format!(
        "MATCH {}, {}",
        node_pattern(node, SOURCE_VARIABLE, ColumnRole::Primary, strict_typing)?,
        node_pattern(node, TARGET_VARIABLE, ColumnRole::Alias, strict_typing)?
    ))
}

/// MATCH lines binding both endpoints of a relationship.
///
/// One line for the single-file layout, one line per endpoint otherwise.
pub fn generate_match_endpoints_clause(
    relationship: &Relationship,
    source_node: &Node,
    target_node: &Node,
    strict_typing: bool,
) -> Result<Vec<String>, CypherGeneratorError> {
    match_endpoints_from_source(
        relationship,
        source_node,
        target_node,
        DEFAULT_SOURCE_NAME,
        strict_typing,
    )
}

/// Endpoint MATCH lines where elements without a `source_name` read
/// `default_source`.
pub fn match_endpoints_from_source(
    relationship: &Relationship,
    source_node: &Node,
    target_node: &Node,
    default_source: &str,
    strict_typing: bool,
) -> Result<Vec<String>, CypherGeneratorError> {
    check_endpoint(relationship, "source", &relationship.source, source_node)?;
    check_endpoint(relationship, "target", &relationship.target, target_node)?;

    let plan = plan_endpoints(relationship, source_node, target_node, default_source);
    if plan.ambiguous {
        warn!(
            "Relationship {} has no source_name and its endpoints use different files; reading rows from {}",
            relationship.rel_type, plan.row_source
        );
    }
    let source = node_pattern(source_node, SOURCE_VARIABLE, plan.source_role, strict_typing)?;
    let target = node_pattern(target_node, TARGET_VARIABLE, plan.target_role, strict_typing)?;

    debug!(
        "Relationship {} endpoints use {:?} layout",
        relationship.rel_type, plan.layout
    );

    Ok(match plan.layout {
        EndpointLayout::SingleFile => vec![format!("MATCH {}, {}", source, target)],
        EndpointLayout::MultiFile => {
            vec![format!("MATCH {}", source), format!("MATCH {}", target)]
        }
    })
}

fn check_endpoint(
    relationship: &Relationship,
    role: &'static str,
    expected: &str,
    node: &Node,
) -> Result<(), CypherGeneratorError> {
    if node.label != expected {
        return Err(CypherGeneratorError::endpoint_mismatch(
            &relationship.rel_type,
            role,
            expected,
            &node.label,
        ));
    }
    Ok(())
}
