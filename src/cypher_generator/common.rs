//! Common utilities for Cypher generation: identifier quoting, row value
//! casting and constraint naming.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::{ColumnRole, Property, PropertyType};

/// Variable every per-row statement binds the current input row to
pub const ROW_VARIABLE: &str = "row";

lazy_static! {
    static ref BARE_COLUMN: Regex = Regex::new(r"^[A-Za-z0-9_]+$").expect("valid regex");
    static ref BARE_IDENTIFIER: Regex =
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid regex");
    static ref CONSTRAINT_NAME_UNSAFE: Regex = Regex::new(r"[^a-z0-9_]").expect("valid regex");
}

fn backtick(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Quote a source column name if it contains any character outside `[A-Za-z0-9_]`.
///
/// # Examples
/// ```
/// use runway::cypher_generator::common::quote_column;
/// assert_eq!(quote_column("unique_prop_1"), "unique_prop_1");
/// assert_eq!(quote_column("p 1"), "`p 1`");
/// assert_eq!(quote_column("$g"), "`$g`");
/// ```
pub fn quote_column(name: &str) -> String {
    if BARE_COLUMN.is_match(name) {
        name.to_string()
    } else {
        backtick(name)
    }
}

/// Quote a label, relationship type or property key. Same rule as
/// [`quote_column`], and a leading digit is quoted as well.
///
/// # Examples
/// ```
/// use runway::cypher_generator::common::quote_identifier;
/// assert_eq!(quote_identifier("NodeA"), "NodeA");
/// assert_eq!(quote_identifier("2ndPlace"), "`2ndPlace`");
/// assert_eq!(quote_identifier("has-tag"), "`has-tag`");
/// ```
pub fn quote_identifier(name: &str) -> String {
    if BARE_IDENTIFIER.is_match(name) {
        name.to_string()
    } else {
        backtick(name)
    }
}

/// `row.<column>`, with the column quoted when needed
pub fn row_reference(column: &str) -> String {
    format!("{}.{}", ROW_VARIABLE, quote_column(column))
}

/// Expression reading `column` from the current row, cast to `property_type`
/// when strict typing is on.
pub fn cast_column(property_type: PropertyType, column: &str, strict_typing: bool) -> String {
    let value = row_reference(column);
    if !strict_typing {
        return value;
    }

    match property_type {
        PropertyType::Int => format!("toIntegerOrNull({})", value),
        PropertyType::Float => format!("toFloatOrNull({})", value),
        PropertyType::Bool => format!("toBooleanOrNull({})", value),
        PropertyType::Date => format!("date({})", value),
        PropertyType::Time => format!("time({})", value),
        PropertyType::DateTime => format!("datetime({})", value),
        PropertyType::CartesianPoint | PropertyType::Wgs84Point => format!("point({})", value),
        PropertyType::Str | PropertyType::Unknown => value,
    }
}

/// Value expression for a property read from its `column_mapping`.
pub fn cast_value(property: &Property, strict_typing: bool) -> String {
    cast_column(property.property_type, &property.column_mapping, strict_typing)
}

/// Value expression for a property read from its alias column.
pub fn cast_alias_value(property: &Property, strict_typing: bool) -> String {
    cast_column(property.property_type, property.alias_or_column(), strict_typing)
}

/// Lowercase a name and replace every character outside `[a-z0-9_]` with `_`.
/// A name starting with a digit gets a leading `_`, since constraint names are
/// written unquoted.
///
/// # Examples
/// ```
/// use runway::cypher_generator::common::sanitize_constraint_name;
/// assert_eq!(sanitize_constraint_name("Has-Tag_id"), "has_tag_id");
/// assert_eq!(sanitize_constraint_name("2ndPlace_id"), "_2ndplace_id");
/// ```
pub fn sanitize_constraint_name(name: &str) -> String {
    let sanitized = CONSTRAINT_NAME_UNSAFE
        .replace_all(&name.to_lowercase(), "_")
        .into_owned();
    if sanitized.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", sanitized)
    } else {
        sanitized
    }
}

/// Deterministic name for the uniqueness constraint on one property.
pub fn generate_constraints_key(label_or_type: &str, unique_property: &Property) -> String {
    sanitize_constraint_name(&format!("{}_{}", label_or_type, unique_property.name))
}

/// `name: value, ...` for use inside a pattern's property map
pub fn property_map_entries(
    properties: &[&Property],
    role: ColumnRole,
    strict_typing: bool,
) -> String {
    properties
        .iter()
        .map(|prop| {
            format!(
                "{}: {}",
                quote_identifier(&prop.name),
                cast_column(prop.property_type, role.column(prop), strict_typing)
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}
