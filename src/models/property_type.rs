//! Semantic property types
//!
//! The closed vocabulary a [`Property`](super::Property) can declare. Parsing is
//! infallible: any spelling outside the vocabulary becomes [`PropertyType::Unknown`],
//! which generation treats the same as a string.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertyType {
    #[default]
    Str,
    Int,
    Float,
    Bool,
    Date,
    Time,
    DateTime,
    CartesianPoint,
    Wgs84Point,
    Unknown,
}

impl PropertyType {
    /// Parse a type name. Accepts the short spellings (`int`, `Date`, ...) as well
    /// as the driver-qualified ones (`neo4j.time.Date`, `neo4j.spatial.WGS84Point`).
    pub fn parse(raw: &str) -> Self {
        let name = raw.trim();
        let name = name
            .strip_prefix("neo4j.time.")
            .or_else(|| name.strip_prefix("neo4j.spatial."))
            .unwrap_or(name);

        match name {
            "str" | "string" => PropertyType::Str,
            "int" | "integer" => PropertyType::Int,
            "float" => PropertyType::Float,
            "bool" | "boolean" => PropertyType::Bool,
            "Date" => PropertyType::Date,
            "Time" => PropertyType::Time,
            "DateTime" => PropertyType::DateTime,
            "CartesianPoint" => PropertyType::CartesianPoint,
            "WGS84Point" => PropertyType::Wgs84Point,
            _ => PropertyType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Str => "str",
            PropertyType::Int => "int",
            PropertyType::Float => "float",
            PropertyType::Bool => "bool",
            PropertyType::Date => "Date",
            PropertyType::Time => "Time",
            PropertyType::DateTime => "DateTime",
            PropertyType::CartesianPoint => "CartesianPoint",
            PropertyType::Wgs84Point => "WGS84Point",
            PropertyType::Unknown => "unknown",
        }
    }

    /// Cartesian or geographic point.
    pub fn is_point(&self) -> bool {
        matches!(
            self,
            PropertyType::CartesianPoint | PropertyType::Wgs84Point
        )
    }
}

impl From<String> for PropertyType {
    fn from(raw: String) -> Self {
        PropertyType::parse(&raw)
    }
}

impl From<&str> for PropertyType {
    fn from(raw: &str) -> Self {
        PropertyType::parse(raw)
    }
}

impl From<PropertyType> for String {
    fn from(property_type: PropertyType) -> Self {
        property_type.as_str().to_string()
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
