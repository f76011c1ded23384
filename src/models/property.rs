use serde::{Deserialize, Serialize};

use super::property_type::PropertyType;

/// A single attribute of a node or relationship and the source column it is read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    /// Graph-facing property key, unique within its owning element
    pub name: String,
    /// Source column the value is read from
    #[serde(alias = "csv_mapping")]
    pub column_mapping: String,
    #[serde(rename = "type", default)]
    pub property_type: PropertyType,
    /// Secondary column for the same property, used when a row carries the
    /// property for a second role (e.g. `knows_person` next to `name`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default)]
    pub is_unique: bool,
    #[serde(default)]
    pub part_of_key: bool,
}

impl Property {
    pub fn new(
        name: impl Into<String>,
        column_mapping: impl Into<String>,
        property_type: impl Into<PropertyType>,
    ) -> Self {
        Property {
            name: name.into(),
            column_mapping: column_mapping.into(),
            property_type: property_type.into(),
            alias: None,
            is_unique: false,
            part_of_key: false,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    pub fn key(mut self) -> Self {
        self.part_of_key = true;
        self
    }

    /// Column holding this property when the owning element is read in its
    /// secondary role. Falls back to `column_mapping` when no alias is declared.
    pub fn alias_or_column(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.column_mapping)
    }
}

/// Which column of a property a row value is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    /// The property's `column_mapping`
    Primary,
    /// The property's `alias`, falling back to `column_mapping`
    Alias,
}

impl ColumnRole {
    pub fn column<'a>(&self, property: &'a Property) -> &'a str {
        match self {
            ColumnRole::Primary => &property.column_mapping,
            ColumnRole::Alias => property.alias_or_column(),
        }
    }
}
