use serde::{Deserialize, Serialize};

use super::diagnostics::ElementRef;
use super::element::SchemaElement;
use super::property::Property;

/// Relationship between two node labels. Endpoints are held by label only;
/// the owning [`DataModel`](super::DataModel) resolves them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(rename = "type")]
    pub rel_type: String,
    #[serde(default)]
    pub properties: Vec<Property>,
    /// Source node label
    pub source: String,
    /// Target node label
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
}

impl Relationship {
    pub fn new(
        rel_type: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        properties: Vec<Property>,
    ) -> Self {
        Relationship {
            rel_type: rel_type.into(),
            properties,
            source: source.into(),
            target: target.into(),
            source_name: None,
        }
    }

    pub fn with_source_name(mut self, source_name: impl Into<String>) -> Self {
        self.source_name = Some(source_name.into());
        self
    }

    pub fn is_self_relationship(&self) -> bool {
        self.source == self.target
    }
}

impl SchemaElement for Relationship {
    fn properties(&self) -> &[Property] {
        &self.properties
    }

    fn element_ref(&self) -> ElementRef {
        ElementRef::Relationship(self.rel_type.clone())
    }

    fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }
}
