use serde::{Deserialize, Serialize};

use super::diagnostics::ElementRef;
use super::element::SchemaElement;
use super::property::Property;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub label: String,
    #[serde(default)]
    pub properties: Vec<Property>,
    /// File the node's rows are read from; the implicit single source when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
}

impl Node {
    pub fn new(label: impl Into<String>, properties: Vec<Property>) -> Self {
        Node {
            label: label.into(),
            properties,
            source_name: None,
        }
    }

    pub fn with_source_name(mut self, source_name: impl Into<String>) -> Self {
        self.source_name = Some(source_name.into());
        self
    }
}

impl SchemaElement for Node {
    fn properties(&self) -> &[Property] {
        &self.properties
    }

    fn element_ref(&self) -> ElementRef {
        ElementRef::Node(self.label.clone())
    }

    fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }
}
