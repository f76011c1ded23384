pub mod data_model;
pub mod diagnostics;
pub mod element;
pub mod endpoints;
pub mod errors;
pub mod history;
pub mod node;
pub mod property;
pub mod property_type;
pub mod relationship;
pub mod source_columns;

// Re-export commonly used types
pub use data_model::DataModel;
pub use diagnostics::{format_diagnostics, ElementRef, EndpointRole, SchemaDiagnostic};
pub use element::SchemaElement;
pub use endpoints::{plan_endpoints, EndpointLayout, EndpointPlan};
pub use errors::DataModelError;
pub use history::ModelHistory;
pub use node::Node;
pub use property::{ColumnRole, Property};
pub use property_type::PropertyType;
pub use relationship::Relationship;
pub use source_columns::{SourceColumns, DEFAULT_SOURCE_NAME};
