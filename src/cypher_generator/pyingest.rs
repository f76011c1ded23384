//! PyIngest configuration artifact
//!
//! PyIngest reads a YAML file naming the target server, statements to run once
//! before loading (`pre_ingest`), and one entry per CSV file with the
//! standard-strategy statement applied to each chunk of rows. `$BASE` in a file
//! url is replaced by PyIngest with `basepath`.

use serde::{Deserialize, Serialize};

use super::errors::CypherGeneratorError;

/// Connection and location settings written at the top of the config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PyIngestSettings {
    pub server_uri: String,
    pub admin_user: String,
    pub database: Option<String>,
    pub basepath: String,
}

impl Default for PyIngestSettings {
    fn default() -> Self {
        Self {
            server_uri: "bolt://localhost:7687".to_string(),
            admin_user: "neo4j".to_string(),
            database: None,
            basepath: "./".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PyIngestFile {
    pub url: String,
    pub chunk_size: u32,
    pub cql: String,
}

impl PyIngestFile {
    pub fn new(source_name: &str, chunk_size: u32, cql: impl Into<String>) -> Self {
        Self {
            url: format!("$BASE/{}", source_name),
            chunk_size,
            cql: cql.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PyIngestConfig {
    pub server_uri: String,
    pub admin_user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    pub basepath: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pre_ingest: Vec<String>,
    #[serde(default)]
    pub files: Vec<PyIngestFile>,
}

impl PyIngestConfig {
    pub fn new(settings: &PyIngestSettings, pre_ingest: Vec<String>, files: Vec<PyIngestFile>) -> Self {
        Self {
            server_uri: settings.server_uri.clone(),
            admin_user: settings.admin_user.clone(),
            database: settings.database.clone(),
            basepath: settings.basepath.clone(),
            pre_ingest,
            files,
        }
    }

    pub fn to_yaml_string(&self) -> Result<String, CypherGeneratorError> {
        serde_yaml::to_string(self).map_err(|e| CypherGeneratorError::PyIngestRender(e.to_string()))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, CypherGeneratorError> {
        serde_yaml::from_str(content).map_err(|e| CypherGeneratorError::PyIngestRender(e.to_string()))
    }
}
