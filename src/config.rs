use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use validator::Validate;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// How bulk-load statements will be submitted. Only changes the wrapping of
/// `LOAD CSV` statements, never the per-row body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadMethod {
    /// Driver or HTTP API; statements are sent as-is
    #[default]
    Api,
    /// Neo4j Browser, which needs `:auto` for `CALL { } IN TRANSACTIONS`
    Browser,
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("Unknown load method '{0}' (expected 'api' or 'browser')")]
pub struct ParseLoadMethodError(String);

impl FromStr for LoadMethod {
    type Err = ParseLoadMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "api" => Ok(LoadMethod::Api),
            "browser" => Ok(LoadMethod::Browser),
            _ => Err(ParseLoadMethodError(s.to_string())),
        }
    }
}

impl fmt::Display for LoadMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadMethod::Api => f.write_str("api"),
            LoadMethod::Browser => f.write_str("browser"),
        }
    }
}

/// Options shared by every generator entry point
#[derive(Clone, Debug, Validate, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Cast row values to their declared property types
    pub strict_typing: bool,

    pub method: LoadMethod,

    /// Rows per transaction in bulk-load statements
    #[validate(range(min = 1, message = "Batch size must be at least 1"))]
    pub batch_size: u32,

    /// File referenced by load directives for elements without their own `source_name`
    #[validate(length(min = 1, message = "Source name cannot be empty"))]
    pub source_name: String,

    /// Directory prefix placed between `file:///` and the file name
    pub file_directory: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            strict_typing: true,
            method: LoadMethod::Api,
            batch_size: 100,
            source_name: "file.csv".to_string(),
            file_directory: String::new(),
        }
    }
}

impl GeneratorConfig {
    /// Create configuration from environment variables with validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            strict_typing: parse_env_var("RUNWAY_STRICT_TYPING", "true")?,
            method: parse_env_var("RUNWAY_LOAD_METHOD", "api")?,
            batch_size: parse_env_var("RUNWAY_BATCH_SIZE", "100")?,
            source_name: env::var("RUNWAY_SOURCE_NAME").unwrap_or_else(|_| "file.csv".to_string()),
            file_directory: env::var("RUNWAY_FILE_DIRECTORY").unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from YAML file
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            field: "yaml_file".to_string(),
            value: "file read failed".to_string(),
            source: Box::new(e),
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            field: "yaml_content".to_string(),
            value: content,
            source: Box::new(e),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply the options given on the command line over this configuration
    /// and re-validate.
    pub fn merge(&mut self, cli: CliConfig) -> Result<(), ConfigError> {
        if let Some(strict_typing) = cli.strict_typing {
            self.strict_typing = strict_typing;
        }
        if let Some(method) = cli.method {
            self.method = method;
        }
        if let Some(batch_size) = cli.batch_size {
            self.batch_size = batch_size;
        }
        if let Some(source_name) = cli.source_name {
            self.source_name = source_name;
        }
        if let Some(file_directory) = cli.file_directory {
            self.file_directory = file_directory;
        }

        self.validate()?;
        Ok(())
    }
}

/// CLI configuration (parsed from command line arguments). `None` keeps the
/// value from the file or environment.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    pub strict_typing: Option<bool>,
    pub method: Option<LoadMethod>,
    pub batch_size: Option<u32>,
    pub source_name: Option<String>,
    pub file_directory: Option<String>,
}

/// Parse an environment variable with a default value
fn parse_env_var<T: FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|e| ConfigError::Parse {
        field: key.to_string(),
        value,
        source: Box::new(e),
    })
}
