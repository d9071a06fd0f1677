//! Error types for the appliance client.

use thiserror::Error;

/// Result type alias for appliance operations.
pub type Result<T> = std::result::Result<T, GsaError>;

/// Errors that can occur while configuring, querying or rendering.
#[derive(Error, Debug)]
pub enum GsaError {
    /// HTTP request failed or the appliance answered with a non-success status.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The appliance response could not be parsed.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Template rendering failed.
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    /// Settings file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid YAML.
    #[error("Invalid settings file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<quick_xml::Error> for GsaError {
    fn from(err: quick_xml::Error) -> Self {
        GsaError::Parse(err.to_string())
    }
}
