//! Error types for leafpath.
//!
//! Uses the dual-error pattern: `LeafPathError` for library consumers
//! with detailed error context, and `ConfigError` for the configuration
//! normalizer. Path construction itself never fails.

use std::path::PathBuf;

use thiserror::Error;

/// Error raised while normalizing a configuration record.
///
/// Always fatal: no traversal may run with a configuration that failed
/// normalization.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration record is not a key/value object.
    #[error("Configuration must be an object, got {0}")]
    NotAnObject(&'static str),

    /// A value has the wrong shape for its option.
    #[error("Invalid configuration: {0}")]
    InvalidShape(#[source] serde_json::Error),

    /// Namespace prefix is not usable in a path segment.
    #[error("Invalid namespace prefix: '{0}'. Expected a name like 'd' or 'ns1'")]
    InvalidNamespace(String),

    /// A tag or attribute name list contains an empty entry.
    #[error("Option '{option}' contains an empty name")]
    EmptyTagName { option: &'static str },

    /// Two options contradict each other.
    #[error("Conflicting options: {0}")]
    Conflict(String),
}

/// Main error type for the leafpath library.
#[derive(Debug, Error)]
pub enum LeafPathError {
    /// Configuration normalization failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// JSON configuration text could not be parsed.
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML configuration text could not be parsed.
    #[error("YAML parsing failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Input XML file does not exist.
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for leafpath operations.
pub type Result<T> = std::result::Result<T, LeafPathError>;
