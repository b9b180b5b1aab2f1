//! Error types for normalization and configuration loading.
//!
//! Classification never fails (unreadable input degrades to a sentinel
//! type) and extraction reports "nothing found" as `None`, so the only
//! fallible surfaces are reading HTML reports from disk and loading
//! configuration files.

use std::path::PathBuf;

use artifact_detective_core::ArtifactType;
use thiserror::Error;

/// Failure while converting an HTML report to JSON.
///
/// Malformed report content is not an error; normalizers return `Ok(None)`
/// for it. Only I/O failures surface here.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The report file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while loading or validating a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON configuration could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML configuration could not be parsed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A configured regular expression does not compile.
    #[error("invalid pattern in {context}: {pattern}: {source}")]
    InvalidPattern {
        context: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A sentinel type (`binary`, `unknown`) was named where a concrete
    /// artifact type is required.
    #[error("{context} cannot use artifact type {artifact_type}")]
    DisallowedType {
        context: &'static str,
        artifact_type: ArtifactType,
    },

    /// The file extension is neither `.json`, `.yml` nor `.yaml`.
    #[error("unsupported configuration format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}
