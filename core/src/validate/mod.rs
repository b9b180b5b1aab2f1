//! Structural validators for classified artifacts.
//!
//! Each validator is a pure predicate over text: it never reads files and
//! never panics, so it can confirm whole artifacts as well as slices cut
//! out of CI logs. Validators are the authority for the plain-text types
//! that the classifier deliberately refuses to auto-detect.
//!
//! # Examples
//!
//! ```
//! use artifact_detective_core::{ArtifactType, validate};
//!
//! let ok = validate(ArtifactType::CargoTestTxt, "test tests::it_works ... ok\n");
//! assert!(ok.valid);
//!
//! let missing = validate(ArtifactType::JestHtml, "<html></html>");
//! assert!(!missing.valid);
//! assert_eq!(
//!     missing.error.as_deref(),
//!     Some("No validator available for type: jest-html")
//! );
//! ```

mod cargo;
mod clippy;
mod javascript;
mod junit;
mod python;
mod rustfmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::registry;
use crate::{ArtifactType, ParseArtifactTypeError};

pub use cargo::validate_cargo_test_output;
pub use clippy::{CARGO_MESSAGE_REASONS, validate_clippy_json, validate_clippy_text};
pub use javascript::{
    validate_eslint_output, validate_jest_json, validate_playwright_json, validate_tsc_output,
};
pub use junit::validate_junit_xml;
pub use python::{
    validate_flake8_output, validate_mypy_output, validate_pytest_json, validate_ruff_output,
};
pub use rustfmt::validate_rustfmt_output;

/// Signature shared by every validator in the registry.
pub type ValidatorFn = fn(&str) -> ValidationResult;

/// Reasons a blob fails validation.
///
/// The `Display` text is what ends up in [`ValidationResult::error`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The registry has no validator for this type.
    #[error("No validator available for type: {0}")]
    NoValidator(ArtifactType),
    /// The type name is not a known artifact type.
    #[error("Unknown artifact type: {0}")]
    UnknownType(String),
    /// Content is not parseable JSON.
    #[error("Invalid JSON format: {0}")]
    InvalidJson(String),
    /// A required structural field is absent or has the wrong shape.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    /// Clippy message with a `reason` outside the known set.
    #[error("Invalid reason value: {0}")]
    InvalidReason(String),
    /// Clippy `compiler-message` without `message.level`/`message.spans`.
    #[error("Compiler message missing required fields")]
    IncompleteCompilerMessage,
    /// NDJSON stream without a single well-formed clippy line.
    #[error("No valid clippy JSON messages found")]
    NoClippyMessages,
    /// Text content lacks the tool's signature patterns.
    #[error("Does not match {0} output format")]
    FormatMismatch(&'static str),
}

impl From<ParseArtifactTypeError> for ValidationError {
    fn from(err: ParseArtifactTypeError) -> Self {
        Self::UnknownType(err.0)
    }
}

/// Result of one validation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    pub fn invalid(error: ValidationError) -> Self {
        Self {
            valid: false,
            error: Some(error.to_string()),
        }
    }

    /// Returns `ok()` when `condition` holds, otherwise a format mismatch
    /// naming `format`.
    pub(crate) fn check(condition: bool, format: &'static str) -> Self {
        if condition {
            Self::ok()
        } else {
            Self::invalid(ValidationError::FormatMismatch(format))
        }
    }
}

/// Validates `content` against the grammar implied by `artifact_type`.
///
/// Dispatches through the capability registry; types without a validator
/// produce an explicit failure rather than a silent pass.
pub fn validate(artifact_type: ArtifactType, content: &str) -> ValidationResult {
    match registry::capabilities(artifact_type).validator {
        Some(validator) => validator(content),
        None => ValidationResult::invalid(ValidationError::NoValidator(artifact_type)),
    }
}

/// Like [`validate`], but resolves the type from its string tag first.
///
/// # Examples
///
/// ```
/// use artifact_detective_core::validate_named;
///
/// let result = validate_named("gradle-txt", "BUILD SUCCESSFUL");
/// assert_eq!(result.error.as_deref(), Some("Unknown artifact type: gradle-txt"));
/// ```
pub fn validate_named(type_name: &str, content: &str) -> ValidationResult {
    match type_name.parse::<ArtifactType>() {
        Ok(artifact_type) => validate(artifact_type, content),
        Err(err) => ValidationResult::invalid(err.into()),
    }
}

/// Parses `content` as a single JSON document.
pub(crate) fn parse_json_document(content: &str) -> Result<serde_json::Value, ValidationResult> {
    serde_json::from_str(content)
        .map_err(|err| ValidationResult::invalid(ValidationError::InvalidJson(err.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_reaches_registered_validator() {
        let result = validate(ArtifactType::ClippyTxt, "");
        assert_eq!(result, ValidationResult::ok());
    }

    #[test]
    fn test_dispatch_without_validator_fails_explicitly() {
        let result = validate(ArtifactType::Unknown, "anything");
        assert!(!result.valid);
        assert_eq!(
            result.error.as_deref(),
            Some("No validator available for type: unknown")
        );
    }

    #[test]
    fn test_validate_named_resolves_tags() {
        assert!(validate_named("rustfmt-txt", "").valid);
        assert!(!validate_named("nope", "").valid);
    }

    #[test]
    fn test_result_omits_error_when_valid() {
        let json = serde_json::to_string(&ValidationResult::ok()).unwrap();
        assert_eq!(json, r#"{"valid":true}"#);
    }
}
