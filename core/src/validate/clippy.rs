//! Clippy validators: `--message-format=json` streams and plain text.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::{ValidationError, ValidationResult};

/// `reason` values cargo writes in its JSON message stream.
pub const CARGO_MESSAGE_REASONS: [&str; 3] =
    ["compiler-message", "compiler-artifact", "build-finished"];

static WARNING_OR_ERROR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(warning|error):").expect("static regex must compile"));
static SPAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-->\s+\S+\.rs:\d+:\d+").expect("static regex must compile")
});
static SUMMARY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+\s+warnings?\s+emitted").expect("static regex must compile")
});

/// Validates newline-delimited cargo/clippy JSON.
///
/// Lines that do not start with `{` are cargo status noise and skipped, as
/// are unparseable lines and objects without a `reason`. A `reason` outside
/// [`CARGO_MESSAGE_REASONS`] is a hard failure, as is a `compiler-message`
/// lacking `message.level` or `message.spans`. At least one well-formed
/// line is required.
///
/// # Examples
///
/// ```
/// use artifact_detective_core::validate_clippy_json;
///
/// let stream = "   Compiling demo v0.1.0\n{\"reason\":\"build-finished\",\"success\":true}\n";
/// assert!(validate_clippy_json(stream).valid);
/// assert!(!validate_clippy_json("").valid);
/// ```
pub fn validate_clippy_json(content: &str) -> ValidationResult {
    let mut found_valid_line = false;

    for line in content.trim().lines() {
        let line = line.trim();
        if !line.starts_with('{') {
            continue;
        }
        let Ok(obj) = serde_json::from_str::<Value>(line) else {
            continue;
        };
        let Some(reason) = obj.get("reason").filter(|reason| is_present(reason)) else {
            continue;
        };

        let reason_str = reason.as_str().unwrap_or_default();
        if !CARGO_MESSAGE_REASONS.contains(&reason_str) {
            let shown = reason
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| reason.to_string());
            return ValidationResult::invalid(ValidationError::InvalidReason(shown));
        }

        if reason_str == "compiler-message" {
            let message = obj.get("message");
            let has_level = message
                .and_then(|m| m.get("level"))
                .is_some_and(is_present);
            let has_spans = message
                .and_then(|m| m.get("spans"))
                .is_some_and(|spans| !spans.is_null());
            if !has_level || !has_spans {
                return ValidationResult::invalid(ValidationError::IncompleteCompilerMessage);
            }
        }

        found_valid_line = true;
    }

    if found_valid_line {
        ValidationResult::ok()
    } else {
        ValidationResult::invalid(ValidationError::NoClippyMessages)
    }
}

/// Validates human-readable clippy output.
///
/// Empty output is valid: a clean run prints nothing. Otherwise either a
/// `warning:`/`error:` line together with a `--> file.rs:L:C` span, or a
/// `N warnings emitted` summary, is required.
pub fn validate_clippy_text(content: &str) -> ValidationResult {
    if content.trim().is_empty() {
        return ValidationResult::ok();
    }

    let diagnostic = WARNING_OR_ERROR_RE.is_match(content) && SPAN_RE.is_match(content);
    ValidationResult::check(diagnostic || SUMMARY_RE.is_match(content), "clippy text")
}

// Treats JSON falsy values as absent, matching how cargo consumers probe fields.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MESSAGE: &str = r#"{"reason":"compiler-message","message":{"level":"warning","spans":[],"message":"unused variable"}}"#;

    #[test]
    fn test_empty_json_stream_is_invalid() {
        let result = validate_clippy_json("");
        assert!(!result.valid);
        assert_eq!(
            result.error.as_deref(),
            Some("No valid clippy JSON messages found")
        );
    }

    #[test]
    fn test_compiler_message_with_structure_is_valid() {
        assert!(validate_clippy_json(MESSAGE).valid);
    }

    #[test]
    fn test_unknown_reason_is_a_hard_failure() {
        let content = format!("{MESSAGE}\n{{\"reason\":\"build-script-executed\"}}");
        let result = validate_clippy_json(&content);
        assert_eq!(
            result.error.as_deref(),
            Some("Invalid reason value: build-script-executed")
        );
    }

    #[test]
    fn test_compiler_message_without_spans_fails() {
        let content = r#"{"reason":"compiler-message","message":{"level":"warning"}}"#;
        assert_eq!(
            validate_clippy_json(content).error.as_deref(),
            Some("Compiler message missing required fields")
        );
    }

    #[test]
    fn test_lines_without_reason_are_skipped() {
        let content = "{\"other\":1}\nnot json\n{\"reason\":\"compiler-artifact\"}";
        assert!(validate_clippy_json(content).valid);
        assert!(!validate_clippy_json("{\"other\":1}").valid);
    }

    #[test]
    fn test_clippy_text_empty_is_valid() {
        assert!(validate_clippy_text("").valid);
        assert!(validate_clippy_text("  \n ").valid);
    }

    #[test]
    fn test_clippy_text_requires_span_with_warning() {
        let text = "warning: unused variable: `x`\n --> src/lib.rs:7:9\n";
        assert!(validate_clippy_text(text).valid);
        assert!(!validate_clippy_text("warning: something happened").valid);
        assert!(validate_clippy_text("warning: `demo` (lib) generated 2 warnings emitted").valid);
    }
}
