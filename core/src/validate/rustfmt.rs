//! `cargo fmt --check` output validator.

use std::sync::LazyLock;

use regex::Regex;

use super::ValidationResult;

static DIFF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Diff\s+in\s+\S+\.rs").expect("static regex must compile"));
static RUST_FILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+\.rs\b").expect("static regex must compile"));

/// Validates rustfmt check output.
///
/// Empty output is valid: rustfmt prints nothing when every file is
/// formatted. Otherwise a `Diff in file.rs` header or, for `--files-with-diff`
/// mode, at least one `.rs` path is required.
///
/// # Examples
///
/// ```
/// use artifact_detective_core::validate_rustfmt_output;
///
/// assert!(validate_rustfmt_output("").valid);
/// assert!(validate_rustfmt_output("Diff in /repo/src/lib.rs at line 3:").valid);
/// assert!(!validate_rustfmt_output("Everything is fine").valid);
/// ```
pub fn validate_rustfmt_output(content: &str) -> ValidationResult {
    if content.trim().is_empty() {
        return ValidationResult::ok();
    }

    ValidationResult::check(
        DIFF_RE.is_match(content) || RUST_FILE_RE.is_match(content),
        "rustfmt",
    )
}
