//! Validators for JavaScript/TypeScript tooling: Jest, Playwright, ESLint
//! and the TypeScript compiler.

use std::sync::LazyLock;

use regex::Regex;

use super::{ValidationError, ValidationResult, parse_json_document};

static ESLINT_MESSAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*\d+:\d+\s+(error|warning)\s+").expect("static regex must compile")
});
static ESLINT_SUMMARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\s+problems?\b").expect("static regex must compile"));
static TSC_ERROR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.tsx?(\(\d+,\d+\):\s+|:\d+:\d+\s+-\s+)error\s+TS\d+")
        .expect("static regex must compile")
});
static TSC_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"error TS\d+:").expect("static regex must compile"));

/// Validates a Jest `--json` report: a top-level object whose
/// `testResults` is an array of objects.
///
/// # Examples
///
/// ```
/// use artifact_detective_core::validate_jest_json;
///
/// assert!(validate_jest_json(r#"{"numTotalTests":0,"testResults":[]}"#).valid);
/// assert!(!validate_jest_json(r#"{"suites":[]}"#).valid);
/// ```
pub fn validate_jest_json(content: &str) -> ValidationResult {
    let data = match parse_json_document(content) {
        Ok(data) => data,
        Err(result) => return result,
    };

    let Some(results) = data.get("testResults").and_then(|v| v.as_array()) else {
        return ValidationResult::invalid(ValidationError::MissingField("testResults"));
    };

    ValidationResult::check(results.iter().all(|r| r.is_object()), "jest JSON")
}

/// Validates a Playwright JSON reporter file: a `config` object and a
/// `suites` array.
pub fn validate_playwright_json(content: &str) -> ValidationResult {
    let data = match parse_json_document(content) {
        Ok(data) => data,
        Err(result) => return result,
    };

    if !data.get("config").is_some_and(|config| config.is_object()) {
        return ValidationResult::invalid(ValidationError::MissingField("config"));
    }
    if !data.get("suites").is_some_and(|suites| suites.is_array()) {
        return ValidationResult::invalid(ValidationError::MissingField("suites"));
    }

    ValidationResult::ok()
}

/// Validates ESLint's default `stylish` text output.
///
/// Requires either a `line:col  error|warning  message` row or the
/// `N problems` summary.
///
/// # Examples
///
/// ```
/// use artifact_detective_core::validate_eslint_output;
///
/// let stylish = "/repo/src/app.js\n  3:7  error  'x' is assigned a value but never used  no-unused-vars\n\n✖ 1 problem (1 error, 0 warnings)\n";
/// assert!(validate_eslint_output(stylish).valid);
/// ```
pub fn validate_eslint_output(content: &str) -> ValidationResult {
    ValidationResult::check(
        ESLINT_MESSAGE_RE.is_match(content) || ESLINT_SUMMARY_RE.is_match(content),
        "eslint",
    )
}

/// Validates `tsc --noEmit` output in either the plain
/// `file.ts(L,C): error TSxxxx` or the pretty `file.ts:L:C - error TSxxxx`
/// format.
pub fn validate_tsc_output(content: &str) -> ValidationResult {
    ValidationResult::check(
        TSC_ERROR_RE.is_match(content) || TSC_CODE_RE.is_match(content),
        "tsc",
    )
}
