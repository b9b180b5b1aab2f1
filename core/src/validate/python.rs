//! Validators for Python tooling: pytest-json-report, ruff, mypy, flake8.

use std::sync::LazyLock;

use regex::Regex;

use super::{ValidationError, ValidationResult, parse_json_document};

static RUFF_DIAGNOSTIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[\w\-/.\\]+\.pyi?:\d+:\d+:\s+[A-Z]+\d+\b").expect("static regex must compile")
});
static RUFF_SUMMARY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(Found \d+ errors?|All checks passed!)").expect("static regex must compile")
});
static MYPY_DIAGNOSTIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[\w\-/.\\]+\.pyi?:\d+:(\d+:)?\s*(error|warning|note):")
        .expect("static regex must compile")
});
static MYPY_SUMMARY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(Found \d+ errors? in \d+ files?|Success: no issues found)")
        .expect("static regex must compile")
});
static FLAKE8_DIAGNOSTIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[\w\-/.\\]+\.py:\d+:\d+:\s+[A-Z]\d{3}\b").expect("static regex must compile")
});

/// Validates a pytest-json-report file: a `tests` array whose entries
/// carry `nodeid` and `outcome`.
///
/// # Examples
///
/// ```
/// use artifact_detective_core::validate_pytest_json;
///
/// let report = r#"{"tests":[{"nodeid":"t.py::test_a","outcome":"passed"}]}"#;
/// assert!(validate_pytest_json(report).valid);
/// assert!(!validate_pytest_json(r#"{"tests":[{"name":"a"}]}"#).valid);
/// ```
pub fn validate_pytest_json(content: &str) -> ValidationResult {
    let data = match parse_json_document(content) {
        Ok(data) => data,
        Err(result) => return result,
    };

    let Some(tests) = data.get("tests").and_then(|v| v.as_array()) else {
        return ValidationResult::invalid(ValidationError::MissingField("tests"));
    };

    let well_formed = tests.iter().all(|test| {
        test.get("nodeid").is_some_and(|v| v.is_string())
            && test.get("outcome").is_some_and(|v| v.is_string())
    });
    ValidationResult::check(well_formed, "pytest JSON")
}

/// Validates `ruff check` concise output (`path.py:L:C: CODE message`) or
/// its summary line.
pub fn validate_ruff_output(content: &str) -> ValidationResult {
    ValidationResult::check(
        RUFF_DIAGNOSTIC_RE.is_match(content) || RUFF_SUMMARY_RE.is_match(content),
        "ruff",
    )
}

/// Validates mypy output (`path.py:L: error: message`) or its summary.
pub fn validate_mypy_output(content: &str) -> ValidationResult {
    ValidationResult::check(
        MYPY_DIAGNOSTIC_RE.is_match(content) || MYPY_SUMMARY_RE.is_match(content),
        "mypy",
    )
}

/// Validates flake8 default output (`path.py:L:C: E123 message`).
pub fn validate_flake8_output(content: &str) -> ValidationResult {
    ValidationResult::check(FLAKE8_DIAGNOSTIC_RE.is_match(content), "flake8")
}
