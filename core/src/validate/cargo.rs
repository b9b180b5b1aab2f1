//! `cargo test` text output validator.

use std::sync::LazyLock;

use regex::Regex;

use super::ValidationResult;

static RUNNING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)running\s+\d+\s+tests?").expect("static regex must compile"));
static RESULT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)test result:\s+(ok|FAILED)\.").expect("static regex must compile")
});
static TEST_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)test\s+\S+\s+\.\.\.\s+(ok|FAILED|ignored)").expect("static regex must compile")
});

/// Validates libtest output as printed by `cargo test`.
///
/// Accepts either the `running N tests` header together with a
/// `test result: ok.`/`FAILED.` summary, or at least one individual
/// `test path ... ok|FAILED|ignored` line. The second form alone is enough,
/// which keeps truncated logs without a summary valid.
///
/// # Examples
///
/// ```
/// use artifact_detective_core::validate_cargo_test_output;
///
/// let summary = "running 2 tests\n\ntest result: ok. 2 passed; 0 failed";
/// assert!(validate_cargo_test_output(summary).valid);
/// assert!(!validate_cargo_test_output("Compiling demo v0.1.0").valid);
/// ```
pub fn validate_cargo_test_output(content: &str) -> ValidationResult {
    let summary = RUNNING_RE.is_match(content) && RESULT_RE.is_match(content);
    ValidationResult::check(summary || TEST_LINE_RE.is_match(content), "cargo test")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_individual_line_without_summary_is_valid() {
        let truncated = "test parser::tests::test_parse ... FAILED\n";
        assert!(validate_cargo_test_output(truncated).valid);
    }

    #[test]
    fn test_header_without_result_is_invalid() {
        let result = validate_cargo_test_output("running 3 tests\n");
        assert!(!result.valid);
        assert_eq!(
            result.error.as_deref(),
            Some("Does not match cargo test output format")
        );
    }

    #[test]
    fn test_ignored_tests_count_as_test_lines() {
        assert!(validate_cargo_test_output("test slow::bench ... ignored").valid);
    }
}
