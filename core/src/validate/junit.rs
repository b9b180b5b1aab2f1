//! JUnit XML validator.

use std::sync::LazyLock;

use regex::Regex;

use super::{ValidationError, ValidationResult};

static ROOT_ELEMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<testsuites?[\s>/]").expect("static regex must compile")
});

/// Validates that the document's root element is `<testsuites>` or
/// `<testsuite>`.
///
/// A leading BOM, XML declaration, processing instructions, doctype and
/// comments are skipped before the root element is inspected.
///
/// # Examples
///
/// ```
/// use artifact_detective_core::validate_junit_xml;
///
/// let xml = r#"<?xml version="1.0"?>
/// <!-- generated -->
/// <testsuites tests="1"><testsuite name="a"/></testsuites>"#;
/// assert!(validate_junit_xml(xml).valid);
/// assert!(!validate_junit_xml("<html></html>").valid);
/// ```
pub fn validate_junit_xml(content: &str) -> ValidationResult {
    let Some(root) = skip_prolog(content) else {
        return ValidationResult::invalid(ValidationError::MissingField("root element"));
    };
    ValidationResult::check(ROOT_ELEMENT_RE.is_match(root), "JUnit XML")
}

// Returns the content starting at the root element, or `None` when the
// prolog is unterminated.
fn skip_prolog(content: &str) -> Option<&str> {
    let mut rest = content.trim_start_matches('\u{feff}').trim_start();
    loop {
        if let Some(after) = rest.strip_prefix("<?") {
            rest = after.split_once("?>")?.1.trim_start();
        } else if let Some(after) = rest.strip_prefix("<!--") {
            rest = after.split_once("-->")?.1.trim_start();
        } else if let Some(after) = rest.strip_prefix("<!") {
            rest = after.split_once('>')?.1.trim_start();
        } else {
            return Some(rest);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_testsuite_root_is_valid() {
        assert!(validate_junit_xml("<testsuite name=\"x\" tests=\"0\"/>").valid);
    }

    #[test]
    fn test_similar_root_name_is_rejected() {
        let result = validate_junit_xml("<testsuitesummary/>");
        assert_eq!(
            result.error.as_deref(),
            Some("Does not match JUnit XML output format")
        );
    }

    #[test]
    fn test_unterminated_comment_is_rejected() {
        assert!(!validate_junit_xml("<!-- never closed <testsuite/>").valid);
    }
}
