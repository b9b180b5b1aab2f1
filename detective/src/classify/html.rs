//! HTML report signatures.

use artifact_detective_core::ArtifactType;

const PYTEST_HTML_MARKERS: [&str; 2] = ["pytest-html", "pypi.python.org/pypi/pytest-html"];

const PLAYWRIGHT_HTML_MARKERS: [&str; 4] = [
    "playwright test report",
    "playwright-report",
    "playwright.dev",
    "@playwright/test",
];

/// Classifies lowercased HTML. First matching signature wins; pytest-html
/// is checked first because its reports of Playwright suites mention both
/// tools.
pub(super) fn detect_html(lower: &str) -> ArtifactType {
    if PYTEST_HTML_MARKERS.iter().any(|marker| lower.contains(marker)) {
        ArtifactType::PytestHtml
    } else if PLAYWRIGHT_HTML_MARKERS
        .iter()
        .any(|marker| lower.contains(marker))
    {
        ArtifactType::PlaywrightHtml
    } else if lower.contains("jest-html")
        || (lower.contains("jest") && lower.contains("test results"))
    {
        ArtifactType::JestHtml
    } else {
        ArtifactType::Unknown
    }
}
