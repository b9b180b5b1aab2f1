//! Playwright HTML report → embedded JSON report.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use tracing::debug;

use super::read_report;
use crate::error::NormalizeError;

static REPORT_ASSIGNMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)window\.playwrightReport\s*=\s*(\{.*\});?")
        .expect("static regex must compile")
});

static DATA_SCRIPT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script#data").expect("static selector must compile"));
static GZIPPED_REPORT: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"[data-testid="report-gzipped"]"#).expect("static selector must compile")
});
static JSON_SCRIPTS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"script[type="application/json"]"#).expect("static selector must compile")
});

/// Reads a Playwright HTML report and returns the JSON report embedded in
/// it, or `Ok(None)` when no location holds a parseable JSON object.
///
/// # Errors
///
/// Returns [`NormalizeError::Io`] when the file cannot be read.
pub fn extract_playwright_json(path: impl AsRef<Path>) -> Result<Option<Value>, NormalizeError> {
    let html = read_report(path.as_ref())?;
    Ok(parse_playwright_html(&html))
}

/// Searches markup already in memory. Locations are tried in order:
/// the `window.playwrightReport` assignment in `<script id="data">`, the
/// `data-report` attribute of the `report-gzipped` element, then every
/// `<script type="application/json">`.
pub fn parse_playwright_html(html: &str) -> Option<Value> {
    let document = Html::parse_document(html);
    from_report_script(&document)
        .or_else(|| from_report_attribute(&document))
        .or_else(|| from_json_scripts(&document))
}

fn from_report_script(document: &Html) -> Option<Value> {
    let body = script_text(document.select(&DATA_SCRIPT).next()?);
    let assignment = REPORT_ASSIGNMENT_RE.captures(&body)?;
    parse_object(&assignment[1], "window.playwrightReport")
}

fn from_report_attribute(document: &Html) -> Option<Value> {
    let container = document.select(&GZIPPED_REPORT).next()?;
    // Recent Playwright versions store a base64 zip here; that is not
    // parseable and falls through.
    parse_object(container.value().attr("data-report")?, "data-report")
}

fn from_json_scripts(document: &Html) -> Option<Value> {
    document
        .select(&JSON_SCRIPTS)
        .find_map(|script| parse_object(script_text(script).trim(), "application/json script"))
}

fn script_text(script: ElementRef<'_>) -> String {
    script.text().collect()
}

fn parse_object(text: &str, location: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(text) {
        Ok(value @ Value::Object(_)) => Some(value),
        Ok(_) => {
            debug!(location, "embedded JSON is not an object");
            None
        }
        Err(err) => {
            debug!(location, error = %err, "embedded JSON does not parse");
            None
        }
    }
}
