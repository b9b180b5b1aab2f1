//! pytest-html → [`PytestReport`].
//!
//! pytest-html 3.x and later embed the whole report as JSON in the
//! `data-jsonblob` attribute of `#data-container`. Its `tests` field maps
//! each node id to the list of attempts (one per rerun).

use std::path::Path;
use std::sync::LazyLock;

use artifact_detective_core::{PytestReport, PytestTest, TestOutcome, TestPhase};
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::{Map, Value};
use tracing::debug;

use super::read_report;
use crate::error::NormalizeError;

static DATA_CONTAINER: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("#data-container").expect("static selector must compile")
});
static MILLIS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)?)\s*ms$").expect("static regex must compile")
});

/// Reads a pytest-html report and converts it to the canonical shape.
///
/// Returns `Ok(None)` when the file is not a pytest-html report with an
/// embedded data blob (including Playwright or plain HTML pages).
///
/// # Errors
///
/// Returns [`NormalizeError::Io`] when the file cannot be read.
pub fn extract_pytest_json(
    path: impl AsRef<Path>,
) -> Result<Option<PytestReport>, NormalizeError> {
    let html = read_report(path.as_ref())?;
    Ok(parse_pytest_html(&html))
}

/// Converts pytest-html markup already in memory.
pub fn parse_pytest_html(html: &str) -> Option<PytestReport> {
    let document = Html::parse_document(html);
    let blob = document
        .select(&DATA_CONTAINER)
        .next()?
        .value()
        .attr("data-jsonblob")
        .filter(|blob| !blob.is_empty())?;

    match serde_json::from_str::<Value>(blob) {
        Ok(data) => Some(convert_embedded(&data)),
        Err(err) => {
            debug!(error = %err, "data-jsonblob is not valid JSON");
            None
        }
    }
}

fn convert_embedded(data: &Value) -> PytestReport {
    let created = data
        .get("created")
        .and_then(Value::as_f64)
        .filter(|created| *created != 0.0)
        .unwrap_or_else(now_seconds);
    let root = data.get("root").and_then(Value::as_str).unwrap_or_default();
    let environment = data
        .get("environment")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    let tests = data
        .get("tests")
        .and_then(Value::as_object)
        .map(convert_tests)
        .unwrap_or_default();

    PytestReport::from_tests(created, root, environment, tests)
}

fn convert_tests(tests: &Map<String, Value>) -> Vec<PytestTest> {
    tests
        .iter()
        .filter_map(|(nodeid, attempts)| {
            // The last attempt is the final verdict after reruns.
            let last = attempts.as_array()?.last()?;
            Some(convert_attempt(nodeid, last))
        })
        .collect()
}

fn convert_attempt(nodeid: &str, attempt: &Value) -> PytestTest {
    let label = ["result", "outcome"]
        .iter()
        .filter_map(|key| attempt.get(*key).and_then(Value::as_str))
        .find(|label| !label.is_empty())
        .unwrap_or_default();
    let duration = attempt.get("duration").map_or(0.0, parse_duration);

    let mut test = PytestTest::new(nodeid, TestOutcome::from_label(label), duration);
    test.log = attempt
        .get("log")
        .and_then(Value::as_str)
        .filter(|log| !log.is_empty())
        .map(str::to_string);
    test.extras = attempt
        .get("extras")
        .and_then(Value::as_array)
        .filter(|extras| !extras.is_empty())
        .cloned();
    test.setup = phase(attempt, "setup");
    test.call = phase(attempt, "call");
    test.teardown = phase(attempt, "teardown");
    test
}

// Copied verbatim; reporters disagree on the types inside.
fn phase(attempt: &Value, key: &str) -> Option<TestPhase> {
    attempt
        .get(key)
        .and_then(Value::as_object)
        .filter(|phase| !phase.is_empty())
        .cloned()
}

/// Parses a duration given as seconds, `"HH:MM:SS"` or `"N ms"`.
/// Anything else counts as zero.
fn parse_duration(value: &Value) -> f64 {
    match value {
        Value::Number(seconds) => seconds.as_f64().unwrap_or_default(),
        Value::String(text) => {
            let text = text.trim();
            if let Some(millis) = MILLIS_RE.captures(text) {
                return millis[1].parse::<f64>().map_or(0.0, |ms| ms / 1000.0);
            }
            let parts = text
                .split(':')
                .map(|part| part.trim().parse::<f64>())
                .collect::<Result<Vec<_>, _>>();
            match parts.as_deref() {
                Ok([hours, minutes, seconds]) => hours * 3600.0 + minutes * 60.0 + seconds,
                _ => 0.0,
            }
        }
        _ => 0.0,
    }
}

fn now_seconds() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report_html(blob: &Value) -> String {
        let escaped = blob
            .to_string()
            .replace('&', "&amp;")
            .replace('"', "&#34;");
        format!(
            "<html><head><title>report.html</title></head><body>\
             <p>Report generated by pytest-html</p>\
             <div id=\"data-container\" data-jsonblob=\"{escaped}\"></div></body></html>"
        )
    }

    #[test]
    fn test_durations() {
        assert_eq!(parse_duration(&json!(1.5)), 1.5);
        assert_eq!(parse_duration(&json!("00:01:05")), 65.0);
        assert_eq!(parse_duration(&json!("01:00:00")), 3600.0);
        assert_eq!(parse_duration(&json!("250 ms")), 0.25);
        assert_eq!(parse_duration(&json!("soon")), 0.0);
        assert_eq!(parse_duration(&json!(null)), 0.0);
    }

    #[test]
    fn test_last_attempt_wins() {
        let blob = json!({
            "environment": {"Python": "3.11.7"},
            "tests": {
                "test_flaky.py::test_retry": [
                    {"result": "Failed", "duration": "00:00:01", "log": "first try"},
                    {"result": "Passed", "duration": "00:00:02", "log": ""}
                ]
            }
        });
        let report = parse_pytest_html(&report_html(&blob)).unwrap();
        assert_eq!(report.tests.len(), 1);
        let test = &report.tests[0];
        assert_eq!(test.outcome, TestOutcome::Passed);
        assert_eq!(test.duration, 2.0);
        assert_eq!(test.log, None);
        assert_eq!(report.exit_code, 0);
        assert_eq!(report.environment["Python"], "3.11.7");
    }

    #[test]
    fn test_outcome_falls_back_to_outcome_field() {
        let blob = json!({
            "created": 1700000000.5,
            "root": "/repo",
            "tests": {
                "t.py::a": [{"outcome": "error", "duration": 0.5}],
                "t.py::b": [{"result": "XFailed", "duration": 0.25}],
                "t.py::c": []
            }
        });
        let report = parse_pytest_html(&report_html(&blob)).unwrap();
        assert_eq!(report.created, 1700000000.5);
        assert_eq!(report.root, "/repo");
        assert_eq!(report.tests.len(), 2);
        assert_eq!(report.tests[0].outcome, TestOutcome::Error);
        assert_eq!(report.tests[1].outcome, TestOutcome::Failed);
        assert_eq!(report.duration, 0.75);
        assert_eq!(report.exit_code, 1);
    }

    #[test]
    fn test_phases_and_extras_are_copied() {
        let blob = json!({
            "tests": {
                "t.py::a": [{
                    "result": "Passed",
                    "extras": [{"name": "screenshot", "format_type": "image"}],
                    "call": {"duration": 0.1, "outcome": "passed"},
                    "setup": "not-an-object"
                }]
            }
        });
        let report = parse_pytest_html(&report_html(&blob)).unwrap();
        let test = &report.tests[0];
        assert_eq!(test.extras.as_ref().map(Vec::len), Some(1));
        assert_eq!(test.call.as_ref().map(|call| &call["outcome"]), Some(&json!("passed")));
        assert!(test.setup.is_none());
    }

    #[test]
    fn test_phases_keep_every_field_verbatim() {
        let call = json!({
            "duration": "00:00:01",
            "outcome": "failed",
            "longrepr": {"reprcrash": {"message": "boom"}},
            "sections": [["Captured stdout call", "hello"]]
        });
        let blob = json!({
            "tests": {
                "t.py::a": [{
                    "result": "Failed",
                    "call": call.clone(),
                    "teardown": {}
                }]
            }
        });
        let report = parse_pytest_html(&report_html(&blob)).unwrap();
        let test = &report.tests[0];
        assert_eq!(test.call.clone().map(Value::Object), Some(call));
        assert!(test.teardown.is_none());

        let value = serde_json::to_value(test).unwrap();
        assert_eq!(value["call"]["longrepr"]["reprcrash"]["message"], "boom");
    }

    #[test]
    fn test_named_entities_in_blob_are_decoded() {
        let html = concat!(
            r#"<div id="data-container" data-jsonblob="{&quot;tests&quot;: {&quot;t.py::a&quot;: "#,
            r#"[{&quot;result&quot;: &quot;Failed&quot;, &quot;log&quot;: &quot;caf&eacute; &hellip; &mdash;&quot;}]}}">"#,
            "</div>",
        );
        let report = parse_pytest_html(html).unwrap();
        assert_eq!(report.tests[0].log.as_deref(), Some("caf\u{e9} \u{2026} \u{2014}"));
    }

    #[test]
    fn test_missing_created_uses_current_time() {
        let report = parse_pytest_html(&report_html(&json!({"tests": {}}))).unwrap();
        assert!(report.created > 1_600_000_000.0);
        assert!(report.tests.is_empty());
    }

    #[test]
    fn test_invalid_blob_is_not_a_report() {
        let html = r#"<div id="data-container" data-jsonblob="{not json"></div>"#;
        assert!(parse_pytest_html(html).is_none());
        assert!(parse_pytest_html("<html><body>pytest-html</body></html>").is_none());
    }
}
