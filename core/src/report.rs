//! Canonical test-report shape produced by the normalizers.
//!
//! Every convertible report format (currently pytest-html) is reduced to
//! [`PytestReport`], the same structure `pytest-json-report` writes, so
//! downstream consumers handle a single shape.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Normalized outcome of one test.
///
/// Tool-specific labels are folded into the four canonical outcomes by
/// substring containment, in priority order `pass`, `fail`, `skip`,
/// `error`. Anything else is kept verbatim in [`TestOutcome::Other`].
///
/// # Examples
///
/// ```
/// use artifact_detective_core::TestOutcome;
///
/// assert_eq!(TestOutcome::from_label("Passed"), TestOutcome::Passed);
/// assert_eq!(TestOutcome::from_label("XFailed"), TestOutcome::Failed);
/// assert_eq!(TestOutcome::from_label("rerun"), TestOutcome::Other("rerun".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TestOutcome {
    Passed,
    Failed,
    Skipped,
    Error,
    Other(String),
}

impl TestOutcome {
    /// Maps a raw result label onto a canonical outcome.
    pub fn from_label(label: &str) -> Self {
        let lower = label.to_lowercase();
        if lower.contains("pass") {
            Self::Passed
        } else if lower.contains("fail") {
            Self::Failed
        } else if lower.contains("skip") {
            Self::Skipped
        } else if lower.contains("error") {
            Self::Error
        } else {
            Self::Other(lower)
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
            Self::Error => "error",
            Self::Other(label) => label,
        }
    }

    /// Returns `true` for outcomes that make the run fail.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed | Self::Error)
    }
}

impl From<String> for TestOutcome {
    fn from(value: String) -> Self {
        Self::from_label(&value)
    }
}

impl From<TestOutcome> for String {
    fn from(value: TestOutcome) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw phase record (`setup`, `call` or `teardown`) as the reporter wrote
/// it: `duration`, `outcome`, `longrepr` and whatever else it carries.
pub type TestPhase = Map<String, Value>;

/// One test in a normalized report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PytestTest {
    pub nodeid: String,
    pub outcome: TestOutcome,
    /// Seconds.
    pub duration: f64,
    /// Captured output, stack traces and assertion messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<String>,
    /// Media attachments (screenshots, videos, links).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extras: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup: Option<TestPhase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call: Option<TestPhase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teardown: Option<TestPhase>,
}

impl PytestTest {
    pub fn new(nodeid: impl Into<String>, outcome: TestOutcome, duration: f64) -> Self {
        Self {
            nodeid: nodeid.into(),
            outcome,
            duration,
            log: None,
            extras: None,
            setup: None,
            call: None,
            teardown: None,
        }
    }
}

/// Canonical test report.
///
/// `exit_code` is `1` when any test failed or errored, and `duration` is
/// the sum of per-test durations; [`PytestReport::from_tests`] maintains
/// both.
///
/// # Examples
///
/// ```
/// use artifact_detective_core::{PytestReport, PytestTest, TestOutcome};
///
/// let report = PytestReport::from_tests(
///     0.0,
///     "/repo",
///     Default::default(),
///     vec![
///         PytestTest::new("test_a.py::test_ok", TestOutcome::Passed, 0.5),
///         PytestTest::new("test_a.py::test_bad", TestOutcome::Failed, 1.0),
///     ],
/// );
/// assert_eq!(report.exit_code, 1);
/// assert_eq!(report.duration, 1.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PytestReport {
    /// Unix timestamp (seconds) of report creation.
    pub created: f64,
    pub duration: f64,
    pub exit_code: i32,
    pub root: String,
    #[serde(default)]
    pub environment: Map<String, Value>,
    pub tests: Vec<PytestTest>,
}

impl PytestReport {
    /// Builds a report, deriving `duration` and `exit_code` from `tests`.
    pub fn from_tests(
        created: f64,
        root: impl Into<String>,
        environment: Map<String, Value>,
        tests: Vec<PytestTest>,
    ) -> Self {
        let duration = tests.iter().map(|test| test.duration).sum();
        let exit_code = i32::from(tests.iter().any(|test| test.outcome.is_failure()));
        Self {
            created,
            duration,
            exit_code,
            root: root.into(),
            environment,
            tests,
        }
    }

    /// Counts tests with the given outcome.
    pub fn count(&self, outcome: &TestOutcome) -> usize {
        self.tests
            .iter()
            .filter(|test| &test.outcome == outcome)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_priority_prefers_pass_over_fail() {
        // "xpassed" and "passed-after-fail" both contain "pass" first in priority.
        assert_eq!(TestOutcome::from_label("XPassed"), TestOutcome::Passed);
        assert_eq!(TestOutcome::from_label("failed-pass"), TestOutcome::Passed);
        assert_eq!(TestOutcome::from_label("Skipped"), TestOutcome::Skipped);
        assert_eq!(TestOutcome::from_label("ERROR"), TestOutcome::Error);
    }

    #[test]
    fn test_outcome_serializes_as_plain_string() {
        let test = PytestTest::new("t::a", TestOutcome::Skipped, 0.0);
        let value = serde_json::to_value(&test).unwrap();
        assert_eq!(value["outcome"], "skipped");
        assert!(value.get("log").is_none());
    }

    #[test]
    fn test_phase_records_round_trip_untouched() {
        let raw = serde_json::json!({
            "nodeid": "t::a",
            "outcome": "failed",
            "duration": 1.0,
            "call": {"duration": "00:00:01", "longrepr": {"reprcrash": {"message": "boom"}}}
        });
        let test: PytestTest = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(test.call.as_ref().map(|call| call.len()), Some(2));
        assert_eq!(serde_json::to_value(&test).unwrap(), raw);
    }

    #[test]
    fn test_passing_report_has_zero_exit_code() {
        let report = PytestReport::from_tests(
            1.0,
            "",
            Map::new(),
            vec![PytestTest::new("t::a", TestOutcome::Passed, 2.0)],
        );
        assert_eq!(report.exit_code, 0);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["exitCode"], 0);
    }

    #[test]
    fn test_error_outcome_fails_the_report() {
        let report = PytestReport::from_tests(
            1.0,
            "",
            Map::new(),
            vec![PytestTest::new("t::a", TestOutcome::Error, 0.0)],
        );
        assert_eq!(report.exit_code, 1);
        assert_eq!(report.count(&TestOutcome::Error), 1);
    }
}
