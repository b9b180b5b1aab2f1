//! CI log line normalization.
//!
//! Runner logs decorate tool output: GitHub Actions prefixes every line
//! with an RFC 3339 timestamp and tools emit ANSI color codes. Both are
//! stripped before any line pattern is applied.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static ANSI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").expect("static regex must compile")
});

static TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\.\d+)?Z ?")
        .expect("static regex must compile")
});

/// Log split into cleaned lines.
#[derive(Debug)]
pub(crate) struct LogLines {
    pub lines: Vec<String>,
    /// `true` when the text carries runner decoration (timestamps or
    /// `##[...]` workflow commands), i.e. it is a whole CI log rather than
    /// a tool's raw output.
    pub is_ci_log: bool,
}

impl LogLines {
    pub fn parse(content: &str) -> Self {
        let mut is_ci_log = false;
        let lines = content
            .lines()
            .map(|raw| {
                let raw = raw.trim_end_matches('\r');
                let stamped = TIMESTAMP_RE.find(raw).map_or(raw, |m| &raw[m.end()..]);
                let line = strip_ansi(stamped);
                if stamped.len() != raw.len() || is_workflow_command(&line) {
                    is_ci_log = true;
                }
                line.into_owned()
            })
            .collect();
        Self { lines, is_ci_log }
    }

    /// Cleaned content, lines joined by `\n`, trimmed.
    pub fn joined(&self) -> String {
        self.lines.join("\n").trim().to_string()
    }
}

pub(crate) fn strip_ansi(line: &str) -> Cow<'_, str> {
    ANSI_RE.replace_all(line, "")
}

/// `##[group]`, `##[error]` and friends.
pub(crate) fn is_workflow_command(line: &str) -> bool {
    line.starts_with("##[")
}
