//! Two-phase line slicing shared by every linter extractor.
//!
//! A rule first checks whether the input already *is* the tool's raw
//! output (no runner decoration and at least one signature line); if so
//! the whole input is returned. Otherwise the log is scanned for a start
//! banner, after which lines are captured until a terminator or the next
//! workflow command.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::loglines::{LogLines, is_workflow_command};

pub(crate) type LinePredicate = fn(&str) -> bool;

/// Per-tool slicing rule.
pub(crate) struct SliceRule {
    /// Signature of the tool's own output lines. `None` disables the raw
    /// fast path.
    pub raw_signature: Option<LinePredicate>,
    /// Substrings that mark the line invoking the tool.
    pub banners: &'static [&'static str],
    /// Extra banner pattern for invocations substrings cannot express.
    pub banner_pattern: Option<&'static LazyLock<Regex>>,
    /// Decides whether a line after the banner belongs to the output. The
    /// flag is `true` once at least one line has been captured.
    pub capture: fn(&str, bool) -> bool,
    /// Summary line that ends the output and is kept.
    pub terminator: Option<LinePredicate>,
}

/// Captured region of a log. Indices are 0-based into [`LogLines::lines`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Slice {
    pub first: usize,
    pub last: usize,
    pub content: String,
}

impl Slice {
    /// The whole (trimmed) log, or `None` when it is blank.
    pub fn whole(log: &LogLines) -> Option<Self> {
        let is_text = |line: &String| !line.trim().is_empty();
        let first = log.lines.iter().position(is_text)?;
        let last = log.lines.iter().rposition(is_text)?;
        Some(Self {
            first,
            last,
            content: log.joined(),
        })
    }

    /// Like [`Slice::whole`], but blank input gives an empty slice on the
    /// first line. A clean rustfmt run prints nothing, and that is valid
    /// output.
    pub fn passthrough(log: &LogLines) -> Self {
        Self::whole(log).unwrap_or(Self {
            first: 0,
            last: 0,
            content: String::new(),
        })
    }
}

impl SliceRule {
    fn is_banner(&self, line: &str) -> bool {
        self.banners.iter().any(|banner| line.contains(banner))
            || self
                .banner_pattern
                .is_some_and(|pattern| pattern.is_match(line))
    }

    pub fn apply(&self, log: &LogLines) -> Option<Slice> {
        if !log.is_ci_log {
            if let Some(signature) = self.raw_signature {
                if log.lines.iter().any(|line| signature(line)) {
                    debug!(lines = log.lines.len(), "input is raw tool output");
                    return Slice::whole(log);
                }
            }
        }

        // A banner can match incidental text (an install line naming the
        // tool); move on to the next one when nothing follows it.
        let mut from = 0;
        while let Some(offset) = log.lines[from..].iter().position(|line| self.is_banner(line)) {
            let start = from + offset;
            if let Some(slice) = self.capture_after(log, start) {
                return Some(slice);
            }
            from = start + 1;
        }
        None
    }

    fn capture_after(&self, log: &LogLines, start: usize) -> Option<Slice> {
        let mut captured = Vec::new();

        for (index, line) in log.lines.iter().enumerate().skip(start + 1) {
            if is_workflow_command(line) {
                if line.starts_with("##[endgroup]") {
                    continue;
                }
                break;
            }
            if self.terminator.is_some_and(|terminator| terminator(line)) {
                captured.push(index);
                break;
            }
            if (self.capture)(line, !captured.is_empty()) {
                captured.push(index);
            }
        }

        debug!(start, captured = captured.len(), "sliced tool output from CI log");
        let (&first, &last) = (captured.first()?, captured.last()?);
        let content = captured
            .iter()
            .map(|&index| log.lines[index].as_str())
            .collect::<Vec<_>>()
            .join("\n");
        Some(Slice {
            first,
            last,
            content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static RUN_TOOL_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^run-tool").expect("static regex must compile"));

    fn is_error(line: &str) -> bool {
        line.starts_with("E:")
    }

    fn capture_error(line: &str, _: bool) -> bool {
        is_error(line)
    }

    fn is_done(line: &str) -> bool {
        line.starts_with("done")
    }

    fn rule() -> SliceRule {
        SliceRule {
            raw_signature: Some(is_error),
            banners: &["tool --check"],
            banner_pattern: Some(&RUN_TOOL_RE),
            capture: capture_error,
            terminator: Some(is_done),
        }
    }

    #[test]
    fn test_raw_output_is_returned_whole() {
        let log = LogLines::parse("\nE: one\nnoise\n");
        let slice = rule().apply(&log).unwrap();
        assert_eq!(slice.content, "E: one\nnoise");
        assert_eq!((slice.first, slice.last), (1, 2));
    }

    #[test]
    fn test_ci_log_is_sliced_between_banner_and_terminator() {
        let log = LogLines::parse(concat!(
            "##[group]Run tool --check\n",
            "##[endgroup]\n",
            "E: one\n",
            "noise\n",
            "E: two\n",
            "done, 2 issues\n",
            "E: after\n",
        ));
        let slice = rule().apply(&log).unwrap();
        assert_eq!(slice.content, "E: one\nE: two\ndone, 2 issues");
        assert_eq!((slice.first, slice.last), (2, 5));
    }

    #[test]
    fn test_workflow_command_stops_capture_exclusively() {
        let log = LogLines::parse(
            "run-tool .\nE: one\n##[error]Process completed with exit code 1.\nE: two\n",
        );
        let slice = rule().apply(&log).unwrap();
        assert_eq!(slice.content, "E: one");
    }

    #[test]
    fn test_empty_banner_falls_through_to_the_next() {
        let log = LogLines::parse(concat!(
            "##[group]Install\n",
            "installed tool --check helper\n",
            "##[endgroup]\n",
            "##[group]Run tool --check\n",
            "E: one\n",
        ));
        let slice = rule().apply(&log).unwrap();
        assert_eq!(slice.content, "E: one");
        assert_eq!(slice.first, 4);
    }

    #[test]
    fn test_passthrough_of_blank_log_is_empty() {
        let slice = Slice::passthrough(&LogLines::parse("\n  \n"));
        assert_eq!(slice.content, "");
        assert_eq!((slice.first, slice.last), (0, 0));

        let slice = Slice::passthrough(&LogLines::parse("\nrunning 1 test\n"));
        assert_eq!(slice.content, "running 1 test");
        assert_eq!(slice.first, 1);
    }

    #[test]
    fn test_missing_banner_yields_nothing() {
        let log = LogLines::parse("##[group]Run other\nE: one\n");
        assert!(rule().apply(&log).is_none());
    }
}
