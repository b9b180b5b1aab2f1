//! Marker-bounded extraction for user-configured artifact types.

use regex::Regex;

use super::loglines::LogLines;
use super::slice::Slice;

/// Start/end markers that override the built-in rule for a type.
///
/// The start-marker line itself is never captured. Without a start marker
/// capture begins at the first line; without an end marker (or when it
/// never matches) capture runs to the end of the log.
#[derive(Debug, Clone, Default)]
pub struct ExtractorConfig {
    pub start_marker: Option<Regex>,
    pub end_marker: Option<Regex>,
    /// Keep the line that matched `end_marker`.
    pub include_end_marker: bool,
}

impl ExtractorConfig {
    pub(crate) fn slice(&self, log: &LogLines) -> Option<Slice> {
        let begin = match &self.start_marker {
            Some(marker) => log.lines.iter().position(|line| marker.is_match(line))? + 1,
            None => 0,
        };

        let mut end = log.lines.len();
        if let Some(marker) = &self.end_marker {
            if let Some(offset) = log.lines[begin..]
                .iter()
                .position(|line| marker.is_match(line))
            {
                end = begin + offset + usize::from(self.include_end_marker);
            }
        }

        let region = &log.lines[begin..end];
        let is_text = |line: &String| !line.trim().is_empty();
        let first = region.iter().position(is_text)?;
        let last = region.iter().rposition(is_text)?;
        Some(Slice {
            first: begin + first,
            last: begin + last,
            content: region[first..=last].join("\n"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(start: Option<&str>, end: Option<&str>, include_end: bool) -> ExtractorConfig {
        ExtractorConfig {
            start_marker: start.map(|p| Regex::new(p).unwrap()),
            end_marker: end.map(|p| Regex::new(p).unwrap()),
            include_end_marker: include_end,
        }
    }

    const LOG: &str = "setup\n=== BEGIN ===\n\nline one\nline two\n=== END ===\nteardown\n";

    #[test]
    fn test_between_markers_excluding_end() {
        let log = LogLines::parse(LOG);
        let slice = config(Some("BEGIN"), Some("END"), false)
            .slice(&log)
            .unwrap();
        assert_eq!(slice.content, "line one\nline two");
        assert_eq!((slice.first, slice.last), (3, 4));
    }

    #[test]
    fn test_end_marker_can_be_kept() {
        let log = LogLines::parse(LOG);
        let slice = config(Some("BEGIN"), Some("END"), true)
            .slice(&log)
            .unwrap();
        assert_eq!(slice.content, "line one\nline two\n=== END ===");
    }

    #[test]
    fn test_missing_start_marker_yields_nothing() {
        let log = LogLines::parse(LOG);
        assert!(config(Some("NOPE"), None, false).slice(&log).is_none());
    }

    #[test]
    fn test_without_markers_takes_everything() {
        let log = LogLines::parse(LOG);
        let slice = ExtractorConfig::default().slice(&log).unwrap();
        assert_eq!(slice.first, 0);
        assert!(slice.content.ends_with("teardown"));
    }

    #[test]
    fn test_empty_region_yields_nothing() {
        let log = LogLines::parse("BEGIN\n\nEND\n");
        assert!(config(Some("BEGIN"), Some("END"), false).slice(&log).is_none());
    }
}
