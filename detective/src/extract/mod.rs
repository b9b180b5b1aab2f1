//! Tool output extraction from CI logs.
//!
//! Plain-text linter output rarely ships as a standalone artifact; it is
//! buried in a job log between runner chatter. Each supported tool has a
//! slicing rule (see [`LinterFamily`]) that finds the invocation banner
//! and keeps only the lines the tool printed. Input that is already raw
//! tool output is returned whole.
//!
//! # Examples
//!
//! ```
//! use artifact_detective::{LinterFamily, detect_linter_type, extract_linter_output};
//!
//! let log = "\
//! ##[group]Run npm run lint
//! npm run lint
//! ##[endgroup]
//! /repo/src/index.js
//!   3:7  error  'unused' is assigned a value but never used  no-unused-vars
//!
//! ✖ 1 problem (1 error, 0 warnings)
//! ##[error]Process completed with exit code 1.
//! ";
//!
//! assert_eq!(detect_linter_type("lint", log), Some(LinterFamily::Eslint));
//! let output = extract_linter_output("eslint-txt", log).unwrap();
//! assert!(output.starts_with("/repo/src/index.js"));
//! assert!(output.ends_with("✖ 1 problem (1 error, 0 warnings)"));
//! ```

mod loglines;
mod markers;
mod rules;
mod slice;

use std::fmt;
use std::sync::LazyLock;

use artifact_detective_core::{
    ArtifactDescriptor, ArtifactType, CARGO_MESSAGE_REASONS, LinterMatch, ValidationResult,
    capabilities,
};
use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use crate::classify::validate_if_supported;

pub use markers::ExtractorConfig;

use loglines::LogLines;
use slice::Slice;

/// Number of leading log characters inspected by [`detect_linter_type`].
const LINTER_DETECTION_WINDOW: usize = 1000;

/// Tools whose output can be located in a CI log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinterFamily {
    Eslint,
    Prettier,
    Ruff,
    Flake8,
    Isort,
    Black,
    Tsc,
    Mypy,
    Pylint,
    Clippy,
    CargoTest,
    Rustfmt,
}

impl LinterFamily {
    pub const ALL: [LinterFamily; 12] = [
        Self::Eslint,
        Self::Prettier,
        Self::Ruff,
        Self::Flake8,
        Self::Isort,
        Self::Black,
        Self::Tsc,
        Self::Mypy,
        Self::Pylint,
        Self::Clippy,
        Self::CargoTest,
        Self::Rustfmt,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eslint => "eslint",
            Self::Prettier => "prettier",
            Self::Ruff => "ruff",
            Self::Flake8 => "flake8",
            Self::Isort => "isort",
            Self::Black => "black",
            Self::Tsc => "tsc",
            Self::Mypy => "mypy",
            Self::Pylint => "pylint",
            Self::Clippy => "clippy",
            Self::CargoTest => "cargo-test",
            Self::Rustfmt => "rustfmt",
        }
    }

    /// Resolves a linter name or artifact type tag (`eslint`, `eslint-txt`,
    /// `clippy-json`).
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.strip_suffix("-txt").unwrap_or(tag);
        let tag = tag.strip_suffix("-json").unwrap_or(tag);
        Self::ALL.into_iter().find(|family| family.as_str() == tag)
    }

    /// The tool that produces plain-text artifacts of `artifact_type`.
    pub fn for_artifact_type(artifact_type: ArtifactType) -> Option<Self> {
        match artifact_type {
            ArtifactType::EslintTxt => Some(Self::Eslint),
            ArtifactType::TscTxt => Some(Self::Tsc),
            ArtifactType::RuffTxt => Some(Self::Ruff),
            ArtifactType::MypyTxt => Some(Self::Mypy),
            ArtifactType::Flake8Txt => Some(Self::Flake8),
            ArtifactType::CargoTestTxt => Some(Self::CargoTest),
            ArtifactType::ClippyTxt => Some(Self::Clippy),
            ArtifactType::RustfmtTxt => Some(Self::Rustfmt),
            _ => None,
        }
    }

    fn slice(self, log: &LogLines) -> Option<Slice> {
        match rules::slice_rule(self) {
            Some(rule) => rule.apply(log),
            None => Some(Slice::passthrough(log)),
        }
    }
}

impl fmt::Display for LinterFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Priority order: job names often mention several tools.
const DETECTION_PATTERNS: [(LinterFamily, &[&str]); 12] = [
    (LinterFamily::Eslint, &["eslint", "npm run lint"]),
    (LinterFamily::Prettier, &["prettier", "npm run format"]),
    (LinterFamily::Ruff, &["ruff check", r"ruff\s"]),
    (LinterFamily::Flake8, &["flake8"]),
    (LinterFamily::Isort, &["isort"]),
    (LinterFamily::Black, &["black --check", r"black\s"]),
    (LinterFamily::Tsc, &["tsc --noEmit", "npm run type-check"]),
    (LinterFamily::Mypy, &["mypy"]),
    (LinterFamily::Pylint, &["pylint"]),
    (LinterFamily::Clippy, &["cargo clippy", "clippy"]),
    (LinterFamily::Rustfmt, &["cargo fmt", "rustfmt"]),
    (LinterFamily::CargoTest, &["cargo test"]),
];

static DETECTION_RULES: LazyLock<Vec<(LinterFamily, Vec<Regex>)>> = LazyLock::new(|| {
    DETECTION_PATTERNS
        .iter()
        .map(|(family, patterns)| {
            let regexes = patterns
                .iter()
                .map(|p| Regex::new(&format!("(?i){p}")).expect("static regex must compile"))
                .collect();
            (*family, regexes)
        })
        .collect()
});

/// Guesses which linter a job ran from its name and the head of its log.
pub fn detect_linter_type(job_name: &str, log: &str) -> Option<LinterFamily> {
    let head = match log.char_indices().nth(LINTER_DETECTION_WINDOW) {
        Some((end, _)) => &log[..end],
        None => log,
    };
    let combined = format!("{job_name}\n{head}");

    DETECTION_RULES
        .iter()
        .find(|(_, patterns)| patterns.iter().any(|p| p.is_match(&combined)))
        .map(|(family, _)| *family)
}

/// Extracts the output of `linter_type` (a linter name or artifact type
/// tag) from `log`. Returns `None` for unsupported tools or when nothing
/// was found.
pub fn extract_linter_output(linter_type: &str, log: &str) -> Option<String> {
    locate_linter_output(linter_type, log).map(|found| found.content)
}

/// Like [`extract_linter_output`], also reporting where the output sits.
///
/// # Examples
///
/// ```
/// use artifact_detective::locate_linter_output;
///
/// let log = "setup\n##[group]Run mypy src\n##[endgroup]\nsrc/a.py:3: error: Bad\nFound 1 error in 1 file\n";
/// let found = locate_linter_output("mypy", log).unwrap();
/// assert_eq!((found.start_line, found.end_line), (4, 5));
/// assert_eq!(found.linter_type, "mypy");
/// ```
pub fn locate_linter_output(linter_type: &str, log: &str) -> Option<LinterMatch> {
    let Some(family) = LinterFamily::from_tag(linter_type) else {
        debug!(linter_type, "no extractor for linter type");
        return None;
    };
    let slice = family.slice(&LogLines::parse(log))?;
    Some(to_match(family.as_str(), slice))
}

fn to_match(linter_type: &str, slice: Slice) -> LinterMatch {
    LinterMatch {
        linter_type: linter_type.to_string(),
        start_line: slice.first + 1,
        end_line: slice.last + 1,
        content: slice.content,
    }
}

/// Options for [`extract`].
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Marker-based slicing that replaces the built-in rule.
    pub config: Option<ExtractorConfig>,
}

/// An artifact cut out of a log, with registry metadata and the
/// validator's verdict.
#[derive(Debug, Clone)]
pub struct ExtractedArtifact {
    pub artifact_type: ArtifactType,
    pub content: String,
    pub descriptor: &'static ArtifactDescriptor,
    /// `None` when the type has no validator.
    pub validation: Option<ValidationResult>,
    /// Where the artifact sits in the log.
    pub location: LinterMatch,
}

/// Extracts an artifact of `artifact_type` from `log`.
///
/// Configured markers take precedence; otherwise the type's built-in rule
/// applies. `clippy-json` is rebuilt from the cargo JSON message lines in
/// the log. Types without a rule need markers.
pub fn extract(
    artifact_type: ArtifactType,
    log: &str,
    options: &ExtractOptions,
) -> Option<ExtractedArtifact> {
    let lines = LogLines::parse(log);
    let slice = match &options.config {
        Some(config) => config.slice(&lines),
        None if artifact_type == ArtifactType::ClippyJson => cargo_messages(&lines),
        None => match LinterFamily::for_artifact_type(artifact_type) {
            Some(family) => family.slice(&lines),
            None => {
                debug!(%artifact_type, "no built-in extractor; configure markers");
                None
            }
        },
    }?;

    let validation = validate_if_supported(artifact_type, &slice.content);
    if let Some(result) = validation.as_ref().filter(|result| !result.valid) {
        warn!(
            %artifact_type,
            error = result.error.as_deref().unwrap_or_default(),
            "extracted output failed validation"
        );
    }

    let content = slice.content.clone();
    Some(ExtractedArtifact {
        artifact_type,
        content,
        descriptor: &capabilities(artifact_type).descriptor,
        validation,
        location: to_match(artifact_type.as_str(), slice),
    })
}

/// Collects cargo `--message-format=json` lines into an NDJSON slice.
fn cargo_messages(log: &LogLines) -> Option<Slice> {
    let indices = log
        .lines
        .iter()
        .enumerate()
        .filter(|(_, line)| is_cargo_message(line))
        .map(|(index, _)| index)
        .collect::<Vec<_>>();

    let (&first, &last) = (indices.first()?, indices.last()?);
    let content = indices
        .iter()
        .map(|&index| log.lines[index].trim())
        .collect::<Vec<_>>()
        .join("\n");
    Some(Slice {
        first,
        last,
        content,
    })
}

fn is_cargo_message(line: &str) -> bool {
    let line = line.trim();
    line.starts_with('{')
        && serde_json::from_str::<Value>(line).is_ok_and(|message| {
            message
                .get("reason")
                .and_then(Value::as_str)
                .is_some_and(|reason| CARGO_MESSAGE_REASONS.contains(&reason))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag_strips_type_suffixes() {
        assert_eq!(LinterFamily::from_tag("eslint-txt"), Some(LinterFamily::Eslint));
        assert_eq!(LinterFamily::from_tag("clippy-json"), Some(LinterFamily::Clippy));
        assert_eq!(
            LinterFamily::from_tag("cargo-test-txt"),
            Some(LinterFamily::CargoTest)
        );
        assert_eq!(LinterFamily::from_tag("gradle"), None);
    }

    #[test]
    fn test_detection_priority_prefers_eslint() {
        assert_eq!(
            detect_linter_type("lint (eslint + prettier)", ""),
            Some(LinterFamily::Eslint)
        );
        assert_eq!(
            detect_linter_type("format", "Run prettier --check ."),
            Some(LinterFamily::Prettier)
        );
        assert_eq!(
            detect_linter_type("typecheck", "npm run type-check"),
            Some(LinterFamily::Tsc)
        );
        assert_eq!(detect_linter_type("build", "cargo build"), None);
    }

    #[test]
    fn test_detection_only_reads_log_head() {
        let log = format!("{}\nmypy src", "x".repeat(2000));
        assert_eq!(detect_linter_type("checks", &log), None);
        assert_eq!(detect_linter_type("mypy", &log), Some(LinterFamily::Mypy));
    }

    #[test]
    fn test_detection_window_respects_char_boundaries() {
        let log = "é".repeat(1500);
        assert_eq!(detect_linter_type("job", &log), None);
    }

    #[test]
    fn test_unknown_linter_extracts_nothing() {
        assert_eq!(extract_linter_output("gradle", "BUILD FAILED"), None);
    }

    #[test]
    fn test_passthrough_returns_trimmed_content() {
        let output = "\n\ntest tests::ok ... ok\n\ntest result: ok. 1 passed\n\n";
        assert_eq!(
            extract_linter_output("cargo-test", output).as_deref(),
            Some("test tests::ok ... ok\n\ntest result: ok. 1 passed")
        );
    }

    #[test]
    fn test_clean_rustfmt_run_is_valid_empty_output() {
        assert_eq!(extract_linter_output("rustfmt-txt", "").as_deref(), Some(""));

        let artifact = extract(ArtifactType::RustfmtTxt, "\n\n", &ExtractOptions::default()).unwrap();
        assert_eq!(artifact.content, "");
        assert_eq!(artifact.location.start_line, 1);
        assert_eq!(artifact.validation.map(|v| v.valid), Some(true));
    }

    #[test]
    fn test_clippy_json_is_rebuilt_from_log_lines() {
        let log = concat!(
            "2024-01-01T00:00:00.0000000Z ##[group]Run cargo clippy --message-format=json\n",
            "2024-01-01T00:00:01.0000000Z    Compiling demo v0.1.0\n",
            "2024-01-01T00:00:02.0000000Z {\"reason\":\"compiler-message\",\"message\":{\"level\":\"warning\",\"spans\":[]}}\n",
            "2024-01-01T00:00:03.0000000Z {\"reason\":\"build-finished\",\"success\":true}\n",
        );
        let artifact = extract(ArtifactType::ClippyJson, log, &ExtractOptions::default()).unwrap();
        assert_eq!(artifact.content.lines().count(), 2);
        assert_eq!(artifact.location.start_line, 3);
        assert_eq!(artifact.validation.map(|v| v.valid), Some(true));
    }

    #[test]
    fn test_types_without_rule_need_markers() {
        let log = "<testsuite name=\"x\"></testsuite>";
        assert!(extract(ArtifactType::JunitXml, log, &ExtractOptions::default()).is_none());

        let options = ExtractOptions {
            config: Some(ExtractorConfig::default()),
        };
        let artifact = extract(ArtifactType::JunitXml, log, &options).unwrap();
        assert_eq!(artifact.content, log);
        assert_eq!(artifact.validation.map(|v| v.valid), Some(true));
        assert_eq!(artifact.descriptor.file_extension, "xml");
    }
}
