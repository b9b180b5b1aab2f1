//! Line patterns for each supported linter.

use std::sync::LazyLock;

use regex::Regex;

use super::LinterFamily;
use super::slice::SliceRule;

macro_rules! static_regex {
    ($name:ident, $pattern:expr) => {
        static $name: LazyLock<Regex> =
            LazyLock::new(|| Regex::new($pattern).expect("static regex must compile"));
    };
}

static_regex!(ESLINT_MESSAGE_RE, r"\d+:\d+\s+(error|warning)");
static_regex!(ESLINT_SUMMARY_RE, r"\d+\s+problems?\b");
static_regex!(ESLINT_BANNER_RE, r"(?i)eslint.*\.(js|ts|jsx|tsx)");
static_regex!(
    ESLINT_FILE_RE,
    r"^(?:[A-Za-z]:)?[a-zA-Z0-9_\-/.\\@~]+\.(?:[cm]?[jt]sx?|vue|svelte)$"
);

static_regex!(PRETTIER_WARN_RE, r"^\[warn\]\s+\S+\.\w+\s*$");
static_regex!(PRETTIER_LINE_RE, r"^\[warn\]\s+\S");
static_regex!(
    PRETTIER_FILE_RE,
    r"^[a-zA-Z0-9_\-/.]+\.(js|ts|jsx|tsx|json|css|md)"
);

static_regex!(PYTHON_LOCATION_RE, r"^[a-zA-Z0-9_\-/.]+\.py:\d+");
static_regex!(
    PYTHON_SUMMARY_RE,
    r"(?i)^(?:\d+ errors?|Found \d+ errors?|Your code has been rated)"
);

static_regex!(TSC_RAW_RE, r"\.tsx?\(\d+,\d+\):\s+error\s+TS\d+");
static_regex!(TSC_LOCATION_RE, r"^[a-zA-Z0-9_\-/.]+\.tsx?:\d+:\d+");
static_regex!(TSC_CODE_RE, r"error TS\d+:");
static_regex!(FOUND_ERRORS_RE, r"Found \d+ errors?");

static_regex!(
    MYPY_RAW_RE,
    r"^[a-zA-Z0-9_\-/.]+\.py:\d+:\s*(error|warning|note):"
);
static_regex!(MYPY_LINE_RE, r"^[a-zA-Z0-9_\-/.]+\.py:\d+:\s*(error|warning):");

static_regex!(WOULD_REFORMAT_RE, r"(?i)would reformat");
static_regex!(REFORMAT_SUMMARY_RE, r"\d+ files? would be reformatted");
static_regex!(PYTHON_FILE_RE, r"^[a-zA-Z0-9_\-/.]+\.py");
static_regex!(ISORT_ERROR_RE, r"^ERROR: \S+\.py");

static_regex!(CLIPPY_RAW_RE, r"^(warning|error):\s");
static_regex!(CLIPPY_LINE_RE, r"^(warning|error):");
static_regex!(RUST_SPAN_RE, r"-->\s+\S+\.rs:\d+:\d+");
static_regex!(CLIPPY_SUMMARY_RE, r"\d+\s+warnings?\s+emitted");

fn eslint_raw(line: &str) -> bool {
    ESLINT_MESSAGE_RE.is_match(line) || ESLINT_SUMMARY_RE.is_match(line)
}

fn eslint_capture(line: &str, _: bool) -> bool {
    ESLINT_MESSAGE_RE.is_match(line) || ESLINT_FILE_RE.is_match(line.trim())
}

fn eslint_summary(line: &str) -> bool {
    ESLINT_SUMMARY_RE.is_match(line)
}

fn prettier_raw(line: &str) -> bool {
    PRETTIER_WARN_RE.is_match(line)
}

fn prettier_capture(line: &str, _: bool) -> bool {
    PRETTIER_FILE_RE.is_match(line) || PRETTIER_LINE_RE.is_match(line)
}

fn python_location(line: &str) -> bool {
    PYTHON_LOCATION_RE.is_match(line)
}

// Non-matching lines after a hit continue a multi-line message.
fn python_capture(line: &str, has_captured: bool) -> bool {
    python_location(line) || (has_captured && !line.trim().is_empty())
}

fn python_summary(line: &str) -> bool {
    PYTHON_SUMMARY_RE.is_match(line)
}

fn tsc_raw(line: &str) -> bool {
    TSC_RAW_RE.is_match(line)
}

fn tsc_capture(line: &str, _: bool) -> bool {
    TSC_LOCATION_RE.is_match(line) || TSC_CODE_RE.is_match(line)
}

fn found_errors(line: &str) -> bool {
    FOUND_ERRORS_RE.is_match(line)
}

fn mypy_raw(line: &str) -> bool {
    MYPY_RAW_RE.is_match(line)
}

fn mypy_capture(line: &str, _: bool) -> bool {
    MYPY_LINE_RE.is_match(line)
}

fn mypy_summary(line: &str) -> bool {
    found_errors(line) || line.starts_with("Success: no issues found")
}

fn formatter_raw(line: &str) -> bool {
    WOULD_REFORMAT_RE.is_match(line) || ISORT_ERROR_RE.is_match(line)
}

fn formatter_capture(line: &str, _: bool) -> bool {
    WOULD_REFORMAT_RE.is_match(line)
        || PYTHON_FILE_RE.is_match(line)
        || ISORT_ERROR_RE.is_match(line)
}

fn formatter_summary(line: &str) -> bool {
    REFORMAT_SUMMARY_RE.is_match(line)
}

fn clippy_raw(line: &str) -> bool {
    CLIPPY_RAW_RE.is_match(line) || RUST_SPAN_RE.is_match(line)
}

fn clippy_capture(line: &str, _: bool) -> bool {
    CLIPPY_LINE_RE.is_match(line) || RUST_SPAN_RE.is_match(line)
}

fn clippy_summary(line: &str) -> bool {
    CLIPPY_SUMMARY_RE.is_match(line)
}

/// Slicing rule for `family`, or `None` for tools whose artifacts are
/// taken whole.
pub(crate) fn slice_rule(family: LinterFamily) -> Option<SliceRule> {
    let rule = match family {
        LinterFamily::Eslint => SliceRule {
            raw_signature: Some(eslint_raw),
            banners: &["npm run lint"],
            banner_pattern: Some(&ESLINT_BANNER_RE),
            capture: eslint_capture,
            terminator: Some(eslint_summary),
        },
        LinterFamily::Prettier => SliceRule {
            raw_signature: Some(prettier_raw),
            banners: &["prettier", "npm run format"],
            banner_pattern: None,
            capture: prettier_capture,
            terminator: None,
        },
        LinterFamily::Ruff | LinterFamily::Flake8 | LinterFamily::Pylint => SliceRule {
            raw_signature: Some(python_location),
            banners: match family {
                LinterFamily::Ruff => &["ruff"],
                LinterFamily::Flake8 => &["flake8"],
                _ => &["pylint"],
            },
            banner_pattern: None,
            capture: python_capture,
            terminator: Some(python_summary),
        },
        LinterFamily::Tsc => SliceRule {
            raw_signature: Some(tsc_raw),
            banners: &["tsc ", "type-check"],
            banner_pattern: None,
            capture: tsc_capture,
            terminator: Some(found_errors),
        },
        LinterFamily::Mypy => SliceRule {
            raw_signature: Some(mypy_raw),
            banners: &["mypy"],
            banner_pattern: None,
            capture: mypy_capture,
            terminator: Some(mypy_summary),
        },
        LinterFamily::Isort | LinterFamily::Black => SliceRule {
            raw_signature: Some(formatter_raw),
            banners: if family == LinterFamily::Isort {
                &["isort"]
            } else {
                &["black"]
            },
            banner_pattern: None,
            capture: formatter_capture,
            terminator: Some(formatter_summary),
        },
        LinterFamily::Clippy => SliceRule {
            raw_signature: Some(clippy_raw),
            banners: &["clippy"],
            banner_pattern: None,
            capture: clippy_capture,
            terminator: Some(clippy_summary),
        },
        LinterFamily::CargoTest | LinterFamily::Rustfmt => return None,
    };
    Some(rule)
}
