//! JSON report signatures.
//!
//! Three tiers, first hit wins: a cargo NDJSON message stream, the
//! structure of a single parsed document, and finally plain substring
//! markers for documents that are truncated or otherwise unparseable.

use artifact_detective_core::{ArtifactType, CARGO_MESSAGE_REASONS};
use serde_json::Value;

/// Classifies `content`; `lower` is its lowercased form.
pub(super) fn detect_json(content: &str, lower: &str) -> ArtifactType {
    if is_cargo_message_stream(content) {
        return ArtifactType::ClippyJson;
    }

    if let Ok(document) = serde_json::from_str::<Value>(content) {
        if let Some(artifact_type) = detect_structure(&document) {
            return artifact_type;
        }
    }

    detect_markers(lower)
}

/// Returns `true` if any line is a JSON object whose `reason` is one of
/// cargo's message reasons.
fn is_cargo_message_stream(content: &str) -> bool {
    content
        .lines()
        .filter(|line| line.trim_start().starts_with('{'))
        .filter_map(|line| serde_json::from_str::<Value>(line).ok())
        .any(|message| {
            message
                .get("reason")
                .and_then(Value::as_str)
                .is_some_and(|reason| CARGO_MESSAGE_REASONS.contains(&reason))
        })
}

fn detect_structure(document: &Value) -> Option<ArtifactType> {
    let config = document.get("config").filter(|config| is_truthy(config));
    let has_suites = document.get("suites").is_some_and(Value::is_array);
    if let (Some(config), true) = (config, has_suites) {
        if config.get("rootDir").is_some() || config.get("version").is_some() {
            return Some(ArtifactType::PlaywrightJson);
        }
    }

    if document.get("testResults").is_some_and(Value::is_array) {
        return Some(ArtifactType::JestJson);
    }

    if document.get("tests").is_some_and(Value::is_array) {
        return Some(ArtifactType::PytestJson);
    }

    None
}

fn detect_markers(lower: &str) -> ArtifactType {
    if lower.contains("playwright") {
        ArtifactType::PlaywrightJson
    } else if lower.contains("jest") {
        ArtifactType::JestJson
    } else if lower.contains("pytest") {
        ArtifactType::PytestJson
    } else {
        ArtifactType::Unknown
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
