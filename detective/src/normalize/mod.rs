//! HTML report normalization.
//!
//! HTML reports are built for browsers; the data behind them is embedded
//! as JSON. Normalizers dig that JSON out so downstream tooling can treat
//! HTML artifacts like their JSON counterparts. A report that turns out
//! not to carry the expected payload yields `Ok(None)`: the caller keeps
//! the original file.

mod playwright;
mod pytest;

use std::fs;
use std::path::Path;

use artifact_detective_core::{ArtifactType, DetectionResult, OriginalFormat};
use serde_json::Value;

use crate::error::NormalizeError;

pub use playwright::{extract_playwright_json, parse_playwright_html};
pub use pytest::{extract_pytest_json, parse_pytest_html};

/// Returns `true` when [`convert_to_json`] knows how to handle the type.
pub fn can_convert_to_json(detection: &DetectionResult) -> bool {
    matches!(
        detection.detected_type,
        ArtifactType::PytestHtml | ArtifactType::PlaywrightHtml
    )
}

/// Returns `true` when the artifact is already JSON.
pub fn is_json(detection: &DetectionResult) -> bool {
    detection.original_format == OriginalFormat::Json
}

/// Converts an HTML report at `path` into JSON according to its detected
/// type.
///
/// Returns `Ok(None)` for types without a normalizer and for reports that
/// carry no embedded data.
///
/// # Errors
///
/// Returns [`NormalizeError::Io`] when the report cannot be read.
pub fn convert_to_json(
    detection: &DetectionResult,
    path: impl AsRef<Path>,
) -> Result<Option<Value>, NormalizeError> {
    match detection.detected_type {
        ArtifactType::PytestHtml => Ok(extract_pytest_json(path)?
            .and_then(|report| serde_json::to_value(report).ok())),
        ArtifactType::PlaywrightHtml => extract_playwright_json(path),
        _ => Ok(None),
    }
}

/// Reads an HTML report, replacing invalid UTF-8.
fn read_report(path: &Path) -> Result<String, NormalizeError> {
    fs::read(path)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .map_err(|source| NormalizeError::Io {
            path: path.to_path_buf(),
            source,
        })
}
