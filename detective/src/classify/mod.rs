//! Format classification.
//!
//! [`detect`] runs a fixed cascade: the file name decides binary vs. text
//! and the serialization format, then a bounded content sample decides the
//! tool. Detection never fails; anything it cannot read or recognize comes
//! back as [`ArtifactType::Unknown`] with the format implied by the name.
//!
//! # Examples
//!
//! ```
//! use artifact_detective::detect;
//! use artifact_detective_core::{ArtifactType, OriginalFormat};
//!
//! let result = detect("screenshots/failure.PNG");
//! assert_eq!(result.detected_type, ArtifactType::Binary);
//! assert!(result.is_binary);
//!
//! // Unreadable, but the name still pins the format.
//! let result = detect("/nonexistent/report.json");
//! assert_eq!(result.detected_type, ArtifactType::Unknown);
//! assert_eq!(result.original_format, OriginalFormat::Json);
//! assert!(!result.is_binary);
//! ```

mod html;
mod json;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use artifact_detective_core::{
    ArtifactDescriptor, ArtifactType, DetectionResult, OriginalFormat, ValidationResult,
    capabilities, validate,
};
use rayon::prelude::*;
use regex::Regex;
use tracing::{debug, warn};

use crate::sampler::read_sample;

/// Extensions (lowercase, without the dot) that are never inspected.
pub const BINARY_EXTENSIONS: [&str; 17] = [
    "png", "jpg", "jpeg", "gif", "webp", "svg", "mp4", "webm", "mov", "zip", "tar", "gz", "bz2",
    "exe", "dll", "so", "dylib",
];

static FLAKE8_LOCATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.py:\d+:\d+:").expect("static regex must compile"));

/// Classifies the file at `path`.
pub fn detect(path: impl AsRef<Path>) -> DetectionResult {
    classify_path(path.as_ref())
}

/// Classifies in-memory `content` known to be in `format`.
///
/// The result is always a type the registry allows auto-detection to
/// produce, or [`ArtifactType::Unknown`].
///
/// # Examples
///
/// ```
/// use artifact_detective::detect_content;
/// use artifact_detective_core::{ArtifactType, OriginalFormat};
///
/// let xml = r#"<?xml version="1.0"?><testsuites><testsuite name="unit"/></testsuites>"#;
/// assert_eq!(detect_content(xml, OriginalFormat::Xml), ArtifactType::JunitXml);
///
/// let lint = "src/app.js\n  3:1  error  'x' is defined but never used  no-unused-vars\n";
/// assert_eq!(detect_content(lint, OriginalFormat::Txt), ArtifactType::Unknown);
/// ```
pub fn detect_content(content: &str, format: OriginalFormat) -> ArtifactType {
    let lower = content.to_lowercase();
    let detected = match format {
        OriginalFormat::Html => html::detect_html(&lower),
        OriginalFormat::Json => json::detect_json(content, &lower),
        OriginalFormat::Xml => detect_xml(&lower),
        OriginalFormat::Txt => detect_txt(content),
        OriginalFormat::Binary => ArtifactType::Unknown,
    };

    if capabilities(detected).supports_auto_detection {
        detected
    } else {
        if detected != ArtifactType::Unknown {
            warn!(%detected, "content signature matched a type excluded from auto-detection");
        }
        ArtifactType::Unknown
    }
}

fn detect_xml(lower: &str) -> ArtifactType {
    if lower.contains("<testsuite") {
        ArtifactType::JunitXml
    } else {
        ArtifactType::Unknown
    }
}

// Only flake8's `file.py:L:C:` location is distinctive enough among the
// plain-text formats.
fn detect_txt(content: &str) -> ArtifactType {
    if FLAKE8_LOCATION_RE.is_match(content) {
        ArtifactType::Flake8Txt
    } else {
        ArtifactType::Unknown
    }
}

/// Detection outcome with registry metadata and, when the type has a
/// validator, the validator's verdict on the whole file.
#[derive(Debug, Clone)]
pub struct DetectionReport {
    pub result: DetectionResult,
    pub descriptor: &'static ArtifactDescriptor,
    pub validation: Option<ValidationResult>,
}

/// Classifies `path` and confirms the result with the type's validator.
///
/// Validation reads the full file rather than the classification sample so
/// JSON documents larger than the sample still parse. `validation` is
/// `None` for binaries, for types without a validator, and when the file
/// cannot be read.
pub fn detect_and_validate(path: impl AsRef<Path>) -> DetectionReport {
    let path = path.as_ref();
    let result = classify_path(path);
    let caps = capabilities(result.detected_type);

    let validation = match caps.validator {
        Some(validator) if !result.is_binary => match fs::read(path) {
            Ok(bytes) => {
                let validation = validator(&String::from_utf8_lossy(&bytes));
                if !validation.valid {
                    warn!(
                        path = %path.display(),
                        artifact_type = %result.detected_type,
                        error = validation.error.as_deref().unwrap_or_default(),
                        "detected artifact failed validation"
                    );
                }
                Some(validation)
            }
            Err(err) => {
                debug!(path = %path.display(), error = %err, "cannot read file for validation");
                None
            }
        },
        _ => None,
    };

    DetectionReport {
        result,
        descriptor: &caps.descriptor,
        validation,
    }
}

/// Classifies many paths in parallel. Output order matches input order.
pub fn detect_batch<P>(paths: &[P]) -> Vec<(PathBuf, DetectionResult)>
where
    P: AsRef<Path> + Sync,
{
    paths
        .par_iter()
        .map(|path| {
            let path = path.as_ref();
            (path.to_path_buf(), detect(path))
        })
        .collect()
}

/// Validates `content` as `artifact_type`, returning `None` when the type
/// has no validator.
pub(crate) fn validate_if_supported(
    artifact_type: ArtifactType,
    content: &str,
) -> Option<ValidationResult> {
    capabilities(artifact_type)
        .validator
        .map(|_| validate(artifact_type, content))
}

/// Returns the lowercased extension of the final path component, if any.
///
/// Hidden files such as `.png` count as having that extension.
fn extension_of(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?.to_ascii_lowercase();
    let (_, extension) = name.rsplit_once('.')?;
    Some(extension.to_string())
}

fn classify_path(path: &Path) -> DetectionResult {
    let extension = extension_of(path);
    if extension
        .as_deref()
        .is_some_and(|ext| BINARY_EXTENSIONS.contains(&ext))
    {
        debug!(path = %path.display(), "binary extension");
        return DetectionResult::binary();
    }

    let format = extension
        .as_deref()
        .map_or(OriginalFormat::Binary, OriginalFormat::from_extension);
    if !format.is_text() {
        debug!(path = %path.display(), "unrecognized extension");
        return DetectionResult::unknown_binary();
    }

    match read_sample(path) {
        Ok(sample) => {
            let detected = detect_content(&sample, format);
            debug!(path = %path.display(), %format, %detected, "classified artifact");
            DetectionResult::text(detected, format)
        }
        Err(err) => {
            debug!(path = %path.display(), error = %err, "cannot sample file");
            DetectionResult::text(ArtifactType::Unknown, format)
        }
    }
}
