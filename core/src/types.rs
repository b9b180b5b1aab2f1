//! Artifact type definitions for CI output classification.
//!
//! This module defines the closed set of tool/format combinations the
//! classifier can report, the coarse serialization family each belongs to,
//! and the value objects handed back to callers. All types serialize with
//! [`serde`] using the kebab-case tags downstream tooling already expects
//! (e.g. `"jest-json"`, `"cargo-test-txt"`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse serialization family of an artifact.
///
/// Derived from the file extension; every [`ArtifactType`] maps to exactly
/// one format via [`ArtifactType::original_format`].
///
/// # Examples
///
/// ```
/// use artifact_detective_core::OriginalFormat;
///
/// assert_eq!(OriginalFormat::from_extension("JSON"), OriginalFormat::Json);
/// assert_eq!(OriginalFormat::from_extension("htm"), OriginalFormat::Html);
/// assert_eq!(OriginalFormat::from_extension("csv"), OriginalFormat::Binary);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OriginalFormat {
    Json,
    Xml,
    Html,
    Txt,
    /// Binary or unrecognized extension.
    Binary,
}

impl OriginalFormat {
    /// Maps a file extension (without the dot, any case) to a format.
    ///
    /// Unrecognized extensions map to [`OriginalFormat::Binary`].
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            "xml" => Self::Xml,
            "html" | "htm" => Self::Html,
            "txt" | "log" => Self::Txt,
            _ => Self::Binary,
        }
    }

    /// Returns the lowercase label used in serialized output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Html => "html",
            Self::Txt => "txt",
            Self::Binary => "binary",
        }
    }

    /// Returns `true` for formats whose content can be inspected as text.
    pub fn is_text(self) -> bool {
        !matches!(self, Self::Binary)
    }
}

impl fmt::Display for OriginalFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A specific tool + serialization combination.
///
/// This is a closed tag, consulted everywhere by `match`; per-type behavior
/// (detection signatures, validators, descriptors) is keyed by it rather
/// than attached to it.
///
/// # Examples
///
/// ```
/// use artifact_detective_core::{ArtifactType, OriginalFormat};
///
/// let ty: ArtifactType = "clippy-json".parse().unwrap();
/// assert_eq!(ty, ArtifactType::ClippyJson);
/// assert_eq!(ty.original_format(), OriginalFormat::Json);
/// assert_eq!(ArtifactType::CargoTestTxt.to_string(), "cargo-test-txt");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactType {
    PlaywrightJson,
    PlaywrightHtml,
    JestJson,
    JestHtml,
    PytestJson,
    PytestHtml,
    JunitXml,
    EslintTxt,
    TscTxt,
    RuffTxt,
    MypyTxt,
    Flake8Txt,
    CargoTestTxt,
    ClippyJson,
    ClippyTxt,
    RustfmtTxt,
    Binary,
    Unknown,
}

impl ArtifactType {
    /// Every artifact type, in registry order.
    pub const ALL: [ArtifactType; 18] = [
        Self::PlaywrightJson,
        Self::PlaywrightHtml,
        Self::JestJson,
        Self::JestHtml,
        Self::PytestJson,
        Self::PytestHtml,
        Self::JunitXml,
        Self::EslintTxt,
        Self::TscTxt,
        Self::RuffTxt,
        Self::MypyTxt,
        Self::Flake8Txt,
        Self::CargoTestTxt,
        Self::ClippyJson,
        Self::ClippyTxt,
        Self::RustfmtTxt,
        Self::Binary,
        Self::Unknown,
    ];

    /// Returns the kebab-case tag (e.g. `"playwright-html"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PlaywrightJson => "playwright-json",
            Self::PlaywrightHtml => "playwright-html",
            Self::JestJson => "jest-json",
            Self::JestHtml => "jest-html",
            Self::PytestJson => "pytest-json",
            Self::PytestHtml => "pytest-html",
            Self::JunitXml => "junit-xml",
            Self::EslintTxt => "eslint-txt",
            Self::TscTxt => "tsc-txt",
            Self::RuffTxt => "ruff-txt",
            Self::MypyTxt => "mypy-txt",
            Self::Flake8Txt => "flake8-txt",
            Self::CargoTestTxt => "cargo-test-txt",
            Self::ClippyJson => "clippy-json",
            Self::ClippyTxt => "clippy-txt",
            Self::RustfmtTxt => "rustfmt-txt",
            Self::Binary => "binary",
            Self::Unknown => "unknown",
        }
    }

    /// Returns the serialization family this type belongs to.
    ///
    /// `unknown` maps to [`OriginalFormat::Binary`]; a detection result for
    /// an unknown text file carries its extension-derived format instead.
    pub fn original_format(self) -> OriginalFormat {
        match self {
            Self::PlaywrightJson | Self::JestJson | Self::PytestJson | Self::ClippyJson => {
                OriginalFormat::Json
            }
            Self::PlaywrightHtml | Self::JestHtml | Self::PytestHtml => OriginalFormat::Html,
            Self::JunitXml => OriginalFormat::Xml,
            Self::EslintTxt
            | Self::TscTxt
            | Self::RuffTxt
            | Self::MypyTxt
            | Self::Flake8Txt
            | Self::CargoTestTxt
            | Self::ClippyTxt
            | Self::RustfmtTxt => OriginalFormat::Txt,
            Self::Binary | Self::Unknown => OriginalFormat::Binary,
        }
    }

    /// Returns `true` for the two sentinel tags that name no tool.
    pub fn is_sentinel(self) -> bool {
        matches!(self, Self::Binary | Self::Unknown)
    }
}

impl fmt::Display for ArtifactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known [`ArtifactType`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown artifact type: {0}")]
pub struct ParseArtifactTypeError(pub String);

impl FromStr for ArtifactType {
    type Err = ParseArtifactTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|ty| ty.as_str() == needle)
            .ok_or_else(|| ParseArtifactTypeError(s.to_string()))
    }
}

/// Outcome of classifying a single file.
///
/// Invariant: when `is_binary` is `true`, `detected_type` is either
/// [`ArtifactType::Binary`] or [`ArtifactType::Unknown`] and
/// `original_format` is [`OriginalFormat::Binary`]. Use the constructors to
/// keep it that way.
///
/// # Examples
///
/// ```
/// use artifact_detective_core::{ArtifactType, DetectionResult, OriginalFormat};
///
/// let result = DetectionResult::binary();
/// assert!(result.is_binary);
/// assert_eq!(result.original_format, OriginalFormat::Binary);
///
/// let text = DetectionResult::text(ArtifactType::JunitXml, OriginalFormat::Xml);
/// assert!(!text.is_binary);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    pub detected_type: ArtifactType,
    pub original_format: OriginalFormat,
    pub is_binary: bool,
}

impl DetectionResult {
    /// A file recognized as binary by its extension.
    pub fn binary() -> Self {
        Self {
            detected_type: ArtifactType::Binary,
            original_format: OriginalFormat::Binary,
            is_binary: true,
        }
    }

    /// A file whose extension maps to no text format.
    pub fn unknown_binary() -> Self {
        Self {
            detected_type: ArtifactType::Unknown,
            original_format: OriginalFormat::Binary,
            is_binary: true,
        }
    }

    /// A text file, classified (possibly as unknown) from its content.
    pub fn text(detected_type: ArtifactType, original_format: OriginalFormat) -> Self {
        Self {
            detected_type,
            original_format,
            is_binary: false,
        }
    }
}

/// A tool's output located inside a larger CI log.
///
/// Line numbers are 1-based and inclusive; `content` holds only the
/// captured lines (normalized), joined by `\n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinterMatch {
    pub linter_type: String,
    pub start_line: usize,
    pub end_line: usize,
    pub content: String,
}
