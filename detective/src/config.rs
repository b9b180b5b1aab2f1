//! Repository configuration for artifact classification.
//!
//! Lets a repository name artifact types the classifier cannot infer from
//! content (custom filename mappings) and declare which tool outputs to
//! pull out of job logs.
//!
//! # Example YAML
//!
//! ```yaml
//! customArtifactTypes:
//!   - pattern: "^eslint-report\\.txt$"
//!     type: eslint-txt
//!     reason: ESLint output is uploaded as a plain text artifact
//! extractArtifactTypesFromLogs:
//!   - type: mypy-txt
//!     matchJobName: "typecheck"
//!     required: true
//!   - type: junit-xml
//!     extractorConfig:
//!       startMarker: "^=== JUNIT BEGIN ===$"
//!       endMarker: "^=== JUNIT END ===$"
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use artifact_detective_core::ArtifactType;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::extract::{ExtractOptions, ExtractedArtifact, ExtractorConfig, extract};

/// Configuration file names probed by [`DetectiveConfig::discover`], in
/// order of preference.
pub const CONFIG_FILE_NAMES: [&str; 3] = [
    ".artifact-detective.json",
    ".artifact-detective.yml",
    ".artifact-detective.yaml",
];

/// Convenience alias for configuration results.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Maps artifact file names to a type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactTypeMapping {
    /// Regex tested against the file name (not the full path).
    pub pattern: String,
    #[serde(rename = "type")]
    pub artifact_type: ArtifactType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Marker patterns as written in the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_marker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_marker: Option<String>,
    #[serde(default)]
    pub include_end_marker: bool,
}

impl MarkerConfig {
    /// Compiles the marker patterns.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] for a pattern that does not
    /// compile.
    pub fn compile(&self) -> Result<ExtractorConfig> {
        Ok(ExtractorConfig {
            start_marker: compile_optional(self.start_marker.as_deref(), "startMarker")?,
            end_marker: compile_optional(self.end_marker.as_deref(), "endMarker")?,
            include_end_marker: self.include_end_marker,
        })
    }
}

/// One artifact type to look for in job logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogExtractionConfig {
    #[serde(rename = "type")]
    pub artifact_type: ArtifactType,
    /// Normalize matching HTML reports to JSON.
    #[serde(default)]
    pub to_json: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extractor_config: Option<MarkerConfig>,
    /// The type is expected in every matching job.
    #[serde(default)]
    pub required: bool,
    /// Regex restricting the entry to jobs whose name matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_job_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl LogExtractionConfig {
    /// Returns `true` when the entry applies to `job_name`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] when `matchJobName` does
    /// not compile.
    pub fn applies_to_job(&self, job_name: &str) -> Result<bool> {
        Ok(compile_optional(self.match_job_name.as_deref(), "matchJobName")?
            .is_none_or(|pattern| pattern.is_match(job_name)))
    }

    /// Extracts this entry's artifact type from `log`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] when a marker does not
    /// compile.
    pub fn extract(&self, log: &str) -> Result<Option<ExtractedArtifact>> {
        let options = ExtractOptions {
            config: self
                .extractor_config
                .as_ref()
                .map(MarkerConfig::compile)
                .transpose()?,
        };
        Ok(extract(self.artifact_type, log, &options))
    }
}

/// Top-level configuration.
///
/// # Examples
///
/// ```
/// use artifact_detective::DetectiveConfig;
/// use artifact_detective_core::ArtifactType;
///
/// let config = DetectiveConfig::from_yaml_str(
///     "customArtifactTypes:\n  - pattern: 'lint\\.txt$'\n    type: eslint-txt\n",
/// )
/// .unwrap();
/// let mappings = config.custom_type_mappings().unwrap();
/// assert_eq!(
///     mappings.apply("out/lint.txt", ArtifactType::Unknown),
///     ArtifactType::EslintTxt
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectiveConfig {
    #[serde(default)]
    pub custom_artifact_types: Vec<ArtifactTypeMapping>,
    #[serde(default)]
    pub extract_artifact_types_from_logs: Vec<LogExtractionConfig>,
}

impl DetectiveConfig {
    /// Loads and validates a configuration file, choosing the parser by
    /// extension (`.json`, `.yml`, `.yaml`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedFormat`] for other extensions,
    /// I/O and parse errors, and the validation errors of
    /// [`DetectiveConfig::validate`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let config: Self = match extension.as_deref() {
            Some("json") => serde_json::from_reader(BufReader::new(File::open(path)?))?,
            Some("yml" | "yaml") => serde_yaml::from_reader(BufReader::new(File::open(path)?))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };
        config.validate()?;
        debug!(
            path = %path.display(),
            mappings = config.custom_artifact_types.len(),
            extractions = config.extract_artifact_types_from_logs.len(),
            "loaded configuration"
        );
        Ok(config)
    }

    /// Loads the first of [`CONFIG_FILE_NAMES`] present in `dir`, or the
    /// default (empty) configuration when none exists.
    ///
    /// # Errors
    ///
    /// Same as [`DetectiveConfig::load`] for the file found.
    pub fn discover(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        match CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
        {
            Some(path) => Self::load(path),
            None => {
                debug!(dir = %dir.display(), "no configuration file found");
                Ok(Self::default())
            }
        }
    }

    /// Parses and validates YAML configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] or a validation error.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates JSON configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] or a validation error.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every pattern compiles and that no entry names the
    /// `binary` or `unknown` sentinel.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::InvalidPattern`] or
    /// [`ConfigError::DisallowedType`] found.
    pub fn validate(&self) -> Result<()> {
        for mapping in &self.custom_artifact_types {
            ensure_concrete(mapping.artifact_type, "customArtifactTypes")?;
            compile(&mapping.pattern, "customArtifactTypes")?;
        }
        for entry in &self.extract_artifact_types_from_logs {
            ensure_concrete(entry.artifact_type, "extractArtifactTypesFromLogs")?;
            entry.applies_to_job("")?;
            if let Some(markers) = &entry.extractor_config {
                markers.compile()?;
            }
        }
        Ok(())
    }

    /// Compiles the filename mappings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] for a pattern that does not
    /// compile.
    pub fn custom_type_mappings(&self) -> Result<CustomTypeMappings> {
        let rules = self
            .custom_artifact_types
            .iter()
            .map(|mapping| {
                compile(&mapping.pattern, "customArtifactTypes")
                    .map(|pattern| (pattern, mapping.artifact_type))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(CustomTypeMappings { rules })
    }

    /// Runs the extraction entries that apply to `job_name` against `log`
    /// in order and returns the first artifact found.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] for an entry whose patterns
    /// do not compile.
    pub fn extract_first(&self, job_name: &str, log: &str) -> Result<Option<ExtractedArtifact>> {
        for entry in &self.extract_artifact_types_from_logs {
            if !entry.applies_to_job(job_name)? {
                continue;
            }
            if let Some(artifact) = entry.extract(log)? {
                debug!(
                    job_name,
                    artifact_type = %entry.artifact_type,
                    "extracted artifact from log"
                );
                return Ok(Some(artifact));
            }
        }
        Ok(None)
    }
}

/// Compiled filename → type overrides.
#[derive(Debug, Clone, Default)]
pub struct CustomTypeMappings {
    rules: Vec<(Regex, ArtifactType)>,
}

impl CustomTypeMappings {
    /// Returns the type of the first mapping whose pattern matches the file
    /// name of `path`, but only when `detected` is
    /// [`ArtifactType::Unknown`]. Detected types are never overridden.
    pub fn apply(&self, path: impl AsRef<Path>, detected: ArtifactType) -> ArtifactType {
        if detected != ArtifactType::Unknown {
            return detected;
        }
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();

        self.rules
            .iter()
            .find(|(pattern, _)| pattern.is_match(&file_name))
            .map_or(detected, |(_, artifact_type)| *artifact_type)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn compile(pattern: &str, context: &'static str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        context,
        pattern: pattern.to_string(),
        source,
    })
}

fn compile_optional(pattern: Option<&str>, context: &'static str) -> Result<Option<Regex>> {
    pattern.map(|pattern| compile(pattern, context)).transpose()
}

fn ensure_concrete(artifact_type: ArtifactType, context: &'static str) -> Result<()> {
    if artifact_type.is_sentinel() {
        Err(ConfigError::DisallowedType {
            context,
            artifact_type,
        })
    } else {
        Ok(())
    }
}
