//! Type capability registry.
//!
//! A fixed table mapping every [`ArtifactType`] to whether content-only
//! auto-detection may produce it, which validator confirms it, and a short
//! descriptor for display. The table is a `static` built at compile time
//! and never written to.
//!
//! # Examples
//!
//! ```
//! use artifact_detective_core::{ArtifactType, capabilities};
//!
//! let eslint = capabilities(ArtifactType::EslintTxt);
//! assert!(!eslint.supports_auto_detection);
//! assert!(eslint.validator.is_some());
//! assert_eq!(eslint.descriptor.file_extension, "txt");
//! ```

use crate::ArtifactType;
use crate::validate::{
    ValidatorFn, validate_cargo_test_output, validate_clippy_json, validate_clippy_text,
    validate_eslint_output, validate_flake8_output, validate_jest_json, validate_junit_xml,
    validate_mypy_output, validate_playwright_json, validate_pytest_json, validate_ruff_output,
    validate_rustfmt_output, validate_tsc_output,
};

/// Human-facing description of an artifact type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactDescriptor {
    pub short_description: &'static str,
    /// Extension used when persisting extracted output (without the dot).
    pub file_extension: &'static str,
    pub tool_url: Option<&'static str>,
}

/// Per-type capabilities.
#[derive(Debug, Clone, Copy)]
pub struct ArtifactTypeCapabilities {
    pub artifact_type: ArtifactType,
    /// `false` means content inspection must never return this type; it can
    /// only be assigned by configuration and confirmed by its validator.
    pub supports_auto_detection: bool,
    pub validator: Option<ValidatorFn>,
    pub descriptor: ArtifactDescriptor,
}

const fn entry(
    artifact_type: ArtifactType,
    supports_auto_detection: bool,
    validator: Option<ValidatorFn>,
    short_description: &'static str,
    file_extension: &'static str,
    tool_url: Option<&'static str>,
) -> ArtifactTypeCapabilities {
    ArtifactTypeCapabilities {
        artifact_type,
        supports_auto_detection,
        validator,
        descriptor: ArtifactDescriptor {
            short_description,
            file_extension,
            tool_url,
        },
    }
}

/// Registry entries, one per type, in [`ArtifactType::ALL`] order.
pub static ARTIFACT_TYPE_REGISTRY: [ArtifactTypeCapabilities; 18] = [
    entry(
        ArtifactType::PlaywrightJson,
        true,
        Some(validate_playwright_json),
        "Playwright JSON test report",
        "json",
        Some("https://playwright.dev/docs/test-reporters#json-reporter"),
    ),
    entry(
        ArtifactType::PlaywrightHtml,
        true,
        None,
        "Playwright HTML test report",
        "html",
        Some("https://playwright.dev/docs/test-reporters#html-reporter"),
    ),
    entry(
        ArtifactType::JestJson,
        true,
        Some(validate_jest_json),
        "Jest JSON test results",
        "json",
        Some("https://jestjs.io/docs/cli#--json"),
    ),
    entry(
        ArtifactType::JestHtml,
        true,
        None,
        "Jest HTML test report",
        "html",
        Some("https://github.com/Hargne/jest-html-reporter"),
    ),
    entry(
        ArtifactType::PytestJson,
        true,
        Some(validate_pytest_json),
        "pytest JSON test report",
        "json",
        Some("https://github.com/numirias/pytest-json-report"),
    ),
    entry(
        ArtifactType::PytestHtml,
        true,
        None,
        "pytest HTML test report",
        "html",
        Some("https://pytest-html.readthedocs.io/"),
    ),
    entry(
        ArtifactType::JunitXml,
        true,
        Some(validate_junit_xml),
        "JUnit XML test results",
        "xml",
        None,
    ),
    entry(
        ArtifactType::EslintTxt,
        false,
        Some(validate_eslint_output),
        "ESLint linter output",
        "txt",
        Some("https://eslint.org/"),
    ),
    entry(
        ArtifactType::TscTxt,
        false,
        Some(validate_tsc_output),
        "TypeScript compiler diagnostics",
        "txt",
        Some("https://www.typescriptlang.org/docs/handbook/compiler-options.html"),
    ),
    entry(
        ArtifactType::RuffTxt,
        false,
        Some(validate_ruff_output),
        "Ruff linter output",
        "txt",
        Some("https://docs.astral.sh/ruff/"),
    ),
    entry(
        ArtifactType::MypyTxt,
        false,
        Some(validate_mypy_output),
        "mypy type checker output",
        "txt",
        Some("https://mypy.readthedocs.io/"),
    ),
    entry(
        ArtifactType::Flake8Txt,
        true,
        Some(validate_flake8_output),
        "flake8 linter output",
        "txt",
        Some("https://flake8.pycqa.org/"),
    ),
    entry(
        ArtifactType::CargoTestTxt,
        false,
        Some(validate_cargo_test_output),
        "cargo test output",
        "txt",
        Some("https://doc.rust-lang.org/cargo/commands/cargo-test.html"),
    ),
    entry(
        ArtifactType::ClippyJson,
        true,
        Some(validate_clippy_json),
        "Clippy JSON diagnostics (NDJSON)",
        "json",
        Some("https://doc.rust-lang.org/clippy/"),
    ),
    entry(
        ArtifactType::ClippyTxt,
        false,
        Some(validate_clippy_text),
        "Clippy text diagnostics",
        "txt",
        Some("https://doc.rust-lang.org/clippy/"),
    ),
    entry(
        ArtifactType::RustfmtTxt,
        false,
        Some(validate_rustfmt_output),
        "rustfmt check output",
        "txt",
        Some("https://github.com/rust-lang/rustfmt"),
    ),
    entry(
        ArtifactType::Binary,
        true,
        None,
        "Binary file",
        "bin",
        None,
    ),
    entry(
        ArtifactType::Unknown,
        false,
        None,
        "Unrecognized artifact",
        "txt",
        None,
    ),
];

/// Looks up the capabilities of `artifact_type`.
pub fn capabilities(artifact_type: ArtifactType) -> &'static ArtifactTypeCapabilities {
    &ARTIFACT_TYPE_REGISTRY[artifact_type as usize]
}

/// Artifact types a configuration file may name (everything except the
/// `binary` and `unknown` sentinels).
pub fn configurable_types() -> impl Iterator<Item = ArtifactType> {
    ArtifactType::ALL
        .into_iter()
        .filter(|ty| !ty.is_sentinel())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_is_indexed_by_type() {
        for (index, ty) in ArtifactType::ALL.into_iter().enumerate() {
            assert_eq!(ARTIFACT_TYPE_REGISTRY[index].artifact_type, ty);
            assert_eq!(capabilities(ty).artifact_type, ty);
        }
    }

    #[test]
    fn test_plain_text_linters_are_not_auto_detected() {
        for ty in [
            ArtifactType::EslintTxt,
            ArtifactType::TscTxt,
            ArtifactType::RuffTxt,
            ArtifactType::MypyTxt,
            ArtifactType::CargoTestTxt,
            ArtifactType::ClippyTxt,
            ArtifactType::RustfmtTxt,
        ] {
            let caps = capabilities(ty);
            assert!(!caps.supports_auto_detection, "{ty}");
            assert!(caps.validator.is_some(), "{ty} needs a validator");
        }
    }

    #[test]
    fn test_descriptor_extension_matches_format() {
        for caps in &ARTIFACT_TYPE_REGISTRY {
            if caps.artifact_type.is_sentinel() {
                continue;
            }
            assert_eq!(
                caps.descriptor.file_extension,
                caps.artifact_type.original_format().as_str()
            );
        }
    }

    #[test]
    fn test_configurable_types_exclude_sentinels() {
        let types = configurable_types().collect::<Vec<_>>();
        assert_eq!(types.len(), 16);
        assert!(!types.contains(&ArtifactType::Binary));
        assert!(!types.contains(&ArtifactType::Unknown));
    }
}
