//! Core artifact types, capability registry and validators.
//!
//! This crate defines the vocabulary shared by everything that classifies
//! CI artifacts:
//!
//! - [`ArtifactType`]: closed set of tool/format combinations
//!   (`jest-json`, `junit-xml`, `clippy-json`, ...).
//! - [`OriginalFormat`]: coarse serialization family (`json`, `xml`,
//!   `html`, `txt`, `binary`).
//! - [`DetectionResult`]: what the classifier reports for one file.
//! - [`PytestReport`]: canonical test-report shape produced by the
//!   HTML normalizers.
//! - [`ARTIFACT_TYPE_REGISTRY`]: per-type auto-detection policy,
//!   validator and descriptor.
//!
//! Validation ([`validate`], [`validate_named`]) confirms that a text blob
//! conforms to the format its type claims. Validators are pure functions
//! and never touch the filesystem.
//!
//! # Example
//!
//! ```
//! use artifact_detective_core::*;
//!
//! let ndjson = r#"{"reason":"compiler-artifact","target":{"name":"demo"}}"#;
//! let result = validate(ArtifactType::ClippyJson, ndjson);
//! assert!(result.valid);
//!
//! let caps = capabilities(ArtifactType::ClippyTxt);
//! assert!(!caps.supports_auto_detection);
//! assert!(validate(ArtifactType::ClippyTxt, "").valid);
//! ```

mod registry;
mod report;
mod types;
mod validate;

pub use registry::{
    ARTIFACT_TYPE_REGISTRY, ArtifactDescriptor, ArtifactTypeCapabilities, capabilities,
    configurable_types,
};
pub use report::{PytestReport, PytestTest, TestOutcome, TestPhase};
pub use types::*;
pub use validate::*;
