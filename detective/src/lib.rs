//! Classify CI artifacts and pull tool output out of job logs.
//!
//! Built on the vocabulary of [`artifact_detective_core`], this crate does
//! the I/O-facing work:
//!
//! - **Classification** ([`detect`], [`detect_content`],
//!   [`detect_and_validate`], [`detect_batch`]): a file name and a bounded
//!   content sample decide the [`ArtifactType`] of an artifact. Plain-text
//!   linter formats are never guessed from content; see
//!   [`capabilities`](artifact_detective_core::capabilities).
//! - **Extraction** ([`extract_linter_output`], [`locate_linter_output`],
//!   [`extract`]): locate a tool's output inside a CI log.
//! - **Normalization** ([`extract_pytest_json`],
//!   [`extract_playwright_json`], [`convert_to_json`]): recover the JSON
//!   embedded in HTML test reports.
//! - **Configuration** ([`DetectiveConfig`]): repository-level filename
//!   mappings and log extraction settings.
//!
//! Library code only emits `tracing` events; install a subscriber to see
//! them.
//!
//! # Example
//!
//! ```no_run
//! use artifact_detective::{convert_to_json, detect};
//!
//! let detection = detect("artifacts/report.html");
//! println!("{}", detection.detected_type);
//! if let Some(json) = convert_to_json(&detection, "artifacts/report.html")? {
//!     println!("{json}");
//! }
//! # Ok::<(), artifact_detective::NormalizeError>(())
//! ```

mod classify;
pub mod config;
mod error;
mod extract;
mod normalize;
mod sampler;

pub use artifact_detective_core::{ArtifactType, DetectionResult, OriginalFormat};
pub use classify::{
    BINARY_EXTENSIONS, DetectionReport, detect, detect_and_validate, detect_batch, detect_content,
};
pub use config::{
    ArtifactTypeMapping, CustomTypeMappings, DetectiveConfig, LogExtractionConfig, MarkerConfig,
};
pub use error::{ConfigError, NormalizeError};
pub use extract::{
    ExtractOptions, ExtractedArtifact, ExtractorConfig, LinterFamily, detect_linter_type, extract,
    extract_linter_output, locate_linter_output,
};
pub use normalize::{
    can_convert_to_json, convert_to_json, extract_playwright_json, extract_pytest_json, is_json,
    parse_playwright_html, parse_pytest_html,
};
pub use sampler::{CONTENT_SAMPLE_SIZE, read_sample};
