use std::fs;
use std::path::PathBuf;

use artifact_detective::{
    ArtifactType, OriginalFormat, convert_to_json, detect, detect_and_validate, detect_batch,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Manifest {
    artifacts: Vec<ArtifactFixture>,
}

#[derive(Debug, Deserialize)]
struct ArtifactFixture {
    file: String,
    format: OriginalFormat,
    detected: ArtifactType,
    #[serde(default)]
    valid: Option<bool>,
}

#[test]
fn test_every_fixture_is_classified_as_recorded() {
    for entry in manifest().artifacts {
        let result = detect(fixture_path(&entry.file));
        assert_eq!(result.original_format, entry.format, "{}", entry.file);
        assert_eq!(result.detected_type, entry.detected, "{}", entry.file);
        assert!(!result.is_binary, "{}", entry.file);
    }
}

#[test]
fn test_detected_fixtures_pass_their_validators() {
    for entry in manifest().artifacts {
        let Some(expected) = entry.valid else {
            continue;
        };
        let report = detect_and_validate(fixture_path(&entry.file));
        let validation = report
            .validation
            .unwrap_or_else(|| panic!("{} should have been validated", entry.file));
        assert_eq!(
            validation.valid, expected,
            "{}: {:?}",
            entry.file, validation.error
        );
    }
}

#[test]
fn test_html_reports_carry_no_validation() {
    let report = detect_and_validate(fixture_path("pytest-report.html"));
    assert_eq!(report.result.detected_type, ArtifactType::PytestHtml);
    assert!(report.validation.is_none());
    assert_eq!(report.descriptor.file_extension, "html");
}

#[test]
fn test_batch_keeps_input_order() {
    let entries = manifest().artifacts;
    let paths = entries
        .iter()
        .map(|entry| fixture_path(&entry.file))
        .collect::<Vec<_>>();

    let results = detect_batch(&paths);
    assert_eq!(results.len(), entries.len());
    for ((path, result), entry) in results.iter().zip(&entries) {
        assert_eq!(path, &fixture_path(&entry.file));
        assert_eq!(result.detected_type, entry.detected);
    }
}

#[test]
fn test_binary_extensions_are_never_read() {
    let dir = tempfile::tempdir().unwrap();
    let screenshot = dir.path().join("Failure.PNG");
    // JSON content behind a binary extension must not be inspected.
    fs::write(&screenshot, r#"{"testResults":[]}"#).unwrap();

    let result = detect(&screenshot);
    assert!(result.is_binary);
    assert_eq!(result.detected_type, ArtifactType::Binary);
    assert!(detect_and_validate(&screenshot).validation.is_none());
}

#[test]
fn test_convert_to_json_follows_detection() {
    let pytest = fixture_path("pytest-report.html");
    let json = convert_to_json(&detect(&pytest), &pytest)
        .unwrap()
        .expect("pytest-html converts");
    assert_eq!(json["exitCode"], 1);
    assert_eq!(json["tests"].as_array().map(Vec::len), Some(7));

    let playwright = fixture_path("playwright-report.html");
    let json = convert_to_json(&detect(&playwright), &playwright)
        .unwrap()
        .expect("playwright-html converts");
    assert_eq!(json["stats"]["expected"], 1);

    let jest = fixture_path("jest-results.json");
    assert!(convert_to_json(&detect(&jest), &jest).unwrap().is_none());
}

fn manifest() -> Manifest {
    let raw = fs::read_to_string(fixture_path("manifest.yml")).expect("manifest should exist");
    serde_yaml::from_str(&raw).expect("manifest should parse")
}

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}
