use artifact_detective::{OriginalFormat, detect_content};
use artifact_detective_core::{ArtifactType, capabilities};
use proptest::prelude::*;

fn format() -> impl Strategy<Value = OriginalFormat> {
    prop_oneof![
        Just(OriginalFormat::Json),
        Just(OriginalFormat::Xml),
        Just(OriginalFormat::Html),
        Just(OriginalFormat::Txt),
        Just(OriginalFormat::Binary),
    ]
}

// Fragments that push the classifier toward every branch, including the
// signatures of types it must refuse to report.
fn fragment() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("pytest-html"),
        Just("playwright test report"),
        Just("jest-html"),
        Just("<testsuite name=\"x\">"),
        Just(r#"{"reason":"compiler-message","message":{"level":"warning","spans":[]}}"#),
        Just(r#"{"testResults":[]}"#),
        Just(r#"{"tests":[]}"#),
        Just("src/a.js\n  1:1  error  bad  rule\n\n1 problem"),
        Just("test foo ... ok\ntest result: ok. 1 passed"),
        Just("src/a.py:1: error: bad [misc]"),
        Just("app.py:1:2: E225 missing whitespace"),
        Just("Diff in /repo/src/lib.rs at line 3:"),
    ]
}

proptest! {
    #[test]
    fn prop_detection_respects_registry(
        format in format(),
        parts in prop::collection::vec(fragment(), 0..4),
        noise in ".{0,40}",
    ) {
        let content = format!("{}\n{noise}", parts.join("\n"));
        let detected = detect_content(&content, format);
        prop_assert!(
            detected == ArtifactType::Unknown || capabilities(detected).supports_auto_detection,
            "{detected} is not auto-detectable"
        );
    }

    #[test]
    fn prop_binary_format_is_never_inspected(content in ".{0,200}") {
        prop_assert_eq!(detect_content(&content, OriginalFormat::Binary), ArtifactType::Unknown);
    }
}
