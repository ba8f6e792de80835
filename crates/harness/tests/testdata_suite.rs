//! Runs the full shipped corpus at testdata/ through the pipeline and
//! checks the classification contract for every non-skipped file.

use std::path::{Path, PathBuf};

use ionconform_core::TextRecognizer;
use ionconform_harness::{classify_all, discover, SkipSet};

/// Workspace root is two levels up from this crate's manifest.
fn corpus_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../testdata")
        .canonicalize()
        .expect("testdata corpus present at workspace root")
}

#[test]
fn every_corpus_file_classifies_as_labeled() {
    let root = corpus_root();
    let cases = discover(&root, &SkipSet::standard()).unwrap();
    assert!(!cases.is_empty(), "no corpus files found -- check paths");

    let verdicts = classify_all(&cases, &TextRecognizer::new());
    let failures: Vec<String> = verdicts
        .iter()
        .filter(|v| !v.passed())
        .map(|v| {
            format!(
                "{} ({}): {}",
                v.path.display(),
                v.label,
                v.failure.as_deref().unwrap_or("")
            )
        })
        .collect();
    assert!(
        failures.is_empty(),
        "{} of {} corpus files misclassified:\n{}",
        failures.len(),
        verdicts.len(),
        failures.join("\n")
    );
}

#[test]
fn every_skip_entry_matches_a_real_file() {
    // A skip entry matching nothing is tolerated at runtime but means
    // the corpus has drifted; keep the fixture tree honest here.
    let root = corpus_root();
    for entry in [
        "bad/invalidVersionMarker_ion_0_0.ion",
        "bad/invalidVersionMarker_ion_1234_0.ion",
        "bad/invalidVersionMarker_ion_1_1.ion",
        "bad/invalidVersionMarker_ion_2_0.ion",
        "bad/utf8/surrogate_5.ion",
        "good/utf16.ion",
        "good/utf32.ion",
    ] {
        assert!(
            root.join(entry).is_file(),
            "skip entry without a corpus file: {}",
            entry
        );
    }
}

#[test]
fn skipped_files_are_not_discovered() {
    let root = corpus_root();
    let cases = discover(&root, &SkipSet::standard()).unwrap();
    for case in &cases {
        let relative = case.path.strip_prefix(&root).unwrap();
        assert!(
            !SkipSet::standard().contains(relative),
            "skipped file was discovered: {}",
            relative.display()
        );
    }
}

#[test]
fn suite_classification_is_stable_across_runs() {
    let root = corpus_root();
    let cases = discover(&root, &SkipSet::standard()).unwrap();
    let recognizer = TextRecognizer::new();

    let mut first = classify_all(&cases, &recognizer);
    first.sort_by(|a, b| a.path.cmp(&b.path));
    let mut second = classify_all(&cases, &recognizer);
    second.sort_by(|a, b| a.path.cmp(&b.path));

    let summary = |verdicts: &[ionconform_harness::Verdict]| -> Vec<(PathBuf, bool)> {
        verdicts
            .iter()
            .map(|v| (v.path.clone(), v.passed()))
            .collect()
    };
    assert_eq!(summary(&first), summary(&second));
}
