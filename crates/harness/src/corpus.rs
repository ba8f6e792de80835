//! Corpus discovery.
//!
//! A corpus root contains two labeled subtrees, `good/` and `bad/`,
//! each recursively holding `.ion` fixture files. Discovery enumerates
//! both, drops anything in the skip set, and labels each surviving file
//! by the subtree it was found under. Test identity is the file path,
//! never the discovery position, so the unspecified directory-listing
//! order does not matter.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::ConfigError;

/// Expected outcome for one corpus file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Good,
    Bad,
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Good => write!(f, "GOOD"),
            Label::Bad => write!(f, "BAD"),
        }
    }
}

/// One discovered corpus file. Created once at discovery time and
/// consumed exactly once by the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub path: PathBuf,
    pub label: Label,
}

/// Corpus-root-relative paths excluded from discovery.
///
/// Built once at startup and passed by reference into discovery; there
/// is no global state. An entry that matches nothing is a silent no-op,
/// which usually means the corpus has drifted.
#[derive(Debug, Clone, Default)]
pub struct SkipSet {
    entries: HashSet<PathBuf>,
}

impl SkipSet {
    pub fn empty() -> Self {
        SkipSet::default()
    }

    pub fn new<I, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        SkipSet {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// The curated standard skip set:
    ///
    /// - version-marker files the recognizer accepts because non-1.0
    ///   marker validation is a known grammar gap
    /// - one Unicode-escape surrogate case the grammar does not reject
    /// - the UTF-16/UTF-32 fixtures, which need a separate decoding path
    ///   and are out of scope for a UTF-8 harness
    pub fn standard() -> Self {
        SkipSet::new([
            "bad/invalidVersionMarker_ion_0_0.ion",
            "bad/invalidVersionMarker_ion_1234_0.ion",
            "bad/invalidVersionMarker_ion_1_1.ion",
            "bad/invalidVersionMarker_ion_2_0.ion",
            "bad/utf8/surrogate_5.ion",
            "good/utf16.ion",
            "good/utf32.ion",
        ])
    }

    /// Whether the corpus-root-relative `path` is excluded.
    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Recursively enumerate the `good/` and `bad/` subtrees under `root`,
/// returning one labeled [`TestCase`] per non-skipped `.ion` file.
///
/// A missing root or subtree is a [`ConfigError`]: a startup
/// precondition, not a per-file result.
pub fn discover(root: &Path, skip: &SkipSet) -> Result<Vec<TestCase>, ConfigError> {
    if !root.is_dir() {
        return Err(ConfigError::RootNotADirectory {
            path: root.to_owned(),
        });
    }

    let mut cases = Vec::new();
    for (subtree, label) in [("good", Label::Good), ("bad", Label::Bad)] {
        let dir = root.join(subtree);
        if !dir.is_dir() {
            return Err(ConfigError::MissingSubtree { path: dir });
        }
        add_ion_files(root, &dir, label, skip, &mut cases)?;
    }
    Ok(cases)
}

fn add_ion_files(
    root: &Path,
    dir: &Path,
    label: Label,
    skip: &SkipSet,
    cases: &mut Vec<TestCase>,
) -> Result<(), ConfigError> {
    let entries = std::fs::read_dir(dir).map_err(|source| ConfigError::Unreadable {
        path: dir.to_owned(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| ConfigError::Unreadable {
            path: dir.to_owned(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            add_ion_files(root, &path, label, skip, cases)?;
        } else if path.extension().and_then(|e| e.to_str()) == Some("ion") {
            let relative = path.strip_prefix(root).unwrap_or(&path);
            if !skip.contains(relative) {
                cases.push(TestCase { path, label });
            }
        }
    }
    Ok(())
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
