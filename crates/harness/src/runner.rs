//! Suite orchestration.
//!
//! Discovery happens up front; each discovered case is then a
//! share-nothing unit of work -- decode, recognize, walk, classify --
//! with no ordering dependency on any other case. The runner fans the
//! cases out over a bounded pool of scoped worker threads, accumulates
//! verdicts per worker, merges, and reports in sorted path order so the
//! TAP output is deterministic regardless of scheduling.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use ionconform_core::Recognizer;

use crate::classify::{classify, Verdict};
use crate::config::ConfigError;
use crate::corpus::{discover, SkipSet, TestCase};
use crate::pipeline::check_file;
use crate::tap::Tap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunResult {
    pub total: usize,
    pub failed: usize,
}

/// Classify every case, in parallel, returning one verdict per case.
///
/// Workers pull indices from a shared counter; each keeps a local
/// verdict list and the lists are merged after the scope joins, so no
/// synchronization beyond the counter is needed.
pub fn classify_all<R>(cases: &[TestCase], recognizer: &R) -> Vec<Verdict>
where
    R: Recognizer + Sync,
{
    if cases.is_empty() {
        return Vec::new();
    }
    let workers = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(cases.len());

    let next = AtomicUsize::new(0);
    let mut verdicts = Vec::with_capacity(cases.len());
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                scope.spawn(|| {
                    let mut local = Vec::new();
                    loop {
                        let i = next.fetch_add(1, Ordering::Relaxed);
                        if i >= cases.len() {
                            break;
                        }
                        let case = &cases[i];
                        let outcome = check_file(&case.path, recognizer);
                        local.push(classify(case, &outcome));
                    }
                    local
                })
            })
            .collect();
        for handle in handles {
            match handle.join() {
                Ok(local) => verdicts.extend(local),
                Err(payload) => std::panic::resume_unwind(payload),
            }
        }
    });
    verdicts
}

/// Discover and classify the whole corpus, emitting TAP to stdout.
pub fn run_suite<R>(root: &Path, skip: &SkipSet, recognizer: &R) -> Result<RunResult, ConfigError>
where
    R: Recognizer + Sync,
{
    let cases = discover(root, skip)?;
    let mut verdicts = classify_all(&cases, recognizer);
    verdicts.sort_by(|a, b| a.path.cmp(&b.path));

    let mut tap = Tap::new();
    for verdict in &verdicts {
        let relative = verdict.path.strip_prefix(root).unwrap_or(&verdict.path);
        let name = format!("{}: {}", verdict.label, relative.display());
        match &verdict.failure {
            None => tap.ok(&name),
            Some(detail) => tap.not_ok(&name, detail),
        }
    }
    let failed = tap.failure_count();
    tap.finish();

    Ok(RunResult {
        total: verdicts.len(),
        failed,
    })
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
