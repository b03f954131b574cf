//! Staleness detection against a captured [`Baseline`].
//!
//! Nothing here locks. Callers pass a baseline borrowed from inside the
//! cache's lock guard, and the lock is not reentrant, so these functions
//! must never reach back into the cache.

use crate::context::baseline::{Baseline, file_mtimes};
use crate::context::sources::WatchedSources;
use std::path::Path;

/// Whether the cached prompt built against `baseline` must be rebuilt.
///
/// The caller must hold at least a read lock on the state owning `baseline`.
/// Checks short-circuit in this order:
///
/// 1. no baseline captured yet
/// 2. any watched file created, deleted, or modified
/// 3. the watched directory itself created, deleted, or modified
/// 4. any file beneath the directory modified, at any depth
pub fn is_stale(baseline: Option<&Baseline>, sources: &WatchedSources) -> bool {
    let Some(baseline) = baseline else {
        return true;
    };

    if sources
        .files()
        .iter()
        .any(|path| path_changed(baseline, path))
    {
        return true;
    }

    if path_changed(baseline, sources.dir()) {
        return true;
    }

    modified_since(sources.dir(), baseline)
}

/// Four-way existence check, then mtime.
///
/// | at capture | now | result |
/// |---|---|---|
/// | present | present | stale iff mtime is newer |
/// | present | absent | stale (deleted) |
/// | absent | present | stale (created) |
/// | absent | absent | unchanged |
///
/// A path the baseline never recorded is stale.
fn path_changed(baseline: &Baseline, path: &Path) -> bool {
    let Some(existed_before) = baseline.existed(path) else {
        return true;
    };

    let meta = std::fs::metadata(path).ok();
    match (existed_before, meta) {
        (true, None) | (false, Some(_)) => true,
        (false, None) => false,
        (true, Some(meta)) => meta
            .modified()
            .map_or(true, |mtime| mtime > baseline.max_mtime()),
    }
}

/// Whether any file under `dir` is newer than the baseline. Stops at the first hit.
fn modified_since(dir: &Path, baseline: &Baseline) -> bool {
    file_mtimes(dir).any(|mtime| mtime > baseline.max_mtime())
}
