//! Baseline snapshots: the filesystem state a cached prompt was built against.

use crate::context::sources::WatchedSources;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::warn;
use walkdir::WalkDir;

/// Baseline mtime used when no watched path exists.
///
/// Non-zero so an empty workspace is not perpetually stale, and earlier than
/// any real file so anything created later compares strictly newer. Assumes
/// on-disk mtimes are after the Unix epoch.
pub fn empty_workspace_mtime() -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(1)
}

/// Existence of every watched path plus the newest mtime seen among them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Baseline {
    existed: HashMap<PathBuf, bool>,
    max_mtime: SystemTime,
}

impl Baseline {
    /// Snapshot the watched sources as they are right now.
    ///
    /// Missing files and directories are recorded as absent, never reported.
    pub fn capture(sources: &WatchedSources) -> Self {
        let mut existed = HashMap::with_capacity(sources.files().len() + 1);
        let mut max_mtime: Option<SystemTime> = None;

        let mut fold = |mtime: SystemTime| {
            max_mtime = Some(max_mtime.map_or(mtime, |cur| cur.max(mtime)));
        };

        for watched in sources.watched() {
            let meta = std::fs::metadata(&watched.path).ok();
            if let Some(mtime) = meta.as_ref().and_then(|m| m.modified().ok()) {
                fold(mtime);
            }
            existed.insert(watched.path, meta.is_some());
        }

        // Editing a file does not bump its parent directory's mtime, so the
        // skills tree is folded in file by file.
        file_mtimes(sources.dir()).for_each(&mut fold);

        Self {
            existed,
            max_mtime: max_mtime.unwrap_or_else(empty_workspace_mtime),
        }
    }

    /// Whether `path` existed at capture time; `None` if it was never recorded.
    pub fn existed(&self, path: &Path) -> Option<bool> {
        self.existed.get(path).copied()
    }

    pub fn max_mtime(&self) -> SystemTime {
        self.max_mtime
    }
}

/// Modification times of every non-directory entry beneath `dir`, any depth.
///
/// Lazy, so callers can stop at the first interesting entry. A missing
/// directory yields nothing; other walk errors are logged and skipped.
pub(crate) fn file_mtimes(dir: &Path) -> impl Iterator<Item = SystemTime> + '_ {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) if entry.file_type().is_dir() => None,
            Ok(entry) => std::fs::metadata(entry.path())
                .and_then(|m| m.modified())
                .ok(),
            Err(err) => {
                let not_found = err
                    .io_error()
                    .is_some_and(|e| e.kind() == io::ErrorKind::NotFound);
                if !not_found {
                    warn!(dir = %dir.display(), error = %err, "Skills walk error");
                }
                None
            }
        })
}
