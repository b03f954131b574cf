//! The set of filesystem locations the static prompt is derived from.

use pincer_core::WorkspaceLayout;
use std::path::{Path, PathBuf};

/// How a watched location is checked for changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchKind {
    /// A single file: existence plus its own mtime.
    File,
    /// A directory: existence, its own mtime, and every file beneath it.
    DirectoryRecursive,
}

/// A location tracked for staleness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchedPath {
    pub path: PathBuf,
    pub kind: WatchKind,
}

/// Bootstrap files and the memory file, plus the skills directory.
///
/// Fixed for the lifetime of a cache; derived once from the workspace root.
#[derive(Debug, Clone)]
pub struct WatchedSources {
    files: Vec<PathBuf>,
    dir: PathBuf,
}

impl WatchedSources {
    pub fn from_layout(layout: &WorkspaceLayout) -> Self {
        let mut files = layout.bootstrap_files();
        files.push(layout.memory_file());
        Self {
            files,
            dir: layout.skills_dir(),
        }
    }

    /// Single-file paths (bootstrap files and memory).
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// The recursively watched directory (skills).
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Every watched location with its kind, files first.
    pub fn watched(&self) -> Vec<WatchedPath> {
        self.files
            .iter()
            .map(|p| WatchedPath {
                path: p.clone(),
                kind: WatchKind::File,
            })
            .chain(std::iter::once(WatchedPath {
                path: self.dir.clone(),
                kind: WatchKind::DirectoryRecursive,
            }))
            .collect()
    }
}
