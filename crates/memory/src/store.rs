//! File-based memory store — markdown long-term memory plus daily notes.
//!
//! Storage layout under the workspace:
//!
//! ```text
//! memory/
//!   MEMORY.md             long-term facts, injected into the system prompt
//!   202610/20261016.md    daily notes, one file per day
//! ```
//!
//! Only `MEMORY.md` feeds the static prompt. Daily notes are read on demand,
//! which keeps the set of files the prompt cache has to watch closed.

use chrono::{Duration, NaiveDate};
use pincer_core::WorkspaceLayout;
use pincer_core::error::MemoryError;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Separator between the sections of a combined memory view.
const SECTION_SEPARATOR: &str = "\n\n---\n\n";

/// Markdown memory rooted at `<workspace>/memory`.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    memory_dir: PathBuf,
    memory_file: PathBuf,
}

impl MemoryStore {
    pub fn new(layout: &WorkspaceLayout) -> Self {
        Self {
            memory_dir: layout.memory_dir(),
            memory_file: layout.memory_file(),
        }
    }

    pub fn memory_file(&self) -> &Path {
        &self.memory_file
    }

    /// Read `MEMORY.md`, returning an empty string when it does not exist.
    pub fn read_long_term(&self) -> String {
        std::fs::read_to_string(&self.memory_file).unwrap_or_default()
    }

    /// Replace the contents of `MEMORY.md`.
    pub fn write_long_term(&self, content: &str) -> Result<(), MemoryError> {
        ensure_dir(&self.memory_dir)?;
        std::fs::write(&self.memory_file, content).map_err(|e| MemoryError::Write {
            path: self.memory_file.clone(),
            reason: e.to_string(),
        })?;
        debug!(bytes = content.len(), "Long-term memory written");
        Ok(())
    }

    /// Path of the daily note for `date`: `memory/YYYYMM/YYYYMMDD.md`.
    pub fn daily_note_path(&self, date: NaiveDate) -> PathBuf {
        self.memory_dir
            .join(date.format("%Y%m").to_string())
            .join(format!("{}.md", date.format("%Y%m%d")))
    }

    /// Read the daily note for `date`, empty when none exists.
    pub fn read_daily_note(&self, date: NaiveDate) -> String {
        std::fs::read_to_string(self.daily_note_path(date)).unwrap_or_default()
    }

    /// Append a line of text to the daily note for `date`.
    ///
    /// New files start with a `# YYYY-MM-DD` header.
    pub fn append_daily_note(&self, date: NaiveDate, text: &str) -> Result<(), MemoryError> {
        let path = self.daily_note_path(date);
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }

        let is_new = !path.exists();
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| MemoryError::Write {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        let mut entry = String::new();
        if is_new {
            entry.push_str(&format!("# {}\n\n", date.format("%Y-%m-%d")));
        }
        entry.push_str(text.trim_end());
        entry.push('\n');

        file.write_all(entry.as_bytes())
            .map_err(|e| MemoryError::Write {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        debug!(path = %path.display(), "Daily note appended");
        Ok(())
    }

    /// Non-empty daily notes for the `days` days ending at `today`, newest first.
    pub fn recent_daily_notes(&self, today: NaiveDate, days: u32) -> String {
        (0..days)
            .filter_map(|offset| today.checked_sub_signed(Duration::days(i64::from(offset))))
            .map(|date| self.read_daily_note(date))
            .filter(|note| !note.trim().is_empty())
            .collect::<Vec<_>>()
            .join(SECTION_SEPARATOR)
    }

    /// The memory section of the static system prompt.
    ///
    /// Empty when `MEMORY.md` is absent or blank.
    pub fn memory_context(&self) -> String {
        let long_term = self.read_long_term();
        if long_term.trim().is_empty() {
            return String::new();
        }
        format!("## Long-term Memory\n\n{long_term}")
    }
}

fn ensure_dir(dir: &Path) -> Result<(), MemoryError> {
    std::fs::create_dir_all(dir).map_err(|e| MemoryError::Write {
        path: dir.to_path_buf(),
        reason: format!("Failed to create memory directory: {e}"),
    })
}
