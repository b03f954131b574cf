//! Static prompt cache with stat-based invalidation.
//!
//! Thread-safe via `RwLock`. Readers validate the cached prompt against its
//! baseline under a shared lock; a stale or empty cache escalates to the
//! exclusive lock, re-checks, and only then rebuilds.

use crate::context::baseline::Baseline;
use crate::context::sources::WatchedSources;
use crate::context::staleness::is_stale;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::SystemTime;
use tracing::debug;

/// One cache generation: the prompt and the baseline it was built against.
///
/// Replaced whole under the write lock, never field by field.
#[derive(Debug, Default)]
struct CacheEntry {
    prompt: String,
    baseline: Option<Baseline>,
}

impl CacheEntry {
    /// The cached prompt, if present and still valid. Caller holds the lock.
    fn fresh_prompt(&self, sources: &WatchedSources) -> Option<&str> {
        if self.prompt.is_empty() || is_stale(self.baseline.as_ref(), sources) {
            None
        } else {
            Some(&self.prompt)
        }
    }
}

/// Caches an expensive, file-derived prompt for a fixed set of sources.
#[derive(Debug)]
pub struct PromptCache {
    sources: WatchedSources,
    entry: RwLock<CacheEntry>,
}

impl PromptCache {
    pub fn new(sources: WatchedSources) -> Self {
        Self {
            sources,
            entry: RwLock::new(CacheEntry::default()),
        }
    }

    pub fn sources(&self) -> &WatchedSources {
        &self.sources
    }

    // The entry is only ever swapped whole, so a poisoned lock still guards
    // a consistent value.
    fn read(&self) -> RwLockReadGuard<'_, CacheEntry> {
        self.entry.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CacheEntry> {
        self.entry.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the cached prompt, rebuilding it with `build` if any source changed.
    pub fn get_or_build<F>(&self, build: F) -> String
    where
        F: FnOnce() -> String,
    {
        {
            let entry = self.read();
            if let Some(prompt) = entry.fresh_prompt(&self.sources) {
                return prompt.to_string();
            }
        }

        let mut entry = self.write();

        // Another writer may have rebuilt while this one waited.
        if let Some(prompt) = entry.fresh_prompt(&self.sources) {
            return prompt.to_string();
        }

        // Capture before building: a file edited mid-build ends up newer than
        // the baseline and is caught on the next check.
        let baseline = Baseline::capture(&self.sources);
        let prompt = build();
        *entry = CacheEntry {
            prompt: prompt.clone(),
            baseline: Some(baseline),
        };

        debug!(length = prompt.len(), "System prompt cached");
        prompt
    }

    /// Drop the cached prompt and baseline. Source files are not touched.
    pub fn invalidate(&self) {
        *self.write() = CacheEntry::default();
        debug!("System prompt cache invalidated");
    }

    /// Whether a prompt is currently cached (valid or not).
    pub fn is_cached(&self) -> bool {
        !self.read().prompt.is_empty()
    }

    /// Run the staleness check against the current baseline.
    pub fn sources_changed(&self) -> bool {
        let entry = self.read();
        is_stale(entry.baseline.as_ref(), &self.sources)
    }

    /// The baseline mtime of the current generation; `None` before the first
    /// build and after [`invalidate`](Self::invalidate).
    pub fn baseline_mtime(&self) -> Option<SystemTime> {
        self.read().baseline.as_ref().map(Baseline::max_mtime)
    }
}
