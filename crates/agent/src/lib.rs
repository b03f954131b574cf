//! Prompt context for the pincer agent.
//!
//! Every turn the agent sends the model one system message followed by the
//! conversation. The system message has two halves:
//!
//! 1. A **static prompt** built from workspace files (identity, bootstrap
//!    files, skills, long-term memory). Building it reads every file, so it
//!    is cached and rebuilt only when a watched file changes on disk.
//! 2. **Dynamic context** (time, runtime, session) and an optional summary,
//!    recomputed on every call and never cached.
//!
//! History is sanitized on the way in so providers never see orphaned tool
//! results or unanchored tool-call turns.

pub mod context;

pub use context::{
    ContextBuilder, PromptAssembler, PromptCache, SkillsInfo, WatchedSources, sanitize_history,
};
