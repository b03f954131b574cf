//! System prompt caching and per-request message assembly.
//!
//! # Pipeline
//!
//! | Stage | Module | Cached |
//! |-------|--------|--------|
//! | 1. Watched sources | [`sources`] | fixed per builder |
//! | 2. Baseline snapshot | [`baseline`] | with the prompt |
//! | 3. Staleness check | [`staleness`] | no |
//! | 4. Static prompt | [`assembler`] via [`cache`] | yes |
//! | 5. Dynamic context + summary | [`composer`] | never |
//! | 6. History cleanup | [`sanitize`] | no |
//!
//! [`ContextBuilder`] ties the stages together.

pub mod assembler;
pub mod baseline;
pub mod builder;
pub mod cache;
pub mod composer;
pub mod sanitize;
pub mod sources;
pub mod staleness;

pub use assembler::{PromptAssembler, SECTION_SEPARATOR, SkillsInfo};
pub use baseline::{Baseline, empty_workspace_mtime};
pub use builder::{ContextBuilder, DEFAULT_PREVIEW_CHARS};
pub use cache::PromptCache;
pub use composer::{SUMMARY_PREFIX, build_dynamic_context, compose_system_message};
pub use sanitize::sanitize_history;
pub use sources::{WatchKind, WatchedPath, WatchedSources};
pub use staleness::is_stale;
