//! Skill discovery, metadata validation and prompt summaries.
//!
//! A skill is a directory containing a `SKILL.md` file. Skills are discovered
//! in three tiers, highest priority first:
//!
//! | Tier | Location |
//! |------|----------|
//! | workspace | `<workspace>/skills/` |
//! | global | `~/.pincer/skills/` |
//! | builtin | `<cwd>/skills/` |
//!
//! A name found in a higher tier shadows the same name in lower tiers.

pub mod frontmatter;
pub mod loader;

pub use frontmatter::SkillMetadata;
pub use loader::{SkillInfo, SkillSource, SkillsLoader, MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH};
