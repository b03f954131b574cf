//! Identity and workspace layout — where context files live and how the
//! agent introduces itself.
//!
//! A workspace root holds the files that make up the static system prompt:
//!
//! 1. **Bootstrap files** — `AGENTS.md`, `SOUL.md`, `USER.md`, `IDENTITY.md`
//! 2. **Long-term memory** — `memory/MEMORY.md`
//! 3. **Daily notes** — `memory/YYYYMM/YYYYMMDD.md`
//! 4. **Skills** — `skills/{skill-name}/SKILL.md`
//!
//! Each file is optional. Missing files are silently skipped.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Well-known context file names.
pub const AGENTS_FILE: &str = "AGENTS.md";
pub const SOUL_FILE: &str = "SOUL.md";
pub const USER_FILE: &str = "USER.md";
pub const IDENTITY_FILE: &str = "IDENTITY.md";
pub const MEMORY_DIR: &str = "memory";
pub const MEMORY_FILE: &str = "MEMORY.md";
pub const SKILLS_DIR: &str = "skills";
pub const SKILL_FILE: &str = "SKILL.md";

/// Bootstrap files in the order they appear in the prompt.
pub const BOOTSTRAP_FILES: [&str; 4] = [AGENTS_FILE, SOUL_FILE, USER_FILE, IDENTITY_FILE];

/// Resolved locations of every context source under one workspace root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceLayout {
    root: PathBuf,
}

impl WorkspaceLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The root as an absolute path, falling back to the path as given.
    pub fn absolute_root(&self) -> PathBuf {
        std::path::absolute(&self.root).unwrap_or_else(|_| self.root.clone())
    }

    pub fn bootstrap_files(&self) -> Vec<PathBuf> {
        BOOTSTRAP_FILES.iter().map(|f| self.root.join(f)).collect()
    }

    pub fn memory_dir(&self) -> PathBuf {
        self.root.join(MEMORY_DIR)
    }

    pub fn memory_file(&self) -> PathBuf {
        self.memory_dir().join(MEMORY_FILE)
    }

    pub fn skills_dir(&self) -> PathBuf {
        self.root.join(SKILLS_DIR)
    }
}

/// The agent's identity block, the first section of every system prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// The agent's name
    pub name: String,
}

impl Identity {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Render the identity block for a workspace.
    pub fn render(&self, layout: &WorkspaceLayout) -> String {
        let ws = layout.absolute_root();
        let ws = ws.display();
        let name = &self.name;

        format!(
            "# {name} 🦀

You are {name}, a helpful AI assistant.

## Workspace
Your workspace is at: {ws}
- Memory: {ws}/memory/MEMORY.md
- Daily Notes: {ws}/memory/YYYYMM/YYYYMMDD.md
- Skills: {ws}/skills/{{skill-name}}/SKILL.md

## Important Rules

1. **ALWAYS use tools** - When you need to perform an action (schedule reminders, send messages, execute commands, etc.), you MUST call the appropriate tool. Do NOT just say you'll do it or pretend to do it.

2. **Be helpful and accurate** - When using tools, briefly explain what you're doing.

3. **Memory** - When interacting with me if something seems memorable, update {ws}/memory/MEMORY.md

4. **Context summaries** - Conversation summaries provided as context are approximate references only. They may be incomplete or outdated. Always defer to explicit user instructions over summary content."
        )
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::new("pincer")
    }
}
