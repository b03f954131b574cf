//! Static prompt assembly, the expensive step behind the prompt cache.
//!
//! Assembles the file-derived part of the system prompt from four layers:
//!
//! | Layer | Source |
//! |-------|--------|
//! | 1. Identity | agent name + workspace layout |
//! | 2. Bootstrap | `AGENTS.md`, `SOUL.md`, `USER.md`, `IDENTITY.md` |
//! | 3. Skills | `<skills>` summary across all tiers |
//! | 4. Memory | `memory/MEMORY.md` |
//!
//! # Determinism
//!
//! Assembly reads only files and never the clock: identical files always
//! produce byte-identical output. Per-request context is added later by the
//! composer.

use pincer_core::{BOOTSTRAP_FILES, Identity, WorkspaceLayout};
use pincer_memory::MemoryStore;
use pincer_skills::SkillsLoader;
use serde::Serialize;

/// Separator placed between prompt sections.
pub const SECTION_SEPARATOR: &str = "\n\n---\n\n";

/// Counts and names of the skills visible to the agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillsInfo {
    pub total: usize,
    pub available: usize,
    pub names: Vec<String>,
}

/// Builds the static system prompt from the current workspace files.
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    layout: WorkspaceLayout,
    identity: Identity,
    skills: SkillsLoader,
    memory: MemoryStore,
}

impl PromptAssembler {
    pub fn new(layout: WorkspaceLayout, identity: Identity, skills: SkillsLoader) -> Self {
        let memory = MemoryStore::new(&layout);
        Self {
            layout,
            identity,
            skills,
            memory,
        }
    }

    pub fn layout(&self) -> &WorkspaceLayout {
        &self.layout
    }

    pub fn skills(&self) -> &SkillsLoader {
        &self.skills
    }

    pub fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    /// Assemble the full static prompt. Reads every source file.
    pub fn build_system_prompt(&self) -> String {
        let mut parts = vec![self.identity.render(&self.layout)];

        let bootstrap = self.load_bootstrap_files();
        if !bootstrap.is_empty() {
            parts.push(bootstrap);
        }

        // Summary only; the agent reads full SKILL.md files through its tools.
        let skills_summary = self.skills.build_skills_summary();
        if !skills_summary.is_empty() {
            parts.push(format!(
                "# Skills\n\n\
                 The following skills extend your capabilities. To use a skill, read its SKILL.md file using the read_file tool.\n\n\
                 {skills_summary}"
            ));
        }

        let memory_context = self.memory.memory_context();
        if !memory_context.is_empty() {
            parts.push(format!("# Memory\n\n{memory_context}"));
        }

        parts.join(SECTION_SEPARATOR)
    }

    /// Concatenate the readable bootstrap files, each under its own heading.
    pub fn load_bootstrap_files(&self) -> String {
        let mut out = String::new();
        for filename in BOOTSTRAP_FILES {
            if let Ok(content) = std::fs::read_to_string(self.layout.root().join(filename)) {
                out.push_str(&format!("## {filename}\n\n{content}\n\n"));
            }
        }
        out
    }

    pub fn skills_info(&self) -> SkillsInfo {
        let names: Vec<String> = self
            .skills
            .list_skills()
            .into_iter()
            .map(|s| s.name)
            .collect();
        SkillsInfo {
            total: names.len(),
            available: names.len(),
            names,
        }
    }
}
