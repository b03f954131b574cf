//! Filesystem skill scanner.
//!
//! Scans each tier directory for child folders containing `SKILL.md`,
//! validates their metadata and renders the `<skills>` summary the system
//! prompt embeds. Nothing here is cached: every call re-reads the disk, and
//! the prompt cache decides when that is necessary.

use crate::frontmatter::{self, SkillMetadata};
use pincer_core::error::SkillError;
use pincer_core::identity::SKILL_FILE;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::warn;

pub const MAX_NAME_LENGTH: usize = 64;
pub const MAX_DESCRIPTION_LENGTH: usize = 1024;

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9]+(-[a-zA-Z0-9]+)*$").expect("valid skill name pattern")
});

/// Where a skill was discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillSource {
    Workspace,
    Global,
    Builtin,
}

impl SkillSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillSource::Workspace => "workspace",
            SkillSource::Global => "global",
            SkillSource::Builtin => "builtin",
        }
    }
}

impl std::fmt::Display for SkillSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A discovered, validated skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillInfo {
    pub name: String,
    pub description: String,
    /// Path to the skill's `SKILL.md`
    pub path: PathBuf,
    pub source: SkillSource,
}

impl SkillInfo {
    /// Check name and description limits, collecting every violation.
    pub fn validate(&self) -> Result<(), Vec<SkillError>> {
        let mut errors = Vec::new();

        if self.name.is_empty() {
            errors.push(SkillError::MissingName);
        } else {
            if self.name.len() > MAX_NAME_LENGTH {
                errors.push(SkillError::NameTooLong { max: MAX_NAME_LENGTH });
            }
            if !NAME_PATTERN.is_match(&self.name) {
                errors.push(SkillError::InvalidName);
            }
        }

        if self.description.is_empty() {
            errors.push(SkillError::MissingDescription);
        } else if self.description.len() > MAX_DESCRIPTION_LENGTH {
            errors.push(SkillError::DescriptionTooLong {
                max: MAX_DESCRIPTION_LENGTH,
            });
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Discovers skills across the workspace, global and builtin tiers.
#[derive(Debug, Clone)]
pub struct SkillsLoader {
    workspace_skills: PathBuf,
    global_skills: Option<PathBuf>,
    builtin_skills: Option<PathBuf>,
}

impl SkillsLoader {
    pub fn new(
        workspace_skills: impl Into<PathBuf>,
        global_skills: Option<PathBuf>,
        builtin_skills: Option<PathBuf>,
    ) -> Self {
        Self {
            workspace_skills: workspace_skills.into(),
            global_skills,
            builtin_skills,
        }
    }

    /// Tier directories in priority order.
    fn tiers(&self) -> impl Iterator<Item = (&Path, SkillSource)> {
        [
            Some((self.workspace_skills.as_path(), SkillSource::Workspace)),
            self.global_skills.as_deref().map(|d| (d, SkillSource::Global)),
            self.builtin_skills.as_deref().map(|d| (d, SkillSource::Builtin)),
        ]
        .into_iter()
        .flatten()
    }

    /// List all valid skills, deduplicated by name with tier precedence.
    pub fn list_skills(&self) -> Vec<SkillInfo> {
        let mut skills = Vec::new();
        let mut seen = HashSet::new();

        for (dir, source) in self.tiers() {
            for skill in scan_tier(dir, source) {
                if seen.insert(skill.name.clone()) {
                    skills.push(skill);
                }
            }
        }

        skills
    }

    /// Load a skill body (frontmatter stripped), searching tiers in priority order.
    pub fn load_skill(&self, name: &str) -> Option<String> {
        self.tiers().find_map(|(dir, _)| {
            std::fs::read_to_string(dir.join(name).join(SKILL_FILE))
                .ok()
                .map(|content| frontmatter::strip(&content))
        })
    }

    /// Like [`load_skill`](Self::load_skill) but reports a missing skill as an error.
    pub fn require_skill(&self, name: &str) -> Result<String, SkillError> {
        self.load_skill(name)
            .ok_or_else(|| SkillError::NotFound(name.to_string()))
    }

    /// Render the full bodies of the named skills; unknown names are skipped.
    pub fn load_skills_for_context(&self, names: &[String]) -> String {
        names
            .iter()
            .filter_map(|name| {
                self.load_skill(name)
                    .map(|content| format!("### Skill: {name}\n\n{content}"))
            })
            .collect::<Vec<_>>()
            .join("\n\n---\n\n")
    }

    /// Render the `<skills>` listing, or an empty string when there are none.
    pub fn build_skills_summary(&self) -> String {
        let skills = self.list_skills();
        if skills.is_empty() {
            return String::new();
        }

        let mut lines = vec!["<skills>".to_string()];
        for s in &skills {
            lines.push("  <skill>".into());
            lines.push(format!("    <name>{}</name>", escape_xml(&s.name)));
            lines.push(format!(
                "    <description>{}</description>",
                escape_xml(&s.description)
            ));
            lines.push(format!(
                "    <location>{}</location>",
                escape_xml(&s.path.display().to_string())
            ));
            lines.push(format!("    <source>{}</source>", s.source));
            lines.push("  </skill>".into());
        }
        lines.push("</skills>".into());

        lines.join("\n")
    }
}

/// Scan one tier. A missing or unreadable directory yields no skills.
fn scan_tier(dir: &Path, source: SkillSource) -> Vec<SkillInfo> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut dirs: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    // Sort for deterministic ordering
    dirs.sort();

    dirs.into_iter()
        .filter_map(|skill_dir| {
            let skill_file = skill_dir.join(SKILL_FILE);
            if !skill_file.is_file() {
                return None;
            }

            let dir_name = skill_dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let meta = read_metadata(&skill_file, &dir_name);
            let info = SkillInfo {
                name: meta.name,
                description: meta.description,
                path: skill_file,
                source,
            };

            match info.validate() {
                Ok(()) => Some(info),
                Err(errors) => {
                    let reasons: Vec<String> = errors.iter().map(ToString::to_string).collect();
                    warn!(
                        name = %info.name,
                        source = %source,
                        error = %reasons.join("; "),
                        "Invalid skill skipped"
                    );
                    None
                }
            }
        })
        .collect()
}

/// Read a skill's metadata. Without frontmatter the directory name is used
/// and the description is left empty.
fn read_metadata(skill_file: &Path, dir_name: &str) -> SkillMetadata {
    match std::fs::read_to_string(skill_file) {
        Ok(content) => match frontmatter::extract(&content) {
            Some(fm) => frontmatter::parse(fm),
            None => SkillMetadata {
                name: dir_name.to_string(),
                description: String::new(),
            },
        },
        Err(e) => {
            warn!(skill_path = %skill_file.display(), error = %e, "Failed to read skill metadata");
            SkillMetadata {
                name: dir_name.to_string(),
                description: String::new(),
            }
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_skill(root: &Path, dir: &str, content: &str) {
        let skill_dir = root.join(dir);
        fs::create_dir_all(&skill_dir).unwrap();
        fs::write(skill_dir.join(SKILL_FILE), content).unwrap();
    }

    fn skill_md(name: &str, description: &str) -> String {
        format!("---\nname: {name}\ndescription: \"{description}\"\n---\n# {name}\nBody of {name}.")
    }

    #[test]
    fn lists_valid_skills_from_workspace() {
        let ws = tempfile::tempdir().unwrap();
        write_skill(ws.path(), "github", &skill_md("github", "GitHub helper"));
        write_skill(ws.path(), "weather", &skill_md("weather", "Forecasts"));

        let loader = SkillsLoader::new(ws.path(), None, None);
        let skills = loader.list_skills();
        let names: Vec<_> = skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["github", "weather"]);
        assert!(skills.iter().all(|s| s.source == SkillSource::Workspace));
    }

    #[test]
    fn workspace_shadows_global_and_builtin() {
        let ws = tempfile::tempdir().unwrap();
        let global = tempfile::tempdir().unwrap();
        let builtin = tempfile::tempdir().unwrap();
        write_skill(ws.path(), "shared", &skill_md("shared", "from workspace"));
        write_skill(global.path(), "shared", &skill_md("shared", "from global"));
        write_skill(global.path(), "only-global", &skill_md("only-global", "g"));
        write_skill(builtin.path(), "only-global", &skill_md("only-global", "b"));
        write_skill(builtin.path(), "builtin-one", &skill_md("builtin-one", "b"));

        let loader = SkillsLoader::new(
            ws.path(),
            Some(global.path().to_path_buf()),
            Some(builtin.path().to_path_buf()),
        );
        let skills = loader.list_skills();
        assert_eq!(skills.len(), 3);

        let shared = skills.iter().find(|s| s.name == "shared").unwrap();
        assert_eq!(shared.description, "from workspace");
        let only_global = skills.iter().find(|s| s.name == "only-global").unwrap();
        assert_eq!(only_global.source, SkillSource::Global);
        let builtin_one = skills.iter().find(|s| s.name == "builtin-one").unwrap();
        assert_eq!(builtin_one.source, SkillSource::Builtin);
    }

    #[test]
    fn invalid_skills_are_excluded() {
        let ws = tempfile::tempdir().unwrap();
        write_skill(ws.path(), "no-frontmatter", "# Just markdown");
        write_skill(ws.path(), "bad-name", &skill_md("bad_name!", "desc"));
        write_skill(ws.path(), "long-name", &skill_md(&"a".repeat(65), "desc"));
        write_skill(ws.path(), "good", &skill_md("good", "fine"));
        fs::create_dir_all(ws.path().join("empty-dir")).unwrap();

        let loader = SkillsLoader::new(ws.path(), None, None);
        let skills = loader.list_skills();
        assert_eq!(skills.len(), 1);
        assert_eq!(skills[0].name, "good");
    }

    #[test]
    fn validate_collects_all_errors() {
        let info = SkillInfo {
            name: "-".repeat(70),
            description: "d".repeat(1025),
            path: PathBuf::from("/x/SKILL.md"),
            source: SkillSource::Global,
        };
        let errors = info.validate().unwrap_err();
        assert_eq!(
            errors,
            vec![
                SkillError::NameTooLong { max: 64 },
                SkillError::InvalidName,
                SkillError::DescriptionTooLong { max: 1024 },
            ]
        );
    }

    #[test]
    fn missing_directories_yield_nothing() {
        let loader = SkillsLoader::new(
            "/nonexistent/ws/skills",
            Some(PathBuf::from("/nonexistent/global")),
            None,
        );
        assert!(loader.list_skills().is_empty());
        assert_eq!(loader.build_skills_summary(), "");
    }

    #[test]
    fn summary_escapes_xml() {
        let ws = tempfile::tempdir().unwrap();
        write_skill(ws.path(), "xml", &skill_md("xml", "Parse <tags> & entities"));

        let summary = SkillsLoader::new(ws.path(), None, None).build_skills_summary();
        assert!(summary.starts_with("<skills>\n  <skill>"));
        assert!(summary.contains("<name>xml</name>"));
        assert!(summary.contains("Parse &lt;tags&gt; &amp; entities"));
        assert!(summary.contains("<source>workspace</source>"));
        assert!(summary.ends_with("</skills>"));
    }

    #[test]
    fn load_skill_strips_frontmatter_and_respects_priority() {
        let ws = tempfile::tempdir().unwrap();
        let global = tempfile::tempdir().unwrap();
        write_skill(ws.path(), "notes", &skill_md("notes", "ws"));
        write_skill(global.path(), "notes", "global body");
        write_skill(global.path(), "extra", "---\nname: extra\n---\nExtra body");

        let loader = SkillsLoader::new(ws.path(), Some(global.path().to_path_buf()), None);
        let body = loader.load_skill("notes").unwrap();
        assert!(body.starts_with("# notes"));
        assert!(!body.contains("description:"));
        assert_eq!(loader.load_skill("extra").as_deref(), Some("Extra body"));
        assert!(loader.load_skill("missing").is_none());
        assert_eq!(
            loader.require_skill("missing"),
            Err(SkillError::NotFound("missing".into()))
        );
    }

    #[test]
    fn skills_for_context_joins_known_skills() {
        let ws = tempfile::tempdir().unwrap();
        write_skill(ws.path(), "a", &skill_md("a", "first"));
        write_skill(ws.path(), "b", &skill_md("b", "second"));

        let loader = SkillsLoader::new(ws.path(), None, None);
        let ctx = loader.load_skills_for_context(&["a".into(), "ghost".into(), "b".into()]);
        assert!(ctx.starts_with("### Skill: a\n\n# a"));
        assert!(ctx.contains("\n\n---\n\n### Skill: b"));
        assert!(!ctx.contains("ghost"));
        assert!(loader.load_skills_for_context(&[]).is_empty());
    }
}
