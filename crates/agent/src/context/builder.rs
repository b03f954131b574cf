//! The context builder: cached static prompt plus per-request composition.

use crate::context::assembler::{PromptAssembler, SkillsInfo};
use crate::context::cache::PromptCache;
use crate::context::composer::{build_dynamic_context, compose_system_message, preview};
use crate::context::sanitize::sanitize_history;
use crate::context::sources::WatchedSources;
use pincer_config::AppConfig;
use pincer_core::{Identity, Message, MessageToolCall, WorkspaceLayout};
use pincer_skills::SkillsLoader;
use std::path::PathBuf;
use std::time::SystemTime;
use tracing::debug;

/// Default byte length of the system prompt preview logged at debug level.
pub const DEFAULT_PREVIEW_CHARS: usize = 500;

/// Builds the message list sent to the model on every turn.
///
/// Safe to share across threads; all methods take `&self`.
#[derive(Debug)]
pub struct ContextBuilder {
    assembler: PromptAssembler,
    cache: PromptCache,
    preview_chars: usize,
}

impl ContextBuilder {
    pub fn new(layout: WorkspaceLayout, identity: Identity, skills: SkillsLoader) -> Self {
        let cache = PromptCache::new(WatchedSources::from_layout(&layout));
        Self {
            assembler: PromptAssembler::new(layout, identity, skills),
            cache,
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }

    /// A builder over `root` with workspace skills only and the default identity.
    pub fn for_workspace(root: impl Into<PathBuf>) -> Self {
        let layout = WorkspaceLayout::new(root);
        let skills = SkillsLoader::new(layout.skills_dir(), None, None);
        Self::new(layout, Identity::default(), skills)
    }

    /// A builder with all three skill tiers resolved from `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        let layout = config.layout();
        let skills = SkillsLoader::new(
            layout.skills_dir(),
            Some(config.global_skills_dir()),
            Some(config.builtin_skills_dir()),
        );
        Self::new(layout, config.identity(), skills)
            .with_preview_chars(config.agent.preview_chars)
    }

    pub fn with_preview_chars(mut self, preview_chars: usize) -> Self {
        self.preview_chars = preview_chars;
        self
    }

    pub fn layout(&self) -> &WorkspaceLayout {
        self.assembler.layout()
    }

    pub fn assembler(&self) -> &PromptAssembler {
        &self.assembler
    }

    /// The static system prompt, rebuilt only when a watched source changed.
    pub fn get_prompt(&self) -> String {
        self.cache
            .get_or_build(|| self.assembler.build_system_prompt())
    }

    /// Force the next [`get_prompt`](Self::get_prompt) to rebuild.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate();
    }

    /// Whether any watched source changed since the last build.
    pub fn sources_changed(&self) -> bool {
        self.cache.sources_changed()
    }

    /// The newest source mtime seen by the last build; `None` when nothing is cached.
    pub fn cached_baseline_mtime(&self) -> Option<SystemTime> {
        self.cache.baseline_mtime()
    }

    /// Compose the full message list for one model request.
    ///
    /// The result always starts with exactly one system message. History is
    /// sanitized before it is appended, and `current_message` is appended as
    /// a user turn unless it is blank.
    pub fn build_messages(
        &self,
        history: Vec<Message>,
        summary: &str,
        current_message: &str,
        channel: &str,
        chat_id: &str,
    ) -> Vec<Message> {
        let static_prompt = self.get_prompt();
        let dynamic = build_dynamic_context(channel, chat_id);
        let system = compose_system_message(&static_prompt, &dynamic, summary);

        debug!(
            static_chars = static_prompt.len(),
            dynamic_chars = dynamic.len(),
            total_chars = system.content.len(),
            has_summary = !summary.is_empty(),
            cached = self.cache.is_cached(),
            "System prompt built"
        );
        debug!(
            preview = %preview(&system.content, self.preview_chars),
            "System prompt preview"
        );

        let history = sanitize_history(history);
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(system);
        messages.extend(history);

        if !current_message.trim().is_empty() {
            messages.push(Message::user(current_message));
        }

        messages
    }

    /// Append a tool result answering `tool_call_id`.
    pub fn add_tool_result(
        &self,
        messages: &mut Vec<Message>,
        tool_call_id: &str,
        tool_name: &str,
        result: &str,
    ) {
        let mut msg = Message::tool_result(tool_call_id, result);
        msg.metadata
            .insert("tool_name".into(), serde_json::Value::from(tool_name));
        messages.push(msg);
    }

    /// Append an assistant turn, carrying any tool calls it requested.
    pub fn add_assistant_message(
        &self,
        messages: &mut Vec<Message>,
        content: &str,
        tool_calls: Vec<MessageToolCall>,
    ) {
        messages.push(Message::assistant_with_tools(content, tool_calls));
    }

    pub fn skills_info(&self) -> SkillsInfo {
        self.assembler.skills_info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pincer_core::Role;
    use std::fs;
    use std::path::Path;
    use std::time::{Duration, UNIX_EPOCH};

    fn set_mtime(path: &Path, t: SystemTime) {
        fs::File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(t)
            .unwrap();
    }

    fn future(offset_secs: u64) -> SystemTime {
        let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap();
        UNIX_EPOCH + Duration::from_secs(now.as_secs() + 3600 + offset_secs)
    }

    fn workspace() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("memory")).unwrap();
        fs::create_dir_all(tmp.path().join("skills")).unwrap();
        tmp
    }

    fn write_skill(root: &Path, name: &str, description: &str) -> PathBuf {
        let dir = root.join("skills").join(name);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("SKILL.md");
        fs::write(
            &path,
            format!("---\nname: {name}\ndescription: {description}\n---\n# {name}\n"),
        )
        .unwrap();
        path
    }

    #[test]
    fn single_system_message_across_combinations() {
        let tmp = workspace();
        let cb = ContextBuilder::for_workspace(tmp.path());
        let history = || vec![Message::user("earlier"), Message::assistant("reply")];

        for (history, summary) in [
            (Vec::new(), ""),
            (Vec::new(), "we talked"),
            (history(), ""),
            (history(), "we talked"),
        ] {
            let msgs = cb.build_messages(history, summary, "hello", "", "");
            let systems = msgs.iter().filter(|m| m.role == Role::System).count();
            assert_eq!(systems, 1);
            assert_eq!(msgs[0].role, Role::System);
            assert_eq!(msgs.last().unwrap().role, Role::User);
            assert_eq!(msgs.last().unwrap().content, "hello");
        }
    }

    #[test]
    fn history_system_messages_are_stripped() {
        let tmp = workspace();
        let cb = ContextBuilder::for_workspace(tmp.path());
        let history = vec![
            Message::system("old prompt"),
            Message::user("hi"),
            Message::assistant("hello"),
        ];

        let msgs = cb.build_messages(history, "", "next", "", "");
        let roles: Vec<Role> = msgs.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant, Role::User]);
    }

    #[test]
    fn blank_current_message_not_appended() {
        let tmp = workspace();
        let cb = ContextBuilder::for_workspace(tmp.path());
        let msgs = cb.build_messages(vec![Message::user("hi")], "", "  \n\t", "", "");
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[1].content, "hi");
    }

    #[test]
    fn system_message_carries_dynamic_and_summary() {
        let tmp = workspace();
        let cb = ContextBuilder::for_workspace(tmp.path());
        let msgs = cb.build_messages(Vec::new(), "prior talk", "hi", "cli", "direct");

        let system = &msgs[0];
        assert!(system.content.starts_with(&cb.get_prompt()));
        assert!(system.content.contains("## Current Time"));
        assert!(system.content.contains("Channel: cli\nChat ID: direct"));
        assert!(system.content.contains("CONTEXT_SUMMARY:"));
        assert!(system.content.ends_with("prior talk"));
        assert_eq!(system.system_parts.len(), 3);
    }

    #[test]
    fn static_prompt_is_stable_and_timeless() {
        let tmp = workspace();
        fs::write(tmp.path().join("AGENTS.md"), "Follow the rules.").unwrap();
        let cb = ContextBuilder::for_workspace(tmp.path());

        let first = cb.get_prompt();
        for _ in 0..5 {
            assert_eq!(cb.get_prompt(), first);
        }
        assert!(!first.contains("## Current Time"));
        assert!(first.contains("Follow the rules."));
    }

    #[test]
    fn bootstrap_edit_invalidates() {
        let tmp = workspace();
        let path = tmp.path().join("SOUL.md");
        fs::write(&path, "calm").unwrap();
        let cb = ContextBuilder::for_workspace(tmp.path());
        assert!(cb.get_prompt().contains("calm"));

        fs::write(&path, "cheerful").unwrap();
        set_mtime(&path, future(0));

        assert!(cb.sources_changed());
        let prompt = cb.get_prompt();
        assert!(prompt.contains("cheerful"));
        assert!(!prompt.contains("calm"));
    }

    #[test]
    fn memory_edit_invalidates() {
        let tmp = workspace();
        let path = tmp.path().join("memory/MEMORY.md");
        fs::write(&path, "likes tea").unwrap();
        let cb = ContextBuilder::for_workspace(tmp.path());
        assert!(cb.get_prompt().contains("likes tea"));

        fs::write(&path, "likes coffee").unwrap();
        set_mtime(&path, future(0));
        assert!(cb.get_prompt().contains("likes coffee"));
    }

    #[test]
    fn newly_created_bootstrap_file_is_picked_up() {
        let tmp = workspace();
        let cb = ContextBuilder::for_workspace(tmp.path());
        assert!(!cb.get_prompt().contains("## USER.md"));

        fs::write(tmp.path().join("USER.md"), "Name: Ada").unwrap();
        assert!(cb.sources_changed());
        assert!(cb.get_prompt().contains("## USER.md\n\nName: Ada"));
    }

    #[test]
    fn skill_content_change_invalidates() {
        let tmp = workspace();
        let path = write_skill(tmp.path(), "weather", "Checks the weather");
        let cb = ContextBuilder::for_workspace(tmp.path());
        assert!(cb.get_prompt().contains("Checks the weather"));

        fs::write(
            &path,
            "---\nname: weather\ndescription: Forecasts storms\n---\n# weather\n",
        )
        .unwrap();
        set_mtime(&path, future(60));

        let prompt = cb.get_prompt();
        assert!(prompt.contains("Forecasts storms"));
        assert!(!prompt.contains("Checks the weather"));
    }

    #[test]
    fn empty_workspace_detects_first_file() {
        let tmp = tempfile::tempdir().unwrap();
        let cb = ContextBuilder::for_workspace(tmp.path());

        let empty = cb.get_prompt();
        assert!(!cb.sources_changed());
        assert!(cb.cached_baseline_mtime().is_some());

        fs::create_dir_all(tmp.path().join("memory")).unwrap();
        fs::write(tmp.path().join("memory/MEMORY.md"), "first fact").unwrap();
        assert!(cb.sources_changed());
        let updated = cb.get_prompt();
        assert_ne!(empty, updated);
        assert!(updated.contains("first fact"));
    }

    #[test]
    fn invalidate_rebuilds_identical_prompt() {
        let tmp = workspace();
        fs::write(tmp.path().join("IDENTITY.md"), "I am pincer").unwrap();
        let cb = ContextBuilder::for_workspace(tmp.path());

        let before = cb.get_prompt();
        cb.invalidate_cache();
        assert!(cb.cached_baseline_mtime().is_none());
        assert!(cb.sources_changed());
        assert_eq!(cb.get_prompt(), before);
        assert!(cb.cached_baseline_mtime().is_some());
    }

    #[test]
    fn tool_round_trip_helpers() {
        let tmp = workspace();
        let cb = ContextBuilder::for_workspace(tmp.path());
        let mut msgs = cb.build_messages(Vec::new(), "", "list files", "", "");

        let call = MessageToolCall::new("call_1", "list_dir", r#"{"path":"."}"#);
        cb.add_assistant_message(&mut msgs, "", vec![call.clone()]);
        cb.add_tool_result(&mut msgs, "call_1", "list_dir", "a.txt\nb.txt");

        let assistant = &msgs[msgs.len() - 2];
        assert_eq!(assistant.role, Role::Assistant);
        assert_eq!(assistant.tool_calls, vec![call]);

        let tool = msgs.last().unwrap();
        assert_eq!(tool.role, Role::Tool);
        assert_eq!(tool.tool_call_id.as_deref(), Some("call_1"));
        assert_eq!(tool.metadata["tool_name"], "list_dir");

        // The round survives sanitization when fed back as history.
        let history: Vec<Message> = msgs.into_iter().skip(1).collect();
        let next = cb.build_messages(history, "", "thanks", "", "");
        assert_eq!(next.len(), 5);
    }

    #[test]
    fn skills_info_counts_workspace_skills() {
        let tmp = workspace();
        write_skill(tmp.path(), "github", "Works with GitHub");
        let info = ContextBuilder::for_workspace(tmp.path()).skills_info();
        assert_eq!(info.total, 1);
        assert_eq!(info.names, vec!["github"]);
    }
}
