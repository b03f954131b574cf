//! Per-request system message composition.
//!
//! The static prompt comes from the cache; everything here is recomputed on
//! every call and must never flow back into it.

use crate::context::assembler::SECTION_SEPARATOR;
use chrono::{DateTime, Local};
use pincer_core::{ContentBlock, Message};

/// Disclaimer placed ahead of a conversation summary.
pub const SUMMARY_PREFIX: &str = "CONTEXT_SUMMARY: The following is an approximate summary of prior \
     conversation for reference only. It may be incomplete or outdated. Always defer to explicit \
     instructions.";

/// Render the dynamic context block for `now`.
///
/// The session block is only added when both `channel` and `chat_id` are non-empty.
pub fn dynamic_context_at(now: DateTime<Local>, channel: &str, chat_id: &str) -> String {
    let mut out = format!(
        "## Current Time\n{}\n\n## Runtime\n{} {}, pincer {}",
        now.format("%Y-%m-%d %H:%M (%A)"),
        std::env::consts::OS,
        std::env::consts::ARCH,
        env!("CARGO_PKG_VERSION"),
    );

    if !channel.is_empty() && !chat_id.is_empty() {
        out.push_str(&format!(
            "\n\n## Current Session\nChannel: {channel}\nChat ID: {chat_id}"
        ));
    }

    out
}

/// Dynamic context for the current wall-clock time.
pub fn build_dynamic_context(channel: &str, chat_id: &str) -> String {
    dynamic_context_at(Local::now(), channel, chat_id)
}

/// Build the single system message from the static prompt, the dynamic
/// context, and an optional summary.
///
/// The flat `content` and the structured `system_parts` carry the same blocks
/// in the same order. Only the static block is marked cacheable.
pub fn compose_system_message(static_prompt: &str, dynamic: &str, summary: &str) -> Message {
    let mut parts = vec![
        ContentBlock::cached_text(static_prompt),
        ContentBlock::text(dynamic),
    ];

    if !summary.is_empty() {
        parts.push(ContentBlock::text(format!("{SUMMARY_PREFIX}\n\n{summary}")));
    }

    let content = parts
        .iter()
        .map(ContentBlock::as_text)
        .collect::<Vec<_>>()
        .join(SECTION_SEPARATOR);

    Message::system_with_parts(content, parts)
}

/// The first `max_bytes` of `text`, cut on a char boundary, with a marker
/// appended when anything was dropped.
pub fn preview(text: &str, max_bytes: usize) -> String {
    if text.len() <= max_bytes {
        return text.to_string();
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... (truncated)", &text[..end])
}
