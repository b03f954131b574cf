//! History sanitization before handing messages to a provider.
//!
//! Chat APIs pair every tool-call turn with its tool results and accept a
//! single system message. History loaded from storage (or trimmed by a
//! summarizer) can violate both; this pass drops the offending messages.

use pincer_core::{Message, Role};
use tracing::debug;

/// Drop messages that would break provider request/response pairing.
///
/// Rules, applied in order against the accumulated output:
/// - `system` messages are dropped; the composer supplies the only one.
/// - `tool` results are kept only if the nearest preceding non-tool message
///   is an assistant turn with tool calls.
/// - assistant tool-call turns are kept only after a `user` or `tool` message.
/// - everything else is kept.
pub fn sanitize_history(history: Vec<Message>) -> Vec<Message> {
    let mut sanitized: Vec<Message> = Vec::with_capacity(history.len());

    for msg in history {
        match msg.role {
            Role::System => {
                debug!("Dropping system message from history");
            }

            Role::Tool => {
                if sanitized.is_empty() {
                    debug!("Dropping orphaned leading tool message");
                    continue;
                }
                // Skip over earlier results of the same multi-tool-call turn.
                let anchored = sanitized
                    .iter()
                    .rev()
                    .find(|m| m.role != Role::Tool)
                    .is_some_and(Message::has_tool_calls);
                if !anchored {
                    debug!("Dropping orphaned tool message");
                    continue;
                }
                sanitized.push(msg);
            }

            Role::Assistant if !msg.tool_calls.is_empty() => {
                let Some(prev) = sanitized.last() else {
                    debug!("Dropping assistant tool-call turn at history start");
                    continue;
                };
                if !matches!(prev.role, Role::User | Role::Tool) {
                    debug!(prev_role = %prev.role, "Dropping assistant tool-call turn with invalid predecessor");
                    continue;
                }
                sanitized.push(msg);
            }

            Role::User | Role::Assistant => sanitized.push(msg),
        }
    }

    sanitized
}
