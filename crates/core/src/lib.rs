//! # Pincer Core
//!
//! Domain types and error definitions for the pincer prompt context engine:
//! the message model and workspace layout every other crate builds on.
//!
//! ## Message shape
//!
//! Messages produced here are the contract with provider adapters:
//! - One flat `content` string every adapter can read
//! - An optional structured `system_parts` view for cache-aware adapters
//! - Tool calls and tool-call results carried explicitly

pub mod error;
pub mod identity;
pub mod message;

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result};
pub use identity::{BOOTSTRAP_FILES, Identity, WorkspaceLayout};
pub use message::{CacheControl, ContentBlock, Message, MessageToolCall, Role};
