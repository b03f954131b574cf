//! Memory system for pincer.
//!
//! Memory is plain markdown inside the workspace so that both the agent
//! (through file tools) and the user can read and edit it.

pub mod store;

pub use store::MemoryStore;
