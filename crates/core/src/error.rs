//! Error types for the pincer domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use std::path::PathBuf;
use thiserror::Error;

/// The top-level error type for all pincer operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Memory errors ---
    #[error("Memory error: {0}")]
    Memory(#[from] MemoryError),

    // --- Skill errors ---
    #[error("Skill error: {0}")]
    Skill(#[from] SkillError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("Failed to write {path}: {reason}")]
    Write { path: PathBuf, reason: String },
}

/// A single reason a skill's metadata was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkillError {
    #[error("name is required")]
    MissingName,

    #[error("name exceeds {max} characters")]
    NameTooLong { max: usize },

    #[error("name must be alphanumeric with hyphens")]
    InvalidName,

    #[error("description is required")]
    MissingDescription,

    #[error("description exceeds {max} characters")]
    DescriptionTooLong { max: usize },

    #[error("skill not found: {0}")]
    NotFound(String),
}
