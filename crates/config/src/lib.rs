//! Configuration loading, validation, and management for pincer.
//!
//! Loads configuration from `~/.pincer/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use pincer_core::{Identity, WorkspaceLayout};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.pincer/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Workspace root holding bootstrap files, memory and skills
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<PathBuf>,

    /// Agent identity settings
    #[serde(default)]
    pub agent: AgentSettings,

    /// Skill discovery directories
    #[serde(default)]
    pub skills: SkillsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSettings {
    /// Name used in the identity block
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Maximum bytes of the system prompt written to the debug preview log
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
}

fn default_agent_name() -> String {
    "pincer".into()
}
fn default_preview_chars() -> usize {
    500
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            preview_chars: default_preview_chars(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillsConfig {
    /// Global skills shared by every workspace (default `~/.pincer/skills`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_dir: Option<PathBuf>,

    /// Skills shipped with the binary (default `<cwd>/skills`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub builtin_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from the default path (~/.pincer/config.toml).
    ///
    /// Environment overrides (highest priority):
    /// - `PINCER_WORKSPACE`
    /// - `PINCER_AGENT_NAME`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if let Ok(workspace) = std::env::var("PINCER_WORKSPACE") {
            config.workspace = Some(PathBuf::from(workspace));
        }

        if let Ok(name) = std::env::var("PINCER_AGENT_NAME") {
            config.agent.name = name;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".pincer")
    }

    /// The configured workspace, or `~/.pincer/workspace`.
    pub fn workspace_dir(&self) -> PathBuf {
        self.workspace
            .clone()
            .unwrap_or_else(|| Self::config_dir().join("workspace"))
    }

    pub fn layout(&self) -> WorkspaceLayout {
        WorkspaceLayout::new(self.workspace_dir())
    }

    pub fn identity(&self) -> Identity {
        Identity::new(self.agent.name.clone())
    }

    pub fn global_skills_dir(&self) -> PathBuf {
        self.skills
            .global_dir
            .clone()
            .unwrap_or_else(|| Self::config_dir().join("skills"))
    }

    pub fn builtin_skills_dir(&self) -> PathBuf {
        self.skills.builtin_dir.clone().unwrap_or_else(|| {
            std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join("skills")
        })
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        let name = self.agent.name.trim();
        if name.is_empty() {
            return Err(ConfigError::ValidationError(
                "agent.name must not be empty".into(),
            ));
        }
        if name.chars().any(char::is_control) {
            return Err(ConfigError::ValidationError(
                "agent.name must not contain control characters".into(),
            ));
        }

        if self.agent.preview_chars == 0 {
            return Err(ConfigError::ValidationError(
                "agent.preview_chars must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigError> for pincer_core::Error {
    fn from(err: ConfigError) -> Self {
        pincer_core::Error::Config {
            message: err.to_string(),
        }
    }
}
