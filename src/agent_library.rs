//! Agent library: every agent `.toml` in one directory.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::agent_config::{AgentConfig, ConfigError};

/// Agent configurations loaded from a directory, sorted by name.
#[derive(Debug, Clone)]
pub struct AgentLibrary {
    agents: Vec<AgentConfig>,
}

impl AgentLibrary {
    /// Loads each `*.toml` file in `dir_path` as an [`AgentConfig`].
    ///
    /// Files that fail to parse are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `dir_path` is not a readable directory or
    /// holds no valid agent config.
    #[instrument(skip(dir_path), fields(path = %dir_path.as_ref().display()))]
    pub fn scan(dir_path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = dir_path.as_ref();

        if !path.is_dir() {
            return Err(ConfigError::new(format!(
                "Agent config directory not found: {}",
                path.display()
            )));
        }

        let entries = std::fs::read_dir(path).map_err(|e| {
            ConfigError::new(format!(
                "Failed to read directory {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut agents = Vec::new();
        for entry in entries {
            let entry_path = entry
                .map_err(|e| ConfigError::new(format!("Failed to read directory entry: {}", e)))?
                .path();

            let is_toml = entry_path.extension().and_then(|s| s.to_str()) == Some("toml");
            if !entry_path.is_file() || !is_toml {
                debug!(path = %entry_path.display(), "Skipping entry");
                continue;
            }

            match AgentConfig::from_file(&entry_path) {
                Ok(config) => {
                    debug!(name = %config.name(), path = %entry_path.display(), "Loaded agent");
                    agents.push(config);
                }
                Err(e) => {
                    warn!(path = %entry_path.display(), error = %e, "Skipping invalid agent config");
                }
            }
        }

        if agents.is_empty() {
            return Err(ConfigError::new(format!(
                "No valid agent configs found in: {}",
                path.display()
            )));
        }

        agents.sort_by(|a, b| a.name().cmp(b.name()));
        info!(count = agents.len(), "Agent library loaded");
        Ok(Self { agents })
    }

    /// Scans [`AgentLibrary::default_config_dir`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if that directory holds no valid configs.
    #[instrument]
    pub fn scan_default() -> Result<Self, ConfigError> {
        Self::scan(Self::default_config_dir())
    }

    /// Agent directory: `$STRICTLY_CHESS_AGENTS`, else
    /// `$XDG_CONFIG_HOME/strictly_chess/agents`, else `./agents`.
    #[instrument]
    pub fn default_config_dir() -> PathBuf {
        if let Ok(dir) = std::env::var("STRICTLY_CHESS_AGENTS") {
            debug!(path = %dir, "Using STRICTLY_CHESS_AGENTS");
            return PathBuf::from(dir);
        }

        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("strictly_chess").join("agents");
        }

        PathBuf::from("agents")
    }

    /// All loaded agents, sorted by name.
    pub fn agents(&self) -> &[AgentConfig] {
        &self.agents
    }

    /// Agent names in library order.
    pub fn names(&self) -> Vec<&str> {
        self.agents.iter().map(|a| a.name().as_str()).collect()
    }

    /// Looks up an agent by exact name.
    #[instrument(skip(self))]
    pub fn get_by_name(&self, name: &str) -> Option<&AgentConfig> {
        self.agents.iter().find(|a| a.name() == name)
    }

    /// Number of loaded agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// `true` if no agents are loaded.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
