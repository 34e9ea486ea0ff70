//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/forrest/forrest.toml`
//! 3. Local config: `./.forrest.toml` (current directory)
//! 4. Environment variables: `FORREST_*` prefix (`__` separates nested keys)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::TraversalMode;

/// Unified configuration for forrest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Traversal used by `flatten` when no `--mode` is given
    pub default_mode: TraversalMode,
    /// Text shown by `tree` for a forest without roots
    pub empty_label: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_mode: TraversalMode::BreadthFirst,
            empty_label: "Empty forest".to_string(),
        }
    }
}

/// Get the XDG config directory for forrest.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "forrest").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("forrest.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".forrest.toml")
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.forrest.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path();
        let local = local_dir.map(local_config_path);
        Self::load_from(global.as_deref(), local.as_deref())
    }

    /// Load settings from explicit file locations.
    ///
    /// Missing files are skipped; later layers override earlier ones.
    pub fn load_from(
        global: Option<&Path>,
        local: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("default_mode", defaults.default_mode.to_string())
            .map_err(config_err)?
            .set_default("empty_label", defaults.empty_label)
            .map_err(config_err)?;

        for path in [global, local].into_iter().flatten() {
            builder = builder.add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix("FORREST")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder.build().map_err(config_err)?;
        config.try_deserialize().map_err(config_err)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# forrest configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/forrest/forrest.toml
#   Local:  ./.forrest.toml
#   Env:    FORREST_* environment variables (e.g. FORREST_DEFAULT_MODE=depth-first)

# Traversal used by `flatten` when --mode is not given:
# "breadth-first" or "depth-first"
# default_mode = "breadth-first"

# Text printed by `tree` when the hierarchy has no roots
# empty_label = "Empty forest"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
