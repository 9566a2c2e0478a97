//! Minimal configuration loading for Waymark.
//!
//! This crate provides configuration loading with minimal dependencies,
//! designed to be imported by the other Waymark crates without causing
//! circular dependency issues.
//!
//! # Configuration Philosophy
//!
//! Most of the config is read-only at runtime (paths, telemetry). Two
//! sections are also *written back* by administrative operations: the zone
//! exclusion list and the notification message templates. [`ConfigFile`]
//! pairs a loaded config with the path it persists to for exactly that.
//!
//! # Usage
//!
//! ```rust,no_run
//! use wayconf::WaymarkConfig;
//!
//! let config = WaymarkConfig::load().expect("Failed to load config");
//!
//! println!("Database: {}", config.paths.db_path().display());
//! for zone in &config.zones.excluded {
//!     println!("Excluded zone: {}", zone);
//! }
//! ```
//!
//! # Config File Locations
//!
//! Files are loaded in order (later wins):
//! 1. `/etc/waymark/config.toml` (system)
//! 2. `~/.config/waymark/config.toml` (user)
//! 3. `./waymark.toml` (local override)
//! 4. Environment variables (`WAYMARK_*`)
//!
//! # Example Config
//!
//! ```toml
//! [paths]
//! data_dir = "~/.local/share/waymark"
//!
//! [telemetry]
//! log_level = "info"
//!
//! [zones]
//! excluded = ["void"]
//!
//! [messages]
//! restored = "Returned you to your last position in {zone}."
//! zone_excluded = "Positions are not tracked in {zone}."
//! no_prior_location = "No saved position for {zone} yet."
//! ```

pub mod loader;
pub mod sections;

pub use loader::{discover_config_files_with_override, ConfigSources};
pub use sections::{MessagesConfig, PathsConfig, TelemetryConfig, ZonesConfig};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading and persistence errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Failed to write config file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Complete Waymark configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WaymarkConfig {
    /// Filesystem paths.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Telemetry settings.
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// Zone tracking policy.
    #[serde(default)]
    pub zones: ZonesConfig,

    /// Notification templates.
    #[serde(default)]
    pub messages: MessagesConfig,
}

impl WaymarkConfig {
    /// Load configuration from all sources.
    ///
    /// Load order (later wins):
    /// 1. Compiled defaults
    /// 2. `/etc/waymark/config.toml`
    /// 3. `~/.config/waymark/config.toml`
    /// 4. `./waymark.toml`
    /// 5. Environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let (config, _sources) = Self::load_with_sources_from(None)?;
        Ok(config)
    }

    /// Load configuration from a specific file path, then apply env overrides.
    ///
    /// If `config_path` is provided, it takes precedence over the local
    /// `./waymark.toml` override. System and user configs still load first.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let (config, _sources) = Self::load_with_sources_from(config_path)?;
        Ok(config)
    }

    /// Load configuration from optional path and return information about sources.
    pub fn load_with_sources_from(
        config_path: Option<&Path>,
    ) -> Result<(Self, ConfigSources), ConfigError> {
        let mut sources = ConfigSources::default();
        let mut config = WaymarkConfig::default();

        // Load config files in order
        for path in loader::discover_config_files_with_override(config_path) {
            let file_config = loader::load_from_file(&path)?;
            config = loader::merge_configs(config, file_config);
            sources.files.push(path);
        }

        // Apply environment variable overrides
        loader::apply_env_overrides(&mut config, &mut sources);

        Ok((config, sources))
    }

    /// Serialize config to TOML string.
    pub fn to_toml(&self) -> String {
        // Build TOML manually for nicer formatting
        let mut output = String::new();

        output.push_str("# Waymark Configuration\n\n");

        output.push_str("[paths]\n");
        output.push_str(&format!(
            "data_dir = \"{}\"\n",
            self.paths.data_dir.display()
        ));

        output.push_str("\n[telemetry]\n");
        output.push_str(&format!("log_level = \"{}\"\n", self.telemetry.log_level));

        output.push_str("\n[zones]\n");
        output.push_str("excluded = [\n");
        for zone in &self.zones.excluded {
            output.push_str(&format!("    \"{}\",\n", zone));
        }
        output.push_str("]\n");

        output.push_str("\n[messages]\n");
        output.push_str(&format!("restored = \"{}\"\n", self.messages.restored));
        output.push_str(&format!(
            "zone_excluded = \"{}\"\n",
            self.messages.zone_excluded
        ));
        output.push_str(&format!(
            "no_prior_location = \"{}\"\n",
            self.messages.no_prior_location
        ));

        output
    }
}

/// A config bound to the file it persists to.
///
/// Administrative mutations (exclusion list, message templates) rewrite the
/// whole file on every change, mirroring how the hosting environment treats
/// its config store.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
    pub config: WaymarkConfig,
}

impl ConfigFile {
    /// Bind to `path`, loading it if it exists or starting from defaults.
    ///
    /// Env overrides are not applied here: what gets saved back should be
    /// exactly what the file holds plus the requested mutation.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let config = if path.exists() {
            loader::load_from_file(&path)?
        } else {
            WaymarkConfig::default()
        };
        Ok(Self { path, config })
    }

    /// The file this config persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the current config back to its file, creating parent
    /// directories as needed.
    pub fn save(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::FileWrite {
                path: self.path.clone(),
                source: e,
            })?;
        }
        std::fs::write(&self.path, self.config.to_toml()).map_err(|e| ConfigError::FileWrite {
            path: self.path.clone(),
            source: e,
        })
    }
}

/// Default path for the user-writable config file
/// (`~/.config/waymark/config.toml`).
pub fn default_user_config_path() -> PathBuf {
    directories::BaseDirs::new()
        .map(|d| d.config_dir().join("waymark/config.toml"))
        .unwrap_or_else(|| PathBuf::from("waymark.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WaymarkConfig::default();
        assert!(config.zones.excluded.is_empty());
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn test_to_toml() {
        let mut config = WaymarkConfig::default();
        config.zones.excluded.push("void".to_string());
        let toml = config.to_toml();
        assert!(toml.contains("[paths]"));
        assert!(toml.contains("[zones]"));
        assert!(toml.contains("\"void\""));
        assert!(toml.contains("[messages]"));
    }

    #[test]
    fn test_to_toml_round_trips() {
        let mut config = WaymarkConfig::default();
        config.zones.excluded = vec!["void".to_string(), "lobby".to_string()];
        config.messages.restored = "welcome back to {zone}".to_string();

        let parsed =
            loader::parse_toml(&config.to_toml(), Path::new("round_trip.toml")).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_config_file_save_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        let mut file = ConfigFile::open(&path).unwrap();
        file.config.zones.excluded.push("void".to_string());
        file.save().unwrap();

        let reopened = ConfigFile::open(&path).unwrap();
        assert_eq!(reopened.config.zones.excluded, vec!["void"]);
    }

    #[test]
    fn test_config_file_missing_starts_from_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let file = ConfigFile::open(dir.path().join("absent.toml")).unwrap();
        assert_eq!(file.config, WaymarkConfig::default());
    }
}
