//! Configuration sections: paths, telemetry, zone policy, messages.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Filesystem paths for Waymark state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Base directory for runtime state (the location database).
    /// Default: ~/.local/share/waymark
    #[serde(default = "PathsConfig::default_data_dir")]
    pub data_dir: PathBuf,
}

impl PathsConfig {
    fn default_data_dir() -> PathBuf {
        directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".local/share/waymark"))
            .unwrap_or_else(|| PathBuf::from(".local/share/waymark"))
    }

    /// Path of the location database file inside the data directory.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("locations.db")
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: Self::default_data_dir(),
        }
    }
}

/// Telemetry and observability configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level (trace, debug, info, warn, error).
    /// Default: info
    #[serde(default = "TelemetryConfig::default_log_level")]
    pub log_level: String,
}

impl TelemetryConfig {
    fn default_log_level() -> String {
        "info".to_string()
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
        }
    }
}

/// Zone tracking policy.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ZonesConfig {
    /// Zones excluded from position tracking. Ordered, duplicate-free,
    /// matched case-sensitively against zone names.
    #[serde(default)]
    pub excluded: Vec<String>,
}

/// User-facing notification templates.
///
/// Templates may reference `{zone}`, replaced with the zone name at
/// notification time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagesConfig {
    /// Sent after relocating a user to their stored position.
    #[serde(default = "MessagesConfig::default_restored")]
    pub restored: String,

    /// Sent when the user's zone is on the exclusion list.
    #[serde(default = "MessagesConfig::default_zone_excluded")]
    pub zone_excluded: String,

    /// Sent when no position has been stored for this (user, zone).
    #[serde(default = "MessagesConfig::default_no_prior_location")]
    pub no_prior_location: String,
}

impl MessagesConfig {
    fn default_restored() -> String {
        "Returned you to your last position in {zone}.".to_string()
    }

    fn default_zone_excluded() -> String {
        "Positions are not tracked in {zone}.".to_string()
    }

    fn default_no_prior_location() -> String {
        "No saved position for {zone} yet.".to_string()
    }
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            restored: Self::default_restored(),
            zone_excluded: Self::default_zone_excluded(),
            no_prior_location: Self::default_no_prior_location(),
        }
    }
}
