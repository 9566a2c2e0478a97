//! Config file discovery, loading, and environment variable overlay.

use crate::sections::{MessagesConfig, PathsConfig, TelemetryConfig, ZonesConfig};
use crate::{ConfigError, WaymarkConfig};
use std::env;
use std::path::{Path, PathBuf};

/// Information about where config values came from.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// Config files that were loaded (in order)
    pub files: Vec<PathBuf>,
    /// Environment variables that overrode config values
    pub env_overrides: Vec<String>,
}

/// Discover config files in standard locations.
///
/// Returns paths in load order (system, user, local).
/// Only returns files that exist.
pub fn discover_config_files() -> Vec<PathBuf> {
    discover_config_files_with_override(None)
}

/// Discover config files, optionally with a CLI override path.
///
/// If `cli_path` is provided and exists, it replaces the local override.
/// Returns paths in load order (system, user, local/cli).
pub fn discover_config_files_with_override(cli_path: Option<&Path>) -> Vec<PathBuf> {
    let mut files = Vec::new();

    // System config
    let system = PathBuf::from("/etc/waymark/config.toml");
    if system.exists() {
        files.push(system);
    }

    // User config (XDG_CONFIG_HOME or ~/.config)
    if let Some(config_dir) = directories::BaseDirs::new().map(|d| d.config_dir().to_path_buf()) {
        let user = config_dir.join("waymark/config.toml");
        if user.exists() {
            files.push(user);
        }
    }

    // CLI override takes precedence over local
    if let Some(path) = cli_path {
        if path.exists() {
            files.push(path.to_path_buf());
            return files;
        }
    }

    // Local override (current directory)
    let local = PathBuf::from("waymark.toml");
    if local.exists() {
        files.push(local);
    }

    files
}

/// Load config from a TOML file.
pub fn load_from_file(path: &Path) -> Result<WaymarkConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_toml(&contents, path)
}

/// Parse config from TOML string.
pub(crate) fn parse_toml(contents: &str, path: &Path) -> Result<WaymarkConfig, ConfigError> {
    // Parse as raw TOML table first to handle nested structure
    let table: toml::Table = contents
        .parse()
        .map_err(|e: toml::de::Error| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut config = WaymarkConfig::default();

    if let Some(paths) = table.get("paths").and_then(|v| v.as_table()) {
        if let Some(v) = paths.get("data_dir").and_then(|v| v.as_str()) {
            config.paths.data_dir = expand_path(v);
        }
    }

    if let Some(telemetry) = table.get("telemetry").and_then(|v| v.as_table()) {
        if let Some(v) = telemetry.get("log_level").and_then(|v| v.as_str()) {
            config.telemetry.log_level = v.to_string();
        }
    }

    if let Some(zones) = table.get("zones").and_then(|v| v.as_table()) {
        if let Some(excluded) = zones.get("excluded").and_then(|v| v.as_array()) {
            config.zones.excluded = excluded
                .iter()
                .filter_map(|v| v.as_str())
                .map(String::from)
                .collect();
            // Hand-edited files may repeat a zone; duplicates would break
            // add/remove reporting.
            dedup_preserving_order(&mut config.zones.excluded);
        }
    }

    if let Some(messages) = table.get("messages").and_then(|v| v.as_table()) {
        if let Some(v) = messages.get("restored").and_then(|v| v.as_str()) {
            config.messages.restored = v.to_string();
        }
        if let Some(v) = messages.get("zone_excluded").and_then(|v| v.as_str()) {
            config.messages.zone_excluded = v.to_string();
        }
        if let Some(v) = messages.get("no_prior_location").and_then(|v| v.as_str()) {
            config.messages.no_prior_location = v.to_string();
        }
    }

    Ok(config)
}

/// Merge two configs, with `overlay` taking precedence for any value that
/// differs from the compiled default.
pub fn merge_configs(base: WaymarkConfig, overlay: WaymarkConfig) -> WaymarkConfig {
    fn pick<T: PartialEq>(base: T, overlay: T, default: T) -> T {
        if overlay != default {
            overlay
        } else {
            base
        }
    }

    let defaults = WaymarkConfig::default();

    WaymarkConfig {
        paths: PathsConfig {
            data_dir: pick(
                base.paths.data_dir,
                overlay.paths.data_dir,
                defaults.paths.data_dir,
            ),
        },
        telemetry: TelemetryConfig {
            log_level: pick(
                base.telemetry.log_level,
                overlay.telemetry.log_level,
                defaults.telemetry.log_level,
            ),
        },
        zones: ZonesConfig {
            excluded: pick(
                base.zones.excluded,
                overlay.zones.excluded,
                defaults.zones.excluded,
            ),
        },
        messages: MessagesConfig {
            restored: pick(
                base.messages.restored,
                overlay.messages.restored,
                defaults.messages.restored,
            ),
            zone_excluded: pick(
                base.messages.zone_excluded,
                overlay.messages.zone_excluded,
                defaults.messages.zone_excluded,
            ),
            no_prior_location: pick(
                base.messages.no_prior_location,
                overlay.messages.no_prior_location,
                defaults.messages.no_prior_location,
            ),
        },
    }
}

/// Apply environment variable overrides to config.
pub fn apply_env_overrides(config: &mut WaymarkConfig, sources: &mut ConfigSources) {
    if let Ok(v) = env::var("WAYMARK_DATA_DIR") {
        config.paths.data_dir = expand_path(&v);
        sources.env_overrides.push("WAYMARK_DATA_DIR".to_string());
    }

    if let Ok(v) = env::var("WAYMARK_LOG_LEVEL") {
        config.telemetry.log_level = v;
        sources.env_overrides.push("WAYMARK_LOG_LEVEL".to_string());
    }
    // Also support RUST_LOG
    if let Ok(v) = env::var("RUST_LOG") {
        config.telemetry.log_level = v;
        sources.env_overrides.push("RUST_LOG".to_string());
    }

    // Comma-separated zone list, e.g. WAYMARK_ZONES_EXCLUDED="void,lobby"
    if let Ok(v) = env::var("WAYMARK_ZONES_EXCLUDED") {
        config.zones.excluded = v
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        dedup_preserving_order(&mut config.zones.excluded);
        sources
            .env_overrides
            .push("WAYMARK_ZONES_EXCLUDED".to_string());
    }
}

fn dedup_preserving_order(zones: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    zones.retain(|zone| seen.insert(zone.clone()));
}

/// Expand ~ and environment variables in a path.
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
            home.join(stripped)
        } else {
            PathBuf::from(path)
        }
    } else if let Some(stripped) = path.strip_prefix('$') {
        // Handle $VAR/rest/of/path
        if let Some(slash_pos) = stripped.find('/') {
            let var_name = &stripped[..slash_pos];
            if let Ok(var_value) = env::var(var_name) {
                PathBuf::from(var_value).join(&stripped[slash_pos + 1..])
            } else {
                PathBuf::from(path)
            }
        } else {
            env::var(stripped)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(path))
        }
    } else {
        PathBuf::from(path)
    }
}
