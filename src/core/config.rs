//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.roster/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::load::FailurePolicy;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RosterConfig {
    #[serde(default)]
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub paging: PagingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DirectoryConfig {
    pub base_url: Option<String>,
    pub seed: Option<String>,
    pub results_per_page: Option<u32>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PagingConfig {
    pub on_failure: Option<FailurePolicy>,
}

/// Values given on the command line. `None` = not specified.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub seed: Option<String>,
    pub results_per_page: Option<u32>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "https://randomuser.me/api/";
pub const DEFAULT_SEED: &str = "abc";
pub const DEFAULT_RESULTS_PER_PAGE: u32 = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub seed: String,
    pub results_per_page: u32,
    pub request_timeout: Duration,
    pub failure_policy: FailurePolicy,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.roster/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".roster").join("config.toml"))
}

/// Load config from `~/.roster/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `RosterConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<RosterConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(RosterConfig::default());
        }
    };
    load_config_from(&path)
}

fn load_config_from(path: &Path) -> Result<RosterConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(RosterConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: RosterConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Roster Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [directory]
# base_url = "https://randomuser.me/api/"   # Or set ROSTER_BASE_URL env var
# seed = "abc"                              # Or set ROSTER_SEED env var
# results_per_page = 10
# request_timeout_secs = 10

# [paging]
# on_failure = "retry"                      # "retry" (stay on page) or "skip"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &RosterConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| std::env::var("ROSTER_BASE_URL").ok())
        .or_else(|| config.directory.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Seed: CLI → env → config → default
    let seed = cli
        .seed
        .clone()
        .or_else(|| std::env::var("ROSTER_SEED").ok())
        .or_else(|| config.directory.seed.clone())
        .unwrap_or_else(|| DEFAULT_SEED.to_string());

    // Zero would make every page empty
    let results_per_page = cli
        .results_per_page
        .or(config.directory.results_per_page)
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_RESULTS_PER_PAGE);

    let timeout_secs = config
        .directory
        .request_timeout_secs
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

    ResolvedConfig {
        base_url,
        seed,
        results_per_page,
        request_timeout: Duration::from_secs(timeout_secs),
        failure_policy: config.paging.on_failure.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = RosterConfig::default();
        assert!(config.directory.base_url.is_none());
        assert!(config.paging.on_failure.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = RosterConfig::default();
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.results_per_page, DEFAULT_RESULTS_PER_PAGE);
        assert_eq!(
            resolved.request_timeout,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
        assert_eq!(resolved.failure_policy, FailurePolicy::Retry);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = RosterConfig {
            directory: DirectoryConfig {
                results_per_page: Some(25),
                request_timeout_secs: Some(3),
                ..Default::default()
            },
            paging: PagingConfig {
                on_failure: Some(FailurePolicy::Skip),
            },
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.results_per_page, 25);
        assert_eq!(resolved.request_timeout, Duration::from_secs(3));
        assert_eq!(resolved.failure_policy, FailurePolicy::Skip);
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = RosterConfig {
            directory: DirectoryConfig {
                base_url: Some("http://config.test/api".to_string()),
                seed: Some("config-seed".to_string()),
                results_per_page: Some(25),
                ..Default::default()
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            base_url: Some("http://cli.test/api".to_string()),
            seed: Some("cli-seed".to_string()),
            results_per_page: Some(5),
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.base_url, "http://cli.test/api");
        assert_eq!(resolved.seed, "cli-seed");
        assert_eq!(resolved.results_per_page, 5);
    }

    #[test]
    fn test_zero_values_fall_back_to_defaults() {
        let config = RosterConfig {
            directory: DirectoryConfig {
                results_per_page: Some(0),
                request_timeout_secs: Some(0),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.results_per_page, DEFAULT_RESULTS_PER_PAGE);
        assert_eq!(
            resolved.request_timeout,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
    }

    #[test]
    fn test_full_toml_parses() {
        let toml_str = r#"
[directory]
base_url = "http://192.168.1.100:8080/api/"
seed = "xyz"
results_per_page = 50
request_timeout_secs = 30

[paging]
on_failure = "skip"
"#;
        let config: RosterConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.directory.base_url.as_deref(),
            Some("http://192.168.1.100:8080/api/")
        );
        assert_eq!(config.directory.seed.as_deref(), Some("xyz"));
        assert_eq!(config.directory.results_per_page, Some(50));
        assert_eq!(config.paging.on_failure, Some(FailurePolicy::Skip));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing; everything else stays default
        let toml_str = r#"
[directory]
seed = "only-seed"
"#;
        let config: RosterConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.directory.seed.as_deref(), Some("only-seed"));
        assert!(config.directory.base_url.is_none());
        assert!(config.paging.on_failure.is_none());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("roster-config-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[directory\nseed = ").unwrap();

        let result = load_config_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_generates_commented_default() {
        let dir =
            std::env::temp_dir().join(format!("roster-config-gen-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = fs::remove_dir_all(&dir);

        let config = load_config_from(&path).unwrap();
        assert!(config.directory.seed.is_none());
        assert!(path.exists());

        // The generated file is all comments, so it parses to defaults
        let reparsed = load_config_from(&path).unwrap();
        assert!(reparsed.directory.base_url.is_none());

        fs::remove_dir_all(&dir).unwrap();
    }
}
