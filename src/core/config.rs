//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.skincare-advisor/config.toml`. If missing on first
//! run, a commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AdvisorConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub greeting: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub health_check: Option<bool>,
}

/// Values supplied on the command line (None = flag not given).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub no_health_check: bool,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_GREETING: &str =
    "Hi! 👋 I'm an AI skincare advisor. Tell me about your skin type or what's bothering you.";

const ENV_API_URL: &str = "ADVISOR_API_URL";
const ENV_TIMEOUT_SECS: &str = "ADVISOR_TIMEOUT_SECS";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub api_base_url: String,
    pub greeting: String,
    /// None = wait for the backend indefinitely.
    pub request_timeout: Option<Duration>,
    pub health_check: bool,
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

/// Returns the path to `~/.skincare-advisor/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".skincare-advisor").join("config.toml"))
}

/// Load config from `explicit` if given, else from the default location.
///
/// A missing default file is generated and yields `AdvisorConfig::default()`.
/// A missing explicit file is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<AdvisorConfig, ConfigError> {
    if let Some(path) = explicit {
        return read_config(path);
    }

    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(AdvisorConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(AdvisorConfig::default());
    }

    read_config(&path)
}

fn read_config(path: &Path) -> Result<AdvisorConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: AdvisorConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# SkinCare Advisor Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# greeting = "Hi! I'm an AI skincare advisor."

# [api]
# base_url = "http://localhost:5000"   # Or set ADVISOR_API_URL env var
# timeout_secs = 60                     # Or ADVISOR_TIMEOUT_SECS; unset = wait forever
# health_check = true                   # Probe /api/health on startup
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
pub fn resolve(config: &AdvisorConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

fn resolve_with_env(
    config: &AdvisorConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let api_base_url = cli
        .base_url
        .clone()
        .or_else(|| env(ENV_API_URL))
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

    // Timeout: CLI → env → config → none
    let timeout_secs = cli
        .timeout_secs
        .or_else(|| {
            env(ENV_TIMEOUT_SECS).and_then(|raw| match raw.trim().parse::<u64>() {
                Ok(secs) => Some(secs),
                Err(e) => {
                    warn!("Ignoring {}={:?}: {}", ENV_TIMEOUT_SECS, raw, e);
                    None
                }
            })
        })
        .or(config.api.timeout_secs);

    let greeting = config
        .general
        .greeting
        .as_deref()
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .unwrap_or(DEFAULT_GREETING)
        .to_string();

    ResolvedConfig {
        api_base_url,
        greeting,
        // Zero means "no timeout", same as unset.
        request_timeout: timeout_secs.filter(|&s| s > 0).map(Duration::from_secs),
        health_check: !cli.no_health_check && config.api.health_check.unwrap_or(true),
    }
}
