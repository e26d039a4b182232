//! Shared configuration for the fourpaws CLI.
//!
//! TOML settings, environment overrides, platform paths, and the
//! file-backed session store. The core crate never sees these types --
//! it receives a pre-built `PlatformConfig` and a `CredentialStore`.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use fourpaws_core::{DEFAULT_BACKEND_URL, PlatformConfig, RetryPolicy};

mod session_file;

pub use session_file::SessionFile;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML settings ───────────────────────────────────────────────────

/// User-facing settings merged from defaults, the config file, and
/// `FOURPAWS_`-prefixed environment variables.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Backend base URL.
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Retry tuning for the community detail loader.
    #[serde(default)]
    pub retry: RetrySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            timeout: default_timeout(),
            retry: RetrySettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetrySettings {
    /// Total attempts before giving up.
    #[serde(default = "default_attempts")]
    pub attempts: u32,

    /// Base backoff in milliseconds; attempt N waits N times this.
    #[serde(default = "default_backoff")]
    pub backoff: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            attempts: default_attempts(),
            backoff: default_backoff(),
        }
    }
}

fn default_backend() -> String {
    DEFAULT_BACKEND_URL.into()
}
fn default_timeout() -> u64 {
    30
}
fn default_attempts() -> u32 {
    3
}
fn default_backoff() -> u64 {
    1000
}

impl Settings {
    /// Translate settings into the core platform configuration.
    ///
    /// This is the single boundary where config types cross into core
    /// types.
    pub fn platform_config(&self) -> Result<PlatformConfig, ConfigError> {
        let base_url: url::Url = self.backend.parse().map_err(|_| ConfigError::Validation {
            field: "backend".into(),
            reason: format!("invalid URL: {}", self.backend),
        })?;

        Ok(PlatformConfig {
            base_url,
            timeout: Duration::from_secs(self.timeout),
            retry: RetryPolicy {
                max_attempts: self.retry.attempts,
                base_delay: Duration::from_millis(self.retry.backoff),
            },
        })
    }
}

// ── Platform paths ──────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("app", "fourpaws", "fourpaws")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        })
}

/// Resolve the session file path in the platform data dir.
pub fn session_path() -> PathBuf {
    ProjectDirs::from("app", "fourpaws", "fourpaws")
        .map(|dirs| dirs.data_dir().join("session.json"))
        .unwrap_or_else(|| {
            let mut p = dirs_fallback();
            p.push("session.json");
            p
        })
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("fourpaws");
    p
}

// ── Settings loading ────────────────────────────────────────────────

/// Load settings from file + environment.
pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_from(&config_path())
}

/// Load settings merging defaults, the given TOML file (which may not
/// exist), and `FOURPAWS_`-prefixed environment variables.
pub fn load_settings_from(path: &std::path::Path) -> Result<Settings, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Settings::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("FOURPAWS_").split("_"));

    let settings: Settings = figment.extract()?;
    Ok(settings)
}

/// Load settings, falling back to defaults on any failure.
pub fn load_settings_or_default() -> Settings {
    load_settings().unwrap_or_default()
}

// ── Settings saving ─────────────────────────────────────────────────

/// Serialize settings to TOML and write them to the canonical path.
pub fn save_settings(settings: &Settings) -> Result<(), ConfigError> {
    save_settings_to(settings, &config_path())
}

pub fn save_settings_to(settings: &Settings, path: &std::path::Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(settings)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_point_at_the_hosted_backend() {
        let settings = Settings::default();
        assert_eq!(settings.backend, DEFAULT_BACKEND_URL);
        assert_eq!(settings.timeout, 30);
        assert_eq!(settings.retry.attempts, 3);
        assert_eq!(settings.retry.backoff, 1000);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(settings.backend, DEFAULT_BACKEND_URL);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "backend = \"http://localhost:3000\"\n\n[retry]\nattempts = 5\n",
        )
        .unwrap();

        let settings = load_settings_from(&path).unwrap();
        assert_eq!(settings.backend, "http://localhost:3000");
        assert_eq!(settings.retry.attempts, 5);
        // Unset keys keep their defaults.
        assert_eq!(settings.timeout, 30);
        assert_eq!(settings.retry.backoff, 1000);
    }

    #[test]
    fn settings_round_trip_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let settings = Settings {
            backend: "http://localhost:3000".into(),
            timeout: 10,
            ..Settings::default()
        };

        save_settings_to(&settings, &path).unwrap();
        let loaded = load_settings_from(&path).unwrap();
        assert_eq!(loaded.backend, "http://localhost:3000");
        assert_eq!(loaded.timeout, 10);
    }

    #[test]
    fn platform_config_carries_the_tuning_over() {
        let settings = Settings {
            timeout: 10,
            retry: RetrySettings {
                attempts: 5,
                backoff: 250,
            },
            ..Settings::default()
        };

        let config = settings.platform_config().unwrap();
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.base_delay, Duration::from_millis(250));
    }

    #[test]
    fn bad_backend_url_is_a_validation_error() {
        let settings = Settings {
            backend: "not a url".into(),
            ..Settings::default()
        };

        let err = settings.platform_config().unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }
}
