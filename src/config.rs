//! Configuration file parser for ~/.config/memeverse/config.toml.
//!
//! The file is optional. A missing or blank file yields `Config::default()`,
//! and unknown keys are logged and otherwise ignored.
use crate::meme::DEFAULT_ENDPOINT;
use crate::store::DEFAULT_TRENDING_SIZE;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {size} bytes (max {max} bytes)")]
    TooLarge { size: u64, max: u64 },
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Where memes come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// GET the configured endpoint.
    #[default]
    Remote,
    /// Built-in deterministic fixture, no network.
    Demo,
}

/// Top-level application configuration. Any subset of keys may be given.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// "dark" or "light".
    pub theme: String,

    pub source: SourceKind,

    /// JSON endpoint shaped as `{ data: { memes: [...] } }`.
    pub endpoint: String,

    /// How many leading records make up the trending subset.
    pub trending_size: usize,

    /// Client timeout for the meme request. 0 = no timeout.
    pub request_timeout_secs: u64,

    /// Keybinding overrides: action name → key string.
    pub keybindings: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            source: SourceKind::Remote,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            trending_size: DEFAULT_TRENDING_SIZE,
            request_timeout_secs: 0,
            keybindings: HashMap::new(),
        }
    }
}

const KNOWN_KEYS: [&str; 6] = [
    "theme",
    "source",
    "endpoint",
    "trending_size",
    "request_timeout_secs",
    "keybindings",
];

impl Config {
    const MAX_FILE_SIZE: u64 = 1_048_576; // 1MB

    /// Load configuration from a TOML file.
    ///
    /// - Missing, empty or whitespace-only file → defaults
    /// - Invalid TOML or wrong value types → `ConfigError::Parse`
    /// - Over 1MB → `ConfigError::TooLarge`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge {
                    size: meta.len(),
                    max: Self::MAX_FILE_SIZE,
                });
            }
            Ok(_) => std::fs::read_to_string(path),
            Err(e) => Err(e),
        };

        let content = match content {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys().filter(|k| !KNOWN_KEYS.contains(&k.as_str())) {
                tracing::warn!(key = %key, "Unknown key in config file, ignoring");
            }
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(
            path = %path.display(),
            theme = %config.theme,
            source = ?config.source,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// `None` when `request_timeout_secs` is 0.
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// Write `content` to a fresh config file under the temp dir.
    fn write_config(test: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("memeverse_config_test_{}", test));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    fn cleanup(path: &Path) {
        if let Some(dir) = path.parent() {
            std::fs::remove_dir_all(dir).ok();
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, "dark");
        assert_eq!(config.source, SourceKind::Remote);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.trending_size, 10);
        assert!(config.request_timeout().is_none());
        assert!(config.keybindings.is_empty());
    }

    #[test]
    fn test_missing_file_returns_default() {
        let path = std::env::temp_dir().join("memeverse_test_nonexistent_config.toml");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn test_blank_files_return_default() {
        for (name, content) in [("empty", ""), ("whitespace", "   \n  \n  ")] {
            let path = write_config(name, content);
            let config = Config::load(&path).unwrap();
            assert_eq!(config.source, SourceKind::Remote);
            cleanup(&path);
        }
    }

    #[test]
    fn test_partial_config_uses_defaults_for_missing() {
        let path = write_config("partial", "source = \"demo\"\n");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.source, SourceKind::Demo);
        assert_eq!(config.theme, "dark");
        assert_eq!(config.trending_size, 10);
        cleanup(&path);
    }

    #[test]
    fn test_full_config() {
        let path = write_config(
            "full",
            r#"
theme = "light"
source = "remote"
endpoint = "http://127.0.0.1:9000/memes"
trending_size = 5
request_timeout_secs = 15

[keybindings]
quit = "Ctrl+q"
refresh = "F5"
"#,
        );

        let config = Config::load(&path).unwrap();
        assert_eq!(config.theme, "light");
        assert_eq!(config.endpoint, "http://127.0.0.1:9000/memes");
        assert_eq!(config.trending_size, 5);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(
            config.keybindings.get("refresh").map(String::as_str),
            Some("F5")
        );
        cleanup(&path);
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let path = write_config("invalid", "this is not [valid toml");
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("Invalid TOML"));
        cleanup(&path);
    }

    #[test]
    fn test_unknown_source_is_rejected() {
        let path = write_config("bad_source", "source = \"carrier-pigeon\"\n");
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse(_))));
        cleanup(&path);
    }

    #[test]
    fn test_unknown_keys_accepted() {
        let path = write_config("unknown", "theme = \"dark\"\nrefresh_interval_minutes = 5\n");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.theme, "dark");
        cleanup(&path);
    }

    #[test]
    fn test_wrong_type_returns_error() {
        let path = write_config("wrongtype", "trending_size = \"ten\"\n");
        assert!(Config::load(&path).is_err());
        cleanup(&path);
    }

    #[test]
    fn test_too_large_file_rejected() {
        let path = write_config("too_large", &"a".repeat(1_048_577));
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TooLarge { .. }));
        assert!(err.to_string().contains("too large"));
        cleanup(&path);
    }
}
