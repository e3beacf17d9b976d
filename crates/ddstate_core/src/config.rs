use std::path::{Path, PathBuf};
use std::time::Duration;

use ddstate_api::{Credentials, DEFAULT_SITE, site_url};
use serde::{Deserialize, Serialize};

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings loaded from `.ddstate.toml`.
///
/// Every field is optional; values given on the command line or through the
/// environment take precedence over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Datadog API key.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Datadog application key.
    #[serde(default)]
    pub app_key: Option<String>,

    /// Datadog site (e.g. `"datadoghq.eu"`). Ignored when `api_url` is set.
    #[serde(default)]
    pub site: Option<String>,

    /// Full API base URL, for proxies and tests.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Values supplied on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Datadog API key.
    pub api_key: Option<String>,
    /// Datadog application key.
    pub app_key: Option<String>,
    /// Datadog site.
    pub site: Option<String>,
    /// Full API base URL.
    pub api_url: Option<String>,
}

/// Fully resolved connection settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Keys used to authenticate every request.
    pub credentials: Credentials,
    /// API base URL.
    pub api_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Config {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a `.ddstate.toml` file.
    ///
    /// Returns the empty configuration if the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })
    }

    /// Merges `overrides` over this configuration and fills in defaults.
    ///
    /// Fails if either key is missing from both sources.
    pub fn resolve(&self, overrides: Overrides) -> Result<Settings, ConfigError> {
        let api_key = overrides
            .api_key
            .or_else(|| self.api_key.clone())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingCredential { name: "api_key" })?;

        let app_key = overrides
            .app_key
            .or_else(|| self.app_key.clone())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingCredential { name: "app_key" })?;

        let api_url = overrides
            .api_url
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| {
                let site = overrides.site.or_else(|| self.site.clone());
                site_url(site.as_deref().unwrap_or(DEFAULT_SITE))
            });

        let timeout = self.timeout_secs.map_or(DEFAULT_TIMEOUT, Duration::from_secs);

        Ok(Settings {
            credentials: Credentials::new(api_key, app_key),
            api_url,
            timeout,
        })
    }
}

/// Errors that can occur when loading or resolving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read from disk.
    #[error("failed to read config '{path}': {source}")]
    Read {
        /// Path to the config file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file contained invalid TOML or unexpected values.
    #[error("failed to parse config '{path}': {source}")]
    Parse {
        /// Path to the config file that could not be parsed.
        path: PathBuf,
        /// The underlying TOML deserialization error.
        #[source]
        source: toml::de::Error,
    },

    /// A required credential was not supplied anywhere.
    #[error("missing {name}: pass it as a flag, set it in the environment, or add it to the config file")]
    MissingCredential {
        /// Name of the missing setting.
        name: &'static str,
    },
}

impl ConfigError {
    /// Returns the file path associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } => Some(path),
            Self::MissingCredential { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn keys() -> Overrides {
        Overrides {
            api_key: Some("flag-api".to_string()),
            app_key: Some("flag-app".to_string()),
            ..Overrides::default()
        }
    }

    #[test]
    fn from_toml_parses_all_fields() {
        let config = Config::from_toml(
            r#"
                api_key = "file-api"
                app_key = "file-app"
                site = "datadoghq.eu"
                timeout_secs = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.api_key.as_deref(), Some("file-api"));
        assert_eq!(config.site.as_deref(), Some("datadoghq.eu"));
        assert_eq!(config.timeout_secs, Some(10));
    }

    #[test]
    fn from_toml_rejects_unknown_keys() {
        let err = Config::from_toml(r#"apikey = "typo""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn load_missing_file_returns_empty_config() {
        let config = Config::load(Path::new("/nonexistent/.ddstate.toml")).unwrap();
        assert_eq!(config, Config::new());
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"app_key = "file-app""#).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.app_key.as_deref(), Some("file-app"));
    }

    #[test]
    fn load_reports_path_on_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "api_key = ").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert_eq!(err.path(), Some(file.path()));
    }

    #[test]
    fn resolve_defaults_to_us1_site_and_timeout() {
        let settings = Config::new().resolve(keys()).unwrap();
        assert_eq!(settings.api_url, "https://api.datadoghq.com");
        assert_eq!(settings.timeout, DEFAULT_TIMEOUT);
        assert_eq!(settings.credentials, Credentials::new("flag-api", "flag-app"));
    }

    #[test]
    fn resolve_prefers_overrides_over_file() {
        let config = Config {
            api_key: Some("file-api".to_string()),
            app_key: Some("file-app".to_string()),
            site: Some("datadoghq.eu".to_string()),
            ..Config::new()
        };

        let settings = config
            .resolve(Overrides {
                site: Some("us5.datadoghq.com".to_string()),
                ..keys()
            })
            .unwrap();

        assert_eq!(settings.credentials, Credentials::new("flag-api", "flag-app"));
        assert_eq!(settings.api_url, "https://api.us5.datadoghq.com");
    }

    #[test]
    fn resolve_falls_back_to_file_credentials() {
        let config = Config {
            api_key: Some("file-api".to_string()),
            app_key: Some("file-app".to_string()),
            timeout_secs: Some(3),
            ..Config::new()
        };

        let settings = config.resolve(Overrides::default()).unwrap();
        assert_eq!(settings.credentials, Credentials::new("file-api", "file-app"));
        assert_eq!(settings.timeout, Duration::from_secs(3));
    }

    #[test]
    fn api_url_wins_over_site() {
        let config = Config {
            site: Some("datadoghq.eu".to_string()),
            api_url: Some("http://127.0.0.1:8080".to_string()),
            ..Config::new()
        };

        let settings = config.resolve(keys()).unwrap();
        assert_eq!(settings.api_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn resolve_requires_both_keys() {
        let err = Config::new()
            .resolve(Overrides {
                api_key: Some("flag-api".to_string()),
                ..Overrides::default()
            })
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential { name: "app_key" }));

        let err = Config::new().resolve(Overrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential { name: "api_key" }));
    }

    #[test]
    fn empty_key_counts_as_missing() {
        let err = Config::new()
            .resolve(Overrides {
                api_key: Some(String::new()),
                app_key: Some("flag-app".to_string()),
                ..Overrides::default()
            })
            .unwrap_err();
        assert!(err.to_string().contains("api_key"));
    }
}
