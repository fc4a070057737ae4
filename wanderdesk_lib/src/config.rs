//! Connection settings: where the backend lives and how to authenticate.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `WANDERDESK_*` environment variables.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use wanderdesk_api::{Client, NoAuth, StaticToken, TokenFile, TokenSource, DEFAULT_LIMIT};

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "wanderdesk.toml";
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{0}")]
    Invalid(String),
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AdminConfig {
    /// Root of the REST API, e.g. `https://admin.example.com/api`.
    pub base_url: String,
    /// Bearer token sent with every request.
    pub token: Option<String>,
    /// File holding the token. Takes precedence over `token` and is re-read
    /// on every request so a refreshed token is picked up without restarting.
    pub token_file: Option<PathBuf>,
    /// Page size of the first list fetch.
    pub default_limit: u32,
    pub timeout_secs: u64,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            token_file: None,
            default_limit: DEFAULT_LIMIT,
            timeout_secs: wanderdesk_api::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl AdminConfig {
    /// Loads `path`, or `wanderdesk.toml` if it exists, then applies the
    /// process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    Self::from_file(fallback)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env_from(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Overrides fields from `lookup`, which maps variable names to values.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("WANDERDESK_API_URL") {
            self.base_url = url;
        }
        if let Some(token) = lookup("WANDERDESK_TOKEN") {
            self.token = Some(token);
        }
        if let Some(file) = lookup("WANDERDESK_TOKEN_FILE") {
            self.token_file = Some(PathBuf::from(file));
        }
        if let Some(limit) = lookup("WANDERDESK_PAGE_LIMIT") {
            self.default_limit = parse_env("WANDERDESK_PAGE_LIMIT", &limit)?;
        }
        if let Some(secs) = lookup("WANDERDESK_TIMEOUT_SECS") {
            self.timeout_secs = parse_env("WANDERDESK_TIMEOUT_SECS", &secs)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = url::Url::parse(&self.base_url)
            .map_err(|e| ConfigError::Invalid(format!("base_url '{}': {}", self.base_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "base_url must be http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.default_limit == 0 {
            return Err(ConfigError::Invalid(
                "default_limit must be at least 1".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Where bearer tokens come from: `token_file`, then `token`, else none.
    pub fn token_source(&self) -> Arc<dyn TokenSource> {
        if let Some(path) = &self.token_file {
            return Arc::new(TokenFile::new(path.clone()));
        }
        match self.token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Arc::new(StaticToken::new(token)),
            _ => Arc::new(NoAuth),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Builds the HTTP client these settings describe.
    pub fn client(&self) -> Result<Client, ConfigError> {
        Client::new(&self.base_url, self.token_source(), self.timeout())
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("{} is not a valid number: '{}'", key, raw)))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        let config = AdminConfig::default();
        assert_eq!(config.default_limit, 10);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn toml_overrides_defaults() {
        let config = AdminConfig::from_toml(
            r#"
            base_url = "https://admin.example.com/api"
            default_limit = 25
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url, "https://admin.example.com/api");
        assert_eq!(config.default_limit, 25);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = AdminConfig::from_toml("base_uri = \"x\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn env_overrides_file() {
        let mut config = AdminConfig::from_toml("default_limit = 25").unwrap();
        config
            .apply_env_from(env(&[
                ("WANDERDESK_API_URL", "https://staging.example.com/api"),
                ("WANDERDESK_PAGE_LIMIT", " 50 "),
                ("WANDERDESK_TOKEN", "abc"),
            ]))
            .unwrap();
        assert_eq!(config.base_url, "https://staging.example.com/api");
        assert_eq!(config.default_limit, 50);
        assert_eq!(config.token.as_deref(), Some("abc"));
    }

    #[test]
    fn bad_env_number_is_an_error() {
        let mut config = AdminConfig::default();
        let err = config
            .apply_env_from(env(&[("WANDERDESK_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("WANDERDESK_TIMEOUT_SECS"));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let config = AdminConfig {
            base_url: "ftp://example.com".to_string(),
            ..AdminConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AdminConfig {
            default_limit: 0,
            ..AdminConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn token_precedence() {
        let config = AdminConfig {
            token: Some("  ".to_string()),
            ..AdminConfig::default()
        };
        assert_eq!(config.token_source().token(), None);

        let config = AdminConfig {
            token: Some("abc".to_string()),
            ..AdminConfig::default()
        };
        assert_eq!(config.token_source().token().as_deref(), Some("abc"));

        let config = AdminConfig {
            token: Some("abc".to_string()),
            token_file: Some(PathBuf::from("/nonexistent/wanderdesk-token")),
            ..AdminConfig::default()
        };
        assert_eq!(config.token_source().token(), None);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = AdminConfig::from_file(Path::new("/nonexistent/wanderdesk.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/wanderdesk.toml"));
    }
}
