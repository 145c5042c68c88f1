//! API Configuration Module
//!
//! Server, provider and debate settings, loaded once from environment
//! variables at startup. The fallback OpenAI key is read here and handed to
//! [`ModelConfig::resolve`] explicitly; nothing below this layer looks at the
//! environment.

use std::net::SocketAddr;
use std::str::FromStr;

use boardroom_core::{ConfigError, ModelConfig, ValidationError, DEFAULT_MODEL};
use boardroom_llm::providers::openai::DEFAULT_BASE_URL;
use secrecy::{ExposeSecret, SecretString};

use crate::constants::{
    DEFAULT_BIND_HOST, DEFAULT_CORS_MAX_AGE_SECS, DEFAULT_MAX_TURNS, DEFAULT_MAX_TURNS_LIMIT,
    DEFAULT_PORT, DEFAULT_REQUESTS_PER_MINUTE,
};

// ============================================================================
// PROVIDER SELECTION
// ============================================================================

/// Which chat provider serves the agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    /// Deterministic offline replies.
    Mock,
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "mock" => Ok(Self::Mock),
            other => Err(ConfigError::InvalidValue {
                field: "BOARDROOM_PROVIDER".to_string(),
                value: other.to_string(),
                reason: "expected 'openai' or 'mock'".to_string(),
            }),
        }
    }
}

// ============================================================================
// API CONFIGURATION
// ============================================================================

/// Process-wide configuration. Not `Clone`: share it behind an `Arc`.
#[derive(Debug)]
pub struct ApiConfig {
    pub bind_host: String,
    pub port: u16,

    /// Model every agent talks to.
    pub model: String,
    /// Used when a request carries no key of its own.
    fallback_api_key: Option<SecretString>,
    pub openai_base_url: String,
    pub requests_per_minute: u32,
    pub provider: ProviderKind,

    /// Turn cap used when a debate request omits one.
    pub default_max_turns: u32,
    /// Largest turn cap a request may ask for.
    pub max_turns_limit: u32,

    /// Allowed CORS origins. Empty means allow all origins (dev mode).
    pub cors_origins: Vec<String>,
    pub cors_max_age_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_host: DEFAULT_BIND_HOST.to_string(),
            port: DEFAULT_PORT,
            model: DEFAULT_MODEL.to_string(),
            fallback_api_key: None,
            openai_base_url: DEFAULT_BASE_URL.to_string(),
            requests_per_minute: DEFAULT_REQUESTS_PER_MINUTE,
            provider: ProviderKind::OpenAi,
            default_max_turns: DEFAULT_MAX_TURNS,
            max_turns_limit: DEFAULT_MAX_TURNS_LIMIT,
            cors_origins: Vec::new(),
            cors_max_age_secs: DEFAULT_CORS_MAX_AGE_SECS,
        }
    }
}

impl ApiConfig {
    /// Create ApiConfig from environment variables.
    ///
    /// Environment variables:
    /// - `BOARDROOM_BIND`: Bind host (default: 0.0.0.0)
    /// - `PORT` or `BOARDROOM_PORT`: Listen port (default: 8080)
    /// - `BOARDROOM_MODEL`: Model identifier (default: gpt-4o-mini)
    /// - `OPENAI_API_KEY`: Fallback credential (optional)
    /// - `OPENAI_BASE_URL`: API root (default: https://api.openai.com/v1)
    /// - `BOARDROOM_REQUESTS_PER_MINUTE`: Client-side pacing (default: 60)
    /// - `BOARDROOM_PROVIDER`: "openai" or "mock" (default: openai)
    /// - `BOARDROOM_DEFAULT_MAX_TURNS`: Debate turn cap (default: 3)
    /// - `BOARDROOM_MAX_TURNS_LIMIT`: Largest allowed turn cap (default: 10)
    /// - `BOARDROOM_CORS_ORIGINS`: Comma-separated allowed origins (empty = allow all)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match get("PORT").or_else(|| get("BOARDROOM_PORT")) {
            Some(value) => parse_value("PORT", &value)?,
            None => defaults.port,
        };
        let requests_per_minute = match get("BOARDROOM_REQUESTS_PER_MINUTE") {
            Some(value) => parse_value("BOARDROOM_REQUESTS_PER_MINUTE", &value)?,
            None => defaults.requests_per_minute,
        };
        let provider = match get("BOARDROOM_PROVIDER") {
            Some(value) => value.parse()?,
            None => defaults.provider,
        };
        let default_max_turns = match get("BOARDROOM_DEFAULT_MAX_TURNS") {
            Some(value) => parse_value("BOARDROOM_DEFAULT_MAX_TURNS", &value)?,
            None => defaults.default_max_turns,
        };
        let max_turns_limit = match get("BOARDROOM_MAX_TURNS_LIMIT") {
            Some(value) => parse_value("BOARDROOM_MAX_TURNS_LIMIT", &value)?,
            None => defaults.max_turns_limit,
        };
        let cors_origins = get("BOARDROOM_CORS_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let config = Self {
            bind_host: get("BOARDROOM_BIND").unwrap_or(defaults.bind_host),
            port,
            model: get("BOARDROOM_MODEL").unwrap_or(defaults.model),
            fallback_api_key: get("OPENAI_API_KEY").map(|key| SecretString::new(key.into())),
            openai_base_url: get("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            requests_per_minute,
            provider,
            default_max_turns,
            max_turns_limit,
            cors_origins,
            cors_max_age_secs: defaults.cors_max_age_secs,
        };
        config.validate()?;
        Ok(config)
    }

    /// Set the fallback credential.
    pub fn with_fallback_api_key(mut self, key: impl Into<String>) -> Self {
        let key: String = key.into();
        self.fallback_api_key = Some(SecretString::new(key.into()));
        self
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_turns_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "BOARDROOM_MAX_TURNS_LIMIT".to_string(),
                value: self.max_turns_limit.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.default_max_turns == 0 || self.default_max_turns > self.max_turns_limit {
            return Err(ConfigError::InvalidValue {
                field: "BOARDROOM_DEFAULT_MAX_TURNS".to_string(),
                value: self.default_max_turns.to_string(),
                reason: format!("must be between 1 and {}", self.max_turns_limit),
            });
        }
        if self.model.is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "BOARDROOM_MODEL".to_string(),
            });
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.bind_host, self.port);
        addr.parse().map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
            field: "BOARDROOM_BIND".to_string(),
            value: addr.clone(),
            reason: e.to_string(),
        })
    }

    pub fn has_fallback_api_key(&self) -> bool {
        self.fallback_api_key.is_some()
    }

    /// Model configuration for one interaction: the key supplied with the
    /// request wins, the fallback key is used otherwise.
    pub fn model_config(&self, explicit_key: Option<&str>) -> Result<ModelConfig, ConfigError> {
        let fallback = self.fallback_api_key.as_ref().map(|key| key.expose_secret());
        ModelConfig::resolve(self.model.as_str(), explicit_key, fallback)
    }

    /// Apply the default and the limit to a requested turn cap.
    pub fn resolve_max_turns(&self, requested: Option<u32>) -> Result<u32, ValidationError> {
        let max_turns = requested.unwrap_or(self.default_max_turns);
        if max_turns == 0 || max_turns > self.max_turns_limit {
            return Err(ValidationError::OutOfRange {
                field: "max_turns".to_string(),
                min: 1,
                max: i64::from(self.max_turns_limit),
                value: i64::from(max_turns),
            });
        }
        Ok(max_turns)
    }
}

fn parse_value<T: FromStr>(field: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: "not a valid number".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.provider, ProviderKind::OpenAi);
        assert_eq!(config.default_max_turns, 3);
        assert_eq!(config.max_turns_limit, 10);
        assert!(config.cors_origins.is_empty());
        assert!(!config.has_fallback_api_key());
    }

    #[test]
    fn test_env_overrides() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("PORT", "9000"),
            ("BOARDROOM_PORT", "9100"),
            ("BOARDROOM_MODEL", "gpt-4o"),
            ("BOARDROOM_PROVIDER", "Mock"),
            ("OPENAI_API_KEY", "sk-env"),
            ("BOARDROOM_CORS_ORIGINS", "https://a.example, ,https://b.example"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.provider, ProviderKind::Mock);
        assert!(config.has_fallback_api_key());
        assert_eq!(config.cors_origins, vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(ApiConfig::from_lookup(lookup(&[("PORT", "eighty")])).is_err());
        assert!(ApiConfig::from_lookup(lookup(&[("BOARDROOM_PROVIDER", "anthropic")])).is_err());
        assert!(ApiConfig::from_lookup(lookup(&[("BOARDROOM_DEFAULT_MAX_TURNS", "11")])).is_err());
        assert!(ApiConfig::from_lookup(lookup(&[("BOARDROOM_MAX_TURNS_LIMIT", "0")])).is_err());
    }

    #[test]
    fn test_explicit_key_wins_over_fallback() {
        let config = ApiConfig::default().with_fallback_api_key("sk-env");
        let explicit = config.model_config(Some("sk-user")).unwrap();
        assert_eq!(explicit.credential(), "sk-user");

        let fallback = config.model_config(Some("  ")).unwrap();
        assert_eq!(fallback.credential(), "sk-env");
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let config = ApiConfig::default();
        assert!(matches!(
            config.model_config(None),
            Err(ConfigError::MissingCredential)
        ));
    }

    #[test]
    fn test_resolve_max_turns() {
        let config = ApiConfig::default();
        assert_eq!(config.resolve_max_turns(None), Ok(3));
        assert_eq!(config.resolve_max_turns(Some(10)), Ok(10));
        assert!(matches!(
            config.resolve_max_turns(Some(0)),
            Err(ValidationError::OutOfRange { value: 0, .. })
        ));
        assert!(config.resolve_max_turns(Some(11)).is_err());
    }

    #[test]
    fn test_bind_addr() {
        let config = ApiConfig::default();
        assert_eq!(config.bind_addr().unwrap().port(), 8080);

        let mut bad = ApiConfig::default();
        bad.bind_host = "not a host".to_string();
        assert!(bad.bind_addr().is_err());
    }

    #[test]
    fn test_debug_redacts_fallback_key() {
        let config = ApiConfig::default().with_fallback_api_key("sk-very-secret");
        assert!(!format!("{:?}", config).contains("sk-very-secret"));
    }
}
