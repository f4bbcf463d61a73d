use serde::{Deserialize, Serialize};

use crate::domain::cache::{ServerPair, ServerPairings};
use crate::domain::error::CacheResult;
use crate::infrastructure::cache::ClientType;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub cache: CacheSettings,
    pub logging: LoggingConfig,
}

/// Deployment settings for the cache driver
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub client: ClientType,
    /// `host:port` entries
    pub servers: Vec<String>,
    pub ttl_secs: u64,
    pub key_prefix: String,
    /// Name of the identity field used to build keys
    pub key_field: String,
    pub allow_key_override: bool,
    pub allow_non_expiring_keys: bool,
    pub allow_ttl_override: bool,
    /// Entry bound for the in-memory client
    pub max_capacity: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            client: ClientType::default(),
            servers: vec!["localhost:11211".to_string()],
            ttl_secs: 3600,
            key_prefix: "typed-cache".to_string(),
            key_field: "id".to_string(),
            allow_key_override: true,
            allow_non_expiring_keys: false,
            allow_ttl_override: true,
            max_capacity: 10_000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl CacheSettings {
    /// Parses `servers` into pairings, dropping duplicates
    pub fn server_pairings(&self) -> CacheResult<ServerPairings> {
        self.servers
            .iter()
            .map(|entry| entry.parse::<ServerPair>())
            .collect()
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cache.servers")
                    .try_parsing(true),
            );

        Self::from_builder(builder)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, config::ConfigError> {
        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the driver could not run with
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        self.cache
            .server_pairings()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;

        if self.cache.key_prefix.is_empty() {
            return Err(config::ConfigError::Message(
                "cache.key_prefix must not be empty".to_string(),
            ));
        }

        if self.cache.key_field.is_empty() {
            return Err(config::ConfigError::Message(
                "cache.key_field must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use config::{Config, File, FileFormat};

    use super::*;

    fn from_json(json: &str) -> Result<AppConfig, config::ConfigError> {
        AppConfig::from_builder(Config::builder().add_source(File::from_str(json, FileFormat::Json)))
    }

    #[test]
    fn test_defaults() {
        let config = from_json("{}").unwrap();

        assert_eq!(config.cache.client, ClientType::InMemory);
        assert_eq!(config.cache.ttl_secs, 3600);
        assert_eq!(config.cache.servers, vec!["localhost:11211"]);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_cache_section() {
        let config = from_json(
            r#"{
                "cache": {
                    "client": "redis",
                    "servers": ["cache-1:6379", "cache-2:6379", "cache-1:6379"],
                    "ttl_secs": 60,
                    "key_prefix": "users",
                    "key_field": "user_id",
                    "allow_key_override": false
                },
                "logging": { "level": "debug", "format": "json" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.cache.client, ClientType::Redis);
        assert_eq!(config.cache.key_prefix, "users");
        assert!(!config.cache.allow_key_override);
        assert_eq!(config.logging.format, LogFormat::Json);

        let pairings = config.cache.server_pairings().unwrap();
        assert_eq!(pairings.len(), 2);
    }

    #[test]
    fn test_rejects_malformed_server() {
        let result = from_json(r#"{ "cache": { "servers": ["no-port"] } }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_empty_key_field() {
        let result = from_json(r#"{ "cache": { "key_field": "" } }"#);
        assert!(result.is_err());
    }
}
