//! Cache configs used by tests

use std::time::Duration;

use super::config::{CacheConfig, ServerPairings, downcast_storable};
use super::key::identity_key;
use crate::domain::error::CacheResult;
use crate::domain::storable::StorableObject;
use crate::domain::storable::mock::ValidNoRequired;

/// Development config: one local server, keyed by `example_uint64`
#[derive(Debug, Clone)]
pub struct Dev {
    pairings: ServerPairings,
}

impl Dev {
    pub const PREFIX: &'static str = "lmc-mock-dev";

    pub fn new() -> Self {
        let mut config = Self {
            pairings: ServerPairings::new(),
        };
        config.servers_init();
        config
    }

    fn servers_init(&mut self) {
        self.pairings.add_server("localhost", 11211);
    }
}

impl Default for Dev {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheConfig for Dev {
    fn name(&self) -> &str {
        "Dev"
    }

    fn server_pairings(&self) -> &ServerPairings {
        &self.pairings
    }

    fn ttl(&self) -> Duration {
        Duration::from_secs(3600)
    }

    fn cache_allows_key_override(&self) -> bool {
        true
    }

    fn cache_allows_non_expiring_keys(&self) -> bool {
        false
    }

    fn cache_allows_ttl_override(&self) -> bool {
        true
    }

    fn create_key_from_storable_object(&self, obj: &dyn StorableObject) -> CacheResult<String> {
        let obj = downcast_storable::<ValidNoRequired>(obj)?;
        identity_key(Self::PREFIX, "example_uint64", &obj.example_uint64)
    }
}

/// Config without any servers
#[derive(Debug, Clone, Default)]
pub struct NoServers {
    pairings: ServerPairings,
}

impl CacheConfig for NoServers {
    fn name(&self) -> &str {
        "NoServers"
    }

    fn server_pairings(&self) -> &ServerPairings {
        &self.pairings
    }

    fn ttl(&self) -> Duration {
        Duration::from_secs(60)
    }

    fn cache_allows_key_override(&self) -> bool {
        false
    }

    fn cache_allows_non_expiring_keys(&self) -> bool {
        false
    }

    fn cache_allows_ttl_override(&self) -> bool {
        false
    }

    fn create_key_from_storable_object(&self, _obj: &dyn StorableObject) -> CacheResult<String> {
        Ok("no-servers".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::CacheError;
    use crate::domain::storable::mock::Valid;

    #[test]
    fn test_dev_key() {
        let mut obj = ValidNoRequired::default();
        obj.example_uint64.set(1234);

        let key = Dev::new().create_key_from_storable_object(&obj).unwrap();
        assert_eq!(key, "lmc-mock-dev-1234");
    }

    #[test]
    fn test_dev_key_is_deterministic() {
        let config = Dev::new();
        let mut obj = ValidNoRequired::default();
        obj.example_uint64.set(77);
        obj.example_string.set("first".to_string());

        let first = config.create_key_from_storable_object(&obj).unwrap();
        obj.example_string.set("second".to_string());
        let second = config.create_key_from_storable_object(&obj).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_dev_rejects_other_variant() {
        let mut obj = Valid::default();
        obj.example_uint64.set(1234);

        let result = Dev::new().create_key_from_storable_object(&obj);
        assert!(matches!(
            result,
            Err(CacheError::InvalidObjectForKeyCreation { .. })
        ));
    }

    #[test]
    fn test_dev_rejects_default_identity() {
        let result = Dev::new().create_key_from_storable_object(&ValidNoRequired::default());
        assert!(matches!(
            result,
            Err(CacheError::InvalidObjectForKeyCreation { .. })
        ));
    }

    #[test]
    fn test_dev_settings() {
        let config = Dev::new();

        assert_eq!(config.server_pairings().len(), 1);
        assert_eq!(config.ttl(), Duration::from_secs(3600));
        assert!(config.cache_allows_key_override());
        assert!(!config.cache_allows_non_expiring_keys());
        assert!(config.cache_allows_ttl_override());
    }
}
