//! Cache config - topology, TTL, capability flags and key policy

use std::fmt::{self, Debug};
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;

use crate::domain::error::{CacheError, CacheResult};
use crate::domain::storable::StorableObject;

/// One cache server address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ServerPair {
    pub host: String,
    pub port: u16,
}

impl ServerPair {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for ServerPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl FromStr for ServerPair {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, port) = s.trim().rsplit_once(':').ok_or_else(|| {
            CacheError::configuration(format!("Server '{}' must be in host:port form", s))
        })?;

        if host.is_empty() {
            return Err(CacheError::configuration(format!(
                "Server '{}' has an empty host",
                s
            )));
        }

        let port = port.parse::<u16>().map_err(|e| {
            CacheError::configuration(format!("Server '{}' has an invalid port: {}", s, e))
        })?;

        Ok(Self::new(host, port))
    }
}

/// Ordered, duplicate-free set of server pairs
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ServerPairings {
    pairs: Vec<ServerPair>,
}

impl ServerPairings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a pair; returns `false` if it was already present
    pub fn add_server(&mut self, host: impl Into<String>, port: u16) -> bool {
        let pair = ServerPair::new(host, port);

        if self.pairs.contains(&pair) {
            return false;
        }

        self.pairs.push(pair);
        true
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServerPair> {
        self.pairs.iter()
    }
}

impl FromIterator<ServerPair> for ServerPairings {
    fn from_iter<I: IntoIterator<Item = ServerPair>>(iter: I) -> Self {
        let mut pairings = Self::new();

        for pair in iter {
            pairings.add_server(pair.host, pair.port);
        }

        pairings
    }
}

/// Deployment policy consumed by the cache driver
///
/// Implementations build their server pairings once, at construction, and
/// are immutable afterwards.
pub trait CacheConfig: Debug + Send + Sync {
    /// Name used in error messages
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn server_pairings(&self) -> &ServerPairings;

    fn ttl(&self) -> Duration;

    fn cache_allows_key_override(&self) -> bool;

    fn cache_allows_non_expiring_keys(&self) -> bool;

    fn cache_allows_ttl_override(&self) -> bool;

    /// Derives the cache key for an object
    ///
    /// Fails with `InvalidObjectForKeyCreation` when the object is not the
    /// variant this config accepts, or its identity is still at default.
    fn create_key_from_storable_object(&self, obj: &dyn StorableObject) -> CacheResult<String>;
}

/// Narrows a storable object to the one variant a config accepts
pub fn downcast_storable<O: StorableObject>(obj: &dyn StorableObject) -> CacheResult<&O> {
    obj.as_any().downcast_ref::<O>().ok_or_else(|| {
        CacheError::invalid_object_for_key(format!(
            "{} is required obj={}",
            std::any::type_name::<O>(),
            obj.type_name()
        ))
    })
}
