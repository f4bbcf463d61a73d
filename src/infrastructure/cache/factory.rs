//! Client factory for runtime selection

use serde::{Deserialize, Serialize};

use crate::domain::cache::CacheClient;
use crate::domain::error::CacheError;

use super::in_memory::InMemoryClient;
use super::redis::RedisClient;

/// Supported client types
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientType {
    /// Process-local client using moka
    #[default]
    InMemory,
    /// Pool of Redis servers
    Redis,
}

impl std::fmt::Display for ClientType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientType::InMemory => write!(f, "in_memory"),
            ClientType::Redis => write!(f, "redis"),
        }
    }
}

impl std::str::FromStr for ClientType {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(ClientType::InMemory),
            "redis" => Ok(ClientType::Redis),
            _ => Err(CacheError::configuration(format!(
                "Unknown client type: {}. Valid types: in_memory, redis",
                s
            ))),
        }
    }
}

/// Factory for creating cache clients
#[derive(Debug, Default)]
pub struct ClientFactory {
    max_capacity: Option<u64>,
}

impl ClientFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum capacity (in-memory only)
    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = Some(capacity);
        self
    }

    /// Creates an unconnected client; servers are registered by the driver
    pub fn create(&self, client_type: ClientType) -> Box<dyn CacheClient> {
        match client_type {
            ClientType::InMemory => match self.max_capacity {
                Some(capacity) => Box::new(InMemoryClient::with_max_capacity(capacity)),
                None => Box::new(InMemoryClient::new()),
            },
            ClientType::Redis => Box::new(RedisClient::new()),
        }
    }
}
