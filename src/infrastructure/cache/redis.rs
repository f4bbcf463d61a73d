//! Redis cache client

use std::fmt;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::domain::cache::{CacheClient, ServerPair};
use crate::domain::error::{CacheError, CacheResult};

/// One pool member; connects on first use
struct RedisNode {
    pair: ServerPair,
    client: Client,
    connection: Option<ConnectionManager>,
}

impl RedisNode {
    async fn connection(&mut self) -> CacheResult<&mut ConnectionManager> {
        if self.connection.is_none() {
            let manager = ConnectionManager::new(self.client.clone())
                .await
                .map_err(|e| {
                    CacheError::no_connection(format!(
                        "Failed to connect to Redis at {}: {}",
                        self.pair, e
                    ))
                })?;

            debug!(server = %self.pair, "Connected to Redis");
            self.connection = Some(manager);
        }

        self.connection
            .as_mut()
            .ok_or_else(|| CacheError::no_connection(format!("No connection to {}", self.pair)))
    }
}

/// Client over a pool of Redis servers
///
/// Keys are spread over the pool by SHA-256 of the key. Redis has no notion
/// of memcache-style flags, so they are dropped.
#[derive(Default)]
pub struct RedisClient {
    nodes: Vec<RedisNode>,
}

impl fmt::Debug for RedisClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let servers: Vec<String> = self
            .nodes
            .iter()
            .map(|node| {
                let state = if node.connection.is_some() { "connected" } else { "idle" };
                format!("{} ({})", node.pair, state)
            })
            .collect();

        f.debug_struct("RedisClient").field("servers", &servers).finish()
    }
}

impl RedisClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn server_count(&self) -> usize {
        self.nodes.len()
    }

    /// Picks the pool member that owns `key`
    fn node_index(&self, key: &str) -> Option<usize> {
        if self.nodes.is_empty() {
            return None;
        }

        let digest = Sha256::digest(key.as_bytes());
        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&digest[..8]);

        let slot = u64::from_be_bytes(prefix) % self.nodes.len() as u64;
        Some(slot as usize)
    }

    async fn connection_for(&mut self, key: &str) -> CacheResult<&mut ConnectionManager> {
        let index = self
            .node_index(key)
            .ok_or_else(|| CacheError::no_connection("No Redis servers registered"))?;

        self.nodes[index].connection().await
    }

    async fn store(
        &mut self,
        key: &str,
        value: &str,
        expires_at: i64,
        only_if_absent: bool,
    ) -> CacheResult<bool> {
        let conn = self.connection_for(key).await?;

        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value);

        if only_if_absent {
            cmd.arg("NX");
        }

        if expires_at > 0 {
            cmd.arg("EXAT").arg(expires_at);
        }

        // "OK" when stored, nil when NX found an existing key
        let result: Option<String> = cmd
            .query_async(conn)
            .await
            .map_err(|e| CacheError::client(format!("Failed to set key '{}': {}", key, e)))?;

        Ok(result.is_some())
    }
}

#[async_trait]
impl CacheClient for RedisClient {
    async fn probe_alive(&mut self) -> bool {
        let Some(node) = self.nodes.first_mut() else {
            return false;
        };

        let pair = node.pair.to_string();

        let conn = match node.connection().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!(server = %pair, error = %e, "Redis probe failed");
                return false;
            }
        };

        match redis::cmd("PING").query_async::<String>(conn).await {
            Ok(_) => true,
            Err(e) => {
                warn!(server = %pair, error = %e, "Redis probe failed");
                false
            }
        }
    }

    async fn register_server(&mut self, host: &str, port: u16) -> CacheResult<()> {
        let pair = ServerPair::new(host, port);

        if self.nodes.iter().any(|node| node.pair == pair) {
            return Ok(());
        }

        let client = Client::open(format!("redis://{}", pair)).map_err(|e| {
            CacheError::client(format!("Failed to create Redis client for {}: {}", pair, e))
        })?;

        self.nodes.push(RedisNode {
            pair,
            client,
            connection: None,
        });

        Ok(())
    }

    async fn add(
        &mut self,
        key: &str,
        value: &str,
        _flags: u32,
        expires_at: i64,
    ) -> CacheResult<bool> {
        self.store(key, value, expires_at, true).await
    }

    async fn get(&mut self, key: &str) -> CacheResult<Option<String>> {
        let conn = self.connection_for(key).await?;

        let result: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| CacheError::client(format!("Failed to get key '{}': {}", key, e)))?;

        Ok(result)
    }

    async fn set(
        &mut self,
        key: &str,
        value: &str,
        _flags: u32,
        expires_at: i64,
    ) -> CacheResult<bool> {
        self.store(key, value, expires_at, false).await
    }

    async fn delete(&mut self, key: &str) -> CacheResult<bool> {
        let conn = self.connection_for(key).await?;

        let deleted: i64 = conn
            .del(key)
            .await
            .map_err(|e| CacheError::client(format!("Failed to delete key '{}': {}", key, e)))?;

        Ok(deleted > 0)
    }
}
