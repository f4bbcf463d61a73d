//! In-memory cache client using moka

use async_trait::async_trait;
use chrono::Utc;
use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::cache::{CacheClient, ServerPairings};
use crate::domain::error::CacheResult;

const DEFAULT_MAX_CAPACITY: u64 = 10_000;

/// Cache entry stored in moka
#[derive(Debug, Clone)]
struct CacheEntry {
    data: String,
    /// Unix seconds; 0 never expires
    expires_at: i64,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.expires_at != 0 && Utc::now().timestamp() >= self.expires_at
    }
}

/// Process-local client
///
/// Registered server pairs are only recorded; every key lives in a single
/// moka cache regardless of the pool. Flags are not kept.
#[derive(Debug)]
pub struct InMemoryClient {
    cache: MokaCache<String, CacheEntry>,
    servers: ServerPairings,
    registration_count: usize,
}

impl InMemoryClient {
    pub fn new() -> Self {
        Self::with_max_capacity(DEFAULT_MAX_CAPACITY)
    }

    pub fn with_max_capacity(capacity: u64) -> Self {
        Self {
            cache: MokaCache::builder().max_capacity(capacity).build(),
            servers: ServerPairings::new(),
            registration_count: 0,
        }
    }

    pub fn servers(&self) -> &ServerPairings {
        &self.servers
    }

    /// Number of `register_server` calls, duplicates included
    pub fn registration_count(&self) -> usize {
        self.registration_count
    }

    async fn live_entry(&self, key: &str) -> Option<CacheEntry> {
        let entry = self.cache.get(key).await?;

        if entry.is_expired() {
            self.cache.remove(key).await;
            return None;
        }

        Some(entry)
    }

    async fn store(&self, key: &str, value: &str, expires_at: i64) {
        let entry = CacheEntry {
            data: value.to_string(),
            expires_at,
        };

        self.cache.insert(key.to_string(), entry).await;
    }
}

impl Default for InMemoryClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheClient for InMemoryClient {
    async fn probe_alive(&mut self) -> bool {
        !self.servers.is_empty()
    }

    async fn register_server(&mut self, host: &str, port: u16) -> CacheResult<()> {
        self.registration_count += 1;

        if !self.servers.add_server(host, port) {
            debug!(host, port, "Server already registered");
        }

        Ok(())
    }

    async fn add(
        &mut self,
        key: &str,
        value: &str,
        _flags: u32,
        expires_at: i64,
    ) -> CacheResult<bool> {
        if self.live_entry(key).await.is_some() {
            return Ok(false);
        }

        self.store(key, value, expires_at).await;
        Ok(true)
    }

    async fn get(&mut self, key: &str) -> CacheResult<Option<String>> {
        Ok(self.live_entry(key).await.map(|entry| entry.data))
    }

    async fn set(
        &mut self,
        key: &str,
        value: &str,
        _flags: u32,
        expires_at: i64,
    ) -> CacheResult<bool> {
        self.store(key, value, expires_at).await;
        Ok(true)
    }

    async fn delete(&mut self, key: &str) -> CacheResult<bool> {
        let existed = self.live_entry(key).await.is_some();
        self.cache.remove(key).await;
        Ok(existed)
    }
}
