//! Client for the underlying cache server pool

use async_trait::async_trait;

use crate::domain::error::CacheResult;

#[cfg(test)]
use mockall::automock;

/// Key/value client for a pool of cache servers
///
/// Values are opaque strings. `expires_at` is an absolute unix timestamp in
/// seconds; `0` means the entry never expires.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CacheClient: Send + Sync {
    /// Returns true when the client already has a usable server configured
    async fn probe_alive(&mut self) -> bool;

    /// Adds a server to the pool; connecting happens lazily on first use
    async fn register_server(&mut self, host: &str, port: u16) -> CacheResult<()>;

    /// Stores only if the key does not exist; returns false otherwise
    async fn add(&mut self, key: &str, value: &str, flags: u32, expires_at: i64)
        -> CacheResult<bool>;

    /// Returns `None` on a miss
    async fn get(&mut self, key: &str) -> CacheResult<Option<String>>;

    async fn set(&mut self, key: &str, value: &str, flags: u32, expires_at: i64)
        -> CacheResult<bool>;

    /// Returns false when there was nothing to delete
    async fn delete(&mut self, key: &str) -> CacheResult<bool>;
}

#[async_trait]
impl CacheClient for Box<dyn CacheClient> {
    async fn probe_alive(&mut self) -> bool {
        (**self).probe_alive().await
    }

    async fn register_server(&mut self, host: &str, port: u16) -> CacheResult<()> {
        (**self).register_server(host, port).await
    }

    async fn add(
        &mut self,
        key: &str,
        value: &str,
        flags: u32,
        expires_at: i64,
    ) -> CacheResult<bool> {
        (**self).add(key, value, flags, expires_at).await
    }

    async fn get(&mut self, key: &str) -> CacheResult<Option<String>> {
        (**self).get(key).await
    }

    async fn set(
        &mut self,
        key: &str,
        value: &str,
        flags: u32,
        expires_at: i64,
    ) -> CacheResult<bool> {
        (**self).set(key, value, flags, expires_at).await
    }

    async fn delete(&mut self, key: &str) -> CacheResult<bool> {
        (**self).delete(key).await
    }
}
