//! Cache driver - add/get/set/delete of storable objects against a server pool

use std::fmt;

use chrono::Utc;
use tracing::{debug, info};

use super::client::CacheClient;
use super::config::CacheConfig;
use crate::domain::error::{CacheError, CacheResult};
use crate::domain::storable::{StorableExt, StorableObject};

/// Flags stored alongside every value
const STORE_FLAGS: u32 = 0;

/// Drives a cache client with keys and TTLs from a [`CacheConfig`]
///
/// The driver owns its client exclusively. Every operation takes `&mut self`,
/// so sharing a driver between tasks needs an explicit lock around it.
pub struct CacheDriver<C: CacheConfig, K: CacheClient = Box<dyn CacheClient>> {
    config: C,
    client: K,
}

impl<C: CacheConfig, K: CacheClient> fmt::Debug for CacheDriver<C, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheDriver")
            .field("config", &self.config)
            .field("client", &"<CacheClient>")
            .finish()
    }
}

impl<C: CacheConfig, K: CacheClient> CacheDriver<C, K> {
    pub fn new(config: C, client: K) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn client(&self) -> &K {
        &self.client
    }

    /// Makes sure the client has its server pool registered
    ///
    /// A single liveness probe short-circuits when the pool is already
    /// configured; otherwise every pair from the config is registered.
    pub async fn connect(&mut self) -> CacheResult<bool> {
        if self.client.probe_alive().await {
            return Ok(true);
        }

        let pairings = self.config.server_pairings();

        if pairings.is_empty() {
            return Err(CacheError::no_server_pairs(self.config.name()));
        }

        for pair in pairings.iter() {
            self.client.register_server(&pair.host, pair.port).await?;
        }

        info!(
            config = self.config.name(),
            servers = pairings.len(),
            "Registered cache servers"
        );

        Ok(true)
    }

    fn key_supporting_override(
        &self,
        obj: &dyn StorableObject,
        key_override: &str,
    ) -> CacheResult<String> {
        if key_override.is_empty() {
            return self.config.create_key_from_storable_object(obj);
        }

        Ok(key_override.to_string())
    }

    /// Absolute expiry in unix seconds
    fn expires_at(&self) -> i64 {
        let ttl = i64::try_from(self.config.ttl().as_secs()).unwrap_or(i64::MAX);
        Utc::now().timestamp().saturating_add(ttl)
    }

    /// Stores the object only if its key is not already present
    pub async fn add<O: StorableObject>(&mut self, obj: &O, key_override: &str) -> CacheResult<bool> {
        let key = self.key_supporting_override(obj, key_override)?;

        self.connect().await?;

        let value = obj.export().as_json(None, false)?;
        let expires_at = self.expires_at();
        let added = self.client.add(&key, &value, STORE_FLAGS, expires_at).await?;

        debug!(key = %key, added, "Cache add");

        Ok(added)
    }

    /// Populates `obj` from the cache
    ///
    /// Returns `Ok(None)` on a miss. On a hit the caller's object is imported
    /// in place and handed back.
    pub async fn get<'o, O: StorableObject>(
        &mut self,
        obj: &'o mut O,
        key_override: &str,
    ) -> CacheResult<Option<&'o mut O>> {
        let key = self.key_supporting_override(&*obj, key_override)?;

        self.connect().await?;

        let Some(data) = self.client.get(&key).await? else {
            debug!(key = %key, "Cache miss");
            return Ok(None);
        };

        obj.import().from_json(&data)?;

        debug!(key = %key, "Cache hit");

        Ok(Some(obj))
    }

    /// Upserts the object with the config's TTL
    pub async fn set<O: StorableObject>(&mut self, obj: &O, key_override: &str) -> CacheResult<bool> {
        let key = self.key_supporting_override(obj, key_override)?;

        self.connect().await?;

        let value = obj.export().as_json(None, false)?;
        let expires_at = self.expires_at();
        let stored = self.client.set(&key, &value, STORE_FLAGS, expires_at).await?;

        debug!(key = %key, stored, expires_at, "Cache set");

        Ok(stored)
    }

    pub async fn delete<O: StorableObject>(&mut self, obj: &O, key_override: &str) -> CacheResult<bool> {
        let key = self.key_supporting_override(obj, key_override)?;

        self.connect().await?;

        let deleted = self.client.delete(&key).await?;

        debug!(key = %key, deleted, "Cache delete");

        Ok(deleted)
    }
}
