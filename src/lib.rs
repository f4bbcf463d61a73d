//! typed-cache
//!
//! Caches typed domain objects in a pool of key/value servers:
//! - Typed value boxes that know their default state
//! - Storable objects exported to JSON and imported back in place
//! - A driver deriving keys and TTLs from a per-deployment config
//! - Query result sets keyed by a where-clause checksum

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{CacheDriver, CacheError, CacheResult};
