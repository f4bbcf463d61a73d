//! Cache domain - configs, client contract and the driver

mod client;
mod config;
mod driver;
mod key;

#[cfg(test)]
pub mod mock;

pub use client::CacheClient;
pub use config::{CacheConfig, ServerPair, ServerPairings, downcast_storable};
pub use driver::CacheDriver;
pub use key::{KEY_SEPARATOR, identity_key, render_identity};

#[cfg(test)]
pub use client::MockCacheClient;
