//! Domain layer - typed values, storable objects and the cache driver

pub mod cache;
pub mod error;
pub mod result_set;
pub mod storable;
pub mod value;

pub use cache::{CacheClient, CacheConfig, CacheDriver, ServerPair, ServerPairings};
pub use error::{CacheError, CacheResult};
pub use result_set::{CachedResultSet, WhereChecksum, WhereClause};
pub use storable::{Exporter, Importer, StorableExt, StorableObject, StorableVector};
pub use value::{DefaultReason, Scalar, ScalarKind, TypedValue};
