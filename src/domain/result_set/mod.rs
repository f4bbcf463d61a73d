//! Cached query result sets
//!
//! A result set caches the primary-key values a query returned. Its cache key
//! is a checksum of the value type and the where clause.

mod where_clause;

use std::any::Any;

use once_cell::sync::OnceCell;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::domain::error::CacheResult;
use crate::domain::storable::{FieldMut, Item, Layout, StorableObject, StorableVector};
use crate::domain::value::{Scalar, ScalarKind};

pub use where_clause::{Condition, Operator, WhereChecksum, WhereClause};

/// Primary-key values for a query, keyed by `type | where` checksum
#[derive(Debug)]
pub struct CachedResultSet<V: ScalarKind> {
    values: StorableVector<Scalar<V>>,
    where_clause: Box<dyn WhereChecksum>,
    checksum: OnceCell<String>,
}

impl<V: ScalarKind> CachedResultSet<V> {
    pub fn new(where_clause: impl WhereChecksum + 'static) -> Self {
        Self {
            values: StorableVector::new(),
            where_clause: Box::new(where_clause),
            checksum: OnceCell::new(),
        }
    }

    /// Returns `type_fingerprint|where_checksum`
    ///
    /// Computed on first call and latched for the lifetime of the result set.
    /// The where clause must not change after the first call; later changes
    /// are not reflected.
    pub fn create_checksum(&self) -> &str {
        self.checksum.get_or_init(|| {
            let type_checksum = hex::encode(Sha256::digest(V::NAME.as_bytes()));
            let where_checksum = self.where_clause.create_where_checksum();

            format!("{}|{}", type_checksum, where_checksum)
        })
    }

    pub fn add(&mut self, value: V) {
        self.values.add(Scalar::with_value(value));
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.values.iter().map(Scalar::get)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<V: ScalarKind> StorableObject for CachedResultSet<V> {
    fn layout(&self) -> Layout {
        Layout::Sequence
    }

    fn items(&self) -> Vec<Item<'_>> {
        self.values.items()
    }

    fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>> {
        self.values.field_mut(name)
    }

    fn import_value(&mut self, value: &Value) -> CacheResult<()> {
        self.values.import_value(value)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
