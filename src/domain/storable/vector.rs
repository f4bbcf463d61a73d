//! Ordered collection of storable items

use std::any::Any;
use std::fmt::Debug;

use serde_json::Value;

use super::{FieldMut, FieldRef, Item, Layout, StorableObject, sequence_values};
use crate::domain::error::CacheResult;
use crate::domain::value::{Scalar, ScalarKind};

/// Element type of a [`StorableVector`]: a typed value or a boxed storable object
pub trait CollectionItem: Debug + Send + Sync + 'static {
    /// Fresh default item, used as the import target for each element
    fn new_item() -> Self
    where
        Self: Sized;

    fn as_field(&self) -> FieldRef<'_>;

    fn as_field_mut(&mut self) -> FieldMut<'_>;
}

impl<V: ScalarKind> CollectionItem for Scalar<V> {
    fn new_item() -> Self {
        Scalar::new()
    }

    fn as_field(&self) -> FieldRef<'_> {
        FieldRef::Value(self)
    }

    fn as_field_mut(&mut self) -> FieldMut<'_> {
        FieldMut::Value(self)
    }
}

impl<O: StorableObject + Default> CollectionItem for Box<O> {
    fn new_item() -> Self {
        Box::default()
    }

    fn as_field(&self) -> FieldRef<'_> {
        FieldRef::Object(&**self)
    }

    fn as_field_mut(&mut self) -> FieldMut<'_> {
        FieldMut::Object(&mut **self)
    }
}

/// Vector of items exported as a JSON array
#[derive(Debug, Clone, PartialEq)]
pub struct StorableVector<T: CollectionItem> {
    items: Vec<T>,
}

impl<T: CollectionItem> Default for StorableVector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: CollectionItem> StorableVector<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn add(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T: CollectionItem> StorableObject for StorableVector<T> {
    fn layout(&self) -> Layout {
        Layout::Sequence
    }

    fn items(&self) -> Vec<Item<'_>> {
        self.items
            .iter()
            .map(|item| Item::positional(item.as_field()))
            .collect()
    }

    fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>> {
        let index = name.parse::<usize>().ok()?;
        self.items.get_mut(index).map(|item| item.as_field_mut())
    }

    /// Replaces the contents with the decoded elements
    fn import_value(&mut self, value: &Value) -> CacheResult<()> {
        let values = sequence_values(value)?;

        self.items.clear();

        for element in values {
            let mut item = T::new_item();
            item.as_field_mut().import_json_value(element)?;
            self.items.push(item);
        }

        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::StorableExt;
    use super::super::mock::ValidNoRequired;
    use super::*;
    use crate::domain::error::CacheError;
    use crate::domain::value::{DefaultReason, UInt64Box};

    #[test]
    fn test_empty_vector_is_default() {
        let vector: StorableVector<UInt64Box> = StorableVector::new();
        assert_eq!(vector.is_default_value(), (true, DefaultReason::NoFieldsSet));
        assert_eq!(vector.export().as_json(None, false).unwrap(), "[]");
    }

    #[test]
    fn test_vector_of_default_items_is_default() {
        let mut vector: StorableVector<UInt64Box> = StorableVector::new();
        vector.add(UInt64Box::new());
        assert!(vector.is_default_value().0);
    }

    #[test]
    fn test_import_replaces_contents() {
        let mut vector: StorableVector<UInt64Box> = StorableVector::new();
        vector.add(UInt64Box::with_value(100));

        vector.import().from_json("[1,2,3]").unwrap();

        let values: Vec<u64> = vector.iter().map(|item| *item.get()).collect();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_import_objects() {
        let mut vector: StorableVector<Box<ValidNoRequired>> = StorableVector::new();
        vector
            .import()
            .from_value(&json!([{"example_uint64": 1}, {"example_string": "b"}]))
            .unwrap();

        assert_eq!(vector.len(), 2);
        assert_eq!(*vector.get(0).unwrap().example_uint64.get(), 1);
        assert_eq!(vector.get(1).unwrap().example_string.get(), "b");
    }

    #[test]
    fn test_import_rejects_scalar() {
        let mut vector: StorableVector<UInt64Box> = StorableVector::new();
        let result = vector.import().from_json("5");
        assert!(matches!(result, Err(CacheError::Import { .. })));
    }

    #[test]
    fn test_field_mut_by_index() {
        let mut vector: StorableVector<UInt64Box> = StorableVector::new();
        vector.add(UInt64Box::new());

        assert!(vector.field_mut("0").is_some());
        assert!(vector.field_mut("1").is_none());
        assert!(vector.field_mut("zero").is_none());
    }
}
