//! Storable objects - named or positional aggregates of typed values

mod exporter;
mod importer;
#[cfg(test)]
pub mod mock;
mod vector;

use std::any::Any;
use std::fmt::Debug;

use serde_json::Value;

use crate::domain::error::{CacheError, CacheResult};
use crate::domain::value::{DefaultReason, TypedValue};

pub use exporter::{ExportMap, Exporter, MapValue};
pub use importer::Importer;
pub use vector::{CollectionItem, StorableVector};

pub(crate) use importer::{import_object_fields, sequence_values};

/// How a storable object lays out its items when exported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Named fields, exported as a JSON object
    Object,
    /// Positional items, exported as a JSON array
    Sequence,
}

/// Borrowed view of a field: either a scalar or a nested storable object
#[derive(Debug, Clone, Copy)]
pub enum FieldRef<'a> {
    Value(&'a dyn TypedValue),
    Object(&'a dyn StorableObject),
}

impl FieldRef<'_> {
    pub fn is_required(&self) -> bool {
        match self {
            FieldRef::Value(value) => value.is_required(),
            FieldRef::Object(object) => object.is_required(),
        }
    }

    pub fn is_default_value(&self) -> (bool, DefaultReason) {
        match self {
            FieldRef::Value(value) => value.is_default_value(),
            FieldRef::Object(object) => object.is_default_value(),
        }
    }
}

/// Mutable view of a field, used by imports
#[derive(Debug)]
pub enum FieldMut<'a> {
    Value(&'a mut dyn TypedValue),
    Object(&'a mut dyn StorableObject),
}

impl FieldMut<'_> {
    /// Imports a JSON value into the field
    ///
    /// `null` resets a scalar. For a nested object it is only accepted when
    /// the object is not required, and leaves the object untouched.
    pub fn import_json_value(&mut self, value: &Value) -> CacheResult<()> {
        match self {
            FieldMut::Value(typed) => typed.import_json_value(value),
            FieldMut::Object(object) => {
                if !value.is_null() {
                    return object.import_value(value);
                }

                if object.is_required() {
                    return Err(CacheError::storable_object_required(format!(
                        "null given for required {}",
                        object.type_name()
                    )));
                }

                Ok(())
            }
        }
    }
}

/// One exportable item; `name` is `None` for positional items
#[derive(Debug, Clone, Copy)]
pub struct Item<'a> {
    pub name: Option<&'a str>,
    pub field: FieldRef<'a>,
}

impl<'a> Item<'a> {
    pub fn named(name: &'a str, field: FieldRef<'a>) -> Self {
        Self {
            name: Some(name),
            field,
        }
    }

    pub fn positional(field: FieldRef<'a>) -> Self {
        Self { name: None, field }
    }

    pub fn value(name: &'a str, value: &'a dyn TypedValue) -> Self {
        Self::named(name, FieldRef::Value(value))
    }

    pub fn object(name: &'a str, object: &'a dyn StorableObject) -> Self {
        Self::named(name, FieldRef::Object(object))
    }
}

/// A named, ordered bag of typed values and nested storable objects
pub trait StorableObject: Any + Debug + Send + Sync {
    fn layout(&self) -> Layout {
        Layout::Object
    }

    /// Items in export order
    fn items(&self) -> Vec<Item<'_>>;

    fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>>;

    /// Populates the object from a decoded JSON value
    fn import_value(&mut self, value: &Value) -> CacheResult<()> {
        import_object_fields(self, value)
    }

    fn as_any(&self) -> &dyn Any;

    fn is_required(&self) -> bool {
        false
    }

    /// An object is at default while every one of its items is
    fn is_default_value(&self) -> (bool, DefaultReason) {
        let any_set = self
            .items()
            .iter()
            .any(|item| !item.field.is_default_value().0);

        if any_set {
            (false, DefaultReason::FieldsSet)
        } else {
            (true, DefaultReason::NoFieldsSet)
        }
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Export and import entry points for every storable object
pub trait StorableExt: StorableObject {
    fn export(&self) -> Exporter<'_>;

    fn import(&mut self) -> Importer<'_>;
}

impl<T: StorableObject> StorableExt for T {
    fn export(&self) -> Exporter<'_> {
        Exporter::new(self)
    }

    fn import(&mut self) -> Importer<'_> {
        Importer::new(self)
    }
}

impl<'d> StorableExt for dyn StorableObject + 'd {
    fn export(&self) -> Exporter<'_> {
        Exporter::new(self)
    }

    fn import(&mut self) -> Importer<'_> {
        Importer::new(self)
    }
}
