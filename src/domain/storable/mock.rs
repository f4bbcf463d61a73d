//! Storable objects used by tests

use std::any::Any;

use super::{FieldMut, FieldRef, Item, Layout, StorableObject, StorableVector};
use crate::domain::value::{BoolBox, FloatBox, StringBox, UInt64Box};

/// Object with no required fields, keyed by `example_uint64`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidNoRequired {
    pub example_uint64: UInt64Box,
    pub example_string: StringBox,
    pub example_float: FloatBox,
    pub example_bool: BoolBox,
}

impl StorableObject for ValidNoRequired {
    fn items(&self) -> Vec<Item<'_>> {
        vec![
            Item::value("example_uint64", &self.example_uint64),
            Item::value("example_string", &self.example_string),
            Item::value("example_float", &self.example_float),
            Item::value("example_bool", &self.example_bool),
        ]
    }

    fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>> {
        match name {
            "example_uint64" => Some(FieldMut::Value(&mut self.example_uint64)),
            "example_string" => Some(FieldMut::Value(&mut self.example_string)),
            "example_float" => Some(FieldMut::Value(&mut self.example_float)),
            "example_bool" => Some(FieldMut::Value(&mut self.example_bool)),
            _ => None,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Object whose fields are all required
#[derive(Debug, Clone, PartialEq)]
pub struct Valid {
    pub example_uint64: UInt64Box,
    pub example_string: StringBox,
}

impl Default for Valid {
    fn default() -> Self {
        Self {
            example_uint64: UInt64Box::required(),
            example_string: StringBox::required(),
        }
    }
}

impl StorableObject for Valid {
    fn items(&self) -> Vec<Item<'_>> {
        vec![
            Item::value("example_uint64", &self.example_uint64),
            Item::value("example_string", &self.example_string),
        ]
    }

    fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>> {
        match name {
            "example_uint64" => Some(FieldMut::Value(&mut self.example_uint64)),
            "example_string" => Some(FieldMut::Value(&mut self.example_string)),
            _ => None,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Object graph with a nested object and two collections
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Nested {
    pub id: UInt64Box,
    pub child: ValidNoRequired,
    pub tags: StorableVector<StringBox>,
    pub children: StorableVector<Box<ValidNoRequired>>,
}

impl StorableObject for Nested {
    fn items(&self) -> Vec<Item<'_>> {
        vec![
            Item::value("id", &self.id),
            Item::object("child", &self.child),
            Item::object("tags", &self.tags),
            Item::object("children", &self.children),
        ]
    }

    fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>> {
        match name {
            "id" => Some(FieldMut::Value(&mut self.id)),
            "child" => Some(FieldMut::Object(&mut self.child)),
            "tags" => Some(FieldMut::Object(&mut self.tags)),
            "children" => Some(FieldMut::Object(&mut self.children)),
            _ => None,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Parent holding a required nested object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WithRequiredChild {
    pub child: RequiredChild,
}

impl StorableObject for WithRequiredChild {
    fn items(&self) -> Vec<Item<'_>> {
        vec![Item::object("child", &self.child)]
    }

    fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>> {
        match name {
            "child" => Some(FieldMut::Object(&mut self.child)),
            _ => None,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequiredChild {
    pub value: UInt64Box,
}

impl StorableObject for RequiredChild {
    fn items(&self) -> Vec<Item<'_>> {
        vec![Item::value("value", &self.value)]
    }

    fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>> {
        match name {
            "value" => Some(FieldMut::Value(&mut self.value)),
            _ => None,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn is_required(&self) -> bool {
        true
    }
}

/// Declares no fields at all
#[derive(Debug, Clone, Default)]
pub struct Empty;

impl StorableObject for Empty {
    fn items(&self) -> Vec<Item<'_>> {
        Vec::new()
    }

    fn field_mut(&mut self, _name: &str) -> Option<FieldMut<'_>> {
        None
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Object layout that forgets to name its item
#[derive(Debug, Clone, Default)]
pub struct Unnamed {
    pub value: UInt64Box,
}

impl StorableObject for Unnamed {
    fn layout(&self) -> Layout {
        Layout::Object
    }

    fn items(&self) -> Vec<Item<'_>> {
        vec![Item::positional(FieldRef::Value(&self.value))]
    }

    fn field_mut(&mut self, _name: &str) -> Option<FieldMut<'_>> {
        None
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
