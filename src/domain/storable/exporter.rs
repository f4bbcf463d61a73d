//! Export engine - JSON text, generic map and deep map representations
//!
//! Items still at their default value are omitted from every representation.
//! Absence, not an explicit null, is how "no information" is encoded.

use serde_json::{Map, Value};

use super::{FieldRef, Item, Layout, StorableObject};
use crate::domain::error::{CacheError, CacheResult};

/// A value inside an [`ExportMap`]
#[derive(Debug, Clone, PartialEq)]
pub enum MapValue {
    Scalar(Value),
    Map(ExportMap),
}

impl MapValue {
    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            MapValue::Scalar(value) => Some(value),
            MapValue::Map(_) => None,
        }
    }

    pub fn as_map(&self) -> Option<&ExportMap> {
        match self {
            MapValue::Map(map) => Some(map),
            MapValue::Scalar(_) => None,
        }
    }
}

/// Insertion-ordered, string-keyed deep map
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportMap {
    entries: Vec<(String, MapValue)>,
}

impl ExportMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry; keys come from an exporter and never repeat
    pub(crate) fn push(&mut self, key: String, value: MapValue) {
        self.entries.push((key, value));
    }

    pub fn get(&self, key: &str) -> Option<&MapValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MapValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

/// Exports a storable object, or an ad-hoc item sequence
#[derive(Debug)]
pub struct Exporter<'a> {
    layout: Layout,
    items: Vec<Item<'a>>,
    type_name: &'static str,
}

impl<'a> Exporter<'a> {
    pub fn new(object: &'a dyn StorableObject) -> Self {
        Self {
            layout: object.layout(),
            items: object.items(),
            type_name: object.type_name(),
        }
    }

    pub fn from_items(layout: Layout, items: Vec<Item<'a>>) -> Self {
        Self {
            layout,
            items,
            type_name: "items",
        }
    }

    /// Emitted items paired with their output key
    ///
    /// Object layouts key by field name. Sequence layouts get `"0"`, `"1"`, ...
    /// counted over emitted items only, so skipped items leave no gaps.
    fn keyed_items(&self) -> CacheResult<Vec<(String, &Item<'a>)>> {
        if self.layout == Layout::Object && self.items.is_empty() {
            return Err(CacheError::no_fields(self.type_name));
        }

        let mut keyed = Vec::with_capacity(self.items.len());

        for item in &self.items {
            if item.field.is_default_value().0 {
                continue;
            }

            let key = match self.layout {
                Layout::Object => item.name.map(str::to_string).ok_or_else(|| {
                    CacheError::export(format!("unnamed field on {}", self.type_name))
                })?,
                Layout::Sequence => keyed.len().to_string(),
            };

            keyed.push((key, item));
        }

        Ok(keyed)
    }

    /// Encodes the items as JSON text
    ///
    /// With `parent_field_name` the output is prefixed by `"name":`, so it can
    /// be embedded in a parent's own JSON. `sorted` orders object fields by
    /// name; sequences keep their order.
    pub fn as_json(&self, parent_field_name: Option<&str>, sorted: bool) -> CacheResult<String> {
        let mut stack = String::new();

        if let Some(parent) = parent_field_name {
            stack.push_str(&serde_json::to_string(parent)?);
            stack.push(':');
        }

        let mut keyed = self.keyed_items()?;

        let (open, close) = match self.layout {
            Layout::Object => ('{', '}'),
            Layout::Sequence => ('[', ']'),
        };

        if sorted && self.layout == Layout::Object {
            keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
        }

        stack.push(open);

        for (index, (key, item)) in keyed.iter().enumerate() {
            if index > 0 {
                stack.push(',');
            }

            let field_name = match self.layout {
                Layout::Object => Some(key.as_str()),
                Layout::Sequence => None,
            };

            match item.field {
                FieldRef::Object(object) => {
                    stack.push_str(&Exporter::new(object).as_json(field_name, sorted)?);
                }
                FieldRef::Value(value) => {
                    if let Some(name) = field_name {
                        stack.push_str(&serde_json::to_string(name)?);
                        stack.push(':');
                    }
                    stack.push_str(&serde_json::to_string(&value.to_json_value()?)?);
                }
            }
        }

        stack.push(close);

        Ok(stack)
    }

    /// Generic string-keyed map; nested composites become JSON objects
    pub fn as_array(&self) -> CacheResult<Map<String, Value>> {
        let mut map = Map::new();

        for (key, item) in self.keyed_items()? {
            let value = match item.field {
                FieldRef::Object(object) => Value::Object(Exporter::new(object).as_array()?),
                FieldRef::Value(value) => value.to_json_value()?,
            };

            map.insert(key, value);
        }

        Ok(map)
    }

    /// Deep nested map, recursing into composites
    pub fn as_map(&self) -> CacheResult<ExportMap> {
        let keyed = self.keyed_items()?;
        let mut map = ExportMap {
            entries: Vec::with_capacity(keyed.len()),
        };

        for (key, item) in keyed {
            let value = match item.field {
                FieldRef::Object(object) => MapValue::Map(Exporter::new(object).as_map()?),
                FieldRef::Value(value) => MapValue::Scalar(value.to_json_value()?),
            };

            map.push(key, value);
        }

        Ok(map)
    }

    pub fn as_binary(&self) -> CacheResult<Vec<u8>> {
        Err(CacheError::not_supported(format!(
            "as_binary on {}",
            self.type_name
        )))
    }
}
