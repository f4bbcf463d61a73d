//! JSON import into storable objects

use serde_json::{Map, Value};
use tracing::debug;

use super::StorableObject;
use crate::domain::error::{CacheError, CacheResult};

/// Populates a storable object in place
#[derive(Debug)]
pub struct Importer<'a> {
    target: &'a mut dyn StorableObject,
}

impl<'a> Importer<'a> {
    pub fn new(target: &'a mut dyn StorableObject) -> Self {
        Self { target }
    }

    pub fn from_json(&mut self, json: &str) -> CacheResult<()> {
        let value: Value = serde_json::from_str(json)?;
        self.from_value(&value)
    }

    pub fn from_value(&mut self, value: &Value) -> CacheResult<()> {
        self.target.import_value(value)
    }

    /// Accepts the shape produced by `Exporter::as_array`
    pub fn from_array(&mut self, map: &Map<String, Value>) -> CacheResult<()> {
        self.from_value(&Value::Object(map.clone()))
    }
}

/// Routes each key of a JSON object to the matching field
///
/// Keys without a matching field are ignored. Fields absent from the JSON keep
/// their current state.
pub(crate) fn import_object_fields<S>(object: &mut S, value: &Value) -> CacheResult<()>
where
    S: StorableObject + ?Sized,
{
    let Value::Object(entries) = value else {
        return Err(CacheError::import(format!(
            "expected JSON object for {}, got {}",
            object.type_name(),
            value
        )));
    };

    let type_name = object.type_name();

    for (name, field_value) in entries {
        match object.field_mut(name) {
            Some(mut field) => field.import_json_value(field_value)?,
            None => debug!(
                type_name,
                field = %name,
                "Ignoring unknown field on import"
            ),
        }
    }

    Ok(())
}

/// Item values of a sequence: a JSON array, or a map keyed `"0"`, `"1"`, ...
pub(crate) fn sequence_values(value: &Value) -> CacheResult<Vec<&Value>> {
    match value {
        Value::Array(values) => Ok(values.iter().collect()),
        Value::Object(entries) => Ok(entries.values().collect()),
        other => Err(CacheError::import(format!(
            "expected JSON array, got {}",
            other
        ))),
    }
}
