//! Typed values - scalar wrappers with explicit default-value tracking

use std::fmt::Debug;

use serde_json::Value;

use crate::domain::error::{CacheError, CacheResult};

/// Why a field reports itself as default (or not)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultReason {
    /// Scalar was never set, or was reset
    NeverSet,
    /// Scalar holds an explicitly set value
    ExplicitlySet,
    /// Composite whose items are all at default
    NoFieldsSet,
    /// Composite with at least one non-default item
    FieldsSet,
}

/// Scalar payloads a [`Scalar`] can carry
pub trait ScalarKind: Clone + Debug + PartialEq + Send + Sync + 'static {
    /// Stable name of the scalar type, used for fingerprints and messages
    const NAME: &'static str;

    fn default_value() -> Self;

    /// Fails when the value has no JSON literal
    fn to_json(&self) -> CacheResult<Value>;

    /// Returns `None` when the JSON value has the wrong shape
    fn from_json(value: &Value) -> Option<Self>;
}

impl ScalarKind for bool {
    const NAME: &'static str = "Bool";

    fn default_value() -> Self {
        false
    }

    fn to_json(&self) -> CacheResult<Value> {
        Ok(Value::Bool(*self))
    }

    fn from_json(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl ScalarKind for i64 {
    const NAME: &'static str = "Int64";

    fn default_value() -> Self {
        0
    }

    fn to_json(&self) -> CacheResult<Value> {
        Ok(Value::from(*self))
    }

    fn from_json(value: &Value) -> Option<Self> {
        value.as_i64()
    }
}

impl ScalarKind for u64 {
    const NAME: &'static str = "UInt64";

    fn default_value() -> Self {
        0
    }

    fn to_json(&self) -> CacheResult<Value> {
        Ok(Value::from(*self))
    }

    fn from_json(value: &Value) -> Option<Self> {
        value.as_u64()
    }
}

impl ScalarKind for f64 {
    const NAME: &'static str = "Float";

    fn default_value() -> Self {
        0.0
    }

    /// NaN and infinities have no JSON literal
    fn to_json(&self) -> CacheResult<Value> {
        serde_json::Number::from_f64(*self)
            .map(Value::Number)
            .ok_or_else(|| CacheError::export(format!("{} is not representable in JSON", self)))
    }

    fn from_json(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl ScalarKind for String {
    const NAME: &'static str = "String";

    fn default_value() -> Self {
        String::new()
    }

    fn to_json(&self) -> CacheResult<Value> {
        Ok(Value::String(self.clone()))
    }

    fn from_json(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

/// Object-safe view of a single typed value
pub trait TypedValue: Debug + Send + Sync {
    fn type_name(&self) -> &'static str;

    fn is_required(&self) -> bool;

    fn is_default_value(&self) -> (bool, DefaultReason);

    /// Raw scalar value as JSON
    fn to_json_value(&self) -> CacheResult<Value>;

    /// Sets the value from JSON; `null` resets to default
    fn import_json_value(&mut self, value: &Value) -> CacheResult<()>;
}

/// Wraps one scalar and tracks whether it still holds its default
#[derive(Debug, Clone, PartialEq)]
pub struct Scalar<V: ScalarKind> {
    value: V,
    is_default: bool,
    required: bool,
}

pub type BoolBox = Scalar<bool>;
pub type Int64Box = Scalar<i64>;
pub type UInt64Box = Scalar<u64>;
pub type FloatBox = Scalar<f64>;
pub type StringBox = Scalar<String>;

impl<V: ScalarKind> Default for Scalar<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: ScalarKind> Scalar<V> {
    pub fn new() -> Self {
        Self {
            value: V::default_value(),
            is_default: true,
            required: false,
        }
    }

    /// Creates a scalar marked as required by its owning object
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::new()
        }
    }

    pub fn with_value(value: V) -> Self {
        let mut scalar = Self::new();
        scalar.set(value);
        scalar
    }

    pub fn get(&self) -> &V {
        &self.value
    }

    pub fn set(&mut self, value: V) {
        self.value = value;
        self.is_default = false;
    }

    pub fn reset(&mut self) {
        self.value = V::default_value();
        self.is_default = true;
    }
}

impl<V: ScalarKind> TypedValue for Scalar<V> {
    fn type_name(&self) -> &'static str {
        V::NAME
    }

    fn is_required(&self) -> bool {
        self.required
    }

    fn is_default_value(&self) -> (bool, DefaultReason) {
        if self.is_default {
            (true, DefaultReason::NeverSet)
        } else {
            (false, DefaultReason::ExplicitlySet)
        }
    }

    fn to_json_value(&self) -> CacheResult<Value> {
        self.value.to_json()
    }

    fn import_json_value(&mut self, value: &Value) -> CacheResult<()> {
        if value.is_null() {
            self.reset();
            return Ok(());
        }

        let parsed = V::from_json(value).ok_or_else(|| {
            CacheError::import(format!("expected {} value, got {}", V::NAME, value))
        })?;

        self.set(parsed);
        Ok(())
    }
}
