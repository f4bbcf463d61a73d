//! Cache key composition

use serde_json::Value;

use crate::domain::error::{CacheError, CacheResult};
use crate::domain::value::TypedValue;

/// Separates the namespace prefix from the identity in a key
pub const KEY_SEPARATOR: char = '-';

/// Builds `<prefix>-<identity>` from an identity field
///
/// An identity still at its default value is rejected, otherwise every unset
/// object would collide on the same key.
pub fn identity_key(prefix: &str, field_name: &str, identity: &dyn TypedValue) -> CacheResult<String> {
    let (is_default, reason) = identity.is_default_value();
    let rendered = render_identity(&identity.to_json_value()?);

    if is_default {
        return Err(CacheError::invalid_object_for_key(format!(
            "{} is set to non-valid value={} ({:?})",
            field_name, rendered, reason
        )));
    }

    Ok(format!("{}{}{}", prefix, KEY_SEPARATOR, rendered))
}

/// Renders a scalar for use inside a key; strings are taken unquoted
pub fn render_identity(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
