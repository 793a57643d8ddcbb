use serde_json::{Map, Value};

use super::{ErrorSink, FormError, StateSink};

/// Applies one field edit to the form state and recomputes that field's entry
/// in the errors map.
///
/// With an empty `parent_key` the value lands at `state[field_key]`, otherwise
/// at `state[parent_key][field_key]`. The nested object is created when
/// missing and merged shallowly, so siblings already set survive. A required
/// field patched with a falsy value is flagged; anything else clears the
/// field's error.
///
/// The errors map is only touched once the state sink accepted the write, so
/// a rejected edit leaves both halves as they were.
pub fn patch(
    parent_key: &str,
    field_key: &str,
    value: Value,
    is_required: bool,
    state: &dyn StateSink,
    errors: &dyn ErrorSink,
) -> Result<(), FormError> {
    let missing = is_required && is_falsy(&value);

    let mut next = state.get();
    insert_field(&mut next, parent_key, field_key, value);
    state.set(next)?;

    let mut next_errors = errors.get();
    if missing {
        next_errors.flag(field_key);
    } else {
        next_errors.clear(field_key);
    }
    errors.set(next_errors);

    tracing::debug!(parent = parent_key, field = field_key, missing, "patched form state");
    Ok(())
}

/// `null`, `false`, `0` and the empty string count as "no value".
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(num) => num.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn insert_field(root: &mut Value, parent_key: &str, field_key: &str, value: Value) {
    if !root.is_object() {
        tracing::warn!(field = field_key, "form state was not an object; resetting");
        *root = Value::Object(Map::new());
    }
    let Value::Object(obj) = root else {
        return;
    };

    if parent_key.is_empty() {
        obj.insert(field_key.to_string(), value);
        return;
    }

    let entry = obj
        .entry(parent_key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
        tracing::warn!(
            parent = parent_key,
            field = field_key,
            "nested form state was not an object; replacing"
        );
        *entry = Value::Object(Map::new());
    }
    if let Value::Object(nested) = entry {
        nested.insert(field_key.to_string(), value);
    }
}
