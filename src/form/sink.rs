use std::{cell::RefCell, rc::Rc};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use super::{ErrorsMap, FormError};

/// Read/replace access to caller-owned form state.
///
/// The engine never holds the state itself; screens decide where it lives
/// and hand the engine a sink. A sink that cannot hold a value returns an
/// error from `set` and keeps its previous state.
pub trait StateSink {
    fn get(&self) -> Value;
    fn set(&self, state: Value) -> Result<(), FormError>;
}

/// Read/replace access to a caller-owned errors map.
pub trait ErrorSink {
    fn get(&self) -> ErrorsMap;
    fn set(&self, errors: ErrorsMap);
}

/// Form state shared between a screen and the closures it hands out.
#[derive(Debug, Clone, Default)]
pub struct SharedState {
    inner: Rc<RefCell<Value>>,
}

impl SharedState {
    pub fn new(initial: Value) -> Self {
        Self {
            inner: Rc::new(RefCell::new(initial)),
        }
    }

    pub fn empty_object() -> Self {
        Self::new(Value::Object(Map::new()))
    }

    pub fn snapshot(&self) -> Value {
        self.inner.borrow().clone()
    }

    /// Reads a value by JSON pointer without cloning the whole state.
    pub fn read(&self, pointer: &str) -> Option<Value> {
        self.inner.borrow().pointer(pointer).cloned()
    }
}

impl StateSink for SharedState {
    fn get(&self) -> Value {
        self.snapshot()
    }

    fn set(&self, state: Value) -> Result<(), FormError> {
        *self.inner.borrow_mut() = state;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct SharedErrors {
    inner: Rc<RefCell<ErrorsMap>>,
}

impl SharedErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> ErrorsMap {
        self.inner.borrow().clone()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.borrow().contains(key)
    }

    pub fn update(&self, apply: impl FnOnce(&mut ErrorsMap)) {
        apply(&mut self.inner.borrow_mut());
    }
}

impl ErrorSink for SharedErrors {
    fn get(&self) -> ErrorsMap {
        self.snapshot()
    }

    fn set(&self, errors: ErrorsMap) {
        *self.inner.borrow_mut() = errors;
    }
}

/// Typed form state. Patches go through `serde_json` so screens can keep a
/// concrete model (`CustomerModel`, `UserModel`, ...) instead of a raw value.
///
/// Scalars written over a string field are stored as text (`null` as `""`),
/// so cleared inputs and numeric values still land in the model.
#[derive(Debug, Default)]
pub struct ModelState<T> {
    inner: Rc<RefCell<T>>,
}

impl<T> Clone for ModelState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> ModelState<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    pub fn new(model: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(model)),
        }
    }

    pub fn model(&self) -> T {
        self.inner.borrow().clone()
    }
}

impl<T> StateSink for ModelState<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    fn get(&self) -> Value {
        match serde_json::to_value(&*self.inner.borrow()) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(error = %err, "form model could not be serialized");
                Value::Object(Map::new())
            }
        }
    }

    fn set(&self, state: Value) -> Result<(), FormError> {
        let state = fit_to(&self.get(), state);
        let model = serde_json::from_value::<T>(state).map_err(FormError::state_rejected)?;
        *self.inner.borrow_mut() = model;
        Ok(())
    }
}

fn fit_to(shape: &Value, value: Value) -> Value {
    match (shape, value) {
        (Value::Object(shape), Value::Object(map)) => Value::Object(
            map.into_iter()
                .map(|(key, value)| {
                    let value = match shape.get(&key) {
                        Some(field) => fit_to(field, value),
                        None => value,
                    };
                    (key, value)
                })
                .collect(),
        ),
        (Value::String(_), Value::Null) => Value::String(String::new()),
        (Value::String(_), Value::Number(number)) => Value::String(number.to_string()),
        (Value::String(_), Value::Bool(flag)) => Value::String(flag.to_string()),
        (_, value) => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::patch;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Contact {
        name: String,
        tags: Vec<String>,
    }

    #[test]
    fn model_state_stores_scalars_as_text() {
        let state = ModelState::new(Contact::default());
        state.set(json!({"name": 42, "tags": []})).expect("number fits");
        assert_eq!(state.model().name, "42");
        state.set(json!({"name": null, "tags": []})).expect("null fits");
        assert_eq!(state.model().name, "");
    }

    #[test]
    fn rejected_edit_leaves_state_and_errors_alone() {
        let state = ModelState::new(Contact {
            name: "Ada".into(),
            tags: vec![],
        });
        let errors = SharedErrors::new();
        errors.update(|map| map.set_message("tags", "pick one"));

        let result = patch("", "tags", json!("not-a-list"), true, &state, &errors);

        assert!(matches!(result, Err(FormError::StateRejected { .. })));
        assert_eq!(state.model().name, "Ada");
        assert_eq!(
            errors.snapshot().get("tags"),
            Some(&crate::form::FieldError::Message("pick one".into()))
        );
    }
}
