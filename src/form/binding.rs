use std::rc::Rc;

use serde_json::Value;

use crate::domain::{ChangeHandler, FieldDescriptor};

use super::{
    ErrorSink, ErrorsMap, StateSink, patch,
    validation::{FieldRule, value_text},
};

/// Wires descriptors to a screen's state and errors sinks.
///
/// `bind` seeds the descriptor's value from the current state and installs
/// an `on_change` closure that runs [`patch`] with the descriptor's own
/// parent key, key and required flag.
#[derive(Clone)]
pub struct Binder {
    state: Rc<dyn StateSink>,
    errors: Rc<dyn ErrorSink>,
}

impl Binder {
    pub fn new(state: impl StateSink + 'static, errors: impl ErrorSink + 'static) -> Self {
        Self {
            state: Rc::new(state),
            errors: Rc::new(errors),
        }
    }

    pub fn state(&self) -> Value {
        self.state.get()
    }

    pub fn errors(&self) -> ErrorsMap {
        self.errors.get()
    }

    pub fn patch(&self, parent_key: &str, field_key: &str, value: Value, is_required: bool) {
        if let Err(err) = patch(
            parent_key,
            field_key,
            value,
            is_required,
            self.state.as_ref(),
            self.errors.as_ref(),
        ) {
            tracing::warn!(field = field_key, error = %err, "edit not applied");
        }
    }

    pub fn set_error(&self, key: &str, message: impl Into<String>) {
        let mut errors = self.errors.get();
        errors.set_message(key, message);
        self.errors.set(errors);
    }

    pub fn clear_error(&self, key: &str) {
        let mut errors = self.errors.get();
        if errors.clear(key) {
            self.errors.set(errors);
        }
    }

    pub fn replace_errors(&self, errors: ErrorsMap) {
        self.errors.set(errors);
    }

    pub fn change_handler(&self, parent_key: &str, field_key: &str, is_required: bool) -> ChangeHandler {
        let binder = self.clone();
        let parent_key = parent_key.to_string();
        let field_key = field_key.to_string();
        Rc::new(move |value| binder.patch(&parent_key, &field_key, value, is_required))
    }

    pub fn bind(&self, field: FieldDescriptor) -> FieldDescriptor {
        let current = field
            .read_from(&self.state.get())
            .cloned()
            .unwrap_or_else(|| Value::String(String::new()));
        let handler = self.change_handler(field.parent_key(), &field.key, field.is_required);
        field.value(current).on_change_handler(handler)
    }

    /// Like [`Binder::bind`], running `after` with the new value once the
    /// patch has been applied. Cascading selects use this to reset dependent
    /// fields.
    pub fn bind_then(
        &self,
        field: FieldDescriptor,
        after: impl Fn(&Binder, &Value) + 'static,
    ) -> FieldDescriptor {
        let field = self.bind(field);
        let Some(patch_handler) = field.on_change.clone() else {
            return field;
        };
        let binder = self.clone();
        field.on_change(move |value: Value| {
            patch_handler(value.clone());
            after(&binder, &value);
        })
    }

    /// Binds the field and checks `rule` whenever it loses focus. Empty input
    /// is left to the required check.
    pub fn bind_with_rule(&self, field: FieldDescriptor, rule: FieldRule) -> FieldDescriptor {
        self.check_on_blur(self.bind(field), rule)
    }

    /// Adds the blur-time `rule` check to an already bound field.
    pub fn check_on_blur(&self, field: FieldDescriptor, rule: FieldRule) -> FieldDescriptor {
        let binder = self.clone();
        let key = field.key.clone();
        field.on_blur(move |value: Value| {
            let text = value_text(&value);
            if text.is_empty() {
                return;
            }
            match rule(&text) {
                Ok(()) => binder.clear_error(&key),
                Err(message) => binder.set_error(&key, message),
            }
        })
    }
}
