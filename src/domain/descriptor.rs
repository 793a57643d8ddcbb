use std::{fmt, rc::Rc};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Callback invoked with the raw value of a field after an edit or on blur.
pub type ChangeHandler = Rc<dyn Fn(Value)>;

/// Produces the option list of a select field on demand.
///
/// The producer is invoked on every render and its result is never cached,
/// so it may close over external state (a previously chosen country, for
/// instance) and yield a different list each time. The sequence must be
/// finite.
pub type OptionProducer = Rc<dyn Fn() -> Box<dyn Iterator<Item = SelectOption>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Number,
    Email,
    Password,
    Select,
}

impl FieldKind {
    pub fn label(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Email => "email",
            FieldKind::Password => "password",
            FieldKind::Select => "select",
        }
    }

    pub fn is_text_like(self) -> bool {
        !matches!(self, FieldKind::Select)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: Value,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Option whose value is its own label.
    pub fn same(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            value: Value::String(label.clone()),
            label,
        }
    }
}

/// Where a select field takes its options from.
#[derive(Clone, Default)]
pub enum OptionSource {
    #[default]
    None,
    Items(Vec<SelectOption>),
    Lazy(OptionProducer),
}

impl OptionSource {
    pub fn lazy<F, I>(producer: F) -> Self
    where
        F: Fn() -> I + 'static,
        I: IntoIterator<Item = SelectOption>,
        I::IntoIter: 'static,
    {
        OptionSource::Lazy(Rc::new(move || Box::new(producer().into_iter())))
    }

    /// Resolves the option list. Lazy sources are re-evaluated on every call.
    pub fn resolve(&self) -> Vec<SelectOption> {
        match self {
            OptionSource::None => Vec::new(),
            OptionSource::Items(items) => items.clone(),
            OptionSource::Lazy(producer) => producer().collect(),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, OptionSource::None)
    }
}

impl fmt::Debug for OptionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionSource::None => f.write_str("None"),
            OptionSource::Items(items) => f.debug_tuple("Items").field(items).finish(),
            OptionSource::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

/// Declarative description of a single form input.
#[derive(Clone)]
pub struct FieldDescriptor {
    pub key: String,
    pub parent_key: Option<String>,
    pub label: String,
    pub placeholder: Option<String>,
    pub kind: FieldKind,
    pub icon: Option<String>,
    pub is_required: bool,
    pub is_disabled: bool,
    pub is_loading: bool,
    pub value: Value,
    pub options: OptionSource,
    pub on_change: Option<ChangeHandler>,
    pub on_blur: Option<ChangeHandler>,
    pub style: Option<String>,
    pub extra_styles: Option<String>,
}

impl FieldDescriptor {
    pub fn new(key: impl Into<String>, kind: FieldKind) -> Self {
        let key = key.into();
        Self {
            label: key.clone(),
            key,
            parent_key: None,
            placeholder: None,
            kind,
            icon: None,
            is_required: false,
            is_disabled: false,
            is_loading: false,
            value: Value::String(String::new()),
            options: OptionSource::None,
            on_change: None,
            on_blur: None,
            style: None,
            extra_styles: None,
        }
    }

    pub fn text(key: impl Into<String>) -> Self {
        Self::new(key, FieldKind::Text)
    }

    pub fn number(key: impl Into<String>) -> Self {
        Self::new(key, FieldKind::Number)
    }

    pub fn email(key: impl Into<String>) -> Self {
        Self::new(key, FieldKind::Email)
    }

    pub fn password(key: impl Into<String>) -> Self {
        Self::new(key, FieldKind::Password)
    }

    pub fn select(key: impl Into<String>) -> Self {
        Self::new(key, FieldKind::Select)
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Nest the field under `parent` in the form state. An empty name keeps
    /// the field at the top level.
    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        let parent = parent.into();
        self.parent_key = if parent.is_empty() { None } else { Some(parent) };
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.is_required = required;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.is_disabled = disabled;
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.is_loading = loading;
        self
    }

    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }

    pub fn items(mut self, items: Vec<SelectOption>) -> Self {
        self.options = OptionSource::Items(items);
        self
    }

    pub fn render_items<F, I>(mut self, producer: F) -> Self
    where
        F: Fn() -> I + 'static,
        I: IntoIterator<Item = SelectOption>,
        I::IntoIter: 'static,
    {
        self.options = OptionSource::lazy(producer);
        self
    }

    pub fn on_change(mut self, handler: impl Fn(Value) + 'static) -> Self {
        self.on_change = Some(Rc::new(handler));
        self
    }

    pub fn on_change_handler(mut self, handler: ChangeHandler) -> Self {
        self.on_change = Some(handler);
        self
    }

    pub fn on_blur(mut self, handler: impl Fn(Value) + 'static) -> Self {
        self.on_blur = Some(Rc::new(handler));
        self
    }

    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn extra_styles(mut self, styles: impl Into<String>) -> Self {
        self.extra_styles = Some(styles.into());
        self
    }

    pub fn parent_key(&self) -> &str {
        self.parent_key.as_deref().unwrap_or("")
    }

    pub fn display_label(&self) -> String {
        if self.label.is_empty() {
            self.key.clone()
        } else {
            self.label.clone()
        }
    }

    /// JSON pointer of the field inside the form state.
    pub fn pointer(&self) -> String {
        match self.parent_key.as_deref() {
            Some(parent) => format!("/{}/{}", escape_pointer(parent), escape_pointer(&self.key)),
            None => format!("/{}", escape_pointer(&self.key)),
        }
    }

    /// Reads the field's value out of a form state object.
    pub fn read_from<'a>(&self, state: &'a Value) -> Option<&'a Value> {
        state.pointer(&self.pointer())
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("key", &self.key)
            .field("parent_key", &self.parent_key)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("is_required", &self.is_required)
            .field("is_disabled", &self.is_disabled)
            .field("is_loading", &self.is_loading)
            .field("value", &self.value)
            .field("options", &self.options)
            .field("on_change", &self.on_change.is_some())
            .field("on_blur", &self.on_blur.is_some())
            .finish()
    }
}

fn escape_pointer(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::Cell;

    #[test]
    fn empty_parent_means_top_level() {
        let field = FieldDescriptor::text("name").parent("");
        assert!(field.parent_key.is_none());
        assert_eq!(field.pointer(), "/name");
    }

    #[test]
    fn pointer_escapes_segments() {
        let field = FieldDescriptor::text("a/b").parent("x~y");
        assert_eq!(field.pointer(), "/x~0y/a~1b");
        let state = json!({"x~y": {"a/b": "hit"}});
        assert_eq!(field.read_from(&state), Some(&json!("hit")));
    }

    #[test]
    fn lazy_source_is_recomputed_each_time() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let source = OptionSource::lazy(move || {
            counter.set(counter.get() + 1);
            vec![SelectOption::same("one")]
        });
        assert_eq!(source.resolve().len(), 1);
        assert_eq!(source.resolve().len(), 1);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn kind_labels_roundtrip_through_serde() {
        let kind: FieldKind = serde_json::from_value(json!("password")).unwrap();
        assert_eq!(kind, FieldKind::Password);
        assert_eq!(kind.to_string(), "password");
    }
}
