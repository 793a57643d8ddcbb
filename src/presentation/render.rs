use serde_json::Value;

use crate::{
    domain::{FieldDescriptor, FieldKind, FormFields, SelectOption},
    form::{ErrorsMap, validation::value_text},
};

use super::{Control, FieldElement, Keyboard, RenderOptions, RenderedForm};

/// Builds the element tree for a descriptor map: one element per descriptor,
/// in insertion order.
///
/// Lazy option sources are invoked here, on every call.
pub fn render(fields: &FormFields, errors: &ErrorsMap, options: &RenderOptions) -> RenderedForm {
    let elements = fields
        .iter()
        .map(|field| render_field(field, errors, options))
        .collect();
    RenderedForm {
        container_style: options.container_style.clone(),
        elements,
    }
}

fn render_field(field: &FieldDescriptor, errors: &ErrorsMap, options: &RenderOptions) -> FieldElement {
    let text = value_text(&field.value);
    let (control, display) = match field.kind {
        FieldKind::Text => (text_input(Keyboard::Default, false), text),
        FieldKind::Number => (text_input(Keyboard::Numeric, false), text),
        FieldKind::Email => (text_input(Keyboard::Email, false), text),
        FieldKind::Password => {
            let masked = std::iter::repeat_n(options.mask_char, text.chars().count()).collect();
            (text_input(Keyboard::Default, true), masked)
        }
        FieldKind::Select => select_control(field, text),
    };

    FieldElement {
        key: field.key.clone(),
        parent_key: field.parent_key.clone(),
        kind: field.kind,
        label: field.display_label(),
        placeholder: field.placeholder.clone(),
        icon: field.icon.clone(),
        value: field.value.clone(),
        display,
        control,
        required: field.is_required,
        disabled: field.is_disabled,
        loading: field.is_loading,
        error: errors.display_message(&field.key, &options.required_message),
        style: field.style.clone(),
        extra_styles: field.extra_styles.clone(),
    }
}

fn text_input(keyboard: Keyboard, masked: bool) -> Control {
    Control::TextInput { keyboard, masked }
}

fn select_control(field: &FieldDescriptor, text: String) -> (Control, String) {
    if field.options.is_none() {
        tracing::debug!(field = %field.key, "select field has no option source");
    }
    let options: Vec<SelectOption> = field.options.resolve();
    let selected = options
        .iter()
        .position(|option| option_matches(&option.value, &field.value));
    let display = selected
        .and_then(|index| options.get(index))
        .map(|option| option.label.clone())
        .unwrap_or(text);
    (Control::Select { options, selected }, display)
}

fn option_matches(option: &Value, current: &Value) -> bool {
    if option == current {
        return true;
    }
    // Option values may be numbers while edits arrive as text.
    !matches!(current, Value::Null) && value_text(option) == value_text(current)
}

/// User interaction routed back to a descriptor's callbacks.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEvent {
    Change { key: String, value: Value },
    Blur { key: String, value: Value },
}

impl FieldEvent {
    pub fn change(key: impl Into<String>, value: impl Into<Value>) -> Self {
        FieldEvent::Change {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn blur(key: impl Into<String>, value: impl Into<Value>) -> Self {
        FieldEvent::Blur {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Invokes the callback matching `event`. Returns `false` when no callback
/// ran: unknown key, no handler, or an edit to a disabled/loading field.
pub fn dispatch(fields: &FormFields, event: FieldEvent) -> bool {
    match event {
        FieldEvent::Change { key, value } => {
            let Some(field) = fields.get(&key) else {
                tracing::debug!(field = %key, "change for unknown field ignored");
                return false;
            };
            if field.is_disabled || field.is_loading {
                return false;
            }
            match field.on_change.clone() {
                Some(handler) => {
                    handler(value);
                    true
                }
                None => false,
            }
        }
        FieldEvent::Blur { key, value } => {
            let handler = fields.get(&key).and_then(|field| field.on_blur.clone());
            match handler {
                Some(handler) => {
                    handler(value);
                    true
                }
                None => false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use serde_json::json;

    use super::*;

    fn options() -> RenderOptions {
        RenderOptions::default()
    }

    #[test]
    fn one_element_per_descriptor_in_order() {
        let fields = FormFields::new()
            .with(FieldDescriptor::text("b").value("Ada"))
            .with(FieldDescriptor::number("n").value(42))
            .with(FieldDescriptor::email("a").value("ada@x.io"))
            .with(FieldDescriptor::password("c").value("Secret12"))
            .with(
                FieldDescriptor::select("s")
                    .items(vec![SelectOption::same("IN"), SelectOption::same("US")])
                    .value("US"),
            );
        let form = render(&fields, &ErrorsMap::new(), &options());
        let keys: Vec<_> = form.elements.iter().map(|element| element.key.as_str()).collect();
        assert_eq!(keys, ["b", "n", "a", "c", "s"]);
        for (element, descriptor) in form.elements.iter().zip(fields.iter()) {
            assert_eq!(element.value, descriptor.value, "{} keeps its value", element.key);
            assert_eq!(element.kind, descriptor.kind);
        }
    }

    #[test]
    fn password_is_masked() {
        let fields = FormFields::new().with(FieldDescriptor::password("pw").value("secret"));
        let form = render(&fields, &ErrorsMap::new(), &options());
        let element = form.element("pw").expect("element");
        assert_eq!(element.display, "••••••");
        assert_eq!(element.value, json!("secret"));
        assert_eq!(
            element.control,
            Control::TextInput {
                keyboard: Keyboard::Default,
                masked: true
            }
        );
    }

    #[test]
    fn lazy_options_run_on_every_render() {
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let fields = FormFields::new().with(FieldDescriptor::select("s").render_items(move || {
            *counter.borrow_mut() += 1;
            vec![SelectOption::same("x")]
        }));
        render(&fields, &ErrorsMap::new(), &options());
        render(&fields, &ErrorsMap::new(), &options());
        assert_eq!(*calls.borrow(), 2);
    }

    #[test]
    fn select_shows_label_of_matching_option() {
        let fields = FormFields::new().with(
            FieldDescriptor::select("tax")
                .items(vec![SelectOption::new("GST 5%", 5), SelectOption::new("GST 12%", 12)])
                .value("12"),
        );
        let form = render(&fields, &ErrorsMap::new(), &options());
        let element = form.element("tax").expect("element");
        assert_eq!(element.selected_index(), Some(1));
        assert_eq!(element.display, "GST 12%");
    }

    #[test]
    fn select_without_source_has_no_options() {
        let fields = FormFields::new().with(FieldDescriptor::select("s"));
        let form = render(&fields, &ErrorsMap::new(), &options());
        assert!(form.element("s").expect("element").options().is_empty());
    }

    #[test]
    fn flagged_error_uses_required_message() {
        let fields = FormFields::new()
            .with(FieldDescriptor::text("name"))
            .with(FieldDescriptor::email("email"));
        let mut errors = ErrorsMap::new();
        errors.flag("name");
        errors.set_message("email", "Enter a valid email address");
        let form = render(&fields, &errors, &options());
        assert_eq!(
            form.element("name").and_then(|element| element.error.as_deref()),
            Some("This field is required")
        );
        assert_eq!(
            form.element("email").and_then(|element| element.error.as_deref()),
            Some("Enter a valid email address")
        );
        assert_eq!(form.error_count(), 2);
    }

    #[test]
    fn dispatch_skips_disabled_and_unknown_fields() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let other = Rc::clone(&seen);
        let fields = FormFields::new()
            .with(FieldDescriptor::text("open").on_change(move |value| sink.borrow_mut().push(value)))
            .with(
                FieldDescriptor::text("locked")
                    .disabled(true)
                    .on_change(move |value| other.borrow_mut().push(value)),
            );
        assert!(dispatch(&fields, FieldEvent::change("open", "a")));
        assert!(!dispatch(&fields, FieldEvent::change("locked", "b")));
        assert!(!dispatch(&fields, FieldEvent::change("missing", "c")));
        assert!(!dispatch(&fields, FieldEvent::blur("open", "a")));
        assert_eq!(*seen.borrow(), vec![json!("a")]);
    }
}
