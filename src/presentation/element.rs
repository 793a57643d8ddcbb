use serde_json::Value;

use crate::domain::{FieldKind, SelectOption};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyboard {
    Default,
    Numeric,
    Email,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    TextInput {
        keyboard: Keyboard,
        masked: bool,
    },
    /// Trigger that opens an overlay list of options.
    Select {
        options: Vec<SelectOption>,
        selected: Option<usize>,
    },
}

/// One input-bearing element of a rendered form.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldElement {
    pub key: String,
    pub parent_key: Option<String>,
    pub kind: FieldKind,
    pub label: String,
    pub placeholder: Option<String>,
    pub icon: Option<String>,
    pub value: Value,
    /// What the control shows: masked for passwords, the option label for
    /// selects.
    pub display: String,
    pub control: Control,
    pub required: bool,
    pub disabled: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub style: Option<String>,
    pub extra_styles: Option<String>,
}

impl FieldElement {
    pub fn is_interactive(&self) -> bool {
        !self.disabled && !self.loading
    }

    pub fn options(&self) -> &[SelectOption] {
        match &self.control {
            Control::Select { options, .. } => options,
            Control::TextInput { .. } => &[],
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        match &self.control {
            Control::Select { selected, .. } => *selected,
            Control::TextInput { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedForm {
    pub container_style: Option<String>,
    pub elements: Vec<FieldElement>,
}

impl RenderedForm {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn element(&self, key: &str) -> Option<&FieldElement> {
        self.elements.iter().find(|element| element.key == key)
    }

    pub fn error_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|element| element.error.is_some())
            .count()
    }
}
