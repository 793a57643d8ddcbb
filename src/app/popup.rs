use crate::{
    domain::SelectOption,
    presentation::{FieldElement, PopupRender},
};

/// Overlay list opened from a select field.
#[derive(Debug, Clone)]
pub(crate) struct SelectPopup {
    field_key: String,
    title: String,
    options: Vec<SelectOption>,
    labels: Vec<String>,
    selected: usize,
}

impl SelectPopup {
    pub(crate) fn from_element(element: &FieldElement) -> Self {
        let options = element.options().to_vec();
        let labels = options.iter().map(|option| option.label.clone()).collect();
        Self {
            field_key: element.key.clone(),
            title: element.label.clone(),
            selected: element.selected_index().unwrap_or(0),
            options,
            labels,
        }
    }

    pub(crate) fn field_key(&self) -> &str {
        &self.field_key
    }

    pub(crate) fn select_previous(&mut self) {
        if self.options.is_empty() {
            return;
        }
        if self.selected == 0 {
            self.selected = self.options.len() - 1;
        } else {
            self.selected -= 1;
        }
    }

    pub(crate) fn select_next(&mut self) {
        if self.options.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.options.len();
    }

    pub(crate) fn selection(&self) -> Option<&SelectOption> {
        self.options.get(self.selected)
    }

    pub(crate) fn as_render<'a>(&'a self, empty_label: &'a str) -> PopupRender<'a> {
        PopupRender {
            title: &self.title,
            options: &self.labels,
            selected: self.selected,
            empty_label,
        }
    }
}
