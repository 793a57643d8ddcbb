use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    domain::{FieldDescriptor, FieldKind, FormSection, SelectOption},
    form::validation::value_text,
    presentation::{FieldEvent, dispatch},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Ignored,
    Edited,
    /// The focused field did not accept the edit.
    Rejected,
}

/// Focus tracking and key-to-event translation for a screen's sections.
///
/// The session holds no field values: each edit derives the new text from
/// the descriptor's bound value and dispatches it as a change, the same way
/// a native text input reports its whole content.
#[derive(Debug, Clone, Default)]
pub struct FormSession {
    section_index: usize,
    field_index: usize,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section_index(&self) -> usize {
        self.section_index
    }

    pub fn field_index(&self) -> usize {
        self.field_index
    }

    /// Keeps focus inside the current shape of `sections`.
    pub fn clamp(&mut self, sections: &[FormSection]) {
        if sections.is_empty() {
            self.section_index = 0;
            self.field_index = 0;
            return;
        }
        self.section_index = self.section_index.min(sections.len() - 1);
        let len = sections[self.section_index].fields.len();
        self.field_index = self.field_index.min(len.saturating_sub(1));
    }

    pub fn focused<'a>(&self, sections: &'a [FormSection]) -> Option<&'a FieldDescriptor> {
        sections
            .get(self.section_index)
            .and_then(|section| section.fields.get_index(self.field_index))
    }

    /// Moves focus to the field with `key`, searching every section.
    pub fn focus_key(&mut self, sections: &[FormSection], key: &str) -> bool {
        for (section_index, section) in sections.iter().enumerate() {
            if let Some(field_index) = section.fields.keys().position(|candidate| candidate == key) {
                self.section_index = section_index;
                self.field_index = field_index;
                return true;
            }
        }
        false
    }

    /// Fires the focused field's blur handler with its current value.
    pub fn blur_focused(&self, sections: &[FormSection]) -> bool {
        match self.focused(sections) {
            Some(field) => dispatch(
                &sections[self.section_index].fields,
                FieldEvent::blur(field.key.clone(), field.value.clone()),
            ),
            None => false,
        }
    }

    pub fn focus_next(&mut self, sections: &[FormSection]) {
        self.clamp(sections);
        self.blur_focused(sections);
        let Some(section) = sections.get(self.section_index) else {
            return;
        };
        if self.field_index + 1 < section.fields.len() {
            self.field_index += 1;
        } else {
            self.advance_section(sections, 1);
        }
    }

    pub fn focus_prev(&mut self, sections: &[FormSection]) {
        self.clamp(sections);
        self.blur_focused(sections);
        if self.field_index > 0 {
            self.field_index -= 1;
            return;
        }
        self.advance_section(sections, -1);
        if let Some(section) = sections.get(self.section_index) {
            self.field_index = section.fields.len().saturating_sub(1);
        }
    }

    pub fn switch_section(&mut self, sections: &[FormSection], delta: i32) {
        self.clamp(sections);
        self.blur_focused(sections);
        self.advance_section(sections, delta);
    }

    fn advance_section(&mut self, sections: &[FormSection], delta: i32) {
        let len = sections.len() as i32;
        if len == 0 {
            return;
        }
        let next = (self.section_index as i32 + delta).rem_euclid(len);
        self.section_index = next as usize;
        self.field_index = 0;
    }

    /// Applies an editing key to the focused text-like field.
    pub fn handle_edit(&mut self, sections: &[FormSection], key: &KeyEvent) -> KeyOutcome {
        self.clamp(sections);
        let Some(field) = self.focused(sections) else {
            return KeyOutcome::Ignored;
        };
        if !field.kind.is_text_like() {
            return KeyOutcome::Ignored;
        }
        let mut buffer = value_text(&field.value);
        if !edit_buffer(&mut buffer, field.kind, key) {
            return KeyOutcome::Ignored;
        }
        let fields = &sections[self.section_index].fields;
        if dispatch(fields, FieldEvent::change(field.key.clone(), buffer)) {
            KeyOutcome::Edited
        } else {
            KeyOutcome::Rejected
        }
    }

    /// Chooses an option for the focused select field, then blurs it.
    pub fn choose(&mut self, sections: &[FormSection], key: &str, option: &SelectOption) -> bool {
        if !self.focus_key(sections, key) {
            return false;
        }
        let fields = &sections[self.section_index].fields;
        let changed = dispatch(fields, FieldEvent::change(key, option.value.clone()));
        if changed {
            dispatch(fields, FieldEvent::blur(key, option.value.clone()));
        }
        changed
    }
}

fn accepts(kind: FieldKind, ch: char) -> bool {
    match kind {
        FieldKind::Number => ch.is_ascii_digit() || matches!(ch, '.' | '-' | '+' | ' '),
        FieldKind::Email => !ch.is_whitespace(),
        FieldKind::Text | FieldKind::Password => true,
        FieldKind::Select => false,
    }
}

fn edit_buffer(buffer: &mut String, kind: FieldKind, key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Left if kind == FieldKind::Number => step_number(buffer, -1.0),
        KeyCode::Right if kind == FieldKind::Number => step_number(buffer, 1.0),
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) || !accepts(kind, ch) {
                return false;
            }
            buffer.push(ch);
            true
        }
        KeyCode::Backspace => buffer.pop().is_some(),
        KeyCode::Delete => {
            if buffer.is_empty() {
                return false;
            }
            buffer.clear();
            true
        }
        _ => false,
    }
}

fn step_number(buffer: &mut String, delta: f64) -> bool {
    let trimmed = buffer.trim();
    let current = if trimmed.is_empty() {
        0.0
    } else {
        match trimmed.parse::<f64>() {
            Ok(value) => value,
            Err(_) => return false,
        }
    };
    let next = current + delta;
    *buffer = if next.fract() == 0.0 {
        format!("{}", next as i64)
    } else {
        next.to_string()
    };
    true
}
