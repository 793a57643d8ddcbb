use anyhow::{Result, anyhow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

use crate::{
    api::ApiRequest,
    domain::{FormFields, FormSection},
    form::{ErrorsMap, FormError},
    presentation::{self, SectionTab, UiContext, render},
    screens::Screen,
};

use super::{
    input::{HELP_TEXT, KeyCommand, POPUP_HELP_TEXT, classify},
    options::UiOptions,
    popup::SelectPopup,
    session::{FormSession, KeyOutcome},
    status::StatusLine,
    terminal::TerminalGuard,
};

pub(crate) struct App {
    screen: Box<dyn Screen>,
    session: FormSession,
    options: UiOptions,
    status: StatusLine,
    popup: Option<SelectPopup>,
    dirty: bool,
    exit_armed: bool,
    should_quit: bool,
    result: Option<ApiRequest>,
}

impl App {
    pub fn new(screen: Box<dyn Screen>, options: UiOptions) -> Self {
        Self {
            screen,
            session: FormSession::new(),
            options,
            status: StatusLine::new(),
            popup: None,
            dirty: false,
            exit_armed: false,
            should_quit: false,
            result: None,
        }
    }

    pub fn run(&mut self) -> Result<ApiRequest> {
        let mut terminal = TerminalGuard::enter()?;
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if !event::poll(self.options.tick_rate)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => self.handle_key(key)?,
                Event::Resize(_, _) => {
                    terminal.autoresize()?;
                }
                _ => {}
            }
        }

        self.result
            .take()
            .ok_or_else(|| anyhow!("user exited without submitting"))
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let sections = self.screen.sections();
        self.session.clamp(&sections);
        let errors = self.screen.errors();
        let tabs = section_tabs(&sections, &errors);
        let form = sections
            .get(self.session.section_index())
            .map(|section| render(&section.fields, &errors, &self.options.render))
            .unwrap_or_default();
        let help = self.options.show_help.then_some(if self.popup.is_some() {
            POPUP_HELP_TEXT
        } else {
            HELP_TEXT
        });

        presentation::draw(
            frame,
            UiContext {
                title: self.screen.title(),
                sections: &tabs,
                section_index: self.session.section_index(),
                form: &form,
                selected: self.session.field_index(),
                options: &self.options.render,
                status_message: self.status.message(),
                dirty: self.dirty,
                error_count: errors.len(),
                help,
                popup: self
                    .popup
                    .as_ref()
                    .map(|popup| popup.as_render(&self.options.render.empty_options_label)),
            },
        );
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        if self.popup.is_some() {
            self.handle_popup_key(key);
            return Ok(());
        }

        let sections = self.screen.sections();
        self.session.clamp(&sections);
        match classify(&key) {
            KeyCommand::Submit => self.on_submit(&sections),
            KeyCommand::Quit => self.on_exit(),
            KeyCommand::SwitchSection(delta) => self.session.switch_section(&sections, delta),
            KeyCommand::NextField => self.session.focus_next(&sections),
            KeyCommand::PrevField => self.session.focus_prev(&sections),
            KeyCommand::ResetStatus => {
                self.exit_armed = false;
                self.status.ready();
            }
            KeyCommand::OpenSelect => self.open_select(&sections),
            KeyCommand::Edit(key) => self.handle_edit(&sections, &key),
            KeyCommand::None => {}
        }
        Ok(())
    }

    fn handle_edit(&mut self, sections: &[FormSection], key: &KeyEvent) {
        let label = self
            .session
            .focused(sections)
            .map(|field| field.display_label())
            .unwrap_or_default();
        match self.session.handle_edit(sections, key) {
            KeyOutcome::Edited => {
                self.dirty = true;
                self.exit_armed = false;
                self.status.editing(&label);
            }
            KeyOutcome::Rejected => self.status.read_only(&label),
            KeyOutcome::Ignored => {}
        }
    }

    fn open_select(&mut self, sections: &[FormSection]) {
        let Some(field) = self.session.focused(sections) else {
            return;
        };
        if field.kind.is_text_like() {
            self.session.focus_next(sections);
            return;
        }
        if field.is_disabled || field.is_loading {
            self.status.read_only(&field.display_label());
            return;
        }
        let single = FormFields::new().with(field.clone());
        let rendered = render(&single, &self.screen.errors(), &self.options.render);
        if let Some(element) = rendered.elements.first() {
            self.popup = Some(SelectPopup::from_element(element));
        }
    }

    fn handle_popup_key(&mut self, key: KeyEvent) {
        let Some(popup) = self.popup.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.popup = None;
                self.status.ready();
            }
            KeyCode::Up | KeyCode::BackTab => popup.select_previous(),
            KeyCode::Down | KeyCode::Tab => popup.select_next(),
            KeyCode::Enter => {
                let Some(popup) = self.popup.take() else {
                    return;
                };
                if let Some(option) = popup.selection() {
                    let sections = self.screen.sections();
                    if self.session.choose(&sections, popup.field_key(), option) {
                        self.dirty = true;
                        self.exit_armed = false;
                        self.status.set_raw(format!("Selected {}", option.label));
                    }
                }
            }
            _ => {}
        }
    }

    fn on_submit(&mut self, sections: &[FormSection]) {
        self.exit_armed = false;
        self.session.blur_focused(sections);
        match self.screen.submit() {
            Ok(request) => {
                tracing::info!(screen = self.screen.id(), endpoint = ?request.endpoint, "form submitted");
                self.result = Some(request);
                self.dirty = false;
                self.status.submitted();
            }
            Err(FormError::Invalid { count }) => {
                self.status.issues_remaining(count);
                let sections = self.screen.sections();
                let errors = self.screen.errors();
                if let Some(key) = first_error_key(&sections, &errors) {
                    self.session.focus_key(&sections, &key);
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "submission failed");
                self.status.set_raw(err.to_string());
            }
        }
    }

    fn on_exit(&mut self) {
        if self.dirty && self.options.confirm_exit && !self.exit_armed {
            self.exit_armed = true;
            self.status.pending_exit();
            return;
        }
        self.should_quit = true;
    }
}

fn section_tabs(sections: &[FormSection], errors: &ErrorsMap) -> Vec<SectionTab> {
    sections
        .iter()
        .map(|section| SectionTab {
            title: section.title.clone(),
            error_count: section
                .fields
                .keys()
                .filter(|key| errors.contains(key))
                .count(),
        })
        .collect()
}

fn first_error_key(sections: &[FormSection], errors: &ErrorsMap) -> Option<String> {
    sections
        .iter()
        .flat_map(|section| section.fields.keys())
        .find(|key| errors.contains(key))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::{CustomerScreen, ForgotPasswordScreen};
    use crossterm::event::KeyModifiers;
    use serde_json::json;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
            .expect("key handled");
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    fn ctrl(app: &mut App, ch: char) {
        app.handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL))
            .expect("key handled");
    }

    #[test]
    fn typing_patches_screen_state() {
        let mut app = App::new(Box::new(ForgotPasswordScreen::with_state(None)), UiOptions::default());
        type_text(&mut app, "a@b.com");
        assert_eq!(app.screen.state(), json!({"email": "a@b.com"}));
        assert!(app.dirty);
    }

    #[test]
    fn submit_with_missing_fields_reports_issues() {
        let mut app = App::new(Box::new(ForgotPasswordScreen::with_state(None)), UiOptions::default());
        ctrl(&mut app, 's');
        assert!(app.result.is_none());
        assert_eq!(app.status.message(), "1 field(s) need attention");
        assert!(app.screen.errors().contains("email"));
    }

    #[test]
    fn submit_then_quit_keeps_request() {
        let mut app = App::new(Box::new(ForgotPasswordScreen::with_state(None)), UiOptions::default());
        type_text(&mut app, "a@b.com");
        ctrl(&mut app, 's');
        assert!(app.result.is_some());
        assert!(!app.dirty);
        ctrl(&mut app, 'q');
        assert!(app.should_quit);
    }

    #[test]
    fn quitting_dirty_form_needs_confirmation() {
        let mut app = App::new(Box::new(ForgotPasswordScreen::with_state(None)), UiOptions::default());
        type_text(&mut app, "x");
        ctrl(&mut app, 'q');
        assert!(!app.should_quit);
        ctrl(&mut app, 'q');
        assert!(app.should_quit);
        assert!(app.result.is_none());
    }

    #[test]
    fn select_popup_applies_choice() {
        let mut app = App::new(Box::new(CustomerScreen::new()), UiOptions::default());
        // Billing section: address, country, state, ...
        press(&mut app, KeyCode::PageDown);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert!(app.popup.is_some());
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert!(app.popup.is_none());
        assert_eq!(
            app.screen.state().pointer("/billingInfo/country"),
            Some(&json!("US"))
        );
    }

    #[test]
    fn failed_submit_focuses_first_error() {
        let mut app = App::new(Box::new(CustomerScreen::new()), UiOptions::default());
        press(&mut app, KeyCode::PageDown);
        ctrl(&mut app, 's');
        assert_eq!(app.session.section_index(), 0);
        assert_eq!(app.session.field_index(), 0);
    }
}
