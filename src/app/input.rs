use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub const HELP_TEXT: &str = "Tab/↓ next • Shift+Tab/↑ previous • PgUp/PgDn section • Enter choose option • Ctrl+S submit • Ctrl+Q quit";
pub const POPUP_HELP_TEXT: &str = "↑/↓ move • Enter pick • Esc cancel";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Submit,
    Quit,
    SwitchSection(i32),
    NextField,
    PrevField,
    ResetStatus,
    OpenSelect,
    Edit(KeyEvent),
    None,
}

pub fn classify(key: &KeyEvent) -> KeyCommand {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('s') | KeyCode::Char('S') => KeyCommand::Submit,
            KeyCode::Char('q') | KeyCode::Char('Q') => KeyCommand::Quit,
            KeyCode::Char('c') | KeyCode::Char('C') => KeyCommand::Quit,
            KeyCode::Tab | KeyCode::Right => KeyCommand::SwitchSection(1),
            KeyCode::BackTab | KeyCode::Left => KeyCommand::SwitchSection(-1),
            _ => KeyCommand::None,
        };
    }

    match key.code {
        KeyCode::Tab | KeyCode::Down => KeyCommand::NextField,
        KeyCode::BackTab | KeyCode::Up => KeyCommand::PrevField,
        KeyCode::PageDown => KeyCommand::SwitchSection(1),
        KeyCode::PageUp => KeyCommand::SwitchSection(-1),
        KeyCode::Esc => KeyCommand::ResetStatus,
        KeyCode::Enter => KeyCommand::OpenSelect,
        _ => KeyCommand::Edit(*key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn control_chords_map_to_app_commands() {
        assert_eq!(classify(&key(KeyCode::Char('s'), KeyModifiers::CONTROL)), KeyCommand::Submit);
        assert_eq!(classify(&key(KeyCode::Char('q'), KeyModifiers::CONTROL)), KeyCommand::Quit);
        assert_eq!(
            classify(&key(KeyCode::Right, KeyModifiers::CONTROL)),
            KeyCommand::SwitchSection(1)
        );
    }

    #[test]
    fn plain_characters_are_edits() {
        let a = key(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(classify(&a), KeyCommand::Edit(a));
        assert_eq!(classify(&key(KeyCode::Tab, KeyModifiers::NONE)), KeyCommand::NextField);
        assert_eq!(classify(&key(KeyCode::Enter, KeyModifiers::NONE)), KeyCommand::OpenSelect);
    }
}
