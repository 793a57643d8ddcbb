use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use super::super::view::PopupRender;

/// Centers a `width` x `height` rectangle inside `area`, clamped to fit.
pub fn popup_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub fn render_popup(frame: &mut Frame<'_>, popup: PopupRender<'_>) {
    let widest = popup
        .options
        .iter()
        .map(|option| UnicodeWidthStr::width(option.as_str()))
        .chain([
            UnicodeWidthStr::width(popup.title),
            UnicodeWidthStr::width(popup.empty_label),
        ])
        .max()
        .unwrap_or(10) as u16;
    let width = widest.saturating_add(6);
    let height = (popup.options.len().max(1) as u16).saturating_add(2);
    let area = popup_rect(frame.area(), width, height.max(3));
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(popup.title.to_string())
        .borders(Borders::ALL);

    if popup.options.is_empty() {
        let empty = Paragraph::new(popup.empty_label.to_string())
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem<'static>> = popup
        .options
        .iter()
        .map(|option| ListItem::new(option.clone()))
        .collect();
    let mut state = ListState::default();
    state.select(Some(popup.selected.min(popup.options.len() - 1)));

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_rect_is_centered_and_clamped() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(popup_rect(area, 20, 10), Rect::new(30, 7, 20, 10));
        assert_eq!(popup_rect(area, 200, 50), area);
    }
}
