use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

use crate::presentation::{Control, FieldElement, RenderOptions, RenderedForm};

pub fn render_fields(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    form: &RenderedForm,
    selected: usize,
    options: &RenderOptions,
) {
    if form.is_empty() {
        let placeholder = Paragraph::new("This section has no fields")
            .block(Block::default().title(title.to_string()).borders(Borders::ALL));
        frame.render_widget(placeholder, area);
        return;
    }

    let content_width = area.width.saturating_sub(4);
    let selected = selected.min(form.len() - 1);
    let items: Vec<ListItem<'static>> = form
        .elements
        .iter()
        .enumerate()
        .map(|(idx, element)| {
            ListItem::new(field_lines(element, idx == selected, content_width, options))
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(selected));

    let list = List::new(items)
        .block(Block::default().title(title.to_string()).borders(Borders::ALL))
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Lines drawn for one field: label, value panel, meta line and any error.
pub fn field_lines(
    element: &FieldElement,
    is_selected: bool,
    max_width: u16,
    options: &RenderOptions,
) -> Vec<Line<'static>> {
    let mut lines = vec![label_line(element, is_selected, options)];
    lines.extend(value_panel_lines(element, is_selected, max_width, options));
    lines.push(meta_line(element, options));
    if let Some(error) = error_lines(element, max_width, options) {
        lines.extend(error);
    }
    lines
}

fn label_line(element: &FieldElement, is_selected: bool, options: &RenderOptions) -> Line<'static> {
    let mut label = String::new();
    if let Some(icon) = &element.icon {
        label.push_str(icon);
        label.push(' ');
    }
    label.push_str(&element.label);

    let label_style = if !element.is_interactive() {
        Style::default().fg(Color::DarkGray)
    } else if is_selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    };
    let mut spans = vec![Span::styled(label, label_style)];
    if element.required {
        spans.push(Span::styled(
            options.required_marker.clone(),
            Style::default().fg(Color::Red),
        ));
    }
    Line::from(spans)
}

fn value_text(element: &FieldElement, options: &RenderOptions) -> (String, bool) {
    if element.display.is_empty() {
        let hint = match &element.control {
            Control::Select { options: items, .. } if items.is_empty() => {
                options.empty_options_label.clone()
            }
            Control::Select { .. } => element
                .placeholder
                .clone()
                .unwrap_or_else(|| options.select_placeholder.clone()),
            Control::TextInput { .. } => element.placeholder.clone().unwrap_or_default(),
        };
        return (hint, true);
    }
    (element.display.clone(), false)
}

fn value_panel_lines(
    element: &FieldElement,
    is_selected: bool,
    max_width: u16,
    options: &RenderOptions,
) -> Vec<Line<'static>> {
    let clamp_width = max_width.saturating_sub(6).max(4) as usize;
    let (mut text, is_hint) = value_text(element, options);
    if matches!(element.control, Control::Select { .. }) {
        text.push_str(" ▾");
    }
    let mut wrapped: Vec<String> = wrap(&text, clamp_width)
        .into_iter()
        .map(|segment| segment.into_owned())
        .collect();
    if wrapped.is_empty() {
        wrapped.push(String::new());
    }

    let value_style = if is_hint {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC)
    } else if is_selected {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    if !is_selected {
        return wrapped
            .into_iter()
            .map(|segment| {
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled(segment, value_style),
                ])
            })
            .collect();
    }

    let inner_width = wrapped
        .iter()
        .map(|line| UnicodeWidthStr::width(line.as_str()))
        .max()
        .unwrap_or(0);
    let border = "─".repeat(inner_width.saturating_add(2));
    let border_style = if element.error.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Yellow)
    };

    let mut lines = Vec::with_capacity(wrapped.len() + 2);
    lines.push(Line::from(Span::styled(format!("┌{border}┐"), border_style)));
    for segment in wrapped {
        let padding = inner_width.saturating_sub(UnicodeWidthStr::width(segment.as_str()));
        lines.push(Line::from(vec![
            Span::styled("│ ", border_style),
            Span::styled(segment, value_style),
            Span::raw(" ".repeat(padding)),
            Span::styled(" │", border_style),
        ]));
    }
    lines.push(Line::from(Span::styled(format!("└{border}┘"), border_style)));
    lines
}

fn meta_line(element: &FieldElement, options: &RenderOptions) -> Line<'static> {
    let mut meta = vec![Span::styled(
        format!("  type: {}", element.kind),
        Style::default().fg(Color::DarkGray),
    )];
    if element.loading {
        meta.push(Span::styled(
            format!("  • {}", options.loading_label),
            Style::default().fg(Color::Blue),
        ));
    } else if element.disabled {
        meta.push(Span::styled(
            "  • disabled",
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(meta)
}

fn error_lines(
    element: &FieldElement,
    max_width: u16,
    options: &RenderOptions,
) -> Option<Vec<Line<'static>>> {
    element.error.as_ref().map(|message| {
        let width = (max_width as usize).saturating_sub(4).max(8);
        wrap(message, width)
            .into_iter()
            .enumerate()
            .map(|(idx, line)| {
                let prefix = if idx == 0 {
                    format!("  {} ", options.error_icon)
                } else {
                    "    ".to_string()
                };
                Line::from(Span::styled(
                    format!("{prefix}{line}"),
                    Style::default().fg(Color::Red),
                ))
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{FieldDescriptor, FormFields, SelectOption},
        form::ErrorsMap,
        presentation::render,
    };

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    fn element(field: FieldDescriptor, errors: &ErrorsMap) -> FieldElement {
        let fields = FormFields::new().with(field);
        render(&fields, errors, &RenderOptions::default())
            .elements
            .remove(0)
    }

    #[test]
    fn required_marker_is_red() {
        let el = element(
            FieldDescriptor::text("name").label("Name").required(true),
            &ErrorsMap::new(),
        );
        let lines = field_lines(&el, false, 40, &RenderOptions::default());
        assert_eq!(line_text(&lines[0]), "Name *");
        assert_eq!(lines[0].spans[1].style.fg, Some(Color::Red));
    }

    #[test]
    fn error_line_uses_icon_and_message() {
        let mut errors = ErrorsMap::new();
        errors.flag("name");
        let el = element(FieldDescriptor::text("name"), &errors);
        let lines = field_lines(&el, false, 60, &RenderOptions::default());
        let last = line_text(lines.last().expect("error line"));
        assert_eq!(last, "  ⚠ This field is required");
    }

    #[test]
    fn selected_field_is_boxed() {
        let el = element(FieldDescriptor::text("name").value("Ada"), &ErrorsMap::new());
        let lines = field_lines(&el, true, 40, &RenderOptions::default());
        assert!(line_text(&lines[1]).starts_with('┌'));
        assert_eq!(line_text(&lines[2]), "│ Ada │");
        assert!(line_text(&lines[3]).starts_with('└'));
    }

    #[test]
    fn empty_select_shows_no_options_hint() {
        let el = element(FieldDescriptor::select("state"), &ErrorsMap::new());
        let lines = field_lines(&el, false, 60, &RenderOptions::default());
        assert_eq!(line_text(&lines[1]), "  No options available ▾");
    }

    #[test]
    fn select_shows_option_label() {
        let el = element(
            FieldDescriptor::select("unit")
                .items(vec![SelectOption::new("Kilogram", "kg")])
                .value("kg"),
            &ErrorsMap::new(),
        );
        let lines = field_lines(&el, false, 60, &RenderOptions::default());
        assert_eq!(line_text(&lines[1]), "  Kilogram ▾");
    }

    #[test]
    fn loading_fields_are_dimmed() {
        let el = element(FieldDescriptor::text("gst").loading(true), &ErrorsMap::new());
        let lines = field_lines(&el, true, 40, &RenderOptions::default());
        assert_eq!(lines[0].spans[0].style.fg, Some(Color::DarkGray));
        let meta = line_text(&lines[lines.len() - 1]);
        assert!(meta.contains("loading"));
    }
}
