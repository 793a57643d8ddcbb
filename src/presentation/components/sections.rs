use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Tabs},
};

use super::super::view::UiContext;

pub fn render_section_tabs(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>) {
    let titles: Vec<Line<'static>> = ctx
        .sections
        .iter()
        .map(|section| {
            let mut spans = vec![Span::raw(section.title.clone())];
            if section.error_count > 0 {
                spans.push(Span::styled(
                    format!(" ({})", section.error_count),
                    Style::default().fg(Color::Red),
                ));
            }
            Line::from(spans)
        })
        .collect();
    let selected = ctx
        .section_index
        .min(ctx.sections.len().saturating_sub(1));
    let tabs = Tabs::new(titles)
        .block(Block::default().title(ctx.title).borders(Borders::ALL))
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}
