use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Paragraph},
};

use super::super::view::UiContext;
use super::{fields::render_fields, sections::render_section_tabs};

pub fn render_body(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>) {
    if ctx.sections.is_empty() {
        let placeholder = Paragraph::new("This screen has no fields")
            .block(Block::default().title(ctx.title).borders(Borders::ALL));
        frame.render_widget(placeholder, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    render_section_tabs(frame, chunks[0], ctx);
    let section_title = ctx
        .sections
        .get(ctx.section_index)
        .map(|section| section.title.as_str())
        .unwrap_or(ctx.title);
    render_fields(
        frame,
        chunks[1],
        section_title,
        ctx.form,
        ctx.selected,
        ctx.options,
    );
}
