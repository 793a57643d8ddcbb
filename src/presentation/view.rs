use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use super::{
    RenderOptions, RenderedForm,
    components::{render_body, render_footer, render_popup},
};

#[derive(Debug, Clone)]
pub struct SectionTab {
    pub title: String,
    pub error_count: usize,
}

pub struct UiContext<'a> {
    pub title: &'a str,
    pub sections: &'a [SectionTab],
    pub section_index: usize,
    /// Elements of the active section.
    pub form: &'a RenderedForm,
    pub selected: usize,
    pub options: &'a RenderOptions,
    pub status_message: &'a str,
    pub dirty: bool,
    pub error_count: usize,
    pub help: Option<&'a str>,
    pub popup: Option<PopupRender<'a>>,
}

pub struct PopupRender<'a> {
    pub title: &'a str,
    pub options: &'a [String],
    pub selected: usize,
    pub empty_label: &'a str,
}

pub fn draw(frame: &mut Frame<'_>, ctx: UiContext<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(7), Constraint::Length(4)])
        .split(frame.area());

    render_body(frame, chunks[0], &ctx);
    render_footer(frame, chunks[1], &ctx);

    if let Some(popup) = ctx.popup {
        render_popup(frame, popup);
    }
}
