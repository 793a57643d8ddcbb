mod body;
mod fields;
mod footer;
mod popup;
mod sections;

pub use body::render_body;
pub use fields::field_lines;
pub use footer::render_footer;
pub use popup::{popup_rect, render_popup};
