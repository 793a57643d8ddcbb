mod components;
mod element;
mod options;
mod render;
mod view;

pub use components::{field_lines, popup_rect};
pub use element::{Control, FieldElement, Keyboard, RenderedForm};
pub use options::RenderOptions;
pub use render::{FieldEvent, dispatch, render};
pub use view::{PopupRender, SectionTab, UiContext, draw};
