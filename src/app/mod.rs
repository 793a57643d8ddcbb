mod form_ui;
mod input;
mod options;
mod popup;
mod runtime;
mod session;
mod status;
mod terminal;

pub use form_ui::FormUi;
pub use options::UiOptions;
pub use session::{FormSession, KeyOutcome};
