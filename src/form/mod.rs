mod binding;
mod error;
mod errors;
mod patch;
mod sink;
pub mod validation;

pub use binding::Binder;
pub use error::FormError;
pub use errors::{ErrorsMap, FieldError};
pub use patch::{is_falsy, patch};
pub use sink::{ErrorSink, ModelState, SharedErrors, SharedState, StateSink};
