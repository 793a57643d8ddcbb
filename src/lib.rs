#![deny(rust_2018_idioms)]

pub mod api;
mod app;
pub mod domain;
pub mod form;
pub mod io;
pub mod presentation;
pub mod screens;
pub mod store;

#[cfg(test)]
mod tests;

pub use api::{ApiRequest, Endpoint, RecordingTransport, Transport};
pub use app::{FormSession, FormUi, KeyOutcome, UiOptions};
pub use domain::{FieldDescriptor, FieldKind, FormFields, FormSection, OptionSource, SelectOption};
pub use form::{Binder, ErrorsMap, FieldError, FormError, patch};
pub use presentation::{FieldEvent, RenderOptions, RenderedForm, dispatch, render};
pub use screens::{SCREEN_IDS, Screen, screen_by_id};

pub mod prelude {
    pub use super::{
        Binder, FieldDescriptor, FormFields, FormSection, FormUi, RenderOptions, Screen,
        SelectOption, UiOptions, patch, render, screen_by_id,
    };
}
