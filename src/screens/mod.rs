//! Business screens built on the form engine. Each screen owns its state,
//! rebuilds its descriptors on demand and turns the collected state into an
//! API request on submit.

mod business;
mod customer;
mod forgot_password;
pub mod geo;
mod invoice;
pub mod models;
mod registration;

use serde_json::Value;

use crate::{
    api::ApiRequest,
    domain::FormSection,
    form::{
        Binder, ErrorsMap, FormError,
        validation::{FieldRule, require_all},
    },
};

pub use business::BusinessScreen;
pub use customer::CustomerScreen;
pub use forgot_password::ForgotPasswordScreen;
pub use invoice::InvoiceItemScreen;
pub use registration::RegistrationScreen;

pub const SCREEN_IDS: &[&str] = &[
    RegistrationScreen::ID,
    ForgotPasswordScreen::ID,
    CustomerScreen::ID,
    BusinessScreen::ID,
    InvoiceItemScreen::ID,
];

pub trait Screen {
    fn id(&self) -> &'static str;
    fn title(&self) -> &str;
    /// Descriptors bound to the current state. Called again after every
    /// edit so values, errors and computed option lists stay current.
    fn sections(&self) -> Vec<FormSection>;
    fn state(&self) -> Value;
    fn errors(&self) -> ErrorsMap;
    /// Validates the whole form and builds the request to send.
    fn submit(&self) -> Result<ApiRequest, FormError>;
}

/// Builds a screen by id, seeding its state from `seed` when given.
pub fn screen_by_id(
    id: &str,
    seed: Option<Value>,
    user_id: Option<String>,
) -> Result<Box<dyn Screen>, FormError> {
    let screen: Box<dyn Screen> = match id {
        RegistrationScreen::ID => Box::new(RegistrationScreen::with_state(seed)),
        ForgotPasswordScreen::ID => Box::new(ForgotPasswordScreen::with_state(seed)),
        CustomerScreen::ID => Box::new(CustomerScreen::with_state(seed)?),
        BusinessScreen::ID => Box::new(BusinessScreen::with_state(seed, user_id)),
        InvoiceItemScreen::ID => Box::new(InvoiceItemScreen::with_state(seed)),
        other => return Err(FormError::UnknownScreen(other.to_string())),
    };
    Ok(screen)
}

/// Flags every required field that is still empty, keeping messages already
/// set by blur rules. Fails when any field carries an error afterwards.
pub(crate) fn check_required(binder: &Binder, sections: &[FormSection]) -> Result<(), FormError> {
    let state = binder.state();
    let mut errors = binder.errors();
    require_all(
        sections.iter().flat_map(|section| section.fields.iter()),
        &state,
        &mut errors,
    );
    let count = errors.len();
    binder.replace_errors(errors);
    if count > 0 {
        tracing::debug!(count, "submission blocked by field errors");
        return Err(FormError::Invalid { count });
    }
    Ok(())
}

/// Re-runs a blur rule at submit time for fields the user never left.
pub(crate) fn apply_rule(binder: &Binder, state: &Value, key: &str, pointer: &str, rule: FieldRule) {
    let text = text_at(state, pointer);
    if text.is_empty() {
        return;
    }
    if let Err(message) = rule(&text) {
        binder.set_error(key, message);
    }
}

/// Reads the text at `pointer`, treating anything missing as empty.
pub(crate) fn text_at(state: &Value, pointer: &str) -> String {
    state
        .pointer(pointer)
        .map(crate::form::validation::value_text)
        .unwrap_or_default()
}

fn seed_object(seed: Option<Value>) -> Value {
    match seed {
        Some(value @ Value::Object(_)) => value,
        Some(other) => {
            tracing::warn!(kind = ?other, "ignoring non-object seed state");
            Value::Object(Default::default())
        }
        None => Value::Object(Default::default()),
    }
}
