use serde_json::Value;

use crate::{
    api::{ApiRequest, Endpoint},
    domain::{FieldDescriptor, FormFields, FormSection},
    form::{
        Binder, ErrorsMap, FormError, SharedErrors, SharedState,
        validation::{validate_email, validate_password, validate_phone},
    },
};

use super::{
    Screen, apply_rule, check_required,
    models::{RegisterPayload, UserModel},
    seed_object, text_at,
};

const MISMATCH: &str = "Passwords do not match";

pub struct RegistrationScreen {
    binder: Binder,
}

impl RegistrationScreen {
    pub const ID: &'static str = "registration";

    pub fn new() -> Self {
        Self::with_state(None)
    }

    pub fn with_state(seed: Option<Value>) -> Self {
        let state = SharedState::new(seed_object(seed));
        Self {
            binder: Binder::new(state, SharedErrors::new()),
        }
    }

    fn confirm_field(&self) -> FieldDescriptor {
        let binder = self.binder.clone();
        self.binder
            .bind(
                FieldDescriptor::password("confirmPassword")
                    .label("Confirm password")
                    .required(true),
            )
            .on_blur(move |_| check_confirmation(&binder))
    }

    fn password_field(&self) -> FieldDescriptor {
        let b = &self.binder;
        let field = b.bind_then(
            FieldDescriptor::password("password")
                .label("Password")
                .required(true),
            |binder, _| check_confirmation(binder),
        );
        b.check_on_blur(field, validate_password)
    }
}

/// Compares a filled-in confirmation with the password and keeps the
/// mismatch error in step with it. An empty confirmation is left to the
/// required check.
fn check_confirmation(binder: &Binder) {
    let state = binder.state();
    let confirm = text_at(&state, "/confirmPassword");
    if confirm.is_empty() {
        return;
    }
    if confirm == text_at(&state, "/password") {
        binder.clear_error("confirmPassword");
    } else {
        binder.set_error("confirmPassword", MISMATCH);
    }
}

impl Default for RegistrationScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for RegistrationScreen {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn title(&self) -> &str {
        "Create account"
    }

    fn sections(&self) -> Vec<FormSection> {
        let b = &self.binder;
        let fields = FormFields::new()
            .with(b.bind(
                FieldDescriptor::text("name")
                    .label("Full name")
                    .placeholder("Jane Doe")
                    .required(true),
            ))
            .with(b.bind_with_rule(
                FieldDescriptor::email("email")
                    .label("Email")
                    .placeholder("you@company.com")
                    .required(true),
                validate_email,
            ))
            .with(b.bind_with_rule(
                FieldDescriptor::number("phone").label("Phone"),
                validate_phone,
            ))
            .with(self.password_field())
            .with(self.confirm_field());
        vec![FormSection::new("account", "Account", fields)]
    }

    fn state(&self) -> Value {
        self.binder.state()
    }

    fn errors(&self) -> ErrorsMap {
        self.binder.errors()
    }

    fn submit(&self) -> Result<ApiRequest, FormError> {
        let state = self.binder.state();
        apply_rule(&self.binder, &state, "email", "/email", validate_email);
        apply_rule(&self.binder, &state, "phone", "/phone", validate_phone);
        apply_rule(&self.binder, &state, "password", "/password", validate_password);
        check_confirmation(&self.binder);
        check_required(&self.binder, &self.sections())?;

        let user: UserModel = serde_json::from_value(state).map_err(FormError::payload)?;
        let payload = RegisterPayload {
            name: user.name.trim().to_string(),
            email: user.email.trim().to_string(),
            phone: user.phone.trim().to_string(),
            password: user.password,
        };
        ApiRequest::new(Endpoint::RegisterUser, &payload)
    }
}
