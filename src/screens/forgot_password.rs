use serde_json::Value;

use crate::{
    api::{ApiRequest, Endpoint},
    domain::{FieldDescriptor, FormFields, FormSection},
    form::{Binder, ErrorsMap, FormError, SharedErrors, SharedState, validation::validate_email},
};

use super::{Screen, apply_rule, check_required, models::ForgotPasswordPayload, seed_object, text_at};

pub struct ForgotPasswordScreen {
    binder: Binder,
}

impl ForgotPasswordScreen {
    pub const ID: &'static str = "forgot-password";

    pub fn with_state(seed: Option<Value>) -> Self {
        Self {
            binder: Binder::new(SharedState::new(seed_object(seed)), SharedErrors::new()),
        }
    }
}

impl Screen for ForgotPasswordScreen {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn title(&self) -> &str {
        "Reset password"
    }

    fn sections(&self) -> Vec<FormSection> {
        let fields = FormFields::new().with(self.binder.bind_with_rule(
            FieldDescriptor::email("email")
                .label("Registered email")
                .placeholder("you@company.com")
                .required(true),
            validate_email,
        ));
        vec![FormSection::new("reset", "Reset link", fields)]
    }

    fn state(&self) -> Value {
        self.binder.state()
    }

    fn errors(&self) -> ErrorsMap {
        self.binder.errors()
    }

    fn submit(&self) -> Result<ApiRequest, FormError> {
        let sections = self.sections();
        let state = self.binder.state();
        apply_rule(&self.binder, &state, "email", "/email", validate_email);
        let email = text_at(&state, "/email");
        check_required(&self.binder, &sections)?;
        ApiRequest::new(
            Endpoint::ForgotPassword,
            &ForgotPasswordPayload {
                email: email.trim().to_string(),
            },
        )
    }
}
