use serde_json::{Value, json};

use crate::{
    api::{ApiRequest, Endpoint},
    domain::{FieldDescriptor, FormFields, FormSection, SelectOption},
    form::{
        Binder, ErrorsMap, FormError, SharedErrors, SharedState,
        validation::{validate_email, validate_phone},
    },
};

use super::{
    Screen, apply_rule, check_required,
    models::{BusinessDetails, BusinessPayload},
    seed_object, text_at,
};

const REGISTERED: &str = "registered";
const CURRENCIES: &[(&str, &str)] = &[
    ("Indian Rupee", "INR"),
    ("US Dollar", "USD"),
    ("Euro", "EUR"),
    ("Pound Sterling", "GBP"),
    ("Australian Dollar", "AUD"),
];

/// Business details editor. The tax number only applies to registered
/// businesses and stays disabled otherwise.
pub struct BusinessScreen {
    binder: Binder,
    user_id: Option<String>,
}

impl BusinessScreen {
    pub const ID: &'static str = "business";

    pub fn with_state(seed: Option<Value>, user_id: Option<String>) -> Self {
        Self {
            binder: Binder::new(SharedState::new(seed_object(seed)), SharedErrors::new()),
            user_id,
        }
    }

    fn is_registered(&self) -> bool {
        text_at(&self.binder.state(), "/businessType") == REGISTERED
    }
}

fn business_types() -> Vec<SelectOption> {
    vec![
        SelectOption::new("Individual / proprietor", "individual"),
        SelectOption::new("Registered company", REGISTERED),
    ]
}

fn currencies() -> Vec<SelectOption> {
    CURRENCIES
        .iter()
        .map(|(label, code)| SelectOption::new(format!("{label} ({code})"), *code))
        .collect()
}

impl Screen for BusinessScreen {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn title(&self) -> &str {
        "Business details"
    }

    fn sections(&self) -> Vec<FormSection> {
        let b = &self.binder;
        let registered = self.is_registered();
        let profile = FormFields::new()
            .with(b.bind(
                FieldDescriptor::text("businessName")
                    .label("Business name")
                    .required(true),
            ))
            .with(b.bind_then(
                FieldDescriptor::select("businessType")
                    .label("Business type")
                    .required(true)
                    .items(business_types()),
                |binder, value| {
                    if value.as_str() != Some(REGISTERED) {
                        binder.patch("", "gstNumber", json!(""), false);
                        binder.clear_error("gstNumber");
                    }
                },
            ))
            .with(b.bind(
                FieldDescriptor::text("gstNumber")
                    .label("GST number")
                    .placeholder("22AAAAA0000A1Z5")
                    .required(registered)
                    .disabled(!registered),
            ))
            .with(b.bind(
                FieldDescriptor::select("currency")
                    .label("Currency")
                    .required(true)
                    .items(currencies()),
            ));
        let contact = FormFields::new()
            .with(b.bind_with_rule(
                FieldDescriptor::email("email")
                    .label("Business email")
                    .required(true),
                validate_email,
            ))
            .with(b.bind_with_rule(
                FieldDescriptor::number("phone").label("Phone"),
                validate_phone,
            ))
            .with(b.bind(FieldDescriptor::text("address").label("Address")));
        vec![
            FormSection::new("profile", "Profile", profile),
            FormSection::new("contact", "Contact", contact),
        ]
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
        check_required(&self.binder, &self.sections())?;
        let details: BusinessDetails = serde_json::from_value(state).map_err(FormError::payload)?;
        ApiRequest::new(
            Endpoint::UpdateBusiness,
            &BusinessPayload {
                user_id: self.user_id.clone(),
                details,
            },
        )
    }
}
