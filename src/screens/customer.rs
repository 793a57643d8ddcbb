use serde_json::{Value, json};

use crate::{
    api::{ApiRequest, Endpoint},
    domain::{FieldDescriptor, FormFields, FormSection},
    form::{
        Binder, ErrorsMap, FormError, ModelState, SharedErrors, StateSink,
        validation::{validate_email, validate_phone},
    },
};

use super::{
    Screen, apply_rule, check_required,
    geo::{country_options, state_options},
    models::CustomerModel,
    text_at,
};

const BASIC: &str = "customerBasicInfo";
const BILLING: &str = "billingInfo";

/// New-customer screen: basic details plus a billing address whose state list
/// follows the chosen country.
pub struct CustomerScreen {
    model: ModelState<CustomerModel>,
    binder: Binder,
}

impl CustomerScreen {
    pub const ID: &'static str = "customer";

    pub fn new() -> Self {
        Self::from_model(CustomerModel::default())
    }

    pub fn from_model(model: CustomerModel) -> Self {
        let model = ModelState::new(model);
        Self {
            binder: Binder::new(model.clone(), SharedErrors::new()),
            model,
        }
    }

    pub fn with_state(seed: Option<Value>) -> Result<Self, FormError> {
        match seed {
            Some(value) => serde_json::from_value::<CustomerModel>(value)
                .map(Self::from_model)
                .map_err(FormError::payload),
            None => Ok(Self::new()),
        }
    }

    pub fn model(&self) -> CustomerModel {
        self.model.model()
    }

    fn basic_fields(&self) -> FormFields {
        let b = &self.binder;
        FormFields::new()
            .with(b.bind(
                FieldDescriptor::text("name")
                    .parent(BASIC)
                    .label("Customer name")
                    .required(true),
            ))
            .with(b.bind(
                FieldDescriptor::text("companyName")
                    .parent(BASIC)
                    .label("Company"),
            ))
            .with(b.bind_with_rule(
                FieldDescriptor::email("email")
                    .parent(BASIC)
                    .label("Email")
                    .placeholder("billing@customer.com")
                    .required(true),
                validate_email,
            ))
            .with(b.bind_with_rule(
                FieldDescriptor::number("phone")
                    .parent(BASIC)
                    .label("Phone"),
                validate_phone,
            ))
    }

    fn billing_fields(&self) -> FormFields {
        let b = &self.binder;
        let model = self.model.clone();
        FormFields::new()
            .with(b.bind(
                FieldDescriptor::text("address")
                    .parent(BILLING)
                    .label("Street address")
                    .required(true),
            ))
            .with(b.bind_then(
                FieldDescriptor::select("country")
                    .parent(BILLING)
                    .label("Country")
                    .required(true)
                    .items(country_options()),
                |binder, _| {
                    // A new country invalidates the chosen state.
                    binder.patch(BILLING, "state", json!(""), false);
                },
            ))
            .with(b.bind(
                FieldDescriptor::select("state")
                    .parent(BILLING)
                    .label("State")
                    .required(true)
                    .render_items(move || state_options(&model.model().billing_info.country)),
            ))
            .with(b.bind(
                FieldDescriptor::text("city")
                    .parent(BILLING)
                    .label("City"),
            ))
            .with(b.bind(
                FieldDescriptor::number("zipCode")
                    .parent(BILLING)
                    .label("ZIP / PIN code"),
            ))
    }
}

impl Default for CustomerScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for CustomerScreen {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn title(&self) -> &str {
        "New customer"
    }

    fn sections(&self) -> Vec<FormSection> {
        vec![
            FormSection::new("basic", "Basic info", self.basic_fields()),
            FormSection::new("billing", "Billing info", self.billing_fields()),
        ]
    }

    fn state(&self) -> Value {
        self.model.get()
    }

    fn errors(&self) -> ErrorsMap {
        self.binder.errors()
    }

    fn submit(&self) -> Result<ApiRequest, FormError> {
        let state = self.model.get();
        apply_rule(&self.binder, &state, "email", "/customerBasicInfo/email", validate_email);
        apply_rule(&self.binder, &state, "phone", "/customerBasicInfo/phone", validate_phone);
        let country = text_at(&state, "/billingInfo/country");
        let chosen_state = text_at(&state, "/billingInfo/state");
        if !chosen_state.is_empty()
            && !state_options(&country)
                .iter()
                .any(|option| option.label == chosen_state)
        {
            self.binder
                .set_error("state", format!("{chosen_state} is not a state of the selected country"));
        }
        check_required(&self.binder, &self.sections())?;
        ApiRequest::new(Endpoint::AddCustomer, &self.model.model())
    }
}
