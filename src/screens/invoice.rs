use serde_json::Value;

use crate::{
    api::{ApiRequest, Endpoint},
    domain::{FieldDescriptor, FormFields, FormSection, SelectOption},
    form::{
        Binder, ErrorsMap, FormError, SharedErrors, SharedState,
        validation::validate_positive_number,
    },
};

use super::{Screen, apply_rule, check_required, models::InvoiceItemPayload, seed_object, text_at};

const TAX_RATES: &[u32] = &[0, 5, 12, 18, 28];

/// One invoice line: quantity times rate plus tax, with the total shown as
/// a read-only field.
pub struct InvoiceItemScreen {
    binder: Binder,
}

impl InvoiceItemScreen {
    pub const ID: &'static str = "invoice-item";

    pub fn with_state(seed: Option<Value>) -> Self {
        Self {
            binder: Binder::new(SharedState::new(seed_object(seed)), SharedErrors::new()),
        }
    }

    /// Line total, or `None` while quantity or rate is not a number.
    pub fn line_total(&self) -> Option<f64> {
        let state = self.binder.state();
        let quantity = parse_amount(&text_at(&state, "/quantity"))?;
        let rate = parse_amount(&text_at(&state, "/rate"))?;
        let tax = parse_amount(&text_at(&state, "/taxRate")).unwrap_or(0.0);
        Some(round_cents(quantity * rate * (1.0 + tax / 100.0)))
    }
}

fn parse_amount(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn units() -> Vec<SelectOption> {
    ["pcs", "kg", "hrs", "days"]
        .into_iter()
        .map(SelectOption::same)
        .collect()
}

fn tax_rates() -> Vec<SelectOption> {
    TAX_RATES
        .iter()
        .map(|rate| SelectOption::new(format!("GST {rate}%"), *rate))
        .collect()
}

impl Screen for InvoiceItemScreen {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn title(&self) -> &str {
        "Invoice item"
    }

    fn sections(&self) -> Vec<FormSection> {
        let b = &self.binder;
        let total = self
            .line_total()
            .map(|total| format!("{total:.2}"))
            .unwrap_or_default();
        let fields = FormFields::new()
            .with(b.bind(
                FieldDescriptor::text("itemName")
                    .label("Item")
                    .required(true),
            ))
            .with(b.bind(FieldDescriptor::text("description").label("Description")))
            .with(b.bind_with_rule(
                FieldDescriptor::number("quantity")
                    .label("Quantity")
                    .required(true),
                validate_positive_number,
            ))
            .with(b.bind(
                FieldDescriptor::select("unit")
                    .label("Unit")
                    .items(units()),
            ))
            .with(b.bind_with_rule(
                FieldDescriptor::number("rate")
                    .label("Rate")
                    .required(true),
                validate_positive_number,
            ))
            .with(b.bind(
                FieldDescriptor::select("taxRate")
                    .label("Tax")
                    .items(tax_rates()),
            ))
            .with(
                FieldDescriptor::number("amount")
                    .label("Line total")
                    .value(total)
                    .disabled(true),
            );
        vec![FormSection::new("item", "Line item", fields)]
    }

    fn state(&self) -> Value {
        self.binder.state()
    }

    fn errors(&self) -> ErrorsMap {
        self.binder.errors()
    }

    fn submit(&self) -> Result<ApiRequest, FormError> {
        let state = self.binder.state();
        apply_rule(&self.binder, &state, "quantity", "/quantity", validate_positive_number);
        apply_rule(&self.binder, &state, "rate", "/rate", validate_positive_number);
        check_required(&self.binder, &self.sections())?;

        let quantity = parse_amount(&text_at(&state, "/quantity")).unwrap_or_default();
        let rate = parse_amount(&text_at(&state, "/rate")).unwrap_or_default();
        let tax_rate = parse_amount(&text_at(&state, "/taxRate")).unwrap_or(0.0);
        let unit = text_at(&state, "/unit");
        let payload = InvoiceItemPayload {
            item_name: text_at(&state, "/itemName").trim().to_string(),
            description: text_at(&state, "/description").trim().to_string(),
            quantity,
            rate,
            unit: if unit.is_empty() { "pcs".to_string() } else { unit },
            tax_rate,
            amount: self.line_total().unwrap_or_default(),
        };
        ApiRequest::new(Endpoint::AddInvoiceItem, &payload)
    }
}
