use serde_json::json;

use crate::{
    api::{Endpoint, Method},
    form::FormError,
    presentation::{FieldEvent, RenderOptions, dispatch, render},
    screens::{
        BusinessScreen, CustomerScreen, InvoiceItemScreen, RegistrationScreen, Screen, screen_by_id,
        SCREEN_IDS,
    },
};

fn change(screen: &dyn Screen, key: &str, value: serde_json::Value) {
    let sections = screen.sections();
    let section = sections
        .iter()
        .find(|section| section.fields.get(key).is_some())
        .expect("field exists");
    assert!(dispatch(&section.fields, FieldEvent::change(key, value)));
}

fn blur(screen: &dyn Screen, key: &str) {
    let sections = screen.sections();
    let section = sections
        .iter()
        .find(|section| section.fields.get(key).is_some())
        .expect("field exists");
    let value = section.fields.get(key).expect("field").value.clone();
    dispatch(&section.fields, FieldEvent::blur(key, value));
}

#[test]
fn every_screen_id_resolves() {
    for id in SCREEN_IDS {
        let screen = screen_by_id(id, None, None).expect("known screen");
        assert_eq!(screen.id(), *id);
        assert!(!screen.sections().is_empty());
    }
    assert!(matches!(
        screen_by_id("nope", None, None),
        Err(FormError::UnknownScreen(_))
    ));
}

#[test]
fn empty_registration_flags_required_fields() {
    let screen = RegistrationScreen::new();
    let err = screen.submit().expect_err("incomplete form");
    assert_eq!(err, FormError::Invalid { count: 4 });
    let errors = screen.errors();
    for key in ["name", "email", "password", "confirmPassword"] {
        assert!(errors.contains(key), "{key} should be flagged");
    }
    assert!(!errors.contains("phone"));
}

#[test]
fn registration_detects_password_mismatch_on_blur() {
    let screen = RegistrationScreen::new();
    change(&screen, "password", json!("Secret123"));
    change(&screen, "confirmPassword", json!("Secret124"));
    blur(&screen, "confirmPassword");
    assert_eq!(
        screen.errors().get("confirmPassword").and_then(|err| err.message()),
        Some("Passwords do not match")
    );
}

#[test]
fn registration_builds_payload() {
    let screen = RegistrationScreen::new();
    change(&screen, "name", json!(" Asha Rao "));
    change(&screen, "email", json!("asha@firm.in"));
    change(&screen, "password", json!("Secret123"));
    change(&screen, "confirmPassword", json!("Secret123"));
    let request = screen.submit().expect("valid form");
    assert_eq!(request.endpoint, Endpoint::RegisterUser);
    assert_eq!(
        request.body,
        json!({"name": "Asha Rao", "email": "asha@firm.in", "password": "Secret123"})
    );
}

#[test]
fn fixing_password_clears_stale_mismatch() {
    let screen = RegistrationScreen::new();
    change(&screen, "name", json!("Asha Rao"));
    change(&screen, "email", json!("asha@firm.in"));
    change(&screen, "password", json!("Secret12"));
    change(&screen, "confirmPassword", json!("Secret13"));
    blur(&screen, "confirmPassword");
    assert!(screen.errors().contains("confirmPassword"));

    change(&screen, "password", json!("Secret13"));
    assert!(!screen.errors().contains("confirmPassword"));
    let request = screen.submit().expect("passwords match again");
    assert_eq!(request.body.pointer("/password"), Some(&json!("Secret13")));
}

#[test]
fn customer_state_options_follow_country() {
    let screen = CustomerScreen::new();
    let options = RenderOptions::default();
    let state_options = |screen: &CustomerScreen| {
        let sections = screen.sections();
        let form = render(&sections[1].fields, &screen.errors(), &options);
        form.element("state").expect("state element").options().len()
    };
    assert_eq!(state_options(&screen), 0);
    change(&screen, "country", json!("AU"));
    assert_eq!(state_options(&screen), 3);
}

#[test]
fn changing_country_resets_state() {
    let screen = CustomerScreen::new();
    change(&screen, "country", json!("IN"));
    change(&screen, "state", json!("Gujarat"));
    change(&screen, "country", json!("US"));
    assert_eq!(screen.model().billing_info.state, "");
    assert_eq!(screen.model().billing_info.country, "US");
}

#[test]
fn customer_model_takes_null_and_numeric_edits() {
    let screen = CustomerScreen::new();
    change(&screen, "name", json!("Ada"));
    change(&screen, "name", json!(null));
    assert_eq!(screen.model().customer_basic_info.name, "");
    assert_eq!(screen.state().pointer("/customerBasicInfo/name"), Some(&json!("")));
    assert!(screen.errors().contains("name"));

    change(&screen, "zipCode", json!(560001));
    assert_eq!(screen.model().billing_info.zip_code, "560001");
    assert!(!screen.errors().contains("zipCode"));
}

#[test]
fn customer_submit_sends_nested_model() {
    let screen = CustomerScreen::with_state(Some(json!({
        "customerBasicInfo": {"name": "Acme", "email": "ap@acme.com"},
        "billingInfo": {"address": "1 Main St", "country": "US", "state": "Texas"}
    })))
    .expect("valid seed");
    let request = screen.submit().expect("valid form");
    assert_eq!(request.method, Method::Post);
    assert_eq!(
        request.body.pointer("/billingInfo/state"),
        Some(&json!("Texas"))
    );
}

#[test]
fn customer_rejects_state_from_other_country() {
    let screen = CustomerScreen::with_state(Some(json!({
        "customerBasicInfo": {"name": "Acme", "email": "ap@acme.com"},
        "billingInfo": {"address": "1 Main St", "country": "US", "state": "Gujarat"}
    })))
    .expect("valid seed");
    assert!(screen.submit().is_err());
    assert!(screen.errors().contains("state"));
}

#[test]
fn business_tax_number_follows_type() {
    let screen = BusinessScreen::with_state(None, Some("u-1".into()));
    let gst = |screen: &BusinessScreen| {
        screen.sections()[0]
            .fields
            .get("gstNumber")
            .map(|field| (field.is_required, field.is_disabled))
            .expect("gst field")
    };
    assert_eq!(gst(&screen), (false, true));
    change(&screen, "businessType", json!("registered"));
    assert_eq!(gst(&screen), (true, false));
    change(&screen, "gstNumber", json!("22AAAAA0000A1Z5"));
    change(&screen, "businessType", json!("individual"));
    assert_eq!(screen.state().get("gstNumber"), Some(&json!("")));
}

#[test]
fn business_payload_carries_user_id() {
    let screen = BusinessScreen::with_state(
        Some(json!({
            "businessName": "Acme",
            "businessType": "individual",
            "currency": "INR",
            "email": "hi@acme.in"
        })),
        Some("u-1".into()),
    );
    let request = screen.submit().expect("valid form");
    assert_eq!(request.method, Method::Put);
    assert_eq!(request.body.get("userId"), Some(&json!("u-1")));
    assert_eq!(request.body.get("businessName"), Some(&json!("Acme")));
}

#[test]
fn invoice_total_includes_tax() {
    let screen = InvoiceItemScreen::with_state(None);
    change(&screen, "itemName", json!("Widget"));
    change(&screen, "quantity", json!("3"));
    change(&screen, "rate", json!("10"));
    change(&screen, "taxRate", json!(18));
    assert_eq!(screen.line_total(), Some(35.4));
    let request = screen.submit().expect("valid form");
    assert_eq!(request.body.get("amount"), Some(&json!(35.4)));
    assert_eq!(request.body.get("unit"), Some(&json!("pcs")));
}

#[test]
fn invoice_rejects_negative_quantity() {
    let screen = InvoiceItemScreen::with_state(Some(json!({
        "itemName": "Widget",
        "quantity": "-2",
        "rate": "10"
    })));
    assert!(screen.submit().is_err());
    assert!(screen.errors().contains("quantity"));
}
