use std::{cell::RefCell, rc::Rc};

use bizform::{
    Binder, FieldDescriptor, FieldEvent, FormFields, RecordingTransport, RenderOptions,
    SelectOption, api::send, dispatch, form::{SharedErrors, SharedState}, render, screen_by_id,
};
use serde_json::json;

#[test]
fn bound_form_round_trips_through_render_and_dispatch() {
    let binder = Binder::new(SharedState::empty_object(), SharedErrors::new());
    let fields = FormFields::new()
        .with(binder.bind(FieldDescriptor::text("name").parent("profile").required(true)))
        .with(binder.bind(
            FieldDescriptor::select("plan")
                .parent("profile")
                .items(vec![SelectOption::same("basic"), SelectOption::same("pro")]),
        ));

    assert!(dispatch(&fields, FieldEvent::change("name", "")));
    let form = render(&fields, &binder.errors(), &RenderOptions::default());
    assert_eq!(form.error_count(), 1);

    assert!(dispatch(&fields, FieldEvent::change("name", "Ada")));
    assert!(dispatch(&fields, FieldEvent::change("plan", "pro")));
    assert_eq!(
        binder.state(),
        json!({"profile": {"name": "Ada", "plan": "pro"}})
    );
    assert!(binder.errors().is_empty());
}

#[test]
fn callbacks_see_values_in_order() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let fields = FormFields::new().with(
        FieldDescriptor::text("q").on_change(move |value| sink.borrow_mut().push(value)),
    );
    for text in ["a", "ab", "abc"] {
        dispatch(&fields, FieldEvent::change("q", text));
    }
    assert_eq!(*seen.borrow(), vec![json!("a"), json!("ab"), json!("abc")]);
}

#[test]
fn submitted_screen_goes_through_transport() {
    let screen = screen_by_id(
        "forgot-password",
        Some(json!({"email": "owner@shop.in"})),
        None,
    )
    .expect("screen");
    let request = screen.submit().expect("valid form");
    let transport = RecordingTransport::default();
    let response = send(&transport, &request).expect("sent");
    assert!(response.success);
    assert_eq!(transport.requests(), vec![request]);
}

#[test]
fn nested_email_field_flags_and_clears() {
    let binder = Binder::new(
        SharedState::new(json!({"customerBasicInfo": {}})),
        SharedErrors::new(),
    );
    let fields = FormFields::new().with(binder.bind_with_rule(
        FieldDescriptor::email("email")
            .parent("customerBasicInfo")
            .required(true),
        bizform::form::validation::validate_email,
    ));

    assert!(dispatch(&fields, FieldEvent::change("email", "a@b.com")));
    dispatch(&fields, FieldEvent::blur("email", "a@b.com"));
    assert_eq!(binder.state(), json!({"customerBasicInfo": {"email": "a@b.com"}}));
    assert!(!binder.errors().contains("email"));

    assert!(dispatch(&fields, FieldEvent::change("email", "")));
    assert_eq!(binder.state(), json!({"customerBasicInfo": {"email": ""}}));
    assert!(binder.errors().contains("email"));
}
