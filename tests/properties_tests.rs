use serde_json::json;

use form_continuity::form::properties::{
    self, register_property_types, PropertyTypes,
};
use form_continuity::{Form, IdGenerator, RequestState};

use crate::common::fixtures::cipher;

mod common;

#[test]
fn unregistered_property_names_pass_values_through() {
    assert_eq!(
        properties::expand("#never-registered", &json!({ "raw": 1 })),
        json!({ "raw": 1 }),
        "Unknown names are not an error, the raw value is kept"
    );
    assert!(!properties::is_registered_property("#never-registered"));
}

#[test]
fn registered_constructors_expand_properties_during_build() {
    let mut types = PropertyTypes::new();
    types.define("#autocomplete", |value| json!({ "source": value }));
    assert!(
        register_property_types(types),
        "First installation wins"
    );
    assert!(
        !register_property_types(PropertyTypes::new()),
        "Registration is one-time per process"
    );

    assert!(properties::is_registered_property("#autocomplete"));
    assert!(properties::resolve("#autocomplete").is_some());

    let definition = json!({
        "city": { "#id": "h-city", "#type": "textfield", "#autocomplete": "cities" }
    });
    let form = Form::with_ids(
        &definition,
        &RequestState::first_render(),
        &cipher(),
        IdGenerator::seeded(1),
    )
    .unwrap();

    let city = form.find("h-city").unwrap();
    assert_eq!(
        city.borrow().get_property("#autocomplete"),
        Some(&json!({ "source": "cities" })),
        "Raw property value was expanded through its constructor"
    );
}
