use triagex::intake::{
    FormState, IntakeField, InputPayload,
    validation::{SYMPTOM_REQUIRED, TEMPERATURE_OUT_OF_RANGE},
};

#[test]
fn valid_vitals_build_a_payload() {
    let mut form = FormState::<IntakeField>::new();
    form.change(IntakeField::Symptom, "chest pain");
    form.change(IntakeField::Temperature, "38.5");
    form.change(IntakeField::HeartRate, "110");
    form.change(IntakeField::Spo2, "93");
    form.change(IntakeField::BloodPressure, "140/90");

    assert!(form.validate_all());
    assert!(!form.has_errors());

    let payload = InputPayload::from_form(&form).expect("valid form should produce payload");
    assert_eq!(payload.symptom, "chest pain");
    assert_eq!(payload.temperature, Some(38.5));
    assert_eq!(payload.heart_rate, Some(110));
    assert_eq!(payload.spo2, Some(93));
    assert_eq!(payload.blood_pressure.as_deref(), Some("140/90"));
    assert_eq!(payload.duration, None);
}

#[test]
fn symptom_only_is_enough() {
    let mut form = FormState::<IntakeField>::new();
    form.change(IntakeField::Symptom, "headache");

    assert!(form.validate_all());
    let payload = InputPayload::from_form(&form).expect("payload should build");
    assert_eq!(payload, InputPayload::new("headache"));
}

#[test]
fn out_of_range_temperature_blocks_submission_with_inline_error() {
    let mut form = FormState::<IntakeField>::new();
    form.change(IntakeField::Symptom, "fever");
    form.change(IntakeField::Temperature, "50");

    assert!(!form.validate_all());
    assert_eq!(
        form.error(IntakeField::Temperature),
        Some(TEMPERATURE_OUT_OF_RANGE)
    );
    assert_eq!(form.errors().len(), 1);
}

#[test]
fn blank_symptom_with_valid_vitals_is_rejected() {
    let mut form = FormState::<IntakeField>::new();
    form.change(IntakeField::Temperature, "37.0");
    form.change(IntakeField::HeartRate, "80");

    assert!(!form.validate_all());
    assert_eq!(form.error(IntakeField::Symptom), Some(SYMPTOM_REQUIRED));
    assert!(InputPayload::from_form(&form).is_none());
}

#[test]
fn editing_a_field_clears_only_its_own_error() {
    let mut form = FormState::<IntakeField>::new();
    form.change(IntakeField::Temperature, "50");
    form.change(IntakeField::Spo2, "10");
    assert!(!form.validate_all());
    assert_eq!(form.errors().len(), 3);

    form.change(IntakeField::Temperature, "5");

    assert_eq!(form.error(IntakeField::Temperature), None);
    assert_eq!(form.error(IntakeField::Symptom), Some(SYMPTOM_REQUIRED));
    assert!(form.error(IntakeField::Spo2).is_some());
}

#[test]
fn reset_clears_values_and_errors() {
    let mut form = FormState::<IntakeField>::new();
    form.change(IntakeField::Temperature, "50");
    form.validate_all();

    form.reset();

    assert_eq!(form.value(IntakeField::Temperature), "");
    assert!(!form.has_errors());
}

#[test]
fn values_list_every_field_in_order_with_blanks() {
    let mut form = FormState::<IntakeField>::new();
    form.change(IntakeField::Spo2, "97");

    let values: Vec<(IntakeField, &str)> = form.values().collect();

    assert_eq!(values.len(), IntakeField::ALL.len());
    assert_eq!(values[0], (IntakeField::Symptom, ""));
    assert_eq!(values[3], (IntakeField::Spo2, "97"));
}

#[test]
fn field_keys_round_trip_through_lookup() {
    for field in IntakeField::ALL {
        assert_eq!(IntakeField::from_key(triagex::intake::FormField::key(field)), Some(field));
    }
    assert_eq!(IntakeField::from_key("pulse"), None);
}
