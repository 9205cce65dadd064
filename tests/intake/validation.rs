use triagex::intake::{
    FormField, IntakeField,
    validation::{
        BLOOD_PRESSURE_FORMAT, HEART_RATE_OUT_OF_RANGE, SPO2_OUT_OF_RANGE, SYMPTOM_REQUIRED,
        TEMPERATURE_OUT_OF_RANGE, validate_blood_pressure, validate_heart_rate, validate_spo2,
        validate_temperature,
    },
};

#[test]
fn temperature_accepts_every_tenth_inside_range_and_nothing_outside() {
    for tenths in 300..=500 {
        let value = f64::from(tenths) / 10.0;
        let result = validate_temperature(&format!("{value:.1}"));
        if (35.0..=45.0).contains(&value) {
            assert!(result.is_ok(), "{value} should be accepted");
        } else {
            assert_eq!(result, Err(TEMPERATURE_OUT_OF_RANGE), "{value} should be rejected");
        }
    }
}

#[test]
fn heart_rate_bounds_are_inclusive() {
    for bpm in 0..=300 {
        let result = validate_heart_rate(&bpm.to_string());
        assert_eq!(result.is_ok(), (30..=220).contains(&bpm), "bpm {bpm}");
    }
    assert_eq!(validate_heart_rate("abc"), Err(HEART_RATE_OUT_OF_RANGE));
}

#[test]
fn spo2_bounds_are_inclusive() {
    for percent in 0..=120 {
        let result = validate_spo2(&percent.to_string());
        assert_eq!(result.is_ok(), (70..=100).contains(&percent), "spo2 {percent}");
    }
    assert_eq!(validate_spo2("69"), Err(SPO2_OUT_OF_RANGE));
}

#[test]
fn blood_pressure_requires_two_digit_groups() {
    for accepted in ["120/80", "90/60", " 135/85 ", ""] {
        assert!(validate_blood_pressure(accepted).is_ok(), "{accepted:?}");
    }
    for rejected in ["120", "120/", "/80", "120-80", "120/80/60", "abc/def", "12 0/80"] {
        assert_eq!(
            validate_blood_pressure(rejected),
            Err(BLOOD_PRESSURE_FORMAT),
            "{rejected:?}"
        );
    }
}

#[test]
fn blank_symptom_is_the_only_required_failure() {
    for field in IntakeField::ALL {
        let result = field.validate("   ");
        if field == IntakeField::Symptom {
            assert_eq!(result, Err(SYMPTOM_REQUIRED));
        } else {
            assert!(result.is_ok(), "{field:?} should allow blank input");
        }
    }
}

#[test]
fn duration_accepts_free_text() {
    assert!(IntakeField::Duration.validate("since last tuesday, on and off").is_ok());
}
