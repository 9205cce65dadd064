//! Per-field validation rules for the intake and contact forms.
//!
//! Every rule takes the raw text the user typed and either accepts it or
//! returns the inline message to show next to the field. Optional intake
//! fields left blank are always accepted.

use std::{ops::RangeInclusive, sync::LazyLock};

use regex::Regex;

use crate::intake::contact::ContactTopic;

pub const TEMPERATURE_RANGE: RangeInclusive<f64> = 35.0..=45.0;
pub const HEART_RATE_RANGE: RangeInclusive<i64> = 30..=220;
pub const SPO2_RANGE: RangeInclusive<i64> = 70..=100;

pub const SYMPTOM_REQUIRED: &str = "Main symptom is required";
pub const TEMPERATURE_OUT_OF_RANGE: &str = "Temperature must be between 35-45°C";
pub const HEART_RATE_OUT_OF_RANGE: &str = "Heart rate must be between 30-220 bpm";
pub const SPO2_OUT_OF_RANGE: &str = "SpO₂ must be between 70-100";
pub const BLOOD_PRESSURE_FORMAT: &str =
    "Blood pressure must be in format: systolic/diastolic (e.g., 120/80)";

pub const FULL_NAME_REQUIRED: &str = "Full name is required";
pub const WORK_EMAIL_REQUIRED: &str = "Work email is required";
pub const WORK_EMAIL_INVALID: &str = "Please enter a valid email address";
pub const ORGANIZATION_REQUIRED: &str = "Organization is required";
pub const PRIMARY_TOPIC_REQUIRED: &str = "Please select a primary topic";
pub const MESSAGE_REQUIRED: &str = "Message is required";

// ASCII digits only; `\d` would also admit other Unicode digit scripts.
static BLOOD_PRESSURE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+/[0-9]+$").expect("blood pressure pattern is valid"));

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Returns the trimmed value, or `None` when the field was left blank.
pub fn present(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

pub fn parse_temperature(raw: &str) -> Option<f64> {
    present(raw)?.parse::<f64>().ok()
}

/// Whole numbers only. Input with a fraction or trailing text, such as
/// "97.5" or "75 bpm", is rejected instead of being read as its leading
/// integer.
pub fn parse_whole_number(raw: &str) -> Option<i64> {
    present(raw)?.parse::<i64>().ok()
}

pub fn validate_symptom(raw: &str) -> Result<(), &'static str> {
    present(raw).map(|_| ()).ok_or(SYMPTOM_REQUIRED)
}

pub fn validate_temperature(raw: &str) -> Result<(), &'static str> {
    if present(raw).is_none() {
        return Ok(());
    }
    match parse_temperature(raw) {
        Some(value) if TEMPERATURE_RANGE.contains(&value) => Ok(()),
        _ => Err(TEMPERATURE_OUT_OF_RANGE),
    }
}

pub fn validate_heart_rate(raw: &str) -> Result<(), &'static str> {
    validate_whole_number(raw, &HEART_RATE_RANGE, HEART_RATE_OUT_OF_RANGE)
}

pub fn validate_spo2(raw: &str) -> Result<(), &'static str> {
    validate_whole_number(raw, &SPO2_RANGE, SPO2_OUT_OF_RANGE)
}

pub fn validate_blood_pressure(raw: &str) -> Result<(), &'static str> {
    match present(raw) {
        None => Ok(()),
        Some(value) if BLOOD_PRESSURE_PATTERN.is_match(value) => Ok(()),
        Some(_) => Err(BLOOD_PRESSURE_FORMAT),
    }
}

pub fn validate_full_name(raw: &str) -> Result<(), &'static str> {
    present(raw).map(|_| ()).ok_or(FULL_NAME_REQUIRED)
}

pub fn validate_work_email(raw: &str) -> Result<(), &'static str> {
    if present(raw).is_none() {
        return Err(WORK_EMAIL_REQUIRED);
    }
    if EMAIL_PATTERN.is_match(raw) {
        Ok(())
    } else {
        Err(WORK_EMAIL_INVALID)
    }
}

pub fn validate_organization(raw: &str) -> Result<(), &'static str> {
    present(raw).map(|_| ()).ok_or(ORGANIZATION_REQUIRED)
}

pub fn validate_primary_topic(raw: &str) -> Result<(), &'static str> {
    ContactTopic::from_value(raw)
        .map(|_| ())
        .ok_or(PRIMARY_TOPIC_REQUIRED)
}

pub fn validate_message(raw: &str) -> Result<(), &'static str> {
    present(raw).map(|_| ()).ok_or(MESSAGE_REQUIRED)
}

fn validate_whole_number(
    raw: &str,
    range: &RangeInclusive<i64>,
    message: &'static str,
) -> Result<(), &'static str> {
    if present(raw).is_none() {
        return Ok(());
    }
    match parse_whole_number(raw) {
        Some(value) if range.contains(&value) => Ok(()),
        _ => Err(message),
    }
}
