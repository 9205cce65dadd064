use serde::{Deserialize, Serialize};

use crate::intake::{
    fields::{FormField, IntakeField},
    form::FormState,
    validation,
};

/// Validated assessment request carried from the Input step to Results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputPayload {
    pub symptom: String,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub heart_rate: Option<u16>,
    #[serde(default)]
    pub spo2: Option<u8>,
    #[serde(default)]
    pub blood_pressure: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

impl InputPayload {
    pub fn new(symptom: impl Into<String>) -> Self {
        Self {
            symptom: symptom.into(),
            temperature: None,
            heart_rate: None,
            spo2: None,
            blood_pressure: None,
            duration: None,
        }
    }

    /// Builds the payload from the form's current values. Returns `None`
    /// unless every rule passes; the form's error map is left untouched.
    pub fn from_form(form: &FormState<IntakeField>) -> Option<Self> {
        let all_valid = IntakeField::ALL
            .into_iter()
            .all(|field| field.validate(form.value(field)).is_ok());
        if !all_valid {
            return None;
        }

        let symptom = validation::present(form.value(IntakeField::Symptom))?;
        Some(Self {
            symptom: symptom.to_string(),
            temperature: validation::parse_temperature(form.value(IntakeField::Temperature)),
            heart_rate: validation::parse_whole_number(form.value(IntakeField::HeartRate))
                .and_then(|value| u16::try_from(value).ok()),
            spo2: validation::parse_whole_number(form.value(IntakeField::Spo2))
                .and_then(|value| u8::try_from(value).ok()),
            blood_pressure: validation::present(form.value(IntakeField::BloodPressure))
                .map(str::to_string),
            duration: validation::present(form.value(IntakeField::Duration)).map(str::to_string),
        })
    }

    /// Field values for re-populating the intake form.
    pub fn to_form_values(&self) -> Vec<(IntakeField, String)> {
        let mut values = vec![(IntakeField::Symptom, self.symptom.clone())];
        if let Some(temperature) = self.temperature {
            values.push((IntakeField::Temperature, temperature.to_string()));
        }
        if let Some(heart_rate) = self.heart_rate {
            values.push((IntakeField::HeartRate, heart_rate.to_string()));
        }
        if let Some(spo2) = self.spo2 {
            values.push((IntakeField::Spo2, spo2.to_string()));
        }
        if let Some(blood_pressure) = &self.blood_pressure {
            values.push((IntakeField::BloodPressure, blood_pressure.clone()));
        }
        if let Some(duration) = &self.duration {
            values.push((IntakeField::Duration, duration.clone()));
        }
        values
    }
}
