use serde::{Deserialize, Serialize};

use crate::intake::fields::IntakeField;

/// Measurement guidance for one intake field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInfo {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub video_url: Option<String>,
}

impl FieldInfo {
    /// Bundled copy, used when the info endpoint cannot be reached.
    pub fn local(field: IntakeField) -> Self {
        let (title, description) = match field {
            IntakeField::Symptom => (
                "Main Symptom",
                "Describe your primary symptom or concern. Be as specific as possible (e.g., 'chest pain', 'headache for 3 days', 'fever and cough').",
            ),
            IntakeField::Temperature => (
                "Temperature",
                "Measure your body temperature using a thermometer. Normal body temperature is around 36.5-37.5°C. Place the thermometer under your tongue or in your armpit for accurate reading.",
            ),
            IntakeField::HeartRate => (
                "Heart Rate",
                "Find your pulse on your wrist or neck. Count the beats for 30 seconds and multiply by 2, or count for a full minute. Normal resting heart rate is 60-100 bpm.",
            ),
            IntakeField::Spo2 => (
                "SpO₂ (Oxygen Saturation)",
                "Measure your blood oxygen level using a pulse oximeter. Place the device on your finger and wait for a reading. Normal SpO₂ is 95-100%. Values below 90% may indicate a medical emergency.",
            ),
            IntakeField::BloodPressure => (
                "Blood Pressure",
                "Measure your blood pressure using a blood pressure monitor. Normal blood pressure is typically around 120/80 mmHg. Enter in format: systolic/diastolic (e.g., 120/80).",
            ),
            IntakeField::Duration => (
                "Duration",
                "How long have you been experiencing these symptoms? This helps determine the urgency of care needed.",
            ),
        };

        Self {
            title: title.to_string(),
            description: description.to_string(),
            video_url: None,
        }
    }
}
