use std::fmt;

use crate::intake::validation;

/// A field of a form driven by [`FormState`](crate::intake::form::FormState).
pub trait FormField: Copy + Ord + fmt::Debug + Send + Sync + 'static {
    fn all() -> &'static [Self];

    /// Wire/storage key of the field.
    fn key(self) -> &'static str;

    fn is_required(self) -> bool;

    fn validate(self, raw: &str) -> Result<(), &'static str>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IntakeField {
    Symptom,
    Temperature,
    HeartRate,
    Spo2,
    BloodPressure,
    Duration,
}

impl IntakeField {
    pub const ALL: [IntakeField; 6] = [
        IntakeField::Symptom,
        IntakeField::Temperature,
        IntakeField::HeartRate,
        IntakeField::Spo2,
        IntakeField::BloodPressure,
        IntakeField::Duration,
    ];

    pub fn label(self) -> &'static str {
        match self {
            IntakeField::Symptom => "Main symptom",
            IntakeField::Temperature => "Temperature (°C)",
            IntakeField::HeartRate => "Heart rate (bpm)",
            IntakeField::Spo2 => "SpO₂ (%)",
            IntakeField::BloodPressure => "Blood pressure (e.g. 120/80)",
            IntakeField::Duration => "Duration",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }
}

impl FormField for IntakeField {
    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn key(self) -> &'static str {
        match self {
            IntakeField::Symptom => "symptom",
            IntakeField::Temperature => "temperature",
            IntakeField::HeartRate => "heart_rate",
            IntakeField::Spo2 => "spo2",
            IntakeField::BloodPressure => "blood_pressure",
            IntakeField::Duration => "duration",
        }
    }

    fn is_required(self) -> bool {
        matches!(self, IntakeField::Symptom)
    }

    fn validate(self, raw: &str) -> Result<(), &'static str> {
        match self {
            IntakeField::Symptom => validation::validate_symptom(raw),
            IntakeField::Temperature => validation::validate_temperature(raw),
            IntakeField::HeartRate => validation::validate_heart_rate(raw),
            IntakeField::Spo2 => validation::validate_spo2(raw),
            IntakeField::BloodPressure => validation::validate_blood_pressure(raw),
            IntakeField::Duration => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactField {
    FullName,
    WorkEmail,
    Organization,
    PrimaryTopic,
    Message,
}

impl ContactField {
    pub const ALL: [ContactField; 5] = [
        ContactField::FullName,
        ContactField::WorkEmail,
        ContactField::Organization,
        ContactField::PrimaryTopic,
        ContactField::Message,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ContactField::FullName => "Full name",
            ContactField::WorkEmail => "Work email",
            ContactField::Organization => "Organization",
            ContactField::PrimaryTopic => "Primary topic",
            ContactField::Message => "Message",
        }
    }
}

impl FormField for ContactField {
    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn key(self) -> &'static str {
        match self {
            ContactField::FullName => "fullName",
            ContactField::WorkEmail => "workEmail",
            ContactField::Organization => "organization",
            ContactField::PrimaryTopic => "primaryTopic",
            ContactField::Message => "message",
        }
    }

    fn is_required(self) -> bool {
        true
    }

    fn validate(self, raw: &str) -> Result<(), &'static str> {
        match self {
            ContactField::FullName => validation::validate_full_name(raw),
            ContactField::WorkEmail => validation::validate_work_email(raw),
            ContactField::Organization => validation::validate_organization(raw),
            ContactField::PrimaryTopic => validation::validate_primary_topic(raw),
            ContactField::Message => validation::validate_message(raw),
        }
    }
}
