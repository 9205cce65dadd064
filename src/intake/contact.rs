use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    intake::{fields::ContactField, form::FormState},
    routes::Route,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContactTopic {
    ClinicalPilot,
    ProductIntegration,
    Compliance,
    Partnership,
    Other,
}

impl ContactTopic {
    pub const ALL: [ContactTopic; 5] = [
        ContactTopic::ClinicalPilot,
        ContactTopic::ProductIntegration,
        ContactTopic::Compliance,
        ContactTopic::Partnership,
        ContactTopic::Other,
    ];

    pub fn value(self) -> &'static str {
        match self {
            ContactTopic::ClinicalPilot => "clinical-pilot",
            ContactTopic::ProductIntegration => "product-integration",
            ContactTopic::Compliance => "compliance",
            ContactTopic::Partnership => "partnership",
            ContactTopic::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContactTopic::ClinicalPilot => "Clinical Pilot",
            ContactTopic::ProductIntegration => "Product Integration",
            ContactTopic::Compliance => "Compliance & Regulations",
            ContactTopic::Partnership => "Partnership Opportunities",
            ContactTopic::Other => "Other",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.into_iter().find(|topic| topic.value() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFormData {
    pub full_name: String,
    pub work_email: String,
    pub organization: String,
    pub primary_topic: ContactTopic,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmitError {
    pub message: String,
}

impl ContactSubmitError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ContactSubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ContactSubmitError {}

/// Delivers a validated contact request. No delivery backend exists yet;
/// callers supply one.
#[async_trait]
pub trait ContactSubmitter: Send + Sync {
    async fn submit(&self, data: &ContactFormData) -> Result<(), ContactSubmitError>;
}

/// Records the request in the log and reports success.
#[derive(Default)]
pub struct LoggingContactSubmitter;

#[async_trait]
impl ContactSubmitter for LoggingContactSubmitter {
    async fn submit(&self, data: &ContactFormData) -> Result<(), ContactSubmitError> {
        tracing::info!(
            target: "contact",
            organization = %data.organization,
            topic = data.primary_topic.value(),
            message_len = data.message.chars().count(),
            "contact_form_submitted"
        );
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactOutcome {
    Invalid,
    Submitted { redirect: Route },
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    state: FormState<ContactField>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FormState<ContactField> {
        &self.state
    }

    pub fn change(&mut self, field: ContactField, value: impl Into<String>) {
        self.state.change(field, value);
    }

    /// Validates and hands the data to `submitter`. After a successful
    /// submission the user is sent on to the results route.
    pub async fn submit(
        &mut self,
        submitter: &dyn ContactSubmitter,
    ) -> Result<ContactOutcome, ContactSubmitError> {
        if !self.state.validate_all() {
            tracing::debug!(
                target: "contact",
                errors = self.state.errors().len(),
                "contact_form_rejected"
            );
            return Ok(ContactOutcome::Invalid);
        }

        let Some(data) = self.data() else {
            return Ok(ContactOutcome::Invalid);
        };
        submitter.submit(&data).await?;

        Ok(ContactOutcome::Submitted {
            redirect: Route::Results,
        })
    }

    fn data(&self) -> Option<ContactFormData> {
        let value = |field: ContactField| self.state.value(field).trim().to_string();
        Some(ContactFormData {
            full_name: value(ContactField::FullName),
            work_email: value(ContactField::WorkEmail),
            organization: value(ContactField::Organization),
            primary_topic: ContactTopic::from_value(
                self.state.value(ContactField::PrimaryTopic),
            )?,
            message: value(ContactField::Message),
        })
    }
}
