pub mod consent;
pub mod contact;
pub mod fields;
pub mod form;
pub mod info;
pub mod payload;
pub mod progress;
pub mod validation;
pub mod wizard;

pub use consent::{ConsentDecision, ConsentGate, ConsentPrompt};
pub use contact::{
    ContactForm, ContactFormData, ContactOutcome, ContactSubmitError, ContactSubmitter,
    ContactTopic, LoggingContactSubmitter,
};
pub use fields::{ContactField, FormField, IntakeField};
pub use form::FormState;
pub use info::FieldInfo;
pub use payload::InputPayload;
pub use progress::{ProgressSequence, ProgressUpdate};
pub use wizard::{IntakeWizard, ResultsEntry, SubmitOutcome, WizardStep};
