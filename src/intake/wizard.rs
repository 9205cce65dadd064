use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    analysis::{AnalysisOutcome, AnalysisPort, analyze_with_fallback},
    intake::{
        consent::{ConsentGate, ConsentPrompt},
        fields::IntakeField,
        form::FormState,
        payload::InputPayload,
        progress::{ProgressSequence, ProgressUpdate},
    },
    routes::Route,
    storage::{KeyValueStore, StorageError, error::serialization_error},
};

pub const PAYLOAD_STORAGE_KEY: &str = "triagex-intake-payload";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    Input,
    Processing,
    Results,
}

impl WizardStep {
    pub const COUNT: u8 = 3;

    /// 1-based position, as in "Step 2 of 3".
    pub fn ordinal(self) -> u8 {
        match self {
            WizardStep::Input => 1,
            WizardStep::Processing => 2,
            WizardStep::Results => 3,
        }
    }

    pub fn route(self) -> Route {
        match self {
            WizardStep::Input => Route::Input,
            WizardStep::Processing => Route::Processing,
            WizardStep::Results => Route::Results,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    /// Inline errors are available on the form.
    Invalid,
    ConsentRequired,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultsEntry {
    Rendered(AnalysisOutcome),
    RedirectedTo(Route),
}

/// Input → Processing → Results.
///
/// The validated payload crosses the Input/Results boundary only through the
/// session store; Results is never produced without it.
pub struct IntakeWizard {
    step: WizardStep,
    form: FormState<IntakeField>,
    session: Arc<dyn KeyValueStore>,
    consent: ConsentGate,
    outcome: Option<AnalysisOutcome>,
}

impl IntakeWizard {
    pub fn new(session: Arc<dyn KeyValueStore>, consent: ConsentGate) -> Self {
        Self {
            step: WizardStep::Input,
            form: FormState::new(),
            session,
            consent,
            outcome: None,
        }
    }

    /// Like [`IntakeWizard::new`], but pre-fills the form from a payload left
    /// in the session store.
    pub fn resume(
        session: Arc<dyn KeyValueStore>,
        consent: ConsentGate,
    ) -> Result<Self, StorageError> {
        let mut wizard = Self::new(session, consent);
        if let Some(payload) = wizard.stored_payload()? {
            wizard.form = FormState::with_values(payload.to_form_values());
        }
        Ok(wizard)
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn form(&self) -> &FormState<IntakeField> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState<IntakeField> {
        &mut self.form
    }

    pub fn consent(&self) -> &ConsentGate {
        &self.consent
    }

    pub fn outcome(&self) -> Option<&AnalysisOutcome> {
        self.outcome.as_ref()
    }

    /// Entry to the Input step. Returns where the user ends up: the input
    /// route, or home when consent is declined.
    pub async fn enter_input(
        &mut self,
        prompt: &mut dyn ConsentPrompt,
    ) -> Result<Route, StorageError> {
        let route = self
            .consent
            .require_consent_then_navigate(Route::Input, prompt)
            .await?;
        if route == Route::Input {
            self.step = WizardStep::Input;
        }
        Ok(route)
    }

    /// Input → Processing. Validates the form and stores the payload.
    pub fn submit(&mut self) -> Result<SubmitOutcome, StorageError> {
        if !self.consent.has_consent()? {
            return Ok(SubmitOutcome::ConsentRequired);
        }
        if !self.form.validate_all() {
            tracing::debug!(
                target: "wizard",
                errors = self.form.errors().len(),
                "intake_form_rejected"
            );
            return Ok(SubmitOutcome::Invalid);
        }
        let Some(payload) = InputPayload::from_form(&self.form) else {
            return Ok(SubmitOutcome::Invalid);
        };

        let encoded = serde_json::to_string(&payload)
            .map_err(|err| serialization_error(format!("failed to encode intake payload: {err}")))?;
        self.session.set(PAYLOAD_STORAGE_KEY, &encoded)?;
        self.outcome = None;
        self.step = WizardStep::Processing;
        tracing::info!(
            target: "wizard",
            has_temperature = payload.temperature.is_some(),
            has_heart_rate = payload.heart_rate.is_some(),
            has_spo2 = payload.spo2.is_some(),
            has_blood_pressure = payload.blood_pressure.is_some(),
            "intake_payload_stored"
        );

        Ok(SubmitOutcome::Accepted)
    }

    /// Processing → Results. Runs the progress sequence and the analysis
    /// call together and waits for both. Without a stored payload the user
    /// is sent back to Input instead.
    pub async fn process(
        &mut self,
        port: &dyn AnalysisPort,
        sequence: &ProgressSequence,
        updates: Option<mpsc::UnboundedSender<ProgressUpdate>>,
    ) -> Result<ResultsEntry, StorageError> {
        let Some(payload) = self.stored_payload()? else {
            self.step = WizardStep::Input;
            self.outcome = None;
            tracing::info!(target: "wizard", "results_without_payload_redirected");
            return Ok(ResultsEntry::RedirectedTo(Route::Input));
        };

        self.step = WizardStep::Processing;
        let (_, outcome) = tokio::join!(
            sequence.run(updates.as_ref()),
            analyze_with_fallback(port, &payload)
        );
        drop(updates);

        self.session.clear(PAYLOAD_STORAGE_KEY)?;
        self.step = WizardStep::Results;
        self.outcome = Some(outcome.clone());
        tracing::info!(
            target: "wizard",
            level = %outcome.result.level,
            fallback = outcome.is_fallback(),
            "results_rendered"
        );

        Ok(ResultsEntry::Rendered(outcome))
    }

    /// Back to Input with the entered values intact.
    pub fn back(&mut self) {
        self.step = WizardStep::Input;
    }

    /// Back to an empty Input step, dropping any stored payload.
    pub fn restart(&mut self) -> Result<(), StorageError> {
        self.session.clear(PAYLOAD_STORAGE_KEY)?;
        self.form.reset();
        self.outcome = None;
        self.step = WizardStep::Input;
        Ok(())
    }

    /// An unreadable entry counts as absent and is removed.
    pub fn stored_payload(&self) -> Result<Option<InputPayload>, StorageError> {
        let Some(encoded) = self.session.get(PAYLOAD_STORAGE_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str::<InputPayload>(&encoded) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) => {
                tracing::warn!(
                    target: "wizard",
                    error = %err,
                    "stored_intake_payload_discarded"
                );
                self.session.clear(PAYLOAD_STORAGE_KEY)?;
                Ok(None)
            }
        }
    }
}
