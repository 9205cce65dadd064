use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use tokio::sync::mpsc;
use triagex::{
    analysis::{
        AnalysisError, AnalysisErrorKind, AnalysisPort, TriageLevel, TriageResult,
        error::transport_error,
    },
    intake::{
        ConsentGate, FieldInfo, InputPayload, IntakeField, IntakeWizard, ProgressSequence,
        ResultsEntry, SubmitOutcome, WizardStep, wizard::PAYLOAD_STORAGE_KEY,
    },
    routes::Route,
    storage::{KeyValueStore, MemoryStore},
};

struct CountingPort {
    calls: AtomicUsize,
    result: Result<TriageResult, AnalysisError>,
}

impl CountingPort {
    fn answering(result: Result<TriageResult, AnalysisError>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            result,
        }
    }
}

#[async_trait]
impl AnalysisPort for CountingPort {
    async fn analyze(&self, _payload: &InputPayload) -> Result<TriageResult, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }

    async fn field_info(&self, field: IntakeField) -> Result<FieldInfo, AnalysisError> {
        Ok(FieldInfo::local(field))
    }
}

fn self_care() -> TriageResult {
    TriageResult {
        level: TriageLevel::SelfCare,
        confidence: 0.72,
        message: "Rest and fluids.".to_string(),
        recommendations: vec!["Drink water".to_string()],
        safety_note: "Call a doctor if it persists.".to_string(),
    }
}

fn consented_wizard(session: Arc<MemoryStore>) -> IntakeWizard {
    let gate = ConsentGate::new(Arc::new(MemoryStore::new()));
    gate.save_consent().expect("consent should be saved");
    IntakeWizard::new(session, gate)
}

fn quick_sequence() -> ProgressSequence {
    ProgressSequence::new(Duration::from_millis(10), Duration::from_millis(200))
}

#[test]
fn step_ordinals_read_as_step_n_of_three() {
    assert_eq!(WizardStep::COUNT, 3);
    assert_eq!(WizardStep::Input.ordinal(), 1);
    assert_eq!(WizardStep::Processing.ordinal(), 2);
    assert_eq!(WizardStep::Results.ordinal(), 3);
    assert_eq!(WizardStep::Processing.route(), Route::Processing);
}

#[test]
fn accepted_submission_stores_payload_and_moves_to_processing() {
    let session = Arc::new(MemoryStore::new());
    let mut wizard = consented_wizard(session.clone());
    wizard.form_mut().change(IntakeField::Symptom, "sore throat");
    wizard.form_mut().change(IntakeField::Spo2, "98");

    let outcome = wizard.submit().expect("submit should not fail");

    assert_eq!(outcome, SubmitOutcome::Accepted);
    assert_eq!(wizard.step(), WizardStep::Processing);
    let stored = session
        .get(PAYLOAD_STORAGE_KEY)
        .expect("session readable")
        .expect("payload should be stored");
    let payload: InputPayload = serde_json::from_str(&stored).expect("payload should decode");
    assert_eq!(payload.symptom, "sore throat");
    assert_eq!(payload.spo2, Some(98));
}

#[test]
fn going_back_from_processing_keeps_entered_values() {
    let mut wizard = consented_wizard(Arc::new(MemoryStore::new()));
    wizard.form_mut().change(IntakeField::Symptom, "cough");
    wizard.form_mut().change(IntakeField::BloodPressure, "120/80");
    assert_eq!(wizard.submit().expect("submit"), SubmitOutcome::Accepted);
    assert_eq!(wizard.step(), WizardStep::Processing);

    wizard.back();

    assert_eq!(wizard.step(), WizardStep::Input);
    assert_eq!(wizard.form().value(IntakeField::Symptom), "cough");
    assert_eq!(wizard.form().value(IntakeField::BloodPressure), "120/80");
    assert!(!wizard.form().has_errors());
}

#[test]
fn invalid_submission_stays_on_input_with_nothing_stored() {
    let session = Arc::new(MemoryStore::new());
    let mut wizard = consented_wizard(session.clone());
    wizard.form_mut().change(IntakeField::HeartRate, "250");

    let outcome = wizard.submit().expect("submit should not fail");

    assert_eq!(outcome, SubmitOutcome::Invalid);
    assert_eq!(wizard.step(), WizardStep::Input);
    assert!(session.is_empty());
    assert_eq!(wizard.form().errors().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn results_without_payload_redirect_to_input_without_calling_service() {
    let mut wizard = consented_wizard(Arc::new(MemoryStore::new()));
    let port = CountingPort::answering(Ok(self_care()));

    let entry = wizard
        .process(&port, &quick_sequence(), None)
        .await
        .expect("process should not fail");

    assert_eq!(entry, ResultsEntry::RedirectedTo(Route::Input));
    assert_eq!(wizard.step(), WizardStep::Input);
    assert_eq!(port.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn successful_analysis_renders_service_result_and_clears_payload() {
    let session = Arc::new(MemoryStore::new());
    let mut wizard = consented_wizard(session.clone());
    wizard.form_mut().change(IntakeField::Symptom, "sneezing");
    assert_eq!(wizard.submit().expect("submit"), SubmitOutcome::Accepted);
    let port = CountingPort::answering(Ok(self_care()));
    let (tx, mut rx) = mpsc::unbounded_channel();

    let entry = wizard
        .process(&port, &quick_sequence(), Some(tx))
        .await
        .expect("process should not fail");

    let ResultsEntry::Rendered(outcome) = entry else {
        panic!("expected rendered results, got {entry:?}");
    };
    assert_eq!(outcome.result, self_care());
    assert!(!outcome.is_fallback());
    assert_eq!(wizard.step(), WizardStep::Results);
    assert_eq!(port.calls.load(Ordering::SeqCst), 1);
    assert!(session.get(PAYLOAD_STORAGE_KEY).expect("readable").is_none());

    let mut last_percent = None;
    while let Some(update) = rx.recv().await {
        last_percent = Some(update.percent);
    }
    assert_eq!(last_percent, Some(100), "progress must finish before results");
}

#[tokio::test(start_paused = true)]
async fn failed_analysis_renders_fallback_result() {
    let mut wizard = consented_wizard(Arc::new(MemoryStore::new()));
    wizard.form_mut().change(IntakeField::Symptom, "dizziness");
    wizard.submit().expect("submit");
    let port = CountingPort::answering(Err(
        AnalysisError::new(AnalysisErrorKind::HttpStatus, "HTTP 500").with_http_status(500),
    ));

    let entry = wizard
        .process(&port, &quick_sequence(), None)
        .await
        .expect("process should not fail");

    let ResultsEntry::Rendered(outcome) = entry else {
        panic!("expected rendered results, got {entry:?}");
    };
    assert_eq!(outcome.result, TriageResult::fallback());
    assert_eq!(outcome.result.level, TriageLevel::PrimaryCare);
    assert_eq!(outcome.result.confidence_percent(), 85);
    assert_eq!(
        outcome.degraded.as_ref().and_then(|err| err.http_status),
        Some(500)
    );
}

#[tokio::test(start_paused = true)]
async fn results_wait_for_progress_even_when_service_answers_instantly() {
    let mut wizard = consented_wizard(Arc::new(MemoryStore::new()));
    wizard.form_mut().change(IntakeField::Symptom, "rash");
    wizard.submit().expect("submit");
    let port = CountingPort::answering(Err(transport_error("refused")));
    let sequence = quick_sequence();

    let started = tokio::time::Instant::now();
    wizard
        .process(&port, &sequence, None)
        .await
        .expect("process should not fail");

    assert!(started.elapsed() >= sequence.total_duration());
}

#[test]
fn corrupt_session_payload_counts_as_absent() {
    let session = Arc::new(MemoryStore::new());
    session
        .set(PAYLOAD_STORAGE_KEY, "{not json")
        .expect("set should succeed");
    let wizard = consented_wizard(session.clone());

    assert!(wizard.stored_payload().expect("readable").is_none());
    assert!(session.get(PAYLOAD_STORAGE_KEY).expect("readable").is_none());
}

#[test]
fn resume_prefills_form_from_stored_payload() {
    let session = Arc::new(MemoryStore::new());
    let mut payload = InputPayload::new("back pain");
    payload.temperature = Some(37.2);
    session
        .set(
            PAYLOAD_STORAGE_KEY,
            &serde_json::to_string(&payload).expect("payload should encode"),
        )
        .expect("set should succeed");

    let gate = ConsentGate::new(Arc::new(MemoryStore::new()));
    let wizard = IntakeWizard::resume(session, gate).expect("resume should succeed");

    assert_eq!(wizard.form().value(IntakeField::Symptom), "back pain");
    assert_eq!(wizard.form().value(IntakeField::Temperature), "37.2");
}

#[test]
fn restart_clears_form_and_session() {
    let session = Arc::new(MemoryStore::new());
    let mut wizard = consented_wizard(session.clone());
    wizard.form_mut().change(IntakeField::Symptom, "nausea");
    wizard.submit().expect("submit");

    wizard.restart().expect("restart should succeed");

    assert_eq!(wizard.step(), WizardStep::Input);
    assert_eq!(wizard.form().value(IntakeField::Symptom), "");
    assert!(session.is_empty());
}
