use std::sync::Arc;

use async_trait::async_trait;
use triagex::{
    intake::{ConsentDecision, ConsentGate, ConsentPrompt, IntakeWizard, SubmitOutcome},
    routes::Route,
    storage::{FileStore, MemoryStore},
};
use uuid::Uuid;

struct ScriptedPrompt {
    decision: ConsentDecision,
    shown: usize,
}

impl ScriptedPrompt {
    fn new(decision: ConsentDecision) -> Self {
        Self { decision, shown: 0 }
    }
}

#[async_trait]
impl ConsentPrompt for ScriptedPrompt {
    async fn acknowledge(&mut self) -> ConsentDecision {
        self.shown += 1;
        self.decision
    }
}

#[tokio::test]
async fn accepted_consent_persists_across_store_reopen() {
    let dir = std::env::temp_dir().join(format!("triagex-consent-test-{}", Uuid::now_v7()));
    let path = dir.join("client-storage.json");

    let gate = ConsentGate::new(Arc::new(FileStore::open(&path).expect("store should open")));
    let mut prompt = ScriptedPrompt::new(ConsentDecision::Accept);
    let route = gate
        .require_consent_then_navigate(Route::Input, &mut prompt)
        .await
        .expect("consent should be saved");
    assert_eq!(route, Route::Input);
    assert_eq!(prompt.shown, 1);

    let reopened =
        ConsentGate::new(Arc::new(FileStore::open(&path).expect("store should reopen")));
    assert!(reopened.has_consent().expect("consent should be readable"));

    let mut untouched = ScriptedPrompt::new(ConsentDecision::Decline);
    let route = reopened
        .require_consent_then_navigate(Route::Input, &mut untouched)
        .await
        .expect("navigation should succeed");
    assert_eq!(route, Route::Input);
    assert_eq!(untouched.shown, 0, "prompt must not be shown again");

    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_dir(&dir);
}

#[tokio::test]
async fn declined_consent_routes_home_and_saves_nothing() {
    let gate = ConsentGate::new(Arc::new(MemoryStore::new()));
    let mut prompt = ScriptedPrompt::new(ConsentDecision::Decline);

    let route = gate
        .require_consent_then_navigate(Route::Input, &mut prompt)
        .await
        .expect("navigation should succeed");

    assert_eq!(route, Route::Home);
    assert!(!gate.has_consent().expect("consent should be readable"));

    let route = gate
        .require_consent_then_navigate(Route::Input, &mut prompt)
        .await
        .expect("navigation should succeed");
    assert_eq!(route, Route::Home);
    assert_eq!(prompt.shown, 2, "prompt is shown on every attempt until accepted");
}

#[tokio::test]
async fn intake_submission_is_refused_without_consent() {
    let mut wizard = IntakeWizard::new(
        Arc::new(MemoryStore::new()),
        ConsentGate::new(Arc::new(MemoryStore::new())),
    );
    wizard
        .form_mut()
        .change(triagex::intake::IntakeField::Symptom, "cough");

    let outcome = wizard.submit().expect("submit should not fail");
    assert_eq!(outcome, SubmitOutcome::ConsentRequired);
    assert!(wizard.stored_payload().expect("session readable").is_none());
}
