use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    routes::Route,
    storage::{KeyValueStore, StorageError},
};

pub const CONSENT_STORAGE_KEY: &str = "triagex-consent";
const CONSENT_GRANTED: &str = "true";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentDecision {
    Accept,
    Decline,
}

/// Presents the acknowledgment to the user and reports their decision.
#[async_trait]
pub trait ConsentPrompt: Send {
    async fn acknowledge(&mut self) -> ConsentDecision;
}

/// One-time acknowledgment guarding entry to the intake flow.
#[derive(Clone)]
pub struct ConsentGate {
    store: Arc<dyn KeyValueStore>,
}

impl ConsentGate {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn has_consent(&self) -> Result<bool, StorageError> {
        Ok(self.store.get(CONSENT_STORAGE_KEY)?.as_deref() == Some(CONSENT_GRANTED))
    }

    pub fn save_consent(&self) -> Result<(), StorageError> {
        self.store.set(CONSENT_STORAGE_KEY, CONSENT_GRANTED)
    }

    /// Resolves where the user lands: `target` once consent is on record,
    /// otherwise the home page when the prompt is declined.
    pub async fn require_consent_then_navigate(
        &self,
        target: Route,
        prompt: &mut dyn ConsentPrompt,
    ) -> Result<Route, StorageError> {
        if self.has_consent()? {
            return Ok(target);
        }

        match prompt.acknowledge().await {
            ConsentDecision::Accept => {
                self.save_consent()?;
                tracing::info!(target: "consent", route = %target, "consent_granted");
                Ok(target)
            }
            ConsentDecision::Decline => {
                tracing::info!(target: "consent", route = %target, "consent_declined");
                Ok(Route::Home)
            }
        }
    }
}
