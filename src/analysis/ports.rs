use async_trait::async_trait;

use crate::{
    analysis::{error::AnalysisError, types::TriageResult},
    intake::{fields::IntakeField, info::FieldInfo, payload::InputPayload},
};

/// The external analysis service as seen by the intake flow.
#[async_trait]
pub trait AnalysisPort: Send + Sync {
    async fn analyze(&self, payload: &InputPayload) -> Result<TriageResult, AnalysisError>;

    async fn field_info(&self, field: IntakeField) -> Result<FieldInfo, AnalysisError>;
}
