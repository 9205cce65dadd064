use crate::{
    analysis::{error::AnalysisError, ports::AnalysisPort, types::TriageResult},
    intake::{fields::IntakeField, info::FieldInfo, payload::InputPayload},
};

/// What the Results step renders, plus the failure (if any) that the
/// rendered result is standing in for.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    pub result: TriageResult,
    pub degraded: Option<AnalysisError>,
}

impl AnalysisOutcome {
    pub fn is_fallback(&self) -> bool {
        self.degraded.is_some()
    }
}

/// Never fails: any error is replaced by [`TriageResult::fallback`] and
/// kept on the outcome for the caller's logs.
pub async fn analyze_with_fallback(
    port: &dyn AnalysisPort,
    payload: &InputPayload,
) -> AnalysisOutcome {
    match port.analyze(payload).await {
        Ok(result) => AnalysisOutcome {
            result,
            degraded: None,
        },
        Err(err) => {
            tracing::warn!(
                target: "analysis",
                kind = ?err.kind,
                http_status = ?err.http_status,
                error = %err,
                "analysis_fallback_applied"
            );
            AnalysisOutcome {
                result: TriageResult::fallback(),
                degraded: Some(err),
            }
        }
    }
}

pub async fn field_info_or_local(port: &dyn AnalysisPort, field: IntakeField) -> FieldInfo {
    match port.field_info(field).await {
        Ok(info) => info,
        Err(err) => {
            tracing::debug!(
                target: "analysis",
                field = ?field,
                error = %err,
                "field_info_local_copy_used"
            );
            FieldInfo::local(field)
        }
    }
}
