use async_trait::async_trait;
use triagex::{
    analysis::{
        AnalysisError, AnalysisErrorKind, AnalysisPort, TriageLevel, TriageResult,
        analyze_with_fallback, error::transport_error, wire::map_http_error,
    },
    intake::{FieldInfo, InputPayload, IntakeField},
};

struct FailingPort(AnalysisError);

#[async_trait]
impl AnalysisPort for FailingPort {
    async fn analyze(&self, _payload: &InputPayload) -> Result<TriageResult, AnalysisError> {
        Err(self.0.clone())
    }

    async fn field_info(&self, _field: IntakeField) -> Result<FieldInfo, AnalysisError> {
        Err(self.0.clone())
    }
}

#[tokio::test]
async fn every_failure_kind_yields_the_same_fallback() {
    let failures = [
        transport_error("connection refused"),
        map_http_error(503, "unavailable"),
        map_http_error(408, ""),
        AnalysisError::new(AnalysisErrorKind::Decode, "bad json"),
    ];

    for failure in failures {
        let outcome =
            analyze_with_fallback(&FailingPort(failure.clone()), &InputPayload::new("x")).await;
        assert_eq!(outcome.result, TriageResult::fallback());
        assert_eq!(outcome.degraded, Some(failure));
        assert!(outcome.is_fallback());
    }
}

#[test]
fn request_timeout_status_is_classified_as_timeout() {
    let err = map_http_error(408, "slow");
    assert_eq!(err.kind, AnalysisErrorKind::Timeout);
    assert_eq!(err.http_status, Some(408));
}

#[test]
fn long_error_bodies_are_truncated() {
    let body = "x".repeat(1_000);
    let err = map_http_error(502, &body);
    assert!(err.message.len() < 300, "message was {} bytes", err.message.len());
}

#[test]
fn fallback_result_is_primary_care_with_two_recommendations() {
    let fallback = TriageResult::fallback();
    assert_eq!(fallback.level, TriageLevel::PrimaryCare);
    assert_eq!(fallback.confidence, 0.85);
    assert_eq!(fallback.message, "Non-urgent, but medical review recommended.");
    assert_eq!(fallback.recommendations.len(), 2);
}
