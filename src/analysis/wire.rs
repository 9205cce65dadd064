use serde::{Deserialize, Serialize};

use crate::{
    analysis::{
        error::{AnalysisError, AnalysisErrorKind},
        types::{DEFAULT_SAFETY_NOTE, TriageLevel, TriageResult},
    },
    intake::payload::InputPayload,
};

pub const ANALYZE_PATH: &str = "/api/v1/analyze";
pub const INFO_PATH: &str = "/api/v1/info";

/// Body of `POST /api/v1/analyze`. Absent vitals are sent as `null`;
/// duration is not part of the contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub symptom: String,
    pub heart_rate: Option<u16>,
    pub temperature: Option<f64>,
    pub spo2: Option<u8>,
    pub blood_pressure: Option<String>,
}

impl From<&InputPayload> for AnalyzeRequest {
    fn from(payload: &InputPayload) -> Self {
        Self {
            symptom: payload.symptom.clone(),
            heart_rate: payload.heart_rate,
            temperature: payload.temperature,
            spo2: payload.spo2,
            blood_pressure: payload.blood_pressure.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeResponse {
    pub level: String,
    pub confidence: f64,
    pub message: String,
    #[serde(default)]
    pub recommendations: Option<Vec<String>>,
    #[serde(default)]
    pub safety_note: Option<String>,
}

impl AnalyzeResponse {
    pub fn into_result(self) -> TriageResult {
        let level = TriageLevel::from_wire(&self.level).unwrap_or_else(|| {
            tracing::warn!(
                target: "analysis",
                level = %self.level,
                "unrecognized_triage_level_shown_as_primary_care"
            );
            TriageLevel::PrimaryCare
        });
        let safety_note = self
            .safety_note
            .filter(|note| !note.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SAFETY_NOTE.to_string());

        TriageResult {
            level,
            confidence: self.confidence.clamp(0.0, 1.0),
            message: self.message,
            recommendations: self.recommendations.unwrap_or_default(),
            safety_note,
        }
    }
}

pub fn map_http_error(status: u16, body: &str) -> AnalysisError {
    let normalized_body = body.chars().take(240).collect::<String>();
    let kind = if status == 408 {
        AnalysisErrorKind::Timeout
    } else {
        AnalysisErrorKind::HttpStatus
    };

    let mut message = format!("analysis service returned status {status}");
    if !normalized_body.is_empty() {
        message = format!("{message}: {normalized_body}");
    }

    AnalysisError::new(kind, message).with_http_status(status)
}
