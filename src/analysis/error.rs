use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisErrorKind {
    InvalidEndpoint,
    Transport,
    Timeout,
    HttpStatus,
    Decode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct AnalysisError {
    pub kind: AnalysisErrorKind,
    pub message: String,
    pub http_status: Option<u16>,
}

impl AnalysisError {
    pub fn new(kind: AnalysisErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            http_status: None,
        }
    }

    pub fn with_http_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }
}

pub fn invalid_endpoint(message: impl Into<String>) -> AnalysisError {
    AnalysisError::new(AnalysisErrorKind::InvalidEndpoint, message)
}

pub fn transport_error(message: impl Into<String>) -> AnalysisError {
    AnalysisError::new(AnalysisErrorKind::Transport, message)
}

pub fn decode_error(message: impl Into<String>) -> AnalysisError {
    AnalysisError::new(AnalysisErrorKind::Decode, message)
}
