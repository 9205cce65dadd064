use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_SAFETY_NOTE: &str =
    "If symptoms worsen, contact emergency services immediately.";

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Unset means the request waits as long as the network stack allows.
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: None,
        }
    }
}

/// Urgency categories, ordered from least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriageLevel {
    SelfCare,
    PrimaryCare,
    SemiEmergency,
    Emergency,
}

impl TriageLevel {
    pub const ALL: [TriageLevel; 4] = [
        TriageLevel::SelfCare,
        TriageLevel::PrimaryCare,
        TriageLevel::SemiEmergency,
        TriageLevel::Emergency,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TriageLevel::SelfCare => "self_care",
            TriageLevel::PrimaryCare => "primary_care",
            TriageLevel::SemiEmergency => "semi_emergency",
            TriageLevel::Emergency => "emergency",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == value)
    }

    pub fn icon(self) -> &'static str {
        match self {
            TriageLevel::SelfCare => "🟢",
            TriageLevel::PrimaryCare => "🟡",
            TriageLevel::SemiEmergency => "🟠",
            TriageLevel::Emergency => "🔴",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            TriageLevel::SelfCare => "Self-Care",
            TriageLevel::PrimaryCare => "Primary Care",
            TriageLevel::SemiEmergency => "Semi-Emergency",
            TriageLevel::Emergency => "Emergency",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TriageLevel::SelfCare => "Mild symptoms, safe to monitor at home.",
            TriageLevel::PrimaryCare => "Non-urgent, see a doctor if symptoms persist.",
            TriageLevel::SemiEmergency => "Possible risk – seek care within hours.",
            TriageLevel::Emergency => "Critical – seek medical attention immediately.",
        }
    }
}

impl fmt::Display for TriageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageResult {
    pub level: TriageLevel,
    /// Always within `[0, 1]`.
    pub confidence: f64,
    pub message: String,
    pub recommendations: Vec<String>,
    pub safety_note: String,
}

impl TriageResult {
    /// Substituted whenever the analysis call fails.
    pub fn fallback() -> Self {
        Self {
            level: TriageLevel::PrimaryCare,
            confidence: 0.85,
            message: "Non-urgent, but medical review recommended.".to_string(),
            recommendations: vec![
                "Monitor symptoms at home".to_string(),
                "Contact primary care within 24-48 hours".to_string(),
            ],
            safety_note: DEFAULT_SAFETY_NOTE.to_string(),
        }
    }

    pub fn confidence_percent(&self) -> u8 {
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}
