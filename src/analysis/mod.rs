pub mod client;
pub mod error;
pub mod fallback;
pub mod ports;
pub mod types;
pub mod wire;

pub use client::HttpAnalysisClient;
pub use error::{AnalysisError, AnalysisErrorKind};
pub use fallback::{AnalysisOutcome, analyze_with_fallback, field_info_or_local};
pub use ports::AnalysisPort;
pub use types::{ApiConfig, TriageLevel, TriageResult};
