use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by the detection pipeline.
///
/// Every variant is terminal for the request that produced it; nothing in the
/// pipeline retries.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("vision service error ({provider}): {message}")]
    Transport { provider: String, message: String },

    #[error("malformed response from vision service: {0}")]
    MalformedResponse(String),

    #[error("vision service did not respond within {}s", .0.as_secs_f64())]
    Timeout(Duration),
}

impl ScanError {
    pub fn transport(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Short machine-friendly name of the error kind, used in structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::Transport { .. } => "transport",
            Self::MalformedResponse(_) => "malformed_response",
            Self::Timeout(_) => "timeout",
        }
    }
}

impl From<serde_json::Error> for ScanError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}
