//! Vision service clients.
//!
//! `openai` talks to the Responses API; `mock` returns canned replies for
//! tests and offline runs. [`build_client`] picks one from configuration.

pub mod mock;
pub mod openai;

use std::sync::Arc;
use std::time::Duration;

use objscan_config::{ProviderConfig, OPENAI_API_KEY_VAR};
use objscan_core::{ScanError, VisionClient};
use tracing::info;

pub use mock::MockVisionClient;
pub use openai::OpenAiVisionClient;

/// Construct the configured vision client.
///
/// The credential check happens here, before any request is made, so a
/// missing key fails at startup rather than on the first upload.
pub fn build_client(config: &ProviderConfig) -> Result<Arc<dyn VisionClient>, ScanError> {
    match config.kind() {
        "openai" => {
            let api_key = config.api_key().ok_or_else(|| {
                ScanError::Configuration(format!(
                    "{OPENAI_API_KEY_VAR} environment variable is not set"
                ))
            })?;
            let client = OpenAiVisionClient::new(api_key)?
                .with_model(config.model())
                .with_base_url(config.base_url());
            info!(model = %config.model(), base_url = %config.base_url(), "Using OpenAI vision provider");
            Ok(Arc::new(client))
        }
        "mock" => {
            info!(replies = config.mock_replies.len(), "Using mock vision provider");
            Ok(Arc::new(configured_mock(config)))
        }
        other => Err(ScanError::Configuration(format!(
            "unknown vision provider '{other}'"
        ))),
    }
}

/// The mock served at runtime: scripted replies, nothing recorded.
fn configured_mock(config: &ProviderConfig) -> MockVisionClient {
    MockVisionClient::new("mock").with_replies(config.mock_replies.clone())
}

/// Timeout for one vision call as configured.
pub fn request_timeout(config: &ProviderConfig) -> Duration {
    Duration::from_secs(config.timeout_secs())
}
