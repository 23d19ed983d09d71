//! Detection request invoker: one image, one external call, raw text back.

use std::sync::Arc;
use std::time::Duration;

use objscan_core::{ScanError, VisionClient, VisionReply, VisionRequest};
use tracing::debug;

use crate::encoder::jpeg_data_url;
use crate::instruction::{build_instruction, INSTRUCTION_VERSION};

/// Sends the instruction and the encoded image to a [`VisionClient`].
///
/// No retry, cache, or batching: each call is independent. Errors from the
/// client are returned unchanged.
#[derive(Clone)]
pub struct DetectionInvoker {
    client: Arc<dyn VisionClient>,
    timeout: Option<Duration>,
}

impl DetectionInvoker {
    pub fn new(client: Arc<dyn VisionClient>) -> Self {
        Self {
            client,
            timeout: None,
        }
    }

    /// Abort the call with [`ScanError::Timeout`] once `timeout` elapses.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn client(&self) -> &dyn VisionClient {
        self.client.as_ref()
    }

    /// Build the outbound request for `jpeg`.
    pub fn build_request(jpeg: &[u8]) -> VisionRequest {
        VisionRequest {
            instruction: build_instruction().to_string(),
            image_data_url: jpeg_data_url(jpeg),
        }
    }

    /// Submit `jpeg` and wait for the raw reply.
    pub async fn invoke(&self, jpeg: &[u8]) -> Result<VisionReply, ScanError> {
        let request = Self::build_request(jpeg);
        debug!(
            provider = self.client.name(),
            model = self.client.model(),
            instruction_version = INSTRUCTION_VERSION,
            image_bytes = jpeg.len(),
            "Invoking vision service"
        );

        match self.timeout {
            // Dropping the future on expiry cancels the in-flight request.
            Some(limit) => tokio::time::timeout(limit, self.client.infer(&request))
                .await
                .map_err(|_| ScanError::Timeout(limit))?,
            None => self.client.infer(&request).await,
        }
    }
}
