use async_trait::async_trait;

use crate::error::ScanError;

/// Trait for multimodal completion services that can look at an image.
#[async_trait]
pub trait VisionClient: Send + Sync {
    /// Provider name (e.g., "openai", "mock").
    fn name(&self) -> &str;

    /// Model identifier requested from the provider.
    fn model(&self) -> &str;

    /// Send the instruction and the embedded image, returning the raw reply text.
    async fn infer(&self, request: &VisionRequest) -> Result<VisionReply, ScanError>;
}

/// One outbound request: textual guidance plus a single embedded image.
#[derive(Debug, Clone, PartialEq)]
pub struct VisionRequest {
    pub instruction: String,
    /// `data:` URI carrying the image bytes.
    pub image_data_url: String,
}

/// Reply from a vision provider. `text` is opaque and may not be valid JSON.
#[derive(Debug, Clone)]
pub struct VisionReply {
    pub text: String,
    pub provider: String,
    pub model: String,
    pub latency_ms: u64,
}
