use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use objscan_core::{ScanError, VisionClient, VisionReply, VisionRequest};

/// Reply used when no canned replies were configured.
pub const EMPTY_REPLY: &str = r#"{"objects": [], "warnings": []}"#;

/// A vision client that returns canned replies without touching the network.
///
/// Replies are served in order; the last one repeats once the list runs out.
/// Request bodies are kept only after [`MockVisionClient::recording`].
pub struct MockVisionClient {
    name: String,
    replies: Vec<String>,
    failure: Option<String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    requests: Option<Mutex<Vec<VisionRequest>>>,
}

impl MockVisionClient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            replies: Vec::new(),
            failure: None,
            delay: None,
            calls: AtomicUsize::new(0),
            requests: None,
        }
    }

    /// Keep every request for later inspection through [`Self::requests`].
    pub fn recording(mut self) -> Self {
        self.requests = Some(Mutex::new(Vec::new()));
        self
    }

    pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
        self.replies.push(reply.into());
        self
    }

    pub fn with_replies(mut self, replies: Vec<String>) -> Self {
        self.replies.extend(replies);
        self
    }

    /// Make every call fail with a transport error.
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Sleep before replying, to exercise timeouts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Requests received so far; always empty unless recording.
    pub fn requests(&self) -> Vec<VisionRequest> {
        match &self.requests {
            Some(requests) => requests
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .clone(),
            None => Vec::new(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VisionClient for MockVisionClient {
    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self) -> &str {
        "mock"
    }

    async fn infer(&self, request: &VisionRequest) -> Result<VisionReply, ScanError> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(requests) = &self.requests {
            requests
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .push(request.clone());
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = &self.failure {
            return Err(ScanError::transport(&self.name, message.clone()));
        }

        let text = self
            .replies
            .get(index)
            .or_else(|| self.replies.last())
            .cloned()
            .unwrap_or_else(|| EMPTY_REPLY.to_string());

        Ok(VisionReply {
            text,
            provider: self.name.clone(),
            model: "mock".to_string(),
            latency_ms: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> VisionRequest {
        VisionRequest {
            instruction: "inst".into(),
            image_data_url: "data:image/jpeg;base64,AA==".into(),
        }
    }

    #[tokio::test]
    async fn serves_replies_in_order_then_repeats_last() {
        let mock = MockVisionClient::new("mock").with_reply("one").with_reply("two");
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(mock.infer(&request()).await.unwrap().text);
        }
        assert_eq!(seen, vec!["one", "two", "two"]);
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test]
    async fn default_reply_is_empty_inventory() {
        let reply = MockVisionClient::new("mock").infer(&request()).await.unwrap();
        assert_eq!(reply.text, EMPTY_REPLY);
    }

    #[tokio::test]
    async fn failure_is_transport_error_and_still_recorded() {
        let mock = MockVisionClient::new("flaky")
            .with_failure("connection reset")
            .recording();
        let err = mock.infer(&request()).await.unwrap_err();
        assert_eq!(err.to_string(), "vision service error (flaky): connection reset");
        assert_eq!(mock.requests()[0], request());
    }

    #[tokio::test]
    async fn keeps_no_request_bodies_unless_recording() {
        let mock = MockVisionClient::new("mock");
        let big = VisionRequest {
            instruction: "inst".into(),
            image_data_url: format!("data:image/jpeg;base64,{}", "A".repeat(1 << 20)),
        };
        for _ in 0..50 {
            mock.infer(&big).await.unwrap();
        }
        assert_eq!(mock.call_count(), 50);
        assert!(mock.requests().is_empty());
    }
}
