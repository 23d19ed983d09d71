use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use objscan_config::defaults::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use objscan_core::{ScanError, VisionClient, VisionReply, VisionRequest};

const PROVIDER: &str = "openai";

/// OpenAI Responses API vision client.
pub struct OpenAiVisionClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiVisionClient {
    /// Fails with [`ScanError::Configuration`] when the key is blank.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ScanError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ScanError::Configuration(
                "OpenAI API key must not be empty".to_string(),
            ));
        }
        Ok(Self {
            client: Client::new(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    fn body<'a>(&'a self, request: &'a VisionRequest) -> ResponsesRequest<'a> {
        ResponsesRequest {
            model: &self.model,
            input: vec![InputMessage {
                role: "user",
                content: vec![
                    InputContent::InputText {
                        text: &request.instruction,
                    },
                    InputContent::InputImage {
                        image_url: &request.image_data_url,
                    },
                ],
            }],
            text: TextOptions {
                format: TextFormat { kind: "json_object" },
            },
        }
    }
}

#[derive(Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: Vec<InputMessage<'a>>,
    text: TextOptions,
}

#[derive(Serialize)]
struct InputMessage<'a> {
    role: &'static str,
    content: Vec<InputContent<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum InputContent<'a> {
    InputText { text: &'a str },
    InputImage { image_url: &'a str },
}

#[derive(Serialize)]
struct TextOptions {
    format: TextFormat,
}

#[derive(Serialize)]
struct TextFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Default, Deserialize)]
struct ResponsesReply {
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<OutputContent>,
}

#[derive(Debug, Deserialize)]
struct OutputContent {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    refusal: Option<String>,
}

/// Pull the reply text out of a Responses API envelope.
///
/// The top-level `output_text` convenience field wins when present;
/// otherwise every `output_text` content part is concatenated in order.
fn extract_output_text(reply: &ResponsesReply) -> Result<String, ScanError> {
    if let Some(text) = reply.output_text.as_deref().filter(|t| !t.is_empty()) {
        return Ok(text.to_string());
    }

    let parts = reply.output.iter().flat_map(|item| item.content.iter());
    let mut text = String::new();
    let mut refusal = None;
    for part in parts {
        match part.kind.as_str() {
            "output_text" => text.push_str(part.text.as_deref().unwrap_or_default()),
            "refusal" => refusal = part.refusal.clone().or_else(|| part.text.clone()),
            _ => {}
        }
    }

    if !text.is_empty() {
        return Ok(text);
    }
    match refusal {
        Some(reason) => Err(ScanError::transport(PROVIDER, format!("model refused: {reason}"))),
        None => Err(ScanError::transport(PROVIDER, "response contained no output text")),
    }
}

#[async_trait]
impl VisionClient for OpenAiVisionClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn infer(&self, request: &VisionRequest) -> Result<VisionReply, ScanError> {
        let start = Instant::now();

        debug!(
            model = %self.model,
            image_chars = request.image_data_url.len(),
            "Sending request to OpenAI"
        );

        let response = self
            .client
            .post(format!("{}/responses", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&self.body(request))
            .send()
            .await
            .map_err(|e| ScanError::transport(PROVIDER, format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(ScanError::transport(
                PROVIDER,
                format!("returned {status}: {error_body}"),
            ));
        }

        let envelope: ResponsesReply = response.json().await.map_err(|e| {
            ScanError::transport(PROVIDER, format!("failed to decode response envelope: {e}"))
        })?;
        let text = extract_output_text(&envelope)?;

        let latency_ms = start.elapsed().as_millis() as u64;
        debug!(latency_ms, reply_chars = text.len(), "OpenAI replied");

        Ok(VisionReply {
            text,
            provider: PROVIDER.to_string(),
            model: self.model.clone(),
            latency_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(v: serde_json::Value) -> ResponsesReply {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn blank_key_rejected() {
        assert!(matches!(
            OpenAiVisionClient::new(" "),
            Err(ScanError::Configuration(_))
        ));
    }

    #[test]
    fn body_matches_responses_api_shape() {
        let client = OpenAiVisionClient::new("sk-test").unwrap().with_model("gpt-4o");
        let request = VisionRequest {
            instruction: "list objects".into(),
            image_data_url: "data:image/jpeg;base64,AAAA".into(),
        };
        let body = serde_json::to_value(client.body(&request)).unwrap();
        assert_eq!(
            body,
            json!({
                "model": "gpt-4o",
                "input": [{
                    "role": "user",
                    "content": [
                        { "type": "input_text", "text": "list objects" },
                        { "type": "input_image", "image_url": "data:image/jpeg;base64,AAAA" }
                    ]
                }],
                "text": { "format": { "type": "json_object" } }
            })
        );
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let client = OpenAiVisionClient::new("sk-test")
            .unwrap()
            .with_base_url("http://localhost:9999/v1/");
        assert_eq!(client.base_url, "http://localhost:9999/v1");
    }

    #[test]
    fn extracts_message_output_text() {
        let reply = envelope(json!({
            "id": "resp_1",
            "output": [
                { "type": "reasoning", "summary": [] },
                { "type": "message", "role": "assistant", "content": [
                    { "type": "output_text", "text": "{\"objects\":", "annotations": [] },
                    { "type": "output_text", "text": "[]}" }
                ]}
            ]
        }));
        assert_eq!(extract_output_text(&reply).unwrap(), "{\"objects\":[]}");
    }

    #[test]
    fn prefers_top_level_output_text() {
        let reply = envelope(json!({ "output_text": "{}", "output": [] }));
        assert_eq!(extract_output_text(&reply).unwrap(), "{}");
    }

    #[test]
    fn refusal_is_transport_error() {
        let reply = envelope(json!({
            "output": [{ "type": "message", "content": [
                { "type": "refusal", "refusal": "cannot help" }
            ]}]
        }));
        let err = extract_output_text(&reply).unwrap_err();
        assert!(matches!(err, ScanError::Transport { .. }));
        assert!(err.to_string().contains("cannot help"));
    }

    #[test]
    fn empty_envelope_is_transport_error() {
        let err = extract_output_text(&ResponsesReply::default()).unwrap_err();
        assert!(err.to_string().contains("no output text"));
    }
}
