use crate::config::Config;
use crate::llm::traits::ModelClient;
use crate::llm::types::{GenerateRequest, ModelError};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

/// Gemini `generateContent` client over plain REST
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a client for the model and endpoint named in the config
    pub fn new(api_key: impl Into<String>, config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("pinoy-appraiser/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

/// Build the JSON body for a `generateContent` call.
///
/// The service rejects a response schema combined with the search tool, so
/// grounded requests carry the schema inside the prompt text instead.
pub fn build_body(request: &GenerateRequest) -> Value {
    let mut prompt = request.prompt.clone();
    let mut body = json!({
        "systemInstruction": { "parts": [{ "text": request.system_instruction }] },
    });

    match (&request.response_schema, request.grounded) {
        (Some(schema), false) => {
            body["generationConfig"] = json!({
                "responseMimeType": "application/json",
                "responseSchema": schema,
            });
        }
        (Some(schema), true) => {
            let rendered = serde_json::to_string_pretty(schema).unwrap_or_default();
            prompt.push_str(
                "\n\nRespond with a single JSON object only, no prose, matching this schema:\n",
            );
            prompt.push_str(&rendered);
        }
        (None, _) => {}
    }

    if request.grounded {
        body["tools"] = json!([{ "googleSearch": {} }]);
    }

    body["contents"] = json!([{ "role": "user", "parts": [{ "text": prompt }] }]);
    body
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

/// Pull the answer text out of a `generateContent` response envelope
pub fn extract_text(envelope: &str) -> Result<String, ModelError> {
    let response: GenerateResponse =
        serde_json::from_str(envelope).map_err(|e| ModelError::Envelope(e.to_string()))?;

    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(ModelError::Blocked(reason));
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(ModelError::EmptyResponse)?;

    if let Some(reason) = candidate.finish_reason.as_deref().filter(|r| *r != "STOP") {
        debug!("Candidate finished with reason {}", reason);
    }

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(ModelError::EmptyResponse);
    }

    Ok(text)
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, ModelError> {
        let url = self.endpoint();
        info!("Calling {} (grounded: {})", self.model, request.grounded);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&build_body(request))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ModelError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Received {} bytes from model", body.len());
        extract_text(&body)
    }

    fn backend_name(&self) -> &'static str {
        "Gemini"
    }
}
