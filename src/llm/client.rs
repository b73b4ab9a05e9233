//! HTTP client for an OpenAI-compatible chat completions API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;
use crate::error::{Error, Result};
use crate::llm::{Completion, CompletionRequest};
use crate::models::ChatMessage;

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    r#type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Chat completions over HTTP. One attempt per call, no retries.
#[derive(Debug, Clone)]
pub struct ChatClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl ChatClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::UpstreamUnavailable(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            client,
        })
    }
}

#[async_trait]
impl Completion for ChatClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            Error::UpstreamUnavailable(
                "OpenAI API key not configured. Set OPENAI_API_KEY".to_string(),
            )
        })?;

        let body = ChatCompletionBody {
            model: &request.model,
            messages: &request.messages,
            temperature: request.temperature,
            response_format: request.json_mode.then_some(ResponseFormat {
                r#type: "json_object",
            }),
        };

        tracing::debug!(model = %request.model, messages = request.messages.len(), "Calling chat API");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::UpstreamUnavailable(format!("Chat request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::UpstreamUnavailable(format!("{}: {}", status, body)));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::BadUpstreamResponse(format!("Unexpected completion body: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::BadUpstreamResponse("Completion had no content".to_string()))
    }
}
