//! AI-assisted planning on top of a chat-completion API.
//!
//! The upstream is treated as an opaque text-in/text-out function behind the
//! [`Completion`] trait. [`PlanAssistant`] owns the prompting and the
//! validation of whatever comes back: extraction responses must be JSON of
//! the [`ExtractedPlans`] shape or the call fails with
//! [`Error::BadUpstreamResponse`].

mod client;
mod prompts;

pub use client::ChatClient;
pub use prompts::{chat_system_prompt, extraction_messages, transcript, ExtractionKind};

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::models::{ChatMessage, ChatRequest, ChatResponse, ExtractPlanRequest, ExtractedPlans};
use crate::recap::parse_date;

const CHAT_TEMPERATURE: f32 = 0.7;
const EXTRACTION_TEMPERATURE: f32 = 0.3;

/// A single chat completion call.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    /// Ask the upstream to constrain its output to a JSON object.
    pub json_mode: bool,
}

/// Anything that can answer a chat completion with the assistant's text.
#[async_trait]
pub trait Completion: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}

/// Planning chat and structured-plan extraction.
#[derive(Clone)]
pub struct PlanAssistant {
    completion: Arc<dyn Completion>,
    default_model: String,
}

impl PlanAssistant {
    pub fn new(completion: Arc<dyn Completion>, default_model: impl Into<String>) -> Self {
        Self {
            completion,
            default_model: default_model.into(),
        }
    }

    fn model(&self, requested: Option<String>) -> String {
        requested
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| self.default_model.clone())
    }

    /// One conversational turn. `today` is stated in the system prompt.
    pub async fn chat(&self, request: ChatRequest, today: NaiveDate) -> Result<ChatResponse> {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        messages.push(chat_system_prompt(today));
        messages.extend(request.messages);

        let message = self
            .completion
            .complete(CompletionRequest {
                model: self.model(request.model),
                messages,
                temperature: CHAT_TEMPERATURE,
                json_mode: false,
            })
            .await?;

        Ok(ChatResponse { message })
    }

    /// Turn a conversation into structured plans of the given kind.
    ///
    /// The date range is validated before the upstream is contacted.
    pub async fn extract(
        &self,
        kind: ExtractionKind,
        request: ExtractPlanRequest,
        today: NaiveDate,
    ) -> Result<ExtractedPlans> {
        let start = parse_date(&request.start_date)?;
        let deadline = parse_date(&request.deadline)?;
        if deadline < start {
            return Err(Error::Validation(
                "Deadline must be after start date".to_string(),
            ));
        }

        let messages = extraction_messages(kind, &request.conversation, start, deadline, today);
        let text = self
            .completion
            .complete(CompletionRequest {
                model: self.model(request.model),
                messages,
                temperature: EXTRACTION_TEMPERATURE,
                json_mode: true,
            })
            .await?;

        let plans = parse_extracted_plans(&text)?;
        tracing::info!(
            kind = kind.as_str(),
            blocks = plans.plans.len(),
            "Extracted plans"
        );
        Ok(plans)
    }
}

/// Strictly parse an extraction response. No repair is attempted.
pub fn parse_extracted_plans(text: &str) -> Result<ExtractedPlans> {
    serde_json::from_str(text).map_err(|e| Error::BadUpstreamResponse(e.to_string()))
}
