use serde::{Deserialize, Serialize};

/// One turn of a planning conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    /// `user`, `assistant` or `system`.
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Input for a free-form planning chat turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    /// Overrides the configured default model.
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    pub message: String,
}

/// Input for turning a conversation into structured plans.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractPlanRequest {
    pub conversation: Vec<ChatMessage>,
    /// `YYYY-MM-DD`
    pub start_date: String,
    /// `YYYY-MM-DD`, not before `start_date`.
    pub deadline: String,
    pub model: Option<String>,
}

/// One block of extracted tasks.
///
/// `date` is a calendar date, a `YYYY-MM` month or a `Week N` label depending
/// on the extraction kind; `section` likewise (`morning`, `goals`, `weekly`...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanEntry {
    pub date: String,
    pub section: String,
    pub tasks: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractedPlans {
    pub plans: Vec<PlanEntry>,
}
