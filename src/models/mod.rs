//! Domain models for Recall Planner.
//!
//! # Learning log
//!
//! - [`LearningItem`]: something learned on a given day, with the recap dates
//!   on which it should be reviewed and the dates those reviews were done.
//!
//! # Planning board
//!
//! - [`Plan`]: a task on a daily, weekly, monthly or yearly board.
//! - [`TaskGroup`]: the plans generated together from one AI conversation.
//! - [`PlanningData`]: every planning collection, keyed by [`PlanType`].
//!
//! # Assistant
//!
//! - [`ChatMessage`], [`ExtractPlanRequest`], [`ExtractedPlans`]: shapes
//!   exchanged with the chat-completion upstream.

mod assistant;
mod learning;
mod planning;

pub use assistant::*;
pub use learning::*;
pub use planning::*;

use serde::{Deserialize, Serialize};

/// Plain acknowledgement for mutations with nothing else to report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Acknowledgement for a mutation that produced or changed a planning item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanningItemResponse {
    pub message: String,
    pub item: PlanningItem,
}

/// Acknowledgement for a bulk replace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountResponse {
    pub message: String,
    pub count: usize,
}
