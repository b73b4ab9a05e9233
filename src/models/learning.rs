use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single thing the user learned on a given day.
///
/// `recap_dates` is derived from `date` once, at creation, and never touched
/// again. Completion is tracked per recap date in `completed_dates`; the
/// scalar `completed` flag predates per-date tracking and is only written when
/// a toggle arrives without a date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LearningItem {
    pub id: String,
    /// Day the item was learned.
    pub date: NaiveDate,
    pub content: String,
    /// Deprecated. Kept so older clients keep working.
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub completed_dates: Vec<NaiveDate>,
    #[serde(default)]
    pub recap_dates: Vec<NaiveDate>,
}

impl LearningItem {
    /// Whether this item is scheduled for review on `date`.
    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        self.recap_dates.contains(&date)
    }

    /// Whether the recap on `date` has been marked done.
    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.completed_dates.contains(&date)
    }

    /// Mark or unmark a single recap date. Both directions are idempotent.
    pub fn set_completed_on(&mut self, date: NaiveDate, completed: bool) {
        if completed {
            if !self.completed_dates.contains(&date) {
                self.completed_dates.push(date);
            }
        } else {
            self.completed_dates.retain(|d| *d != date);
        }
    }
}

/// Input for creating a learning item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLearningInput {
    /// Day the item was learned, `YYYY-MM-DD`.
    pub date: String,
    pub content: String,
}

/// Input for replacing the content of a learning item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLearningInput {
    pub content: String,
}

/// Query for toggling recap completion.
///
/// With `date` set, that date is added to or removed from `completed_dates`.
/// Without it, the legacy scalar `completed` flag is set instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleCompletionQuery {
    pub completed: bool,
    pub date: Option<String>,
}

/// Query selecting a reference date. Missing means "today".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

/// Query for the upcoming recap schedule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleQuery {
    /// First day of the window. Defaults to today.
    pub from: Option<String>,
    /// Window length in days. Defaults to 30.
    pub days: Option<u32>,
}

/// All items due on one day of the upcoming schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleDay {
    pub date: NaiveDate,
    pub items: Vec<LearningItem>,
}

/// Response wrapper for mutations on a learning item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningItemResponse {
    pub message: String,
    pub item: LearningItem,
}
