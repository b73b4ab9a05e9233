mod document;

pub use document::Document;

use std::path::Path;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::config::DataConfig;
use crate::error::{Error, Result};
use crate::models::*;
use crate::recap;

/// Run `$body` against whichever typed collection `$plan_type` selects.
///
/// `$body` is expanded once per entity type, so it can call the generic
/// collection helpers and let inference pick `Plan` or `TaskGroup`.
macro_rules! with_collection {
    ($data:expr, $plan_type:expr, |$items:ident| $body:expr) => {
        match $data.collection_mut($plan_type) {
            CollectionMut::Plans($items) => $body,
            CollectionMut::TaskGroups($items) => $body,
        }
    };
}

/// Both persisted documents and every operation on them.
#[derive(Clone)]
pub struct Database {
    learnings: Document<Vec<LearningItem>>,
    planning: Document<PlanningData>,
}

impl Database {
    pub fn open(config: &DataConfig) -> Result<Self> {
        Ok(Self {
            learnings: Document::open(&config.learning_file)?,
            planning: Document::open(&config.planning_file)?,
        })
    }

    /// Open with the standard file names under `dir`.
    pub fn open_dir(dir: impl AsRef<Path>) -> Result<Self> {
        Self::open(&DataConfig::in_dir(dir))
    }

    // ============================================================
    // Learning item operations
    // ============================================================

    pub fn get_all_learnings(&self) -> Result<Vec<LearningItem>> {
        self.learnings.load()
    }

    pub fn get_learning(&self, id: &str) -> Result<Option<LearningItem>> {
        Ok(self.learnings.load()?.into_iter().find(|item| item.id == id))
    }

    pub fn create_learning(&self, input: CreateLearningInput) -> Result<LearningItem> {
        let date = recap::parse_date(&input.date)?;
        let item = LearningItem {
            id: Uuid::new_v4().to_string(),
            date,
            content: input.content,
            completed: false,
            completed_dates: Vec::new(),
            recap_dates: recap::compute_recap_dates(date)?,
        };

        self.learnings.update(|items| {
            items.push(item.clone());
            Ok(())
        })?;

        tracing::info!(id = %item.id, date = %item.date, "Created learning item");
        Ok(item)
    }

    /// Mark the recap on `date` done (or not done).
    ///
    /// Without a date, the deprecated scalar `completed` flag is set and
    /// `completed_dates` is left alone.
    pub fn toggle_completion(
        &self,
        id: &str,
        completed: bool,
        date: Option<NaiveDate>,
    ) -> Result<LearningItem> {
        self.learnings.update(|items| {
            let item = find_learning_mut(items, id)?;
            match date {
                Some(date) => item.set_completed_on(date, completed),
                None => item.completed = completed,
            }
            Ok(item.clone())
        })
    }

    /// Replace the content of an item. Its schedule and history are kept.
    pub fn update_learning_content(&self, id: &str, content: String) -> Result<LearningItem> {
        self.learnings.update(|items| {
            let item = find_learning_mut(items, id)?;
            item.content = content;
            Ok(item.clone())
        })
    }

    pub fn delete_learning(&self, id: &str) -> Result<()> {
        self.learnings.update(|items| {
            let before = items.len();
            items.retain(|item| item.id != id);
            if items.len() == before {
                return Err(Error::not_found("Learning item"));
            }
            Ok(())
        })?;

        tracing::info!(id, "Deleted learning item");
        Ok(())
    }

    /// Items with a recap on `date`, regardless of completion.
    pub fn get_due_learnings(&self, date: NaiveDate) -> Result<Vec<LearningItem>> {
        Ok(recap::find_due(&self.learnings.load()?, date))
    }

    /// Days in `[from, from + days)` that have recaps, with the items due.
    pub fn get_recap_schedule(&self, from: NaiveDate, days: u32) -> Result<Vec<ScheduleDay>> {
        recap::upcoming_schedule(&self.learnings.load()?, from, days)
    }

    // ============================================================
    // Planning operations
    // ============================================================

    pub fn get_planning_data(&self) -> Result<PlanningData> {
        self.planning.load()
    }

    pub fn replace_planning_data(&self, data: &PlanningData) -> Result<()> {
        self.planning.replace(data)?;
        tracing::info!("Replaced all planning data");
        Ok(())
    }

    pub fn get_planning_items(&self, plan_type: PlanType) -> Result<PlanningItems> {
        Ok(self.planning.load()?.collection(plan_type))
    }

    /// Overwrite one collection. Returns the new item count.
    pub fn replace_planning_items(
        &self,
        plan_type: PlanType,
        items: serde_json::Value,
    ) -> Result<usize> {
        let count = self.planning.update(|data| {
            with_collection!(data, plan_type, |current| {
                *current = from_payload(plan_type, items)?;
                Ok(current.len())
            })
        })?;

        tracing::info!(plan_type = plan_type.as_str(), count, "Replaced planning collection");
        Ok(count)
    }

    pub fn add_planning_item(
        &self,
        plan_type: PlanType,
        item: serde_json::Value,
    ) -> Result<PlanningItem> {
        self.planning.update(|data| {
            with_collection!(data, plan_type, |items| {
                let item = from_payload(plan_type, item)?;
                Ok(append_item(items, item).into())
            })
        })
    }

    /// Merge a partial update into the item with `id`.
    pub fn update_planning_item(
        &self,
        plan_type: PlanType,
        id: &str,
        patch: serde_json::Value,
    ) -> Result<PlanningItem> {
        self.planning.update(|data| {
            with_collection!(data, plan_type, |items| {
                let patch = from_payload(plan_type, patch)?;
                patch_item(items, id, patch)
                    .map(Into::into)
                    .ok_or_else(|| Error::not_found("Item"))
            })
        })
    }

    pub fn delete_planning_item(&self, plan_type: PlanType, id: &str) -> Result<()> {
        self.planning.update(|data| {
            with_collection!(data, plan_type, |items| {
                if remove_item(items, id) {
                    Ok(())
                } else {
                    Err(Error::not_found("Item"))
                }
            })
        })
    }
}

fn find_learning_mut<'a>(items: &'a mut [LearningItem], id: &str) -> Result<&'a mut LearningItem> {
    items
        .iter_mut()
        .find(|item| item.id == id)
        .ok_or_else(|| Error::not_found("Learning item"))
}

/// Decode an untyped request payload into the entity shape of `plan_type`.
fn from_payload<T: DeserializeOwned>(plan_type: PlanType, value: serde_json::Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| {
        Error::Validation(format!(
            "Invalid payload for {}: {}",
            plan_type.as_str(),
            e
        ))
    })
}
