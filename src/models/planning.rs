use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A single planned task on a day, week, month or year board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: String,
    /// Board section, e.g. `morning`, `afternoon`, `evening`, `goals`, `weekly`.
    pub section: String,
    pub content: String,
    /// Day, month or period label the plan belongs to. Not necessarily a
    /// calendar date: `2026-01`, `Week 2` and `2026-03-01` are all valid.
    pub date: String,
    #[serde(default)]
    pub completed: bool,
    /// The task group this plan was generated under, if any. Not validated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

/// Partial update for a [`Plan`]. Only supplied fields change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanPatch {
    pub section: Option<String>,
    pub content: Option<String>,
    pub date: Option<String>,
    pub completed: Option<bool>,
    /// Absent leaves the group alone; `null` clears it.
    #[serde(default, deserialize_with = "explicit_null")]
    pub group_id: Option<Option<String>>,
}

/// Deserialize a present field into `Some`, keeping `null` as `Some(None)`.
/// Paired with `#[serde(default)]` so an absent field stays `None`.
fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A batch of plans created together from one AI-assisted conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskGroup {
    pub id: String,
    pub task_name: String,
    #[serde(default)]
    pub plan_ids: Vec<String>,
    pub created_at: String,
}

/// Partial update for a [`TaskGroup`]. Only supplied fields change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskGroupPatch {
    pub task_name: Option<String>,
    pub plan_ids: Option<Vec<String>>,
    pub created_at: Option<String>,
}

/// The whole planning document, as persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanningData {
    pub daily_plans: Vec<Plan>,
    pub weekly_plans: Vec<Plan>,
    pub monthly_plans: Vec<Plan>,
    pub yearly_plans: Vec<Plan>,
    pub task_groups: Vec<TaskGroup>,
    pub monthly_task_groups: Vec<TaskGroup>,
    pub yearly_task_groups: Vec<TaskGroup>,
}

/// Selects one named collection inside [`PlanningData`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum PlanType {
    DailyPlans,
    WeeklyPlans,
    MonthlyPlans,
    YearlyPlans,
    TaskGroups,
    MonthlyTaskGroups,
    YearlyTaskGroups,
}

impl PlanType {
    pub const ALL: [PlanType; 7] = [
        Self::DailyPlans,
        Self::WeeklyPlans,
        Self::MonthlyPlans,
        Self::YearlyPlans,
        Self::TaskGroups,
        Self::MonthlyTaskGroups,
        Self::YearlyTaskGroups,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DailyPlans => "dailyPlans",
            Self::WeeklyPlans => "weeklyPlans",
            Self::MonthlyPlans => "monthlyPlans",
            Self::YearlyPlans => "yearlyPlans",
            Self::TaskGroups => "taskGroups",
            Self::MonthlyTaskGroups => "monthlyTaskGroups",
            Self::YearlyTaskGroups => "yearlyTaskGroups",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

/// Mutable view of one collection, typed by its entity.
pub enum CollectionMut<'a> {
    Plans(&'a mut Vec<Plan>),
    TaskGroups(&'a mut Vec<TaskGroup>),
}

impl PlanningData {
    pub fn collection_mut(&mut self, plan_type: PlanType) -> CollectionMut<'_> {
        match plan_type {
            PlanType::DailyPlans => CollectionMut::Plans(&mut self.daily_plans),
            PlanType::WeeklyPlans => CollectionMut::Plans(&mut self.weekly_plans),
            PlanType::MonthlyPlans => CollectionMut::Plans(&mut self.monthly_plans),
            PlanType::YearlyPlans => CollectionMut::Plans(&mut self.yearly_plans),
            PlanType::TaskGroups => CollectionMut::TaskGroups(&mut self.task_groups),
            PlanType::MonthlyTaskGroups => {
                CollectionMut::TaskGroups(&mut self.monthly_task_groups)
            }
            PlanType::YearlyTaskGroups => CollectionMut::TaskGroups(&mut self.yearly_task_groups),
        }
    }

    /// Clone out one collection for read-only responses.
    pub fn collection(&self, plan_type: PlanType) -> PlanningItems {
        match plan_type {
            PlanType::DailyPlans => PlanningItems::Plans(self.daily_plans.clone()),
            PlanType::WeeklyPlans => PlanningItems::Plans(self.weekly_plans.clone()),
            PlanType::MonthlyPlans => PlanningItems::Plans(self.monthly_plans.clone()),
            PlanType::YearlyPlans => PlanningItems::Plans(self.yearly_plans.clone()),
            PlanType::TaskGroups => PlanningItems::TaskGroups(self.task_groups.clone()),
            PlanType::MonthlyTaskGroups => {
                PlanningItems::TaskGroups(self.monthly_task_groups.clone())
            }
            PlanType::YearlyTaskGroups => {
                PlanningItems::TaskGroups(self.yearly_task_groups.clone())
            }
        }
    }
}

/// Any one planning entity, serialized as the bare entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum PlanningItem {
    Plan(Plan),
    TaskGroup(TaskGroup),
}

/// The contents of one collection, serialized as a bare list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum PlanningItems {
    Plans(Vec<Plan>),
    TaskGroups(Vec<TaskGroup>),
}

/// An entity stored in a planning collection.
///
/// The collection operations in [`crate::db`] are written once against this
/// trait and dispatched per [`PlanType`].
pub trait PlanningEntity: Serialize + DeserializeOwned + Clone + Into<PlanningItem> {
    type Patch: DeserializeOwned;

    fn id(&self) -> &str;

    /// Merge a partial update, leaving unspecified fields as they are.
    fn apply(&mut self, patch: Self::Patch);
}

impl PlanningEntity for Plan {
    type Patch = PlanPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: PlanPatch) {
        if let Some(section) = patch.section {
            self.section = section;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(group_id) = patch.group_id {
            self.group_id = group_id;
        }
    }
}

impl PlanningEntity for TaskGroup {
    type Patch = TaskGroupPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: TaskGroupPatch) {
        if let Some(task_name) = patch.task_name {
            self.task_name = task_name;
        }
        if let Some(plan_ids) = patch.plan_ids {
            self.plan_ids = plan_ids;
        }
        if let Some(created_at) = patch.created_at {
            self.created_at = created_at;
        }
    }
}

impl From<Plan> for PlanningItem {
    fn from(plan: Plan) -> Self {
        Self::Plan(plan)
    }
}

impl From<TaskGroup> for PlanningItem {
    fn from(group: TaskGroup) -> Self {
        Self::TaskGroup(group)
    }
}

/// Append `item` to the end of a collection.
pub fn append_item<T: PlanningEntity>(items: &mut Vec<T>, item: T) -> T {
    items.push(item.clone());
    item
}

/// Merge `patch` into the first item with a matching id. `None` if no match.
pub fn patch_item<T: PlanningEntity>(items: &mut [T], id: &str, patch: T::Patch) -> Option<T> {
    let item = items.iter_mut().find(|item| item.id() == id)?;
    item.apply(patch);
    Some(item.clone())
}

/// Remove every item with a matching id. Returns whether anything was removed.
pub fn remove_item<T: PlanningEntity>(items: &mut Vec<T>, id: &str) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(id: &str) -> Plan {
        Plan {
            id: id.to_string(),
            section: "morning".to_string(),
            content: "Read chapter 3".to_string(),
            date: "2025-01-01".to_string(),
            completed: false,
            group_id: None,
        }
    }

    #[test]
    fn plan_type_round_trips_through_its_name() {
        for plan_type in PlanType::ALL {
            assert_eq!(PlanType::from_str(plan_type.as_str()), Some(plan_type));
        }
        assert_eq!(PlanType::from_str("dinnerPlans"), None);
    }

    #[test]
    fn patch_changes_only_supplied_fields() {
        let mut items = vec![plan("a"), plan("b")];
        let patched = patch_item(
            &mut items,
            "b",
            PlanPatch {
                completed: Some(true),
                ..Default::default()
            },
        )
        .expect("item exists");

        assert!(patched.completed);
        assert_eq!(patched.content, "Read chapter 3");
        assert_eq!(patched.section, "morning");
        assert!(!items[0].completed);
    }

    #[test]
    fn patch_on_missing_id_is_none() {
        let mut items = vec![plan("a")];
        assert!(patch_item(&mut items, "zzz", PlanPatch::default()).is_none());
        assert_eq!(items, vec![plan("a")]);
    }

    #[test]
    fn remove_reports_whether_anything_was_removed() {
        let mut items = vec![plan("a"), plan("b")];
        assert!(!remove_item(&mut items, "c"));
        assert_eq!(items.len(), 2);
        assert!(remove_item(&mut items, "a"));
        assert_eq!(items, vec![plan("b")]);
    }

    #[test]
    fn planning_data_uses_camel_case_keys() {
        let json = serde_json::to_value(PlanningData::default()).unwrap();
        let obj = json.as_object().unwrap();
        for plan_type in PlanType::ALL {
            assert!(obj.contains_key(plan_type.as_str()));
        }
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let data: PlanningData =
            serde_json::from_str(r#"{"dailyPlans": []}"#).expect("partial document parses");
        assert!(data.yearly_task_groups.is_empty());
    }
}
