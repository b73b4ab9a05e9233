//! Prompt templates for conversational planning and plan extraction.

use chrono::NaiveDate;

use crate::models::ChatMessage;

/// The structured-plan variants the assistant can extract.
///
/// Each differs only in its prompt and in the vocabulary of the returned
/// `date` / `section` fields. Parsing and validation are shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionKind {
    /// Day-by-day plan with morning/afternoon/evening sections.
    FullPlan,
    /// Goals per `YYYY-MM` month.
    MonthlyGoals,
    /// A monthly task split into `Week N` milestones.
    WeeklyBreakdown,
    /// A weekly task split into dated daily actions.
    DailyBreakdown,
    /// A single day's task split into morning/afternoon/evening.
    DailySubtasks,
    /// A yearly goal split into monthly milestones dated the 1st.
    MonthlyPlan,
}

impl ExtractionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullPlan => "full_plan",
            Self::MonthlyGoals => "monthly_goals",
            Self::WeeklyBreakdown => "weekly_breakdown",
            Self::DailyBreakdown => "daily_breakdown",
            Self::DailySubtasks => "daily_subtasks",
            Self::MonthlyPlan => "monthly_plan",
        }
    }

    /// What granularity of plan the system prompt should ask for.
    fn noun(&self) -> &'static str {
        match self {
            Self::FullPlan => "plans",
            Self::MonthlyGoals | Self::MonthlyPlan => "monthly plans",
            Self::WeeklyBreakdown => "weekly plans",
            Self::DailyBreakdown => "daily plans",
            Self::DailySubtasks => "section plans",
        }
    }

    /// Example JSON body and rules for this variant.
    fn shape_and_rules(&self, start: NaiveDate) -> (String, &'static str) {
        match self {
            Self::FullPlan => (
                plan_shape("YYYY-MM-DD", "morning|afternoon|evening"),
                "- Use specific, actionable tasks drawn from the conversation\n\
                 - Spread the work across the available days\n\
                 - Give each morning/afternoon/evening section 1-3 tasks at most\n\
                 - Respect the workflow and dependencies that were discussed\n\
                 - Finish everything on or before the deadline",
            ),
            Self::MonthlyGoals => (
                plan_shape("YYYY-MM", "goals"),
                "- Emit one block for each month in the period\n\
                 - List 3-7 key goals per month\n\
                 - `date` is the month as YYYY-MM (e.g. \"2026-01\")\n\
                 - `section` is always \"goals\"",
            ),
            Self::WeeklyBreakdown => (
                plan_shape("Week 1", "weekly"),
                "- List 2-4 milestones per week\n\
                 - `date` is \"Week 1\", \"Week 2\", \"Week 3\" and so on\n\
                 - `section` is always \"weekly\"\n\
                 - Spread the work evenly over the weeks discussed",
            ),
            Self::DailyBreakdown => (
                plan_shape("YYYY-MM-DD", "daily"),
                "- List 1-3 actions for the days that need them\n\
                 - `date` is a YYYY-MM-DD date inside the period\n\
                 - `section` is always \"daily\"\n\
                 - Spread the work sensibly over the week",
            ),
            Self::DailySubtasks => (
                plan_shape(&start.to_string(), "morning"),
                "- `section` is exactly one of \"morning\", \"afternoon\", \"evening\"\n\
                 - `date` is always the given day\n\
                 - Pick steps that suit the time of day",
            ),
            Self::MonthlyPlan => (
                plan_shape("YYYY-MM-01", "monthly"),
                "- `date` is the first day of each month (e.g. \"2026-01-01\")\n\
                 - `section` is always \"monthly\"\n\
                 - List 2-5 specific tasks per month\n\
                 - Cover the whole period from start date to deadline",
            ),
        }
    }
}

fn plan_shape(date: &str, section: &str) -> String {
    format!(
        "{{\n  \"plans\": [\n    {{\n      \"date\": \"{}\",\n      \"section\": \"{}\",\n      \"tasks\": [\"task 1\", \"task 2\"]\n    }}\n  ]\n}}",
        date, section
    )
}

/// Render a conversation as `role: content` lines.
pub fn transcript(conversation: &[ChatMessage]) -> String {
    conversation
        .iter()
        .map(|msg| format!("{}: {}", msg.role, msg.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// System prompt for the free-form planning chat.
pub fn chat_system_prompt(today: NaiveDate) -> ChatMessage {
    ChatMessage::system(format!(
        "You are a helpful productivity and planning assistant. Today's date is {today}. \
         Help the user break tasks and projects down into manageable plans.\n\n\
         Be conversational and ask clarifying questions when needed. Take into account:\n\
         - how complex the task is and its scope\n\
         - how much time remains until the deadline\n\
         - natural workflow and dependencies\n\
         - the user's preferences and constraints\n\
         - today's date ({today}) when working out timelines\n\n\
         Understand their needs through conversation before proposing a plan."
    ))
}

/// The system and user messages for one extraction request.
pub fn extraction_messages(
    kind: ExtractionKind,
    conversation: &[ChatMessage],
    start: NaiveDate,
    deadline: NaiveDate,
    today: NaiveDate,
) -> Vec<ChatMessage> {
    let days_available = (deadline - start).num_days() + 1;
    let (shape, rules) = kind.shape_and_rules(start);

    let period = match kind {
        ExtractionKind::DailySubtasks => format!("Date: {}", start),
        _ => format!(
            "Start Date: {}\nDeadline: {}\nDays Available: {}",
            start, deadline, days_available
        ),
    };

    let user = format!(
        "Using the planning conversation below, produce a structured plan.\n\n\
         Conversation:\n{}\n\n{}\n\n\
         Return ONLY a JSON object with exactly this structure:\n\n{}\n\n\
         Guidelines:\n{}\n\
         - Return ONLY valid JSON, with no surrounding text",
        transcript(conversation),
        period,
        shape,
        rules
    );

    vec![
        ChatMessage::system(format!(
            "You are a planning assistant that extracts structured {} from conversations. \
             Today's date is {}. Always respond with valid JSON only.",
            kind.noun(),
            today
        )),
        ChatMessage::user(user),
    ]
}
