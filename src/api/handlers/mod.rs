use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{Local, NaiveDate};

use crate::db::Database;
use crate::error::Error;
use crate::llm::{ExtractionKind, PlanAssistant};
use crate::models::*;
use crate::recap;

type ApiResult<T> = Result<T, (StatusCode, String)>;

// ============================================================
// Error Handling
// ============================================================

/// Map a service error to a status and message.
///
/// Client and upstream errors are returned as-is. Storage failures are
/// logged in full but reported with a generic message.
fn api_error(e: Error) -> (StatusCode, String) {
    let status = match &e {
        Error::Parse(_) | Error::Validation(_) => StatusCode::BAD_REQUEST,
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        Error::UpstreamUnavailable(_) | Error::BadUpstreamResponse(_) => StatusCode::BAD_GATEWAY,
        Error::Io(_) | Error::Json(_) => {
            tracing::error!("Internal error: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            );
        }
    };

    if status.is_server_error() {
        tracing::error!("Upstream error: {}", e);
    } else {
        tracing::warn!("Request error: {}", e);
    }
    (status, e.to_string())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn parse_plan_type(name: &str) -> ApiResult<PlanType> {
    PlanType::from_str(name)
        .ok_or_else(|| api_error(Error::not_found(format!("Planning type '{}'", name))))
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Learning items
// ============================================================

pub async fn list_learnings(State(db): State<Database>) -> ApiResult<Json<Vec<LearningItem>>> {
    db.get_all_learnings().map(Json).map_err(api_error)
}

pub async fn get_learning(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> ApiResult<Json<LearningItem>> {
    db.get_learning(&id)
        .map_err(api_error)?
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Learning item not found".to_string()))
}

pub async fn create_learning(
    State(db): State<Database>,
    Json(input): Json<CreateLearningInput>,
) -> ApiResult<(StatusCode, Json<LearningItem>)> {
    db.create_learning(input)
        .map(|item| (StatusCode::CREATED, Json(item)))
        .map_err(api_error)
}

pub async fn toggle_learning_completion(
    State(db): State<Database>,
    Path(id): Path<String>,
    Query(query): Query<ToggleCompletionQuery>,
) -> ApiResult<Json<LearningItemResponse>> {
    let date = match query.date.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => Some(recap::parse_date(s).map_err(api_error)?),
        _ => None,
    };

    let item = db
        .toggle_completion(&id, query.completed, date)
        .map_err(api_error)?;

    Ok(Json(LearningItemResponse {
        message: "Status updated".to_string(),
        item,
    }))
}

pub async fn update_learning_content(
    State(db): State<Database>,
    Path(id): Path<String>,
    Json(input): Json<UpdateLearningInput>,
) -> ApiResult<Json<LearningItemResponse>> {
    let item = db
        .update_learning_content(&id, input.content)
        .map_err(api_error)?;

    Ok(Json(LearningItemResponse {
        message: "Content updated".to_string(),
        item,
    }))
}

pub async fn delete_learning(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    db.delete_learning(&id).map_err(api_error)?;
    Ok(Json(MessageResponse::new("Item deleted successfully")))
}

/// Items with a recap on `?date=` (default: today), completed or not.
pub async fn list_reminders(
    State(db): State<Database>,
    Query(query): Query<DateQuery>,
) -> ApiResult<Json<Vec<LearningItem>>> {
    let date = recap::parse_date_or(query.date.as_deref(), today()).map_err(api_error)?;
    db.get_due_learnings(date).map(Json).map_err(api_error)
}

/// Upcoming recap days from `?from=` (default: today) for `?days=` (default: 30).
pub async fn get_schedule(
    State(db): State<Database>,
    Query(query): Query<ScheduleQuery>,
) -> ApiResult<Json<Vec<ScheduleDay>>> {
    let from = recap::parse_date_or(query.from.as_deref(), today()).map_err(api_error)?;
    db.get_recap_schedule(from, query.days.unwrap_or(30))
        .map(Json)
        .map_err(api_error)
}

// ============================================================
// Assistant
// ============================================================

pub async fn chat_plan(
    State(assistant): State<PlanAssistant>,
    Json(input): Json<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    assistant
        .chat(input, today())
        .await
        .map(Json)
        .map_err(api_error)
}

pub async fn extract_plans(
    assistant: PlanAssistant,
    kind: ExtractionKind,
    input: ExtractPlanRequest,
) -> ApiResult<Json<ExtractedPlans>> {
    assistant
        .extract(kind, input, today())
        .await
        .map(Json)
        .map_err(api_error)
}

// ============================================================
// Planning
// ============================================================

pub async fn get_planning_data(State(db): State<Database>) -> ApiResult<Json<PlanningData>> {
    db.get_planning_data().map(Json).map_err(api_error)
}

pub async fn replace_planning_data(
    State(db): State<Database>,
    Json(data): Json<PlanningData>,
) -> ApiResult<Json<MessageResponse>> {
    db.replace_planning_data(&data).map_err(api_error)?;
    Ok(Json(MessageResponse::new(
        "All planning data updated successfully",
    )))
}

/// Returns `{ "<planType>": [...] }`.
pub async fn list_planning_items(
    State(db): State<Database>,
    Path(name): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let plan_type = parse_plan_type(&name)?;
    let items = db.get_planning_items(plan_type).map_err(api_error)?;
    Ok(Json(serde_json::json!({ plan_type.as_str(): items })))
}

pub async fn add_planning_item(
    State(db): State<Database>,
    Path(name): Path<String>,
    Json(item): Json<serde_json::Value>,
) -> ApiResult<Json<PlanningItemResponse>> {
    let plan_type = parse_plan_type(&name)?;
    let item = db.add_planning_item(plan_type, item).map_err(api_error)?;
    Ok(Json(PlanningItemResponse {
        message: format!("Item added to {}", plan_type.as_str()),
        item,
    }))
}

pub async fn replace_planning_items(
    State(db): State<Database>,
    Path(name): Path<String>,
    Json(items): Json<serde_json::Value>,
) -> ApiResult<Json<CountResponse>> {
    let plan_type = parse_plan_type(&name)?;
    let count = db
        .replace_planning_items(plan_type, items)
        .map_err(api_error)?;
    Ok(Json(CountResponse {
        message: format!("{} updated successfully", plan_type.as_str()),
        count,
    }))
}

pub async fn update_planning_item(
    State(db): State<Database>,
    Path((name, item_id)): Path<(String, String)>,
    Json(patch): Json<serde_json::Value>,
) -> ApiResult<Json<PlanningItemResponse>> {
    let plan_type = parse_plan_type(&name)?;
    let item = db
        .update_planning_item(plan_type, &item_id, patch)
        .map_err(api_error)?;
    Ok(Json(PlanningItemResponse {
        message: "Item updated".to_string(),
        item,
    }))
}

pub async fn delete_planning_item(
    State(db): State<Database>,
    Path((name, item_id)): Path<(String, String)>,
) -> ApiResult<Json<MessageResponse>> {
    let plan_type = parse_plan_type(&name)?;
    db.delete_planning_item(plan_type, &item_id)
        .map_err(api_error)?;
    Ok(Json(MessageResponse::new("Item deleted successfully")))
}
