mod handlers;

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    routing::{get, post, MethodRouter},
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::Database;
use crate::llm::{Completion, ExtractionKind, PlanAssistant};
use crate::models::ExtractPlanRequest;

/// Shared state for every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub assistant: PlanAssistant,
}

impl AppState {
    pub fn new(db: Database, completion: Arc<dyn Completion>, default_model: &str) -> Self {
        Self {
            db,
            assistant: PlanAssistant::new(completion, default_model),
        }
    }
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for PlanAssistant {
    fn from_ref(state: &AppState) -> Self {
        state.assistant.clone()
    }
}

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        // Learning items
        .route(
            "/learnings",
            get(handlers::list_learnings).post(handlers::create_learning),
        )
        .route(
            "/learnings/{id}",
            get(handlers::get_learning)
                .patch(handlers::toggle_learning_completion)
                .put(handlers::update_learning_content)
                .delete(handlers::delete_learning),
        )
        .route("/reminders", get(handlers::list_reminders))
        .route("/schedule", get(handlers::get_schedule))
        // Assistant
        .route("/chat-plan", post(handlers::chat_plan))
        .route("/extract-plan", extract_route(ExtractionKind::FullPlan))
        .route(
            "/extract-monthly-goals",
            extract_route(ExtractionKind::MonthlyGoals),
        )
        .route(
            "/extract-weekly-breakdown",
            extract_route(ExtractionKind::WeeklyBreakdown),
        )
        .route(
            "/extract-daily-breakdown",
            extract_route(ExtractionKind::DailyBreakdown),
        )
        .route(
            "/extract-daily-subtasks",
            extract_route(ExtractionKind::DailySubtasks),
        )
        .route(
            "/extract-monthly-plan",
            extract_route(ExtractionKind::MonthlyPlan),
        )
        // Planning
        .route(
            "/planning",
            get(handlers::get_planning_data).put(handlers::replace_planning_data),
        )
        .route(
            "/planning/{plan_type}",
            get(handlers::list_planning_items)
                .post(handlers::add_planning_item)
                .put(handlers::replace_planning_items),
        )
        .route(
            "/planning/{plan_type}/{item_id}",
            axum::routing::patch(handlers::update_planning_item)
                .delete(handlers::delete_planning_item),
        )
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// All extraction endpoints share one handler, parametrized by kind.
fn extract_route(kind: ExtractionKind) -> MethodRouter<AppState> {
    post(
        move |State(assistant): State<PlanAssistant>, Json(input): Json<ExtractPlanRequest>| async move {
            handlers::extract_plans(assistant, kind, input).await
        },
    )
}
