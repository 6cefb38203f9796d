use crate::handlers;
use crate::state::AppState;
use axum::{routing::{delete, get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/healthz", get(handlers::healthz))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/subscriptions", get(handlers::list_subscriptions))
        .route("/api/subscriptions/refresh", post(handlers::refresh_subscriptions))
        .route("/api/subscriptions/:id", delete(handlers::delete_subscription))
        .route("/api/editor", get(handlers::get_editor))
        .route("/api/editor/add", post(handlers::editor_add))
        .route("/api/editor/view/:id", post(handlers::editor_view))
        .route("/api/editor/edit/:id", post(handlers::editor_edit))
        .route("/api/editor/close", post(handlers::editor_close))
        .route("/api/editor/submit", post(handlers::editor_submit))
        .with_state(state)
}
