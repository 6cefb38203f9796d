use crate::analytics::{AnalyticsSnapshot, derive_today};
use crate::editor::{Editor, SubmitAction, SubscriptionForm};
use crate::errors::AppError;
use crate::manager::{DeleteConfirmation, DeleteOutcome, ManagerError};
use crate::models::{RecordId, SubscriptionRecord};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    pub confirm: bool,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let records = state.manager.records();
    Html(render_index(&derive_today(&records)))
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn get_dashboard(State(state): State<AppState>) -> Json<AnalyticsSnapshot> {
    let records = state.manager.records();
    Json(derive_today(&records))
}

pub async fn list_subscriptions(State(state): State<AppState>) -> Json<Vec<SubscriptionRecord>> {
    Json(state.manager.records().to_vec())
}

pub async fn refresh_subscriptions(
    State(state): State<AppState>,
) -> Result<Json<Vec<SubscriptionRecord>>, AppError> {
    let snapshot = state.manager.list().await?;
    Ok(Json(snapshot.records.to_vec()))
}

pub async fn delete_subscription(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<DeleteParams>,
) -> Result<StatusCode, AppError> {
    let confirmation = if params.confirm {
        DeleteConfirmation::Confirmed
    } else {
        DeleteConfirmation::Declined
    };

    match state.manager.delete(&RecordId::new(id), confirmation).await? {
        DeleteOutcome::Deleted => Ok(StatusCode::NO_CONTENT),
        DeleteOutcome::Cancelled => Err(AppError::bad_request("delete must be confirmed with confirm=true")),
    }
}

pub async fn get_editor(State(state): State<AppState>) -> Json<Editor> {
    Json(state.editor.lock().await.clone())
}

pub async fn editor_add(State(state): State<AppState>) -> Result<Json<Editor>, AppError> {
    let mut editor = state.editor.lock().await;
    editor.open_add()?;
    Ok(Json(editor.clone()))
}

pub async fn editor_view(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Editor>, AppError> {
    let record = lookup(&state, id)?;
    let mut editor = state.editor.lock().await;
    editor.open_view(&record)?;
    Ok(Json(editor.clone()))
}

pub async fn editor_edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Editor>, AppError> {
    let record = lookup(&state, id)?;
    let mut editor = state.editor.lock().await;
    editor.open_edit(&record)?;
    Ok(Json(editor.clone()))
}

pub async fn editor_close(State(state): State<AppState>) -> Json<Editor> {
    let mut editor = state.editor.lock().await;
    editor.close();
    Json(editor.clone())
}

/// Submits the open form. The editor lock is held until the write and the
/// follow-up refresh finish, so only one submission is in flight.
pub async fn editor_submit(
    State(state): State<AppState>,
    Json(values): Json<SubscriptionForm>,
) -> Result<Json<Editor>, AppError> {
    let mut editor = state.editor.lock().await;
    let result = match editor.submit(values)? {
        SubmitAction::None => return Ok(Json(editor.clone())),
        SubmitAction::Create(draft) => state.manager.create(draft).await,
        SubmitAction::Update(id, draft) => state.manager.update(&id, draft).await,
    };

    match result {
        Ok(_) => {
            editor.close();
            Ok(Json(editor.clone()))
        }
        // The write went through; only the reload failed.
        Err(err @ ManagerError::Fetch(_)) => {
            editor.close();
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}

fn lookup(state: &AppState, id: String) -> Result<SubscriptionRecord, AppError> {
    let id = RecordId::new(id);
    state
        .manager
        .find(&id)
        .ok_or_else(|| AppError::not_found(format!("subscription {id} not found")))
}
